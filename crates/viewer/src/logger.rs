use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn init_logger(default_filter: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_filter))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .try_init()?;

    std::panic::set_hook(Box::new(tracing_panic::panic_hook));

    Ok(())
}
