mod config;
mod island;
mod logger;
mod sink;

use std::path::PathBuf;

use config::ViewerConfig;
use island::Island;
use sink::LogSink;

fn main() -> anyhow::Result<()> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = ViewerConfig::load(config_path.as_deref())?;

    logger::init_logger(&config.log_filter)?;

    let report = run(&config)?;

    tracing::info!(
        "{} frames, {} draws ({} skinned), {} control responses, clock at {:.3}s",
        report.frames,
        report.draws,
        report.skinned_draws,
        report.control_responses,
        report.final_time
    );

    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub frames: usize,
    pub draws: usize,
    pub skinned_draws: usize,
    pub control_responses: usize,
    pub final_time: f64,
}

/// Builds the island and drives it for `config.ticks` frames: scripted keys,
/// then the tick, then the draw calls.
fn run(config: &ViewerConfig) -> anyhow::Result<RunReport> {
    let mut island = Island::build(&config.scene)?;
    island.scene.logging.update_timings = config.update_timings;

    let mut sink = LogSink::default();
    let mut report = RunReport::default();

    for frame in 0..config.ticks {
        for press in config.key_presses.iter().filter(|press| press.at_tick == frame) {
            let responses = island.scene.handle_control(press.key)?;
            tracing::info!("{} at frame {}: {} node(s) moved", press.key, frame, responses);
            report.control_responses += responses;
        }

        island.scene.tick(config.tick_delta)?;
        island.scene.render(&mut sink)?;
        report.frames += 1;
    }

    for (name, key) in &island.drivers {
        let position = island.scene.transforms.get_world(*key)?.w_axis.truncate();
        tracing::debug!("{name} at {position:?}");
    }

    let tip = island.cylinder.rest_positions.len().saturating_sub(1);
    if let Some(position) = island.cylinder.skinned_position(&island.scene, tip)? {
        tracing::debug!("cylinder tip skinned to {position:?}");
    }

    report.draws = sink.draws;
    report.skinned_draws = sink.skinned_draws;
    report.final_time = island.scene.time();

    Ok(report)
}

#[cfg(test)]
mod tests;
