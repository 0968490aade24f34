use std::path::Path;

use anyhow::Context;
use islet::{config::SceneConfig, controls::ControlKey};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub ticks: usize,
    /// Seconds advanced per tick.
    pub tick_delta: f64,
    /// Used when `RUST_LOG` is unset.
    pub log_filter: String,
    pub update_timings: bool,
    /// Control keys delivered before the tick with the same index.
    pub key_presses: Vec<KeyPress>,
    pub scene: SceneConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyPress {
    pub at_tick: usize,
    pub key: ControlKey,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            ticks: 60 * 45,
            tick_delta: 1.0 / 60.0,
            log_filter: "info".to_string(),
            update_timings: false,
            key_presses: vec![
                KeyPress {
                    at_tick: 120,
                    key: ControlKey::Left,
                },
                KeyPress {
                    at_tick: 240,
                    key: ControlKey::Raise,
                },
                KeyPress {
                    at_tick: 360,
                    key: ControlKey::Down,
                },
            ],
            scene: SceneConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Reads a JSON config, or the defaults when no path is given.
    /// Missing fields fall back to their defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading viewer config {}", path.display()))?;

        serde_json::from_str(&text)
            .with_context(|| format!("parsing viewer config {}", path.display()))
    }
}
