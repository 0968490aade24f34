use crate::{animation::LoopPolicy, controls::NudgeControl, debug::IsletLogging};

/// Scene-wide tuning. The defaults give the island scene its usual pacing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SceneConfig {
    /// Loop applied to the rotation and scale of generated clips.
    pub loop_policy: LoopPolicy,
    /// The clock restarts at zero after this many seconds. `None` runs forever.
    pub clock_reset_after: Option<f64>,
    pub nudge: NudgeControl,
    pub glide_steps: usize,
    pub orbit_steps: usize,
    pub orbit_radius: f32,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub logging: IsletLogging,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            loop_policy: LoopPolicy::default(),
            clock_reset_after: Some(41.0),
            nudge: NudgeControl::default(),
            glide_steps: 100,
            orbit_steps: 1000,
            orbit_radius: 20.0,
            logging: IsletLogging::default(),
        }
    }
}
