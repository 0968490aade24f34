//! Discrete control events and the node roles that react to them.

use glam::Vec3;
use strum::{Display, EnumIter, EnumString};

use crate::procedural::ClipMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ControlKey {
    Up,
    Down,
    Left,
    Right,
    #[strum(to_string = "lower", serialize = "d")]
    Lower,
    #[strum(to_string = "raise", serialize = "u")]
    Raise,
}

impl ControlKey {
    /// Unit direction in scene space. Up/Down move along Z (toward/away from the viewer).
    pub fn direction(&self) -> Vec3 {
        match self {
            Self::Up => Vec3::NEG_Z,
            Self::Down => Vec3::Z,
            Self::Left => Vec3::NEG_X,
            Self::Right => Vec3::X,
            Self::Lower => Vec3::NEG_Y,
            Self::Raise => Vec3::Y,
        }
    }
}

/// What an animated node does when a control key arrives.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ControlRole {
    /// Moves by a fixed distance in the key's direction and stays there.
    Pointer(NudgeControl),
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NudgeControl {
    pub distance: f32,
    /// Length of the replacement clip, in keyframes.
    pub steps: usize,
}

impl Default for NudgeControl {
    fn default() -> Self {
        Self {
            distance: 1.0,
            steps: 100,
        }
    }
}

impl ControlRole {
    /// The clip this role switches to for `key`, or `None` if it ignores the key.
    pub fn respond(&self, key: ControlKey) -> Option<ClipMode> {
        match self {
            Self::Pointer(nudge) => Some(ClipMode::Nudge {
                direction: key.direction(),
                distance: nudge.distance,
            }),
        }
    }

    pub fn clip_steps(&self) -> usize {
        match self {
            Self::Pointer(nudge) => nudge.steps,
        }
    }
}
