//! Synthetic keyframe clips for a small closed set of behaviours.
//!
//! Generation is pure: the same request always yields the same tables.

use glam::{Quat, Vec3};

use crate::animation::{KeyframeTrack, LoopPolicy, Result, TransformTrack};

/// Height the glide starts at, above its origin.
const GLIDE_BASE_HEIGHT: f32 = 20.0;
/// Forward travel per glide step, along Z.
const GLIDE_FORWARD_STEP: f32 = 4.5;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClipMode {
    /// Stay at the origin.
    Hold,
    /// Jump once by `direction * distance` and stay there.
    Nudge { direction: Vec3, distance: f32 },
    /// Climb one unit per step while travelling along Z; `heading` picks the sign.
    Glide { heading: f32 },
    /// Circle the origin in the XZ plane at one radian per step, yawing by
    /// `heading * angular_step_degrees` per step.
    Orbit {
        radius: f32,
        angular_step_degrees: f32,
        heading: f32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClipRequest {
    pub mode: ClipMode,
    pub origin: Option<Vec3>,
    pub steps: usize,
    /// Offset of the translation keys. Rotation and scale keys stay in
    /// loop-local time since they are sampled through the loop policy.
    pub start_time: f64,
}

impl ClipRequest {
    pub fn new(mode: ClipMode, steps: usize) -> Self {
        Self {
            mode,
            origin: None,
            steps,
            start_time: 0.0,
        }
    }

    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn with_start_time(mut self, start_time: f64) -> Self {
        self.start_time = start_time;
        self
    }

    pub fn generate(&self) -> ClipKeyframes {
        let origin = self.origin.unwrap_or(Vec3::ZERO);
        let mut keyframes = ClipKeyframes::with_capacity(self.steps);

        for step in 0..self.steps {
            let local_time = step as f64;
            let i = step as f32;

            let (translation, rotation) = match self.mode {
                ClipMode::Hold => (origin, Quat::IDENTITY),
                ClipMode::Nudge {
                    direction,
                    distance,
                } => (origin + direction * distance, Quat::IDENTITY),
                ClipMode::Glide { heading } => (
                    origin + Vec3::new(0.0, GLIDE_BASE_HEIGHT + i, GLIDE_FORWARD_STEP * i * heading),
                    Quat::IDENTITY,
                ),
                ClipMode::Orbit {
                    radius,
                    angular_step_degrees,
                    heading,
                } => (
                    origin + Vec3::new(radius * i.cos(), 0.0, radius * i.sin()),
                    Quat::from_rotation_y((i * heading * angular_step_degrees).to_radians()),
                ),
            };

            keyframes
                .translation
                .push((self.start_time + local_time, translation));
            keyframes.rotation.push((local_time, rotation));
            keyframes.scale.push((local_time, Vec3::ONE));
        }

        keyframes
    }
}

/// Raw keyframe tables, before they are validated into tracks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClipKeyframes {
    pub translation: Vec<(f64, Vec3)>,
    pub rotation: Vec<(f64, Quat)>,
    pub scale: Vec<(f64, Vec3)>,
}

impl ClipKeyframes {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            translation: Vec::with_capacity(capacity),
            rotation: Vec::with_capacity(capacity),
            scale: Vec::with_capacity(capacity),
        }
    }

    /// Builds linear tracks; fails if the request produced no steps.
    pub fn into_track(self, loop_policy: LoopPolicy) -> Result<TransformTrack> {
        Ok(TransformTrack::new(
            KeyframeTrack::new_linear(self.translation)?,
            KeyframeTrack::new_linear(self.rotation)?,
            KeyframeTrack::new_linear(self.scale)?,
            loop_policy,
        ))
    }
}

#[cfg(test)]
mod tests;
