use glam::{Mat4, Quat, Vec3};

use crate::transforms::Transform;

use super::track::KeyframeTrack;

/// How a clip maps an unbounded time onto its rotation and scale keyframes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoopWrap {
    /// Time is passed through untouched and the track clamps at its ends.
    Clamp,
    /// Time restarts at zero every period.
    #[default]
    Repeat,
    /// Time runs forward for one period, then backward for the next.
    PingPong,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoopPolicy {
    pub period: f64,
    pub wrap: LoopWrap,
}

impl Default for LoopPolicy {
    fn default() -> Self {
        Self::repeat(Self::DEFAULT_PERIOD)
    }
}

impl LoopPolicy {
    pub const DEFAULT_PERIOD: f64 = 10.0;

    pub const CLAMP: Self = Self {
        period: 0.0,
        wrap: LoopWrap::Clamp,
    };

    pub fn repeat(period: f64) -> Self {
        Self {
            period,
            wrap: LoopWrap::Repeat,
        }
    }

    pub fn ping_pong(period: f64) -> Self {
        Self {
            period,
            wrap: LoopWrap::PingPong,
        }
    }

    /// Maps `time` into the loop. A non-positive or non-finite period disables wrapping.
    pub fn wrap_time(&self, time: f64) -> f64 {
        if !(self.period.is_finite() && self.period > 0.0) {
            return time;
        }

        match self.wrap {
            LoopWrap::Clamp => time,
            LoopWrap::Repeat => time.rem_euclid(self.period),
            LoopWrap::PingPong => {
                let cycle = time.rem_euclid(self.period * 2.0);
                if cycle <= self.period {
                    cycle
                } else {
                    self.period * 2.0 - cycle
                }
            }
        }
    }
}

/// Three independent tracks composed into a single `T * R * S` transform.
///
/// The loop policy applies to rotation and scale only: translation is always
/// sampled at the raw time, so a clip can travel while it spins.
#[derive(Debug, Clone)]
pub struct TransformTrack {
    pub translation: KeyframeTrack<Vec3>,
    pub rotation: KeyframeTrack<Quat>,
    pub scale: KeyframeTrack<Vec3>,
    pub loop_policy: LoopPolicy,
}

impl TransformTrack {
    pub fn new(
        translation: KeyframeTrack<Vec3>,
        rotation: KeyframeTrack<Quat>,
        scale: KeyframeTrack<Vec3>,
        loop_policy: LoopPolicy,
    ) -> Self {
        Self {
            translation,
            rotation,
            scale,
            loop_policy,
        }
    }

    /// A track that holds `transform` forever.
    pub fn constant(transform: Transform) -> Self {
        Self::new(
            KeyframeTrack::constant(transform.translation),
            KeyframeTrack::constant(transform.rotation),
            KeyframeTrack::constant(transform.scale),
            LoopPolicy::CLAMP,
        )
    }

    pub fn translation_at(&self, time: f64) -> Vec3 {
        self.translation.sample(time)
    }

    pub fn rotation_at(&self, time: f64) -> Quat {
        self.rotation.sample(self.loop_policy.wrap_time(time))
    }

    pub fn scale_at(&self, time: f64) -> Vec3 {
        self.scale.sample(self.loop_policy.wrap_time(time))
    }

    pub fn sample(&self, time: f64) -> Transform {
        Transform {
            translation: self.translation_at(time),
            rotation: self.rotation_at(time),
            scale: self.scale_at(time),
        }
    }

    /// The composed matrix at `time`.
    pub fn value(&self, time: f64) -> Mat4 {
        self.sample(time).to_matrix()
    }

    /// The last keyframe time across all three tracks.
    pub fn end_time(&self) -> f64 {
        self.translation
            .end_time()
            .max(self.rotation.end_time())
            .max(self.scale.end_time())
    }
}
