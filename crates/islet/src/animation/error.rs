//! Animation error types and results.

use thiserror::Error;

use crate::transforms::IsletTransformError;

use super::AnimationKey;

/// Animation result type.
pub type Result<T> = std::result::Result<T, IsletAnimationError>;

/// Errors related to keyframe construction and animation playback.
#[derive(Error, Debug)]
pub enum IsletAnimationError {
    #[error("[animation] {0:?}")]
    Transform(#[from] IsletTransformError),

    #[error("[animation] cannot build a track from an empty keyframe table")]
    EmptyKeyframes,

    #[error("[animation] keyframe {index} has a non-finite time: {time}")]
    NonFiniteTime { index: usize, time: f64 },

    #[error("[animation] value count mismatch, times: {times} values: {values}")]
    ValueLengthMismatch { times: usize, values: usize },

    #[error("[animation] tangent count mismatch, keyframes: {keyframes} in_tangents: {in_tangents} out_tangents: {out_tangents}")]
    TangentLengthMismatch {
        keyframes: usize,
        in_tangents: usize,
        out_tangents: usize,
    },

    #[error("[animation] missing animation key {0:?}")]
    MissingKey(AnimationKey),
}
