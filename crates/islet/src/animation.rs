mod animations;
mod clock;
mod data;
mod error;
mod interpolate;
mod track;
mod transform_track;

pub use animations::{AnimatedNode, AnimationKey, Animations};
pub use clock::{AnimationClock, AnimationState, ClockLoopStyle, PlayDirection};
pub use data::Animatable;
pub use error::{IsletAnimationError, Result};
pub use track::{Interpolation, KeyframeTrack};
pub use transform_track::{LoopPolicy, LoopWrap, TransformTrack};

#[cfg(test)]
mod tests;
