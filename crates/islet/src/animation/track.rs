//! Keyframe tracks: sorted time/value tables sampled by binary search.

use super::{
    data::Animatable,
    error::{IsletAnimationError, Result},
};

/// How a track blends between two neighbouring keyframes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Interpolation {
    Linear,
    Step,
    CubicSpline,
}

/// A keyframe track over any [`Animatable`] value.
///
/// Times are strictly ascending once the track is built. Tracks are never
/// edited in place; behaviour changes replace the whole track.
#[derive(Debug, Clone)]
pub enum KeyframeTrack<T> {
    Linear {
        times: Vec<f64>,
        values: Vec<T>,
    },
    Step {
        times: Vec<f64>,
        values: Vec<T>,
    },
    CubicSpline {
        times: Vec<f64>,
        values: Vec<T>,
        in_tangents: Vec<T>,
        out_tangents: Vec<T>,
    },
}

impl<T: Animatable> KeyframeTrack<T> {
    /// Creates a linearly interpolated track.
    ///
    /// Keyframes may arrive in any order. When two keyframes share a time the
    /// one that came last in the input wins.
    pub fn new_linear(keyframes: impl IntoIterator<Item = (f64, T)>) -> Result<Self> {
        let (times, values) = sorted_keyframes(keyframes.into_iter().collect())?
            .into_iter()
            .unzip();
        Ok(Self::Linear { times, values })
    }

    /// Creates a step track, holding each value until the next keyframe.
    /// Same ordering rules as [`Self::new_linear`].
    pub fn new_step(keyframes: impl IntoIterator<Item = (f64, T)>) -> Result<Self> {
        let (times, values) = sorted_keyframes(keyframes.into_iter().collect())?
            .into_iter()
            .unzip();
        Ok(Self::Step { times, values })
    }

    /// Creates a cubic spline track from parallel tables.
    pub fn new_cubic_spline(
        times: Vec<f64>,
        values: Vec<T>,
        in_tangents: Vec<T>,
        out_tangents: Vec<T>,
    ) -> Result<Self> {
        if values.len() != times.len() {
            return Err(IsletAnimationError::ValueLengthMismatch {
                times: times.len(),
                values: values.len(),
            });
        }

        if in_tangents.len() != times.len() || out_tangents.len() != times.len() {
            return Err(IsletAnimationError::TangentLengthMismatch {
                keyframes: times.len(),
                in_tangents: in_tangents.len(),
                out_tangents: out_tangents.len(),
            });
        }

        let keyframes = times
            .into_iter()
            .zip(
                values
                    .into_iter()
                    .zip(in_tangents.into_iter().zip(out_tangents)),
            )
            .collect();

        let mut times = Vec::new();
        let mut values = Vec::new();
        let mut in_tangents = Vec::new();
        let mut out_tangents = Vec::new();

        for (time, (value, (in_tangent, out_tangent))) in sorted_keyframes(keyframes)? {
            times.push(time);
            values.push(value);
            in_tangents.push(in_tangent);
            out_tangents.push(out_tangent);
        }

        Ok(Self::CubicSpline {
            times,
            values,
            in_tangents,
            out_tangents,
        })
    }

    /// A single-keyframe track that always yields `value`.
    pub fn constant(value: T) -> Self {
        Self::Linear {
            times: vec![0.0],
            values: vec![value],
        }
    }

    /// Returns the keyframe times for this track.
    pub fn times(&self) -> &[f64] {
        match self {
            Self::Linear { times, .. } => times,
            Self::Step { times, .. } => times,
            Self::CubicSpline { times, .. } => times,
        }
    }

    /// Returns the keyframe values for this track.
    pub fn values(&self) -> &[T] {
        match self {
            Self::Linear { values, .. } => values,
            Self::Step { values, .. } => values,
            Self::CubicSpline { values, .. } => values,
        }
    }

    pub fn interpolation(&self) -> Interpolation {
        match self {
            Self::Linear { .. } => Interpolation::Linear,
            Self::Step { .. } => Interpolation::Step,
            Self::CubicSpline { .. } => Interpolation::CubicSpline,
        }
    }

    pub fn len(&self) -> usize {
        self.times().len()
    }

    // construction rejects empty tables
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn start_time(&self) -> f64 {
        self.times()[0]
    }

    pub fn end_time(&self) -> f64 {
        self.times()[self.len() - 1]
    }

    pub fn duration(&self) -> f64 {
        self.end_time() - self.start_time()
    }

    /// Samples the track at `time`.
    ///
    /// Times at or before the first keyframe yield the first value, times at
    /// or after the last keyframe yield the last value. Nothing is
    /// extrapolated and nothing wraps; looping is decided by the caller.
    pub fn sample(&self, time: f64) -> T {
        let values = self.values();

        match self.search(time) {
            KeyframeBounds::ExactHit(index) => values[index].clone(),
            KeyframeBounds::Between(left_index, right_index) => {
                let times = self.times();
                let left_time = times[left_index];
                let right_time = times[right_index];
                let delta_time = right_time - left_time;
                let interpolation_time = (time - left_time) / delta_time;

                match self {
                    Self::Linear { values, .. } => T::interpolate_linear(
                        &values[left_index],
                        &values[right_index],
                        interpolation_time,
                    ),
                    Self::Step { values, .. } => values[left_index].clone(),
                    Self::CubicSpline {
                        values,
                        in_tangents,
                        out_tangents,
                        ..
                    } => T::interpolate_cubic_spline(
                        &values[left_index],
                        &out_tangents[left_index],
                        &values[right_index],
                        &in_tangents[right_index],
                        delta_time,
                        interpolation_time,
                    ),
                }
            }
        }
    }

    /// Alias of [`Self::sample`].
    pub fn value(&self, time: f64) -> T {
        self.sample(time)
    }

    // ExactHit covers both the clamped ends and a time that lands on a keyframe
    // Between(i, i + 1) means times[i] < time < times[i + 1]
    fn search(&self, time: f64) -> KeyframeBounds {
        let times = self.times();
        let last = times.len() - 1;

        if time.is_nan() || time <= times[0] {
            return KeyframeBounds::ExactHit(0);
        }
        if time >= times[last] {
            return KeyframeBounds::ExactHit(last);
        }

        // here times[0] < time < times[last], so right is in 1..=last
        let right = times.partition_point(|t| *t <= time);
        let left = right - 1;

        if times[left] == time {
            KeyframeBounds::ExactHit(left)
        } else {
            KeyframeBounds::Between(left, right)
        }
    }
}

enum KeyframeBounds {
    ExactHit(usize),
    Between(usize, usize),
}

// validates, stable-sorts by time and collapses duplicate times (last wins)
fn sorted_keyframes<V>(mut keyframes: Vec<(f64, V)>) -> Result<Vec<(f64, V)>> {
    if keyframes.is_empty() {
        return Err(IsletAnimationError::EmptyKeyframes);
    }

    if let Some((index, (time, _))) = keyframes
        .iter()
        .enumerate()
        .find(|(_, (time, _))| !time.is_finite())
    {
        return Err(IsletAnimationError::NonFiniteTime { index, time: *time });
    }

    keyframes.sort_by(|(a, _), (b, _)| a.total_cmp(b));

    let mut deduped: Vec<(f64, V)> = Vec::with_capacity(keyframes.len());
    for (time, value) in keyframes {
        match deduped.last_mut() {
            Some(last) if last.0 == time => last.1 = value,
            _ => deduped.push((time, value)),
        }
    }

    Ok(deduped)
}
