use glam::{Quat, Vec3};

use super::interpolate::{hermite, hermite_basis};

/// A value type a [`KeyframeTrack`](super::KeyframeTrack) can blend.
///
/// Each type carries its own blend: a `KeyframeTrack<Quat>` always slerps.
pub trait Animatable: Clone {
    /// Blend at `t` in `[0, 1]` between two keyframes.
    fn interpolate_linear(from: &Self, to: &Self, t: f64) -> Self;

    fn interpolate_cubic_spline(
        from: &Self,
        from_out_tangent: &Self,
        to: &Self,
        to_in_tangent: &Self,
        segment_duration: f64,
        t: f64,
    ) -> Self;
}

impl Animatable for Vec3 {
    fn interpolate_linear(from: &Self, to: &Self, t: f64) -> Self {
        from.lerp(*to, t as f32)
    }

    fn interpolate_cubic_spline(
        from: &Self,
        from_out_tangent: &Self,
        to: &Self,
        to_in_tangent: &Self,
        segment_duration: f64,
        t: f64,
    ) -> Self {
        hermite(*from, *from_out_tangent, *to, *to_in_tangent, segment_duration, t)
    }
}

impl Animatable for Quat {
    // glam's slerp takes the short arc when the dot product is negative
    fn interpolate_linear(from: &Self, to: &Self, t: f64) -> Self {
        from.slerp(*to, t as f32)
    }

    fn interpolate_cubic_spline(
        from: &Self,
        from_out_tangent: &Self,
        to: &Self,
        to_in_tangent: &Self,
        segment_duration: f64,
        t: f64,
    ) -> Self {
        // same hemisphere for both ends, otherwise the curve takes the long way round
        let (to, to_in_tangent) = if from.dot(*to) < 0.0 {
            (-*to, -*to_in_tangent)
        } else {
            (*to, *to_in_tangent)
        };

        // Quat * f32 scales the components here, it is not a rotation
        hermite(*from, *from_out_tangent, to, to_in_tangent, segment_duration, t).normalize()
    }
}

impl Animatable for f32 {
    fn interpolate_linear(from: &Self, to: &Self, t: f64) -> Self {
        from + t as f32 * (to - from)
    }

    fn interpolate_cubic_spline(
        from: &Self,
        from_out_tangent: &Self,
        to: &Self,
        to_in_tangent: &Self,
        segment_duration: f64,
        t: f64,
    ) -> Self {
        f64::interpolate_cubic_spline(
            &(*from as f64),
            &(*from_out_tangent as f64),
            &(*to as f64),
            &(*to_in_tangent as f64),
            segment_duration,
            t,
        ) as f32
    }
}

impl Animatable for f64 {
    fn interpolate_linear(from: &Self, to: &Self, t: f64) -> Self {
        from + t * (to - from)
    }

    fn interpolate_cubic_spline(
        from: &Self,
        from_out_tangent: &Self,
        to: &Self,
        to_in_tangent: &Self,
        segment_duration: f64,
        t: f64,
    ) -> Self {
        let [h00, h10, h01, h11] = hermite_basis(t);

        h00 * from
            + h10 * from_out_tangent * segment_duration
            + h01 * to
            + h11 * to_in_tangent * segment_duration
    }
}
