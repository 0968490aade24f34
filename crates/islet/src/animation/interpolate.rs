use std::ops::{Add, Mul};

/// Hermite basis weights `(h00, h10, h01, h11)` for a normalized time `t`.
pub(super) fn hermite_basis(t: f64) -> [f64; 4] {
    let t2 = t * t;
    let t3 = t2 * t;

    [
        2.0 * t3 - 3.0 * t2 + 1.0,
        t3 - 2.0 * t2 + t,
        -2.0 * t3 + 3.0 * t2,
        t3 - t2,
    ]
}

/// Cubic Hermite segment between `from` and `to`.
///
/// Tangents are per second, so they are scaled by the segment length.
pub(super) fn hermite<T>(
    from: T,
    from_out_tangent: T,
    to: T,
    to_in_tangent: T,
    segment_duration: f64,
    t: f64,
) -> T
where
    T: Mul<f32, Output = T> + Add<Output = T>,
{
    let [h00, h10, h01, h11] = hermite_basis(t).map(|weight| weight as f32);
    let segment_duration = segment_duration as f32;

    from * h00
        + from_out_tangent * (h10 * segment_duration)
        + to * h01
        + to_in_tangent * (h11 * segment_duration)
}
