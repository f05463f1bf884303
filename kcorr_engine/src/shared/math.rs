use crate::core::types::{Number, Vector3};
use std::f64::consts::{FRAC_PI_2, PI};

/// Your standard 3D cross product, `a × b`
pub fn cross(a: Vector3, b: Vector3) -> Vector3 { a.cross(b) }

/// Scales `v` to unit length.
///
/// A vector with a magnitude of exactly zero is returned as-is, so the result is only
/// guaranteed to be normalised if the input was non-zero.
pub fn normalize_or_unchanged(v: Vector3) -> Vector3 {
    let len = v.length();
    if len == 0. {
        return v;
    }
    v * len.recip()
}

/// Folds an angle in `0..=π` into `0..=π/2`, so that angles past the tangent plane
/// are measured from the opposite side of the normal
pub fn fold_angle(theta: Number) -> Number {
    if theta > FRAC_PI_2 {
        PI - theta
    } else {
        theta
    }
}

/// Angle between the direction `v` and the normal `n` (or `-n`), in `0..=π/2`.
///
/// The dot product is clamped before `acos`, so slightly denormalised inputs don't produce NaN.
pub fn angle_to_normal(v: Vector3, n: Vector3) -> Number {
    fold_angle(Number::acos(v.dot(n).clamp(-1., 1.)))
}

/// Calculates the vector reflection of vector `d` across the surface normal `n`
pub fn reflect(d: Vector3, n: Vector3) -> Vector3 {
    d - n * (2. * d.dot(n))
}
