//! Analytic evaluation of the K-correlation BSDF, used when the host does its own importance sampling

use crate::core::types::{Number, Vector3};
use crate::scatter::frame::LocalFrame;
use crate::scatter::params::KCorrelation;
use crate::shared::{math, validate};

/// Evaluates `BSDF·cos(θ)` for light leaving in the `scattered` direction, where `θ` is the
/// angle between `scattered` and the surface normal.
///
/// The host expects the cosine-weighted value here, not the raw BSDF. Note that the cosine appears
/// twice in the result: once inside the distribution itself and once for the projected solid angle.
///
/// `inc_ang` is the (folded) angle of incidence of the specular ray.
pub fn bsdf_cos(model: &KCorrelation, frame: &LocalFrame, inc_ang: Number, scattered: Vector3) -> Number {
    let cos_theta = math::angle_to_normal(scattered, frame.n).cos();
    let xsq = tangent_distance_sqr(frame, scattered);

    let val = model.tis * model.normalisation() * inc_ang.cos() * cos_theta / model.falloff(xsq) * cos_theta;
    validate::number(val);
    val
}

/// Squared distance between the projections of `scattered` and the specular ray onto the tangent plane
pub fn tangent_distance_sqr(frame: &LocalFrame, scattered: Vector3) -> Number {
    let b = frame.project(scattered);
    let xp = b.x - frame.bo;
    xp * xp + b.y * b.y
}
