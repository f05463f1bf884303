use crate::core::types::{Number, Vector2, Vector3};
use crate::shared::{math, validate};

/// Smallest `1 - bo²` that can still be sampled, a cosine of incidence of about `1e-6`
pub const GRAZING_LIMIT: Number = 1e-12;

/// Orthonormal frame at the scatter point, built fresh for every call.
///
/// `p` and `q` span the tangent plane, and `p` is chosen so that the specular ray,
/// projected onto the surface, lies on the `p` axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LocalFrame {
    pub n: Vector3,
    pub p: Vector3,
    pub q: Vector3,
    /// Tangential offset of the specular ray along `p`
    pub bo: Number,
    /// Cosine between the specular ray and the normal, unclamped
    pub cos_specular: Number,
}

impl LocalFrame {
    /// Builds the frame for the `specular` ray leaving a surface with the given `normal`.
    ///
    /// If the specular ray is within `parallel_threshold` (as a cosine) of the normal, its projection
    /// onto the surface is too small to pick a direction from, so a fixed world axis is used for `p` instead:
    /// world-Z, or world-X if the normal itself is close to world-Z.
    pub fn new(specular: Vector3, normal: Vector3, parallel_threshold: Number) -> Self {
        let n = normal;
        let cos_specular = specular.dot(n);

        let p = if cos_specular.abs() > parallel_threshold {
            if n.z.abs() < 0.9 {
                Vector3::Z
            } else {
                Vector3::X
            }
        } else {
            specular
        };

        let q = math::normalize_or_unchanged(math::cross(n, p));
        // `n` and `q` are already orthonormal, so no need to normalise again
        let p = math::cross(n, q);
        let bo = p.dot(specular);

        let frame = Self {
            n,
            p,
            q,
            bo,
            cos_specular,
        };
        validate::frame(&frame);
        frame
    }

    /// Angle of incidence, folded into `0..=π/2`
    pub fn incidence_angle(&self) -> Number { math::fold_angle(Number::acos(self.cos_specular.clamp(-1., 1.))) }

    /// Whether the specular ray lies (nearly) in the tangent plane.
    ///
    /// The sampler's disk converges on `(bo, 0)`, where the weight is about `sqrt(1 - bo²)`. Once that is
    /// tiny (or zero, exactly at grazing), the rejection loop would effectively never accept.
    pub fn is_grazing(&self) -> bool { !(1. - self.bo * self.bo > GRAZING_LIMIT) }

    /// Coordinates of `v` projected onto the tangent plane, as `(v·p, v·q)`
    pub fn project(&self, v: Vector3) -> Vector2 { Vector2::new(v.dot(self.p), v.dot(self.q)) }

    /// The 3D vector in the tangent plane with coordinates `(bp, bq)`
    pub fn tangent(&self, bp: Number, bq: Number) -> Vector3 { self.p * bp + self.q * bq }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::FRAC_PI_4;

    const THRESHOLD: Number = 0.999_999_9;

    fn assert_orthonormal(f: &LocalFrame) {
        for v in [f.n, f.p, f.q] {
            assert_relative_eq!(v.length(), 1., epsilon = 1e-12);
        }
        assert_abs_diff_eq!(f.n.dot(f.p), 0., epsilon = 1e-12);
        assert_abs_diff_eq!(f.n.dot(f.q), 0., epsilon = 1e-12);
        assert_abs_diff_eq!(f.p.dot(f.q), 0., epsilon = 1e-12);
    }

    #[test]
    fn specular_projects_along_p() {
        let n = Vector3::Z;
        let s = Vector3::new(FRAC_PI_4.sin(), 0., FRAC_PI_4.cos());
        let f = LocalFrame::new(s, n, THRESHOLD);

        assert_orthonormal(&f);
        // `p = n × (n × s)`, which points against the projected specular ray
        assert_relative_eq!(f.p, -Vector3::X, epsilon = 1e-12);
        assert_relative_eq!(f.bo, -FRAC_PI_4.sin(), epsilon = 1e-12);
        assert_abs_diff_eq!(f.q.dot(s), 0., epsilon = 1e-12);
        assert_relative_eq!(f.incidence_angle(), FRAC_PI_4, epsilon = 1e-12);

        let projected = f.project(s);
        assert_relative_eq!(projected.x, f.bo);
        assert_abs_diff_eq!(projected.y, 0., epsilon = 1e-12);
        // Rebuilding the specular ray from its projection and normal component
        assert_relative_eq!(f.tangent(projected.x, projected.y) + n * f.cos_specular, s, epsilon = 1e-12);
    }

    #[test]
    fn normal_incidence_uses_fallback_axis() {
        let f = LocalFrame::new(Vector3::Z, Vector3::Z, THRESHOLD);
        assert_orthonormal(&f);
        // World-Z is parallel to the normal, so world-X was used
        assert_abs_diff_eq!(f.bo, 0., epsilon = 1e-12);
        assert_eq!(f.incidence_angle(), 0.);

        let n = Vector3::X;
        let f = LocalFrame::new(n, n, THRESHOLD);
        assert_orthonormal(&f);
        assert_relative_eq!(f.p.dot(Vector3::Z).abs(), 1.);
    }

    #[test]
    fn anti_parallel_specular_uses_fallback_axis() {
        let n = Vector3::new(0., 1., 0.);
        let f = LocalFrame::new(-n, n, THRESHOLD);
        assert_orthonormal(&f);
        assert_abs_diff_eq!(f.bo, 0., epsilon = 1e-12);
        // Folded back into the front quarter
        assert_abs_diff_eq!(f.incidence_angle(), 0., epsilon = 1e-12);
    }

    #[test]
    fn transmitted_ray_angle_is_folded() {
        let n = Vector3::Z;
        let s = Vector3::new(0.6, 0., -0.8);
        let f = LocalFrame::new(s, n, THRESHOLD);
        assert_orthonormal(&f);
        assert_relative_eq!(f.incidence_angle(), Number::acos(0.8), epsilon = 1e-12);
        assert_relative_eq!(f.bo, -0.6, epsilon = 1e-12);
    }

    #[test]
    fn grazing_detection() {
        let n = Vector3::Z;
        let f = LocalFrame::new(Vector3::X, n, THRESHOLD);
        assert_orthonormal(&f);
        assert_eq!(f.bo.abs(), 1.);
        assert!(f.is_grazing());

        // Just above the surface is still sampleable
        let s = Vector3::new(1., 0., 1e-3).normalize();
        assert!(!LocalFrame::new(s, n, THRESHOLD).is_grazing());
        assert!(!LocalFrame::new(Vector3::new(0.6, 0., 0.8), n, THRESHOLD).is_grazing());
    }
}
