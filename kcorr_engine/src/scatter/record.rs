use crate::core::types::{Number, Vector3};
use crate::scatter::params::RawModelParams;
use crate::scatter::ScatterOutcome;
use valuable::Valuable;

/// Which side of the surface the specular ray is on, which determines the index difference
#[derive(Copy, Clone, Debug, PartialEq, Valuable)]
pub enum SurfaceMode {
    Reflection,
    Refraction,
    /// The host's scatter function viewer, where the index difference is given directly
    Viewer,
    /// Any selector the plugin doesn't know about. Always rejected
    Unknown(Number),
}

impl SurfaceMode {
    pub fn from_selector(raw: Number) -> Self {
        match raw {
            r if r == 0. => Self::Reflection,
            r if r == 1. => Self::Refraction,
            r if r == 2. => Self::Viewer,
            r => Self::Unknown(r),
        }
    }

    pub fn selector(self) -> Number {
        match self {
            Self::Reflection => 0.,
            Self::Refraction => 1.,
            Self::Viewer => 2.,
            Self::Unknown(r) => r,
        }
    }
}

/// What the host is asking the evaluator to do
#[derive(Copy, Clone, Debug, PartialEq, Valuable)]
pub enum ImportanceRequest {
    /// Pick a random scattered direction
    None,
    /// Report the total integrated scatter
    Tis,
    /// Report `BSDF·cos(θ)` for the host's candidate direction
    Bsdf,
    /// Some other negative request code. The call succeeds without doing anything
    Unsupported(Number),
}

impl ImportanceRequest {
    pub const TIS_CODE: Number = -1.;
    pub const BSDF_CODE: Number = -2.;

    pub fn from_code(raw: Number) -> Self {
        // NaN counts as a normal request, same as any non-negative value
        if !(raw < 0.) {
            Self::None
        } else if raw == Self::TIS_CODE {
            Self::Tis
        } else if raw == Self::BSDF_CODE {
            Self::Bsdf
        } else {
            Self::Unsupported(raw)
        }
    }
}

/// Everything known about one ray hitting a K-correlation surface.
///
/// Fields marked as outputs are overwritten by [`ScatterRecord::apply`], all others are left untouched.
/// Lengths (wavelengths, roughness) are in microns.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScatterRecord {
    /// Position of the specular ray on the surface. Not used by the model
    pub position: Vector3,
    /// Input: the specular ray. Output: the scattered ray
    pub direction: Vector3,
    pub normal: Vector3,
    /// Output: whether the ray was scattered
    pub scattered: bool,
    /// Millimetres per lens unit. Not used by the model
    pub unit_scale: Number,
    /// Output: relative energy of the scattered ray
    pub relative_energy: Number,
    pub incident_index: Number,
    pub substrate_index: Number,
    pub mode: SurfaceMode,
    pub seed: u32,
    pub wavelength: Number,
    /// Input: the request code. Output: the TIS or BSDF, when one was requested
    pub importance: Number,
    /// Scattered direction chosen by the host, only used for BSDF requests
    pub candidate: Vector3,
    pub params: RawModelParams,
}

impl Default for ScatterRecord {
    fn default() -> Self {
        Self {
            position: Vector3::ZERO,
            direction: Vector3::Z,
            normal: Vector3::Z,
            scattered: false,
            unit_scale: 1.,
            relative_energy: 0.,
            incident_index: 1.,
            substrate_index: 1.5,
            mode: SurfaceMode::Reflection,
            seed: 0,
            wavelength: 0.55,
            importance: 0.,
            candidate: Vector3::ZERO,
            params: RawModelParams::default(),
        }
    }
}

impl ScatterRecord {
    pub fn importance_request(&self) -> ImportanceRequest { ImportanceRequest::from_code(self.importance) }

    /// Change in refractive index across the surface, as seen by the scattered light.
    ///
    /// Reflected light crosses the incident medium twice, so that counts double.
    /// Zero for unknown modes, which then fails validation.
    pub fn index_difference(&self) -> Number {
        match self.mode {
            SurfaceMode::Reflection => 2. * self.incident_index,
            SurfaceMode::Refraction => self.substrate_index - self.incident_index,
            SurfaceMode::Viewer => self.params.delta_n_override,
            SurfaceMode::Unknown(_) => 0.,
        }
    }

    /// Writes the result of an evaluation into the output fields
    pub fn apply(&mut self, outcome: &ScatterOutcome) {
        match *outcome {
            ScatterOutcome::Tis(tis) => self.importance = tis,
            ScatterOutcome::Bsdf(bsdf) => self.importance = bsdf,
            ScatterOutcome::Unsupported => {}
            ScatterOutcome::Scattered {
                direction,
                relative_energy,
                ..
            } => {
                self.scattered = true;
                self.direction = direction;
                self.relative_energy = relative_energy;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_selectors() {
        for (raw, mode) in [
            (0., SurfaceMode::Reflection),
            (1., SurfaceMode::Refraction),
            (2., SurfaceMode::Viewer),
        ] {
            assert_eq!(SurfaceMode::from_selector(raw), mode);
            assert_eq!(mode.selector(), raw);
        }
        assert_eq!(SurfaceMode::from_selector(0.5), SurfaceMode::Unknown(0.5));
        assert_eq!(SurfaceMode::Unknown(3.).selector(), 3.);
    }

    #[test]
    fn request_codes() {
        assert_eq!(ImportanceRequest::from_code(0.), ImportanceRequest::None);
        assert_eq!(ImportanceRequest::from_code(0.25), ImportanceRequest::None);
        assert_eq!(ImportanceRequest::from_code(Number::NAN), ImportanceRequest::None);
        assert_eq!(ImportanceRequest::from_code(-1.), ImportanceRequest::Tis);
        assert_eq!(ImportanceRequest::from_code(-2.), ImportanceRequest::Bsdf);
        assert_eq!(ImportanceRequest::from_code(-3.), ImportanceRequest::Unsupported(-3.));
    }

    #[test]
    fn index_difference_per_mode() {
        let rec = ScatterRecord {
            incident_index: 1.2,
            substrate_index: 1.7,
            params: RawModelParams {
                delta_n_override: 0.3,
                ..Default::default()
            },
            ..Default::default()
        };
        let with_mode = |mode| ScatterRecord { mode, ..rec }.index_difference();

        assert_eq!(with_mode(SurfaceMode::Reflection), 2.4);
        assert_eq!(with_mode(SurfaceMode::Refraction), 1.7 - 1.2);
        assert_eq!(with_mode(SurfaceMode::Viewer), 0.3);
        assert_eq!(with_mode(SurfaceMode::Unknown(7.)), 0.);
    }

    #[test]
    fn apply_only_touches_outputs() {
        let original = ScatterRecord {
            importance: -1.,
            ..Default::default()
        };

        let mut rec = original;
        rec.apply(&ScatterOutcome::Tis(0.05));
        assert_eq!(rec, ScatterRecord { importance: 0.05, ..original });

        let mut rec = original;
        rec.apply(&ScatterOutcome::Unsupported);
        assert_eq!(rec, original);

        let mut rec = original;
        let direction = Vector3::new(0., 0.6, 0.8);
        rec.apply(&ScatterOutcome::Scattered {
            direction,
            relative_energy: 1.,
            iterations: 3,
            restarts: 0,
        });
        assert_eq!(
            rec,
            ScatterRecord {
                scattered: true,
                direction,
                relative_energy: 1.,
                ..original
            }
        );
    }
}
