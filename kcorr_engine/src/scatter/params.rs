use crate::core::types::Number;
use crate::scatter::error::{ParamError, ScatterError};
use crate::shared::validate;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use valuable::Valuable;

/// The user-provided surface parameters, exactly as they were read from the host.
///
/// Lengths are in microns. None of these are validated until they are turned into a [`KCorrelation`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Valuable)]
pub struct RawModelParams {
    /// RMS surface roughness, specified at [`Self::ref_wavelength`]
    pub sigma: Number,
    /// The wavelength that [`Self::sigma`] was measured at
    pub ref_wavelength: Number,
    /// `2π·L`, where `L` is the typical surface wavelength
    pub b: Number,
    /// Slope of the BSDF at large spatial frequencies
    pub s: Number,
    /// Index difference across the surface, only used by the scatter function viewer
    pub delta_n_override: Number,
}

impl Default for RawModelParams {
    fn default() -> Self {
        Self {
            sigma: 0.01,
            ref_wavelength: 0.55,
            b: 1.0,
            s: 2.0,
            delta_n_override: 1.0,
        }
    }
}

/// A validated K-correlation surface, evaluated at one working wavelength
#[derive(Copy, Clone, Debug, PartialEq, Valuable)]
pub struct KCorrelation {
    /// RMS roughness, rescaled to the working wavelength
    pub sigma: Number,
    /// `(B/λ)²`
    pub a: Number,
    /// `(S-2)/2`
    pub c: Number,
    pub s: Number,
    /// Total integrated scatter at normal incidence, always `<= 1`
    pub tis: Number,
}

impl KCorrelation {
    /// Validates the raw parameters and derives the model constants at the working `wavelength`.
    ///
    /// # Errors
    /// Returns [`ScatterError::InvalidParams`] if any of the parameters is not positive (or `delta_n` is zero),
    /// and [`ScatterError::NonPhysicalTis`] if the surface would scatter more than all the incident light.
    pub fn new(raw: &RawModelParams, delta_n: Number, wavelength: Number) -> Result<Self, ScatterError> {
        // Written as `!(x > 0)` so that NaN is rejected too
        if !(raw.sigma > 0.) {
            return Err(ParamError::SigmaInvalid.into());
        }
        if !(raw.ref_wavelength > 0.) {
            return Err(ParamError::RefWavelengthInvalid.into());
        }
        if !(raw.b > 0.) {
            return Err(ParamError::CorrelationLengthInvalid.into());
        }
        if !(raw.s > 0.) {
            return Err(ParamError::SlopeInvalid.into());
        }
        if delta_n == 0. || delta_n.is_nan() {
            return Err(ParamError::IndexDifferenceZero.into());
        }
        if !(wavelength > 0.) {
            return Err(ParamError::WavelengthInvalid.into());
        }

        let s = raw.s;
        let a = (raw.b * raw.b) / (wavelength * wavelength);
        let a_ref = (raw.b * raw.b) / (raw.ref_wavelength * raw.ref_wavelength);
        let c = 0.5 * (s - 2.);

        let sigma = raw.sigma * Number::sqrt(band_integral(a, s, c) / band_integral(a_ref, s, c));

        let t1 = TAU * delta_n * sigma / wavelength;
        let tis = t1 * t1;
        // Also catches NaN from overflowing parameters
        if !(tis <= 1.) {
            return Err(ScatterError::NonPhysicalTis { tis });
        }
        validate::number(sigma);

        Ok(Self { sigma, a, c, s, tis })
    }

    /// Whether the slope lands on the logarithmic special case (`S == 2`)
    pub fn is_log_branch(&self) -> bool { self.s == 2. }

    /// Normalisation of the scatter distribution, so that it integrates to the TIS.
    ///
    /// `a / (π·ln(1+a))` on the log branch, `a·c / (π·(1-(1+a)^-c))` otherwise
    pub fn normalisation(&self) -> Number {
        if self.is_log_branch() {
            self.a / (PI * Number::ln(1. + self.a))
        } else {
            self.a * self.c / (PI * band_integral(self.a, self.s, self.c))
        }
    }

    /// Fall-off of the scatter distribution, for a squared distance `xsq` from the specular
    /// direction in the projected tangent plane: `(1 + a·xsq)^(S/2)`
    pub fn falloff(&self, xsq: Number) -> Number { Number::powf(1. + self.a * xsq, 0.5 * self.s) }

    /// Un-normalised scatter weight used for rejection sampling, always in `0..=1` for valid inputs
    pub fn sample_weight(&self, cos_theta: Number, xsq: Number) -> Number { cos_theta / self.falloff(xsq) }
}

/// The power spectrum integrated over the band visible at `(B/λ)² = a`.
/// Only ever used as a ratio, or scaled by the normalisation
fn band_integral(a: Number, s: Number, c: Number) -> Number {
    if s == 2. {
        Number::ln(1. + a)
    } else {
        1. - Number::powf(1. + a, -c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const WAVE: Number = 0.55;

    fn model(raw: RawModelParams) -> Result<KCorrelation, ScatterError> { KCorrelation::new(&raw, 2.0, WAVE) }

    #[test]
    fn rejects_non_positive_params() {
        let base = RawModelParams::default();
        let cases = [
            (RawModelParams { sigma: 0., ..base }, ParamError::SigmaInvalid),
            (RawModelParams { sigma: -1., ..base }, ParamError::SigmaInvalid),
            (RawModelParams { sigma: Number::NAN, ..base }, ParamError::SigmaInvalid),
            (RawModelParams { ref_wavelength: 0., ..base }, ParamError::RefWavelengthInvalid),
            (RawModelParams { b: -0.1, ..base }, ParamError::CorrelationLengthInvalid),
            (RawModelParams { s: 0., ..base }, ParamError::SlopeInvalid),
        ];
        for (raw, expected) in cases {
            assert_eq!(model(raw), Err(ScatterError::InvalidParams { source: expected }), "{raw:?}");
        }

        assert_eq!(
            KCorrelation::new(&base, 0., WAVE),
            Err(ScatterError::from(ParamError::IndexDifferenceZero))
        );
        assert_eq!(
            KCorrelation::new(&base, 2., 0.),
            Err(ScatterError::from(ParamError::WavelengthInvalid))
        );
    }

    #[test]
    fn sigma_unchanged_at_reference_wavelength() {
        for s in [1., 2., 3.5] {
            let m = model(RawModelParams { s, ..Default::default() }).unwrap();
            assert_relative_eq!(m.sigma, 0.01, max_relative = 1e-12);
        }
    }

    #[test]
    fn sigma_rescales_with_wavelength() {
        let raw = RawModelParams { s: 3., ..Default::default() };
        let short = KCorrelation::new(&raw, 2., 0.4).unwrap();
        let long = KCorrelation::new(&raw, 2., 0.7).unwrap();
        // Shorter wavelengths see more of the roughness spectrum
        assert!(short.sigma > raw.sigma);
        assert!(long.sigma < raw.sigma);

        let a: Number = 1. / (0.7 * 0.7);
        let a1 = 1. / (WAVE * WAVE);
        let expected = 0.01 * ((1. - (1. + a).powf(-0.5)) / (1. - (1. + a1).powf(-0.5))).sqrt();
        assert_relative_eq!(long.sigma, expected, max_relative = 1e-12);
    }

    #[test]
    fn log_branch_constants() {
        let m = model(RawModelParams::default()).unwrap();
        assert!(m.is_log_branch());
        assert_eq!(m.c, 0.);
        let a = 1. / (WAVE * WAVE);
        assert_relative_eq!(m.a, a);
        assert!(m.normalisation().is_finite());
        assert_relative_eq!(m.normalisation(), a / (PI * (1. + a).ln()));
        assert_relative_eq!(m.falloff(0.25), 1. + a * 0.25);
    }

    #[test]
    fn tis_grows_with_sigma() {
        let mut last = 0.;
        for sigma in [0.001, 0.005, 0.01, 0.02, 0.04] {
            let m = model(RawModelParams { sigma, ..Default::default() }).unwrap();
            assert!(m.tis > last, "tis {} not above {last} for sigma {sigma}", m.tis);
            assert_relative_eq!(m.tis, (2. * TAU * sigma / WAVE).powi(2), max_relative = 1e-12);
            last = m.tis;
        }
    }

    #[test]
    fn rejects_tis_above_one() {
        let err = model(RawModelParams { sigma: 1., ..Default::default() }).unwrap_err();
        let ScatterError::NonPhysicalTis { tis } = err else {
            panic!("expected non-physical TIS, got {err:?}");
        };
        assert!(tis > 1.);
    }
}
