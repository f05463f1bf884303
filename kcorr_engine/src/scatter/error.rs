use crate::core::types::Number;
use thiserror::Error;
use valuable::Valuable;

/// A model parameter (or a value derived from the record) that can't describe a physical surface
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq, Valuable)]
pub enum ParamError {
    /// The RMS roughness must be `> 0`
    #[error("the roughness `sigma` must be positive")]
    SigmaInvalid,
    #[error("the reference wavelength must be positive")]
    RefWavelengthInvalid,
    /// The correlation length constant `B` must be `> 0`
    #[error("the correlation length constant `B` must be positive")]
    CorrelationLengthInvalid,
    /// The high-frequency slope `S` must be `> 0`
    #[error("the high-frequency slope `S` must be positive")]
    SlopeInvalid,
    /// The wavelength being traced must be `> 0`
    #[error("the working wavelength must be positive")]
    WavelengthInvalid,
    /// Zero index difference across the surface, or an unknown surface mode was selected
    #[error("the index difference across the surface is zero")]
    IndexDifferenceZero,
    /// The specular direction or the surface normal has a NaN or infinite component
    #[error("the ray direction and surface normal must be finite")]
    GeometryInvalid,
}

/// Reasons a scatter call is rejected.
///
/// The host treats every one of these the same way (it continues the ray specularly),
/// but only [`ScatterError::NotScattered`] is a normal outcome for a valid surface.
#[derive(Error, Copy, Clone, Debug, PartialEq)]
pub enum ScatterError {
    #[error("surface parameters are not valid")]
    InvalidParams {
        #[from]
        source: ParamError,
    },
    /// The total integrated scatter at normal incidence was greater than one
    #[error("total integrated scatter {tis} is greater than 1")]
    NonPhysicalTis { tis: Number },
    /// The random draw was above the scatter threshold, so the ray should continue specularly
    #[error("ray was not scattered (drew {draw}, threshold {threshold})")]
    NotScattered { draw: Number, threshold: Number },
    /// The specular ray runs along the surface, so the scatter peak sits on the horizon and can't be sampled
    #[error("specular ray is tangent to the surface (offset {bo})")]
    GrazingIncidence { bo: Number },
}
