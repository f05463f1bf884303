#![allow(dead_code)]

use kcorr_engine::core::types::*;
use kcorr_engine::scatter::params::RawModelParams;
use kcorr_engine::scatter::record::{ImportanceRequest, ScatterRecord, SurfaceMode};

/// Reflection off a surface facing `+Z`, in air, at 0.55μm
pub fn reflection(direction: Vector3, params: RawModelParams) -> ScatterRecord {
    ScatterRecord {
        direction: direction.normalize(),
        normal: Vector3::Z,
        incident_index: 1.0,
        mode: SurfaceMode::Reflection,
        wavelength: 0.55,
        params,
        ..Default::default()
    }
}

/// The same record, but asking for the TIS instead of a scattered ray
pub fn tis_request(record: ScatterRecord) -> ScatterRecord {
    ScatterRecord {
        importance: ImportanceRequest::TIS_CODE,
        ..record
    }
}

/// The same record, but asking for the BSDF in the `candidate` direction
pub fn bsdf_request(record: ScatterRecord, candidate: Vector3) -> ScatterRecord {
    ScatterRecord {
        importance: ImportanceRequest::BSDF_CODE,
        candidate,
        ..record
    }
}

/// Parameters from the reference normal-incidence scenario
pub fn reference_params() -> RawModelParams {
    RawModelParams {
        sigma: 0.01,
        ref_wavelength: 0.55,
        b: 1.0,
        s: 2.0,
        delta_n_override: 0.0,
    }
}

/// Roughness chosen so the normal-incidence TIS is a little under one, so most rays scatter
pub fn rough_params(s: Number) -> RawModelParams {
    RawModelParams {
        sigma: 0.043,
        s,
        ..reference_params()
    }
}
