//! The host's flat record layout.
//!
//! The host passes every ray as an array of `f64`, with each field at a fixed index.
//! This module is the only place that knows about those indices: everything past it works on a [`ScatterRecord`].

use crate::targets::LAYOUT;
use kcorr_engine::core::types::{Number, Vector3};
use kcorr_engine::scatter::params::RawModelParams;
use kcorr_engine::scatter::record::{ScatterRecord, SurfaceMode};
use num_traits::ToPrimitive;
use std::ops::RangeInclusive;
use thiserror::Error;
use tracing::trace;

/// Total number of values in the array, including this one
pub const FIELD_COUNT: usize = 0;
pub const POSITION: [usize; 3] = [1, 2, 3];
/// Specular ray on input, scattered ray on output
pub const DIRECTION: [usize; 3] = [4, 5, 6];
pub const NORMAL: [usize; 3] = [7, 8, 9];
/// Set to `1` by the plugin when the ray was scattered (`2` would mean polarisation data was also written)
pub const SCATTER_FLAG: usize = 10;
pub const UNIT_SCALE: usize = 11;
pub const RELATIVE_ENERGY: usize = 12;
pub const INCIDENT_INDEX: usize = 13;
pub const SUBSTRATE_INDEX: usize = 14;
/// `0` reflection, `1` refraction, `2` scatter function viewer
pub const MODE: usize = 15;
pub const SEED: usize = 16;
pub const WAVELENGTH: usize = 17;
/// Importance sampling request on input (`0`, `-1` TIS, `-2` BSDF), the requested value on output
pub const IMPORTANCE: usize = 18;
/// Incident electric field. Not read, polarisation isn't modelled
pub const POLARIZATION_IN: RangeInclusive<usize> = 20..=25;
/// Scattered direction the host wants the BSDF for
pub const CANDIDATE: [usize; 3] = [30, 31, 32];
/// Scattered electric field. Never written, since the scatter flag is never `2`
pub const POLARIZATION_OUT: RangeInclusive<usize> = 40..=45;
pub const PARAM_COUNT: usize = 50;
pub const SIGMA: usize = 51;
pub const REF_WAVELENGTH: usize = 52;
pub const CORRELATION_LENGTH: usize = 53;
pub const SLOPE: usize = 54;
pub const DELTA_N_OVERRIDE: usize = 55;
/// Host-owned string blocks (data string and path). Not read
pub const RESERVED: RangeInclusive<usize> = 200..=299;

/// The smallest array that holds every field we read
pub const MIN_LEN: usize = DELTA_N_OVERRIDE + 1;

#[derive(Error, Copy, Clone, Debug, PartialEq)]
pub enum LayoutError {
    /// The field count wasn't a non-negative number
    #[error("record field count {0} is not a valid length")]
    InvalidCount(Number),
    #[error("record has {len} fields, at least {MIN_LEN} are required")]
    TooShort { len: usize },
}

/// Reads the length of the array from its first value, checking that it holds every field we need
pub fn declared_len(field_count: Number) -> Result<usize, LayoutError> {
    let len = field_count.to_usize().ok_or(LayoutError::InvalidCount(field_count))?;
    if len < MIN_LEN {
        return Err(LayoutError::TooShort { len });
    }
    Ok(len)
}

fn vector(data: &[Number], idx: [usize; 3]) -> Vector3 { Vector3::from(idx.map(|i| data[i])) }

fn write_vector(data: &mut [Number], idx: [usize; 3], v: Vector3) {
    for (i, val) in idx.into_iter().zip(v.to_array()) {
        data[i] = val;
    }
}

/// Converts the host's array into a typed record.
///
/// # Panics
/// If `data` is shorter than [`MIN_LEN`]; check it with [`declared_len`] first.
pub fn read_record(data: &[Number]) -> ScatterRecord {
    let record = ScatterRecord {
        position: vector(data, POSITION),
        direction: vector(data, DIRECTION),
        normal: vector(data, NORMAL),
        scattered: data[SCATTER_FLAG] != 0.,
        unit_scale: data[UNIT_SCALE],
        relative_energy: data[RELATIVE_ENERGY],
        incident_index: data[INCIDENT_INDEX],
        substrate_index: data[SUBSTRATE_INDEX],
        mode: SurfaceMode::from_selector(data[MODE]),
        // Truncates towards zero and saturates, NaN becomes zero
        seed: data[SEED] as u32,
        wavelength: data[WAVELENGTH],
        importance: data[IMPORTANCE],
        candidate: vector(data, CANDIDATE),
        params: RawModelParams {
            sigma: data[SIGMA],
            ref_wavelength: data[REF_WAVELENGTH],
            b: data[CORRELATION_LENGTH],
            s: data[SLOPE],
            delta_n_override: data[DELTA_N_OVERRIDE],
        },
    };
    trace!(target: LAYOUT, param_count = data[PARAM_COUNT], ?record, "read record");
    record
}

/// Writes the output fields of an evaluated record back into the host's array.
///
/// Only the scattered direction, scatter flag, relative energy and importance value are written.
/// The flag is only ever raised, never cleared.
///
/// # Panics
/// If `data` is shorter than [`MIN_LEN`]
pub fn write_record(record: &ScatterRecord, data: &mut [Number]) {
    write_vector(data, DIRECTION, record.direction);
    if record.scattered {
        data[SCATTER_FLAG] = 1.;
    }
    data[RELATIVE_ENERGY] = record.relative_energy;
    data[IMPORTANCE] = record.importance;
}
