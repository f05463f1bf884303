//! Host plugin for the K-correlation scatter model.
//!
//! Exports the two entry points the host looks for when it loads a user-defined scatter library:
//! [`UserScatterDefinition`] and [`UserParamNames`]. Both are thin wrappers: the record layout lives in [`layout`],
//! and all the actual maths is in [`kcorr_engine`].

use crate::targets::{LAYOUT, PLUGIN};
use kcorr_engine::core::types::Number;
use kcorr_engine::scatter::error::ScatterError;
use kcorr_engine::scatter::ScatterEvaluator;
use std::ffi::{c_char, c_int};
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, error, trace, warn};

pub mod layout;
pub mod logging;
pub mod names;
mod targets;

/// Result codes returned to the host
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(i32)]
pub enum Status {
    Success = 0,
    /// The host continues the ray specularly
    Rejected = -1,
}

impl Status {
    pub fn code(self) -> c_int { self as c_int }
}

/// Runs the scatter model on a host record, in place.
///
/// The array must already have been checked to be at least [`layout::MIN_LEN`] long.
/// On success, the output fields are written back into `data`. When rejected, `data` is left untouched.
pub fn scatter_definition(data: &mut [Number]) -> Status {
    let mut record = layout::read_record(data);

    match ScatterEvaluator::default().evaluate(&mut record) {
        Ok(outcome) => {
            trace!(target: PLUGIN, ?outcome, "scatter evaluated");
            layout::write_record(&record, data);
            Status::Success
        }
        Err(err @ (ScatterError::NotScattered { .. } | ScatterError::GrazingIncidence { .. })) => {
            trace!(target: PLUGIN, %err, "continuing specularly");
            Status::Rejected
        }
        Err(err) => {
            debug!(target: PLUGIN, %err, params = ?record.params, "rejected surface configuration");
            Status::Rejected
        }
    }
}

/// Scatter entry point called by the host for every ray that hits the surface.
///
/// Returns `0` if the call succeeded, and `-1` if the ray should not be scattered (invalid parameters,
/// or the random draw said so).
///
/// # Safety
/// `data` must either be null, or point to an array of `f64` whose first element is the array's length,
/// valid for reads and writes for that many elements, and not aliased for the duration of the call.
#[no_mangle]
#[allow(non_snake_case)]
pub unsafe extern "system" fn UserScatterDefinition(data: *mut f64) -> c_int {
    logging::init();

    if data.is_null() {
        warn!(target: LAYOUT, "host passed a null record");
        return Status::Rejected.code();
    }
    let len = match layout::declared_len(*data) {
        Ok(len) => len,
        Err(err) => {
            warn!(target: LAYOUT, %err, "refusing malformed record");
            return Status::Rejected.code();
        }
    };
    // SAFETY: The host guarantees `data` holds `data[0]` values, which we checked covers every field we touch
    let data = std::slice::from_raw_parts_mut(data, len);

    // Unwinding into the host is undefined behaviour, so stop panics here
    match panic::catch_unwind(AssertUnwindSafe(|| scatter_definition(data))) {
        Ok(status) => status.code(),
        Err(_) => {
            error!(target: PLUGIN, "panicked while evaluating scatter");
            Status::Rejected.code()
        }
    }
}

/// Parameter naming entry point, called by the host to label the surface's parameters.
///
/// The first byte of `data` holds the (1-based) parameter number on input. On output, `data` holds the
/// NUL-terminated name, or an empty string if there is no parameter with that number. Always returns `0`.
///
/// # Safety
/// `data` must either be null, or be valid for writes of at least [`names::MAX_NAME_LEN`] + 1 bytes.
#[no_mangle]
#[allow(non_snake_case)]
pub unsafe extern "system" fn UserParamNames(data: *mut c_char) -> c_int {
    if data.is_null() {
        return Status::Success.code();
    }

    let name = names::param_name(*data as u8);
    // SAFETY: Caller guarantees room for the longest name plus terminator
    std::ptr::copy_nonoverlapping(name.as_ptr().cast::<c_char>(), data, name.len());
    *data.add(name.len()) = 0;

    Status::Success.code()
}
