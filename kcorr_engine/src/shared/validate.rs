//! Debug-only sanity checks. These compile down to nothing in release builds

use crate::core::types::{Number, Vector3};
use crate::scatter::frame::LocalFrame;
use approx::*;
use std::borrow::Borrow;

macro_rules! debug_assert_only {
    () => {
        if cfg!(not(debug_assertions)) {
            return;
        }
    };
}

pub const EPSILON: Number = 1e-6;

#[inline(always)]
#[track_caller]
pub fn number(val: impl Borrow<Number>) {
    debug_assert_only!();

    let val = val.borrow();
    assert!(!val.is_nan(), "should not be nan; val: {val}");
}

#[inline(always)]
#[track_caller]
pub fn vector3(v: impl Borrow<Vector3>) {
    debug_assert_only!();
    let v = v.borrow();
    assert!(!v.is_nan(), "should not be nan; vec: {v:?}");
}

/// Asserts that a frame is orthonormal, assuming the normal it was built from was normalised
#[inline(always)]
#[track_caller]
pub fn frame(frame: impl Borrow<LocalFrame>) {
    debug_assert_only!();
    let frame = frame.borrow();

    vector3(frame.p);
    vector3(frame.q);
    number(frame.bo);

    assert_abs_diff_eq!(frame.p.dot(frame.n), 0., epsilon = EPSILON);
    assert_abs_diff_eq!(frame.q.dot(frame.n), 0., epsilon = EPSILON);
    assert_abs_diff_eq!(frame.p.dot(frame.q), 0., epsilon = EPSILON);
}

/// Asserts that a scattered direction left through the front of the surface
#[inline(always)]
#[track_caller]
pub fn scattered(dir: impl Borrow<Vector3>, normal: impl Borrow<Vector3>) {
    debug_assert_only!();
    let (dir, normal) = (dir.borrow(), normal.borrow());

    vector3(dir);
    assert!(
        dir.dot(*normal) >= 0.,
        "scattered into the back hemisphere; dir: {dir:?}, normal: {normal:?}"
    );
}
