//! Domain checks shared by every validating entry point.
//!
//! All comparisons go through `partial_cmp` so that a NaN never satisfies a bound:
//! a NaN parameter is rejected as invalid input instead of flowing into the math.

use std::cmp::Ordering::{Equal, Greater, Less};

use crate::rvbinary_errors::RvBinaryError;

/// Return true iff x > 0.0 and comparable (i.e., not NaN).
#[inline]
pub(crate) fn gt0(x: f64) -> bool {
    x.partial_cmp(&0.0) == Some(Greater)
}

/// Return true iff x >= 0.0 and comparable (i.e., not NaN).
#[inline]
pub(crate) fn ge0(x: f64) -> bool {
    matches!(x.partial_cmp(&0.0), Some(Greater) | Some(Equal))
}

/// Return true iff a < b and comparable (i.e., not NaN).
#[inline]
pub(crate) fn lt(a: f64, b: f64) -> bool {
    a.partial_cmp(&b) == Some(Less)
}

/// Eccentricity must lie in `[0, 1)`: parabolic and hyperbolic orbits are out of scope.
pub(crate) fn check_eccentricity(e: f64) -> Result<(), RvBinaryError> {
    if ge0(e) && lt(e, 1.0) {
        Ok(())
    } else {
        Err(RvBinaryError::InvalidInput(format!(
            "eccentricity must be in [0, 1), got {e}"
        )))
    }
}

pub(crate) fn check_period(period_day: f64) -> Result<(), RvBinaryError> {
    if gt0(period_day) && period_day.is_finite() {
        Ok(())
    } else {
        Err(RvBinaryError::InvalidInput(format!(
            "orbital period must be a positive finite number of days, got {period_day}"
        )))
    }
}

/// Inclination must lie in `[0, π]` so that `sin(i) ≥ 0`.
pub(crate) fn check_inclination(i: f64) -> Result<(), RvBinaryError> {
    if ge0(i) && !lt(std::f64::consts::PI, i) {
        Ok(())
    } else {
        Err(RvBinaryError::InvalidInput(format!(
            "inclination must be in [0, π] rad, got {i}"
        )))
    }
}

pub(crate) fn check_finite(name: &str, value: f64) -> Result<(), RvBinaryError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(RvBinaryError::InvalidInput(format!(
            "{name} must be finite, got {value}"
        )))
    }
}
