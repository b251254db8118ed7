//! Conversions from observer-facing units to the radians/days used by the engine.
//!
//! Catalogues usually quote the argument of periastron in degrees and the apsidal
//! rate in arcseconds per year; the computational core only ever sees radians and days.

use crate::constants::{ArcSec, Degree, Radian, DAYS_PER_YEAR, RADEG, RADSEC};

/// Convert an angle from degrees to radians.
#[inline]
pub fn deg_to_rad(angle: Degree) -> Radian {
    angle * RADEG
}

/// Convert an angle from radians to degrees.
#[inline]
pub fn rad_to_deg(angle: Radian) -> Degree {
    angle / RADEG
}

/// Convert an apsidal motion rate from arcseconds per year to radians per day.
///
/// Arguments
/// ---------
/// * `rate`: rate of change of the argument of periastron, in arcsec/yr
///
/// Returns
/// -------
/// * the same rate in rad/day, using a Julian year of 365.25 days
#[inline]
pub fn arcsec_per_year_to_rad_per_day(rate: ArcSec) -> f64 {
    rate * RADSEC / DAYS_PER_YEAR
}

/// Inverse of [`arcsec_per_year_to_rad_per_day`].
#[inline]
pub fn rad_per_day_to_arcsec_per_year(rate: f64) -> ArcSec {
    rate * DAYS_PER_YEAR / RADSEC
}
