//! # Constants and type definitions for rvbinary
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **unit type
//! aliases** used throughout the crate. Every computational routine reads its constants from
//! here; nothing is configured through global mutable state.
//!
//! ## Overview
//!
//! - Astronomical constants (AU, day, year)
//! - Unit conversions (degrees ↔ radians, arcseconds ↔ radians)
//! - Numerical thresholds shared by the evaluator
//! - Type aliases documenting the units carried by plain `f64` values

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Number of days in a Julian year
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 1.495978707e8;

/// AU/year → km/s
pub const AU_PER_YEAR_TO_KMS: f64 = AU / (DAYS_PER_YEAR * SECONDS_PER_DAY);

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648000.0;

/// Below this magnitude the apsidal denominator `1 + e·cos(θ)` is treated as singular
pub const SINGULAR_DENOMINATOR_EPS: f64 = 1e-9;

/// Default absolute tolerance on the Kepler residual
pub const KEPLER_DEFAULT_TOLERANCE: f64 = 1e-8;

/// Default iteration cap of the Kepler solver
pub const KEPLER_DEFAULT_MAX_ITER: usize = 100;

/// Minimum number of samples produced by the series generator
pub const MIN_SERIES_POINTS: usize = 50;

/// Maximum number of samples a single series may request
pub const MAX_SERIES_POINTS: usize = 10_000_000;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in arcseconds
pub type ArcSec = f64;
/// Angle in radians
pub type Radian = f64;
/// Time in days
pub type Day = f64;
/// Velocity in kilometers per second
pub type KmPerSec = f64;
/// Mass in solar masses
pub type SolarMass = f64;
