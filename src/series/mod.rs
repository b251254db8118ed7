//! # Radial-velocity time series
//!
//! This module defines the [`SeriesParams`] configuration struct and its builder, which
//! control how [`SampleSeries::generate`](crate::series::sample_series::SampleSeries::generate)
//! lays out the time grid and evaluates the radial-velocity model on it.
//!
//! ## Sampling
//!
//! The grid spans whole orbital cycles, `[start_period·P, end_period·P]`, both endpoints
//! included. It holds `max((end_period − start_period)·points_per_period, min_points)`
//! evenly spaced samples; the floor keeps short spans smooth. A grid larger than
//! [`MAX_SERIES_POINTS`](crate::constants::MAX_SERIES_POINTS) is rejected.
//!
//! ## Example
//!
//! ```rust
//! use rvbinary::orbital_parameters::OrbitalParameters;
//! use rvbinary::series::{sample_series::SampleSeries, SeriesParams};
//!
//! let orbit = OrbitalParameters::builder()
//!     .semi_amplitude_kms(35.0)
//!     .period_day(12.0)
//!     .eccentricity(0.5)
//!     .omega_dot_rad_day(1e-3)
//!     .build()
//!     .unwrap();
//!
//! let series_params = SeriesParams::builder()
//!     .start_period(0)
//!     .end_period(20)
//!     .points_per_period(200)
//!     .include_comparison(true)
//!     .build()
//!     .unwrap();
//!
//! let series = SampleSeries::generate(&orbit, &series_params).unwrap();
//! assert_eq!(series.len(), 4000);
//! assert!(series.rv_no_apsidal().is_some());
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    constants::{MAX_SERIES_POINTS, MIN_SERIES_POINTS},
    kepler::KeplerSolver,
    rvbinary_errors::RvBinaryError,
};

pub mod sample_series;

/// Configuration of a radial-velocity time series.
///
/// Fields
/// -----------------
/// * `start_period` – first orbital cycle of the grid (`t_start = start_period·P`).
/// * `end_period` – last cycle boundary (`t_end = end_period·P`), strictly after `start_period`.
/// * `points_per_period` – sample density per orbital cycle.
/// * `include_comparison` – also evaluate the curve without apsidal motion.
/// * `min_points` – floor on the number of samples.
/// * `solver` – Kepler solver settings used for every sample.
///
/// Defaults
/// -----------------
/// * `start_period`: 0
/// * `end_period`: 1
/// * `points_per_period`: 100
/// * `include_comparison`: false
/// * `min_points`: 50
/// * `solver`: tolerance `1e-8`, 100 iterations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesParams {
    pub start_period: u32,
    pub end_period: u32,
    pub points_per_period: usize,
    pub include_comparison: bool,
    pub min_points: usize,
    pub solver: KeplerSolver,
}

impl SeriesParams {
    /// Construct a new [`SeriesParams`] with the default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new [`SeriesParamsBuilder`] to configure custom parameters.
    pub fn builder() -> SeriesParamsBuilder {
        SeriesParamsBuilder::new()
    }

    /// Number of orbital cycles covered by the grid.
    pub fn cycles(&self) -> u32 {
        self.end_period.saturating_sub(self.start_period)
    }

    /// Number of samples the grid will hold.
    pub fn sample_count(&self) -> usize {
        (self.cycles() as usize)
            .saturating_mul(self.points_per_period)
            .max(self.min_points)
    }

    pub(crate) fn validate(&self) -> Result<(), RvBinaryError> {
        if self.end_period <= self.start_period {
            return Err(RvBinaryError::InvalidInput(format!(
                "end period ({}) must be greater than start period ({})",
                self.end_period, self.start_period
            )));
        }
        if self.points_per_period == 0 {
            return Err(RvBinaryError::InvalidInput(
                "points per period must be >= 1".into(),
            ));
        }
        if self.min_points < 2 {
            return Err(RvBinaryError::InvalidInput(format!(
                "a series needs at least 2 samples, min_points = {}",
                self.min_points
            )));
        }
        let requested = (self.cycles() as usize)
            .checked_mul(self.points_per_period)
            .map(|n| n.max(self.min_points));
        if !matches!(requested, Some(n) if n <= MAX_SERIES_POINTS) {
            return Err(RvBinaryError::InvalidInput(format!(
                "series would hold more than {MAX_SERIES_POINTS} samples \
                 ({} cycles x {} points per period, min_points = {})",
                self.cycles(),
                self.points_per_period,
                self.min_points
            )));
        }
        self.solver.validate()
    }
}

impl Default for SeriesParams {
    fn default() -> Self {
        SeriesParams {
            start_period: 0,
            end_period: 1,
            points_per_period: 100,
            include_comparison: false,
            min_points: MIN_SERIES_POINTS,
            solver: KeplerSolver::default(),
        }
    }
}

/// Builder for [`SeriesParams`], with validation.
#[derive(Debug, Clone)]
pub struct SeriesParamsBuilder {
    params: SeriesParams,
}

impl Default for SeriesParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesParamsBuilder {
    /// Create a new builder initialized with default values.
    pub fn new() -> Self {
        Self {
            params: SeriesParams::default(),
        }
    }

    // --- Grid ---
    pub fn start_period(mut self, v: u32) -> Self {
        self.params.start_period = v;
        self
    }
    pub fn end_period(mut self, v: u32) -> Self {
        self.params.end_period = v;
        self
    }
    pub fn points_per_period(mut self, v: usize) -> Self {
        self.params.points_per_period = v;
        self
    }
    pub fn min_points(mut self, v: usize) -> Self {
        self.params.min_points = v;
        self
    }
    pub fn include_comparison(mut self, v: bool) -> Self {
        self.params.include_comparison = v;
        self
    }

    // --- Kepler solver ---
    pub fn kepler_tolerance(mut self, v: f64) -> Self {
        self.params.solver.tolerance = v;
        self
    }
    pub fn kepler_max_iter(mut self, v: usize) -> Self {
        self.params.solver.max_iter = v;
        self
    }

    /// Finalize the builder and produce a [`SeriesParams`] instance.
    ///
    /// Validation rules
    /// -----------------
    /// * `end_period > start_period`.
    /// * `points_per_period ≥ 1`, `min_points ≥ 2`.
    /// * at most 10 000 000 samples in total.
    /// * `kepler_tolerance > 0`, `kepler_max_iter ≥ 1`.
    pub fn build(self) -> Result<SeriesParams, RvBinaryError> {
        self.params.validate()?;
        Ok(self.params)
    }
}
