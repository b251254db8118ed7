use itertools::{Itertools, MinMaxResult};
use serde::Serialize;
use tracing::debug;

use crate::{
    constants::{Day, KmPerSec},
    kepler::KeplerSolver,
    orbital_parameters::OrbitalParameters,
    radial_velocity::radial_velocity_with,
    rvbinary_errors::RvBinaryError,
    series::SeriesParams,
};

/// One sample of a [`SampleSeries`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RvSample {
    pub time_day: Day,
    pub rv_with_apsidal_kms: KmPerSec,
    pub rv_no_apsidal_kms: Option<KmPerSec>,
}

/// Radial-velocity curve sampled on an evenly spaced time grid.
///
/// The three sequences are parallel: same length, index `i` refers to `t_values[i]`,
/// and times are strictly increasing. The comparison curve without apsidal motion
/// is present only when it was requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleSeries {
    t_values: Vec<Day>,
    rv_with_apsidal: Vec<KmPerSec>,
    rv_no_apsidal: Option<Vec<KmPerSec>>,
}

impl SampleSeries {
    /// Evaluate the radial-velocity model of `params` on the grid described by `series`.
    ///
    /// The apsidal curve is always computed; the frozen-`ω` curve is added when
    /// `series.include_comparison` is set.
    ///
    /// Return
    /// ----------
    /// * The complete [`SampleSeries`].
    /// * `Err(RvBinaryError::InvalidInput)` if `series` does not validate.
    /// * The first per-sample failure otherwise; no partial series is ever returned.
    pub fn generate(
        params: &OrbitalParameters,
        series: &SeriesParams,
    ) -> Result<Self, RvBinaryError> {
        series.validate()?;

        let period = params.period_day();
        let t_start = f64::from(series.start_period) * period;
        let t_end = f64::from(series.end_period) * period;
        let n_points = series.sample_count();

        debug!(
            t_start,
            t_end,
            n_points,
            comparison = series.include_comparison,
            "generating radial-velocity series"
        );

        let last = (n_points - 1) as f64;
        let t_values: Vec<Day> = (0..n_points)
            .map(|i| t_start + (i as f64 / last) * (t_end - t_start))
            .collect();

        let rv_with_apsidal = evaluate_grid(&t_values, params, true, &series.solver)?;
        let rv_no_apsidal = if series.include_comparison {
            Some(evaluate_grid(&t_values, params, false, &series.solver)?)
        } else {
            None
        };

        Ok(SampleSeries {
            t_values,
            rv_with_apsidal,
            rv_no_apsidal,
        })
    }

    pub fn len(&self) -> usize {
        self.t_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t_values.is_empty()
    }

    /// Sample times (days).
    pub fn t_values(&self) -> &[Day] {
        &self.t_values
    }

    /// Radial velocities with apsidal motion (km/s).
    pub fn rv_with_apsidal(&self) -> &[KmPerSec] {
        &self.rv_with_apsidal
    }

    /// Radial velocities with `ω` frozen at `ω₀` (km/s), if requested.
    pub fn rv_no_apsidal(&self) -> Option<&[KmPerSec]> {
        self.rv_no_apsidal.as_deref()
    }

    /// Iterate over the samples in time order.
    pub fn samples(&self) -> impl Iterator<Item = RvSample> + '_ {
        self.t_values
            .iter()
            .zip(&self.rv_with_apsidal)
            .enumerate()
            .map(move |(i, (&time_day, &rv_with_apsidal_kms))| RvSample {
                time_day,
                rv_with_apsidal_kms,
                rv_no_apsidal_kms: self.rv_no_apsidal.as_ref().map(|rv| rv[i]),
            })
    }

    /// Minimum and maximum of the apsidal curve (km/s), `None` for an empty series.
    pub fn velocity_range(&self) -> Option<(KmPerSec, KmPerSec)> {
        match self.rv_with_apsidal.iter().copied().minmax() {
            MinMaxResult::NoElements => None,
            MinMaxResult::OneElement(v) => Some((v, v)),
            MinMaxResult::MinMax(min, max) => Some((min, max)),
        }
    }

    /// Per-sample velocity change caused by apsidal motion (with − without, km/s).
    ///
    /// `None` when the comparison curve was not computed.
    pub fn apsidal_shift(&self) -> Option<Vec<KmPerSec>> {
        self.rv_no_apsidal.as_ref().map(|frozen| {
            self.rv_with_apsidal
                .iter()
                .zip(frozen)
                .map(|(with, without)| with - without)
                .collect()
        })
    }
}

/// Generate a radial-velocity series with default solver settings and sample floor.
///
/// Arguments
/// -----------------
/// * `params` – Orbital elements.
/// * `start_period`, `end_period` – Cycle bounds of the grid (`end_period > start_period`).
/// * `points_per_period` – Sample density per cycle (≥ 1).
/// * `include_comparison` – Also compute the curve without apsidal motion.
///
/// See also
/// ------------
/// * [`SampleSeries::generate`] – Same computation from a full [`SeriesParams`].
pub fn generate_series(
    params: &OrbitalParameters,
    start_period: u32,
    end_period: u32,
    points_per_period: usize,
    include_comparison: bool,
) -> Result<SampleSeries, RvBinaryError> {
    let series = SeriesParams::builder()
        .start_period(start_period)
        .end_period(end_period)
        .points_per_period(points_per_period)
        .include_comparison(include_comparison)
        .build()?;

    SampleSeries::generate(params, &series)
}

#[cfg(not(feature = "parallel"))]
fn evaluate_grid(
    t_values: &[Day],
    params: &OrbitalParameters,
    include_apsidal_motion: bool,
    solver: &KeplerSolver,
) -> Result<Vec<KmPerSec>, RvBinaryError> {
    t_values
        .iter()
        .map(|&t| radial_velocity_with(t, params, include_apsidal_motion, solver))
        .collect()
}

#[cfg(feature = "parallel")]
fn evaluate_grid(
    t_values: &[Day],
    params: &OrbitalParameters,
    include_apsidal_motion: bool,
    solver: &KeplerSolver,
) -> Result<Vec<KmPerSec>, RvBinaryError> {
    use rayon::prelude::*;

    t_values
        .par_iter()
        .map(|&t| radial_velocity_with(t, params, include_apsidal_motion, solver))
        .collect()
}
