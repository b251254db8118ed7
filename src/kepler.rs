//! # Kepler's equation for elliptic orbits
//!
//! Mean anomaly `M` → eccentric anomaly `E` through Newton–Raphson on
//!
//! ```text
//! f(E)  = E − e·sin(E) − M
//! f'(E) = 1 − e·cos(E)
//! ```
//!
//! and eccentric anomaly → true anomaly `θ` through the two-argument form
//! `θ = atan2(√(1−e²)·sin E, cos E − e)`, which has no singularity at `E = π`.
//!
//! Only the elliptic regime `e ∈ [0, 1)` is handled.

use std::f64::consts::PI;

use tracing::debug;

use crate::{
    constants::{Radian, DPI, KEPLER_DEFAULT_MAX_ITER, KEPLER_DEFAULT_TOLERANCE},
    rvbinary_errors::RvBinaryError,
    validation::{check_eccentricity, check_finite, gt0},
};

/// Above this eccentricity the iteration starts from `E₀ = π` instead of `E₀ = M`.
const HIGH_ECCENTRICITY: f64 = 0.8;

/// Return the principal value of an angle in radians, in `[0, 2π)`.
#[inline]
pub fn principal_angle(a: f64) -> f64 {
    a.rem_euclid(DPI)
}

/// Return the principal difference between two angles, in `[-π, π]`.
pub fn angle_diff(a: f64, b: f64) -> f64 {
    let mut diff = principal_angle(a) - principal_angle(b);

    if diff > PI {
        diff -= DPI;
    } else if diff < -PI {
        diff += DPI;
    }

    diff
}

/// Newton–Raphson solver for Kepler's equation.
///
/// Fields
/// -----------------
/// * `tolerance` – absolute tolerance on the residual `|E − e·sin(E) − M|` (default `1e-8`).
/// * `max_iter` – hard iteration cap; bounds the cost of every call (default `100`).
///
/// See also
/// ------------
/// * [`solve_kepler`] – Same solver with default settings.
/// * [`true_anomaly`] – Next step of the anomaly chain.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KeplerSolver {
    pub tolerance: f64,
    pub max_iter: usize,
}

impl Default for KeplerSolver {
    fn default() -> Self {
        KeplerSolver {
            tolerance: KEPLER_DEFAULT_TOLERANCE,
            max_iter: KEPLER_DEFAULT_MAX_ITER,
        }
    }
}

impl KeplerSolver {
    /// Build a solver with a custom tolerance and iteration cap.
    ///
    /// Return
    /// ----------
    /// * `Err(RvBinaryError::InvalidInput)` if `tolerance` is not strictly positive
    ///   or `max_iter` is zero.
    pub fn new(tolerance: f64, max_iter: usize) -> Result<Self, RvBinaryError> {
        let solver = KeplerSolver {
            tolerance,
            max_iter,
        };
        solver.validate()?;
        Ok(solver)
    }

    pub(crate) fn validate(&self) -> Result<(), RvBinaryError> {
        if !gt0(self.tolerance) || !self.tolerance.is_finite() {
            return Err(RvBinaryError::InvalidInput(format!(
                "Kepler tolerance must be strictly positive, got {}",
                self.tolerance
            )));
        }
        if self.max_iter == 0 {
            return Err(RvBinaryError::InvalidInput(
                "Kepler max_iter must be >= 1".into(),
            ));
        }
        Ok(())
    }

    /// Solve `E − e·sin(E) = M` for the eccentric anomaly.
    ///
    /// The mean anomaly is reduced to `[0, 2π)` here, once; callers may pass any real value.
    /// The residual is tested before each Newton step; a step smaller than the tolerance is
    /// accepted when the re-evaluated residual stays below `10·tolerance`.
    ///
    /// Arguments
    /// -----------------
    /// * `mean_anomaly` – Mean anomaly `M` (radians, any finite value).
    /// * `eccentricity` – Eccentricity `e ∈ [0, 1)`.
    ///
    /// Return
    /// ----------
    /// * Eccentric anomaly `E` in `[0, 2π)`.
    /// * `Err(RvBinaryError::InvalidInput)` for `e ∉ [0, 1)` or a non-finite `M`.
    /// * `Err(RvBinaryError::Convergence)` when `max_iter` steps are exhausted.
    pub fn solve(&self, mean_anomaly: Radian, eccentricity: f64) -> Result<Radian, RvBinaryError> {
        check_eccentricity(eccentricity)?;
        check_finite("mean anomaly", mean_anomaly)?;

        let e = eccentricity;
        let m = principal_angle(mean_anomaly);

        let mut ecc_anom = if e > HIGH_ECCENTRICITY { PI } else { m };

        for _ in 0..self.max_iter {
            let residual = ecc_anom - e * ecc_anom.sin() - m;
            if residual.abs() < self.tolerance {
                return Ok(ecc_anom);
            }

            let delta = residual / (1.0 - e * ecc_anom.cos());
            ecc_anom -= delta;

            if delta.abs() < self.tolerance {
                let final_residual = ecc_anom - e * ecc_anom.sin() - m;
                if final_residual.abs() < 10.0 * self.tolerance {
                    debug!(
                        mean_anomaly = m,
                        eccentricity = e,
                        residual = final_residual,
                        "Kepler solver accepted on step size"
                    );
                    return Ok(principal_angle(ecc_anom));
                }
            }

            ecc_anom = principal_angle(ecc_anom);
        }

        Err(RvBinaryError::Convergence {
            mean_anomaly: m,
            eccentricity: e,
            iterations: self.max_iter,
        })
    }
}

/// Solve Kepler's equation with the default tolerance (`1e-8`) and iteration cap (`100`).
///
/// See [`KeplerSolver::solve`].
pub fn solve_kepler(mean_anomaly: Radian, eccentricity: f64) -> Result<Radian, RvBinaryError> {
    KeplerSolver::default().solve(mean_anomaly, eccentricity)
}

/// True anomaly from eccentric anomaly.
///
/// Uses `θ = atan2(√(1−e²)·sin E, cos E − e)`; the result lies in `(−π, π]`.
///
/// Return
/// ----------
/// * True anomaly `θ` in radians.
/// * `Err(RvBinaryError::InvalidInput)` for `e ∉ [0, 1)` or a non-finite `E`.
pub fn true_anomaly(
    eccentric_anomaly: Radian,
    eccentricity: f64,
) -> Result<Radian, RvBinaryError> {
    check_eccentricity(eccentricity)?;
    check_finite("eccentric anomaly", eccentric_anomaly)?;

    let (sin_e, cos_e) = eccentric_anomaly.sin_cos();
    Ok(((1.0 - eccentricity * eccentricity).sqrt() * sin_e).atan2(cos_e - eccentricity))
}
