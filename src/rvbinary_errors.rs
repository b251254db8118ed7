use thiserror::Error;

/// Failures surfaced by the radial-velocity engine.
///
/// Every variant is raised where the problem is detected and propagated unchanged;
/// no routine converts one of these into a NaN or a default value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RvBinaryError {
    /// Out-of-domain parameter (non-positive period, eccentricity outside `[0, 1)`,
    /// non-positive masses, non-finite values, inconsistent series bounds, ...).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(
        "Kepler solver did not converge within {iterations} iterations (M = {mean_anomaly}, e = {eccentricity})"
    )]
    Convergence {
        mean_anomaly: f64,
        eccentricity: f64,
        iterations: usize,
    },

    #[error(
        "Singular apsidal geometry at t = {time_day} d: 1 + e·cos(θ) = {denominator:e} (e = {eccentricity}, θ = {true_anomaly} rad)"
    )]
    SingularGeometry {
        time_day: f64,
        eccentricity: f64,
        true_anomaly: f64,
        denominator: f64,
    },
}
