//! # Radial velocity with secular apsidal motion
//!
//! For the primary of a single-lined binary the line-of-sight velocity is
//!
//! ```text
//! Vr(t) = K·[ cos(θ + ω(t)) + e·cos(ω(t))
//!             + P·(1−e²)^{3/2} / (2π·(1 + e·cos θ)) · ω̇ · cos(ω(t) + θ) ]
//!         + Vγ
//! ω(t)  = ω₀ + ω̇·t
//! ```
//!
//! where `θ` follows from the mean anomaly `M = n·(t − Tₚ)` through Kepler's equation.
//! With apsidal motion disabled, `ω(t) = ω₀` and the last term vanishes.

use tracing::warn;

use crate::{
    constants::{Day, KmPerSec, DPI, SINGULAR_DENOMINATOR_EPS},
    kepler::{true_anomaly, KeplerSolver},
    orbital_parameters::OrbitalParameters,
    rvbinary_errors::RvBinaryError,
    validation::{check_eccentricity, check_finite},
};

/// Radial velocity (km/s) at `time_day`, using the default Kepler solver settings.
///
/// See [`radial_velocity_with`].
pub fn radial_velocity(
    time_day: Day,
    params: &OrbitalParameters,
    include_apsidal_motion: bool,
) -> Result<KmPerSec, RvBinaryError> {
    radial_velocity_with(
        time_day,
        params,
        include_apsidal_motion,
        &KeplerSolver::default(),
    )
}

/// Radial velocity (km/s) at `time_day` for the given orbit.
///
/// Arguments
/// -----------------
/// * `time_day` – Evaluation time (days, same origin as `Tₚ`).
/// * `params` – Orbital elements.
/// * `include_apsidal_motion` – When `false`, `ω` is frozen at `ω₀` and the apsidal
///   correction term is dropped.
/// * `solver` – Kepler solver settings.
///
/// Return
/// ----------
/// * `Vr` in km/s.
/// * `Err(RvBinaryError::InvalidInput)` for an eccentricity outside `[0, 1)` or a non-finite
///   time, before any trigonometry is evaluated.
/// * `Err(RvBinaryError::Convergence)` when Kepler's equation cannot be solved.
/// * `Err(RvBinaryError::SingularGeometry)` when `|1 + e·cos θ| < 1e-9` while the apsidal
///   term is active.
pub fn radial_velocity_with(
    time_day: Day,
    params: &OrbitalParameters,
    include_apsidal_motion: bool,
    solver: &KeplerSolver,
) -> Result<KmPerSec, RvBinaryError> {
    let e = params.eccentricity();
    check_eccentricity(e)?;
    check_finite("time", time_day)?;

    // sign kept; the solver reduces to [0, 2π)
    let mean_anomaly =
        (params.mean_motion_rad_day() * (time_day - params.periastron_time_day())) % DPI;

    let eccentric_anomaly = solver.solve(mean_anomaly, e)?;
    let theta = true_anomaly(eccentric_anomaly, e)?;

    let orbit = if include_apsidal_motion {
        *params
    } else {
        params.without_apsidal_motion()
    };
    let omega_dot = orbit.omega_dot_rad_day();
    let omega_t = orbit.omega_at(time_day);

    let mut bracket = (theta + omega_t).cos() + e * omega_t.cos();

    if omega_dot != 0.0 {
        let denominator = 1.0 + e * theta.cos();
        if denominator.abs() < SINGULAR_DENOMINATOR_EPS {
            warn!(
                time_day,
                eccentricity = e,
                true_anomaly = theta,
                denominator,
                "singular apsidal geometry"
            );
            return Err(RvBinaryError::SingularGeometry {
                time_day,
                eccentricity: e,
                true_anomaly: theta,
                denominator,
            });
        }

        let factor = params.period_day() * (1.0 - e * e).powf(1.5) / (DPI * denominator);
        bracket += factor * omega_dot * (omega_t + theta).cos();
    }

    Ok(params.semi_amplitude_kms() * bracket + params.systemic_velocity_kms())
}

#[cfg(test)]
mod radial_velocity_test {
    use super::*;
    use crate::{amplitude::SemiAmplitude, constants::RADEG, kepler::solve_kepler};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn eccentric_orbit(omega_dot_rad_day: f64) -> OrbitalParameters {
        OrbitalParameters::builder()
            .semi_amplitude_kms(42.0)
            .period_day(6.5)
            .eccentricity(0.4)
            .omega0_rad(1.1)
            .omega_dot_rad_day(omega_dot_rad_day)
            .periastron_time_day(2.3)
            .systemic_velocity_kms(-15.0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_at_periastron_circular() {
        let params = OrbitalParameters::builder()
            .period_day(10.0)
            .semi_amplitude(SemiAmplitude::FromMasses {
                m1_solar: 1.0,
                m2_solar: 0.5,
                inclination_rad: 90.0 * RADEG,
            })
            .omega0_rad(0.7)
            .periastron_time_day(3.0)
            .systemic_velocity_kms(-12.0)
            .build()
            .unwrap();

        let k = params.semi_amplitude_kms();
        assert_relative_eq!(k, 37.7086, max_relative = 1e-5);

        let vr = radial_velocity(3.0, &params, true).unwrap();
        assert_relative_eq!(vr, k * 0.7_f64.cos() - 12.0, max_relative = 1e-12);
    }

    #[test]
    fn test_at_periastron_eccentric() {
        let params = eccentric_orbit(0.0);
        let vr = radial_velocity(2.3, &params, false).unwrap();
        // θ = 0: bracket = (1 + e)·cos(ω₀)
        assert_relative_eq!(vr, 42.0 * 1.4 * 1.1_f64.cos() - 15.0, max_relative = 1e-12);
    }

    #[test]
    fn test_circular_orbit_is_sinusoid() {
        let params = OrbitalParameters::builder()
            .semi_amplitude_kms(20.0)
            .period_day(3.0)
            .omega0_rad(0.4)
            .periastron_time_day(0.5)
            .systemic_velocity_kms(5.0)
            .build()
            .unwrap();
        let n = params.mean_motion_rad_day();

        for k in 0..40 {
            let t = -4.0 + 0.37 * k as f64;
            let vr = radial_velocity(t, &params, false).unwrap();
            let expected = 20.0 * (n * (t - 0.5) + 0.4).cos() + 5.0;
            assert_abs_diff_eq!(vr, expected, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_periodic_without_apsidal_motion() {
        let params = eccentric_orbit(2e-3);
        let period = params.period_day();

        for k in 0..25 {
            let t = 0.41 * k as f64;
            let v0 = radial_velocity(t, &params, false).unwrap();
            let v1 = radial_velocity(t + period, &params, false).unwrap();
            let v3 = radial_velocity(t + 3.0 * period, &params, false).unwrap();
            assert_abs_diff_eq!(v0, v1, epsilon = 1e-5);
            assert_abs_diff_eq!(v0, v3, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_zero_rate_matches_disabled_motion() {
        let params = eccentric_orbit(0.0);
        for k in 0..20 {
            let t = 0.9 * k as f64;
            assert_eq!(
                radial_velocity(t, &params, true).unwrap(),
                radial_velocity(t, &params, false).unwrap()
            );
        }
    }

    #[test]
    fn test_disabled_motion_uses_frozen_orbit() {
        let params = eccentric_orbit(2e-3);
        let frozen = params.without_apsidal_motion();
        for k in 0..20 {
            let t = -3.0 + 1.7 * k as f64;
            assert_eq!(
                radial_velocity(t, &params, false).unwrap(),
                radial_velocity(t, &frozen, true).unwrap()
            );
        }
    }

    #[test]
    fn test_apsidal_term() {
        let omega_dot = 2e-3;
        let params = eccentric_orbit(omega_dot);
        let (k, p, e, w0) = (42.0, 6.5, 0.4, 1.1);
        let t = 57.3;

        let m = DPI / p * (t - 2.3);
        let theta = true_anomaly(solve_kepler(m, e).unwrap(), e).unwrap();
        let w = w0 + omega_dot * t;
        let expected = k
            * ((theta + w).cos()
                + e * w.cos()
                + p * (1.0 - e * e).powf(1.5) / (DPI * (1.0 + e * theta.cos()))
                    * omega_dot
                    * (w + theta).cos())
            - 15.0;

        let vr = radial_velocity(t, &params, true).unwrap();
        assert_abs_diff_eq!(vr, expected, epsilon = 1e-9);

        let frozen = radial_velocity(t, &params, false).unwrap();
        assert!((vr - frozen).abs() > 1e-3);
    }

    #[test]
    fn test_singular_geometry() {
        // apastron of an almost parabolic orbit: 1 + e·cos(π) ≈ 1e-12
        let params = OrbitalParameters::builder()
            .semi_amplitude_kms(10.0)
            .period_day(2.0)
            .eccentricity(1.0 - 1e-12)
            .omega_dot_rad_day(1e-4)
            .build()
            .unwrap();

        let err = radial_velocity(1.0, &params, true).unwrap_err();
        assert!(matches!(err, RvBinaryError::SingularGeometry { .. }));

        // without the apsidal term the same epoch is regular
        assert!(radial_velocity(1.0, &params, false).unwrap().is_finite());
    }

    #[test]
    fn test_rejects_non_finite_time() {
        let params = eccentric_orbit(0.0);
        assert!(matches!(
            radial_velocity(f64::NAN, &params, true),
            Err(RvBinaryError::InvalidInput(_))
        ));
        assert!(matches!(
            radial_velocity(f64::INFINITY, &params, false),
            Err(RvBinaryError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_convergence_failure_propagates() {
        let params = OrbitalParameters::builder()
            .semi_amplitude_kms(10.0)
            .period_day(4.0)
            .eccentricity(0.9)
            .build()
            .unwrap();
        let solver = KeplerSolver::new(1e-15, 1).unwrap();

        let err = radial_velocity_with(1.3, &params, true, &solver).unwrap_err();
        assert!(matches!(err, RvBinaryError::Convergence { iterations: 1, .. }));
    }
}
