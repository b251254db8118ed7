#![allow(dead_code)]

use approx::assert_relative_eq;
use rvbinary::{amplitude::SemiAmplitude, constants::RADEG, orbital_parameters::OrbitalParameters};

/// Eccentric binary with a fast apsidal motion (1° per orbit), K derived from the masses.
pub fn apsidal_binary() -> OrbitalParameters {
    OrbitalParameters::builder()
        .period_day(10.0)
        .eccentricity(0.3)
        .omega0_deg(75.0)
        .omega_dot_rad_day(RADEG / 10.0)
        .periastron_time_day(0.0)
        .systemic_velocity_kms(-21.5)
        .semi_amplitude(SemiAmplitude::FromMasses {
            m1_solar: 1.0,
            m2_solar: 0.5,
            inclination_rad: 90.0 * RADEG,
        })
        .build()
        .unwrap()
}

pub fn assert_all_close(actual: &[f64], expected: &[f64], epsilon: f64) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        assert_relative_eq!(*a, *e, epsilon = epsilon);
    }
}
