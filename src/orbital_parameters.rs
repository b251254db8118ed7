//! # Orbital parameters of a single-lined spectroscopic binary
//!
//! [`OrbitalParameters`] is the immutable element set consumed by the radial-velocity
//! evaluator. It can only be obtained through [`OrbitalParametersBuilder::build`] (or serde
//! deserialization, which goes through the same checks), so every instance satisfies:
//!
//! - `P > 0`, `e ∈ [0, 1)`, `K ≥ 0`, every field finite;
//! - `n = 2π / P` exactly, recomputed from the period and never supplied by the caller.
//!
//! ## Example
//!
//! ```rust
//! use rvbinary::amplitude::SemiAmplitude;
//! use rvbinary::orbital_parameters::OrbitalParameters;
//!
//! let params = OrbitalParameters::builder()
//!     .period_day(10.0)
//!     .eccentricity(0.3)
//!     .omega0_deg(110.0)
//!     .omega_dot_arcsec_per_year(3600.0)
//!     .semi_amplitude(SemiAmplitude::FromMasses {
//!         m1_solar: 1.0,
//!         m2_solar: 0.5,
//!         inclination_rad: std::f64::consts::FRAC_PI_2,
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert!(params.semi_amplitude_kms() > 0.0);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    amplitude::SemiAmplitude,
    constants::{ArcSec, Day, Degree, KmPerSec, Radian, DPI},
    conversion::{
        arcsec_per_year_to_rad_per_day, deg_to_rad, rad_per_day_to_arcsec_per_year, rad_to_deg,
    },
    rvbinary_errors::RvBinaryError,
    validation::{check_eccentricity, check_finite, check_period, ge0},
};

/// Validated orbital elements for the radial-velocity model.
///
/// Units
/// -----
/// * `semi_amplitude_kms`: km/s.
/// * `period_day`, `periastron_time_day`: days.
/// * `omega0_rad`: radians (argument of periastron at `t = 0`).
/// * `omega_dot_rad_day`: radians/day (0 disables apsidal motion).
/// * `systemic_velocity_kms`: km/s.
/// * `mean_motion_rad_day`: radians/day, always `2π / period_day`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OrbitalParametersRecord", into = "OrbitalParametersRecord")]
pub struct OrbitalParameters {
    semi_amplitude_kms: KmPerSec,
    period_day: Day,
    eccentricity: f64,
    omega0_rad: Radian,
    omega_dot_rad_day: f64,
    periastron_time_day: Day,
    systemic_velocity_kms: KmPerSec,
    mean_motion_rad_day: f64,
}

impl OrbitalParameters {
    /// Start a [`OrbitalParametersBuilder`] with the default values
    /// (`K = 0`, `P = 1 d`, circular, no apsidal motion, `T_p = 0`, `V_γ = 0`).
    pub fn builder() -> OrbitalParametersBuilder {
        OrbitalParametersBuilder::new()
    }

    pub fn semi_amplitude_kms(&self) -> KmPerSec {
        self.semi_amplitude_kms
    }

    pub fn period_day(&self) -> Day {
        self.period_day
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn omega0_rad(&self) -> Radian {
        self.omega0_rad
    }

    pub fn omega_dot_rad_day(&self) -> f64 {
        self.omega_dot_rad_day
    }

    pub fn periastron_time_day(&self) -> Day {
        self.periastron_time_day
    }

    pub fn systemic_velocity_kms(&self) -> KmPerSec {
        self.systemic_velocity_kms
    }

    pub fn mean_motion_rad_day(&self) -> f64 {
        self.mean_motion_rad_day
    }

    /// Argument of periastron at time `t`, `ω(t) = ω₀ + ω̇·t`.
    pub fn omega_at(&self, time_day: Day) -> Radian {
        self.omega0_rad + self.omega_dot_rad_day * time_day
    }

    /// Apsidal period `2π / |ω̇|` in days, `None` without apsidal motion.
    pub fn apsidal_period_day(&self) -> Option<Day> {
        (self.omega_dot_rad_day != 0.0).then(|| DPI / self.omega_dot_rad_day.abs())
    }

    /// Copy of these elements with apsidal motion switched off.
    pub fn without_apsidal_motion(&self) -> Self {
        OrbitalParameters {
            omega_dot_rad_day: 0.0,
            ..*self
        }
    }
}

impl fmt::Display for OrbitalParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Radial Velocity Curve (P={:.3}d, e={:.3})",
            self.period_day, self.eccentricity
        )?;
        writeln!(f, "-------------------------------------------")?;
        writeln!(
            f,
            "  K   (semi-amplitude)        = {:.6} km/s",
            self.semi_amplitude_kms
        )?;
        writeln!(f, "  P   (period)                = {:.6} d", self.period_day)?;
        writeln!(f, "  e   (eccentricity)          = {:.6}", self.eccentricity)?;
        writeln!(
            f,
            "  ω₀  (argument of periastron) = {:.6} rad ({:.6}°)",
            self.omega0_rad,
            rad_to_deg(self.omega0_rad)
        )?;
        writeln!(
            f,
            "  ω̇   (apsidal motion)        = {:.6e} rad/d ({:.3} arcsec/yr)",
            self.omega_dot_rad_day,
            rad_per_day_to_arcsec_per_year(self.omega_dot_rad_day)
        )?;
        writeln!(
            f,
            "  Tₚ  (periastron passage)    = {:.6} d",
            self.periastron_time_day
        )?;
        write!(
            f,
            "  Vγ  (systemic velocity)     = {:.6} km/s",
            self.systemic_velocity_kms
        )
    }
}

/// Unvalidated, serializable form of [`OrbitalParameters`].
///
/// The mean motion is not stored: it is derived from the period on conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalParametersRecord {
    pub semi_amplitude_kms: KmPerSec,
    pub period_day: Day,
    pub eccentricity: f64,
    #[serde(default)]
    pub omega0_rad: Radian,
    #[serde(default)]
    pub omega_dot_rad_day: f64,
    #[serde(default)]
    pub periastron_time_day: Day,
    #[serde(default)]
    pub systemic_velocity_kms: KmPerSec,
}

impl TryFrom<OrbitalParametersRecord> for OrbitalParameters {
    type Error = RvBinaryError;

    fn try_from(record: OrbitalParametersRecord) -> Result<Self, Self::Error> {
        OrbitalParameters::builder()
            .semi_amplitude_kms(record.semi_amplitude_kms)
            .period_day(record.period_day)
            .eccentricity(record.eccentricity)
            .omega0_rad(record.omega0_rad)
            .omega_dot_rad_day(record.omega_dot_rad_day)
            .periastron_time_day(record.periastron_time_day)
            .systemic_velocity_kms(record.systemic_velocity_kms)
            .build()
    }
}

impl From<OrbitalParameters> for OrbitalParametersRecord {
    fn from(p: OrbitalParameters) -> Self {
        OrbitalParametersRecord {
            semi_amplitude_kms: p.semi_amplitude_kms,
            period_day: p.period_day,
            eccentricity: p.eccentricity,
            omega0_rad: p.omega0_rad,
            omega_dot_rad_day: p.omega_dot_rad_day,
            periastron_time_day: p.periastron_time_day,
            systemic_velocity_kms: p.systemic_velocity_kms,
        }
    }
}

/// Builder for [`OrbitalParameters`], with validation.
#[derive(Debug, Clone)]
pub struct OrbitalParametersBuilder {
    semi_amplitude: SemiAmplitude,
    period_day: Day,
    eccentricity: f64,
    omega0_rad: Radian,
    omega_dot_rad_day: f64,
    periastron_time_day: Day,
    systemic_velocity_kms: KmPerSec,
}

impl Default for OrbitalParametersBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitalParametersBuilder {
    /// Create a new builder initialized with default values.
    pub fn new() -> Self {
        Self {
            semi_amplitude: SemiAmplitude::Direct(0.0),
            period_day: 1.0,
            eccentricity: 0.0,
            omega0_rad: 0.0,
            omega_dot_rad_day: 0.0,
            periastron_time_day: 0.0,
            systemic_velocity_kms: 0.0,
        }
    }

    // --- Amplitude ---
    pub fn semi_amplitude(mut self, v: SemiAmplitude) -> Self {
        self.semi_amplitude = v;
        self
    }
    pub fn semi_amplitude_kms(mut self, v: KmPerSec) -> Self {
        self.semi_amplitude = SemiAmplitude::Direct(v);
        self
    }

    // --- Shape and timing ---
    pub fn period_day(mut self, v: Day) -> Self {
        self.period_day = v;
        self
    }
    pub fn eccentricity(mut self, v: f64) -> Self {
        self.eccentricity = v;
        self
    }
    pub fn periastron_time_day(mut self, v: Day) -> Self {
        self.periastron_time_day = v;
        self
    }
    pub fn systemic_velocity_kms(mut self, v: KmPerSec) -> Self {
        self.systemic_velocity_kms = v;
        self
    }

    // --- Orientation and apsidal motion ---
    pub fn omega0_rad(mut self, v: Radian) -> Self {
        self.omega0_rad = v;
        self
    }
    pub fn omega0_deg(mut self, v: Degree) -> Self {
        self.omega0_rad = deg_to_rad(v);
        self
    }
    pub fn omega_dot_rad_day(mut self, v: f64) -> Self {
        self.omega_dot_rad_day = v;
        self
    }
    pub fn omega_dot_arcsec_per_year(mut self, v: ArcSec) -> Self {
        self.omega_dot_rad_day = arcsec_per_year_to_rad_per_day(v);
        self
    }

    /// Finalize the builder and produce an [`OrbitalParameters`] instance.
    ///
    /// Validation rules
    /// -----------------
    /// * `period_day > 0` and finite.
    /// * `eccentricity ∈ [0, 1)`.
    /// * every angle, rate, epoch and velocity finite.
    /// * the semi-amplitude resolves (see [`SemiAmplitude::resolve`]) to a finite `K ≥ 0`;
    ///   a mass-based amplitude uses this builder's period and eccentricity.
    ///
    /// The mean motion is computed here as `2π / period_day`.
    pub fn build(self) -> Result<OrbitalParameters, RvBinaryError> {
        check_period(self.period_day)?;
        check_eccentricity(self.eccentricity)?;
        check_finite("argument of periastron", self.omega0_rad)?;
        check_finite("apsidal motion rate", self.omega_dot_rad_day)?;
        check_finite("time of periastron", self.periastron_time_day)?;
        check_finite("systemic velocity", self.systemic_velocity_kms)?;

        let semi_amplitude_kms = self
            .semi_amplitude
            .resolve(self.period_day, self.eccentricity)?;
        if !ge0(semi_amplitude_kms) {
            return Err(RvBinaryError::InvalidInput(format!(
                "semi-amplitude must be non-negative, got {semi_amplitude_kms} km/s"
            )));
        }

        Ok(OrbitalParameters {
            semi_amplitude_kms,
            period_day: self.period_day,
            eccentricity: self.eccentricity,
            omega0_rad: self.omega0_rad,
            omega_dot_rad_day: self.omega_dot_rad_day,
            periastron_time_day: self.periastron_time_day,
            systemic_velocity_kms: self.systemic_velocity_kms,
            mean_motion_rad_day: DPI / self.period_day,
        })
    }
}

#[cfg(test)]
mod orbital_parameters_test {
    use super::*;
    use crate::{amplitude::amplitude_from_masses, constants::RADEG};
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let p = OrbitalParameters::builder().build().unwrap();
        assert_eq!(p.period_day(), 1.0);
        assert_eq!(p.eccentricity(), 0.0);
        assert_eq!(p.semi_amplitude_kms(), 0.0);
        assert_eq!(p.mean_motion_rad_day(), DPI);
        assert_eq!(p.apsidal_period_day(), None);
    }

    #[test]
    fn test_mean_motion_follows_period() {
        let p = OrbitalParameters::builder()
            .period_day(7.25)
            .build()
            .unwrap();
        assert_eq!(p.mean_motion_rad_day(), DPI / 7.25);
    }

    #[test]
    fn test_observer_units() {
        let p = OrbitalParameters::builder()
            .period_day(4.0)
            .omega0_deg(90.0)
            .omega_dot_arcsec_per_year(3600.0)
            .build()
            .unwrap();
        assert_relative_eq!(p.omega0_rad(), std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(p.omega_dot_rad_day(), RADEG / 365.25, max_relative = 1e-14);
        // one full revolution of the line of apsides at 1°/yr takes 360 years
        assert_relative_eq!(
            p.apsidal_period_day().unwrap(),
            360.0 * 365.25,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_amplitude_from_masses_uses_orbit() {
        let p = OrbitalParameters::builder()
            .period_day(10.0)
            .eccentricity(0.4)
            .semi_amplitude(SemiAmplitude::FromMasses {
                m1_solar: 1.0,
                m2_solar: 0.5,
                inclination_rad: 80.0 * RADEG,
            })
            .build()
            .unwrap();
        let expected = amplitude_from_masses(10.0, 1.0, 0.5, 80.0 * RADEG, 0.4).unwrap();
        assert_eq!(p.semi_amplitude_kms(), expected);
    }

    #[test]
    fn test_rejections() {
        let base = || OrbitalParameters::builder().semi_amplitude_kms(30.0);

        for e in [1.0, 1.5, -0.2, f64::NAN] {
            assert!(matches!(
                base().eccentricity(e).build(),
                Err(RvBinaryError::InvalidInput(_))
            ));
        }
        for p in [0.0, -1.0, f64::INFINITY] {
            assert!(base().period_day(p).build().is_err());
        }
        assert!(base().semi_amplitude_kms(-1.0).build().is_err());
        assert!(base().omega0_rad(f64::NAN).build().is_err());
        assert!(base().omega_dot_rad_day(f64::INFINITY).build().is_err());
        assert!(base().periastron_time_day(f64::NAN).build().is_err());
        assert!(base().systemic_velocity_kms(f64::NEG_INFINITY).build().is_err());
        assert!(base().eccentricity(0.0).build().is_ok());
    }

    #[test]
    fn test_mass_based_amplitude_never_negative() {
        for incl in [4.0, -0.1] {
            let built = OrbitalParameters::builder()
                .period_day(10.0)
                .semi_amplitude(SemiAmplitude::FromMasses {
                    m1_solar: 1.0,
                    m2_solar: 0.5,
                    inclination_rad: incl,
                })
                .build();
            assert!(matches!(built, Err(RvBinaryError::InvalidInput(_))));
        }
    }

    #[test]
    fn test_without_apsidal_motion() {
        let p = OrbitalParameters::builder()
            .omega_dot_rad_day(1e-3)
            .omega0_rad(0.5)
            .build()
            .unwrap();
        let q = p.without_apsidal_motion();
        assert_eq!(q.omega_dot_rad_day(), 0.0);
        assert_eq!(q.omega0_rad(), 0.5);
        assert_eq!(q.omega_at(1000.0), 0.5);
        assert_relative_eq!(p.omega_at(1000.0), 1.5);
    }

    #[test]
    fn test_display() {
        let p = OrbitalParameters::builder()
            .period_day(10.0)
            .eccentricity(0.25)
            .build()
            .unwrap();
        let text = p.to_string();
        assert!(text.starts_with("Radial Velocity Curve (P=10.000d, e=0.250)"));
        assert!(text.contains("km/s"));
    }
}
