//! # Radial-velocity semi-amplitude from component masses
//!
//! Kepler's third law in solar units (`a³ = P²·(m1+m2)` with `a` in AU and `P` in years)
//! gives the relative orbit; the primary moves on the barycentric orbit
//! `a1 = a·m2/(m1+m2)`, hence
//!
//! ```text
//! K1 = 2π·a1·sin(i) / (P·√(1−e²))
//! ```
//!
//! converted from AU/yr to km/s.

use serde::{Deserialize, Serialize};

use crate::{
    constants::{KmPerSec, Radian, SolarMass, AU_PER_YEAR_TO_KMS, DAYS_PER_YEAR, DPI},
    rvbinary_errors::RvBinaryError,
    validation::{check_eccentricity, check_inclination, check_period, ge0, gt0},
};

/// Physical description of the binary used to derive the primary's semi-amplitude.
///
/// Units
/// -----
/// * `period_day`: days (> 0).
/// * `m1_solar`: primary mass, solar masses (> 0).
/// * `m2_solar`: secondary mass, solar masses (≥ 0).
/// * `inclination_rad`: orbital inclination, radians, `[0, π]` (0 = face-on).
/// * `eccentricity`: unitless, `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MassConfiguration {
    pub period_day: f64,
    pub m1_solar: SolarMass,
    pub m2_solar: SolarMass,
    pub inclination_rad: Radian,
    pub eccentricity: f64,
}

impl MassConfiguration {
    fn validate(&self) -> Result<(), RvBinaryError> {
        if !gt0(self.m1_solar) || !self.m1_solar.is_finite() {
            return Err(RvBinaryError::InvalidInput(format!(
                "primary mass must be positive, got {} Msun",
                self.m1_solar
            )));
        }
        if !ge0(self.m2_solar) || !self.m2_solar.is_finite() {
            return Err(RvBinaryError::InvalidInput(format!(
                "secondary mass must be non-negative, got {} Msun",
                self.m2_solar
            )));
        }
        check_period(self.period_day)?;
        check_eccentricity(self.eccentricity)?;
        check_inclination(self.inclination_rad)?;

        if !gt0(self.total_mass()) {
            return Err(RvBinaryError::InvalidInput(
                "total mass must be positive".into(),
            ));
        }
        Ok(())
    }

    /// `m1 + m2` in solar masses.
    pub fn total_mass(&self) -> SolarMass {
        self.m1_solar + self.m2_solar
    }

    /// Semi-major axis of the relative orbit (AU).
    fn relative_semi_major_axis(&self) -> f64 {
        let period_year = self.period_day / DAYS_PER_YEAR;
        (period_year * period_year * self.total_mass()).cbrt()
    }

    /// Radial-velocity semi-amplitude of the primary, in km/s.
    ///
    /// Return
    /// ----------
    /// * `K1 ≥ 0` when `sin(i) ≥ 0`; `0` for a face-on orbit or a massless companion.
    /// * `Err(RvBinaryError::InvalidInput)` when any field is out of its domain; nothing
    ///   is computed in that case.
    pub fn semi_amplitude(&self) -> Result<KmPerSec, RvBinaryError> {
        self.validate()?;

        let period_year = self.period_day / DAYS_PER_YEAR;
        let a1_au = self.relative_semi_major_axis() * self.m2_solar / self.total_mass();

        let k_au_per_year = DPI * a1_au * self.inclination_rad.sin()
            / (period_year * (1.0 - self.eccentricity * self.eccentricity).sqrt());

        Ok(k_au_per_year * AU_PER_YEAR_TO_KMS)
    }
}

/// Compute the primary's semi-amplitude `K1` (km/s) from the component masses.
///
/// See [`MassConfiguration::semi_amplitude`].
pub fn amplitude_from_masses(
    period_day: f64,
    m1_solar: SolarMass,
    m2_solar: SolarMass,
    inclination_rad: Radian,
    eccentricity: f64,
) -> Result<KmPerSec, RvBinaryError> {
    MassConfiguration {
        period_day,
        m1_solar,
        m2_solar,
        inclination_rad,
        eccentricity,
    }
    .semi_amplitude()
}

/// Where the semi-amplitude of an orbit comes from.
///
/// Variants
/// --------
/// * `Direct` — `K` measured or chosen directly (km/s, finite, ≥ 0).
/// * `FromMasses` — `K` derived with [`amplitude_from_masses`], using the period and
///   eccentricity of the orbit it is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemiAmplitude {
    Direct(KmPerSec),
    FromMasses {
        m1_solar: SolarMass,
        m2_solar: SolarMass,
        inclination_rad: Radian,
    },
}

impl SemiAmplitude {
    /// Resolve to a value in km/s for an orbit of the given period and eccentricity.
    pub fn resolve(&self, period_day: f64, eccentricity: f64) -> Result<KmPerSec, RvBinaryError> {
        match *self {
            SemiAmplitude::Direct(k) => {
                if ge0(k) && k.is_finite() {
                    Ok(k)
                } else {
                    Err(RvBinaryError::InvalidInput(format!(
                        "semi-amplitude must be a non-negative finite number, got {k} km/s"
                    )))
                }
            }
            SemiAmplitude::FromMasses {
                m1_solar,
                m2_solar,
                inclination_rad,
            } => amplitude_from_masses(
                period_day,
                m1_solar,
                m2_solar,
                inclination_rad,
                eccentricity,
            ),
        }
    }
}
