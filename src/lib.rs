pub mod amplitude;
pub mod constants;
pub mod conversion;
pub mod kepler;
pub mod orbital_parameters;
pub mod radial_velocity;
pub mod rvbinary_errors;
pub mod series;
mod validation;
