//! Conversions between geometric (mass-scaled) and SI units.
//!
//! Every forward conversion has an exact algebraic inverse. Masses are in solar
//! masses and distances in megaparsecs; both must be strictly positive, which is
//! enforced by [`crate::Metadata`] rather than here.

use std::ops::{Div, Mul};

/// Solar mass expressed in seconds (`G M_sun / c^3`).
pub const MTSUN_SI: f64 = 4.925490947641267e-06;
/// One parsec in metres.
pub const PC_SI: f64 = 3.085677581491367e16;
/// Speed of light in metres per second.
pub const C_SI: f64 = 299792458.0;

/// Seconds per unit of geometric time for the given total mass.
pub fn time_scale(total_mass: f64) -> f64 {
    MTSUN_SI * total_mass
}

/// Dimensionless strain per unit of geometric strain at the given mass and distance.
pub fn strain_scale(total_mass: f64, distance: f64) -> f64 {
    total_mass * MTSUN_SI * C_SI / (distance * 1e6 * PC_SI)
}

/// Converts geometric time into seconds.
pub fn time_geometric_to_si(time: f64, total_mass: f64) -> f64 {
    time * time_scale(total_mass)
}

/// Converts seconds into geometric time.
pub fn time_si_to_geometric(time: f64, total_mass: f64) -> f64 {
    time / time_scale(total_mass)
}

/// Converts geometric frequency into hertz.
pub fn frequency_geometric_to_si(frequency: f64, total_mass: f64) -> f64 {
    frequency / time_scale(total_mass)
}

/// Converts hertz into geometric frequency.
pub fn frequency_si_to_geometric(frequency: f64, total_mass: f64) -> f64 {
    frequency * time_scale(total_mass)
}

/// Converts geometric strain into SI strain. Works for real and complex samples.
pub fn strain_geometric_to_si<T>(strain: T, total_mass: f64, distance: f64) -> T
where
    T: Mul<f64, Output = T>,
{
    strain * strain_scale(total_mass, distance)
}

/// Converts SI strain back into geometric strain.
pub fn strain_si_to_geometric<T>(strain: T, total_mass: f64, distance: f64) -> T
where
    T: Div<f64, Output = T>,
{
    strain / strain_scale(total_mass, distance)
}
