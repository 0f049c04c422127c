//! # String Mechanics Formulas
//!
//! ## Notation
//!
//! - `MW` = Mud weight, ppg
//! - `BF` = Buoyancy factor
//! - `E` = Young's modulus, psi
//! - `I` = Second moment of area, in⁴
//! - `w` = Buoyed weight per unit length, lbf/in
//! - `θ` = Inclination
//! - `c` = Diametral clearance (hole − pipe OD), in

use super::STEEL_DENSITY_PPG;

/// Buoyancy factor of steel in a fluid
///
/// # Formula
/// BF = 1 − MW / 65.5
///
/// # Example
/// ```rust
/// use well_core::equations::mechanics::buoyancy_factor;
///
/// assert!((buoyancy_factor(13.1) - 0.8).abs() < 1e-12);
/// ```
#[inline]
pub fn buoyancy_factor(mw_ppg: f64) -> f64 {
    1.0 - mw_ppg / STEEL_DENSITY_PPG
}

/// Critical buckling force
///
/// # Formula
/// Fc = 2 √(E · I · w · cos θ / c)
///
/// With E in psi, I in in⁴, w in lbf/in and c in in, Fc is in lbf.
/// A larger clearance lowers the critical force.
#[inline]
pub fn critical_buckling_force_lbf(
    youngs_modulus_psi: f64,
    moment_of_inertia_in4: f64,
    buoyed_weight_lbf_per_in: f64,
    inclination_rad: f64,
    clearance_in: f64,
) -> f64 {
    2.0 * (youngs_modulus_psi * moment_of_inertia_in4 * buoyed_weight_lbf_per_in * inclination_rad.cos()
        / clearance_in)
        .sqrt()
}
