//! # Drilling Hydraulics Formulas
//!
//! Field-unit forms of the hydrostatic, velocity and pressure-loss equations.
//!
//! ## Notation
//!
//! - `MW`, `ρ` = Fluid density, ppg
//! - `TVD` = True vertical depth, ft
//! - `Q` = Flow rate, gpm
//! - `v` = Mean velocity
//! - `d` = Flow diameter (pipe ID or hydraulic diameter), in
//! - `μ` = Viscosity, cP
//! - `f` = Fanning friction factor

use super::{
    BIT_NOZZLE_CONSTANT, GAL_PER_FT3, GC, HHP_CONSTANT, HYDROSTATIC_GRADIENT,
    PIPE_VELOCITY_CONSTANT, REYNOLDS_CONSTANT,
};

/// Hydrostatic pressure of a fluid column
///
/// # Formula
/// P = 0.052 × MW × TVD  (psi)
///
/// # Example
/// ```rust
/// use well_core::equations::hydraulics::hydrostatic_pressure_psi;
///
/// assert_eq!(hydrostatic_pressure_psi(12.5, 10_000.0), 6500.0);
/// ```
#[inline]
pub fn hydrostatic_pressure_psi(mw_ppg: f64, tvd_ft: f64) -> f64 {
    HYDROSTATIC_GRADIENT * mw_ppg * tvd_ft
}

/// Equivalent circulating density
///
/// # Formula
/// ECD = MW + APL / (0.052 × TVD)  (ppg)
#[inline]
pub fn ecd_ppg(mw_ppg: f64, annular_pressure_loss_psi: f64, tvd_ft: f64) -> f64 {
    mw_ppg + annular_pressure_loss_psi / (HYDROSTATIC_GRADIENT * tvd_ft)
}

/// Mean velocity inside a pipe
///
/// # Formula
/// v = Q / (2.448 × d²)  (ft/s)
#[inline]
pub fn pipe_velocity_ft_s(q_gpm: f64, d_in: f64) -> f64 {
    q_gpm / (PIPE_VELOCITY_CONSTANT * d_in * d_in)
}

/// Mean annular velocity from the annular flow area
///
/// # Formula
/// v = (Q × 144) / (A × 7.48052)  (ft/min), A in in²
#[inline]
pub fn annular_velocity_ft_min(q_gpm: f64, annular_area_in2: f64) -> f64 {
    (q_gpm * 144.0) / (annular_area_in2 * GAL_PER_FT3)
}

/// Reynolds number in field units
///
/// # Formula
/// Re = 928 × ρ × v × d / μ,  with ρ in ppg, v in ft/s, d in in, μ in cP
#[inline]
pub fn reynolds_number(rho_ppg: f64, v_ft_s: f64, d_in: f64, mu_cp: f64) -> f64 {
    REYNOLDS_CONSTANT * rho_ppg * v_ft_s * d_in / mu_cp
}

/// Frictional pressure loss from the Fanning equation
///
/// # Formula
/// ΔP = 2 f ρ v² L / d
///
/// evaluated with ρ in lbm/ft³ (ppg × 7.48052), d in ft, divided by g_c
/// and 144 to give psi.
#[inline]
pub fn fanning_pressure_loss_psi(f: f64, rho_ppg: f64, v_ft_s: f64, length_ft: f64, d_in: f64) -> f64 {
    let rho_lbm_ft3 = rho_ppg * GAL_PER_FT3;
    let d_ft = d_in / 12.0;
    let dp_lbf_ft2 = 2.0 * f * rho_lbm_ft3 * v_ft_s * v_ft_s * length_ft / (d_ft * GC);
    dp_lbf_ft2 / 144.0
}

/// Pressure drop across the bit nozzles
///
/// # Formula
/// ΔP = MW × Q² / (12031 × TFA²)  (psi), TFA in in²
#[inline]
pub fn bit_pressure_drop_psi(mw_ppg: f64, q_gpm: f64, tfa_in2: f64) -> f64 {
    mw_ppg * q_gpm * q_gpm / (BIT_NOZZLE_CONSTANT * tfa_in2 * tfa_in2)
}

/// Hydraulic horsepower delivered at a pressure and flow rate
///
/// # Formula
/// HHP = P × Q / 1714
#[inline]
pub fn hydraulic_horsepower(p_psi: f64, q_gpm: f64) -> f64 {
    p_psi * q_gpm / HHP_CONSTANT
}
