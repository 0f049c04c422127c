//! # Oilfield Equations
//!
//! Raw `f64` drilling formulas in oilfield units. The calculators in
//! [`crate::calculations`] convert typed quantities into these units, call
//! the formulas here, and wrap the results back into quantities.
//!
//! ## Unit conventions
//!
//! - Depth and length: ft
//! - Pipe and hole diameters: in
//! - Mud weight: ppg
//! - Pressure: psi
//! - Flow rate: gpm
//! - Viscosity: cP
//! - Capacity: bbl/ft
//!
//! ## Modules
//!
//! - [`capacity`] - Pipe and annulus capacities, tubular section properties
//! - [`curvature`] - Minimum-curvature survey formulas
//! - [`hydraulics`] - Hydrostatics, velocities, Reynolds number, pressure losses
//! - [`mechanics`] - Buoyancy and buckling
//!
//! ## References
//!
//! - Bourgoyne et al., Applied Drilling Engineering (SPE Textbook Vol. 2)
//! - API RP 13D, Rheology and Hydraulics of Oil-well Drilling Fluids
//! - Johancsik, Friesen & Dawson, Torque and Drag in Directional Wells (SPE 11380)

pub mod capacity;
pub mod curvature;
pub mod hydraulics;
pub mod mechanics;

/// Capacity constant: `capacity (bbl/ft) = d² (in²) / 1029.4`
pub const CAPACITY_CONSTANT: f64 = 1029.4;

/// Hydrostatic gradient per ppg: `P (psi) = 0.052 × MW (ppg) × TVD (ft)`
pub const HYDROSTATIC_GRADIENT: f64 = 0.052;

/// Density of steel in ppg, used for buoyancy
pub const STEEL_DENSITY_PPG: f64 = 65.5;

/// US gallons per cubic foot as used in field hydraulics
pub const GAL_PER_FT3: f64 = 7.48052;

/// Gravitational constant (lbm·ft / lbf·s²)
pub const GC: f64 = 32.174;

/// Pipe velocity constant: `v (ft/s) = Q (gpm) / (2.448 × d² (in²))`
pub const PIPE_VELOCITY_CONSTANT: f64 = 2.448;

/// Reynolds number constant: `Re = 928 × ρ (ppg) × v (ft/s) × d (in) / μ (cP)`
pub const REYNOLDS_CONSTANT: f64 = 928.0;

/// Upper Reynolds number for laminar flow
pub const LAMINAR_REYNOLDS_LIMIT: f64 = 2100.0;

/// Hydraulic horsepower constant: `HHP = P (psi) × Q (gpm) / 1714`
pub const HHP_CONSTANT: f64 = 1714.0;

/// Bit nozzle constant: `ΔP = MW × Q² / (12031 × TFA²)`
pub const BIT_NOZZLE_CONSTANT: f64 = 12031.0;

pub use capacity::{
    annular_capacity_bbl_per_ft,
    circle_area_in2,
    pipe_capacity_bbl_per_ft,
    tubular_moment_of_inertia_in4,
};

pub use curvature::{dogleg_angle_rad, min_curvature_deltas, normalize_turn_deg, ratio_factor};

pub use hydraulics::{
    annular_velocity_ft_min,
    bit_pressure_drop_psi,
    ecd_ppg,
    fanning_pressure_loss_psi,
    hydraulic_horsepower,
    hydrostatic_pressure_psi,
    pipe_velocity_ft_s,
    reynolds_number,
};

pub use mechanics::{buoyancy_factor, critical_buckling_force_lbf};
