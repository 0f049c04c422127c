//! # well_core - Well Engineering Quantity and Geometry Engine
//!
//! `well_core` is the computational core for drilling well calculations: a
//! unit-safe quantity system, a wellbore string model with a depth-interval
//! geometry decomposer, and the hydraulics, trajectory, mechanics and
//! operational-limit calculators built on top of them. All inputs and
//! outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Unit-safe**: Every physical value carries its unit; mixing kinds is a type error
//! - **Stateless**: Calculators are pure functions of their inputs
//! - **JSON-First**: Quantities serialize as `{ "value": .., "unit": ".." }`
//! - **Rich Errors**: Structured error types, never `NaN` or partial results
//!
//! ## Quick Start
//!
//! ```rust
//! use well_core::{hydrostatic_pressure, Density, Depth};
//!
//! let p = hydrostatic_pressure(&Density::from_ppg(12.5), &Depth::from_ft(10_000.0)).unwrap();
//! assert!((p.psi() - 6500.0).abs() < 1e-9);
//! ```
//!
//! ## Modules
//!
//! - [`units`] - Quantity kinds, unit registry and typed wrappers
//! - [`wellbore`] - Wellbore string model and geometry decomposition
//! - [`calculations`] - Trajectory, hydraulics, mechanics, torque and drag
//! - [`equations`] - Raw oilfield formulas in base units
//! - [`limits`] - Operational limits and their TOML configuration
//! - [`well_case`] - Serializable well case and the full case pipeline
//! - [`batch`] - Parallel evaluation of independent inputs
//! - [`errors`] - Structured error types

pub mod batch;
pub mod calculations;
pub mod equations;
pub mod errors;
pub mod limits;
pub mod units;
pub mod well_case;
pub mod wellbore;

// Re-export commonly used types at crate root for convenience
pub use calculations::hydraulics::{ecd, friction_pressure_loss, hydrostatic_pressure};
pub use calculations::mechanics::{buoyed_weight, critical_buckling_force};
pub use calculations::trajectory::trajectory_delta;
pub use calculations::{CalculationOutput, CalculationRequest, SurveyStation};
pub use errors::{OperationalLimitError, WellError, WellResult};
pub use limits::{validate_operational_limit, LimitKind, OperationalLimits};
pub use units::{
    Angle, Area, Azimuth, Density, Depth, Diameter, DoglegSeverity, FlowRate, Inclination, Length,
    LinearDensity, Power, Pressure, Quantity, QuantityKind, Ratio, Temperature, Time, Torque,
    UnitCapacity, Velocity, Viscosity, Volume, Weight,
};
pub use well_case::{run_case, CaseReport, WellCase};
pub use wellbore::{decompose_geometry, DepthSegment, WellboreBody, WellboreStringModel};
