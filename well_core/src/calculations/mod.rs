//! # Well Engineering Calculations
//!
//! Typed calculators built on the raw formulas in [`crate::equations`].
//! Every calculator takes quantities in any valid unit and returns a
//! `WellResult`; none of them returns a `NaN`, infinite or partial value.
//!
//! ## Available Calculations
//!
//! - [`trajectory`] - Minimum-curvature survey deltas and cumulative positions
//! - [`friction`] - Fanning friction factor (laminar / Colebrook–White)
//! - [`hydraulics`] - Hydrostatics, ECD, velocities, circulating losses, bit hydraulics
//! - [`mechanics`] - Buoyancy, hook load, buckling, casing design factors
//! - [`torque_drag`] - Soft-string torque and drag
//!
//! ## Single requests
//!
//! [`CalculationRequest`] wraps the single-shot calculators in one
//! serializable enum so a front end can dispatch a JSON request without
//! knowing each function signature.

pub mod friction;
pub mod hydraulics;
pub mod mechanics;
pub mod torque_drag;
pub mod trajectory;

use serde::{Deserialize, Serialize};

use crate::errors::WellResult;
use crate::units::{Density, Depth, Diameter, FlowRate, Inclination, Length, LinearDensity, Pressure, Viscosity, Weight};

pub use hydraulics::{CirculatingLosses, DrillingFluid};
pub use mechanics::PipeProperties;
pub use torque_drag::{TorqueDragInput, TorqueDragResult};
pub use trajectory::{SurveyPoint, SurveyStation, TrajectoryDelta};

/// One single-shot calculation, tagged by `"type"` in JSON.
///
/// ## JSON Example
///
/// ```json
/// {
///   "type": "HydrostaticPressure",
///   "mud_weight": { "value": 12.5, "unit": "ppg" },
///   "depth": { "value": 10000.0, "unit": "ft" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationRequest {
    HydrostaticPressure {
        mud_weight: Density,
        depth: Depth,
    },
    FrictionPressureLoss {
        flow_rate: FlowRate,
        length: Length,
        diameter: Diameter,
        density: Density,
        viscosity: Viscosity,
    },
    Ecd {
        static_mud_weight: Density,
        annular_pressure_loss: Pressure,
        tvd: Depth,
    },
    TrajectoryDelta {
        from: SurveyStation,
        to: SurveyStation,
    },
    BuoyedWeight {
        weight_per_length: LinearDensity,
        length: Length,
        mud_weight: Density,
    },
    CriticalBuckling {
        pipe: PipeProperties,
        hole_size: Diameter,
        inclination: Inclination,
        mud_weight: Density,
    },
}

/// Result of a [`CalculationRequest`], tagged like the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    Pressure { value: Pressure },
    Density { value: Density },
    Weight { value: Weight },
    Trajectory { delta: TrajectoryDelta },
}

impl CalculationRequest {
    /// Calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationRequest::HydrostaticPressure { .. } => "HydrostaticPressure",
            CalculationRequest::FrictionPressureLoss { .. } => "FrictionPressureLoss",
            CalculationRequest::Ecd { .. } => "Ecd",
            CalculationRequest::TrajectoryDelta { .. } => "TrajectoryDelta",
            CalculationRequest::BuoyedWeight { .. } => "BuoyedWeight",
            CalculationRequest::CriticalBuckling { .. } => "CriticalBuckling",
        }
    }

    /// Dispatch to the matching calculator.
    pub fn run(&self) -> WellResult<CalculationOutput> {
        match self {
            CalculationRequest::HydrostaticPressure { mud_weight, depth } => {
                hydraulics::hydrostatic_pressure(mud_weight, depth).map(|value| CalculationOutput::Pressure { value })
            }
            CalculationRequest::FrictionPressureLoss {
                flow_rate,
                length,
                diameter,
                density,
                viscosity,
            } => hydraulics::friction_pressure_loss(flow_rate, length, diameter, density, viscosity)
                .map(|value| CalculationOutput::Pressure { value }),
            CalculationRequest::Ecd {
                static_mud_weight,
                annular_pressure_loss,
                tvd,
            } => hydraulics::ecd(static_mud_weight, annular_pressure_loss, tvd)
                .map(|value| CalculationOutput::Density { value }),
            CalculationRequest::TrajectoryDelta { from, to } => {
                trajectory::trajectory_delta(from, to).map(|delta| CalculationOutput::Trajectory { delta })
            }
            CalculationRequest::BuoyedWeight {
                weight_per_length,
                length,
                mud_weight,
            } => mechanics::buoyed_weight(weight_per_length, length, mud_weight)
                .map(|value| CalculationOutput::Weight { value }),
            CalculationRequest::CriticalBuckling {
                pipe,
                hole_size,
                inclination,
                mud_weight,
            } => mechanics::critical_buckling_force(pipe, hole_size, inclination, mud_weight)
                .map(|value| CalculationOutput::Weight { value }),
        }
    }
}
