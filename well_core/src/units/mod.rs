//! # Unit Types
//!
//! Unit-safe physical quantities for well engineering.
//!
//! ## Design
//!
//! A [`Quantity`] is a magnitude plus a unit symbol, tagged with a
//! [`QuantityKind`]. Conversion factors live in one immutable
//! [`UnitRegistry`] built on first use. Semantic specialisations such as
//! `Depth` versus `Length` are distinct kinds, so a depth cannot be added to
//! a generic length even though both are measured in feet.
//!
//! The typed wrappers in [`typed`] (`Depth`, `Pressure`, `Density`, ...) pin
//! the kind at compile time and are what the calculators accept.
//!
//! ## Oilfield base units
//!
//! Each kind has exactly one base unit with factor 1. The base units are the
//! oilfield units the drilling formulas are written in:
//!
//! | Kind | Base | Kind | Base |
//! |------|------|------|------|
//! | Length, Depth | ft | Diameter | in |
//! | Angle, Azimuth, Inclination | deg | Area | in2 |
//! | Volume | bbl | Weight | lbf |
//! | LinearDensity | lb/ft | Pressure | psi |
//! | Density | ppg | Temperature | K (offset scales) |
//! | Viscosity | cP | FlowRate | gpm |
//! | Velocity | ft/min | Torque | ft-lbf |
//! | UnitCapacity | bbl/ft | DoglegSeverity | deg/100ft |
//! | Time | min | Power | hp |
//! | Ratio | fraction | | |
//!
//! ## Example
//!
//! ```rust
//! use well_core::units::{Depth, Azimuth};
//!
//! let td = Depth::new(3048.0, "m").unwrap();
//! assert!((td.ft() - 10_000.0).abs() < 1e-9);
//!
//! assert_eq!(Azimuth::new(370.0, "deg").unwrap(), Azimuth::new(10.0, "deg").unwrap());
//! ```

pub mod quantity;
pub mod registry;
pub mod typed;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use quantity::{Quantity, WireQuantity};
pub use registry::{Conversion, UnitDef, UnitRegistry};
pub use typed::{
    Angle, Area, Azimuth, Density, Depth, Diameter, DoglegSeverity, FlowRate, Inclination, Length,
    LinearDensity, Power, Pressure, Ratio, Temperature, Time, Torque, UnitCapacity, Velocity,
    TypedQuantity, Viscosity, Volume, Weight,
};

/// Kind tag for a physical quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QuantityKind {
    Length,
    Depth,
    Diameter,
    Angle,
    Azimuth,
    Inclination,
    Area,
    Volume,
    Weight,
    LinearDensity,
    Pressure,
    Density,
    Temperature,
    Viscosity,
    FlowRate,
    Velocity,
    Torque,
    UnitCapacity,
    DoglegSeverity,
    Time,
    Power,
    Ratio,
}

impl QuantityKind {
    /// All kinds for iteration
    pub const ALL: [QuantityKind; 22] = [
        QuantityKind::Length,
        QuantityKind::Depth,
        QuantityKind::Diameter,
        QuantityKind::Angle,
        QuantityKind::Azimuth,
        QuantityKind::Inclination,
        QuantityKind::Area,
        QuantityKind::Volume,
        QuantityKind::Weight,
        QuantityKind::LinearDensity,
        QuantityKind::Pressure,
        QuantityKind::Density,
        QuantityKind::Temperature,
        QuantityKind::Viscosity,
        QuantityKind::FlowRate,
        QuantityKind::Velocity,
        QuantityKind::Torque,
        QuantityKind::UnitCapacity,
        QuantityKind::DoglegSeverity,
        QuantityKind::Time,
        QuantityKind::Power,
        QuantityKind::Ratio,
    ];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            QuantityKind::Length => "Length",
            QuantityKind::Depth => "Depth",
            QuantityKind::Diameter => "Diameter",
            QuantityKind::Angle => "Angle",
            QuantityKind::Azimuth => "Azimuth",
            QuantityKind::Inclination => "Inclination",
            QuantityKind::Area => "Area",
            QuantityKind::Volume => "Volume",
            QuantityKind::Weight => "Weight",
            QuantityKind::LinearDensity => "Linear Density",
            QuantityKind::Pressure => "Pressure",
            QuantityKind::Density => "Density",
            QuantityKind::Temperature => "Temperature",
            QuantityKind::Viscosity => "Viscosity",
            QuantityKind::FlowRate => "Flow Rate",
            QuantityKind::Velocity => "Velocity",
            QuantityKind::Torque => "Torque",
            QuantityKind::UnitCapacity => "Unit Capacity",
            QuantityKind::DoglegSeverity => "Dogleg Severity",
            QuantityKind::Time => "Time",
            QuantityKind::Power => "Power",
            QuantityKind::Ratio => "Ratio",
        }
    }

    /// Angular kinds share the degree/radian table
    pub fn is_angular(&self) -> bool {
        matches!(
            self,
            QuantityKind::Angle | QuantityKind::Azimuth | QuantityKind::Inclination
        )
    }
}

impl fmt::Display for QuantityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_a_table() {
        let registry = UnitRegistry::global();
        for kind in QuantityKind::ALL {
            assert!(!registry.units(kind).is_empty(), "{kind} has no units");
        }
    }

    #[test]
    fn test_display_names() {
        assert_eq!(QuantityKind::DoglegSeverity.to_string(), "Dogleg Severity");
        assert!(QuantityKind::Azimuth.is_angular());
        assert!(!QuantityKind::Depth.is_angular());
    }
}
