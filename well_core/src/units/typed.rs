//! Kind-fixed quantity wrappers.
//!
//! Each wrapper holds a [`Quantity`] whose kind is fixed by the type, so a
//! `Depth` can never be passed where a `Pressure` is expected. Wrappers
//! serialize as `{"value": .., "unit": ..}` and reject units outside their
//! kind when deserialized.
//!
//! Every wrapper exposes its magnitude in the oilfield base unit through a
//! named accessor (`Depth::ft`, `Pressure::psi`, `Density::ppg`, ...) and an
//! infallible constructor from that unit (`Pressure::from_psi`).

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::quantity::{Quantity, WireQuantity};
use super::QuantityKind;
use crate::errors::{WellError, WellResult};

mod sealed {
    pub trait Sealed {}
}

/// Implemented by every kind-fixed wrapper and nothing else, so generic
/// code can rely on `KIND` matching the wrapped quantity.
pub trait TypedQuantity: sealed::Sealed + Copy + Into<Quantity> {
    const KIND: QuantityKind;
}

macro_rules! quantity_type {
    ($(#[$meta:meta])* $name:ident, $kind:expr, $base:ident, $from_base:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct $name(Quantity);

        impl $name {
            /// Kind tag carried by every value of this type
            pub const KIND: QuantityKind = $kind;

            /// Create from a magnitude and unit symbol (or alias).
            pub fn new(value: f64, unit: &str) -> WellResult<Self> {
                Quantity::new(Self::KIND, value, unit).map(Self)
            }

            /// Create from a magnitude in the base unit.
            pub fn $from_base(value: f64) -> Self {
                Self(Quantity::from_base(Self::KIND, value))
            }

            /// Magnitude in the base unit.
            pub fn $base(&self) -> f64 {
                self.0.base_value()
            }

            pub fn zero() -> Self {
                Self::$from_base(0.0)
            }

            /// Wrap a dynamic quantity, checking its kind.
            pub fn from_quantity(quantity: Quantity) -> WellResult<Self> {
                if quantity.kind() == Self::KIND {
                    Ok(Self(quantity))
                } else {
                    Err(WellError::incompatible_kind(
                        "wrap",
                        Self::KIND.display_name(),
                        quantity.kind().display_name(),
                    ))
                }
            }

            pub fn quantity(&self) -> Quantity {
                self.0
            }

            pub fn magnitude(&self) -> f64 {
                self.0.magnitude()
            }

            pub fn unit(&self) -> &'static str {
                self.0.unit()
            }

            /// Magnitude expressed in `unit`.
            pub fn value_in(&self, unit: &str) -> WellResult<f64> {
                self.0.convert(unit)
            }

            /// Same value re-expressed in `unit`.
            pub fn to_unit(&self, unit: &str) -> WellResult<Self> {
                self.0.with_unit(unit).map(Self)
            }

            pub fn format(&self, decimals: usize) -> String {
                self.0.format(decimals)
            }

            pub fn approx_eq(&self, other: &Self, rel_tol: f64) -> bool {
                self.0.approx_eq(&other.0, rel_tol)
            }

            pub fn max(self, other: Self) -> Self {
                if other > self { other } else { self }
            }

            pub fn min(self, other: Self) -> Self {
                if other < self { other } else { self }
            }
        }

        impl Add for $name {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0.add_same_kind(&rhs.0))
            }
        }

        impl Sub for $name {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0.sub_same_kind(&rhs.0))
            }
        }

        impl Mul<f64> for $name {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        /// Dividing by zero is a caller bug; checked in debug builds.
        impl Div<f64> for $name {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                self.0.partial_cmp(&other.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl sealed::Sealed for $name {}

        impl TypedQuantity for $name {
            const KIND: QuantityKind = $kind;
        }

        impl From<$name> for Quantity {
            fn from(value: $name) -> Quantity {
                value.0
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                self.0.serialize(serializer)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let wire = WireQuantity::deserialize(deserializer)?;
                Self::new(wire.value, &wire.unit).map_err(serde::de::Error::custom)
            }
        }
    };
}

quantity_type!(
    /// Generic length (base ft): course lengths, position offsets
    Length, QuantityKind::Length, ft, from_ft
);
quantity_type!(
    /// Measured or vertical depth (base ft)
    Depth, QuantityKind::Depth, ft, from_ft
);
quantity_type!(
    /// Pipe or hole diameter (base in)
    Diameter, QuantityKind::Diameter, inches, from_inches
);
quantity_type!(
    /// Plane angle (base deg)
    Angle, QuantityKind::Angle, deg, from_deg
);
quantity_type!(
    /// Wellbore azimuth, normalised into one turn (base deg)
    Azimuth, QuantityKind::Azimuth, deg, from_deg
);
quantity_type!(
    /// Wellbore inclination from vertical (base deg)
    Inclination, QuantityKind::Inclination, deg, from_deg
);
quantity_type!(
    /// Cross-sectional area (base in²)
    Area, QuantityKind::Area, in2, from_in2
);
quantity_type!(
    /// Fluid volume (base bbl)
    Volume, QuantityKind::Volume, bbl, from_bbl
);
quantity_type!(
    /// Weight or axial force (base lbf)
    Weight, QuantityKind::Weight, lbf, from_lbf
);
quantity_type!(
    /// Weight per unit length (base lb/ft)
    LinearDensity, QuantityKind::LinearDensity, lb_per_ft, from_lb_per_ft
);
quantity_type!(
    /// Pressure (base psi)
    Pressure, QuantityKind::Pressure, psi, from_psi
);
quantity_type!(
    /// Fluid density / mud weight (base ppg)
    Density, QuantityKind::Density, ppg, from_ppg
);
quantity_type!(
    /// Temperature on offset scales (base K)
    Temperature, QuantityKind::Temperature, kelvin, from_kelvin
);
quantity_type!(
    /// Dynamic viscosity (base cP)
    Viscosity, QuantityKind::Viscosity, cp, from_cp
);
quantity_type!(
    /// Volumetric flow rate (base gpm)
    FlowRate, QuantityKind::FlowRate, gpm, from_gpm
);
quantity_type!(
    /// Fluid velocity (base ft/min)
    Velocity, QuantityKind::Velocity, ft_per_min, from_ft_per_min
);
quantity_type!(
    /// Torque (base ft-lbf)
    Torque, QuantityKind::Torque, ft_lbf, from_ft_lbf
);
quantity_type!(
    /// Volume per unit length (base bbl/ft)
    UnitCapacity, QuantityKind::UnitCapacity, bbl_per_ft, from_bbl_per_ft
);
quantity_type!(
    /// Dogleg severity (base deg/100ft)
    DoglegSeverity, QuantityKind::DoglegSeverity, deg_per_100ft, from_deg_per_100ft
);
quantity_type!(
    /// Elapsed time (base min)
    Time, QuantityKind::Time, minutes, from_minutes
);
quantity_type!(
    /// Power (base hp)
    Power, QuantityKind::Power, hp, from_hp
);
quantity_type!(
    /// Dimensionless ratio (base fraction)
    Ratio, QuantityKind::Ratio, fraction, from_fraction
);

macro_rules! impl_angular {
    ($name:ident) => {
        impl $name {
            /// Angle in radians
            pub fn radians(&self) -> f64 {
                self.deg().to_radians()
            }

            pub fn from_radians(value: f64) -> Self {
                Self::from_deg(value.to_degrees())
            }
        }
    };
}

impl_angular!(Angle);
impl_angular!(Azimuth);
impl_angular!(Inclination);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_constructors() {
        let d = Depth::new(3048.0, "m").unwrap();
        assert!((d.ft() - 10_000.0).abs() < 1e-9);
        assert_eq!(d.unit(), "m");
        assert_eq!(Depth::from_ft(500.0).unit(), "ft");
    }

    #[test]
    fn test_same_kind_addition_keeps_left_unit() {
        let a = Depth::new(1.0, "km").unwrap();
        let b = Depth::from_ft(3280.839_895_013_123);
        let sum = a + b;
        assert_eq!(sum.unit(), "km");
        assert!((sum.magnitude() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_wrap_checks_kind() {
        let q = Quantity::new(QuantityKind::Length, 10.0, "ft").unwrap();
        assert!(Depth::from_quantity(q).is_err());
        assert!(Length::from_quantity(q).is_ok());
    }

    #[test]
    fn test_serialization() {
        let mw = Density::from_ppg(12.5);
        let json = serde_json::to_string(&mw).unwrap();
        assert_eq!(json, r#"{"value":12.5,"unit":"ppg"}"#);
        let roundtrip: Density = serde_json::from_str(&json).unwrap();
        assert_eq!(mw, roundtrip);
    }

    #[test]
    fn test_deserialize_rejects_foreign_unit() {
        let result: Result<Density, _> = serde_json::from_str(r#"{"value":1.0,"unit":"ft"}"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("ft"));
    }

    #[test]
    fn test_azimuth_wrapper_normalizes() {
        assert_eq!(Azimuth::new(370.0, "deg").unwrap(), Azimuth::new(10.0, "deg").unwrap());
        assert_eq!(Azimuth::new(-10.0, "deg").unwrap(), Azimuth::new(350.0, "deg").unwrap());
        assert_eq!(Azimuth::from_deg(360.0).deg(), 0.0);
    }

    #[test]
    fn test_angular_helpers() {
        let inc = Inclination::from_deg(90.0);
        assert!((inc.radians() - std::f64::consts::FRAC_PI_2).abs() < 1e-15);
        assert!((Angle::from_radians(std::f64::consts::PI).deg() - 180.0).abs() < 1e-12);
    }

    #[test]
    fn test_ordering_and_minmax() {
        let a = Pressure::new(1.0, "bar").unwrap();
        let b = Pressure::from_psi(14.0);
        assert!(a > b);
        assert_eq!(a.max(b), a);
        assert_eq!(a.min(b), b);
    }

    #[test]
    fn test_temperature_wrapper() {
        let t = Temperature::new(212.0, "degF").unwrap();
        assert!((t.value_in("degC").unwrap() - 100.0).abs() < 1e-9);
        assert!((t.kelvin() - 373.15).abs() < 1e-9);
    }
}
