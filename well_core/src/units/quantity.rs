//! Dynamic dimensioned value: magnitude + unit + kind tag.
//!
//! ## Conventions
//!
//! - Construction validates the unit against the kind's unit set.
//! - Azimuths are normalised into one turn (`[0, 360)` deg, `[0, 2π)` rad).
//! - Same-kind addition and subtraction report in the LEFT operand's unit.
//! - Equality and ordering compare base-unit magnitudes.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Div, Mul};

use serde::{Deserialize, Serialize, Serializer};

use super::registry::{Conversion, UnitRegistry};
use super::QuantityKind;
use crate::errors::{WellError, WellResult};

/// Boundary form of a quantity: `{"value": 6500.0, "unit": "psi"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireQuantity {
    pub value: f64,
    pub unit: String,
}

/// An immutable dimensioned value.
#[derive(Debug, Clone, Copy)]
pub struct Quantity {
    kind: QuantityKind,
    magnitude: f64,
    unit: &'static str,
    conversion: Conversion,
}

impl Quantity {
    /// Create a quantity, failing with a unit error if `unit` is not valid
    /// for `kind`.
    ///
    /// ```rust
    /// use well_core::units::{Quantity, QuantityKind};
    ///
    /// let q = Quantity::new(QuantityKind::Pressure, 1.0, "bar").unwrap();
    /// assert!((q.convert("psi").unwrap() - 14.5038).abs() < 1e-4);
    /// assert!(Quantity::new(QuantityKind::Pressure, 1.0, "ppg").is_err());
    /// ```
    pub fn new(kind: QuantityKind, magnitude: f64, unit: &str) -> WellResult<Self> {
        if !magnitude.is_finite() {
            return Err(WellError::invalid_input(
                kind.display_name(),
                magnitude.to_string(),
                "Magnitude must be finite",
            ));
        }
        let def = UnitRegistry::global().lookup(kind, unit)?;
        Ok(Self::from_parts(kind, magnitude, def.symbol, def.conversion))
    }

    /// Create a quantity expressed in the kind's base unit.
    pub fn from_base(kind: QuantityKind, magnitude: f64) -> Self {
        let (unit, conversion) = UnitRegistry::global()
            .units(kind)
            .first()
            .map_or(("", Conversion::Factor(1.0)), |def| (def.symbol, def.conversion));
        Self::from_parts(kind, magnitude, unit, conversion)
    }

    fn from_parts(
        kind: QuantityKind,
        magnitude: f64,
        unit: &'static str,
        conversion: Conversion,
    ) -> Self {
        let magnitude = if kind == QuantityKind::Azimuth {
            normalize_turn(magnitude, conversion.from_base(360.0))
        } else {
            magnitude
        };
        Quantity {
            kind,
            magnitude,
            unit,
            conversion,
        }
    }

    pub fn kind(&self) -> QuantityKind {
        self.kind
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Canonical unit symbol
    pub fn unit(&self) -> &'static str {
        self.unit
    }

    /// Magnitude expressed in the kind's base unit
    pub fn base_value(&self) -> f64 {
        self.conversion.to_base(self.magnitude)
    }

    /// Magnitude expressed in `target` unit.
    pub fn convert(&self, target: &str) -> WellResult<f64> {
        let def = UnitRegistry::global().lookup(self.kind, target)?;
        if def.symbol == self.unit {
            return Ok(self.magnitude);
        }
        Ok(def.conversion.from_base(self.base_value()))
    }

    /// The same quantity re-expressed in `target` unit.
    pub fn with_unit(&self, target: &str) -> WellResult<Quantity> {
        let def = UnitRegistry::global().lookup(self.kind, target)?;
        let magnitude = if def.symbol == self.unit {
            self.magnitude
        } else {
            def.conversion.from_base(self.base_value())
        };
        Ok(Self::from_parts(self.kind, magnitude, def.symbol, def.conversion))
    }

    /// `other` expressed in this quantity's unit; caller guarantees same kind.
    fn other_in_my_unit(&self, other: &Quantity) -> f64 {
        if other.unit == self.unit {
            other.magnitude
        } else {
            self.conversion.from_base(other.base_value())
        }
    }

    /// This quantity's magnitude in `reference`'s unit; caller guarantees
    /// same kind.
    pub(crate) fn magnitude_in_unit_of(&self, reference: &Quantity) -> f64 {
        reference.other_in_my_unit(self)
    }

    fn require_same_kind(&self, other: &Quantity, operation: &str) -> WellResult<()> {
        if self.kind == other.kind {
            Ok(())
        } else {
            Err(WellError::incompatible_kind(
                operation,
                self.kind.display_name(),
                other.kind.display_name(),
            ))
        }
    }

    /// Same-kind sum; `other` is converted into this quantity's unit.
    pub fn checked_add(&self, other: &Quantity) -> WellResult<Quantity> {
        self.require_same_kind(other, "add")?;
        Ok(self.add_same_kind(other))
    }

    /// Same-kind difference; `other` is converted into this quantity's unit.
    pub fn checked_sub(&self, other: &Quantity) -> WellResult<Quantity> {
        self.require_same_kind(other, "subtract")?;
        Ok(self.sub_same_kind(other))
    }

    pub(crate) fn add_same_kind(&self, other: &Quantity) -> Quantity {
        let rhs = self.other_in_my_unit(other);
        Self::from_parts(self.kind, self.magnitude + rhs, self.unit, self.conversion)
    }

    pub(crate) fn sub_same_kind(&self, other: &Quantity) -> Quantity {
        let rhs = self.other_in_my_unit(other);
        Self::from_parts(self.kind, self.magnitude - rhs, self.unit, self.conversion)
    }

    /// Multiply the magnitude by a scalar, keeping kind and unit.
    pub fn scale(&self, factor: f64) -> Quantity {
        Self::from_parts(self.kind, self.magnitude * factor, self.unit, self.conversion)
    }

    /// Dimensionless ratio `self / other` of two same-kind quantities.
    pub fn ratio(&self, other: &Quantity) -> WellResult<f64> {
        self.require_same_kind(other, "divide")?;
        let denominator = other.base_value();
        if denominator == 0.0 {
            return Err(WellError::calculation(
                other.kind.display_name(),
                "Cannot divide by a zero quantity",
            ));
        }
        Ok(self.base_value() / denominator)
    }

    /// Ordering across units of the same kind.
    pub fn try_cmp(&self, other: &Quantity) -> WellResult<Ordering> {
        self.require_same_kind(other, "compare")?;
        self.base_value()
            .partial_cmp(&other.base_value())
            .ok_or_else(|| WellError::calculation(self.kind.display_name(), "Values are not comparable"))
    }

    /// Same kind and base values within `rel_tol` (relative to the larger
    /// magnitude, absolute below 1).
    pub fn approx_eq(&self, other: &Quantity, rel_tol: f64) -> bool {
        if self.kind != other.kind {
            return false;
        }
        let a = self.base_value();
        let b = other.base_value();
        (a - b).abs() <= rel_tol * a.abs().max(b.abs()).max(1.0)
    }

    /// Display string rounded to `decimals`; the stored magnitude is untouched.
    pub fn format(&self, decimals: usize) -> String {
        format!("{:.*} {}", decimals, self.magnitude, self.unit)
    }

    pub fn to_wire(&self) -> WireQuantity {
        WireQuantity {
            value: self.magnitude,
            unit: self.unit.to_string(),
        }
    }

    /// Parse the boundary form for a known kind.
    pub fn from_wire(kind: QuantityKind, wire: &WireQuantity) -> WellResult<Quantity> {
        Quantity::new(kind, wire.value, &wire.unit)
    }
}

/// Reduce `value` into `[0, period)`; a full turn maps to zero.
fn normalize_turn(value: f64, period: f64) -> f64 {
    let r = value.rem_euclid(period);
    if r >= period || r == 0.0 {
        0.0
    } else {
        r
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.base_value() == other.base_value()
    }
}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.kind != other.kind {
            return None;
        }
        self.base_value().partial_cmp(&other.base_value())
    }
}

impl Mul<f64> for Quantity {
    type Output = Quantity;
    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

/// Scalar division does not return a `Result`; a zero divisor is a caller
/// bug and trips a debug assertion. Use [`Quantity::ratio`] or guard the
/// divisor where it comes from input.
impl Div<f64> for Quantity {
    type Output = Quantity;
    fn div(self, rhs: f64) -> Self::Output {
        debug_assert!(rhs != 0.0 && rhs.is_finite(), "dividing {self} by {rhs}");
        self.scale(1.0 / rhs)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.*} {}", p, self.magnitude, self.unit),
            None => write!(f, "{} {}", self.magnitude, self.unit),
        }
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_wire().serialize(serializer)
    }
}
