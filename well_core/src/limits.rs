//! # Operational Limits
//!
//! Stateless checks of a quantity against a named engineering limit. Each
//! check passes or fails with an [`OperationalLimitError`]; the caller
//! decides whether a failure stops the job or is only reported.
//!
//! Limits are configured through [`OperationalLimits`], which loads from
//! TOML and falls back to field defaults for any key that is missing:
//!
//! ```toml
//! max_depth_ft = 30000.0
//! max_mud_weight_ppg = 18.0
//! pore_pressure_ppg = 9.2
//! fracture_gradient_ppg = 15.5
//! ```
//!
//! ## Example
//!
//! ```rust
//! use well_core::limits::{validate_operational_limit, LimitKind};
//! use well_core::units::Density;
//!
//! let err = validate_operational_limit(
//!     LimitKind::MaxMudWeight,
//!     Density::from_ppg(23.0),
//!     Density::from_ppg(22.0),
//! )
//! .unwrap_err();
//! let violation = err.limit_violation().unwrap();
//! assert_eq!(violation.current_value, 23.0);
//! assert_eq!(violation.limit_value, 22.0);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::{OperationalLimitError, WellError, WellResult};
use crate::units::{Density, Depth, DoglegSeverity, FlowRate, Pressure, Quantity, QuantityKind, Ratio, TypedQuantity};

/// Named limit: which parameter it guards and in which direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LimitKind {
    MaxDepth,
    MaxPressure,
    MaxMudWeight,
    MinMudWeight,
    /// Circulating density against the same ceiling as static mud weight
    MaxEcd,
    /// Circulating density must stay below the formation fracture gradient
    MaxEcdFractureGradient,
    /// Mud weight must hold back the formation pore pressure
    MinMudWeightPorePressure,
    MaxDoglegSeverity,
    MinCasingSafetyFactor,
    MaxFlowRate,
}

impl LimitKind {
    pub const ALL: [LimitKind; 10] = [
        LimitKind::MaxDepth,
        LimitKind::MaxPressure,
        LimitKind::MaxMudWeight,
        LimitKind::MinMudWeight,
        LimitKind::MaxEcd,
        LimitKind::MaxEcdFractureGradient,
        LimitKind::MinMudWeightPorePressure,
        LimitKind::MaxDoglegSeverity,
        LimitKind::MinCasingSafetyFactor,
        LimitKind::MaxFlowRate,
    ];

    /// Parameter name reported in errors
    pub fn parameter(&self) -> &'static str {
        match self {
            LimitKind::MaxDepth => "depth",
            LimitKind::MaxPressure => "pressure",
            LimitKind::MaxMudWeight | LimitKind::MinMudWeight => "mud_weight",
            LimitKind::MaxEcd => "ecd",
            LimitKind::MaxEcdFractureGradient => "ecd_fracture_gradient",
            LimitKind::MinMudWeightPorePressure => "mud_weight_pore_pressure",
            LimitKind::MaxDoglegSeverity => "dogleg_severity",
            LimitKind::MinCasingSafetyFactor => "casing_safety_factor",
            LimitKind::MaxFlowRate => "flow_rate",
        }
    }

    /// Quantity kind the limit applies to
    pub fn quantity_kind(&self) -> QuantityKind {
        match self {
            LimitKind::MaxDepth => QuantityKind::Depth,
            LimitKind::MaxPressure => QuantityKind::Pressure,
            LimitKind::MaxMudWeight
            | LimitKind::MinMudWeight
            | LimitKind::MaxEcd
            | LimitKind::MaxEcdFractureGradient
            | LimitKind::MinMudWeightPorePressure => QuantityKind::Density,
            LimitKind::MaxDoglegSeverity => QuantityKind::DoglegSeverity,
            LimitKind::MinCasingSafetyFactor => QuantityKind::Ratio,
            LimitKind::MaxFlowRate => QuantityKind::FlowRate,
        }
    }

    /// Minimum limits fail below the limit; all others fail above it
    pub fn is_minimum(&self) -> bool {
        matches!(
            self,
            LimitKind::MinMudWeight | LimitKind::MinMudWeightPorePressure | LimitKind::MinCasingSafetyFactor
        )
    }
}

/// Check a typed value against a limit of the same type.
///
/// Maximum limits fail when `value > limit`, minimum limits when
/// `value < limit`; a value equal to the limit passes. A wrapper whose kind
/// is not the one `kind` guards fails with an incompatible-kind error.
/// Violations carry both numbers in the value's unit.
pub fn validate_operational_limit<Q: TypedQuantity>(kind: LimitKind, value: Q, limit: Q) -> WellResult<()> {
    let expected = kind.quantity_kind();
    if Q::KIND != expected {
        return Err(WellError::incompatible_kind(
            kind.parameter(),
            expected.display_name(),
            Q::KIND.display_name(),
        ));
    }
    compare(kind, value.into(), limit.into())?;
    Ok(())
}

/// Dynamic form of [`validate_operational_limit`] for untyped quantities.
///
/// Fails with an incompatible-kind error if either quantity is not of the
/// limit's kind.
pub fn check_quantity(kind: LimitKind, value: &Quantity, limit: &Quantity) -> WellResult<()> {
    let expected = kind.quantity_kind();
    for q in [value, limit] {
        if q.kind() != expected {
            return Err(WellError::incompatible_kind(
                kind.parameter(),
                expected.display_name(),
                q.kind().display_name(),
            ));
        }
    }
    compare(kind, *value, *limit)?;
    Ok(())
}

/// Both quantities are already known to be of `kind`'s quantity kind.
fn compare(kind: LimitKind, value: Quantity, limit: Quantity) -> Result<(), OperationalLimitError> {
    let exceeded = if kind.is_minimum() {
        value.base_value() < limit.base_value()
    } else {
        value.base_value() > limit.base_value()
    };
    if exceeded {
        Err(OperationalLimitError {
            parameter: kind.parameter().to_string(),
            current_value: value.magnitude(),
            limit_value: limit.magnitude_in_unit_of(&value),
            unit: value.unit().to_string(),
        })
    } else {
        Ok(())
    }
}

fn limit_check<Q: TypedQuantity>(kind: LimitKind, value: Q, limit: Q) -> Result<(), OperationalLimitError> {
    debug_assert_eq!(Q::KIND, kind.quantity_kind());
    compare(kind, value.into(), limit.into())
}

// ============================================================================
// Configuration
// ============================================================================

/// Configured engineering limits.
///
/// Field names carry the unit the value is read in. Every field has a
/// default, so a partial TOML file only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperationalLimits {
    pub max_depth_ft: f64,
    pub max_pressure_psi: f64,
    pub max_mud_weight_ppg: f64,
    pub min_mud_weight_ppg: f64,
    /// Equivalent density at which the open formation fractures
    pub fracture_gradient_ppg: f64,
    /// Equivalent density of the formation pore pressure
    pub pore_pressure_ppg: f64,
    pub max_dogleg_severity_deg_per_100ft: f64,
    pub min_casing_safety_factor: f64,
    pub max_flow_rate_gpm: f64,
}

impl Default for OperationalLimits {
    fn default() -> Self {
        OperationalLimits {
            max_depth_ft: 35_000.0,
            max_pressure_psi: 15_000.0,
            max_mud_weight_ppg: 22.0,
            min_mud_weight_ppg: 6.5,
            fracture_gradient_ppg: 16.0,
            pore_pressure_ppg: 8.6,
            max_dogleg_severity_deg_per_100ft: 6.0,
            min_casing_safety_factor: 1.2,
            max_flow_rate_gpm: 1500.0,
        }
    }
}

impl OperationalLimits {
    /// Parse and validate limits from TOML text.
    pub fn from_toml_str(contents: &str) -> WellResult<Self> {
        let limits: Self = toml::from_str(contents).map_err(|e| WellError::config(e.to_string()))?;
        limits.validate()?;
        Ok(limits)
    }

    /// Load and validate limits from a TOML file.
    pub fn load_from_file(path: &Path) -> WellResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| WellError::config(format!("{}: {e}", path.display())))?;
        let limits = Self::from_toml_str(&contents)?;
        info!(path = %path.display(), "Loaded operational limits");
        Ok(limits)
    }

    pub fn to_toml(&self) -> WellResult<String> {
        toml::to_string_pretty(self).map_err(|e| WellError::config(e.to_string()))
    }

    /// Every limit must be positive and finite, and both the mud-weight
    /// window and the pore/fracture window must be open.
    pub fn validate(&self) -> WellResult<()> {
        let mut errors: Vec<String> = Vec::new();
        let fields = [
            ("max_depth_ft", self.max_depth_ft),
            ("max_pressure_psi", self.max_pressure_psi),
            ("max_mud_weight_ppg", self.max_mud_weight_ppg),
            ("min_mud_weight_ppg", self.min_mud_weight_ppg),
            ("fracture_gradient_ppg", self.fracture_gradient_ppg),
            ("pore_pressure_ppg", self.pore_pressure_ppg),
            ("max_dogleg_severity_deg_per_100ft", self.max_dogleg_severity_deg_per_100ft),
            ("min_casing_safety_factor", self.min_casing_safety_factor),
            ("max_flow_rate_gpm", self.max_flow_rate_gpm),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                errors.push(format!("{name} must be positive, got {value}"));
            }
        }
        if self.min_mud_weight_ppg >= self.max_mud_weight_ppg {
            errors.push(format!(
                "min_mud_weight_ppg ({}) must be below max_mud_weight_ppg ({})",
                self.min_mud_weight_ppg, self.max_mud_weight_ppg
            ));
        }
        if self.pore_pressure_ppg >= self.fracture_gradient_ppg {
            errors.push(format!(
                "pore_pressure_ppg ({}) must be below fracture_gradient_ppg ({})",
                self.pore_pressure_ppg, self.fracture_gradient_ppg
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(WellError::config(errors.join("; ")))
        }
    }

    pub fn max_depth(&self) -> Depth {
        Depth::from_ft(self.max_depth_ft)
    }

    pub fn max_pressure(&self) -> Pressure {
        Pressure::from_psi(self.max_pressure_psi)
    }

    pub fn max_mud_weight(&self) -> Density {
        Density::from_ppg(self.max_mud_weight_ppg)
    }

    pub fn min_mud_weight(&self) -> Density {
        Density::from_ppg(self.min_mud_weight_ppg)
    }

    pub fn fracture_gradient(&self) -> Density {
        Density::from_ppg(self.fracture_gradient_ppg)
    }

    pub fn pore_pressure(&self) -> Density {
        Density::from_ppg(self.pore_pressure_ppg)
    }

    pub fn max_dogleg_severity(&self) -> DoglegSeverity {
        DoglegSeverity::from_deg_per_100ft(self.max_dogleg_severity_deg_per_100ft)
    }

    pub fn min_casing_safety_factor(&self) -> Ratio {
        Ratio::from_fraction(self.min_casing_safety_factor)
    }

    pub fn max_flow_rate(&self) -> FlowRate {
        FlowRate::from_gpm(self.max_flow_rate_gpm)
    }

    pub fn check_depth(&self, depth: Depth) -> Result<(), OperationalLimitError> {
        limit_check(LimitKind::MaxDepth, depth, self.max_depth())
    }

    pub fn check_pressure(&self, pressure: Pressure) -> Result<(), OperationalLimitError> {
        limit_check(LimitKind::MaxPressure, pressure, self.max_pressure())
    }

    /// Mud weight inside the `[min, max]` window
    pub fn check_mud_weight(&self, mud_weight: Density) -> Result<(), OperationalLimitError> {
        limit_check(LimitKind::MaxMudWeight, mud_weight, self.max_mud_weight())?;
        limit_check(LimitKind::MinMudWeight, mud_weight, self.min_mud_weight())
    }

    pub fn check_ecd(&self, ecd: Density) -> Result<(), OperationalLimitError> {
        limit_check(LimitKind::MaxEcd, ecd, self.max_mud_weight())
    }

    /// Density (circulating or static) below the fracture gradient
    pub fn check_fracture_gradient(&self, density: Density) -> Result<(), OperationalLimitError> {
        limit_check(LimitKind::MaxEcdFractureGradient, density, self.fracture_gradient())
    }

    /// Static mud weight at or above the pore pressure
    pub fn check_pore_pressure(&self, mud_weight: Density) -> Result<(), OperationalLimitError> {
        limit_check(LimitKind::MinMudWeightPorePressure, mud_weight, self.pore_pressure())
    }

    pub fn check_dogleg_severity(&self, dls: DoglegSeverity) -> Result<(), OperationalLimitError> {
        limit_check(LimitKind::MaxDoglegSeverity, dls, self.max_dogleg_severity())
    }

    pub fn check_casing_safety_factor(&self, factor: Ratio) -> Result<(), OperationalLimitError> {
        limit_check(LimitKind::MinCasingSafetyFactor, factor, self.min_casing_safety_factor())
    }

    pub fn check_flow_rate(&self, flow_rate: FlowRate) -> Result<(), OperationalLimitError> {
        limit_check(LimitKind::MaxFlowRate, flow_rate, self.max_flow_rate())
    }
}

// ============================================================================
// Advisory reports
// ============================================================================

/// Outcome of one advisory check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitCheck {
    /// What was checked (e.g. "max dogleg severity", "9-5/8in casing burst")
    pub label: String,
    pub passed: bool,
    /// Present when the check failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violation: Option<OperationalLimitError>,
}

impl LimitCheck {
    /// Record a check result, logging failures at `warn`.
    pub fn record(label: impl Into<String>, result: Result<(), OperationalLimitError>) -> Self {
        let label = label.into();
        match result {
            Ok(()) => LimitCheck {
                label,
                passed: true,
                violation: None,
            },
            Err(violation) => {
                warn!(check = %label, "{violation}");
                LimitCheck {
                    label,
                    passed: false,
                    violation: Some(violation),
                }
            }
        }
    }
}

/// Whether every check in a report passed
pub fn all_passed(checks: &[LimitCheck]) -> bool {
    checks.iter().all(|c| c.passed)
}
