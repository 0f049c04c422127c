//! # Error Types
//!
//! Structured error types for well_core. Every calculator returns a
//! [`WellResult`]; a value is either fully computed or one of the variants
//! below, never a partial or `NaN` result.
//!
//! ## Taxonomy
//!
//! - [`WellError::Unit`] - unknown or invalid unit symbol for a quantity kind
//! - [`WellError::IncompatibleKind`] - arithmetic across mismatched kinds
//! - [`WellError::Calculation`] - division by zero, degenerate geometry,
//!   non-convergent iteration
//! - [`WellError::OperationalLimit`] - value outside a configured limit
//!
//! ## Example
//!
//! ```rust
//! use well_core::errors::{WellError, WellResult};
//!
//! fn validate_tvd(tvd_ft: f64) -> WellResult<()> {
//!     if tvd_ft <= 0.0 {
//!         return Err(WellError::calculation("tvd", "TVD must be positive"));
//!     }
//!     Ok(())
//! }
//!
//! assert_eq!(validate_tvd(0.0).unwrap_err().error_code(), "CALCULATION_ERROR");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for well_core operations
pub type WellResult<T> = Result<T, WellError>;

/// A value fell outside an operational or engineering limit.
///
/// Carried by [`WellError::OperationalLimit`] and returned directly by the
/// [`OperationalLimits`](crate::limits::OperationalLimits) checks, so
/// callers can decide whether the violation is fatal or advisory.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[error("Operational limit exceeded for '{parameter}': {current_value} {unit} (limit {limit_value} {unit})")]
pub struct OperationalLimitError {
    pub parameter: String,
    pub current_value: f64,
    pub limit_value: f64,
    pub unit: String,
}

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum WellError {
    /// Unit symbol is not a member of the quantity kind's unit set
    #[error("Unit error: '{unit}' is not a valid {kind} unit - {reason}")]
    Unit {
        unit: String,
        kind: String,
        reason: String,
    },

    /// Two quantities of different kinds were combined
    #[error("Incompatible kinds for {operation}: {left} and {right}")]
    IncompatibleKind {
        operation: String,
        left: String,
        right: String,
    },

    /// Calculation cannot produce a finite, meaningful value
    #[error("Calculation error in '{parameter}': {reason}")]
    Calculation { parameter: String, reason: String },

    /// Value outside an engineering limit
    #[error(transparent)]
    OperationalLimit(#[from] OperationalLimitError),

    /// An input value is invalid (out of range, empty, misordered)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },

    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

impl WellError {
    /// Create a Unit error
    pub fn unit(unit: impl Into<String>, kind: impl Into<String>, reason: impl Into<String>) -> Self {
        WellError::Unit {
            unit: unit.into(),
            kind: kind.into(),
            reason: reason.into(),
        }
    }

    /// Create an IncompatibleKind error
    pub fn incompatible_kind(
        operation: impl Into<String>,
        left: impl Into<String>,
        right: impl Into<String>,
    ) -> Self {
        WellError::IncompatibleKind {
            operation: operation.into(),
            left: left.into(),
            right: right.into(),
        }
    }

    /// Create a Calculation error naming the offending parameter
    pub fn calculation(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        WellError::Calculation {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        WellError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a Config error
    pub fn config(reason: impl Into<String>) -> Self {
        WellError::Config {
            reason: reason.into(),
        }
    }

    /// The limit violation carried by an `OperationalLimit` error
    pub fn limit_violation(&self) -> Option<&OperationalLimitError> {
        match self {
            WellError::OperationalLimit(violation) => Some(violation),
            _ => None,
        }
    }

    /// Whether the error came from caller input and can be reported back
    /// for correction. Kind mismatches and calculation failures indicate a
    /// programming error or degenerate geometry and abort the request.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            WellError::IncompatibleKind { .. } | WellError::Calculation { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            WellError::Unit { .. } => "UNIT_ERROR",
            WellError::IncompatibleKind { .. } => "INCOMPATIBLE_KIND",
            WellError::Calculation { .. } => "CALCULATION_ERROR",
            WellError::OperationalLimit(_) => "OPERATIONAL_LIMIT",
            WellError::InvalidInput { .. } => "INVALID_INPUT",
            WellError::Serialization { .. } => "SERIALIZATION_ERROR",
            WellError::Config { .. } => "CONFIG_ERROR",
        }
    }
}

impl From<serde_json::Error> for WellError {
    fn from(err: serde_json::Error) -> Self {
        WellError::Serialization {
            reason: err.to_string(),
        }
    }
}

/// Ensure an intermediate result is finite before it is wrapped in a quantity.
pub(crate) fn check_finite(value: f64, parameter: &str) -> WellResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(WellError::calculation(
            parameter,
            format!("result is not finite ({value})"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = WellError::calculation("diameter", "Diameter must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"Calculation\""));
        let roundtrip: WellError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(WellError::unit("furlong", "Depth", "unknown").error_code(), "UNIT_ERROR");
        assert_eq!(
            WellError::incompatible_kind("add", "Depth", "Length").error_code(),
            "INCOMPATIBLE_KIND"
        );
    }

    #[test]
    fn test_limit_error_converts() {
        let limit = OperationalLimitError {
            parameter: "mud_weight".to_string(),
            current_value: 23.0,
            limit_value: 22.0,
            unit: "ppg".to_string(),
        };
        let err: WellError = limit.clone().into();
        assert_eq!(err, WellError::OperationalLimit(limit));
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("23 ppg"));
    }

    #[test]
    fn test_recoverability() {
        assert!(!WellError::calculation("tvd", "zero").is_recoverable());
        assert!(WellError::invalid_input("stations", "[]", "empty").is_recoverable());
    }

    #[test]
    fn test_check_finite() {
        assert_eq!(check_finite(1.5, "x").unwrap(), 1.5);
        assert!(check_finite(f64::NAN, "x").is_err());
        assert!(check_finite(f64::INFINITY, "x").is_err());
    }
}
