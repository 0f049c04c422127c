//! # Fanning Friction Factor
//!
//! Laminar flow (`Re < 2100`) uses the exact `f = 16 / Re`. Turbulent flow
//! solves Colebrook–White in its Fanning form by fixed-point iteration on
//! `x = 1/√f`:
//!
//! ```text
//! 1/√f = −4 log10( ε/3.7 + 1.255 / (Re √f) )
//! ```
//!
//! The iteration is seeded with the Swamee–Jain explicit approximation and
//! stops once the relative change in `f` drops below [`CONVERGENCE_TOLERANCE`].
//! It never runs more than [`MAX_ITERATIONS`] steps; a solve that has not
//! converged by then is a calculation error, not a best-effort value.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equations::LAMINAR_REYNOLDS_LIMIT;
use crate::errors::{check_finite, WellError, WellResult};

/// Iteration cap for the Colebrook–White solve
pub const MAX_ITERATIONS: usize = 20;

/// Relative change in `f` below which the solve has converged
pub const CONVERGENCE_TOLERANCE: f64 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowRegime {
    Laminar,
    Turbulent,
}

/// Converged friction factor with solver diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrictionSolution {
    /// Fanning friction factor
    pub fanning: f64,
    pub regime: FlowRegime,
    /// Iterations used (0 for laminar)
    pub iterations: usize,
}

/// Fanning friction factor for a Reynolds number and relative roughness
/// (ε/d, dimensionless).
///
/// ```rust
/// use well_core::calculations::friction::friction_factor;
///
/// assert_eq!(friction_factor(1000.0, 0.0).unwrap(), 0.016);
/// ```
pub fn friction_factor(reynolds: f64, relative_roughness: f64) -> WellResult<f64> {
    solve(reynolds, relative_roughness).map(|s| s.fanning)
}

/// Friction factor with regime and iteration count.
pub fn solve(reynolds: f64, relative_roughness: f64) -> WellResult<FrictionSolution> {
    if !reynolds.is_finite() || reynolds <= 0.0 {
        return Err(WellError::calculation(
            "reynolds_number",
            format!("Reynolds number must be positive and finite, got {reynolds}"),
        ));
    }
    if !relative_roughness.is_finite() || relative_roughness < 0.0 {
        return Err(WellError::calculation(
            "relative_roughness",
            format!("Relative roughness must be non-negative, got {relative_roughness}"),
        ));
    }

    if reynolds < LAMINAR_REYNOLDS_LIMIT {
        return Ok(FrictionSolution {
            fanning: 16.0 / reynolds,
            regime: FlowRegime::Laminar,
            iterations: 0,
        });
    }

    let roughness_term = relative_roughness / 3.7;
    let mut f = swamee_jain_fanning(reynolds, relative_roughness);
    check_finite(f, "friction_factor")?;

    for iteration in 1..=MAX_ITERATIONS {
        let x = -4.0 * (roughness_term + 1.255 / (reynolds * f.sqrt())).log10();
        let next = check_finite(1.0 / (x * x), "friction_factor")?;
        let change = (next - f).abs() / f;
        debug!(iteration, reynolds, f = next, change, "colebrook iteration");
        if change < CONVERGENCE_TOLERANCE {
            return Ok(FrictionSolution {
                fanning: next,
                regime: FlowRegime::Turbulent,
                iterations: iteration,
            });
        }
        f = next;
    }

    Err(WellError::calculation(
        "friction_factor",
        format!("Colebrook-White did not converge in {MAX_ITERATIONS} iterations (Re = {reynolds:.0})"),
    ))
}

/// Swamee–Jain explicit approximation, converted from Darcy to Fanning
fn swamee_jain_fanning(reynolds: f64, relative_roughness: f64) -> f64 {
    let log_term = (relative_roughness / 3.7 + 5.74 / reynolds.powf(0.9)).log10();
    0.25 / (log_term * log_term) / 4.0
}
