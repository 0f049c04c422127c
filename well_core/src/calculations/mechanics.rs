//! # String Mechanics
//!
//! Buoyancy, hook load, helical buckling onset and casing design factors.
//!
//! ## Assumptions
//!
//! - Steel string (65.5 ppg) fully immersed in one fluid
//! - Buckling uses the Dawson–Paslay critical force for a pipe lying on the
//!   low side of an inclined hole; it is undefined past horizontal
//! - Burst and collapse loads are net differential pressures

use serde::{Deserialize, Serialize};

use crate::equations::capacity::tubular_moment_of_inertia_in4;
use crate::equations::mechanics::{buoyancy_factor as bf, critical_buckling_force_lbf};
use crate::errors::{check_finite, WellError, WellResult};
use crate::units::{Density, Diameter, Inclination, Length, LinearDensity, Pressure, Ratio, Weight};

/// Young's modulus of steel (psi)
pub const STEEL_YOUNGS_MODULUS_PSI: f64 = 30.0e6;

/// Buoyancy factor `1 − MW / 65.5`.
///
/// Mud weights at or above steel density would float the string and are
/// rejected.
pub fn buoyancy_factor(mud_weight: &Density) -> WellResult<Ratio> {
    let factor = bf(mud_weight.ppg());
    if mud_weight.ppg() < 0.0 || factor <= 0.0 {
        return Err(WellError::invalid_input(
            "mud_weight",
            mud_weight.to_string(),
            "Mud weight must be between zero and steel density (65.5 ppg)",
        ));
    }
    Ok(Ratio::from_fraction(factor))
}

/// Buoyed weight of a string: `w × L × BF`.
pub fn buoyed_weight(weight_per_length: &LinearDensity, length: &Length, mud_weight: &Density) -> WellResult<Weight> {
    let factor = buoyancy_factor(mud_weight)?;
    let lbf = weight_per_length.lb_per_ft() * length.ft() * factor.fraction();
    Ok(Weight::from_lbf(check_finite(lbf, "buoyed_weight")?))
}

/// Hook load while pulling: `buoyed_weight × (1 + friction_factor)`.
pub fn hook_load(buoyed_weight: &Weight, friction_factor: f64) -> WellResult<Weight> {
    if !(0.0..=1.0).contains(&friction_factor) {
        return Err(WellError::invalid_input(
            "friction_factor",
            friction_factor.to_string(),
            "Friction factor must be between 0 and 1",
        ));
    }
    Ok(*buoyed_weight * (1.0 + friction_factor))
}

/// Tubular section and material properties used for buckling.
///
/// ## JSON Example
///
/// ```json
/// {
///   "outer_diameter": { "value": 5.0, "unit": "in" },
///   "inner_diameter": { "value": 4.276, "unit": "in" },
///   "weight_per_length": { "value": 19.5, "unit": "lb/ft" },
///   "youngs_modulus": { "value": 30000000.0, "unit": "psi" },
///   "moment_of_inertia_in4": 14.27
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipeProperties {
    pub outer_diameter: Diameter,
    pub inner_diameter: Diameter,
    /// Nominal weight in air
    pub weight_per_length: LinearDensity,
    pub youngs_modulus: Pressure,
    /// Second moment of area (in⁴)
    pub moment_of_inertia_in4: f64,
}

impl PipeProperties {
    /// Properties of a plain tubular, computing `I = π (OD⁴ − ID⁴) / 64`.
    pub fn tubular(
        outer_diameter: Diameter,
        inner_diameter: Diameter,
        weight_per_length: LinearDensity,
        youngs_modulus: Pressure,
    ) -> Self {
        PipeProperties {
            outer_diameter,
            inner_diameter,
            weight_per_length,
            youngs_modulus,
            moment_of_inertia_in4: tubular_moment_of_inertia_in4(
                outer_diameter.inches(),
                inner_diameter.inches(),
            ),
        }
    }

    /// Steel tubular (E = 30e6 psi)
    pub fn steel(outer_diameter: Diameter, inner_diameter: Diameter, weight_per_length: LinearDensity) -> Self {
        Self::tubular(
            outer_diameter,
            inner_diameter,
            weight_per_length,
            Pressure::from_psi(STEEL_YOUNGS_MODULUS_PSI),
        )
    }

    pub fn validate(&self) -> WellResult<()> {
        let (od, id) = (self.outer_diameter.inches(), self.inner_diameter.inches());
        if od <= 0.0 || id < 0.0 || id >= od {
            return Err(WellError::invalid_input(
                "pipe.inner_diameter",
                self.inner_diameter.to_string(),
                format!("Pipe ID must be non-negative and less than OD ({})", self.outer_diameter),
            ));
        }
        if self.weight_per_length.lb_per_ft() <= 0.0 {
            return Err(WellError::invalid_input(
                "pipe.weight_per_length",
                self.weight_per_length.to_string(),
                "Pipe weight must be positive",
            ));
        }
        if self.youngs_modulus.psi() <= 0.0 {
            return Err(WellError::invalid_input(
                "pipe.youngs_modulus",
                self.youngs_modulus.to_string(),
                "Young's modulus must be positive",
            ));
        }
        if self.moment_of_inertia_in4 <= 0.0 || !self.moment_of_inertia_in4.is_finite() {
            return Err(WellError::invalid_input(
                "pipe.moment_of_inertia_in4",
                self.moment_of_inertia_in4.to_string(),
                "Moment of inertia must be positive",
            ));
        }
        Ok(())
    }
}

/// Critical (sinusoidal) buckling force of a pipe in an inclined hole:
/// `Fc = 2 √(E · I · w · cos θ / c)`.
///
/// `w` is the buoyed weight in lbf/in and `c` the clearance
/// `hole − pipe OD` in inches.
pub fn critical_buckling_force(
    pipe: &PipeProperties,
    hole_size: &Diameter,
    inclination: &Inclination,
    mud_weight: &Density,
) -> WellResult<Weight> {
    pipe.validate()?;
    let clearance = hole_size.inches() - pipe.outer_diameter.inches();
    if clearance <= 0.0 {
        return Err(WellError::calculation(
            "clearance",
            format!(
                "Hole size {} must exceed pipe OD {}",
                hole_size, pipe.outer_diameter
            ),
        ));
    }
    let inc = inclination.deg();
    if !(0.0..=90.0).contains(&inc) {
        return Err(WellError::calculation(
            "inclination",
            format!("Critical buckling force is defined for 0-90 deg, got {inc}"),
        ));
    }

    let factor = buoyancy_factor(mud_weight)?.fraction();
    let w_lbf_per_in = pipe.weight_per_length.lb_per_ft() * factor / 12.0;
    let force = critical_buckling_force_lbf(
        pipe.youngs_modulus.psi(),
        pipe.moment_of_inertia_in4,
        w_lbf_per_in,
        inclination.radians(),
        clearance,
    );
    Ok(Weight::from_lbf(check_finite(force, "critical_buckling_force")?))
}

/// Design factor `rating / load`.
pub fn safety_factor(rating: &Pressure, load: &Pressure) -> WellResult<Ratio> {
    if load.psi() <= 0.0 {
        return Err(WellError::calculation(
            "load",
            format!("Design load must be positive, got {load}"),
        ));
    }
    Ok(Ratio::from_fraction(rating.psi() / load.psi()))
}

/// Burst design factor: rating over `internal − external`.
pub fn burst_safety_factor(burst_rating: &Pressure, internal: &Pressure, external: &Pressure) -> WellResult<Ratio> {
    safety_factor(burst_rating, &(*internal - *external))
}

/// Collapse design factor: rating over `external − internal`.
pub fn collapse_safety_factor(
    collapse_rating: &Pressure,
    external: &Pressure,
    internal: &Pressure,
) -> WellResult<Ratio> {
    safety_factor(collapse_rating, &(*external - *internal))
}
