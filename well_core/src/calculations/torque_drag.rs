//! # Soft-String Torque and Drag
//!
//! Johancsik soft-string model: the string is a cable lying on the low side
//! of the hole, so stiffness is ignored and contact forces come only from
//! weight and from tension acting around curvature.
//!
//! ## Formulas (per element, bit upward)
//!
//! ```text
//! Fn = √( (F ΔA sin Ī)² + (F ΔI + W sin Ī)² )
//! ΔF = W cos Ī ± μ Fn         (+ pulling out, − running in, 0 rotating)
//! ΔM = μ Fn r                (rotating)
//! ```
//!
//! - `W` = buoyed element weight, `F` = axial tension at the element's lower end
//! - `Ī` = mean inclination, `ΔI`, `ΔA` = inclination and azimuth change (rad)
//! - `r` = pipe OD / 2
//!
//! Loads are off bottom: tension at the bit is zero. Elements are the
//! survey courses above the bit; a bit below the last station extends the
//! last course straight.
//!
//! ## Reference
//!
//! Johancsik, Friesen & Dawson, "Torque and Drag in Directional Wells -
//! Prediction and Measurement", SPE 11380 (1984).

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::mechanics::{buoyancy_factor, PipeProperties};
use super::trajectory::SurveyStation;
use crate::equations::curvature::normalize_turn_deg;
use crate::errors::{WellError, WellResult};
use crate::units::{Density, Depth, Torque, Weight};

/// Inputs for a torque-and-drag run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TorqueDragInput {
    pub pipe: PipeProperties,
    pub bit_depth: Depth,
    pub mud_weight: Density,
    /// Coulomb friction coefficient between string and wall
    pub friction_factor: f64,
}

impl TorqueDragInput {
    pub fn validate(&self) -> WellResult<()> {
        self.pipe.validate()?;
        if self.bit_depth.ft() <= 0.0 {
            return Err(WellError::invalid_input(
                "bit_depth",
                self.bit_depth.to_string(),
                "Bit depth must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&self.friction_factor) {
            return Err(WellError::invalid_input(
                "friction_factor",
                self.friction_factor.to_string(),
                "Friction factor must be between 0 and 1",
            ));
        }
        Ok(())
    }
}

/// Loads at the top of one element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TorqueDragPoint {
    pub measured_depth: Depth,
    pub pick_up: Weight,
    pub slack_off: Weight,
    pub rotating: Weight,
    pub torque: Torque,
}

/// Surface loads plus the load profile from surface to bit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TorqueDragResult {
    /// Hook load pulling out of hole
    pub pick_up: Weight,
    /// Hook load running in hole (negative means the string will not slide)
    pub slack_off: Weight,
    /// Hook load rotating off bottom
    pub rotating: Weight,
    /// Surface torque rotating off bottom
    pub surface_torque: Torque,
    /// Ordered from surface to bit
    pub profile: Vec<TorqueDragPoint>,
}

/// Run the soft-string model over a survey.
pub fn torque_and_drag(stations: &[SurveyStation], input: &TorqueDragInput) -> WellResult<TorqueDragResult> {
    input.validate()?;
    let courses = courses_to_bit(stations, input.bit_depth.ft())?;

    let mu = input.friction_factor;
    let w_per_ft = input.pipe.weight_per_length.lb_per_ft() * buoyancy_factor(&input.mud_weight)?.fraction();
    let radius_ft = input.pipe.outer_diameter.inches() / 2.0 / 12.0;

    let (mut pick_up, mut slack_off, mut rotating, mut torque) = (0.0, 0.0, 0.0, 0.0);
    let mut profile = Vec::with_capacity(courses.len() + 1);
    profile.push(point(input.bit_depth.ft(), 0.0, 0.0, 0.0, 0.0));

    for course in courses.iter().rev() {
        let weight = w_per_ft * course.length_ft;
        let (sin_i, cos_i) = course.mean_inclination.sin_cos();

        pick_up += weight * cos_i + mu * normal_force(pick_up, weight, sin_i, course);
        slack_off += weight * cos_i - mu * normal_force(slack_off, weight, sin_i, course);
        let rotating_normal = normal_force(rotating, weight, sin_i, course);
        rotating += weight * cos_i;
        torque += mu * rotating_normal * radius_ft;

        profile.push(point(course.top_md_ft, pick_up, slack_off, rotating, torque));
    }
    profile.reverse();

    debug!(
        courses = courses.len(),
        pick_up_lbf = pick_up,
        slack_off_lbf = slack_off,
        surface_torque_ft_lbf = torque,
        "torque and drag"
    );
    Ok(TorqueDragResult {
        pick_up: Weight::from_lbf(pick_up),
        slack_off: Weight::from_lbf(slack_off),
        rotating: Weight::from_lbf(rotating),
        surface_torque: Torque::from_ft_lbf(torque),
        profile,
    })
}

fn point(md_ft: f64, pick_up: f64, slack_off: f64, rotating: f64, torque: f64) -> TorqueDragPoint {
    TorqueDragPoint {
        measured_depth: Depth::from_ft(md_ft),
        pick_up: Weight::from_lbf(pick_up),
        slack_off: Weight::from_lbf(slack_off),
        rotating: Weight::from_lbf(rotating),
        torque: Torque::from_ft_lbf(torque),
    }
}

fn normal_force(tension: f64, weight: f64, sin_i: f64, course: &Course) -> f64 {
    let lateral = tension * course.azimuth_change * sin_i;
    let vertical = tension * course.inclination_change + weight * sin_i;
    lateral.hypot(vertical)
}

struct Course {
    top_md_ft: f64,
    length_ft: f64,
    mean_inclination: f64,
    inclination_change: f64,
    azimuth_change: f64,
}

/// Survey courses from surface to the bit, truncating the course the bit
/// sits in and extending straight below the last station.
fn courses_to_bit(stations: &[SurveyStation], bit_md_ft: f64) -> WellResult<Vec<Course>> {
    if stations.is_empty() {
        return Err(WellError::invalid_input(
            "stations",
            "[]",
            "At least one survey station is required",
        ));
    }

    let surface = SurveyStation::from_field(0.0, 0.0, 0.0);
    let mut previous = if stations[0].measured_depth.ft() > 0.0 {
        surface
    } else {
        stations[0]
    };
    let mut courses = Vec::new();

    for station in stations.iter().skip_while(|s| s.measured_depth.ft() <= 0.0) {
        station.validate()?;
        let (top, bottom) = (previous.measured_depth.ft(), station.measured_depth.ft());
        if bottom <= top {
            return Err(WellError::invalid_input(
                "measured_depth",
                station.measured_depth.to_string(),
                "Survey stations must be in strictly increasing MD order",
            ));
        }
        if top >= bit_md_ft {
            break;
        }

        let fraction = ((bit_md_ft - top) / (bottom - top)).min(1.0);
        let (i1, i2) = (previous.inclination.radians(), station.inclination.radians());
        let d_inc = (i2 - i1) * fraction;
        let d_azi = normalize_turn_deg(station.azimuth.deg() - previous.azimuth.deg()).to_radians() * fraction;
        courses.push(Course {
            top_md_ft: top,
            length_ft: (bottom - top) * fraction,
            mean_inclination: i1 + d_inc / 2.0,
            inclination_change: d_inc,
            azimuth_change: d_azi,
        });
        previous = *station;
    }

    let last_md = previous.measured_depth.ft();
    if bit_md_ft > last_md {
        courses.push(Course {
            top_md_ft: last_md,
            length_ft: bit_md_ft - last_md,
            mean_inclination: previous.inclination.radians(),
            inclination_change: 0.0,
            azimuth_change: 0.0,
        });
    }
    Ok(courses)
}
