//! # Trajectory Calculation (Minimum Curvature)
//!
//! Joins consecutive survey stations with circular arcs.
//!
//! - [`trajectory_delta`] is pure and works on one pair of stations.
//! - [`survey_positions`] accumulates deltas over a whole survey listing,
//!   tied in at the surface origin (MD 0, TVD 0, N 0, E 0).
//!
//! ## Example
//!
//! ```rust
//! use well_core::calculations::trajectory::{trajectory_delta, SurveyStation};
//!
//! let a = SurveyStation::from_field(1000.0, 0.0, 0.0);
//! let b = SurveyStation::from_field(1100.0, 3.0, 45.0);
//!
//! let delta = trajectory_delta(&a, &b).unwrap();
//! assert!((delta.dogleg_severity.deg_per_100ft() - 3.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equations::curvature::{dogleg_angle_rad, min_curvature_deltas, normalize_turn_deg, ratio_factor};
use crate::errors::{WellError, WellResult};
use crate::units::{Angle, Azimuth, Depth, DoglegSeverity, Inclination, Length};

/// One directional survey measurement.
///
/// ## JSON Example
///
/// ```json
/// {
///   "measured_depth": { "value": 5200.0, "unit": "ft" },
///   "inclination": { "value": 12.5, "unit": "deg" },
///   "azimuth": { "value": 87.0, "unit": "deg" }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurveyStation {
    pub measured_depth: Depth,
    pub inclination: Inclination,
    pub azimuth: Azimuth,
}

impl SurveyStation {
    pub fn new(measured_depth: Depth, inclination: Inclination, azimuth: Azimuth) -> Self {
        SurveyStation {
            measured_depth,
            inclination,
            azimuth,
        }
    }

    /// Station from MD in ft and angles in degrees
    pub fn from_field(md_ft: f64, inclination_deg: f64, azimuth_deg: f64) -> Self {
        Self::new(
            Depth::from_ft(md_ft),
            Inclination::from_deg(inclination_deg),
            Azimuth::from_deg(azimuth_deg),
        )
    }

    pub fn validate(&self) -> WellResult<()> {
        let md = self.measured_depth.ft();
        if md < 0.0 {
            return Err(WellError::invalid_input(
                "measured_depth",
                self.measured_depth.to_string(),
                "Measured depth cannot be negative",
            ));
        }
        let inc = self.inclination.deg();
        if !(0.0..=180.0).contains(&inc) {
            return Err(WellError::invalid_input(
                "inclination",
                self.inclination.to_string(),
                "Inclination must lie between 0 and 180 deg",
            ));
        }
        Ok(())
    }
}

/// Change in position and direction between two stations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryDelta {
    pub course_length: Length,
    pub northing: Length,
    pub easting: Length,
    pub tvd: Depth,
    pub dogleg: Angle,
    /// Minimum-curvature ratio factor (dimensionless)
    pub ratio_factor: f64,
    pub dogleg_severity: DoglegSeverity,
    /// Inclination change per 100 ft (negative when dropping)
    pub build_rate: DoglegSeverity,
    /// Azimuth change per 100 ft, turned the short way round
    pub turn_rate: DoglegSeverity,
}

/// Minimum-curvature delta between two consecutive stations.
///
/// Fails if either station is invalid or if `b` is not strictly deeper
/// than `a`.
pub fn trajectory_delta(a: &SurveyStation, b: &SurveyStation) -> WellResult<TrajectoryDelta> {
    a.validate()?;
    b.validate()?;

    let course = b.measured_depth.ft() - a.measured_depth.ft();
    if course <= 0.0 {
        return Err(WellError::invalid_input(
            "measured_depth",
            b.measured_depth.to_string(),
            format!(
                "Survey stations must be in strictly increasing MD order (previous {})",
                a.measured_depth
            ),
        ));
    }

    let (i1, a1) = (a.inclination.radians(), a.azimuth.radians());
    let (i2, a2) = (b.inclination.radians(), b.azimuth.radians());
    let dogleg = dogleg_angle_rad(i1, a1, i2, a2);
    let rf = ratio_factor(dogleg);
    let (north, east, tvd) = min_curvature_deltas(course, i1, a1, i2, a2, rf);

    let per_100ft = 100.0 / course;
    let build = (b.inclination.deg() - a.inclination.deg()) * per_100ft;
    let turn = normalize_turn_deg(b.azimuth.deg() - a.azimuth.deg()) * per_100ft;

    Ok(TrajectoryDelta {
        course_length: Length::from_ft(course),
        northing: Length::from_ft(north),
        easting: Length::from_ft(east),
        tvd: Depth::from_ft(tvd),
        dogleg: Angle::from_radians(dogleg),
        ratio_factor: rf,
        dogleg_severity: DoglegSeverity::from_deg_per_100ft(dogleg.to_degrees() * per_100ft),
        build_rate: DoglegSeverity::from_deg_per_100ft(build),
        turn_rate: DoglegSeverity::from_deg_per_100ft(turn),
    })
}

/// Cumulative position at a survey station.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurveyPoint {
    pub station: SurveyStation,
    pub northing: Length,
    pub easting: Length,
    pub tvd: Depth,
    /// Horizontal displacement projected onto the vertical-section azimuth
    pub vertical_section: Length,
    /// Over the course ending at this station (zero at the tie-in)
    pub dogleg_severity: DoglegSeverity,
    pub build_rate: DoglegSeverity,
    pub turn_rate: DoglegSeverity,
}

/// Accumulate positions over a survey listing.
///
/// The listing is tied in at the surface origin. If the first station is
/// below MD 0, a vertical surface station (inclination 0, azimuth 0) is
/// assumed above it. One point is returned per input station.
pub fn survey_positions(
    stations: &[SurveyStation],
    vertical_section_azimuth: Azimuth,
) -> WellResult<Vec<SurveyPoint>> {
    let first = stations.first().ok_or_else(|| {
        WellError::invalid_input("stations", "[]", "At least one survey station is required")
    })?;
    first.validate()?;

    let (vs_sin, vs_cos) = vertical_section_azimuth.radians().sin_cos();
    let mut points = Vec::with_capacity(stations.len());
    let (mut north, mut east, mut tvd) = (0.0, 0.0, 0.0);

    let mut previous = if first.measured_depth.ft() > 0.0 {
        SurveyStation::from_field(0.0, 0.0, 0.0)
    } else {
        points.push(SurveyPoint {
            station: *first,
            northing: Length::zero(),
            easting: Length::zero(),
            tvd: Depth::zero(),
            vertical_section: Length::zero(),
            dogleg_severity: DoglegSeverity::zero(),
            build_rate: DoglegSeverity::zero(),
            turn_rate: DoglegSeverity::zero(),
        });
        *first
    };

    let start = points.len();
    for station in &stations[start..] {
        let delta = trajectory_delta(&previous, station)?;
        north += delta.northing.ft();
        east += delta.easting.ft();
        tvd += delta.tvd.ft();

        points.push(SurveyPoint {
            station: *station,
            northing: Length::from_ft(north),
            easting: Length::from_ft(east),
            tvd: Depth::from_ft(tvd),
            vertical_section: Length::from_ft(north * vs_cos + east * vs_sin),
            dogleg_severity: delta.dogleg_severity,
            build_rate: delta.build_rate,
            turn_rate: delta.turn_rate,
        });
        previous = *station;
    }

    debug!(
        stations = points.len(),
        final_tvd_ft = tvd,
        "survey positions computed"
    );
    Ok(points)
}

/// Largest dogleg severity over a set of survey points
pub fn max_dogleg_severity(points: &[SurveyPoint]) -> DoglegSeverity {
    points
        .iter()
        .map(|p| p.dogleg_severity)
        .fold(DoglegSeverity::zero(), DoglegSeverity::max)
}

/// TVD at a measured depth, interpolated linearly between survey points.
/// Depths beyond the last point extrapolate along its final course.
pub fn tvd_at(points: &[SurveyPoint], md: Depth) -> WellResult<Depth> {
    let target = md.ft();
    let last = points.last().ok_or_else(|| {
        WellError::invalid_input("survey", "[]", "No survey points to interpolate")
    })?;

    let mut upper = (0.0, 0.0);
    for point in points {
        let (md_ft, tvd_ft) = (point.station.measured_depth.ft(), point.tvd.ft());
        if target <= md_ft {
            let span = md_ft - upper.0;
            let fraction = if span > 0.0 { (target - upper.0) / span } else { 0.0 };
            return Ok(Depth::from_ft(upper.1 + fraction * (tvd_ft - upper.1)));
        }
        upper = (md_ft, tvd_ft);
    }

    let extra = target - last.station.measured_depth.ft();
    Ok(Depth::from_ft(
        last.tvd.ft() + extra * last.station.inclination.radians().cos(),
    ))
}
