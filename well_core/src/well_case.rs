//! # Well Case
//!
//! A `WellCase` is the root container for one set of calculation inputs:
//! wellbore bodies, directional surveys, fluid, pumps and string
//! properties. [`run_case`] drives every calculator over the case and
//! collects the results in a [`CaseReport`].
//!
//! ## Structure
//!
//! ```text
//! WellCase
//! ├── meta: CaseMetadata (schema version, name, engineer, timestamps)
//! ├── bodies: Vec<WellboreBody>
//! ├── surveys: Vec<SurveyStation>
//! ├── fluid + flow_rate (+ bit nozzles)
//! ├── drill_string: Option<DrillStringSettings>
//! └── casing_loads: Vec<CasingLoad> (burst and collapse load cases)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use well_core::calculations::DrillingFluid;
//! use well_core::limits::OperationalLimits;
//! use well_core::units::{Density, Depth, Diameter, FlowRate, Viscosity};
//! use well_core::well_case::{run_case, WellCase};
//! use well_core::wellbore::WellboreBody;
//!
//! let case = WellCase::new(
//!     "Vertical test well",
//!     "A. Engineer",
//!     vec![
//!         WellboreBody::casing("9-5/8in casing", Diameter::from_inches(9.625), Diameter::from_inches(8.835),
//!             Depth::from_ft(0.0), Depth::from_ft(5000.0)),
//!         WellboreBody::open_hole("8-1/2in hole", Diameter::from_inches(8.5),
//!             Depth::from_ft(5000.0), Depth::from_ft(10_000.0)),
//!         WellboreBody::component("5in DP", Diameter::from_inches(5.0), Diameter::from_inches(4.276),
//!             Depth::from_ft(0.0), Depth::from_ft(9500.0)),
//!     ],
//!     DrillingFluid::new(Density::from_ppg(10.0), Viscosity::from_cp(20.0)),
//!     FlowRate::from_gpm(400.0),
//! );
//!
//! let report = run_case(&case, &OperationalLimits::default()).unwrap();
//! assert_eq!(report.segments.len(), 3);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::calculations::hydraulics::{
    bit_pressure_drop, bottoms_up_time, circulating_pressure_losses, ecd, hydraulic_horsepower,
    hydrostatic_pressure, total_circulation_time, total_flow_area,
};
use crate::calculations::mechanics::{
    buoyed_weight, burst_safety_factor, collapse_safety_factor, critical_buckling_force, hook_load,
};
use crate::calculations::torque_drag::{torque_and_drag, TorqueDragInput};
use crate::calculations::trajectory::{max_dogleg_severity, survey_positions, tvd_at};
use crate::calculations::{
    CirculatingLosses, DrillingFluid, PipeProperties, SurveyPoint, SurveyStation, TorqueDragResult,
};
use crate::errors::{WellError, WellResult};
use crate::limits::{LimitCheck, OperationalLimits};
use crate::units::{
    Azimuth, Density, Depth, Diameter, FlowRate, Inclination, Length, Power, Pressure, Ratio, Time, Volume, Weight,
};
use crate::wellbore::{summarize, DepthSegment, GeometrySummary, WellboreBody, WellboreStringModel};

/// Current schema version for case files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root container for one well calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellCase {
    pub meta: CaseMetadata,
    pub bodies: Vec<WellboreBody>,
    /// Directional surveys in increasing MD; empty means a vertical well
    #[serde(default)]
    pub surveys: Vec<SurveyStation>,
    /// Azimuth the vertical section is projected onto (default north)
    #[serde(default)]
    pub vertical_section_azimuth: Option<Azimuth>,
    pub fluid: DrillingFluid,
    pub flow_rate: FlowRate,
    /// Bit nozzle diameters; empty skips bit hydraulics
    #[serde(default)]
    pub bit_nozzles: Vec<Diameter>,
    #[serde(default)]
    pub drill_string: Option<DrillStringSettings>,
    #[serde(default)]
    pub casing_loads: Vec<CasingLoad>,
}

/// Case metadata stored in the file header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,
    /// Well or job name
    pub name: String,
    /// Responsible engineer
    pub engineer: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// Drill pipe used for string mechanics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrillStringSettings {
    pub pipe: PipeProperties,
    /// Coulomb friction coefficient for hook load and torque & drag
    pub friction_factor: f64,
}

/// Pressure ratings and design load cases for one casing string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CasingLoad {
    pub label: String,
    pub burst_rating: Pressure,
    pub collapse_rating: Pressure,
    /// Governing burst case (internal exceeds external)
    pub burst_case: PressureLoad,
    /// Governing collapse case (external exceeds internal)
    pub collapse_case: PressureLoad,
}

/// Internal and external pressure at the critical depth of a load case.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PressureLoad {
    pub internal_pressure: Pressure,
    pub external_pressure: Pressure,
}

impl WellCase {
    /// Create a case with the required inputs; optional sections start empty.
    pub fn new(
        name: impl Into<String>,
        engineer: impl Into<String>,
        bodies: Vec<WellboreBody>,
        fluid: DrillingFluid,
        flow_rate: FlowRate,
    ) -> Self {
        let now = Utc::now();
        WellCase {
            meta: CaseMetadata {
                version: SCHEMA_VERSION.to_string(),
                name: name.into(),
                engineer: engineer.into(),
                created: now,
                modified: now,
            },
            bodies,
            surveys: Vec::new(),
            vertical_section_azimuth: None,
            fluid,
            flow_rate,
            bit_nozzles: Vec::new(),
            drill_string: None,
            casing_loads: Vec::new(),
        }
    }

    pub fn with_surveys(mut self, surveys: Vec<SurveyStation>) -> Self {
        self.surveys = surveys;
        self.touch();
        self
    }

    pub fn with_bit_nozzles(mut self, nozzles: Vec<Diameter>) -> Self {
        self.bit_nozzles = nozzles;
        self.touch();
        self
    }

    pub fn with_drill_string(mut self, settings: DrillStringSettings) -> Self {
        self.drill_string = Some(settings);
        self.touch();
        self
    }

    pub fn with_casing_load(mut self, load: CasingLoad) -> Self {
        self.casing_loads.push(load);
        self.touch();
        self
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Parse a case from JSON.
    pub fn from_json(json: &str) -> WellResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> WellResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> WellResult<()> {
        self.fluid.validate()?;
        if self.flow_rate.gpm() <= 0.0 {
            return Err(WellError::invalid_input(
                "flow_rate",
                self.flow_rate.to_string(),
                "Flow rate must be positive",
            ));
        }
        if let Some(settings) = &self.drill_string {
            settings.pipe.validate()?;
        }
        Ok(())
    }
}

// ============================================================================
// Report
// ============================================================================

/// Everything computed for one case run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseReport {
    pub run_id: Uuid,
    pub case_name: String,
    pub generated: DateTime<Utc>,
    pub segments: Vec<DepthSegment>,
    pub geometry: GeometrySummary,
    /// Empty for a vertical well with no surveys
    pub survey: Vec<SurveyPoint>,
    pub hydraulics: HydraulicsReport,
    pub mechanics: Option<MechanicsReport>,
    /// Advisory limit checks; failures do not abort the run
    pub limit_checks: Vec<LimitCheck>,
}

impl CaseReport {
    pub fn all_limits_passed(&self) -> bool {
        crate::limits::all_passed(&self.limit_checks)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HydraulicsReport {
    pub total_depth: Depth,
    pub tvd_at_total_depth: Depth,
    pub hydrostatic_at_total_depth: Pressure,
    pub losses: CirculatingLosses,
    pub bit_pressure_drop: Option<Pressure>,
    /// String + annulus + bit
    pub standpipe_pressure: Pressure,
    pub bit_hydraulic_horsepower: Option<Power>,
    /// Present when a string is in the hole
    pub bit_depth: Option<Depth>,
    pub ecd_at_bit: Option<Density>,
    pub bottoms_up_time: Option<Time>,
    pub total_circulation_time: Option<Time>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MechanicsReport {
    pub buoyed_string_weight: Weight,
    pub hook_load: Weight,
    /// At the bit, when the bit inclination is at most 90 deg
    pub critical_buckling_force: Option<Weight>,
    pub torque_drag: Option<TorqueDragResult>,
    pub casing_safety_factors: Vec<CasingSafetyFactors>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CasingSafetyFactors {
    pub label: String,
    pub burst: Ratio,
    pub collapse: Ratio,
}

/// Run every calculator over a case.
///
/// Input and calculation errors abort the run; limit violations are
/// recorded in [`CaseReport::limit_checks`] and logged at `warn`.
pub fn run_case(case: &WellCase, limits: &OperationalLimits) -> WellResult<CaseReport> {
    case.validate()?;
    let run_id = Uuid::new_v4();
    info!(%run_id, case = %case.meta.name, "running well case");

    let model = WellboreStringModel::new(case.bodies.clone())?;
    let segments = model.decompose()?;
    let geometry = summarize(&segments);

    let survey = if case.surveys.is_empty() {
        Vec::new()
    } else {
        survey_positions(&case.surveys, case.vertical_section_azimuth.unwrap_or_else(Azimuth::zero))?
    };
    let tvd_of = |md: Depth| -> WellResult<Depth> {
        if survey.is_empty() {
            Ok(md)
        } else {
            tvd_at(&survey, md)
        }
    };

    let hydraulics = run_hydraulics(case, &segments, &geometry, &tvd_of)?;
    let mechanics = match (&case.drill_string, hydraulics.bit_depth) {
        (Some(settings), Some(bit_depth)) => Some(run_mechanics(case, settings, &segments, bit_depth)?),
        _ => None,
    };

    let mut checks = vec![
        LimitCheck::record("total depth", limits.check_depth(geometry.total_depth)),
        LimitCheck::record("mud weight window", limits.check_mud_weight(case.fluid.density)),
        LimitCheck::record("mud weight vs pore pressure", limits.check_pore_pressure(case.fluid.density)),
        LimitCheck::record("flow rate", limits.check_flow_rate(case.flow_rate)),
        LimitCheck::record(
            "hydrostatic pressure at TD",
            limits.check_pressure(hydraulics.hydrostatic_at_total_depth),
        ),
        LimitCheck::record("standpipe pressure", limits.check_pressure(hydraulics.standpipe_pressure)),
    ];
    match hydraulics.ecd_at_bit {
        Some(ecd) => {
            checks.push(LimitCheck::record("ECD at bit", limits.check_ecd(ecd)));
            checks.push(LimitCheck::record("ECD vs fracture gradient", limits.check_fracture_gradient(ecd)));
        }
        None => checks.push(LimitCheck::record(
            "mud weight vs fracture gradient",
            limits.check_fracture_gradient(case.fluid.density),
        )),
    }
    if !survey.is_empty() {
        checks.push(LimitCheck::record(
            "max dogleg severity",
            limits.check_dogleg_severity(max_dogleg_severity(&survey)),
        ));
    }
    if let Some(report) = &mechanics {
        for sf in &report.casing_safety_factors {
            checks.push(LimitCheck::record(
                format!("{} burst", sf.label),
                limits.check_casing_safety_factor(sf.burst),
            ));
            checks.push(LimitCheck::record(
                format!("{} collapse", sf.label),
                limits.check_casing_safety_factor(sf.collapse),
            ));
        }
    }

    let report = CaseReport {
        run_id,
        case_name: case.meta.name.clone(),
        generated: Utc::now(),
        segments,
        geometry,
        survey,
        hydraulics,
        mechanics,
        limit_checks: checks,
    };
    info!(
        %run_id,
        segments = report.segments.len(),
        limits_passed = report.all_limits_passed(),
        "well case complete"
    );
    Ok(report)
}

fn run_hydraulics(
    case: &WellCase,
    segments: &[DepthSegment],
    geometry: &GeometrySummary,
    tvd_of: &dyn Fn(Depth) -> WellResult<Depth>,
) -> WellResult<HydraulicsReport> {
    let fluid = &case.fluid;
    let tvd_td = tvd_of(geometry.total_depth)?;
    let hydrostatic = hydrostatic_pressure(&fluid.density, &tvd_td)?;
    let losses = circulating_pressure_losses(segments, fluid, &case.flow_rate)?;

    let bit_depth = segments
        .iter()
        .filter(|s| s.inner_body.is_some())
        .map(|s| s.end_depth)
        .last();

    let (bit_drop, bit_hhp) = if case.bit_nozzles.is_empty() {
        (None, None)
    } else {
        let tfa = total_flow_area(&case.bit_nozzles);
        let drop = bit_pressure_drop(&fluid.density, &case.flow_rate, &tfa)?;
        (Some(drop), Some(hydraulic_horsepower(&drop, &case.flow_rate)))
    };
    let standpipe = losses.total() + bit_drop.unwrap_or_else(Pressure::zero);

    let (ecd_at_bit, bottoms_up, circulation) = match bit_depth {
        Some(bit) => {
            let tvd_bit = tvd_of(bit)?;
            let ecd_value = ecd(&fluid.density, &losses.annular_loss, &tvd_bit)?;
            let flowing: Vec<&DepthSegment> = segments.iter().filter(|s| s.inner_body.is_some()).collect();
            let annular = Volume::from_bbl(flowing.iter().map(|s| s.annular_volume().bbl()).sum());
            let string = Volume::from_bbl(flowing.iter().map(|s| s.string_volume().bbl()).sum());
            (
                Some(ecd_value),
                Some(bottoms_up_time(&annular, &case.flow_rate)?),
                Some(total_circulation_time(&string, &annular, &case.flow_rate)?),
            )
        }
        None => (None, None, None),
    };

    Ok(HydraulicsReport {
        total_depth: geometry.total_depth,
        tvd_at_total_depth: tvd_td,
        hydrostatic_at_total_depth: hydrostatic,
        losses,
        bit_pressure_drop: bit_drop,
        standpipe_pressure: standpipe,
        bit_hydraulic_horsepower: bit_hhp,
        bit_depth,
        ecd_at_bit,
        bottoms_up_time: bottoms_up,
        total_circulation_time: circulation,
    })
}

fn run_mechanics(
    case: &WellCase,
    settings: &DrillStringSettings,
    segments: &[DepthSegment],
    bit_depth: Depth,
) -> WellResult<MechanicsReport> {
    let mud_weight = &case.fluid.density;
    let string_weight = buoyed_weight(
        &settings.pipe.weight_per_length,
        &Length::from_ft(bit_depth.ft()),
        mud_weight,
    )?;
    let pulling = hook_load(&string_weight, settings.friction_factor)?;

    let bit_inclination = inclination_at(&case.surveys, bit_depth);
    let hole_at_bit = segments
        .iter()
        .rfind(|s| s.inner_body.is_some())
        .map(|s| s.outer_bore);
    let buckling = match hole_at_bit {
        Some(hole) if bit_inclination.deg() <= 90.0 => {
            Some(critical_buckling_force(&settings.pipe, &hole, &bit_inclination, mud_weight)?)
        }
        _ => None,
    };

    let torque_drag = if case.surveys.is_empty() {
        None
    } else {
        let input = TorqueDragInput {
            pipe: settings.pipe,
            bit_depth,
            mud_weight: *mud_weight,
            friction_factor: settings.friction_factor,
        };
        Some(torque_and_drag(&case.surveys, &input)?)
    };

    let casing_safety_factors = case
        .casing_loads
        .iter()
        .map(|load| {
            Ok(CasingSafetyFactors {
                label: load.label.clone(),
                burst: burst_safety_factor(
                    &load.burst_rating,
                    &load.burst_case.internal_pressure,
                    &load.burst_case.external_pressure,
                )?,
                collapse: collapse_safety_factor(
                    &load.collapse_rating,
                    &load.collapse_case.external_pressure,
                    &load.collapse_case.internal_pressure,
                )?,
            })
        })
        .collect::<WellResult<Vec<_>>>()?;

    Ok(MechanicsReport {
        buoyed_string_weight: string_weight,
        hook_load: pulling,
        critical_buckling_force: buckling,
        torque_drag,
        casing_safety_factors,
    })
}

/// Inclination at a depth, linearly interpolated between stations
fn inclination_at(stations: &[SurveyStation], md: Depth) -> Inclination {
    let target = md.ft();
    let mut upper = (0.0, 0.0);
    for station in stations {
        let (md_ft, inc) = (station.measured_depth.ft(), station.inclination.deg());
        if target <= md_ft {
            let span = md_ft - upper.0;
            let fraction = if span > 0.0 { (target - upper.0) / span } else { 1.0 };
            return Inclination::from_deg(upper.1 + fraction * (inc - upper.1));
        }
        upper = (md_ft, inc);
    }
    Inclination::from_deg(upper.1)
}
