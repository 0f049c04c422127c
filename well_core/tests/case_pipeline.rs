//! End-to-end tests: JSON case in, report out.

use well_core::batch::{decompose_many, run_cases};
use well_core::calculations::friction::friction_factor;
use well_core::limits::{LimitKind, OperationalLimits};
use well_core::wellbore::BodyKind;
use well_core::{
    decompose_geometry, hydrostatic_pressure, run_case, validate_operational_limit, Azimuth, Density, Depth,
    Diameter, Pressure, WellCase, WellboreBody,
};

const CASE_JSON: &str = r#"{
  "meta": {
    "version": "0.1.0",
    "name": "Deviated test well",
    "engineer": "A. Engineer",
    "created": "2026-01-05T08:00:00Z",
    "modified": "2026-01-05T08:00:00Z"
  },
  "bodies": [
    {
      "label": "9-5/8in casing",
      "kind": "Casing",
      "outer_diameter": { "value": 9.625, "unit": "in" },
      "inner_diameter": { "value": 8.835, "unit": "in" },
      "start_depth": { "value": 0.0, "unit": "ft" },
      "end_depth": { "value": 5000.0, "unit": "ft" }
    },
    {
      "label": "8-1/2in hole",
      "kind": "OpenHole",
      "outer_diameter": { "value": 8.5, "unit": "in" },
      "inner_diameter": { "value": 8.5, "unit": "in" },
      "start_depth": { "value": 5000.0, "unit": "ft" },
      "end_depth": { "value": 10000.0, "unit": "ft" }
    },
    {
      "label": "5in DP",
      "kind": "DrillstringComponent",
      "outer_diameter": { "value": 5.0, "unit": "in" },
      "inner_diameter": { "value": 4.276, "unit": "in" },
      "start_depth": { "value": 0.0, "unit": "ft" },
      "end_depth": { "value": 9500.0, "unit": "ft" }
    }
  ],
  "surveys": [
    { "measured_depth": { "value": 0.0, "unit": "ft" }, "inclination": { "value": 0.0, "unit": "deg" }, "azimuth": { "value": 0.0, "unit": "deg" } },
    { "measured_depth": { "value": 2000.0, "unit": "ft" }, "inclination": { "value": 0.0, "unit": "deg" }, "azimuth": { "value": 0.0, "unit": "deg" } },
    { "measured_depth": { "value": 5000.0, "unit": "ft" }, "inclination": { "value": 30.0, "unit": "deg" }, "azimuth": { "value": 45.0, "unit": "deg" } },
    { "measured_depth": { "value": 10000.0, "unit": "ft" }, "inclination": { "value": 30.0, "unit": "deg" }, "azimuth": { "value": 45.0, "unit": "deg" } }
  ],
  "vertical_section_azimuth": { "value": 45.0, "unit": "deg" },
  "fluid": {
    "density": { "value": 10.0, "unit": "ppg" },
    "viscosity": { "value": 20.0, "unit": "cP" }
  },
  "flow_rate": { "value": 400.0, "unit": "gpm" },
  "bit_nozzles": [
    { "value": 0.375, "unit": "in" },
    { "value": 0.375, "unit": "in" },
    { "value": 0.375, "unit": "in" }
  ],
  "drill_string": {
    "pipe": {
      "outer_diameter": { "value": 5.0, "unit": "in" },
      "inner_diameter": { "value": 4.276, "unit": "in" },
      "weight_per_length": { "value": 19.5, "unit": "lb/ft" },
      "youngs_modulus": { "value": 30000000.0, "unit": "psi" },
      "moment_of_inertia_in4": 14.7
    },
    "friction_factor": 0.25
  }
}"#;

fn body_set(shoe_ft: f64, string_bottom_ft: f64) -> Vec<WellboreBody> {
    vec![
        WellboreBody::casing(
            "9-5/8in casing",
            Diameter::from_inches(9.625),
            Diameter::from_inches(8.835),
            Depth::zero(),
            Depth::from_ft(shoe_ft),
        ),
        WellboreBody::open_hole("8-1/2in hole", Diameter::from_inches(8.5), Depth::from_ft(shoe_ft), Depth::from_ft(10_000.0)),
        WellboreBody::component(
            "5in DP",
            Diameter::from_inches(5.0),
            Diameter::from_inches(4.276),
            Depth::zero(),
            Depth::from_ft(string_bottom_ft),
        ),
    ]
}

#[test]
fn test_json_case_end_to_end() {
    let case = WellCase::from_json(CASE_JSON).unwrap();
    let report = run_case(&case, &OperationalLimits::default()).unwrap();

    // Breakpoints at 0, 5000 (shoe), 9500 (bit), 10000 (TD)
    assert_eq!(report.segments.len(), 3);
    assert_eq!(report.segments[0].outer_body, 0);
    assert_eq!(report.segments[1].outer_body, 1);
    assert_eq!(report.segments[2].inner_body, None);
    assert_eq!(report.hydraulics.bit_depth.unwrap().ft(), 9500.0);

    // Deviated: TVD below MD, hydrostatic on TVD
    let hydraulics = &report.hydraulics;
    let tvd = hydraulics.tvd_at_total_depth.ft();
    assert!(tvd < 10_000.0 && tvd > 8000.0);
    assert!((hydraulics.hydrostatic_at_total_depth.psi() - 0.052 * 10.0 * tvd).abs() < 1e-6);

    // Circulating adds density and pressure
    assert!(hydraulics.ecd_at_bit.unwrap().ppg() > 10.0);
    assert!(hydraulics.losses.string_loss.psi() > hydraulics.losses.annular_loss.psi());
    let expected_standpipe = hydraulics.losses.total().psi() + hydraulics.bit_pressure_drop.unwrap().psi();
    assert!((hydraulics.standpipe_pressure.psi() - expected_standpipe).abs() < 1e-9);
    assert!(hydraulics.bottoms_up_time.unwrap().minutes() > 0.0);

    let mechanics = report.mechanics.as_ref().unwrap();
    assert!((mechanics.buoyed_string_weight.lbf() - 19.5 * (1.0 - 10.0 / 65.5) * 9500.0).abs() < 1e-6);
    let td = mechanics.torque_drag.as_ref().unwrap();
    assert!(td.pick_up > td.slack_off);
    assert!(mechanics.critical_buckling_force.unwrap().lbf() > 0.0);

    let last = report.survey.last().unwrap();
    assert!(last.vertical_section.ft() > 0.0);
    assert!(report.all_limits_passed());
}

#[test]
fn test_report_serializes() {
    let case = WellCase::from_json(CASE_JSON).unwrap();
    let report = run_case(&case, &OperationalLimits::default()).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["case_name"], "Deviated test well");
    assert_eq!(json["segments"][0]["start_depth"]["unit"], "ft");
}

#[test]
fn test_case_with_tight_limits_reports_violation() {
    let case = WellCase::from_json(CASE_JSON).unwrap();
    let limits = OperationalLimits::from_toml_str("max_mud_weight_ppg = 9.5\n").unwrap();
    let report = run_case(&case, &limits).unwrap();

    assert!(!report.all_limits_passed());
    let check = report
        .limit_checks
        .iter()
        .find(|c| c.label == "mud weight window")
        .unwrap();
    let violation = check.violation.as_ref().unwrap();
    assert_eq!(violation.current_value, 10.0);
    assert_eq!(violation.limit_value, 9.5);
    assert_eq!(violation.unit, "ppg");
}

#[test]
fn test_malformed_case_is_reported() {
    let broken = CASE_JSON.replace("\"gpm\"", "\"furlongs/fortnight\"");
    assert!(WellCase::from_json(&broken).is_err());
}

#[test]
fn test_hydrostatic_pressure_scenario() {
    let p = hydrostatic_pressure(&Density::from_ppg(12.5), &Depth::from_ft(10_000.0)).unwrap();
    assert!((p.psi() - 6500.0).abs() < 1e-9);
}

#[test]
fn test_laminar_friction_factor_is_exact() {
    assert_eq!(friction_factor(1000.0, 0.0).unwrap(), 0.016);
}

#[test]
fn test_mud_weight_limit_violation() {
    let err = validate_operational_limit(
        LimitKind::MaxMudWeight,
        Density::from_ppg(23.0),
        Density::from_ppg(22.0),
    )
    .unwrap_err();
    assert_eq!(err.error_code(), "OPERATIONAL_LIMIT");
    let violation = err.limit_violation().unwrap();
    assert_eq!(violation.current_value, 23.0);
    assert_eq!(violation.limit_value, 22.0);
}

#[test]
fn test_limit_of_another_kind_is_rejected() {
    let err = validate_operational_limit(LimitKind::MaxDepth, Pressure::from_psi(9000.0), Pressure::from_psi(5000.0))
        .unwrap_err();
    assert_eq!(err.error_code(), "INCOMPATIBLE_KIND");
}

#[test]
fn test_pore_pressure_above_mud_weight_reported() {
    let case = WellCase::from_json(CASE_JSON).unwrap();
    let limits = OperationalLimits::from_toml_str("pore_pressure_ppg = 10.5\n").unwrap();
    let report = run_case(&case, &limits).unwrap();

    assert!(!report.all_limits_passed());
    let check = report
        .limit_checks
        .iter()
        .find(|c| c.label == "mud weight vs pore pressure")
        .unwrap();
    let violation = check.violation.as_ref().unwrap();
    assert_eq!(violation.parameter, "mud_weight_pore_pressure");
    assert_eq!(violation.current_value, 10.0);
    assert_eq!(violation.limit_value, 10.5);
}

#[test]
fn test_ecd_above_fracture_gradient_reported() {
    let case = WellCase::from_json(CASE_JSON).unwrap();
    let defaults = run_case(&case, &OperationalLimits::default()).unwrap();
    let ecd = defaults.hydraulics.ecd_at_bit.unwrap().ppg();
    let fracture = defaults
        .limit_checks
        .iter()
        .find(|c| c.label == "ECD vs fracture gradient")
        .unwrap();
    assert!(fracture.passed);

    // Static mud weight clears the gradient, circulating density does not
    let limits = OperationalLimits::from_toml_str(&format!("fracture_gradient_ppg = {}\n", (10.0 + ecd) / 2.0)).unwrap();
    let report = run_case(&case, &limits).unwrap();
    let check = report
        .limit_checks
        .iter()
        .find(|c| c.label == "ECD vs fracture gradient")
        .unwrap();
    assert!(!check.passed);
    assert_eq!(check.violation.as_ref().unwrap().parameter, "ecd_fracture_gradient");
    assert!(report
        .limit_checks
        .iter()
        .any(|c| c.label == "mud weight vs pore pressure" && c.passed));
}

#[test]
fn test_azimuth_normalization() {
    assert_eq!(Azimuth::new(370.0, "deg").unwrap(), Azimuth::new(10.0, "deg").unwrap());
    assert_eq!(Azimuth::new(-10.0, "deg").unwrap(), Azimuth::new(350.0, "deg").unwrap());
}

#[test]
fn test_component_spanning_shoe_splits_in_two() {
    let bodies = body_set(5000.0, 8000.0);
    let segments = decompose_geometry(&bodies).unwrap();

    let with_string: Vec<_> = segments.iter().filter(|s| s.inner_body == Some(2)).collect();
    assert_eq!(with_string.len(), 2);
    assert_ne!(with_string[0].outer_body, with_string[1].outer_body);
    let total: f64 = with_string.iter().map(|s| s.length_ft()).sum();
    assert!((total - 8000.0).abs() < 1e-9);
    assert_eq!(bodies[segments[0].outer_body].kind, BodyKind::Casing);
    assert_eq!(bodies[segments[1].outer_body].kind, BodyKind::OpenHole);
}

#[test]
fn test_batch_matches_serial() {
    let jobs: Vec<_> = [3000.0, 5000.0, 7000.0].iter().map(|&shoe| body_set(shoe, 9500.0)).collect();
    let parallel = decompose_many(&jobs);
    for (bodies, result) in jobs.iter().zip(parallel) {
        assert_eq!(result.unwrap(), decompose_geometry(bodies).unwrap());
    }

    let case = WellCase::from_json(CASE_JSON).unwrap();
    let reports = run_cases(&[case.clone(), case], &OperationalLimits::default());
    let (a, b) = (reports[0].as_ref().unwrap(), reports[1].as_ref().unwrap());
    assert_ne!(a.run_id, b.run_id);
    assert_eq!(a.segments, b.segments);
}
