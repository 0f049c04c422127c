//! # Batch Calculations
//!
//! Parallel maps over independent input sets on rayon's global pool. The
//! calculators share no mutable state (the unit registry is read-only), so
//! each input is computed in isolation: results keep input order and one
//! failing input does not affect the others.

use rayon::prelude::*;
use tracing::debug;

use crate::calculations::trajectory::{survey_positions, SurveyPoint, SurveyStation};
use crate::calculations::{CalculationOutput, CalculationRequest};
use crate::errors::WellResult;
use crate::limits::OperationalLimits;
use crate::units::Azimuth;
use crate::well_case::{run_case, CaseReport, WellCase};
use crate::wellbore::{decompose_geometry, DepthSegment, WellboreBody};

/// Decompose many body sets.
pub fn decompose_many(jobs: &[Vec<WellboreBody>]) -> Vec<WellResult<Vec<DepthSegment>>> {
    debug!(jobs = jobs.len(), "batch geometry decomposition");
    jobs.par_iter().map(|bodies| decompose_geometry(bodies)).collect()
}

/// Survey positions for many wells, each projected on north.
pub fn trajectory_many(wells: &[Vec<SurveyStation>]) -> Vec<WellResult<Vec<SurveyPoint>>> {
    debug!(wells = wells.len(), "batch trajectory");
    wells
        .par_iter()
        .map(|stations| survey_positions(stations, Azimuth::zero()))
        .collect()
}

/// Run many well cases against the same limits.
pub fn run_cases(cases: &[WellCase], limits: &OperationalLimits) -> Vec<WellResult<CaseReport>> {
    debug!(cases = cases.len(), "batch well cases");
    cases.par_iter().map(|case| run_case(case, limits)).collect()
}

/// Dispatch many single-shot requests.
pub fn run_requests(requests: &[CalculationRequest]) -> Vec<WellResult<CalculationOutput>> {
    requests.par_iter().map(CalculationRequest::run).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{Density, Depth, Diameter};

    fn body_set(shoe: f64) -> Vec<WellboreBody> {
        vec![
            WellboreBody::casing("csg", Diameter::from_inches(9.625), Diameter::from_inches(8.835), Depth::zero(), Depth::from_ft(shoe)),
            WellboreBody::open_hole("oh", Diameter::from_inches(8.5), Depth::from_ft(shoe), Depth::from_ft(10_000.0)),
        ]
    }

    #[test]
    fn test_decompose_many_keeps_order_and_isolates_failures() {
        let mut broken = body_set(5000.0);
        broken[1].start_depth = Depth::from_ft(6000.0);
        let jobs = vec![body_set(3000.0), broken, body_set(7000.0)];

        let results = decompose_many(&jobs);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap()[0].end_depth.ft(), 3000.0);
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap()[0].end_depth.ft(), 7000.0);
    }

    #[test]
    fn test_trajectory_many() {
        let wells: Vec<Vec<SurveyStation>> = (1..=8)
            .map(|n| vec![SurveyStation::from_field(1000.0 * n as f64, 0.0, 0.0)])
            .collect();
        let results = trajectory_many(&wells);
        for (n, result) in results.iter().enumerate() {
            let points = result.as_ref().unwrap();
            assert_eq!(points[0].tvd.ft(), 1000.0 * (n + 1) as f64);
        }
        assert!(trajectory_many(&[Vec::new()])[0].is_err());
    }

    #[test]
    fn test_run_requests() {
        let requests: Vec<CalculationRequest> = [10.0, 12.5, 15.0]
            .iter()
            .map(|&ppg| CalculationRequest::HydrostaticPressure {
                mud_weight: Density::from_ppg(ppg),
                depth: Depth::from_ft(10_000.0),
            })
            .collect();
        let outputs = run_requests(&requests);
        match &outputs[1] {
            Ok(CalculationOutput::Pressure { value }) => assert_eq!(value.psi(), 6500.0),
            other => panic!("unexpected {other:?}"),
        }
    }
}
