//! # Geometry Decomposer
//!
//! Partitions the measured-depth axis `[0, TD]` into contiguous segments
//! with a constant outer body (casing, liner or open hole) and a constant
//! inner body (drillstring component, or none).
//!
//! ## Algorithm
//!
//! 1. Outer-string timeline: start and end depths of every casing, liner and
//!    open-hole body. At any depth the covering casing or liner with the
//!    smallest bore is active, so a liner takes over from the casing it
//!    hangs in. Open hole is active only where no cased string covers the
//!    depth.
//! 2. Inner-string timeline: start and end depths of every drillstring
//!    component, sorted by start depth.
//! 3. Both timelines are merged with depth 0 into one sorted, de-duplicated
//!    breakpoint list; each consecutive pair is one segment.
//! 4. Each segment looks up its active outer and inner body.
//! 5. Areas use the oilfield capacity convention (bbl/ft, diameters in in):
//!    - annular = (outer ID² − inner OD²) / 1029.4, or outer ID² / 1029.4
//!      with no inner body
//!    - string  = inner ID² / 1029.4, or zero with no inner body
//!
//! A component spanning a casing shoe is therefore split at the shoe, and
//! the stretch between the bit and TD is kept as a zero-string segment.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{WellboreBody, WellboreStringModel, DEPTH_TOLERANCE_FT};
use crate::equations::capacity::{annular_capacity_bbl_per_ft, pipe_capacity_bbl_per_ft};
use crate::errors::{WellError, WellResult};
use crate::units::{Depth, Diameter, Length, UnitCapacity, Volume};

/// One depth interval with constant geometry.
///
/// `outer_body` and `inner_body` index into the body list the segment was
/// decomposed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthSegment {
    pub start_depth: Depth,
    pub end_depth: Depth,
    pub outer_body: usize,
    pub inner_body: Option<usize>,
    /// Bore of the outer body (casing/liner ID or hole size)
    pub outer_bore: Diameter,
    /// Outer diameter of the inner body, if any
    pub string_od: Option<Diameter>,
    /// Inner diameter of the inner body, if any
    pub string_id: Option<Diameter>,
    /// Annular capacity per unit length
    pub annular_area: UnitCapacity,
    /// String internal capacity per unit length (zero without an inner body)
    pub string_area: UnitCapacity,
}

impl DepthSegment {
    pub fn length(&self) -> Length {
        Length::from_ft(self.length_ft())
    }

    pub fn length_ft(&self) -> f64 {
        self.end_depth.ft() - self.start_depth.ft()
    }

    pub fn annular_volume(&self) -> Volume {
        Volume::from_bbl(self.annular_area.bbl_per_ft() * self.length_ft())
    }

    pub fn string_volume(&self) -> Volume {
        Volume::from_bbl(self.string_area.bbl_per_ft() * self.length_ft())
    }

    /// Volume of steel in the segment (closed-end minus open-end capacity)
    pub fn steel_volume(&self) -> Volume {
        match (self.string_od, self.string_id) {
            (Some(od), Some(id)) => Volume::from_bbl(
                annular_capacity_bbl_per_ft(od.inches(), id.inches()) * self.length_ft(),
            ),
            _ => Volume::zero(),
        }
    }

    /// Hydraulic diameter of the annulus: outer bore minus string OD
    pub fn hydraulic_diameter(&self) -> Diameter {
        let od = self.string_od.map_or(0.0, |d| d.inches());
        Diameter::from_inches(self.outer_bore.inches() - od)
    }
}

/// Volume totals over a decomposed wellbore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometrySummary {
    pub total_depth: Depth,
    pub segment_count: usize,
    /// Fluid volume outside the string
    pub annular_volume: Volume,
    /// Fluid volume inside the string
    pub string_volume: Volume,
    /// Steel displacement of the string
    pub steel_displacement: Volume,
    /// Annulus + string + steel
    pub hole_volume: Volume,
}

/// Decompose a body list into depth segments.
///
/// Validates the bodies first (see [`WellboreStringModel::new`]).
pub fn decompose_geometry(bodies: &[WellboreBody]) -> WellResult<Vec<DepthSegment>> {
    WellboreStringModel::new(bodies.to_vec())?.decompose()
}

pub(super) fn decompose(model: &WellboreStringModel) -> WellResult<Vec<DepthSegment>> {
    let breakpoints = breakpoints(model);
    debug!(
        breakpoints = breakpoints.len(),
        total_depth_ft = model.total_depth().ft(),
        "decomposing wellbore geometry"
    );

    let mut segments = Vec::with_capacity(breakpoints.len().saturating_sub(1));
    for pair in breakpoints.windows(2) {
        let (top, bottom) = (pair[0], pair[1]);
        let mid = 0.5 * (top + bottom);

        let outer_index = model.active_outer_at(mid).ok_or_else(|| {
            WellError::calculation(
                "outer_body",
                format!("No casing, liner or open hole covers {top:.2}-{bottom:.2} ft"),
            )
        })?;
        let inner_index = model.active_inner_at(mid);
        let outer = &model.bodies()[outer_index];
        let inner = inner_index.map(|i| &model.bodies()[i]);

        let segment = build_segment(top, bottom, outer_index, outer, inner_index, inner)?;
        trace!(
            start_ft = top,
            end_ft = bottom,
            outer = %outer.label,
            inner = inner.map_or("-", |b| b.label.as_str()),
            annular_bbl_per_ft = segment.annular_area.bbl_per_ft(),
            "segment"
        );
        segments.push(segment);
    }
    Ok(segments)
}

fn build_segment(
    top: f64,
    bottom: f64,
    outer_index: usize,
    outer: &WellboreBody,
    inner_index: Option<usize>,
    inner: Option<&WellboreBody>,
) -> WellResult<DepthSegment> {
    let bore = outer.bore().inches();
    let (annular, string) = match inner {
        Some(body) => {
            let od = body.outer_diameter.inches();
            if od >= bore {
                return Err(WellError::calculation(
                    "annular_clearance",
                    format!(
                        "'{}' ({od} in OD) does not fit inside '{}' ({bore} in bore) at {top:.2} ft",
                        body.label, outer.label
                    ),
                ));
            }
            (
                annular_capacity_bbl_per_ft(bore, od),
                pipe_capacity_bbl_per_ft(body.inner_diameter.inches()),
            )
        }
        None => (pipe_capacity_bbl_per_ft(bore), 0.0),
    };

    Ok(DepthSegment {
        start_depth: Depth::from_ft(top),
        end_depth: Depth::from_ft(bottom),
        outer_body: outer_index,
        inner_body: inner_index,
        outer_bore: outer.bore(),
        string_od: inner.map(|b| b.outer_diameter),
        string_id: inner.map(|b| b.inner_diameter),
        annular_area: UnitCapacity::from_bbl_per_ft(annular),
        string_area: UnitCapacity::from_bbl_per_ft(string),
    })
}

/// Merged, sorted and de-duplicated breakpoints of both timelines, from the
/// surface to TD.
fn breakpoints(model: &WellboreStringModel) -> Vec<f64> {
    let bodies = model.bodies();
    let mut depths = vec![0.0];
    for i in model.outer_timeline().into_iter().chain(model.inner_timeline()) {
        depths.push(bodies[i].start_depth.ft());
        depths.push(bodies[i].end_depth.ft());
    }
    depths.sort_by(f64::total_cmp);
    depths.dedup_by(|a, b| (*a - *b).abs() <= DEPTH_TOLERANCE_FT);
    depths
}

/// Total volumes over a segment list.
pub fn summarize(segments: &[DepthSegment]) -> GeometrySummary {
    let annular: f64 = segments.iter().map(|s| s.annular_volume().bbl()).sum();
    let string: f64 = segments.iter().map(|s| s.string_volume().bbl()).sum();
    let steel: f64 = segments.iter().map(|s| s.steel_volume().bbl()).sum();
    let total_depth = segments.last().map_or(0.0, |s| s.end_depth.ft());

    GeometrySummary {
        total_depth: Depth::from_ft(total_depth),
        segment_count: segments.len(),
        annular_volume: Volume::from_bbl(annular),
        string_volume: Volume::from_bbl(string),
        steel_displacement: Volume::from_bbl(steel),
        hole_volume: Volume::from_bbl(annular + string + steel),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::CAPACITY_CONSTANT;
    use proptest::prelude::*;

    fn ft(v: f64) -> Depth {
        Depth::from_ft(v)
    }

    fn inch(v: f64) -> Diameter {
        Diameter::from_inches(v)
    }

    fn simple_well(bit_depth: f64) -> Vec<WellboreBody> {
        vec![
            WellboreBody::casing("9-5/8in casing", inch(9.625), inch(8.835), ft(0.0), ft(5000.0)),
            WellboreBody::open_hole("8-1/2in hole", inch(8.5), ft(5000.0), ft(10_000.0)),
            WellboreBody::component("5in DP", inch(5.0), inch(4.276), ft(0.0), ft(bit_depth)),
        ]
    }

    fn assert_partition(segments: &[DepthSegment], total_depth: f64) {
        assert_eq!(segments.first().unwrap().start_depth.ft(), 0.0);
        assert_eq!(segments.last().unwrap().end_depth.ft(), total_depth);
        for pair in segments.windows(2) {
            assert_eq!(pair[0].end_depth.ft(), pair[1].start_depth.ft());
            assert!(pair[0].length_ft() > 0.0);
        }
    }

    #[test]
    fn test_simple_well_segments() {
        let segments = decompose_geometry(&simple_well(9500.0)).unwrap();
        assert_eq!(segments.len(), 3);
        assert_partition(&segments, 10_000.0);

        // Cased section with pipe
        assert_eq!(segments[0].outer_body, 0);
        assert_eq!(segments[0].inner_body, Some(2));
        let expected = (8.835f64.powi(2) - 25.0) / CAPACITY_CONSTANT;
        assert!((segments[0].annular_area.bbl_per_ft() - expected).abs() < 1e-12);
        let string = 4.276f64.powi(2) / CAPACITY_CONSTANT;
        assert!((segments[0].string_area.bbl_per_ft() - string).abs() < 1e-12);

        // Open hole with pipe
        assert_eq!(segments[1].outer_body, 1);
        assert_eq!(segments[1].inner_body, Some(2));
    }

    #[test]
    fn test_naked_annulus_below_bit() {
        let segments = decompose_geometry(&simple_well(9500.0)).unwrap();
        let last = segments.last().unwrap();
        assert_eq!(last.start_depth.ft(), 9500.0);
        assert_eq!(last.inner_body, None);
        assert_eq!(last.string_area.bbl_per_ft(), 0.0);
        assert!((last.annular_area.bbl_per_ft() - 8.5 * 8.5 / CAPACITY_CONSTANT).abs() < 1e-12);
    }

    #[test]
    fn test_component_split_at_casing_shoe() {
        let bodies = vec![
            WellboreBody::casing("9-5/8in casing", inch(9.625), inch(8.835), ft(0.0), ft(5000.0)),
            WellboreBody::open_hole("8-1/2in hole", inch(8.5), ft(5000.0), ft(10_000.0)),
            WellboreBody::component("5in DP", inch(5.0), inch(4.276), ft(0.0), ft(4000.0)),
            WellboreBody::component("HWDP", inch(5.0), inch(3.0), ft(4000.0), ft(6000.0)),
        ];
        let segments = decompose_geometry(&bodies).unwrap();
        let hwdp: Vec<&DepthSegment> = segments.iter().filter(|s| s.inner_body == Some(3)).collect();
        assert_eq!(hwdp.len(), 2);
        assert_ne!(hwdp[0].outer_body, hwdp[1].outer_body);
        assert_eq!(hwdp[0].end_depth.ft(), 5000.0);
        let total: f64 = hwdp.iter().map(|s| s.length_ft()).sum();
        assert_eq!(total, 2000.0);
    }

    #[test]
    fn test_liner_takes_precedence_in_lap() {
        let bodies = vec![
            WellboreBody::casing("9-5/8in", inch(9.625), inch(8.835), ft(0.0), ft(5000.0)),
            WellboreBody::liner("7in liner", inch(7.0), inch(6.184), ft(4800.0), ft(8000.0)),
            WellboreBody::open_hole("6-1/8in hole", inch(6.125), ft(8000.0), ft(9000.0)),
            WellboreBody::component("3-1/2in DP", inch(3.5), inch(2.764), ft(0.0), ft(8800.0)),
        ];
        let segments = decompose_geometry(&bodies).unwrap();
        assert_partition(&segments, 9000.0);
        let depths: Vec<f64> = segments.iter().map(|s| s.start_depth.ft()).collect();
        assert_eq!(depths, vec![0.0, 4800.0, 5000.0, 8000.0, 8800.0]);
        assert_eq!(segments[0].outer_body, 0);
        assert_eq!(segments[1].outer_body, 1);
        assert_eq!(segments[2].outer_body, 1);
        assert_eq!(segments[3].outer_body, 2);
        assert_eq!(segments[4].inner_body, None);
    }

    #[test]
    fn test_open_hole_from_surface_falls_back_below_shoe() {
        let bodies = vec![
            WellboreBody::casing("9-5/8in casing", inch(9.625), inch(8.835), ft(0.0), ft(5000.0)),
            WellboreBody::open_hole("8-1/2in hole", inch(8.5), ft(0.0), ft(10_000.0)),
            WellboreBody::component("5in DP", inch(5.0), inch(4.276), ft(0.0), ft(9500.0)),
        ];
        let segments = decompose_geometry(&bodies).unwrap();
        assert_partition(&segments, 10_000.0);
        assert_eq!(segments.len(), 3);

        assert_eq!(segments[0].outer_body, 0);
        assert_eq!(segments[0].outer_bore.inches(), 8.835);
        let cased_annulus = (8.835f64.powi(2) - 25.0) / CAPACITY_CONSTANT;
        assert!((segments[0].annular_area.bbl_per_ft() - cased_annulus).abs() < 1e-12);

        assert_eq!(segments[1].outer_body, 1);
        assert_eq!(segments[1].outer_bore.inches(), 8.5);
        assert_eq!(segments[2].outer_body, 1);
        assert_eq!(segments[2].inner_body, None);
    }

    #[test]
    fn test_uncovered_interval_fails() {
        let bodies = vec![
            WellboreBody::casing("csg", inch(9.625), inch(8.835), ft(0.0), ft(5000.0)),
            WellboreBody::open_hole("oh", inch(8.5), ft(6000.0), ft(10_000.0)),
        ];
        let err = decompose_geometry(&bodies).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_ERROR");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_string_larger_than_bore_fails() {
        let bodies = vec![
            WellboreBody::open_hole("oh", inch(6.0), ft(0.0), ft(1000.0)),
            WellboreBody::component("collar", inch(6.5), inch(2.8125), ft(0.0), ft(500.0)),
        ];
        let err = decompose_geometry(&bodies).unwrap_err();
        assert!(err.to_string().contains("annular_clearance"));
    }

    #[test]
    fn test_summary_volumes() {
        let segments = decompose_geometry(&simple_well(9500.0)).unwrap();
        let summary = summarize(&segments);
        assert_eq!(summary.segment_count, 3);
        assert_eq!(summary.total_depth.ft(), 10_000.0);
        let string = 4.276f64.powi(2) / CAPACITY_CONSTANT * 9500.0;
        assert!((summary.string_volume.bbl() - string).abs() < 1e-9);
        let hole = 8.835f64.powi(2) / CAPACITY_CONSTANT * 5000.0 + 8.5f64.powi(2) / CAPACITY_CONSTANT * 5000.0;
        assert!((summary.hole_volume.bbl() - hole).abs() < 1e-9);
    }

    #[test]
    fn test_metric_inputs_decompose_identically() {
        let bodies = vec![
            WellboreBody::casing(
                "csg",
                Diameter::new(244.475, "mm").unwrap(),
                Diameter::new(224.409, "mm").unwrap(),
                Depth::new(0.0, "m").unwrap(),
                Depth::new(1524.0, "m").unwrap(),
            ),
            WellboreBody::open_hole("oh", inch(8.5), ft(5000.0), ft(10_000.0)),
        ];
        let segments = decompose_geometry(&bodies).unwrap();
        assert_eq!(segments.len(), 2);
        assert!((segments[0].end_depth.ft() - 5000.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_segments_partition_the_well(
            shoe in 500.0f64..8000.0,
            extra in 100.0f64..5000.0,
            liner in proptest::option::of((0.1f64..0.9, 0.1f64..0.9)),
            pipe_cuts in proptest::collection::vec(0.0f64..1.0, 0..4),
            bit_fraction in 0.05f64..1.0,
        ) {
            let td = shoe + extra;
            let mut bodies = vec![
                WellboreBody::casing("csg", inch(13.375), inch(12.415), ft(0.0), ft(shoe)),
                WellboreBody::open_hole("oh", inch(8.5), ft(shoe), ft(td)),
            ];
            if let Some((hang, reach)) = liner {
                let top = shoe * hang;
                let bottom = shoe + extra * reach;
                bodies.push(WellboreBody::liner("liner", inch(9.625), inch(8.681), ft(top), ft(bottom)));
            }
            let bit = td * bit_fraction;
            let mut cuts: Vec<f64> = pipe_cuts.iter().map(|c| c * bit).collect();
            cuts.push(0.0);
            cuts.push(bit);
            cuts.sort_by(f64::total_cmp);
            cuts.dedup_by(|a, b| (*a - *b).abs() < 1.0);
            for (n, pair) in cuts.windows(2).enumerate() {
                bodies.push(WellboreBody::component(
                    format!("pipe{n}"), inch(5.0), inch(4.276), ft(pair[0]), ft(pair[1]),
                ));
            }

            let segments = decompose_geometry(&bodies).unwrap();
            prop_assert_eq!(segments[0].start_depth.ft(), 0.0);
            prop_assert!((segments.last().unwrap().end_depth.ft() - td).abs() < 1e-9);
            for pair in segments.windows(2) {
                prop_assert_eq!(pair[0].end_depth.ft(), pair[1].start_depth.ft());
                prop_assert!(pair[0].start_depth.ft() < pair[0].end_depth.ft());
            }
        }
    }
}
