//! # Wellbore String Model
//!
//! Concentric bodies that make up a wellbore at calculation time: the
//! casing, liners and open hole that form the outer wall, and the
//! drillstring components running inside them.
//!
//! ## Example
//!
//! ```rust
//! use well_core::units::{Depth, Diameter};
//! use well_core::wellbore::{WellboreBody, WellboreStringModel};
//!
//! let model = WellboreStringModel::new(vec![
//!     WellboreBody::casing("9-5/8in casing", Diameter::from_inches(9.625), Diameter::from_inches(8.835),
//!         Depth::from_ft(0.0), Depth::from_ft(5000.0)),
//!     WellboreBody::open_hole("8-1/2in hole", Diameter::from_inches(8.5),
//!         Depth::from_ft(5000.0), Depth::from_ft(10_000.0)),
//!     WellboreBody::component("5in DP", Diameter::from_inches(5.0), Diameter::from_inches(4.276),
//!         Depth::from_ft(0.0), Depth::from_ft(9500.0)),
//! ]).unwrap();
//!
//! let segments = model.decompose().unwrap();
//! assert_eq!(segments.len(), 3);
//! ```

pub mod geometry;

use serde::{Deserialize, Serialize};

use crate::errors::{WellError, WellResult};
use crate::units::{Depth, Diameter};

pub use geometry::{decompose_geometry, summarize, DepthSegment, GeometrySummary};

/// Depth tolerance used when comparing body boundaries (ft)
pub const DEPTH_TOLERANCE_FT: f64 = 1e-6;

/// Role of a body in the wellbore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyKind {
    Casing,
    Liner,
    OpenHole,
    DrillstringComponent,
}

impl BodyKind {
    /// Casing, liner and open hole form the outer wall
    pub fn is_outer(&self) -> bool {
        !matches!(self, BodyKind::DrillstringComponent)
    }

    /// Casing and liner; open hole is only a fallback outer wall
    pub fn is_cased(&self) -> bool {
        matches!(self, BodyKind::Casing | BodyKind::Liner)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BodyKind::Casing => "Casing",
            BodyKind::Liner => "Liner",
            BodyKind::OpenHole => "Open Hole",
            BodyKind::DrillstringComponent => "Drillstring Component",
        }
    }
}

/// One physical string element.
///
/// For open hole both diameters are the hole size; every other kind needs
/// `inner_diameter < outer_diameter`.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "5in DP",
///   "kind": "DrillstringComponent",
///   "outer_diameter": { "value": 5.0, "unit": "in" },
///   "inner_diameter": { "value": 4.276, "unit": "in" },
///   "start_depth": { "value": 0.0, "unit": "ft" },
///   "end_depth": { "value": 9500.0, "unit": "ft" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellboreBody {
    /// User label (e.g., "13-3/8in surface casing", "HWDP")
    pub label: String,
    pub kind: BodyKind,
    pub outer_diameter: Diameter,
    pub inner_diameter: Diameter,
    pub start_depth: Depth,
    pub end_depth: Depth,
}

impl WellboreBody {
    pub fn new(
        label: impl Into<String>,
        kind: BodyKind,
        outer_diameter: Diameter,
        inner_diameter: Diameter,
        start_depth: Depth,
        end_depth: Depth,
    ) -> Self {
        WellboreBody {
            label: label.into(),
            kind,
            outer_diameter,
            inner_diameter,
            start_depth,
            end_depth,
        }
    }

    pub fn casing(label: impl Into<String>, od: Diameter, id: Diameter, top: Depth, shoe: Depth) -> Self {
        Self::new(label, BodyKind::Casing, od, id, top, shoe)
    }

    pub fn liner(label: impl Into<String>, od: Diameter, id: Diameter, hanger: Depth, shoe: Depth) -> Self {
        Self::new(label, BodyKind::Liner, od, id, hanger, shoe)
    }

    pub fn open_hole(label: impl Into<String>, hole_size: Diameter, top: Depth, bottom: Depth) -> Self {
        Self::new(label, BodyKind::OpenHole, hole_size, hole_size, top, bottom)
    }

    pub fn component(label: impl Into<String>, od: Diameter, id: Diameter, top: Depth, bottom: Depth) -> Self {
        Self::new(label, BodyKind::DrillstringComponent, od, id, top, bottom)
    }

    /// Validate diameters and depth interval.
    pub fn validate(&self) -> WellResult<()> {
        let od = self.outer_diameter.inches();
        let id = self.inner_diameter.inches();
        let top = self.start_depth.ft();
        let bottom = self.end_depth.ft();

        if od <= 0.0 {
            return Err(WellError::invalid_input(
                format!("{}.outer_diameter", self.label),
                self.outer_diameter.to_string(),
                "Outer diameter must be positive",
            ));
        }
        if id <= 0.0 {
            return Err(WellError::invalid_input(
                format!("{}.inner_diameter", self.label),
                self.inner_diameter.to_string(),
                "Inner diameter must be positive",
            ));
        }
        match self.kind {
            BodyKind::OpenHole if id > od => {
                return Err(WellError::invalid_input(
                    format!("{}.inner_diameter", self.label),
                    self.inner_diameter.to_string(),
                    "Open hole bore cannot exceed hole size",
                ));
            }
            BodyKind::OpenHole => {}
            _ if id >= od => {
                return Err(WellError::invalid_input(
                    format!("{}.inner_diameter", self.label),
                    self.inner_diameter.to_string(),
                    "Inner diameter must be less than outer diameter",
                ));
            }
            _ => {}
        }
        if top < 0.0 {
            return Err(WellError::invalid_input(
                format!("{}.start_depth", self.label),
                self.start_depth.to_string(),
                "Start depth cannot be negative",
            ));
        }
        if bottom <= top {
            return Err(WellError::invalid_input(
                format!("{}.end_depth", self.label),
                self.end_depth.to_string(),
                "End depth must be greater than start depth",
            ));
        }
        Ok(())
    }

    /// Diameter of the flow bore: ID for tubulars, hole size for open hole
    pub fn bore(&self) -> Diameter {
        self.inner_diameter
    }

    /// Whether `depth_ft` lies in `[start_depth, end_depth)`
    pub fn covers(&self, depth_ft: f64) -> bool {
        self.start_depth.ft() <= depth_ft && depth_ft < self.end_depth.ft()
    }

    pub fn length_ft(&self) -> f64 {
        self.end_depth.ft() - self.start_depth.ft()
    }
}

/// Validated set of wellbore bodies for one calculation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WellboreStringModel {
    bodies: Vec<WellboreBody>,
}

impl WellboreStringModel {
    /// Validate every body, require at least one outer body, and reject
    /// drillstring components that overlap each other.
    pub fn new(bodies: Vec<WellboreBody>) -> WellResult<Self> {
        for body in &bodies {
            body.validate()?;
        }
        if !bodies.iter().any(|b| b.kind.is_outer()) {
            return Err(WellError::invalid_input(
                "bodies",
                format!("{} bodies", bodies.len()),
                "At least one casing, liner or open hole body is required",
            ));
        }

        let model = WellboreStringModel { bodies };
        let components = model.inner_timeline();
        for pair in components.windows(2) {
            let (upper, lower) = (&model.bodies[pair[0]], &model.bodies[pair[1]]);
            if lower.start_depth.ft() < upper.end_depth.ft() - DEPTH_TOLERANCE_FT {
                return Err(WellError::invalid_input(
                    format!("{}.start_depth", lower.label),
                    lower.start_depth.to_string(),
                    format!("Overlaps drillstring component '{}'", upper.label),
                ));
            }
        }
        Ok(model)
    }

    pub fn bodies(&self) -> &[WellboreBody] {
        &self.bodies
    }

    pub fn body(&self, index: usize) -> Option<&WellboreBody> {
        self.bodies.get(index)
    }

    /// Deepest end depth over all bodies
    pub fn total_depth(&self) -> Depth {
        let deepest = self
            .bodies
            .iter()
            .map(|b| b.end_depth.ft())
            .fold(0.0, f64::max);
        Depth::from_ft(deepest)
    }

    /// Indices of casing, liner and open-hole bodies sorted by start depth
    pub fn outer_timeline(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.bodies.len())
            .filter(|&i| self.bodies[i].kind.is_outer())
            .collect();
        indices.sort_by(|&a, &b| {
            self.bodies[a]
                .start_depth
                .ft()
                .total_cmp(&self.bodies[b].start_depth.ft())
        });
        indices
    }

    /// Indices of drillstring components sorted by start depth
    pub fn inner_timeline(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.bodies.len())
            .filter(|&i| self.bodies[i].kind == BodyKind::DrillstringComponent)
            .collect();
        indices.sort_by(|&a, &b| {
            self.bodies[a]
                .start_depth
                .ft()
                .total_cmp(&self.bodies[b].start_depth.ft())
        });
        indices
    }

    /// Active outer body at a depth: the covering casing or liner with the
    /// smallest bore, falling back to open hole only where no cased string
    /// covers the depth. Equal bores resolve to the earlier body in input
    /// order.
    pub fn active_outer_at(&self, depth_ft: f64) -> Option<usize> {
        let smallest_bore = |cased: bool| {
            self.bodies
                .iter()
                .enumerate()
                .filter(|(_, b)| b.kind.is_outer() && b.kind.is_cased() == cased && b.covers(depth_ft))
                .min_by(|(_, a), (_, b)| a.bore().inches().total_cmp(&b.bore().inches()))
                .map(|(i, _)| i)
        };
        smallest_bore(true).or_else(|| smallest_bore(false))
    }

    /// Drillstring component occupying a depth, if any
    pub fn active_inner_at(&self, depth_ft: f64) -> Option<usize> {
        self.bodies
            .iter()
            .position(|b| b.kind == BodyKind::DrillstringComponent && b.covers(depth_ft))
    }

    /// Decompose into depth segments; see [`geometry`].
    pub fn decompose(&self) -> WellResult<Vec<DepthSegment>> {
        geometry::decompose(self)
    }
}
