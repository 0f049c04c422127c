//! # Drilling Hydraulics
//!
//! Typed wrappers over [`crate::equations::hydraulics`]. Every entry point
//! takes quantities in any valid unit, converts to oilfield units, and
//! returns a typed result. Divisions by a zero depth, diameter, area or flow
//! rate fail with a calculation error naming the parameter.
//!
//! ## Circulating system
//!
//! Fluid is pumped down the string, leaves through the bit and returns up
//! the annulus. [`circulating_pressure_losses`] walks the decomposed
//! segments from the surface to the bit: segments with no string inside
//! (below the bit) carry no flow and add no loss.
//!
//! ## Example
//!
//! ```rust
//! use well_core::calculations::hydraulics::hydrostatic_pressure;
//! use well_core::units::{Density, Depth};
//!
//! let p = hydrostatic_pressure(&Density::new(12.5, "ppg").unwrap(), &Depth::new(10_000.0, "ft").unwrap()).unwrap();
//! assert_eq!(p.psi(), 6500.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::friction;
use crate::equations::capacity::circle_area_in2;
use crate::equations::PIPE_VELOCITY_CONSTANT;
use crate::equations::hydraulics::{
    annular_velocity_ft_min, bit_pressure_drop_psi, ecd_ppg, fanning_pressure_loss_psi,
    hydraulic_horsepower as hhp, hydrostatic_pressure_psi, pipe_velocity_ft_s, reynolds_number,
};
use crate::errors::{check_finite, WellError, WellResult};
use crate::units::{
    Area, Density, Depth, Diameter, FlowRate, Length, Power, Pressure, Time, Velocity, Viscosity, Volume,
};
use crate::wellbore::DepthSegment;

/// Absolute roughness of commercial steel pipe (in)
pub const DEFAULT_PIPE_ROUGHNESS_IN: f64 = 0.0018;

/// Gallons per barrel
const GAL_PER_BBL: f64 = 42.0;

/// Drilling fluid treated as Newtonian with a constant viscosity.
///
/// ## JSON Example
///
/// ```json
/// {
///   "density": { "value": 10.5, "unit": "ppg" },
///   "viscosity": { "value": 25.0, "unit": "cP" }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrillingFluid {
    pub density: Density,
    pub viscosity: Viscosity,
}

impl DrillingFluid {
    pub fn new(density: Density, viscosity: Viscosity) -> Self {
        DrillingFluid { density, viscosity }
    }

    pub fn validate(&self) -> WellResult<()> {
        if self.density.ppg() <= 0.0 {
            return Err(WellError::invalid_input(
                "fluid.density",
                self.density.to_string(),
                "Fluid density must be positive",
            ));
        }
        if self.viscosity.cp() <= 0.0 {
            return Err(WellError::invalid_input(
                "fluid.viscosity",
                self.viscosity.to_string(),
                "Fluid viscosity must be positive",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Hydrostatics
// ============================================================================

/// Hydrostatic pressure of a fluid column: `P = 0.052 × MW × TVD`.
pub fn hydrostatic_pressure(mud_weight: &Density, depth: &Depth) -> WellResult<Pressure> {
    if depth.ft() < 0.0 {
        return Err(WellError::invalid_input(
            "depth",
            depth.to_string(),
            "Depth cannot be negative",
        ));
    }
    let psi = check_finite(hydrostatic_pressure_psi(mud_weight.ppg(), depth.ft()), "hydrostatic_pressure")?;
    Ok(Pressure::from_psi(psi))
}

/// Equivalent circulating density: `ECD = MW + APL / (0.052 × TVD)`.
pub fn ecd(static_mw: &Density, annular_pressure_loss: &Pressure, tvd: &Depth) -> WellResult<Density> {
    if tvd.ft() <= 0.0 {
        return Err(WellError::calculation(
            "tvd",
            format!("TVD must be positive to compute ECD, got {tvd}"),
        ));
    }
    let ppg = check_finite(ecd_ppg(static_mw.ppg(), annular_pressure_loss.psi(), tvd.ft()), "ecd")?;
    Ok(Density::from_ppg(ppg))
}

// ============================================================================
// Velocities
// ============================================================================

/// Mean velocity inside a pipe: `v = Q / (2.448 × d²)`.
pub fn pipe_velocity(flow_rate: &FlowRate, inner_diameter: &Diameter) -> WellResult<Velocity> {
    let d = require_positive(inner_diameter.inches(), "diameter")?;
    Velocity::new(pipe_velocity_ft_s(flow_rate.gpm(), d), "ft/s")
}

/// Annular velocity from the annular flow area:
/// `v = (Q × 144) / (A × 7.48052)`.
pub fn annular_velocity(flow_rate: &FlowRate, annular_area: &Area) -> WellResult<Velocity> {
    let area = require_positive(annular_area.in2(), "annular_area")?;
    Ok(Velocity::from_ft_per_min(annular_velocity_ft_min(flow_rate.gpm(), area)))
}

/// Annular velocity from the bore and the string OD (`≈ 24.51 Q / (D² − d²)`).
pub fn annular_velocity_from_diameters(
    flow_rate: &FlowRate,
    outer_bore: &Diameter,
    string_od: &Diameter,
) -> WellResult<Velocity> {
    let area = circle_area_in2(outer_bore.inches()) - circle_area_in2(string_od.inches());
    annular_velocity(flow_rate, &Area::from_in2(area))
}

// ============================================================================
// Friction losses
// ============================================================================

/// Frictional pressure loss inside a pipe with default steel roughness.
pub fn friction_pressure_loss(
    flow_rate: &FlowRate,
    length: &Length,
    diameter: &Diameter,
    density: &Density,
    viscosity: &Viscosity,
) -> WellResult<Pressure> {
    friction_pressure_loss_with_roughness(
        flow_rate,
        length,
        diameter,
        density,
        viscosity,
        &Diameter::from_inches(DEFAULT_PIPE_ROUGHNESS_IN),
    )
}

/// Frictional pressure loss inside a pipe with explicit absolute roughness.
///
/// Reynolds number from `Re = 928 ρ v d / μ`, friction factor from
/// [`friction::friction_factor`], loss from the Fanning equation.
pub fn friction_pressure_loss_with_roughness(
    flow_rate: &FlowRate,
    length: &Length,
    diameter: &Diameter,
    density: &Density,
    viscosity: &Viscosity,
    roughness: &Diameter,
) -> WellResult<Pressure> {
    let d = require_positive(diameter.inches(), "diameter")?;
    let v = pipe_velocity_ft_s(flow_rate.gpm(), d);
    fanning_loss(v, d, length, density, viscosity, roughness.inches() / d)
}

/// Frictional pressure loss in an annulus, using the hydraulic diameter
/// `D − d` for the Reynolds number and the Fanning equation.
pub fn annular_friction_pressure_loss(
    flow_rate: &FlowRate,
    length: &Length,
    outer_bore: &Diameter,
    string_od: &Diameter,
    density: &Density,
    viscosity: &Viscosity,
) -> WellResult<Pressure> {
    let (big, small) = (outer_bore.inches(), string_od.inches());
    let hydraulic = require_positive(big - small, "hydraulic_diameter")?;
    // Velocity over the true annular area, v = Q / (2.448 (D² − d²))
    let v = flow_rate.gpm() / (PIPE_VELOCITY_CONSTANT * (big * big - small * small));
    fanning_loss(
        v,
        hydraulic,
        length,
        density,
        viscosity,
        DEFAULT_PIPE_ROUGHNESS_IN / hydraulic,
    )
}

fn fanning_loss(
    v_ft_s: f64,
    d_in: f64,
    length: &Length,
    density: &Density,
    viscosity: &Viscosity,
    relative_roughness: f64,
) -> WellResult<Pressure> {
    if v_ft_s == 0.0 || length.ft() == 0.0 {
        return Ok(Pressure::zero());
    }
    let mu = require_positive(viscosity.cp(), "viscosity")?;
    let rho = require_positive(density.ppg(), "density")?;
    let re = check_finite(
        reynolds_number(rho, v_ft_s.abs(), d_in, mu),
        "reynolds_number",
    )?;
    let f = friction::friction_factor(re, relative_roughness)?;
    let psi = fanning_pressure_loss_psi(f, rho, v_ft_s, length.ft(), d_in);
    Ok(Pressure::from_psi(check_finite(psi, "friction_pressure_loss")?))
}

/// Pressure losses of one decomposed segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentLoss {
    pub start_depth: Depth,
    pub end_depth: Depth,
    pub string_loss: Pressure,
    pub annular_loss: Pressure,
    pub annular_velocity: Velocity,
}

/// String and annulus friction losses over a decomposed wellbore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CirculatingLosses {
    pub flow_rate: FlowRate,
    pub segments: Vec<SegmentLoss>,
    pub string_loss: Pressure,
    /// Annular pressure loss (APL), the ECD input
    pub annular_loss: Pressure,
}

impl CirculatingLosses {
    /// String + annulus
    pub fn total(&self) -> Pressure {
        self.string_loss + self.annular_loss
    }
}

/// Sum string and annular friction losses over decomposed segments.
pub fn circulating_pressure_losses(
    segments: &[DepthSegment],
    fluid: &DrillingFluid,
    flow_rate: &FlowRate,
) -> WellResult<CirculatingLosses> {
    fluid.validate()?;
    let mut losses = Vec::with_capacity(segments.len());
    let (mut string_total, mut annular_total) = (0.0, 0.0);

    for segment in segments {
        let (string_od, string_id) = match (segment.string_od, segment.string_id) {
            (Some(od), Some(id)) => (od, id),
            _ => continue,
        };
        let length = segment.length();
        let string_loss =
            friction_pressure_loss(flow_rate, &length, &string_id, &fluid.density, &fluid.viscosity)?;
        let annular_loss = annular_friction_pressure_loss(
            flow_rate,
            &length,
            &segment.outer_bore,
            &string_od,
            &fluid.density,
            &fluid.viscosity,
        )?;
        let velocity = annular_velocity_from_diameters(flow_rate, &segment.outer_bore, &string_od)?;

        string_total += string_loss.psi();
        annular_total += annular_loss.psi();
        losses.push(SegmentLoss {
            start_depth: segment.start_depth,
            end_depth: segment.end_depth,
            string_loss,
            annular_loss,
            annular_velocity: velocity,
        });
    }

    debug!(
        flowing_segments = losses.len(),
        string_loss_psi = string_total,
        annular_loss_psi = annular_total,
        "circulating pressure losses"
    );
    Ok(CirculatingLosses {
        flow_rate: *flow_rate,
        segments: losses,
        string_loss: Pressure::from_psi(string_total),
        annular_loss: Pressure::from_psi(annular_total),
    })
}

// ============================================================================
// Bit hydraulics and circulation times
// ============================================================================

/// Total flow area of a set of bit nozzles
pub fn total_flow_area(nozzles: &[Diameter]) -> Area {
    Area::from_in2(nozzles.iter().map(|d| circle_area_in2(d.inches())).sum())
}

/// Pressure drop across the bit: `ΔP = MW × Q² / (12031 × TFA²)`.
pub fn bit_pressure_drop(mud_weight: &Density, flow_rate: &FlowRate, tfa: &Area) -> WellResult<Pressure> {
    let area = require_positive(tfa.in2(), "tfa")?;
    Ok(Pressure::from_psi(bit_pressure_drop_psi(mud_weight.ppg(), flow_rate.gpm(), area)))
}

/// Hydraulic horsepower: `HHP = P × Q / 1714`.
pub fn hydraulic_horsepower(pressure: &Pressure, flow_rate: &FlowRate) -> Power {
    Power::from_hp(hhp(pressure.psi(), flow_rate.gpm()))
}

/// Time to pump a volume at a flow rate: `t = V (bbl) / Q (bbl/min)`.
pub fn circulation_time(volume: &Volume, flow_rate: &FlowRate) -> WellResult<Time> {
    let gpm = require_positive(flow_rate.gpm(), "flow_rate")?;
    Ok(Time::from_minutes(volume.bbl() / (gpm / GAL_PER_BBL)))
}

/// Time for fluid at the bit to reach surface through the annulus.
pub fn bottoms_up_time(annular_volume: &Volume, flow_rate: &FlowRate) -> WellResult<Time> {
    circulation_time(annular_volume, flow_rate)
}

/// Surface-to-surface time: down the string and back up the annulus.
pub fn total_circulation_time(
    string_volume: &Volume,
    annular_volume: &Volume,
    flow_rate: &FlowRate,
) -> WellResult<Time> {
    circulation_time(&(*string_volume + *annular_volume), flow_rate)
}

fn require_positive(value: f64, parameter: &str) -> WellResult<f64> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(WellError::calculation(
            parameter,
            format!("{parameter} must be positive, got {value}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wellbore::{decompose_geometry, WellboreBody};

    fn gpm(v: f64) -> FlowRate {
        FlowRate::from_gpm(v)
    }

    fn mud() -> DrillingFluid {
        DrillingFluid::new(Density::from_ppg(10.0), Viscosity::from_cp(20.0))
    }

    #[test]
    fn test_hydrostatic_pressure() {
        let p = hydrostatic_pressure(&Density::from_ppg(12.5), &Depth::from_ft(10_000.0)).unwrap();
        assert_eq!(p.psi(), 6500.0);
        assert_eq!(p.unit(), "psi");

        let metric = hydrostatic_pressure(
            &Density::new(1.5, "sg").unwrap(),
            &Depth::new(3000.0, "m").unwrap(),
        )
        .unwrap();
        assert!(metric.psi() > 6000.0);
        assert!(hydrostatic_pressure(&Density::from_ppg(10.0), &Depth::from_ft(-1.0)).is_err());
    }

    #[test]
    fn test_ecd() {
        let e = ecd(&Density::from_ppg(10.0), &Pressure::from_psi(260.0), &Depth::from_ft(10_000.0)).unwrap();
        assert!((e.ppg() - 10.5).abs() < 1e-12);
    }

    #[test]
    fn test_ecd_zero_tvd_names_parameter() {
        let err = ecd(&Density::from_ppg(10.0), &Pressure::from_psi(100.0), &Depth::zero()).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_ERROR");
        assert!(err.to_string().contains("'tvd'"));
    }

    #[test]
    fn test_annular_velocity() {
        // 8.5" hole, 5" pipe, 400 gpm: 24.51 × 400 / (72.25 − 25)
        let v = annular_velocity_from_diameters(&gpm(400.0), &Diameter::from_inches(8.5), &Diameter::from_inches(5.0))
            .unwrap();
        assert!((v.ft_per_min() - 207.5).abs() < 0.1);
        assert!(annular_velocity(&gpm(400.0), &Area::zero()).is_err());
    }

    #[test]
    fn test_pipe_velocity() {
        let v = pipe_velocity(&gpm(400.0), &Diameter::from_inches(4.276)).unwrap();
        assert!((v.value_in("ft/s").unwrap() - 8.9366).abs() < 1e-3);
        let err = pipe_velocity(&gpm(400.0), &Diameter::zero()).unwrap_err();
        assert!(err.to_string().contains("diameter"));
    }

    #[test]
    fn test_friction_pressure_loss() {
        // 400 gpm through 1000 ft of 4.276" ID, 10 ppg, 20 cP: Re ≈ 17,700
        let dp = friction_pressure_loss(
            &gpm(400.0),
            &Length::from_ft(1000.0),
            &Diameter::from_inches(4.276),
            &Density::from_ppg(10.0),
            &Viscosity::from_cp(20.0),
        )
        .unwrap();
        assert!((dp.psi() - 49.78).abs() < 0.1);
    }

    #[test]
    fn test_friction_loss_zero_diameter() {
        let err = friction_pressure_loss(
            &gpm(400.0),
            &Length::from_ft(1000.0),
            &Diameter::zero(),
            &Density::from_ppg(10.0),
            &Viscosity::from_cp(20.0),
        )
        .unwrap_err();
        assert!(err.to_string().contains("diameter"));
    }

    #[test]
    fn test_no_flow_no_loss() {
        let dp = friction_pressure_loss(
            &gpm(0.0),
            &Length::from_ft(1000.0),
            &Diameter::from_inches(4.276),
            &Density::from_ppg(10.0),
            &Viscosity::from_cp(20.0),
        )
        .unwrap();
        assert_eq!(dp.psi(), 0.0);
    }

    #[test]
    fn test_laminar_annulus_loss() {
        // Slow flow in a wide annulus stays laminar: f = 16/Re gives
        // ΔP proportional to velocity
        let loss = |q: f64| {
            annular_friction_pressure_loss(
                &gpm(q),
                &Length::from_ft(1000.0),
                &Diameter::from_inches(12.25),
                &Diameter::from_inches(5.0),
                &Density::from_ppg(10.0),
                &Viscosity::from_cp(40.0),
            )
            .unwrap()
            .psi()
        };
        let ratio = loss(100.0) / loss(50.0);
        assert!((ratio - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_annular_loss_requires_clearance() {
        let err = annular_friction_pressure_loss(
            &gpm(400.0),
            &Length::from_ft(100.0),
            &Diameter::from_inches(5.0),
            &Diameter::from_inches(5.0),
            &Density::from_ppg(10.0),
            &Viscosity::from_cp(20.0),
        )
        .unwrap_err();
        assert!(err.to_string().contains("hydraulic_diameter"));
    }

    #[test]
    fn test_circulating_losses_skip_below_bit() {
        let bodies = vec![
            WellboreBody::casing("csg", Diameter::from_inches(9.625), Diameter::from_inches(8.835), Depth::zero(), Depth::from_ft(5000.0)),
            WellboreBody::open_hole("oh", Diameter::from_inches(8.5), Depth::from_ft(5000.0), Depth::from_ft(10_000.0)),
            WellboreBody::component("dp", Diameter::from_inches(5.0), Diameter::from_inches(4.276), Depth::zero(), Depth::from_ft(9500.0)),
        ];
        let segments = decompose_geometry(&bodies).unwrap();
        let losses = circulating_pressure_losses(&segments, &mud(), &gpm(400.0)).unwrap();
        assert_eq!(losses.segments.len(), 2);
        assert!(losses.string_loss.psi() > losses.annular_loss.psi());
        assert!(losses.annular_loss.psi() > 0.0);
        assert!((losses.total().psi() - losses.string_loss.psi() - losses.annular_loss.psi()).abs() < 1e-9);

        // String loss matches the single-pipe calculation over 9500 ft
        let direct = friction_pressure_loss(
            &gpm(400.0),
            &Length::from_ft(9500.0),
            &Diameter::from_inches(4.276),
            &Density::from_ppg(10.0),
            &Viscosity::from_cp(20.0),
        )
        .unwrap();
        assert!((losses.string_loss.psi() - direct.psi()).abs() < 1e-6);
    }

    #[test]
    fn test_bit_pressure_drop_and_hhp() {
        let tfa = total_flow_area(&[Diameter::new(12.0 / 32.0, "in").unwrap(); 3]);
        assert!((tfa.in2() - 0.3313).abs() < 1e-4);
        let dp = bit_pressure_drop(&Density::from_ppg(10.0), &gpm(400.0), &tfa).unwrap();
        assert!(dp.psi() > 1000.0);
        let hp = hydraulic_horsepower(&Pressure::from_psi(1714.0), &gpm(400.0));
        assert_eq!(hp.hp(), 400.0);
        assert!(bit_pressure_drop(&Density::from_ppg(10.0), &gpm(400.0), &Area::zero()).is_err());
    }

    #[test]
    fn test_bottoms_up_time() {
        // 420 bbl at 420 gpm (10 bbl/min) takes 42 minutes
        let t = bottoms_up_time(&Volume::from_bbl(420.0), &gpm(420.0)).unwrap();
        assert!((t.minutes() - 42.0).abs() < 1e-12);
        let total = total_circulation_time(&Volume::from_bbl(100.0), &Volume::from_bbl(320.0), &gpm(420.0)).unwrap();
        assert!((total.minutes() - 42.0).abs() < 1e-12);
        let err = bottoms_up_time(&Volume::from_bbl(420.0), &gpm(0.0)).unwrap_err();
        assert!(err.to_string().contains("flow_rate"));
    }
}
