//! Unit registry: per-kind conversion tables.
//!
//! Every kind maps unit symbols to a conversion relative to one base unit.
//! Linear kinds use a single multiplicative factor; temperature uses an
//! affine `(value + offset) * scale` mapping onto kelvin.
//!
//! The registry is built once, on first access through
//! [`UnitRegistry::global`], and never mutated afterwards.

use std::collections::HashMap;
use std::f64::consts::PI;

use once_cell::sync::Lazy;

use super::QuantityKind;
use crate::errors::{WellError, WellResult};

// ============================================================================
// Exact conversion constants
// ============================================================================

const FT_PER_M: f64 = 1.0 / 0.3048;
const IN_PER_M: f64 = 1.0 / 0.0254;
const LB_PER_KG: f64 = 1.0 / 0.453_592_37;
const LBF_PER_N: f64 = 1.0 / 4.448_221_615_260_5;
const GAL_PER_FT3: f64 = 1728.0 / 231.0;
const GAL_PER_BBL: f64 = 42.0;
const M3_PER_GAL: f64 = 0.003_785_411_784;
const BBL_PER_M3: f64 = 1.0 / (M3_PER_GAL * GAL_PER_BBL);
const PSI_PER_PA: f64 = 1.0 / 6_894.757_293_168_361;
const W_PER_HP: f64 = 745.699_871_582_270_2;

/// How a unit maps onto its kind's base unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Conversion {
    /// `base = value * factor`
    Factor(f64),
    /// `base = (value + offset) * scale`; used for temperature scales
    Affine { scale: f64, offset: f64 },
}

impl Conversion {
    pub fn to_base(self, value: f64) -> f64 {
        match self {
            Conversion::Factor(factor) => value * factor,
            Conversion::Affine { scale, offset } => (value + offset) * scale,
        }
    }

    pub fn from_base(self, base: f64) -> f64 {
        match self {
            Conversion::Factor(factor) => base / factor,
            Conversion::Affine { scale, offset } => base / scale - offset,
        }
    }

    pub fn is_identity(self) -> bool {
        match self {
            Conversion::Factor(factor) => factor == 1.0,
            Conversion::Affine { scale, offset } => scale == 1.0 && offset == 0.0,
        }
    }
}

/// One unit of a kind.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitDef {
    /// Canonical symbol used for display and serialization
    pub symbol: &'static str,
    /// Alternative spellings accepted on input
    pub aliases: &'static [&'static str],
    pub conversion: Conversion,
}

impl UnitDef {
    const fn factor(symbol: &'static str, factor: f64) -> Self {
        UnitDef {
            symbol,
            aliases: &[],
            conversion: Conversion::Factor(factor),
        }
    }

    const fn aliased(symbol: &'static str, aliases: &'static [&'static str], factor: f64) -> Self {
        UnitDef {
            symbol,
            aliases,
            conversion: Conversion::Factor(factor),
        }
    }

    fn matches(&self, unit: &str) -> bool {
        self.symbol == unit || self.aliases.contains(&unit)
    }
}

/// Conversion tables for every [`QuantityKind`].
#[derive(Debug)]
pub struct UnitRegistry {
    tables: HashMap<QuantityKind, Vec<UnitDef>>,
}

static REGISTRY: Lazy<UnitRegistry> = Lazy::new(UnitRegistry::standard);

impl UnitRegistry {
    /// The process-wide registry.
    pub fn global() -> &'static UnitRegistry {
        &REGISTRY
    }

    /// Build the standard oilfield/SI registry.
    pub fn standard() -> Self {
        let mut tables = HashMap::new();
        for kind in QuantityKind::ALL {
            tables.insert(kind, standard_table(kind));
        }
        UnitRegistry { tables }
    }

    /// All units of a kind; the base unit is listed first.
    pub fn units(&self, kind: QuantityKind) -> &[UnitDef] {
        self.tables.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Symbol of the kind's base unit.
    pub fn base_unit(&self, kind: QuantityKind) -> &'static str {
        self.units(kind).first().map_or("", |u| u.symbol)
    }

    /// Resolve a symbol or alias to its unit definition.
    pub fn lookup(&self, kind: QuantityKind, unit: &str) -> WellResult<&UnitDef> {
        self.units(kind)
            .iter()
            .find(|def| def.matches(unit))
            .ok_or_else(|| {
                let valid: Vec<&str> = self.units(kind).iter().map(|u| u.symbol).collect();
                WellError::unit(
                    unit,
                    kind.display_name(),
                    format!("expected one of [{}]", valid.join(", ")),
                )
            })
    }

    /// Convert a magnitude in `unit` to the kind's base unit.
    pub fn to_base(&self, kind: QuantityKind, value: f64, unit: &str) -> WellResult<f64> {
        Ok(self.lookup(kind, unit)?.conversion.to_base(value))
    }

    /// Convert a base-unit magnitude to `unit`.
    pub fn from_base(&self, kind: QuantityKind, base: f64, unit: &str) -> WellResult<f64> {
        Ok(self.lookup(kind, unit)?.conversion.from_base(base))
    }

    /// Convert a magnitude between two units of the same kind.
    pub fn convert(&self, kind: QuantityKind, value: f64, from: &str, to: &str) -> WellResult<f64> {
        let from_def = self.lookup(kind, from)?;
        let to_def = self.lookup(kind, to)?;
        if from_def.symbol == to_def.symbol {
            return Ok(value);
        }
        Ok(to_def.conversion.from_base(from_def.conversion.to_base(value)))
    }

    /// Check the table invariants: exactly one base unit per kind, listed
    /// first, and every factor positive and finite.
    pub fn check_invariants(&self) -> WellResult<()> {
        for kind in QuantityKind::ALL {
            let units = self.units(kind);
            let base_count = units.iter().filter(|u| u.conversion.is_identity()).count();
            let first_is_base = units.first().is_some_and(|u| u.conversion.is_identity());
            if base_count != 1 || !first_is_base {
                return Err(WellError::config(format!(
                    "{kind} must have exactly one base unit listed first (found {base_count})"
                )));
            }
            for def in units {
                let positive = match def.conversion {
                    Conversion::Factor(f) => f.is_finite() && f > 0.0,
                    Conversion::Affine { scale, offset } => {
                        scale.is_finite() && scale > 0.0 && offset.is_finite()
                    }
                };
                if !positive {
                    return Err(WellError::config(format!(
                        "{kind} unit '{}' has an invalid conversion",
                        def.symbol
                    )));
                }
            }
        }
        Ok(())
    }
}

fn length_units() -> Vec<UnitDef> {
    vec![
        UnitDef::aliased("ft", &["feet", "foot"], 1.0),
        UnitDef::aliased("m", &["meter", "metre"], FT_PER_M),
        UnitDef::aliased("in", &["inch"], 1.0 / 12.0),
        UnitDef::factor("cm", FT_PER_M / 100.0),
        UnitDef::factor("mm", FT_PER_M / 1000.0),
        UnitDef::factor("km", FT_PER_M * 1000.0),
        UnitDef::factor("yd", 3.0),
    ]
}

fn angle_units() -> Vec<UnitDef> {
    vec![
        UnitDef::aliased("deg", &["°", "degree"], 1.0),
        UnitDef::aliased("rad", &["radian"], 180.0 / PI),
    ]
}

fn standard_table(kind: QuantityKind) -> Vec<UnitDef> {
    match kind {
        QuantityKind::Length | QuantityKind::Depth => length_units(),
        QuantityKind::Diameter => vec![
            UnitDef::aliased("in", &["inch"], 1.0),
            UnitDef::factor("mm", IN_PER_M / 1000.0),
            UnitDef::factor("cm", IN_PER_M / 100.0),
            UnitDef::factor("m", IN_PER_M),
            UnitDef::factor("ft", 12.0),
        ],
        QuantityKind::Angle | QuantityKind::Azimuth | QuantityKind::Inclination => angle_units(),
        QuantityKind::Area => vec![
            UnitDef::aliased("in2", &["sq in"], 1.0),
            UnitDef::aliased("ft2", &["sq ft"], 144.0),
            UnitDef::factor("mm2", IN_PER_M * IN_PER_M / 1.0e6),
            UnitDef::factor("cm2", IN_PER_M * IN_PER_M / 1.0e4),
            UnitDef::factor("m2", IN_PER_M * IN_PER_M),
        ],
        QuantityKind::Volume => vec![
            UnitDef::factor("bbl", 1.0),
            UnitDef::factor("gal", 1.0 / GAL_PER_BBL),
            UnitDef::factor("ft3", GAL_PER_FT3 / GAL_PER_BBL),
            UnitDef::factor("in3", 1.0 / (GAL_PER_BBL * 231.0)),
            UnitDef::factor("m3", BBL_PER_M3),
            UnitDef::aliased("L", &["l"], BBL_PER_M3 / 1000.0),
        ],
        QuantityKind::Weight => vec![
            UnitDef::aliased("lbf", &["lb"], 1.0),
            UnitDef::aliased("klbf", &["klb", "kips"], 1000.0),
            UnitDef::factor("N", LBF_PER_N),
            UnitDef::factor("daN", LBF_PER_N * 10.0),
            UnitDef::factor("kN", LBF_PER_N * 1000.0),
            UnitDef::factor("kgf", LB_PER_KG),
            UnitDef::factor("tonf", LB_PER_KG * 1000.0),
        ],
        QuantityKind::LinearDensity => vec![
            UnitDef::aliased("lb/ft", &["ppf"], 1.0),
            UnitDef::factor("lb/in", 12.0),
            UnitDef::factor("kg/m", LB_PER_KG / FT_PER_M),
        ],
        QuantityKind::Pressure => vec![
            UnitDef::factor("psi", 1.0),
            UnitDef::factor("kpsi", 1000.0),
            UnitDef::factor("Pa", PSI_PER_PA),
            UnitDef::factor("kPa", PSI_PER_PA * 1.0e3),
            UnitDef::factor("MPa", PSI_PER_PA * 1.0e6),
            UnitDef::factor("bar", PSI_PER_PA * 1.0e5),
            UnitDef::factor("atm", PSI_PER_PA * 101_325.0),
        ],
        QuantityKind::Density => vec![
            UnitDef::aliased("ppg", &["lb/gal"], 1.0),
            UnitDef::aliased("lb/ft3", &["pcf"], 1.0 / GAL_PER_FT3),
            UnitDef::factor("kg/m3", LB_PER_KG * M3_PER_GAL),
            UnitDef::aliased("g/cm3", &["sg", "SG"], LB_PER_KG * M3_PER_GAL * 1000.0),
            // Oilfield gradient convention: 0.052 psi/ft per ppg
            UnitDef::factor("psi/ft", 1.0 / 0.052),
        ],
        QuantityKind::Temperature => vec![
            UnitDef {
                symbol: "K",
                aliases: &["kelvin"],
                conversion: Conversion::Affine { scale: 1.0, offset: 0.0 },
            },
            UnitDef {
                symbol: "degC",
                aliases: &["C", "°C"],
                conversion: Conversion::Affine { scale: 1.0, offset: 273.15 },
            },
            UnitDef {
                symbol: "degF",
                aliases: &["F", "°F"],
                conversion: Conversion::Affine { scale: 5.0 / 9.0, offset: 459.67 },
            },
            UnitDef {
                symbol: "degR",
                aliases: &["R", "°R"],
                conversion: Conversion::Affine { scale: 5.0 / 9.0, offset: 0.0 },
            },
        ],
        QuantityKind::Viscosity => vec![
            UnitDef::aliased("cP", &["cp", "mPa.s", "mPa·s"], 1.0),
            UnitDef::aliased("Pa.s", &["Pa·s"], 1000.0),
            UnitDef::factor("P", 100.0),
        ],
        QuantityKind::FlowRate => vec![
            UnitDef::factor("gpm", 1.0),
            UnitDef::aliased("bbl/min", &["bpm"], GAL_PER_BBL),
            UnitDef::factor("bbl/hr", GAL_PER_BBL / 60.0),
            UnitDef::factor("ft3/min", GAL_PER_FT3),
            UnitDef::factor("L/min", 1.0 / (M3_PER_GAL * 1000.0)),
            UnitDef::factor("m3/min", 1.0 / M3_PER_GAL),
            UnitDef::factor("m3/hr", 1.0 / (M3_PER_GAL * 60.0)),
        ],
        QuantityKind::Velocity => vec![
            UnitDef::factor("ft/min", 1.0),
            UnitDef::factor("ft/s", 60.0),
            UnitDef::factor("m/min", FT_PER_M),
            UnitDef::factor("m/s", FT_PER_M * 60.0),
        ],
        QuantityKind::Torque => vec![
            UnitDef::aliased("ft-lbf", &["ft-lb", "ft.lbf"], 1.0),
            UnitDef::aliased("kft-lbf", &["kft-lb"], 1000.0),
            UnitDef::factor("in-lbf", 1.0 / 12.0),
            UnitDef::aliased("N.m", &["N·m", "Nm"], LBF_PER_N * FT_PER_M),
            UnitDef::factor("kN.m", LBF_PER_N * FT_PER_M * 1000.0),
        ],
        QuantityKind::UnitCapacity => vec![
            UnitDef::factor("bbl/ft", 1.0),
            UnitDef::factor("gal/ft", 1.0 / GAL_PER_BBL),
            UnitDef::factor("ft3/ft", GAL_PER_FT3 / GAL_PER_BBL),
            UnitDef::factor("m3/m", BBL_PER_M3 / FT_PER_M),
            UnitDef::factor("L/m", BBL_PER_M3 / 1000.0 / FT_PER_M),
        ],
        QuantityKind::DoglegSeverity => vec![
            UnitDef::factor("deg/100ft", 1.0),
            UnitDef::factor("deg/30m", 100.0 / (30.0 * FT_PER_M)),
            UnitDef::factor("deg/10m", 100.0 / (10.0 * FT_PER_M)),
            UnitDef::factor("deg/ft", 100.0),
        ],
        QuantityKind::Time => vec![
            UnitDef::factor("min", 1.0),
            UnitDef::factor("s", 1.0 / 60.0),
            UnitDef::factor("hr", 60.0),
        ],
        QuantityKind::Power => vec![
            UnitDef::factor("hp", 1.0),
            UnitDef::factor("kW", 1000.0 / W_PER_HP),
            UnitDef::factor("W", 1.0 / W_PER_HP),
        ],
        QuantityKind::Ratio => vec![
            UnitDef::factor("fraction", 1.0),
            UnitDef::factor("%", 0.01),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol * b.abs().max(1.0)
    }

    #[test]
    fn test_standard_registry_invariants() {
        UnitRegistry::standard().check_invariants().unwrap();
    }

    #[test]
    fn test_base_units() {
        let reg = UnitRegistry::global();
        assert_eq!(reg.base_unit(QuantityKind::Depth), "ft");
        assert_eq!(reg.base_unit(QuantityKind::Diameter), "in");
        assert_eq!(reg.base_unit(QuantityKind::Pressure), "psi");
        assert_eq!(reg.base_unit(QuantityKind::Density), "ppg");
        assert_eq!(reg.base_unit(QuantityKind::Temperature), "K");
    }

    #[test]
    fn test_length_conversion() {
        let reg = UnitRegistry::global();
        let ft = reg.convert(QuantityKind::Depth, 1000.0, "m", "ft").unwrap();
        assert!(close(ft, 3280.839_895, 1e-9));
        let inches = reg.convert(QuantityKind::Length, 2.0, "ft", "in").unwrap();
        assert!(close(inches, 24.0, 1e-12));
    }

    #[test]
    fn test_temperature_offsets() {
        let reg = UnitRegistry::global();
        let f = reg.convert(QuantityKind::Temperature, 100.0, "degC", "degF").unwrap();
        assert!(close(f, 212.0, 1e-12));
        let c = reg.convert(QuantityKind::Temperature, 32.0, "degF", "degC").unwrap();
        assert!(c.abs() < 1e-9);
        let k = reg.convert(QuantityKind::Temperature, 0.0, "C", "K").unwrap();
        assert!(close(k, 273.15, 1e-12));
    }

    #[test]
    fn test_oilfield_equivalents() {
        let reg = UnitRegistry::global();
        // 1 bbl/min = 42 gpm
        assert_eq!(reg.convert(QuantityKind::FlowRate, 1.0, "bbl/min", "gpm").unwrap(), 42.0);
        // water: 1 SG is about 8.345 ppg
        let ppg = reg.convert(QuantityKind::Density, 1.0, "sg", "ppg").unwrap();
        assert!(close(ppg, 8.345_404, 1e-6));
        // 1 bar = 14.5038 psi
        let psi = reg.convert(QuantityKind::Pressure, 1.0, "bar", "psi").unwrap();
        assert!(close(psi, 14.503_774, 1e-6));
    }

    #[test]
    fn test_unknown_unit() {
        let err = UnitRegistry::global()
            .lookup(QuantityKind::Pressure, "furlong")
            .unwrap_err();
        assert_eq!(err.error_code(), "UNIT_ERROR");
        assert!(err.to_string().contains("psi"));
    }

    #[test]
    fn test_aliases_resolve_to_canonical_symbol() {
        let reg = UnitRegistry::global();
        assert_eq!(reg.lookup(QuantityKind::Depth, "feet").unwrap().symbol, "ft");
        assert_eq!(reg.lookup(QuantityKind::FlowRate, "bpm").unwrap().symbol, "bbl/min");
        assert_eq!(reg.lookup(QuantityKind::Temperature, "°F").unwrap().symbol, "degF");
    }
}
