//! # Capacity and Tubular Section Formulas
//!
//! ## Notation
//!
//! - `D` = Outer bore (casing/liner inner diameter or hole size), in
//! - `d` = Inner body outer diameter, in
//! - `ID` = Pipe inner diameter, in
//! - `OD` = Pipe outer diameter, in

use std::f64::consts::PI;

use super::CAPACITY_CONSTANT;

/// Internal capacity of a pipe or open bore
///
/// # Formula
/// C = ID² / 1029.4  (bbl/ft)
///
/// # Example
/// ```rust
/// use well_core::equations::capacity::pipe_capacity_bbl_per_ft;
///
/// // 8.835" ID (9-5/8" 40 ppf casing)
/// let cap = pipe_capacity_bbl_per_ft(8.835);
/// assert!((cap - 0.07583).abs() < 1e-4);
/// ```
#[inline]
pub fn pipe_capacity_bbl_per_ft(id_in: f64) -> f64 {
    id_in * id_in / CAPACITY_CONSTANT
}

/// Capacity of the annulus between an outer bore and an inner body
///
/// ```text
///   │   │▓▓▓▓▓│   │
///   │   │▓▓▓▓▓│   │
///   │←D─────────→│
///       │← d →│
/// ```
///
/// # Formula
/// C = (D² − d²) / 1029.4  (bbl/ft)
#[inline]
pub fn annular_capacity_bbl_per_ft(outer_id_in: f64, inner_od_in: f64) -> f64 {
    (outer_id_in * outer_id_in - inner_od_in * inner_od_in) / CAPACITY_CONSTANT
}

/// Area of a circle in in²
///
/// # Formula
/// A = π d² / 4
#[inline]
pub fn circle_area_in2(d_in: f64) -> f64 {
    PI * d_in * d_in / 4.0
}

/// Second moment of area of a tubular about its axis
///
/// # Formula
/// I = π (OD⁴ − ID⁴) / 64  (in⁴)
///
/// # Example
/// ```rust
/// use well_core::equations::capacity::tubular_moment_of_inertia_in4;
///
/// // 5" x 4.276" drill pipe
/// let i = tubular_moment_of_inertia_in4(5.0, 4.276);
/// assert!((i - 14.269).abs() < 0.01);
/// ```
#[inline]
pub fn tubular_moment_of_inertia_in4(od_in: f64, id_in: f64) -> f64 {
    PI * (od_in.powi(4) - id_in.powi(4)) / 64.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annular_capacity() {
        // 12-1/4" hole with 5" drill pipe: (150.0625 - 25) / 1029.4
        let cap = annular_capacity_bbl_per_ft(12.25, 5.0);
        assert!((cap - 0.121_49).abs() < 1e-4);
    }

    #[test]
    fn test_annulus_without_inner_body_matches_pipe_capacity() {
        assert_eq!(annular_capacity_bbl_per_ft(8.5, 0.0), pipe_capacity_bbl_per_ft(8.5));
    }

    #[test]
    fn test_circle_area() {
        assert!((circle_area_in2(2.0) - PI).abs() < 1e-12);
    }
}
