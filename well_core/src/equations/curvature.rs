//! # Minimum-Curvature Survey Formulas
//!
//! Two survey stations are joined by a circular arc. All angles here are
//! radians unless the name says otherwise.
//!
//! ## Notation
//!
//! - `I1`, `I2` = Inclinations at the upper and lower station
//! - `A1`, `A2` = Azimuths at the upper and lower station
//! - `DL` = Dogleg angle between the two station direction vectors
//! - `RF` = Ratio factor, arc length to chord correction
//! - `ΔMD` = Course length (measured depth difference)

/// Dogleg below which the arc is treated as a straight line
pub const STRAIGHT_LINE_DOGLEG_RAD: f64 = 1e-7;

/// Dogleg angle between two station direction vectors
///
/// # Formula
/// cos(DL) = cos I1 cos I2 + sin I1 sin I2 cos(A2 − A1)
///
/// The cosine is clamped to [-1, 1] before `acos` so rounding overshoot on
/// nearly parallel vectors cannot produce `NaN`. Angles at or below
/// [`STRAIGHT_LINE_DOGLEG_RAD`] are rounding noise and return exactly zero.
#[inline]
pub fn dogleg_angle_rad(i1: f64, a1: f64, i2: f64, a2: f64) -> f64 {
    let cos_dl = i1.cos() * i2.cos() + i1.sin() * i2.sin() * (a2 - a1).cos();
    let dl = cos_dl.clamp(-1.0, 1.0).acos();
    if dl <= STRAIGHT_LINE_DOGLEG_RAD {
        0.0
    } else {
        dl
    }
}

/// Minimum-curvature ratio factor
///
/// # Formula
/// RF = (2 / DL) · tan(DL / 2)   for DL > 1e-7
/// RF = 1                        otherwise (straight hole)
///
/// Tends to 1 as DL → 0 and grows without bound as DL → π.
#[inline]
pub fn ratio_factor(dogleg_rad: f64) -> f64 {
    if dogleg_rad > STRAIGHT_LINE_DOGLEG_RAD {
        2.0 / dogleg_rad * (dogleg_rad / 2.0).tan()
    } else {
        1.0
    }
}

/// Position change over one course
///
/// # Formulas
/// - ΔN   = (ΔMD/2)(sin I1 cos A1 + sin I2 cos A2) · RF
/// - ΔE   = (ΔMD/2)(sin I1 sin A1 + sin I2 sin A2) · RF
/// - ΔTVD = (ΔMD/2)(cos I1 + cos I2) · RF
///
/// # Returns
/// (ΔN, ΔE, ΔTVD) in the units of `course_length`
#[inline]
pub fn min_curvature_deltas(
    course_length: f64,
    i1: f64,
    a1: f64,
    i2: f64,
    a2: f64,
    rf: f64,
) -> (f64, f64, f64) {
    let half = course_length / 2.0 * rf;
    let north = half * (i1.sin() * a1.cos() + i2.sin() * a2.cos());
    let east = half * (i1.sin() * a1.sin() + i2.sin() * a2.sin());
    let tvd = half * (i1.cos() + i2.cos());
    (north, east, tvd)
}

/// Wrap an azimuth change into [-180, 180] degrees so a turn across north
/// is measured the short way round.
#[inline]
pub fn normalize_turn_deg(delta_deg: f64) -> f64 {
    let wrapped = (delta_deg + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 && delta_deg > 0.0 {
        180.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_straight_hole() {
        let i = 30f64.to_radians();
        let a = 45f64.to_radians();
        let dl = dogleg_angle_rad(i, a, i, a);
        assert_eq!(dl, 0.0);
        assert_eq!(ratio_factor(dl), 1.0);
    }

    #[test]
    fn test_ratio_factor_tan_form() {
        let dl = 10f64.to_radians();
        let expected = 2.0 / dl * (dl / 2.0).tan();
        assert_eq!(ratio_factor(dl), expected);
        // Slightly above one for a 10 degree dogleg
        assert!((ratio_factor(dl) - 1.002_546).abs() < 1e-6);
    }

    #[test]
    fn test_pure_build() {
        // 0 -> 90 deg inclination, no azimuth change: DL = 90 deg
        let dl = dogleg_angle_rad(0.0, 0.0, 90f64.to_radians(), 0.0);
        assert!((dl.to_degrees() - 90.0).abs() < 1e-12);
    }

    #[test]
    fn test_vertical_course() {
        let (n, e, v) = min_curvature_deltas(100.0, 0.0, 0.0, 0.0, 0.0, 1.0);
        assert_eq!(n, 0.0);
        assert_eq!(e, 0.0);
        assert_eq!(v, 100.0);
    }

    #[test]
    fn test_normalize_turn() {
        assert_eq!(normalize_turn_deg(350.0), -10.0);
        assert_eq!(normalize_turn_deg(-350.0), 10.0);
        assert_eq!(normalize_turn_deg(180.0), 180.0);
        assert_eq!(normalize_turn_deg(-180.0), -180.0);
        assert_eq!(normalize_turn_deg(45.0), 45.0);
    }

    proptest! {
        // The chord between stations never exceeds the arc length
        #[test]
        fn prop_displacement_within_course_length(
            cl in 1.0f64..500.0,
            i1 in 0.0f64..80.0,
            a1 in 0.0f64..360.0,
            i2 in 0.0f64..80.0,
            a2 in 0.0f64..360.0,
        ) {
            let (i1, a1, i2, a2) = (i1.to_radians(), a1.to_radians(), i2.to_radians(), a2.to_radians());
            let rf = ratio_factor(dogleg_angle_rad(i1, a1, i2, a2));
            let (n, e, v) = min_curvature_deltas(cl, i1, a1, i2, a2, rf);
            let chord = (n * n + e * e + v * v).sqrt();
            prop_assert!(chord <= cl * (1.0 + 1e-9));
            prop_assert!(v > 0.0);
        }
    }
}
