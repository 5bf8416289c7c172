//! Numeric conversion helpers used by the rotation logic.
//!
//! Headings are compared as whole degrees. These helpers round and convert
//! while keeping the casts in one audited place.

/// Round to the nearest whole number (half away from zero) and convert to
/// `i64`, saturating at the `i64` bounds.
///
/// Non-finite inputs map to zero so a degenerate heading never produces a
/// turn.
///
/// # Examples
/// ```
/// use tank_ai::numeric::round_to_i64;
/// assert_eq!(round_to_i64(44.5), 45);
/// assert_eq!(round_to_i64(-0.4), 0);
/// assert_eq!(round_to_i64(f32::NAN), 0);
/// ```
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    reason = "The value is rounded and clamped to the i64 domain before casting."
)]
#[must_use]
pub fn round_to_i64(value: f32) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    let rounded = f64::from(value).round();
    rounded.clamp(i64::MIN as f64, i64::MAX as f64) as i64
}

/// Convert a whole number of degrees back into `f32`.
#[expect(
    clippy::cast_precision_loss,
    reason = "Turn steps are small whole degrees well within f32 precision."
)]
#[must_use]
pub const fn degrees_to_f32(degrees: i64) -> f32 {
    degrees as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.49, 0)]
    #[case(0.5, 1)]
    #[case(-0.5, -1)]
    #[case(359.6, 360)]
    #[case(f32::INFINITY, 0)]
    fn rounds_half_away_from_zero(#[case] input: f32, #[case] expected: i64) {
        assert_eq!(round_to_i64(input), expected);
    }

    #[rstest]
    fn whole_degrees_round_trip() {
        assert!((degrees_to_f32(3) - 3.0).abs() < f32::EPSILON);
    }
}
