//! Percentage and composite-score arithmetic.
//!
//! All rounding here is round-half-to-even. Most languages default to
//! round-half-away-from-zero, which drifts test fixtures by one point on
//! exact halves; ties-to-even keeps the numeric output reproducible
//! across implementations.

/// Saturation point for the join-count factor: 10+ suspicious joins
/// score the full 40 points.
const JOIN_COUNT_SATURATION: f64 = 10.0;

/// Saturation point for the join-rate factor: a 50%+ join rate scores
/// the full 30 points.
const JOIN_RATE_SATURATION: f64 = 50.0;

/// Weight of the join-count factor.
const JOIN_COUNT_WEIGHT: f64 = 40.0;

/// Weight of the join-rate factor.
const JOIN_RATE_WEIGHT: f64 = 30.0;

/// Weight of the target-consistency factor.
const CONSISTENCY_WEIGHT: f64 = 30.0;

/// Round to the nearest integer, ties to even, clamped at zero.
pub fn round_half_even(value: f64) -> u32 {
    let rounded = value.round_ties_even();
    if rounded <= 0.0 {
        0
    } else {
        rounded as u32
    }
}

/// `part / whole` as a rounded percentage; 0 when `whole` is 0.
pub fn percentage(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    round_half_even(part as f64 / whole as f64 * 100.0)
}

/// Composite suspicion score in [0, 100].
///
/// Volume, rate, and concentration-on-one-victim are independent
/// signals; each factor is clamped to its cap before summing so no
/// single extreme factor can produce a maximal score alone. The 40/30/30
/// weighting makes sheer join volume the strongest signal.
///
/// The percentage inputs are the already-rounded profile values, so the
/// score is a pure function of what the profile displays.
pub fn composite_score(
    join_after_count: u64,
    join_after_percentage: u32,
    target_consistency: u32,
) -> u32 {
    let join_count_factor =
        (join_after_count as f64 / JOIN_COUNT_SATURATION).min(1.0) * JOIN_COUNT_WEIGHT;
    let join_rate_factor =
        (join_after_percentage as f64 / JOIN_RATE_SATURATION).min(1.0) * JOIN_RATE_WEIGHT;
    let consistency_factor =
        (target_consistency as f64 / 100.0).min(1.0) * CONSISTENCY_WEIGHT;

    round_half_even(join_count_factor + join_rate_factor + consistency_factor)
}
