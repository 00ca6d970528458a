//! # Business Rules and Score Scaling
//!
//! Post-model adjustments applied to the raw store prediction, in order:
//!
//! 1. more than [`COMPETITOR_THRESHOLD`] competitors: multiply by
//!    [`COMPETITION_PENALTY`];
//! 2. an `Urban` area: multiply by [`URBAN_PREMIUM`].
//!
//! The two are independent and compound. The adjusted value is then clamped
//! to `[SCORE_FLOOR, SCORE_CEILING]` and mapped linearly onto `[0, 1000]`.

use rscore_core::AreaType;

/// Competitor count above which the penalty applies.
pub const COMPETITOR_THRESHOLD: u32 = 15;

/// Multiplier for saturated markets.
pub const COMPETITION_PENALTY: f64 = 0.90;

/// Multiplier for urban locations.
pub const URBAN_PREMIUM: f64 = 1.08;

/// Raw predictions at or below this map to a score of 0.
pub const SCORE_FLOOR: f64 = 200.0;

/// Raw predictions at or above this map to a score of 1000.
pub const SCORE_CEILING: f64 = 1200.0;

/// Apply the competition penalty and urban premium to a raw prediction.
pub fn apply_business_rules(raw: f64, competitors: u32, area_type: &AreaType) -> f64 {
    let mut adjusted = raw;
    if competitors > COMPETITOR_THRESHOLD {
        adjusted *= COMPETITION_PENALTY;
    }
    if area_type.is_urban() {
        adjusted *= URBAN_PREMIUM;
    }
    adjusted
}

/// Clamp to `[200, 1200]`, map onto `[0, 1000]`, round to 2 decimals.
///
/// A NaN prediction carries no ordering information and maps to the floor.
pub fn scale_to_1000(raw: f64) -> f64 {
    if raw.is_nan() {
        return 0.0;
    }
    let clamped = raw.clamp(SCORE_FLOOR, SCORE_CEILING);
    round2((clamped - SCORE_FLOOR) / (SCORE_CEILING - SCORE_FLOOR) * 1000.0)
}

/// Round to 2 decimal places.
///
/// Goes through the shortest exact decimal expansion, so ties are decided on
/// the stored binary value (`2.675` rounds down because it is stored just
/// below the midpoint).
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.2}").parse().unwrap_or(value)
}
