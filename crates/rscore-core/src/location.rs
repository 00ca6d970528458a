//! # Location Records
//!
//! One row of the demographic table, keyed by [`Pincode`]. Records are built
//! once when the registry loads and are never mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::pincode::Pincode;

/// Parse a population count cell.
///
/// Accepts plain digits and whole-valued floats (`"500000.0"`). Anything
/// else is rejected with the field name for the error message.
pub fn parse_count(field: &str, raw: &str) -> Result<u64, ValidationError> {
    let trimmed = raw.trim();
    if let Ok(count) = trimmed.parse::<u64>() {
        return Ok(count);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .and_then(whole_non_negative)
        .ok_or_else(|| ValidationError::InvalidCount {
            field: field.to_string(),
            value: raw.to_string(),
        })
}

/// `Some(n)` when `value` is a finite, non-negative whole number that fits in `u64`.
pub(crate) fn whole_non_negative(value: f64) -> Option<u64> {
    // 2^64 as f64; anything at or above it overflows the cast.
    const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value < U64_LIMIT {
        Some(value as u64)
    } else {
        None
    }
}

/// Demographic attributes of one postal code.
///
/// `male_population + female_population` is usually close to
/// `total_population` but the source data does not guarantee it and nothing
/// here enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    /// Lookup key.
    pub pincode: Pincode,
    /// Human-readable place name.
    pub place_name: String,
    /// Total resident population.
    pub total_population: u64,
    /// Male resident population.
    pub male_population: u64,
    /// Female resident population.
    pub female_population: u64,
    /// People per square kilometre, already parsed (see [`crate::parse_density`]).
    pub population_density: f64,
    /// Opaque coordinate string, passed through unvalidated.
    pub coordinates: String,
}

impl LocationRecord {
    /// The record in the shape returned to callers under `demographics`.
    pub fn demographics(&self) -> Demographics {
        Demographics {
            place: self.place_name.clone(),
            total_population: self.total_population,
            male_population: self.male_population,
            female_population: self.female_population,
            population_density: self.population_density,
            coordinates: self.coordinates.clone(),
        }
    }
}

/// Wire shape of a location record inside a prediction response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Demographics {
    pub place: String,
    pub total_population: u64,
    pub male_population: u64,
    pub female_population: u64,
    pub population_density: f64,
    pub coordinates: String,
}
