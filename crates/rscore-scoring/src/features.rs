//! # Feature Contract
//!
//! The fitted artifacts were trained against fixed, named columns. The
//! names below are those training columns verbatim, misspellings included,
//! because the artifacts match on them.
//!
//! ## Store model input (`MODEL_FEATURES`)
//!
//! | # | Column | Source |
//! |---|--------|--------|
//! | 0 | `total_population` | registry |
//! | 1 | `male_population` | registry |
//! | 2 | `population_density` | registry |
//! | 3 | `area_type_encoded` | request, encoded |
//! | 4 | `shop_size` | request `shoe_size`, encoded |
//! | 5 | `Stoks availabity` | request `stock_availability` |
//! | 6 | `employee_count` | request |
//! | 7 | `Competitors` | request `competitors` |
//! | 8 | `market_score` | market scorer |
//!
//! `female_population` feeds only the market scaler.

use rscore_core::{LocationRecord, PredictionRequest};

/// Width of the store model input.
pub const FEATURE_COUNT: usize = 9;

/// Store model columns in locked order.
pub const MODEL_FEATURES: [&str; FEATURE_COUNT] = [
    "total_population",
    "male_population",
    "population_density",
    "area_type_encoded",
    "shop_size",
    "Stoks availabity",
    "employee_count",
    "Competitors",
    "market_score",
];

/// Columns the market scaler may be fit on.
pub const MARKET_FEATURES: [&str; 5] = [
    "total_population",
    "male_population",
    "female_population",
    "population_density",
    "area_type_encoded",
];

/// Demographic and area inputs to the market scorer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketFeatures {
    pub total_population: f64,
    pub male_population: f64,
    pub female_population: f64,
    pub population_density: f64,
    pub area_type_encoded: f64,
}

impl MarketFeatures {
    pub fn new(location: &LocationRecord, area_type_encoded: u8) -> Self {
        Self {
            total_population: location.total_population as f64,
            male_population: location.male_population as f64,
            female_population: location.female_population as f64,
            population_density: location.population_density,
            area_type_encoded: f64::from(area_type_encoded),
        }
    }

    /// Value of a named market column, or `None` for a name outside
    /// [`MARKET_FEATURES`].
    pub fn get(&self, column: &str) -> Option<f64> {
        match column {
            "total_population" => Some(self.total_population),
            "male_population" => Some(self.male_population),
            "female_population" => Some(self.female_population),
            "population_density" => Some(self.population_density),
            "area_type_encoded" => Some(self.area_type_encoded),
            _ => None,
        }
    }
}

/// The full store model input, one named field per [`MODEL_FEATURES`] entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoreFeatures {
    pub total_population: f64,
    pub male_population: f64,
    pub population_density: f64,
    pub area_type_encoded: f64,
    pub shop_size: f64,
    pub stock_availability: f64,
    pub employee_count: f64,
    pub competitors: f64,
    pub market_score: f64,
}

impl StoreFeatures {
    /// Assemble the store input from a market row, the request, and the
    /// already computed market score.
    pub fn new(market: &MarketFeatures, request: &PredictionRequest, market_score: f64) -> Self {
        Self {
            total_population: market.total_population,
            male_population: market.male_population,
            population_density: market.population_density,
            area_type_encoded: market.area_type_encoded,
            shop_size: request.shop_size.encoded(),
            stock_availability: request.stock_availability,
            employee_count: f64::from(request.employee_count),
            competitors: f64::from(request.competitors),
            market_score,
        }
    }

    /// The vector in [`MODEL_FEATURES`] order.
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.total_population,
            self.male_population,
            self.population_density,
            self.area_type_encoded,
            self.shop_size,
            self.stock_availability,
            self.employee_count,
            self.competitors,
            self.market_score,
        ]
    }
}

/// Position of a store column in [`MODEL_FEATURES`].
pub fn model_feature_index(column: &str) -> Option<usize> {
    MODEL_FEATURES.iter().position(|c| *c == column)
}
