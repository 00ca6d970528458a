//! # Category Inputs and Feature Encoders
//!
//! `area_type` and `shoe_size` are free-form on the wire. They are parsed
//! into [`AreaType`] and [`ShopSize`] at the boundary, and the encoders below
//! are the only way to turn them into model features.
//!
//! Both encoders are total. Unrecognized labels map to a fixed default weight
//! and that default is part of the contract:
//!
//! | Input | Encoding |
//! |-------|----------|
//! | `Urban` / `Semi-Urban` / `Rural` | 3 / 2 / 1 |
//! | any other area label | 2 (the `Semi-Urban` weight) |
//! | `Small` / `Medium` / `Large` | 100 / 400 / 700 |
//! | any other shop-size label | 100 (the `Small` weight) |
//! | numeric shop size | passed through unchanged |
//!
//! Labels are case-sensitive: `"urban"` is unrecognized.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Encoding used for any area label outside the known three.
pub const DEFAULT_AREA_ENCODING: u8 = 2;

/// Encoding used for any shop-size label outside the known three.
pub const DEFAULT_SHOP_SIZE: f64 = 100.0;

// ---------------------------------------------------------------------------
// AreaType
// ---------------------------------------------------------------------------

/// Settlement type of the candidate location.
///
/// The original label is preserved in every variant so the response can
/// echo exactly what the caller sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AreaType {
    /// `"Urban"`.
    Urban,
    /// `"Semi-Urban"`.
    SemiUrban,
    /// `"Rural"`.
    Rural,
    /// Any other label, kept verbatim.
    Unrecognized(String),
}

impl AreaType {
    /// Classify a raw label. Never fails.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Urban" => Self::Urban,
            "Semi-Urban" => Self::SemiUrban,
            "Rural" => Self::Rural,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// The label as the caller wrote it.
    pub fn label(&self) -> &str {
        match self {
            Self::Urban => "Urban",
            Self::SemiUrban => "Semi-Urban",
            Self::Rural => "Rural",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Numeric weight fed to the models.
    pub fn encoded(&self) -> u8 {
        match self {
            Self::Urban => 3,
            Self::SemiUrban => 2,
            Self::Rural => 1,
            Self::Unrecognized(_) => DEFAULT_AREA_ENCODING,
        }
    }

    /// Whether the urban premium business rule applies.
    pub fn is_urban(&self) -> bool {
        matches!(self, Self::Urban)
    }
}

impl From<String> for AreaType {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Urban" => Self::Urban,
            "Semi-Urban" => Self::SemiUrban,
            "Rural" => Self::Rural,
            _ => Self::Unrecognized(label),
        }
    }
}

impl From<&str> for AreaType {
    fn from(label: &str) -> Self {
        Self::from_label(label)
    }
}

impl From<AreaType> for String {
    fn from(area: AreaType) -> Self {
        match area {
            AreaType::Unrecognized(raw) => raw,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for AreaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Encode an area-type label: `Urban → 3`, `Semi-Urban → 2`, `Rural → 1`,
/// anything else `→ 2`.
pub fn encode_area_type(label: &str) -> u8 {
    AreaType::from_label(label).encoded()
}

// ---------------------------------------------------------------------------
// ShopSize
// ---------------------------------------------------------------------------

/// Shop size as supplied by the caller: either a dropdown label or a number.
///
/// On the wire this is the `shoe_size` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShopSize {
    /// Already numeric; used as the feature value directly.
    Numeric(f64),
    /// A size label such as `"Medium"`.
    Label(String),
}

impl ShopSize {
    /// Numeric weight fed to the store model.
    pub fn encoded(&self) -> f64 {
        match self {
            Self::Numeric(value) => *value,
            Self::Label(label) => match label.as_str() {
                "Small" => 100.0,
                "Medium" => 400.0,
                "Large" => 700.0,
                _ => DEFAULT_SHOP_SIZE,
            },
        }
    }
}

impl From<f64> for ShopSize {
    fn from(value: f64) -> Self {
        Self::Numeric(value)
    }
}

impl From<&str> for ShopSize {
    fn from(label: &str) -> Self {
        Self::Label(label.to_string())
    }
}

impl fmt::Display for ShopSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(value) => write!(f, "{value}"),
            Self::Label(label) => f.write_str(label),
        }
    }
}

/// Encode a shop size: `Small → 100`, `Medium → 400`, `Large → 700`,
/// other labels `→ 100`, numbers unchanged.
pub fn encode_shop_size(value: &ShopSize) -> f64 {
    value.encoded()
}
