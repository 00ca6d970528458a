//! # rscore-core: Foundational Types for Retail Store Scoring
//!
//! Leaf crate of the workspace. Defines the domain primitives shared by the
//! registry, the model artifacts and the scoring pipeline. It depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype for the lookup key.** [`Pincode`] wraps the postal code so a
//!    bare count or a population can never be passed where a key is expected.
//!
//! 2. **Tagged unions at the boundary.** `area_type` and `shoe_size` arrive as
//!    free-form JSON. They become [`AreaType`] and [`ShopSize`] immediately,
//!    and the only way to turn them into numbers is through the total
//!    encoders [`encode_area_type`] and [`encode_shop_size`].
//!
//! 3. **Malformed demographics never fail a lookup.** [`parse_density`]
//!    recovers locally with `0.0`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `rscore-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod category;
pub mod density;
pub mod error;
pub mod location;
pub mod pincode;
pub mod request;

// Re-export primary types for ergonomic imports.
pub use category::{encode_area_type, encode_shop_size, AreaType, ShopSize};
pub use density::parse_density;
pub use error::ValidationError;
pub use location::{parse_count, Demographics, LocationRecord};
pub use pincode::Pincode;
pub use request::PredictionRequest;
