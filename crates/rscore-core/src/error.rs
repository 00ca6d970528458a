//! # Error Types
//!
//! Errors for the foundational types. Everything here is about rejecting
//! malformed input at a boundary (CLI flag, CSV cell); the scoring path
//! itself never produces a `ValidationError`.

use thiserror::Error;

/// Rejected boundary input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The postal code is not a non-negative integer.
    #[error("invalid pincode {value:?}: {reason}")]
    InvalidPincode {
        /// The raw text that was rejected.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A count or population is not a non-negative whole number.
    #[error("invalid count for {field}: {value:?}")]
    InvalidCount {
        /// Name of the field being parsed.
        field: String,
        /// The raw text that was rejected.
        value: String,
    },
}
