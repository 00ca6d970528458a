//! # Pincode
//!
//! The registry's lookup key. Postal codes are integers on the wire and in
//! the source table; the newtype keeps them apart from every other integer
//! flowing through the pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::location::whole_non_negative;

/// A postal code identifying one location record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pincode(u32);

impl Pincode {
    /// Wrap a raw postal code.
    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    /// The raw integer value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for Pincode {
    fn from(code: u32) -> Self {
        Self(code)
    }
}

impl fmt::Display for Pincode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Pincode {
    type Err = ValidationError;

    /// Parse a postal code from text.
    ///
    /// Accepts plain digits and whole-valued floats such as `"411001.0"`,
    /// which is how spreadsheet exports write integer columns that contain
    /// a blank somewhere.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let reject = |reason: &str| ValidationError::InvalidPincode {
            value: s.to_string(),
            reason: reason.to_string(),
        };
        if trimmed.is_empty() {
            return Err(reject("empty"));
        }
        if let Ok(code) = trimmed.parse::<u32>() {
            return Ok(Self(code));
        }
        let as_float: f64 = trimmed
            .parse()
            .map_err(|_| reject("not an integer"))?;
        whole_non_negative(as_float)
            .and_then(|code| u32::try_from(code).ok())
            .map(Self)
            .ok_or_else(|| reject("not a non-negative whole number"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_digits() {
        assert_eq!("411001".parse::<Pincode>().unwrap(), Pincode::new(411001));
        assert_eq!(" 560001 ".parse::<Pincode>().unwrap().get(), 560001);
    }

    #[test]
    fn parses_whole_float_export() {
        assert_eq!("411001.0".parse::<Pincode>().unwrap(), Pincode::new(411001));
    }

    #[test]
    fn rejects_garbage() {
        assert!("".parse::<Pincode>().is_err());
        assert!("abc".parse::<Pincode>().is_err());
        assert!("-5".parse::<Pincode>().is_err());
        assert!("411001.5".parse::<Pincode>().is_err());
    }

    #[test]
    fn serializes_as_bare_integer() {
        let json = serde_json::to_string(&Pincode::new(411001)).unwrap();
        assert_eq!(json, "411001");
        let back: Pincode = serde_json::from_str("411001").unwrap();
        assert_eq!(back, Pincode::new(411001));
    }
}
