//! # Population Density Parsing
//!
//! The density column in the source table is hand-entered text: values such
//! as `"12,500 /sq.km"`, `"980"` or `"n/a"` all occur. Parsing is defensive
//! and never fails a lookup.

/// Parse a population density cell.
///
/// Removes `,` thousands separators, takes the first whitespace-delimited
/// token and parses it as a float. Any failure yields `0.0`: an empty cell,
/// a unit glued to the number (`"12500/sq.km"`), or a non-finite value.
pub fn parse_density(raw: &str) -> f64 {
    let cleaned = raw.replace(',', "");
    let parsed = cleaned
        .split_whitespace()
        .next()
        .and_then(|token| token.parse::<f64>().ok())
        .filter(|value| value.is_finite());

    match parsed {
        Some(value) => value,
        None => {
            tracing::debug!(raw, "unparseable population density, using 0.0");
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strips_separators_and_units() {
        assert_eq!(parse_density("12,500 /sq.km"), 12500.0);
        assert_eq!(parse_density("1,234,567 per km2"), 1_234_567.0);
        assert_eq!(parse_density("  980  "), 980.0);
        assert_eq!(parse_density("45.5"), 45.5);
    }

    #[test]
    fn malformed_values_default_to_zero() {
        assert_eq!(parse_density(""), 0.0);
        assert_eq!(parse_density("   "), 0.0);
        assert_eq!(parse_density("n/a"), 0.0);
        assert_eq!(parse_density("12500/sq.km"), 0.0);
        assert_eq!(parse_density("NaN"), 0.0);
        assert_eq!(parse_density("inf"), 0.0);
    }

    proptest! {
        #[test]
        fn never_panics_and_is_finite(raw in ".*") {
            prop_assert!(parse_density(&raw).is_finite());
        }

        #[test]
        fn formatted_integers_round_trip(n in 0u32..100_000_000) {
            let with_commas = n
                .to_string()
                .as_bytes()
                .rchunks(3)
                .rev()
                .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(",");
            let raw = format!("{with_commas} /sq.km");
            prop_assert_eq!(parse_density(&raw), f64::from(n));
        }
    }
}
