//! Price parsing.
//!
//! Two distinct parses live here: the target price a user types during the
//! guided flow (fallible, consumed by the state machine's transition table)
//! and the price tag strings the catalog returns (absence is normal, not an
//! error).

use thiserror::Error;

/// Why a user-entered target price was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceParseError {
    /// The input is not a decimal number at all.
    #[error("not a number")]
    NotANumber,
    /// The input parsed but is not a usable target (zero, negative, or
    /// non-finite).
    #[error("out of range")]
    OutOfRange,
}

/// Parses a user-entered target price.
///
/// The state machine re-prompts on either error; the distinction exists so
/// the re-prompt can be tested against both failure modes.
pub fn parse_target_price(input: &str) -> Result<f64, PriceParseError> {
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| PriceParseError::NotANumber)?;
    if !value.is_finite() || value <= 0.0 {
        return Err(PriceParseError::OutOfRange);
    }
    Ok(value)
}

/// Parses a catalog price tag such as `"$1,299.99"` into `1299.99`.
///
/// Returns `None` when the tag is empty or malformed; a missing price is a
/// ranking concern, not a failure.
pub fn parse_price_tag(raw: &str) -> Option<f64> {
    let cleaned = raw.replace('$', "").replace(',', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

/// Formats a price for chat display: `$649.99`, or `N/A` when absent.
pub fn display_price(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("${value:.2}"),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_and_decimal_targets() {
        assert_eq!(parse_target_price("500"), Ok(500.0));
        assert_eq!(parse_target_price("499.99"), Ok(499.99));
        assert_eq!(parse_target_price("  750.5  "), Ok(750.5));
    }

    #[test]
    fn rejects_non_numbers() {
        assert_eq!(parse_target_price("abc"), Err(PriceParseError::NotANumber));
        assert_eq!(parse_target_price("$500"), Err(PriceParseError::NotANumber));
        assert_eq!(parse_target_price(""), Err(PriceParseError::NotANumber));
        assert_eq!(
            parse_target_price("499,99"),
            Err(PriceParseError::NotANumber)
        );
    }

    #[test]
    fn rejects_out_of_range_targets() {
        assert_eq!(parse_target_price("0"), Err(PriceParseError::OutOfRange));
        assert_eq!(parse_target_price("-5"), Err(PriceParseError::OutOfRange));
        assert_eq!(parse_target_price("inf"), Err(PriceParseError::OutOfRange));
        assert_eq!(parse_target_price("NaN"), Err(PriceParseError::OutOfRange));
    }

    #[test]
    fn parses_catalog_price_tags() {
        assert_eq!(parse_price_tag("$1,299.99"), Some(1299.99));
        assert_eq!(parse_price_tag("$499.00"), Some(499.0));
        assert_eq!(parse_price_tag(" 89.95 "), Some(89.95));
    }

    #[test]
    fn malformed_price_tags_are_none() {
        assert_eq!(parse_price_tag(""), None);
        assert_eq!(parse_price_tag("N/A"), None);
        assert_eq!(parse_price_tag("$"), None);
    }

    #[test]
    fn displays_prices_with_two_decimals() {
        assert_eq!(display_price(Some(649.99)), "$649.99");
        assert_eq!(display_price(Some(500.0)), "$500.00");
        assert_eq!(display_price(None), "N/A");
    }
}
