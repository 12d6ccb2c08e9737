//! Server-side phone normalization.
//!
//! The browser cleans the number before submitting, but nothing it sends is
//! trusted: every phone passes through [`normalize_phone`] before it reaches
//! the store.

use crate::error::{ApiError, ApiResult};
use once_cell::sync::Lazy;
use regex::Regex;

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{6,10}$").expect("phone pattern is valid"));

/// Reduce `raw` to its digits, drop one leading zero, and check the result
/// is 6 to 10 digits long.
///
/// # Errors
///
/// Returns `ApiError::Validation` with the phone rule message otherwise.
pub fn normalize_phone(raw: &str) -> ApiResult<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let digits = digits.strip_prefix('0').unwrap_or(digits.as_str());

    if !PHONE_PATTERN.is_match(digits) {
        return Err(ApiError::invalid_phone());
    }

    Ok(digits.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_leading_zero() {
        assert_eq!(normalize_phone("0123456").unwrap(), "123456");
    }

    #[test]
    fn test_keeps_only_digits() {
        assert_eq!(normalize_phone("555-123 4").unwrap(), "5551234");
        assert_eq!(normalize_phone("(555) 123.4567").unwrap(), "5551234567");
    }

    #[test]
    fn test_only_one_zero_is_stripped() {
        assert_eq!(normalize_phone("00123456").unwrap(), "0123456");
    }

    #[test]
    fn test_length_bounds() {
        assert!(normalize_phone("12").is_err());
        assert!(normalize_phone("12345").is_err());
        assert!(normalize_phone("123456").is_ok());
        assert!(normalize_phone("1234567890").is_ok());
        assert!(normalize_phone("12345678901").is_err());
        // leading zero does not count towards the limit
        assert!(normalize_phone("01234567890").is_ok());
    }

    #[test]
    fn test_rejects_input_without_digits() {
        let err = normalize_phone("call me").unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(normalize_phone("").is_err());
    }
}
