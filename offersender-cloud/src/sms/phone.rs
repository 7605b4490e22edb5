//! Phone number normalization
//!
//! Free-form phone strings are normalized into a digit-only,
//! assumed-international form just before dispatch. This is a lossy
//! heuristic: no length or checksum validation is performed, and malformed
//! numbers are passed through to fail at the gateway.

/// Default country code prepended to national numbers (New Zealand).
const DEFAULT_COUNTRY_CODE: &str = "64";

/// Country codes accepted as already-international.
const KNOWN_COUNTRY_CODES: [&str; 2] = ["64", "61"];

/// Normalize a free-form phone string into international digit-only form.
///
/// Strips every non-digit character; a leading `0` is replaced with the
/// default country code; anything not already starting with a known country
/// code gets the default code prepended.
pub fn normalize(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if let Some(national) = digits.strip_prefix('0') {
        return format!("{DEFAULT_COUNTRY_CODE}{national}");
    }

    if KNOWN_COUNTRY_CODES.iter().any(|cc| digits.starts_with(cc)) {
        digits
    } else {
        format!("{DEFAULT_COUNTRY_CODE}{digits}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_zero_replaced() {
        assert_eq!(normalize("021234567"), "641234567");
    }

    #[test]
    fn test_already_international_unchanged() {
        assert_eq!(normalize("64211234567"), "64211234567");
        assert_eq!(normalize("61211234567"), "61211234567");
    }

    #[test]
    fn test_national_without_zero_gets_prefix() {
        assert_eq!(normalize("211234567"), "64211234567");
    }

    #[test]
    fn test_non_digits_stripped() {
        assert_eq!(normalize("+64 21-123 4567"), "64211234567");
        assert_eq!(normalize("(02) 123 4567"), "641234567");
    }

    #[test]
    fn test_output_is_digit_only() {
        for input in ["abc", "+64 21x", "0-2-1", ""] {
            assert!(normalize(input).chars().all(|c| c.is_ascii_digit()));
        }
    }
}
