//! URL Feature Extraction
//!
//! Maps a raw URL string to the fixed-schema feature record the phishing
//! model was trained on. Pure and total: every input, including the empty
//! string, yields a well-defined record.

use serde::{Deserialize, Serialize};

use super::layout::FEATURE_COUNT;

/// Keywords that commonly appear in phishing and scam URLs.
/// The set is part of the trained schema - extend only with a layout
/// version bump and a retrained model.
pub const SUSPICIOUS_WORDS: &[&str] = &[
    "login", "verify", "update", "secure", "account",
    "free", "bonus", "reward", "claim",
    "kyc", "blocked", "suspend",
];

// ============================================================================
// FEATURE RECORD
// ============================================================================

/// Fixed-schema numeric encoding of a URL.
///
/// Field order mirrors `layout::FEATURE_LAYOUT`; `to_row` is the only
/// place that flattens the record, so the mapping stays in one spot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlFeatures {
    pub url_length: u32,
    pub dot_count: u32,
    pub digit_count: u32,
    pub hyphen_count: u32,
    pub slash_count: u32,
    pub https_present: u8,
    pub at_symbol: u8,
    pub ip_present: u8,
    pub suspicious_word_present: u8,
}

impl UrlFeatures {
    /// Flatten into a model input row, in training column order.
    pub fn to_row(&self) -> [f32; FEATURE_COUNT] {
        [
            self.url_length as f32,
            self.dot_count as f32,
            self.digit_count as f32,
            self.hyphen_count as f32,
            self.slash_count as f32,
            self.https_present as f32,
            self.at_symbol as f32,
            self.ip_present as f32,
            self.suspicious_word_present as f32,
        ]
    }
}

// ============================================================================
// EXTRACTION
// ============================================================================

/// Extract the EXACT features used during training.
///
/// The URL is lowercased before analysis. Deterministic: the same input
/// always yields the same record.
pub fn extract(url: &str) -> UrlFeatures {
    let url = url.to_lowercase();

    // Heuristic IPv4 detector: strip dots, require non-empty all-digits.
    // Also matches all-numeric hostnames without dots; accepted approximation.
    let stripped: String = url.chars().filter(|c| *c != '.').collect();
    let ip_present = !stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_digit());

    UrlFeatures {
        url_length: url.chars().count() as u32,
        dot_count: url.chars().filter(|c| *c == '.').count() as u32,
        digit_count: url.chars().filter(|c| c.is_ascii_digit()).count() as u32,
        hyphen_count: url.chars().filter(|c| *c == '-').count() as u32,
        slash_count: url.chars().filter(|c| *c == '/').count() as u32,
        https_present: url.starts_with("https") as u8,
        at_symbol: url.contains('@') as u8,
        ip_present: ip_present as u8,
        suspicious_word_present: SUSPICIOUS_WORDS.iter().any(|w| url.contains(w)) as u8,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_deterministic() {
        let url = "http://pm-kisan-benefit-verify.in/login";
        assert_eq!(extract(url), extract(url));
    }

    #[test]
    fn test_extract_legitimate_url() {
        let f = extract("https://www.google.com");
        assert_eq!(f.https_present, 1);
        assert_eq!(f.at_symbol, 0);
        assert_eq!(f.ip_present, 0);
        assert_eq!(f.suspicious_word_present, 0);
        assert_eq!(f.dot_count, 2);
        assert_eq!(f.url_length, 22);
    }

    #[test]
    fn test_extract_phishing_url() {
        // Matches "verify", "account", "login"
        let f = extract("http://verify-bank-account-now.net/login");
        assert_eq!(f.suspicious_word_present, 1);
        assert_eq!(f.https_present, 0);
        assert_eq!(f.hyphen_count, 2);
        assert_eq!(f.slash_count, 3);
    }

    #[test]
    fn test_extract_is_case_folded() {
        let upper = extract("HTTPS://WWW.GOOGLE.COM/LOGIN");
        let lower = extract("https://www.google.com/login");
        assert_eq!(upper, lower);
        assert_eq!(upper.https_present, 1);
        assert_eq!(upper.suspicious_word_present, 1);
    }

    #[test]
    fn test_extract_empty_string() {
        let f = extract("");
        assert_eq!(f.url_length, 0);
        assert_eq!(f.https_present, 0);
        // "" with dots removed is empty, not an IP
        assert_eq!(f.ip_present, 0);
    }

    #[test]
    fn test_ip_present_heuristic() {
        assert_eq!(extract("192.168.0.1").ip_present, 1);
        // All-digit string without dots also matches (accepted approximation)
        assert_eq!(extract("12345").ip_present, 1);
        // Dots only is not an IP
        assert_eq!(extract("...").ip_present, 0);
        assert_eq!(extract("192.168.0.x").ip_present, 0);
    }

    #[test]
    fn test_at_symbol_and_digits() {
        let f = extract("http://user@evil99.com");
        assert_eq!(f.at_symbol, 1);
        assert_eq!(f.digit_count, 2);
    }

    #[test]
    fn test_to_row_matches_layout_order() {
        use crate::logic::features::layout::feature_index;

        let f = extract("https://www.mahagov.in");
        let row = f.to_row();
        assert_eq!(row[feature_index("url_length").unwrap()], f.url_length as f32);
        assert_eq!(row[feature_index("https_present").unwrap()], 1.0);
        assert_eq!(
            row[feature_index("suspicious_word_present").unwrap()],
            f.suspicious_word_present as f32
        );
    }
}
