//! Decision Rules & Thresholds
//!
//! Calibrated thresholds for turning probabilities into labels and risk
//! tiers. NO decision logic here - only constants and config.
//!
//! The comparison directions are part of the calibration and differ by
//! modality on purpose: the text boundaries are strict (`>`), the URL
//! boundary is inclusive (`>=`). Do not unify them.

use serde::{Deserialize, Serialize};

// ============================================================================
// THRESHOLDS (Constants - fixed at build time)
// ============================================================================

/// Strictly above this probability a message is labeled "scam"
pub const TEXT_SCAM_THRESHOLD: f32 = 0.5;

/// Strictly above this probability a scam message is "high" risk
pub const TEXT_HIGH_RISK_THRESHOLD: f32 = 0.7;

/// At or above this probability a URL is labeled phishing (inclusive)
pub const URL_PHISHING_THRESHOLD: f32 = 0.55;

// ============================================================================
// CONFIGURABLE THRESHOLDS (for tests and calibration experiments)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionThresholds {
    /// Strictly above this = scam (text)
    pub text_scam: f32,
    /// Strictly above this = high risk (text, scam only)
    pub text_high_risk: f32,
    /// At or above this = phishing (URL)
    pub url_phishing: f32,
}

impl Default for DecisionThresholds {
    fn default() -> Self {
        Self {
            text_scam: TEXT_SCAM_THRESHOLD,
            text_high_risk: TEXT_HIGH_RISK_THRESHOLD,
            url_phishing: URL_PHISHING_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let t = DecisionThresholds::default();
        assert_eq!(t.text_scam, 0.5);
        assert_eq!(t.text_high_risk, 0.7);
        assert_eq!(t.url_phishing, 0.55);
    }
}
