//! Decision Policy
//!
//! Pure functions from probability to label and risk tier, one per
//! modality. Screenshot checks reuse the text policy on OCR output; the
//! empty-text guard lives in the check flow, not here.

use serde::{Deserialize, Serialize};

use super::rules::DecisionThresholds;

// ============================================================================
// LABELS & TIERS
// ============================================================================

/// Text classification label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextLabel {
    Scam,
    Safe,
}

impl TextLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextLabel::Scam => "scam",
            TextLabel::Safe => "safe",
        }
    }
}

/// Risk tier, derived from probability only for scam-labeled inputs.
/// Safe inputs are always Low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        }
    }
}

/// URL verdict. The display strings double as the logged result values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UrlVerdict {
    Phishing,
    Legitimate,
}

impl UrlVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            UrlVerdict::Phishing => "Phishing URL",
            UrlVerdict::Legitimate => "Legitimate URL",
        }
    }
}

/// Outcome of the text policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextDecision {
    pub label: TextLabel,
    pub risk: RiskTier,
}

// ============================================================================
// DECISION FUNCTIONS
// ============================================================================

/// Text policy. Both boundaries are strict: a probability of exactly 0.5
/// is safe, exactly 0.7 is medium risk.
pub fn decide_text(prob: f32) -> TextDecision {
    decide_text_with_thresholds(prob, &DecisionThresholds::default())
}

pub fn decide_text_with_thresholds(prob: f32, thresholds: &DecisionThresholds) -> TextDecision {
    if prob > thresholds.text_scam {
        let risk = if prob > thresholds.text_high_risk {
            RiskTier::High
        } else {
            RiskTier::Medium
        };
        TextDecision {
            label: TextLabel::Scam,
            risk,
        }
    } else {
        TextDecision {
            label: TextLabel::Safe,
            risk: RiskTier::Low,
        }
    }
}

/// URL policy. Inclusive boundary: exactly 0.55 is phishing. Asymmetric
/// with the text policy by calibration, not by accident.
pub fn decide_url(prob: f32) -> UrlVerdict {
    decide_url_with_thresholds(prob, &DecisionThresholds::default())
}

pub fn decide_url_with_thresholds(prob: f32, thresholds: &DecisionThresholds) -> UrlVerdict {
    if prob >= thresholds.url_phishing {
        UrlVerdict::Phishing
    } else {
        UrlVerdict::Legitimate
    }
}

/// Round a probability to 2 decimal places for reporting.
///
/// Rounds half away from zero (`f32::round` semantics), applied
/// consistently everywhere a confidence is surfaced or logged.
pub fn round_confidence(prob: f32) -> f32 {
    (prob * 100.0).round() / 100.0
}

// ============================================================================
// TESTS
// ============================================================================
