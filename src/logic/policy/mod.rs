//! Policy Module - Probability to Decision
//!
//! ## Structure
//! - `rules`: thresholds and constants, no logic
//! - `decide`: the pure decision functions
//!
//! ## Usage
//! ```ignore
//! use crate::logic::policy::{decide_text, TextLabel};
//!
//! let decision = decide_text(0.82);
//! assert_eq!(decision.label, TextLabel::Scam);
//! ```

pub mod decide;
pub mod rules;

// Re-export main types for convenience
pub use decide::{
    decide_text, decide_url, round_confidence, RiskTier, TextDecision, TextLabel, UrlVerdict,
};
pub use rules::{
    DecisionThresholds, TEXT_HIGH_RISK_THRESHOLD, TEXT_SCAM_THRESHOLD, URL_PHISHING_THRESHOLD,
};
