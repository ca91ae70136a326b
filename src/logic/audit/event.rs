//! Classification Event Types
//!
//! Immutable, timestamped records of completed checks. One event per
//! completed classification; never updated or deleted after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// CHECK TYPE
// ============================================================================

/// Input modality of a check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckType {
    Text,
    Url,
    Screenshot,
}

impl CheckType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckType::Text => "text",
            CheckType::Url => "url",
            CheckType::Screenshot => "screenshot",
        }
    }
}

// ============================================================================
// CLASSIFICATION EVENT (Main struct)
// ============================================================================

/// Immutable record of a single classification outcome.
///
/// Owned exclusively by the event log once appended. Wire field names
/// (`type`, `input`, ...) match the historical log schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationEvent {
    /// Unique event ID
    pub id: String,
    /// When the check completed (UTC)
    pub timestamp: DateTime<Utc>,
    /// Input modality
    #[serde(rename = "type")]
    pub check_type: CheckType,
    /// The raw input that was checked (extracted text for screenshots)
    #[serde(rename = "input")]
    pub input_value: String,
    /// Modality-specific label, e.g. "scam" or "Phishing URL"
    pub result: String,
    /// Rounded probability reported to the user
    pub confidence: f32,
}

impl ClassificationEvent {
    pub fn new(check_type: CheckType, input_value: &str, result: &str, confidence: f32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            check_type,
            input_value: input_value.to_string(),
            result: result.to_string(),
            confidence,
        }
    }

    /// Convert to a JSONL line (for the append-only log)
    pub fn to_jsonl(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Whether this event recorded a detected scam.
    /// Matches the aggregation rule: result contains "scam" or "phishing",
    /// case-insensitively.
    pub fn is_scam_result(&self) -> bool {
        let result = self.result.to_lowercase();
        result.contains("scam") || result.contains("phishing")
    }
}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ClassificationEvent {
    /// Record a message check
    pub fn text_check(message: &str, label: &str, confidence: f32) -> Self {
        Self::new(CheckType::Text, message, label, confidence)
    }

    /// Record a URL check
    pub fn url_check(url: &str, verdict: &str, confidence: f32) -> Self {
        Self::new(CheckType::Url, url, verdict, confidence)
    }

    /// Record a screenshot check (input is the OCR-extracted text)
    pub fn screenshot_check(extracted_text: &str, label: &str, confidence: f32) -> Self {
        Self::new(CheckType::Screenshot, extracted_text, label, confidence)
    }
}

// ============================================================================
// TESTS
// ============================================================================
