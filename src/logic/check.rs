//! Check Pipeline
//!
//! One bounded unit of work per user submission: validate, score, decide,
//! record. The models, OCR engine, and event store are injected through the
//! context so tests can substitute fakes.
//!
//! A failed event append never fails the check: the classification stands
//! and the lost audit record is surfaced as a warning.

use std::path::Path;

use crate::constants;
use crate::logic::audit::{
    compute_stats_with_mode, AggregationMode, ClassificationEvent, EventStore, ImpactStats,
};
use crate::logic::features;
use crate::logic::model::{ScoreError, TextScorer, UrlScorer};
use crate::logic::ocr::TextExtractor;
use crate::logic::policy::{decide_text, decide_url, round_confidence, RiskTier};

// ============================================================================
// OUTCOME TYPES
// ============================================================================

/// Result surfaced to the caller for one completed classification
#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    /// Modality-specific label ("scam", "safe", "Phishing URL", ...)
    pub label: String,
    /// Risk tier; None for URL checks
    pub risk: Option<RiskTier>,
    /// Probability rounded to 2 decimal places
    pub confidence: f32,
    /// False when the audit append failed (classification still stands)
    pub audit_recorded: bool,
}

/// Outcome of one check flow
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    /// Input was scored and labeled
    Classified(CheckReport),
    /// Empty or whitespace-only input; not scored, not logged
    EmptyInput,
    /// OCR produced no usable text; not scored, not logged
    NoReadableContent,
}

// ============================================================================
// CONTEXT
// ============================================================================

/// Process-wide collaborators for the check flows.
///
/// Built once at startup; model construction fails fast if an artifact is
/// missing, so a running context always scores.
pub struct ScamCheckContext {
    text_model: Box<dyn TextScorer>,
    url_model: Box<dyn UrlScorer>,
    extractor: Box<dyn TextExtractor>,
    store: Box<dyn EventStore>,
    aggregation: AggregationMode,
}

impl ScamCheckContext {
    pub fn new(
        text_model: Box<dyn TextScorer>,
        url_model: Box<dyn UrlScorer>,
        extractor: Box<dyn TextExtractor>,
        store: Box<dyn EventStore>,
    ) -> Self {
        let aggregation = if constants::corrected_stats_enabled() {
            AggregationMode::Corrected
        } else {
            AggregationMode::Legacy
        };

        Self {
            text_model,
            url_model,
            extractor,
            store,
            aggregation,
        }
    }

    /// Append an event, degrading to a warning on store failure
    fn record(&self, event: ClassificationEvent) -> bool {
        match self.store.append(&event) {
            Ok(()) => true,
            Err(e) => {
                log::warn!(
                    "Check classified but audit record lost ({} check): {}",
                    event.check_type.as_str(),
                    e
                );
                false
            }
        }
    }

    // ========================================================================
    // CHECK FLOWS
    // ========================================================================

    /// Classify a free-text message
    pub fn check_text(&self, message: &str) -> Result<CheckOutcome, ScoreError> {
        if message.trim().is_empty() {
            return Ok(CheckOutcome::EmptyInput);
        }

        let prob = self.text_model.score_text(message)?;
        let decision = decide_text(prob);
        let confidence = round_confidence(prob);

        let event = ClassificationEvent::text_check(message, decision.label.as_str(), confidence);
        let audit_recorded = self.record(event);

        Ok(CheckOutcome::Classified(CheckReport {
            label: decision.label.as_str().to_string(),
            risk: Some(decision.risk),
            confidence,
            audit_recorded,
        }))
    }

    /// Classify a URL
    pub fn check_url(&self, url: &str) -> Result<CheckOutcome, ScoreError> {
        if url.trim().is_empty() {
            return Ok(CheckOutcome::EmptyInput);
        }

        let record = features::extract(url);
        let prob = self.url_model.score_url(&record)?;
        let verdict = decide_url(prob);
        let confidence = round_confidence(prob);

        let event = ClassificationEvent::url_check(url, verdict.as_str(), confidence);
        let audit_recorded = self.record(event);

        Ok(CheckOutcome::Classified(CheckReport {
            label: verdict.as_str().to_string(),
            risk: None,
            confidence,
            audit_recorded,
        }))
    }

    /// Classify a screenshot: OCR first, then the text policy on whatever
    /// was readable. Empty extraction is reported, never scored.
    pub fn check_screenshot(&self, image: &Path) -> Result<CheckOutcome, ScoreError> {
        let extracted = self.extractor.extract_text(image);
        if extracted.trim().is_empty() {
            return Ok(CheckOutcome::NoReadableContent);
        }

        let prob = self.text_model.score_text(&extracted)?;
        let decision = decide_text(prob);
        let confidence = round_confidence(prob);

        let event =
            ClassificationEvent::screenshot_check(&extracted, decision.label.as_str(), confidence);
        let audit_recorded = self.record(event);

        Ok(CheckOutcome::Classified(CheckReport {
            label: decision.label.as_str().to_string(),
            risk: Some(decision.risk),
            confidence,
            audit_recorded,
        }))
    }

    /// Aggregate impact stats from the full event history
    pub fn impact_stats(&self) -> std::io::Result<ImpactStats> {
        compute_stats_with_mode(self.store.as_ref(), self.aggregation)
    }
}

// ============================================================================
// TESTS
// ============================================================================
