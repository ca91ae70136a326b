//! Model Module - ML Inference
//!
//! Scoring is split from decision making: this module only turns input into
//! a probability. Thresholding lives in `logic::policy`.

pub mod inference;

// Re-export common types
pub use inference::{ModelMetadata, OnnxTextModel, OnnxUrlModel, ScoreError, TextScorer, UrlScorer};
