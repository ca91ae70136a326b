//! Inference Engine - ONNX Runtime Integration
//!
//! Wraps the two pre-trained scoring pipelines (text scam model, URL
//! phishing model) behind narrow trait seams so the check flows and the
//! tests never touch ONNX directly.
//!
//! Both models are opaque: the text pipeline vectorizes internally and
//! consumes the raw message string; the URL pipeline consumes the fixed
//! feature row in training column order. Each returns the positive-class
//! probability in [0,1].
//!
//! Failure mode is fail-fast: a missing or corrupt artifact is a
//! construction-time error. There is no per-call fallback scorer.

use std::path::Path;

use chrono::{DateTime, Utc};
use ndarray::Array2;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use ort::session::{builder::GraphOptimizationLevel, Session, SessionOutputs};
use ort::value::{Tensor, Value};

use crate::logic::features::{UrlFeatures, FEATURE_COUNT};

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug)]
pub struct ScoreError(pub String);

impl std::fmt::Display for ScoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ScoreError: {}", self.0)
    }
}

impl std::error::Error for ScoreError {}

// ============================================================================
// SCORER TRAITS
// ============================================================================

/// Scores a raw message string. Deterministic for fixed model weights.
pub trait TextScorer: Send + Sync {
    fn score_text(&self, message: &str) -> Result<f32, ScoreError>;
}

/// Scores a URL feature record. Deterministic for fixed model weights.
pub trait UrlScorer: Send + Sync {
    fn score_url(&self, features: &UrlFeatures) -> Result<f32, ScoreError>;
}

// ============================================================================
// MODEL METADATA
// ============================================================================

/// Metadata captured when an artifact is loaded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub sha256: String,
    pub loaded_at: DateTime<Utc>,
}

/// SHA-256 checksum of a model artifact, hex-encoded
fn artifact_checksum(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Load a session from an artifact on disk, checksumming the same bytes
fn load_session(model_path: &str) -> Result<(Session, ModelMetadata), ScoreError> {
    let path = Path::new(model_path);
    if !path.exists() {
        return Err(ScoreError(format!("Model not found: {}", model_path)));
    }

    let bytes = std::fs::read(path)
        .map_err(|e| ScoreError(format!("Failed to read model {}: {}", model_path, e)))?;
    let sha256 = artifact_checksum(&bytes);

    let session = Session::builder()
        .map_err(|e| ScoreError(format!("Failed to create session builder: {}", e)))?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .map_err(|e| ScoreError(format!("Failed to set optimization: {}", e)))?
        .commit_from_memory(&bytes)
        .map_err(|e| ScoreError(format!("Failed to load model: {}", e)))?;

    let metadata = ModelMetadata {
        model_path: model_path.to_string(),
        sha256,
        loaded_at: Utc::now(),
    };

    log::info!(
        "Loaded model {} (sha256: {})",
        metadata.model_path,
        metadata.sha256
    );

    Ok((session, metadata))
}

/// Clamp a raw model output into a valid probability
fn clamp_probability(raw: f32) -> f32 {
    if raw.is_nan() {
        0.0
    } else {
        raw.clamp(0.0, 1.0)
    }
}

/// Pull the positive-class probability out of a finished run.
///
/// Exported classifiers emit class probabilities as a `[N, 2]` float tensor
/// (zipmap disabled at export); the positive class is the last column.
fn extract_probability(outputs: &SessionOutputs, output_name: &str) -> Result<f32, ScoreError> {
    let output = outputs
        .get(output_name)
        .ok_or_else(|| ScoreError("No output".to_string()))?;

    let output_tensor = output
        .try_extract_tensor::<f32>()
        .map_err(|e| ScoreError(format!("Extract error: {}", e)))?;

    let data = output_tensor.1;
    let prob = data
        .last()
        .copied()
        .ok_or_else(|| ScoreError("Empty output tensor".to_string()))?;

    Ok(clamp_probability(prob))
}

/// Name of the probability output (last declared output of the graph)
fn probability_output_name(session: &Session) -> Result<String, ScoreError> {
    session
        .outputs
        .last()
        .map(|o| o.name.clone())
        .ok_or_else(|| ScoreError("No output defined".to_string()))
}

// ============================================================================
// TEXT MODEL
// ============================================================================

/// ONNX-backed text scam scorer.
///
/// The artifact is the full trained pipeline (TF-IDF vectorizer + classifier)
/// exported as one graph with a `[N, 1]` string input.
#[derive(Debug)]
pub struct OnnxTextModel {
    session: Mutex<Session>,
    metadata: ModelMetadata,
}

impl OnnxTextModel {
    pub fn load(model_path: &str) -> Result<Self, ScoreError> {
        let (session, metadata) = load_session(model_path)?;
        Ok(Self {
            session: Mutex::new(session),
            metadata,
        })
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }
}

impl TextScorer for OnnxTextModel {
    fn score_text(&self, message: &str) -> Result<f32, ScoreError> {
        let input_array = Array2::<String>::from_shape_vec((1, 1), vec![message.to_string()])
            .map_err(|e| ScoreError(format!("Array error: {}", e)))?;

        let input_tensor = Tensor::from_string_array(&input_array)
            .map_err(|e| ScoreError(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let output_name = probability_output_name(&session)?;

        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| ScoreError(format!("Inference failed: {}", e)))?;

        extract_probability(&outputs, &output_name)
    }
}

// ============================================================================
// URL MODEL
// ============================================================================

/// ONNX-backed URL phishing scorer.
///
/// Consumes the feature row in training column order; the input arity is
/// validated at load time.
#[derive(Debug)]
pub struct OnnxUrlModel {
    session: Mutex<Session>,
    metadata: ModelMetadata,
}

impl OnnxUrlModel {
    pub fn load(model_path: &str) -> Result<Self, ScoreError> {
        let (session, metadata) = load_session(model_path)?;

        if session.inputs.len() != 1 {
            return Err(ScoreError(format!(
                "URL model must take one input tensor, found {}",
                session.inputs.len()
            )));
        }

        Ok(Self {
            session: Mutex::new(session),
            metadata,
        })
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }
}

impl UrlScorer for OnnxUrlModel {
    fn score_url(&self, features: &UrlFeatures) -> Result<f32, ScoreError> {
        let row = features.to_row();
        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), row.to_vec())
            .map_err(|e| ScoreError(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| ScoreError(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let output_name = probability_output_name(&session)?;

        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| ScoreError(format!("Inference failed: {}", e)))?;

        extract_probability(&outputs, &output_name)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_probability() {
        assert_eq!(clamp_probability(0.42), 0.42);
        assert_eq!(clamp_probability(-0.1), 0.0);
        assert_eq!(clamp_probability(1.7), 1.0);
        assert_eq!(clamp_probability(f32::NAN), 0.0);
    }

    #[test]
    fn test_artifact_checksum() {
        // sha256 of the empty input
        assert_eq!(
            artifact_checksum(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(artifact_checksum(b"model bytes").len(), 64);
    }

    #[test]
    fn test_load_missing_artifact_fails_fast() {
        let err = OnnxTextModel::load("does/not/exist.onnx").unwrap_err();
        assert!(err.to_string().contains("Model not found"));

        let err = OnnxUrlModel::load("does/not/exist.onnx").unwrap_err();
        assert!(err.to_string().contains("Model not found"));
    }
}
