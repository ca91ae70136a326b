//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! To change a default path or flag, only edit this file.

use std::path::PathBuf;

/// Default path to the text scam model (ONNX export of the trained pipeline)
pub const DEFAULT_TEXT_MODEL_PATH: &str = "models/text_scam_model.onnx";

/// Default path to the URL phishing model
pub const DEFAULT_URL_MODEL_PATH: &str = "models/url_phishing_model.onnx";

/// Default tesseract binary name (resolved via PATH)
pub const DEFAULT_TESSERACT_BIN: &str = "tesseract";

/// Directory name for the classification event log
pub const EVENT_LOG_DIR: &str = "check_logs";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "ScamGuard";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get text model path from environment or use default
pub fn text_model_path() -> String {
    std::env::var("SCAMGUARD_TEXT_MODEL")
        .unwrap_or_else(|_| DEFAULT_TEXT_MODEL_PATH.to_string())
}

/// Get URL model path from environment or use default
pub fn url_model_path() -> String {
    std::env::var("SCAMGUARD_URL_MODEL")
        .unwrap_or_else(|_| DEFAULT_URL_MODEL_PATH.to_string())
}

/// Get tesseract binary from environment or use default
pub fn tesseract_bin() -> String {
    std::env::var("SCAMGUARD_TESSERACT_BIN")
        .unwrap_or_else(|_| DEFAULT_TESSERACT_BIN.to_string())
}

/// Get event log directory from environment or use the local data dir
pub fn event_log_dir() -> PathBuf {
    std::env::var("SCAMGUARD_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("scamguard")
                .join(EVENT_LOG_DIR)
        })
}

/// Check if corrected aggregation is enabled (screenshot checks counted as text)
pub fn corrected_stats_enabled() -> bool {
    std::env::var("SCAMGUARD_CORRECTED_STATS")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
