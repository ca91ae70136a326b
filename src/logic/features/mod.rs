//! Features Module - URL Feature Extraction
//!
//! The feature schema lives in `layout` and the extraction logic in `url`.
//! Extraction is pure; the same URL always produces the same record.

pub mod layout;
pub mod url;

// Re-export common types
pub use layout::{LayoutInfo, FEATURE_COUNT, FEATURE_VERSION};
pub use url::{extract, UrlFeatures};
