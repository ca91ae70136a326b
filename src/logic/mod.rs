//! Logic Module - Scoring Core & Engines
//!
//! ## Architecture
//! - `features/` - URL feature extraction (fixed, versioned schema)
//! - `model/` - ML inference (ONNX scorers behind trait seams)
//! - `policy/` - probability → label / risk tier decisions
//! - `audit/` - append-only event log + impact aggregation
//! - `ocr` - image-to-text boundary
//! - `check` - the per-submission pipeline tying it all together

pub mod audit;
pub mod check;
pub mod features;
pub mod model;
pub mod ocr;
pub mod policy;
