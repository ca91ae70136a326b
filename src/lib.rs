//! ScamGuard Core - scam-scoring engine
//!
//! Deterministic URL feature extraction, ONNX-backed text/URL scoring,
//! calibrated decision policy, and an append-only classification event log
//! with on-demand impact aggregation.

pub mod constants;
pub mod logic;
