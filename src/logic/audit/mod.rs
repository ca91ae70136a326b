//! Audit Module - Event Log & Impact Aggregation
//!
//! Every completed classification becomes one immutable event. Appends are
//! the only writes; aggregate stats are recomputed from a full scan on
//! demand, never stored.
//!
//! ## Structure
//! - `event`: the immutable event record
//! - `store`: append/scan store contract + JSONL and in-memory backends
//! - `stats`: impact aggregation

pub mod event;
pub mod stats;
pub mod store;

// Re-export main types for convenience
pub use event::{CheckType, ClassificationEvent};
pub use stats::{compute_stats, compute_stats_with_mode, AggregationMode, ImpactStats};
pub use store::{EventStore, JsonlEventStore, MemoryEventStore};
