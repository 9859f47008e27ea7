//! Run statistics: request outcomes and the shared aggregation.
mod aggregation;
mod types;


pub use aggregation::Aggregator;
pub use types::{AggregationSnapshot, FailureBreakdown, FailureReason, PersistedReport, RequestOutcome};
