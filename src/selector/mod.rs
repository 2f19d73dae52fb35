//! Aggregation selector module
//!
//! Maps a field's aggregation type and identity to the engine aggregator
//! used when rolling it up at ingestion.

mod select;
mod types;

pub use select::select_aggregation;
pub use types::{AggregationDescriptor, AggregationKind};
