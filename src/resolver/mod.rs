//! Timestamp resolver module
//!
//! Turns a field's format into the timestamp spec used by the ingestion engine.

mod resolve;
mod types;

pub use resolve::{backward_compatible, resolve_timestamp_spec, resolve_timestamp_spec_at};
pub use types::TimestampSpec;
