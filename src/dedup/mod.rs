//! Duplicate name resolver module
//!
//! Runs once over a dataset's field list before it is finalized for
//! ingestion. The pass mutates the batch and must not run concurrently on
//! the same batch.

mod resolve;

pub use resolve::resolve_duplicates;
