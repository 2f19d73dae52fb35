//! fieldspec - Field descriptors for columnar / time-series ingestion
//!
//! This library provides:
//! - Field descriptor types (FieldDescriptor, Dataset, FieldFormat, FilterOption)
//! - Dataset and configuration parsing from YAML/JSON
//! - Patch-based construction and partial update of descriptors
//! - Timestamp spec resolution for the ingestion engine
//! - Aggregation selection for measure fields
//! - Mandatory-filter selector validation
//! - Duplicate field name resolution
//!
//! # Architecture
//!
//! **Noun modules** (data structures):
//! - `field_model/` - descriptors, vocabularies, format and filter documents
//! - `config` - resolver defaults (timezone, locale, time format)
//!
//! **Verb modules** (transformations):
//! - `parser/` - YAML/JSON → Dataset, ResolverConfig, FieldPatch
//! - `resolver/` - FieldFormat → TimestampSpec
//! - `selector/` - AggregationType + field identity → AggregationDescriptor
//! - `validator/` - SelectorKind + selector → validated selector
//! - `dedup/` - field batch → renamed batch + FieldAnnotations
//!
//! # Example
//!
//! ```ignore
//! use fieldspec::{parser, ResolverConfig};
//!
//! let mut dataset = parser::parse_file("sales.yaml")?;
//! dataset.validate()?;
//! let annotations = dataset.resolve_duplicates(false);
//! let config = ResolverConfig::default();
//! let ts = dataset.timestamp_field().unwrap();
//! let spec = ts.timestamp_spec(&config, None);
//! ```

pub mod config;
pub mod dedup;
pub mod error;
pub mod field_model;
pub mod parser;
pub mod resolver;
pub mod selector;
pub mod validator;

// Re-export commonly used types
pub use config::ResolverConfig;
pub use dedup::resolve_duplicates;
pub use error::{DatasetError, ParseError};
pub use field_model::{
    AggregationType, DataType, Dataset, FieldAnnotation, FieldDescriptor, FieldFormat, FieldId,
    FieldPatch, FieldRecord, FieldRole, FilterOption, FormatValue, LogicalType, SelectorKind,
    TimeUnit,
};
pub use resolver::{backward_compatible, resolve_timestamp_spec, resolve_timestamp_spec_at, TimestampSpec};
pub use selector::{select_aggregation, AggregationDescriptor, AggregationKind};
pub use validator::{validate_selector, ValidationError};
