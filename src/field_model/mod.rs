//! Field model types (nouns)
//!
//! Field descriptors, their vocabularies and the documents embedded in them.

mod dataset;
mod field;
mod filter_option;
mod format;
mod patch;
mod record;
mod types;

pub use dataset::Dataset;
pub use field::{
    FieldAnnotation, FieldDescriptor, FieldId, COLUMN_NAME_CURRENT_DATETIME,
    FIELD_NAME_CURRENT_TIMESTAMP, RESERVED_FIELDS,
};
pub use filter_option::FilterOption;
pub use format::{FieldFormat, FormatValue, TimeSettings, TimeUnit};
pub use patch::FieldPatch;
pub use record::{FieldRecord, RECORD_VERSION};
pub use types::{
    parse_column_type, AggregationType, ColumnTypeMapping, DataType, FieldRole,
    InclusionSelector, LogicalType, ParseEnumError, SelectorKind, TimeFormatDialect,
    TIME_SELECTORS,
};
