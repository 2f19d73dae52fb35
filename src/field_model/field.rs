//! Field descriptor

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::debug;

use super::filter_option::FilterOption;
use super::format::{FieldFormat, FormatValue};
use super::patch::FieldPatch;
use super::types::{
    parse_column_type, AggregationType, DataType, FieldRole, LogicalType, TimeFormatDialect,
};
use crate::config::ResolverConfig;
use crate::resolver::{backward_compatible, resolve_timestamp_spec, TimestampSpec};
use crate::selector::{select_aggregation, AggregationDescriptor};
use crate::validator::ValidationError;

/// Names a dataset must never give to a user field
pub const RESERVED_FIELDS: &[&str] = &["count", "__time", "timestamp"];

/// Engine name of the ingestion-time timestamp field
pub const FIELD_NAME_CURRENT_TIMESTAMP: &str = "__ctime";

/// Source column name standing for the current datetime
pub const COLUMN_NAME_CURRENT_DATETIME: &str = "current_datetime";

/// Identifier assigned by the owning store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(pub i64);

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Metadata describing one column of a dataset
///
/// The mandatory-filter attributes are private: `filtering_seq` and
/// `filtering_options` only exist while `filtering` is set.
///
/// Serialized output is a response shape: formats are written in canonical
/// document form, so legacy pattern text does not survive a serde round trip.
/// Persist through [`super::FieldRecord`] instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "FieldDocument")]
pub struct FieldDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<FieldId>,
    /// Name on the engine
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logical_name: Option<String>,
    /// Column name in the source before ingestion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub data_type: DataType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logical_type: Option<LogicalType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<FieldRole>,
    pub partitioned: bool,
    filtering: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    filtering_seq: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filtering_options: Option<FilterOption>,
    pub aggr_type: AggregationType,
    pub unloaded: bool,
    pub derived: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seq: Option<i64>,
    /// Opaque rule documents, interpreted by the ingestion pipeline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derivation_rule: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingestion_rule: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<FormatValue>,
    /// Field this one was mapped from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapper_ref: Option<FieldId>,
}

impl FieldDescriptor {
    /// Create a field whose role follows from its type
    pub fn new(name: impl Into<String>, data_type: DataType, seq: i64) -> Self {
        Self::with_role(name, data_type, None, seq)
    }

    pub fn with_role(
        name: impl Into<String>,
        data_type: DataType,
        role: Option<FieldRole>,
        seq: i64,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            logical_name: None,
            sql_name: None,
            description: None,
            data_type,
            logical_type: None,
            role: Some(role.unwrap_or_else(|| data_type.to_role())),
            partitioned: false,
            filtering: false,
            filtering_seq: None,
            filtering_options: None,
            aggr_type: AggregationType::None,
            unloaded: false,
            derived: false,
            seq: Some(seq),
            derivation_rule: None,
            ingestion_rule: None,
            format: None,
            mapper_ref: None,
        }
    }

    /// Placeholder timestamp field without a format, used when a dataset has
    /// no timestamp column of its own
    pub fn fake_timestamp() -> Self {
        let mut field = Self::new(FIELD_NAME_CURRENT_TIMESTAMP, DataType::Timestamp, 0);
        field.sql_name = Some(COLUMN_NAME_CURRENT_DATETIME.to_string());
        field
    }

    /// Build a field from a complete change-set.
    ///
    /// `name`, `type`, `role`, `logicalType`, `aggrType` and `seq` are required.
    pub fn from_patch(patch: &FieldPatch) -> Result<Self, ValidationError> {
        let name = patch.require_str("name")?;
        let data_type: DataType = patch.require_enum("type")?;
        let role: FieldRole = patch.require_enum("role")?;

        let mut field = Self::with_role(name, data_type, Some(role), patch.require_long("seq")?);
        field.logical_type = Some(patch.require_enum("logicalType")?);
        field.aggr_type = patch.require_enum("aggrType")?;
        field.logical_name = patch.get_str("logicalName")?;
        field.description = patch.get_str("description")?;

        if patch.get_bool("filtering")?.unwrap_or(false) {
            let seq = patch.get_long("filteringSeq")?;
            let options = parse_filter_option(patch)?;
            field.set_filtering(true, seq, options);
        }

        field.format = parse_format(patch.get_value("format"))?;

        Ok(field)
    }

    /// Apply the keys present in `patch`.
    ///
    /// Either every key applies or, on the first invalid value, none does.
    /// `name` and `type` are fixed once a field exists and are ignored here.
    pub fn update(&mut self, patch: &FieldPatch) -> Result<(), ValidationError> {
        let mut next = self.clone();

        for key in ["name", "type"] {
            if patch.has_property(key) {
                debug!(field = %self.name, key, "ignoring immutable key in field update");
            }
        }

        if patch.has_property("logicalName") {
            next.logical_name = patch.get_str("logicalName")?;
        }
        if patch.has_property("description") {
            next.description = patch.get_str("description")?;
        }
        if patch.has_property("role") {
            next.role = patch.get_enum("role")?;
        }
        if patch.has_property("logicalType") {
            next.logical_type = patch.get_enum("logicalType")?;
        }
        if patch.has_property("aggrType") {
            next.aggr_type = patch.get_enum("aggrType")?.unwrap_or_default();
        }
        if patch.has_property("format") {
            next.format = parse_format(patch.get_value("format"))?;
        }
        if patch.has_property("seq") {
            next.seq = patch.get_long("seq")?;
        }
        if patch.has_property("filtering") {
            next.filtering = patch.get_bool("filtering")?.unwrap_or(false);
        }

        if next.filtering {
            if patch.has_property("filteringOptions") {
                next.filtering_options = parse_filter_option(patch)?;
            }
            if patch.has_property("filteringSeq") {
                next.filtering_seq = patch.get_long("filteringSeq")?;
            }
        } else {
            next.filtering_options = None;
            next.filtering_seq = None;
        }

        *self = next;
        Ok(())
    }

    /// Display name, falling back to the engine name
    pub fn logical_name(&self) -> &str {
        match self.logical_name.as_deref() {
            Some(n) if !n.is_empty() => n,
            _ => &self.name,
        }
    }

    /// Logical type, falling back to the default of the physical type
    pub fn logical_type(&self) -> LogicalType {
        self.logical_type
            .unwrap_or_else(|| self.data_type.to_logical_type())
    }

    /// Role, falling back to the default of the physical type
    pub fn role(&self) -> FieldRole {
        self.role.unwrap_or_else(|| self.data_type.to_role())
    }

    pub fn filtering(&self) -> bool {
        self.filtering
    }

    pub fn filtering_seq(&self) -> Option<i64> {
        self.filtering_seq
    }

    pub fn filtering_options(&self) -> Option<&FilterOption> {
        self.filtering_options.as_ref()
    }

    /// Set the mandatory-filter state; sequence and options are dropped when
    /// `filtering` is false
    pub fn set_filtering(&mut self, filtering: bool, seq: Option<i64>, options: Option<FilterOption>) {
        self.filtering = filtering;
        if filtering {
            self.filtering_seq = seq;
            self.filtering_options = options;
        } else {
            self.filtering_seq = None;
            self.filtering_options = None;
        }
    }

    pub fn format(&self) -> Option<&FormatValue> {
        self.format.as_ref()
    }

    pub fn set_format(&mut self, format: Option<FormatValue>) {
        self.format = format;
    }

    /// Replace the format from stored text (legacy pattern or document)
    pub fn set_format_text(&mut self, raw: &str) {
        self.format = FormatValue::from_stored(raw);
    }

    /// Format as a document; legacy patterns come back as custom formats
    pub fn format_object(&self) -> Option<FieldFormat> {
        self.format.as_ref().map(FormatValue::to_field_format)
    }

    /// Canonical JSON text of the format
    pub fn format_document(&self) -> Option<String> {
        self.format_object().map(|f| f.to_json())
    }

    /// Datetime pattern of the field.
    ///
    /// Legacy text is returned verbatim, time formats give their pattern and
    /// anything else gives `None`.
    pub fn time_format(&self) -> Option<String> {
        match self.format.as_ref()? {
            FormatValue::Legacy(raw) => Some(raw.clone()),
            FormatValue::Document(format) => format.pattern().map(str::to_string),
        }
    }

    pub fn is_geo_type(&self) -> bool {
        self.logical_type().is_geo()
    }

    /// Derived or unloaded fields are not stored by the engine
    pub fn is_not_physical_field(&self) -> bool {
        self.derived || self.unloaded
    }

    /// Set type, role and (for date/time columns) format from a raw source
    /// column type name.
    ///
    /// The returned annotation records the raw type as `original_type`.
    pub fn apply_column_type(&mut self, dialect: &dyn TimeFormatDialect, column_type: &str) -> FieldAnnotation {
        let mapping = parse_column_type(dialect, column_type);
        self.data_type = mapping.data_type;
        self.role = Some(mapping.role);
        if let Some(format) = mapping.format {
            self.format = FormatValue::from_stored(&format);
        }
        FieldAnnotation {
            original_type: Some(column_type.to_string()),
            ..Default::default()
        }
    }

    /// Aggregation the engine applies to this field during ingestion
    pub fn aggregation(&self, is_relay: bool, annotation: Option<&FieldAnnotation>) -> AggregationDescriptor {
        let source = original_name(self, annotation);
        select_aggregation(
            Some(self.aggr_type),
            &self.name,
            source,
            self.logical_type(),
            is_relay,
        )
    }

    /// Timestamp spec for using this field as the event time
    pub fn timestamp_spec(&self, config: &ResolverConfig, annotation: Option<&FieldAnnotation>) -> TimestampSpec {
        resolve_timestamp_spec(original_name(self, annotation), self.format.as_ref(), config)
    }

    /// Whether old-style timezone handling applies to this field
    pub fn backward_time(&self) -> bool {
        backward_compatible(self.format.as_ref())
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Field{{id={}, name='{}', type={}, logicalType={}, role={}, format={}}}",
            self.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
            self.name,
            self.data_type,
            self.logical_type(),
            self.role(),
            self.format_document().unwrap_or_default()
        )
    }
}

/// Request-scoped attributes of a field, produced by a processing pass
/// (such as duplicate resolution) and never persisted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldAnnotation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_type: Option<String>,
    pub duplicated: bool,
}

impl FieldAnnotation {
    /// Original name recorded for `field`, or its engine name
    pub fn original_name_of<'a>(&'a self, field: &'a FieldDescriptor) -> &'a str {
        match self.original_name.as_deref() {
            Some(n) if !n.is_empty() => n,
            _ => &field.name,
        }
    }

    /// Whether the engine name of `field` differs from its original name
    pub fn changed_name(&self, field: &FieldDescriptor) -> bool {
        if field.name.is_empty() {
            return false;
        }
        field.name != self.original_name_of(field)
    }
}

fn original_name<'a>(field: &'a FieldDescriptor, annotation: Option<&'a FieldAnnotation>) -> &'a str {
    match annotation {
        Some(a) => a.original_name_of(field),
        None => &field.name,
    }
}

fn parse_filter_option(patch: &FieldPatch) -> Result<Option<FilterOption>, ValidationError> {
    patch
        .get_value("filteringOptions")
        .cloned()
        .map(FilterOption::from_value)
        .transpose()
}

/// Format from a patch value: null clears, a string is stored text, an
/// object must be a format document
fn parse_format(value: Option<&Value>) -> Result<Option<FormatValue>, ValidationError> {
    match value {
        None => Ok(None),
        Some(Value::String(raw)) => Ok(FormatValue::from_stored(raw)),
        Some(value @ Value::Object(_)) => FieldFormat::from_value(value.clone())
            .map(|f| Some(FormatValue::Document(f)))
            .map_err(|e| ValidationError::InvalidFormat {
                value: value.to_string(),
                message: e.to_string(),
            }),
        Some(other) => Err(ValidationError::InvalidFormat {
            value: other.to_string(),
            message: "expected a pattern string or a format document".to_string(),
        }),
    }
}

/// Deserialized shape of a field; normalized into [`FieldDescriptor`]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldDocument {
    id: Option<FieldId>,
    name: String,
    logical_name: Option<String>,
    sql_name: Option<String>,
    description: Option<String>,
    #[serde(rename = "type")]
    data_type: DataType,
    logical_type: Option<LogicalType>,
    role: Option<FieldRole>,
    #[serde(default)]
    partitioned: bool,
    #[serde(default)]
    filtering: bool,
    filtering_seq: Option<i64>,
    filtering_options: Option<FilterOption>,
    #[serde(default)]
    aggr_type: AggregationType,
    #[serde(default)]
    unloaded: bool,
    #[serde(default)]
    derived: bool,
    seq: Option<i64>,
    derivation_rule: Option<Value>,
    ingestion_rule: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_format")]
    format: Option<FormatValue>,
    mapper_ref: Option<FieldId>,
}

/// Same rules as a patch value: empty text and null mean no format
fn deserialize_format<'de, D>(deserializer: D) -> Result<Option<FormatValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    parse_format(value.as_ref()).map_err(serde::de::Error::custom)
}

impl From<FieldDocument> for FieldDescriptor {
    fn from(doc: FieldDocument) -> Self {
        let mut field = FieldDescriptor {
            id: doc.id,
            name: doc.name,
            logical_name: doc.logical_name,
            sql_name: doc.sql_name,
            description: doc.description,
            data_type: doc.data_type,
            logical_type: doc.logical_type,
            role: Some(doc.role.unwrap_or_else(|| doc.data_type.to_role())),
            partitioned: doc.partitioned,
            filtering: false,
            filtering_seq: None,
            filtering_options: None,
            aggr_type: doc.aggr_type,
            unloaded: doc.unloaded,
            derived: doc.derived,
            seq: doc.seq,
            derivation_rule: doc.derivation_rule,
            ingestion_rule: doc.ingestion_rule,
            format: doc.format,
            mapper_ref: doc.mapper_ref,
        };
        field.set_filtering(doc.filtering, doc.filtering_seq, doc.filtering_options);
        field
    }
}
