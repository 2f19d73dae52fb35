//! Persisted form of a field descriptor
//!
//! A flat row with each embedded document kept as text: format and filter
//! options in canonical JSON (legacy format patterns verbatim), rules as the
//! JSON they arrived with.

use serde::{Deserialize, Serialize};

use super::field::{FieldDescriptor, FieldId};
use super::filter_option::FilterOption;
use super::format::FormatValue;
use super::types::{AggregationType, DataType, FieldRole, LogicalType};
use crate::validator::ValidationError;

/// Current record layout
pub const RECORD_VERSION: u32 = 1;

/// Flat, versioned storage row of a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRecord {
    pub version: u32,
    pub id: Option<FieldId>,
    pub name: String,
    pub logical_name: Option<String>,
    pub sql_name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub data_type: DataType,
    pub logical_type: Option<LogicalType>,
    pub role: Option<FieldRole>,
    pub partitioned: bool,
    pub filtering: bool,
    pub filtering_seq: Option<i64>,
    pub filtering_options: Option<String>,
    pub aggr_type: AggregationType,
    pub unloaded: bool,
    pub derived: bool,
    pub seq: Option<i64>,
    pub derivation_rule: Option<String>,
    pub ingestion_rule: Option<String>,
    pub format: Option<String>,
    pub mapper_ref: Option<FieldId>,
}

impl FieldRecord {
    pub fn encode(field: &FieldDescriptor) -> Self {
        Self {
            version: RECORD_VERSION,
            id: field.id,
            name: field.name.clone(),
            logical_name: field.logical_name.clone(),
            sql_name: field.sql_name.clone(),
            description: field.description.clone(),
            data_type: field.data_type,
            logical_type: field.logical_type,
            role: field.role,
            partitioned: field.partitioned,
            filtering: field.filtering(),
            filtering_seq: field.filtering_seq(),
            filtering_options: field.filtering_options().map(FilterOption::to_json),
            aggr_type: field.aggr_type,
            unloaded: field.unloaded,
            derived: field.derived,
            seq: field.seq,
            derivation_rule: field.derivation_rule.as_ref().map(|v| v.to_string()),
            ingestion_rule: field.ingestion_rule.as_ref().map(|v| v.to_string()),
            format: field.format().map(FormatValue::to_stored),
            mapper_ref: field.mapper_ref,
        }
    }

    /// Rebuild the descriptor. Embedded documents are validated again.
    pub fn decode(&self) -> Result<FieldDescriptor, ValidationError> {
        if self.version != RECORD_VERSION {
            return Err(ValidationError::InvalidValue {
                field: "version".to_string(),
                value: self.version.to_string(),
                message: format!("unsupported record version, expected {}", RECORD_VERSION),
            });
        }

        let mut field = FieldDescriptor::with_role(
            self.name.clone(),
            self.data_type,
            self.role,
            self.seq.unwrap_or_default(),
        );
        field.role = self.role;
        field.seq = self.seq;
        field.id = self.id;
        field.logical_name = self.logical_name.clone();
        field.sql_name = self.sql_name.clone();
        field.description = self.description.clone();
        field.logical_type = self.logical_type;
        field.partitioned = self.partitioned;
        field.aggr_type = self.aggr_type;
        field.unloaded = self.unloaded;
        field.derived = self.derived;
        field.mapper_ref = self.mapper_ref;
        field.derivation_rule = parse_rule("derivationRule", self.derivation_rule.as_deref())?;
        field.ingestion_rule = parse_rule("ingestionRule", self.ingestion_rule.as_deref())?;
        field.set_format(self.format.as_deref().and_then(FormatValue::from_stored));

        let options = match self.filtering_options.as_deref() {
            Some(text) => Some(FilterOption::from_value(parse_json("filteringOptions", text)?)?),
            None => None,
        };
        field.set_filtering(self.filtering, self.filtering_seq, options);

        Ok(field)
    }
}

fn parse_json(field: &str, text: &str) -> Result<serde_json::Value, ValidationError> {
    serde_json::from_str(text).map_err(|e| ValidationError::InvalidValue {
        field: field.to_string(),
        value: text.to_string(),
        message: e.to_string(),
    })
}

fn parse_rule(field: &str, text: Option<&str>) -> Result<Option<serde_json::Value>, ValidationError> {
    text.map(|t| parse_json(field, t)).transpose()
}
