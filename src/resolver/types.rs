//! Timestamp spec handed to the ingestion engine

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// How the engine parses a column into event time
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimestampSpec {
    /// Source column (the field's original name)
    pub column: String,
    /// Datetime pattern, or one of `auto`, `posix`, `millis`
    pub format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Substitute for values that fail to parse
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid_value: Option<DateTime<FixedOffset>>,
    /// Substitute for absent values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_value: Option<DateTime<FixedOffset>>,
    /// Malformed values are substituted rather than rejected
    pub replace_wrong_column: bool,
}

impl TimestampSpec {
    pub const AUTO: &'static str = "auto";
    pub const POSIX: &'static str = "posix";
    pub const MILLIS: &'static str = "millis";

    pub(crate) fn for_column(column: &str) -> Self {
        Self {
            column: column.to_string(),
            format: Self::AUTO.to_string(),
            timezone: None,
            locale: None,
            invalid_value: None,
            missing_value: None,
            replace_wrong_column: true,
        }
    }
}
