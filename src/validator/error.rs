//! Validation error types

use std::fmt;

use crate::field_model::SelectorKind;

/// Rejection of a patch value, enum literal or filter selector.
///
/// Every variant names the offending field and, where there is one, its value.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required patch key is absent or null
    MissingRequired { field: String },
    /// An enum literal outside its vocabulary
    UnknownEnumValue {
        field: String,
        value: String,
        expected: Vec<String>,
    },
    /// A value of the wrong shape (e.g. a string where a number is expected)
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },
    /// A selector not allowed for the filter kind
    InvalidSelector { kind: SelectorKind, selector: String },
    /// A format value that is neither a pattern string nor a format document
    InvalidFormat { value: String, message: String },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &str {
        match self {
            Self::MissingRequired { field }
            | Self::UnknownEnumValue { field, .. }
            | Self::InvalidValue { field, .. } => field,
            Self::InvalidSelector { .. } => "filteringOptions",
            Self::InvalidFormat { .. } => "format",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRequired { field } => write!(f, "'{}' is required", field),
            Self::UnknownEnumValue { field, value, expected } => write!(
                f,
                "Invalid value '{}' for '{}'. Valid options: {}",
                value,
                field,
                expected.join(", ")
            ),
            Self::InvalidValue { field, value, message } => {
                write!(f, "Invalid value '{}' for '{}': {}", value, field, message)
            }
            Self::InvalidSelector { kind, selector } => {
                write!(f, "Invalid selector name '{}' for {} filter", selector, kind)
            }
            Self::InvalidFormat { value, message } => {
                write!(f, "Invalid format '{}': {}", value, message)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
