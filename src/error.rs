//! Error types for fieldspec

use std::fmt;

use crate::field_model::FieldId;

/// Errors that can occur during parsing
#[derive(Debug)]
pub enum ParseError {
    /// IO error reading file
    Io {
        path: String,
        source: std::io::Error,
    },
    /// YAML deserialization error
    Yaml {
        source: serde_yaml::Error,
    },
    /// JSON deserialization error
    Json {
        source: serde_json::Error,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Io { path, source } => {
                write!(f, "Failed to read '{}': {}", path, source)
            }
            ParseError::Yaml { source } => {
                write!(f, "Invalid YAML: {}", source)
            }
            ParseError::Json { source } => {
                write!(f, "Invalid JSON: {}", source)
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Io { source, .. } => Some(source),
            ParseError::Yaml { source } => Some(source),
            ParseError::Json { source } => Some(source),
        }
    }
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        ParseError::Io {
            path: String::new(),
            source: err,
        }
    }
}

impl From<serde_yaml::Error> for ParseError {
    fn from(err: serde_yaml::Error) -> Self {
        ParseError::Yaml { source: err }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        ParseError::Json { source: err }
    }
}

/// Batch-level rejections raised before a dataset is handed to ingestion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    /// A user field uses a name the engine reserves
    ReservedName { name: String },
    /// Following mapper references from a field leads back to a visited field
    MapperCycle { field: String },
    /// A mapper reference points to no field of the dataset
    UnknownMapper { field: String, mapper: FieldId },
    /// Two fields share an id
    DuplicateId { id: FieldId },
}

impl DatasetError {
    /// Stable error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            DatasetError::ReservedName { .. } => "FD0001",
            DatasetError::MapperCycle { .. } => "FD0002",
            DatasetError::UnknownMapper { .. } => "FD0003",
            DatasetError::DuplicateId { .. } => "FD0004",
        }
    }
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::ReservedName { name } => {
                write!(f, "Field name '{}' is reserved by the engine", name)
            }
            DatasetError::MapperCycle { field } => {
                write!(f, "Mapper references of field '{}' form a cycle", field)
            }
            DatasetError::UnknownMapper { field, mapper } => {
                write!(f, "Field '{}' is mapped from unknown field id {}", field, mapper)
            }
            DatasetError::DuplicateId { id } => {
                write!(f, "Field id {} is used more than once", id)
            }
        }
    }
}

impl std::error::Error for DatasetError {}
