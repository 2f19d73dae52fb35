//! Key/value change-sets applied to field descriptors

use serde::Deserialize;
use serde_json::{Map, Value};
use std::str::FromStr;

use super::types::ParseEnumError;
use crate::validator::ValidationError;

/// A flat change-set: only the keys present are touched
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct FieldPatch {
    values: Map<String, Value>,
}

impl FieldPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for tests and callers assembling patches by hand
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    pub fn has_property(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Raw value, `None` when absent or null
    pub fn get_value(&self, key: &str) -> Option<&Value> {
        self.values.get(key).filter(|v| !v.is_null())
    }

    pub fn get_str(&self, key: &str) -> Result<Option<String>, ValidationError> {
        match self.get_value(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(invalid(key, other, "expected a string")),
        }
    }

    /// Integer value; numeric strings are accepted
    pub fn get_long(&self, key: &str) -> Result<Option<i64>, ValidationError> {
        match self.get_value(key) {
            None => Ok(None),
            Some(Value::Number(n)) => n
                .as_i64()
                .map(Some)
                .ok_or_else(|| invalid(key, &Value::Number(n.clone()), "expected an integer")),
            Some(Value::String(s)) => s
                .trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|_| invalid(key, &Value::String(s.clone()), "expected an integer")),
            Some(other) => Err(invalid(key, other, "expected an integer")),
        }
    }

    /// Boolean value; `"true"`/`"false"` strings are accepted
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, ValidationError> {
        match self.get_value(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(Value::String(s)) if s.eq_ignore_ascii_case("true") => Ok(Some(true)),
            Some(Value::String(s)) if s.eq_ignore_ascii_case("false") => Ok(Some(false)),
            Some(other) => Err(invalid(key, other, "expected a boolean")),
        }
    }

    /// Enum literal, matched case-insensitively
    pub fn get_enum<T>(&self, key: &str) -> Result<Option<T>, ValidationError>
    where
        T: FromStr<Err = ParseEnumError>,
    {
        match self.get_str(key)? {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => s.parse::<T>().map(Some).map_err(|e| ValidationError::UnknownEnumValue {
                field: key.to_string(),
                value: s,
                expected: e.expected.iter().map(|l| l.to_string()).collect(),
            }),
        }
    }

    /// Like [`FieldPatch::get_enum`] but absence is an error
    pub fn require_enum<T>(&self, key: &str) -> Result<T, ValidationError>
    where
        T: FromStr<Err = ParseEnumError>,
    {
        self.get_enum(key)?.ok_or_else(|| missing(key))
    }

    pub fn require_str(&self, key: &str) -> Result<String, ValidationError> {
        self.get_str(key)?
            .filter(|s| !s.is_empty())
            .ok_or_else(|| missing(key))
    }

    pub fn require_long(&self, key: &str) -> Result<i64, ValidationError> {
        self.get_long(key)?.ok_or_else(|| missing(key))
    }
}

impl From<Map<String, Value>> for FieldPatch {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

impl TryFrom<Value> for FieldPatch {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(values) => Ok(Self { values }),
            other => Err(invalid("patch", &other, "expected an object")),
        }
    }
}

fn invalid(key: &str, value: &Value, message: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: key.to_string(),
        value: value.to_string(),
        message: message.to_string(),
    }
}

fn missing(key: &str) -> ValidationError {
    ValidationError::MissingRequired {
        field: key.to_string(),
    }
}
