//! Mandatory filter options

use serde::{Deserialize, Serialize};

use super::types::SelectorKind;
use crate::validator::{validate_selector, validate_selectors, ValidationError};

/// Recommended selectors of a mandatory filter.
///
/// Only constructed through [`FilterOption::new`], so every selector it holds
/// belongs to the vocabulary of its kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FilterOptionDocument", into = "FilterOptionDocument")]
pub struct FilterOption {
    kind: SelectorKind,
    default_selector: String,
    allow_selectors: Vec<String>,
}

impl FilterOption {
    /// Validate and build a filter option.
    ///
    /// Fails on the first invalid selector; nothing is built in that case.
    pub fn new<S: AsRef<str>>(
        kind: &str,
        default_selector: Option<&str>,
        allow_selectors: &[S],
    ) -> Result<Self, ValidationError> {
        let kind: SelectorKind = kind.parse().map_err(|_| ValidationError::UnknownEnumValue {
            field: "type".to_string(),
            value: kind.to_string(),
            expected: SelectorKind::LITERALS.iter().map(|s| s.to_string()).collect(),
        })?;

        let default_selector = default_selector.ok_or_else(|| ValidationError::MissingRequired {
            field: "defaultSelector".to_string(),
        })?;
        let default_selector = validate_selector(kind, default_selector)?.to_string();
        let allow_selectors = validate_selectors(kind, allow_selectors)?;

        Ok(Self {
            kind,
            default_selector,
            allow_selectors,
        })
    }

    /// Parse a filter option document
    pub fn from_value(value: serde_json::Value) -> Result<Self, ValidationError> {
        let doc: FilterOptionDocument =
            serde_json::from_value(value.clone()).map_err(|e| ValidationError::InvalidValue {
                field: "filteringOptions".to_string(),
                value: value.to_string(),
                message: e.to_string(),
            })?;
        Self::try_from(doc)
    }

    /// Canonical JSON text of this option
    pub fn to_json(&self) -> String {
        serde_json::to_value(self)
            .map(|v| v.to_string())
            .unwrap_or_else(|_| "{}".to_string())
    }

    pub fn kind(&self) -> SelectorKind {
        self.kind
    }

    pub fn default_selector(&self) -> &str {
        &self.default_selector
    }

    pub fn allow_selectors(&self) -> &[String] {
        &self.allow_selectors
    }
}

/// Wire shape: `{"type": "TIME", "defaultSelector": "RANGE", "allowSelectors": [...]}`
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FilterOptionDocument {
    #[serde(rename = "type")]
    kind: String,
    default_selector: Option<String>,
    #[serde(default)]
    allow_selectors: Option<Vec<String>>,
}

impl TryFrom<FilterOptionDocument> for FilterOption {
    type Error = ValidationError;

    fn try_from(doc: FilterOptionDocument) -> Result<Self, Self::Error> {
        FilterOption::new(
            &doc.kind,
            doc.default_selector.as_deref(),
            doc.allow_selectors.as_deref().unwrap_or_default(),
        )
    }
}

impl From<FilterOption> for FilterOptionDocument {
    fn from(option: FilterOption) -> Self {
        FilterOptionDocument {
            kind: option.kind.to_string(),
            default_selector: Some(option.default_selector),
            allow_selectors: Some(option.allow_selectors),
        }
    }
}
