//! Field format documents
//!
//! A format is stored either as a tagged JSON document or, for fields created
//! before documents existed, as a bare datetime pattern string.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use super::types::{literal_enum, ParseEnumError};

/// Time unit used by unix-epoch and continuous formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

literal_enum!(TimeUnit, "time unit", [
    (Millisecond, "MILLISECOND"),
    (Second, "SECOND"),
    (Minute, "MINUTE"),
    (Hour, "HOUR"),
    (Day, "DAY"),
    (Week, "WEEK"),
    (Month, "MONTH"),
    (Quarter, "QUARTER"),
    (Year, "YEAR"),
]);

impl TimeUnit {
    /// Datetime pattern that truncates values to this unit
    pub fn default_pattern(&self) -> &'static str {
        match self {
            TimeUnit::Millisecond => "yyyy-MM-dd HH:mm:ss.SSS",
            TimeUnit::Second => "yyyy-MM-dd HH:mm:ss",
            TimeUnit::Minute => "yyyy-MM-dd HH:mm",
            TimeUnit::Hour => "yyyy-MM-dd HH",
            TimeUnit::Day => "yyyy-MM-dd",
            TimeUnit::Week => "xxxx-ww",
            TimeUnit::Month => "yyyy-MM",
            TimeUnit::Quarter => "yyyy-QQ",
            TimeUnit::Year => "yyyy",
        }
    }
}

/// Timezone and locale shared by every time-bearing format
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeSettings {
    pub timezone: Option<String>,
    pub locale: Option<String>,
}

impl TimeSettings {
    /// Timezone of the format, or `default` when none is set
    pub fn select_timezone<'a>(&'a self, default: &'a str) -> &'a str {
        match self.timezone.as_deref() {
            Some(tz) if !tz.trim().is_empty() => tz,
            _ => default,
        }
    }

    pub fn select_locale<'a>(&'a self, default: &'a str) -> &'a str {
        match self.locale.as_deref() {
            Some(locale) if !locale.trim().is_empty() => locale,
            _ => default,
        }
    }
}

/// A field format document
#[derive(Debug, Clone, PartialEq)]
pub enum FieldFormat {
    /// Explicit datetime pattern: `{"type": "custom", "format": "yyyy-MM-dd"}`
    Custom { pattern: String, time: TimeSettings },
    /// Epoch number: `{"type": "unix_time", "unit": "SECOND"}`
    UnixTime { unit: Option<TimeUnit>, time: TimeSettings },
    /// Continuous (relative) time bucketed by unit
    Continuous {
        pattern: Option<String>,
        unit: Option<TimeUnit>,
        time: TimeSettings,
    },
    /// No type tag, no time semantics
    Default,
}

impl FieldFormat {
    /// Custom pattern with no timezone or locale
    pub fn custom(pattern: impl Into<String>) -> Self {
        FieldFormat::Custom {
            pattern: pattern.into(),
            time: TimeSettings::default(),
        }
    }

    pub fn unix_time(unit: Option<TimeUnit>) -> Self {
        FieldFormat::UnixTime {
            unit,
            time: TimeSettings::default(),
        }
    }

    /// Wire tag of this variant, `None` for [`FieldFormat::Default`]
    pub fn type_name(&self) -> Option<&'static str> {
        match self {
            FieldFormat::Custom { .. } => Some("custom"),
            FieldFormat::UnixTime { .. } => Some("unix_time"),
            FieldFormat::Continuous { .. } => Some("continuous"),
            FieldFormat::Default => None,
        }
    }

    /// Timezone/locale of time-bearing variants
    pub fn time_settings(&self) -> Option<&TimeSettings> {
        match self {
            FieldFormat::Custom { time, .. }
            | FieldFormat::UnixTime { time, .. }
            | FieldFormat::Continuous { time, .. } => Some(time),
            FieldFormat::Default => None,
        }
    }

    pub fn is_time_format(&self) -> bool {
        self.time_settings().is_some()
    }

    /// Datetime pattern of the format, if it has one.
    ///
    /// Continuous formats without an explicit pattern use the pattern of their unit.
    pub fn pattern(&self) -> Option<&str> {
        match self {
            FieldFormat::Custom { pattern, .. } => Some(pattern),
            FieldFormat::Continuous { pattern: Some(p), .. } => Some(p),
            FieldFormat::Continuous { pattern: None, unit, .. } => {
                unit.map(|u| u.default_pattern())
            }
            FieldFormat::UnixTime { .. } | FieldFormat::Default => None,
        }
    }

    /// Parse a format document from a JSON value
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Canonical tagged JSON text of this document
    pub fn to_json(&self) -> String {
        serde_json::to_value(self)
            .map(|v| v.to_string())
            .unwrap_or_else(|_| "{}".to_string())
    }
}

/// Flat wire shape shared by all variants
#[derive(Debug, Default, Serialize, Deserialize)]
struct FormatDocument {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    unit: Option<TimeUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    locale: Option<String>,
}

impl<'de> Deserialize<'de> for FieldFormat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        let doc = FormatDocument::deserialize(deserializer)?;
        let time = TimeSettings {
            timezone: doc.timezone,
            locale: doc.locale,
        };

        match doc.type_name.as_deref().map(str::to_lowercase).as_deref() {
            None | Some("default") => Ok(FieldFormat::Default),
            Some("custom") => {
                let pattern = doc
                    .format
                    .filter(|p| !p.is_empty())
                    .ok_or_else(|| D::Error::custom("custom format requires a 'format' pattern"))?;
                Ok(FieldFormat::Custom { pattern, time })
            }
            Some("unix_time") => Ok(FieldFormat::UnixTime { unit: doc.unit, time }),
            Some("continuous") => {
                if doc.format.is_none() && doc.unit.is_none() {
                    return Err(D::Error::custom(
                        "continuous format requires a 'format' pattern or a 'unit'",
                    ));
                }
                Ok(FieldFormat::Continuous {
                    pattern: doc.format,
                    unit: doc.unit,
                    time,
                })
            }
            Some(other) => Err(D::Error::custom(format!(
                "unknown format type '{}'. Valid options: custom, unix_time, continuous",
                other
            ))),
        }
    }
}

impl Serialize for FieldFormat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut doc = FormatDocument {
            type_name: self.type_name().map(str::to_string),
            ..Default::default()
        };
        match self {
            FieldFormat::Custom { pattern, .. } => doc.format = Some(pattern.clone()),
            FieldFormat::UnixTime { unit, .. } => doc.unit = *unit,
            FieldFormat::Continuous { pattern, unit, .. } => {
                doc.format = pattern.clone();
                doc.unit = *unit;
            }
            FieldFormat::Default => {}
        }
        if let Some(time) = self.time_settings() {
            doc.timezone = time.timezone.clone();
            doc.locale = time.locale.clone();
        }
        doc.serialize(serializer)
    }
}

/// Format as held by a field: a tagged document or a legacy bare pattern
#[derive(Debug, Clone, PartialEq)]
pub enum FormatValue {
    Document(FieldFormat),
    /// Plain text that did not parse as a document
    Legacy(String),
}

impl FormatValue {
    /// Interpret stored format text. Empty text means no format.
    pub fn from_stored(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        match serde_json::from_str::<FieldFormat>(raw) {
            Ok(format) => Some(FormatValue::Document(format)),
            Err(e) => {
                debug!(raw, error = %e, "format is not a document, keeping it as a legacy pattern");
                Some(FormatValue::Legacy(raw.to_string()))
            }
        }
    }

    /// Text to persist: legacy patterns verbatim, documents in canonical form
    pub fn to_stored(&self) -> String {
        match self {
            FormatValue::Document(format) => format.to_json(),
            FormatValue::Legacy(raw) => raw.clone(),
        }
    }

    /// The document this value stands for; legacy text becomes a custom pattern
    pub fn to_field_format(&self) -> FieldFormat {
        match self {
            FormatValue::Document(format) => format.clone(),
            FormatValue::Legacy(raw) => FieldFormat::custom(raw.clone()),
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, FormatValue::Legacy(_))
    }
}

impl Serialize for FormatValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_field_format().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FormatValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(raw) => FormatValue::from_stored(&raw)
                .ok_or_else(|| D::Error::custom("format must not be empty")),
            value => FieldFormat::from_value(value)
                .map(FormatValue::Document)
                .map_err(D::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_variants() {
        let f: FieldFormat = serde_json::from_value(json!({
            "type": "custom", "format": "yyyyMMdd", "timezone": "Asia/Seoul", "locale": "ko"
        }))
        .unwrap();
        assert_eq!(f.pattern(), Some("yyyyMMdd"));
        assert_eq!(f.time_settings().unwrap().timezone.as_deref(), Some("Asia/Seoul"));

        let f: FieldFormat = serde_json::from_value(json!({"type": "unix_time", "unit": "second"})).unwrap();
        assert_eq!(f, FieldFormat::unix_time(Some(TimeUnit::Second)));

        let f: FieldFormat = serde_json::from_value(json!({"type": "continuous", "unit": "DAY"})).unwrap();
        assert_eq!(f.pattern(), Some("yyyy-MM-dd"));

        let f: FieldFormat = serde_json::from_value(json!({})).unwrap();
        assert_eq!(f, FieldFormat::Default);
        assert!(!f.is_time_format());
    }

    #[test]
    fn test_parse_errors() {
        assert!(serde_json::from_value::<FieldFormat>(json!({"type": "custom"})).is_err());
        assert!(serde_json::from_value::<FieldFormat>(json!({"type": "continuous"})).is_err());
        assert!(serde_json::from_value::<FieldFormat>(json!({"type": "currency"})).is_err());
        assert!(serde_json::from_value::<FieldFormat>(json!({"type": "unix_time", "unit": "EON"})).is_err());
    }

    #[test]
    fn test_document_roundtrip() {
        let formats = vec![
            FieldFormat::Custom {
                pattern: "yyyy-MM-dd".into(),
                time: TimeSettings { timezone: Some("UTC".into()), locale: Some("en".into()) },
            },
            FieldFormat::unix_time(Some(TimeUnit::Millisecond)),
            FieldFormat::unix_time(None),
            FieldFormat::Continuous {
                pattern: Some("yyyy-MM".into()),
                unit: Some(TimeUnit::Month),
                time: TimeSettings::default(),
            },
            FieldFormat::Default,
        ];

        for format in formats {
            let text = format.to_json();
            let parsed: FieldFormat = serde_json::from_str(&text).unwrap();
            assert_eq!(format, parsed, "{}", text);
        }
    }

    #[test]
    fn test_canonical_shape() {
        let value = serde_json::to_value(FieldFormat::unix_time(Some(TimeUnit::Second))).unwrap();
        assert_eq!(value, json!({"type": "unix_time", "unit": "SECOND"}));
        assert_eq!(serde_json::to_value(FieldFormat::Default).unwrap(), json!({}));
    }

    #[test]
    fn test_legacy_string() {
        let value = FormatValue::from_stored("yyyy-MM-dd").unwrap();
        assert!(value.is_legacy());
        assert_eq!(value.to_field_format(), FieldFormat::custom("yyyy-MM-dd"));
        assert_eq!(value.to_stored(), "yyyy-MM-dd");
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!({"type": "custom", "format": "yyyy-MM-dd"})
        );
        assert!(FormatValue::from_stored("").is_none());
    }

    #[test]
    fn test_stored_document() {
        let value = FormatValue::from_stored(r#"{"type":"unix_time","unit":"SECOND"}"#).unwrap();
        assert!(!value.is_legacy());
        assert_eq!(value.to_field_format(), FieldFormat::unix_time(Some(TimeUnit::Second)));
    }

    #[test]
    fn test_select_timezone() {
        let time = TimeSettings { timezone: Some(" ".into()), locale: None };
        assert_eq!(time.select_timezone("UTC"), "UTC");
        assert_eq!(time.select_locale("en"), "en");
    }
}
