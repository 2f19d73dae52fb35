//! Resolver configuration

use serde::Deserialize;
use std::path::Path;

use crate::error::ParseError;
use crate::field_model::TimeFormatDialect;

/// System defaults used when a field does not specify its own
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolverConfig {
    /// Timezone id for time formats without one (e.g. "UTC", "Asia/Seoul")
    pub default_timezone: String,
    pub default_locale: String,
    /// Pattern given to date/time source columns
    pub default_time_format: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_timezone: "UTC".to_string(),
            default_locale: "en".to_string(),
            default_time_format: "yyyy-MM-dd HH:mm:ss".to_string(),
        }
    }
}

impl ResolverConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        crate::parser::parse_config_file(path)
    }
}

impl TimeFormatDialect for ResolverConfig {
    fn default_time_format(&self) -> Option<String> {
        if self.default_time_format.is_empty() {
            None
        } else {
            Some(self.default_time_format.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: ResolverConfig = serde_yaml::from_str("defaultTimezone: Asia/Seoul\n").unwrap();
        assert_eq!(config.default_timezone, "Asia/Seoul");
        assert_eq!(config.default_locale, "en");
        assert_eq!(config.default_time_format().as_deref(), Some("yyyy-MM-dd HH:mm:ss"));
    }

    #[test]
    fn test_empty_time_format_means_none() {
        let config = ResolverConfig {
            default_time_format: String::new(),
            ..Default::default()
        };
        assert!(config.default_time_format().is_none());
    }
}
