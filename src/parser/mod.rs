//! Dataset and configuration parser (verb module)
//!
//! Transforms YAML/JSON documents into model types.

use std::path::Path;
use crate::config::ResolverConfig;
use crate::error::ParseError;
use crate::field_model::{Dataset, FieldPatch};

fn read(path: &Path) -> Result<String, ParseError> {
    std::fs::read_to_string(path).map_err(|e| ParseError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

/// Parse a dataset from a YAML file
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Dataset, ParseError> {
    parse_str(&read(path.as_ref())?)
}

/// Parse a dataset from a YAML string
pub fn parse_str(yaml: &str) -> Result<Dataset, ParseError> {
    serde_yaml::from_str(yaml).map_err(ParseError::from)
}

/// Parse a dataset from a JSON string
pub fn parse_json(json: &str) -> Result<Dataset, ParseError> {
    serde_json::from_str(json).map_err(ParseError::from)
}

/// Parse resolver configuration from a YAML file
pub fn parse_config_file<P: AsRef<Path>>(path: P) -> Result<ResolverConfig, ParseError> {
    parse_config_str(&read(path.as_ref())?)
}

/// Parse resolver configuration from a YAML string
pub fn parse_config_str(yaml: &str) -> Result<ResolverConfig, ParseError> {
    serde_yaml::from_str(yaml).map_err(ParseError::from)
}

/// Parse a JSON change-set
pub fn parse_patch(json: &str) -> Result<FieldPatch, ParseError> {
    serde_json::from_str(json).map_err(ParseError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_model::{DataType, FieldFormat, FieldRole, TimeUnit};
    use std::io::Write;

    const SALES: &str = r#"
name: sales
fields:
  - name: order_date
    type: timestamp
    format:
      type: unix_time
      unit: SECOND
  - name: region
    type: string
    filtering: true
    filteringSeq: 1
    filteringOptions:
      type: INCLUSION
      defaultSelector: SINGLE_COMBO
      allowSelectors: [SINGLE_COMBO, MULTI_LIST]
  - name: amount
    type: double
    aggrType: sum
"#;

    #[test]
    fn test_parse_dataset() {
        let ds = parse_str(SALES).unwrap();
        assert_eq!(ds.name, "sales");
        assert_eq!(ds.fields.len(), 3);

        let ts = ds.get_field("order_date").unwrap();
        assert_eq!(ts.role(), FieldRole::Timestamp);
        assert_eq!(ts.format_object(), Some(FieldFormat::unix_time(Some(TimeUnit::Second))));

        let region = ds.get_field("region").unwrap();
        assert_eq!(region.filtering_options().unwrap().allow_selectors().len(), 2);

        assert_eq!(ds.get_field("amount").unwrap().data_type, DataType::Double);
    }

    #[test]
    fn test_parse_invalid_selector_fails() {
        let yaml = SALES.replace("MULTI_LIST", "RANGE");
        assert!(parse_str(&yaml).is_err());
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = parse_str("not: [valid: yaml");
        assert!(matches!(result, Err(ParseError::Yaml { .. })));
    }

    #[test]
    fn test_parse_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SALES.as_bytes()).unwrap();
        let ds = parse_file(file.path()).unwrap();
        assert_eq!(ds.fields.len(), 3);

        let err = parse_file("does/not/exist.yaml").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.yaml"));
    }

    #[test]
    fn test_parse_json_and_patch() {
        let ds = parse_json(r#"{"name": "d", "fields": [{"name": "f", "type": "LONG"}]}"#).unwrap();
        assert_eq!(ds.fields[0].data_type, DataType::Long);

        let patch = parse_patch(r#"{"logicalName": "F"}"#).unwrap();
        assert!(patch.has_property("logicalName"));
        assert!(matches!(parse_patch("[1]"), Err(ParseError::Json { .. })));
    }

    #[test]
    fn test_parse_config() {
        let config = parse_config_str("defaultLocale: ko\ndefaultTimezone: Asia/Seoul\n").unwrap();
        assert_eq!(config.default_locale, "ko");
        assert_eq!(config.default_timezone, "Asia/Seoul");
    }
}
