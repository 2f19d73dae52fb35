//! Integration tests for preparing a dataset for ingestion
//!
//! Loads datasets from YAML and checks the timestamp spec and aggregations
//! handed to the engine.

mod common;

use common::{fixed_now, load_config, load_fixture, prepare};
use fieldspec::{parser, AggregationKind, Dataset, FieldId, ParseError, ResolverConfig, SelectorKind};

#[test]
fn test_sales_timestamp_spec() {
    let prepared = prepare(load_fixture("sales.yaml"), &ResolverConfig::default(), false)
        .expect("Preparation should succeed");

    let spec = prepared.timestamp.expect("sales has a timestamp field");
    assert_eq!(spec.column, "order_date");
    assert_eq!(spec.format, "yyyy-MM-dd HH:mm:ss");
    assert_eq!(spec.timezone.as_deref(), Some("Asia/Seoul"));
    assert_eq!(spec.locale.as_deref(), Some("ko"));
    assert!(spec.replace_wrong_column);

    // invalid and missing values are both replaced by the resolution instant
    assert_eq!(spec.invalid_value, Some(fixed_now().with_timezone(&chrono_tz::Asia::Seoul).fixed_offset()));
    assert_eq!(spec.invalid_value, spec.missing_value);
}

#[test]
fn test_sales_aggregations_skip_derived_fields() {
    let prepared = prepare(load_fixture("sales.yaml"), &ResolverConfig::default(), false)
        .expect("Preparation should succeed");

    let kinds: Vec<(&str, AggregationKind)> = prepared
        .aggregations
        .iter()
        .map(|a| (a.name.as_str(), a.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![("amount", AggregationKind::Sum), ("amount_max", AggregationKind::Max)]
    );
    assert!(prepared.aggregations.iter().all(|a| a.input_type.as_deref() == Some("double")));
}

#[test]
fn test_sales_mandatory_filters() {
    let dataset = load_fixture("sales.yaml");
    let filters = dataset.filtering_fields();

    assert_eq!(filters.len(), 2);
    assert_eq!(filters[0].name, "order_month");
    assert_eq!(filters[0].filtering_options().unwrap().kind(), SelectorKind::Time);
    assert_eq!(filters[1].name, "region");
    assert_eq!(filters[1].filtering_options().unwrap().default_selector(), "SINGLE_COMBO");
}

#[test]
fn test_sales_mapped_fields() {
    let dataset = load_fixture("sales.yaml");
    let mapped = dataset.mapped_by(FieldId(4));
    assert_eq!(mapped.len(), 1);
    assert_eq!(mapped[0].name, "amount_max");
    assert!(dataset.get_field("store_location").unwrap().is_geo_type());
}

#[test]
fn test_cyclic_mapping_is_rejected() {
    let result = prepare(load_fixture("invalid_mapping.yaml"), &ResolverConfig::default(), false);
    let err = result.err().expect("Cycle should be rejected");
    assert!(err.contains("FD0002"), "{}", err);
}

#[test]
fn test_config_defaults_apply() {
    let config = load_config("config.yaml");
    let mut dataset = load_fixture("legacy.yaml");
    dataset.fields[0].set_format_text(r#"{"type":"custom","format":"yyyyMMdd"}"#);

    let spec = dataset.fields[0].timestamp_spec(&config, None);
    assert_eq!(spec.format, "yyyyMMdd");
    assert_eq!(spec.timezone.as_deref(), Some("America/New_York"));
    assert_eq!(spec.locale.as_deref(), Some("en_US"));
}

#[test]
fn test_load_through_model_types() {
    let dataset = Dataset::from_file("tests/test_data/sales.yaml").expect("sales.yaml should load");
    assert_eq!(dataset.name, "sales");
    assert_eq!(dataset.fields.len(), 7);

    let config = ResolverConfig::from_file("tests/test_data/config.yaml").expect("config.yaml should load");
    assert_eq!(config.default_timezone, "America/New_York");
    // keys absent from the file keep their defaults
    assert_eq!(config, load_config("config.yaml"));

    let err = Dataset::from_file("tests/test_data/missing.yaml").unwrap_err();
    assert!(matches!(err, ParseError::Io { .. }));
    assert!(ResolverConfig::from_file("tests/test_data/missing.yaml").is_err());
}

#[test]
fn test_empty_format_is_treated_as_absent() {
    let dataset = parser::parse_str(
        r#"
name: events
fields:
  - name: ts
    type: timestamp
    format: ""
"#,
    )
    .expect("Empty format should parse");

    let ts = dataset.timestamp_field().unwrap();
    assert!(ts.format().is_none());
    let spec = ts.timestamp_spec(&ResolverConfig::default(), None);
    assert_eq!(spec.format, "auto");
    assert!(spec.timezone.is_none());
}
