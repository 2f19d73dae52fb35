//! Shared test utilities for integration tests

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use fieldspec::{
    parser, resolve_timestamp_spec_at, AggregationDescriptor, Dataset, FieldAnnotation,
    FieldRole, ResolverConfig, TimestampSpec,
};

/// Load a test fixture from the tests/test_data directory
pub fn load_fixture(name: &str) -> Dataset {
    let path = format!("tests/test_data/{}", name);
    parser::parse_file(&path)
        .unwrap_or_else(|e| panic!("Failed to load test data {}: {}", name, e))
}

pub fn load_config(name: &str) -> ResolverConfig {
    let path = format!("tests/test_data/{}", name);
    parser::parse_config_file(&path)
        .unwrap_or_else(|e| panic!("Failed to load config {}: {}", name, e))
}

/// Fixed resolution instant so substituted timestamps are comparable
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 30, 15, 0, 0).unwrap()
}

/// What the ingestion pipeline asks of a prepared dataset
pub struct PreparedDataset {
    pub dataset: Dataset,
    pub annotations: Vec<FieldAnnotation>,
    pub timestamp: Option<TimestampSpec>,
    pub aggregations: Vec<AggregationDescriptor>,
}

/// Run the full pass: validate → resolve duplicates → timestamp spec + measure aggregations
pub fn prepare(mut dataset: Dataset, config: &ResolverConfig, rename_original: bool) -> Result<PreparedDataset, String> {
    dataset.validate().map_err(|e| format!("Validation failed: {} ({})", e, e.code()))?;

    let annotations = dataset.resolve_duplicates(rename_original);

    let timestamp = dataset
        .fields
        .iter()
        .zip(&annotations)
        .find(|(f, _)| f.role() == FieldRole::Timestamp)
        .map(|(f, a)| resolve_timestamp_spec_at(a.original_name_of(f), f.format(), config, fixed_now()));

    let aggregations = dataset
        .fields
        .iter()
        .zip(&annotations)
        .filter(|(f, _)| f.role() == FieldRole::Measure && !f.is_not_physical_field())
        .map(|(f, a)| f.aggregation(false, Some(a)))
        .collect();

    Ok(PreparedDataset {
        dataset,
        annotations,
        timestamp,
        aggregations,
    })
}

/// Route library logs to the test writer; safe to call from every test
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
