//! Integration tests for duplicate field name resolution

mod common;

use common::{init_tracing, load_fixture, prepare};
use fieldspec::{AggregationKind, ResolverConfig};

#[test]
fn test_duplicates_renamed_in_order() {
    init_tracing();
    let mut dataset = load_fixture("duplicates.yaml");
    let annotations = dataset.resolve_duplicates(false);

    let names: Vec<&str> = dataset.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["a_DUP1", "b", "a_DUP2", "a_DUP3"]);

    for i in [0, 2, 3] {
        assert_eq!(dataset.fields[i].logical_name(), "a");
        assert!(annotations[i].duplicated);
        assert!(annotations[i].changed_name(&dataset.fields[i]));
    }
    assert!(!annotations[1].duplicated);
    assert!(!annotations[1].changed_name(&dataset.fields[1]));
}

#[test]
fn test_aggregation_reads_source_column() {
    let prepared = prepare(load_fixture("duplicates.yaml"), &ResolverConfig::default(), false)
        .expect("Preparation should succeed");

    // b (integer) and the third `a` (double) are measures
    assert_eq!(prepared.aggregations.len(), 2);
    let renamed = &prepared.aggregations[1];
    assert_eq!(renamed.kind, AggregationKind::Sum);
    assert_eq!(renamed.name, "a_DUP3");
    assert_eq!(renamed.field_name, "a");
}

#[test]
fn test_rename_original_pushes_new_name_to_source() {
    let prepared = prepare(load_fixture("duplicates.yaml"), &ResolverConfig::default(), true)
        .expect("Preparation should succeed");

    let renamed = &prepared.aggregations[1];
    assert_eq!(renamed.field_name, "a_DUP3");
    assert_eq!(prepared.annotations[0].original_name.as_deref(), Some("a_DUP1"));
    assert!(!prepared.annotations[0].changed_name(&prepared.dataset.fields[0]));
}

#[test]
fn test_sales_has_no_duplicates() {
    let mut dataset = load_fixture("sales.yaml");
    let before: Vec<String> = dataset.fields.iter().map(|f| f.name.clone()).collect();
    let annotations = dataset.resolve_duplicates(true);

    let after: Vec<String> = dataset.fields.iter().map(|f| f.name.clone()).collect();
    assert_eq!(before, after);
    assert!(annotations.iter().all(|a| a.original_name.is_none()));
}
