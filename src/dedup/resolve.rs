//! Duplicate name resolution
//!
//! Every field whose name occurs more than once in a batch is renamed with a
//! 1-based `_DUP{n}` suffix, counted in input order per name. The first
//! occurrence is renamed too.

use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::field_model::{FieldAnnotation, FieldDescriptor};

const DUPLICATE_SUFFIX: &str = "_DUP";

/// Rename colliding fields in place.
///
/// Returns one annotation per input field, in input order. Renamed fields
/// get `logical_name` set to their pre-rename name and are annotated as
/// duplicated; their annotated original name is the new name when
/// `rename_original` is set (the rename is pushed back to the source) and
/// the pre-rename name otherwise.
pub fn resolve_duplicates(fields: &mut [FieldDescriptor], rename_original: bool) -> Vec<FieldAnnotation> {
    let mut annotations = vec![FieldAnnotation::default(); fields.len()];

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for field in fields.iter() {
        *counts.entry(field.name.as_str()).or_default() += 1;
    }
    let duplicates: HashSet<String> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name.to_string())
        .collect();

    if duplicates.is_empty() {
        return annotations;
    }

    let mut occurrence: HashMap<String, usize> = HashMap::new();
    for (field, annotation) in fields.iter_mut().zip(annotations.iter_mut()) {
        if !duplicates.contains(&field.name) {
            continue;
        }

        let index = occurrence.entry(field.name.clone()).or_default();
        *index += 1;

        let original = std::mem::take(&mut field.name);
        let renamed = format!("{}{}{}", original, DUPLICATE_SUFFIX, index);
        debug!(from = %original, to = %renamed, "renaming duplicated field");

        field.name = renamed.clone();
        field.logical_name = Some(original.clone());
        annotation.duplicated = true;
        annotation.original_name = Some(if rename_original { renamed } else { original });
    }

    let mut seen = HashSet::new();
    for field in fields.iter() {
        if !seen.insert(field.name.as_str()) {
            warn!(name = %field.name, "field name still collides after duplicate resolution");
        }
    }

    annotations
}
