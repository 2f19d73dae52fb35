//! Dataset: the ordered field list of one ingestion target

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use super::field::{FieldAnnotation, FieldDescriptor, FieldId, RESERVED_FIELDS};
use super::types::FieldRole;
use crate::error::{DatasetError, ParseError};

/// Ordered batch of field descriptors belonging to one dataset
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Dataset {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl Dataset {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Load a dataset from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        crate::parser::parse_file(path)
    }

    /// Get a field by engine name
    pub fn get_field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn get_field_by_id(&self, id: FieldId) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.id == Some(id))
    }

    /// Fields mapped from the field with `id`.
    ///
    /// Computed on each call; the reverse relation is never stored.
    pub fn mapped_by(&self, id: FieldId) -> Vec<&FieldDescriptor> {
        self.fields
            .iter()
            .filter(|f| f.mapper_ref == Some(id))
            .collect()
    }

    /// First field with the timestamp role
    pub fn timestamp_field(&self) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.role() == FieldRole::Timestamp)
    }

    /// Mandatory-filter fields ordered by filtering sequence, unsequenced last
    pub fn filtering_fields(&self) -> Vec<&FieldDescriptor> {
        let mut fields: Vec<&FieldDescriptor> = self.fields.iter().filter(|f| f.filtering()).collect();
        fields.sort_by_key(|f| (f.filtering_seq().is_none(), f.filtering_seq()));
        fields
    }

    /// Fields the engine actually stores
    pub fn physical_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| !f.is_not_physical_field())
    }

    /// Rename colliding fields; see [`crate::dedup::resolve_duplicates`]
    pub fn resolve_duplicates(&mut self, rename_original: bool) -> Vec<FieldAnnotation> {
        crate::dedup::resolve_duplicates(&mut self.fields, rename_original)
    }

    /// Reject user fields named after engine-reserved names
    pub fn check_reserved_names(&self) -> Result<(), DatasetError> {
        for field in &self.fields {
            if RESERVED_FIELDS.iter().any(|r| r.eq_ignore_ascii_case(&field.name)) {
                return Err(DatasetError::ReservedName {
                    name: field.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Reject repeated ids
    pub fn check_ids(&self) -> Result<(), DatasetError> {
        let mut seen = HashSet::new();
        for id in self.fields.iter().filter_map(|f| f.id) {
            if !seen.insert(id) {
                return Err(DatasetError::DuplicateId { id });
            }
        }
        Ok(())
    }

    /// Reject mapper references that point nowhere or loop back
    pub fn check_mapper_cycles(&self) -> Result<(), DatasetError> {
        let mappers: HashMap<FieldId, Option<FieldId>> = self
            .fields
            .iter()
            .filter_map(|f| f.id.map(|id| (id, f.mapper_ref)))
            .collect();

        for field in &self.fields {
            let mut visited = HashSet::new();
            if let Some(id) = field.id {
                visited.insert(id);
            }

            let mut next = field.mapper_ref;
            while let Some(mapper) = next {
                if !visited.insert(mapper) {
                    return Err(DatasetError::MapperCycle {
                        field: field.name.clone(),
                    });
                }
                next = match mappers.get(&mapper) {
                    Some(parent) => *parent,
                    None => {
                        return Err(DatasetError::UnknownMapper {
                            field: field.name.clone(),
                            mapper,
                        })
                    }
                };
            }
        }
        Ok(())
    }

    /// Run all batch checks
    pub fn validate(&self) -> Result<(), DatasetError> {
        self.check_reserved_names()?;
        self.check_ids()?;
        self.check_mapper_cycles()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_model::{DataType, FieldPatch};
    use serde_json::json;

    fn field(id: i64, name: &str, mapper: Option<i64>) -> FieldDescriptor {
        let mut f = FieldDescriptor::new(name, DataType::String, id);
        f.id = Some(FieldId(id));
        f.mapper_ref = mapper.map(FieldId);
        f
    }

    #[test]
    fn test_mapped_by() {
        let ds = Dataset::new("d", vec![field(1, "a", None), field(2, "b", Some(1)), field(3, "c", Some(1))]);
        let names: Vec<&str> = ds.mapped_by(FieldId(1)).iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c"]);
        assert!(ds.mapped_by(FieldId(2)).is_empty());
        assert!(ds.check_mapper_cycles().is_ok());
    }

    #[test]
    fn test_mapper_cycle() {
        let ds = Dataset::new("d", vec![field(1, "a", Some(2)), field(2, "b", Some(1))]);
        assert!(matches!(ds.check_mapper_cycles(), Err(DatasetError::MapperCycle { .. })));

        let ds = Dataset::new("d", vec![field(1, "a", Some(1))]);
        assert!(matches!(ds.check_mapper_cycles(), Err(DatasetError::MapperCycle { .. })));
    }

    #[test]
    fn test_unknown_mapper() {
        let ds = Dataset::new("d", vec![field(1, "a", Some(9))]);
        assert_eq!(
            ds.check_mapper_cycles(),
            Err(DatasetError::UnknownMapper { field: "a".into(), mapper: FieldId(9) })
        );
    }

    #[test]
    fn test_reserved_names() {
        let ds = Dataset::new("d", vec![field(1, "Count", None)]);
        assert_eq!(ds.validate(), Err(DatasetError::ReservedName { name: "Count".into() }));
        let ds = Dataset::new("d", vec![field(1, "__time", None)]);
        assert!(ds.check_reserved_names().is_err());
    }

    #[test]
    fn test_duplicate_ids() {
        let ds = Dataset::new("d", vec![field(1, "a", None), field(1, "b", None)]);
        assert_eq!(ds.check_ids(), Err(DatasetError::DuplicateId { id: FieldId(1) }));
    }

    #[test]
    fn test_filtering_fields_order() {
        let mut fields = vec![field(1, "a", None), field(2, "b", None), field(3, "c", None), field(4, "d", None)];
        for (f, seq) in fields.iter_mut().zip([Some(5), None, Some(1), None]) {
            f.set_filtering(true, seq, None);
        }
        fields[3].update(&FieldPatch::new().with("filtering", false)).unwrap();

        let ds = Dataset::new("d", fields);
        let names: Vec<&str> = ds.filtering_fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_timestamp_and_physical_fields() {
        let mut derived = FieldDescriptor::new("calc", DataType::Double, 2);
        derived.derived = true;
        let ds = Dataset::new(
            "d",
            vec![
                FieldDescriptor::new("ts", DataType::Timestamp, 0),
                FieldDescriptor::new("v", DataType::Double, 1),
                derived,
            ],
        );
        assert_eq!(ds.timestamp_field().unwrap().name, "ts");
        assert_eq!(ds.physical_fields().count(), 2);
    }

    #[test]
    fn test_deserialize() {
        let ds: Dataset = serde_json::from_value(json!({
            "name": "sales",
            "fields": [{"name": "qty", "type": "integer"}]
        }))
        .unwrap();
        assert_eq!(ds.get_field("qty").unwrap().role(), FieldRole::Measure);
    }
}
