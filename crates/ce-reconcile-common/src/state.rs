//! Desired and actual configuration state models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::fields::{FieldValues, FieldValuesExt};
use crate::schema::EntitySchema;

/// Caller intent for one entity instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    /// The configuration should exist on the device.
    Present,
    /// The configuration should be removed from the device.
    Absent,
}

impl Intent {
    /// Returns the wire form ("present"/"absent").
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Present => "present",
            Intent::Absent => "absent",
        }
    }
}

impl Default for Intent {
    fn default() -> Self {
        Intent::Present
    }
}

/// One field-value snapshot the device reported for an entity type,
/// keyed by device element tag. A fetch may return zero, one or many.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActualRecord(pub BTreeMap<String, String>);

impl ActualRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets a tag's value, if the device reported it.
    pub fn get(&self, tag: &str) -> Option<&str> {
        self.0.get(tag).map(String::as_str)
    }

    /// Checks whether the device reported a tag.
    pub fn has(&self, tag: &str) -> bool {
        self.0.contains_key(tag)
    }

    /// Sets a tag's value (builder form, used by fetch adapters and tests).
    pub fn with(mut self, tag: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(tag.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ActualRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Validated desired state for one entity instance: the declared fields
/// (caller-side names), the intent, and the schema they were validated
/// against. Produced by the validator, consumed by the reconciler and
/// the command synthesizers.
#[derive(Debug, Clone)]
pub struct DesiredState {
    /// The entity schema the fields conform to.
    pub schema: &'static EntitySchema,
    /// Declared fields only; undeclared fields are simply missing.
    pub fields: FieldValues,
    /// Present or absent.
    pub intent: Intent,
}

impl DesiredState {
    /// Builds a desired state from a raw declared-field map, keeping only
    /// the fields the schema knows about. Callers validate first.
    pub fn from_declared(
        schema: &'static EntitySchema,
        declared: &FieldValues,
        intent: Intent,
    ) -> Self {
        let fields = schema
            .fields
            .iter()
            .filter_map(|spec| {
                declared
                    .get_field(spec.name)
                    .map(|v| (spec.name.to_string(), v.to_string()))
            })
            .collect();
        Self {
            schema,
            fields,
            intent,
        }
    }

    /// Gets a declared field's value.
    pub fn declared(&self, name: &str) -> Option<&str> {
        self.fields.get_field(name)
    }

    /// Checks whether a field was declared.
    pub fn is_declared(&self, name: &str) -> bool {
        self.fields.has_field(name)
    }

    /// Returns true when every compound key field is declared.
    pub fn key_declared(&self) -> bool {
        self.schema.key_declared(&self.fields)
    }

    /// Device tags to request when fetching current state for this entity.
    pub fn fetch_tags(&self) -> Vec<&'static str> {
        self.schema.fetch_tags(&self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_values;
    use crate::schema::{Constraint, FieldSpec};

    const SCHEMA: EntitySchema = EntitySchema {
        entity: "test",
        label: "test",
        key_fields: &["name"],
        fields: &[
            FieldSpec::new("name", "entryName", Constraint::Any),
            FieldSpec::new("view", "viewName", Constraint::Any),
        ],
        rules: &[],
    };

    #[test]
    fn test_intent_round_trip() {
        assert_eq!(Intent::Present.as_str(), "present");
        assert_eq!(Intent::Absent.as_str(), "absent");
        assert_eq!(Intent::default(), Intent::Present);
    }

    #[test]
    fn test_record_access() {
        let rec = ActualRecord::new()
            .with("entryName", "Wdz123")
            .with("viewName", "iso");
        assert_eq!(rec.get("entryName"), Some("Wdz123"));
        assert!(rec.has("viewName"));
        assert!(!rec.has("aclNumber"));
    }

    #[test]
    fn test_from_declared_filters_foreign_fields() {
        let raw = field_values! {
            "name" => "n",
            "view" => "v",
            "group_name" => "belongs-to-sibling-entity",
        };
        let desired = DesiredState::from_declared(&SCHEMA, &raw, Intent::Present);
        assert_eq!(desired.fields.len(), 2);
        assert!(desired.is_declared("name"));
        assert!(!desired.is_declared("group_name"));
        assert!(desired.key_declared());
    }

    #[test]
    fn test_record_serializes_flat() {
        let rec = ActualRecord::new().with("evpnOverLay", "true");
        let json = serde_json::to_string(&rec).unwrap();
        assert_eq!(json, r#"{"evpnOverLay":"true"}"#);
    }
}
