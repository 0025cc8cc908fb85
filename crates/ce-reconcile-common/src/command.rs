//! Synthesized change commands: structured payloads plus display forms.
//!
//! A payload carries real secret values and goes to the device; the
//! display string is what callers see and never contains a secret.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::fields::FieldValues;
use crate::schema::EntitySchema;

/// Fixed marker substituted for secret values in any display form.
pub const REDACTED: &str = "******";

/// Device operation attribute for a change payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOp {
    /// The entity key must not exist yet.
    Create,
    /// Accrete onto an existing entity key.
    Merge,
    /// Remove the named configuration.
    Delete,
}

impl ConfigOp {
    /// Returns the operation attribute as the device expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigOp::Create => "create",
            ConfigOp::Merge => "merge",
            ConfigOp::Delete => "delete",
        }
    }
}

/// Structured apply payload: entity type, operation, and device-tagged
/// field values. Secret values are carried verbatim; the `Debug` form
/// redacts them so payloads can be logged.
#[derive(Clone)]
pub struct ConfigPayload {
    /// Entity type identifier.
    pub entity: &'static str,
    /// Operation attribute.
    pub op: ConfigOp,
    /// Ordered device-tagged fields, real values included.
    pub fields: FieldValues,
    secret_tags: &'static [&'static str],
}

impl ConfigPayload {
    /// Creates an empty payload for an entity schema.
    ///
    /// The secret-tag list must outlive the payload; entity crates keep
    /// it alongside their schema statics.
    pub fn new(
        schema: &'static EntitySchema,
        op: ConfigOp,
        secret_tags: &'static [&'static str],
    ) -> Self {
        Self {
            entity: schema.entity,
            op,
            fields: Vec::new(),
            secret_tags,
        }
    }

    /// Appends a tag-value pair (builder form).
    pub fn with(mut self, tag: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((tag.into(), value.into()));
        self
    }

    /// Appends a tag-value pair.
    pub fn push(&mut self, tag: impl Into<String>, value: impl Into<String>) {
        self.fields.push((tag.into(), value.into()));
    }

    /// Returns the fields with secret values replaced by [`REDACTED`].
    pub fn redacted_fields(&self) -> FieldValues {
        self.fields
            .iter()
            .map(|(tag, value)| {
                if self.secret_tags.contains(&tag.as_str()) {
                    (tag.clone(), REDACTED.to_string())
                } else {
                    (tag.clone(), value.clone())
                }
            })
            .collect()
    }
}

impl fmt::Debug for ConfigPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigPayload")
            .field("entity", &self.entity)
            .field("op", &self.op)
            .field("fields", &self.redacted_fields())
            .finish()
    }
}

/// One ordered change step: the structured payload to apply and the
/// secret-redacted command string to show.
#[derive(Debug, Clone)]
pub struct Command {
    /// Structured payload, real secret values.
    pub payload: ConfigPayload,
    /// Human-readable native command, secrets redacted.
    pub display: String,
}

impl Command {
    /// Pairs a payload with its display form.
    pub fn new(payload: ConfigPayload, display: impl Into<String>) -> Self {
        Self {
            payload,
            display: display.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldValuesExt;
    use crate::schema::{Constraint, FieldSpec};

    const SCHEMA: EntitySchema = EntitySchema {
        entity: "snmp-community",
        label: "snmp community",
        key_fields: &["community_name", "access_right"],
        fields: &[
            FieldSpec::new("community_name", "communityName", Constraint::Any).secret(),
            FieldSpec::new("access_right", "accessRight", Constraint::Any),
        ],
        rules: &[],
    };

    const SECRET_TAGS: &[&str] = &["communityName"];

    #[test]
    fn test_op_as_str() {
        assert_eq!(ConfigOp::Create.as_str(), "create");
        assert_eq!(ConfigOp::Merge.as_str(), "merge");
        assert_eq!(ConfigOp::Delete.as_str(), "delete");
    }

    #[test]
    fn test_payload_carries_real_values() {
        let payload = ConfigPayload::new(&SCHEMA, ConfigOp::Create, SECRET_TAGS)
            .with("communityName", "Wdz123")
            .with("accessRight", "write");
        assert_eq!(payload.fields.get_field("communityName"), Some("Wdz123"));
        assert_eq!(payload.entity, "snmp-community");
    }

    #[test]
    fn test_redacted_fields() {
        let payload = ConfigPayload::new(&SCHEMA, ConfigOp::Merge, SECRET_TAGS)
            .with("communityName", "Wdz123")
            .with("accessRight", "write");
        let redacted = payload.redacted_fields();
        assert_eq!(redacted.get_field("communityName"), Some(REDACTED));
        assert_eq!(redacted.get_field("accessRight"), Some("write"));
    }

    #[test]
    fn test_debug_never_leaks_secrets() {
        let payload = ConfigPayload::new(&SCHEMA, ConfigOp::Create, SECRET_TAGS)
            .with("communityName", "Wdz123")
            .with("accessRight", "write");
        let debug = format!("{:?}", payload);
        assert!(!debug.contains("Wdz123"));
        assert!(debug.contains(REDACTED));
        assert!(debug.contains("accessRight"));
    }
}
