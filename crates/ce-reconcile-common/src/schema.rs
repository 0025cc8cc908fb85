//! Data-driven field schemas and the desired-state validator.
//!
//! Each entity type declares a static [`EntitySchema`]: its key fields,
//! per-field constraints and cross-field rules. One generic [`validate`]
//! consumes the table, so no manager crate carries hand-rolled
//! per-field conditionals.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{CeError, CeResult};
use crate::fields::{FieldValues, FieldValuesExt};

/// Named ACL identifiers: 1-32 characters, first character alphabetic.
static NAMED_ACL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]{0,31}$").expect("Invalid regex pattern"));

/// Value constraint applied to a single declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// String length bounds, inclusive.
    Length {
        /// Minimum length.
        min: usize,
        /// Maximum length.
        max: usize,
    },
    /// ACL identifier: numeric in [2000, 2999], or a named ACL.
    AclId,
    /// SNMP engine id: 10-64 characters.
    EngineId,
    /// Boolean flag rendered as "true"/"false".
    Bool,
    /// No constraint beyond being declared.
    Any,
}

impl Constraint {
    /// Checks a declared value against this constraint.
    pub fn check(&self, field: &str, value: &str) -> CeResult<()> {
        match self {
            Constraint::Length { min, max } => {
                let len = value.chars().count();
                if len < *min || len > *max {
                    return Err(CeError::validation(
                        field,
                        format!("the length of '{}' is out of [{} - {}]", value, min, max),
                    ));
                }
                Ok(())
            }
            Constraint::AclId => {
                if value.chars().all(|c| c.is_ascii_digit()) && !value.is_empty() {
                    let num: u32 = value.parse().map_err(|_| {
                        CeError::validation(
                            field,
                            format!("the value of '{}' is out of [2000 - 2999]", value),
                        )
                    })?;
                    if !(2000..=2999).contains(&num) {
                        return Err(CeError::validation(
                            field,
                            format!("the value of '{}' is out of [2000 - 2999]", value),
                        ));
                    }
                } else if !NAMED_ACL_RE.is_match(value) {
                    return Err(CeError::validation(
                        field,
                        format!(
                            "the name '{}' is out of [1 - 32] or does not start with a letter",
                            value
                        ),
                    ));
                }
                Ok(())
            }
            Constraint::EngineId => {
                let len = value.chars().count();
                if !(10..=64).contains(&len) {
                    return Err(CeError::validation(
                        field,
                        format!("the length of '{}' is out of [10 - 64]", value),
                    ));
                }
                Ok(())
            }
            Constraint::Bool => match value {
                "true" | "false" => Ok(()),
                _ => Err(CeError::validation(
                    field,
                    format!("'{}' is not one of [true, false]", value),
                )),
            },
            Constraint::Any => Ok(()),
        }
    }
}

/// Declaration of one field of an entity type.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Caller-side field name (e.g. "community_name").
    pub name: &'static str,
    /// Device-side element tag (e.g. "communityName").
    pub tag: &'static str,
    /// Optional device tag whose value is "true"/"false" depending on
    /// whether this field was declared. Used for the USM remote engine id,
    /// where the device echoes presence and value under separate tags.
    pub presence_tag: Option<&'static str>,
    /// Value constraint.
    pub constraint: Constraint,
    /// Secret fields are redacted in every display form.
    pub secret: bool,
}

impl FieldSpec {
    /// Declares a plain field.
    pub const fn new(name: &'static str, tag: &'static str, constraint: Constraint) -> Self {
        Self {
            name,
            tag,
            presence_tag: None,
            constraint,
            secret: false,
        }
    }

    /// Marks the field as secret-bearing.
    pub const fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    /// Attaches a presence tag.
    pub const fn with_presence_tag(mut self, tag: &'static str) -> Self {
        self.presence_tag = Some(tag);
        self
    }
}

/// Cross-field rule over the declared desired fields.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// All named fields must be declared together or all absent.
    RequireTogether(&'static [&'static str]),
    /// Declaring any field of the first group together with any field of
    /// the second group is an error.
    MutuallyExclusive(&'static [&'static str], &'static [&'static str]),
    /// Declaring `field` requires `needs` to be declared too.
    Requires {
        /// The dependent field.
        field: &'static str,
        /// The required companion.
        needs: &'static str,
    },
    /// Declaring `field` requires every field in `needs`.
    AllOrNothing {
        /// The gating field.
        field: &'static str,
        /// Companions that must all be declared with it.
        needs: &'static [&'static str],
    },
}

/// Static description of one entity type.
#[derive(Debug, Clone, Copy)]
pub struct EntitySchema {
    /// Entity type identifier (e.g. "snmp-community").
    pub entity: &'static str,
    /// Report label (e.g. "snmp community").
    pub label: &'static str,
    /// Compound key field names.
    pub key_fields: &'static [&'static str],
    /// Field declarations, in device element order.
    pub fields: &'static [FieldSpec],
    /// Cross-field rules, checked in order after field constraints.
    pub rules: &'static [Rule],
}

impl EntitySchema {
    /// Looks up a field spec by caller-side name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns true when every key field is declared.
    pub fn key_declared(&self, fields: &FieldValues) -> bool {
        self.key_fields.iter().all(|k| fields.has_field(k))
    }

    /// Returns true when a field is part of the compound key.
    pub fn is_key_field(&self, name: &str) -> bool {
        self.key_fields.contains(&name)
    }

    /// Device tags to request for a fetch, mirroring which desired fields
    /// were declared: key tags always, presence-tagged pairs always,
    /// other tags only when declared.
    pub fn fetch_tags(&self, declared: &FieldValues) -> Vec<&'static str> {
        let mut tags = Vec::new();
        for spec in self.fields {
            let wanted = self.is_key_field(spec.name)
                || spec.presence_tag.is_some()
                || declared.has_field(spec.name);
            if !wanted {
                continue;
            }
            if let Some(presence) = spec.presence_tag {
                tags.push(presence);
            }
            tags.push(spec.tag);
        }
        tags
    }

    /// Device tags whose values are secrets.
    pub fn secret_tags(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|f| f.secret)
            .map(|f| f.tag)
            .collect()
    }
}

/// Validates declared fields against an entity schema.
///
/// Field constraints are checked first (schema order), then cross-field
/// rules (table order). The first violation aborts with a
/// [`CeError::Validation`] naming the field and offending value. Fields
/// not covered by the schema are ignored; they belong to sibling entity
/// types validated separately.
pub fn validate(schema: &EntitySchema, fields: &FieldValues) -> CeResult<()> {
    for spec in schema.fields {
        if let Some(value) = fields.get_field(spec.name) {
            spec.constraint.check(spec.name, value)?;
        }
    }

    for rule in schema.rules {
        check_rule(rule, fields)?;
    }

    Ok(())
}

fn check_rule(rule: &Rule, fields: &FieldValues) -> CeResult<()> {
    match rule {
        Rule::RequireTogether(names) => {
            let declared: Vec<_> = names.iter().filter(|n| fields.has_field(n)).collect();
            if !declared.is_empty() && declared.len() != names.len() {
                let missing = names
                    .iter()
                    .find(|n| !fields.has_field(n))
                    .copied()
                    .unwrap_or("");
                return Err(CeError::validation(
                    missing,
                    format!("{} must be declared together", names.join(" and ")),
                ));
            }
            Ok(())
        }
        Rule::MutuallyExclusive(first, second) => {
            let a = first.iter().find(|n| fields.has_field(n));
            let b = second.iter().find(|n| fields.has_field(n));
            if let (Some(a), Some(b)) = (a, b) {
                return Err(CeError::validation(
                    *b,
                    format!("{} cannot be declared together with {}", b, a),
                ));
            }
            Ok(())
        }
        Rule::Requires { field, needs } => {
            if fields.has_field(field) && !fields.has_field(needs) {
                return Err(CeError::validation(
                    *needs,
                    format!("{} requires {} to be declared", field, needs),
                ));
            }
            Ok(())
        }
        Rule::AllOrNothing { field, needs } => {
            if fields.has_field(field) {
                if let Some(missing) = needs.iter().find(|n| !fields.has_field(n)) {
                    return Err(CeError::validation(
                        *missing,
                        format!("{} requires all of {} to be declared", field, needs.join(", ")),
                    ));
                }
            }
            Ok(())
        }
    }
}
