//! The invocation report: what was proposed, what existed, what changed.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::converge::EntityOutcome;
use crate::fields::FieldValues;
use crate::state::{ActualRecord, Intent};

/// Assembled result of one reconciliation invocation, rebuilt every run
/// and never cached. `existing`/`end_state` are keyed by entity-type
/// label; `updates` lists the redacted command strings in apply order
/// and is empty when nothing changed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReconcileReport {
    /// The validated desired-state fields as supplied, plus the intent.
    pub proposed: BTreeMap<String, String>,
    /// Pre-change fetch results per entity label.
    pub existing: BTreeMap<String, Vec<ActualRecord>>,
    /// Post-change fetch results, same shape as `existing`.
    pub end_state: BTreeMap<String, Vec<ActualRecord>>,
    /// True iff at least one entity's decision was not a no-op.
    pub changed: bool,
    /// Redacted display command strings.
    pub updates: Vec<String>,
}

impl ReconcileReport {
    /// Starts a report from the caller-declared fields and intent.
    pub fn proposed_from(declared: &FieldValues, intent: Intent) -> Self {
        let mut proposed: BTreeMap<String, String> = declared
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        proposed.insert("state".to_string(), intent.as_str().to_string());
        Self {
            proposed,
            ..Self::default()
        }
    }

    /// Folds one entity's outcome into the report, preserving apply
    /// order across entities.
    pub fn absorb(&mut self, outcome: EntityOutcome) {
        self.existing
            .insert(outcome.label.to_string(), outcome.existing);
        self.end_state
            .insert(outcome.label.to_string(), outcome.end_state);
        self.changed |= outcome.changed;
        self.updates.extend(outcome.updates);
    }
}
