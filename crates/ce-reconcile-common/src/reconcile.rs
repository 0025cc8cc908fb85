//! The reconciliation core: desired state vs. fetched records.
//!
//! Comparison polarity is asymmetric by design and must stay that way:
//! with `Present` intent a mismatch on any declared field triggers a
//! merge; with `Absent` intent a *match* triggers a delete, because a
//! value currently equal to the one named for removal is exactly the
//! configuration that must be undone. A mismatch under `Absent` leaves
//! nothing to undo.

use tracing::debug;

use crate::state::{ActualRecord, DesiredState, Intent};

/// What, if anything, must change on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Desired and actual already agree.
    None,
    /// The entity key does not exist yet.
    Create,
    /// The entity key exists; a partial update is needed.
    Merge,
    /// The named configuration exists and must be removed.
    Delete,
}

/// Outcome of one reconciliation call. Computed fresh every time,
/// never persisted.
#[derive(Debug, Clone)]
pub struct ChangeDecision {
    /// The kind of change required.
    pub kind: ChangeKind,
    /// The candidate record the decision was made against, when any
    /// record was fetched. Delete synthesis may need its full field set
    /// for disambiguation.
    pub matched: Option<ActualRecord>,
}

impl ChangeDecision {
    /// Returns true when the device must be touched.
    pub fn needs_change(&self) -> bool {
        self.kind != ChangeKind::None
    }
}

/// Compares desired state against fetched records and decides whether a
/// change is required and of what kind.
///
/// Candidate selection: when every compound key field is declared, the
/// first record whose key tags equal the desired key values is the
/// candidate; no such record means the key does not exist on the device.
/// When the key is not fully declared the first fetched record is taken
/// as the candidate. That degrades key matching for entity types where
/// the device does not echo a field back; with `Absent` intent the
/// delete can then target the wrong record. Observed device-facing
/// behavior, kept deliberately.
pub fn reconcile(desired: &DesiredState, actual: &[ActualRecord]) -> ChangeDecision {
    let schema = desired.schema;

    if actual.is_empty() {
        let kind = match desired.intent {
            Intent::Present => ChangeKind::Create,
            Intent::Absent => ChangeKind::None,
        };
        debug!(entity = schema.entity, ?kind, "no records on device");
        return ChangeDecision {
            kind,
            matched: None,
        };
    }

    let candidate = if desired.key_declared() {
        match actual.iter().find(|rec| key_matches(desired, rec)) {
            Some(rec) => rec,
            None => {
                // Records exist, but none under the desired key.
                let kind = match desired.intent {
                    Intent::Present => ChangeKind::Create,
                    Intent::Absent => ChangeKind::None,
                };
                debug!(entity = schema.entity, ?kind, "no record under desired key");
                return ChangeDecision {
                    kind,
                    matched: None,
                };
            }
        }
    } else {
        &actual[0]
    };

    let mut need_change = false;
    for spec in schema.fields {
        let declared = desired.declared(spec.name);

        // Presence-tagged fields compare declaredness against the
        // device's presence flag even when the field itself is unset.
        if let Some(presence) = spec.presence_tag {
            if let Some(flag) = candidate.get(presence) {
                let expected = if declared.is_some() { "true" } else { "false" };
                if fires(desired.intent, flag == expected) {
                    need_change = true;
                }
            }
        }

        let Some(value) = declared else { continue };
        match candidate.get(spec.tag) {
            Some(actual_value) => {
                if fires(desired.intent, actual_value == value) {
                    need_change = true;
                }
            }
            None => {
                // The device did not echo the tag: a mismatch for
                // Present intent, nothing to undo for Absent.
                if desired.intent == Intent::Present {
                    need_change = true;
                }
            }
        }
    }

    let kind = if need_change {
        match desired.intent {
            Intent::Present => ChangeKind::Merge,
            Intent::Absent => ChangeKind::Delete,
        }
    } else {
        ChangeKind::None
    };

    debug!(entity = schema.entity, ?kind, "reconciled against candidate");
    ChangeDecision {
        kind,
        matched: Some(candidate.clone()),
    }
}

/// The polarity law: Present fires on mismatch, Absent fires on match.
fn fires(intent: Intent, matches: bool) -> bool {
    match intent {
        Intent::Present => !matches,
        Intent::Absent => matches,
    }
}

fn key_matches(desired: &DesiredState, record: &ActualRecord) -> bool {
    desired.schema.key_fields.iter().all(|name| {
        let spec = match desired.schema.field(name) {
            Some(spec) => spec,
            None => return false,
        };
        match (desired.declared(name), record.get(spec.tag)) {
            (Some(want), Some(have)) => want == have,
            _ => false,
        }
    })
}
