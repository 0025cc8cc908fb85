//! Per-entity orchestration: validate, fetch, reconcile, apply, re-fetch.

use tracing::{debug, info, instrument};

use crate::command::Command;
use crate::error::{CeError, CeResult};
use crate::fields::FieldValues;
use crate::reconcile::{reconcile, ChangeDecision};
use crate::schema::{validate, EntitySchema};
use crate::session::{DeviceSession, FetchQuery};
use crate::state::{ActualRecord, DesiredState, Intent};

/// One entity type's manager: its schema plus the command synthesizer.
///
/// Synthesis is pure; anything it needs from the device (such as the
/// local engine id) is looked up by the manager before convergence and
/// held on the implementing struct.
pub trait EntityManager {
    /// The schema this manager reconciles against.
    fn schema(&self) -> &'static EntitySchema;

    /// Turns a change decision into the ordered command set. Only called
    /// when the decision requires a change.
    fn synthesize(
        &self,
        desired: &DesiredState,
        decision: &ChangeDecision,
    ) -> CeResult<Vec<Command>>;
}

/// Result of converging one entity type within one invocation.
#[derive(Debug, Clone)]
pub struct EntityOutcome {
    /// Report label for this entity type.
    pub label: &'static str,
    /// Pre-change fetch result.
    pub existing: Vec<ActualRecord>,
    /// Post-change fetch result.
    pub end_state: Vec<ActualRecord>,
    /// True when the device was changed.
    pub changed: bool,
    /// Redacted display command strings, in apply order.
    pub updates: Vec<String>,
}

/// Sequences one entity type through a full reconciliation pass:
/// validate the declared fields, fetch pre-state, decide, synthesize and
/// apply each command in order, then fetch post-state. The first apply
/// rejection fails the pass; commands already applied stay applied.
#[instrument(skip_all, fields(entity = manager.schema().entity))]
pub async fn converge<M, S>(
    manager: &M,
    session: &mut S,
    declared: &FieldValues,
    intent: Intent,
) -> CeResult<EntityOutcome>
where
    M: EntityManager + ?Sized,
    S: DeviceSession + ?Sized,
{
    let schema = manager.schema();
    validate(schema, declared)?;

    let desired = DesiredState::from_declared(schema, declared, intent);
    let query = FetchQuery::for_desired(&desired);

    let existing = session.fetch(&query).await?;
    let decision = reconcile(&desired, &existing);

    let mut updates = Vec::new();
    if decision.needs_change() {
        let commands = manager.synthesize(&desired, &decision)?;
        for command in commands {
            debug!(payload = ?command.payload, "applying change");
            let ok = session.apply(&command.payload).await?;
            if !ok {
                return Err(CeError::apply_rejected(
                    schema.label,
                    format!("device refused '{}'", command.display),
                ));
            }
            updates.push(command.display);
        }
        info!(count = updates.len(), "applied changes");
    } else {
        debug!("already converged, nothing to apply");
    }

    let end_state = session.fetch(&query).await?;

    Ok(EntityOutcome {
        label: schema.label,
        existing,
        end_state,
        changed: decision.needs_change(),
        updates,
    })
}

/// Convergence for an entity the caller did not declare at all: no
/// validation, no fetch, no change. Keeps report assembly uniform when a
/// manager handles several entity types and only some are declared.
pub fn skipped(schema: &'static EntitySchema) -> EntityOutcome {
    EntityOutcome {
        label: schema.label,
        existing: Vec::new(),
        end_state: Vec::new(),
        changed: false,
        updates: Vec::new(),
    }
}
