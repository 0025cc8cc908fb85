//! Reconciliation of the device-wide EVPN overlay switch.
//!
//! The overlay switch is a singleton: the device always reports exactly
//! one record for it, so the entity has no key fields and every change
//! is a merge onto that record.

use tracing::instrument;

use ce_reconcile_common::{
    converge, field_values, Command, ConfigOp, ConfigPayload, Constraint, DesiredState,
    DeviceSession, EntityManager, EntitySchema, FieldSpec, Intent, CeResult, ChangeDecision,
    ReconcileReport, Rule,
};

use crate::commands::overlay_command;
use crate::tables::{fields, EVPN_GLOBAL_ENTITY, EVPN_GLOBAL_LABEL, TAG_EVPN_OVERLAY};

/// Schema for the singleton overlay flag.
pub static EVPN_GLOBAL_SCHEMA: EntitySchema = EntitySchema {
    entity: EVPN_GLOBAL_ENTITY,
    label: EVPN_GLOBAL_LABEL,
    key_fields: &[],
    fields: &[FieldSpec::new(
        fields::OVERLAY_ENABLE,
        TAG_EVPN_OVERLAY,
        Constraint::Bool,
    )],
    rules: &[Rule::RequireTogether(&[fields::OVERLAY_ENABLE])],
};

/// Manager for the EVPN overlay global flag.
#[derive(Debug, Default)]
pub struct EvpnGlobalMgr;

impl EvpnGlobalMgr {
    /// Creates the manager.
    pub fn new() -> Self {
        Self
    }

    /// Drives the overlay flag to `overlay_enable` and reports the result.
    #[instrument(skip(self, session))]
    pub async fn run<S>(
        &self,
        session: &mut S,
        overlay_enable: bool,
    ) -> CeResult<ReconcileReport>
    where
        S: DeviceSession + ?Sized,
    {
        let declared = field_values! { fields::OVERLAY_ENABLE => overlay_enable };
        let mut report = ReconcileReport::proposed_from(&declared, Intent::Present);
        let outcome = converge(self, session, &declared, Intent::Present).await?;
        report.absorb(outcome);
        Ok(report)
    }
}

impl EntityManager for EvpnGlobalMgr {
    fn schema(&self) -> &'static EntitySchema {
        &EVPN_GLOBAL_SCHEMA
    }

    fn synthesize(
        &self,
        desired: &DesiredState,
        decision: &ChangeDecision,
    ) -> CeResult<Vec<Command>> {
        let value = desired.declared(fields::OVERLAY_ENABLE).unwrap_or("false");
        let enable = value == "true";

        // The flag record is created by the device itself; only a fresh
        // device with no record at all warrants a create.
        let op = match decision.matched {
            Some(_) => ConfigOp::Merge,
            None => ConfigOp::Create,
        };
        let payload =
            ConfigPayload::new(&EVPN_GLOBAL_SCHEMA, op, &[]).with(TAG_EVPN_OVERLAY, value);

        Ok(vec![Command::new(payload, overlay_command(enable))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ce_reconcile_common::{reconcile, ChangeKind};

    #[test]
    fn test_schema_is_singleton() {
        assert!(EVPN_GLOBAL_SCHEMA.key_fields.is_empty());
        assert!(EVPN_GLOBAL_SCHEMA.secret_tags().is_empty());
    }

    #[test]
    fn test_synthesize_enable() {
        let desired = DesiredState::from_declared(
            &EVPN_GLOBAL_SCHEMA,
            &field_values! { "overlay_enable" => "true" },
            Intent::Present,
        );
        let records = [ce_reconcile_common::ActualRecord::new().with(TAG_EVPN_OVERLAY, "false")];
        let decision = reconcile(&desired, &records);
        assert_eq!(decision.kind, ChangeKind::Merge);

        let commands = EvpnGlobalMgr.synthesize(&desired, &decision).unwrap();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].display, "evpn-overlay enable");
        assert_eq!(commands[0].payload.op, ConfigOp::Merge);
    }

    #[test]
    fn test_synthesize_disable() {
        let desired = DesiredState::from_declared(
            &EVPN_GLOBAL_SCHEMA,
            &field_values! { "overlay_enable" => "false" },
            Intent::Present,
        );
        let records = [ce_reconcile_common::ActualRecord::new().with(TAG_EVPN_OVERLAY, "true")];
        let decision = reconcile(&desired, &records);

        let commands = EvpnGlobalMgr.synthesize(&desired, &decision).unwrap();
        assert_eq!(commands[0].display, "undo evpn-overlay enable");
    }
}
