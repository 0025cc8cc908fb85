//! Reconciliation of SNMP community entries and v3 access groups.

use tracing::instrument;

use ce_reconcile_common::{
    converge, skipped, validate, CeError, CeResult, ChangeDecision, ChangeKind, Command, ConfigOp,
    ConfigPayload, Constraint, DesiredState, DeviceSession, EntityManager, EntitySchema, FieldSpec,
    ReconcileReport, Rule,
};

use crate::commands::{
    community_command, community_undo_command, group_command, group_undo_command,
};
use crate::tables::{
    fields, tags, COMMUNITY_ENTITY, COMMUNITY_LABEL, V3_GROUP_ENTITY, V3_GROUP_LABEL,
};
use crate::types::{security_level_cli, CommunityParams};

/// Schema for v1/v2c community entries.
pub static COMMUNITY_SCHEMA: EntitySchema = EntitySchema {
    entity: COMMUNITY_ENTITY,
    label: COMMUNITY_LABEL,
    key_fields: &[fields::COMMUNITY_NAME, fields::ACCESS_RIGHT],
    fields: &[
        FieldSpec::new(
            fields::COMMUNITY_NAME,
            tags::COMMUNITY_NAME,
            Constraint::Length { min: 1, max: 32 },
        )
        .secret(),
        FieldSpec::new(fields::ACCESS_RIGHT, tags::ACCESS_RIGHT, Constraint::Any),
        FieldSpec::new(fields::ACL_NUMBER, tags::ACL_NUMBER, Constraint::AclId),
        FieldSpec::new(
            fields::COMMUNITY_MIB_VIEW,
            tags::MIB_VIEW_NAME,
            Constraint::Length { min: 1, max: 32 },
        ),
    ],
    rules: &[
        Rule::RequireTogether(&[fields::COMMUNITY_NAME, fields::ACCESS_RIGHT]),
        Rule::MutuallyExclusive(
            &[fields::COMMUNITY_NAME, fields::ACCESS_RIGHT],
            &[fields::GROUP_NAME, fields::SECURITY_LEVEL],
        ),
    ],
};

/// Schema for SNMPv3 access groups.
pub static V3_GROUP_SCHEMA: EntitySchema = EntitySchema {
    entity: V3_GROUP_ENTITY,
    label: V3_GROUP_LABEL,
    key_fields: &[fields::GROUP_NAME, fields::SECURITY_LEVEL],
    fields: &[
        FieldSpec::new(
            fields::GROUP_NAME,
            tags::GROUP_NAME,
            Constraint::Length { min: 1, max: 32 },
        ),
        FieldSpec::new(fields::SECURITY_LEVEL, tags::SECURITY_LEVEL, Constraint::Any),
        FieldSpec::new(fields::ACL_NUMBER, tags::ACL_NUMBER, Constraint::AclId),
        FieldSpec::new(
            fields::READ_VIEW,
            tags::READ_VIEW_NAME,
            Constraint::Length { min: 1, max: 32 },
        ),
        FieldSpec::new(
            fields::WRITE_VIEW,
            tags::WRITE_VIEW_NAME,
            Constraint::Length { min: 1, max: 32 },
        ),
        FieldSpec::new(
            fields::NOTIFY_VIEW,
            tags::NOTIFY_VIEW_NAME,
            Constraint::Length { min: 1, max: 32 },
        ),
    ],
    rules: &[
        Rule::RequireTogether(&[fields::GROUP_NAME, fields::SECURITY_LEVEL]),
        Rule::MutuallyExclusive(
            &[fields::GROUP_NAME, fields::SECURITY_LEVEL],
            &[fields::COMMUNITY_NAME, fields::ACCESS_RIGHT],
        ),
    ],
};

const COMMUNITY_SECRET_TAGS: &[&str] = &[tags::COMMUNITY_NAME];

struct CommunityEntity;

impl EntityManager for CommunityEntity {
    fn schema(&self) -> &'static EntitySchema {
        &COMMUNITY_SCHEMA
    }

    fn synthesize(
        &self,
        desired: &DesiredState,
        decision: &ChangeDecision,
    ) -> CeResult<Vec<Command>> {
        let name = desired.declared(fields::COMMUNITY_NAME).unwrap_or_default();
        let right = desired.declared(fields::ACCESS_RIGHT).unwrap_or_default();
        let acl = desired.declared(fields::ACL_NUMBER);
        let view = desired.declared(fields::COMMUNITY_MIB_VIEW);

        let op = match decision.kind {
            ChangeKind::Create => ConfigOp::Create,
            ChangeKind::Merge => ConfigOp::Merge,
            ChangeKind::Delete => ConfigOp::Delete,
            ChangeKind::None => return Ok(Vec::new()),
        };

        let mut payload = ConfigPayload::new(&COMMUNITY_SCHEMA, op, COMMUNITY_SECRET_TAGS)
            .with(tags::COMMUNITY_NAME, name)
            .with(tags::ACCESS_RIGHT, right);
        if let Some(acl) = acl {
            payload.push(tags::ACL_NUMBER, acl);
        }
        if let Some(view) = view {
            payload.push(tags::MIB_VIEW_NAME, view);
        }

        let display = match op {
            ConfigOp::Delete => community_undo_command(right),
            _ => community_command(right, acl, view),
        };
        Ok(vec![Command::new(payload, display)])
    }
}

struct V3GroupEntity;

impl EntityManager for V3GroupEntity {
    fn schema(&self) -> &'static EntitySchema {
        &V3_GROUP_SCHEMA
    }

    fn synthesize(
        &self,
        desired: &DesiredState,
        decision: &ChangeDecision,
    ) -> CeResult<Vec<Command>> {
        let name = desired.declared(fields::GROUP_NAME).unwrap_or_default();
        let level = desired.declared(fields::SECURITY_LEVEL).unwrap_or_default();
        let level_cli = security_level_cli(level);
        let acl = desired.declared(fields::ACL_NUMBER);
        let read = desired.declared(fields::READ_VIEW);
        let write = desired.declared(fields::WRITE_VIEW);
        let notify = desired.declared(fields::NOTIFY_VIEW);

        let op = match decision.kind {
            ChangeKind::Create => ConfigOp::Create,
            ChangeKind::Merge => ConfigOp::Merge,
            ChangeKind::Delete => ConfigOp::Delete,
            ChangeKind::None => return Ok(Vec::new()),
        };

        let mut payload = ConfigPayload::new(&V3_GROUP_SCHEMA, op, &[])
            .with(tags::GROUP_NAME, name)
            .with(tags::SECURITY_LEVEL, level);
        if let Some(acl) = acl {
            payload.push(tags::ACL_NUMBER, acl);
        }
        if let Some(view) = read {
            payload.push(tags::READ_VIEW_NAME, view);
        }
        if let Some(view) = write {
            payload.push(tags::WRITE_VIEW_NAME, view);
        }
        if let Some(view) = notify {
            payload.push(tags::NOTIFY_VIEW_NAME, view);
        }

        let display = match op {
            ConfigOp::Delete => group_undo_command(name, level_cli),
            _ => group_command(name, level_cli, read, write, notify, acl),
        };
        Ok(vec![Command::new(payload, display)])
    }
}

/// Manager facade for one community/group invocation.
#[derive(Debug, Default)]
pub struct SnmpCommunityMgr;

impl SnmpCommunityMgr {
    /// Creates the manager.
    pub fn new() -> Self {
        Self
    }

    /// Reconciles the addressed entity to the declared state and reports
    /// the result. Both schemas are validated up front so cross-entity
    /// rules fire before any device contact.
    #[instrument(skip_all)]
    pub async fn run<S>(
        &self,
        session: &mut S,
        params: &CommunityParams,
    ) -> CeResult<ReconcileReport>
    where
        S: DeviceSession + ?Sized,
    {
        if !params.addresses_community() && !params.addresses_group() {
            return Err(CeError::validation(
                fields::COMMUNITY_NAME,
                "community_name and access_right, or group_name and security_level, \
                 must be declared",
            ));
        }

        let declared = params.declared_fields();
        validate(&COMMUNITY_SCHEMA, &declared)?;
        validate(&V3_GROUP_SCHEMA, &declared)?;

        let mut report = ReconcileReport::proposed_from(&declared, params.state);

        if params.addresses_community() {
            report.absorb(converge(&CommunityEntity, session, &declared, params.state).await?);
        } else {
            report.absorb(skipped(&COMMUNITY_SCHEMA));
        }

        if params.addresses_group() {
            report.absorb(converge(&V3GroupEntity, session, &declared, params.state).await?);
        } else {
            report.absorb(skipped(&V3_GROUP_SCHEMA));
        }

        Ok(report)
    }
}
