//! Reconciliation of USM users and AAA local users.

use tracing::{debug, instrument};

use ce_reconcile_common::{
    converge, skipped, validate, CeError, CeResult, ChangeDecision, ChangeKind, Command, ConfigOp,
    ConfigPayload, Constraint, DesiredState, DeviceSession, EntityManager, EntitySchema,
    FetchQuery, FieldSpec, ReconcileReport, Rule,
};

use crate::commands::{
    local_user_command, local_user_undo_command, usm_auth_command, usm_identity_command,
    usm_priv_command, usm_undo_command,
};
use crate::tables::{
    fields, tags, LOCAL_ENGINE_ENTITY, LOCAL_USER_ENTITY, LOCAL_USER_LABEL, USM_USER_ENTITY,
    USM_USER_LABEL,
};
use crate::types::UserParams;

/// Schema for USM users. The engine id field carries a presence tag:
/// the device echoes whether a user is remote under `remoteEngineID`
/// and the id itself under `engineID`.
pub static USM_USER_SCHEMA: EntitySchema = EntitySchema {
    entity: USM_USER_ENTITY,
    label: USM_USER_LABEL,
    key_fields: &[fields::USM_USER_NAME],
    fields: &[
        FieldSpec::new(
            fields::USM_USER_NAME,
            tags::USER_NAME,
            Constraint::Length { min: 1, max: 32 },
        ),
        FieldSpec::new(fields::REMOTE_ENGINE_ID, tags::ENGINE_ID, Constraint::EngineId)
            .with_presence_tag(tags::REMOTE_ENGINE_ID),
        FieldSpec::new(
            fields::USER_GROUP,
            tags::GROUP_NAME,
            Constraint::Length { min: 1, max: 32 },
        ),
        FieldSpec::new(fields::ACL_NUMBER, tags::ACL_NUMBER, Constraint::AclId),
        FieldSpec::new(fields::AUTH_PROTOCOL, tags::AUTH_PROTOCOL, Constraint::Any),
        FieldSpec::new(
            fields::AUTH_KEY,
            tags::AUTH_KEY,
            Constraint::Length { min: 1, max: 255 },
        )
        .secret(),
        FieldSpec::new(fields::PRIV_PROTOCOL, tags::PRIV_PROTOCOL, Constraint::Any),
        FieldSpec::new(
            fields::PRIV_KEY,
            tags::PRIV_KEY,
            Constraint::Length { min: 1, max: 255 },
        )
        .secret(),
    ],
    rules: &[
        Rule::MutuallyExclusive(&[fields::USM_USER_NAME], &[fields::AAA_LOCAL_USER]),
        Rule::Requires {
            field: fields::PRIV_PROTOCOL,
            needs: fields::AUTH_PROTOCOL,
        },
    ],
};

/// Schema for AAA local users carrying SNMPv3 credentials.
pub static LOCAL_USER_SCHEMA: EntitySchema = EntitySchema {
    entity: LOCAL_USER_ENTITY,
    label: LOCAL_USER_LABEL,
    key_fields: &[fields::AAA_LOCAL_USER],
    fields: &[
        FieldSpec::new(
            fields::AAA_LOCAL_USER,
            tags::USER_NAME,
            Constraint::Length { min: 1, max: 32 },
        ),
        FieldSpec::new(fields::AUTH_PROTOCOL, tags::AUTH_PROTOCOL, Constraint::Any),
        FieldSpec::new(
            fields::AUTH_KEY,
            tags::AUTH_KEY,
            Constraint::Length { min: 1, max: 255 },
        )
        .secret(),
        FieldSpec::new(fields::PRIV_PROTOCOL, tags::PRIV_PROTOCOL, Constraint::Any),
        FieldSpec::new(
            fields::PRIV_KEY,
            tags::PRIV_KEY,
            Constraint::Length { min: 1, max: 255 },
        )
        .secret(),
    ],
    rules: &[
        Rule::MutuallyExclusive(&[fields::AAA_LOCAL_USER], &[fields::USM_USER_NAME]),
        Rule::AllOrNothing {
            field: fields::AAA_LOCAL_USER,
            needs: &[
                fields::AUTH_PROTOCOL,
                fields::AUTH_KEY,
                fields::PRIV_PROTOCOL,
                fields::PRIV_KEY,
            ],
        },
    ],
};

const SECRET_KEY_TAGS: &[&str] = &[tags::AUTH_KEY, tags::PRIV_KEY];

struct UsmUserEntity {
    /// Engine id discovered on the device; bound to users declared
    /// without a remote engine id.
    local_engine_id: Option<String>,
}

impl UsmUserEntity {
    /// Key fields every USM payload repeats: user name, the remote
    /// flag, and the engine id the user is bound to.
    fn base_payload(
        &self,
        op: ConfigOp,
        name: &str,
        remote: Option<&str>,
    ) -> CeResult<ConfigPayload> {
        let (flag, engine_id) = match remote {
            Some(id) => ("true", id.to_string()),
            None => match &self.local_engine_id {
                Some(id) => ("false", id.clone()),
                None => {
                    return Err(CeError::EngineIdUnavailable {
                        user: name.to_string(),
                    })
                }
            },
        };
        Ok(ConfigPayload::new(&USM_USER_SCHEMA, op, SECRET_KEY_TAGS)
            .with(tags::USER_NAME, name)
            .with(tags::REMOTE_ENGINE_ID, flag)
            .with(tags::ENGINE_ID, engine_id))
    }
}

impl EntityManager for UsmUserEntity {
    fn schema(&self) -> &'static EntitySchema {
        &USM_USER_SCHEMA
    }

    fn synthesize(
        &self,
        desired: &DesiredState,
        decision: &ChangeDecision,
    ) -> CeResult<Vec<Command>> {
        let name = desired.declared(fields::USM_USER_NAME).unwrap_or_default();
        let remote = desired.declared(fields::REMOTE_ENGINE_ID);
        let group = desired.declared(fields::USER_GROUP);
        let acl = desired.declared(fields::ACL_NUMBER);
        let auth_protocol = desired.declared(fields::AUTH_PROTOCOL);
        let auth_key = desired.declared(fields::AUTH_KEY);
        let priv_protocol = desired.declared(fields::PRIV_PROTOCOL);
        let priv_key = desired.declared(fields::PRIV_KEY);

        match decision.kind {
            ChangeKind::None => Ok(Vec::new()),
            ChangeKind::Delete => {
                let mut payload = self.base_payload(ConfigOp::Delete, name, remote)?;
                for (tag, value) in [
                    (tags::GROUP_NAME, group),
                    (tags::ACL_NUMBER, acl),
                    (tags::AUTH_PROTOCOL, auth_protocol),
                    (tags::AUTH_KEY, auth_key),
                    (tags::PRIV_PROTOCOL, priv_protocol),
                    (tags::PRIV_KEY, priv_key),
                ] {
                    if let Some(value) = value {
                        payload.push(tag, value);
                    }
                }
                Ok(vec![Command::new(payload, usm_undo_command(name, remote))])
            }
            kind => {
                // Cumulative grammar: identity first, then the
                // authentication and privacy stages, each repeating the
                // key fields. Only the first stage may create.
                let first_op = if kind == ChangeKind::Create {
                    ConfigOp::Create
                } else {
                    ConfigOp::Merge
                };

                let mut commands = Vec::new();

                let mut identity = self.base_payload(first_op, name, remote)?;
                if let Some(group) = group {
                    identity.push(tags::GROUP_NAME, group);
                }
                if let Some(acl) = acl {
                    identity.push(tags::ACL_NUMBER, acl);
                }
                commands.push(Command::new(
                    identity,
                    usm_identity_command(name, remote, group, acl),
                ));

                if auth_protocol.is_some() || auth_key.is_some() {
                    let mut auth = self.base_payload(ConfigOp::Merge, name, remote)?;
                    if let Some(protocol) = auth_protocol {
                        auth.push(tags::AUTH_PROTOCOL, protocol);
                    }
                    if let Some(key) = auth_key {
                        auth.push(tags::AUTH_KEY, key);
                    }
                    commands.push(Command::new(
                        auth,
                        usm_auth_command(name, remote, auth_protocol, auth_key.is_some()),
                    ));
                }

                if priv_protocol.is_some() || priv_key.is_some() {
                    let mut privacy = self.base_payload(ConfigOp::Merge, name, remote)?;
                    if let Some(protocol) = priv_protocol {
                        privacy.push(tags::PRIV_PROTOCOL, protocol);
                    }
                    if let Some(key) = priv_key {
                        privacy.push(tags::PRIV_KEY, key);
                    }
                    commands.push(Command::new(
                        privacy,
                        usm_priv_command(
                            name,
                            remote,
                            auth_protocol,
                            priv_protocol,
                            priv_key.is_some(),
                        ),
                    ));
                }

                Ok(commands)
            }
        }
    }
}

struct LocalUserEntity;

impl EntityManager for LocalUserEntity {
    fn schema(&self) -> &'static EntitySchema {
        &LOCAL_USER_SCHEMA
    }

    fn synthesize(
        &self,
        desired: &DesiredState,
        decision: &ChangeDecision,
    ) -> CeResult<Vec<Command>> {
        let name = desired.declared(fields::AAA_LOCAL_USER).unwrap_or_default();
        let auth_protocol = desired
            .declared(fields::AUTH_PROTOCOL)
            .unwrap_or_default();
        let auth_key = desired.declared(fields::AUTH_KEY).unwrap_or_default();
        let priv_protocol = desired
            .declared(fields::PRIV_PROTOCOL)
            .unwrap_or_default();
        let priv_key = desired.declared(fields::PRIV_KEY).unwrap_or_default();

        let op = match decision.kind {
            ChangeKind::Create => ConfigOp::Create,
            ChangeKind::Merge => ConfigOp::Merge,
            ChangeKind::Delete => ConfigOp::Delete,
            ChangeKind::None => return Ok(Vec::new()),
        };

        let payload = ConfigPayload::new(&LOCAL_USER_SCHEMA, op, SECRET_KEY_TAGS)
            .with(tags::USER_NAME, name)
            .with(tags::AUTH_PROTOCOL, auth_protocol)
            .with(tags::AUTH_KEY, auth_key)
            .with(tags::PRIV_PROTOCOL, priv_protocol)
            .with(tags::PRIV_KEY, priv_key);

        let display = match op {
            ConfigOp::Delete => local_user_undo_command(name),
            _ => local_user_command(name, auth_protocol, priv_protocol),
        };
        Ok(vec![Command::new(payload, display)])
    }
}

/// Manager facade for one USM/local user invocation.
#[derive(Debug, Default)]
pub struct SnmpUserMgr;

impl SnmpUserMgr {
    /// Creates the manager.
    pub fn new() -> Self {
        Self
    }

    /// Reconciles the addressed user entity to the declared state and
    /// reports the result. For USM users declared without a remote
    /// engine id the device's local engine id is looked up first.
    #[instrument(skip_all)]
    pub async fn run<S>(&self, session: &mut S, params: &UserParams) -> CeResult<ReconcileReport>
    where
        S: DeviceSession + ?Sized,
    {
        if !params.addresses_usm_user() && !params.addresses_local_user() {
            return Err(CeError::validation(
                fields::USM_USER_NAME,
                "usm_user_name or aaa_local_user must be declared",
            ));
        }

        let declared = params.declared_fields();
        validate(&USM_USER_SCHEMA, &declared)?;
        validate(&LOCAL_USER_SCHEMA, &declared)?;

        let mut report = ReconcileReport::proposed_from(&declared, params.state);

        if params.addresses_usm_user() {
            let local_engine_id = if params.remote_engine_id.is_none() {
                self.fetch_local_engine_id(session).await?
            } else {
                None
            };
            let entity = UsmUserEntity { local_engine_id };
            report.absorb(converge(&entity, session, &declared, params.state).await?);
        } else {
            report.absorb(skipped(&USM_USER_SCHEMA));
        }

        if params.addresses_local_user() {
            report.absorb(converge(&LocalUserEntity, session, &declared, params.state).await?);
        } else {
            report.absorb(skipped(&LOCAL_USER_SCHEMA));
        }

        Ok(report)
    }

    async fn fetch_local_engine_id<S>(&self, session: &mut S) -> CeResult<Option<String>>
    where
        S: DeviceSession + ?Sized,
    {
        let query = FetchQuery::new(LOCAL_ENGINE_ENTITY, vec![tags::LOCAL_ENGINE_ID]);
        let records = session.fetch(&query).await?;
        let engine_id = records
            .first()
            .and_then(|record| record.get(tags::LOCAL_ENGINE_ID))
            .map(str::to_string);
        debug!(found = engine_id.is_some(), "local engine id lookup");
        Ok(engine_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ce_reconcile_common::{field_values, reconcile, ActualRecord, FieldValuesExt, Intent};

    fn local_entity() -> UsmUserEntity {
        UsmUserEntity {
            local_engine_id: Some("800007DB03AABBCC001122".to_string()),
        }
    }

    #[test]
    fn test_three_stage_synthesis_repeats_key_fields() {
        let declared = field_values! {
            "usm_user_name" => "wdz_snmp",
            "user_group" => "wdz_group",
            "auth_protocol" => "md5",
            "auth_key" => "authpass",
            "priv_protocol" => "des56",
            "priv_key" => "privpass",
        };
        let desired = DesiredState::from_declared(&USM_USER_SCHEMA, &declared, Intent::Present);
        let decision = reconcile(&desired, &[]);
        assert_eq!(decision.kind, ChangeKind::Create);

        let commands = local_entity().synthesize(&desired, &decision).unwrap();
        assert_eq!(commands.len(), 3);
        assert_eq!(commands[0].payload.op, ConfigOp::Create);
        assert_eq!(commands[1].payload.op, ConfigOp::Merge);
        assert_eq!(commands[2].payload.op, ConfigOp::Merge);

        for command in &commands {
            assert_eq!(
                command.payload.fields.get_field("userName"),
                Some("wdz_snmp")
            );
            assert_eq!(
                command.payload.fields.get_field("remoteEngineID"),
                Some("false")
            );
            assert_eq!(
                command.payload.fields.get_field("engineID"),
                Some("800007DB03AABBCC001122")
            );
        }

        assert_eq!(
            commands[0].display,
            "snmp-agent usm-user v3 wdz_snmp wdz_group"
        );
        assert_eq!(
            commands[1].display,
            "snmp-agent usm-user v3 wdz_snmp authentication-mode md5 cipher ******"
        );
        assert_eq!(
            commands[2].display,
            "snmp-agent usm-user v3 wdz_snmp privacy-mode des56 cipher ******"
        );
    }

    #[test]
    fn test_identity_only_synthesis_is_single_stage() {
        let declared = field_values! {
            "usm_user_name" => "wdz_snmp",
            "user_group" => "wdz_group",
        };
        let desired = DesiredState::from_declared(&USM_USER_SCHEMA, &declared, Intent::Present);
        let decision = reconcile(&desired, &[]);

        let commands = local_entity().synthesize(&desired, &decision).unwrap();
        assert_eq!(commands.len(), 1);
    }

    #[test]
    fn test_remote_user_uses_declared_engine_id() {
        let declared = field_values! {
            "usm_user_name" => "wdz_snmp",
            "remote_engine_id" => "800007DB03389222111200",
        };
        let desired = DesiredState::from_declared(&USM_USER_SCHEMA, &declared, Intent::Present);
        let decision = reconcile(&desired, &[]);

        // No local engine id needed when the remote id is declared.
        let entity = UsmUserEntity {
            local_engine_id: None,
        };
        let commands = entity.synthesize(&desired, &decision).unwrap();
        assert_eq!(
            commands[0].payload.fields.get_field("remoteEngineID"),
            Some("true")
        );
        assert_eq!(
            commands[0].display,
            "snmp-agent remote-engineid 800007DB03389222111200 usm-user v3 wdz_snmp"
        );
    }

    #[test]
    fn test_missing_engine_id_is_an_error() {
        let declared = field_values! { "usm_user_name" => "wdz_snmp" };
        let desired = DesiredState::from_declared(&USM_USER_SCHEMA, &declared, Intent::Present);
        let decision = reconcile(&desired, &[]);

        let entity = UsmUserEntity {
            local_engine_id: None,
        };
        let err = entity.synthesize(&desired, &decision).unwrap_err();
        assert!(matches!(err, CeError::EngineIdUnavailable { ref user } if user == "wdz_snmp"));
    }

    #[test]
    fn test_remote_presence_mismatch_triggers_merge() {
        // The user exists bound to the local engine; declaring a remote
        // engine id must trigger a change even though every declared
        // value tag matches.
        let declared = field_values! {
            "usm_user_name" => "wdz_snmp",
            "remote_engine_id" => "800007DB03389222111200",
        };
        let desired = DesiredState::from_declared(&USM_USER_SCHEMA, &declared, Intent::Present);
        let records = [ActualRecord::new()
            .with("userName", "wdz_snmp")
            .with("remoteEngineID", "false")
            .with("engineID", "800007DB03389222111200")];
        let decision = reconcile(&desired, &records);
        assert_eq!(decision.kind, ChangeKind::Merge);
    }

    #[test]
    fn test_local_user_round_trip() {
        let declared = field_values! {
            "aaa_local_user" => "wdz_user",
            "auth_protocol" => "md5",
            "auth_key" => "authpass",
            "priv_protocol" => "des56",
            "priv_key" => "privpass",
        };
        let desired = DesiredState::from_declared(&LOCAL_USER_SCHEMA, &declared, Intent::Present);
        let decision = reconcile(&desired, &[]);

        let commands = LocalUserEntity.synthesize(&desired, &decision).unwrap();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].payload.op, ConfigOp::Create);
        assert!(!commands[0].display.contains("authpass"));
        assert!(commands[0].display.contains("cipher ******"));
    }

    #[test]
    fn test_local_user_requires_full_credentials() {
        let declared = field_values! {
            "aaa_local_user" => "wdz_user",
            "auth_protocol" => "md5",
        };
        assert!(validate(&LOCAL_USER_SCHEMA, &declared).is_err());
    }

    #[test]
    fn test_usm_and_local_user_are_exclusive() {
        let declared = field_values! {
            "usm_user_name" => "wdz_snmp",
            "aaa_local_user" => "wdz_user",
        };
        assert!(validate(&USM_USER_SCHEMA, &declared).is_err());
    }
}
