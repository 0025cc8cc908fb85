//! The transport boundary: fetch and apply against a managed device.
//!
//! The engine consumes this trait; it never owns a connection. NETCONF,
//! a CLI session, or a test double all sit behind the same seam.

use async_trait::async_trait;

use crate::command::ConfigPayload;
use crate::error::CeResult;
use crate::state::{ActualRecord, DesiredState};

/// A structured read query: which entity type to read and which device
/// tags to request. The tag mask mirrors which desired fields were
/// declared, so the device is never asked for fields the caller does not
/// care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchQuery {
    /// Entity type identifier.
    pub entity: &'static str,
    /// Device tags to request/parse.
    pub tags: Vec<&'static str>,
}

impl FetchQuery {
    /// Builds a query for an arbitrary entity and tag set.
    pub fn new(entity: &'static str, tags: Vec<&'static str>) -> Self {
        Self { entity, tags }
    }

    /// Builds the query matching a validated desired state.
    pub fn for_desired(desired: &DesiredState) -> Self {
        Self {
            entity: desired.schema.entity,
            tags: desired.fetch_tags(),
        }
    }
}

/// A configuration session on one managed device.
///
/// Calls are made one at a time in program order; the engine holds no
/// lock of its own and assumes exclusive device access for the duration
/// of an invocation. Timeouts and retries live below this trait and
/// surface only as transport errors.
#[async_trait]
pub trait DeviceSession: Send {
    /// Reads the current records for an entity type. Zero records is a
    /// valid, non-error result.
    async fn fetch(&mut self, query: &FetchQuery) -> CeResult<Vec<ActualRecord>>;

    /// Submits one change payload. `Ok(false)` means the transport call
    /// succeeded but the device reported a non-success status; the
    /// caller turns that into an apply-rejected error.
    async fn apply(&mut self, payload: &ConfigPayload) -> CeResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_values;
    use crate::schema::{Constraint, EntitySchema, FieldSpec};
    use crate::state::{DesiredState, Intent};

    const SCHEMA: EntitySchema = EntitySchema {
        entity: "snmp-v3-group",
        label: "snmp v3 group",
        key_fields: &["group_name", "security_level"],
        fields: &[
            FieldSpec::new("group_name", "groupName", Constraint::Any),
            FieldSpec::new("security_level", "securityLevel", Constraint::Any),
            FieldSpec::new("read_view", "readViewName", Constraint::Any),
            FieldSpec::new("acl_number", "aclNumber", Constraint::AclId),
        ],
        rules: &[],
    };

    #[test]
    fn test_query_mask_mirrors_declared_fields() {
        let desired = DesiredState::from_declared(
            &SCHEMA,
            &field_values! {
                "group_name" => "wdz_group",
                "security_level" => "noAuthNoPriv",
                "acl_number" => "2000",
            },
            Intent::Present,
        );
        let query = FetchQuery::for_desired(&desired);
        assert_eq!(query.entity, "snmp-v3-group");
        // Key tags always, declared optional tags, nothing else.
        assert_eq!(query.tags, vec!["groupName", "securityLevel", "aclNumber"]);
        assert!(!query.tags.contains(&"readViewName"));
    }
}
