//! Typed parameters for community and v3 group reconciliation.

use serde::{Deserialize, Serialize};

use ce_reconcile_common::{FieldValues, Intent};

use crate::tables::fields;

/// Access right granted to a community.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessRight {
    Read,
    Write,
}

impl AccessRight {
    /// Device element value.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessRight::Read => "read",
            AccessRight::Write => "write",
        }
    }
}

/// SNMPv3 security level of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecurityLevel {
    #[serde(rename = "noAuthNoPriv")]
    NoAuthNoPriv,
    #[serde(rename = "authentication")]
    Authentication,
    #[serde(rename = "privacy")]
    Privacy,
}

impl SecurityLevel {
    /// Device element value.
    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityLevel::NoAuthNoPriv => "noAuthNoPriv",
            SecurityLevel::Authentication => "authentication",
            SecurityLevel::Privacy => "privacy",
        }
    }
}

/// Native-CLI token for a device-side security level value.
pub fn security_level_cli(level: &str) -> &str {
    match level {
        "noAuthNoPriv" => "noauthentication",
        "authentication" => "authentication",
        "privacy" => "privacy",
        other => other,
    }
}

/// Caller-declared desired state for one invocation. Either the
/// community pair or the group pair is declared; `acl_number` binds to
/// whichever entity the invocation addresses.
#[derive(Debug, Clone, Default)]
pub struct CommunityParams {
    pub state: Intent,
    pub acl_number: Option<String>,
    pub community_name: Option<String>,
    pub access_right: Option<AccessRight>,
    pub community_mib_view: Option<String>,
    pub group_name: Option<String>,
    pub security_level: Option<SecurityLevel>,
    pub read_view: Option<String>,
    pub write_view: Option<String>,
    pub notify_view: Option<String>,
}

impl CommunityParams {
    /// Flattens the declared options into field-value pairs.
    pub fn declared_fields(&self) -> FieldValues {
        let mut declared = FieldValues::new();
        let mut push = |field: &str, value: Option<&str>| {
            if let Some(value) = value {
                declared.push((field.to_string(), value.to_string()));
            }
        };
        push(fields::COMMUNITY_NAME, self.community_name.as_deref());
        push(
            fields::ACCESS_RIGHT,
            self.access_right.map(|r| r.as_str()),
        );
        push(fields::ACL_NUMBER, self.acl_number.as_deref());
        push(
            fields::COMMUNITY_MIB_VIEW,
            self.community_mib_view.as_deref(),
        );
        push(fields::GROUP_NAME, self.group_name.as_deref());
        push(
            fields::SECURITY_LEVEL,
            self.security_level.map(|l| l.as_str()),
        );
        push(fields::READ_VIEW, self.read_view.as_deref());
        push(fields::WRITE_VIEW, self.write_view.as_deref());
        push(fields::NOTIFY_VIEW, self.notify_view.as_deref());
        declared
    }

    /// True when the invocation addresses a community entry.
    pub fn addresses_community(&self) -> bool {
        self.community_name.is_some() || self.access_right.is_some()
    }

    /// True when the invocation addresses a v3 group.
    pub fn addresses_group(&self) -> bool {
        self.group_name.is_some() || self.security_level.is_some()
    }
}
