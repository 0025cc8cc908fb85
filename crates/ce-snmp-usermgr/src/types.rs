//! Typed parameters for USM and local user reconciliation.

use serde::{Deserialize, Serialize};

use ce_reconcile_common::{FieldValues, Intent};

use crate::tables::fields;

/// USM authentication protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthProtocol {
    #[serde(rename = "noAuth")]
    NoAuth,
    #[serde(rename = "md5")]
    Md5,
    #[serde(rename = "sha")]
    Sha,
}

impl AuthProtocol {
    /// Device element value.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProtocol::NoAuth => "noAuth",
            AuthProtocol::Md5 => "md5",
            AuthProtocol::Sha => "sha",
        }
    }
}

/// USM privacy protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrivProtocol {
    #[serde(rename = "noPriv")]
    NoPriv,
    #[serde(rename = "des56")]
    Des56,
    #[serde(rename = "3des168")]
    TripleDes168,
    #[serde(rename = "aes128")]
    Aes128,
    #[serde(rename = "aes192")]
    Aes192,
    #[serde(rename = "aes256")]
    Aes256,
}

impl PrivProtocol {
    /// Device element value.
    pub fn as_str(&self) -> &'static str {
        match self {
            PrivProtocol::NoPriv => "noPriv",
            PrivProtocol::Des56 => "des56",
            PrivProtocol::TripleDes168 => "3des168",
            PrivProtocol::Aes128 => "aes128",
            PrivProtocol::Aes192 => "aes192",
            PrivProtocol::Aes256 => "aes256",
        }
    }
}

/// Caller-declared desired state for one invocation. Either
/// `usm_user_name` or `aaa_local_user` is declared, never both; the
/// auth/priv fields bind to whichever entity the invocation addresses.
#[derive(Debug, Clone, Default)]
pub struct UserParams {
    pub state: Intent,
    pub acl_number: Option<String>,
    pub usm_user_name: Option<String>,
    pub remote_engine_id: Option<String>,
    pub user_group: Option<String>,
    pub auth_protocol: Option<AuthProtocol>,
    pub auth_key: Option<String>,
    pub priv_protocol: Option<PrivProtocol>,
    pub priv_key: Option<String>,
    pub aaa_local_user: Option<String>,
}

impl UserParams {
    /// Flattens the declared options into field-value pairs.
    pub fn declared_fields(&self) -> FieldValues {
        let mut declared = FieldValues::new();
        let mut push = |field: &str, value: Option<&str>| {
            if let Some(value) = value {
                declared.push((field.to_string(), value.to_string()));
            }
        };
        push(fields::USM_USER_NAME, self.usm_user_name.as_deref());
        push(fields::REMOTE_ENGINE_ID, self.remote_engine_id.as_deref());
        push(fields::USER_GROUP, self.user_group.as_deref());
        push(fields::ACL_NUMBER, self.acl_number.as_deref());
        push(
            fields::AUTH_PROTOCOL,
            self.auth_protocol.map(|p| p.as_str()),
        );
        push(fields::AUTH_KEY, self.auth_key.as_deref());
        push(
            fields::PRIV_PROTOCOL,
            self.priv_protocol.map(|p| p.as_str()),
        );
        push(fields::PRIV_KEY, self.priv_key.as_deref());
        push(fields::AAA_LOCAL_USER, self.aaa_local_user.as_deref());
        declared
    }

    /// True when the invocation addresses a USM user.
    pub fn addresses_usm_user(&self) -> bool {
        self.usm_user_name.is_some()
    }

    /// True when the invocation addresses an AAA local user.
    pub fn addresses_local_user(&self) -> bool {
        self.aaa_local_user.is_some()
    }
}
