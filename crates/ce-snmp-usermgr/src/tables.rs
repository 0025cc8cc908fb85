//! Entity, field and tag names for the user manager.

/// USM user entity name.
pub const USM_USER_ENTITY: &str = "snmp-usm-user";

/// USM user report label.
pub const USM_USER_LABEL: &str = "snmp usm user";

/// AAA local user entity name.
pub const LOCAL_USER_ENTITY: &str = "snmp-local-user";

/// AAA local user report label.
pub const LOCAL_USER_LABEL: &str = "snmp local user";

/// Device-wide engine id entity name.
pub const LOCAL_ENGINE_ENTITY: &str = "snmp-local-engine";

/// Device element tags.
pub mod tags {
    pub const USER_NAME: &str = "userName";
    pub const REMOTE_ENGINE_ID: &str = "remoteEngineID";
    pub const ENGINE_ID: &str = "engineID";
    pub const GROUP_NAME: &str = "groupName";
    pub const ACL_NUMBER: &str = "aclNumber";
    pub const AUTH_PROTOCOL: &str = "authProtocol";
    pub const AUTH_KEY: &str = "authKey";
    pub const PRIV_PROTOCOL: &str = "privProtocol";
    pub const PRIV_KEY: &str = "privKey";
    pub const LOCAL_ENGINE_ID: &str = "localEngineID";
}

/// Declared field names.
pub mod fields {
    pub const USM_USER_NAME: &str = "usm_user_name";
    pub const REMOTE_ENGINE_ID: &str = "remote_engine_id";
    pub const USER_GROUP: &str = "user_group";
    pub const ACL_NUMBER: &str = "acl_number";
    pub const AUTH_PROTOCOL: &str = "auth_protocol";
    pub const AUTH_KEY: &str = "auth_key";
    pub const PRIV_PROTOCOL: &str = "priv_protocol";
    pub const PRIV_KEY: &str = "priv_key";
    pub const AAA_LOCAL_USER: &str = "aaa_local_user";
}
