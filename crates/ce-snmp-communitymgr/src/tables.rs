//! Entity, field and tag names for the community manager.

/// Community entity name.
pub const COMMUNITY_ENTITY: &str = "snmp-community";

/// Community report label.
pub const COMMUNITY_LABEL: &str = "snmp community";

/// v3 group entity name.
pub const V3_GROUP_ENTITY: &str = "snmp-v3-group";

/// v3 group report label.
pub const V3_GROUP_LABEL: &str = "snmp v3 group";

/// Device element tags.
pub mod tags {
    pub const COMMUNITY_NAME: &str = "communityName";
    pub const ACCESS_RIGHT: &str = "accessRight";
    pub const ACL_NUMBER: &str = "aclNumber";
    pub const MIB_VIEW_NAME: &str = "mibViewName";

    pub const GROUP_NAME: &str = "groupName";
    pub const SECURITY_LEVEL: &str = "securityLevel";
    pub const READ_VIEW_NAME: &str = "readViewName";
    pub const WRITE_VIEW_NAME: &str = "writeViewName";
    pub const NOTIFY_VIEW_NAME: &str = "notifyViewName";
}

/// Declared field names.
pub mod fields {
    pub const COMMUNITY_NAME: &str = "community_name";
    pub const ACCESS_RIGHT: &str = "access_right";
    pub const ACL_NUMBER: &str = "acl_number";
    pub const COMMUNITY_MIB_VIEW: &str = "community_mib_view";

    pub const GROUP_NAME: &str = "group_name";
    pub const SECURITY_LEVEL: &str = "security_level";
    pub const READ_VIEW: &str = "read_view";
    pub const WRITE_VIEW: &str = "write_view";
    pub const NOTIFY_VIEW: &str = "notify_view";
}
