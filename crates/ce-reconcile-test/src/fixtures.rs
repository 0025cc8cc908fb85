//! Record fixtures for common device-state scenarios.

use ce_reconcile_common::ActualRecord;

/// SNMP community fixtures.
pub mod community {
    use super::*;

    /// A community entry as the device reports it.
    pub fn record(name: &str, right: &str) -> ActualRecord {
        ActualRecord::new()
            .with("communityName", name)
            .with("accessRight", right)
    }

    /// A community entry with an ACL bound.
    pub fn record_with_acl(name: &str, right: &str, acl: &str) -> ActualRecord {
        record(name, right).with("aclNumber", acl)
    }
}

/// SNMPv3 group fixtures.
pub mod v3_group {
    use super::*;

    /// A v3 group entry.
    pub fn record(name: &str, level: &str) -> ActualRecord {
        ActualRecord::new()
            .with("groupName", name)
            .with("securityLevel", level)
    }

    /// A v3 group entry with views configured.
    pub fn record_with_views(name: &str, level: &str, read: &str, write: &str) -> ActualRecord {
        record(name, level)
            .with("readViewName", read)
            .with("writeViewName", write)
    }
}

/// USM user fixtures.
pub mod usm_user {
    use super::*;

    /// A USM user bound to the local engine.
    pub fn local_record(name: &str, group: &str) -> ActualRecord {
        ActualRecord::new()
            .with("userName", name)
            .with("remoteEngineID", "false")
            .with("groupName", group)
    }

    /// A USM user bound to a remote engine.
    pub fn remote_record(name: &str, engine_id: &str, group: &str) -> ActualRecord {
        ActualRecord::new()
            .with("userName", name)
            .with("remoteEngineID", "true")
            .with("engineID", engine_id)
            .with("groupName", group)
    }
}

/// AAA local user fixtures.
pub mod local_user {
    use super::*;

    /// A local user with auth and privacy configured.
    pub fn record(name: &str, auth: &str, auth_key: &str, priv_proto: &str, priv_key: &str) -> ActualRecord {
        ActualRecord::new()
            .with("userName", name)
            .with("authProtocol", auth)
            .with("authKey", auth_key)
            .with("privProtocol", priv_proto)
            .with("privKey", priv_key)
    }
}

/// Device-wide fixtures.
pub mod device {
    use super::*;

    /// The local SNMP engine id record.
    pub fn local_engine(engine_id: &str) -> ActualRecord {
        ActualRecord::new().with("localEngineID", engine_id)
    }

    /// The EVPN overlay flag record.
    pub fn evpn_overlay(enabled: bool) -> ActualRecord {
        ActualRecord::new().with("evpnOverLay", if enabled { "true" } else { "false" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_community_record() {
        let rec = community::record_with_acl("Wdz123", "write", "2000");
        assert_eq!(rec.get("communityName"), Some("Wdz123"));
        assert_eq!(rec.get("aclNumber"), Some("2000"));
    }

    #[test]
    fn test_usm_records() {
        let local = usm_user::local_record("wdz_snmp", "wdz_group");
        assert_eq!(local.get("remoteEngineID"), Some("false"));
        assert!(!local.has("engineID"));

        let remote = usm_user::remote_record("wdz_snmp", "800007DB03389222111200", "wdz_group");
        assert_eq!(remote.get("remoteEngineID"), Some("true"));
        assert_eq!(remote.get("engineID"), Some("800007DB03389222111200"));
    }

    #[test]
    fn test_evpn_flag() {
        assert_eq!(device::evpn_overlay(true).get("evpnOverLay"), Some("true"));
        assert_eq!(device::evpn_overlay(false).get("evpnOverLay"), Some("false"));
    }
}
