//! Native-CLI display forms for USM and local user changes.
//!
//! The USM grammar is cumulative: identity, authentication and privacy
//! are separate commands sharing the same user prefix. Keys are
//! credentials and always shown redacted.

use ce_reconcile_common::REDACTED;

fn usm_prefix(name: &str, remote_engine_id: Option<&str>) -> String {
    match remote_engine_id {
        Some(id) => format!("snmp-agent remote-engineid {} usm-user v3 {}", id, name),
        None => format!("snmp-agent usm-user v3 {}", name),
    }
}

/// Identity command: user, optional group binding, optional ACL.
pub fn usm_identity_command(
    name: &str,
    remote_engine_id: Option<&str>,
    group: Option<&str>,
    acl: Option<&str>,
) -> String {
    let mut cmd = usm_prefix(name, remote_engine_id);
    if let Some(group) = group {
        cmd.push_str(&format!(" {}", group));
    }
    if let Some(acl) = acl {
        cmd.push_str(&format!(" acl {}", acl));
    }
    cmd
}

/// Authentication command. The mode and cipher suffixes are suppressed
/// for the noAuth protocol; the device grammar has no spelling for them.
pub fn usm_auth_command(
    name: &str,
    remote_engine_id: Option<&str>,
    auth_protocol: Option<&str>,
    has_auth_key: bool,
) -> String {
    let mut cmd = usm_prefix(name, remote_engine_id);
    let no_auth = auth_protocol == Some("noAuth");
    if let Some(protocol) = auth_protocol {
        if !no_auth {
            cmd.push_str(&format!(" authentication-mode {}", protocol));
        }
    }
    if has_auth_key && !no_auth {
        cmd.push_str(&format!(" cipher {}", REDACTED));
    }
    cmd
}

/// Privacy command. Suppressed entirely under noAuth or noPriv.
pub fn usm_priv_command(
    name: &str,
    remote_engine_id: Option<&str>,
    auth_protocol: Option<&str>,
    priv_protocol: Option<&str>,
    has_priv_key: bool,
) -> String {
    let mut cmd = usm_prefix(name, remote_engine_id);
    let suppressed = auth_protocol == Some("noAuth") || priv_protocol == Some("noPriv");
    if let Some(protocol) = priv_protocol {
        if !suppressed {
            cmd.push_str(&format!(" privacy-mode {}", protocol));
        }
    }
    if has_priv_key && !suppressed {
        cmd.push_str(&format!(" cipher {}", REDACTED));
    }
    cmd
}

/// Remove a USM user.
pub fn usm_undo_command(name: &str, remote_engine_id: Option<&str>) -> String {
    format!("undo {}", usm_prefix(name, remote_engine_id))
}

/// Configure an AAA local user with SNMPv3 credentials.
pub fn local_user_command(name: &str, auth_protocol: &str, priv_protocol: &str) -> String {
    format!(
        "snmp-agent local-user v3 {} authentication-mode {} cipher {} privacy-mode {} cipher {}",
        name, auth_protocol, REDACTED, priv_protocol, REDACTED
    )
}

/// Remove an AAA local user.
pub fn local_user_undo_command(name: &str) -> String {
    format!("undo snmp-agent local-user v3 {}", name)
}
