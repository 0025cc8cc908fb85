//! Native-CLI display forms for community and group changes.
//!
//! These strings go into the report's `updates` list; the community
//! name is a credential and is always shown redacted.

use ce_reconcile_common::REDACTED;

/// Configure (create or merge) a community entry.
pub fn community_command(right: &str, acl: Option<&str>, mib_view: Option<&str>) -> String {
    let mut cmd = format!("snmp-agent community {} {}", right, REDACTED);
    if let Some(acl) = acl {
        cmd.push_str(&format!(" acl {}", acl));
    }
    if let Some(view) = mib_view {
        cmd.push_str(&format!(" mib-view {}", view));
    }
    cmd
}

/// Remove a community entry.
pub fn community_undo_command(right: &str) -> String {
    format!("undo snmp-agent community {} {}", right, REDACTED)
}

/// Configure (create or merge) a v3 group.
pub fn group_command(
    name: &str,
    level_cli: &str,
    read_view: Option<&str>,
    write_view: Option<&str>,
    notify_view: Option<&str>,
    acl: Option<&str>,
) -> String {
    let mut cmd = format!("snmp-agent group v3 {} {}", name, level_cli);
    if let Some(view) = read_view {
        cmd.push_str(&format!(" read-view {}", view));
    }
    if let Some(view) = write_view {
        cmd.push_str(&format!(" write-view {}", view));
    }
    if let Some(view) = notify_view {
        cmd.push_str(&format!(" notify-view {}", view));
    }
    if let Some(acl) = acl {
        cmd.push_str(&format!(" acl {}", acl));
    }
    cmd
}

/// Remove a v3 group.
pub fn group_undo_command(name: &str, level_cli: &str) -> String {
    format!("undo snmp-agent group v3 {} {}", name, level_cli)
}
