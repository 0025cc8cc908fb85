//! SNMP community and v3 group configuration manager.
//!
//! Reconciles v1/v2c community entries and SNMPv3 access groups. One
//! invocation addresses either a community (name plus access right) or
//! a v3 group (name plus security level), never both.

pub mod commands;
pub mod community_mgr;
pub mod tables;
pub mod types;

pub use community_mgr::SnmpCommunityMgr;
pub use types::{AccessRight, CommunityParams, SecurityLevel};
