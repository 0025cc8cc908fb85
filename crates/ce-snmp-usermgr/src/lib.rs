//! SNMPv3 USM and AAA local user configuration manager.
//!
//! Reconciles USM users (optionally bound to a remote engine) and AAA
//! local users carrying SNMPv3 credentials. When no remote engine id is
//! declared the device's own engine id is looked up and bound instead.

pub mod commands;
pub mod tables;
pub mod types;
pub mod user_mgr;

pub use types::{AuthProtocol, PrivProtocol, UserParams};
pub use user_mgr::SnmpUserMgr;
