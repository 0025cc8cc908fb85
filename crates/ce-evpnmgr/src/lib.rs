//! EVPN global configuration manager.
//!
//! Drives the single device-wide `evpn-overlay enable` knob toward the
//! requested value and reports what changed.

pub mod commands;
pub mod evpn_mgr;
pub mod tables;

pub use evpn_mgr::EvpnGlobalMgr;
