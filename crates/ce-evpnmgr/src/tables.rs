//! Entity and tag names for the EVPN global manager.

/// Entity name used in fetch queries and payloads.
pub const EVPN_GLOBAL_ENTITY: &str = "evpn-global";

/// Human-readable label used in reports.
pub const EVPN_GLOBAL_LABEL: &str = "evpn global";

/// Device tag carrying the overlay switch state ("true" / "false").
pub const TAG_EVPN_OVERLAY: &str = "evpnOverLay";

/// Declared field names.
pub mod fields {
    pub const OVERLAY_ENABLE: &str = "overlay_enable";
}
