//! Display-command synthesis for the EVPN overlay switch.

/// Command string recorded in the report for an overlay state change.
pub fn overlay_command(enable: bool) -> String {
    if enable {
        "evpn-overlay enable".to_string()
    } else {
        "undo evpn-overlay enable".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enable_and_disable_forms() {
        assert_eq!(overlay_command(true), "evpn-overlay enable");
        assert_eq!(overlay_command(false), "undo evpn-overlay enable");
    }
}
