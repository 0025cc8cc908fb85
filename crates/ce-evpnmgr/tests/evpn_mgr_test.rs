//! End-to-end overlay flag reconciliation against a mock device.

use ce_evpnmgr::tables::{EVPN_GLOBAL_ENTITY, TAG_EVPN_OVERLAY};
use ce_evpnmgr::EvpnGlobalMgr;
use ce_reconcile_test::fixtures::device;
use ce_reconcile_test::{MockSession, ReportVerifier};

#[tokio::test]
async fn test_enable_overlay_when_disabled() {
    let mut session = MockSession::new()
        .with_records(EVPN_GLOBAL_ENTITY, vec![device::evpn_overlay(false)]);

    let report = EvpnGlobalMgr::new()
        .run(&mut session, true)
        .await
        .expect("run succeeds");

    let verifier = ReportVerifier::new(&report);
    verifier.assert_changed(true).unwrap();
    verifier.assert_updates(&["evpn-overlay enable"]).unwrap();

    assert_eq!(
        report.proposed.get("overlay_enable").map(String::as_str),
        Some("true")
    );
    assert_eq!(
        report.existing["evpn global"][0].get(TAG_EVPN_OVERLAY),
        Some("false")
    );
    assert_eq!(
        report.end_state["evpn global"][0].get(TAG_EVPN_OVERLAY),
        Some("true")
    );
}

#[tokio::test]
async fn test_disable_overlay_when_enabled() {
    let mut session = MockSession::new()
        .with_records(EVPN_GLOBAL_ENTITY, vec![device::evpn_overlay(true)]);

    let report = EvpnGlobalMgr::new()
        .run(&mut session, false)
        .await
        .expect("run succeeds");

    assert!(report.changed);
    assert_eq!(report.updates, vec!["undo evpn-overlay enable"]);
}

#[tokio::test]
async fn test_noop_when_already_converged() {
    let mut session = MockSession::new()
        .with_records(EVPN_GLOBAL_ENTITY, vec![device::evpn_overlay(true)]);

    let report = EvpnGlobalMgr::new()
        .run(&mut session, true)
        .await
        .expect("run succeeds");

    assert!(!report.changed);
    assert!(report.updates.is_empty());
    assert!(session.applied.is_empty());
}

#[tokio::test]
async fn test_second_run_is_noop() {
    let mut session = MockSession::new()
        .with_records(EVPN_GLOBAL_ENTITY, vec![device::evpn_overlay(false)]);

    let mgr = EvpnGlobalMgr::new();
    let first = mgr.run(&mut session, true).await.expect("first run");
    assert!(first.changed);

    let second = mgr.run(&mut session, true).await.expect("second run");
    assert!(!second.changed);
    assert!(second.updates.is_empty());
}

#[tokio::test]
async fn test_rejected_apply_surfaces_error() {
    let mut session = MockSession::new()
        .with_records(EVPN_GLOBAL_ENTITY, vec![device::evpn_overlay(false)]);
    session.reject_next_apply();

    let err = EvpnGlobalMgr::new()
        .run(&mut session, true)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("evpn-overlay enable"));
}
