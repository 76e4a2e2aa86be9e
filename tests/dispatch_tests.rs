//! Command vocabulary and delivery tests

use cyd_remote::{
    hal::MockTransport, Dispatcher, LinkConfig, PanelCommand, PanelError, PayloadFraming,
    PeerAddress, RpmLimits, TransmitFailure,
};

fn dispatcher() -> Dispatcher<MockTransport> {
    Dispatcher::new(
        MockTransport::new(),
        &LinkConfig::default(),
        RpmLimits::default(),
    )
}

// ============================================================================
// Payload Vocabulary
// ============================================================================

#[test]
fn fixed_payloads_match_receiver_vocabulary() {
    let expected = [
        (PanelCommand::PropStart, "PROP_START"),
        (PanelCommand::PropStop, "PROP_STOP"),
        (PanelCommand::WeightStart, "WEIGHT_START"),
        (PanelCommand::WeightStop, "WEIGHT_STOP"),
        (PanelCommand::LightsOn, "LIGHTS_ON"),
        (PanelCommand::LightsOff, "LIGHTS_OFF"),
        (PanelCommand::MotionLeft, "MOTION_LEFT"),
        (PanelCommand::MotionRight, "MOTION_RIGHT"),
    ];
    for (cmd, text) in expected {
        assert_eq!(cmd.payload().as_str(), text);
        assert_eq!(PanelCommand::from_payload(text), Some(cmd));
    }
}

#[test]
fn rpm_payload_is_decimal_without_padding() {
    assert_eq!(PanelCommand::SetRpm(30).payload().as_str(), "RPM:30");
    assert_eq!(PanelCommand::SetRpm(5).payload().as_str(), "RPM:5");
    assert_eq!(PanelCommand::SetRpm(999).payload().as_str(), "RPM:999");
}

#[test]
fn unknown_payloads_do_not_parse() {
    for text in ["", "PROP", "prop_start", "RPM:", "RPM:abc", "RPM:-1", "RPM: 5"] {
        assert_eq!(PanelCommand::from_payload(text), None, "{:?}", text);
    }
}

// ============================================================================
// Delivery
// ============================================================================

#[test]
fn rpm_sixty_is_sent_once_to_peer() {
    let mut d = dispatcher();
    d.dispatch(PanelCommand::SetRpm(60)).unwrap();

    let sent = &d.transport().sent;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, LinkConfig::default().peer);
    assert_eq!(sent[0].1, b"RPM:60".to_vec());
}

#[test]
fn every_dispatch_is_a_separate_datagram() {
    let mut d = dispatcher();
    for cmd in [
        PanelCommand::PropStart,
        PanelCommand::PropStart,
        PanelCommand::LightsOn,
    ] {
        d.dispatch(cmd).unwrap();
    }
    assert_eq!(
        d.transport().sent_payloads(),
        vec!["PROP_START", "PROP_START", "LIGHTS_ON"]
    );
    assert_eq!(d.stats().sent, 3);
}

#[test]
fn configured_peer_is_used() {
    let peer = PeerAddress::from_text("24:6F:28:AA:BB:CC").unwrap();
    let link = LinkConfig::default().with_peer(peer);
    let mut d = Dispatcher::new(MockTransport::new(), &link, RpmLimits::default());
    d.dispatch(PanelCommand::MotionLeft).unwrap();
    assert_eq!(d.peer(), peer);
    assert_eq!(d.transport().sent[0].0, peer);
}

#[test]
fn nul_framing_matches_c_receivers() {
    let link = LinkConfig::default().with_framing(PayloadFraming::NulTerminated);
    let mut d = Dispatcher::new(MockTransport::new(), &link, RpmLimits::default());
    let payload = d.dispatch(PanelCommand::SetRpm(60)).unwrap();
    assert_eq!(payload.as_str(), "RPM:60");
    assert_eq!(d.transport().sent[0].1, b"RPM:60\0".to_vec());
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn rpm_outside_limits_is_rejected_before_sending() {
    let link = LinkConfig::default();
    let mut d = Dispatcher::new(MockTransport::new(), &link, RpmLimits::new(10, 100));
    assert_eq!(
        d.dispatch(PanelCommand::SetRpm(101)),
        Err(PanelError::InvalidRpm(101))
    );
    assert_eq!(
        d.dispatch(PanelCommand::SetRpm(9)),
        Err(PanelError::InvalidRpm(9))
    );
    assert_eq!(d.transport().attempts, 0);
    assert!(d.dispatch(PanelCommand::SetRpm(100)).is_ok());
}

#[test]
fn transport_rejection_is_not_retried() {
    let mut d = dispatcher();
    d.transport_mut().fail_next(1);
    assert_eq!(
        d.dispatch(PanelCommand::WeightStart),
        Err(PanelError::TransmitFailure(TransmitFailure::SendRejected))
    );
    assert_eq!(d.transport().attempts, 1);
    assert_eq!(d.stats().failed, 1);
}

#[test]
fn link_down_reports_not_ready() {
    let mut d = dispatcher();
    d.transport_mut().ready = false;
    assert_eq!(
        d.dispatch(PanelCommand::PropStop),
        Err(PanelError::TransmitFailure(TransmitFailure::LinkNotReady))
    );

    d.transport_mut().ready = true;
    assert!(d.dispatch(PanelCommand::PropStop).is_ok());
}

#[test]
fn errors_have_readable_messages() {
    assert_eq!(
        PanelError::InvalidRpm(0).to_string(),
        "rpm 0 out of range"
    );
    assert_eq!(
        PanelError::TransmitFailure(TransmitFailure::LinkNotReady).to_string(),
        "transmit failed: link not ready"
    );
}
