//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for all hardware and link traits,
//! enabling development and testing on desktop without the CYD board.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockTouch`] | [`TouchSensor`] | Queued raw samples and injected bus errors |
//! | [`MockTransport`] | [`CommandTransport`] | Records every datagram sent |
//! | [`MockClock`] | [`Clock`] | Controllable time source |
//! | [`MockDisplay`] | [`PanelDisplay`] | Tracks render calls |
//!
//! # Example
//!
//! ```rust
//! use cyd_remote::{Config, PanelController, TickOutcome};
//! use cyd_remote::hal::{MockTouch, MockTransport};
//!
//! let mut controller =
//!     PanelController::from_config(MockTouch::new(), MockTransport::new(), &Config::default())
//!         .unwrap();
//!
//! controller.sensor_mut().queue_tap(400, 500);
//! controller.tick(0);
//! controller.tick(5);
//!
//! // Verify via the recorded datagrams
//! let sent = &controller.dispatcher().transport().sent;
//! assert_eq!(sent.len(), 1);
//! assert_eq!(sent[0].1, b"PROP_START");
//! ```
//!
//! [`TouchSensor`]: crate::traits::TouchSensor
//! [`CommandTransport`]: crate::traits::CommandTransport
//! [`Clock`]: crate::traits::Clock
//! [`PanelDisplay`]: crate::traits::PanelDisplay

use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec::Vec;

use crate::panel::PanelView;
use crate::traits::{
    Clock, CommandTransport, PanelDisplay, PeerAddress, RawTouchSample, TouchSensor,
};

// ============================================================================
// Hardware Mocks
// ============================================================================

/// Mock touch controller for testing.
///
/// Each poll consumes one queued sample; with the queue empty the panel
/// reads as released. Queue raw coordinates as the sensor would report them
/// (after rotation).
///
/// # Example
///
/// ```rust
/// use cyd_remote::hal::MockTouch;
/// use cyd_remote::traits::{TouchSensor, RawTouchSample};
///
/// let mut touch = MockTouch::new();
///
/// // Simulate a short tap
/// touch.queue_tap(1000, 1200);
///
/// // Samples come out in FIFO order
/// assert_eq!(touch.poll().unwrap(), RawTouchSample::new(1000, 1200));
/// assert!(!touch.poll().unwrap().touched);
///
/// // Simulate a bus error
/// touch.fail_next(1);
/// assert!(touch.poll().is_err());
/// assert!(touch.poll().is_ok());
/// ```
#[derive(Debug, Default)]
pub struct MockTouch {
    /// Samples still to be reported.
    pub queue: VecDeque<RawTouchSample>,
    /// Sample reported by the most recent poll.
    pub current: RawTouchSample,
    /// Number of successful `touched` calls.
    pub polls: usize,
    failures: usize,
}

impl MockTouch {
    /// Creates a new mock sensor with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one pressed reading
    pub fn queue_press(&mut self, x: u16, y: u16) {
        self.queue.push_back(RawTouchSample::new(x, y));
    }

    /// Queue one released reading
    pub fn queue_release(&mut self) {
        self.queue.push_back(RawTouchSample::released());
    }

    /// Queue a press followed by a release
    pub fn queue_tap(&mut self, x: u16, y: u16) {
        self.queue_press(x, y);
        self.queue_release();
    }

    /// Queue a held press that drags through each point, then a release
    pub fn queue_drag(&mut self, points: &[(u16, u16)]) {
        for &(x, y) in points {
            self.queue_press(x, y);
        }
        self.queue_release();
    }

    /// Make the next `n` polls fail with a bus error
    pub fn fail_next(&mut self, n: usize) {
        self.failures = n;
    }
}

impl TouchSensor for MockTouch {
    type Error = ();

    fn touched(&mut self) -> Result<bool, ()> {
        if self.failures > 0 {
            self.failures -= 1;
            return Err(());
        }
        self.polls += 1;
        self.current = self
            .queue
            .pop_front()
            .unwrap_or_else(RawTouchSample::released);
        Ok(self.current.touched)
    }

    fn sample(&mut self) -> Result<RawTouchSample, ()> {
        Ok(self.current)
    }
}

/// Mock clock for testing.
///
/// Provides a controllable time source for testing time-dependent behavior.
///
/// # Example
///
/// ```rust
/// use cyd_remote::hal::MockClock;
/// use cyd_remote::traits::Clock;
///
/// let mut clock = MockClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// clock.set(1000);
/// assert_eq!(clock.now_ms(), 1000);
///
/// clock.advance(500);
/// assert_eq!(clock.now_ms(), 1500);
/// ```
#[derive(Debug, Default)]
pub struct MockClock {
    current_ms: u64,
}

impl MockClock {
    /// Creates a new mock clock starting at 0ms.
    pub fn new() -> Self {
        Self { current_ms: 0 }
    }

    /// Sets the current time in milliseconds.
    pub fn set(&mut self, ms: u64) {
        self.current_ms = ms;
    }

    /// Advances the clock by the given duration.
    pub fn advance(&mut self, ms: u64) {
        self.current_ms += ms;
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.current_ms
    }
}

// ============================================================================
// Link Mocks
// ============================================================================

/// Mock transport for testing.
///
/// Records every accepted datagram with its destination. Injected failures
/// count as attempts but are not recorded in `sent`.
///
/// # Example
///
/// ```rust
/// use cyd_remote::hal::MockTransport;
/// use cyd_remote::traits::{CommandTransport, PeerAddress};
///
/// let mut link = MockTransport::new();
/// link.send(&PeerAddress::BROADCAST, b"PROP_STOP").unwrap();
/// assert_eq!(link.sent_payloads(), vec!["PROP_STOP"]);
///
/// link.fail_next(1);
/// assert!(link.send(&PeerAddress::BROADCAST, b"PROP_STOP").is_err());
/// assert_eq!(link.attempts, 2);
/// assert_eq!(link.sent.len(), 1);
/// ```
#[derive(Debug)]
pub struct MockTransport {
    /// Datagrams that were accepted (peer, bytes).
    pub sent: Vec<(PeerAddress, Vec<u8>)>,
    /// Whether the link reports ready.
    pub ready: bool,
    /// Number of `send` calls, successful or not.
    pub attempts: usize,
    failures: usize,
}

impl MockTransport {
    /// Creates a new mock transport in ready state.
    pub fn new() -> Self {
        Self {
            sent: Vec::new(),
            ready: true,
            attempts: 0,
            failures: 0,
        }
    }

    /// Make the next `n` sends fail
    pub fn fail_next(&mut self, n: usize) {
        self.failures = n;
    }

    /// Accepted payloads as text, in send order
    pub fn sent_payloads(&self) -> Vec<&str> {
        self.sent
            .iter()
            .map(|(_, bytes)| core::str::from_utf8(bytes).unwrap_or("<binary>"))
            .collect()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandTransport for MockTransport {
    type Error = ();

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn send(&mut self, peer: &PeerAddress, payload: &[u8]) -> Result<(), ()> {
        self.attempts += 1;
        if self.failures > 0 {
            self.failures -= 1;
            return Err(());
        }
        self.sent.push((*peer, payload.to_vec()));
        Ok(())
    }
}

// ============================================================================
// Display Mocks
// ============================================================================

/// Mock display for testing UI rendering.
///
/// Tracks render calls and keeps a text copy of the last frame.
///
/// # Example
///
/// ```
/// use cyd_remote::hal::MockDisplay;
/// use cyd_remote::traits::PanelDisplay;
///
/// let mut display = MockDisplay::new();
/// display.init().unwrap();
/// assert_eq!(display.render_count, 0);
/// ```
#[derive(Debug, Default)]
pub struct MockDisplay {
    /// Control captions of the last frame, in drawing order.
    pub last_labels: Vec<String>,
    /// Highlighted control of the last frame.
    pub last_highlighted: Option<usize>,
    /// Status line of the last frame.
    pub last_status: Option<String>,
    /// Number of times render() was called.
    pub render_count: usize,
    /// Last message shown via show_message().
    pub last_message: Option<(String, Option<String>)>,
    /// Whether init() was called.
    pub initialized: bool,
}

impl MockDisplay {
    /// Creates a new mock display.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PanelDisplay for MockDisplay {
    type Error = ();

    fn init(&mut self) -> Result<(), ()> {
        self.initialized = true;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), ()> {
        self.last_labels.clear();
        self.last_highlighted = None;
        self.last_status = None;
        Ok(())
    }

    fn render(&mut self, view: &PanelView<'_>) -> Result<(), ()> {
        self.last_labels = view.controls.iter().map(|c| c.label.as_str().into()).collect();
        self.last_highlighted = view.highlighted;
        self.last_status = view.status.map(Into::into);
        self.render_count += 1;
        Ok(())
    }

    fn show_message(&mut self, line1: &str, line2: Option<&str>) -> Result<(), ()> {
        self.last_message = Some((line1.into(), line2.map(Into::into)));
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::{ControlPanel, PanelLayout};
    use crate::touch::ScreenSize;

    // =========================================================================
    // MockTouch Tests
    // =========================================================================

    #[test]
    fn mock_touch_default_is_released() {
        let mut touch = MockTouch::new();
        assert!(!touch.touched().unwrap());
        assert_eq!(touch.polls, 1);
    }

    #[test]
    fn mock_touch_drag_sequence() {
        let mut touch = MockTouch::new();
        touch.queue_drag(&[(1, 1), (2, 2)]);
        assert_eq!(touch.poll().unwrap(), RawTouchSample::new(1, 1));
        assert_eq!(touch.poll().unwrap(), RawTouchSample::new(2, 2));
        assert_eq!(touch.poll().unwrap(), RawTouchSample::released());
        assert!(touch.queue.is_empty());
    }

    #[test]
    fn mock_touch_failures_do_not_consume_queue() {
        let mut touch = MockTouch::new();
        touch.queue_press(7, 8);
        touch.fail_next(2);
        assert!(touch.poll().is_err());
        assert!(touch.poll().is_err());
        assert_eq!(touch.poll().unwrap(), RawTouchSample::new(7, 8));
    }

    // =========================================================================
    // MockClock Tests
    // =========================================================================

    #[test]
    fn mock_clock_starts_at_zero() {
        let clock = MockClock::new();
        assert_eq!(clock.now_ms(), 0);
    }

    #[test]
    fn mock_clock_set_and_advance() {
        let mut clock = MockClock::new();
        clock.set(100);
        clock.advance(50);
        assert_eq!(clock.now_ms(), 150);
    }

    // =========================================================================
    // MockTransport Tests
    // =========================================================================

    #[test]
    fn mock_transport_records_peer() {
        let mut link = MockTransport::new();
        let peer = PeerAddress::new([1, 2, 3, 4, 5, 6]);
        link.send(&peer, b"RPM:30").unwrap();
        assert_eq!(link.sent, alloc::vec![(peer, b"RPM:30".to_vec())]);
        assert_eq!(link.attempts, 1);
    }

    #[test]
    fn mock_transport_ready_flag() {
        let mut link = MockTransport::new();
        assert!(link.is_ready());
        link.ready = false;
        assert!(!link.is_ready());
    }

    // =========================================================================
    // MockDisplay Tests
    // =========================================================================

    #[test]
    fn mock_display_render_captures_view() {
        let mut panel = ControlPanel::new(PanelLayout::standard(ScreenSize::default(), &[10]));
        panel.set_status("Sent: RPM:10");

        let mut display = MockDisplay::new();
        display.render(&panel.view()).unwrap();

        assert_eq!(display.render_count, 1);
        assert_eq!(display.last_labels.len(), 8);
        assert_eq!(display.last_labels[0], "Prop Start");
        assert_eq!(display.last_labels[7], "10 RPM");
        assert_eq!(display.last_status.as_deref(), Some("Sent: RPM:10"));
    }

    #[test]
    fn mock_display_clear_and_message() {
        let mut display = MockDisplay::new();
        display.last_status = Some("x".into());
        display.clear().unwrap();
        assert!(display.last_status.is_none());

        display.show_message("CYD Controller", Some("ready")).unwrap();
        assert_eq!(
            display.last_message,
            Some(("CYD Controller".into(), Some("ready".into())))
        );
    }
}
