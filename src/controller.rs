//! Main panel controller - one polling step per tick.
//!
//! [`PanelController`] owns every device and runs the same cycle on each
//! call to [`tick`](PanelController::tick):
//!
//! 1. Poll the touch sensor and normalize the reading
//! 2. Resolve press/release into at most one click
//! 3. Dispatch the clicked command once
//! 4. Update the status line and mark the view dirty
//!
//! Errors are logged and folded into the returned [`TickOutcome`]; nothing
//! here stops the loop.
//!
//! # Example
//!
//! ```rust
//! use cyd_remote::{Config, PanelCommand, PanelController, TickOutcome};
//! use cyd_remote::hal::{MockTouch, MockTransport};
//!
//! let config = Config::default();
//! let mut controller =
//!     PanelController::from_config(MockTouch::new(), MockTransport::new(), &config).unwrap();
//!
//! // A tap near the top-left corner of the screen hits "Prop Start"
//! controller.sensor_mut().queue_tap(400, 500);
//! assert_eq!(controller.tick(0), TickOutcome::Idle);
//! assert_eq!(controller.tick(5), TickOutcome::Dispatched(PanelCommand::PropStart));
//! assert_eq!(controller.panel().status(), Some("Sent: PROP_START"));
//! ```

use core::fmt::Write;

use crate::commands::PanelCommand;
use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::error::PanelError;
use crate::panel::{ControlPanel, PanelLayout, PanelView, StatusLine};
use crate::touch::TouchNormalizer;
use crate::traits::{CommandTransport, TouchSensor};

/// Default time a status line stays visible.
pub const DEFAULT_STATUS_HOLD_MS: u64 = 2000;

/// Result of one polling step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// No click completed.
    Idle,
    /// A click was delivered to the transport.
    Dispatched(PanelCommand),
    /// A click was resolved but could not be delivered.
    Failed(PanelCommand, PanelError),
}

/// Drives touch input through the panel to the dispatcher.
///
/// # Type Parameters
///
/// - `S`: The touch controller ([`TouchSensor`] trait)
/// - `T`: The link to the receiver ([`CommandTransport`] trait)
pub struct PanelController<S: TouchSensor, T: CommandTransport> {
    sensor: S,
    normalizer: TouchNormalizer,
    panel: ControlPanel,
    dispatcher: Dispatcher<T>,
    status_hold_ms: u64,
    status_until: Option<u64>,
    redraw: bool,
}

impl<S: TouchSensor, T: CommandTransport> PanelController<S, T> {
    /// Creates a controller from its parts.
    ///
    /// The first call to [`take_redraw`](Self::take_redraw) returns true so
    /// the initial frame gets drawn.
    pub fn new(
        sensor: S,
        normalizer: TouchNormalizer,
        panel: ControlPanel,
        dispatcher: Dispatcher<T>,
    ) -> Self {
        Self {
            sensor,
            normalizer,
            panel,
            dispatcher,
            status_hold_ms: DEFAULT_STATUS_HOLD_MS,
            status_until: None,
            redraw: true,
        }
    }

    /// Builds the standard panel from configuration.
    pub fn from_config(sensor: S, transport: T, config: &Config) -> Result<Self, PanelError> {
        let normalizer = config.touch.normalizer()?;
        let layout = PanelLayout::standard(config.touch.screen, &config.panel.rpm_presets);
        let dispatcher = Dispatcher::new(transport, &config.link, config.panel.rpm_limits);
        Ok(Self::new(sensor, normalizer, ControlPanel::new(layout), dispatcher)
            .with_status_hold_ms(config.panel.status_hold_ms as u64))
    }

    /// Sets how long status lines stay visible.
    pub fn with_status_hold_ms(mut self, ms: u64) -> Self {
        self.status_hold_ms = ms;
        self
    }

    /// Runs one polling step.
    pub fn tick(&mut self, now_ms: u64) -> TickOutcome {
        self.expire_status(now_ms);

        // A failed read says nothing about the pen, so the press state is
        // left as it was until the next good reading
        let pointer = match self.normalizer.read(&mut self.sensor) {
            Ok(pointer) => pointer,
            Err(e) => {
                log::warn!("Touch read failed: {}", e);
                return TickOutcome::Idle;
            }
        };

        let highlighted = self.panel.highlighted();
        let clicked = self.panel.handle(pointer);
        if self.panel.highlighted() != highlighted {
            self.redraw = true;
        }

        let Some(cmd) = clicked else {
            return TickOutcome::Idle;
        };

        let mut line = StatusLine::new();
        let outcome = match self.dispatcher.dispatch(cmd) {
            Ok(payload) => {
                let _ = write!(line, "Sent: {}", payload);
                TickOutcome::Dispatched(cmd)
            }
            Err(e) => {
                let _ = write!(line, "Failed: {}", cmd.payload());
                TickOutcome::Failed(cmd, e)
            }
        };

        self.panel.set_status(&line);
        self.status_until = Some(now_ms.saturating_add(self.status_hold_ms));
        self.redraw = true;
        outcome
    }

    fn expire_status(&mut self, now_ms: u64) {
        if let Some(until) = self.status_until {
            if now_ms >= until {
                self.panel.clear_status();
                self.status_until = None;
                self.redraw = true;
            }
        }
    }

    /// Returns true once per visible change.
    pub fn take_redraw(&mut self) -> bool {
        core::mem::take(&mut self.redraw)
    }

    /// Snapshot for the display.
    pub fn view(&self) -> PanelView<'_> {
        self.panel.view()
    }

    /// The touch sensor.
    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    /// Mutable access to the touch sensor.
    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    /// The normalizer, including its current calibration.
    pub fn normalizer(&self) -> &TouchNormalizer {
        &self.normalizer
    }

    /// The control panel.
    pub fn panel(&self) -> &ControlPanel {
        &self.panel
    }

    /// The dispatcher.
    pub fn dispatcher(&self) -> &Dispatcher<T> {
        &self.dispatcher
    }

    /// Mutable access to the dispatcher.
    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher<T> {
        &mut self.dispatcher
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransmitFailure;
    use crate::hal::{MockTouch, MockTransport};

    fn controller() -> PanelController<MockTouch, MockTransport> {
        PanelController::from_config(MockTouch::new(), MockTransport::new(), &Config::default())
            .unwrap()
    }

    // Raw reading landing in the "Prop Start" cell under default calibration
    const PROP_START_RAW: (u16, u16) = (400, 500);

    #[test]
    fn first_frame_needs_drawing() {
        let mut c = controller();
        assert!(c.take_redraw());
        assert!(!c.take_redraw());
    }

    #[test]
    fn idle_when_untouched() {
        let mut c = controller();
        c.take_redraw();
        assert_eq!(c.tick(0), TickOutcome::Idle);
        assert!(!c.take_redraw());
        assert!(c.dispatcher().transport().sent.is_empty());
    }

    #[test]
    fn tap_dispatches_on_release() {
        let mut c = controller();
        let (x, y) = PROP_START_RAW;
        c.sensor_mut().queue_tap(x, y);

        assert_eq!(c.tick(0), TickOutcome::Idle);
        assert!(c.take_redraw());
        assert_eq!(c.view().highlighted, Some(0));

        assert_eq!(c.tick(5), TickOutcome::Dispatched(PanelCommand::PropStart));
        assert_eq!(c.dispatcher().transport().sent[0].1, b"PROP_START");
        assert!(c.take_redraw());
    }

    #[test]
    fn status_expires_after_hold() {
        let mut c = controller().with_status_hold_ms(100);
        let (x, y) = PROP_START_RAW;
        c.sensor_mut().queue_tap(x, y);
        c.tick(0);
        c.tick(10);
        assert_eq!(c.panel().status(), Some("Sent: PROP_START"));
        c.take_redraw();

        c.tick(50);
        assert!(!c.take_redraw());
        c.tick(110);
        assert_eq!(c.panel().status(), None);
        assert!(c.take_redraw());
    }

    #[test]
    fn failed_send_is_reported_and_loop_continues() {
        let mut c = controller();
        let (x, y) = PROP_START_RAW;
        c.dispatcher_mut().transport_mut().fail_next(1);

        c.sensor_mut().queue_tap(x, y);
        c.tick(0);
        assert_eq!(
            c.tick(5),
            TickOutcome::Failed(
                PanelCommand::PropStart,
                PanelError::TransmitFailure(TransmitFailure::SendRejected)
            )
        );
        assert_eq!(c.panel().status(), Some("Failed: PROP_START"));

        c.sensor_mut().queue_tap(x, y);
        c.tick(10);
        assert_eq!(c.tick(15), TickOutcome::Dispatched(PanelCommand::PropStart));
    }

    #[test]
    fn sensor_error_while_idle_is_skipped() {
        let mut c = controller();
        c.take_redraw();
        c.sensor_mut().fail_next(1);
        assert_eq!(c.tick(0), TickOutcome::Idle);
        assert!(!c.take_redraw());

        let (x, y) = PROP_START_RAW;
        c.sensor_mut().queue_tap(x, y);
        c.tick(5);
        assert_eq!(c.tick(10), TickOutcome::Dispatched(PanelCommand::PropStart));
    }

    #[test]
    fn sensor_error_mid_press_keeps_the_press() {
        let mut c = controller();
        let (x, y) = PROP_START_RAW;
        c.sensor_mut().queue_press(x, y);
        assert_eq!(c.tick(0), TickOutcome::Idle);

        c.sensor_mut().fail_next(1);
        assert_eq!(c.tick(5), TickOutcome::Idle);
        assert_eq!(c.view().highlighted, Some(0));
        assert!(c.dispatcher().transport().sent.is_empty());

        c.sensor_mut().queue_tap(x, y);
        c.tick(10);
        assert_eq!(c.tick(15), TickOutcome::Dispatched(PanelCommand::PropStart));
        assert_eq!(c.dispatcher().transport().sent_payloads(), ["PROP_START"]);
    }
}
