//! Command types sent from the panel to the receiver.
//!
//! Every on-screen control maps to one [`PanelCommand`]. A command is turned
//! into its wire text by [`PanelCommand::payload`], a pure function over a
//! closed set of variants:
//!
//! | Command | Payload |
//! |---------|---------|
//! | [`PropStart`](PanelCommand::PropStart) | `PROP_START` |
//! | [`PropStop`](PanelCommand::PropStop) | `PROP_STOP` |
//! | [`WeightStart`](PanelCommand::WeightStart) | `WEIGHT_START` |
//! | [`WeightStop`](PanelCommand::WeightStop) | `WEIGHT_STOP` |
//! | [`LightsOn`](PanelCommand::LightsOn) | `LIGHTS_ON` |
//! | [`LightsOff`](PanelCommand::LightsOff) | `LIGHTS_OFF` |
//! | [`MotionLeft`](PanelCommand::MotionLeft) | `MOTION_LEFT` |
//! | [`MotionRight`](PanelCommand::MotionRight) | `MOTION_RIGHT` |
//! | [`SetRpm(n)`](PanelCommand::SetRpm) | `RPM:<n>` |
//!
//! # Example
//!
//! ```rust
//! use cyd_remote::PanelCommand;
//!
//! assert_eq!(PanelCommand::PropStart.payload().as_str(), "PROP_START");
//! assert_eq!(PanelCommand::SetRpm(30).payload().as_str(), "RPM:30");
//! ```
//!
//! RPM values are validated against [`RpmLimits`] by the dispatcher before
//! anything is sent.

use core::fmt::Write;

use crate::error::PanelError;

/// Maximum payload length in bytes.
///
/// The longest payload is `RPM:` followed by the ten digits of `u32::MAX`.
pub const MAX_PAYLOAD_LEN: usize = 16;

/// Wire text of a command.
pub type CommandPayload = heapless::String<MAX_PAYLOAD_LEN>;

/// Text drawn on a control.
pub type CommandLabel = heapless::String<MAX_PAYLOAD_LEN>;

/// An operator intent produced by the panel.
///
/// The set is closed: it is defined by the controls the panel offers, not
/// discovered at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PanelCommand {
    /// Start the propeller.
    PropStart,
    /// Stop the propeller.
    PropStop,
    /// Start the weight drive.
    WeightStart,
    /// Stop the weight drive.
    WeightStop,
    /// Switch the lights on.
    LightsOn,
    /// Switch the lights off.
    LightsOff,
    /// Move left.
    MotionLeft,
    /// Move right.
    MotionRight,
    /// Set the propeller speed in revolutions per minute.
    SetRpm(u32),
}

impl PanelCommand {
    /// Returns the fixed payload for commands without a parameter.
    ///
    /// Returns `None` for [`SetRpm`](Self::SetRpm).
    pub const fn fixed_payload(&self) -> Option<&'static str> {
        match self {
            PanelCommand::PropStart => Some("PROP_START"),
            PanelCommand::PropStop => Some("PROP_STOP"),
            PanelCommand::WeightStart => Some("WEIGHT_START"),
            PanelCommand::WeightStop => Some("WEIGHT_STOP"),
            PanelCommand::LightsOn => Some("LIGHTS_ON"),
            PanelCommand::LightsOff => Some("LIGHTS_OFF"),
            PanelCommand::MotionLeft => Some("MOTION_LEFT"),
            PanelCommand::MotionRight => Some("MOTION_RIGHT"),
            PanelCommand::SetRpm(_) => None,
        }
    }

    /// Builds the wire text for this command.
    ///
    /// This never fails: every variant fits in [`MAX_PAYLOAD_LEN`].
    pub fn payload(&self) -> CommandPayload {
        let mut out = CommandPayload::new();
        match (self.fixed_payload(), self) {
            (Some(text), _) => {
                let _ = out.push_str(text);
            }
            (None, PanelCommand::SetRpm(rpm)) => {
                let _ = write!(out, "RPM:{}", rpm);
            }
            (None, _) => {}
        }
        out
    }

    /// Parse a payload back into a command.
    ///
    /// A single trailing NUL byte (C-string framing) is ignored. Matching is
    /// exact otherwise.
    ///
    /// ```
    /// use cyd_remote::PanelCommand;
    ///
    /// assert_eq!(PanelCommand::from_payload("LIGHTS_ON"), Some(PanelCommand::LightsOn));
    /// assert_eq!(PanelCommand::from_payload("RPM:60\0"), Some(PanelCommand::SetRpm(60)));
    ///
    /// assert_eq!(PanelCommand::from_payload("lights_on"), None);
    /// assert_eq!(PanelCommand::from_payload("RPM:"), None);
    /// assert_eq!(PanelCommand::from_payload("RPM:-5"), None);
    /// ```
    pub fn from_payload(s: &str) -> Option<Self> {
        let s = s.strip_suffix('\0').unwrap_or(s);
        match s {
            "PROP_START" => Some(PanelCommand::PropStart),
            "PROP_STOP" => Some(PanelCommand::PropStop),
            "WEIGHT_START" => Some(PanelCommand::WeightStart),
            "WEIGHT_STOP" => Some(PanelCommand::WeightStop),
            "LIGHTS_ON" => Some(PanelCommand::LightsOn),
            "LIGHTS_OFF" => Some(PanelCommand::LightsOff),
            "MOTION_LEFT" => Some(PanelCommand::MotionLeft),
            "MOTION_RIGHT" => Some(PanelCommand::MotionRight),
            _ => {
                let digits = s.strip_prefix("RPM:")?;
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                digits.parse().ok().map(PanelCommand::SetRpm)
            }
        }
    }

    /// Returns the text drawn on the control that emits this command.
    pub fn label(&self) -> CommandLabel {
        let mut out = CommandLabel::new();
        let _ = match self {
            PanelCommand::PropStart => out.push_str("Prop Start"),
            PanelCommand::PropStop => out.push_str("Prop Stop"),
            PanelCommand::WeightStart => out.push_str("Weight Start"),
            PanelCommand::WeightStop => out.push_str("Weight Stop"),
            PanelCommand::LightsOn => out.push_str("Lights On"),
            PanelCommand::LightsOff => out.push_str("Lights Off"),
            PanelCommand::MotionLeft => out.push_str("< Left"),
            PanelCommand::MotionRight => out.push_str("Right >"),
            PanelCommand::SetRpm(rpm) => write!(out, "{} RPM", rpm).map_err(|_| ()),
        };
        out
    }

    /// Returns the RPM value for [`SetRpm`](Self::SetRpm) commands.
    pub const fn rpm(&self) -> Option<u32> {
        match self {
            PanelCommand::SetRpm(rpm) => Some(*rpm),
            _ => None,
        }
    }
}

/// Accepted range for [`PanelCommand::SetRpm`] values.
///
/// The receiver accepts any decimal number, so the panel enforces its own
/// range. Zero is always rejected: the receiver stops the propeller with
/// `PROP_STOP`, not with `RPM:0`.
///
/// # Example
///
/// ```rust
/// use cyd_remote::{RpmLimits, PanelError};
///
/// let limits = RpmLimits::default();
/// assert_eq!(limits.check(60), Ok(60));
/// assert_eq!(limits.check(0), Err(PanelError::InvalidRpm(0)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RpmLimits {
    /// Smallest accepted value (at least 1).
    pub min: u32,
    /// Largest accepted value.
    pub max: u32,
}

impl Default for RpmLimits {
    fn default() -> Self {
        Self { min: 1, max: 999 }
    }
}

impl RpmLimits {
    /// Creates limits, raising `min` to 1 and `max` to at least `min`.
    pub fn new(min: u32, max: u32) -> Self {
        let min = min.max(1);
        Self {
            min,
            max: max.max(min),
        }
    }

    /// Returns `rpm` if it lies within the limits.
    pub fn check(&self, rpm: u32) -> Result<u32, PanelError> {
        if rpm == 0 || rpm < self.min || rpm > self.max {
            Err(PanelError::InvalidRpm(rpm))
        } else {
            Ok(rpm)
        }
    }

    /// Validates any command; commands without an RPM always pass.
    pub fn check_command(&self, cmd: &PanelCommand) -> Result<(), PanelError> {
        match cmd.rpm() {
            Some(rpm) => self.check(rpm).map(|_| ()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXED: [(PanelCommand, &str); 8] = [
        (PanelCommand::PropStart, "PROP_START"),
        (PanelCommand::PropStop, "PROP_STOP"),
        (PanelCommand::WeightStart, "WEIGHT_START"),
        (PanelCommand::WeightStop, "WEIGHT_STOP"),
        (PanelCommand::LightsOn, "LIGHTS_ON"),
        (PanelCommand::LightsOff, "LIGHTS_OFF"),
        (PanelCommand::MotionLeft, "MOTION_LEFT"),
        (PanelCommand::MotionRight, "MOTION_RIGHT"),
    ];

    // =========================================================================
    // Payload Tests
    // =========================================================================

    #[test]
    fn fixed_payloads() {
        for (cmd, text) in FIXED {
            assert_eq!(cmd.payload().as_str(), text);
            assert_eq!(cmd.fixed_payload(), Some(text));
        }
    }

    #[test]
    fn rpm_payloads() {
        assert_eq!(PanelCommand::SetRpm(10).payload().as_str(), "RPM:10");
        assert_eq!(PanelCommand::SetRpm(30).payload().as_str(), "RPM:30");
        assert_eq!(PanelCommand::SetRpm(60).payload().as_str(), "RPM:60");
        assert_eq!(PanelCommand::SetRpm(60).fixed_payload(), None);
    }

    #[test]
    fn largest_rpm_fits() {
        let payload = PanelCommand::SetRpm(u32::MAX).payload();
        assert_eq!(payload.as_str(), "RPM:4294967295");
    }

    #[test]
    fn payload_is_ascii() {
        for (cmd, _) in FIXED {
            assert!(cmd.payload().is_ascii());
        }
    }

    // =========================================================================
    // Parsing Tests
    // =========================================================================

    #[test]
    fn from_payload_fixed() {
        for (cmd, text) in FIXED {
            assert_eq!(PanelCommand::from_payload(text), Some(cmd));
        }
    }

    #[test]
    fn from_payload_rejects_noise() {
        assert_eq!(PanelCommand::from_payload(""), None);
        assert_eq!(PanelCommand::from_payload("PROP_START "), None);
        assert_eq!(PanelCommand::from_payload("RPM:+5"), None);
        assert_eq!(PanelCommand::from_payload("RPM:99999999999"), None);
        assert_eq!(PanelCommand::from_payload("RPM 30"), None);
    }

    // =========================================================================
    // Label Tests
    // =========================================================================

    #[test]
    fn labels() {
        assert_eq!(PanelCommand::PropStart.label().as_str(), "Prop Start");
        assert_eq!(PanelCommand::SetRpm(30).label().as_str(), "30 RPM");
        assert_eq!(PanelCommand::MotionLeft.label().as_str(), "< Left");
    }

    // =========================================================================
    // RpmLimits Tests
    // =========================================================================

    #[test]
    fn limits_default() {
        let limits = RpmLimits::default();
        assert_eq!(limits.min, 1);
        assert_eq!(limits.max, 999);
    }

    #[test]
    fn limits_bounds_are_inclusive() {
        let limits = RpmLimits::new(10, 60);
        assert_eq!(limits.check(10), Ok(10));
        assert_eq!(limits.check(60), Ok(60));
        assert_eq!(limits.check(9), Err(PanelError::InvalidRpm(9)));
        assert_eq!(limits.check(61), Err(PanelError::InvalidRpm(61)));
    }

    #[test]
    fn limits_never_accept_zero() {
        let limits = RpmLimits::new(0, 100);
        assert_eq!(limits.min, 1);
        assert_eq!(limits.check(0), Err(PanelError::InvalidRpm(0)));
    }

    #[test]
    fn limits_new_orders_max() {
        let limits = RpmLimits::new(50, 10);
        assert_eq!(limits.max, 50);
    }

    #[test]
    fn check_command_ignores_fixed_commands() {
        let limits = RpmLimits::new(10, 20);
        assert!(limits.check_command(&PanelCommand::PropStart).is_ok());
        assert!(limits.check_command(&PanelCommand::SetRpm(15)).is_ok());
        assert_eq!(
            limits.check_command(&PanelCommand::SetRpm(30)),
            Err(PanelError::InvalidRpm(30))
        );
    }
}
