//! Error types shared by the normalizer, dispatcher and controller.
//!
//! Every variant is a local, recoverable condition. The polling loop logs
//! them and keeps running so the operator can simply tap again.

use core::fmt;

/// Calibration axis, used to report which bound pair is invalid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

impl Axis {
    /// Returns the axis name in lowercase.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
        }
    }
}

/// Why a transmission could not be completed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TransmitFailure {
    /// The link was never brought up, or the peer is not registered.
    ///
    /// No send was attempted.
    LinkNotReady,

    /// The transport accepted the call but reported an error.
    SendRejected,
}

/// Errors produced by the panel core.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelError {
    /// Calibration bounds are degenerate (`min == max`), inverted
    /// (`min > max`), or the screen has a zero dimension.
    InvalidCalibration(Axis),

    /// RPM value outside the configured [`RpmLimits`](crate::RpmLimits).
    InvalidRpm(u32),

    /// The transport could not deliver the command.
    TransmitFailure(TransmitFailure),

    /// The touch sensor reported an I/O error.
    SensorFailure,
}

impl fmt::Display for PanelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCalibration(axis) => {
                write!(f, "invalid calibration on {} axis", axis.as_str())
            }
            Self::InvalidRpm(rpm) => write!(f, "rpm {} out of range", rpm),
            Self::TransmitFailure(TransmitFailure::LinkNotReady) => {
                write!(f, "transmit failed: link not ready")
            }
            Self::TransmitFailure(TransmitFailure::SendRejected) => {
                write!(f, "transmit failed: send rejected")
            }
            Self::SensorFailure => write!(f, "touch sensor read failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PanelError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_messages() {
        assert_eq!(
            PanelError::InvalidCalibration(Axis::Y).to_string(),
            "invalid calibration on y axis"
        );
        assert_eq!(PanelError::InvalidRpm(0).to_string(), "rpm 0 out of range");
        assert_eq!(
            PanelError::TransmitFailure(TransmitFailure::LinkNotReady).to_string(),
            "transmit failed: link not ready"
        );
        assert_eq!(
            PanelError::SensorFailure.to_string(),
            "touch sensor read failed"
        );
    }
}
