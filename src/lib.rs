//! # cyd-remote
//!
//! Firmware core for an ESP32 "Cheap Yellow Display" touch panel that
//! remote-controls a model installation over ESP-NOW.
//!
//! ## Features
//!
//! - **Touch normalization**: Linear calibration of resistive touch readings,
//!   fixed or adaptive
//! - **Command dispatch**: Fixed ASCII commands sent once to a single peer
//! - **Control panel**: Button grid with click semantics and a lights switch
//! - **Hardware abstraction**: Traits for the touch sensor, link and display
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `traits` - Hardware and link abstractions
//! - `touch` - Raw sample to screen coordinate mapping
//! - `commands` - Command vocabulary and wire payloads
//! - `dispatch` - One-shot delivery to the receiver
//! - `panel` - Control layout and click resolution
//! - `controller` - Main loop step that ties everything together
//! - `hal` - Concrete implementations (mock for testing, the XPT2046 driver,
//!   esp32 for hardware)
//!
//! ## Example
//!
//! ```rust
//! use cyd_remote::{Config, PanelCommand, PanelController, TickOutcome};
//! use cyd_remote::hal::{MockTouch, MockTransport};
//!
//! let config = Config::default();
//! let mut controller =
//!     PanelController::from_config(MockTouch::new(), MockTransport::new(), &config).unwrap();
//!
//! // Tap the "Prop Stop" button (top row, right column)
//! controller.sensor_mut().queue_tap(3000, 500);
//!
//! // Run your main loop
//! let mut outcome = TickOutcome::Idle;
//! for now_ms in (0..20).step_by(5) {
//!     if let TickOutcome::Dispatched(cmd) = controller.tick(now_ms) {
//!         outcome = TickOutcome::Dispatched(cmd);
//!     }
//! }
//! assert_eq!(outcome, TickOutcome::Dispatched(PanelCommand::PropStop));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Command vocabulary and RPM validation.
pub mod commands;
/// Main panel controller that coordinates input, panel and dispatch.
pub mod controller;
/// One-shot command delivery to the receiver.
pub mod dispatch;
/// Error types shared across the crate.
pub mod error;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// On-screen controls and click resolution.
pub mod panel;
/// Touch coordinate normalization.
pub mod touch;
/// Core traits for hardware and link abstraction.
pub mod traits;

/// Shared configuration system for desktop and ESP32.
pub mod config;

// Re-exports for convenience
pub use commands::{PanelCommand, RpmLimits};
pub use controller::{PanelController, TickOutcome};
pub use dispatch::{DispatchStats, Dispatcher, PayloadFraming};
pub use error::{Axis, PanelError, TransmitFailure};
pub use panel::{ControlPanel, PanelLayout, PanelView};
pub use touch::{
    CalibrationBounds, CalibrationPolicy, NormalizedPoint, PointerState, ScreenSize,
    TouchNormalizer,
};
pub use traits::{
    // Hardware
    Clock,
    // Link
    CommandTransport,
    // Display
    PanelDisplay,
    PeerAddress,
    RawTouchSample,
    TouchRotation,
    TouchSensor,
};

// Config re-exports
pub use config::{Config, DeviceConfig, LinkConfig, PanelConfig, TouchConfig};
