//! Trait definitions for hardware abstraction and the outbound link.
//!
//! These seams let the panel logic run on the CYD board and on desktop
//! mocks alike.
//!
//! # Submodules
//!
//! - `hardware`: Touch sensor, rotation mapping, clock
//! - `network`: Receiver address and datagram transport
//! - `display`: Panel rendering trait
//!
//! # Hardware Abstraction
//!
//! - [`TouchSensor`]: Polled resistive touch controller
//! - [`Clock`]: Time source for `no_std` environments
//! - [`CommandTransport`]: One-shot datagram send to the receiver
//! - [`PanelDisplay`]: Draws the control grid

pub mod display;
pub mod hardware;
pub mod network;

pub use display::*;
pub use hardware::*;
pub use network::*;
