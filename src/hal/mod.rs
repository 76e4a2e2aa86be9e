//! Hardware Abstraction Layer implementations.
//!
//! This module contains concrete implementations of the traits
//! defined in [`crate::traits`] for various platforms.
//!
//! # Available Implementations
//!
//! - `mock`: Test implementations for desktop development
//! - `xpt2046`: Resistive touch driver over any `embedded-hal` SPI device
//!   (requires `xpt2046` feature, on by default)
//! - `esp32`: ESP32-2432S028R "Cheap Yellow Display" with XPT2046 touch and
//!   ESP-NOW (requires `esp32` feature)

pub mod mock;

#[cfg(feature = "xpt2046")]
pub mod xpt2046;

#[cfg(feature = "esp32")]
pub mod esp32;

pub use mock::*;

#[cfg(feature = "xpt2046")]
pub use xpt2046::{Xpt2046, Xpt2046Error};

#[cfg(feature = "esp32")]
pub use esp32::*;
