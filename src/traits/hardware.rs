//! Hardware abstraction traits for touch input and timing.
//!
//! This module defines the device-facing interfaces that allow cyd-remote to
//! run on the ESP32 board and on desktop mocks alike.
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`TouchSensor`] | Resistive touch controller polled every tick |
//! | [`Clock`] | Time source for `no_std` environments |
//!
//! # Implementation
//!
//! For testing and desktop development, use the mock implementations
//! from [`crate::hal::mock`]. For the board, use the implementations from
//! `hal::esp32` (requires `esp32` feature).
//!
//! # Example
//!
//! ```rust
//! use cyd_remote::traits::{TouchSensor, RawTouchSample};
//! use cyd_remote::hal::MockTouch;
//!
//! let mut touch = MockTouch::new();
//! touch.queue_press(2000, 2000);
//!
//! let sample = touch.poll().unwrap();
//! assert!(sample.touched);
//! assert_eq!(sample.x, 2000);
//!
//! // Nothing queued: the sensor reports a release
//! assert_eq!(touch.poll().unwrap(), RawTouchSample::released());
//! ```

/// Largest value a 12-bit touch ADC can report.
pub const RAW_AXIS_MAX: u16 = 4095;

/// One polled reading from the touch sensor.
///
/// Coordinates are in the sensor's native range (0..=4095 for 12-bit
/// controllers). When `touched` is false the coordinates carry no meaning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawTouchSample {
    /// Raw horizontal reading.
    pub x: u16,
    /// Raw vertical reading.
    pub y: u16,
    /// Pressure estimate (0 when the sensor does not measure pressure).
    pub z: u16,
    /// Whether the panel is currently pressed.
    pub touched: bool,
}

impl RawTouchSample {
    /// Creates a pressed sample at the given raw coordinates.
    pub const fn new(x: u16, y: u16) -> Self {
        Self {
            x,
            y,
            z: 0,
            touched: true,
        }
    }

    /// Creates a pressed sample with a pressure reading.
    pub const fn with_pressure(x: u16, y: u16, z: u16) -> Self {
        Self {
            x,
            y,
            z,
            touched: true,
        }
    }

    /// Creates a released (not touched) sample.
    pub const fn released() -> Self {
        Self {
            x: 0,
            y: 0,
            z: 0,
            touched: false,
        }
    }
}

/// Orientation of the touch layer relative to the display.
///
/// Resistive panels are glued on in whatever orientation the board vendor
/// chose, so the raw axes must be swapped or mirrored to line up with the
/// display's rotation. The mapping matches the common XPT2046 convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TouchRotation {
    /// Portrait, connector at the bottom.
    #[default]
    Rotate0,
    /// Landscape.
    Rotate90,
    /// Portrait, upside down.
    Rotate180,
    /// Landscape, upside down.
    Rotate270,
}

impl TouchRotation {
    /// Maps a rotation index (0-3, as display drivers number them).
    ///
    /// Values above 3 wrap around.
    ///
    /// ```
    /// use cyd_remote::traits::TouchRotation;
    ///
    /// assert_eq!(TouchRotation::from_index(1), TouchRotation::Rotate90);
    /// assert_eq!(TouchRotation::from_index(4), TouchRotation::Rotate0);
    /// ```
    pub const fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => TouchRotation::Rotate0,
            1 => TouchRotation::Rotate90,
            2 => TouchRotation::Rotate180,
            _ => TouchRotation::Rotate270,
        }
    }

    /// Applies the rotation to a pair of raw readings.
    ///
    /// Inputs above [`RAW_AXIS_MAX`] are saturated before mirroring.
    pub fn apply(&self, x: u16, y: u16) -> (u16, u16) {
        let x = x.min(RAW_AXIS_MAX);
        let y = y.min(RAW_AXIS_MAX);
        match self {
            TouchRotation::Rotate0 => (RAW_AXIS_MAX - y, x),
            TouchRotation::Rotate90 => (x, y),
            TouchRotation::Rotate180 => (y, RAW_AXIS_MAX - x),
            TouchRotation::Rotate270 => (RAW_AXIS_MAX - x, RAW_AXIS_MAX - y),
        }
    }
}

/// Touch sensor trait - abstracts a polled resistive touch controller.
///
/// The controller is asked on every tick whether the panel is pressed and,
/// if so, where. Implementations should do any filtering (pressure
/// threshold, sample averaging) internally and report the result.
///
/// # Example Implementation
///
/// ```rust,ignore
/// use cyd_remote::traits::{TouchSensor, RawTouchSample};
///
/// struct MyTouch { /* SPI handle */ }
///
/// impl TouchSensor for MyTouch {
///     type Error = ();
///
///     fn touched(&mut self) -> Result<bool, ()> {
///         // Read pressure, compare to threshold...
///         Ok(false)
///     }
///
///     fn sample(&mut self) -> Result<RawTouchSample, ()> {
///         // Read X and Y channels...
///         Ok(RawTouchSample::new(2048, 2048))
///     }
/// }
/// ```
pub trait TouchSensor {
    /// Error type for bus operations.
    type Error;

    /// Returns true if the panel is currently pressed.
    fn touched(&mut self) -> Result<bool, Self::Error>;

    /// Reads the current touch position.
    ///
    /// Only meaningful while [`touched`](Self::touched) returns true.
    fn sample(&mut self) -> Result<RawTouchSample, Self::Error>;

    /// Reads the panel state in one call.
    ///
    /// Returns [`RawTouchSample::released()`] when not touched, otherwise
    /// the result of [`sample`](Self::sample).
    fn poll(&mut self) -> Result<RawTouchSample, Self::Error> {
        if self.touched()? {
            self.sample()
        } else {
            Ok(RawTouchSample::released())
        }
    }
}

/// Time source trait for `no_std` compatibility.
///
/// Provides monotonic time in milliseconds for status line expiry.
/// On desktop, this can wrap `std::time::Instant`. On the board,
/// use the ESP-IDF high resolution timer.
///
/// # Example
///
/// ```rust
/// use cyd_remote::traits::Clock;
/// use cyd_remote::hal::MockClock;
///
/// let mut clock = MockClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// clock.advance(100);
/// assert_eq!(clock.now_ms(), 100);
/// ```
pub trait Clock {
    /// Returns current time in milliseconds since an arbitrary epoch.
    ///
    /// Must be monotonically increasing.
    fn now_ms(&self) -> u64;
}
