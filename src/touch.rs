//! Touch coordinate normalization.
//!
//! Turns raw resistive-touch readings into screen coordinates with a linear
//! calibration. [`TouchNormalizer`] is the only place calibration state
//! lives; it is handed to the controller at construction so the behaviour
//! is reproducible in tests.
//!
//! # Calibration Policies
//!
//! - [`CalibrationPolicy::Fixed`]: bounds never change. Readings outside the
//!   bounds map outside the screen and are not clamped.
//! - [`CalibrationPolicy::Adaptive`]: a reading outside the bounds widens
//!   them first, so calibration improves over a session and every reading
//!   lands on the screen.
//!
//! # Example
//!
//! ```rust
//! use cyd_remote::touch::{
//!     CalibrationBounds, CalibrationPolicy, NormalizedPoint, ScreenSize, TouchNormalizer,
//! };
//! use cyd_remote::traits::RawTouchSample;
//!
//! let bounds = CalibrationBounds::new(200, 3700, 240, 3800).unwrap();
//! let mut normalizer =
//!     TouchNormalizer::new(bounds, CalibrationPolicy::Fixed, ScreenSize::new(240, 320)).unwrap();
//!
//! let top_left = normalizer.normalize(RawTouchSample::new(200, 240)).unwrap();
//! assert_eq!(top_left, NormalizedPoint::new(1, 1));
//!
//! let bottom_right = normalizer.normalize(RawTouchSample::new(3700, 3800)).unwrap();
//! assert_eq!(bottom_right, NormalizedPoint::new(240, 320));
//! ```

use crate::error::{Axis, PanelError};
use crate::traits::{RawTouchSample, TouchSensor};

// ============================================================================
// Data Types
// ============================================================================

/// Logical screen dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScreenSize {
    /// Width in pixels.
    pub width: u16,
    /// Height in pixels.
    pub height: u16,
}

impl ScreenSize {
    /// Creates a screen size.
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self::new(240, 320)
    }
}

/// A touch location in screen space.
///
/// Coordinates start at 1. Signed because a fixed calibration can map
/// readings outside the bounds to points off the screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NormalizedPoint {
    /// Horizontal position.
    pub x: i32,
    /// Vertical position.
    pub y: i32,
}

impl NormalizedPoint {
    /// Creates a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true if the point lies within `[1, width] x [1, height]`.
    pub fn is_on_screen(&self, screen: ScreenSize) -> bool {
        (1..=screen.width as i32).contains(&self.x) && (1..=screen.height as i32).contains(&self.y)
    }
}

/// Pointer state handed to the panel each tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerState {
    /// The panel is pressed at this point.
    Pressed(NormalizedPoint),
    /// The panel is not pressed.
    #[default]
    Released,
}

impl PointerState {
    /// Returns the point when pressed.
    pub fn point(&self) -> Option<NormalizedPoint> {
        match self {
            PointerState::Pressed(p) => Some(*p),
            PointerState::Released => None,
        }
    }

    /// Returns true when pressed.
    pub fn is_pressed(&self) -> bool {
        matches!(self, PointerState::Pressed(_))
    }
}

/// Whether calibration bounds adapt to observed readings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CalibrationPolicy {
    /// Bounds are constant for the session.
    Fixed,
    /// Bounds widen to include every reading seen.
    #[default]
    Adaptive,
}

/// Raw coordinate extremes mapped onto the screen edges.
///
/// Always valid once constructed: `min < max` on both axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationBounds {
    min_x: u16,
    max_x: u16,
    min_y: u16,
    max_y: u16,
}

impl CalibrationBounds {
    /// Creates bounds, rejecting degenerate or inverted axes.
    ///
    /// ```
    /// use cyd_remote::touch::CalibrationBounds;
    /// use cyd_remote::{Axis, PanelError};
    ///
    /// assert!(CalibrationBounds::new(200, 3700, 240, 3800).is_ok());
    /// assert_eq!(
    ///     CalibrationBounds::new(500, 500, 240, 3800),
    ///     Err(PanelError::InvalidCalibration(Axis::X))
    /// );
    /// assert_eq!(
    ///     CalibrationBounds::new(200, 3700, 3800, 240),
    ///     Err(PanelError::InvalidCalibration(Axis::Y))
    /// );
    /// ```
    pub fn new(min_x: u16, max_x: u16, min_y: u16, max_y: u16) -> Result<Self, PanelError> {
        if min_x >= max_x {
            return Err(PanelError::InvalidCalibration(Axis::X));
        }
        if min_y >= max_y {
            return Err(PanelError::InvalidCalibration(Axis::Y));
        }
        Ok(Self {
            min_x,
            max_x,
            min_y,
            max_y,
        })
    }

    /// Smallest raw x mapped to the left edge.
    pub const fn min_x(&self) -> u16 {
        self.min_x
    }

    /// Largest raw x mapped to the right edge.
    pub const fn max_x(&self) -> u16 {
        self.max_x
    }

    /// Smallest raw y mapped to the top edge.
    pub const fn min_y(&self) -> u16 {
        self.min_y
    }

    /// Largest raw y mapped to the bottom edge.
    pub const fn max_y(&self) -> u16 {
        self.max_y
    }

    /// Returns true if the sample lies within the bounds on both axes.
    pub fn contains(&self, sample: &RawTouchSample) -> bool {
        (self.min_x..=self.max_x).contains(&sample.x)
            && (self.min_y..=self.max_y).contains(&sample.y)
    }

    /// Widens the bounds to include the sample.
    ///
    /// Returns true if any bound moved. Widening can never make the
    /// bounds degenerate.
    pub fn widen_to(&mut self, sample: &RawTouchSample) -> bool {
        let before = *self;
        self.min_x = self.min_x.min(sample.x);
        self.max_x = self.max_x.max(sample.x);
        self.min_y = self.min_y.min(sample.y);
        self.max_y = self.max_y.max(sample.y);
        *self != before
    }
}

impl Default for CalibrationBounds {
    /// Bounds measured on the reference CYD board.
    fn default() -> Self {
        Self {
            min_x: 200,
            max_x: 3700,
            min_y: 240,
            max_y: 3800,
        }
    }
}

/// Maps `value` from `[in_min, in_max]` to `[out_min, out_max]`.
///
/// Integer arithmetic, truncating toward zero, in 64 bits so no input can
/// overflow. `in_min` must differ from `in_max`.
pub fn map_range(value: i64, in_min: i64, in_max: i64, out_min: i64, out_max: i64) -> i64 {
    (value - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Narrows a mapped coordinate, saturating at the `i32` range.
fn saturate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

// ============================================================================
// Normalizer
// ============================================================================

/// Converts raw samples to screen coordinates.
///
/// Owns the calibration bounds. Under [`CalibrationPolicy::Adaptive`] each
/// call to [`normalize`](Self::normalize) may widen them.
#[derive(Clone, Debug)]
pub struct TouchNormalizer {
    bounds: CalibrationBounds,
    policy: CalibrationPolicy,
    screen: ScreenSize,
}

impl TouchNormalizer {
    /// Creates a normalizer.
    ///
    /// Fails with [`PanelError::InvalidCalibration`] if the bounds are
    /// degenerate or the screen has a zero dimension.
    pub fn new(
        bounds: CalibrationBounds,
        policy: CalibrationPolicy,
        screen: ScreenSize,
    ) -> Result<Self, PanelError> {
        CalibrationBounds::new(bounds.min_x, bounds.max_x, bounds.min_y, bounds.max_y)?;
        if screen.width == 0 {
            return Err(PanelError::InvalidCalibration(Axis::X));
        }
        if screen.height == 0 {
            return Err(PanelError::InvalidCalibration(Axis::Y));
        }
        Ok(Self {
            bounds,
            policy,
            screen,
        })
    }

    /// Current calibration bounds.
    pub fn bounds(&self) -> CalibrationBounds {
        self.bounds
    }

    /// Calibration policy.
    pub fn policy(&self) -> CalibrationPolicy {
        self.policy
    }

    /// Target screen size.
    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    /// Replaces the calibration bounds (e.g. after a calibration routine).
    pub fn reset_bounds(&mut self, bounds: CalibrationBounds) {
        self.bounds = bounds;
    }

    /// Maps one sample to screen coordinates.
    ///
    /// The `touched` flag is ignored; use [`pointer`](Self::pointer) to
    /// honour it.
    pub fn normalize(&mut self, sample: RawTouchSample) -> Result<NormalizedPoint, PanelError> {
        if self.policy == CalibrationPolicy::Adaptive && self.bounds.widen_to(&sample) {
            log::debug!(
                "calibration widened to x {}..{} y {}..{}",
                self.bounds.min_x,
                self.bounds.max_x,
                self.bounds.min_y,
                self.bounds.max_y
            );
        }

        // Deserialized bounds bypass `CalibrationBounds::new`
        let b = self.bounds;
        CalibrationBounds::new(b.min_x, b.max_x, b.min_y, b.max_y)?;

        let x = map_range(
            sample.x as i64,
            b.min_x as i64,
            b.max_x as i64,
            1,
            self.screen.width as i64,
        );
        let y = map_range(
            sample.y as i64,
            b.min_y as i64,
            b.max_y as i64,
            1,
            self.screen.height as i64,
        );

        Ok(NormalizedPoint::new(saturate(x), saturate(y)))
    }

    /// Resolves a sample into a pointer state.
    pub fn pointer(&mut self, sample: RawTouchSample) -> Result<PointerState, PanelError> {
        if !sample.touched {
            return Ok(PointerState::Released);
        }
        self.normalize(sample).map(PointerState::Pressed)
    }

    /// Polls a sensor and resolves its reading.
    ///
    /// Sensor errors are reported as [`PanelError::SensorFailure`].
    pub fn read<S: TouchSensor>(&mut self, sensor: &mut S) -> Result<PointerState, PanelError> {
        let sample = sensor.poll().map_err(|_| PanelError::SensorFailure)?;
        self.pointer(sample)
    }
}
