//! Display abstraction for the touch panel.
//!
//! This module defines the [`PanelDisplay`] trait for drawing the control
//! grid and status line on whatever screen the board carries.

use crate::panel::PanelView;

/// Display trait for rendering the control panel.
///
/// Implementors provide hardware-specific rendering for displays like the
/// ILI9341 TFT on the CYD board, or recording doubles for testing.
///
/// # Example
///
/// ```ignore
/// use cyd_remote::traits::PanelDisplay;
/// use cyd_remote::panel::PanelView;
///
/// struct MyDisplay { /* ... */ }
///
/// impl PanelDisplay for MyDisplay {
///     type Error = ();
///
///     fn init(&mut self) -> Result<(), ()> { Ok(()) }
///     fn clear(&mut self) -> Result<(), ()> { Ok(()) }
///     fn render(&mut self, view: &PanelView<'_>) -> Result<(), ()> {
///         // Draw each control, then the status line
///         Ok(())
///     }
///     fn show_message(&mut self, line1: &str, line2: Option<&str>) -> Result<(), ()> {
///         Ok(())
///     }
/// }
/// ```
pub trait PanelDisplay {
    /// Error type for display operations.
    type Error;

    /// Initializes the display hardware.
    ///
    /// Called once at startup, before the first frame.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Clears the display.
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Draws one frame of the panel.
    ///
    /// Called whenever the controller reports a visible change. Draw every
    /// control, highlight the held one, and show the status line if present.
    fn render(&mut self, view: &PanelView<'_>) -> Result<(), Self::Error>;

    /// Shows a simple message (e.g., for startup or errors).
    ///
    /// # Arguments
    ///
    /// * `line1` - First line of text
    /// * `line2` - Optional second line of text
    fn show_message(&mut self, line1: &str, line2: Option<&str>) -> Result<(), Self::Error>;
}
