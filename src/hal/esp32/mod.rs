//! ESP32 "Cheap Yellow Display" hardware abstraction layer.
//!
//! This module provides hardware implementations for the ESP32-2432S028R
//! board (CYD) acting as a wireless remote control panel.
//!
//! # Hardware Configuration
//!
//! - **MCU**: ESP32-WROOM-32 (Xtensa dual core 240MHz, 4MB Flash)
//! - **Display**: ILI9341 240x320 TFT (SPI)
//! - **Touch**: XPT2046 resistive touch controller (separate SPI bus)
//! - **Radio**: ESP-NOW over the Wi-Fi station interface
//!
//! # Pin Assignments
//!
//! See the [`pins`] module for GPIO assignments matching the CYD layout. The
//! touch controller is driven by [`crate::hal::Xpt2046`] over an esp-idf SPI
//! device.

mod clock;
mod espnow;

pub use clock::Esp32Clock;
pub use espnow::EspNowLink;

#[cfg(feature = "display")]
mod display;
#[cfg(feature = "display")]
pub use display::{DisplayError, Esp32Display};

/// Pin assignments for the ESP32-2432S028R.
///
/// The touch controller and the display sit on separate SPI buses:
/// - Touch on VSPI-style pins 25/32/39/33 with IRQ on 36
/// - Display on HSPI pins 12-15 with DC on 2
/// - Backlight on GPIO21
pub mod pins {
    // =========================================================================
    // Touch Controller (XPT2046)
    // =========================================================================

    /// Touch SPI clock
    pub const TOUCH_CLK: i32 = 25;

    /// Touch SPI data out (MCU to XPT2046)
    pub const TOUCH_MOSI: i32 = 32;

    /// Touch SPI data in (input-only pin)
    pub const TOUCH_MISO: i32 = 39;

    /// Touch chip select
    pub const TOUCH_CS: i32 = 33;

    /// Touch pen interrupt, active low (input-only pin)
    pub const TOUCH_IRQ: i32 = 36;

    // =========================================================================
    // Display (ILI9341)
    // =========================================================================

    /// Display SPI clock
    pub const LCD_SCK: i32 = 14;

    /// Display SPI data out
    pub const LCD_MOSI: i32 = 13;

    /// Display SPI data in
    pub const LCD_MISO: i32 = 12;

    /// Display chip select
    pub const LCD_CS: i32 = 15;

    /// Display data/command select
    pub const LCD_DC: i32 = 2;

    /// Backlight enable, active high
    pub const LCD_BACKLIGHT: i32 = 21;

    /// Display SPI clock rate in MHz
    pub const LCD_SPI_MHZ: u32 = 40;

    /// Touch SPI clock rate in MHz (XPT2046 tops out near 2.5MHz)
    pub const TOUCH_SPI_MHZ: u32 = 2;
}
