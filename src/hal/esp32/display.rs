//! ILI9341 TFT display implementation for ESP32.
//!
//! Draws the control grid on the CYD's 240x320 panel:
//! - Wood-coloured action buttons
//! - Green RPM preset buttons
//! - The lights switch with its state
//! - A status line along the bottom
//!
//! # Wiring
//!
//! - SCK → GPIO14, MOSI → GPIO13, MISO → GPIO12
//! - CS → GPIO15, DC → GPIO2
//! - Backlight → GPIO21

use embedded_graphics::{
    mono_font::{ascii::FONT_10X20, ascii::FONT_6X10, ascii::FONT_9X15, MonoTextStyle},
    pixelcolor::{Rgb565, Rgb888},
    prelude::*,
    primitives::{PrimitiveStyleBuilder, Rectangle, RoundedRectangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};
use esp_idf_hal::delay::Ets;
use esp_idf_hal::gpio::{AnyOutputPin, Output, PinDriver};
use esp_idf_hal::spi::{SpiDeviceDriver, SpiDriver};
use mipidsi::interface::SpiInterface;
use mipidsi::models::ILI9341Rgb565;
use mipidsi::options::{ColorOrder, Orientation};
use mipidsi::{Builder, NoResetPin};

use crate::commands::PanelCommand;
use crate::panel::{Control, ControlKind, PanelView, Rect};
use crate::traits::PanelDisplay;

type Interface<'d> =
    SpiInterface<'d, SpiDeviceDriver<'d, SpiDriver<'d>>, PinDriver<'d, AnyOutputPin, Output>>;

type DisplayDriver<'d> = mipidsi::Display<Interface<'d>, ILI9341Rgb565, NoResetPin>;

fn rgb(hex: u32) -> Rgb565 {
    Rgb565::from(Rgb888::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8))
}

// ============================================================================
// Palette
// ============================================================================

const BACKGROUND: u32 = 0x0A1F35;
const WOOD: u32 = 0xC89354;
const GREEN: u32 = 0x4CAF50;
const INK: u32 = 0x1A2D20;
const PRESSED: u32 = 0x8A6236;
const STATUS_TEXT: u32 = 0xE0E0E0;

/// ILI9341 display for the CYD.
///
/// # Display Layout
///
/// ```text
/// ┌──────────────────────┐
/// │ [Prop Start][Prop Stop]│
/// │ [Wght Start][Wght Stop]│
/// │ [ < Left  ][ Right > ] │
/// │ [      Lights  (o)   ] │
/// │ [10 RPM][30 RPM][60 RPM]│
/// │ Sent: RPM:30           │
/// └──────────────────────┘
/// ```
pub struct Esp32Display<'d> {
    display: DisplayDriver<'d>,
    backlight: PinDriver<'d, AnyOutputPin, Output>,
}

impl<'d> Esp32Display<'d> {
    /// Creates a new display instance.
    ///
    /// # Arguments
    ///
    /// * `spi` - Device on the display bus (GPIO12-15)
    /// * `dc` - Data/command pin (GPIO2)
    /// * `backlight` - Backlight pin (GPIO21)
    /// * `buffer` - Scratch buffer for pixel batching, 512 bytes or more
    ///
    /// # Errors
    ///
    /// Returns an error if controller initialization fails.
    pub fn new(
        spi: SpiDeviceDriver<'d, SpiDriver<'d>>,
        dc: PinDriver<'d, AnyOutputPin, Output>,
        backlight: PinDriver<'d, AnyOutputPin, Output>,
        buffer: &'d mut [u8],
    ) -> Result<Self, DisplayError> {
        let interface = SpiInterface::new(spi, dc, buffer);
        let display = Builder::new(ILI9341Rgb565, interface)
            .display_size(240, 320)
            .orientation(Orientation::new())
            .color_order(ColorOrder::Bgr)
            .init(&mut Ets)
            .map_err(|_| DisplayError)?;

        Ok(Self { display, backlight })
    }

    fn draw_control(&mut self, control: &Control, highlighted: bool) -> Result<(), DisplayError> {
        let fill = match control.kind {
            _ if highlighted => PRESSED,
            ControlKind::Button(PanelCommand::SetRpm(_)) => GREEN,
            ControlKind::Switch { state: true, .. } => GREEN,
            _ => WOOD,
        };
        let style = PrimitiveStyleBuilder::new()
            .fill_color(rgb(fill))
            .stroke_color(rgb(INK))
            .stroke_width(2)
            .build();
        RoundedRectangle::with_equal_corners(rectangle(control.rect), Size::new(8, 8))
            .into_styled(style)
            .draw(&mut self.display)
            .map_err(|_| DisplayError)?;

        let centered = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();
        let ink = MonoTextStyle::new(&FONT_9X15, rgb(INK));
        let center = control.rect.center();
        let caption = match control.switch_state() {
            Some(true) => "Lights: ON",
            Some(false) => "Lights: OFF",
            None => control.label.as_str(),
        };
        Text::with_text_style(caption, Point::new(center.x, center.y), ink, centered)
            .draw(&mut self.display)
            .map_err(|_| DisplayError)?;
        Ok(())
    }

    fn draw_status(&mut self, area: Rect, status: Option<&str>) -> Result<(), DisplayError> {
        self.display
            .fill_solid(&rectangle(area), rgb(BACKGROUND))
            .map_err(|_| DisplayError)?;
        if let Some(text) = status {
            let style = MonoTextStyle::new(&FONT_10X20, rgb(STATUS_TEXT));
            Text::with_baseline(text, Point::new(area.x, area.y), style, Baseline::Top)
                .draw(&mut self.display)
                .map_err(|_| DisplayError)?;
        }
        Ok(())
    }
}

fn rectangle(rect: Rect) -> Rectangle {
    Rectangle::new(
        Point::new(rect.x, rect.y),
        Size::new(u32::from(rect.width), u32::from(rect.height)),
    )
}

impl PanelDisplay for Esp32Display<'_> {
    type Error = DisplayError;

    fn init(&mut self) -> Result<(), Self::Error> {
        self.backlight.set_high().map_err(|_| DisplayError)?;
        self.clear()
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.display
            .clear(rgb(BACKGROUND))
            .map_err(|_| DisplayError)
    }

    fn render(&mut self, view: &PanelView<'_>) -> Result<(), Self::Error> {
        // Controls never move, so only the cells and status band are redrawn
        for (i, control) in view.controls.iter().enumerate() {
            self.draw_control(control, view.highlighted == Some(i))?;
        }
        self.draw_status(view.status_area, view.status)
    }

    fn show_message(&mut self, line1: &str, line2: Option<&str>) -> Result<(), Self::Error> {
        self.clear()?;

        let centered = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();
        let large = MonoTextStyle::new(&FONT_10X20, rgb(WOOD));
        Text::with_text_style(line1, Point::new(120, 150), large, centered)
            .draw(&mut self.display)
            .map_err(|_| DisplayError)?;

        if let Some(l2) = line2 {
            let small = MonoTextStyle::new(&FONT_6X10, rgb(STATUS_TEXT));
            Text::with_text_style(l2, Point::new(120, 176), small, centered)
                .draw(&mut self.display)
                .map_err(|_| DisplayError)?;
        }
        Ok(())
    }
}

/// Display error type.
#[derive(Debug)]
pub struct DisplayError;
