//! ESP32 "Cheap Yellow Display" remote control panel.
//!
//! This is the main entry point for the touch panel firmware.
//! It runs a fast polling loop that:
//! - Reads the XPT2046 touch controller
//! - Resolves taps on the on-screen buttons
//! - Sends the matching command to the receiver over ESP-NOW
//! - Redraws the ILI9341 panel when something changed (if enabled)
//!
//! # Build
//!
//! ```bash
//! # Touch + ESP-NOW, serial log only
//! cargo build --release --features esp32
//!
//! # With the TFT panel
//! cargo build --release --features display
//!
//! # Target a different receiver
//! PEER_MAC=24:6F:28:AA:BB:CC cargo build --release --features display
//! ```

use cyd_remote::hal::esp32::{pins, Esp32Clock, EspNowLink};
use cyd_remote::hal::Xpt2046;
use cyd_remote::traits::{Clock, PeerAddress};
use cyd_remote::{Config, LinkConfig, PanelController, TickOutcome};
use esp_idf_hal::gpio::PinDriver;
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::prelude::*;
use esp_idf_hal::spi::{config::Config as SpiConfig, SpiDeviceDriver, SpiDriver, SpiDriverConfig};
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use std::thread;
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    // Initialize ESP-IDF
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    println!();
    println!("================================");
    println!("  cyd-remote Touch Panel");
    println!("================================");
    println!();

    // =========================================================================
    // Configuration
    // =========================================================================
    let mut link = LinkConfig::default();
    if let Some(text) = option_env!("PEER_MAC") {
        let peer = PeerAddress::from_text(text)
            .ok_or_else(|| anyhow::anyhow!("PEER_MAC '{}' is not a MAC address", text))?;
        link = link.with_peer(peer);
    }
    let config = Config::default().with_link(link);

    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    // =========================================================================
    // Initialize Display (ILI9341 on GPIO12-15) - Optional
    // =========================================================================
    #[cfg(feature = "display")]
    let mut display_buffer = [0u8; 512];

    #[cfg(feature = "display")]
    let mut display = {
        use cyd_remote::hal::esp32::Esp32Display;
        use cyd_remote::traits::PanelDisplay;
        use esp_idf_hal::gpio::OutputPin;

        let bus = SpiDriver::new(
            peripherals.spi2,
            peripherals.pins.gpio14,
            peripherals.pins.gpio13,
            Some(peripherals.pins.gpio12),
            &SpiDriverConfig::new(),
        )?;
        let spi = SpiDeviceDriver::new(
            bus,
            Some(peripherals.pins.gpio15),
            &SpiConfig::new().baudrate(pins::LCD_SPI_MHZ.MHz().into()),
        )?;
        let dc = PinDriver::output(peripherals.pins.gpio2.downgrade_output())?;
        let backlight = PinDriver::output(peripherals.pins.gpio21.downgrade_output())?;

        let mut disp = Esp32Display::new(spi, dc, backlight, &mut display_buffer)
            .map_err(|e| anyhow::anyhow!("Display init failed: {:?}", e))?;
        disp.init()
            .map_err(|e| anyhow::anyhow!("Display init failed: {:?}", e))?;
        let _ = disp.show_message(&config.device.name, Some("Starting..."));
        println!(
            "[OK] Display initialized (DC GPIO{}, backlight GPIO{})",
            pins::LCD_DC,
            pins::LCD_BACKLIGHT
        );
        disp
    };

    #[cfg(not(feature = "display"))]
    println!("[SKIP] Display disabled (build with --features display)");

    // =========================================================================
    // Initialize Touch (XPT2046 on GPIO25/32/39/33, IRQ GPIO36)
    // =========================================================================
    let touch_bus = SpiDriver::new(
        peripherals.spi3,
        peripherals.pins.gpio25,
        peripherals.pins.gpio32,
        Some(peripherals.pins.gpio39),
        &SpiDriverConfig::new(),
    )?;
    let touch_spi = SpiDeviceDriver::new(
        touch_bus,
        Some(peripherals.pins.gpio33),
        &SpiConfig::new().baudrate(pins::TOUCH_SPI_MHZ.MHz().into()),
    )?;
    let touch_irq = PinDriver::input(peripherals.pins.gpio36)?;
    let touch = Xpt2046::new(touch_spi, touch_irq, &config.touch);
    println!(
        "[OK] Touch initialized (CS GPIO{}, IRQ GPIO{})",
        pins::TOUCH_CS,
        pins::TOUCH_IRQ
    );

    // =========================================================================
    // Initialize ESP-NOW (Wi-Fi station, no access point)
    // =========================================================================
    let link = EspNowLink::new(peripherals.modem, sysloop, Some(nvs), &config.link)?;
    if let Some(local) = link.local_address() {
        println!("[OK] ESP-NOW ready, this panel is {}", local);
    }
    println!("[OK] Receiver {}", config.link.peer);

    // =========================================================================
    // Initialize Clock and Controller
    // =========================================================================
    let clock = Esp32Clock::new();
    let mut controller = PanelController::from_config(touch, link, &config)
        .map_err(|e| anyhow::anyhow!("Panel setup failed: {}", e))?;

    #[cfg(feature = "display")]
    {
        use cyd_remote::traits::PanelDisplay;
        let _ = display.clear();
    }

    println!();
    println!(
        "Starting touch loop ({}ms tick)...",
        config.panel.tick_interval_ms
    );
    println!();

    // =========================================================================
    // Main Loop
    // =========================================================================
    loop {
        let now = clock.now_ms();

        if let TickOutcome::Failed(cmd, e) = controller.tick(now) {
            println!("[WARN] {:?} not delivered: {}", cmd, e);
        }

        // ---------------------------------------------------------------------
        // Update display
        // ---------------------------------------------------------------------
        #[cfg(feature = "display")]
        if controller.take_redraw() {
            use cyd_remote::traits::PanelDisplay;
            if let Err(e) = display.render(&controller.view()) {
                log::warn!("Render failed: {:?}", e);
            }
        }

        // Sleep until next tick
        thread::sleep(Duration::from_millis(u64::from(
            config.panel.tick_interval_ms,
        )));
    }
}
