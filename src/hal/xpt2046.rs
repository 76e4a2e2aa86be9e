//! XPT2046 resistive touch controller.
//!
//! The controller answers 12-bit conversions over SPI. Each conversion is a
//! three byte exchange: the command byte, then two bytes carrying the result
//! left-aligned in 15 bits.
//!
//! Touch detection measures pressure (Z1/Z2) and compares it against a
//! threshold, so a light brush of the panel is not reported. Position is
//! read three times per axis and the two closest readings averaged, which
//! rejects the occasional outlier a resistive panel produces.
//!
//! Every bus exchange ends with a power-down conversion, which re-enables
//! the pen interrupt the Z and position conversions switch off.
//!
//! # Wiring (CYD)
//!
//! - CLK → GPIO25, MOSI → GPIO32, MISO → GPIO39, CS → GPIO33
//! - IRQ → GPIO36 (low while pressed)

use embedded_hal::digital::InputPin;
use embedded_hal::spi::SpiDevice;

use crate::config::TouchConfig;
use crate::traits::{RawTouchSample, TouchRotation, TouchSensor, RAW_AXIS_MAX};

/// Differential Z1 conversion.
const CMD_Z1: u8 = 0xB1;
/// Differential Z2 conversion.
const CMD_Z2: u8 = 0xC1;
/// Differential Y conversion, reference kept on.
const CMD_Y: u8 = 0x91;
/// Differential X conversion, reference kept on.
const CMD_X: u8 = 0xD1;
/// X conversion that powers down afterwards (re-arms the pen IRQ).
const CMD_X_POWER_DOWN: u8 = 0xD0;

/// Reads per axis for outlier rejection.
const READS_PER_AXIS: usize = 3;

/// Errors from the touch bus.
#[derive(Debug)]
pub enum Xpt2046Error<S, P> {
    /// SPI transfer failed.
    Spi(S),
    /// Reading the IRQ pin failed.
    Irq(P),
}

/// XPT2046 driver.
///
/// # Type Parameters
///
/// - `SPI`: Device on the touch bus (owns chip select)
/// - `IRQ`: Pen interrupt input
pub struct Xpt2046<SPI, IRQ> {
    spi: SPI,
    irq: IRQ,
    rotation: TouchRotation,
    pressure_threshold: u16,
    last_pressure: u16,
}

impl<SPI, IRQ> Xpt2046<SPI, IRQ>
where
    SPI: SpiDevice,
    IRQ: InputPin,
{
    /// Creates a driver with the rotation and threshold from `config`.
    pub fn new(spi: SPI, irq: IRQ, config: &TouchConfig) -> Self {
        Self {
            spi,
            irq,
            rotation: config.rotation,
            pressure_threshold: config.pressure_threshold,
            last_pressure: 0,
        }
    }

    /// Changes the panel rotation.
    pub fn set_rotation(&mut self, rotation: TouchRotation) {
        self.rotation = rotation;
    }

    /// Pressure measured by the last call to `touched`.
    pub fn last_pressure(&self) -> u16 {
        self.last_pressure
    }

    fn read_channel(&mut self, cmd: u8) -> Result<u16, Xpt2046Error<SPI::Error, IRQ::Error>> {
        let mut buf = [cmd, 0, 0];
        self.spi
            .transfer_in_place(&mut buf)
            .map_err(Xpt2046Error::Spi)?;
        Ok(((u16::from(buf[1]) << 8) | u16::from(buf[2])) >> 3)
    }

    fn read_axis(&mut self, cmd: u8) -> Result<u16, Xpt2046Error<SPI::Error, IRQ::Error>> {
        let mut reads = [0u16; READS_PER_AXIS];
        for r in reads.iter_mut() {
            *r = self.read_channel(cmd)?;
        }
        Ok(closest_pair_average(reads))
    }

    fn pressure(&mut self) -> Result<u16, Xpt2046Error<SPI::Error, IRQ::Error>> {
        let z1 = i32::from(self.read_channel(CMD_Z1)?);
        let z2 = i32::from(self.read_channel(CMD_Z2)?);
        let z = (z1 + i32::from(RAW_AXIS_MAX) - z2).clamp(0, i32::from(u16::MAX));
        Ok(z as u16)
    }
}

impl<SPI, IRQ> TouchSensor for Xpt2046<SPI, IRQ>
where
    SPI: SpiDevice,
    IRQ: InputPin,
{
    type Error = Xpt2046Error<SPI::Error, IRQ::Error>;

    fn touched(&mut self) -> Result<bool, Self::Error> {
        // IRQ idles high; skip the bus entirely when the pen is up
        if self.irq.is_high().map_err(Xpt2046Error::Irq)? {
            self.last_pressure = 0;
            return Ok(false);
        }
        self.last_pressure = self.pressure()?;
        if self.last_pressure < self.pressure_threshold {
            // Z conversions leave PENIRQ off; re-arm it or the pen is never seen again
            self.read_channel(CMD_X_POWER_DOWN)?;
            return Ok(false);
        }
        Ok(true)
    }

    fn sample(&mut self) -> Result<RawTouchSample, Self::Error> {
        let x = self.read_axis(CMD_X)?;
        let y = self.read_axis(CMD_Y)?;
        self.read_channel(CMD_X_POWER_DOWN)?;

        let (x, y) = self.rotation.apply(x, y);
        Ok(RawTouchSample::with_pressure(x, y, self.last_pressure))
    }
}

/// Averages the two readings closest to each other.
fn closest_pair_average(reads: [u16; READS_PER_AXIS]) -> u16 {
    let [a, b, c] = reads.map(i32::from);
    let ab = (a - b).abs();
    let ac = (a - c).abs();
    let bc = (b - c).abs();

    let avg = if ab <= ac && ab <= bc {
        (a + b) / 2
    } else if ac <= bc {
        (a + c) / 2
    } else {
        (b + c) / 2
    };
    avg as u16
}
