//! Shared configuration for the panel firmware and desktop tools.
//!
//! Uses `heapless` containers for `no_std` compatibility while remaining
//! ergonomic to use on desktop with `std`.
//!
//! # Example
//!
//! ```rust
//! use cyd_remote::config::{Config, LinkConfig, PanelConfig, TouchConfig};
//! use cyd_remote::touch::CalibrationPolicy;
//! use cyd_remote::traits::PeerAddress;
//!
//! // Use defaults
//! let config = Config::default();
//!
//! // Or customize
//! let config = Config::default()
//!     .with_touch(TouchConfig::default().with_policy(CalibrationPolicy::Fixed))
//!     .with_link(LinkConfig::default().with_peer(PeerAddress::new([0x24, 0x6F, 0x28, 0, 0, 1])))
//!     .with_panel(PanelConfig::default().with_rpm_presets(&[20, 40]));
//! ```

use heapless::String as HString;
use heapless::Vec as HVec;

use crate::commands::RpmLimits;
use crate::dispatch::PayloadFraming;
use crate::error::PanelError;
use crate::touch::{CalibrationBounds, CalibrationPolicy, ScreenSize, TouchNormalizer};
use crate::traits::{PeerAddress, TouchRotation};

/// Maximum length for short config strings (device names)
pub const MAX_SHORT_STRING: usize = 32;

/// Maximum number of RPM preset buttons
pub const MAX_RPM_PRESETS: usize = 4;

/// Type alias for short config strings
pub type ShortString = HString<MAX_SHORT_STRING>;

/// Type alias for the RPM preset list
pub type RpmPresets = HVec<u32, MAX_RPM_PRESETS>;

/// Create a ShortString from a &str, truncating on a UTF-8 boundary if too long
pub fn short_string(s: &str) -> ShortString {
    let mut end = s.len().min(MAX_SHORT_STRING);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    let mut hs = ShortString::new();
    let _ = hs.push_str(&s[..end]);
    hs
}

// ============================================================================
// Main Config
// ============================================================================

/// Complete application configuration
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Touch calibration and sensor settings
    pub touch: TouchConfig,
    /// Receiver link settings
    pub link: LinkConfig,
    /// Panel controls and loop timing
    pub panel: PanelConfig,
    /// Device identification
    pub device: DeviceConfig,
}

impl Config {
    /// Set touch configuration
    pub fn with_touch(mut self, touch: TouchConfig) -> Self {
        self.touch = touch;
        self
    }

    /// Set link configuration
    pub fn with_link(mut self, link: LinkConfig) -> Self {
        self.link = link;
        self
    }

    /// Set panel configuration
    pub fn with_panel(mut self, panel: PanelConfig) -> Self {
        self.panel = panel;
        self
    }

    /// Set device configuration
    pub fn with_device(mut self, device: DeviceConfig) -> Self {
        self.device = device;
        self
    }
}

// ============================================================================
// Touch Config
// ============================================================================

/// Touch sensor and calibration configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TouchConfig {
    /// Raw coordinate extremes mapped to the screen edges
    pub bounds: CalibrationBounds,
    /// Whether bounds widen to observed readings
    pub policy: CalibrationPolicy,
    /// Logical screen size
    pub screen: ScreenSize,
    /// Orientation of the touch layer
    pub rotation: TouchRotation,
    /// Minimum pressure reading counted as a touch
    pub pressure_threshold: u16,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            bounds: CalibrationBounds::default(),
            policy: CalibrationPolicy::Adaptive,
            screen: ScreenSize::default(),
            rotation: TouchRotation::Rotate0,
            pressure_threshold: 300,
        }
    }
}

impl TouchConfig {
    /// Set the calibration bounds
    pub fn with_bounds(mut self, bounds: CalibrationBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Set the calibration policy
    pub fn with_policy(mut self, policy: CalibrationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the screen size
    pub fn with_screen(mut self, screen: ScreenSize) -> Self {
        self.screen = screen;
        self
    }

    /// Set the touch rotation
    pub fn with_rotation(mut self, rotation: TouchRotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the pressure threshold
    pub fn with_pressure_threshold(mut self, threshold: u16) -> Self {
        self.pressure_threshold = threshold;
        self
    }

    /// Build a normalizer from these settings
    pub fn normalizer(&self) -> Result<TouchNormalizer, PanelError> {
        TouchNormalizer::new(self.bounds, self.policy, self.screen)
    }
}

// ============================================================================
// Link Config
// ============================================================================

/// Receiver link configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkConfig {
    /// Hardware address of the receiver
    pub peer: PeerAddress,
    /// Radio channel (0 = current channel)
    pub channel: u8,
    /// Whether the peer is registered with link-layer encryption
    pub encrypt: bool,
    /// Wire framing of payloads
    pub framing: PayloadFraming,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            peer: PeerAddress::new([0xD8, 0x3B, 0xDA, 0xC8, 0x95, 0xEC]),
            channel: 0,
            encrypt: false,
            framing: PayloadFraming::Bare,
        }
    }
}

impl LinkConfig {
    /// Set the receiver address
    pub fn with_peer(mut self, peer: PeerAddress) -> Self {
        self.peer = peer;
        self
    }

    /// Set the radio channel
    pub fn with_channel(mut self, channel: u8) -> Self {
        self.channel = channel;
        self
    }

    /// Enable or disable link-layer encryption for the peer
    pub fn with_encrypt(mut self, encrypt: bool) -> Self {
        self.encrypt = encrypt;
        self
    }

    /// Set the payload framing
    pub fn with_framing(mut self, framing: PayloadFraming) -> Self {
        self.framing = framing;
        self
    }
}

// ============================================================================
// Panel Config
// ============================================================================

/// Panel controls and loop timing
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PanelConfig {
    /// RPM values offered as buttons
    pub rpm_presets: RpmPresets,
    /// RPM range accepted by the dispatcher
    pub rpm_limits: RpmLimits,
    /// Polling loop sleep in milliseconds
    pub tick_interval_ms: u32,
    /// How long a status line stays on screen
    pub status_hold_ms: u32,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            rpm_presets: RpmPresets::from_slice(&[10, 30, 60]).unwrap_or_default(),
            rpm_limits: RpmLimits::default(),
            tick_interval_ms: 5,
            status_hold_ms: 2000,
        }
    }
}

impl PanelConfig {
    /// Set the RPM presets, keeping at most [`MAX_RPM_PRESETS`]
    pub fn with_rpm_presets(mut self, presets: &[u32]) -> Self {
        let take = presets.len().min(MAX_RPM_PRESETS);
        self.rpm_presets = RpmPresets::from_slice(&presets[..take]).unwrap_or_default();
        self
    }

    /// Set the accepted RPM range
    pub fn with_rpm_limits(mut self, limits: RpmLimits) -> Self {
        self.rpm_limits = limits;
        self
    }

    /// Set the loop interval
    pub fn with_tick_interval_ms(mut self, ms: u32) -> Self {
        self.tick_interval_ms = ms;
        self
    }

    /// Set how long status lines stay visible
    pub fn with_status_hold_ms(mut self, ms: u32) -> Self {
        self.status_hold_ms = ms;
        self
    }
}

// ============================================================================
// Device Config
// ============================================================================

/// Device identification configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceConfig {
    /// Human-readable device name, shown on the splash screen
    pub name: ShortString,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: short_string("CYD Controller"),
        }
    }
}

impl DeviceConfig {
    /// Set the device name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = short_string(name);
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.touch.screen, ScreenSize::new(240, 320));
        assert_eq!(config.touch.policy, CalibrationPolicy::Adaptive);
        assert_eq!(config.panel.tick_interval_ms, 5);
        assert_eq!(config.link.channel, 0);
    }

    #[test]
    fn builder_pattern() {
        let config = Config::default()
            .with_touch(
                TouchConfig::default()
                    .with_policy(CalibrationPolicy::Fixed)
                    .with_pressure_threshold(500),
            )
            .with_link(LinkConfig::default().with_channel(6))
            .with_device(DeviceConfig::default().with_name("Bench Panel"));

        assert_eq!(config.touch.policy, CalibrationPolicy::Fixed);
        assert_eq!(config.touch.pressure_threshold, 500);
        assert_eq!(config.link.channel, 6);
        assert_eq!(config.device.name.as_str(), "Bench Panel");
    }

    // =========================================================================
    // TouchConfig Tests
    // =========================================================================

    #[test]
    fn touch_config_default() {
        let touch = TouchConfig::default();
        assert_eq!(touch.bounds, CalibrationBounds::default());
        assert_eq!(touch.rotation, TouchRotation::Rotate0);
        assert_eq!(touch.pressure_threshold, 300);
    }

    #[test]
    fn touch_config_builds_normalizer() {
        let normalizer = TouchConfig::default()
            .with_screen(ScreenSize::new(320, 240))
            .normalizer()
            .unwrap();
        assert_eq!(normalizer.screen(), ScreenSize::new(320, 240));
        assert_eq!(normalizer.policy(), CalibrationPolicy::Adaptive);
    }

    #[test]
    fn touch_config_rejects_zero_screen() {
        let result = TouchConfig::default()
            .with_screen(ScreenSize::new(0, 0))
            .normalizer();
        assert!(result.is_err());
    }

    // =========================================================================
    // LinkConfig Tests
    // =========================================================================

    #[test]
    fn link_config_default_peer() {
        let link = LinkConfig::default();
        assert_eq!(link.peer.octets(), [0xD8, 0x3B, 0xDA, 0xC8, 0x95, 0xEC]);
        assert_eq!(link.framing, PayloadFraming::Bare);
        assert!(!link.encrypt);
    }

    #[test]
    fn link_config_builder() {
        let peer = PeerAddress::new([1, 2, 3, 4, 5, 6]);
        let link = LinkConfig::default()
            .with_peer(peer)
            .with_framing(PayloadFraming::NulTerminated);
        assert_eq!(link.peer, peer);
        assert_eq!(link.framing, PayloadFraming::NulTerminated);
    }

    // =========================================================================
    // PanelConfig Tests
    // =========================================================================

    #[test]
    fn panel_config_default() {
        let panel = PanelConfig::default();
        assert_eq!(panel.rpm_presets.as_slice(), &[10, 30, 60]);
        assert_eq!(panel.rpm_limits, RpmLimits::default());
        assert_eq!(panel.status_hold_ms, 2000);
    }

    #[test]
    fn panel_config_presets_truncated() {
        let panel = PanelConfig::default().with_rpm_presets(&[1, 2, 3, 4, 5, 6]);
        assert_eq!(panel.rpm_presets.as_slice(), &[1, 2, 3, 4]);
    }

    #[test]
    fn panel_config_builder() {
        let panel = PanelConfig::default()
            .with_tick_interval_ms(10)
            .with_status_hold_ms(500)
            .with_rpm_limits(RpmLimits::new(5, 90));
        assert_eq!(panel.tick_interval_ms, 10);
        assert_eq!(panel.status_hold_ms, 500);
        assert_eq!(panel.rpm_limits.max, 90);
    }

    // =========================================================================
    // String Helper Tests
    // =========================================================================

    #[test]
    fn short_string_truncation() {
        let long_input = "a".repeat(100);
        let s = short_string(&long_input);
        assert_eq!(s.len(), MAX_SHORT_STRING);
    }

    #[test]
    fn short_string_utf8_boundary() {
        // 'é' is 2 bytes; 17 of them is 34 bytes, cut must land on 32
        let input = "é".repeat(17);
        let s = short_string(&input);
        assert_eq!(s.len(), 32);
        assert!(core::str::from_utf8(s.as_bytes()).is_ok());

        let input = alloc::format!("a{}", "é".repeat(16));
        let s = short_string(&input);
        assert_eq!(s.len(), 31);
    }
}
