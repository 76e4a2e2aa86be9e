//! Outbound link abstraction.
//!
//! The panel talks to exactly one receiver. Every click becomes one
//! datagram of ASCII text addressed to that receiver's hardware address:
//!
//! ```text
//! panel ──"PROP_START"──▶ D8:3B:DA:C8:95:EC
//! panel ──"RPM:30"──────▶ D8:3B:DA:C8:95:EC
//! ```
//!
//! There is no acknowledgement, no framing beyond "one send call is one
//! message", and no retry. The operator tapping again is the retry.

use core::fmt;

/// Hardware address of the single remote receiver.
///
/// # Example
///
/// ```rust
/// use cyd_remote::traits::PeerAddress;
///
/// let peer = PeerAddress::from_text("d8:3b:da:c8:95:ec").unwrap();
/// assert_eq!(peer.octets(), [0xD8, 0x3B, 0xDA, 0xC8, 0x95, 0xEC]);
/// assert_eq!(format!("{}", peer), "D8:3B:DA:C8:95:EC");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeerAddress([u8; 6]);

impl PeerAddress {
    /// Broadcast address (all receivers in range).
    pub const BROADCAST: PeerAddress = PeerAddress([0xFF; 6]);

    /// Creates an address from raw octets.
    pub const fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    /// Returns the raw octets.
    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Parse an address from text.
    ///
    /// Accepts six hex pairs separated by `:` or `-`. Input is trimmed and
    /// case-insensitive.
    ///
    /// ```
    /// use cyd_remote::traits::PeerAddress;
    ///
    /// assert!(PeerAddress::from_text("D8-3B-DA-C8-95-EC").is_some());
    /// assert!(PeerAddress::from_text("  d8:3b:da:c8:95:ec ").is_some());
    ///
    /// assert!(PeerAddress::from_text("D8:3B:DA:C8:95").is_none());
    /// assert!(PeerAddress::from_text("D8:3B:DA:C8:95:EC:00").is_none());
    /// assert!(PeerAddress::from_text("G8:3B:DA:C8:95:EC").is_none());
    /// assert!(PeerAddress::from_text("D83BDAC895EC").is_none());
    /// ```
    pub fn from_text(s: &str) -> Option<Self> {
        let s = s.trim();
        let sep = if s.contains(':') { ':' } else { '-' };
        let mut octets = [0u8; 6];
        let mut count = 0;
        for part in s.split(sep) {
            if count == octets.len()
                || part.len() != 2
                || !part.bytes().all(|b| b.is_ascii_hexdigit())
            {
                return None;
            }
            octets[count] = u8::from_str_radix(part, 16).ok()?;
            count += 1;
        }
        (count == octets.len()).then_some(Self(octets))
    }

    /// Returns true for the broadcast address.
    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }
}

impl fmt::Display for PeerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            a, b, c, d, e, g
        )
    }
}

/// Datagram transport to the receiver.
///
/// This trait uses a **sync-first design**: `send` blocks only as long as it
/// takes to hand the frame to the radio, and it never waits for delivery.
///
/// # Implementation Notes
///
/// - `send` is one attempt; do not retry internally
/// - `is_ready` should be false until the radio is up and the peer is
///   registered, so the dispatcher can report a clear failure
/// - The payload is passed through verbatim
///
/// # Example
///
/// ```rust,ignore
/// use cyd_remote::traits::{CommandTransport, PeerAddress};
///
/// fn ping<T: CommandTransport>(link: &mut T, peer: &PeerAddress) {
///     let _ = link.send(peer, b"PING");
/// }
/// ```
pub trait CommandTransport {
    /// Error type for send operations.
    type Error: fmt::Debug;

    /// Returns true once the link can accept frames for the peer.
    fn is_ready(&self) -> bool;

    /// Send one datagram to `peer` (fire-and-forget).
    fn send(&mut self, peer: &PeerAddress, payload: &[u8]) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn display_is_uppercase_colon_separated() {
        let peer = PeerAddress::new([0x0A, 0x1B, 0x2C, 0x3D, 0x4E, 0x5F]);
        assert_eq!(format!("{}", peer), "0A:1B:2C:3D:4E:5F");
    }

    #[test]
    fn from_text_round_trips_display() {
        let peer = PeerAddress::new([0xD8, 0x3B, 0xDA, 0xC8, 0x95, 0xEC]);
        let text = format!("{}", peer);
        assert_eq!(PeerAddress::from_text(&text), Some(peer));
    }

    #[test]
    fn from_text_rejects_mixed_separators() {
        assert_eq!(PeerAddress::from_text("D8:3B-DA:C8:95:EC"), None);
    }

    #[test]
    fn from_text_rejects_empty_and_short_parts() {
        assert_eq!(PeerAddress::from_text(""), None);
        assert_eq!(PeerAddress::from_text("D8:3B:DA:C8:95:E"), None);
        assert_eq!(PeerAddress::from_text("D8::DA:C8:95:EC"), None);
    }

    #[test]
    fn broadcast_detection() {
        assert!(PeerAddress::BROADCAST.is_broadcast());
        assert!(!PeerAddress::new([0; 6]).is_broadcast());
        assert_eq!(
            PeerAddress::from_text("ff:ff:ff:ff:ff:ff"),
            Some(PeerAddress::BROADCAST)
        );
    }
}
