//! One-shot command delivery to the receiver.
//!
//! [`Dispatcher`] turns a [`PanelCommand`] into its payload and hands it to
//! a [`CommandTransport`] exactly once. It keeps no state beyond delivery
//! counters.
//!
//! # Example
//!
//! ```rust
//! use cyd_remote::{Dispatcher, LinkConfig, PanelCommand, RpmLimits};
//! use cyd_remote::hal::MockTransport;
//!
//! let link = LinkConfig::default();
//! let mut dispatcher = Dispatcher::new(MockTransport::new(), &link, RpmLimits::default());
//!
//! dispatcher.dispatch(PanelCommand::SetRpm(60)).unwrap();
//!
//! let sent = &dispatcher.transport().sent;
//! assert_eq!(sent.len(), 1);
//! assert_eq!(sent[0].0, link.peer);
//! assert_eq!(sent[0].1, b"RPM:60");
//! ```

use crate::commands::{CommandPayload, PanelCommand, RpmLimits, MAX_PAYLOAD_LEN};
use crate::config::LinkConfig;
use crate::error::{PanelError, TransmitFailure};
use crate::traits::{CommandTransport, PeerAddress};

/// How a payload is laid out on the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PayloadFraming {
    /// The ASCII text only.
    #[default]
    Bare,
    /// The ASCII text followed by one `0x00` byte, for receivers that treat
    /// the frame as a C string.
    NulTerminated,
}

impl PayloadFraming {
    /// Lays out `payload` into `buf`, returning the bytes to send.
    pub fn frame<'a>(&self, payload: &str, buf: &'a mut [u8; MAX_PAYLOAD_LEN + 1]) -> &'a [u8] {
        let len = payload.len().min(MAX_PAYLOAD_LEN);
        buf[..len].copy_from_slice(&payload.as_bytes()[..len]);
        match self {
            PayloadFraming::Bare => &buf[..len],
            PayloadFraming::NulTerminated => {
                buf[len] = 0;
                &buf[..len + 1]
            }
        }
    }
}

/// Delivery counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Sends the transport accepted.
    pub sent: u32,
    /// Dispatch calls that failed (validation or transport).
    pub failed: u32,
}

/// Sends panel commands to the configured peer.
///
/// # Type Parameter
///
/// - `T`: The link implementation ([`CommandTransport`] trait)
pub struct Dispatcher<T: CommandTransport> {
    transport: T,
    peer: PeerAddress,
    framing: PayloadFraming,
    limits: RpmLimits,
    stats: DispatchStats,
}

impl<T: CommandTransport> Dispatcher<T> {
    /// Creates a dispatcher for the peer described by `link`.
    pub fn new(transport: T, link: &LinkConfig, limits: RpmLimits) -> Self {
        Self {
            transport,
            peer: link.peer,
            framing: link.framing,
            limits,
            stats: DispatchStats::default(),
        }
    }

    /// Validates a command and builds its payload without sending.
    pub fn encode(&self, cmd: PanelCommand) -> Result<CommandPayload, PanelError> {
        self.limits.check_command(&cmd)?;
        Ok(cmd.payload())
    }

    /// Sends a command once.
    ///
    /// Returns the payload that was handed to the transport. Nothing is
    /// retried; a failure is returned to the caller to report.
    pub fn dispatch(&mut self, cmd: PanelCommand) -> Result<CommandPayload, PanelError> {
        let result = self.try_dispatch(cmd);
        match &result {
            Ok(payload) => {
                self.stats.sent = self.stats.sent.wrapping_add(1);
                log::info!("Sent: {}", payload);
            }
            Err(e) => {
                self.stats.failed = self.stats.failed.wrapping_add(1);
                log::warn!("Dispatch of {:?} failed: {}", cmd, e);
            }
        }
        result
    }

    fn try_dispatch(&mut self, cmd: PanelCommand) -> Result<CommandPayload, PanelError> {
        let payload = self.encode(cmd)?;

        if !self.transport.is_ready() {
            return Err(PanelError::TransmitFailure(TransmitFailure::LinkNotReady));
        }

        let peer = self.peer;
        let mut buf = [0u8; MAX_PAYLOAD_LEN + 1];
        let bytes = self.framing.frame(&payload, &mut buf);
        self.transport.send(&peer, bytes).map_err(|e| {
            log::warn!("Transport error sending to {}: {:?}", peer, e);
            PanelError::TransmitFailure(TransmitFailure::SendRejected)
        })?;

        Ok(payload)
    }

    /// The receiver every command goes to.
    pub fn peer(&self) -> PeerAddress {
        self.peer
    }

    /// The configured framing.
    pub fn framing(&self) -> PayloadFraming {
        self.framing
    }

    /// The RPM range enforced before sending.
    pub fn limits(&self) -> RpmLimits {
        self.limits
    }

    /// Delivery counters since construction.
    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    /// Shared access to the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutable access to the transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}
