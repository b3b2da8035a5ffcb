//! # slipgw-gateway
//!
//! Command dispatcher and outgoing-packet tracker for a serial radio
//! gateway. A host drives the gateway with short binary frames (decoded by
//! [`slipgw_protocol`]); the gateway applies the requested side effect and,
//! for packets handed to the radio, correlates the asynchronous transmission
//! outcome back to a confirmation frame the host can recognize.
//!
//! The gateway is a passive, single-threaded component. The surrounding
//! runtime owns the serial link, the radio driver, and the event loop; it
//! calls [`Gateway::frame_received`] once per complete inbound frame and
//! [`Gateway::transmit_done`] once per radio callback, never concurrently.
//! Everything the gateway needs from the platform enters through four
//! traits: [`RadioParamStore`], [`TransmitService`], [`FrameSink`], and
//! [`Platform`].
//!
//! ## Usage
//!
//! ```no_run
//! use slipgw_gateway::{Gateway, GatewayConfig};
//! # use slipgw_gateway::{RadioParamStore, TransmitService, FrameSink, Platform, Slot};
//! # use slipgw_protocol::{LinkAddr, PacketAttrs};
//! # struct Radio; struct Serial; struct Board;
//! # impl RadioParamStore for Radio {
//! #     fn set_pan_id(&mut self, _: u16) {}
//! #     fn set_channel(&mut self, _: u8) {}
//! #     fn set_address(&mut self, _: LinkAddr) {}
//! #     fn pan_id(&self) -> u16 { 0 }
//! #     fn channel(&self) -> u8 { 0 }
//! # }
//! # impl TransmitService for Radio {
//! #     fn transmit(&mut self, _: Slot, _: LinkAddr, _: &PacketAttrs, _: &[u8]) {}
//! # }
//! # impl FrameSink for Serial { fn send_frame(&mut self, _: &[u8]) {} }
//! # impl Platform for Board { fn reboot(&mut self) {} }
//!
//! let mut gateway = Gateway::new(GatewayConfig::default(), Radio, Radio, Serial, Board);
//!
//! // Runtime delivers a complete frame from the serial link:
//! let handled = gateway.frame_received(&[b'!', b'C', 11])?;
//!
//! // Later, the radio reports an outcome for slot 0:
//! // gateway.transmit_done(slot, 0, 1);
//! # Ok::<(), slipgw_gateway::GatewayError>(())
//! ```

mod dispatcher;
mod tracker;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use slipgw_protocol::{Command, LinkAddr, PacketAttrs, ProtocolError, LINK_ADDR_SIZE};

pub use dispatcher::Gateway;
pub use tracker::{PendingTable, Slot};

// ============================================================================
// Error Types
// ============================================================================

/// Errors for commands that were recognized but aborted before any side
/// effect. Unrecognized or malformed frames are not errors; the dispatcher
/// reports those as "not handled".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The attribute block of a send command failed to parse.
    #[error("packet attributes rejected: {0}")]
    BadAttributes(#[source] ProtocolError),

    /// Every tracker slot already holds an unconfirmed send.
    #[error("no free slot for outgoing packet: {capacity} sends in flight")]
    PendingFull {
        /// The tracker capacity.
        capacity: usize,
    },

    /// The packet body exceeds the transmit buffer and the gateway is
    /// configured to reject rather than truncate.
    #[error("payload of {actual} bytes exceeds transmit capacity of {max}")]
    PayloadTooLarge {
        /// Configured transmit buffer capacity.
        max: usize,
        /// Actual body length.
        actual: usize,
    },
}

// ============================================================================
// Collaborator Traits
// ============================================================================

/// Get/set access to the radio's named parameters.
///
/// The gateway never caches these values; every query reads through to the
/// store, and every set writes through immediately.
pub trait RadioParamStore {
    /// Set the 16-bit PAN identifier.
    fn set_pan_id(&mut self, pan_id: u16);

    /// Set the radio channel.
    fn set_channel(&mut self, channel: u8);

    /// Set the radio's 64-bit link address.
    fn set_address(&mut self, addr: LinkAddr);

    /// Read the current PAN identifier.
    fn pan_id(&self) -> u16;

    /// Read the current radio channel.
    fn channel(&self) -> u8;
}

/// Hands payloads to the radio for transmission.
///
/// Submission is fire-and-forget from the gateway's point of view: the
/// runtime must later deliver the outcome for `slot` to
/// [`Gateway::transmit_done`], exactly once per submission.
pub trait TransmitService {
    /// Transmit `payload` to `dest` (all-zero for broadcast), applying the
    /// given per-packet attributes.
    fn transmit(&mut self, slot: Slot, dest: LinkAddr, attrs: &PacketAttrs, payload: &[u8]);
}

/// Accepts complete reply frames for the serial link.
///
/// The framing layer (byte escaping, delimiters) is behind this trait.
pub trait FrameSink {
    /// Send one complete frame to the host.
    fn send_frame(&mut self, frame: &[u8]);
}

/// Platform-level operations.
pub trait Platform {
    /// Restart the device. Does not return control in a real deployment;
    /// test implementations may simply record the call.
    fn reboot(&mut self);
}

// ============================================================================
// Configuration
// ============================================================================

/// What to do with a send whose body exceeds the transmit buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayloadPolicy {
    /// Forward the first `max_payload` bytes and drop the rest. The data
    /// loss is the host's problem.
    #[default]
    Truncate,
    /// Abort the command with [`GatewayError::PayloadTooLarge`] before any
    /// side effect.
    Reject,
}

/// The set of commands a gateway instance accepts.
///
/// Command subsets that used to be fixed per hardware target are plain
/// runtime data here, so one binary can be exercised against every subset.
/// A command outside the set is reported as unrecognized, exactly like an
/// unknown opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSet {
    /// Send-packet directive.
    pub send: bool,
    /// Reboot directive.
    pub reboot: bool,
    /// Set-PAN-id directive.
    pub set_pan_id: bool,
    /// Set-channel directive.
    pub set_channel: bool,
    /// Set-address directive.
    pub set_address: bool,
    /// Address query.
    pub query_address: bool,
    /// PAN-id query.
    pub query_pan_id: bool,
    /// Channel query.
    pub query_channel: bool,
}

impl CommandSet {
    /// Every command enabled.
    pub fn full() -> Self {
        CommandSet {
            send: true,
            reboot: true,
            set_pan_id: true,
            set_channel: true,
            set_address: true,
            query_address: true,
            query_pan_id: true,
            query_channel: true,
        }
    }

    /// Send and reboot only - radios whose parameters are fixed at build
    /// time and queried out of band.
    pub fn minimal() -> Self {
        CommandSet {
            send: true,
            reboot: true,
            set_pan_id: false,
            set_channel: false,
            set_address: false,
            query_address: true,
            query_pan_id: false,
            query_channel: false,
        }
    }

    /// Whether this set accepts the given command.
    pub fn allows(&self, command: &Command) -> bool {
        match command {
            Command::SendPacket { .. } => self.send,
            Command::Reboot => self.reboot,
            Command::SetPanId { .. } => self.set_pan_id,
            Command::SetChannel { .. } => self.set_channel,
            Command::SetAddress { .. } => self.set_address,
            Command::QueryAddress => self.query_address,
            Command::QueryPanId => self.query_pan_id,
            Command::QueryChannel => self.query_channel,
        }
    }
}

impl Default for CommandSet {
    fn default() -> Self {
        CommandSet::full()
    }
}

/// Gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Initial network-layer link address.
    pub local_addr: [u8; LINK_ADDR_SIZE],
    /// Transmit buffer capacity in bytes.
    pub max_payload: usize,
    /// What to do with oversize send bodies.
    pub payload_policy: PayloadPolicy,
    /// Number of sends that may be awaiting confirmation at once.
    pub pending_capacity: usize,
    /// Whether send frames carry a packet attribute block.
    pub send_attributes: bool,
    /// The accepted command set.
    pub commands: CommandSet,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            local_addr: [0u8; LINK_ADDR_SIZE],
            max_payload: 128,
            payload_policy: PayloadPolicy::default(),
            pending_capacity: 16,
            send_attributes: true,
            commands: CommandSet::full(),
        }
    }
}
