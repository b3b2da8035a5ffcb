//! Protocol error types.

use thiserror::Error;

/// Errors that can occur when working with the gateway protocol.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Frame is too short for its declared opcode.
    #[error("frame too short: expected at least {expected} bytes, got {actual}")]
    FrameTooShort {
        /// Expected minimum length.
        expected: usize,
        /// Actual length received.
        actual: usize,
    },

    /// Frame is longer than the exact length its opcode requires.
    #[error("frame too long: expected {expected} bytes, got {actual}")]
    FrameTooLong {
        /// Expected exact length.
        expected: usize,
        /// Actual length received.
        actual: usize,
    },

    /// Unknown marker byte.
    #[error("unknown frame marker: 0x{0:02X}")]
    UnknownMarker(u8),

    /// Unknown marker/opcode combination.
    #[error("unknown command: marker '{}' opcode 0x{opcode:02X}", *marker as char)]
    UnknownCommand {
        /// The marker byte.
        marker: u8,
        /// The opcode byte.
        opcode: u8,
    },

    /// Unknown reply opcode.
    #[error("unknown reply opcode: 0x{0:02X}")]
    UnknownReply(u8),

    /// Packet attribute block failed to parse.
    #[error("invalid packet attributes: {0}")]
    InvalidAttributes(String),
}
