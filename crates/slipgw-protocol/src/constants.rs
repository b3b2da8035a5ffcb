//! Protocol constants
//!
//! These constants define the marker bytes, opcodes, and frame lengths used
//! in the slipgw serial command protocol. Opcodes double as mnemonics; every
//! settable parameter has a matching queryable counterpart.

// ============================================================================
// Markers (first frame byte)
// ============================================================================

/// Directive frame - the host asks the gateway to act.
pub const MARKER_DIRECTIVE: u8 = b'!';
/// Query frame - the host asks the gateway for a parameter value.
pub const MARKER_QUERY: u8 = b'?';

// ============================================================================
// Opcodes (second frame byte)
// ============================================================================

/// Send a packet over the radio.
pub const OP_SEND: u8 = b'S';
/// Reboot the gateway. Also the reply opcode for a transmission confirmation.
pub const OP_REBOOT: u8 = b'R';
/// Set or query the 16-bit PAN identifier.
pub const OP_PAN_ID: u8 = b'P';
/// Set or query the radio channel.
pub const OP_CHANNEL: u8 = b'C';
/// Set or query the 8-byte link address.
pub const OP_ADDRESS: u8 = b'M';

// ============================================================================
// Sizes
// ============================================================================

/// Size of a link address in bytes.
pub const LINK_ADDR_SIZE: usize = 8;
/// Maximum number of entries in a packet attribute block.
pub const MAX_PACKET_ATTRS: usize = 32;

// ============================================================================
// Frame Lengths
// ============================================================================

/// Minimum length of a send frame: marker, opcode, sequence id, address.
pub const SEND_MIN_LEN: usize = 3 + LINK_ADDR_SIZE;
/// Exact length of a reboot frame.
pub const REBOOT_LEN: usize = 2;
/// Exact length of a set-PAN-id frame.
pub const SET_PAN_ID_LEN: usize = 4;
/// Exact length of a set-channel frame.
pub const SET_CHANNEL_LEN: usize = 3;
/// Exact length of a set-address frame.
pub const SET_ADDRESS_LEN: usize = 2 + LINK_ADDR_SIZE;
/// Exact length of every query frame (marker + opcode).
pub const QUERY_LEN: usize = 2;

/// Length of an address reply frame.
pub const REPLY_ADDRESS_LEN: usize = 2 + LINK_ADDR_SIZE;
/// Length of a PAN-id reply frame.
pub const REPLY_PAN_ID_LEN: usize = 4;
/// Length of a channel reply frame.
pub const REPLY_CHANNEL_LEN: usize = 3;
/// Length of a transmission-result reply frame.
pub const REPLY_TX_RESULT_LEN: usize = 5;
