//! Common types used in the protocol.

use crate::constants::*;

/// An 8-byte radio link address.
///
/// The all-zero address is distinguished: it means broadcast, or "no
/// specific destination".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkAddr(pub [u8; LINK_ADDR_SIZE]);

impl LinkAddr {
    /// Create a new link address from bytes.
    pub fn new(bytes: [u8; LINK_ADDR_SIZE]) -> Self {
        LinkAddr(bytes)
    }

    /// Create from a slice. Returns None if slice is wrong length.
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() == LINK_ADDR_SIZE {
            let mut bytes = [0u8; LINK_ADDR_SIZE];
            bytes.copy_from_slice(slice);
            Some(LinkAddr(bytes))
        } else {
            None
        }
    }

    /// The distinguished all-zero broadcast address.
    pub fn broadcast() -> Self {
        LinkAddr([0u8; LINK_ADDR_SIZE])
    }

    /// Whether this is the all-zero broadcast address.
    pub fn is_broadcast(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// Get the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; LINK_ADDR_SIZE] {
        &self.0
    }

    /// Get the bytes as a hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl Default for LinkAddr {
    fn default() -> Self {
        LinkAddr::broadcast()
    }
}

impl AsRef<[u8]> for LinkAddr {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
