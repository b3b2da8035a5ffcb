//! Packet attribute blocks.
//!
//! A send frame may carry a serialized set of per-packet attributes between
//! the destination address and the packet body (transmit power, max
//! retransmissions, and similar hints for the MAC layer). The wire format
//! is one count byte followed by one 3-byte entry per attribute:
//!
//! ```text
//! +-------+----+----------+----------+----+----------+----------+---
//! | count | id | value_hi | value_lo | id | value_hi | value_lo | ...
//! +-------+----+----------+----------+----+----------+----------+---
//! ```
//!
//! Attribute values are 16-bit, big-endian. Attribute ids are opaque to the
//! gateway; they are forwarded to the transmit service as-is.

use crate::constants::MAX_PACKET_ATTRS;
use crate::error::ProtocolError;

/// A parsed set of packet attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PacketAttrs {
    entries: Vec<(u8, u16)>,
}

impl PacketAttrs {
    /// Create an empty attribute set.
    pub fn new() -> Self {
        PacketAttrs {
            entries: Vec::new(),
        }
    }

    /// Add an attribute. Later entries for the same id shadow earlier ones.
    pub fn set(&mut self, id: u8, value: u16) {
        self.entries.push((id, value));
    }

    /// Look up an attribute value by id.
    pub fn get(&self, id: u8) -> Option<u16> {
        self.entries
            .iter()
            .rev()
            .find(|(i, _)| *i == id)
            .map(|(_, v)| *v)
    }

    /// Number of entries in the set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(id, value)` entries in wire order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u16)> + '_ {
        self.entries.iter().copied()
    }

    /// Deserialize an attribute block from the front of `data`.
    ///
    /// Returns the parsed set and the number of bytes consumed. Fails
    /// without a partial result if the block is truncated, the count
    /// exceeds [`MAX_PACKET_ATTRS`], or an id is out of range.
    pub fn deserialize(data: &[u8]) -> Result<(Self, usize), ProtocolError> {
        if data.is_empty() {
            return Err(ProtocolError::InvalidAttributes(
                "missing count byte".to_string(),
            ));
        }

        let count = data[0] as usize;
        if count > MAX_PACKET_ATTRS {
            return Err(ProtocolError::InvalidAttributes(format!(
                "attribute count {} exceeds maximum {}",
                count, MAX_PACKET_ATTRS
            )));
        }

        let needed = 1 + count * 3;
        if data.len() < needed {
            return Err(ProtocolError::InvalidAttributes(format!(
                "truncated block: {} entries need {} bytes, got {}",
                count,
                needed,
                data.len()
            )));
        }

        let mut attrs = PacketAttrs::new();
        let mut pos = 1;
        for _ in 0..count {
            let id = data[pos];
            if id as usize >= MAX_PACKET_ATTRS {
                return Err(ProtocolError::InvalidAttributes(format!(
                    "attribute id {} out of range",
                    id
                )));
            }
            let value = u16::from_be_bytes([data[pos + 1], data[pos + 2]]);
            attrs.set(id, value);
            pos += 3;
        }

        Ok((attrs, pos))
    }

    /// Serialize the attribute block (the host side of the link).
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(1 + self.entries.len() * 3);
        buf.push(self.entries.len() as u8);
        for (id, value) in &self.entries {
            buf.push(*id);
            buf.extend_from_slice(&value.to_be_bytes());
        }
        buf
    }
}
