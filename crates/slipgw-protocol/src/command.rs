//! Commands sent from the host to the gateway.

use bytes::BufMut;

use crate::attrs::PacketAttrs;
use crate::constants::*;
use crate::error::ProtocolError;
use crate::types::LinkAddr;

/// Commands that the host can send to the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Hand a packet to the radio for transmission.
    SendPacket {
        /// Host-assigned sequence identifier, echoed back in the
        /// transmission confirmation. Opaque to the gateway.
        seq_id: u8,
        /// Destination link address (all-zero for broadcast).
        dest: LinkAddr,
        /// Per-packet attributes for the MAC layer. Empty when the link is
        /// configured without attribute blocks.
        attrs: PacketAttrs,
        /// The packet body.
        body: Vec<u8>,
    },

    /// Restart the gateway platform. No reply is possible.
    Reboot,

    /// Set the 16-bit PAN identifier.
    SetPanId {
        /// The new PAN identifier.
        pan_id: u16,
    },

    /// Set the radio channel.
    SetChannel {
        /// The new channel number.
        channel: u8,
    },

    /// Set the 8-byte link address.
    SetAddress {
        /// The new link address.
        addr: LinkAddr,
    },

    /// Query the current link address.
    QueryAddress,

    /// Query the current PAN identifier.
    QueryPanId,

    /// Query the current radio channel.
    QueryChannel,
}

/// Check an exact-length precondition.
fn expect_len(frame: &[u8], expected: usize) -> Result<(), ProtocolError> {
    if frame.len() < expected {
        Err(ProtocolError::FrameTooShort {
            expected,
            actual: frame.len(),
        })
    } else if frame.len() > expected {
        Err(ProtocolError::FrameTooLong {
            expected,
            actual: frame.len(),
        })
    } else {
        Ok(())
    }
}

impl Command {
    /// Get the marker byte for this command.
    pub fn marker(&self) -> u8 {
        match self {
            Command::QueryAddress | Command::QueryPanId | Command::QueryChannel => MARKER_QUERY,
            _ => MARKER_DIRECTIVE,
        }
    }

    /// Get the opcode byte for this command.
    pub fn opcode(&self) -> u8 {
        match self {
            Command::SendPacket { .. } => OP_SEND,
            Command::Reboot => OP_REBOOT,
            Command::SetPanId { .. } => OP_PAN_ID,
            Command::SetChannel { .. } => OP_CHANNEL,
            Command::SetAddress { .. } => OP_ADDRESS,
            Command::QueryAddress => OP_ADDRESS,
            Command::QueryPanId => OP_PAN_ID,
            Command::QueryChannel => OP_CHANNEL,
        }
    }

    /// Decode a command from a complete inbound frame.
    ///
    /// `send_attributes` selects whether send frames carry an attribute
    /// block between the destination address and the body; both ends of the
    /// link must agree on it.
    ///
    /// Length preconditions are checked before anything else; a frame that
    /// violates them produces an error and no partial command.
    pub fn decode(frame: &[u8], send_attributes: bool) -> Result<Self, ProtocolError> {
        if frame.len() < 2 {
            return Err(ProtocolError::FrameTooShort {
                expected: 2,
                actual: frame.len(),
            });
        }

        let marker = frame[0];
        let opcode = frame[1];

        match marker {
            MARKER_DIRECTIVE => match opcode {
                OP_SEND => {
                    if frame.len() < SEND_MIN_LEN {
                        return Err(ProtocolError::FrameTooShort {
                            expected: SEND_MIN_LEN,
                            actual: frame.len(),
                        });
                    }
                    let seq_id = frame[2];
                    let mut addr = [0u8; LINK_ADDR_SIZE];
                    addr.copy_from_slice(&frame[3..3 + LINK_ADDR_SIZE]);
                    let rest = &frame[SEND_MIN_LEN..];

                    let (attrs, body) = if send_attributes {
                        let (attrs, consumed) = PacketAttrs::deserialize(rest)?;
                        (attrs, rest[consumed..].to_vec())
                    } else {
                        (PacketAttrs::new(), rest.to_vec())
                    };

                    Ok(Command::SendPacket {
                        seq_id,
                        dest: LinkAddr::new(addr),
                        attrs,
                        body,
                    })
                }

                OP_REBOOT => {
                    expect_len(frame, REBOOT_LEN)?;
                    Ok(Command::Reboot)
                }

                OP_PAN_ID => {
                    expect_len(frame, SET_PAN_ID_LEN)?;
                    let pan_id = u16::from_le_bytes([frame[2], frame[3]]);
                    Ok(Command::SetPanId { pan_id })
                }

                OP_CHANNEL => {
                    expect_len(frame, SET_CHANNEL_LEN)?;
                    Ok(Command::SetChannel { channel: frame[2] })
                }

                OP_ADDRESS => {
                    expect_len(frame, SET_ADDRESS_LEN)?;
                    let mut addr = [0u8; LINK_ADDR_SIZE];
                    addr.copy_from_slice(&frame[2..2 + LINK_ADDR_SIZE]);
                    Ok(Command::SetAddress {
                        addr: LinkAddr::new(addr),
                    })
                }

                _ => Err(ProtocolError::UnknownCommand { marker, opcode }),
            },

            MARKER_QUERY => match opcode {
                OP_ADDRESS => {
                    expect_len(frame, QUERY_LEN)?;
                    Ok(Command::QueryAddress)
                }
                OP_PAN_ID => {
                    expect_len(frame, QUERY_LEN)?;
                    Ok(Command::QueryPanId)
                }
                OP_CHANNEL => {
                    expect_len(frame, QUERY_LEN)?;
                    Ok(Command::QueryChannel)
                }
                _ => Err(ProtocolError::UnknownCommand { marker, opcode }),
            },

            _ => Err(ProtocolError::UnknownMarker(marker)),
        }
    }

    /// Encode the command to a frame (the host side of the link).
    ///
    /// `send_attributes` must match the gateway's setting; when it is off,
    /// any attributes on a [`Command::SendPacket`] are omitted.
    pub fn encode(&self, send_attributes: bool) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.push(self.marker());
        buf.push(self.opcode());

        match self {
            Command::SendPacket {
                seq_id,
                dest,
                attrs,
                body,
            } => {
                buf.push(*seq_id);
                buf.extend_from_slice(dest.as_bytes());
                if send_attributes {
                    buf.extend_from_slice(&attrs.serialize());
                }
                buf.extend_from_slice(body);
            }

            Command::Reboot => {}

            Command::SetPanId { pan_id } => {
                buf.put_u16_le(*pan_id);
            }

            Command::SetChannel { channel } => {
                buf.push(*channel);
            }

            Command::SetAddress { addr } => {
                buf.extend_from_slice(addr.as_bytes());
            }

            Command::QueryAddress | Command::QueryPanId | Command::QueryChannel => {}
        }

        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_set_channel() {
        let cmd = Command::decode(&[b'!', b'C', 0x0B], true).unwrap();
        assert_eq!(cmd, Command::SetChannel { channel: 11 });
    }

    #[test]
    fn test_decode_set_pan_id_little_endian() {
        let cmd = Command::decode(&[b'!', b'P', 0xCD, 0xAB], true).unwrap();
        assert_eq!(cmd, Command::SetPanId { pan_id: 0xABCD });
    }

    #[test]
    fn test_decode_set_address() {
        let frame = [b'!', b'M', 1, 2, 3, 4, 5, 6, 7, 8];
        let cmd = Command::decode(&frame, true).unwrap();
        assert_eq!(
            cmd,
            Command::SetAddress {
                addr: LinkAddr::new([1, 2, 3, 4, 5, 6, 7, 8]),
            }
        );
    }

    #[test]
    fn test_decode_queries() {
        assert_eq!(
            Command::decode(&[b'?', b'M'], true).unwrap(),
            Command::QueryAddress
        );
        assert_eq!(
            Command::decode(&[b'?', b'P'], true).unwrap(),
            Command::QueryPanId
        );
        assert_eq!(
            Command::decode(&[b'?', b'C'], true).unwrap(),
            Command::QueryChannel
        );
    }

    #[test]
    fn test_exact_length_enforced() {
        // Reboot frame with a trailing byte.
        assert!(matches!(
            Command::decode(&[b'!', b'R', 0], true),
            Err(ProtocolError::FrameTooLong { expected: 2, .. })
        ));
        // Set-channel frame missing its value.
        assert!(matches!(
            Command::decode(&[b'!', b'C'], true),
            Err(ProtocolError::FrameTooShort { expected: 3, .. })
        ));
        // Query with a payload.
        assert!(matches!(
            Command::decode(&[b'?', b'C', 1], true),
            Err(ProtocolError::FrameTooLong { expected: 2, .. })
        ));
    }

    #[test]
    fn test_truncated_frame_rejected() {
        assert!(matches!(
            Command::decode(&[b'!'], true),
            Err(ProtocolError::FrameTooShort { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_unknown_marker_and_opcode() {
        assert!(matches!(
            Command::decode(&[b'#', b'C', 1], true),
            Err(ProtocolError::UnknownMarker(b'#'))
        ));
        assert!(matches!(
            Command::decode(&[b'!', b'X'], true),
            Err(ProtocolError::UnknownCommand {
                marker: b'!',
                opcode: b'X',
            })
        ));
        // 'S' is not a valid query opcode.
        assert!(matches!(
            Command::decode(&[b'?', b'S'], true),
            Err(ProtocolError::UnknownCommand { marker: b'?', .. })
        ));
    }

    #[test]
    fn test_decode_send_with_attributes() {
        let mut frame = vec![b'!', b'S', 0x05];
        frame.extend_from_slice(&[0u8; 8]); // broadcast
        frame.extend_from_slice(&[1, 2, 0x00, 0x07]); // one attribute: (2, 7)
        frame.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);

        let cmd = Command::decode(&frame, true).unwrap();
        match cmd {
            Command::SendPacket {
                seq_id,
                dest,
                attrs,
                body,
            } => {
                assert_eq!(seq_id, 0x05);
                assert!(dest.is_broadcast());
                assert_eq!(attrs.get(2), Some(7));
                assert_eq!(body, vec![0xDE, 0xAD, 0xBE, 0xEF]);
            }
            other => panic!("expected SendPacket, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_send_without_attributes() {
        let mut frame = vec![b'!', b'S', 0x42];
        frame.extend_from_slice(&[9u8; 8]);
        frame.extend_from_slice(&[0xAA, 0xBB]);

        let cmd = Command::decode(&frame, false).unwrap();
        match cmd {
            Command::SendPacket { attrs, body, .. } => {
                assert!(attrs.is_empty());
                assert_eq!(body, vec![0xAA, 0xBB]);
            }
            other => panic!("expected SendPacket, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_send_bad_attributes() {
        let mut frame = vec![b'!', b'S', 0x05];
        frame.extend_from_slice(&[0u8; 8]);
        frame.push(3); // claims three attribute entries, provides none

        assert!(matches!(
            Command::decode(&frame, true),
            Err(ProtocolError::InvalidAttributes(_))
        ));
    }

    #[test]
    fn test_decode_send_too_short() {
        let frame = [b'!', b'S', 0x05, 1, 2, 3]; // address cut off
        assert!(matches!(
            Command::decode(&frame, true),
            Err(ProtocolError::FrameTooShort { expected: 11, .. })
        ));
    }

    #[test]
    fn test_encode_decode_send() {
        let mut attrs = PacketAttrs::new();
        attrs.set(1, 3);
        let cmd = Command::SendPacket {
            seq_id: 9,
            dest: LinkAddr::new([1, 2, 3, 4, 5, 6, 7, 8]),
            attrs,
            body: vec![0x10, 0x20],
        };
        let frame = cmd.encode(true);
        assert_eq!(frame[0], b'!');
        assert_eq!(frame[1], b'S');
        assert_eq!(Command::decode(&frame, true).unwrap(), cmd);
    }

    #[test]
    fn test_encode_set_pan_id() {
        let frame = Command::SetPanId { pan_id: 0xABCD }.encode(true);
        assert_eq!(frame, vec![b'!', b'P', 0xCD, 0xAB]);
    }
}
