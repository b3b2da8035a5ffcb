//! Replies sent from the gateway to the host.
//!
//! Query replies reuse the query's opcode under the `'!'` marker, so the
//! host can match them positionally. The transmission-result reply is the
//! one asynchronous frame in the protocol: it is emitted whenever the radio
//! reports the outcome of an earlier send, and may interleave with replies
//! to later commands.

use bytes::BufMut;

use crate::constants::*;
use crate::error::ProtocolError;
use crate::types::LinkAddr;

/// Replies that the gateway can send to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    /// Current link address (reply to an address query).
    Address {
        /// The gateway's link address.
        addr: LinkAddr,
    },

    /// Current PAN identifier (reply to a PAN-id query).
    PanId {
        /// The PAN identifier.
        pan_id: u16,
    },

    /// Current radio channel (reply to a channel query).
    Channel {
        /// The channel number.
        channel: u8,
    },

    /// Asynchronous transmission result for an earlier send command.
    TxResult {
        /// The sequence identifier from the send command, echoed verbatim.
        seq_id: u8,
        /// Transmission status reported by the radio (0 = success).
        status: u8,
        /// Number of transmission attempts.
        transmissions: u8,
    },
}

impl Reply {
    /// Get the opcode byte for this reply.
    pub fn opcode(&self) -> u8 {
        match self {
            Reply::Address { .. } => OP_ADDRESS,
            Reply::PanId { .. } => OP_PAN_ID,
            Reply::Channel { .. } => OP_CHANNEL,
            Reply::TxResult { .. } => OP_REBOOT,
        }
    }

    /// Encode the reply to a frame.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(REPLY_ADDRESS_LEN);
        buf.push(MARKER_DIRECTIVE);
        buf.push(self.opcode());

        match self {
            Reply::Address { addr } => {
                buf.extend_from_slice(addr.as_bytes());
            }

            Reply::PanId { pan_id } => {
                buf.put_u16_le(*pan_id);
            }

            Reply::Channel { channel } => {
                buf.push(*channel);
            }

            Reply::TxResult {
                seq_id,
                status,
                transmissions,
            } => {
                buf.push(*seq_id);
                buf.push(*status);
                buf.push(*transmissions);
            }
        }

        buf
    }

    /// Decode a reply from a frame (the host side of the link).
    pub fn decode(frame: &[u8]) -> Result<Self, ProtocolError> {
        if frame.len() < 2 {
            return Err(ProtocolError::FrameTooShort {
                expected: 2,
                actual: frame.len(),
            });
        }
        if frame[0] != MARKER_DIRECTIVE {
            return Err(ProtocolError::UnknownMarker(frame[0]));
        }

        match frame[1] {
            OP_ADDRESS => {
                if frame.len() < REPLY_ADDRESS_LEN {
                    return Err(ProtocolError::FrameTooShort {
                        expected: REPLY_ADDRESS_LEN,
                        actual: frame.len(),
                    });
                }
                let mut addr = [0u8; LINK_ADDR_SIZE];
                addr.copy_from_slice(&frame[2..2 + LINK_ADDR_SIZE]);
                Ok(Reply::Address {
                    addr: LinkAddr::new(addr),
                })
            }

            OP_PAN_ID => {
                if frame.len() < REPLY_PAN_ID_LEN {
                    return Err(ProtocolError::FrameTooShort {
                        expected: REPLY_PAN_ID_LEN,
                        actual: frame.len(),
                    });
                }
                Ok(Reply::PanId {
                    pan_id: u16::from_le_bytes([frame[2], frame[3]]),
                })
            }

            OP_CHANNEL => {
                if frame.len() < REPLY_CHANNEL_LEN {
                    return Err(ProtocolError::FrameTooShort {
                        expected: REPLY_CHANNEL_LEN,
                        actual: frame.len(),
                    });
                }
                Ok(Reply::Channel { channel: frame[2] })
            }

            OP_REBOOT => {
                if frame.len() < REPLY_TX_RESULT_LEN {
                    return Err(ProtocolError::FrameTooShort {
                        expected: REPLY_TX_RESULT_LEN,
                        actual: frame.len(),
                    });
                }
                Ok(Reply::TxResult {
                    seq_id: frame[2],
                    status: frame[3],
                    transmissions: frame[4],
                })
            }

            code => Err(ProtocolError::UnknownReply(code)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_address() {
        let reply = Reply::Address {
            addr: LinkAddr::new([1, 2, 3, 4, 5, 6, 7, 8]),
        };
        assert_eq!(reply.encode(), vec![b'!', b'M', 1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_encode_pan_id_little_endian() {
        let reply = Reply::PanId { pan_id: 0xABCD };
        assert_eq!(reply.encode(), vec![b'!', b'P', 0xCD, 0xAB]);
    }

    #[test]
    fn test_encode_channel() {
        assert_eq!(
            Reply::Channel { channel: 0x0B }.encode(),
            vec![b'!', b'C', 0x0B]
        );
    }

    #[test]
    fn test_encode_tx_result() {
        let reply = Reply::TxResult {
            seq_id: 0x05,
            status: 0x00,
            transmissions: 0x01,
        };
        assert_eq!(reply.encode(), vec![b'!', b'R', 0x05, 0x00, 0x01]);
    }

    #[test]
    fn test_decode_tx_result() {
        let reply = Reply::decode(&[b'!', b'R', 7, 2, 3]).unwrap();
        assert_eq!(
            reply,
            Reply::TxResult {
                seq_id: 7,
                status: 2,
                transmissions: 3,
            }
        );
    }

    #[test]
    fn test_decode_rejects_short_and_unknown() {
        assert!(matches!(
            Reply::decode(&[b'!']),
            Err(ProtocolError::FrameTooShort { .. })
        ));
        assert!(matches!(
            Reply::decode(&[b'?', b'C', 1]),
            Err(ProtocolError::UnknownMarker(b'?'))
        ));
        assert!(matches!(
            Reply::decode(&[b'!', b'Z']),
            Err(ProtocolError::UnknownReply(b'Z'))
        ));
        assert!(matches!(
            Reply::decode(&[b'!', b'R', 1, 2]),
            Err(ProtocolError::FrameTooShort { expected: 5, .. })
        ));
    }
}
