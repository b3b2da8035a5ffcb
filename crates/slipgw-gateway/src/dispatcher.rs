//! Command frame dispatch.
//!
//! One call to [`Gateway::frame_received`] per complete inbound frame: the
//! frame is classified, validated, and exactly one action runs to
//! completion. Queries answer immediately through the frame sink; sends
//! return as soon as the radio accepts the payload, and their confirmation
//! frame is emitted later from [`Gateway::transmit_done`].

use slipgw_protocol::{Command, LinkAddr, PacketAttrs, ProtocolError, Reply};

use crate::tracker::{PendingTable, Slot};
use crate::{
    FrameSink, GatewayConfig, GatewayError, PayloadPolicy, Platform, RadioParamStore,
    TransmitService,
};

/// The gateway core: dispatcher, outgoing packet tracker, and confirmation
/// emission, bound to the four platform collaborators.
pub struct Gateway<R, T, S, P> {
    config: GatewayConfig,
    /// The network-layer link address, reported by address queries and
    /// updated by the set-address command.
    local_addr: LinkAddr,
    pending: PendingTable,
    params: R,
    radio: T,
    sink: S,
    platform: P,
}

impl<R, T, S, P> Gateway<R, T, S, P>
where
    R: RadioParamStore,
    T: TransmitService,
    S: FrameSink,
    P: Platform,
{
    /// Create a gateway from its configuration and collaborators.
    pub fn new(config: GatewayConfig, params: R, radio: T, sink: S, platform: P) -> Self {
        let local_addr = LinkAddr::new(config.local_addr);
        let pending = PendingTable::new(config.pending_capacity);
        Gateway {
            config,
            local_addr,
            pending,
            params,
            radio,
            sink,
            platform,
        }
    }

    /// Handle one complete inbound frame.
    ///
    /// Returns `Ok(true)` when the frame was recognized and its action ran,
    /// `Ok(false)` when it was not recognized (unknown marker or opcode,
    /// length violation, or a command outside the configured command set) -
    /// the caller may log or count those. `Err` is reserved for commands
    /// that were recognized but aborted before any side effect.
    pub fn frame_received(&mut self, frame: &[u8]) -> Result<bool, GatewayError> {
        let command = match Command::decode(frame, self.config.send_attributes) {
            Ok(command) => command,
            Err(err @ ProtocolError::InvalidAttributes(_)) => {
                log::warn!("send command aborted: {}", err);
                return Err(GatewayError::BadAttributes(err));
            }
            Err(err) => {
                log::debug!("ignoring frame of {} bytes: {}", frame.len(), err);
                return Ok(false);
            }
        };

        if !self.config.commands.allows(&command) {
            log::debug!(
                "command '{}' not in this gateway's command set",
                command.opcode() as char
            );
            return Ok(false);
        }

        match command {
            Command::SendPacket {
                seq_id,
                dest,
                attrs,
                body,
            } => {
                self.send_packet(seq_id, dest, attrs, body)?;
            }

            Command::Reboot => {
                log::warn!("reboot requested by host");
                self.platform.reboot();
                // No reply is possible past this point.
            }

            Command::SetPanId { pan_id } => {
                log::debug!("setting pan id 0x{:04X}", pan_id);
                self.params.set_pan_id(pan_id);
            }

            Command::SetChannel { channel } => {
                log::debug!("setting channel {}", channel);
                self.params.set_channel(channel);
            }

            Command::SetAddress { addr } => {
                log::debug!("setting link address {}", addr.to_hex());
                self.params.set_address(addr);
                self.local_addr = addr;
            }

            Command::QueryAddress => {
                self.send_reply(Reply::Address {
                    addr: self.local_addr,
                });
            }

            Command::QueryPanId => {
                let pan_id = self.params.pan_id();
                self.send_reply(Reply::PanId { pan_id });
            }

            Command::QueryChannel => {
                let channel = self.params.channel();
                self.send_reply(Reply::Channel { channel });
            }
        }

        Ok(true)
    }

    /// Handle the radio's completion callback for an earlier send.
    ///
    /// Resolves the slot back to the host's sequence identifier and emits
    /// the transmission-result frame. A slot with nothing in flight is a
    /// contract violation by the transmit service; it is logged and
    /// dropped without emitting anything.
    pub fn transmit_done(&mut self, slot: Slot, status: u8, transmissions: u8) {
        match self.pending.complete(slot) {
            Some(seq_id) => {
                log::debug!(
                    "packet sent: sid {}, status {}, tx {}",
                    seq_id,
                    status,
                    transmissions
                );
                self.send_reply(Reply::TxResult {
                    seq_id,
                    status,
                    transmissions,
                });
            }
            None => {
                log::warn!("transmit callback for empty slot {}", slot.index());
            }
        }
    }

    /// Register a send and hand it to the radio.
    fn send_packet(
        &mut self,
        seq_id: u8,
        dest: LinkAddr,
        attrs: PacketAttrs,
        mut body: Vec<u8>,
    ) -> Result<(), GatewayError> {
        if body.len() > self.config.max_payload {
            match self.config.payload_policy {
                PayloadPolicy::Truncate => {
                    log::warn!(
                        "truncating {}-byte payload to {} bytes",
                        body.len(),
                        self.config.max_payload
                    );
                    body.truncate(self.config.max_payload);
                }
                PayloadPolicy::Reject => {
                    return Err(GatewayError::PayloadTooLarge {
                        max: self.config.max_payload,
                        actual: body.len(),
                    });
                }
            }
        }

        let slot = self.pending.register(seq_id)?;
        log::debug!(
            "sending sid {} ({} bytes) in slot {}",
            seq_id,
            body.len(),
            slot.index()
        );
        self.radio.transmit(slot, dest, &attrs, &body);
        Ok(())
    }

    fn send_reply(&mut self, reply: Reply) {
        self.sink.send_frame(&reply.encode());
    }

    /// The current network-layer link address.
    pub fn local_addr(&self) -> LinkAddr {
        self.local_addr
    }

    /// The gateway configuration.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// The outgoing packet table.
    pub fn pending(&self) -> &PendingTable {
        &self.pending
    }

    /// Access the radio parameter store.
    pub fn param_store(&self) -> &R {
        &self.params
    }

    /// Access the transmit service.
    pub fn transmit_service(&self) -> &T {
        &self.radio
    }

    /// Access the frame sink.
    pub fn frame_sink(&self) -> &S {
        &self.sink
    }

    /// Access the platform.
    pub fn platform(&self) -> &P {
        &self.platform
    }
}
