//! Slipgw Serial Command Protocol
//!
//! This crate provides types and utilities for the command protocol spoken
//! between a host and a slipgw radio gateway over a serial link. Each frame
//! is a short binary message that has already been separated from the byte
//! stream by the framing layer (SLIP or similar); framing itself is out of
//! scope here.
//!
//! # Protocol Overview
//!
//! A frame starts with a one-byte marker followed by a one-byte opcode:
//!
//! - **Directives** (host → gateway): start with `'!'` and ask the gateway
//!   to act (send a packet, reboot, set a radio parameter).
//! - **Queries** (host → gateway): start with `'?'` and ask for the current
//!   value of a radio parameter.
//! - **Replies** (gateway → host): start with `'!'` and carry either a query
//!   answer or an asynchronous transmission confirmation.
//!
//! # Example
//!
//! ```rust,ignore
//! use slipgw_protocol::{Command, Reply};
//!
//! // Host side: build a set-channel directive
//! let frame = Command::SetChannel { channel: 11 }.encode(true);
//!
//! // Gateway side: classify an inbound frame
//! let cmd = Command::decode(&frame, true)?;
//! ```

mod attrs;
mod command;
mod constants;
mod error;
mod reply;
mod types;

pub use attrs::*;
pub use command::*;
pub use constants::*;
pub use error::*;
pub use reply::*;
pub use types::*;
