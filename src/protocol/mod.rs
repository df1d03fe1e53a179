// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Wire framing for records.
//!
//! - [`frame`] - Datagram frames for BLE and ESP-NOW: one identifier byte, then the packed record.
//! - [`parser`] - Byte-stream framing for the UART bridge, with a sync byte and checksum.
//! - [`messages`] - Identifiers and config commands used by the QuadKen boards.

pub mod frame;
pub mod messages;
pub mod parser;

pub use frame::{Frame, FrameBuf, MAX_FRAME};
pub use messages::ConfigCommand;
pub use parser::{encode_stream, StreamBuf, StreamParser};
