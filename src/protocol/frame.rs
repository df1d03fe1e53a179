// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Datagram frame: `identifier || packed record`.
//!
//! BLE characteristic writes and ESP-NOW packets are already delimited by the transport, so the
//! frame carries no length or checksum of its own.

use heapless::Vec;

use crate::error::{raise, Error};
use crate::identifier::Identifier;
use crate::record::MAX_PAYLOAD;

/// Largest datagram frame: identifier byte plus the largest packed record.
pub const MAX_FRAME: usize = MAX_PAYLOAD + 1;

/// Encoded datagram frame.
pub type FrameBuf = Vec<u8, MAX_FRAME>;

/// A frame borrowed from a receive buffer.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Frame<'a> {
    /// Raw identifier byte; 0 never matches a record.
    pub identifier: u8,
    /// Packed record image.
    pub payload: &'a [u8],
}

impl<'a> Frame<'a> {
    pub fn new(identifier: Identifier, payload: &'a [u8]) -> Self {
        Self {
            identifier: identifier.get(),
            payload,
        }
    }

    /// Split a received datagram into identifier and payload.
    pub fn parse(bytes: &'a [u8]) -> Result<Self, Error> {
        match bytes.split_first() {
            Some((&identifier, payload)) => Ok(Self {
                identifier,
                payload,
            }),
            None => Err(raise(Error::EmptyFrame)),
        }
    }

    /// Encoded length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        1 + self.payload.len()
    }

    pub fn encode(&self) -> Result<FrameBuf, Error> {
        let mut buf = FrameBuf::new();
        let too_small = || {
            raise(Error::BufferTooSmall {
                needed: self.len(),
                available: MAX_FRAME,
            })
        };
        buf.push(self.identifier).map_err(|_| too_small())?;
        buf.extend_from_slice(self.payload)
            .map_err(|_| too_small())?;
        Ok(buf)
    }
}
