// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Frame parser for the UART bridge.
//!
//! A serial link has no packet boundaries, so each frame is wrapped as
//!
//! ```text
//! START_BYTE | identifier | length | payload[length] | checksum
//! ```
//!
//! where `checksum` is the wrapping sum of `identifier`, `length` and every payload byte. The
//! parser resyncs on the next start byte after a checksum failure.

use heapless::Vec;

use crate::error::{raise, Error};
use crate::protocol::frame::Frame;

/// Sync byte for the stream framing.
pub const START_BYTE: u8 = 0xA5;

/// Longest payload a stream frame can carry (the length field is one byte).
pub const MAX_STREAM_PAYLOAD: usize = u8::MAX as usize;

/// Encoded stream frame.
pub type StreamBuf = Vec<u8, { MAX_STREAM_PAYLOAD + 4 }>;

enum State {
    WaitStart,
    WaitId,
    WaitLen { id: u8 },
    Payload { id: u8, len: usize },
    WaitChecksum { id: u8 },
}

pub struct StreamParser {
    state: State,
    checksum: u8,
    payload: Vec<u8, MAX_STREAM_PAYLOAD>,
    /// Frames dropped for a bad checksum since creation.
    dropped: u32,
}

impl StreamParser {
    pub const fn new() -> Self {
        Self {
            state: State::WaitStart,
            checksum: 0,
            payload: Vec::new(),
            dropped: 0,
        }
    }

    /// Number of frames discarded because their checksum did not match.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Process a single incoming byte. Returns `Some(Frame)` when a complete, valid frame has
    /// been received; the frame borrows the parser until the next call.
    pub fn push(&mut self, byte: u8) -> Option<Frame<'_>> {
        match self.state {
            State::WaitStart => {
                if byte == START_BYTE {
                    self.state = State::WaitId;
                    self.checksum = 0;
                    self.payload.clear();
                }
            }
            State::WaitId => {
                self.checksum = self.checksum.wrapping_add(byte);
                self.state = State::WaitLen { id: byte };
            }
            State::WaitLen { id } => {
                self.checksum = self.checksum.wrapping_add(byte);
                self.state = match byte as usize {
                    0 => State::WaitChecksum { id },
                    len => State::Payload { id, len },
                };
            }
            State::Payload { id, len } => {
                self.checksum = self.checksum.wrapping_add(byte);
                // Capacity equals the largest length the header can announce.
                let _ = self.payload.push(byte);
                if self.payload.len() == len {
                    self.state = State::WaitChecksum { id };
                }
            }
            State::WaitChecksum { id } => {
                self.state = State::WaitStart; // Reset for next frame

                if byte == self.checksum {
                    return Some(Frame {
                        identifier: id,
                        payload: &self.payload,
                    });
                }
                self.dropped = self.dropped.wrapping_add(1);
            }
        }
        None
    }
}

impl Default for StreamParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrap a frame for the UART bridge.
pub fn encode_stream(frame: &Frame<'_>) -> Result<StreamBuf, Error> {
    let len = frame.payload.len();
    if len > MAX_STREAM_PAYLOAD {
        return Err(raise(Error::BufferTooSmall {
            needed: len,
            available: MAX_STREAM_PAYLOAD,
        }));
    }

    let checksum = frame
        .payload
        .iter()
        .fold(frame.identifier.wrapping_add(len as u8), |acc, &b| {
            acc.wrapping_add(b)
        });

    // Fits: 3 header bytes + at most MAX_STREAM_PAYLOAD + checksum.
    let mut buf = StreamBuf::new();
    let _ = buf.extend_from_slice(&[START_BYTE, frame.identifier, len as u8]);
    let _ = buf.extend_from_slice(frame.payload);
    let _ = buf.push(checksum);
    Ok(buf)
}

#[cfg(all(test, not(feature = "fail-fast")))]
mod tests {
    use super::*;

    fn feed(parser: &mut StreamParser, bytes: &[u8]) -> std::vec::Vec<(u8, std::vec::Vec<u8>)> {
        let mut frames = std::vec::Vec::new();
        for &b in bytes {
            if let Some(frame) = parser.push(b) {
                frames.push((frame.identifier, frame.payload.to_vec()));
            }
        }
        frames
    }

    #[test]
    fn encodes_header_and_checksum() {
        let frame = Frame {
            identifier: 2,
            payload: &[0x80, 0x00, 0x7F],
        };
        let buf = encode_stream(&frame).unwrap();
        // 2 + 3 + 0x80 + 0x00 + 0x7F = 0x104 -> 0x04
        assert_eq!(buf.as_slice(), &[START_BYTE, 2, 3, 0x80, 0x00, 0x7F, 0x04]);
    }

    #[test]
    fn parses_encoded_frames() {
        let mut parser = StreamParser::new();
        let a = encode_stream(&Frame {
            identifier: 1,
            payload: &[90, 90, 45, 135],
        })
        .unwrap();
        let b = encode_stream(&Frame {
            identifier: 0xFF,
            payload: &[1],
        })
        .unwrap();

        let mut bytes = std::vec::Vec::new();
        bytes.extend_from_slice(&a);
        bytes.extend_from_slice(&b);

        let frames = feed(&mut parser, &bytes);
        assert_eq!(frames, [(1, vec![90, 90, 45, 135]), (0xFF, vec![1])]);
        assert_eq!(parser.dropped(), 0);
    }

    #[test]
    fn skips_noise_before_start() {
        let mut parser = StreamParser::new();
        let frame = encode_stream(&Frame {
            identifier: 3,
            payload: &[1, 2, 3],
        })
        .unwrap();

        let mut bytes = vec![0x00, 0x13, 0x37];
        bytes.extend_from_slice(&frame);
        assert_eq!(feed(&mut parser, &bytes), [(3, vec![1, 2, 3])]);
    }

    #[test]
    fn drops_bad_checksum_and_resyncs() {
        let mut parser = StreamParser::new();
        let good = encode_stream(&Frame {
            identifier: 2,
            payload: &[5, 6],
        })
        .unwrap();
        let mut bad = good.clone();
        let last = bad.len() - 1;
        bad[last] ^= 0xFF;

        let mut bytes = bad.to_vec();
        bytes.extend_from_slice(&good);
        assert_eq!(feed(&mut parser, &bytes), [(2, vec![5, 6])]);
        assert_eq!(parser.dropped(), 1);
    }

    #[test]
    fn empty_payload() {
        let mut parser = StreamParser::new();
        let buf = encode_stream(&Frame {
            identifier: 9,
            payload: &[],
        })
        .unwrap();
        assert_eq!(buf.as_slice(), &[START_BYTE, 9, 0, 9]);
        assert_eq!(feed(&mut parser, &buf), [(9, vec![])]);
    }

    #[test]
    fn rejects_oversize_payload() {
        let payload = [0u8; MAX_STREAM_PAYLOAD + 1];
        let err = encode_stream(&Frame {
            identifier: 1,
            payload: &payload,
        })
        .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::CapacityExceeded);
    }
}
