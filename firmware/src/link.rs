// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! UART bridge carrying record frames to and from the host.

use quadken::protocol::{encode_stream, Frame, StreamParser};
use quadken::Error;
use stm32f7xx_hal::serial::Instance;

use crate::hw::Usart;

pub struct Link<U: Instance> {
    usart: Usart<U>,
    parser: StreamParser,
}

impl<U: Instance> Link<U> {
    pub fn new(usart: Usart<U>) -> Self {
        Self {
            usart,
            parser: StreamParser::new(),
        }
    }

    /// Drain all waiting bytes, calling `on_frame` for each complete frame.
    pub fn poll(&mut self, mut on_frame: impl FnMut(Frame<'_>)) {
        while let Some(b) = self.usart.read_byte() {
            if let Some(frame) = self.parser.push(b) {
                on_frame(frame);
            }
        }
    }

    /// Send a datagram frame (identifier byte + packed record) over the bridge.
    pub fn send(&mut self, datagram: &[u8]) -> Result<(), Error> {
        let frame = Frame::parse(datagram)?;
        let wire = encode_stream(&frame)?;
        self.usart.write_bytes(&wire);
        self.usart.flush();
        Ok(())
    }

    /// Frames discarded for a bad checksum.
    pub fn dropped(&self) -> u32 {
        self.parser.dropped()
    }
}
