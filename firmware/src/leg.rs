// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Reaction of a leg controller to received records.
//!
//! Actuator outputs are ignored until a [`ConfigCommand::Setup`] arrives, and released again on
//! [`ConfigCommand::Detach`] or [`ConfigCommand::Shutdown`].

use core::fmt::Write;

use quadken::actuation::{BldcOutput, ServoOutput};
use quadken::protocol::ConfigCommand;

pub struct Leg {
    attached: bool,
    servo: ServoOutput,
    bldc: BldcOutput,
}

impl Leg {
    pub fn new() -> Self {
        Self {
            attached: false,
            servo: ServoOutput::default(),
            bldc: BldcOutput::default(),
        }
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn apply_config<W: Write>(&mut self, raw: u8, log: &mut W) {
        match ConfigCommand::from_u8(raw) {
            Some(ConfigCommand::Setup) => {
                self.attached = true;
                let center = self.servo.pulse_us(ServoOutput::CENTER_DEG);
                let _ = writeln!(log, "setup: servos centered at {} us\r", center);
            }
            Some(ConfigCommand::Detach) => {
                self.attached = false;
                let _ = writeln!(log, "detach\r");
            }
            Some(ConfigCommand::Shutdown) => {
                self.attached = false;
                let _ = writeln!(log, "shutdown\r");
            }
            None => {
                let _ = writeln!(log, "unknown config command {}\r", raw);
            }
        }
    }

    pub fn apply_servos<W: Write>(&self, angles: &[u8], log: &mut W) {
        if !self.attached {
            return;
        }
        for (i, &angle) in angles.iter().enumerate() {
            let _ = writeln!(
                log,
                "servo{}: {} deg -> {} us, duty {}\r",
                i + 1,
                angle,
                self.servo.pulse_us(angle),
                self.servo.duty(angle)
            );
        }
    }

    pub fn apply_bldc<W: Write>(&self, raw: &[i8], log: &mut W) {
        if !self.attached {
            return;
        }
        for (i, &r) in raw.iter().enumerate() {
            let power = BldcOutput::power_from_raw(r);
            let _ = writeln!(
                log,
                "bldc{}: raw={}, power={:.3} -> {} us, duty {}\r",
                i + 1,
                r,
                power,
                self.bldc.pulse_us(power),
                self.bldc.duty(power)
            );
        }
    }
}

impl Default for Leg {
    fn default() -> Self {
        Self::new()
    }
}
