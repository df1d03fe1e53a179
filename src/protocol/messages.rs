// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Record identifiers and commands shared by the QuadKen boards and the host.

// Record identifiers
pub const SERVO_ANGLES: u8 = 0x01;
pub const BLDC_POWER: u8 = 0x02;
pub const ORIENTATION: u8 = 0x03;
pub const CONFIG: u8 = 0xFF;

/// Command carried in the single `u8` of the [`CONFIG`] record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Stop everything and wait.
    Shutdown,
    /// Attach and center all actuators.
    Setup,
    /// Release all actuators.
    Detach,
}

impl ConfigCommand {
    pub fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(ConfigCommand::Shutdown),
            1 => Some(ConfigCommand::Setup),
            3 => Some(ConfigCommand::Detach),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            ConfigCommand::Shutdown => 0,
            ConfigCommand::Setup => 1,
            ConfigCommand::Detach => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_codes() {
        for cmd in [
            ConfigCommand::Shutdown,
            ConfigCommand::Setup,
            ConfigCommand::Detach,
        ] {
            assert_eq!(ConfigCommand::from_u8(cmd.as_u8()), Some(cmd));
        }
        assert_eq!(ConfigCommand::from_u8(2), None);
        assert_eq!(ConfigCommand::from_u8(0xFF), None);
    }
}
