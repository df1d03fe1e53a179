// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Board configuration for a QuadKen leg controller.

/// Debug terminal (USART1).
pub const DEBUG_BAUD: u32 = 115_200;

/// UART bridge to the host (USART2).
pub const LINK_BAUD: u32 = 115_200;

/// Records registered on this board.
pub const REGISTRY_CAPACITY: usize = 4;

// Record layout, shared with the host
pub const SERVO_COUNT: usize = 12;
pub const BLDC_COUNT: usize = 2;
pub const ORIENTATION_LEN: usize = 3;
pub const CONFIG_LEN: usize = 1;

/// Interval between orientation reports to the host, in milliseconds.
pub const TELEMETRY_PERIOD_MS: u32 = 100;
