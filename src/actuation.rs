// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Mapping from record values to actuator pulse widths.
//!
//! The legs drive hobby servos and BLDC ESCs with 50 Hz PWM. These helpers turn the values
//! received in the [`SERVO_ANGLES`](crate::protocol::messages::SERVO_ANGLES) and
//! [`BLDC_POWER`](crate::protocol::messages::BLDC_POWER) records into on-times and timer duty
//! values. Arithmetic is integer with truncation, as the ESC calibration was done against it.

/// Linearly re-map `x` from one range to another, truncating toward zero.
///
/// An empty input range maps everything to `out_min`.
#[inline]
pub fn map_range(x: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    if in_min == in_max {
        return out_min;
    }
    let scaled = (x - in_min) as i64 * (out_max - out_min) as i64 / (in_max - in_min) as i64;
    scaled as i32 + out_min
}

/// PWM carrier: frequency and counter resolution.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PwmTiming {
    frequency_hz: u32,
    resolution_bits: u8,
}

impl PwmTiming {
    /// Standard RC timing, 50 Hz at 10-bit resolution.
    pub const RC_50HZ: PwmTiming = PwmTiming {
        frequency_hz: 50,
        resolution_bits: 10,
    };

    /// Widest counter the duty arithmetic supports.
    pub const MAX_RESOLUTION_BITS: u8 = 16;

    /// `None` unless the period is at least 1 us and the resolution is 1 to 16 bits.
    pub const fn new(frequency_hz: u32, resolution_bits: u8) -> Option<Self> {
        if frequency_hz == 0
            || frequency_hz > 1_000_000
            || resolution_bits == 0
            || resolution_bits > Self::MAX_RESOLUTION_BITS
        {
            return None;
        }
        Some(Self {
            frequency_hz,
            resolution_bits,
        })
    }

    #[inline]
    pub fn frequency_hz(&self) -> u32 {
        self.frequency_hz
    }

    #[inline]
    pub fn resolution_bits(&self) -> u8 {
        self.resolution_bits
    }

    #[inline]
    pub fn period_us(&self) -> i32 {
        (1_000_000 / self.frequency_hz) as i32
    }

    #[inline]
    pub fn max_duty(&self) -> i32 {
        (1i32 << self.resolution_bits) - 1
    }

    /// Duty value for an on-time of `us` microseconds.
    pub fn duty(&self, us: i32) -> u32 {
        map_range(us, 0, self.period_us(), 0, self.max_duty()).clamp(0, self.max_duty()) as u32
    }
}

/// BLDC ESC driven by a normalized power in [-1, 1].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BldcOutput {
    pub timing: PwmTiming,
    /// On-time at full reverse.
    pub min_us: i32,
    /// On-time at full forward.
    pub max_us: i32,
}

impl Default for BldcOutput {
    fn default() -> Self {
        Self {
            timing: PwmTiming::RC_50HZ,
            min_us: 700,
            max_us: 2000,
        }
    }
}

impl BldcOutput {
    /// Convert a raw `i8` from the BLDC record to power in [-1, 1].
    #[inline]
    pub fn power_from_raw(raw: i8) -> f32 {
        (raw as f32 / 127.0).clamp(-1.0, 1.0)
    }

    /// On-time for `power`, clamped to [-1, 1] first.
    pub fn pulse_us(&self, power: f32) -> i32 {
        let power = power.clamp(-1.0, 1.0);
        map_range((power * 1000.0) as i32, -1000, 1000, self.min_us, self.max_us)
    }

    pub fn duty(&self, power: f32) -> u32 {
        self.timing.duty(self.pulse_us(power))
    }
}

/// Hobby servo positioned by angle in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ServoOutput {
    pub timing: PwmTiming,
    /// On-time at 0°.
    pub min_us: i32,
    /// On-time at 180°.
    pub max_us: i32,
}

impl Default for ServoOutput {
    fn default() -> Self {
        Self {
            timing: PwmTiming::RC_50HZ,
            min_us: 544,
            max_us: 2400,
        }
    }
}

impl ServoOutput {
    pub const CENTER_DEG: u8 = 90;

    /// On-time for `angle_deg`, clamped to [0, 180].
    pub fn pulse_us(&self, angle_deg: u8) -> i32 {
        let angle = angle_deg.min(180) as i32;
        map_range(angle, 0, 180, self.min_us, self.max_us)
    }

    pub fn duty(&self, angle_deg: u8) -> u32 {
        self.timing.duty(self.pulse_us(angle_deg))
    }
}
