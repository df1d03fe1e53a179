// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! QuadKen leg controller.
//!
//! Receives servo, BLDC and config records from the host over the UART bridge, routes them into
//! the record registry by identifier, and acknowledges each config command by echoing the config
//! record back. The orientation record is reported to the host every
//! [`config::TELEMETRY_PERIOD_MS`].

#![no_main]
#![no_std]

use core::fmt::Write;

use cortex_m::interrupt;
use cortex_m::peripheral::syst::SystClkSource;
use cortex_m_rt::entry;
use panic_halt as _;

use hal::{
    pac,
    prelude::*,
    serial::{Config, Serial},
};
use stm32f7xx_hal as hal;

use quadken::protocol::messages::{BLDC_POWER, CONFIG, ORIENTATION, SERVO_ANGLES};
use quadken::SharedRegistry;

mod config;
mod hw;
mod leg;
mod link;

use hw::Usart;
use leg::Leg;
use link::Link;

static REGISTRY: SharedRegistry<{ config::REGISTRY_CAPACITY }> = SharedRegistry::new();

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();

    // SysTick as a free-running 1 ms tick
    let mut syst = cp.SYST;
    syst.set_clock_source(SystClkSource::Core);
    syst.set_reload(clocks.sysclk().raw() / 1_000 - 1);
    syst.clear_current();
    syst.enable_counter();

    // GPIO
    let gpioa = dp.GPIOA.split();
    let gpiod = dp.GPIOD.split();

    // USART1 (DBG)
    let tx = gpioa.pa9.into_alternate::<7>();
    let rx = gpioa.pa10.into_alternate::<7>();
    let dbg_cfg = Config {
        baud_rate: config::DEBUG_BAUD.bps(),
        ..Default::default()
    };
    let mut dbg = Usart::new(Serial::new(dp.USART1, (tx, rx), &clocks, dbg_cfg));

    // USART2 (link)
    let tx = gpiod.pd5.into_alternate::<7>();
    let rx = gpiod.pd6.into_alternate::<7>();
    let link_cfg = Config {
        baud_rate: config::LINK_BAUD.bps(),
        ..Default::default()
    };
    let mut link = Link::new(Usart::new(Serial::new(dp.USART2, (tx, rx), &clocks, link_cfg)));

    // Records
    let (servos, bldc, orientation, config_record) = interrupt::free(|cs| {
        REGISTRY.borrow_mut(cs, |r| {
            (
                r.create::<u8>(SERVO_ANGLES, config::SERVO_COUNT).unwrap(),
                r.create::<i8>(BLDC_POWER, config::BLDC_COUNT).unwrap(),
                r.create::<i8>(ORIENTATION, config::ORIENTATION_LEN).unwrap(),
                r.create::<u8>(CONFIG, config::CONFIG_LEN).unwrap(),
            )
        })
    });

    interrupt::free(|cs| {
        REGISTRY.borrow_mut(cs, |r| {
            for record in r.records() {
                let _ = writeln!(dbg, "registered {}\r", record);
            }
        })
    });
    dbg.println("QuadKen leg ready, waiting for setup");

    let mut leg = Leg::new();
    let mut dropped = 0;
    let mut since_report_ms = 0;

    loop {
        let mut ack = false;

        link.poll(|frame| {
            let id = frame.identifier;
            // Screen first: an unpack error would halt the leg.
            let accepted = interrupt::free(|cs| {
                REGISTRY.borrow_mut(cs, |r| {
                    r.accepts(id, frame.payload.len()) && r.unpack_any(id, frame.payload).is_ok()
                })
            });
            if !accepted {
                let _ = write!(
                    dbg,
                    "frame {:#04X} rejected ({} bytes), payload ",
                    id,
                    frame.payload.len()
                );
                dbg.print_hex(frame.payload);
                dbg.println("");
                return;
            }

            match id {
                CONFIG => {
                    if let Ok(values) = interrupt::free(|cs| REGISTRY.snapshot(cs, &config_record)) {
                        leg.apply_config(values[0], &mut dbg);
                        ack = true;
                    }
                }
                SERVO_ANGLES => {
                    if let Ok(angles) = interrupt::free(|cs| REGISTRY.snapshot(cs, &servos)) {
                        leg.apply_servos(&angles, &mut dbg);
                    }
                }
                BLDC_POWER => {
                    if let Ok(raw) = interrupt::free(|cs| REGISTRY.snapshot(cs, &bldc)) {
                        leg.apply_bldc(&raw, &mut dbg);
                    }
                }
                _ => {}
            }
        });

        if ack {
            let sent = interrupt::free(|cs| REGISTRY.frame(cs, &config_record))
                .and_then(|frame| link.send(&frame));
            if let Err(e) = sent {
                let _ = writeln!(dbg, "ack failed: {}\r", e);
            }
            let _ = writeln!(dbg, "attached: {}\r", leg.is_attached());
        }

        if syst.has_wrapped() {
            since_report_ms += 1;
        }
        if since_report_ms >= config::TELEMETRY_PERIOD_MS {
            since_report_ms = 0;
            // The IMU driver writes this record; until then it reports zeros.
            let sent = interrupt::free(|cs| REGISTRY.frame(cs, &orientation))
                .and_then(|frame| link.send(&frame));
            if let Err(e) = sent {
                let _ = writeln!(dbg, "telemetry failed: {}\r", e);
            }
        }

        if link.dropped() != dropped {
            dropped = link.dropped();
            let _ = writeln!(dbg, "link checksum errors: {}\r", dropped);
        }
    }
}
