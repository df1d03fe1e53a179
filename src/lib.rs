// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # QuadKen Record Registry
//!
//! Typed, fixed-length value records for the QuadKen legged robot, keyed by a one-byte identifier
//! and moved across the wireless links (BLE, ESP-NOW) and the UART bridge as raw byte images.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`element`] | Supported element types and their byte codec |
//! | [`record`] | A single fixed-length record with pack/unpack |
//! | [`registry`] | Identifier → record lookup and typed handles |
//! | [`shared`] | Registry shared between main loop and interrupt context |
//! | [`protocol`] | Datagram and serial stream framing, well-known identifiers |
//! | [`actuation`] | Record values → servo / BLDC pulse widths |
//!
//! ## Getting Started
//!
//! ```
//! use quadken::Registry;
//!
//! let mut registry: Registry<4> = Registry::new();
//! let servos = registry.create::<u8>(1, 4).unwrap();
//!
//! registry.unpack_any(1, &[90, 45, 135, 90]).unwrap();
//! assert_eq!(registry.get(&servos).unwrap(), &[90, 45, 135, 90]);
//! ```
//!
//! Run the host tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod actuation;
pub mod element;
pub mod error;
pub mod identifier;
pub mod protocol;
pub mod record;
pub mod registry;
pub mod shared;

pub use element::{Element, ElementKind};
pub use error::{Error, ErrorKind};
pub use identifier::Identifier;
pub use record::{Packed, Record, RecordValues, MAX_PAYLOAD, MAX_RECORD_LEN};
pub use registry::{Handle, Registry};
pub use shared::SharedRegistry;
