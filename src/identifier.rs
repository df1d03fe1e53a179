// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! One-byte record identifier.

use core::convert::TryFrom;
use core::fmt;
use core::num::NonZeroU8;

use crate::error::{raise, Error};

/// Identifier of a record, in the range 1 to 255 inclusive. 0 is reserved as "unset".
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Identifier(NonZeroU8);

impl Identifier {
    pub fn new(raw: u8) -> Result<Self, Error> {
        NonZeroU8::new(raw)
            .map(Identifier)
            .ok_or_else(|| raise(Error::ZeroIdentifier))
    }

    /// Like [`new`](Self::new), but a plain `None` for 0 rather than an error.
    #[inline]
    pub const fn checked(raw: u8) -> Option<Self> {
        match NonZeroU8::new(raw) {
            Some(id) => Some(Identifier(id)),
            None => None,
        }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Identifier {
    type Error = Error;

    fn try_from(raw: u8) -> Result<Self, Error> {
        Identifier::new(raw)
    }
}

impl From<Identifier> for u8 {
    fn from(id: Identifier) -> u8 {
        id.get()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04X}", self.get())
    }
}
