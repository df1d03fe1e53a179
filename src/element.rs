// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Arithmetic element types a record can hold.
//!
//! The set is closed: [`Element`] is sealed and implemented for `u8`, `i8`, `u16`, `i16`, `u32`,
//! `i32`, `f32` and `f64`. Each type is encoded as its little-endian byte image, which matches the
//! in-memory layout on the ESP32 and Cortex-M boards on either end of the link.

use core::fmt;

use heapless::Vec;

use crate::record::{Values, MAX_RECORD_LEN};

/// Runtime tag for an [`Element`] type.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ElementKind {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    F32,
    F64,
}

impl ElementKind {
    /// Width of one element in bytes.
    pub const fn size(self) -> usize {
        match self {
            ElementKind::U8 | ElementKind::I8 => 1,
            ElementKind::U16 | ElementKind::I16 => 2,
            ElementKind::U32 | ElementKind::I32 | ElementKind::F32 => 4,
            ElementKind::F64 => 8,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ElementKind::U8 => "u8",
            ElementKind::I8 => "i8",
            ElementKind::U16 => "u16",
            ElementKind::I16 => "i16",
            ElementKind::U32 => "u32",
            ElementKind::I32 => "i32",
            ElementKind::F32 => "f32",
            ElementKind::F64 => "f64",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A fixed-width arithmetic type that can back a record.
pub trait Element: Copy + Default + PartialEq + fmt::Display + sealed::Sealed + 'static {
    const KIND: ElementKind;

    /// Width of one element in bytes.
    const SIZE: usize = Self::KIND.size();

    /// Write the little-endian image of `self` into `out`, which is exactly `SIZE` bytes.
    fn write_le(self, out: &mut [u8]);

    /// Read a value from exactly `SIZE` little-endian bytes.
    fn read_le(bytes: &[u8]) -> Self;

    /// Borrow the values if `values` stores this element type.
    fn borrow(values: &Values) -> Option<&Vec<Self, MAX_RECORD_LEN>>;

    /// Mutably borrow the values if `values` stores this element type.
    fn borrow_mut(values: &mut Values) -> Option<&mut Vec<Self, MAX_RECORD_LEN>>;

    /// Wrap a value sequence into the matching [`Values`] variant.
    fn wrap(values: Vec<Self, MAX_RECORD_LEN>) -> Values;
}

macro_rules! impl_element {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Element for $ty {
                const KIND: ElementKind = ElementKind::$variant;

                #[inline]
                fn write_le(self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_le_bytes());
                }

                #[inline]
                fn read_le(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; core::mem::size_of::<$ty>()];
                    raw.copy_from_slice(bytes);
                    <$ty>::from_le_bytes(raw)
                }

                #[inline]
                fn borrow(values: &Values) -> Option<&Vec<Self, MAX_RECORD_LEN>> {
                    match values {
                        Values::$variant(v) => Some(v),
                        _ => None,
                    }
                }

                #[inline]
                fn borrow_mut(values: &mut Values) -> Option<&mut Vec<Self, MAX_RECORD_LEN>> {
                    match values {
                        Values::$variant(v) => Some(v),
                        _ => None,
                    }
                }

                #[inline]
                fn wrap(values: Vec<Self, MAX_RECORD_LEN>) -> Values {
                    Values::$variant(values)
                }
            }
        )*
    };
}

impl_element! {
    u8 => U8,
    i8 => I8,
    u16 => U16,
    i16 => I16,
    u32 => U32,
    i32 => I32,
    f32 => F32,
    f64 => F64,
}

/// Encode `values` back to back into `out`, which must hold `values.len() * T::SIZE` bytes.
pub(crate) fn encode<T: Element>(values: &[T], out: &mut [u8]) {
    for (value, chunk) in values.iter().zip(out.chunks_exact_mut(T::SIZE)) {
        value.write_le(chunk);
    }
}

/// Decode `values.len()` elements from `bytes` into `values`.
pub(crate) fn decode_into<T: Element>(bytes: &[u8], values: &mut [T]) {
    for (value, chunk) in values.iter_mut().zip(bytes.chunks_exact(T::SIZE)) {
        *value = T::read_le(chunk);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_match_the_native_types() {
        assert_eq!(<u8 as Element>::SIZE, core::mem::size_of::<u8>());
        assert_eq!(<i16 as Element>::SIZE, core::mem::size_of::<i16>());
        assert_eq!(<u32 as Element>::SIZE, core::mem::size_of::<u32>());
        assert_eq!(<f32 as Element>::SIZE, core::mem::size_of::<f32>());
        assert_eq!(<f64 as Element>::SIZE, core::mem::size_of::<f64>());
    }

    #[test]
    fn encodes_little_endian() {
        let mut out = [0u8; 6];
        encode::<u16>(&[0x1234, 0xABCD, 1], &mut out);
        assert_eq!(out, [0x34, 0x12, 0xCD, 0xAB, 0x01, 0x00]);

        let mut out = [0u8; 4];
        encode::<f32>(&[1.0], &mut out);
        assert_eq!(out, [0x00, 0x00, 0x80, 0x3F]);
    }

    #[test]
    fn decodes_signed_bytes() {
        let mut values = [0i8; 3];
        decode_into(&[0x80, 0x00, 0x7F], &mut values);
        assert_eq!(values, [-128, 0, 127]);
    }

    #[test]
    fn same_width_kinds_share_a_size() {
        assert_eq!(ElementKind::U8.size(), ElementKind::I8.size());
        assert_eq!(ElementKind::F32.size(), ElementKind::I32.size());
        assert_ne!(ElementKind::F32, ElementKind::I32);
    }
}
