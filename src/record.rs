// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! A fixed-length record of one element type.
//!
//! A [`Record`] owns `len` values of a single [`Element`] type, fixed when the record is created.
//! Its packed form is the little-endian image of the values in order: exactly
//! `len * element_size` bytes, with no length prefix and no identifier. The identifier travels
//! out of band (see [`crate::protocol`]).
//!
//! Storage is a small tagged union ([`Values`]) over the supported element types, so records of
//! different types can sit side by side in one [`Registry`](crate::Registry) without allocation.

use core::fmt;

use heapless::Vec;

use crate::element::{decode_into, encode, Element, ElementKind};
use crate::error::{raise, Error};
use crate::identifier::Identifier;

/// Maximum number of elements in one record.
pub const MAX_RECORD_LEN: usize = 32;

/// Maximum packed size of one record, in bytes.
pub const MAX_PAYLOAD: usize = MAX_RECORD_LEN * 8;

/// Packed byte image of a record.
pub type Packed = Vec<u8, MAX_PAYLOAD>;

/// Owned copy of a record's values.
pub type RecordValues<T> = Vec<T, MAX_RECORD_LEN>;

/// Value storage, one variant per supported element type.
#[derive(Clone, Debug, PartialEq)]
pub enum Values {
    U8(Vec<u8, MAX_RECORD_LEN>),
    I8(Vec<i8, MAX_RECORD_LEN>),
    U16(Vec<u16, MAX_RECORD_LEN>),
    I16(Vec<i16, MAX_RECORD_LEN>),
    U32(Vec<u32, MAX_RECORD_LEN>),
    I32(Vec<i32, MAX_RECORD_LEN>),
    F32(Vec<f32, MAX_RECORD_LEN>),
    F64(Vec<f64, MAX_RECORD_LEN>),
}

// Run `$body` with `$v` bound to the typed vector of whichever variant `$values` holds.
macro_rules! with_values {
    ($values:expr, $v:ident => $body:expr) => {
        match $values {
            Values::U8($v) => $body,
            Values::I8($v) => $body,
            Values::U16($v) => $body,
            Values::I16($v) => $body,
            Values::U32($v) => $body,
            Values::I32($v) => $body,
            Values::F32($v) => $body,
            Values::F64($v) => $body,
        }
    };
}

impl Values {
    fn zeroed<T: Element>(len: usize) -> Result<Self, Error> {
        let mut values = Vec::new();
        values
            .resize(len, T::default())
            .map_err(|_| raise(Error::RecordTooLong(len)))?;
        Ok(T::wrap(values))
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Values::U8(_) => ElementKind::U8,
            Values::I8(_) => ElementKind::I8,
            Values::U16(_) => ElementKind::U16,
            Values::I16(_) => ElementKind::I16,
            Values::U32(_) => ElementKind::U32,
            Values::I32(_) => ElementKind::I32,
            Values::F32(_) => ElementKind::F32,
            Values::F64(_) => ElementKind::F64,
        }
    }

    pub fn len(&self) -> usize {
        with_values!(self, v => v.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn encode(&self, out: &mut [u8]) {
        with_values!(self, v => encode(v, out))
    }

    fn decode(&mut self, bytes: &[u8]) {
        with_values!(self, v => decode_into(bytes, v))
    }
}

/// A fixed-length sequence of one element type, tagged with an [`Identifier`].
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    identifier: Identifier,
    values: Values,
}

impl Record {
    /// Create a record of `len` zeroed elements of type `T`.
    ///
    /// The record is not registered anywhere; use [`Registry::create`](crate::Registry::create)
    /// to make it reachable by identifier.
    pub fn new<T: Element>(identifier: Identifier, len: usize) -> Result<Self, Error> {
        Ok(Self {
            identifier,
            values: Values::zeroed::<T>(len)?,
        })
    }

    #[inline]
    pub fn identifier(&self) -> Identifier {
        self.identifier
    }

    #[inline]
    pub fn kind(&self) -> ElementKind {
        self.values.kind()
    }

    /// Fixed element count.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn element_size(&self) -> usize {
        self.kind().size()
    }

    /// Size of the packed image in bytes.
    #[inline]
    pub fn expected_size(&self) -> usize {
        self.len() * self.element_size()
    }

    /// Borrow the raw value storage.
    pub fn raw_values(&self) -> &Values {
        &self.values
    }

    /// Current values, if this record stores elements of type `T`.
    pub fn values<T: Element>(&self) -> Option<&[T]> {
        T::borrow(&self.values).map(|v| v.as_slice())
    }

    /// Replace all values at once.
    ///
    /// Fails with [`Error::TypeMismatch`] if the record does not hold `T`, or
    /// [`Error::LengthMismatch`] if `new_values` is not exactly [`len`](Self::len) long. State is
    /// untouched on failure.
    pub fn update<T: Element>(&mut self, new_values: &[T]) -> Result<(), Error> {
        let stored = self.kind();
        let values = T::borrow_mut(&mut self.values).ok_or_else(|| {
            raise(Error::TypeMismatch {
                stored,
                requested: T::KIND,
            })
        })?;

        if new_values.len() != values.len() {
            return Err(raise(Error::LengthMismatch {
                expected: values.len(),
                actual: new_values.len(),
            }));
        }

        values.copy_from_slice(new_values);
        Ok(())
    }

    /// Pack the values into a fresh buffer of exactly [`expected_size`](Self::expected_size)
    /// bytes.
    pub fn pack(&self) -> Packed {
        let mut buf = Packed::new();
        // Cannot fail: len <= MAX_RECORD_LEN and element size <= 8.
        let _ = buf.resize(self.expected_size(), 0);
        self.values.encode(&mut buf);
        buf
    }

    /// Pack the values into the front of `out`, returning the number of bytes written.
    pub fn pack_into(&self, out: &mut [u8]) -> Result<usize, Error> {
        let needed = self.expected_size();
        if out.len() < needed {
            return Err(raise(Error::BufferTooSmall {
                needed,
                available: out.len(),
            }));
        }
        self.values.encode(&mut out[..needed]);
        Ok(needed)
    }

    /// Overwrite the values from a packed image.
    ///
    /// `buffer` must be exactly [`expected_size`](Self::expected_size) bytes, otherwise this fails
    /// with [`Error::BufferSizeMismatch`] and leaves the values untouched.
    pub fn unpack(&mut self, buffer: &[u8]) -> Result<(), Error> {
        let expected = self.expected_size();
        if buffer.len() != expected {
            return Err(raise(Error::BufferSizeMismatch {
                expected,
                actual: buffer.len(),
            }));
        }
        self.values.decode(buffer);
        Ok(())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}; {}]:", self.identifier, self.kind(), self.len())?;
        with_values!(&self.values, v => {
            for value in v.iter() {
                write!(f, " {}", value)?;
            }
        });
        Ok(())
    }
}

/// Decode a packed image as `T` values, whatever type the bytes came from.
pub(crate) fn reinterpret<T: Element>(bytes: &[u8]) -> RecordValues<T> {
    let mut values = RecordValues::<T>::new();
    let _ = values.resize(bytes.len() / T::SIZE, T::default());
    decode_into(bytes, &mut values);
    values
}

#[cfg(all(test, not(feature = "fail-fast")))]
mod tests {
    use super::*;

    fn id(raw: u8) -> Identifier {
        Identifier::new(raw).unwrap()
    }

    #[test]
    fn starts_zeroed() {
        let record = Record::new::<f32>(id(1), 5).unwrap();
        assert_eq!(record.kind(), ElementKind::F32);
        assert_eq!(record.len(), 5);
        assert_eq!(record.values::<f32>().unwrap(), &[0.0; 5]);
    }

    #[test]
    fn packs_signed_bytes() {
        let mut record = Record::new::<i8>(id(2), 3).unwrap();
        record.update(&[-128i8, 0, 127]).unwrap();

        let packed = record.pack();
        assert_eq!(packed.as_slice(), &[0x80, 0x00, 0x7F]);

        let mut fresh = Record::new::<i8>(id(2), 3).unwrap();
        fresh.unpack(&packed).unwrap();
        assert_eq!(fresh.values::<i8>().unwrap(), &[-128, 0, 127]);
    }

    #[test]
    fn pack_size_is_len_times_width() {
        let mut record = Record::new::<u16>(id(3), 4).unwrap();
        assert_eq!(record.pack().len(), 8);
        record.update(&[100u16, 200, 300, 400]).unwrap();
        assert_eq!(record.pack().len(), 8);
        assert_eq!(record.expected_size(), 8);

        let empty = Record::new::<f64>(id(4), 0).unwrap();
        assert!(empty.is_empty());
        assert!(empty.pack().is_empty());
    }

    #[test]
    fn unpack_of_pack_is_a_no_op() {
        let mut record = Record::new::<f64>(id(5), 3).unwrap();
        record.update(&[1.5f64, -2.25, 1e300]).unwrap();
        let before = record.clone();
        let packed = record.pack();
        record.unpack(&packed).unwrap();
        assert_eq!(record, before);
    }

    #[test]
    fn update_rejects_wrong_length() {
        let mut record = Record::new::<i32>(id(2), 3).unwrap();
        record.update(&[10, 20, 30]).unwrap();

        let err = record.update(&[1, 2]).unwrap_err();
        assert_eq!(
            err,
            Error::LengthMismatch {
                expected: 3,
                actual: 2
            }
        );
        assert_eq!(record.values::<i32>().unwrap(), &[10, 20, 30]);
    }

    #[test]
    fn update_rejects_wrong_type() {
        let mut record = Record::new::<u8>(id(1), 2).unwrap();
        let err = record.update(&[1i8, 2]).unwrap_err();
        assert_eq!(
            err,
            Error::TypeMismatch {
                stored: ElementKind::U8,
                requested: ElementKind::I8,
            }
        );
        assert!(record.values::<i8>().is_none());
    }

    #[test]
    fn unpack_rejects_wrong_size() {
        let mut record = Record::new::<u16>(id(3), 2).unwrap();
        record.update(&[7u16, 8]).unwrap();

        for bad in [&[][..], &[1, 2, 3][..], &[1, 2, 3, 4, 5][..]] {
            let err = record.unpack(bad).unwrap_err();
            assert_eq!(err.kind(), crate::ErrorKind::InvalidArgument);
        }
        assert_eq!(record.values::<u16>().unwrap(), &[7, 8]);
    }

    #[test]
    fn rejects_records_over_capacity() {
        let err = Record::new::<u8>(id(1), MAX_RECORD_LEN + 1).unwrap_err();
        assert_eq!(err, Error::RecordTooLong(MAX_RECORD_LEN + 1));
        assert!(Record::new::<f64>(id(1), MAX_RECORD_LEN).is_ok());
    }

    #[test]
    fn pack_into_checks_room() {
        let mut record = Record::new::<u32>(id(9), 2).unwrap();
        record.update(&[1u32, 0x0102_0304]).unwrap();

        let mut small = [0u8; 7];
        assert_eq!(
            record.pack_into(&mut small),
            Err(Error::BufferTooSmall {
                needed: 8,
                available: 7
            })
        );

        let mut out = [0xEEu8; 10];
        assert_eq!(record.pack_into(&mut out), Ok(8));
        assert_eq!(out, [1, 0, 0, 0, 4, 3, 2, 1, 0xEE, 0xEE]);
    }

    #[test]
    fn display_lists_values() {
        let mut record = Record::new::<u8>(id(1), 3).unwrap();
        record.update(&[90u8, 45, 135]).unwrap();
        assert_eq!(record.to_string(), "0x01 [u8; 3]: 90 45 135");
    }

    #[test]
    fn reinterprets_bytes_as_another_type() {
        let values = reinterpret::<u8>(&[0x80, 0x00, 0x7F]);
        assert_eq!(values.as_slice(), &[128, 0, 127]);
    }
}
