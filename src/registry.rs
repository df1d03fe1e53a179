// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Identifier → record lookup.
//!
//! The [`Registry`] owns every live record and guarantees that no two share an identifier. Code
//! that declared a record talks to it through a typed [`Handle`]; code that only knows a wire
//! identifier (a BLE or ESP-NOW receive callback) goes through [`Registry::unpack_any`] or the
//! size-checked [`Registry::unpack`].
//!
//! Typical usage pattern:
//!
//! ```
//! use quadken::protocol::messages::SERVO_ANGLES;
//! use quadken::Registry;
//!
//! let mut registry: Registry<4> = Registry::new();
//! let servos = registry.create::<u8>(SERVO_ANGLES, 4)?;
//!
//! // receive callback
//! registry.dispatch(&[SERVO_ANGLES, 90, 90, 45, 135])?;
//!
//! // main loop
//! for angle in registry.get(&servos)? {
//!     assert!(*angle <= 180);
//! }
//! # Ok::<(), quadken::Error>(())
//! ```

use core::marker::PhantomData;

use heapless::LinearMap;

use crate::element::Element;
use crate::error::{raise, Error};
use crate::identifier::Identifier;
use crate::protocol::{Frame, FrameBuf};
use crate::record::{reinterpret, Packed, Record, RecordValues};

/// Typed access token for a record created by [`Registry::create`].
///
/// A handle is not `Clone`: giving it back to [`Registry::remove`] is the only way to destroy the
/// record.
#[derive(Debug)]
pub struct Handle<T: Element> {
    identifier: Identifier,
    _element: PhantomData<fn() -> T>,
}

impl<T: Element> Handle<T> {
    #[inline]
    pub fn identifier(&self) -> Identifier {
        self.identifier
    }
}

/// Fixed-capacity set of records keyed by identifier. Holds at most `N` records.
pub struct Registry<const N: usize> {
    records: LinearMap<Identifier, Record, N>,
}

impl<const N: usize> Registry<N> {
    pub const fn new() -> Self {
        Self {
            records: LinearMap::new(),
        }
    }

    /// Create and register a record of `len` zeroed `T` values under `identifier`.
    ///
    /// Fails with [`Error::ZeroIdentifier`] for identifier 0 and [`Error::DuplicateIdentifier`]
    /// if a live record already holds it.
    pub fn create<T: Element>(&mut self, identifier: u8, len: usize) -> Result<Handle<T>, Error> {
        let id = Identifier::new(identifier)?;
        if self.records.contains_key(&id) {
            return Err(raise(Error::DuplicateIdentifier(identifier)));
        }

        let record = Record::new::<T>(id, len)?;
        self.records
            .insert(id, record)
            .map_err(|_| raise(Error::RegistryFull))?;

        Ok(Handle {
            identifier: id,
            _element: PhantomData,
        })
    }

    /// Deregister and return the record behind `handle`. Its identifier becomes free again.
    pub fn remove<T: Element>(&mut self, handle: Handle<T>) -> Result<Record, Error> {
        self.lookup_typed(&handle)?;
        self.records
            .remove(&handle.identifier)
            .ok_or_else(|| raise(Error::NotFound(handle.identifier.get())))
    }

    /// Current values of the record behind `handle`.
    pub fn get<T: Element>(&self, handle: &Handle<T>) -> Result<&[T], Error> {
        let record = self.lookup_typed(handle)?;
        record.values::<T>().ok_or_else(|| {
            raise(Error::TypeMismatch {
                stored: record.kind(),
                requested: T::KIND,
            })
        })
    }

    /// Replace the values of the record behind `handle`. See [`Record::update`].
    pub fn update<T: Element>(&mut self, handle: &Handle<T>, values: &[T]) -> Result<(), Error> {
        self.lookup_typed_mut(handle)?.update(values)
    }

    /// Packed image of the record behind `handle`.
    pub fn pack<T: Element>(&self, handle: &Handle<T>) -> Result<Packed, Error> {
        Ok(self.lookup_typed(handle)?.pack())
    }

    /// Datagram frame (identifier byte followed by the packed image) for the record behind
    /// `handle`.
    pub fn frame<T: Element>(&self, handle: &Handle<T>) -> Result<FrameBuf, Error> {
        let packed = self.pack(handle)?;
        Frame::new(handle.identifier, &packed).encode()
    }

    /// Overwrite the record behind `handle` from a packed image. See [`Record::unpack`].
    pub fn unpack_into<T: Element>(
        &mut self,
        handle: &Handle<T>,
        buffer: &[u8],
    ) -> Result<(), Error> {
        self.lookup_typed_mut(handle)?.unpack(buffer)
    }

    /// Unpack `buffer` into the record registered under `identifier`, expecting `T` elements.
    ///
    /// The type check compares element *sizes* only: a record of `u8` accepts a request for `i8`,
    /// and a record of `f32` accepts `u32` or `i32`. The returned values are the record's new
    /// contents read as `T`.
    pub fn unpack<T: Element>(
        &mut self,
        identifier: u8,
        buffer: &[u8],
    ) -> Result<RecordValues<T>, Error> {
        let record = self.lookup_mut(identifier)?;
        if record.element_size() != T::SIZE {
            return Err(raise(Error::TypeMismatch {
                stored: record.kind(),
                requested: T::KIND,
            }));
        }

        record.unpack(buffer)?;
        Ok(reinterpret::<T>(buffer))
    }

    /// Unpack `buffer` into the record registered under `identifier`, whatever its element type.
    ///
    /// Only the byte length is checked.
    pub fn unpack_any(&mut self, identifier: u8, buffer: &[u8]) -> Result<(), Error> {
        let record = self.lookup_mut(identifier)?;
        let expected = record.expected_size();
        if buffer.len() != expected {
            return Err(raise(Error::BufferSizeMismatch {
                expected,
                actual: buffer.len(),
            }));
        }
        record.unpack(buffer)
    }

    /// Whether [`Registry::unpack_any`] would accept `len` bytes for `identifier`.
    ///
    /// Never raises, so callers that fail fast can screen untrusted input first.
    pub fn accepts(&self, identifier: u8, len: usize) -> bool {
        self.record(identifier)
            .is_some_and(|record| record.expected_size() == len)
    }

    /// Route a received datagram frame to its record. Returns the frame's identifier.
    pub fn dispatch(&mut self, frame: &[u8]) -> Result<u8, Error> {
        let frame = Frame::parse(frame)?;
        self.unpack_any(frame.identifier, frame.payload)?;
        Ok(frame.identifier)
    }

    /// The record registered under `identifier`, if any.
    pub fn record(&self, identifier: u8) -> Option<&Record> {
        self.records.get(&Identifier::checked(identifier)?)
    }

    pub fn contains(&self, identifier: u8) -> bool {
        self.record(identifier).is_some()
    }

    /// Identifiers of all live records.
    pub fn identifiers(&self) -> impl Iterator<Item = Identifier> + '_ {
        self.records.keys().copied()
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.records.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn lookup(&self, identifier: u8) -> Result<&Record, Error> {
        self.record(identifier)
            .ok_or_else(|| raise(Error::NotFound(identifier)))
    }

    fn lookup_mut(&mut self, identifier: u8) -> Result<&mut Record, Error> {
        Identifier::checked(identifier)
            .and_then(|id| self.records.get_mut(&id))
            .ok_or_else(|| raise(Error::NotFound(identifier)))
    }

    fn lookup_typed<T: Element>(&self, handle: &Handle<T>) -> Result<&Record, Error> {
        let record = self.lookup(handle.identifier.get())?;
        check_kind::<T>(record)?;
        Ok(record)
    }

    fn lookup_typed_mut<T: Element>(&mut self, handle: &Handle<T>) -> Result<&mut Record, Error> {
        let record = self.lookup_mut(handle.identifier.get())?;
        check_kind::<T>(record)?;
        Ok(record)
    }
}

/// Handles carry their element type; a record of another type under the same identifier belongs
/// to some other registry.
fn check_kind<T: Element>(record: &Record) -> Result<(), Error> {
    if record.kind() != T::KIND {
        return Err(raise(Error::TypeMismatch {
            stored: record.kind(),
            requested: T::KIND,
        }));
    }
    Ok(())
}

impl<const N: usize> Default for Registry<N> {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(all(test, feature = "fail-fast"))]
mod fail_fast_tests {
    use super::*;

    #[test]
    #[should_panic(expected = "quadken: identifier must be 1-255")]
    fn zero_identifier_halts() {
        let mut registry: Registry<4> = Registry::new();
        let _ = registry.create::<u8>(0, 1);
    }

    #[test]
    #[should_panic(expected = "quadken: buffer size mismatch")]
    fn short_buffer_halts() {
        let mut registry: Registry<4> = Registry::new();
        registry.create::<u8>(1, 4).unwrap();
        let _ = registry.unpack_any(1, &[1, 2]);
    }

    #[test]
    #[should_panic(expected = "quadken: element type mismatch")]
    fn foreign_handle_halts() {
        let mut a: Registry<4> = Registry::new();
        let mut b: Registry<4> = Registry::new();
        let floats = a.create::<f32>(1, 1).unwrap();
        b.create::<u8>(1, 4).unwrap();
        let _ = b.remove(floats);
    }

    #[test]
    fn screened_frames_never_raise() {
        let mut registry: Registry<4> = Registry::new();
        let servos = registry.create::<u8>(1, 2).unwrap();

        let frames: [(u8, &[u8]); 4] = [(1, &[1]), (0, &[]), (9, &[1, 2]), (1, &[90, 45])];
        for (id, payload) in frames {
            if registry.accepts(id, payload.len()) {
                registry.unpack_any(id, payload).unwrap();
            }
        }
        assert_eq!(registry.get(&servos).unwrap(), &[90, 45]);
    }
}
