// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Registry shared between the main loop and interrupt handlers.
//!
//! A receive interrupt that unpacks into a record while the main loop is reading it would tear the
//! values. Every access here therefore requires a [`CriticalSection`] token, obtained with
//! `cortex_m::interrupt::free`, and nothing borrowed from the registry outlives it.
//!
//! ```no_run
//! use cortex_m::interrupt;
//! use quadken::SharedRegistry;
//!
//! static REGISTRY: SharedRegistry<8> = SharedRegistry::new();
//!
//! let servos = interrupt::free(|cs| REGISTRY.borrow_mut(cs, |r| r.create::<u8>(1, 12)))?;
//! let angles = interrupt::free(|cs| REGISTRY.snapshot(cs, &servos))?;
//! # Ok::<(), quadken::Error>(())
//! ```

use core::cell::RefCell;

use cortex_m::interrupt::{CriticalSection, Mutex};

use crate::element::Element;
use crate::error::Error;
use crate::protocol::FrameBuf;
use crate::record::{Packed, RecordValues};
use crate::registry::{Handle, Registry};

/// A [`Registry`] behind an interrupt-safe mutex, suitable for a `static`.
pub struct SharedRegistry<const N: usize> {
    inner: Mutex<RefCell<Registry<N>>>,
}

impl<const N: usize> SharedRegistry<N> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Registry::new())),
        }
    }

    /// Run `f` with exclusive access to the registry.
    ///
    /// Panics if called re-entrantly from inside `f`.
    pub fn borrow_mut<R>(
        &self,
        cs: &CriticalSection,
        f: impl FnOnce(&mut Registry<N>) -> R,
    ) -> R {
        let mut registry = self.inner.borrow(cs).borrow_mut();
        f(&mut *registry)
    }

    /// See [`Registry::unpack_any`].
    pub fn unpack_any(
        &self,
        cs: &CriticalSection,
        identifier: u8,
        buffer: &[u8],
    ) -> Result<(), Error> {
        self.borrow_mut(cs, |r| r.unpack_any(identifier, buffer))
    }

    /// See [`Registry::dispatch`].
    pub fn dispatch(&self, cs: &CriticalSection, frame: &[u8]) -> Result<u8, Error> {
        self.borrow_mut(cs, |r| r.dispatch(frame))
    }

    /// See [`Registry::update`].
    pub fn update<T: Element>(
        &self,
        cs: &CriticalSection,
        handle: &Handle<T>,
        values: &[T],
    ) -> Result<(), Error> {
        self.borrow_mut(cs, |r| r.update(handle, values))
    }

    /// Copy of the current values of the record behind `handle`.
    pub fn snapshot<T: Element>(
        &self,
        cs: &CriticalSection,
        handle: &Handle<T>,
    ) -> Result<RecordValues<T>, Error> {
        self.borrow_mut(cs, |r| -> Result<RecordValues<T>, Error> {
            let mut values = RecordValues::new();
            // Records never exceed the snapshot capacity.
            let _ = values.extend_from_slice(r.get(handle)?);
            Ok(values)
        })
    }

    /// See [`Registry::pack`].
    pub fn pack<T: Element>(
        &self,
        cs: &CriticalSection,
        handle: &Handle<T>,
    ) -> Result<Packed, Error> {
        self.borrow_mut(cs, |r| r.pack(handle))
    }

    /// See [`Registry::frame`].
    pub fn frame<T: Element>(
        &self,
        cs: &CriticalSection,
        handle: &Handle<T>,
    ) -> Result<FrameBuf, Error> {
        self.borrow_mut(cs, |r| r.frame(handle))
    }
}

impl<const N: usize> Default for SharedRegistry<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(all(test, not(feature = "fail-fast")))]
mod tests {
    use super::*;

    // Host builds have no interrupts to mask.
    fn cs() -> CriticalSection {
        unsafe { CriticalSection::new() }
    }

    static REGISTRY: SharedRegistry<4> = SharedRegistry::new();

    #[test]
    fn static_registry_round_trip() {
        let cs = cs();
        let bldc = REGISTRY
            .borrow_mut(&cs, |r| r.create::<i8>(2, 2))
            .unwrap();

        assert_eq!(REGISTRY.dispatch(&cs, &[2, 0x81, 0x40]), Ok(2));
        let values = REGISTRY.snapshot(&cs, &bldc).unwrap();
        assert_eq!(values.as_slice(), &[-127, 64]);

        REGISTRY.update(&cs, &bldc, &[0, 0]).unwrap();
        assert_eq!(REGISTRY.pack(&cs, &bldc).unwrap().as_slice(), &[0, 0]);
        assert_eq!(REGISTRY.frame(&cs, &bldc).unwrap().as_slice(), &[2, 0, 0]);

        REGISTRY.borrow_mut(&cs, |r| r.remove(bldc)).unwrap();
    }

    #[test]
    fn errors_pass_through() {
        let shared: SharedRegistry<2> = SharedRegistry::new();
        let cs = cs();
        let servos = shared.borrow_mut(&cs, |r| r.create::<u8>(1, 2)).unwrap();

        let err = shared.unpack_any(&cs, 1, &[1]).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidArgument);
        assert_eq!(shared.unpack_any(&cs, 7, &[1]), Err(Error::NotFound(7)));
        shared.unpack_any(&cs, 1, &[10, 20]).unwrap();
        assert_eq!(shared.snapshot(&cs, &servos).unwrap().as_slice(), &[10, 20]);
    }
}
