// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Error type shared by every record and registry operation.
//!
//! All errors are created through [`raise`]. With the `fail-fast` feature enabled the error is
//! turned into a panic at the point of detection, which on the robot (with `panic-halt`) stops the
//! core. Without it the error is handed back to the caller as a plain `Err`.

use core::fmt;

use crate::element::ElementKind;

/// Coarse classification of an [`Error`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Bad identifier, length or buffer size supplied by the caller.
    InvalidArgument,
    /// No live record holds the requested identifier.
    NotFound,
    /// The registered record's element type does not fit the caller's.
    TypeMismatch,
    /// A fixed-capacity buffer or table is full.
    CapacityExceeded,
}

/// Error type for record and registry operations.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// Identifier 0 is reserved and never names a record.
    ZeroIdentifier,
    /// Another live record already holds this identifier.
    DuplicateIdentifier(u8),
    /// `update` was given a sequence of the wrong length.
    LengthMismatch { expected: usize, actual: usize },
    /// `unpack` was given a buffer of the wrong byte length.
    BufferSizeMismatch { expected: usize, actual: usize },
    /// A frame must carry at least the identifier byte.
    EmptyFrame,
    /// No live record holds this identifier.
    NotFound(u8),
    /// Element type of the stored record differs from the one requested.
    TypeMismatch {
        stored: ElementKind,
        requested: ElementKind,
    },
    /// Record length exceeds [`MAX_RECORD_LEN`](crate::MAX_RECORD_LEN).
    RecordTooLong(usize),
    /// Registry has no free slot left.
    RegistryFull,
    /// Output buffer is too small for the packed image.
    BufferTooSmall { needed: usize, available: usize },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ZeroIdentifier
            | Error::DuplicateIdentifier(_)
            | Error::LengthMismatch { .. }
            | Error::BufferSizeMismatch { .. }
            | Error::EmptyFrame => ErrorKind::InvalidArgument,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Error::RecordTooLong(_) | Error::RegistryFull | Error::BufferTooSmall { .. } => {
                ErrorKind::CapacityExceeded
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ZeroIdentifier => f.write_str("identifier must be 1-255"),
            Error::DuplicateIdentifier(id) => write!(f, "identifier {} already exists", id),
            Error::LengthMismatch { expected, actual } => {
                write!(f, "length mismatch: expected {}, got {}", expected, actual)
            }
            Error::BufferSizeMismatch { expected, actual } => write!(
                f,
                "buffer size mismatch: expected {} bytes, got {}",
                expected, actual
            ),
            Error::EmptyFrame => f.write_str("empty frame"),
            Error::NotFound(id) => write!(f, "no record for identifier {}", id),
            Error::TypeMismatch { stored, requested } => write!(
                f,
                "element type mismatch: record holds {}, requested {}",
                stored, requested
            ),
            Error::RecordTooLong(len) => write!(f, "record length {} exceeds capacity", len),
            Error::RegistryFull => f.write_str("registry full"),
            Error::BufferTooSmall { needed, available } => write!(
                f,
                "buffer too small: need {} bytes, have {}",
                needed, available
            ),
        }
    }
}

/// Report an error according to the crate's error policy.
///
/// Every error in this crate passes through here, so the `fail-fast` choice applies uniformly.
#[inline]
#[track_caller]
pub(crate) fn raise(err: Error) -> Error {
    #[cfg(feature = "fail-fast")]
    panic!("quadken: {}", err);

    #[cfg(not(feature = "fail-fast"))]
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_variants() {
        assert_eq!(Error::ZeroIdentifier.kind(), ErrorKind::InvalidArgument);
        assert_eq!(Error::DuplicateIdentifier(4).kind(), ErrorKind::InvalidArgument);
        assert_eq!(Error::EmptyFrame.kind(), ErrorKind::InvalidArgument);
        assert_eq!(Error::NotFound(9).kind(), ErrorKind::NotFound);
        assert_eq!(
            Error::TypeMismatch {
                stored: ElementKind::F32,
                requested: ElementKind::U8,
            }
            .kind(),
            ErrorKind::TypeMismatch
        );
        assert_eq!(Error::RegistryFull.kind(), ErrorKind::CapacityExceeded);
    }

    #[test]
    fn display_names_the_offending_values() {
        let msg = Error::BufferSizeMismatch {
            expected: 12,
            actual: 5,
        }
        .to_string();
        assert_eq!(msg, "buffer size mismatch: expected 12 bytes, got 5");

        let msg = Error::TypeMismatch {
            stored: ElementKind::F32,
            requested: ElementKind::I8,
        }
        .to_string();
        assert_eq!(msg, "element type mismatch: record holds f32, requested i8");
    }

    #[cfg(not(feature = "fail-fast"))]
    #[test]
    fn raise_returns_the_error() {
        assert_eq!(raise(Error::RegistryFull), Error::RegistryFull);
    }

    #[cfg(feature = "fail-fast")]
    #[test]
    #[should_panic(expected = "quadken: registry full")]
    fn raise_panics_when_failing_fast() {
        let _ = raise(Error::RegistryFull);
    }
}
