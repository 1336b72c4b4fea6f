//! Error types for sparse string construction and decoding.

use thiserror::Error;

/// Error variants for sparse string operations.
///
/// Position lookups never fail: [`SparseString::char_at`](crate::SparseString::char_at)
/// answers out-of-range positions with the sentinel `0` instead.
#[derive(Debug, Error)]
pub enum Error {
    /// A required argument was absent or unusable.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A serialized sparse string failed structural validation.
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),

    /// The decoded code units do not form valid UTF-16.
    #[error("invalid utf-16 at position {0}")]
    InvalidUtf16(usize),
}

/// A specialized Result type for sparse string operations.
pub type Result<T> = std::result::Result<T, Error>;
