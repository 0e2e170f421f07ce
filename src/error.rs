//! Error types for the streamrng library.

use thiserror::Error;

/// Result type alias using [`StreamRngError`].
pub type Result<T> = std::result::Result<T, StreamRngError>;

/// Errors produced by the streamrng library.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamRngError {
    /// A bounded draw was requested with an upper bound of zero.
    #[error("Upper bound must be greater than zero")]
    ZeroBound,

    /// A slice or range is larger than the engine output word can index.
    #[error("Range of {len} values exceeds the {bits}-bit engine output")]
    RangeTooWide {
        /// Requested range size
        len: usize,
        /// Width of the engine output word
        bits: u32,
    },

    /// Key schedule was invoked with no key material.
    #[error("Key material must contain at least one entry")]
    EmptyKeyMaterial,

    /// Permutation table size is outside the supported range.
    #[error("Table size {boxes} is outside the supported range [2, {max}]")]
    InvalidBoxCount {
        /// Requested table size
        boxes: usize,
        /// Largest table the entry width allows
        max: usize,
    },

    /// Serialized state ended before every value was read.
    #[error("Serialized state ended after {found} of {expected} values")]
    TruncatedState {
        /// Number of values the engine state requires
        expected: usize,
        /// Number of values present
        found: usize,
    },

    /// Serialized state carries values past the end of the engine state.
    #[error("Unexpected data after {expected} state values")]
    TrailingData {
        /// Number of values the engine state requires
        expected: usize,
    },

    /// A token in serialized state is not a decimal integer.
    #[error("Malformed token '{token}' at position {position}")]
    MalformedToken {
        /// Zero-based token position
        position: usize,
        /// The offending token
        token: String,
    },

    /// A value in serialized state is outside its allowed range.
    #[error("Value {value} at position {position} must be below {limit}")]
    ValueOutOfRange {
        /// Zero-based token position
        position: usize,
        /// The offending value
        value: u64,
        /// Exclusive upper limit for the value
        limit: u64,
    },

    /// Serialized permutation table repeats an entry.
    #[error("Serialized table is not a permutation: {value} appears more than once")]
    NotAPermutation {
        /// The repeated table entry
        value: u64,
    },
}
