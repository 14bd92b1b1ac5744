//! Error types for huffpack.

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, HuffmanError>;

/// Errors reported by [`compress`](crate::compress) and
/// [`decompress`](crate::decompress) and their buffer-oriented variants.
///
/// Any error means the destination buffer, if one was supplied, must not be
/// trusted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HuffmanError {
    /// The input cannot be described by the compressed header.
    #[error("input of {len} bytes exceeds the {max} byte limit")]
    InvalidInput { len: usize, max: usize },

    /// A byte handed to an encoder that was built without it.
    #[error("byte {0:#04x} has no code in this tree")]
    UnknownSymbol(u8),

    /// The compressed buffer does not match the layout `compress` produces.
    #[error("corrupt stream: {0}")]
    CorruptStream(#[from] CorruptKind),

    /// The caller-supplied destination is too small.
    #[error("destination holds {available} bytes but {required} are needed")]
    CapacityExceeded { required: usize, available: usize },
}

/// What exactly was wrong with a compressed buffer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CorruptKind {
    #[error("header needs {needed} bytes, buffer has {actual}")]
    TruncatedHeader { needed: usize, actual: usize },

    #[error("{leaves} leaves need {needed} bytes, buffer has {actual}")]
    TruncatedLeaves {
        leaves: usize,
        needed: usize,
        actual: usize,
    },

    #[error("leaf frequencies sum to {sum}, header declares {declared} bytes")]
    FrequencyMismatch { declared: u64, sum: u64 },

    #[error("leaf {index} has a higher frequency than the one before it")]
    UnorderedLeaves { index: usize },

    #[error("leaf {index} has zero frequency")]
    ZeroFrequency { index: usize },

    #[error("symbol {0:#04x} appears twice in the leaf list")]
    DuplicateSymbol(u8),

    #[error("payload ran out after {decoded} of {expected} symbols")]
    TruncatedPayload { decoded: usize, expected: usize },
}
