use thiserror::Error;

/// Convenience result alias for fallible `keyprefix` operations.
pub type Result<T, E = self::Error> = core::result::Result<T, E>;

/// All errors this crate can produce.
///
/// Construction is the only fallible step of generation: a prefix width
/// outside the supported range is rejected immediately, with no degraded
/// mode. Everything else that can fail is text decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The requested prefix width cannot be represented.
    #[error("unsupported prefix length: {bits} (expected 1..=31)")]
    InvalidPrefixBits {
        /// The rejected width, in bits.
        bits: u32,
    },

    /// A textual key failed to decode.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Failures when decoding a 22-character textual key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// The input is not exactly 22 characters long.
    #[error("invalid key length: {len} (expected 22)")]
    InvalidLength { len: usize },

    /// The input contains a byte outside the URL-safe base64 alphabet.
    #[error("invalid character {byte:#04x} at index {index}")]
    InvalidChar { byte: u8, index: usize },

    /// The final character carries bits a canonical encoder always leaves
    /// zero.
    #[error("non-canonical trailing character {byte:#04x}")]
    TrailingBits { byte: u8 },
}
