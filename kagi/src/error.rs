//! Error types for key encoding and derivation.

use thiserror::Error;

/// Errors that can occur while encoding, decoding or combining keys.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// Input contains characters outside the Base58 or hex alphabet.
    #[error("invalid encoding")]
    InvalidEncoding,

    /// Trailing 4-byte checksum does not match the double SHA-256 of the payload.
    #[error("checksum mismatch")]
    InvalidChecksum,

    /// Decoded data has the wrong byte width.
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        actual: usize,
    },

    /// Private key hex is not exactly 64 characters.
    #[error("invalid hex length {0}, private key hex must be exactly 64 characters")]
    InvalidHexLength(usize),

    /// Decoded WIF payload is neither 33 nor 34 bytes, or has a bad compression flag.
    #[error("invalid WIF payload of {0} bytes")]
    InvalidWif(usize),

    /// Scalar is zero or not below the curve order.
    #[error("invalid private key: scalar must be in [1, n)")]
    InvalidPrivateKey,

    /// Coordinates do not satisfy the curve equation.
    #[error("point is not on the secp256k1 curve")]
    PointNotOnCurve,

    /// Public key bytes start with an unknown prefix.
    #[error("unsupported public key format (prefix 0x{0:02x})")]
    UnsupportedFormat(u8),

    /// Point addition produced the point at infinity.
    #[error("point at infinity")]
    PointAtInfinity,

    /// Two keys belong to different networks.
    #[error("network mismatch: expected {expected}, got {actual}")]
    NetworkMismatch {
        /// Network of the first operand.
        expected: &'static str,
        /// Network of the second operand.
        actual: &'static str,
    },

    /// Decoded version byte does not belong to the requested network.
    #[error("unexpected version byte 0x{actual:02x}, expected 0x{expected:02x}")]
    UnexpectedVersion {
        /// Version byte of the requested network.
        expected: u8,
        /// Version byte found in the decoded data.
        actual: u8,
    },

    /// Caller policy forbids combining a key with itself.
    #[error("cannot combine a key with itself")]
    IdenticalKeys,

    /// Mnemonic word count is not 12, 15, 18, 21 or 24.
    #[error("unsupported mnemonic length {0}, must be 12, 15, 18, 21, or 24")]
    UnsupportedLength(usize),

    /// Wordlist does not contain exactly 2048 entries.
    #[error("invalid wordlist: expected 2048 words, got {0}")]
    InvalidWordlist(usize),

    /// Wordlist contains the same word more than once.
    #[error("invalid wordlist: duplicate word \"{0}\"")]
    DuplicateWord(String),

    /// Mnemonic word is not in the wordlist.
    #[error("word \"{0}\" is not in the wordlist")]
    InvalidWord(String),

    /// The random source kept producing out-of-range scalars.
    #[error("key generation failed after {attempts} attempts")]
    KeyGeneration {
        /// Number of candidates drawn.
        attempts: u32,
    },
}

impl Error {
    /// Returns `true` if the error means an internal invariant broke rather
    /// than the caller supplying bad input.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::KeyGeneration { .. })
    }
}

/// A convenient Result type alias for kagi operations.
pub type Result<T> = core::result::Result<T, Error>;
