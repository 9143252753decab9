use rand::rand_core;
use thiserror::Error;

use crate::modes::Mode;

/// AES Result type.
pub type Result<T> = std::result::Result<T, Error>;

/// AES Error type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Attempted to instantiate an AES key with an input size that is not 128, 192, or 256 bits.
    #[error("invalid key length: {len} bytes (expected 16, 24, or 32)")]
    InvalidKeyLength { len: usize },

    /// A single-block operation was given something other than 16 bytes.
    #[error("invalid block length: {len} bytes (expected 16)")]
    InvalidBlockLength { len: usize },

    /// The IV/nonce does not match the length required by the mode of operation.
    #[error("invalid IV length for {mode}: {len} bytes (expected {expected})")]
    InvalidIvLength {
        mode: Mode,
        len: usize,
        expected: usize,
    },

    /// Padding scheme name was not recognised.
    #[error("unsupported padding scheme: {0:?}")]
    UnsupportedPadding(String),

    /// Block modes (ECB, CBC) require ciphertext that is a multiple of 16 bytes.
    #[error("{mode} ciphertext of {len} bytes is not a multiple of 16 bytes")]
    MisalignedCiphertext { mode: Mode, len: usize },

    /// Block modes (ECB, CBC) were given unpadded plaintext that is not a multiple of 16 bytes.
    #[error("{mode} plaintext of {len} bytes is not a multiple of 16 bytes (padding is None)")]
    MisalignedPlaintext { mode: Mode, len: usize },

    /// Padding bytes read back on unpad did not match the scheme.
    #[error("invalid {scheme} padding ({context})")]
    InvalidPadding {
        scheme: &'static str,
        context: &'static str,
    },

    /// Computed authentication tag did not match input tag. Ciphertext and/or AAD has been modified since it was encrypted.
    #[error("GCM authentication failed (invalid tag)")]
    AuthFailed,

    /// Attempted to encrypt or decrypt more than 2^32 16-byte blocks in GCM/CTR mode.
    #[error("input size caused counter overflow (maximum input size for 32 bit counter is 16 * 2^32 bytes)")]
    CounterOverflow,

    /// Provided a sealed message that did not match the expected framing of the mode of operation.
    #[error("invalid ciphertext length: {len} bytes ({context})")]
    InvalidCiphertext { len: usize, context: &'static str },

    /// Additional authenticated data is only meaningful for GCM.
    #[error("additional authenticated data is not supported by {mode}")]
    AadNotSupported { mode: Mode },

    /// OS RNG failed during random key, IV or padding generation.
    #[error("OS RNG failed")]
    Rng(#[from] rand_core::OsError),
}
