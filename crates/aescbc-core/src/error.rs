//! Error types shared across the aescbc crates.

use core::fmt;

use thiserror::Error;

/// Convenience alias used throughout the workspace.
pub type Result<T> = core::result::Result<T, CipherError>;

/// Configuration item that has not been set on a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Missing {
    /// No key was set.
    Key,
    /// No IV was set.
    Iv,
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Missing::Key => f.write_str("the key is not set, call set_key() prior to usage"),
            Missing::Iv => f.write_str("the iv is not set, call set_iv() prior to usage"),
        }
    }
}

/// Reason a PKCS#7 padding block was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaddingFault {
    /// There was no data to unpad.
    Empty,
    /// The trailing length byte was zero.
    ZeroLength,
    /// The trailing length byte claims more bytes than the data holds.
    Overlong {
        /// Claimed padding length.
        pad: usize,
        /// Length of the padded data.
        len: usize,
    },
    /// The trailing length byte is larger than one block.
    ExceedsBlock {
        /// Claimed padding length.
        pad: usize,
        /// Block size the data was padded to.
        block_size: usize,
    },
    /// One of the padding bytes differs from the padding length.
    Mismatch {
        /// Claimed padding length.
        pad: usize,
    },
    /// The primitive provider rejected the padding during an atomic decrypt.
    Rejected,
}

impl fmt::Display for PaddingFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaddingFault::Empty => f.write_str("input is empty"),
            PaddingFault::ZeroLength => f.write_str("padding length byte is zero"),
            PaddingFault::Overlong { pad, len } => {
                write!(f, "padding length {pad} exceeds data length {len}")
            }
            PaddingFault::ExceedsBlock { pad, block_size } => {
                write!(f, "padding length {pad} exceeds block size {block_size}")
            }
            PaddingFault::Mismatch { pad } => {
                write!(f, "padding bytes do not all equal {pad}")
            }
            PaddingFault::Rejected => f.write_str("padding rejected by the cipher engine"),
        }
    }
}

/// Errors produced while configuring or running a cipher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CipherError {
    /// Key length is not one of 16, 24 or 32 bytes.
    #[error("key length must be 16, 24, or 32 bytes (got {len})")]
    InvalidKeyLength {
        /// Rejected length.
        len: usize,
    },

    /// IV length is not 16 bytes.
    #[error("IV length must be 16 bytes (got {len})")]
    InvalidIvLength {
        /// Rejected length.
        len: usize,
    },

    /// Key or IV used before being set.
    #[error("{0}")]
    NotConfigured(Missing),

    /// The requested engine is not present in this build or runtime.
    #[error("{kind} functions are missing, you may not run in {kind} mode")]
    BackendUnavailable {
        /// Name of the requested backend.
        kind: String,
    },

    /// The backend selector does not name a known backend.
    #[error("backend selector {0:?} was not in the approved list of backends")]
    InvalidBackendSelector(String),

    /// Malformed padding found while unpadding.
    #[error("invalid PKCS#7 padding: {0}")]
    PaddingError(PaddingFault),

    /// Raw block transform input is not a whole number of blocks.
    #[error("data length {len} is not a multiple of the 16-byte block size")]
    InvalidDataLength {
        /// Rejected length.
        len: usize,
    },

    /// Padding block size outside 1..=255.
    #[error("PKCS#7 block size must be between 1 and 255 (got {0})")]
    InvalidBlockSize(usize),
}
