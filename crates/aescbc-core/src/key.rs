//! AES key type and the CBC cipher variant it selects.

use core::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CipherError, Result};

/// AES-128 key length in bytes.
pub const KEY_128: usize = 16;
/// AES-192 key length in bytes.
pub const KEY_192: usize = 24;
/// AES-256 key length in bytes.
pub const KEY_256: usize = 32;

/// Concrete AES-CBC variant, determined by the key length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CipherVariant {
    /// AES-128 in CBC mode.
    Aes128Cbc,
    /// AES-192 in CBC mode.
    Aes192Cbc,
    /// AES-256 in CBC mode.
    Aes256Cbc,
}

impl CipherVariant {
    /// Maps a key length to its variant.
    pub fn from_key_len(len: usize) -> Result<Self> {
        match len {
            KEY_128 => Ok(Self::Aes128Cbc),
            KEY_192 => Ok(Self::Aes192Cbc),
            KEY_256 => Ok(Self::Aes256Cbc),
            _ => Err(CipherError::InvalidKeyLength { len }),
        }
    }

    /// Key length in bytes.
    pub fn key_len(self) -> usize {
        match self {
            Self::Aes128Cbc => KEY_128,
            Self::Aes192Cbc => KEY_192,
            Self::Aes256Cbc => KEY_256,
        }
    }

    /// Algorithm name in the form `AES-<bits>-CBC`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Aes128Cbc => "AES-128-CBC",
            Self::Aes192Cbc => "AES-192-CBC",
            Self::Aes256Cbc => "AES-256-CBC",
        }
    }

    /// Lowercase identifier accepted by providers that take the algorithm
    /// as a string parameter (`aes-128-cbc`).
    pub fn provider_id(self) -> &'static str {
        match self {
            Self::Aes128Cbc => "aes-128-cbc",
            Self::Aes192Cbc => "aes-192-cbc",
            Self::Aes256Cbc => "aes-256-cbc",
        }
    }
}

impl fmt::Display for CipherVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Validated AES key. The bytes are wiped when the key is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct AesKey {
    bytes: Vec<u8>,
    #[zeroize(skip)]
    variant: CipherVariant,
}

impl AesKey {
    /// Validates `bytes` as a 16, 24 or 32 byte key.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let variant = CipherVariant::from_key_len(bytes.len())?;
        Ok(Self {
            bytes: bytes.to_vec(),
            variant,
        })
    }

    /// Returns the raw key bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Variant selected by this key's length.
    #[inline]
    pub fn variant(&self) -> CipherVariant {
        self.variant
    }
}

impl fmt::Debug for AesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AesKey")
            .field("variant", &self.variant)
            .finish_non_exhaustive()
    }
}
