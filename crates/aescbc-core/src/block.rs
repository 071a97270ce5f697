//! Block and initialization vector types.

use core::fmt;

use crate::error::{CipherError, Result};

/// AES block size in bytes. Also the only valid IV length.
pub const BLOCK_SIZE: usize = 16;

/// AES block of 16 bytes.
pub type Block = [u8; BLOCK_SIZE];

/// CBC initialization vector.
///
/// The IV is not secret, so unlike [`AesKey`](crate::AesKey) it is `Copy`
/// and prints its bytes in hex.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Iv(Block);

impl Iv {
    /// Validates `bytes` as a 16-byte IV.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let block: Block = bytes
            .try_into()
            .map_err(|_| CipherError::InvalidIvLength { len: bytes.len() })?;
        Ok(Self(block))
    }

    /// Returns the IV bytes.
    #[inline]
    pub fn as_bytes(&self) -> &Block {
        &self.0
    }
}

impl From<Block> for Iv {
    fn from(value: Block) -> Self {
        Self(value)
    }
}

impl AsRef<[u8]> for Iv {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Iv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Iv(")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        f.write_str(")")
    }
}
