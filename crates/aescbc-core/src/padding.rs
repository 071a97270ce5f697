//! PKCS#7 padding codec.
//!
//! `pad` always appends between 1 and `block_size` bytes, so input that is
//! already block aligned gains a full block of padding. `unpad` comes in two
//! flavours selected by [`PaddingMode`]:
//!
//! - [`PaddingMode::Strict`] checks every padding byte and that the padding
//!   is no longer than one block.
//! - [`PaddingMode::Permissive`] trusts the trailing length byte alone, which
//!   is how the engines this crate interoperates with historically behaved.
//!   Corrupted ciphertext then decrypts to truncated garbage instead of an
//!   error.
//!
//! Both modes reject empty input, a zero length byte, and a length byte that
//! exceeds the data.

use crate::block::BLOCK_SIZE;
use crate::error::{CipherError, PaddingFault, Result};

/// How strictly [`unpad`] validates padding content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PaddingMode {
    /// Every padding byte must equal the padding length, which may not
    /// exceed the block size.
    #[default]
    Strict,
    /// Only the trailing length byte is inspected.
    Permissive,
}

/// Appends PKCS#7 padding so the result is a multiple of `block_size`.
pub fn pad(data: &[u8], block_size: usize) -> Result<Vec<u8>> {
    check_block_size(block_size)?;
    let padding = block_size - data.len() % block_size;
    let mut out = Vec::with_capacity(data.len() + padding);
    out.extend_from_slice(data);
    // `padding` is at most `block_size`, which fits in a byte.
    out.resize(data.len() + padding, padding as u8);
    Ok(out)
}

/// Strips PKCS#7 padding applied for `block_size` and returns the unpadded
/// prefix of `data`.
pub fn unpad(data: &[u8], block_size: usize, mode: PaddingMode) -> Result<&[u8]> {
    check_block_size(block_size)?;
    let Some(&last) = data.last() else {
        return Err(CipherError::PaddingError(PaddingFault::Empty));
    };
    let pad = usize::from(last);
    if pad == 0 {
        return Err(CipherError::PaddingError(PaddingFault::ZeroLength));
    }
    if pad > data.len() {
        return Err(CipherError::PaddingError(PaddingFault::Overlong {
            pad,
            len: data.len(),
        }));
    }
    let (body, tail) = data.split_at(data.len() - pad);
    if mode == PaddingMode::Strict {
        if pad > block_size {
            return Err(CipherError::PaddingError(PaddingFault::ExceedsBlock {
                pad,
                block_size,
            }));
        }
        if tail.iter().any(|&b| b != last) {
            return Err(CipherError::PaddingError(PaddingFault::Mismatch { pad }));
        }
    }
    Ok(body)
}

/// Shorthand for [`unpad`] on AES blocks with [`PaddingMode::Strict`].
pub fn unpad_strict(data: &[u8]) -> Result<&[u8]> {
    unpad(data, BLOCK_SIZE, PaddingMode::Strict)
}

/// Shorthand for [`unpad`] on AES blocks with [`PaddingMode::Permissive`].
pub fn unpad_permissive(data: &[u8]) -> Result<&[u8]> {
    unpad(data, BLOCK_SIZE, PaddingMode::Permissive)
}

fn check_block_size(block_size: usize) -> Result<()> {
    if block_size == 0 || block_size > usize::from(u8::MAX) {
        return Err(CipherError::InvalidBlockSize(block_size));
    }
    Ok(())
}
