//! AES-CBC engines for the aescbc workspace.
//!
//! Two styles of engine sit behind the [`Backend`] trait:
//! - [`ModernEngine`] pads and runs CBC in one atomic call.
//! - [`LegacyEngine`] only transforms whole blocks through a keyed handle
//!   that lives for a single call; PKCS#7 is applied around it.
//!
//! Both delegate the cipher itself to the RustCrypto `aes` and `cbc` crates
//! and produce identical ciphertext for the same key, IV and plaintext.
//! Which engines exist is decided by the `modern` and `legacy` cargo
//! features and reported by [`Registry::detect`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod backend;
mod kind;
#[cfg(feature = "legacy")]
mod legacy;
#[cfg(feature = "modern")]
mod modern;
mod registry;

use aescbc_core::{CipherError, Result, BLOCK_SIZE};

pub use crate::backend::Backend;
pub use crate::kind::BackendKind;
#[cfg(feature = "legacy")]
pub use crate::legacy::LegacyEngine;
#[cfg(feature = "modern")]
pub use crate::modern::ModernEngine;
pub use crate::registry::Registry;

#[cfg(any(feature = "modern", feature = "legacy"))]
mod modes {
    use aes::{Aes128, Aes192, Aes256};

    pub(crate) type Aes128CbcEnc = cbc::Encryptor<Aes128>;
    pub(crate) type Aes192CbcEnc = cbc::Encryptor<Aes192>;
    pub(crate) type Aes256CbcEnc = cbc::Encryptor<Aes256>;
    pub(crate) type Aes128CbcDec = cbc::Decryptor<Aes128>;
    pub(crate) type Aes192CbcDec = cbc::Decryptor<Aes192>;
    pub(crate) type Aes256CbcDec = cbc::Decryptor<Aes256>;
}

/// Padded ciphertext is always at least one whole block.
#[cfg_attr(not(any(feature = "modern", feature = "legacy")), allow(dead_code))]
pub(crate) fn require_whole_blocks(data: &[u8]) -> Result<()> {
    if data.is_empty() || data.len() % BLOCK_SIZE != 0 {
        return Err(CipherError::InvalidDataLength { len: data.len() });
    }
    Ok(())
}
