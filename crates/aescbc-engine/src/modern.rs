//! Engine backed by the atomic padded calls of the RustCrypto `cbc` crate.

use aescbc_core::{AesKey, CipherError, CipherVariant, Iv, PaddingFault, Result};
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use tracing::trace;

use crate::backend::Backend;
use crate::kind::BackendKind;
use crate::modes::{
    Aes128CbcDec, Aes128CbcEnc, Aes192CbcDec, Aes192CbcEnc, Aes256CbcDec, Aes256CbcEnc,
};
use crate::require_whole_blocks;

/// Pads and encrypts (or decrypts and unpads) in a single provider call.
#[derive(Clone, Copy, Debug, Default)]
pub struct ModernEngine;

impl Backend for ModernEngine {
    fn kind(&self) -> BackendKind {
        BackendKind::Modern
    }

    fn raw_encrypt(&self, input: &[u8], key: &AesKey, iv: &Iv) -> Result<Vec<u8>> {
        trace!(cipher = key.variant().provider_id(), len = input.len(), "modern encrypt");
        match key.variant() {
            CipherVariant::Aes128Cbc => seal::<Aes128CbcEnc>(input, key, iv),
            CipherVariant::Aes192Cbc => seal::<Aes192CbcEnc>(input, key, iv),
            CipherVariant::Aes256Cbc => seal::<Aes256CbcEnc>(input, key, iv),
        }
    }

    fn raw_decrypt(&self, input: &[u8], key: &AesKey, iv: &Iv) -> Result<Vec<u8>> {
        trace!(cipher = key.variant().provider_id(), len = input.len(), "modern decrypt");
        require_whole_blocks(input)?;
        match key.variant() {
            CipherVariant::Aes128Cbc => unseal::<Aes128CbcDec>(input, key, iv),
            CipherVariant::Aes192Cbc => unseal::<Aes192CbcDec>(input, key, iv),
            CipherVariant::Aes256Cbc => unseal::<Aes256CbcDec>(input, key, iv),
        }
    }
}

fn seal<M>(plaintext: &[u8], key: &AesKey, iv: &Iv) -> Result<Vec<u8>>
where
    M: KeyIvInit + BlockEncryptMut,
{
    let mode = M::new_from_slices(key.as_bytes(), iv.as_ref()).map_err(|_| {
        CipherError::InvalidKeyLength {
            len: key.as_bytes().len(),
        }
    })?;
    Ok(mode.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

fn unseal<M>(ciphertext: &[u8], key: &AesKey, iv: &Iv) -> Result<Vec<u8>>
where
    M: KeyIvInit + BlockDecryptMut,
{
    let mode = M::new_from_slices(key.as_bytes(), iv.as_ref()).map_err(|_| {
        CipherError::InvalidKeyLength {
            len: key.as_bytes().len(),
        }
    })?;
    mode
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CipherError::PaddingError(PaddingFault::Rejected))
}
