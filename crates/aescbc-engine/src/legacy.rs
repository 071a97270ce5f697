//! Engine that exposes only a streaming block transform.
//!
//! Every call opens its own [`KeyedTransform`], pushes whole blocks through
//! it and lets it drop. Padding is applied by [`LegacyEngine::encrypt`] and
//! removed by [`LegacyEngine::decrypt`] around the raw block calls.

use aescbc_core::padding::{self, PaddingMode};
use aescbc_core::{AesKey, CipherError, CipherVariant, Iv, Result, BLOCK_SIZE};
use cbc::cipher::generic_array::GenericArray;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use tracing::trace;

use crate::backend::Backend;
use crate::kind::BackendKind;
use crate::modes::{
    Aes128CbcDec, Aes128CbcEnc, Aes192CbcDec, Aes192CbcEnc, Aes256CbcDec, Aes256CbcEnc,
};

#[cfg(test)]
thread_local! {
    static OPEN_HANDLES: core::cell::Cell<usize> = const { core::cell::Cell::new(0) };
}

/// Number of keyed transforms currently open on this thread.
#[cfg(test)]
pub(crate) fn open_handles() -> usize {
    OPEN_HANDLES.with(|n| n.get())
}

/// A CBC transform keyed for the duration of one call.
///
/// Opening binds key and IV; dropping releases the handle, so the handle is
/// closed on every exit path of the call that opened it.
struct KeyedTransform<M> {
    mode: M,
    variant: CipherVariant,
}

impl<M: KeyIvInit> KeyedTransform<M> {
    fn open(key: &AesKey, iv: &Iv) -> Result<Self> {
        let mode = M::new_from_slices(key.as_bytes(), iv.as_ref()).map_err(|_| {
            CipherError::InvalidKeyLength {
                len: key.as_bytes().len(),
            }
        })?;
        trace!(cipher = key.variant().provider_id(), "keyed transform opened");
        #[cfg(test)]
        OPEN_HANDLES.with(|n| n.set(n.get() + 1));
        Ok(Self {
            mode,
            variant: key.variant(),
        })
    }
}

impl<M: BlockEncryptMut> KeyedTransform<M> {
    fn encrypt_blocks(&mut self, buf: &mut [u8]) -> Result<()> {
        require_aligned(buf)?;
        for chunk in buf.chunks_exact_mut(BLOCK_SIZE) {
            self.mode.encrypt_block_mut(GenericArray::from_mut_slice(chunk));
        }
        Ok(())
    }
}

impl<M: BlockDecryptMut> KeyedTransform<M> {
    fn decrypt_blocks(&mut self, buf: &mut [u8]) -> Result<()> {
        require_aligned(buf)?;
        for chunk in buf.chunks_exact_mut(BLOCK_SIZE) {
            self.mode.decrypt_block_mut(GenericArray::from_mut_slice(chunk));
        }
        Ok(())
    }
}

impl<M> Drop for KeyedTransform<M> {
    fn drop(&mut self) {
        trace!(cipher = self.variant.provider_id(), "keyed transform closed");
        #[cfg(test)]
        OPEN_HANDLES.with(|n| n.set(n.get() - 1));
    }
}

fn require_aligned(buf: &[u8]) -> Result<()> {
    if buf.len() % BLOCK_SIZE != 0 {
        return Err(CipherError::InvalidDataLength { len: buf.len() });
    }
    Ok(())
}

/// Block-at-a-time engine; padding happens outside the primitive.
#[derive(Clone, Copy, Debug, Default)]
pub struct LegacyEngine;

impl Backend for LegacyEngine {
    fn kind(&self) -> BackendKind {
        BackendKind::Legacy
    }

    /// Encrypts whole blocks. Input must be a multiple of 16 bytes.
    fn raw_encrypt(&self, input: &[u8], key: &AesKey, iv: &Iv) -> Result<Vec<u8>> {
        trace!(cipher = key.variant().provider_id(), len = input.len(), "legacy encrypt");
        match key.variant() {
            CipherVariant::Aes128Cbc => encrypt_with::<Aes128CbcEnc>(input, key, iv),
            CipherVariant::Aes192Cbc => encrypt_with::<Aes192CbcEnc>(input, key, iv),
            CipherVariant::Aes256Cbc => encrypt_with::<Aes256CbcEnc>(input, key, iv),
        }
    }

    /// Decrypts whole blocks without touching the padding.
    fn raw_decrypt(&self, input: &[u8], key: &AesKey, iv: &Iv) -> Result<Vec<u8>> {
        trace!(cipher = key.variant().provider_id(), len = input.len(), "legacy decrypt");
        match key.variant() {
            CipherVariant::Aes128Cbc => decrypt_with::<Aes128CbcDec>(input, key, iv),
            CipherVariant::Aes192Cbc => decrypt_with::<Aes192CbcDec>(input, key, iv),
            CipherVariant::Aes256Cbc => decrypt_with::<Aes256CbcDec>(input, key, iv),
        }
    }

    fn encrypt(&self, plaintext: &[u8], key: &AesKey, iv: &Iv) -> Result<Vec<u8>> {
        let padded = padding::pad(plaintext, BLOCK_SIZE)?;
        self.raw_encrypt(&padded, key, iv)
    }

    fn decrypt(
        &self,
        ciphertext: &[u8],
        key: &AesKey,
        iv: &Iv,
        mode: PaddingMode,
    ) -> Result<Vec<u8>> {
        crate::require_whole_blocks(ciphertext)?;
        let padded = self.raw_decrypt(ciphertext, key, iv)?;
        padding::unpad(&padded, BLOCK_SIZE, mode).map(<[u8]>::to_vec)
    }
}

fn encrypt_with<M>(input: &[u8], key: &AesKey, iv: &Iv) -> Result<Vec<u8>>
where
    M: KeyIvInit + BlockEncryptMut,
{
    let mut handle = KeyedTransform::<M>::open(key, iv)?;
    let mut buf = input.to_vec();
    handle.encrypt_blocks(&mut buf)?;
    Ok(buf)
}

fn decrypt_with<M>(input: &[u8], key: &AesKey, iv: &Iv) -> Result<Vec<u8>>
where
    M: KeyIvInit + BlockDecryptMut,
{
    let mut handle = KeyedTransform::<M>::open(key, iv)?;
    let mut buf = input.to_vec();
    handle.decrypt_blocks(&mut buf)?;
    Ok(buf)
}
