//! The capability every AES-CBC engine provides.

use core::fmt;

use aescbc_core::{AesKey, Iv, PaddingMode, Result};

use crate::kind::BackendKind;

/// An AES-CBC engine.
///
/// `raw_encrypt`/`raw_decrypt` expose whatever the engine natively does. The
/// provided `encrypt`/`decrypt` are the padded, caller-facing operations; the
/// defaults pass straight through, which is correct for engines that pad
/// internally. Engines that only transform whole blocks override them to
/// apply PKCS#7 around the raw calls.
///
/// Engines hold no keyed state between calls. Any per-call resource must be
/// released before the call returns, on every path.
pub trait Backend: fmt::Debug + Send + Sync {
    /// Kind of this engine.
    fn kind(&self) -> BackendKind;

    /// Runs the engine's native encrypt. The variant is taken from `key`.
    fn raw_encrypt(&self, input: &[u8], key: &AesKey, iv: &Iv) -> Result<Vec<u8>>;

    /// Runs the engine's native decrypt. The variant is taken from `key`.
    fn raw_decrypt(&self, input: &[u8], key: &AesKey, iv: &Iv) -> Result<Vec<u8>>;

    /// Encrypts arbitrary-length plaintext into padded ciphertext.
    fn encrypt(&self, plaintext: &[u8], key: &AesKey, iv: &Iv) -> Result<Vec<u8>> {
        self.raw_encrypt(plaintext, key, iv)
    }

    /// Decrypts padded ciphertext. `mode` only matters to engines that unpad
    /// outside the primitive; internal unpadding is always strict.
    fn decrypt(
        &self,
        ciphertext: &[u8],
        key: &AesKey,
        iv: &Iv,
        _mode: PaddingMode,
    ) -> Result<Vec<u8>> {
        self.raw_decrypt(ciphertext, key, iv)
    }
}
