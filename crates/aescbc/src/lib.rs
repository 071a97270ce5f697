//! AES-CBC encryption with PKCS#7 padding over interchangeable engines.
//!
//! [`CipherContext`] validates key and IV, remembers which engine to use and
//! exposes `encrypt`/`decrypt`. Whether the engine pads internally or needs
//! the plaintext padded first is invisible to callers: both produce the same
//! bytes for the same key, IV and plaintext.
//!
//! ```
//! use aescbc::{BackendKind, CipherContext};
//!
//! let mut ctx = CipherContext::new().unwrap();
//! ctx.set_key(b"0123456789abcdef").unwrap();
//! ctx.set_iv(b"fedcba9876543210").unwrap();
//!
//! let ciphertext = ctx.encrypt(b"attack at dawn").unwrap();
//! assert_eq!(ciphertext.len(), 16);
//!
//! ctx.select_backend(BackendKind::Legacy).unwrap();
//! assert_eq!(ctx.decrypt(&ciphertext).unwrap(), b"attack at dawn");
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod context;

pub use crate::context::{CipherContext, ContextBuilder};
pub use aescbc_core::padding::{self, pad, unpad, unpad_permissive, unpad_strict};
pub use aescbc_core::{
    AesKey, Block, CipherError, CipherVariant, Iv, Missing, PaddingFault, PaddingMode, Result,
    BLOCK_SIZE, KEY_128, KEY_192, KEY_256,
};
pub use aescbc_engine::{Backend, BackendKind, Registry};
#[cfg(feature = "legacy")]
pub use aescbc_engine::LegacyEngine;
#[cfg(feature = "modern")]
pub use aescbc_engine::ModernEngine;
