//! Shared building blocks for the aescbc workspace.
//!
//! This crate holds everything that does not depend on a particular
//! cryptographic engine:
//! - Validated key ([`AesKey`]) and IV ([`Iv`]) types.
//! - The [`CipherVariant`] a key length selects.
//! - The PKCS#7 codec in [`padding`].
//! - The [`CipherError`] taxonomy used by every crate in the workspace.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod error;
mod key;
pub mod padding;

pub use crate::block::{Block, Iv, BLOCK_SIZE};
pub use crate::error::{CipherError, Missing, PaddingFault, Result};
pub use crate::key::{AesKey, CipherVariant, KEY_128, KEY_192, KEY_256};
pub use crate::padding::PaddingMode;
