//! The cipher context: configuration, validation and dispatch.

use aescbc_core::{AesKey, CipherError, CipherVariant, Iv, Missing, PaddingMode, Result};
use aescbc_engine::{Backend, BackendKind, Registry};
use tracing::debug;

/// AES-CBC cipher with PKCS#7 padding.
///
/// A context may be built before key and IV are known; both are checked when
/// [`encrypt`](Self::encrypt) or [`decrypt`](Self::decrypt) runs. The IV is
/// never advanced, so callers must set a fresh IV for each independent
/// message.
///
/// Reconfiguration takes `&mut self`. Share a configured context read-only
/// across threads, or give each stream its own context.
#[derive(Clone, Debug)]
pub struct CipherContext {
    key: Option<AesKey>,
    iv: Option<Iv>,
    backend: &'static dyn Backend,
    registry: Registry,
    padding_mode: PaddingMode,
}

impl CipherContext {
    /// Creates a context on the modern engine.
    ///
    /// # Errors
    ///
    /// [`CipherError::BackendUnavailable`] if the modern engine is not built.
    pub fn new() -> Result<Self> {
        Self::with_backend(BackendKind::default())
    }

    /// Creates a context on the requested engine.
    pub fn with_backend(kind: BackendKind) -> Result<Self> {
        Self::with_registry(Registry::detect(), kind)
    }

    /// Creates a context that may only select engines from `registry`.
    pub fn with_registry(registry: Registry, kind: BackendKind) -> Result<Self> {
        let backend = registry.lookup(kind)?;
        debug!(backend = %kind, "cipher context created");
        Ok(Self {
            key: None,
            iv: None,
            backend,
            registry,
            padding_mode: PaddingMode::default(),
        })
    }

    /// Starts a [`ContextBuilder`].
    pub fn builder() -> ContextBuilder {
        ContextBuilder::default()
    }

    /// Sets the key. Its length (16, 24 or 32) selects AES-128/192/256.
    pub fn set_key(&mut self, key: &[u8]) -> Result<()> {
        let key = AesKey::from_slice(key)?;
        debug!(variant = %key.variant(), "key configured");
        self.key = Some(key);
        Ok(())
    }

    /// Sets the 16-byte IV.
    pub fn set_iv(&mut self, iv: &[u8]) -> Result<()> {
        self.iv = Some(Iv::from_slice(iv)?);
        debug!("iv configured");
        Ok(())
    }

    /// Returns the key, or [`CipherError::NotConfigured`] if none was set.
    pub fn key(&self) -> Result<&AesKey> {
        self.key
            .as_ref()
            .ok_or(CipherError::NotConfigured(Missing::Key))
    }

    /// Returns the IV, or [`CipherError::NotConfigured`] if none was set.
    pub fn iv(&self) -> Result<&Iv> {
        self.iv.as_ref().ok_or(CipherError::NotConfigured(Missing::Iv))
    }

    /// Variant selected by the current key, if any.
    pub fn variant(&self) -> Option<CipherVariant> {
        self.key.as_ref().map(AesKey::variant)
    }

    /// Switches engine. On failure the current engine stays selected.
    pub fn select_backend(&mut self, kind: BackendKind) -> Result<()> {
        match self.registry.lookup(kind) {
            Ok(backend) => {
                debug!(from = %self.backend.kind(), to = %kind, "backend selected");
                self.backend = backend;
                Ok(())
            }
            Err(err) => {
                debug!(requested = %kind, current = %self.backend.kind(), "backend unavailable");
                Err(err)
            }
        }
    }

    /// Currently selected engine.
    pub fn backend(&self) -> BackendKind {
        self.backend.kind()
    }

    /// Sets how padding is checked when it is removed outside the engine.
    ///
    /// Only the legacy engine unpads outside the primitive. The modern
    /// engine always unpads strictly and ignores this setting.
    pub fn set_padding_mode(&mut self, mode: PaddingMode) {
        self.padding_mode = mode;
    }

    /// Current padding mode.
    pub fn padding_mode(&self) -> PaddingMode {
        self.padding_mode
    }

    /// Encrypts `plaintext` of any length.
    ///
    /// The result is a non-empty multiple of 16 bytes.
    ///
    /// # Errors
    ///
    /// [`CipherError::NotConfigured`] if key or IV is missing.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let key = self.key()?;
        let iv = self.iv()?;
        self.backend.encrypt(plaintext, key, iv)
    }

    /// Decrypts `ciphertext` and strips its padding.
    ///
    /// # Errors
    ///
    /// [`CipherError::NotConfigured`] if key or IV is missing,
    /// [`CipherError::InvalidDataLength`] if the ciphertext is not a
    /// non-empty multiple of 16 bytes, [`CipherError::PaddingError`] if the
    /// padding is malformed.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let key = self.key()?;
        let iv = self.iv()?;
        self.backend.decrypt(ciphertext, key, iv, self.padding_mode)
    }
}

/// Collects configuration and validates it in [`build`](Self::build).
#[derive(Debug, Default)]
pub struct ContextBuilder {
    key: Option<AesKey>,
    iv: Option<Iv>,
    backend: BackendKind,
    padding_mode: PaddingMode,
    registry: Option<Registry>,
    error: Option<CipherError>,
}

impl ContextBuilder {
    /// Key bytes.
    pub fn key(mut self, key: &[u8]) -> Self {
        match AesKey::from_slice(key) {
            Ok(key) => self.key = Some(key),
            Err(err) => self.record(err),
        }
        self
    }

    /// IV bytes.
    pub fn iv(mut self, iv: &[u8]) -> Self {
        match Iv::from_slice(iv) {
            Ok(iv) => self.iv = Some(iv),
            Err(err) => self.record(err),
        }
        self
    }

    /// Engine to select.
    pub fn backend(mut self, kind: BackendKind) -> Self {
        self.backend = kind;
        self
    }

    /// Padding mode for engines that unpad outside the primitive. Ignored by
    /// the modern engine, which always unpads strictly.
    pub fn padding_mode(mut self, mode: PaddingMode) -> Self {
        self.padding_mode = mode;
        self
    }

    /// Engines to choose from. Defaults to [`Registry::detect`].
    pub fn registry(mut self, registry: Registry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Builds the context, returning the first error recorded.
    pub fn build(self) -> Result<CipherContext> {
        if let Some(err) = self.error {
            return Err(err);
        }
        let registry = self.registry.unwrap_or_default();
        let mut ctx = CipherContext::with_registry(registry, self.backend)?;
        ctx.key = self.key;
        ctx.iv = self.iv;
        ctx.padding_mode = self.padding_mode;
        Ok(ctx)
    }

    fn record(&mut self, err: CipherError) {
        self.error.get_or_insert(err);
    }
}
