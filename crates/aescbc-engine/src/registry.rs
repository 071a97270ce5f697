//! The set of engines a context may select from.

use aescbc_core::{CipherError, Result};
use tracing::debug;

use crate::backend::Backend;
use crate::kind::BackendKind;

#[cfg(feature = "legacy")]
static LEGACY: crate::legacy::LegacyEngine = crate::legacy::LegacyEngine;
#[cfg(feature = "modern")]
static MODERN: crate::modern::ModernEngine = crate::modern::ModernEngine;

/// Engines available to this process.
///
/// [`Registry::detect`] lists what was compiled in. Narrowing a registry with
/// [`Registry::without`] models a runtime that lacks an engine.
#[derive(Clone, Debug)]
pub struct Registry {
    engines: Vec<&'static dyn Backend>,
}

impl Registry {
    /// Registry with every compiled-in engine.
    pub fn detect() -> Self {
        #[allow(unused_mut)]
        let mut engines: Vec<&'static dyn Backend> = Vec::with_capacity(2);
        #[cfg(feature = "modern")]
        engines.push(&MODERN);
        #[cfg(feature = "legacy")]
        engines.push(&LEGACY);
        let registry = Self { engines };
        debug!(engines = ?registry.kinds().collect::<Vec<_>>(), "detected cipher engines");
        registry
    }

    /// Registry with no engines.
    pub fn empty() -> Self {
        Self {
            engines: Vec::new(),
        }
    }

    /// Removes `kind` from the registry.
    #[must_use]
    pub fn without(mut self, kind: BackendKind) -> Self {
        self.engines.retain(|engine| engine.kind() != kind);
        self
    }

    /// Kinds present, in preference order.
    pub fn kinds(&self) -> impl Iterator<Item = BackendKind> + '_ {
        self.engines.iter().map(|engine| engine.kind())
    }

    /// Whether `kind` is present.
    pub fn contains(&self, kind: BackendKind) -> bool {
        self.kinds().any(|k| k == kind)
    }

    /// Returns the engine for `kind`, or [`CipherError::BackendUnavailable`].
    pub fn lookup(&self, kind: BackendKind) -> Result<&'static dyn Backend> {
        self.engines
            .iter()
            .copied()
            .find(|engine| engine.kind() == kind)
            .ok_or_else(|| CipherError::BackendUnavailable {
                kind: kind.to_string(),
            })
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::detect()
    }
}
