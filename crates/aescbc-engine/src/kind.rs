//! Backend selector.

use core::fmt;
use core::str::FromStr;

use aescbc_core::CipherError;

/// Engine family used to perform AES-CBC.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BackendKind {
    /// Engine that pads internally and runs each operation as one call.
    #[default]
    Modern,
    /// Engine that only transforms whole blocks through a per-call keyed
    /// handle; padding is applied around it.
    Legacy,
}

impl BackendKind {
    /// Every known kind, preferred first.
    pub const ALL: [BackendKind; 2] = [BackendKind::Modern, BackendKind::Legacy];

    /// Numeric selector of the legacy engine.
    pub const SELECTOR_LEGACY: u32 = 1;
    /// Numeric selector of the modern engine.
    pub const SELECTOR_MODERN: u32 = 2;

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            BackendKind::Modern => "modern",
            BackendKind::Legacy => "legacy",
        }
    }

    /// Maps a numeric selector (`1` legacy, `2` modern) to a kind.
    pub fn from_selector(selector: u32) -> Result<Self, CipherError> {
        match selector {
            Self::SELECTOR_LEGACY => Ok(BackendKind::Legacy),
            Self::SELECTOR_MODERN => Ok(BackendKind::Modern),
            other => Err(CipherError::InvalidBackendSelector(other.to_string())),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "modern" | "openssl" => Ok(BackendKind::Modern),
            "legacy" | "mcrypt" => Ok(BackendKind::Legacy),
            _ => Err(CipherError::InvalidBackendSelector(s.to_string())),
        }
    }
}

impl TryFrom<u32> for BackendKind {
    type Error = CipherError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::from_selector(value)
    }
}
