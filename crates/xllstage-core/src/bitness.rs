//! Bit-width identification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bit-width of an Excel add-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bitness {
    /// 32-bit Excel.
    X86,
    /// 64-bit Excel.
    X64,
}

impl Bitness {
    /// Get the short key string ("32" or "64").
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::X86 => "32",
            Self::X64 => "64",
        }
    }

    /// All bit-widths in staging order.
    #[must_use]
    pub fn all() -> &'static [Bitness] {
        &[Self::X86, Self::X64]
    }
}

impl fmt::Display for Bitness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.as_str())
    }
}
