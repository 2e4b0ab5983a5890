//! Pack manifest handed to the packing step.
//!
//! Each entry describes one staged add-in: its descriptor, the name the
//! packed loader should get, and where its config was (or would have been)
//! staged.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One staged add-in to be packed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackEntry {
    /// Staged descriptor.
    pub descriptor: PathBuf,

    /// Output name of the packed loader.
    pub loader: PathBuf,

    /// Staged loader config. May not exist when no config was found.
    pub config: PathBuf,
}

/// Ordered list of add-ins to pack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackManifest {
    entries: Vec<PackEntry>,
}

impl PackManifest {
    /// Create an empty manifest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, entry: PackEntry) {
        self.entries.push(entry);
    }

    /// Entries in staging order.
    #[must_use]
    pub fn entries(&self) -> &[PackEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the manifest is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

}

impl<'a> IntoIterator for &'a PackManifest {
    type Item = &'a PackEntry;
    type IntoIter = std::slice::Iter<'a, PackEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
