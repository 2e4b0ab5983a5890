//! Input classification.

use crate::{CONFIG_EXTENSION, DESCRIPTOR_EXTENSION};
use std::collections::HashMap;
use std::path::Path;

/// Project inputs partitioned by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSet {
    /// Descriptor (`.dna`) files, sorted by path.
    pub descriptors: Vec<String>,

    /// Configuration (`.config`) files, sorted by path.
    pub configs: ConfigCandidateSet,
}

/// Sorted, read-only set of configuration files with case-insensitive lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigCandidateSet {
    paths: Vec<String>,
    index: HashMap<String, usize>,
}

impl ConfigCandidateSet {
    /// Build the set from config paths in any order.
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut paths: Vec<String> = paths.into_iter().map(Into::into).collect();
        paths.sort();
        paths.dedup();

        let mut index = HashMap::with_capacity(paths.len());
        for (i, path) in paths.iter().enumerate() {
            // First path in sorted order wins for names that differ only in case
            index.entry(path.to_lowercase()).or_insert(i);
        }

        Self { paths, index }
    }

    /// Find the candidate matching `name`, ignoring case.
    ///
    /// Returns the path as it was listed in the project.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&str> {
        self.index
            .get(&name.to_lowercase())
            .map(|&i| self.paths[i].as_str())
    }

    /// Check whether a candidate matches `name`, ignoring case.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(&name.to_lowercase())
    }

    /// Iterate over the candidates in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    /// Number of candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Partition `inputs` into descriptors and configuration files.
///
/// Extensions are compared case-insensitively. Both lists are sorted so that
/// the result does not depend on the order the project listed its files in.
pub fn classify<S: AsRef<str>>(inputs: &[S]) -> InputSet {
    let mut descriptors = Vec::new();
    let mut configs = Vec::new();

    for input in inputs {
        let input = input.as_ref();
        if has_extension(input, DESCRIPTOR_EXTENSION) {
            descriptors.push(input.to_string());
        } else if has_extension(input, CONFIG_EXTENSION) {
            configs.push(input);
        }
    }

    descriptors.sort();
    descriptors.dedup();

    InputSet {
        descriptors,
        configs: ConfigCandidateSet::new(configs),
    }
}

fn has_extension(path: &str, extension: &str) -> bool {
    Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}
