//! Emission decisions.
//!
//! A generically named descriptor must not overwrite a variant the project
//! author wrote by hand. With `Book.dna` and `Book32.dna` in the project,
//! `Book32.dna` is staged as the 32-bit add-in and `Book.dna` only provides
//! the 64-bit one.

use crate::{Bitness, BuildItemSpec, StageConfig};
use serde::Serialize;
use std::collections::HashMap;

/// One `(item, bitness)` pair accepted for staging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlannedItem<'a> {
    pub item: &'a BuildItemSpec,
    pub bitness: Bitness,
}

/// Ordered list of everything the stager will emit.
///
/// All 32-bit entries come first, followed by all 64-bit entries; within each
/// bit-width the descriptor order is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StagingPlan<'a> {
    entries: Vec<PlannedItem<'a>>,
}

/// Case-insensitive index from descriptor name to the items listing it.
struct DescriptorIndex {
    by_name: HashMap<String, Vec<usize>>,
}

impl DescriptorIndex {
    fn new(items: &[BuildItemSpec]) -> Self {
        let mut by_name: HashMap<String, Vec<usize>> = HashMap::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            by_name
                .entry(item.input_descriptor.to_lowercase())
                .or_default()
                .push(i);
        }

        Self { by_name }
    }

    /// Whether an item other than `self_index` is named `name`, ignoring case.
    fn has_other(&self, name: &str, self_index: usize) -> bool {
        self.by_name
            .get(&name.to_lowercase())
            .is_some_and(|indices| indices.iter().any(|&i| i != self_index))
    }
}

impl<'a> StagingPlan<'a> {
    /// Decide which items to emit for each enabled bit-width.
    pub fn build(items: &'a [BuildItemSpec], config: &StageConfig) -> Self {
        let index = DescriptorIndex::new(items);
        let mut entries = Vec::new();

        for &bitness in Bitness::all() {
            if !config.is_enabled(bitness) {
                continue;
            }

            for (i, item) in items.iter().enumerate() {
                if should_emit(item, i, bitness, &index) {
                    entries.push(PlannedItem { item, bitness });
                }
            }
        }

        Self { entries }
    }

    /// Planned entries in staging order.
    #[must_use]
    pub fn entries(&self) -> &[PlannedItem<'a>] {
        &self.entries
    }

    /// Planned entries for one bit-width.
    pub fn for_bitness(&self, bitness: Bitness) -> impl Iterator<Item = &PlannedItem<'a>> {
        self.entries.iter().filter(move |e| e.bitness == bitness)
    }

    /// Whether `descriptor` is planned for `bitness`.
    #[must_use]
    pub fn contains(&self, descriptor: &str, bitness: Bitness) -> bool {
        self.for_bitness(bitness)
            .any(|e| e.item.input_descriptor == descriptor)
    }

    /// Number of planned entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is planned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn should_emit(item: &BuildItemSpec, index: usize, bitness: Bitness, names: &DescriptorIndex) -> bool {
    if item.is_canonical_for(bitness) {
        return true;
    }

    !names.has_other(&item.variant(bitness).input_descriptor, index)
}
