//! Usage aggregation.
//!
//! The catalogue is the only mutable shared state of an analysis run. It
//! maps an owning type's fully-qualified name to the set of distinct member
//! signatures observed against it. Ordered containers keep iteration sorted
//! no matter what order workers insert in, which is what makes the final
//! report deterministic.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// Aggregated usages: owning type FQN -> sorted, deduplicated signatures.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct UsageCatalogue {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl UsageCatalogue {
    /// Create an empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one resolved usage. Idempotent: duplicate pairs collapse.
    pub fn record(&mut self, owning_type: &str, signature: &str) {
        self.entries
            .entry(owning_type.to_string())
            .or_default()
            .insert(signature.to_string());
    }

    /// Union another catalogue into this one (per-worker merge).
    pub fn merge(&mut self, other: UsageCatalogue) {
        for (owner, signatures) in other.entries {
            self.entries.entry(owner).or_default().extend(signatures);
        }
    }

    /// Iterate entries in lexicographic key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.entries.iter()
    }

    /// Signatures recorded for one owning type, if any.
    pub fn signatures(&self, owning_type: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(owning_type)
    }

    /// Number of owning types in the catalogue.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
