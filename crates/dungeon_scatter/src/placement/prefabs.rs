//! Weighted random prefab selection per category.
use rand::RngCore;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::placement::{Category, PrefabKey};
use crate::rng::rand01;

/// A category-tagged, weighted prefab key.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct PrefabEntry {
    pub category: Category,
    pub key: PrefabKey,
    /// Selection weight in `[0, 1]`; zero-weight entries are never drawn.
    pub weight: f32,
}

/// Weighted random selection among category-tagged prefab entries.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default)]
pub struct WeightedPrefabTable {
    entries: Vec<PrefabEntry>,
}

impl WeightedPrefabTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an entry, clamping its weight into `[0, 1]`.
    pub fn with_entry(mut self, category: Category, key: impl Into<PrefabKey>, weight: f32) -> Self {
        self.entries.push(PrefabEntry {
            category,
            key: key.into(),
            weight: weight.clamp(0.0, 1.0),
        });
        self
    }

    pub fn entries(&self) -> &[PrefabEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Draws a weighted-random key for `category`.
    ///
    /// Entries are filtered to the category with weight > 0; an empty
    /// candidate set returns `None` without consuming the RNG. The draw
    /// walks cumulative weights and falls back to the last eligible entry to
    /// absorb floating-point rounding past the final sum.
    pub fn sample<R: RngCore>(&self, rng: &mut R, category: Category) -> Option<&str> {
        let eligible: Vec<&PrefabEntry> = self
            .entries
            .iter()
            .filter(|e| e.category == category && e.weight > 0.0)
            .collect();

        let last = eligible.last()?;

        let total: f32 = eligible.iter().map(|e| e.weight).sum();
        let roll = rand01(rng) * total;

        let mut cumulative = 0.0;
        for entry in &eligible {
            cumulative += entry.weight;
            if roll <= cumulative {
                return Some(&entry.key);
            }
        }

        Some(&last.key)
    }
}
