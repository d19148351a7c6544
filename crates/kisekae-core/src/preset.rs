//! Growable, ordered collections of selectable images.

use crate::asset::Asset;

/// Candidate images for one wizard step (people or clothing).
///
/// Order is meaningful: generated clothing is prepended so the newest
/// design shows first. Duplicates are allowed and nothing is ever
/// removed during a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresetRegistry {
    items: Vec<Asset>,
}

impl PresetRegistry {
    /// Create a registry holding `items` in the given order.
    #[must_use]
    pub const fn new(items: Vec<Asset>) -> Self {
        Self { items }
    }

    /// All presets, first shown first.
    #[must_use]
    pub fn list(&self) -> &[Asset] {
        &self.items
    }

    /// Insert `asset` at index 0, shifting the rest back by one.
    pub fn prepend(&mut self, asset: Asset) {
        self.items.insert(0, asset);
    }

    /// Append presets that finished loading after startup.
    pub fn extend(&mut self, assets: impl IntoIterator<Item = Asset>) {
        self.items.extend(assets);
    }

    /// The preset at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Asset> {
        self.items.get(index)
    }

    /// Number of presets.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` when there are no presets.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Asset> for PresetRegistry {
    fn from_iter<I: IntoIterator<Item = Asset>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
