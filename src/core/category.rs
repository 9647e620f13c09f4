use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// First-seen ordinal positions for the distinct strings of one axis.
///
/// Each axis owns its own index; indices are never shared between axes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryIndex {
    positions: IndexMap<String, usize>,
}

impl CategoryIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the position of `value`, assigning the next one if unseen.
    pub fn index_of(&mut self, value: &str) -> usize {
        if let Some(&position) = self.positions.get(value) {
            return position;
        }
        let position = self.positions.len();
        self.positions.insert(value.to_owned(), position);
        position
    }

    #[must_use]
    pub fn get(&self, value: &str) -> Option<usize> {
        self.positions.get(value).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Distinct values in position order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.positions.keys().map(String::as_str)
    }

    #[must_use]
    pub fn as_map(&self) -> &IndexMap<String, usize> {
        &self.positions
    }
}

/// Encodes a whole sequence at once; returns the mapping and the distinct count.
#[must_use]
pub fn assign<'a, I>(values: I) -> (IndexMap<String, usize>, usize)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut index = CategoryIndex::new();
    for value in values {
        index.index_of(value);
    }
    let count = index.len();
    (index.positions, count)
}
