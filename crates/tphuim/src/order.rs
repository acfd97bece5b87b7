//! Global item order: ascending TWU, ties broken by ascending item id.
//!
//! The same rank table drives candidate enumeration, target-pattern matching and
//! the per-transaction item order of pass 2.

use std::collections::HashMap;

use crate::types::{Item, Rank, Utility};

/// Explicit total-order key; field order gives (twu, item) lexicographic comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderKey {
    pub twu: Utility,
    pub item: Item,
}

/// Rank table over the promising items (ranks `1..=len`).
#[derive(Clone, Debug, Default)]
pub struct ItemOrder {
    ranked: Vec<Item>,
    ranks: HashMap<Item, Rank>,
}

impl ItemOrder {
    pub fn from_twu<I>(items: I) -> Self
    where
        I: IntoIterator<Item = (Item, Utility)>,
    {
        let mut keys: Vec<OrderKey> = items
            .into_iter()
            .map(|(item, twu)| OrderKey { twu, item })
            .collect();
        keys.sort_unstable();
        let ranked: Vec<Item> = keys.iter().map(|k| k.item).collect();
        let ranks = ranked
            .iter()
            .enumerate()
            .map(|(idx, &item)| (item, idx as Rank + 1))
            .collect();
        Self { ranked, ranks }
    }

    #[inline]
    pub fn rank(&self, item: Item) -> Option<Rank> {
        self.ranks.get(&item).copied()
    }

    /// Rank used for sorting; unranked items sort after every ranked one.
    #[inline]
    pub fn sort_rank(&self, item: Item) -> Rank {
        self.rank(item).unwrap_or(Rank::MAX)
    }

    #[inline]
    pub fn contains(&self, item: Item) -> bool {
        self.ranks.contains_key(&item)
    }

    /// Items in ascending rank.
    #[inline]
    pub fn items(&self) -> &[Item] {
        &self.ranked
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    pub fn sort_items(&self, items: &mut [Item]) {
        items.sort_unstable_by_key(|&i| (self.sort_rank(i), i));
    }

    pub fn sort_pairs(&self, pairs: &mut [(Item, Utility)]) {
        pairs.sort_unstable_by_key(|&(i, _)| (self.sort_rank(i), i));
    }
}
