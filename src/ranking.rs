// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Top-N ranking of occurrence counts.
//!
//! Sorting is stable on the count alone, so entries with equal counts keep
//! the order in which the source mapping yielded them.

use serde::Serialize;

/// One ranked entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ranked<K> {
    pub id: K,
    pub count: u64,
}

/// Entries sorted by descending count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RankedMap<K> {
    entries: Vec<Ranked<K>>,
}

impl<K> Default for RankedMap<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: PartialEq> RankedMap<K> {
    /// Count for `id`, if it made the ranking.
    pub fn get(&self, id: &K) -> Option<u64> {
        self.entries
            .iter()
            .find(|entry| entry.id == *id)
            .map(|entry| entry.count)
    }
}

impl<K> RankedMap<K> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Ranked<K>> {
        self.entries.iter()
    }

    /// IDs in rank order.
    pub fn ids(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.entries.iter().map(|entry| entry.id.clone()).collect()
    }

    /// `(id, count)` pairs in rank order.
    pub fn to_pairs(&self) -> Vec<(K, u64)>
    where
        K: Clone,
    {
        self.entries
            .iter()
            .map(|entry| (entry.id.clone(), entry.count))
            .collect()
    }
}

impl<'a, K> IntoIterator for &'a RankedMap<K> {
    type Item = &'a Ranked<K>;
    type IntoIter = std::slice::Iter<'a, Ranked<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Sort every entry by descending count.
pub fn sort_by_count<K, I>(entries: I) -> RankedMap<K>
where
    I: IntoIterator<Item = (K, u64)>,
{
    let mut entries: Vec<Ranked<K>> = entries
        .into_iter()
        .map(|(id, count)| Ranked { id, count })
        .collect();
    // `sort_by` is stable
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    RankedMap { entries }
}

/// The `limit` most frequent entries, most frequent first.
pub fn most_active<K, I>(entries: I, limit: usize) -> RankedMap<K>
where
    I: IntoIterator<Item = (K, u64)>,
{
    let mut ranked = sort_by_count(entries);
    ranked.entries.truncate(limit);
    ranked
}
