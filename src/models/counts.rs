// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Entity-ID → count mappings that remember document order.
//!
//! The activity API sends `ships` and `solar_systems` as JSON objects keyed
//! by numeric strings. Ranking breaks ties by the order keys appear in the
//! document, so we decode into an `IndexMap` rather than a `HashMap`.

use indexmap::IndexMap;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// EVE entity identifier (ship type, solar system, character, ...).
pub type EntityId = i64;

/// Ordered occurrence counts keyed by entity ID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountMap {
    entries: IndexMap<EntityId, u64>,
}

impl CountMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` to `id`, appending it if this is the first occurrence.
    pub fn add(&mut self, id: EntityId, count: u64) {
        *self.entries.entry(id).or_insert(0) += count;
    }

    pub fn get(&self, id: EntityId) -> Option<u64> {
        self.entries.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, u64)> + '_ {
        self.into_iter()
    }
}

impl FromIterator<(EntityId, u64)> for CountMap {
    fn from_iter<I: IntoIterator<Item = (EntityId, u64)>>(iter: I) -> Self {
        let mut map = CountMap::new();
        for (id, count) in iter {
            map.add(id, count);
        }
        map
    }
}

fn copy_entry((id, count): (&EntityId, &u64)) -> (EntityId, u64) {
    (*id, *count)
}

impl<'a> IntoIterator for &'a CountMap {
    type Item = (EntityId, u64);
    type IntoIter = std::iter::Map<
        indexmap::map::Iter<'a, EntityId, u64>,
        fn((&'a EntityId, &'a u64)) -> (EntityId, u64),
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter().map(copy_entry as fn(_) -> _)
    }
}

impl Serialize for CountMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, count) in &self.entries {
            map.serialize_entry(&id.to_string(), count)?;
        }
        map.end()
    }
}

struct CountMapVisitor;

impl<'de> Visitor<'de> for CountMapVisitor {
    type Value = CountMap;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object mapping numeric entity IDs to counts")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = CountMap {
            entries: IndexMap::with_capacity(access.size_hint().unwrap_or(0)),
        };
        while let Some((key, count)) = access.next_entry::<String, u64>()? {
            let id = key
                .parse::<EntityId>()
                .map_err(|_| de::Error::custom(format!("invalid entity id: {key:?}")))?;
            map.add(id, count);
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for CountMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CountMapVisitor)
    }
}
