// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Name records returned by ESI `/universe/names/` and `/universe/ids/`.

use crate::models::activity::Subject;
use crate::models::counts::EntityId;
use serde::{Deserialize, Serialize};

/// One resolved entity name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRecord {
    pub id: EntityId,
    pub name: String,
    /// ESI category ("solar_system", "inventory_type", ...)
    #[serde(default)]
    pub category: String,
}

/// An `{id, name}` pair from `/universe/ids/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRecord {
    pub id: EntityId,
    pub name: String,
}

/// `/universe/ids/` response. Categories with no match are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniverseIds {
    #[serde(default)]
    pub characters: Vec<IdRecord>,
    #[serde(default)]
    pub corporations: Vec<IdRecord>,
    #[serde(default)]
    pub alliances: Vec<IdRecord>,
}

impl UniverseIds {
    pub fn for_subject(&self, subject: Subject) -> &[IdRecord] {
        match subject {
            Subject::Character => &self.characters,
            Subject::Corporation => &self.corporations,
            Subject::Alliance => &self.alliances,
        }
    }

    /// ID whose name matches `name`, ignoring case as ESI does.
    pub fn find(&self, subject: Subject, name: &str) -> Option<EntityId> {
        self.for_subject(subject)
            .iter()
            .find(|record| record.name.eq_ignore_ascii_case(name))
            .map(|record| record.id)
    }
}
