// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Killboard activity model as served by the activity API.

use crate::models::counts::{CountMap, EntityId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Number of hour-of-day buckets in an hourly breakdown.
pub const HOURS_PER_DAY: usize = 24;

/// Which kind of entity an activity report describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Character,
    Corporation,
    Alliance,
}

impl Subject {
    /// Path segment used by the activity API and our routes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Character => "character",
            Subject::Corporation => "corporation",
            Subject::Alliance => "alliance",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Subject {
    type Err = UnknownSubject;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "character" => Ok(Subject::Character),
            "corporation" => Ok(Subject::Corporation),
            "alliance" => Ok(Subject::Alliance),
            other => Err(UnknownSubject(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown subject: {0}")]
pub struct UnknownSubject(pub String);

/// Aggregated kills or losses over the activity window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityReport {
    /// Killmail IDs (not every upstream sends these)
    #[serde(default)]
    pub killmails: Vec<EntityId>,
    /// Killmail count when `killmails` is omitted
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub total_damage: u64,
    /// Ship type ID → occurrences
    #[serde(default)]
    pub ships: CountMap,
    /// Solar system ID → occurrences
    #[serde(default)]
    pub solar_systems: CountMap,
}

impl ActivityReport {
    /// Number of killmails in this report.
    pub fn count(&self) -> u64 {
        if self.total_count > 0 {
            self.total_count
        } else {
            self.killmails.len() as u64
        }
    }
}

/// Wins and losses for one entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: EntityId,
    #[serde(default)]
    pub wins: ActivityReport,
    #[serde(default)]
    pub losses: ActivityReport,
}

impl Activity {
    /// Share of combats won, e.g. `"81.08%"`. Empty when there were none.
    pub fn wins_percent(&self) -> String {
        percent(self.wins.count(), self.wins.count() + self.losses.count())
    }

    pub fn losses_percent(&self) -> String {
        percent(self.losses.count(), self.wins.count() + self.losses.count())
    }

    pub fn damage_dealt_percent(&self) -> String {
        percent(
            self.wins.total_damage,
            self.wins.total_damage + self.losses.total_damage,
        )
    }

    pub fn damage_received_percent(&self) -> String {
        percent(
            self.losses.total_damage,
            self.wins.total_damage + self.losses.total_damage,
        )
    }
}

fn percent(part: u64, total: u64) -> String {
    if total == 0 {
        return String::new();
    }
    format!("{:.2}%", 100.0 * part as f64 / total as f64)
}

/// Killmail counts per hour of day (UTC).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HourlyActivity {
    pub counts: [u64; HOURS_PER_DAY],
}

impl HourlyActivity {
    /// Build from the sparse hour → count map the activity API returns.
    ///
    /// Hours outside `0..24` are dropped.
    pub fn from_sparse(map: &HashMap<i32, u64>) -> Self {
        let mut counts = [0u64; HOURS_PER_DAY];
        for (&hour, &count) in map {
            if let Some(slot) = usize::try_from(hour)
                .ok()
                .and_then(|h| counts.get_mut(h))
            {
                *slot = count;
            }
        }
        Self { counts }
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}
