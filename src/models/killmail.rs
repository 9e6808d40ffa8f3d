// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Individual killmails from the activity API's lost-ships endpoint.

use crate::models::counts::EntityId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Killmail {
    pub killmail_id: EntityId,
    #[serde(default)]
    pub character_id: Option<EntityId>,
    #[serde(default)]
    pub corporation_id: Option<EntityId>,
    #[serde(default)]
    pub alliance_id: Option<EntityId>,
    #[serde(default)]
    pub ship_type_id: Option<EntityId>,
    #[serde(default)]
    pub damage: u64,
    pub solar_system_id: EntityId,
    #[serde(default)]
    pub killmail_time: String,
}

/// Drop repeated killmail IDs, keeping the first occurrence.
pub fn dedup_killmails(killmails: Vec<Killmail>) -> Vec<Killmail> {
    let mut seen = std::collections::HashSet::new();
    killmails
        .into_iter()
        .filter(|killmail| seen.insert(killmail.killmail_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_lost_killmail() {
        let json = r#"[{
            "killmail_id": 101487388,
            "character_id": 2115038999,
            "corporation_id": 98573194,
            "alliance_id": null,
            "ship_type_id": 670,
            "damage": 812,
            "is_victim": 1,
            "solar_system_id": 30000611,
            "killmail_time": "2026-10-01T18:22:05Z"
        }]"#;
        let killmails: Vec<Killmail> = serde_json::from_str(json).unwrap();

        assert_eq!(killmails[0].ship_type_id, Some(670));
        assert_eq!(killmails[0].alliance_id, None);
        assert_eq!(killmails[0].damage, 812);
    }

    #[test]
    fn test_dedup_keeps_first() {
        let killmail = |id, damage| Killmail {
            killmail_id: id,
            damage,
            ..Default::default()
        };
        let unique = dedup_killmails(vec![killmail(1, 10), killmail(2, 20), killmail(1, 30)]);

        assert_eq!(unique, vec![killmail(1, 10), killmail(2, 20)]);
    }
}
