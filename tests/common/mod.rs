// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use zkb_dashboard::config::Config;
use zkb_dashboard::error::AppError;
use zkb_dashboard::models::{Activity, EntityId, HourlyActivity, Killmail, NameRecord, Subject};
use zkb_dashboard::routes::create_router;
use zkb_dashboard::services::{ActivitySource, DashboardService, NameResolver};
use zkb_dashboard::AppState;

pub const CHARACTER_ID: EntityId = 2115038999;
pub const CHARACTER_NAME: &str = "Ria Senn";

/// Activity report as served by the activity API.
#[allow(dead_code)]
pub const ACTIVITY_JSON: &str = r#"{
    "id": 2115038999,
    "wins": {
        "killmails": [101469879, 101470695, 101470699, 101470696],
        "total_damage": 1392545,
        "ships": { "24702": 1, "3756": 8, "28659": 4, "22456": 11 },
        "solar_systems": { "30000142": 10, "30002187": 3, "30000144": 7 }
    },
    "losses": {
        "killmails": [101487388, 101487418],
        "total_damage": 114905,
        "ships": { "47466": 2, "670": 4, "22456": 1 },
        "solar_systems": { "30000611": 2, "30004218": 2 }
    }
}"#;

#[allow(dead_code)]
pub fn sample_activity() -> Activity {
    serde_json::from_str(ACTIVITY_JSON).expect("Fixture should parse")
}

/// In-memory activity API.
#[derive(Default)]
pub struct StubActivity {
    pub activities: HashMap<EntityId, Activity>,
    pub hourly: HashMap<i32, u64>,
    pub hourly_fails: bool,
    /// (entity, ship type) → losses
    pub lost: HashMap<(EntityId, EntityId), Vec<Killmail>>,
}

#[async_trait]
impl ActivitySource for StubActivity {
    async fn activity(&self, _subject: Subject, id: EntityId) -> Result<Activity, AppError> {
        self.activities
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("No activity for {}", id)))
    }

    async fn hourly(&self, _subject: Subject, _id: EntityId) -> Result<HourlyActivity, AppError> {
        if self.hourly_fails {
            return Err(AppError::ActivityApi("HTTP 500".to_string()));
        }
        Ok(HourlyActivity::from_sparse(&self.hourly))
    }

    async fn lost_ships(
        &self,
        _subject: Subject,
        id: EntityId,
        ship: EntityId,
    ) -> Result<Vec<Killmail>, AppError> {
        self.lost
            .get(&(id, ship))
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("No losses for {} in {}", id, ship)))
    }
}

/// In-memory ESI names endpoint that records every batch it receives.
#[derive(Default)]
pub struct StubNames {
    pub names: HashMap<EntityId, String>,
    pub fails: bool,
    /// Batches containing any of these IDs never get an answer
    pub silent_for: HashSet<EntityId>,
    pub requests: Mutex<Vec<Vec<EntityId>>>,
}

#[allow(dead_code)]
impl StubNames {
    pub fn sample() -> Self {
        let names = [
            (CHARACTER_ID, CHARACTER_NAME),
            (30000142, "Jita"),
            (30002187, "Amarr"),
            (30000144, "Perimeter"),
            (30000611, "Tama"),
            (30004218, "Cleyd"),
            (24702, "Hookbill"),
            (3756, "Gnosis"),
            (28659, "Paladin"),
            (22456, "Sabre"),
            (47466, "Praxis"),
            (670, "Capsule"),
        ];
        Self {
            names: names
                .into_iter()
                .map(|(id, name)| (id, name.to_string()))
                .collect(),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fails: true,
            ..Default::default()
        }
    }

    /// Accepts every request and never answers.
    pub fn silent() -> Self {
        let mut names = Self::sample();
        names.silent_for = names.names.keys().copied().collect();
        names
    }

    pub fn requests(&self) -> Vec<Vec<EntityId>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl NameResolver for StubNames {
    async fn resolve(&self, ids: &[EntityId]) -> Result<Vec<NameRecord>, AppError> {
        self.requests.lock().unwrap().push(ids.to_vec());
        if self.fails {
            return Err(AppError::NamesApi("HTTP 503: Service Unavailable".to_string()));
        }
        if ids.iter().any(|id| self.silent_for.contains(id)) {
            return std::future::pending().await;
        }
        Ok(ids
            .iter()
            .filter_map(|id| {
                self.names.get(id).map(|name| NameRecord {
                    id: *id,
                    name: name.clone(),
                    category: "inventory_type".to_string(),
                })
            })
            .rev()
            .collect())
    }

    async fn lookup_id(
        &self,
        _subject: Subject,
        name: &str,
    ) -> Result<Option<EntityId>, AppError> {
        if self.fails {
            return Err(AppError::NamesApi("HTTP 503: Service Unavailable".to_string()));
        }
        Ok(self
            .names
            .iter()
            .find(|(_, known)| known.eq_ignore_ascii_case(name))
            .map(|(id, _)| *id))
    }
}

/// Capsule losses, two of them in Tama.
#[allow(dead_code)]
pub fn sample_losses() -> Vec<Killmail> {
    let killmail = |killmail_id, solar_system_id, damage, time: &str| Killmail {
        killmail_id,
        character_id: Some(CHARACTER_ID),
        ship_type_id: Some(670),
        damage,
        solar_system_id,
        killmail_time: time.to_string(),
        ..Default::default()
    };
    vec![
        killmail(101487388, 30000611, 812, "2026-10-01T18:22:05Z"),
        killmail(101487418, 30004218, 640, "2026-10-01T18:40:51Z"),
        killmail(101490012, 30000611, 903, "2026-10-03T17:02:13Z"),
    ]
}

#[allow(dead_code)]
pub fn sample_source() -> StubActivity {
    StubActivity {
        activities: [(CHARACTER_ID, sample_activity())].into_iter().collect(),
        hourly: [(0, 2), (17, 5), (18, 9)].into_iter().collect(),
        hourly_fails: false,
        lost: [((CHARACTER_ID, 670), sample_losses())].into_iter().collect(),
    }
}

/// Render deadline for test apps; stubs answer immediately or never.
#[allow(dead_code)]
pub const TEST_RENDER_DEADLINE: Duration = Duration::from_millis(200);

/// Create a test app over in-memory upstreams.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(
    activity: Arc<StubActivity>,
    names: Arc<StubNames>,
) -> (axum::Router, Arc<AppState>) {
    let config = Config {
        render_deadline: TEST_RENDER_DEADLINE,
        ..Config::default()
    };
    let dashboard = DashboardService::new(
        activity,
        names,
        config.top_limit,
        config.activity_window_days,
    )
    .with_render_deadline(config.render_deadline);

    let state = Arc::new(AppState { config, dashboard });

    (create_router(state.clone()), state)
}

/// Read a response body as UTF-8.
#[allow(dead_code)]
pub async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("Body should be readable");
    String::from_utf8(bytes.to_vec()).expect("Body should be UTF-8")
}
