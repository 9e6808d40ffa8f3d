// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Entity name resolution via ESI.
//!
//! Endpoints used:
//! - `POST /universe/names/` — IDs to names
//! - `POST /universe/ids/` — exact names to character, corporation or
//!   alliance IDs

use crate::error::AppError;
use crate::models::{EntityId, NameRecord, Subject, UniverseIds};
use async_trait::async_trait;
use dashmap::DashMap;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Resolves numeric entity IDs to display names and back.
#[async_trait]
pub trait NameResolver: Send + Sync {
    /// Look up names for a batch of IDs. The response order is unspecified.
    async fn resolve(&self, ids: &[EntityId]) -> Result<Vec<NameRecord>, AppError>;

    /// ID of the subject with exactly this name, if there is one.
    async fn lookup_id(&self, subject: Subject, name: &str)
        -> Result<Option<EntityId>, AppError>;
}

/// Cache key for name lookups; ESI matches names case-insensitively.
type IdKey = (Subject, String);

fn id_key(subject: Subject, name: &str) -> IdKey {
    (subject, name.to_lowercase())
}

/// ESI client with process-wide caches in both directions.
///
/// Entity names never change, so every resolved record is kept for the
/// lifetime of the process.
#[derive(Clone)]
pub struct EsiNamesClient {
    http: reqwest::Client,
    url: String,
    ids_url: String,
    cache: Arc<DashMap<EntityId, NameRecord>>,
    id_cache: Arc<DashMap<IdKey, EntityId>>,
}

impl EsiNamesClient {
    pub fn new(esi_url: &str, datasource: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: format!("{}/universe/names/?datasource={}", esi_url, datasource),
            ids_url: format!("{}/universe/ids/?datasource={}", esi_url, datasource),
            cache: Arc::new(DashMap::new()),
            id_cache: Arc::new(DashMap::new()),
        }
    }

    pub fn cached(&self, id: EntityId) -> Option<NameRecord> {
        self.cache.get(&id).map(|entry| entry.value().clone())
    }

    pub fn cached_id(&self, subject: Subject, name: &str) -> Option<EntityId> {
        self.id_cache
            .get(&id_key(subject, name))
            .map(|entry| *entry.value())
    }

    fn remember_ids(&self, ids: &UniverseIds) {
        for subject in [Subject::Character, Subject::Corporation, Subject::Alliance] {
            for record in ids.for_subject(subject) {
                self.id_cache.insert(id_key(subject, &record.name), record.id);
            }
        }
    }

    async fn post_names(&self, ids: &[EntityId]) -> Result<Vec<NameRecord>, AppError> {
        tracing::debug!(url = %self.url, count = ids.len(), "Resolving names");
        self.post_json(&self.url, ids).await
    }

    /// POST a JSON body to ESI and decode the JSON response.
    async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T, AppError>
    where
        B: serde::Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::NamesApi(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::NamesApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::NamesApi(format!("JSON parse error: {}", e)))
    }
}

/// Sorted, deduplicated copy of `ids`.
pub fn unique_ids(ids: &[EntityId]) -> Vec<EntityId> {
    let mut unique = ids.to_vec();
    unique.sort_unstable();
    unique.dedup();
    unique
}

#[async_trait]
impl NameResolver for EsiNamesClient {
    async fn resolve(&self, ids: &[EntityId]) -> Result<Vec<NameRecord>, AppError> {
        let mut records = Vec::new();
        let mut missing = Vec::new();
        for id in unique_ids(ids) {
            match self.cached(id) {
                Some(record) => records.push(record),
                None => missing.push(id),
            }
        }

        if missing.is_empty() {
            return Ok(records);
        }

        let fetched = self.post_names(&missing).await?;
        for record in &fetched {
            self.cache.insert(record.id, record.clone());
        }
        records.extend(fetched);
        Ok(records)
    }

    async fn lookup_id(
        &self,
        subject: Subject,
        name: &str,
    ) -> Result<Option<EntityId>, AppError> {
        if let Some(id) = self.cached_id(subject, name) {
            return Ok(Some(id));
        }

        tracing::debug!(url = %self.ids_url, %subject, name, "Looking up id");
        let ids: UniverseIds = self.post_json(&self.ids_url, &[name]).await?;
        self.remember_ids(&ids);
        Ok(ids.find(subject, name))
    }
}
