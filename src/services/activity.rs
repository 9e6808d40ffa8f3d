// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client for the pre-aggregated activity API.
//!
//! Endpoints used:
//! - `GET /api/{subject}/activity/{id}/` — wins/losses report
//! - `GET /api/{subject}/activity/hourly/{id}/` — killmails per hour
//! - `GET /api/{subject}/{id}/lost/{ship}/` — losses in one ship type

use crate::error::AppError;
use crate::models::{Activity, EntityId, HourlyActivity, Killmail, Subject};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

/// Source of activity reports.
#[async_trait]
pub trait ActivitySource: Send + Sync {
    async fn activity(&self, subject: Subject, id: EntityId) -> Result<Activity, AppError>;

    async fn hourly(&self, subject: Subject, id: EntityId) -> Result<HourlyActivity, AppError>;

    /// Losses of `id` while flying ship type `ship`.
    async fn lost_ships(
        &self,
        subject: Subject,
        id: EntityId,
        ship: EntityId,
    ) -> Result<Vec<Killmail>, AppError>;
}

/// HTTP client for the activity API.
#[derive(Clone)]
pub struct ActivityClient {
    http: reqwest::Client,
    base_url: String,
}

impl ActivityClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn activity_url(&self, subject: Subject, id: EntityId) -> String {
        format!("{}/api/{}/activity/{}/", self.base_url, subject, id)
    }

    fn hourly_url(&self, subject: Subject, id: EntityId) -> String {
        format!("{}/api/{}/activity/hourly/{}/", self.base_url, subject, id)
    }

    fn lost_url(&self, subject: Subject, id: EntityId, ship: EntityId) -> String {
        format!("{}/api/{}/{}/lost/{}/", self.base_url, subject, id, ship)
    }

    /// Generic GET request with JSON response.
    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T, AppError> {
        tracing::debug!(url, "Fetching from activity API");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::ActivityApi(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 404 {
                return Err(AppError::NotFound(format!("No activity at {}", url)));
            }

            return Err(AppError::ActivityApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::ActivityApi(format!("JSON parse error: {}", e)))
    }
}

#[async_trait]
impl ActivitySource for ActivityClient {
    async fn activity(&self, subject: Subject, id: EntityId) -> Result<Activity, AppError> {
        let url = self.activity_url(subject, id);
        self.get_json(&url).await
    }

    async fn hourly(&self, subject: Subject, id: EntityId) -> Result<HourlyActivity, AppError> {
        let url = self.hourly_url(subject, id);
        let sparse: HashMap<i32, u64> = self.get_json(&url).await?;
        Ok(HourlyActivity::from_sparse(&sparse))
    }

    async fn lost_ships(
        &self,
        subject: Subject,
        id: EntityId,
        ship: EntityId,
    ) -> Result<Vec<Killmail>, AppError> {
        let url = self.lost_url(subject, id, ship);
        self.get_json(&url).await
    }
}
