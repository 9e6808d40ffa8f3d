// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON API routes.

use crate::error::Result;
use crate::render::HourlyChart;
use crate::routes::{parse_id, parse_subject, LimitQuery};
use crate::services::dashboard::TopActivity;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/{subject}/{id}/top", get(get_top))
        .route("/api/{subject}/{id}/hourly", get(get_hourly))
}

/// Ranked ships and solar systems for wins and losses.
async fn get_top(
    State(state): State<Arc<AppState>>,
    Path((subject, id)): Path<(String, String)>,
    Query(params): Query<LimitQuery>,
) -> Result<Json<TopActivity>> {
    let subject = parse_subject(&subject)?;
    let id = parse_id(&id)?;
    tracing::debug!(%subject, id, limit = ?params.limit, "Ranking activity");

    let top = state.dashboard.top(subject, id, params.limit).await?;
    Ok(Json(top))
}

/// Bar-chart configuration for killmails per hour.
async fn get_hourly(
    State(state): State<Arc<AppState>>,
    Path((subject, id)): Path<(String, String)>,
) -> Result<Json<HourlyChart>> {
    let subject = parse_subject(&subject)?;
    let id = parse_id(&id)?;
    let chart = state.dashboard.hourly_chart(subject, id).await?;
    Ok(Json(chart))
}
