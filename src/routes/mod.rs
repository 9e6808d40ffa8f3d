// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod api;
pub mod gui;

use crate::error::AppError;
use crate::models::{EntityId, Subject};
use crate::AppState;
use axum::{middleware, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
}

/// Health check response
async fn health_check() -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
    })
}

/// Optional `?limit=N` on ranked views.
#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

pub(crate) fn parse_subject(raw: &str) -> Result<Subject, AppError> {
    raw.parse()
        .map_err(|e: crate::models::activity::UnknownSubject| AppError::BadRequest(e.to_string()))
}

/// Numeric entity ID from a path segment.
pub(crate) fn parse_id(raw: &str) -> Result<EntityId, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid id: {raw:?}")))
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    let assets = state.config.assets_dir.clone();

    Router::new()
        .route("/health", get(health_check))
        .merge(gui::routes())
        .merge(api::routes())
        .nest_service("/css", ServeDir::new(assets.join("css")))
        .nest_service("/js", ServeDir::new(assets.join("js")))
        .layer(middleware::from_fn(
            crate::middleware::security::add_security_headers,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
