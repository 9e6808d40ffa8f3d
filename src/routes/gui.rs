// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTML dashboard pages.

use crate::error::AppError;
use crate::render::html::html_escape;
use crate::routes::{parse_id, parse_subject, LimitQuery};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/gui/{subject}/{name}/", get(get_named_dashboard))
        .route("/gui/{subject}/id/{id}/", get(get_dashboard))
        .route("/gui/{subject}/id/{id}/lost/{ship}/", get(get_lost_ships))
}

/// Error rendered as a small HTML page instead of JSON.
pub struct ErrorPage(pub AppError);

impl IntoResponse for ErrorPage {
    fn into_response(self) -> Response {
        self.0.log();
        let (status, _) = self.0.status_and_code();
        let message = self
            .0
            .details()
            .unwrap_or_else(|| "Internal server error".to_string());
        let body = format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>Error</title></head>
<body><h2>{}</h2><p>{}</p></body>
</html>
"#,
            status,
            html_escape(&message)
        );
        (status, Html(body)).into_response()
    }
}

impl From<AppError> for ErrorPage {
    fn from(err: AppError) -> Self {
        ErrorPage(err)
    }
}

/// Render the activity dashboard for one entity.
async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Path((subject, id)): Path<(String, String)>,
    Query(params): Query<LimitQuery>,
) -> Result<Html<String>, ErrorPage> {
    let subject = parse_subject(&subject)?;
    let id = parse_id(&id)?;
    let dashboard = state.dashboard.render(subject, id, params.limit).await?;
    Ok(Html(dashboard.html()))
}

/// Dashboard for the entity with this exact name.
async fn get_named_dashboard(
    State(state): State<Arc<AppState>>,
    Path((subject, name)): Path<(String, String)>,
    Query(params): Query<LimitQuery>,
) -> Result<Html<String>, ErrorPage> {
    let subject = parse_subject(&subject)?;
    let id = state.dashboard.lookup_id(subject, &name).await?;
    tracing::debug!(%subject, name, id, "Resolved name");
    let dashboard = state.dashboard.render(subject, id, params.limit).await?;
    Ok(Html(dashboard.html()))
}

/// Killmails lost by one entity in one ship type.
async fn get_lost_ships(
    State(state): State<Arc<AppState>>,
    Path((subject, id, ship)): Path<(String, String, String)>,
) -> Result<Html<String>, ErrorPage> {
    let subject = parse_subject(&subject)?;
    let id = parse_id(&id)?;
    let ship = parse_id(&ship)?;
    let page = state.dashboard.render_lost_ships(subject, id, ship).await?;
    Ok(Html(page.html()))
}
