// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! zkb-dashboard server
//!
//! Serves killboard activity dashboards for characters, corporations and
//! alliances.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zkb_dashboard::{
    config::Config,
    services::{ActivityClient, DashboardService, EsiNamesClient},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting zkb-dashboard");

    let activity = Arc::new(ActivityClient::new(config.activity_api_url.clone()));
    tracing::info!(url = %config.activity_api_url, "Activity API client initialized");

    let names = Arc::new(EsiNamesClient::new(&config.esi_url, &config.esi_datasource));
    tracing::info!(url = %config.esi_url, "ESI names client initialized");

    let dashboard = DashboardService::new(
        activity,
        names,
        config.top_limit,
        config.activity_window_days,
    )
    .with_render_deadline(config.render_deadline);

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        dashboard,
    });

    // Build router
    let app = zkb_dashboard::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("zkb_dashboard=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
