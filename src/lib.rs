// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! zkb-dashboard: killboard activity pages for EVE Online entities
//!
//! This crate renders activity dashboards from a pre-aggregated
//! activity API, resolving ship and solar-system names through ESI.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod ranking;
pub mod render;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::DashboardService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub dashboard: DashboardService,
}
