// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Largest top-N a page or API call may ask for.
pub const MAX_TOP_LIMIT: usize = 50;

/// Longest activity window the header may describe.
pub const MAX_WINDOW_DAYS: u32 = 365;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Base URL of the activity API (zkbinfo)
    pub activity_api_url: String,
    /// ESI base URL, without trailing slash
    pub esi_url: String,
    /// ESI datasource query parameter
    pub esi_datasource: String,
    /// Default number of ranked ships/systems per list
    pub top_limit: usize,
    /// Length of the activity window shown in the page header
    pub activity_window_days: u32,
    /// Directory holding the `css/` and `js/` page assets
    pub assets_dir: PathBuf,
    /// How long a page waits for name lookups before it is sent as is
    pub render_deadline: Duration,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8088,
            activity_api_url: "http://localhost:8080".to_string(),
            esi_url: "https://esi.evetech.net/latest".to_string(),
            esi_datasource: "tranquility".to_string(),
            top_limit: 5,
            activity_window_days: 14,
            assets_dir: PathBuf::from("public"),
            render_deadline: Duration::from_millis(3000),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();
        let top_limit = parse_var("TOP_LIMIT", defaults.top_limit)?;
        if top_limit == 0 || top_limit > MAX_TOP_LIMIT {
            return Err(ConfigError::Invalid("TOP_LIMIT", top_limit.to_string()));
        }
        let activity_window_days =
            parse_var("ACTIVITY_WINDOW_DAYS", defaults.activity_window_days)?;
        if activity_window_days == 0 || activity_window_days > MAX_WINDOW_DAYS {
            return Err(ConfigError::Invalid(
                "ACTIVITY_WINDOW_DAYS",
                activity_window_days.to_string(),
            ));
        }
        let render_deadline_ms = parse_var(
            "RENDER_DEADLINE_MS",
            defaults.render_deadline.as_millis() as u64,
        )?;

        Ok(Self {
            port: parse_var("PORT", defaults.port)?,
            activity_api_url: env::var("ZKB_API_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .unwrap_or(defaults.activity_api_url),
            esi_url: env::var("ESI_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .unwrap_or(defaults.esi_url),
            esi_datasource: env::var("ESI_DATASOURCE").unwrap_or(defaults.esi_datasource),
            top_limit,
            activity_window_days,
            assets_dir: env::var("ASSETS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.assets_dir),
            render_deadline: Duration::from_millis(render_deadline_ms),
        })
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
