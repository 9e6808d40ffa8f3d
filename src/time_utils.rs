// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, Duration, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// First day (`YYYY-MM-DD`) of an activity window ending at `now`.
pub fn window_start_date(now: DateTime<Utc>, days: u32) -> String {
    (now - Duration::days(i64::from(days)))
        .format("%Y-%m-%d")
        .to_string()
}
