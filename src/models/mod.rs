// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod counts;
pub mod killmail;
pub mod names;

pub use activity::{Activity, ActivityReport, HourlyActivity, Subject};
pub use counts::{CountMap, EntityId};
pub use killmail::Killmail;
pub use names::{IdRecord, NameRecord, UniverseIds};
