// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - upstream clients and page assembly.

pub mod activity;
pub mod dashboard;
pub mod enrichment;
pub mod names;

pub use activity::{ActivityClient, ActivitySource};
pub use dashboard::DashboardService;
pub use enrichment::{BatchOutcome, EnrichmentBatch, Patch, PatchStats, Slot};
pub use names::{EsiNamesClient, NameResolver};
