// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard rendering: page buffer, HTML fragments and chart config.

pub mod chart;
pub mod html;
pub mod page;

pub use chart::HourlyChart;
pub use html::{EntityKind, Namespace, Section, PLACEHOLDER_MARKER};
pub use page::{Page, PageError};
