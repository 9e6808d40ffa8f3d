// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bar-chart configuration for hourly activity.
//!
//! The page embeds the configuration as JSON next to a `<canvas>`; the
//! charting library in the browser picks it up from there.

use crate::models::activity::{HourlyActivity, HOURS_PER_DAY};
use crate::render::page::Page;
use serde::Serialize;

pub const CHART_CANVAS_ID: &str = "hourly_chart";
pub const CHART_CONFIG_ID: &str = "hourly_chart_config";

const BAR_COLOR: &str = "rgba(54, 162, 235, 0.6)";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyChart {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: ChartData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<u64>,
    pub background_color: &'static str,
}

impl From<&HourlyActivity> for HourlyChart {
    fn from(hourly: &HourlyActivity) -> Self {
        Self {
            kind: "bar",
            data: ChartData {
                labels: (0..HOURS_PER_DAY).map(|hour| format!("{hour:02}")).collect(),
                datasets: vec![Dataset {
                    label: "Killmails per hour (UTC)".to_string(),
                    data: hourly.counts.to_vec(),
                    background_color: BAR_COLOR,
                }],
            },
        }
    }
}

impl HourlyChart {
    /// JSON safe to place inside a `<script>` element.
    pub fn to_script_json(&self) -> Result<String, serde_json::Error> {
        Ok(serde_json::to_string(self)?.replace('<', "\\u003c"))
    }
}

/// Append the chart canvas and its configuration.
pub fn render_chart(page: &mut Page, chart: &HourlyChart) -> Result<(), serde_json::Error> {
    page.push_raw(format!(
        r#"<h3>Hourly activity</h3>
<canvas id="{CHART_CANVAS_ID}"></canvas>
<script type="application/json" id="{CHART_CONFIG_ID}">{}</script>
"#,
        chart.to_script_json()?
    ));
    Ok(())
}
