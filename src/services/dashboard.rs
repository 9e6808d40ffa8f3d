// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard assembly.
//!
//! Handles the page workflow:
//! 1. Fetch the activity report and hourly breakdown
//! 2. Rank ships and systems for wins and losses
//! 3. Render the page with placeholders
//! 4. Enrich all batches concurrently and apply their patches until the
//!    render deadline

use crate::config::MAX_TOP_LIMIT;
use crate::error::{AppError, Result};
use crate::models::killmail::dedup_killmails;
use crate::models::{Activity, ActivityReport, EntityId, HourlyActivity, Killmail, Subject};
use crate::ranking::{most_active, RankedMap};
use crate::render::chart::render_chart;
use crate::render::html::{
    lost_system_element_id, profile_element_id, render_document_end, render_document_start,
    render_killmails, render_lost_ships, render_placeholders, render_profile, render_summary,
    LOST_SHIP_ELEMENT,
};
use crate::render::{EntityKind, HourlyChart, Namespace, Page, Section};
use crate::services::activity::ActivitySource;
use crate::services::enrichment::{enrich_page, BatchOutcome, EnrichmentBatch, PatchStats, Slot};
use crate::services::names::NameResolver;
use crate::time_utils::{format_utc_rfc3339, window_start_date};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Render deadline used unless configured otherwise.
pub const DEFAULT_RENDER_DEADLINE: Duration = Duration::from_secs(3);

/// Fully rendered page and how its enrichment went.
#[derive(Debug)]
pub struct RenderedPage {
    pub page: Page,
    pub patches: PatchStats,
    pub outcomes: Vec<BatchOutcome>,
}

impl RenderedPage {
    pub fn html(&self) -> String {
        self.page.render()
    }
}

/// Ranked ships and systems for one section.
#[derive(Debug, Clone, Serialize)]
pub struct TopEntities {
    pub ships: RankedMap<EntityId>,
    pub solar_systems: RankedMap<EntityId>,
}

/// Ranked ships and systems for wins and losses.
#[derive(Debug, Clone, Serialize)]
pub struct TopActivity {
    pub id: EntityId,
    pub subject: Subject,
    pub wins: TopEntities,
    pub losses: TopEntities,
}

/// One ranked list of the page.
pub type RankedList = (Namespace, RankedMap<EntityId>);

/// Builds dashboards from the activity and name APIs.
#[derive(Clone)]
pub struct DashboardService {
    activity: Arc<dyn ActivitySource>,
    names: Arc<dyn NameResolver>,
    default_limit: usize,
    window_days: u32,
    render_deadline: Duration,
}

impl DashboardService {
    pub fn new(
        activity: Arc<dyn ActivitySource>,
        names: Arc<dyn NameResolver>,
        default_limit: usize,
        window_days: u32,
    ) -> Self {
        Self {
            activity,
            names,
            default_limit,
            window_days,
            render_deadline: DEFAULT_RENDER_DEADLINE,
        }
    }

    /// How long a render waits for name lookups.
    pub fn with_render_deadline(mut self, deadline: Duration) -> Self {
        self.render_deadline = deadline;
        self
    }

    /// Requested limit, or the configured default.
    pub fn limit(&self, requested: Option<usize>) -> Result<usize> {
        let limit = requested.unwrap_or(self.default_limit);
        if limit == 0 || limit > MAX_TOP_LIMIT {
            return Err(AppError::BadRequest(format!(
                "limit must be between 1 and {}",
                MAX_TOP_LIMIT
            )));
        }
        Ok(limit)
    }

    /// ID of the subject called `name`.
    pub async fn lookup_id(&self, subject: Subject, name: &str) -> Result<EntityId> {
        self.names
            .lookup_id(subject, name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Can't find id for {subject} {name:?}")))
    }

    /// Ranked ships and systems without names.
    pub async fn top(
        &self,
        subject: Subject,
        id: EntityId,
        limit: Option<usize>,
    ) -> Result<TopActivity> {
        let limit = self.limit(limit)?;
        let activity = self.activity.activity(subject, id).await?;

        let rank = |section: Section| {
            let report = section_report(&activity, section);
            TopEntities {
                ships: most_active(&report.ships, limit),
                solar_systems: most_active(&report.solar_systems, limit),
            }
        };

        Ok(TopActivity {
            id,
            subject,
            wins: rank(Section::Wins),
            losses: rank(Section::Losses),
        })
    }

    pub async fn hourly_chart(&self, subject: Subject, id: EntityId) -> Result<HourlyChart> {
        let hourly = self.activity.hourly(subject, id).await?;
        Ok(HourlyChart::from(&hourly))
    }

    /// Render the dashboard page, patching in names until the deadline.
    pub async fn render(
        &self,
        subject: Subject,
        id: EntityId,
        limit: Option<usize>,
    ) -> Result<RenderedPage> {
        let limit = self.limit(limit)?;
        tracing::info!(%subject, id, limit, "Rendering dashboard");

        let (activity, hourly) = tokio::join!(
            self.activity.activity(subject, id),
            self.activity.hourly(subject, id)
        );
        let activity = activity?;
        let hourly = hourly
            .inspect_err(|e| {
                tracing::warn!(%subject, id, error = %e, "Hourly activity unavailable")
            })
            .ok();

        let lists = rank_lists(&activity, limit);
        let now = chrono::Utc::now();
        let mut page = self.placeholder_page(subject, &activity, hourly.as_ref(), &lists, now)?;

        let mut batches = vec![profile_batch(subject, id)];
        batches.extend(
            lists
                .iter()
                .map(|(namespace, ranked)| EnrichmentBatch::ranked(*namespace, ranked)),
        );

        let (patches, outcomes) = self.enrich(&mut page, batches).await;
        tracing::info!(
            %subject,
            id,
            applied = patches.applied,
            missing = patches.missing,
            timed_out = patches.timed_out,
            "Dashboard rendered"
        );

        Ok(RenderedPage {
            page,
            patches,
            outcomes,
        })
    }

    /// Render the losses of `id` in ship type `ship`.
    pub async fn render_lost_ships(
        &self,
        subject: Subject,
        id: EntityId,
        ship: EntityId,
    ) -> Result<RenderedPage> {
        tracing::info!(%subject, id, ship, "Rendering lost ships");
        let killmails = dedup_killmails(self.activity.lost_ships(subject, id, ship).await?);

        let mut page = Page::new();
        render_document_start(&mut page, subject, id);
        render_lost_ships(&mut page, subject, &killmails).map_err(anyhow::Error::from)?;
        render_document_end(&mut page, &format_utc_rfc3339(chrono::Utc::now()));

        let batch = lost_ships_batch(subject, id, ship, &killmails);
        let (patches, outcomes) = self.enrich(&mut page, vec![batch]).await;

        Ok(RenderedPage {
            page,
            patches,
            outcomes,
        })
    }

    async fn enrich(
        &self,
        page: &mut Page,
        batches: Vec<EnrichmentBatch>,
    ) -> (PatchStats, Vec<BatchOutcome>) {
        enrich_page(page, batches, self.names.clone(), self.render_deadline).await
    }

    /// Synchronous stage: everything except resolved names.
    fn placeholder_page(
        &self,
        subject: Subject,
        activity: &Activity,
        hourly: Option<&HourlyActivity>,
        lists: &[RankedList],
        now: DateTime<Utc>,
    ) -> anyhow::Result<Page> {
        let since = window_start_date(now, self.window_days);
        let mut page = Page::new();
        render_document_start(&mut page, subject, activity.id);
        render_profile(&mut page, subject, activity.id)?;
        render_summary(&mut page, subject, activity, self.window_days, &since);

        for section in [Section::Wins, Section::Losses] {
            let report = section_report(activity, section);
            page.push_raw(format!(r#"<section class="{}">"#, section.as_str()));
            render_killmails(&mut page, section, &report.killmails);
            for (namespace, ranked) in lists.iter().filter(|(ns, _)| ns.section == section) {
                render_placeholders(&mut page, *namespace, ranked)?;
            }
            page.push_raw("</section>");
        }

        match hourly {
            Some(hourly) => render_chart(&mut page, &HourlyChart::from(hourly))?,
            None => page.push_raw("<p>Hourly activity unavailable.</p>"),
        }

        render_document_end(&mut page, &format_utc_rfc3339(now));
        Ok(page)
    }
}

fn section_report(activity: &Activity, section: Section) -> &ActivityReport {
    match section {
        Section::Wins => &activity.wins,
        Section::Losses => &activity.losses,
    }
}

/// One ranked list per namespace, in page order.
pub fn rank_lists(activity: &Activity, limit: usize) -> Vec<RankedList> {
    Namespace::ALL
        .into_iter()
        .map(|namespace| {
            let report = section_report(activity, namespace.section);
            let counts = match namespace.kind {
                EntityKind::System => &report.solar_systems,
                _ => &report.ships,
            };
            (namespace, most_active(counts, limit))
        })
        .collect()
}

/// The subject's own name in the profile header.
pub fn profile_batch(subject: Subject, id: EntityId) -> EnrichmentBatch {
    EnrichmentBatch::new(
        "profile",
        vec![Slot::new(profile_element_id(subject), subject.into(), id)],
    )
}

/// Subject, ship and every solar system of a lost-ships page in one lookup.
pub fn lost_ships_batch(
    subject: Subject,
    id: EntityId,
    ship: EntityId,
    killmails: &[Killmail],
) -> EnrichmentBatch {
    let mut slots = vec![
        Slot::new(profile_element_id(subject), subject.into(), id),
        Slot::new(LOST_SHIP_ELEMENT, EntityKind::Ship, ship),
    ];
    slots.extend(killmails.iter().map(|killmail| {
        Slot::new(
            lost_system_element_id(killmail.killmail_id),
            EntityKind::System,
            killmail.solar_system_id,
        )
    }));
    EnrichmentBatch::new("lost", slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CountMap;

    fn activity() -> Activity {
        let mut activity = Activity {
            id: 2115038999,
            ..Default::default()
        };
        activity.wins.solar_systems = [(30000142, 10), (30002187, 3), (30000144, 7)]
            .into_iter()
            .collect();
        activity.wins.ships = [(3756, 8), (22456, 11)].into_iter().collect();
        activity.losses.ships = CountMap::new();
        activity
    }

    #[test]
    fn test_rank_lists_covers_all_namespaces() {
        let lists = rank_lists(&activity(), 2);
        let prefixes: Vec<String> = lists.iter().map(|(ns, _)| ns.to_string()).collect();

        assert_eq!(
            prefixes,
            vec!["wins_systems", "wins_ships", "losses_systems", "losses_ships"]
        );
        assert_eq!(lists[0].1.ids(), vec![30000142, 30000144]);
        assert_eq!(lists[1].1.ids(), vec![22456, 3756]);
        assert!(lists[3].1.ids().is_empty());
    }

    #[test]
    fn test_placeholder_ids_unique_across_namespaces() {
        // Same ID ranked in every namespace
        let mut activity = Activity::default();
        for report in [&mut activity.wins, &mut activity.losses] {
            report.ships.add(42, 1);
            report.solar_systems.add(42, 1);
        }

        let mut page = Page::new();
        for (namespace, ranked) in rank_lists(&activity, 5) {
            render_placeholders(&mut page, namespace, &ranked).unwrap();
        }

        let ids: Vec<&str> = page.element_ids().collect();
        assert_eq!(
            ids,
            vec!["wins_systems_42", "wins_ships_42", "losses_systems_42", "losses_ships_42"]
        );
    }

    #[test]
    fn test_profile_batch_targets_header() {
        let batch = profile_batch(Subject::Corporation, 98573194);

        assert_eq!(batch.ids(), vec![98573194]);
        assert_eq!(batch.slots()[0].element_id, "corporation_name");
        assert_eq!(batch.slots()[0].kind, EntityKind::Corporation);
    }

    #[test]
    fn test_lost_ships_batch_is_one_lookup() {
        let killmail = |killmail_id, solar_system_id| Killmail {
            killmail_id,
            solar_system_id,
            ..Default::default()
        };
        let killmails = vec![killmail(1, 30000611), killmail(2, 30004218), killmail(3, 30000611)];

        let batch = lost_ships_batch(Subject::Character, 2115038999, 670, &killmails);

        assert_eq!(batch.ids(), vec![2115038999, 670, 30000611, 30004218]);
        assert_eq!(batch.slots().len(), 5);
    }
}
