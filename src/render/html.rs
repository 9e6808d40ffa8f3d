// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTML fragments for the activity dashboard.

use crate::models::{Activity, EntityId, Killmail, Subject};
use crate::ranking::RankedMap;
use crate::render::page::{Page, PageError};
use std::fmt;

/// Content of a placeholder until its name is resolved.
pub const PLACEHOLDER_MARKER: &str = "&hellip;";

const ZKB_ROOT: &str = "https://zkillboard.com";
const IMAGES_ROOT: &str = "https://images.evetech.net";

/// Element holding the ship name on a lost-ships page.
pub const LOST_SHIP_ELEMENT: &str = "lost_ship_name";

/// Kills or losses half of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Wins,
    Losses,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Wins => "wins",
            Section::Losses => "losses",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Wins => "Wins",
            Section::Losses => "Losses",
        }
    }
}

/// What a linked ID refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    System,
    Ship,
    Character,
    Corporation,
    Alliance,
}

impl EntityKind {
    /// zKillboard path segment.
    pub fn zkb_path(&self) -> &'static str {
        match self {
            EntityKind::System => "system",
            EntityKind::Ship => "ship",
            EntityKind::Character => "character",
            EntityKind::Corporation => "corporation",
            EntityKind::Alliance => "alliance",
        }
    }

    fn plural(&self) -> &'static str {
        match self {
            EntityKind::System => "systems",
            EntityKind::Ship => "ships",
            EntityKind::Character => "characters",
            EntityKind::Corporation => "corporations",
            EntityKind::Alliance => "alliances",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            EntityKind::System => "Solar systems",
            EntityKind::Ship => "Ships",
            EntityKind::Character => "Characters",
            EntityKind::Corporation => "Corporations",
            EntityKind::Alliance => "Alliances",
        }
    }
}

impl From<Subject> for EntityKind {
    fn from(subject: Subject) -> Self {
        match subject {
            Subject::Character => EntityKind::Character,
            Subject::Corporation => EntityKind::Corporation,
            Subject::Alliance => EntityKind::Alliance,
        }
    }
}

/// Element-ID namespace of one placeholder batch, e.g. `wins_systems`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Namespace {
    pub section: Section,
    pub kind: EntityKind,
}

impl Namespace {
    pub const ALL: [Namespace; 4] = [
        Namespace::new(Section::Wins, EntityKind::System),
        Namespace::new(Section::Wins, EntityKind::Ship),
        Namespace::new(Section::Losses, EntityKind::System),
        Namespace::new(Section::Losses, EntityKind::Ship),
    ];

    pub const fn new(section: Section, kind: EntityKind) -> Self {
        Self { section, kind }
    }

    /// Deterministic ID of the placeholder for `id`.
    pub fn element_id(&self, id: EntityId) -> String {
        format!("{self}_{id}")
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.section.as_str(), self.kind.plural())
    }
}

/// Minimal HTML entity escaping for upstream-provided text.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// zKillboard link labelled with a resolved name.
pub fn name_link(kind: EntityKind, id: EntityId, name: &str) -> String {
    format!(
        r#"<a href="{ZKB_ROOT}/{}/{id}/">{}</a>"#,
        kind.zkb_path(),
        html_escape(name)
    )
}

/// Link shown once a ranked placeholder's name has been resolved.
pub fn entity_link(kind: EntityKind, id: EntityId, name: &str, count: u64) -> String {
    format!("{} ({count})", name_link(kind, id, name))
}

/// Element ID of the subject's own name, e.g. `character_name`.
pub fn profile_element_id(subject: Subject) -> String {
    format!("{subject}_name")
}

/// Portrait (characters) or logo (corporations, alliances) URL.
pub fn image_url(subject: Subject, id: EntityId, size: u32) -> String {
    let image = match subject {
        Subject::Character => "portrait",
        Subject::Corporation | Subject::Alliance => "logo",
    };
    format!("{IMAGES_ROOT}/{subject}s/{id}/{image}?tenant=tranquility&amp;size={size}")
}

/// Element ID of the solar-system cell of one lost killmail.
pub fn lost_system_element_id(killmail_id: EntityId) -> String {
    format!("lost_{killmail_id}_system")
}

/// Render a titled list with one placeholder element per ranked ID.
pub fn render_placeholders(
    page: &mut Page,
    namespace: Namespace,
    ranked: &RankedMap<EntityId>,
) -> Result<(), PageError> {
    page.push_raw(format!("<h4>{}</h4>", namespace.kind.title()));
    page.open_container(&namespace.to_string(), "ul")?;
    for entry in ranked {
        page.push_element(namespace.element_id(entry.id), "li", PLACEHOLDER_MARKER)?;
    }
    page.close_container("ul");
    Ok(())
}

/// Opening markup through `<body>`.
pub fn render_document_start(page: &mut Page, subject: Subject, id: EntityId) {
    page.push_raw(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>zKillboard activity - {subject} {id}</title>
    <link rel="stylesheet" href="/css/dashboard.css">
</head>
<body>
<div class="container">
"#
    ));
}

pub fn render_document_end(page: &mut Page, generated_at: &str) {
    page.push_raw(format!(
        r#"<footer><p>Generated {}</p></footer>
</div>
<script src="/js/dashboard.js"></script>
</body>
</html>
"#,
        html_escape(generated_at)
    ));
}

/// Profile header: image plus the subject's name, resolved later.
pub fn render_profile(page: &mut Page, subject: Subject, id: EntityId) -> Result<(), PageError> {
    page.push_raw(format!(
        r#"<div class="profile"><img src="{}" alt="{subject} {id}" width="128" height="128">"#,
        image_url(subject, id, 128)
    ));
    page.push_element(profile_element_id(subject), "h2", PLACEHOLDER_MARKER)?;
    page.push_raw("</div>\n");
    Ok(())
}

/// Header with combat and damage totals.
pub fn render_summary(
    page: &mut Page,
    subject: Subject,
    activity: &Activity,
    window_days: u32,
    since: &str,
) {
    let wins = &activity.wins;
    let losses = &activity.losses;
    page.push_raw(format!(
        r#"<p><a href="{ZKB_ROOT}/{subject}/{id}/">{subject} {id}</a> activity last {window_days} days (since {since}):</p>
<table class="summary">
<tr><th></th><th>Count</th><th>%</th><th>Damage</th><th>%</th></tr>
<tr><td>Wins</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>
<tr><td>Losses</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>
</table>
"#,
        wins.count(),
        activity.wins_percent(),
        wins.total_damage,
        activity.damage_dealt_percent(),
        losses.count(),
        activity.losses_percent(),
        losses.total_damage,
        activity.damage_received_percent(),
        id = activity.id,
    ));
}

/// "Wins (N): " followed by one link per killmail.
pub fn render_killmails(page: &mut Page, section: Section, killmails: &[EntityId]) {
    let mut html = format!("<p>{} ({}): ", section.title(), killmails.len());
    for id in killmails {
        html.push_str(&format!(r#"<a href="{ZKB_ROOT}/kill/{id}/">{id}</a> "#));
    }
    html.push_str("</p>");
    page.push_raw(html);
}

/// Lost-ships header and one table row per killmail.
pub fn render_lost_ships(
    page: &mut Page,
    subject: Subject,
    killmails: &[Killmail],
) -> Result<(), PageError> {
    page.push_raw("<h2>");
    page.push_element(profile_element_id(subject), "span", PLACEHOLDER_MARKER)?;
    page.push_raw(" lost ");
    page.push_element(LOST_SHIP_ELEMENT, "span", PLACEHOLDER_MARKER)?;
    page.push_raw(format!(" ({})</h2>\n", killmails.len()));

    if killmails.is_empty() {
        page.push_raw("<p>No losses.</p>\n");
        return Ok(());
    }

    page.push_raw(
        r#"<table class="losses">
<tr><th>Time</th><th>Killmail</th><th>Solar system</th><th>Damage</th></tr>
"#,
    );
    for killmail in killmails {
        let id = killmail.killmail_id;
        page.push_raw(format!(
            r#"<tr><td>{}</td><td><a href="{ZKB_ROOT}/kill/{id}/">{id}</a></td>"#,
            html_escape(&killmail.killmail_time)
        ));
        page.push_element(lost_system_element_id(id), "td", PLACEHOLDER_MARKER)?;
        page.push_raw(format!("<td>{}</td></tr>\n", killmail.damage));
    }
    page.push_raw("</table>\n");
    Ok(())
}
