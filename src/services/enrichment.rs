// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Deferred name enrichment for rendered placeholders.
//!
//! A batch goes through three stages:
//! 1. Placeholder: every slot is rendered as an element whose content is
//!    a marker glyph.
//! 2. Resolving: a single name lookup is issued for the whole batch.
//! 3. Patched: each returned record becomes a [`Patch`] per matching slot,
//!    sent to the page owner, which swaps it into the element.
//!
//! Lookups are never retried, cancelled or timed out, and failures are
//! only logged. The page owner stops waiting at its render deadline and
//! returns the page as it stands; placeholders whose lookup has not
//! answered by then keep their marker.

use crate::models::{EntityId, NameRecord};
use crate::ranking::RankedMap;
use crate::render::html::{entity_link, name_link};
use crate::render::{EntityKind, Namespace, Page};
use crate::services::names::NameResolver;
use futures_util::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Replacement content for one placeholder element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    pub element_id: String,
    pub html: String,
}

pub type PatchSender = mpsc::UnboundedSender<Patch>;
pub type PatchReceiver = mpsc::UnboundedReceiver<Patch>;

/// How a batch ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Nothing to resolve, no lookup issued
    Empty,
    /// Lookup succeeded; `unresolved` IDs got no record
    Patched { patched: usize, unresolved: usize },
    /// Lookup failed; placeholders stay as they are
    Failed,
    /// Page owner went away before all patches were delivered
    Abandoned,
    /// Lookup still running when the page was returned
    Pending,
}

/// One placeholder element awaiting the name of `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub element_id: String,
    pub id: EntityId,
    pub kind: EntityKind,
    /// Occurrence count shown after ranked names
    pub count: Option<u64>,
}

impl Slot {
    pub fn new(element_id: impl Into<String>, kind: EntityKind, id: EntityId) -> Self {
        Self {
            element_id: element_id.into(),
            id,
            kind,
            count: None,
        }
    }

    fn link(&self, name: &str) -> String {
        match self.count {
            Some(count) => entity_link(self.kind, self.id, name, count),
            None => name_link(self.kind, self.id, name),
        }
    }
}

/// Slots resolved together by one name lookup.
#[derive(Debug, Clone)]
pub struct EnrichmentBatch {
    label: String,
    slots: Vec<Slot>,
}

impl EnrichmentBatch {
    pub fn new(label: impl Into<String>, slots: Vec<Slot>) -> Self {
        Self {
            label: label.into(),
            slots,
        }
    }

    /// Batch for one ranked list, one slot per ranked ID.
    pub fn ranked(namespace: Namespace, ranked: &RankedMap<EntityId>) -> Self {
        let slots = ranked
            .iter()
            .map(|entry| Slot {
                element_id: namespace.element_id(entry.id),
                id: entry.id,
                kind: namespace.kind,
                count: Some(entry.count),
            })
            .collect();
        Self::new(namespace.to_string(), slots)
    }

    /// Name used in logs, e.g. `wins_systems`.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Distinct IDs in slot order: the lookup request.
    pub fn ids(&self) -> Vec<EntityId> {
        let mut seen = HashSet::new();
        self.slots
            .iter()
            .map(|slot| slot.id)
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Turn name records into patches for this batch's slots.
    ///
    /// Records for IDs that were not part of the batch are dropped.
    pub fn patches(&self, records: &[NameRecord]) -> Vec<Patch> {
        let mut patches = Vec::new();
        for record in records {
            let before = patches.len();
            patches.extend(
                self.slots
                    .iter()
                    .filter(|slot| slot.id == record.id)
                    .map(|slot| Patch {
                        element_id: slot.element_id.clone(),
                        html: slot.link(&record.name),
                    }),
            );
            if patches.len() == before {
                tracing::warn!(
                    batch = %self.label,
                    id = record.id,
                    "Name record for an ID outside the batch"
                );
            }
        }
        patches
    }

    /// Stages 2 and 3: resolve names and send patches to the page owner.
    pub async fn enrich(self, resolver: Arc<dyn NameResolver>, tx: PatchSender) -> BatchOutcome {
        let ids = self.ids();
        if ids.is_empty() {
            return BatchOutcome::Empty;
        }

        let records = match resolver.resolve(&ids).await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    batch = %self.label,
                    count = ids.len(),
                    error = %e,
                    "Name lookup failed, leaving placeholders"
                );
                return BatchOutcome::Failed;
            }
        };

        let resolved: HashSet<EntityId> = records.iter().map(|record| record.id).collect();
        let patches = self.patches(&records);
        let patched = patches.len();
        for patch in patches {
            if tx.send(patch).is_err() {
                tracing::debug!(batch = %self.label, "Page closed before patching");
                return BatchOutcome::Abandoned;
            }
        }

        let outcome = BatchOutcome::Patched {
            patched,
            unresolved: ids.iter().filter(|id| !resolved.contains(id)).count(),
        };
        tracing::debug!(batch = %self.label, ?outcome, "Batch enriched");
        outcome
    }

    /// Run [`EnrichmentBatch::enrich`] on its own task.
    pub fn spawn(
        self,
        resolver: Arc<dyn NameResolver>,
        tx: PatchSender,
    ) -> JoinHandle<BatchOutcome> {
        tokio::spawn(self.enrich(resolver, tx))
    }
}

/// Counts from draining a patch channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchStats {
    pub applied: usize,
    pub missing: usize,
    /// The deadline passed with batches still outstanding
    pub timed_out: bool,
}

/// Apply a single patch, logging (not propagating) lookup failures.
pub fn apply_patch(page: &mut Page, patch: Patch, stats: &mut PatchStats) {
    match page.patch(&patch.element_id, patch.html) {
        Ok(()) => stats.applied += 1,
        Err(e) => {
            tracing::warn!(error = %e, "Dropping patch");
            stats.missing += 1;
        }
    }
}

/// Apply patches until every sender has been dropped or `deadline` passes.
///
/// The receiver is dropped on return, so patches sent later are discarded
/// by their batch.
pub async fn drain_patches(
    page: &mut Page,
    mut rx: PatchReceiver,
    deadline: Instant,
) -> PatchStats {
    let mut stats = PatchStats::default();
    loop {
        match tokio::time::timeout_at(deadline, rx.recv()).await {
            Ok(Some(patch)) => apply_patch(page, patch, &mut stats),
            Ok(None) => break,
            Err(_) => {
                stats.timed_out = true;
                break;
            }
        }
    }
    stats
}

/// Outcomes of spawned batches. After a timeout, batches still running are
/// left detached and reported as [`BatchOutcome::Pending`].
pub async fn collect_outcomes(
    handles: Vec<JoinHandle<BatchOutcome>>,
    timed_out: bool,
) -> Vec<BatchOutcome> {
    let joined = handles.into_iter().map(move |handle| async move {
        if timed_out && !handle.is_finished() {
            return BatchOutcome::Pending;
        }
        handle.await.unwrap_or_else(|e| {
            tracing::error!(error = %e, "Enrichment task panicked");
            BatchOutcome::Failed
        })
    });
    join_all(joined).await
}

/// Spawn every batch, patch `page` until done or `deadline` elapses.
pub async fn enrich_page(
    page: &mut Page,
    batches: Vec<EnrichmentBatch>,
    resolver: Arc<dyn NameResolver>,
    deadline: Duration,
) -> (PatchStats, Vec<BatchOutcome>) {
    let deadline = Instant::now() + deadline;
    let (tx, rx) = mpsc::unbounded_channel();
    let handles: Vec<_> = batches
        .into_iter()
        .map(|batch| batch.spawn(resolver.clone(), tx.clone()))
        .collect();
    // The channel closes once every batch has dropped its sender
    drop(tx);

    let stats = drain_patches(page, rx, deadline).await;
    if stats.timed_out {
        tracing::warn!(
            applied = stats.applied,
            "Render deadline passed, returning page with placeholders"
        );
    }
    let outcomes = collect_outcomes(handles, stats.timed_out).await;
    (stats, outcomes)
}
