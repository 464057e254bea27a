//! Live, sectioned view of the trackers visible for a date.
//!
//! [`DataProvider`] keeps the result of the current [`TrackerQuery`] in
//! memory, grouped by category. It subscribes to the store's change feed;
//! whenever writes have happened, [`DataProvider::process_changes`] re-runs the
//! query, diffs the new sections against the previous ones and hands the
//! delegate one batched [`TrackerStoreUpdate`].
//!
//! ## Diff rules
//!
//! - Sections are matched by category name, rows inside a surviving section by
//!   tracker (id and content) using a longest common subsequence
//! - A row that moved or changed is reported as a delete plus an insert
//! - Rows of inserted or deleted sections are covered by the section change
//! - Deleted paths use the old positions, inserted paths the new ones
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use tracker::db::db::Db;
//! use tracker::libs::data_provider::{ChannelDelegate, DataProvider, ViewEvent};
//! use tracker::libs::filter::TrackerQuery;
//! use tracker::libs::tracker::{Color, Schedule, Tracker};
//!
//! let db = Db::open_in_memory()?;
//! let (delegate, events) = ChannelDelegate::new();
//! let wednesday = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
//! let mut provider = DataProvider::new(&db, TrackerQuery::for_date(wednesday), Box::new(delegate))?;
//!
//! provider.add_tracker(&Tracker::new("Run", "🏃", Color::default(), Some(Schedule::every_day())), "Health")?;
//! assert_eq!(provider.name_section(0), Some("Health"));
//! assert!(matches!(events.try_recv(), Ok(ViewEvent::Update(_))));
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::category::TrackerCategory;
use super::error::{StoreError, StoreResult};
use super::filter::{TrackerPredicate, TrackerQuery};
use super::record::CompletedIds;
use super::tracker::Tracker;
use crate::db::db::{Db, StoreChange};
use crate::db::records::RecordStore;
use crate::db::trackers::TrackerStore;
use std::collections::BTreeSet;
use std::sync::mpsc::{self, Receiver, Sender};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndexPath {
    pub section: usize,
    pub item: usize,
}

impl IndexPath {
    pub fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

/// Changes between two consecutive results of the same query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackerStoreUpdate {
    pub inserted_indexes: Vec<IndexPath>,
    pub deleted_indexes: Vec<IndexPath>,
    pub inserted_sections: BTreeSet<usize>,
    pub deleted_sections: BTreeSet<usize>,
}

impl TrackerStoreUpdate {
    pub fn is_empty(&self) -> bool {
        self.inserted_indexes.is_empty()
            && self.deleted_indexes.is_empty()
            && self.inserted_sections.is_empty()
            && self.deleted_sections.is_empty()
    }
}

/// Receives the provider's view updates.
pub trait DataProviderDelegate {
    /// One batch of row and section changes after store writes.
    fn did_update(&mut self, update: &TrackerStoreUpdate);

    /// The query itself changed; redraw everything.
    fn reload(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Update(TrackerStoreUpdate),
    Reload,
}

/// Forwards view updates over a channel, so they can be applied on the
/// thread that owns the presentation state.
pub struct ChannelDelegate {
    sender: Sender<ViewEvent>,
}

impl ChannelDelegate {
    pub fn new() -> (Self, Receiver<ViewEvent>) {
        let (sender, receiver) = mpsc::channel();
        (Self { sender }, receiver)
    }

    fn send(&self, event: ViewEvent) {
        if self.sender.send(event).is_err() {
            tracing::debug!("view event dropped, receiver is gone");
        }
    }
}

impl DataProviderDelegate for ChannelDelegate {
    fn did_update(&mut self, update: &TrackerStoreUpdate) {
        self.send(ViewEvent::Update(update.clone()));
    }

    fn reload(&mut self) {
        self.send(ViewEvent::Reload);
    }
}

pub struct DataProvider {
    trackers: TrackerStore,
    records: RecordStore,
    changes: Receiver<StoreChange>,
    query: TrackerQuery,
    sections: Vec<TrackerCategory>,
    delegate: Box<dyn DataProviderDelegate>,
}

impl DataProvider {
    /// Subscribes to `db` and runs `query` once.
    pub fn new(db: &Db, query: TrackerQuery, delegate: Box<dyn DataProviderDelegate>) -> StoreResult<Self> {
        let mut provider = Self {
            trackers: TrackerStore::new(db),
            records: RecordStore::new(db),
            changes: db.subscribe(),
            query,
            sections: Vec::new(),
            delegate,
        };
        provider.sections = provider.fetch()?;
        Ok(provider)
    }

    pub fn query(&self) -> &TrackerQuery {
        &self.query
    }

    pub fn sections(&self) -> &[TrackerCategory] {
        &self.sections
    }

    pub fn number_of_sections(&self) -> usize {
        self.sections.len()
    }

    pub fn number_of_items_in_section(&self, section: usize) -> usize {
        self.sections.get(section).map_or(0, |section| section.trackers.len())
    }

    pub fn object(&self, at: IndexPath) -> Option<&Tracker> {
        self.sections.get(at.section).and_then(|section| section.trackers.get(at.item))
    }

    pub fn name_section(&self, section: usize) -> Option<&str> {
        self.sections.get(section).map(|section| section.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Points the provider at a new query and reloads from scratch.
    pub fn filtered_trackers(&mut self, query: TrackerQuery) -> StoreResult<()> {
        self.query = query;
        self.sections.clear();
        // The fresh fetch already reflects anything queued so far
        self.changes.try_iter().for_each(drop);
        self.sections = self.fetch()?;
        self.delegate.reload();
        Ok(())
    }

    /// Applies queued store changes. Returns the update handed to the
    /// delegate, if anything visible changed.
    pub fn process_changes(&mut self) -> StoreResult<Option<TrackerStoreUpdate>> {
        let pending = self.changes.try_iter().count();
        if pending == 0 {
            return Ok(None);
        }

        let sections = self.fetch()?;
        let update = diff_sections(&self.sections, &sections);
        self.sections = sections;

        if update.is_empty() {
            return Ok(None);
        }

        tracing::debug!(
            pending,
            inserted = update.inserted_indexes.len(),
            deleted = update.deleted_indexes.len(),
            "tracker list changed"
        );
        self.delegate.did_update(&update);
        Ok(Some(update))
    }

    pub fn add_tracker(&mut self, tracker: &Tracker, category: &str) -> StoreResult<()> {
        self.trackers.create(tracker, category)?;
        self.process_changes()?;
        Ok(())
    }

    pub fn edit_tracker(&mut self, tracker: &Tracker, category: &str) -> StoreResult<()> {
        self.trackers.edit(tracker, category)?;
        self.process_changes()?;
        Ok(())
    }

    pub fn delete_tracker(&mut self, at: IndexPath) -> StoreResult<()> {
        let id = self.object(at).map(|tracker| tracker.id).ok_or(StoreError::NoTrackerAt(at.section, at.item))?;
        self.trackers.delete_by_id(id)?;
        self.process_changes()?;
        Ok(())
    }

    /// Returns the new pinned state.
    pub fn pin_tracker(&mut self, id: Uuid) -> StoreResult<bool> {
        let pinned = self.trackers.pin(id)?;
        self.process_changes()?;
        Ok(pinned)
    }

    /// Toggles completion on the viewed date. Returns the new state.
    pub fn toggle_completion(&mut self, id: Uuid) -> StoreResult<bool> {
        let completed = self.records.toggle_on(id, self.query.date, self.query.today)?;
        self.process_changes()?;
        Ok(completed)
    }

    pub fn is_completed(&self, id: Uuid) -> StoreResult<bool> {
        self.records.is_completed(id, self.query.date)
    }

    pub fn count_completions(&self, id: Uuid) -> StoreResult<usize> {
        self.records.count_completions(id)
    }

    fn fetch(&self) -> StoreResult<Vec<TrackerCategory>> {
        let completed = if self.query.mode.needs_completions() {
            self.records.completed_ids_on(self.query.date)?
        } else {
            CompletedIds::None
        };
        let predicate = TrackerPredicate::build(&self.query, &completed);
        self.trackers.fetch_sections(&predicate)
    }
}

/// Index pairs `(old, new)` of a longest common subsequence of `old` and `new`.
fn common_subsequence<T>(old: &[T], new: &[T], same: impl Fn(&T, &T) -> bool) -> Vec<(usize, usize)> {
    let (n, m) = (old.len(), new.len());
    // lengths[i][j]: LCS length of old[i..] and new[j..]
    let mut lengths = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lengths[i][j] = if same(&old[i], &new[j]) {
                lengths[i + 1][j + 1] + 1
            } else {
                lengths[i + 1][j].max(lengths[i][j + 1])
            };
        }
    }

    let mut pairs = Vec::with_capacity(lengths[0][0]);
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if same(&old[i], &new[j]) {
            pairs.push((i, j));
            i += 1;
            j += 1;
        } else if lengths[i + 1][j] >= lengths[i][j + 1] {
            i += 1;
        } else {
            j += 1;
        }
    }
    pairs
}

/// Edit script turning `old` into `new`.
pub fn diff_sections(old: &[TrackerCategory], new: &[TrackerCategory]) -> TrackerStoreUpdate {
    let mut update = TrackerStoreUpdate::default();

    let kept_sections = common_subsequence(old, new, |a, b| a.name == b.name);
    let kept_old: BTreeSet<usize> = kept_sections.iter().map(|&(o, _)| o).collect();
    let kept_new: BTreeSet<usize> = kept_sections.iter().map(|&(_, n)| n).collect();
    update.deleted_sections = (0..old.len()).filter(|i| !kept_old.contains(i)).collect();
    update.inserted_sections = (0..new.len()).filter(|i| !kept_new.contains(i)).collect();

    for (old_section, new_section) in kept_sections {
        let before = &old[old_section].trackers;
        let after = &new[new_section].trackers;
        let kept_rows = common_subsequence(before, after, |a, b| a == b);
        let rows_old: BTreeSet<usize> = kept_rows.iter().map(|&(o, _)| o).collect();
        let rows_new: BTreeSet<usize> = kept_rows.iter().map(|&(_, n)| n).collect();

        update.deleted_indexes.extend(
            (0..before.len())
                .filter(|item| !rows_old.contains(item))
                .map(|item| IndexPath::new(old_section, item)),
        );
        update.inserted_indexes.extend(
            (0..after.len())
                .filter(|item| !rows_new.contains(item))
                .map(|item| IndexPath::new(new_section, item)),
        );
    }

    update
}
