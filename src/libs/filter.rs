//! Filter modes and the predicate behind the main tracker list.
//!
//! A [`TrackerQuery`] describes what the list should show: the viewed date,
//! the real current date, a [`FilterMode`] and an optional search text.
//! [`TrackerPredicate::build`] turns it into a SQL `WHERE` clause with bound
//! parameters plus a name check that runs on fetched rows.
//!
//! ## Rules
//!
//! 1. The tracker's schedule contains the viewed date's weekday (Monday-first
//!    week, Sunday last). Trackers without a schedule never match.
//! 2. `Today` additionally requires the current date's weekday.
//!    `Completed` keeps trackers completed on the viewed date and matches
//!    nothing when that date has no records. `NotCompleted` drops them and
//!    keeps everything when the date has no records.
//! 3. A non-empty search keeps trackers whose name contains it, ignoring case.

use super::error::StoreError;
use super::record::CompletedIds;
use super::tracker::ScheduleItem;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    #[default]
    All,
    Today,
    Completed,
    NotCompleted,
}

impl FilterMode {
    pub const ALL: [FilterMode; 4] = [FilterMode::All, FilterMode::Today, FilterMode::Completed, FilterMode::NotCompleted];

    /// Name used when the mode is persisted.
    pub fn name(&self) -> &'static str {
        match self {
            FilterMode::All => "all",
            FilterMode::Today => "today",
            FilterMode::Completed => "completed",
            FilterMode::NotCompleted => "not_completed",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            FilterMode::All => "All trackers",
            FilterMode::Today => "Trackers for today",
            FilterMode::Completed => "Completed",
            FilterMode::NotCompleted => "Not completed",
        }
    }

    /// Whether building the predicate needs the viewed date's completions.
    pub fn needs_completions(&self) -> bool {
        matches!(self, FilterMode::Completed | FilterMode::NotCompleted)
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterMode {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase().replace('-', "_");
        FilterMode::ALL
            .into_iter()
            .find(|mode| mode.name() == needle)
            .ok_or_else(|| StoreError::InvalidFilterMode(s.trim().to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerQuery {
    /// Date the list is viewed for.
    pub date: NaiveDate,
    /// The real current date, used by [`FilterMode::Today`].
    pub today: NaiveDate,
    pub mode: FilterMode,
    pub search: Option<String>,
}

impl TrackerQuery {
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date,
            today: Local::now().date_naive(),
            mode: FilterMode::All,
            search: None,
        }
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn with_mode(mut self, mode: FilterMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }
}

/// Compiled form of a [`TrackerQuery`].
///
/// Column references use the `t` alias of the `trackers` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerPredicate {
    clauses: Vec<String>,
    params: Vec<String>,
    search: Option<String>,
}

impl TrackerPredicate {
    /// `completed` is only consulted for the completion-based modes.
    pub fn build(query: &TrackerQuery, completed: &CompletedIds) -> Self {
        let mut predicate = Self {
            clauses: Vec::new(),
            params: Vec::new(),
            search: None,
        };

        predicate.require_weekday(ScheduleItem::of(query.date));

        match query.mode {
            FilterMode::All => {}
            FilterMode::Today => predicate.require_weekday(ScheduleItem::of(query.today)),
            FilterMode::Completed => match completed {
                CompletedIds::None => predicate.clauses.push("0".to_string()),
                CompletedIds::Ids(ids) => predicate.require_ids("IN", ids.iter().map(|id| id.to_string())),
            },
            FilterMode::NotCompleted => match completed {
                CompletedIds::None => {}
                CompletedIds::Ids(ids) => predicate.require_ids("NOT IN", ids.iter().map(|id| id.to_string())),
            },
        }

        predicate.search = query
            .search
            .as_ref()
            .map(|text| text.trim().to_lowercase())
            .filter(|text| !text.is_empty());

        predicate
    }

    fn require_weekday(&mut self, day: ScheduleItem) {
        // Pad both sides with commas so "Monday" never matches inside another label
        self.clauses.push("(',' || t.schedule || ',') LIKE ?".to_string());
        self.params.push(format!("%,{},%", day.label()));
    }

    fn require_ids(&mut self, operator: &str, ids: impl Iterator<Item = String>) {
        let mut ids: Vec<String> = ids.collect();
        ids.sort();
        self.clauses.push(format!("t.id {} ({})", operator, vec!["?"; ids.len()].join(", ")));
        self.params.extend(ids);
    }

    /// Conditions joined with `AND`; never empty.
    pub fn where_clause(&self) -> String {
        if self.clauses.is_empty() {
            return "1".to_string();
        }
        self.clauses.join(" AND ")
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Case-insensitive containment check for the search text.
    ///
    /// Runs in Rust because SQLite's `lower()` only folds ASCII.
    pub fn matches_name(&self, name: &str) -> bool {
        match &self.search {
            Some(search) => name.to_lowercase().contains(search.as_str()),
            None => true,
        }
    }
}
