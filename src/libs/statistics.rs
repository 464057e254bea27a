use super::error::StoreResult;
use super::record::TrackerRecord;
use super::tracker::{ScheduleItem, Tracker};
use crate::db::records::RecordStore;
use crate::db::trackers::TrackerStore;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use uuid::Uuid;

/// Totals shown on the statistics screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statistics {
    /// Every completion record ever written, including those of deleted trackers.
    pub completed_total: usize,
    /// Longest run of consecutive days with at least one completion.
    pub best_period: usize,
    /// Days on which every tracker scheduled for that weekday was completed.
    pub perfect_days: usize,
    /// Completions per day that has any.
    pub average: f64,
}

impl Statistics {
    pub fn collect(records: &RecordStore, trackers: &TrackerStore) -> StoreResult<Self> {
        Ok(Self::from_records(&records.list_all()?, &trackers.list()?))
    }

    pub fn from_records(records: &[TrackerRecord], trackers: &[Tracker]) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let mut days: BTreeMap<NaiveDate, HashSet<Uuid>> = BTreeMap::new();
        for record in records {
            days.entry(record.day).or_default().insert(record.id);
        }

        let completed_total = records.len();
        Self {
            completed_total,
            best_period: longest_streak(days.keys().copied()),
            perfect_days: days.iter().filter(|(day, done)| is_perfect(**day, done, trackers)).count(),
            average: completed_total as f64 / days.len() as f64,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.completed_total == 0
    }
}

/// `days` must be ascending.
fn longest_streak(days: impl Iterator<Item = NaiveDate>) -> usize {
    let mut best = 0;
    let mut current = 0;
    let mut previous: Option<NaiveDate> = None;

    for day in days {
        current = match previous {
            Some(prev) if prev.succ_opt() == Some(day) => current + 1,
            _ => 1,
        };
        best = best.max(current);
        previous = Some(day);
    }
    best
}

fn is_perfect(day: NaiveDate, done: &HashSet<Uuid>, trackers: &[Tracker]) -> bool {
    let weekday = ScheduleItem::of(day);
    let mut scheduled = trackers.iter().filter(|t| t.is_scheduled_on(weekday)).peekable();
    scheduled.peek().is_some() && scheduled.all(|t| done.contains(&t.id))
}
