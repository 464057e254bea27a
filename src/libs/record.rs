use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Marks one tracker as completed on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackerRecord {
    pub id: Uuid,
    pub day: NaiveDate,
}

impl TrackerRecord {
    pub fn new(id: Uuid, day: NaiveDate) -> Self {
        Self { id, day }
    }

    /// Drops the time of day.
    pub fn at(id: Uuid, moment: NaiveDateTime) -> Self {
        Self { id, day: moment.date() }
    }
}

/// Trackers completed on a given day.
///
/// `None` is kept apart from an empty set so filter predicates can tell
/// "there are no records for this day" without inspecting the set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletedIds {
    None,
    Ids(HashSet<Uuid>),
}

impl CompletedIds {
    pub fn from_ids(ids: HashSet<Uuid>) -> Self {
        if ids.is_empty() {
            CompletedIds::None
        } else {
            CompletedIds::Ids(ids)
        }
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        match self {
            CompletedIds::None => false,
            CompletedIds::Ids(ids) => ids.contains(id),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            CompletedIds::None => 0,
            CompletedIds::Ids(ids) => ids.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
