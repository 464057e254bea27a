//! Error type returned across every repository boundary.
//!
//! Lookups that legitimately find nothing return `Ok(None)`, an empty list or
//! zero. `StoreError` is reserved for writes and reads that actually failed,
//! so callers can tell "no data" apart from "the store broke".

use chrono::NaiveDate;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Tracker not found: {0}")]
    TrackerNotFound(Uuid),

    #[error("No tracker id starts with '{0}'")]
    UnknownIdPrefix(String),

    #[error("Tracker id prefix '{0}' matches {1} trackers")]
    AmbiguousId(String, usize),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Unknown filter mode '{0}'")]
    InvalidFilterMode(String),

    #[error("Invalid color '{0}', expected #RRGGBB")]
    InvalidColor(String),

    #[error("Invalid tracker id '{0}'")]
    InvalidId(String),

    #[error("Cannot mark {0} as completed: the day has not come yet")]
    FutureDay(NaiveDate),

    #[error("'{0}' is reserved for pinned trackers")]
    ReservedCategory(String),

    #[error("No tracker at section {0}, item {1}")]
    NoTrackerAt(usize, usize),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
