//! Completion record repository.
//!
//! A record says "tracker X was completed on day D". Toggling is idempotent
//! per day: a second toggle removes the record instead of counting twice.
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use tracker::db::{db::Db, records::RecordStore};
//! use uuid::Uuid;
//!
//! let db = Db::open_in_memory()?;
//! let records = RecordStore::new(&db);
//! let id = Uuid::new_v4();
//! let day = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
//!
//! assert!(records.toggle_on(id, day, day)?);
//! assert_eq!(records.count_completions(id)?, 1);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::db::{Db, StoreChange};
use crate::libs::error::{StoreError, StoreResult};
use crate::libs::record::{CompletedIds, TrackerRecord};
use chrono::{Local, NaiveDate};
use rusqlite::{params, OptionalExtension};
use std::collections::HashSet;
use uuid::Uuid;

const INSERT_RECORD: &str = "INSERT INTO records (tracker_id, day) VALUES (?1, ?2)";
const DELETE_RECORD: &str = "DELETE FROM records WHERE id = ?1";
const SELECT_RECORD_ID: &str = "SELECT id FROM records WHERE tracker_id = ?1 AND day = ?2";
const COUNT_BY_TRACKER: &str = "SELECT COUNT(*) FROM records WHERE tracker_id = ?1";
const COUNT_ALL: &str = "SELECT COUNT(*) FROM records";
const SELECT_IDS_BY_DAY: &str = "SELECT tracker_id FROM records WHERE day = ?1";
const SELECT_ALL: &str = "SELECT tracker_id, day FROM records ORDER BY day, id";

pub struct RecordStore {
    db: Db,
}

impl RecordStore {
    pub fn new(db: &Db) -> Self {
        Self { db: db.clone() }
    }

    /// Flips the completion state of `tracker_id` on `day`, judged against
    /// the local calendar. Returns the new state.
    pub fn toggle(&self, tracker_id: Uuid, day: NaiveDate) -> StoreResult<bool> {
        self.toggle_on(tracker_id, day, Local::now().date_naive())
    }

    /// Like [`RecordStore::toggle`] with an explicit "today". Days after
    /// `today` cannot be completed.
    pub fn toggle_on(&self, tracker_id: Uuid, day: NaiveDate, today: NaiveDate) -> StoreResult<bool> {
        if day > today {
            return Err(StoreError::FutureDay(day));
        }

        let completed = self.db.perform_tx(|tx| {
            let existing: Option<i64> = tx
                .query_row(SELECT_RECORD_ID, params![tracker_id.to_string(), day], |row| row.get(0))
                .optional()?;

            match existing {
                Some(record_id) => {
                    tx.execute(DELETE_RECORD, params![record_id])?;
                    Ok(false)
                }
                None => {
                    tx.execute(INSERT_RECORD, params![tracker_id.to_string(), day])?;
                    Ok(true)
                }
            }
        })?;

        tracing::debug!(%tracker_id, %day, completed, "completion toggled");
        self.db.notify(StoreChange::Records);
        Ok(completed)
    }

    pub fn is_completed(&self, tracker_id: Uuid, day: NaiveDate) -> StoreResult<bool> {
        self.db.perform(|conn| {
            let existing: Option<i64> = conn
                .query_row(SELECT_RECORD_ID, params![tracker_id.to_string(), day], |row| row.get(0))
                .optional()?;
            Ok(existing.is_some())
        })
    }

    /// Number of days the tracker was ever completed on.
    pub fn count_completions(&self, tracker_id: Uuid) -> StoreResult<usize> {
        self.db.perform(|conn| {
            let count: i64 = conn.query_row(COUNT_BY_TRACKER, params![tracker_id.to_string()], |row| row.get(0))?;
            Ok(count as usize)
        })
    }

    /// Ids of the trackers completed on `day`, or [`CompletedIds::None`].
    pub fn completed_ids_on(&self, day: NaiveDate) -> StoreResult<CompletedIds> {
        let ids = self.db.perform(|conn| {
            let mut stmt = conn.prepare(SELECT_IDS_BY_DAY)?;
            let ids = stmt.query_map(params![day], |row| row.get::<_, String>(0))?.collect::<Result<Vec<_>, _>>()?;
            Ok(ids)
        })?;

        let ids = ids
            .iter()
            .map(|id| Uuid::parse_str(id).map_err(|_| StoreError::InvalidId(id.clone())))
            .collect::<StoreResult<HashSet<_>>>()?;
        Ok(CompletedIds::from_ids(ids))
    }

    /// Total number of records across all trackers and days.
    pub fn count_all(&self) -> StoreResult<usize> {
        self.db.perform(|conn| {
            let count: i64 = conn.query_row(COUNT_ALL, [], |row| row.get(0))?;
            Ok(count as usize)
        })
    }

    /// Every record, oldest day first.
    pub fn list_all(&self) -> StoreResult<Vec<TrackerRecord>> {
        let rows = self.db.perform(|conn| {
            let mut stmt = conn.prepare(SELECT_ALL)?;
            let rows = stmt
                .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, NaiveDate>(1)?)))?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })?;

        rows.into_iter()
            .map(|(id, day)| {
                let id = Uuid::parse_str(&id).map_err(|_| StoreError::InvalidId(id.clone()))?;
                Ok(TrackerRecord::new(id, day))
            })
            .collect()
    }
}
