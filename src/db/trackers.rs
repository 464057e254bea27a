//! Tracker repository.
//!
//! Trackers live in the `trackers` table and point at exactly one row of
//! `categories`. Pinning moves a tracker into the synthetic pinned category
//! while `original_category` remembers where it came from, so unpinning can
//! put it back.
//!
//! ## Usage
//!
//! ```rust
//! use tracker::db::{db::Db, trackers::TrackerStore};
//! use tracker::libs::tracker::{Color, Schedule, ScheduleItem, Tracker};
//!
//! let db = Db::open_in_memory()?;
//! let trackers = TrackerStore::new(&db);
//! let run = Tracker::new("Run", "🏃", Color::default(), Some(Schedule::new([ScheduleItem::Monday])?));
//! trackers.create(&run, "Health")?;
//! assert_eq!(trackers.category_title(run.id)?.as_deref(), Some("Health"));
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::categories::{ensure_in, reject_reserved};
use super::db::{Db, StoreChange};
use crate::libs::category::{is_pinned_category, TrackerCategory, PINNED_CATEGORY};
use crate::libs::error::{StoreError, StoreResult};
use crate::libs::filter::TrackerPredicate;
use crate::libs::tracker::{Color, Schedule, Tracker};
use rusqlite::types::Type;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use uuid::Uuid;

/// Columns read by [`tracker_from_row`], in order.
pub(crate) const TRACKER_COLUMNS: &str = "t.id, t.name, t.emoji, t.color, t.schedule, t.is_pinned, t.original_category";

const INSERT_TRACKER: &str = "INSERT INTO trackers (id, name, emoji, color, schedule, is_pinned, original_category, category_id)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const UPDATE_TRACKER: &str = "UPDATE trackers
    SET name = ?2, emoji = ?3, color = ?4, schedule = ?5, is_pinned = ?6, original_category = ?7, category_id = ?8
    WHERE id = ?1";
const UPDATE_PLACEMENT: &str = "UPDATE trackers SET is_pinned = ?2, original_category = ?3, category_id = ?4 WHERE id = ?1";
const DELETE_TRACKER: &str = "DELETE FROM trackers WHERE id = ?1";
const SELECT_PLACEMENT: &str = "SELECT c.name, t.original_category FROM trackers t
    JOIN categories c ON c.id = t.category_id
    WHERE t.id = ?1";
const SELECT_CATEGORY_TITLE: &str = "SELECT c.name FROM trackers t JOIN categories c ON c.id = t.category_id WHERE t.id = ?1";

/// Maps a row whose first columns are [`TRACKER_COLUMNS`].
pub(crate) fn tracker_from_row(row: &Row) -> rusqlite::Result<Tracker> {
    let id: String = row.get(0)?;
    let color: String = row.get(3)?;
    let schedule: Option<String> = row.get(4)?;

    Ok(Tracker {
        id: Uuid::parse_str(&id).map_err(|e| conversion_error(0, e))?,
        name: row.get(1)?,
        emoji: row.get(2)?,
        color: color.parse::<Color>().map_err(|e| conversion_error(3, e))?,
        schedule: schedule
            .map(|value| Schedule::from_column(&value))
            .transpose()
            .map_err(|e| conversion_error(4, e))?,
        is_pinned: row.get(5)?,
        original_category: row.get(6)?,
    })
}

fn conversion_error(column: usize, error: impl std::error::Error + Send + Sync + 'static) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(error))
}

/// Current category name and stored original category of a tracker.
fn placement_in(conn: &Connection, id: Uuid) -> StoreResult<(String, String)> {
    conn.query_row(SELECT_PLACEMENT, params![id.to_string()], |row| Ok((row.get(0)?, row.get(1)?)))
        .optional()?
        .ok_or(StoreError::TrackerNotFound(id))
}

pub struct TrackerStore {
    db: Db,
}

impl TrackerStore {
    pub fn new(db: &Db) -> Self {
        Self { db: db.clone() }
    }

    /// Inserts `tracker` and files it under `category_name`, creating the
    /// category on first use. The pinned category is not a valid target.
    pub fn create(&self, tracker: &Tracker, category_name: &str) -> StoreResult<()> {
        reject_reserved(category_name)?;
        self.db.perform_tx(|tx| {
            let category_id = ensure_in(tx, category_name)?;
            tx.execute(
                INSERT_TRACKER,
                params![
                    tracker.id.to_string(),
                    tracker.name,
                    tracker.emoji,
                    tracker.color.to_string(),
                    tracker.schedule.as_ref().map(Schedule::to_column),
                    false,
                    category_name,
                    category_id
                ],
            )?;
            Ok(())
        })?;

        tracing::debug!(id = %tracker.id, name = %tracker.name, category = category_name, "tracker created");
        self.db.notify(StoreChange::Trackers);
        Ok(())
    }

    /// Rewrites the tracker with the same id.
    ///
    /// Only a tracker that currently sits in the pinned category can stay
    /// pinned, and only if `tracker.is_pinned` says so; any other edit leaves
    /// it unpinned and filed under `category_name`. A pinned tracker that stays
    /// pinned records `category_name` as the category to return to.
    pub fn edit(&self, tracker: &Tracker, category_name: &str) -> StoreResult<()> {
        self.db.perform_tx(|tx| {
            let (current, original) = placement_in(tx, tracker.id)?;
            let keep_pinned = is_pinned_category(&current) && tracker.is_pinned;
            let home = if is_pinned_category(category_name) { original.as_str() } else { category_name };
            let home_id = ensure_in(tx, home)?;
            let category_id = if keep_pinned { ensure_in(tx, PINNED_CATEGORY)? } else { home_id };

            tx.execute(
                UPDATE_TRACKER,
                params![
                    tracker.id.to_string(),
                    tracker.name,
                    tracker.emoji,
                    tracker.color.to_string(),
                    tracker.schedule.as_ref().map(Schedule::to_column),
                    keep_pinned,
                    home,
                    category_id
                ],
            )?;
            Ok(())
        })?;

        tracing::debug!(id = %tracker.id, category = category_name, "tracker edited");
        self.db.notify(StoreChange::Trackers);
        Ok(())
    }

    /// Removes the tracker row. Its category and completion records stay.
    pub fn delete_by_id(&self, id: Uuid) -> StoreResult<()> {
        let affected = self.db.perform(|conn| Ok(conn.execute(DELETE_TRACKER, params![id.to_string()])?))?;
        if affected == 0 {
            return Err(StoreError::TrackerNotFound(id));
        }

        tracing::debug!(%id, "tracker deleted");
        self.db.notify(StoreChange::Trackers);
        Ok(())
    }

    /// Moves the tracker into the pinned category, or back to its original
    /// category if it is already pinned. Returns the new pinned state.
    pub fn pin(&self, id: Uuid) -> StoreResult<bool> {
        let pinned = self.db.perform_tx(|tx| {
            let (current, original) = placement_in(tx, id)?;
            if is_pinned_category(&current) {
                let category_id = ensure_in(tx, &original)?;
                tx.execute(UPDATE_PLACEMENT, params![id.to_string(), false, original, category_id])?;
                Ok(false)
            } else {
                let category_id = ensure_in(tx, PINNED_CATEGORY)?;
                tx.execute(UPDATE_PLACEMENT, params![id.to_string(), true, current, category_id])?;
                Ok(true)
            }
        })?;

        tracing::debug!(%id, pinned, "tracker pin toggled");
        self.db.notify(StoreChange::Trackers);
        Ok(pinned)
    }

    /// Name of the category the tracker is currently filed under.
    pub fn category_title(&self, id: Uuid) -> StoreResult<Option<String>> {
        self.db.perform(|conn| {
            Ok(conn
                .query_row(SELECT_CATEGORY_TITLE, params![id.to_string()], |row| row.get(0))
                .optional()?)
        })
    }

    pub fn get(&self, id: Uuid) -> StoreResult<Option<Tracker>> {
        self.db.perform(|conn| {
            let sql = format!("SELECT {} FROM trackers t WHERE t.id = ?1", TRACKER_COLUMNS);
            Ok(conn.query_row(&sql, params![id.to_string()], tracker_from_row).optional()?)
        })
    }

    /// All trackers in creation order.
    pub fn list(&self) -> StoreResult<Vec<Tracker>> {
        self.db.perform(|conn| {
            let sql = format!("SELECT {} FROM trackers t ORDER BY t.seq", TRACKER_COLUMNS);
            let mut stmt = conn.prepare(&sql)?;
            let trackers = stmt.query_map([], tracker_from_row)?.collect::<Result<Vec<_>, _>>()?;
            Ok(trackers)
        })
    }

    /// Resolves a full id or a unique prefix of one.
    pub fn find_by_prefix(&self, prefix: &str) -> StoreResult<Tracker> {
        let prefix = prefix.trim().to_lowercase();
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_hexdigit() || c == '-') {
            return Err(StoreError::InvalidId(prefix));
        }

        let mut matches = self.db.perform(|conn| {
            let sql = format!("SELECT {} FROM trackers t WHERE t.id LIKE ?1 || '%' ORDER BY t.seq", TRACKER_COLUMNS);
            let mut stmt = conn.prepare(&sql)?;
            let trackers = stmt.query_map(params![prefix], tracker_from_row)?.collect::<Result<Vec<_>, _>>()?;
            Ok(trackers)
        })?;

        match matches.len() {
            0 => Err(StoreError::UnknownIdPrefix(prefix)),
            1 => Ok(matches.remove(0)),
            count => Err(StoreError::AmbiguousId(prefix, count)),
        }
    }

    /// Trackers matching `predicate`, grouped into sections by category.
    ///
    /// Sections follow the categories' sort order (pinned first, then user
    /// categories in creation order); trackers keep creation order inside a
    /// section.
    pub fn fetch_sections(&self, predicate: &TrackerPredicate) -> StoreResult<Vec<TrackerCategory>> {
        let rows = self.db.perform(|conn| {
            let sql = format!(
                "SELECT {}, c.name, c.sort_order FROM trackers t
                JOIN categories c ON c.id = t.category_id
                WHERE {}
                ORDER BY c.sort_order, c.id, t.seq",
                TRACKER_COLUMNS,
                predicate.where_clause()
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params_from_iter(predicate.params()), |row| {
                    Ok((tracker_from_row(row)?, row.get::<_, String>(7)?, row.get::<_, i64>(8)?))
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })?;

        let mut sections: Vec<TrackerCategory> = Vec::new();
        for (tracker, category, sort_order) in rows {
            if !predicate.matches_name(&tracker.name) {
                continue;
            }
            match sections.last_mut() {
                Some(section) if section.name == category => section.trackers.push(tracker),
                _ => {
                    let mut section = TrackerCategory::new(&category, sort_order);
                    section.trackers.push(tracker);
                    sections.push(section);
                }
            }
        }

        Ok(sections)
    }
}
