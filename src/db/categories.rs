//! Category repository.
//!
//! Categories are keyed by name and created implicitly the first time a
//! tracker is filed under them. The pinned category is created lazily with
//! sort order 0 so it always sorts ahead of user categories (sort order 1 and
//! up, ties broken by creation order). Categories are never deleted.

use super::db::{Db, StoreChange};
use super::trackers::{tracker_from_row, TRACKER_COLUMNS};
use crate::libs::category::{is_pinned_category, TrackerCategory, DEFAULT_SORT_ORDER, PINNED_SORT_ORDER};
use crate::libs::error::{StoreError, StoreResult};
use crate::libs::tracker::Tracker;
use rusqlite::{params, Connection, OptionalExtension};

const INSERT_CATEGORY: &str = "INSERT INTO categories (name, sort_order) VALUES (?1, ?2)";
const SELECT_CATEGORY_ID: &str = "SELECT id FROM categories WHERE name = ?1";
const SELECT_CATEGORY: &str = "SELECT id, name, sort_order FROM categories WHERE name = ?1";
const SELECT_ALL_CATEGORIES: &str = "SELECT id, name, sort_order FROM categories ORDER BY sort_order, id";

fn find_id_in(conn: &Connection, name: &str) -> StoreResult<Option<i64>> {
    Ok(conn.query_row(SELECT_CATEGORY_ID, params![name], |row| row.get(0)).optional()?)
}

/// Id of the category called `name`, inserting it with `sort_order` if missing.
pub(crate) fn ensure_with_order_in(conn: &Connection, name: &str, sort_order: i64) -> StoreResult<i64> {
    if let Some(id) = find_id_in(conn, name)? {
        return Ok(id);
    }
    conn.execute(INSERT_CATEGORY, params![name, sort_order])?;
    tracing::debug!(name, sort_order, "category created");
    Ok(conn.last_insert_rowid())
}

/// Fails for the pinned category, which only pinning may create.
pub(crate) fn reject_reserved(name: &str) -> StoreResult<()> {
    if is_pinned_category(name) {
        return Err(StoreError::ReservedCategory(name.to_string()));
    }
    Ok(())
}

/// Like [`ensure_with_order_in`], picking the sort order from the name.
pub(crate) fn ensure_in(conn: &Connection, name: &str) -> StoreResult<i64> {
    let sort_order = if is_pinned_category(name) { PINNED_SORT_ORDER } else { DEFAULT_SORT_ORDER };
    ensure_with_order_in(conn, name, sort_order)
}

fn trackers_in(conn: &Connection, category_id: i64) -> StoreResult<Vec<Tracker>> {
    let sql = format!("SELECT {} FROM trackers t WHERE t.category_id = ?1 ORDER BY t.seq", TRACKER_COLUMNS);
    let mut stmt = conn.prepare(&sql)?;
    let trackers = stmt.query_map(params![category_id], tracker_from_row)?.collect::<Result<Vec<_>, _>>()?;
    Ok(trackers)
}

fn load_in(conn: &Connection, id: i64, name: String, sort_order: i64) -> StoreResult<TrackerCategory> {
    Ok(TrackerCategory {
        name,
        sort_order,
        trackers: trackers_in(conn, id)?,
    })
}

pub struct CategoryStore {
    db: Db,
}

impl CategoryStore {
    pub fn new(db: &Db) -> Self {
        Self { db: db.clone() }
    }

    /// Returns the id of the category called `name`, creating it if needed.
    pub fn ensure(&self, name: &str) -> StoreResult<i64> {
        reject_reserved(name)?;
        let (id, created) = self.db.perform(|conn| {
            let existing = find_id_in(conn, name)?;
            match existing {
                Some(id) => Ok((id, false)),
                None => Ok((ensure_in(conn, name)?, true)),
            }
        })?;

        if created {
            self.db.notify(StoreChange::Categories);
        }
        Ok(id)
    }

    /// Creates a category with an explicit sort order. An existing category
    /// with the same name is returned untouched.
    pub fn add_record(&self, title: &str, sort_order: i64) -> StoreResult<i64> {
        reject_reserved(title)?;
        let (id, created) = self.db.perform(|conn| {
            let existing = find_id_in(conn, title)?;
            match existing {
                Some(id) => Ok((id, false)),
                None => Ok((ensure_with_order_in(conn, title, sort_order)?, true)),
            }
        })?;

        if created {
            self.db.notify(StoreChange::Categories);
        }
        Ok(id)
    }

    pub fn get_by_name(&self, name: &str) -> StoreResult<Option<TrackerCategory>> {
        self.db.perform(|conn| {
            let row = conn
                .query_row(SELECT_CATEGORY, params![name], |row| {
                    Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?, row.get::<_, i64>(2)?))
                })
                .optional()?;
            row.map(|(id, name, sort_order)| load_in(conn, id, name, sort_order)).transpose()
        })
    }

    /// Every category with its trackers, pinned category first.
    pub fn list(&self) -> StoreResult<Vec<TrackerCategory>> {
        self.db.perform(|conn| {
            let mut stmt = conn.prepare(SELECT_ALL_CATEGORIES)?;
            let rows = stmt
                .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?, row.get::<_, i64>(2)?)))?
                .collect::<Result<Vec<_>, _>>()?;

            rows.into_iter()
                .map(|(id, name, sort_order)| load_in(conn, id, name, sort_order))
                .collect()
        })
    }

    /// Categories a user can file a tracker under (everything but the pinned one).
    pub fn list_user(&self) -> StoreResult<Vec<TrackerCategory>> {
        Ok(self.list()?.into_iter().filter(|category| !category.is_pinned()).collect())
    }
}
