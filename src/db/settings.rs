use super::db::{Db, StoreChange};
use crate::libs::error::StoreResult;
use crate::libs::filter::FilterMode;
use crate::libs::messages::Message;
use crate::msg_warning;
use rusqlite::{params, OptionalExtension};

pub const FILTER_KEY: &str = "filter";

const SELECT_SETTING: &str = "SELECT value FROM settings WHERE key = ?1";
const UPSERT_SETTING: &str = "INSERT INTO settings (key, value) VALUES (?1, ?2)
    ON CONFLICT(key) DO UPDATE SET value = excluded.value";

/// Key-value preferences stored next to the trackers.
pub struct Settings {
    db: Db,
}

impl Settings {
    pub fn new(db: &Db) -> Self {
        Self { db: db.clone() }
    }

    pub fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.db.perform(|conn| Ok(conn.query_row(SELECT_SETTING, params![key], |row| row.get(0)).optional()?))
    }

    pub fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.db.perform(|conn| {
            conn.execute(UPSERT_SETTING, params![key, value])?;
            Ok(())
        })?;
        self.db.notify(StoreChange::Settings);
        Ok(())
    }

    /// Active filter mode; `All` when unset or unreadable.
    pub fn filter_mode(&self) -> StoreResult<FilterMode> {
        let mode = match self.get(FILTER_KEY)? {
            None => FilterMode::All,
            Some(name) => name.parse().unwrap_or_else(|_| {
                msg_warning!(Message::UnknownFilterMode(name.clone()));
                FilterMode::All
            }),
        };
        Ok(mode)
    }

    pub fn set_filter_mode(&self, mode: FilterMode) -> StoreResult<()> {
        self.set(FILTER_KEY, mode.name())
    }
}
