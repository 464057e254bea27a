use super::migrations::init_with_migrations;
use crate::libs::data_storage::DataStorage;
use crate::libs::error::StoreResult;
use anyhow::Result;
use parking_lot::Mutex;
use rusqlite::{Connection, Transaction};
use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

pub const DB_FILE_NAME: &str = "tracker.db";

/// Which table family a write touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreChange {
    Trackers,
    Categories,
    Records,
    Settings,
}

/// Shared handle to the single SQLite connection.
///
/// Cloning is cheap and every clone talks to the same connection. Access is
/// serialized: [`Db::perform`] blocks the calling thread until it holds the
/// connection, runs the closure and releases it.
#[derive(Clone)]
pub struct Db {
    conn: Arc<Mutex<Connection>>,
    subscribers: Arc<Mutex<Vec<Sender<StoreChange>>>>,
}

impl Db {
    /// Opens `tracker.db` in the application data directory.
    pub fn new() -> Result<Db> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME)?;
        Self::open(db_file_path)
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Db> {
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Db> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(mut conn: Connection) -> Result<Db> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        init_with_migrations(&mut conn)?;

        Ok(Db {
            conn: Arc::new(Mutex::new(conn)),
            subscribers: Arc::new(Mutex::new(Vec::new())),
        })
    }

    /// Runs `action` with exclusive access to the connection.
    pub fn perform<R>(&self, action: impl FnOnce(&Connection) -> StoreResult<R>) -> StoreResult<R> {
        let conn_guard = self.conn.lock();
        action(&conn_guard)
    }

    /// Like [`Db::perform`], inside a transaction that commits when `action` succeeds.
    pub fn perform_tx<R>(&self, action: impl FnOnce(&Transaction) -> StoreResult<R>) -> StoreResult<R> {
        let mut conn_guard = self.conn.lock();
        let tx = conn_guard.transaction()?;
        let result = action(&tx)?;
        tx.commit()?;
        Ok(result)
    }

    /// Registers a new listener for [`StoreChange`] notifications.
    pub fn subscribe(&self) -> Receiver<StoreChange> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.lock().push(tx);
        rx
    }

    /// Tells every live subscriber that `change` was written.
    pub fn notify(&self, change: StoreChange) {
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|subscriber| subscriber.send(change).is_ok());
        tracing::trace!(?change, subscribers = subscribers.len(), "store changed");
    }
}
