//! SQLite persistence.
//!
//! One connection, shared through [`db::Db`], with a repository per table
//! family. Schema changes go through [`migrations`]; every repository write
//! notifies [`db::Db::subscribe`] listeners.

/// Connection handle, serialized access and change notification.
pub mod db;

/// Versioned schema changes.
pub mod migrations;

pub mod categories;
pub mod records;
pub mod settings;
pub mod trackers;
