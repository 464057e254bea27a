//! Domain types and application services.
//!
//! - Value types: [`tracker`], [`category`], [`record`]
//! - Queries and the live list: [`filter`], [`data_provider`]
//! - Reporting: [`statistics`], [`analytics`], [`view`]
//! - Infrastructure: [`config`], [`data_storage`], [`error`], [`messages`]
//!
//! ```rust
//! use tracker::db::{db::Db, trackers::TrackerStore};
//! use tracker::libs::tracker::{Color, Schedule, Tracker};
//!
//! let db = Db::open_in_memory()?;
//! let tracker = Tracker::new("Read", "📚", Color::default(), Some(Schedule::every_day()));
//! TrackerStore::new(&db).create(&tracker, "Study")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod analytics;
pub mod category;
pub mod config;
pub mod data_provider;
pub mod data_storage;
pub mod error;
pub mod filter;
pub mod messages;
pub mod record;
pub mod statistics;
pub mod tracker;
pub mod view;
