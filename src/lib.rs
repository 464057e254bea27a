//! # Tracker
//!
//! Habit and irregular event tracking backed by SQLite.
//!
//! Trackers are grouped into categories, scheduled on weekdays and completed
//! at most once per day. The main list is a live, filtered view of the
//! trackers scheduled for a date; writes to the store show up in it as
//! batched row and section changes.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tracker::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;

/// Constants generated from `Cargo.toml` at build time.
pub mod app_metadata {
    include!(concat!(env!("OUT_DIR"), "/app_metadata.rs"));
}
