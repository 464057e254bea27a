//! Display text for [`Message`].
//!
//! All user-facing wording is kept in this one match so call sites stay
//! free of string literals.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === TRACKER MESSAGES ===
            Message::TrackerCreated(name) => format!("Tracker '{}' created", name),
            Message::TrackerUpdated(name) => format!("Tracker '{}' updated", name),
            Message::TrackerDeleted(name) => format!("Tracker '{}' deleted", name),
            Message::TrackerPinned(name) => format!("Tracker '{}' pinned", name),
            Message::TrackerUnpinned(name, category) => format!("Tracker '{}' unpinned back to '{}'", name, category),
            Message::TrackerCompleted(name, date) => format!("'{}' marked as done for {}", name, date),
            Message::TrackerUncompleted(name, date) => format!("'{}' is no longer done for {}", name, date),
            Message::TrackerNotFound(id) => format!("Tracker '{}' not found", id),
            Message::TrackerCreateFailed(error) => format!("Failed to create tracker: {}", error),
            Message::NoTrackersForDate(date) => format!("Nothing to track on {}", date),
            Message::NothingFound(search) => format!("Nothing found for '{}'", search),
            Message::TrackersHeader(date) => format!("Trackers for {}", date),

            // === CATEGORY MESSAGES ===
            Message::CategoryCreated(name) => format!("Category '{}' created", name),
            Message::CategoryExists(name) => format!("Category '{}' already exists", name),
            Message::CategoryReserved(name) => format!("Category name '{}' is reserved for pinned trackers", name),
            Message::NoCategories => "No categories yet. Habits and events will be grouped here".to_string(),
            Message::CategoriesHeader => "Categories".to_string(),

            // === FILTER MESSAGES ===
            Message::FilterSaved(mode) => format!("Filter set to '{}'", mode),
            Message::FilterCurrent(mode) => format!("Current filter: '{}'", mode),
            Message::UnknownFilterMode(mode) => format!("Unknown filter mode '{}', showing all trackers", mode),

            // === STATISTICS MESSAGES ===
            Message::StatisticsHeader => "Statistics".to_string(),
            Message::NothingToAnalyze => "Nothing to analyze yet".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigParseError(error) => format!("Failed to parse configuration: {}", error),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed".to_string(),
            Message::DatabaseUpToDate => "Database is up to date".to_string(),

            // === ANALYTICS MESSAGES ===
            Message::AnalyticsReportFailed(error) => format!("Failed to report analytics event: {}", error),

            // === INPUT MESSAGES ===
            Message::InvalidDate(value) => format!("Invalid date '{}', expected YYYY-MM-DD", value),
        };
        write!(f, "{}", text)
    }
}
