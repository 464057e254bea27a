/// Every user-facing message the application prints.
///
/// Text lives in `display.rs`; call sites only pick a variant and its data.
#[derive(Debug, Clone)]
pub enum Message {
    // === TRACKER MESSAGES ===
    TrackerCreated(String),           // name
    TrackerUpdated(String),           // name
    TrackerDeleted(String),           // name
    TrackerPinned(String),            // name
    TrackerUnpinned(String, String),  // name, category
    TrackerCompleted(String, String), // name, date
    TrackerUncompleted(String, String),
    TrackerNotFound(String),
    TrackerCreateFailed(String),
    NoTrackersForDate(String), // date
    NothingFound(String),      // search text
    TrackersHeader(String),    // date

    // === CATEGORY MESSAGES ===
    CategoryCreated(String),
    CategoryExists(String),
    CategoryReserved(String),
    NoCategories,
    CategoriesHeader,

    // === FILTER MESSAGES ===
    FilterSaved(String),
    FilterCurrent(String),
    UnknownFilterMode(String),

    // === STATISTICS MESSAGES ===
    StatisticsHeader,
    NothingToAnalyze,

    // === CONFIGURATION MESSAGES ===
    ConfigParseError(String),

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
    DatabaseUpToDate,

    // === ANALYTICS MESSAGES ===
    AnalyticsReportFailed(String),

    // === INPUT MESSAGES ===
    InvalidDate(String),
}
