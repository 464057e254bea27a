#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use tracker::db::categories::CategoryStore;
    use tracker::db::db::Db;
    use tracker::db::records::RecordStore;
    use tracker::db::trackers::TrackerStore;
    use tracker::libs::category::PINNED_CATEGORY;
    use tracker::libs::error::StoreError;
    use tracker::libs::tracker::{Color, Schedule, ScheduleItem, Tracker};

    struct TrackerTestContext {
        _temp_dir: TempDir,
        db: Db,
    }

    impl TestContext for TrackerTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("tracker.db")).unwrap();
            TrackerTestContext { _temp_dir: temp_dir, db }
        }
    }

    fn habit(name: &str) -> Tracker {
        Tracker::new(name, "🏃", Color::rgb(0xFD, 0x4C, 0x49), Some(Schedule::new([ScheduleItem::Monday, ScheduleItem::Wednesday]).unwrap()))
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_create_and_read_back(ctx: &mut TrackerTestContext) {
        let trackers = TrackerStore::new(&ctx.db);
        let run = habit("Run");
        trackers.create(&run, "Health").unwrap();

        let stored = trackers.get(run.id).unwrap().unwrap();
        assert_eq!(stored.name, "Run");
        assert_eq!(stored.color, Color::rgb(0xFD, 0x4C, 0x49));
        assert_eq!(stored.schedule, run.schedule);
        assert!(!stored.is_pinned);
        assert_eq!(stored.original_category, "Health");
        assert_eq!(trackers.category_title(run.id).unwrap().as_deref(), Some("Health"));
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_event_has_no_schedule(ctx: &mut TrackerTestContext) {
        let trackers = TrackerStore::new(&ctx.db);
        let event = Tracker::new("Dentist", "🦷", Color::default(), None);
        trackers.create(&event, "Health").unwrap();

        let stored = trackers.get(event.id).unwrap().unwrap();
        assert!(stored.schedule.is_none());
        assert!(!stored.is_habit());
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_pin_round_trip(ctx: &mut TrackerTestContext) {
        let trackers = TrackerStore::new(&ctx.db);
        let run = habit("Run");
        trackers.create(&run, "Health").unwrap();

        assert!(trackers.pin(run.id).unwrap());
        let pinned = trackers.get(run.id).unwrap().unwrap();
        assert!(pinned.is_pinned);
        assert_eq!(pinned.original_category, "Health");
        assert_eq!(trackers.category_title(run.id).unwrap().as_deref(), Some(PINNED_CATEGORY));

        assert!(!trackers.pin(run.id).unwrap());
        let unpinned = trackers.get(run.id).unwrap().unwrap();
        assert!(!unpinned.is_pinned);
        assert_eq!(trackers.category_title(run.id).unwrap().as_deref(), Some("Health"));
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_edit_keeps_pin_only_when_requested(ctx: &mut TrackerTestContext) {
        let trackers = TrackerStore::new(&ctx.db);
        let run = habit("Run");
        trackers.create(&run, "Health").unwrap();
        trackers.pin(run.id).unwrap();

        // Pinned and still flagged: stays pinned, new home remembered
        let mut edited = trackers.get(run.id).unwrap().unwrap();
        edited.name = "Morning run".to_string();
        trackers.edit(&edited, "Sport").unwrap();
        let stored = trackers.get(run.id).unwrap().unwrap();
        assert!(stored.is_pinned);
        assert_eq!(stored.name, "Morning run");
        assert_eq!(stored.original_category, "Sport");
        assert_eq!(trackers.category_title(run.id).unwrap().as_deref(), Some(PINNED_CATEGORY));

        // Flag dropped: lands in the home category
        let mut edited = stored;
        edited.is_pinned = false;
        trackers.edit(&edited, PINNED_CATEGORY).unwrap();
        let stored = trackers.get(run.id).unwrap().unwrap();
        assert!(!stored.is_pinned);
        assert_eq!(trackers.category_title(run.id).unwrap().as_deref(), Some("Sport"));
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_edit_cannot_pin_an_unpinned_tracker(ctx: &mut TrackerTestContext) {
        let trackers = TrackerStore::new(&ctx.db);
        let mut run = habit("Run");
        trackers.create(&run, "Health").unwrap();

        run.is_pinned = true;
        trackers.edit(&run, "Health").unwrap();
        assert!(!trackers.get(run.id).unwrap().unwrap().is_pinned);
        assert_eq!(trackers.category_title(run.id).unwrap().as_deref(), Some("Health"));
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_delete_keeps_records(ctx: &mut TrackerTestContext) {
        let trackers = TrackerStore::new(&ctx.db);
        let records = RecordStore::new(&ctx.db);
        let run = habit("Run");
        trackers.create(&run, "Health").unwrap();
        let day = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
        records.toggle_on(run.id, day, day).unwrap();

        trackers.delete_by_id(run.id).unwrap();

        assert!(trackers.get(run.id).unwrap().is_none());
        assert!(trackers.category_title(run.id).unwrap().is_none());
        assert_eq!(records.count_completions(run.id).unwrap(), 1);
        assert!(matches!(trackers.delete_by_id(run.id), Err(StoreError::TrackerNotFound(_))));
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_find_by_prefix(ctx: &mut TrackerTestContext) {
        let trackers = TrackerStore::new(&ctx.db);
        let run = habit("Run");
        trackers.create(&run, "Health").unwrap();

        let full = run.id.to_string();
        assert_eq!(trackers.find_by_prefix(&full[..8]).unwrap().id, run.id);
        assert_eq!(trackers.find_by_prefix(&full.to_uppercase()).unwrap().id, run.id);
        assert!(matches!(trackers.find_by_prefix("zzz"), Err(StoreError::InvalidId(_))));
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_list_in_creation_order(ctx: &mut TrackerTestContext) {
        let trackers = TrackerStore::new(&ctx.db);
        for name in ["Run", "Read", "Swim"] {
            trackers.create(&habit(name), "Health").unwrap();
        }
        let names: Vec<String> = trackers.list().unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(names, ["Run", "Read", "Swim"]);
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_create_rejects_pinned_category(ctx: &mut TrackerTestContext) {
        let trackers = TrackerStore::new(&ctx.db);
        let run = habit("Run");

        assert!(matches!(trackers.create(&run, PINNED_CATEGORY), Err(StoreError::ReservedCategory(_))));
        assert!(trackers.get(run.id).unwrap().is_none());
        assert!(trackers.list().unwrap().is_empty());
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_pinned_edit_creates_new_home_category(ctx: &mut TrackerTestContext) {
        let trackers = TrackerStore::new(&ctx.db);
        let categories = CategoryStore::new(&ctx.db);
        let run = habit("Run");
        trackers.create(&run, "Health").unwrap();
        trackers.pin(run.id).unwrap();

        let pinned = trackers.get(run.id).unwrap().unwrap();
        trackers.edit(&pinned, "Sport").unwrap();

        assert_eq!(trackers.category_title(run.id).unwrap().as_deref(), Some(PINNED_CATEGORY));
        let sport = categories.get_by_name("Sport").unwrap().unwrap();
        assert!(sport.trackers.is_empty());
        let user: Vec<String> = categories.list_user().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(user, ["Health", "Sport"]);

        assert!(!trackers.pin(run.id).unwrap());
        assert_eq!(trackers.category_title(run.id).unwrap().as_deref(), Some("Sport"));
    }
}
