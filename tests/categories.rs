#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use tracker::db::categories::CategoryStore;
    use tracker::db::db::Db;
    use tracker::db::trackers::TrackerStore;
    use tracker::libs::category::{DEFAULT_SORT_ORDER, PINNED_CATEGORY, PINNED_SORT_ORDER};
    use tracker::libs::error::StoreError;
    use tracker::libs::tracker::{Color, Schedule, Tracker};

    struct CategoryTestContext {
        _temp_dir: TempDir,
        db: Db,
    }

    impl TestContext for CategoryTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("tracker.db")).unwrap();
            CategoryTestContext { _temp_dir: temp_dir, db }
        }
    }

    #[test_context(CategoryTestContext)]
    #[test]
    fn test_ensure_is_idempotent(ctx: &mut CategoryTestContext) {
        let categories = CategoryStore::new(&ctx.db);
        let first = categories.ensure("Health").unwrap();
        let second = categories.ensure("Health").unwrap();
        assert_eq!(first, second);
        assert_eq!(categories.list().unwrap().len(), 1);
    }

    #[test_context(CategoryTestContext)]
    #[test]
    fn test_pinned_sorts_first(ctx: &mut CategoryTestContext) {
        let categories = CategoryStore::new(&ctx.db);
        let trackers = TrackerStore::new(&ctx.db);
        categories.ensure("Health").unwrap();
        categories.ensure("Study").unwrap();

        let run = Tracker::new("Run", "🏃", Color::default(), Some(Schedule::every_day()));
        trackers.create(&run, "Health").unwrap();
        trackers.pin(run.id).unwrap();

        let list = categories.list().unwrap();
        let names: Vec<&str> = list.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, [PINNED_CATEGORY, "Health", "Study"]);
        assert_eq!(list[0].sort_order, PINNED_SORT_ORDER);
        assert_eq!(list[1].sort_order, DEFAULT_SORT_ORDER);
        assert_eq!(list[0].trackers[0].id, run.id);
        assert!(list[1].trackers.is_empty());

        let user: Vec<String> = categories.list_user().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(user, ["Health", "Study"]);
    }

    #[test_context(CategoryTestContext)]
    #[test]
    fn test_add_record_keeps_existing(ctx: &mut CategoryTestContext) {
        let categories = CategoryStore::new(&ctx.db);
        let id = categories.add_record("Health", 5).unwrap();
        assert_eq!(categories.add_record("Health", 7).unwrap(), id);
        assert_eq!(categories.get_by_name("Health").unwrap().unwrap().sort_order, 5);
        assert!(categories.get_by_name("Missing").unwrap().is_none());
    }

    #[test_context(CategoryTestContext)]
    #[test]
    fn test_pinned_category_cannot_be_created_by_hand(ctx: &mut CategoryTestContext) {
        let categories = CategoryStore::new(&ctx.db);
        let trackers = TrackerStore::new(&ctx.db);

        assert!(matches!(categories.add_record(PINNED_CATEGORY, 1), Err(StoreError::ReservedCategory(_))));
        assert!(matches!(categories.ensure(PINNED_CATEGORY), Err(StoreError::ReservedCategory(_))));
        assert!(categories.get_by_name(PINNED_CATEGORY).unwrap().is_none());

        // Pinning still creates it, ahead of the user categories
        let run = Tracker::new("Run", "🏃", Color::default(), Some(Schedule::every_day()));
        trackers.create(&run, "Health").unwrap();
        trackers.pin(run.id).unwrap();

        let list = categories.list().unwrap();
        assert_eq!(list[0].name, PINNED_CATEGORY);
        assert_eq!(list[0].sort_order, PINNED_SORT_ORDER);
        assert!(list[0].is_pinned());
        assert!(!list[1].is_pinned());
    }
}
