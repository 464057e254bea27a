#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use tracker::db::db::Db;
    use tracker::db::records::RecordStore;
    use tracker::libs::error::StoreError;
    use tracker::libs::record::CompletedIds;
    use uuid::Uuid;

    struct RecordTestContext {
        _temp_dir: TempDir,
        records: RecordStore,
        wednesday: NaiveDate,
    }

    impl TestContext for RecordTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("tracker.db")).unwrap();
            RecordTestContext {
                _temp_dir: temp_dir,
                records: RecordStore::new(&db),
                wednesday: NaiveDate::from_ymd_opt(2025, 6, 4).unwrap(),
            }
        }
    }

    #[test_context(RecordTestContext)]
    #[test]
    fn test_toggle_twice_restores_state(ctx: &mut RecordTestContext) {
        let id = Uuid::new_v4();
        let day = ctx.wednesday;

        assert!(ctx.records.toggle_on(id, day, day).unwrap());
        assert!(ctx.records.is_completed(id, day).unwrap());
        assert_eq!(ctx.records.count_completions(id).unwrap(), 1);

        assert!(!ctx.records.toggle_on(id, day, day).unwrap());
        assert!(!ctx.records.is_completed(id, day).unwrap());
        assert_eq!(ctx.records.count_completions(id).unwrap(), 0);
    }

    #[test_context(RecordTestContext)]
    #[test]
    fn test_one_record_per_day(ctx: &mut RecordTestContext) {
        let id = Uuid::new_v4();
        let today = ctx.wednesday;
        let yesterday = today.pred_opt().unwrap();

        ctx.records.toggle_on(id, yesterday, today).unwrap();
        ctx.records.toggle_on(id, today, today).unwrap();

        assert_eq!(ctx.records.count_completions(id).unwrap(), 2);
        assert_eq!(ctx.records.count_all().unwrap(), 2);
        let days: Vec<NaiveDate> = ctx.records.list_all().unwrap().into_iter().map(|r| r.day).collect();
        assert_eq!(days, [yesterday, today]);
    }

    #[test_context(RecordTestContext)]
    #[test]
    fn test_future_day_is_rejected(ctx: &mut RecordTestContext) {
        let id = Uuid::new_v4();
        let tomorrow = ctx.wednesday.succ_opt().unwrap();

        let result = ctx.records.toggle_on(id, tomorrow, ctx.wednesday);
        assert!(matches!(result, Err(StoreError::FutureDay(day)) if day == tomorrow));
        assert_eq!(ctx.records.count_all().unwrap(), 0);
    }

    #[test_context(RecordTestContext)]
    #[test]
    fn test_completed_ids_on(ctx: &mut RecordTestContext) {
        assert_eq!(ctx.records.completed_ids_on(ctx.wednesday).unwrap(), CompletedIds::None);

        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        ctx.records.toggle_on(a, ctx.wednesday, ctx.wednesday).unwrap();
        ctx.records.toggle_on(b, ctx.wednesday.pred_opt().unwrap(), ctx.wednesday).unwrap();

        let completed = ctx.records.completed_ids_on(ctx.wednesday).unwrap();
        assert_eq!(completed.len(), 1);
        assert!(completed.contains(&a));
        assert!(!completed.contains(&b));
    }
}
