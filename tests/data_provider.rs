#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use std::sync::mpsc::Receiver;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use tracker::db::db::Db;
    use tracker::db::records::RecordStore;
    use tracker::db::trackers::TrackerStore;
    use tracker::libs::category::PINNED_CATEGORY;
    use tracker::libs::data_provider::{ChannelDelegate, DataProvider, IndexPath, ViewEvent};
    use tracker::libs::filter::{FilterMode, TrackerQuery};
    use tracker::libs::tracker::{Color, Schedule, ScheduleItem, Tracker};

    struct ProviderTestContext {
        _temp_dir: TempDir,
        db: Db,
        /// 2025-06-04
        wednesday: NaiveDate,
    }

    impl TestContext for ProviderTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("tracker.db")).unwrap();
            ProviderTestContext {
                _temp_dir: temp_dir,
                db,
                wednesday: NaiveDate::from_ymd_opt(2025, 6, 4).unwrap(),
            }
        }
    }

    impl ProviderTestContext {
        fn provider(&self, query: TrackerQuery) -> (DataProvider, Receiver<ViewEvent>) {
            let (delegate, events) = ChannelDelegate::new();
            let provider = DataProvider::new(&self.db, query, Box::new(delegate)).unwrap();
            (provider, events)
        }

        fn query(&self) -> TrackerQuery {
            TrackerQuery::for_date(self.wednesday).with_today(self.wednesday)
        }

        fn add(&self, name: &str, category: &str, days: &[ScheduleItem]) -> Tracker {
            let schedule = Schedule::new(days.iter().copied()).unwrap();
            let tracker = Tracker::new(name, "⭐", Color::default(), Some(schedule));
            TrackerStore::new(&self.db).create(&tracker, category).unwrap();
            tracker
        }
    }

    fn names(provider: &DataProvider) -> Vec<(String, Vec<String>)> {
        provider
            .sections()
            .iter()
            .map(|s| (s.name.clone(), s.trackers.iter().map(|t| t.name.clone()).collect()))
            .collect()
    }

    #[test_context(ProviderTestContext)]
    #[test]
    fn test_only_trackers_scheduled_on_the_weekday(ctx: &mut ProviderTestContext) {
        ctx.add("Run", "Health", &[ScheduleItem::Monday, ScheduleItem::Wednesday]);
        ctx.add("Swim", "Health", &[ScheduleItem::Tuesday]);
        let event = Tracker::new("Dentist", "🦷", Color::default(), None);
        TrackerStore::new(&ctx.db).create(&event, "Health").unwrap();

        let (provider, _events) = ctx.provider(ctx.query());
        assert_eq!(names(&provider), [("Health".to_string(), vec!["Run".to_string()])]);
        assert_eq!(provider.number_of_sections(), 1);
        assert_eq!(provider.number_of_items_in_section(0), 1);
        assert_eq!(provider.number_of_items_in_section(3), 0);
        assert_eq!(provider.object(IndexPath::new(0, 0)).map(|t| t.name.as_str()), Some("Run"));
        assert!(provider.object(IndexPath::new(0, 1)).is_none());
    }

    #[test_context(ProviderTestContext)]
    #[test]
    fn test_sunday_maps_to_last_weekday(ctx: &mut ProviderTestContext) {
        ctx.add("Rest", "Health", &[ScheduleItem::Sunday]);
        ctx.add("Run", "Health", &[ScheduleItem::Monday]);
        let sunday = NaiveDate::from_ymd_opt(2025, 6, 8).unwrap();

        let (provider, _events) = ctx.provider(TrackerQuery::for_date(sunday));
        assert_eq!(names(&provider), [("Health".to_string(), vec!["Rest".to_string()])]);
    }

    #[test_context(ProviderTestContext)]
    #[test]
    fn test_completion_modes_without_records(ctx: &mut ProviderTestContext) {
        ctx.add("Run", "Health", &[ScheduleItem::Wednesday]);

        let (completed, _) = ctx.provider(ctx.query().with_mode(FilterMode::Completed));
        assert!(completed.is_empty());

        let (not_completed, _) = ctx.provider(ctx.query().with_mode(FilterMode::NotCompleted));
        assert_eq!(not_completed.number_of_items_in_section(0), 1);
    }

    #[test_context(ProviderTestContext)]
    #[test]
    fn test_completion_modes_split_the_day(ctx: &mut ProviderTestContext) {
        let run = ctx.add("Run", "Health", &[ScheduleItem::Wednesday]);
        ctx.add("Read", "Study", &[ScheduleItem::Wednesday]);
        RecordStore::new(&ctx.db).toggle_on(run.id, ctx.wednesday, ctx.wednesday).unwrap();

        let (completed, _) = ctx.provider(ctx.query().with_mode(FilterMode::Completed));
        assert_eq!(names(&completed), [("Health".to_string(), vec!["Run".to_string()])]);

        let (not_completed, _) = ctx.provider(ctx.query().with_mode(FilterMode::NotCompleted));
        assert_eq!(names(&not_completed), [("Study".to_string(), vec!["Read".to_string()])]);
    }

    #[test_context(ProviderTestContext)]
    #[test]
    fn test_today_mode_needs_the_current_weekday(ctx: &mut ProviderTestContext) {
        ctx.add("Run", "Health", &[ScheduleItem::Wednesday]);
        ctx.add("Gym", "Health", &[ScheduleItem::Wednesday, ScheduleItem::Saturday]);
        let saturday = NaiveDate::from_ymd_opt(2025, 6, 7).unwrap();

        let query = TrackerQuery::for_date(ctx.wednesday).with_today(saturday).with_mode(FilterMode::Today);
        let (provider, _) = ctx.provider(query);
        assert_eq!(names(&provider), [("Health".to_string(), vec!["Gym".to_string()])]);
    }

    #[test_context(ProviderTestContext)]
    #[test]
    fn test_search_ignores_case(ctx: &mut ProviderTestContext) {
        ctx.add("Утренний бег", "Health", &[ScheduleItem::Wednesday]);
        ctx.add("Read", "Study", &[ScheduleItem::Wednesday]);

        let (provider, _) = ctx.provider(ctx.query().with_search("БЕГ"));
        assert_eq!(names(&provider), [("Health".to_string(), vec!["Утренний бег".to_string()])]);
    }

    #[test_context(ProviderTestContext)]
    #[test]
    fn test_pinned_section_comes_first(ctx: &mut ProviderTestContext) {
        let run = ctx.add("Run", "Health", &[ScheduleItem::Wednesday]);
        ctx.add("Swim", "Health", &[ScheduleItem::Wednesday]);
        let (mut provider, events) = ctx.provider(ctx.query());

        assert!(provider.pin_tracker(run.id).unwrap());
        assert_eq!(
            names(&provider),
            [
                (PINNED_CATEGORY.to_string(), vec!["Run".to_string()]),
                ("Health".to_string(), vec!["Swim".to_string()]),
            ]
        );

        match events.try_recv().unwrap() {
            ViewEvent::Update(update) => {
                assert!(update.inserted_sections.contains(&0));
                assert_eq!(update.deleted_indexes, vec![IndexPath::new(0, 0)]);
                assert!(update.inserted_indexes.is_empty());
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test_context(ProviderTestContext)]
    #[test]
    fn test_writes_arrive_as_one_batch(ctx: &mut ProviderTestContext) {
        let (mut provider, events) = ctx.provider(ctx.query());
        assert!(provider.is_empty());

        // Writes through another handle queue up until processed
        ctx.add("Run", "Health", &[ScheduleItem::Wednesday]);
        ctx.add("Read", "Study", &[ScheduleItem::Wednesday]);
        ctx.add("Swim", "Health", &[ScheduleItem::Friday]);

        let update = provider.process_changes().unwrap().unwrap();
        assert_eq!(update.inserted_sections.len(), 2);
        assert!(matches!(events.try_recv(), Ok(ViewEvent::Update(_))));
        assert!(events.try_recv().is_err());

        // Nothing pending, nothing delivered
        assert!(provider.process_changes().unwrap().is_none());
    }

    #[test_context(ProviderTestContext)]
    #[test]
    fn test_invisible_change_delivers_nothing(ctx: &mut ProviderTestContext) {
        ctx.add("Run", "Health", &[ScheduleItem::Wednesday]);
        let (mut provider, events) = ctx.provider(ctx.query());

        ctx.add("Swim", "Health", &[ScheduleItem::Friday]);
        assert!(provider.process_changes().unwrap().is_none());
        assert!(events.try_recv().is_err());
    }

    #[test_context(ProviderTestContext)]
    #[test]
    fn test_toggle_and_delete_through_provider(ctx: &mut ProviderTestContext) {
        let run = ctx.add("Run", "Health", &[ScheduleItem::Wednesday]);
        ctx.add("Read", "Health", &[ScheduleItem::Wednesday]);
        let (mut provider, events) = ctx.provider(ctx.query().with_mode(FilterMode::NotCompleted));

        assert!(provider.toggle_completion(run.id).unwrap());
        assert_eq!(names(&provider), [("Health".to_string(), vec!["Read".to_string()])]);
        assert!(matches!(events.try_recv(), Ok(ViewEvent::Update(_))));

        provider.delete_tracker(IndexPath::new(0, 0)).unwrap();
        assert!(provider.is_empty());
        assert!(provider.delete_tracker(IndexPath::new(0, 0)).is_err());
    }

    #[test_context(ProviderTestContext)]
    #[test]
    fn test_new_query_reloads(ctx: &mut ProviderTestContext) {
        ctx.add("Run", "Health", &[ScheduleItem::Thursday]);
        let (mut provider, events) = ctx.provider(ctx.query());
        assert!(provider.is_empty());

        let thursday = ctx.wednesday.succ_opt().unwrap();
        provider.filtered_trackers(TrackerQuery::for_date(thursday)).unwrap();
        assert_eq!(provider.name_section(0), Some("Health"));
        assert_eq!(events.try_recv().unwrap(), ViewEvent::Reload);
    }

    #[test_context(ProviderTestContext)]
    #[test]
    fn test_edit_through_provider_moves_the_row(ctx: &mut ProviderTestContext) {
        let run = ctx.add("Run", "Health", &[ScheduleItem::Wednesday]);
        ctx.add("Read", "Study", &[ScheduleItem::Wednesday]);
        let (mut provider, events) = ctx.provider(ctx.query());

        let mut edited = run.clone();
        edited.name = "Evening run".to_string();
        provider.edit_tracker(&edited, "Study").unwrap();

        assert_eq!(
            names(&provider),
            [("Study".to_string(), vec!["Evening run".to_string(), "Read".to_string()])]
        );
        match events.try_recv().unwrap() {
            ViewEvent::Update(update) => {
                assert_eq!(update.deleted_sections.into_iter().collect::<Vec<_>>(), vec![0]);
                assert_eq!(update.inserted_indexes, vec![IndexPath::new(0, 0)]);
                assert!(update.deleted_indexes.is_empty());
            }
            other => panic!("unexpected event {:?}", other),
        }

        // Leaving the weekday's schedule drops it from the list
        edited.schedule = Some(Schedule::new([ScheduleItem::Friday]).unwrap());
        provider.edit_tracker(&edited, "Study").unwrap();
        assert_eq!(names(&provider), [("Study".to_string(), vec!["Read".to_string()])]);
    }
}
