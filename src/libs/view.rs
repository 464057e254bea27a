use super::category::TrackerCategory;
use super::data_provider::DataProvider;
use super::statistics::Statistics;
use super::tracker::Tracker;
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    /// Prints one table per section of the provider's current result.
    pub fn sections(provider: &DataProvider) -> Result<()> {
        for section in provider.sections() {
            println!("{}", section.name);

            let mut table = Table::new();
            table.add_row(row!["ID", "", "NAME", "SCHEDULE", "DONE", "DAYS"]);
            for tracker in &section.trackers {
                let done = if provider.is_completed(tracker.id)? { "✓" } else { "" };
                table.add_row(row![
                    short_id(tracker),
                    tracker.emoji,
                    tracker.name,
                    schedule(tracker),
                    done,
                    provider.count_completions(tracker.id)?
                ]);
            }
            table.printstd();
        }

        Ok(())
    }

    pub fn categories(categories: &[TrackerCategory]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["NAME", "TRACKERS"]);
        for category in categories {
            let names: Vec<&str> = category.trackers.iter().map(|t| t.name.as_str()).collect();
            table.add_row(row![category.name, names.join(", ")]);
        }
        table.printstd();

        Ok(())
    }

    pub fn statistics(stats: &Statistics) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["Best period", stats.best_period]);
        table.add_row(row!["Perfect days", stats.perfect_days]);
        table.add_row(row!["Trackers completed", stats.completed_total]);
        table.add_row(row!["Average", format!("{:.1}", stats.average)]);
        table.printstd();

        Ok(())
    }
}

fn short_id(tracker: &Tracker) -> String {
    tracker.id.simple().to_string()[..8].to_string()
}

fn schedule(tracker: &Tracker) -> String {
    match &tracker.schedule {
        Some(schedule) => schedule.short_description(),
        None => "event".to_string(),
    }
}
