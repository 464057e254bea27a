use super::Context;
use crate::db::trackers::TrackerStore;
use crate::libs::analytics::Item;
use crate::libs::messages::Message;
use crate::libs::tracker::{Color, Schedule, Tracker};
use crate::{msg_error, msg_success};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Tracker name
    name: String,
    /// Category the tracker is filed under
    #[arg(short, long)]
    category: String,
    #[arg(short, long, default_value = "⭐")]
    emoji: String,
    /// Color as #RRGGBB
    #[arg(long)]
    color: Option<String>,
    /// Weekdays, e.g. "mon,wed,fri" or "daily"
    #[arg(short, long, conflicts_with = "event")]
    days: Option<String>,
    /// Irregular event without a schedule
    #[arg(long)]
    event: bool,
}

pub fn cmd(args: AddArgs, ctx: &mut Context) -> Result<()> {
    ctx.analytics.report_click(Item::AddTrack);

    let color = match args.color.as_deref() {
        Some(color) => color.parse()?,
        None => Color::default(),
    };
    let schedule = schedule_arg(args.days.as_deref(), args.event)?;
    let tracker = Tracker::new(args.name.trim(), &args.emoji, color, schedule);

    match TrackerStore::new(&ctx.db).create(&tracker, args.category.trim()) {
        Ok(()) => msg_success!(Message::TrackerCreated(tracker.name)),
        Err(e) => msg_error!(Message::TrackerCreateFailed(e.to_string())),
    }
    Ok(())
}

/// `None` for events; habits default to every day.
pub(crate) fn schedule_arg(days: Option<&str>, event: bool) -> Result<Option<Schedule>> {
    if event {
        return Ok(None);
    }
    let schedule = match days.map(str::trim) {
        None | Some("daily") | Some("every-day") => Schedule::every_day(),
        Some(days) => days.parse()?,
    };
    Ok(Some(schedule))
}
