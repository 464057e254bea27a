use super::add::schedule_arg;
use super::{find_tracker, Context};
use crate::db::trackers::TrackerStore;
use crate::libs::analytics::Item;
use crate::libs::messages::Message;
use crate::msg_success;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Tracker id or a unique prefix of it
    id: String,
    #[arg(short, long)]
    name: Option<String>,
    #[arg(short, long)]
    category: Option<String>,
    #[arg(short, long)]
    emoji: Option<String>,
    /// Color as #RRGGBB
    #[arg(long)]
    color: Option<String>,
    /// Weekdays, e.g. "mon,wed,fri" or "daily"
    #[arg(short, long, conflicts_with = "event")]
    days: Option<String>,
    /// Turn the tracker into an irregular event
    #[arg(long)]
    event: bool,
    /// Drop the pin while editing
    #[arg(long)]
    unpin: bool,
}

pub fn cmd(args: EditArgs, ctx: &mut Context) -> Result<()> {
    ctx.analytics.report_click(Item::Edit);

    let trackers = TrackerStore::new(&ctx.db);
    let mut tracker = find_tracker(&trackers, &args.id)?;

    // Without --category the tracker stays where it is; a pinned one keeps its home
    let category = match args.category {
        Some(category) => category.trim().to_string(),
        None => trackers.category_title(tracker.id)?.unwrap_or_else(|| tracker.original_category.clone()),
    };

    if let Some(name) = args.name {
        tracker.name = name.trim().to_string();
    }
    if let Some(emoji) = args.emoji {
        tracker.emoji = emoji;
    }
    if let Some(color) = args.color {
        tracker.color = color.parse()?;
    }
    if args.event || args.days.is_some() {
        tracker.schedule = schedule_arg(args.days.as_deref(), args.event)?;
    }
    tracker.is_pinned = tracker.is_pinned && !args.unpin;

    trackers.edit(&tracker, &category)?;
    msg_success!(Message::TrackerUpdated(tracker.name));
    Ok(())
}
