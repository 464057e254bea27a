use super::{find_tracker, parse_date, Context};
use crate::db::records::RecordStore;
use crate::db::trackers::TrackerStore;
use crate::libs::analytics::Item;
use crate::libs::messages::Message;
use crate::msg_success;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct DoneArgs {
    /// Tracker id or a unique prefix of it
    id: String,
    /// Day to mark, YYYY-MM-DD; defaults to today
    #[arg(short, long)]
    date: Option<String>,
}

pub fn cmd(args: DoneArgs, ctx: &mut Context) -> Result<()> {
    ctx.analytics.report_click(Item::Track);

    let date = parse_date(args.date.as_deref())?;
    let tracker = find_tracker(&TrackerStore::new(&ctx.db), &args.id)?;

    if RecordStore::new(&ctx.db).toggle(tracker.id, date)? {
        msg_success!(Message::TrackerCompleted(tracker.name, date.to_string()));
    } else {
        msg_success!(Message::TrackerUncompleted(tracker.name, date.to_string()));
    }
    Ok(())
}
