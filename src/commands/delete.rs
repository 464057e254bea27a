use super::{find_tracker, Context};
use crate::db::trackers::TrackerStore;
use crate::libs::analytics::Item;
use crate::libs::messages::Message;
use crate::msg_success;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Tracker id or a unique prefix of it
    id: String,
}

pub fn cmd(args: DeleteArgs, ctx: &mut Context) -> Result<()> {
    ctx.analytics.report_click(Item::Delete);

    let trackers = TrackerStore::new(&ctx.db);
    let tracker = find_tracker(&trackers, &args.id)?;
    trackers.delete_by_id(tracker.id)?;

    msg_success!(Message::TrackerDeleted(tracker.name));
    Ok(())
}
