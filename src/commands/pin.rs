use super::{find_tracker, Context};
use crate::db::trackers::TrackerStore;
use crate::libs::messages::Message;
use crate::msg_success;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct PinArgs {
    /// Tracker id or a unique prefix of it
    id: String,
}

pub fn cmd(args: PinArgs, ctx: &mut Context) -> Result<()> {
    let trackers = TrackerStore::new(&ctx.db);
    let tracker = find_tracker(&trackers, &args.id)?;

    if trackers.pin(tracker.id)? {
        msg_success!(Message::TrackerPinned(tracker.name));
    } else {
        let category = trackers.category_title(tracker.id)?.unwrap_or_default();
        msg_success!(Message::TrackerUnpinned(tracker.name, category));
    }
    Ok(())
}
