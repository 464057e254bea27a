use super::Context;
use crate::db::records::RecordStore;
use crate::db::trackers::TrackerStore;
use crate::libs::messages::Message;
use crate::libs::statistics::Statistics;
use crate::libs::view::View;
use crate::{msg_info, msg_print};
use anyhow::Result;

pub fn cmd(ctx: &mut Context) -> Result<()> {
    let stats = Statistics::collect(&RecordStore::new(&ctx.db), &TrackerStore::new(&ctx.db))?;
    if stats.is_empty() {
        msg_info!(Message::NothingToAnalyze);
        return Ok(());
    }

    msg_print!(Message::StatisticsHeader, true);
    View::statistics(&stats)?;
    Ok(())
}
