use super::{parse_date, Context};
use crate::db::settings::Settings;
use crate::libs::data_provider::{ChannelDelegate, DataProvider};
use crate::libs::filter::{FilterMode, TrackerQuery};
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_info, msg_print};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Day to show, YYYY-MM-DD; defaults to today
    #[arg(short, long)]
    date: Option<String>,
    /// Only trackers whose name contains this text
    #[arg(short, long)]
    search: Option<String>,
    /// Filter for this listing only; the saved filter is used otherwise
    #[arg(short, long)]
    mode: Option<FilterMode>,
}

pub fn cmd(args: ListArgs, ctx: &mut Context) -> Result<()> {
    let date = parse_date(args.date.as_deref())?;
    let mode = match args.mode {
        Some(mode) => mode,
        None => Settings::new(&ctx.db).filter_mode()?,
    };

    let mut query = TrackerQuery::for_date(date).with_mode(mode);
    if let Some(search) = &args.search {
        query = query.with_search(search);
    }

    let (delegate, _events) = ChannelDelegate::new();
    let provider = DataProvider::new(&ctx.db, query, Box::new(delegate))?;

    if provider.is_empty() {
        match args.search {
            Some(search) if !search.trim().is_empty() => msg_info!(Message::NothingFound(search)),
            _ => msg_info!(Message::NoTrackersForDate(date.to_string())),
        }
        return Ok(());
    }

    msg_print!(Message::TrackersHeader(date.to_string()), true);
    View::sections(&provider)?;
    Ok(())
}
