use super::Context;
use crate::db::settings::Settings;
use crate::libs::analytics::Item;
use crate::libs::filter::FilterMode;
use crate::libs::messages::Message;
use crate::{msg_info, msg_success};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct FilterArgs {
    /// all, today, completed or not_completed; prints the current filter when omitted
    mode: Option<FilterMode>,
}

pub fn cmd(args: FilterArgs, ctx: &mut Context) -> Result<()> {
    let settings = Settings::new(&ctx.db);
    match args.mode {
        Some(mode) => {
            ctx.analytics.report_click(Item::Filter);
            settings.set_filter_mode(mode)?;
            msg_success!(Message::FilterSaved(mode.title().to_string()));
        }
        None => msg_info!(Message::FilterCurrent(settings.filter_mode()?.title().to_string())),
    }
    Ok(())
}
