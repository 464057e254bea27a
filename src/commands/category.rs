use super::Context;
use crate::db::categories::CategoryStore;
use crate::libs::category::{is_pinned_category, DEFAULT_SORT_ORDER};
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_bail_anyhow, msg_error, msg_info, msg_print, msg_success};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct CategoryArgs {
    #[command(subcommand)]
    command: Option<CategoryCommand>,
}

#[derive(Debug, Subcommand)]
enum CategoryCommand {
    /// Create an empty category
    Add {
        /// Category name
        name: String,
    },
    /// List categories with their trackers
    List,
}

pub fn cmd(args: CategoryArgs, ctx: &mut Context) -> Result<()> {
    let categories = CategoryStore::new(&ctx.db);
    match args.command {
        Some(CategoryCommand::Add { name }) => {
            let name = name.trim();
            if is_pinned_category(name) {
                msg_bail_anyhow!(Message::CategoryReserved(name.to_string()));
            }
            if categories.get_by_name(name)?.is_some() {
                msg_error!(Message::CategoryExists(name.to_string()));
                return Ok(());
            }
            categories.add_record(name, DEFAULT_SORT_ORDER)?;
            msg_success!(Message::CategoryCreated(name.to_string()));
        }
        Some(CategoryCommand::List) | None => {
            let list = categories.list_user()?;
            if list.is_empty() {
                msg_info!(Message::NoCategories);
                return Ok(());
            }
            msg_print!(Message::CategoriesHeader, true);
            View::categories(&list)?;
        }
    }
    Ok(())
}
