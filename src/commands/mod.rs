pub mod add;
pub mod category;
pub mod delete;
pub mod done;
pub mod edit;
pub mod filter;
pub mod list;
pub mod pin;
pub mod stats;

use crate::app_metadata::{APP_METADATA_NAME, APP_METADATA_VERSION};
use crate::db::db::Db;
use crate::db::trackers::TrackerStore;
use crate::libs::analytics::AnalyticsService;
use crate::libs::config::Config;
use crate::libs::data_storage::DataStorage;
use crate::libs::error::StoreError;
use crate::libs::messages::Message;
use crate::libs::tracker::Tracker;
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Create a habit or an irregular event")]
    Add(add::AddArgs),
    #[command(about = "Change a tracker")]
    Edit(edit::EditArgs),
    #[command(about = "Delete a tracker, keeping its history")]
    Delete(delete::DeleteArgs),
    #[command(about = "Pin a tracker, or unpin it back to its category")]
    Pin(pin::PinArgs),
    #[command(about = "Mark a tracker as done for a day, or undo it")]
    Done(done::DoneArgs),
    #[command(about = "Show the trackers for a day")]
    List(list::ListArgs),
    #[command(about = "List or create categories")]
    Category(category::CategoryArgs),
    #[command(about = "Show or change the list filter")]
    Filter(filter::FilterArgs),
    #[command(about = "Show statistics")]
    Stats,
}

#[derive(Debug, Parser)]
#[command(name = APP_METADATA_NAME, version = APP_METADATA_VERSION, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    /// Database file to use instead of the configured one
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        let mut ctx = Context::open(cli.db)?;
        match cli.command {
            Commands::Add(args) => add::cmd(args, &mut ctx),
            Commands::Edit(args) => edit::cmd(args, &mut ctx),
            Commands::Delete(args) => delete::cmd(args, &mut ctx),
            Commands::Pin(args) => pin::cmd(args, &mut ctx),
            Commands::Done(args) => done::cmd(args, &mut ctx),
            Commands::List(args) => list::cmd(args, &mut ctx),
            Commands::Category(args) => category::cmd(args, &mut ctx),
            Commands::Filter(args) => filter::cmd(args, &mut ctx),
            Commands::Stats => stats::cmd(&mut ctx),
        }
    }
}

/// Everything a command needs: the store and the analytics reporter.
pub struct Context {
    pub db: Db,
    pub analytics: AnalyticsService,
}

impl Context {
    /// Opens the configured database, or `db_path` when given.
    pub fn open(db_path: Option<PathBuf>) -> Result<Self> {
        let config = Config::read().map_err(|e| msg_error_anyhow!(Message::ConfigParseError(e.to_string())))?;
        let db_path = match db_path {
            Some(path) => path,
            None => config.db_path(&DataStorage::new())?,
        };

        Ok(Self {
            db: Db::open(db_path)?,
            analytics: AnalyticsService::from_config(&config.analytics),
        })
    }
}

/// Resolves a full tracker id or a unique prefix of one.
pub fn find_tracker(trackers: &TrackerStore, id: &str) -> Result<Tracker> {
    match trackers.find_by_prefix(id) {
        Ok(tracker) => Ok(tracker),
        Err(StoreError::UnknownIdPrefix(prefix)) => Err(msg_error_anyhow!(Message::TrackerNotFound(prefix))),
        Err(e) => Err(e.into()),
    }
}

/// Parses `YYYY-MM-DD` or `today`; no value means today.
pub fn parse_date(value: Option<&str>) -> Result<NaiveDate> {
    match value {
        None | Some("today") => Ok(Local::now().date_naive()),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| msg_error_anyhow!(Message::InvalidDate(value.to_string()))),
    }
}
