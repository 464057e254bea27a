//! Usage events.
//!
//! Reporting is fire-and-forget: [`AnalyticsService::report`] never fails,
//! a sink error is logged and dropped.

use super::config::AnalyticsConfig;
use super::messages::Message;
use crate::msg_debug;
use anyhow::Result;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    Open,
    Close,
    Click,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Item {
    AddTrack,
    Track,
    Filter,
    Edit,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    pub event: Event,
    pub screen: Screen,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Item>,
    pub at: DateTime<Local>,
}

impl AnalyticsEvent {
    pub fn new(event: Event, screen: Screen, item: Option<Item>) -> Self {
        Self {
            event,
            screen,
            item,
            at: Local::now(),
        }
    }

    pub fn open() -> Self {
        Self::new(Event::Open, Screen::Main, None)
    }

    pub fn close() -> Self {
        Self::new(Event::Close, Screen::Main, None)
    }

    pub fn click(item: Item) -> Self {
        Self::new(Event::Click, Screen::Main, Some(item))
    }
}

pub trait AnalyticsSink {
    fn send(&mut self, event: &AnalyticsEvent) -> Result<()>;
}

/// Writes each event as a structured `tracing` record.
#[derive(Debug, Default)]
pub struct TracingSink;

impl AnalyticsSink for TracingSink {
    fn send(&mut self, event: &AnalyticsEvent) -> Result<()> {
        tracing::info!(event = ?event.event, screen = ?event.screen, item = ?event.item, "analytics");
        Ok(())
    }
}

/// Appends each event as one JSON line.
#[derive(Debug)]
pub struct JournalSink {
    path: PathBuf,
}

impl JournalSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AnalyticsSink for JournalSink {
    fn send(&mut self, event: &AnalyticsEvent) -> Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let line = serde_json::to_string(event)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }
}

pub struct AnalyticsService {
    sinks: Vec<Box<dyn AnalyticsSink>>,
}

impl AnalyticsService {
    pub fn new(sinks: Vec<Box<dyn AnalyticsSink>>) -> Self {
        Self { sinks }
    }

    /// A service that drops every event.
    pub fn disabled() -> Self {
        Self::new(Vec::new())
    }

    pub fn from_config(config: &AnalyticsConfig) -> Self {
        if !config.enabled {
            return Self::disabled();
        }
        let mut sinks: Vec<Box<dyn AnalyticsSink>> = vec![Box::new(TracingSink)];
        if let Some(journal) = &config.journal {
            sinks.push(Box::new(JournalSink::new(journal)));
        }
        Self::new(sinks)
    }

    pub fn report(&mut self, event: AnalyticsEvent) {
        for sink in &mut self.sinks {
            if let Err(e) = sink.send(&event) {
                msg_debug!(Message::AnalyticsReportFailed(e.to_string()));
            }
        }
    }

    /// Reports `open`, the click on `item`, then `close`.
    pub fn report_click(&mut self, item: Item) {
        self.report(AnalyticsEvent::open());
        self.report(AnalyticsEvent::click(item));
        self.report(AnalyticsEvent::close());
    }
}
