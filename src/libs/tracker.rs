//! Tracker value types: weekdays, schedules, colors and the tracker itself.
//!
//! A tracker with a [`Schedule`] is a habit that recurs on the listed
//! weekdays; a tracker without one is a one-off event. Weekdays are ordered
//! Monday first, so Sunday is the last day of the week everywhere in the
//! crate (parsing, storage and display).
//!
//! ## Usage
//!
//! ```rust
//! use tracker::libs::tracker::{Color, Schedule, ScheduleItem, Tracker};
//!
//! let schedule = Schedule::new([ScheduleItem::Monday, ScheduleItem::Friday])?;
//! let run = Tracker::new("Run", "🏃", "#33CF69".parse()?, Some(schedule));
//! assert!(run.is_habit());
//! # Ok::<(), tracker::libs::error::StoreError>(())
//! ```

use super::error::StoreError;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A day of the week a habit can be scheduled on.
///
/// Variants are declared Monday first; the derived `Ord` is the display and
/// storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScheduleItem {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl ScheduleItem {
    pub const ALL: [ScheduleItem; 7] = [
        ScheduleItem::Monday,
        ScheduleItem::Tuesday,
        ScheduleItem::Wednesday,
        ScheduleItem::Thursday,
        ScheduleItem::Friday,
        ScheduleItem::Saturday,
        ScheduleItem::Sunday,
    ];

    /// Label stored in the `schedule` column.
    pub fn label(&self) -> &'static str {
        match self {
            ScheduleItem::Monday => "Monday",
            ScheduleItem::Tuesday => "Tuesday",
            ScheduleItem::Wednesday => "Wednesday",
            ScheduleItem::Thursday => "Thursday",
            ScheduleItem::Friday => "Friday",
            ScheduleItem::Saturday => "Saturday",
            ScheduleItem::Sunday => "Sunday",
        }
    }

    pub fn short_label(&self) -> &'static str {
        &self.label()[..3]
    }

    /// Weekday of a calendar date.
    pub fn of(date: NaiveDate) -> Self {
        date.weekday().into()
    }

    /// Zero-based position in the Monday-first week.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl From<Weekday> for ScheduleItem {
    fn from(weekday: Weekday) -> Self {
        // num_days_from_monday() already puts Sunday last
        ScheduleItem::ALL[weekday.num_days_from_monday() as usize]
    }
}

impl fmt::Display for ScheduleItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ScheduleItem {
    type Err = StoreError;

    /// Accepts full names and three-letter abbreviations, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        ScheduleItem::ALL
            .into_iter()
            .find(|day| day.label().to_lowercase() == needle || day.short_label().to_lowercase() == needle)
            .ok_or_else(|| StoreError::InvalidSchedule(format!("unknown weekday '{}'", s.trim())))
    }
}

/// Non-empty set of weekdays without duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ScheduleItem>")]
pub struct Schedule(BTreeSet<ScheduleItem>);

impl TryFrom<Vec<ScheduleItem>> for Schedule {
    type Error = StoreError;

    fn try_from(days: Vec<ScheduleItem>) -> Result<Self, Self::Error> {
        Self::new(days)
    }
}

impl Schedule {
    pub fn new(days: impl IntoIterator<Item = ScheduleItem>) -> Result<Self, StoreError> {
        let days: BTreeSet<ScheduleItem> = days.into_iter().collect();
        if days.is_empty() {
            return Err(StoreError::InvalidSchedule("a schedule needs at least one day".to_string()));
        }
        Ok(Self(days))
    }

    pub fn every_day() -> Self {
        Self(ScheduleItem::ALL.into_iter().collect())
    }

    pub fn contains(&self, day: ScheduleItem) -> bool {
        self.0.contains(&day)
    }

    pub fn days(&self) -> impl Iterator<Item = ScheduleItem> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Comma-joined weekday labels, as persisted.
    pub fn to_column(&self) -> String {
        self.days().map(|day| day.label()).collect::<Vec<_>>().join(",")
    }

    /// Parses the persisted form. Empty segments (a trailing comma) are skipped.
    pub fn from_column(value: &str) -> Result<Self, StoreError> {
        let days = value
            .split(',')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(ScheduleItem::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(days)
    }

    /// Compact form for tables: `Mon, Wed, Fri`, or `Every day`.
    pub fn short_description(&self) -> String {
        if self.len() == ScheduleItem::ALL.len() {
            return "Every day".to_string();
        }
        self.days().map(|day| day.short_label()).collect::<Vec<_>>().join(", ")
    }
}

impl FromStr for Schedule {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_column(s)
    }
}

/// Tracker color, persisted as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::rgb(0x33, 0xCF, 0x69)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

impl FromStr for Color {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || StoreError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).map_err(|_| invalid());
        Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

/// A habit or an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tracker {
    pub id: Uuid,
    pub name: String,
    pub emoji: String,
    pub color: Color,
    pub schedule: Option<Schedule>,
    pub is_pinned: bool,
    /// Category the tracker returns to when unpinned.
    pub original_category: String,
}

impl Tracker {
    pub fn new(name: &str, emoji: &str, color: Color, schedule: Option<Schedule>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            emoji: emoji.to_string(),
            color,
            schedule,
            is_pinned: false,
            original_category: String::new(),
        }
    }

    pub fn is_habit(&self) -> bool {
        self.schedule.is_some()
    }

    pub fn is_scheduled_on(&self, day: ScheduleItem) -> bool {
        self.schedule.as_ref().is_some_and(|schedule| schedule.contains(day))
    }
}
