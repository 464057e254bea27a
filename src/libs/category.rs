use super::tracker::Tracker;
use serde::{Deserialize, Serialize};

/// Name of the synthetic category pinned trackers are filed under.
pub const PINNED_CATEGORY: &str = "Pinned";

/// Sort priority of the pinned category; it always sorts first.
pub const PINNED_SORT_ORDER: i64 = 0;

/// Sort priority given to categories created by the user.
pub const DEFAULT_SORT_ORDER: i64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerCategory {
    pub name: String,
    pub sort_order: i64,
    pub trackers: Vec<Tracker>,
}

impl TrackerCategory {
    pub fn new(name: &str, sort_order: i64) -> Self {
        Self {
            name: name.to_string(),
            sort_order,
            trackers: Vec::new(),
        }
    }

    pub fn is_pinned(&self) -> bool {
        is_pinned_category(&self.name)
    }
}

pub fn is_pinned_category(name: &str) -> bool {
    name == PINNED_CATEGORY
}
