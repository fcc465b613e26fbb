// Shared data structs to avoid circular dependencies.
// These are used by the panel controller and can be tested independently.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// Browser-assigned tab identifier.
pub type TabId = u32;

/// Sentinel group id the browser reports for tabs that are not in any group.
pub const TAB_GROUP_NONE: i32 = -1;

/// Last-activity timestamps (unix millis), string-keyed by tab id.
/// Owned by external application state; the panel only stamps and reads it.
pub type TabTimes = DashMap<String, i64>;

/// Snapshot of one open browser tab, as delivered by the tab source.
/// Read-only here; the browser owns the real thing.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    /// None only transiently, while the browser is still materializing the tab.
    pub id: Option<TabId>,
    /// Position within its window.
    pub index: u32,
    pub window_id: u32,
    pub audible: bool,
    pub pinned: bool,
    /// TAB_GROUP_NONE when ungrouped.
    pub group_id: i32,
    pub title: String,
    pub url: String,
}

impl Tab {
    /// String form of the id, as used to key the activity map.
    pub fn time_key(&self) -> Option<String> {
        self.id.map(|id| id.to_string())
    }
}

/// One row handed to the list renderer: the tab plus its derived locked flag.
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TabRow {
    pub tab: Tab,
    pub locked: bool,
}
