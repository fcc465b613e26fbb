// Pure lock-policy predicates - no I/O allowed.
// The decision of WHY a tab is exempt from reaping lives here; persistence
// of the inputs lives in lock_store.rs.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::state::{Tab, TabId, TAB_GROUP_NONE};

/// Lock-policy inputs, mirroring the extension storage area keys.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LockConfig {
    /// Treat audibly-playing tabs as locked.
    pub filter_audio: bool,
    /// Treat tabs inside a tab group as locked.
    pub filter_grouped_tabs: bool,
    /// Tabs the user locked by hand in the panel.
    pub locked_ids: HashSet<TabId>,
    /// URL fragments; any tab whose URL contains one is locked.
    pub whitelist: Vec<String>,
}

/// Substring match against the whitelist patterns.
pub fn is_whitelisted(url: &str, whitelist: &[String]) -> bool {
    whitelist.iter().any(|pattern| !pattern.is_empty() && url.contains(pattern.as_str()))
}

/// Primary lock predicate: is this tab exempt from auto-closing right now,
/// for any reason (manual lock or policy)?
pub fn is_tab_locked(tab: &Tab, config: &LockConfig) -> bool {
    if let Some(id) = tab.id {
        if config.locked_ids.contains(&id) {
            return true;
        }
    }
    if tab.pinned {
        return true;
    }
    if config.filter_audio && tab.audible {
        return true;
    }
    if config.filter_grouped_tabs && tab.group_id != TAB_GROUP_NONE {
        return true;
    }
    is_whitelisted(&tab.url, &config.whitelist)
}

/// Whether the user may toggle this tab's lock by hand. Tabs already held
/// open by a non-manual mechanism (pinned, audio filter, group filter,
/// whitelist) are not eligible; flipping them would have no visible effect.
pub fn is_manually_lockable(tab: &Tab, config: &LockConfig) -> bool {
    if tab.pinned {
        return false;
    }
    if config.filter_audio && tab.audible {
        return false;
    }
    if config.filter_grouped_tabs && tab.group_id != TAB_GROUP_NONE {
        return false;
    }
    !is_whitelisted(&tab.url, &config.whitelist)
}
