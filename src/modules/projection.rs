// Pure projections from raw browser data to display state - no I/O allowed.

use std::collections::HashSet;

use crate::modules::lock_policy::{is_tab_locked, LockConfig};
use crate::modules::sorting::{SortContext, TabSortOrder};
use crate::state::{Tab, TabId};

/// Order the raw tab collection for display.
///
/// `None` means the tab source has not delivered yet; that projects to an
/// empty list rather than an error. The input is never mutated; every call
/// returns a fresh sort. `sort_by` is stable, which the Chrono pair relies
/// on: tabs comparing equal (e.g. two locked tabs) keep their incoming
/// relative order.
pub fn project_tabs(raw: Option<&[Tab]>, order: TabSortOrder, ctx: &SortContext) -> Vec<Tab> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    let mut ordered = raw.to_vec();
    ordered.sort_by(|a, b| order.cmp(Some(a), Some(b), ctx));
    ordered
}

/// Collect the ids of tabs the lock policy currently holds open.
///
/// `None` means the lock store has not delivered yet; that projects to an
/// empty set. Tabs still missing an id are skipped.
pub fn derive_locked_ids(ordered: &[Tab], config: Option<&LockConfig>) -> HashSet<TabId> {
    let Some(config) = config else {
        return HashSet::new();
    };
    ordered
        .iter()
        .filter(|tab| is_tab_locked(tab, config))
        .filter_map(|tab| tab.id)
        .collect()
}
