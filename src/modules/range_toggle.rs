// Click / shift-click interpretation for the lock list - pure logic, no I/O.
//
// Translating the plan into lock/unlock mutations (and the lockability
// filter that precedes them) is the panel controller's job; this module only
// decides WHICH rows a gesture covers.

use crate::state::{Tab, TabId};

/// Outcome of interpreting one click gesture against the ordered list.
#[derive(Debug, Clone, PartialEq)]
pub struct TogglePlan {
    /// Rows the gesture covers, in display order, before any filtering.
    pub affected: Vec<Tab>,
    /// The next range anchor. Always the clicked row, even if the row itself
    /// is later filtered out of the mutation set.
    pub new_last_selected: Option<TabId>,
}

/// Interpret a click on `target`.
///
/// A shift-click extends from the previously clicked row to `target`,
/// inclusive, in either direction. The anchor is held as an id and
/// re-resolved against the current ordered list, so a tab closed since the
/// last click simply fails to resolve and the gesture degrades to a
/// single-row toggle.
pub fn plan_toggle(
    ordered: &[Tab],
    last_selected: Option<TabId>,
    target: &Tab,
    range_modifier: bool,
) -> TogglePlan {
    let anchor_index = if range_modifier {
        last_selected.and_then(|anchor| position_of(ordered, anchor))
    } else {
        None
    };
    let target_index = target.id.and_then(|id| position_of(ordered, id));

    let affected = match (anchor_index, target_index) {
        (Some(i), Some(j)) => {
            let (lo, hi) = (i.min(j), i.max(j));
            ordered[lo..=hi].to_vec()
        }
        _ => vec![target.clone()],
    };

    TogglePlan {
        affected,
        new_last_selected: target.id,
    }
}

fn position_of(ordered: &[Tab], id: TabId) -> Option<usize> {
    ordered.iter().position(|tab| tab.id == Some(id))
}
