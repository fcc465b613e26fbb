// Sort orders for the lock list - pure logic, no I/O allowed.
//
// The registry is closed: four orders, known at compile time, each reachable
// by a stable string key that is what settings.json persists.

use std::cmp::Ordering;

use crate::modules::lock_policy::{is_tab_locked, LockConfig};
use crate::state::{Tab, TabTimes};

/// Activity time used for tabs that never recorded one; sorts oldest.
const MISSING_TAB_TIME: i64 = -1;

/// Inputs the comparators read besides the two tabs themselves.
pub struct SortContext<'a> {
    pub tab_times: &'a TabTimes,
    pub config: &'a LockConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabSortOrder {
    /// Ascending (window, position inside window).
    TabOrder,
    ReverseTabOrder,
    /// Unlocked-before-locked, then least recently active first.
    Chrono,
    ReverseChrono,
}

impl Default for TabSortOrder {
    fn default() -> Self {
        Self::TabOrder
    }
}

impl TabSortOrder {
    /// Registry order, as presented in the sort dropdown.
    pub const ALL: [TabSortOrder; 4] = [
        TabSortOrder::TabOrder,
        TabSortOrder::ReverseTabOrder,
        TabSortOrder::Chrono,
        TabSortOrder::ReverseChrono,
    ];

    /// Stable key persisted in settings.
    pub fn key(&self) -> &'static str {
        match self {
            Self::TabOrder => "tabOrder",
            Self::ReverseTabOrder => "reverseTabOrder",
            Self::Chrono => "chrono",
            Self::ReverseChrono => "reverseChrono",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::TabOrder => "Tab order in window",
            Self::ReverseTabOrder => "Reverse tab order in window",
            Self::Chrono => "Least recently active first",
            Self::ReverseChrono => "Most recently active first",
        }
    }

    pub fn short_label(&self) -> &'static str {
        match self {
            Self::TabOrder => "Tab Order",
            Self::ReverseTabOrder => "Rev. Tab Order",
            Self::Chrono => "Chrono",
            Self::ReverseChrono => "Rev. Chrono",
        }
    }

    /// Resolve a persisted key. Unknown keys yield None; the caller decides
    /// the fallback (the panel falls back to the default order).
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|order| order.key() == key)
    }

    /// Compare two (possibly absent) tabs under this order.
    ///
    /// Absent tabs compare equal in every order. The caller only ever sorts
    /// lists that came whole from the tab source, so this branch is a
    /// degenerate case rather than a real tie-break.
    pub fn cmp(&self, a: Option<&Tab>, b: Option<&Tab>, ctx: &SortContext) -> Ordering {
        match self {
            Self::TabOrder => cmp_tab_order(a, b),
            Self::ReverseTabOrder => cmp_tab_order(a, b).reverse(),
            Self::Chrono => cmp_chrono(a, b, ctx),
            Self::ReverseChrono => cmp_chrono(a, b, ctx).reverse(),
        }
    }
}

fn cmp_tab_order(a: Option<&Tab>, b: Option<&Tab>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => (a.window_id, a.index).cmp(&(b.window_id, b.index)),
        _ => Ordering::Equal,
    }
}

/// Locked tabs sink below unlocked ones; two locked tabs compare equal no
/// matter their timestamps. That quirk is longstanding panel behavior and
/// the stable sort keeps locked tabs in their incoming relative order, so we
/// reproduce it rather than "fix" it.
fn cmp_chrono(a: Option<&Tab>, b: Option<&Tab>, ctx: &SortContext) -> Ordering {
    let (a, b) = match (a, b) {
        (Some(a), Some(b)) => (a, b),
        _ => return Ordering::Equal,
    };

    match (is_tab_locked(a, ctx.config), is_tab_locked(b, ctx.config)) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => tab_time(a, ctx.tab_times).cmp(&tab_time(b, ctx.tab_times)),
    }
}

fn tab_time(tab: &Tab, tab_times: &TabTimes) -> i64 {
    tab.time_key()
        .and_then(|key| tab_times.get(&key).map(|entry| *entry))
        .unwrap_or(MISSING_TAB_TIME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TAB_GROUP_NONE;
    use rstest::rstest;

    fn tab(id: u32, window_id: u32, index: u32) -> Tab {
        Tab {
            id: Some(id),
            index,
            window_id,
            audible: false,
            pinned: false,
            group_id: TAB_GROUP_NONE,
            title: format!("Tab {}", id),
            url: format!("https://example.com/{}", id),
        }
    }

    fn ctx<'a>(tab_times: &'a TabTimes, config: &'a LockConfig) -> SortContext<'a> {
        SortContext { tab_times, config }
    }

    #[rstest]
    #[case("tabOrder", Some(TabSortOrder::TabOrder))]
    #[case("reverseTabOrder", Some(TabSortOrder::ReverseTabOrder))]
    #[case("chrono", Some(TabSortOrder::Chrono))]
    #[case("reverseChrono", Some(TabSortOrder::ReverseChrono))]
    #[case("bogus", None)]
    #[case("", None)]
    fn test_key_resolution(#[case] key: &str, #[case] expected: Option<TabSortOrder>) {
        assert_eq!(TabSortOrder::from_key(key), expected);
    }

    #[test]
    fn test_keys_are_unique_and_round_trip() {
        for order in TabSortOrder::ALL {
            assert_eq!(TabSortOrder::from_key(order.key()), Some(order));
        }
    }

    #[test]
    fn test_tab_order_is_strict_on_distinct_positions() {
        let times = TabTimes::new();
        let config = LockConfig::default();
        let c = ctx(&times, &config);

        let a = tab(1, 1, 0);
        let b = tab(2, 1, 1);
        let d = tab(3, 2, 0);

        let order = TabSortOrder::TabOrder;
        assert_eq!(order.cmp(Some(&a), Some(&b), &c), Ordering::Less);
        assert_eq!(order.cmp(Some(&b), Some(&d), &c), Ordering::Less);
        assert_eq!(order.cmp(Some(&a), Some(&d), &c), Ordering::Less); // transitive
        assert_eq!(order.cmp(Some(&d), Some(&a), &c), Ordering::Greater);
        assert_eq!(order.cmp(Some(&a), Some(&a), &c), Ordering::Equal);
    }

    #[test]
    fn test_absent_tabs_compare_equal() {
        let times = TabTimes::new();
        let config = LockConfig::default();
        let c = ctx(&times, &config);
        let a = tab(1, 1, 0);

        for order in TabSortOrder::ALL {
            assert_eq!(order.cmp(None, Some(&a), &c), Ordering::Equal);
            assert_eq!(order.cmp(Some(&a), None, &c), Ordering::Equal);
            assert_eq!(order.cmp(None, None, &c), Ordering::Equal);
        }
    }

    #[test]
    fn test_reverse_orders_are_exact_negations() {
        let times = TabTimes::new();
        times.insert("1".to_string(), 100);
        times.insert("2".to_string(), 200);
        let mut config = LockConfig::default();
        config.locked_ids.insert(3);
        let c = ctx(&times, &config);

        let tabs = [tab(1, 1, 0), tab(2, 1, 1), tab(3, 2, 0)];
        for a in &tabs {
            for b in &tabs {
                assert_eq!(
                    TabSortOrder::ReverseTabOrder.cmp(Some(a), Some(b), &c),
                    TabSortOrder::TabOrder.cmp(Some(a), Some(b), &c).reverse()
                );
                assert_eq!(
                    TabSortOrder::ReverseChrono.cmp(Some(a), Some(b), &c),
                    TabSortOrder::Chrono.cmp(Some(a), Some(b), &c).reverse()
                );
            }
        }
    }

    #[test]
    fn test_chrono_orders_unlocked_by_ascending_activity() {
        let times = TabTimes::new();
        times.insert("1".to_string(), 500);
        times.insert("2".to_string(), 100);
        let config = LockConfig::default();
        let c = ctx(&times, &config);

        let newer = tab(1, 1, 0);
        let older = tab(2, 1, 1);
        assert_eq!(TabSortOrder::Chrono.cmp(Some(&older), Some(&newer), &c), Ordering::Less);
    }

    #[test]
    fn test_chrono_missing_time_sorts_oldest() {
        let times = TabTimes::new();
        times.insert("1".to_string(), 0);
        let config = LockConfig::default();
        let c = ctx(&times, &config);

        let stamped = tab(1, 1, 0);
        let unstamped = tab(2, 1, 1);
        assert_eq!(
            TabSortOrder::Chrono.cmp(Some(&unstamped), Some(&stamped), &c),
            Ordering::Less
        );
    }

    #[test]
    fn test_chrono_locked_tabs_sink() {
        let times = TabTimes::new();
        times.insert("1".to_string(), 999);
        times.insert("2".to_string(), 1);
        let mut config = LockConfig::default();
        config.locked_ids.insert(2);
        let c = ctx(&times, &config);

        let unlocked_recent = tab(1, 1, 0);
        let locked_old = tab(2, 1, 1);
        assert_eq!(
            TabSortOrder::Chrono.cmp(Some(&unlocked_recent), Some(&locked_old), &c),
            Ordering::Less
        );
    }

    #[test]
    fn test_chrono_two_locked_tabs_compare_equal() {
        // Locked tabs never consult their timestamps against each other.
        let times = TabTimes::new();
        times.insert("1".to_string(), 999);
        times.insert("2".to_string(), 1);
        let mut config = LockConfig::default();
        config.locked_ids.insert(1);
        config.locked_ids.insert(2);
        let c = ctx(&times, &config);

        let a = tab(1, 1, 0);
        let b = tab(2, 1, 1);
        assert_eq!(TabSortOrder::Chrono.cmp(Some(&a), Some(&b), &c), Ordering::Equal);
        assert_eq!(TabSortOrder::Chrono.cmp(Some(&b), Some(&a), &c), Ordering::Equal);
    }
}
