// Lock-list panel controller.
//
// Owns the panel's own state (active sort order, range anchor, raw tab
// snapshot, activity times) and wires the pure modules to the two stores.
// Everything here runs synchronously inside single event-handler calls; the
// async parts (tab refresh, storage change notifications) re-enter through
// set_tabs / the store subscription and the next rows() call re-derives.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

use crate::lock_store::LockStore;
use crate::modules::lock_policy::is_manually_lockable;
use crate::modules::projection::{derive_locked_ids, project_tabs};
use crate::modules::range_toggle::plan_toggle;
use crate::modules::sorting::{SortContext, TabSortOrder};
use crate::settings::Settings;
use crate::state::{Tab, TabId, TabRow, TabTimes};

pub struct LockPanel {
    data_dir: PathBuf,
    settings: RwLock<Settings>,
    lock_store: Arc<LockStore>,
    /// None until the tab source delivers its first snapshot.
    tabs: Mutex<Option<Vec<Tab>>>,
    tab_times: Arc<TabTimes>,
    sort_order: Mutex<TabSortOrder>,
    /// Range anchor: id of the most recently clicked row.
    last_selected: Mutex<Option<TabId>>,
}

impl LockPanel {
    pub fn new(data_dir: &Path) -> Self {
        let settings = Settings::load(data_dir);
        let sort_order = resolve_sort_order(settings.lock_tab_sort_order.as_deref());

        Self {
            data_dir: data_dir.to_path_buf(),
            settings: RwLock::new(settings),
            lock_store: Arc::new(LockStore::new(data_dir)),
            tabs: Mutex::new(None),
            tab_times: Arc::new(TabTimes::new()),
            sort_order: Mutex::new(sort_order),
            last_selected: Mutex::new(None),
        }
    }

    /// The lock store, for the embedding shell to wire storage-change
    /// notifications and filter/whitelist editing UI to.
    pub fn lock_store(&self) -> &Arc<LockStore> {
        &self.lock_store
    }

    pub fn sort_order(&self) -> TabSortOrder {
        *self.sort_order.lock().unwrap()
    }

    /// Whether the active sort order survives restarts.
    pub fn sort_persisted(&self) -> bool {
        self.settings.read().unwrap().lock_tab_sort_order.is_some()
    }

    /// Switch the active sort order. When a persisted choice already exists
    /// it follows along; choosing a sorter never turns persistence ON.
    pub fn choose_sorter(&self, next: TabSortOrder) {
        {
            let mut active = self.sort_order.lock().unwrap();
            if *active == next {
                return;
            }
            *active = next;
        }

        let mut settings = self.settings.write().unwrap();
        if settings.lock_tab_sort_order.is_some() {
            settings.lock_tab_sort_order = Some(next.key().to_string());
            self.save_settings(&settings);
        }
    }

    /// Turn sort-order persistence on (remembering the active order) or off
    /// (clearing the stored key). The only way persistence toggles.
    pub fn set_sort_persistence(&self, enabled: bool) {
        let active = self.sort_order();
        let mut settings = self.settings.write().unwrap();
        settings.lock_tab_sort_order = if enabled {
            Some(active.key().to_string())
        } else {
            None
        };
        self.save_settings(&settings);
    }

    /// Replace the raw tab snapshot with a fresh delivery from the tab source.
    pub fn set_tabs(&self, tabs: Vec<Tab>) {
        *self.tabs.lock().unwrap() = Some(tabs);
    }

    /// Back to the not-yet-loaded state; projections go empty.
    pub fn clear_tabs(&self) {
        *self.tabs.lock().unwrap() = None;
    }

    /// Stamp "now" as the tab's last activity. Feeds the Chrono orders.
    pub fn record_tab_activity(&self, id: TabId) {
        let now = chrono::Utc::now().timestamp_millis();
        self.tab_times.insert(id.to_string(), now);
    }

    /// The ordered tab list under the active sort order.
    pub fn ordered_tabs(&self) -> Vec<Tab> {
        let tabs = self.tabs.lock().unwrap();
        let config = self.lock_store.config();
        let ctx = SortContext {
            tab_times: &self.tab_times,
            config: &config,
        };
        project_tabs(tabs.as_deref(), self.sort_order(), &ctx)
    }

    /// Ids of tabs the lock policy currently holds open.
    pub fn locked_ids(&self) -> HashSet<TabId> {
        let config = self.lock_store.config();
        derive_locked_ids(&self.ordered_tabs(), Some(&config))
    }

    /// What the row renderer consumes: ordered tabs with their locked flags.
    pub fn rows(&self) -> Vec<TabRow> {
        let config = self.lock_store.config();
        let ordered = self.ordered_tabs();
        let locked = derive_locked_ids(&ordered, Some(&config));
        ordered
            .into_iter()
            .map(|tab| {
                let is_locked = tab.id.map(|id| locked.contains(&id)).unwrap_or(false);
                TabRow { tab, locked: is_locked }
            })
            .collect()
    }

    /// Handle a click (`selected` = the row's new checkbox state) or
    /// shift-click on a row. Issues fire-and-forget lock/unlock requests for
    /// every covered manually-lockable tab, then moves the range anchor to
    /// the clicked row no matter what got filtered.
    pub fn toggle_tab(&self, target: &Tab, selected: bool, range_modifier: bool) {
        let ordered = self.ordered_tabs();
        let anchor = *self.last_selected.lock().unwrap();
        let plan = plan_toggle(&ordered, anchor, target, range_modifier);

        let config = self.lock_store.config();
        let mutated: Vec<TabId> = plan
            .affected
            .iter()
            .filter(|tab| is_manually_lockable(tab, &config))
            .filter_map(|tab| tab.id)
            .collect();

        log::debug!(
            "[LockPanel] Toggle selected={} range={} covered={} mutated={}",
            selected,
            range_modifier,
            plan.affected.len(),
            mutated.len()
        );

        for id in mutated {
            if selected {
                self.lock_store.lock_tab(id);
            } else {
                self.lock_store.unlock_tab(id);
            }
        }

        *self.last_selected.lock().unwrap() = plan.new_last_selected;
    }

    fn save_settings(&self, settings: &Settings) {
        // Persistence failures never surface in the panel; the in-memory
        // choice stays live for this session.
        if let Err(e) = settings.save(&self.data_dir) {
            log::warn!("[LockPanel] Failed to persist settings: {}", e);
        }
    }
}

/// Resolve a persisted sort key against the registry. Absent or corrupted
/// keys silently fall back to the default order.
fn resolve_sort_order(persisted: Option<&str>) -> TabSortOrder {
    match persisted {
        None => TabSortOrder::default(),
        Some(key) => TabSortOrder::from_key(key).unwrap_or_else(|| {
            log::warn!("[LockPanel] Unknown persisted sort key '{}', using default", key);
            TabSortOrder::default()
        }),
    }
}
