// File-backed lock-configuration store.
//
// Readers are the hot path (every projection consults the config), so the
// current config lives behind a lock-free ArcSwap snapshot. Mutations are
// rare, happen synchronously inside single event-handler calls, and follow
// clone -> store -> persist -> notify.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use arc_swap::ArcSwap;

use crate::modules::lock_policy::LockConfig;
use crate::state::TabId;

const LOCK_CONFIG_FILE: &str = "lock_config.json";

/// Storage keys a mutation can touch; change notifications carry these so
/// subscribers can re-derive only when a key they care about moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockStoreKey {
    FilterAudio,
    FilterGroupedTabs,
    LockedIds,
    Whitelist,
}

type Listener = Box<dyn Fn(&[LockStoreKey]) + Send + Sync>;

pub struct LockStore {
    // Lock-free reader for the hot path
    config: ArcSwap<LockConfig>,
    data_dir: PathBuf,
    listeners: Mutex<Vec<Listener>>,
}

impl LockStore {
    pub fn new(data_dir: &Path) -> Self {
        let _ = fs::create_dir_all(data_dir);
        let path = data_dir.join(LOCK_CONFIG_FILE);

        let config = if path.exists() {
            match fs::read_to_string(&path) {
                Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                    log::warn!("[LockStore] Failed to parse {}: {}, using defaults", LOCK_CONFIG_FILE, e);
                    LockConfig::default()
                }),
                Err(e) => {
                    log::warn!("[LockStore] Failed to read {}: {}, using defaults", LOCK_CONFIG_FILE, e);
                    LockConfig::default()
                }
            }
        } else {
            LockConfig::default()
        };

        log::info!(
            "[LockStore] Loaded lock config ({} locked ids, {} whitelist patterns)",
            config.locked_ids.len(),
            config.whitelist.len()
        );

        Self {
            config: ArcSwap::from_pointee(config),
            data_dir: data_dir.to_path_buf(),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Current config snapshot. Cheap; safe to call per render.
    pub fn config(&self) -> Arc<LockConfig> {
        self.config.load_full()
    }

    /// Register for change notifications. Listeners receive the keys that
    /// actually changed; mutations that change nothing never notify.
    pub fn subscribe(&self, listener: Listener) {
        self.listeners.lock().unwrap().push(listener);
    }

    /// Mark a tab as manually locked. Idempotent by id.
    pub fn lock_tab(&self, id: TabId) {
        let current = self.config.load();
        if current.locked_ids.contains(&id) {
            return;
        }
        let mut next = (**current).clone();
        next.locked_ids.insert(id);
        log::info!("[LockStore] Locked tab {}", id);
        self.commit(next, &[LockStoreKey::LockedIds]);
    }

    /// Remove a tab's manual lock. Idempotent by id.
    pub fn unlock_tab(&self, id: TabId) {
        let current = self.config.load();
        if !current.locked_ids.contains(&id) {
            return;
        }
        let mut next = (**current).clone();
        next.locked_ids.remove(&id);
        log::info!("[LockStore] Unlocked tab {}", id);
        self.commit(next, &[LockStoreKey::LockedIds]);
    }

    pub fn set_filter_audio(&self, enabled: bool) {
        let current = self.config.load();
        if current.filter_audio == enabled {
            return;
        }
        let mut next = (**current).clone();
        next.filter_audio = enabled;
        self.commit(next, &[LockStoreKey::FilterAudio]);
    }

    pub fn set_filter_grouped_tabs(&self, enabled: bool) {
        let current = self.config.load();
        if current.filter_grouped_tabs == enabled {
            return;
        }
        let mut next = (**current).clone();
        next.filter_grouped_tabs = enabled;
        self.commit(next, &[LockStoreKey::FilterGroupedTabs]);
    }

    pub fn set_whitelist(&self, whitelist: Vec<String>) {
        let current = self.config.load();
        if current.whitelist == whitelist {
            return;
        }
        let mut next = (**current).clone();
        next.whitelist = whitelist;
        self.commit(next, &[LockStoreKey::Whitelist]);
    }

    /// Drop locked ids for tabs that no longer exist. Called when the tab
    /// source reports closures, so the persisted set does not grow forever.
    pub fn retain_locked_ids(&self, open_ids: &std::collections::HashSet<TabId>) {
        let current = self.config.load();
        if current.locked_ids.iter().all(|id| open_ids.contains(id)) {
            return;
        }
        let mut next = (**current).clone();
        next.locked_ids.retain(|id| open_ids.contains(id));
        log::info!("[LockStore] Pruned locked ids down to {}", next.locked_ids.len());
        self.commit(next, &[LockStoreKey::LockedIds]);
    }

    fn commit(&self, next: LockConfig, changed: &[LockStoreKey]) {
        self.config.store(Arc::new(next));
        if let Err(e) = self.save() {
            // Persistence is fire-and-forget; the in-memory config stays live.
            log::warn!("[LockStore] Failed to persist lock config: {}", e);
        }
        self.notify(changed);
    }

    fn notify(&self, changed: &[LockStoreKey]) {
        let listeners = self.listeners.lock().unwrap();
        for listener in listeners.iter() {
            listener(changed);
        }
    }

    fn save(&self) -> Result<(), String> {
        let path = self.data_dir.join(LOCK_CONFIG_FILE);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(&**self.config.load()).map_err(|e| e.to_string())?;

        // Atomic write: tmp + rename (pattern from settings.rs)
        fs::write(&tmp_path, json).map_err(|e| e.to_string())?;
        fs::rename(tmp_path, path).map_err(|e| e.to_string())?;

        Ok(())
    }
}
