use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Persisted sort-order key for the lock list, or None when the user
    /// has not asked for their sort choice to survive restarts.
    pub lock_tab_sort_order: Option<String>,
    pub theme: String, // "dark", "light", "system"
    pub compact_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lock_tab_sort_order: None,
            theme: "system".to_string(),
            compact_mode: false,
        }
    }
}

impl Settings {
    pub fn get_path(data_dir: &Path) -> PathBuf {
        data_dir.join("settings.json")
    }

    pub fn load(data_dir: &Path) -> Self {
        let path = Self::get_path(data_dir);
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                    log::warn!("[Settings] Failed to parse settings: {}, returning defaults", e);
                    Self::default()
                }),
                Err(e) => {
                    log::warn!("[Settings] Failed to read file: {}, returning defaults", e);
                    Self::default()
                }
            }
        } else {
            Self::default()
        }
    }

    pub fn save(&self, data_dir: &Path) -> Result<(), String> {
        let path = Self::get_path(data_dir);
        let tmp_path = path.with_extension("tmp");

        fs::create_dir_all(data_dir).map_err(|e| e.to_string())?;

        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;

        // Atomic Write Strategy: Write to tmp, then rename.
        // This ensures we never have a half-written file if the app crashes.
        fs::write(&tmp_path, json).map_err(|e| e.to_string())?;
        fs::rename(tmp_path, path).map_err(|e| e.to_string())?;

        Ok(())
    }
}
