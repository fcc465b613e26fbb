// Tab Warden - lock-list panel engine.
// This file exposes all modules so they can be embedded by the popup shell
// and tested independently.

// Stores
pub mod lock_store;
pub mod settings;

// Panel controller
pub mod lock_panel;

// Shared state
pub mod state;

// Pure logic modules (no I/O imports)
pub mod modules;

pub use lock_panel::LockPanel;
pub use lock_store::{LockStore, LockStoreKey};
pub use modules::lock_policy::LockConfig;
pub use modules::sorting::TabSortOrder;
pub use settings::Settings;
pub use state::{Tab, TabId, TabRow, TabTimes};
