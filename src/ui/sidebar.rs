// ABOUTME: Sidebar visibility preference with an injectable persistence adapter
// ABOUTME: Persists the open flag across reloads and closes it on narrow viewports

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

use super::error::{PreferenceError, Result};

pub const SIDEBAR_STORAGE_KEY: &str = "sidebar_state";

/// Viewports narrower than this (in pixels) force the sidebar closed
pub const MOBILE_BREAKPOINT: u32 = 768;

/// Key-value storage for small UI preferences.
pub trait PreferenceStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept as a flat JSON object on disk
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn read_all(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|source| {
            PreferenceError::IoError {
                path: self.path.clone(),
                source,
            }
        })?;
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let values = self.read_all()?;
        Ok(values.get(key).map(|value| match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }))
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), Value::String(value.to_string()));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| PreferenceError::IoError {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let contents = serde_json::to_string_pretty(&values)?;
        std::fs::write(&self.path, contents).map_err(|source| PreferenceError::IoError {
            path: self.path.clone(),
            source,
        })
    }
}

/// Session-scoped sidebar visibility. Every change is written through to the store.
#[derive(Debug)]
pub struct SidebarState<S: PreferenceStore> {
    open: bool,
    breakpoint: u32,
    store: S,
}

impl<S: PreferenceStore> SidebarState<S> {
    /// Restore the stored flag, defaulting to open when nothing was saved
    pub fn load(store: S) -> Result<Self> {
        let open = match store.load(SIDEBAR_STORAGE_KEY)? {
            None => true,
            Some(value) => match value.as_str() {
                "true" => true,
                "false" => false,
                _ => {
                    return Err(PreferenceError::InvalidValue {
                        key: SIDEBAR_STORAGE_KEY.to_string(),
                        value,
                    })
                }
            },
        };

        debug!("Sidebar restored as {}", if open { "open" } else { "closed" });
        Ok(Self {
            open,
            breakpoint: MOBILE_BREAKPOINT,
            store,
        })
    }

    pub fn with_breakpoint(mut self, breakpoint: u32) -> Self {
        self.breakpoint = breakpoint;
        self
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn set_open(&mut self, open: bool) -> Result<()> {
        self.open = open;
        self.store
            .save(SIDEBAR_STORAGE_KEY, if open { "true" } else { "false" })
    }

    pub fn toggle(&mut self) -> Result<bool> {
        self.set_open(!self.open)?;
        Ok(self.open)
    }

    pub fn close(&mut self) -> Result<()> {
        self.set_open(false)
    }

    /// React to a viewport width change; returns true when the sidebar was closed
    pub fn on_resize(&mut self, width: u32) -> Result<bool> {
        if width < self.breakpoint && self.open {
            debug!("Viewport {}px below {}px, closing sidebar", width, self.breakpoint);
            self.close()?;
            return Ok(true);
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_to_open() {
        let sidebar = SidebarState::load(MemoryPreferenceStore::new()).unwrap();
        assert!(sidebar.is_open());
    }

    #[test]
    fn test_toggle_persists() {
        let mut sidebar = SidebarState::load(MemoryPreferenceStore::new()).unwrap();

        assert!(!sidebar.toggle().unwrap());
        assert_eq!(
            sidebar.store().load(SIDEBAR_STORAGE_KEY).unwrap(),
            Some("false".to_string())
        );
        assert!(sidebar.toggle().unwrap());
    }

    #[test]
    fn test_resize_below_breakpoint_closes() {
        let mut sidebar = SidebarState::load(MemoryPreferenceStore::new()).unwrap();

        assert!(!sidebar.on_resize(1024).unwrap());
        assert!(sidebar.is_open());
        assert!(sidebar.on_resize(600).unwrap());
        assert!(!sidebar.is_open());
        // already closed
        assert!(!sidebar.on_resize(500).unwrap());

        let mut narrow = SidebarState::load(MemoryPreferenceStore::new())
            .unwrap()
            .with_breakpoint(1200);
        assert!(narrow.on_resize(1024).unwrap());
    }

    #[test]
    fn test_file_store_survives_reload() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("prefs").join("ui.json");

        let mut sidebar = SidebarState::load(FilePreferenceStore::new(&path)).unwrap();
        sidebar.close().unwrap();

        let reloaded = SidebarState::load(FilePreferenceStore::new(&path)).unwrap();
        assert!(!reloaded.is_open());
    }

    #[test]
    fn test_memory_store_survives_poisoned_lock() {
        let store = std::sync::Arc::new(MemoryPreferenceStore::new());
        store.save(SIDEBAR_STORAGE_KEY, "false").unwrap();

        let poisoner = std::sync::Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.values.lock().unwrap();
            panic!("poison the lock");
        })
        .join();
        assert!(store.values.is_poisoned());

        assert_eq!(
            store.load(SIDEBAR_STORAGE_KEY).unwrap(),
            Some("false".to_string())
        );
        store.save(SIDEBAR_STORAGE_KEY, "true").unwrap();
        assert_eq!(
            store.load(SIDEBAR_STORAGE_KEY).unwrap(),
            Some("true".to_string())
        );
    }

    #[test]
    fn test_invalid_stored_value() {
        let store = MemoryPreferenceStore::new();
        store.save(SIDEBAR_STORAGE_KEY, "sideways").unwrap();

        assert!(matches!(
            SidebarState::load(store),
            Err(PreferenceError::InvalidValue { .. })
        ));
    }
}
