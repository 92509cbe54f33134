use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::{debug, warn};

pub trait Navigate: Send + Sync {
    fn current_url(&self) -> String;
    fn assign(&self, url: &str);
}

/// Advisory only, never a security boundary. Presence of a key is the only
/// semantic; there is no expiry.
pub trait FlagStore: Send + Sync {
    fn get(&self, key: &str) -> bool;
    fn set(&self, key: &str);
}

#[derive(Debug, Clone)]
pub struct SystemNavigator {
    return_url: String,
}

impl SystemNavigator {
    pub fn new(return_url: impl Into<String>) -> Self {
        Self {
            return_url: return_url.into(),
        }
    }
}

impl Navigate for SystemNavigator {
    fn current_url(&self) -> String {
        self.return_url.clone()
    }

    fn assign(&self, url: &str) {
        debug!(url, "opening system browser");
        if let Err(err) = webbrowser::open(url) {
            warn!(%err, "failed to open system browser");
        }
    }
}

/// Persists each flag as an empty marker file. Write failures are logged
/// and swallowed; losing the hint must not fail a successful refresh.
#[derive(Debug, Clone)]
pub struct FileFlagStore {
    dir: PathBuf,
}

impl FileFlagStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl FlagStore for FileFlagStore {
    fn get(&self, key: &str) -> bool {
        self.dir.join(key).exists()
    }

    fn set(&self, key: &str) {
        if let Err(err) = std::fs::create_dir_all(&self.dir) {
            warn!(%err, dir = %self.dir.display(), "failed to create flag directory");
            return;
        }
        if let Err(err) = std::fs::write(self.dir.join(key), "") {
            warn!(%err, key, "failed to persist flag");
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryFlagStore {
    flags: Mutex<HashSet<String>>,
}

impl MemoryFlagStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FlagStore for MemoryFlagStore {
    fn get(&self, key: &str) -> bool {
        self.flags.lock().unwrap().contains(key)
    }

    fn set(&self, key: &str) {
        self.flags.lock().unwrap().insert(key.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::{FileFlagStore, FlagStore, MemoryFlagStore};

    #[test]
    fn memory_flag_store_round_trips() {
        let store = MemoryFlagStore::new();
        assert!(!store.get("known_user"));
        store.set("known_user");
        assert!(store.get("known_user"));
    }

    #[test]
    fn file_flag_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileFlagStore::new(dir.path());
        assert!(!store.get("known_user"));
        store.set("known_user");

        let reopened = FileFlagStore::new(dir.path());
        assert!(reopened.get("known_user"));
    }

    #[test]
    fn file_flag_store_missing_dir_reads_false() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileFlagStore::new(dir.path().join("never-created"));
        assert!(!store.get("known_user"));
    }
}
