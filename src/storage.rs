use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Cached board contents, only ever used as an offline seed.
pub const PROJECTS_KEY: &str = "lab_projects";
/// Cached session credential, cleared on logout.
pub const AUTH_KEY: &str = "lab_auth";

/// Small string key-value store standing in for browser local/session storage.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, String>;
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove(&self, key: &str) -> Result<(), String>;
}

#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        let entries = self
            .entries
            .read()
            .map_err(|_| "Memory store lock poisoned".to_string())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| "Memory store lock poisoned".to_string())?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| "Memory store lock poisoned".to_string())?;
        entries.remove(key);
        Ok(())
    }
}

/// One file per key inside a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, String> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)
            .map_err(|e| format!("Failed to create store directory {}: {e}", dir.display()))?;
        Ok(Self { dir })
    }

    fn path(&self, key: &str) -> Result<PathBuf, String> {
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(format!("Invalid store key '{key}'"));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        let path = self.path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(format!("Failed to read {}: {e}", path.display())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let path = self.path(key)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value).map_err(|e| format!("Failed to write {}: {e}", tmp.display()))?;
        std::fs::rename(&tmp, &path)
            .map_err(|e| format!("Failed to replace {}: {e}", path.display()))
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        let path = self.path(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(format!("Failed to remove {}: {e}", path.display())),
        }
    }
}
