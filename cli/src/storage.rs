//! File-backed session storage.
//!
//! The session file is a flat JSON object of string entries, written back
//! after every mutation. An absent or corrupt file degrades to an empty
//! store, which the core reads as "not authenticated" — losing the file
//! only means logging in again.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use todo_client::Storage;
use tracing::warn;

/// Resolve the session file path: `$TODO_CLI_STATE` when set, otherwise
/// `~/.todo-cli/session.json`.
pub fn state_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("TODO_CLI_STATE") {
        return Ok(PathBuf::from(path));
    }
    let home = dirs::home_dir().context("cannot determine home directory")?;
    Ok(home.join(".todo-cli").join("session.json"))
}

/// `Storage` implementation over a small JSON file on disk.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStorage {
    pub fn load(path: PathBuf) -> Self {
        let entries = match fs::read_to_string(&path) {
            Ok(data) => match serde_json::from_str(&data) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(path = %path.display(), %err, "session file is corrupt, ignoring it");
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        Self { path, entries }
    }

    fn persist(&self) {
        let write = || -> std::io::Result<()> {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            let data = serde_json::to_string_pretty(&self.entries)?;
            fs::write(&self.path, data)
        };
        if let Err(err) = write() {
            warn!(path = %self.path.display(), %err, "failed to persist session file");
        }
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist();
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.persist();
        }
    }
}
