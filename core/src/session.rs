//! Session persistence behind an injectable storage interface.
//!
//! # Design
//! The persisted token slot is owned exclusively by `SessionStore`; nothing
//! else in the crate reads or writes the underlying keys. `Storage` is the
//! seam hosts implement — a browser-style origin-scoped key/value store, a
//! file on disk, or the in-memory fake used by tests. The token is opaque:
//! any non-empty string is accepted, nothing is validated on read, and a
//! corrupted or absent value degrades to "not authenticated."

use std::collections::HashMap;

const SESSION_KEY: &str = "sessionId";
const EMAIL_KEY: &str = "userEmail";

/// Minimal key/value persistence the session layer runs on.
///
/// Single-writer is assumed; concurrent external mutation of the backing
/// store is out of scope.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// HashMap-backed `Storage` for tests and non-persistent hosts.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Persists the session token and, for display convenience only, the
/// last-known user email.
///
/// A token, once stored, is treated as valid until explicitly cleared or the
/// server rejects it; the client never inspects or expires it locally.
#[derive(Debug)]
pub struct SessionStore<S: Storage> {
    storage: S,
}

impl<S: Storage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// The persisted token, or `None` if absent. An empty value counts as
    /// absent.
    pub fn token(&self) -> Option<String> {
        self.storage.get(SESSION_KEY).filter(|t| !t.is_empty())
    }

    /// Overwrite the persisted token.
    pub fn set_token(&mut self, token: &str) {
        self.storage.set(SESSION_KEY, token);
    }

    /// Remove the persisted token. Idempotent.
    pub fn clear_token(&mut self) {
        self.storage.remove(SESSION_KEY);
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Last-known user email, persisted for display only. Not validated.
    pub fn user_email(&self) -> Option<String> {
        self.storage.get(EMAIL_KEY).filter(|e| !e.is_empty())
    }

    pub fn set_user_email(&mut self, email: &str) {
        self.storage.set(EMAIL_KEY, email);
    }

    pub fn clear_user_email(&mut self) {
        self.storage.remove(EMAIL_KEY);
    }
}
