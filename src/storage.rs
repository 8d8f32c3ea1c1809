use std::collections::HashMap;

use parking_lot::Mutex;

use crate::config::NO_ATTEMPTS_KEY;

/// Tab-scoped key/value storage, the host's `sessionStorage`.
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: String);

    fn remove(&self, key: &str);
}

/// In-memory storage for tests and hosts without a session store.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.entries.lock().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.entries.lock().remove(key);
    }
}

/// Negative attempts within this tab session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoButtonState {
    pub attempt_count: u32,
}

impl NoButtonState {
    /// Missing or garbled values read as zero.
    pub fn restore(storage: &dyn SessionStorage) -> Self {
        let attempt_count = storage
            .get(NO_ATTEMPTS_KEY)
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(0);

        Self { attempt_count }
    }

    pub fn record_attempt(&mut self, storage: &dyn SessionStorage) -> u32 {
        self.attempt_count = self.attempt_count.saturating_add(1);
        storage.set(NO_ATTEMPTS_KEY, self.attempt_count.to_string());
        self.attempt_count
    }

    pub fn clear(&mut self, storage: &dyn SessionStorage) {
        self.attempt_count = 0;
        storage.remove(NO_ATTEMPTS_KEY);
    }
}
