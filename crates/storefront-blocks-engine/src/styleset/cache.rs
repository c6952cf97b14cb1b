use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Key-value store for compiled CSS, shared between requests.
///
/// Writers race last-write-wins; implementations need no stronger ordering.
pub trait StylesetCache: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String, ttl: Duration);
    fn delete(&self, key: &str);
}

/// Process-local cache with per-entry expiry.
///
/// Expired entries are dropped when read and swept on every `set`, so the
/// map holds at most the keys written within one TTL.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: DashMap<String, (String, Instant)>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StylesetCache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        let now = Instant::now();
        self.entries.remove_if(key, |_, (_, expires_at)| now >= *expires_at);
        self.entries
            .get(key)
            .filter(|entry| now < entry.value().1)
            .map(|entry| entry.value().0.clone())
    }

    fn set(&self, key: &str, value: String, ttl: Duration) {
        let now = Instant::now();
        self.entries.retain(|_, (_, expires_at)| now < *expires_at);
        self.entries.insert(key.to_string(), (value, now + ttl));
    }

    fn delete(&self, key: &str) {
        self.entries.remove(key);
    }
}
