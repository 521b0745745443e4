use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

pub const DEFAULT_MAX_ENTRIES: usize = 50_000;

/// Backing store for resolved icon URIs, keyed by full page URL.
///
/// Implementations bound their entry count and evict the earliest-inserted
/// key first. Overwriting an existing key must not refresh its position in
/// the eviction order.
pub trait IconCache: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

struct MemoryCacheInner {
    entries: HashMap<String, String>,
    order: VecDeque<String>,
}

/// Insertion-ordered in-memory cache with a capacity bound. Suitable for
/// tests and embedders that do not need persistence.
pub struct MemoryCache {
    inner: Mutex<MemoryCacheInner>,
    max_entries: usize,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::with_max_entries(DEFAULT_MAX_ENTRIES)
    }

    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            inner: Mutex::new(MemoryCacheInner {
                entries: HashMap::new(),
                order: VecDeque::new(),
            }),
            max_entries,
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl IconCache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.lock().unwrap().entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut inner = self.inner.lock().unwrap();

        if inner.entries.insert(key.to_string(), value.to_string()).is_none() {
            inner.order.push_back(key.to_string());
        }

        while inner.entries.len() > self.max_entries {
            if let Some(oldest) = inner.order.pop_front() {
                inner.entries.remove(&oldest);
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_and_set_roundtrip() {
        let cache = MemoryCache::new();
        assert_eq!(cache.get("https://example.com"), None);

        cache.set("https://example.com", "https://example.com/favicon.ico");
        assert_eq!(
            cache.get("https://example.com").as_deref(),
            Some("https://example.com/favicon.ico")
        );
    }

    #[test]
    fn capacity_bound_evicts_earliest_inserted() {
        let cache = MemoryCache::with_max_entries(3);
        cache.set("a", "1");
        cache.set("b", "2");
        cache.set("c", "3");
        cache.set("d", "4");

        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b").as_deref(), Some("2"));
        assert_eq!(cache.get("d").as_deref(), Some("4"));
    }

    #[test]
    fn overwrite_does_not_refresh_eviction_position() {
        let cache = MemoryCache::with_max_entries(3);
        cache.set("a", "1");
        cache.set("b", "2");
        cache.set("c", "3");

        // "a" stays oldest despite the rewrite.
        cache.set("a", "updated");
        cache.set("d", "4");

        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b").as_deref(), Some("2"));
        assert_eq!(cache.get("c").as_deref(), Some("3"));
        assert_eq!(cache.get("d").as_deref(), Some("4"));
    }

    #[test]
    fn overwrite_keeps_one_entry_per_key() {
        let cache = MemoryCache::with_max_entries(10);
        cache.set("a", "1");
        cache.set("a", "2");

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("a").as_deref(), Some("2"));
    }
}
