//! Keyed result cache with an optional staleness window.
//!
//! Entries remember when they were fetched; readers decide freshness against
//! the tokio clock so paused-time tests can advance it.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use tokio::time::Instant;

#[derive(Debug)]
struct Entry<V> {
    value: V,
    fetched_at: Instant,
}

#[derive(Debug)]
pub struct QueryCache<K, V> {
    entries: HashMap<K, Entry<V>>,
    stale_after: Option<Duration>,
}

impl<K, V> QueryCache<K, V>
where
    K: Eq + Hash,
{
    /// Cache whose entries turn stale `stale_after` past their fetch.
    pub fn new(stale_after: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stale_after: Some(stale_after),
        }
    }

    /// Cache whose entries never turn stale.
    pub fn unbounded() -> Self {
        Self {
            entries: HashMap::new(),
            stale_after: None,
        }
    }

    /// Value for `key` if it was fetched within the staleness window.
    pub fn fresh(&self, key: &K, now: Instant) -> Option<&V> {
        let entry = self.entries.get(key)?;
        match self.stale_after {
            Some(window) if now.saturating_duration_since(entry.fetched_at) >= window => None,
            _ => Some(&entry.value),
        }
    }

    pub fn insert(&mut self, key: K, value: V, now: Instant) {
        self.entries.insert(
            key,
            Entry {
                value,
                fetched_at: now,
            },
        );
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key).map(|entry| &entry.value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.entries.get_mut(key).map(|entry| &mut entry.value)
    }

    /// Existing value for `key`, or a fresh default stamped `now`.
    pub fn get_or_insert_default(&mut self, key: K, now: Instant) -> &mut V
    where
        V: Default,
    {
        &mut self
            .entries
            .entry(key)
            .or_insert_with(|| Entry {
                value: V::default(),
                fetched_at: now,
            })
            .value
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
