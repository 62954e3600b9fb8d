//! Process-wide response cache with per-read freshness checks.
//!
//! The cache never expires anything on its own: each reader passes the
//! maximum age it is willing to accept, and a stale entry simply reads as
//! absent until the next `set` replaces it. Entries are swapped whole behind an
//! `Arc`, so a reader observes either the previous `(payload, stored_at)` pair
//! or the new one.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tokio::time::Instant;

#[derive(Debug)]
struct CacheEntry<V> {
    payload: V,
    stored_at: Instant,
}

/// String-keyed cache whose entries are judged fresh by the reader.
#[derive(Debug)]
pub struct TtlCache<V> {
    entries: RwLock<HashMap<String, Arc<CacheEntry<V>>>>,
}

/// The cache shared by every dataset fetcher. Payloads are stored as JSON
/// values so one instance can hold matches, standings, weather and locations.
pub type ResponseCache = TtlCache<serde_json::Value>;

impl<V> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> TtlCache<V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Stores `payload` under `key`, replacing any previous entry.
    pub fn set(&self, key: impl Into<String>, payload: V) {
        let entry = Arc::new(CacheEntry {
            payload,
            stored_at: Instant::now(),
        });
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), entry);
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of stored entries, fresh or stale.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn fresh_entry(&self, key: &str, max_age: Duration) -> Option<Arc<CacheEntry<V>>> {
        let entry = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()?;
        (entry.stored_at.elapsed() < max_age).then_some(entry)
    }
}

impl<V: Clone> TtlCache<V> {
    /// Returns the payload for `key` if it was stored less than `max_age` ago.
    #[must_use]
    pub fn get(&self, key: &str, max_age: Duration) -> Option<V> {
        self.fresh_entry(key, max_age)
            .map(|entry| entry.payload.clone())
    }
}

impl TtlCache<serde_json::Value> {
    /// Typed read. A fresh payload that no longer deserializes into `T` is
    /// treated as a miss.
    #[must_use]
    pub fn get_as<T: DeserializeOwned>(&self, key: &str, max_age: Duration) -> Option<T> {
        let entry = self.fresh_entry(key, max_age)?;
        match T::deserialize(&entry.payload) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "cached payload has unexpected shape; ignoring");
                None
            }
        }
    }

    /// Typed write. Serialization happens before the cache is touched, so a
    /// failure leaves any existing entry in place.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if `value` cannot be represented as JSON.
    pub fn set_as<T: Serialize>(
        &self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<(), serde_json::Error> {
        let payload = serde_json::to_value(value)?;
        self.set(key, payload);
        Ok(())
    }
}
