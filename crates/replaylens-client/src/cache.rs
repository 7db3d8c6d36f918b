use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use replaylens_model::MatchAnalysis;
use serde::{Deserialize, Serialize};

use crate::CacheStorage;

/// Lifetime of a response without a usable `max-age`.
pub const DEFAULT_MAX_AGE_SECS: u64 = 300;

/// Seconds shaved off `max-age` so an entry expires before the backend's copy.
const EXPIRY_MARGIN_SECS: u64 = 2;

/// Storage key of a match: `"matchAnalysis:{id}"`.
#[must_use]
pub fn storage_key(match_id: u64) -> String {
    format!("matchAnalysis:{match_id}")
}

/// `max-age` directive of a `Cache-Control` header, matched case-insensitively.
#[must_use]
pub fn parse_max_age(cache_control: Option<&str>) -> u64 {
    let Some(value) = cache_control else {
        return DEFAULT_MAX_AGE_SECS;
    };
    value
        .split(',')
        .filter_map(|directive| {
            let (name, seconds) = directive.trim().split_once('=')?;
            name.trim()
                .eq_ignore_ascii_case("max-age")
                .then_some(seconds.trim())
        })
        .find_map(|seconds| seconds.parse().ok())
        .unwrap_or(DEFAULT_MAX_AGE_SECS)
}

/// Expiry of a response received at `now` with the given `max-age`.
pub(crate) fn expires_at(now: DateTime<Utc>, max_age_secs: u64) -> DateTime<Utc> {
    let secs = max_age_secs.saturating_sub(EXPIRY_MARGIN_SECS);
    let delta = i64::try_from(secs)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .unwrap_or(TimeDelta::MAX);
    now.checked_add_signed(delta)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)

}

/// Cached payload with its validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub data: MatchAnalysis,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(rename = "expiresAt", with = "chrono::serde::ts_milliseconds")]
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// In-memory match cache over a persistent [`CacheStorage`].
///
/// Storage is consulted once per match id, on the first lookup. Storage
/// failures never fail a lookup: they are logged and the entry is treated as
/// absent.
#[derive(Debug)]
pub struct MatchCache<S> {
    storage: S,
    entries: HashMap<u64, CacheEntry>,
}

impl<S> MatchCache<S>
where
    S: CacheStorage,
{
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            entries: HashMap::new(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Entry for `match_id`, loading it from storage on a miss.
    pub fn get(&mut self, match_id: u64) -> Option<&CacheEntry> {
        if !self.entries.contains_key(&match_id)
            && let Some(entry) = self.load(match_id)
        {
            self.entries.insert(match_id, entry);
        }
        self.entries.get(&match_id)
    }

    fn load(&self, match_id: u64) -> Option<CacheEntry> {
        let key = storage_key(match_id);
        let raw = match self.storage.get(&key) {
            Ok(raw) => raw?,
            Err(err) => {
                log::warn!("ignoring cache entry {key}: {err}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(entry) => Some(entry),
            Err(err) => {
                log::warn!("ignoring unreadable cache entry {key}: {err}");
                None
            }
        }
    }

    /// Stores `entry` in memory and in storage.
    pub fn insert(&mut self, match_id: u64, entry: CacheEntry) {
        let key = storage_key(match_id);
        match serde_json::to_string(&entry) {
            Ok(raw) => {
                if let Err(err) = self.storage.set(&key, &raw) {
                    log::warn!("failed to persist cache entry {key}: {err}");
                }
            }
            Err(err) => log::warn!("failed to encode cache entry {key}: {err}"),
        }
        log::info!("cached match {match_id} until {}", entry.expires_at);
        self.entries.insert(match_id, entry);
    }

    pub fn remove(&mut self, match_id: u64) {
        self.entries.remove(&match_id);
        let key = storage_key(match_id);
        if let Err(err) = self.storage.remove(&key) {
            log::warn!("failed to remove cache entry {key}: {err}");
        }
    }

    /// Drops every entry, in memory and in storage.
    pub fn clear(&mut self) {
        self.entries.clear();
        if let Err(err) = self.storage.clear() {
            log::warn!("failed to clear cache storage: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStorage;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    fn entry(expires: i64) -> CacheEntry {
        CacheEntry {
            data: MatchAnalysis::default(),
            etag: Some("\"v1\"".to_owned()),
            expires_at: at(expires),
        }
    }

    #[test]
    fn test_parse_max_age() {
        assert_eq!(parse_max_age(None), 300);
        assert_eq!(parse_max_age(Some("public, max-age=60")), 60);
        assert_eq!(parse_max_age(Some("Max-Age=10, must-revalidate")), 10);
        assert_eq!(parse_max_age(Some("no-cache")), 300);
        assert_eq!(parse_max_age(Some("max-age=soon")), 300);
    }

    #[test]
    fn test_expiry_keeps_safety_margin() {
        assert_eq!(expires_at(at(1000), 60), at(1058));
        assert_eq!(expires_at(at(1000), 1), at(1000));
        assert_eq!(expires_at(at(1000), 0), at(1000));
    }

    #[test]
    fn test_entry_round_trips_through_storage() {
        let mut cache = MatchCache::new(MemoryStorage::default());
        cache.insert(7, entry(5000));
        let raw = cache.storage().get("matchAnalysis:7").unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["expiresAt"], 5_000_000);
        assert_eq!(json["etag"], "\"v1\"");

        let mut reopened = MatchCache::new(cache.storage().clone());
        assert_eq!(reopened.get(7), Some(&entry(5000)));
        assert!(reopened.get(7).unwrap().is_fresh(at(4999)));
        assert!(!reopened.get(7).unwrap().is_fresh(at(5000)));
    }

    #[test]
    fn test_unreadable_entry_is_ignored() {
        let mut storage = MemoryStorage::default();
        storage.set("matchAnalysis:7", "not json").unwrap();
        let mut cache = MatchCache::new(storage);
        assert!(cache.get(7).is_none());
    }

    #[test]
    fn test_clear_and_remove() {
        let mut cache = MatchCache::new(MemoryStorage::default());
        cache.insert(1, entry(10));
        cache.insert(2, entry(10));
        cache.remove(1);
        assert!(cache.get(1).is_none());
        assert!(cache.get(2).is_some());
        cache.clear();
        assert!(cache.get(2).is_none());
        assert!(cache.storage().is_empty());
    }
}
