//! Backend client for match analyses and hero metadata.
//!
//! Match analyses are cached per match id. A [`MatchCache`] keeps entries in
//! memory on top of a pluggable [`CacheStorage`] and revalidates stale entries
//! with the ETag the backend sent:
//!
//! 1. a fresh entry is returned without touching the network
//! 2. a stale entry is revalidated with `If-None-Match`
//! 3. `304 Not Modified` extends the entry's lifetime
//! 4. a `2xx` body is decoded, validated and stored
//!
//! With [`FetchOptions::allow_stale_on_error`] a stale entry is served when
//! the request itself fails or the backend answers with an error status.
//!
//! # Examples
//!
//! ```
//! use replaylens_client::{CacheStorage as _, MatchCache, MemoryStorage};
//!
//! let mut cache = MatchCache::new(MemoryStorage::default());
//! assert!(cache.get(42).is_none());
//! assert!(cache.storage().get("matchAnalysis:42").unwrap().is_none());
//! ```

pub use self::{
    cache::{CacheEntry, DEFAULT_MAX_AGE_SECS, MatchCache, parse_max_age, storage_key},
    client::{AnalysisClient, DEFAULT_BACKEND_URL, DEFAULT_HEROES_URL, FetchOptions},
    error::{ErrorCategory, FetchError, user_message},
    storage::{CacheStorage, FileStorage, MemoryStorage, StorageError},
    transport::{HttpResponse, ReqwestTransport, Transport, TransportError},
};

mod cache;
mod client;
mod error;
mod storage;
mod transport;
