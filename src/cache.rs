//! A read-through cache decorating a shared [`Config`].
//!
//! Typed reads land in a flat dot-path → coerced-value map, so between two
//! invalidations a key is resolved and coerced at most once per requested
//! type. The cache never observes mutations to the underlying store —
//! whoever mutates it (the watcher, a loader) is responsible for
//! invalidating.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use crate::config::Config;
use crate::error::ConfigError;

/// A coerced value held by the cache. An entry's presence is its validity:
/// invalidation removes entries outright.
#[derive(Debug, Clone, PartialEq)]
enum CachedValue {
    Str(String),
    Int(i64),
    Bool(bool),
}

/// Caching wrapper around a shared configuration store.
///
/// Cache hits return without touching the underlying store; misses delegate
/// to the store's typed getter and remember the result. Reading the same
/// key at a different type than the cached one is a miss and re-coerces.
///
/// The cache map is guarded by its own reader/writer lock, so concurrent
/// getters and invalidations are individually atomic. The underlying store
/// is shared as `Arc<RwLock<Config>>` and serialized by its own lock.
pub struct CachedConfig {
    inner: Arc<RwLock<Config>>,
    cache: RwLock<HashMap<String, CachedValue>>,
}

impl CachedConfig {
    /// Wrap an owned config in a fresh shared handle.
    pub fn new(config: Config) -> Self {
        Self::shared(Arc::new(RwLock::new(config)))
    }

    /// Decorate an existing shared store, e.g. one a watcher reloads.
    pub fn shared(inner: Arc<RwLock<Config>>) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// A handle to the underlying shared store.
    pub fn config(&self) -> Arc<RwLock<Config>> {
        Arc::clone(&self.inner)
    }

    pub fn get_string(&self, key: &str) -> Result<String, ConfigError> {
        if let Some(CachedValue::Str(s)) = self.cached(key) {
            return Ok(s);
        }
        let val = self.store().get_string(key)?;
        self.remember(key, CachedValue::Str(val.clone()));
        Ok(val)
    }

    pub fn get_int(&self, key: &str) -> Result<i64, ConfigError> {
        if let Some(CachedValue::Int(i)) = self.cached(key) {
            return Ok(i);
        }
        let val = self.store().get_int(key)?;
        self.remember(key, CachedValue::Int(val));
        Ok(val)
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, ConfigError> {
        if let Some(CachedValue::Bool(b)) = self.cached(key) {
            return Ok(b);
        }
        let val = self.store().get_bool(key)?;
        self.remember(key, CachedValue::Bool(val));
        Ok(val)
    }

    /// Drop every cached entry.
    pub fn invalidate_all(&self) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Drop the cached entry for one key.
    pub fn invalidate_key(&self, key: &str) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }

    fn store(&self) -> RwLockReadGuard<'_, Config> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn cached(&self, key: &str) -> Option<CachedValue> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn remember(&self, key: &str, value: CachedValue) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value);
    }
}
