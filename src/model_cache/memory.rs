//! model_cache::memory — process-local cache.
//!
//! Useful in tests and for programs that build several engines over the same
//! residual within one process. Entries are small signatures and are cloned
//! in and out.
use crate::model_cache::{
    cache::{ModelArtifact, ModelCache, ModelKey},
    errors::{CacheError, CacheResult},
};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory [`ModelCache`] keyed by [`ModelKey`].
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<ModelKey, ModelArtifact>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored artifacts.
    pub fn len(&self) -> CacheResult<usize> {
        Ok(self.entries.lock().map_err(|_| CacheError::Poisoned)?.len())
    }

    pub fn is_empty(&self) -> CacheResult<bool> {
        Ok(self.len()? == 0)
    }

    pub fn contains(&self, key: &ModelKey) -> CacheResult<bool> {
        Ok(self.entries.lock().map_err(|_| CacheError::Poisoned)?.contains_key(key))
    }
}

impl ModelCache for InMemoryCache {
    fn load(&self, key: &ModelKey) -> CacheResult<Option<ModelArtifact>> {
        let entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn store(&self, key: &ModelKey, artifact: &ModelArtifact) -> CacheResult<()> {
        let mut entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        entries.insert(key.clone(), artifact.clone());
        Ok(())
    }
}
