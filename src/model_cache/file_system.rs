//! model_cache::file_system — JSON artifacts under the model folder.
//!
//! Layout: `<model_folder>/<model_name>/<model_name>_<kind>.json`.
//!
//! Writes go to a process-specific temporary file in the same directory and
//! are then renamed over the target, so a reader never observes a partially
//! written artifact. Two processes initializing the same key concurrently
//! can still race on which complete artifact wins; that is not coordinated.
use crate::model_cache::{
    cache::{ModelArtifact, ModelCache, ModelKey},
    errors::{CacheError, CacheResult},
};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// File-system backed [`ModelCache`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemCache;

impl FileSystemCache {
    pub fn new() -> Self {
        Self
    }

    /// Directory holding both artifacts of a model.
    pub fn model_dir(key: &ModelKey) -> PathBuf {
        key.model_folder.join(&key.model_name)
    }

    /// Path of the artifact for `key`.
    pub fn artifact_path(key: &ModelKey) -> PathBuf {
        Self::model_dir(key).join(format!("{}.json", key.library_name()))
    }
}

impl ModelCache for FileSystemCache {
    fn load(&self, key: &ModelKey) -> CacheResult<Option<ModelArtifact>> {
        let path = Self::artifact_path(key);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(CacheError::io(&path, &err)),
        };
        serde_json::from_str(&text).map(Some).map_err(|err| CacheError::corrupt(&path, &err))
    }

    fn store(&self, key: &ModelKey, artifact: &ModelArtifact) -> CacheResult<()> {
        let dir = Self::model_dir(key);
        fs::create_dir_all(&dir).map_err(|err| CacheError::io(&dir, &err))?;

        let path = Self::artifact_path(key);
        let text = serde_json::to_string(artifact).map_err(|err| CacheError::corrupt(&path, &err))?;

        let tmp = dir.join(format!(".{}.{}.tmp", key.library_name(), std::process::id()));
        fs::write(&tmp, text).map_err(|err| CacheError::io(&tmp, &err))?;
        fs::rename(&tmp, &path).map_err(|err| {
            let _ = fs::remove_file(&tmp);
            CacheError::io(&path, &err)
        })
    }
}
