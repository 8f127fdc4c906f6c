//! model_cache::settings — where generated models live and when to rebuild them.
//!
//! Purpose
//! -------
//! Hold the user-facing knobs of the model lifecycle: the model name (which
//! prefixes both cached artifacts), the cache folder, whether to recompile
//! unconditionally, and whether to emit diagnostics.
//!
//! Key behaviors
//! -------------
//! - [`ModelSettings::new`] validates the model name so that it is a single,
//!   safe path component.
//! - [`ModelSettings::named`] applies the defaults: folder
//!   `<temp dir>/gauss_newton_cost`, recompile on, verbose on.
//!
//! Conventions
//! -----------
//! - Recompiling is the default; a cached model is only picked up when the
//!   caller turns `recompile_libraries` off.
use crate::model_cache::errors::{CacheError, CacheResult};
use std::path::{Path, PathBuf};

/// Folder name appended to the system temp dir for the default cache.
pub const DEFAULT_FOLDER_NAME: &str = "gauss_newton_cost";

/// Lifecycle configuration for the intermediate and final models.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSettings {
    model_name: String,
    model_folder: PathBuf,
    pub recompile_libraries: bool,
    pub verbose: bool,
}

impl ModelSettings {
    /// Build validated settings.
    ///
    /// # Errors
    /// [`CacheError::InvalidModelName`] when `model_name` is empty, `.`/`..`,
    /// or contains characters outside `[A-Za-z0-9_.-]`.
    pub fn new(
        model_name: impl Into<String>, model_folder: impl Into<PathBuf>, recompile_libraries: bool,
        verbose: bool,
    ) -> CacheResult<Self> {
        let model_name = model_name.into();
        validate_model_name(&model_name)?;
        Ok(Self { model_name, model_folder: model_folder.into(), recompile_libraries, verbose })
    }

    /// Settings for `model_name` with the default folder and flags.
    pub fn named(model_name: impl Into<String>) -> CacheResult<Self> {
        Self::new(model_name, default_model_folder(), true, true)
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn model_folder(&self) -> &Path {
        &self.model_folder
    }

    pub fn with_model_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.model_folder = folder.into();
        self
    }

    pub fn with_recompile(mut self, recompile_libraries: bool) -> Self {
        self.recompile_libraries = recompile_libraries;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// `<temp dir>/gauss_newton_cost`.
pub fn default_model_folder() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_FOLDER_NAME)
}

fn validate_model_name(name: &str) -> CacheResult<()> {
    let invalid = |reason| Err(CacheError::InvalidModelName { name: name.to_string(), reason });
    if name.is_empty() {
        return invalid("name must not be empty");
    }
    if name == "." || name == ".." {
        return invalid("name must not be a relative path component");
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')) {
        return invalid("only ASCII letters, digits, '_', '-' and '.' are allowed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Defaults applied by `ModelSettings::named`.
    // - Model name validation.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the default folder and flags.
    //
    // Given
    // -----
    // - `ModelSettings::named("pendulum")`.
    //
    // Expect
    // ------
    // - Folder `<temp>/gauss_newton_cost`, recompile and verbose both on.
    fn named_applies_defaults() {
        // Act
        let settings = ModelSettings::named("pendulum").unwrap();

        // Assert
        assert_eq!(settings.model_name(), "pendulum");
        assert_eq!(settings.model_folder(), std::env::temp_dir().join("gauss_newton_cost"));
        assert!(settings.recompile_libraries);
        assert!(settings.verbose);
    }

    #[test]
    // Purpose
    // -------
    // Ensure names that are not a single safe path component are rejected.
    //
    // Given
    // -----
    // - "", "..", "a/b", and "bad name".
    //
    // Expect
    // ------
    // - Each yields `CacheError::InvalidModelName`; "cart-pole_v2.1" is accepted.
    fn model_name_validation_rejects_unsafe_names() {
        // Act / Assert
        for name in ["", "..", "a/b", "bad name"] {
            match ModelSettings::named(name) {
                Err(CacheError::InvalidModelName { .. }) => {}
                other => panic!("Expected InvalidModelName for {name:?}, got {other:?}"),
            }
        }
        assert!(ModelSettings::named("cart-pole_v2.1").is_ok());
    }
}
