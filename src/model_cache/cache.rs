//! model_cache::cache — cache keys, artifacts and the storage trait.
//!
//! Purpose
//! -------
//! Describe what is stored for each generated model and how storage backends
//! are plugged in. The lifecycle manager only talks to [`ModelCache`]; the
//! file-system and in-memory backends live in sibling modules.
//!
//! Key behaviors
//! -------------
//! - [`ModelKey`] identifies an entry by model name, folder and kind.
//! - [`ModelArtifact`] records the [`ModelSignature`] observed at generation
//!   together with a format version and the library name, so that a loaded
//!   entry can be checked before use and the trial evaluation skipped.
//! - [`ModelArtifact::check`] returns the first reason an artifact cannot be
//!   used for a given function, or `None` when it matches.
//!
//! Invariants & assumptions
//! ------------------------
//! - Only dimensions and the format version are compared. A cached model
//!   whose residual body changed without a dimension change is accepted;
//!   a residual whose length changed is caught on its first evaluation.
//! - Artifacts hold integers and strings only, so every stored artifact
//!   parses back.
use crate::automatic_differentiation::{generate::TapedFunction, model::ModelSignature};
use crate::model_cache::{errors::CacheResult, settings::ModelSettings};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Artifact layout version; bump when [`ModelArtifact`] changes.
pub const FORMAT_VERSION: u32 = 2;

/// Which of the two cost models an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    Intermediate,
    Final,
}

impl ModelKind {
    pub fn suffix(&self) -> &'static str {
        match self {
            ModelKind::Intermediate => "intermediate",
            ModelKind::Final => "final",
        }
    }
}

/// Identity of one cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelKey {
    pub model_name: String,
    pub model_folder: PathBuf,
    pub kind: ModelKind,
}

impl ModelKey {
    pub fn new(settings: &ModelSettings, kind: ModelKind) -> Self {
        Self {
            model_name: settings.model_name().to_string(),
            model_folder: settings.model_folder().to_path_buf(),
            kind,
        }
    }

    /// `<model_name>_<kind>`, e.g. `pendulum_intermediate`.
    pub fn library_name(&self) -> String {
        format!("{}_{}", self.model_name, self.kind.suffix())
    }
}

/// A stored model description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    format_version: u32,
    library_name: String,
    signature: ModelSignature,
}

impl ModelArtifact {
    pub fn new(key: &ModelKey, signature: ModelSignature) -> Self {
        Self { format_version: FORMAT_VERSION, library_name: key.library_name(), signature }
    }

    pub fn format_version(&self) -> u32 {
        self.format_version
    }

    pub fn library_name(&self) -> &str {
        &self.library_name
    }

    pub fn signature(&self) -> ModelSignature {
        self.signature
    }

    /// Reason this artifact cannot serve `function` under `key`, if any.
    pub fn check<F: TapedFunction + ?Sized>(&self, key: &ModelKey, function: &F) -> Option<String> {
        if self.format_version != FORMAT_VERSION {
            return Some(format!(
                "format version {} (expected {FORMAT_VERSION})",
                self.format_version
            ));
        }
        let library_name = key.library_name();
        if self.library_name != library_name {
            return Some(format!(
                "library name '{}' (expected '{library_name}')",
                self.library_name
            ));
        }
        self.signature.mismatch(function)
    }
}

/// Storage backend for generated models.
pub trait ModelCache {
    /// Fetch the entry for `key`; `Ok(None)` when absent.
    fn load(&self, key: &ModelKey) -> CacheResult<Option<ModelArtifact>>;

    /// Insert or replace the entry for `key`.
    fn store(&self, key: &ModelKey, artifact: &ModelArtifact) -> CacheResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automatic_differentiation::generate::{Scalar, build_model};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Library naming from settings and kind.
    // - Artifact checks against the function being loaded for.
    // -------------------------------------------------------------------------

    struct Affine {
        inputs: usize,
        params: usize,
    }

    impl TapedFunction for Affine {
        fn input_dim(&self) -> usize {
            self.inputs
        }

        fn param_dim(&self) -> usize {
            self.params
        }

        fn eval<S: Scalar>(&self, inputs: &[S], params: &[S]) -> Vec<S> {
            let total = inputs.iter().chain(params).fold(S::from(0.0), |acc, &v| acc + v);
            vec![total]
        }
    }

    fn key() -> ModelKey {
        let settings = ModelSettings::new("demo", "/tmp/unused", false, false).unwrap();
        ModelKey::new(&settings, ModelKind::Final)
    }

    fn artifact_for(function: Affine) -> ModelArtifact {
        ModelArtifact::new(&key(), build_model("demo_final", function).unwrap().signature())
    }

    #[test]
    // Purpose
    // -------
    // Verify the library name format.
    //
    // Given
    // -----
    // - Model "demo", kind `Final`.
    //
    // Expect
    // ------
    // - "demo_final".
    fn library_name_joins_model_name_and_kind() {
        assert_eq!(key().library_name(), "demo_final");
    }

    #[test]
    // Purpose
    // -------
    // Ensure an artifact matches the function it was generated from and is
    // rejected for a function with a different parameter count.
    //
    // Given
    // -----
    // - An artifact generated from `Affine { inputs: 2, params: 1 }`.
    //
    // Expect
    // ------
    // - `check` is `None` for the same function and mentions "parameter
    //   dimension" for `params: 2`.
    fn check_accepts_matching_and_rejects_resized_function() {
        // Arrange
        let artifact = artifact_for(Affine { inputs: 2, params: 1 });

        // Act
        let same = artifact.check(&key(), &Affine { inputs: 2, params: 1 });
        let other = artifact.check(&key(), &Affine { inputs: 2, params: 2 });

        // Assert
        assert_eq!(same, None);
        let reason = other.expect("Resized function must be rejected");
        assert!(reason.contains("parameter dimension"), "Got: {reason}");
    }

    #[test]
    // Purpose
    // -------
    // Check that an artifact written by another format version is rejected.
    //
    // Given
    // -----
    // - A valid artifact whose version field is bumped.
    //
    // Expect
    // ------
    // - `check` reports the format version.
    fn check_rejects_other_format_version() {
        // Arrange
        let mut artifact = artifact_for(Affine { inputs: 1, params: 0 });
        artifact.format_version = FORMAT_VERSION + 1;

        // Act
        let reason = artifact.check(&key(), &Affine { inputs: 1, params: 0 });

        // Assert
        assert!(reason.is_some_and(|r| r.contains("format version")));
    }

    #[test]
    // Purpose
    // -------
    // Ensure an artifact declaring zero residual entries is never accepted,
    // even when its input and parameter dimensions match.
    //
    // Given
    // -----
    // - An artifact whose signature has `output_dim: 0`, parsed from JSON.
    //
    // Expect
    // ------
    // - `check` reports "empty residual".
    fn check_rejects_empty_residual_signature() {
        // Arrange
        let text = format!(
            r#"{{"format_version":{FORMAT_VERSION},"library_name":"demo_final",
            "signature":{{"input_dim":1,"param_dim":0,"output_dim":0}}}}"#
        );
        let artifact: ModelArtifact = serde_json::from_str(&text).unwrap();

        // Act
        let reason = artifact.check(&key(), &Affine { inputs: 1, params: 0 });

        // Assert
        assert!(reason.is_some_and(|r| r.contains("empty residual")));
    }
}
