//! model_cache::lifecycle — generate a model or load it from a cache.
//!
//! Purpose
//! -------
//! Decide, once per model at initialization, whether to build the model from
//! its definition (one trial evaluation, then store its signature) or reuse
//! a previously stored signature.
//!
//! Key behaviors
//! -------------
//! - `recompile_libraries = true`: always build and store.
//! - `recompile_libraries = false`: load from the cache; a miss, a read or
//!   parse failure, or an artifact that fails [`ModelArtifact::check`] falls
//!   back to building. These fallbacks are logged as warnings, never
//!   returned as errors.
//! - A store failure after building is returned as an error.
//!
//! Conventions
//! -----------
//! - All diagnostics go through the supplied `slog::Logger`; pass a logger
//!   built with `logging::build_logger(false)` to silence them.
use crate::automatic_differentiation::{
    generate::{TapedFunction, build_model},
    model::AdModel,
};
use crate::model_cache::{
    cache::{ModelArtifact, ModelCache, ModelKey, ModelKind},
    errors::CacheResult,
    settings::ModelSettings,
};
use slog::{Logger, debug, info, warn};

/// How a model was obtained during initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelOrigin {
    /// Built from its definition (and stored).
    Generated,
    /// Signature read from the cache.
    Loaded,
}

/// generate_or_load — obtain the `kind` model for `function`.
///
/// Parameters
/// ----------
/// - `function`: the residual of this model; owned by the returned model.
/// - `kind`: intermediate or final; selects the cache entry.
/// - `settings`: model name, folder and recompile flag.
/// - `cache`: storage backend.
/// - `logger`: diagnostics sink.
///
/// Returns
/// -------
/// The evaluable model together with its [`ModelOrigin`].
///
/// Errors
/// ------
/// - `CacheError::Generation` when building the model fails.
/// - Any error returned by `cache.store` after a successful build.
pub fn generate_or_load<F, C>(
    function: F, kind: ModelKind, settings: &ModelSettings, cache: &C, logger: &Logger,
) -> CacheResult<(AdModel<F>, ModelOrigin)>
where
    F: TapedFunction,
    C: ModelCache + ?Sized,
{
    let key = ModelKey::new(settings, kind);
    let library = key.library_name();
    let log = logger.new(slog::o!("library" => library.clone()));

    if !settings.recompile_libraries {
        match cache.load(&key) {
            Ok(Some(artifact)) => match artifact.check(&key, &function) {
                None => {
                    info!(log, "loaded cached model";
                        "folder" => %key.model_folder.display(),
                        "outputs" => artifact.signature().output_dim);
                    let model = AdModel::new(library, function, artifact.signature());
                    return Ok((model, ModelOrigin::Loaded));
                }
                Some(reason) => {
                    warn!(log, "cached model does not match, regenerating"; "reason" => reason);
                }
            },
            Ok(None) => {
                info!(log, "no cached model found, generating";
                    "folder" => %key.model_folder.display());
            }
            Err(err) => {
                warn!(log, "failed to read cached model, regenerating"; "error" => %err);
            }
        }
    } else {
        debug!(log, "recompile requested");
    }

    let model = build_model(&library, function)?;
    let artifact = ModelArtifact::new(&key, model.signature());
    cache.store(&key, &artifact)?;
    info!(log, "generated model";
        "inputs" => model.input_dim(),
        "params" => model.param_dim(),
        "outputs" => model.output_dim());

    Ok((model, ModelOrigin::Generated))
}
