//! model_cache — lifecycle and persistence of generated models.
//!
//! Purpose
//! -------
//! Own everything between "here is a residual definition" and "here is an
//! evaluable [`AdModel`](crate::automatic_differentiation::AdModel)": naming,
//! cache layout, signature checks, and the generate-or-load decision.
//!
//! Key behaviors
//! -------------
//! - [`ModelSettings`]: model name, folder, recompile and verbose flags.
//! - [`ModelCache`]: pluggable storage with [`FileSystemCache`] (JSON files)
//!   and [`InMemoryCache`] backends.
//! - [`generate_or_load`]: the lifecycle decision, returning a model and its
//!   [`ModelOrigin`].
//!
//! Invariants & assumptions
//! ------------------------
//! - File I/O happens only here, and only during initialization.
//! - Loaded artifacts are checked for format version and dimensions only.
pub mod cache;
pub mod errors;
pub mod file_system;
pub mod lifecycle;
pub mod memory;
pub mod settings;

pub use self::cache::{FORMAT_VERSION, ModelArtifact, ModelCache, ModelKey, ModelKind};
pub use self::errors::{CacheError, CacheResult};
pub use self::file_system::FileSystemCache;
pub use self::lifecycle::{ModelOrigin, generate_or_load};
pub use self::memory::InMemoryCache;
pub use self::settings::{DEFAULT_FOLDER_NAME, ModelSettings, default_model_folder};
