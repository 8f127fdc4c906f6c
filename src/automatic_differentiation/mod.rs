//! automatic_differentiation — forward-mode differentiation with dual numbers.
//!
//! Purpose
//! -------
//! Turn a residual function written once, generically over a [`Scalar`],
//! into a reusable model that returns the residual value and its Jacobian
//! with respect to the tape input. Derivatives come from `num_dual::Dual64`;
//! the rest of the crate treats this module as an opaque engine.
//!
//! Key behaviors
//! -------------
//! - [`generate`]: the [`Scalar`] bound, the [`TapedFunction`] trait, and
//!   [`build_model`], which runs the function once and rejects malformed
//!   residuals.
//! - [`model`]: [`AdModel`], the evaluator with private workspaces, and
//!   [`ModelSignature`], the dimensions it was built with.
//! - [`derivative_check`]: finite-difference cross-check for residual authors.
//!
//! Invariants & assumptions
//! ------------------------
//! - Parameters are inputs that are never differentiated.
//! - Each model owns its function and workspaces; clones evaluate
//!   independently.
//!
//! Downstream usage
//! ----------------
//! - `model_cache` persists [`ModelSignature`] values.
//! - `cost` wraps the intermediate and final residuals in [`TapedFunction`]
//!   adapters and evaluates them via [`AdModel`].
pub mod derivative_check;
pub mod errors;
pub mod generate;
pub mod model;

pub use self::derivative_check::{JacobianCheck, check_jacobian};
pub use self::errors::{AdError, AdResult};
pub use self::generate::{Scalar, TapedFunction, build_model};
pub use self::model::{AdModel, ModelSignature};
