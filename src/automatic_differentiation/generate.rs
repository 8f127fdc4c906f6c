//! automatic_differentiation::generate — scalar seam and model construction.
//!
//! Purpose
//! -------
//! Bridge between user code and the dual-number engine. A [`TapedFunction`]
//! declares its tape-input and parameter sizes and writes its residual once,
//! generically over a [`Scalar`]; [`build_model`] evaluates it once, checks
//! the result, and returns an [`AdModel`] carrying the observed signature.
//!
//! Key behaviors
//! -------------
//! - The same body runs on `f64` (values) and on `num_dual::Dual64`
//!   (one Jacobian column per evaluation).
//! - A panic inside the body (typically indexing past the declared state or
//!   input arity) is caught and reported as [`AdError::ResidualPanicked`],
//!   both here and on every later evaluation.
//! - Empty residuals and residuals of the wrong declared length are
//!   rejected.
//!
//! Invariants & assumptions
//! ------------------------
//! - The construction run uses an all-zero tape input and all-zero
//!   parameters. Non-finite values at that point are fine; only the residual
//!   length is inspected.
//! - Bodies may branch on values, but the residual length must not depend on
//!   them; every evaluation re-checks it.
use crate::automatic_differentiation::{
    errors::{AdError, AdResult},
    model::{AdModel, ModelSignature},
};
use num_dual::DualNum;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Number type a residual body is written against.
///
/// Implemented by `f64` and by every `num_dual` dual over `f64`. Constants
/// are lifted with `S::from(value)`; mixed arithmetic with `f64` works with
/// the scalar on the left (`x * 2.0`, `x - 1.0`).
pub trait Scalar: DualNum<f64> + Copy {}

impl<T: DualNum<f64> + Copy> Scalar for T {}

/// A function of a differentiated tape input and constant parameters.
pub trait TapedFunction {
    /// Length of the differentiated tape input.
    fn input_dim(&self) -> usize;

    /// Length of the non-differentiated parameter vector.
    fn param_dim(&self) -> usize;

    /// Declared residual length, when known in advance.
    fn expected_output_dim(&self) -> Option<usize> {
        None
    }

    /// Residual in terms of `inputs` and `params`.
    fn eval<S: Scalar>(&self, inputs: &[S], params: &[S]) -> Vec<S>;
}

/// build_model — evaluate, check and wrap `function`.
///
/// Parameters
/// ----------
/// - `name`: `&str`
///   Model name used in error messages and by the returned model.
/// - `function`: `F`
///   The function to wrap; owned by the returned model.
///
/// Returns
/// -------
/// `AdResult<AdModel<F>>`
///   A model whose signature records the observed residual length.
///
/// Errors
/// ------
/// - `AdError::ResidualPanicked` when the function body panics.
/// - `AdError::EmptyResidual` when no residual entries are returned.
/// - `AdError::ResidualDimMismatch` when the length differs from
///   [`TapedFunction::expected_output_dim`].
///
/// Panics
/// ------
/// - Never panics; panics raised by `function` are caught.
pub fn build_model<F: TapedFunction>(name: &str, function: F) -> AdResult<AdModel<F>> {
    let inputs = vec![0.0_f64; function.input_dim()];
    let params = vec![0.0_f64; function.param_dim()];
    let residual = guarded(name, || function.eval(&inputs, &params))?;

    if residual.is_empty() {
        return Err(AdError::EmptyResidual { model: name.to_string() });
    }
    if let Some(expected) = function.expected_output_dim() {
        if residual.len() != expected {
            return Err(AdError::ResidualDimMismatch {
                model: name.to_string(),
                expected,
                found: residual.len(),
            });
        }
    }

    let signature = ModelSignature {
        input_dim: inputs.len(),
        param_dim: params.len(),
        output_dim: residual.len(),
    };
    Ok(AdModel::new(name, function, signature))
}

/// Run a residual body, turning a panic into [`AdError::ResidualPanicked`].
pub(crate) fn guarded<T>(model: &str, body: impl FnOnce() -> T) -> AdResult<T> {
    panic::catch_unwind(AssertUnwindSafe(body)).map_err(|payload| AdError::ResidualPanicked {
        model: model.to_string(),
        message: panic_message(&*payload),
    })
}

// ---- Helper methods ----

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
