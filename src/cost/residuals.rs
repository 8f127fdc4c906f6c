//! cost::residuals — the user-supplied residual strategy.
//!
//! Purpose
//! -------
//! Define what a problem author implements ([`GaussNewtonResidual`]) and how
//! it is presented to the differentiation engine. The cost is `0.5 · ‖r‖²`
//! of the residuals defined here.
//!
//! Key behaviors
//! -------------
//! - `intermediate_residual` is required; `final_residual` defaults to a
//!   single zero entry, so an unspecialized final cost is identically `0`.
//! - Parameter hooks default to empty vectors of declared length `0`.
//! - Residual bodies are generic over [`Scalar`]: the engine runs them on
//!   `f64` for values and on dual numbers for Jacobian columns.
//! - [`IntermediateResidualFunction`] and [`FinalResidualFunction`] split the
//!   tape input into `[t, x, u]` / `[t, x]` and forward to the strategy.
//!
//! Invariants & assumptions
//! ------------------------
//! - `num_*_parameters()` must equal the length of the vectors returned by
//!   `*_parameters(t)` for every `t`; the engine checks this on each call.
//! - The residual length must not depend on the evaluation point.
//! - Indexing `state`/`input` past the configured dimensions is reported as
//!   an initialization error.
use crate::automatic_differentiation::generate::{Scalar, TapedFunction};
use crate::cost::errors::{CostError, CostResult};
use ndarray::Array1;
use std::sync::Arc;

/// Residual definitions of a Gauss-Newton cost.
pub trait GaussNewtonResidual {
    /// Intermediate residual `r(t, x, u; p)`.
    fn intermediate_residual<S: Scalar>(
        &self, time: S, state: &[S], input: &[S], params: &[S],
    ) -> Vec<S>;

    /// Final residual `r_f(t, x; p)`. Defaults to `[0]`.
    fn final_residual<S: Scalar>(&self, _time: S, _state: &[S], _params: &[S]) -> Vec<S> {
        vec![S::from(0.0)]
    }

    /// Intermediate parameters at time `t`.
    fn intermediate_parameters(&self, _time: f64) -> Array1<f64> {
        Array1::zeros(0)
    }

    /// Final parameters at time `t`.
    fn final_parameters(&self, _time: f64) -> Array1<f64> {
        Array1::zeros(0)
    }

    fn num_intermediate_parameters(&self) -> usize {
        0
    }

    fn num_final_parameters(&self) -> usize {
        0
    }

    /// Declared intermediate residual length, checked at generation when set.
    fn intermediate_residual_dim(&self) -> Option<usize> {
        None
    }

    /// Declared final residual length, checked at generation when set.
    fn final_residual_dim(&self) -> Option<usize> {
        None
    }
}

/// State and input dimensions of a cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostDimensions {
    state_dim: usize,
    input_dim: usize,
}

impl CostDimensions {
    /// # Errors
    /// [`CostError::InvalidStateDim`] when `state_dim == 0`.
    pub fn new(state_dim: usize, input_dim: usize) -> CostResult<Self> {
        if state_dim == 0 {
            return Err(CostError::InvalidStateDim { state_dim });
        }
        Ok(Self { state_dim, input_dim })
    }

    pub fn state_dim(&self) -> usize {
        self.state_dim
    }

    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    /// `1 + nx + nu`.
    pub fn intermediate_tape_dim(&self) -> usize {
        1 + self.state_dim + self.input_dim
    }

    /// `1 + nx`.
    pub fn final_tape_dim(&self) -> usize {
        1 + self.state_dim
    }
}

/// Intermediate residual seen as a [`TapedFunction`] of `[t, x, u]`.
#[derive(Debug)]
pub struct IntermediateResidualFunction<R> {
    residual: Arc<R>,
    dims: CostDimensions,
}

impl<R> IntermediateResidualFunction<R> {
    pub fn new(residual: Arc<R>, dims: CostDimensions) -> Self {
        Self { residual, dims }
    }

    pub fn strategy(&self) -> &Arc<R> {
        &self.residual
    }
}

impl<R> Clone for IntermediateResidualFunction<R> {
    fn clone(&self) -> Self {
        Self { residual: Arc::clone(&self.residual), dims: self.dims }
    }
}

impl<R: GaussNewtonResidual> TapedFunction for IntermediateResidualFunction<R> {
    fn input_dim(&self) -> usize {
        self.dims.intermediate_tape_dim()
    }

    fn param_dim(&self) -> usize {
        self.residual.num_intermediate_parameters()
    }

    fn expected_output_dim(&self) -> Option<usize> {
        self.residual.intermediate_residual_dim()
    }

    fn eval<S: Scalar>(&self, inputs: &[S], params: &[S]) -> Vec<S> {
        let (state, input) = inputs[1..].split_at(self.dims.state_dim());
        self.residual.intermediate_residual(inputs[0], state, input, params)
    }
}

/// Final residual seen as a [`TapedFunction`] of `[t, x]`.
#[derive(Debug)]
pub struct FinalResidualFunction<R> {
    residual: Arc<R>,
    dims: CostDimensions,
}

impl<R> FinalResidualFunction<R> {
    pub fn new(residual: Arc<R>, dims: CostDimensions) -> Self {
        Self { residual, dims }
    }

    pub fn strategy(&self) -> &Arc<R> {
        &self.residual
    }
}

impl<R> Clone for FinalResidualFunction<R> {
    fn clone(&self) -> Self {
        Self { residual: Arc::clone(&self.residual), dims: self.dims }
    }
}

impl<R: GaussNewtonResidual> TapedFunction for FinalResidualFunction<R> {
    fn input_dim(&self) -> usize {
        self.dims.final_tape_dim()
    }

    fn param_dim(&self) -> usize {
        self.residual.num_final_parameters()
    }

    fn expected_output_dim(&self) -> Option<usize> {
        self.residual.final_residual_dim()
    }

    fn eval<S: Scalar>(&self, inputs: &[S], params: &[S]) -> Vec<S> {
        self.residual.final_residual(inputs[0], &inputs[1..], params)
    }
}
