//! automatic_differentiation::model — value and Jacobian evaluation.
//!
//! Purpose
//! -------
//! Evaluate a [`TapedFunction`] at concrete inputs. An [`AdModel`] owns the
//! function, the [`ModelSignature`] it was built or loaded with, and its own
//! `f64`/`Dual64` workspaces, so evaluations allocate nothing beyond their
//! returned arrays and the residual vectors the function produces.
//!
//! Key behaviors
//! -------------
//! - [`AdModel::evaluate`]: one `f64` evaluation, returning the residual.
//! - [`AdModel::jacobian`]: forward mode with `num_dual::Dual64`, one
//!   evaluation per tape-input entry seeded with a unit derivative, returning
//!   `∂residual/∂tape_input` (`output_dim × input_dim`).
//! - [`AdModel::evaluate_with_jacobian`]: both, reading the residual from the
//!   real parts of the dual sweeps.
//!
//! Invariants & assumptions
//! ------------------------
//! - Parameters enter as duals with zero derivative and are never
//!   differentiated.
//! - Inputs with the wrong length, residuals whose length differs from the
//!   signature, and panics in the residual body are reported as [`AdError`]s.
//!
//! Conventions
//! -----------
//! - Jacobian column `j` corresponds to `tape_input[j]`; rows follow the
//!   residual order chosen by the function.
use crate::automatic_differentiation::{
    errors::{AdError, AdResult},
    generate::{TapedFunction, guarded},
};
use ndarray::{Array1, Array2, ArrayView1};
use num_dual::Dual64;
use serde::{Deserialize, Serialize};

/// Dimensions a model was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSignature {
    pub input_dim: usize,
    pub param_dim: usize,
    pub output_dim: usize,
}

impl ModelSignature {
    /// Reason this signature cannot describe `function`, if any.
    pub fn mismatch<F: TapedFunction + ?Sized>(&self, function: &F) -> Option<String> {
        if self.output_dim == 0 {
            return Some("signature declares an empty residual".to_string());
        }
        if self.input_dim != function.input_dim() {
            return Some(format!(
                "input dimension {} (expected {})",
                self.input_dim,
                function.input_dim()
            ));
        }
        if self.param_dim != function.param_dim() {
            return Some(format!(
                "parameter dimension {} (expected {})",
                self.param_dim,
                function.param_dim()
            ));
        }
        match function.expected_output_dim() {
            Some(expected) if expected != self.output_dim => Some(format!(
                "residual dimension {} (expected {expected})",
                self.output_dim
            )),
            _ => None,
        }
    }
}

/// A residual function plus its signature and evaluation workspace.
#[derive(Debug, Clone)]
pub struct AdModel<F> {
    name: String,
    function: F,
    signature: ModelSignature,
    values: Vec<f64>,
    params: Vec<f64>,
    dual_values: Vec<Dual64>,
    dual_params: Vec<Dual64>,
}

impl<F: TapedFunction> AdModel<F> {
    /// Wrap `function` with a signature from [`build_model`] or from a
    /// checked cache artifact.
    ///
    /// [`build_model`]: crate::automatic_differentiation::build_model
    pub fn new(name: impl Into<String>, function: F, signature: ModelSignature) -> Self {
        Self {
            name: name.into(),
            function,
            signature,
            values: vec![0.0; signature.input_dim],
            params: vec![0.0; signature.param_dim],
            dual_values: vec![Dual64::from(0.0); signature.input_dim],
            dual_params: vec![Dual64::from(0.0); signature.param_dim],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn function(&self) -> &F {
        &self.function
    }

    pub fn signature(&self) -> ModelSignature {
        self.signature
    }

    pub fn input_dim(&self) -> usize {
        self.signature.input_dim
    }

    pub fn param_dim(&self) -> usize {
        self.signature.param_dim
    }

    pub fn output_dim(&self) -> usize {
        self.signature.output_dim
    }

    /// Residual at `(tape_input, params)`.
    ///
    /// # Errors
    /// - [`AdError::InputDimMismatch`] / [`AdError::ParameterDimMismatch`]
    ///   when the slices do not match the signature.
    /// - [`AdError::ResidualDimMismatch`] / [`AdError::ResidualPanicked`]
    ///   from the residual body.
    pub fn evaluate(
        &mut self, tape_input: ArrayView1<'_, f64>, params: ArrayView1<'_, f64>,
    ) -> AdResult<Array1<f64>> {
        self.load(&tape_input, &params)?;
        self.value_sweep()
    }

    /// Jacobian `∂residual/∂tape_input` at `(tape_input, params)`.
    pub fn jacobian(
        &mut self, tape_input: ArrayView1<'_, f64>, params: ArrayView1<'_, f64>,
    ) -> AdResult<Array2<f64>> {
        self.load(&tape_input, &params)?;
        Ok(self.dual_sweeps()?.1)
    }

    /// Residual and Jacobian from the same dual sweeps.
    pub fn evaluate_with_jacobian(
        &mut self, tape_input: ArrayView1<'_, f64>, params: ArrayView1<'_, f64>,
    ) -> AdResult<(Array1<f64>, Array2<f64>)> {
        self.load(&tape_input, &params)?;
        self.dual_sweeps()
    }

    // ---- Helper methods ----

    /// Check lengths and copy the arguments into the `f64` workspace.
    fn load(
        &mut self, tape_input: &ArrayView1<'_, f64>, params: &ArrayView1<'_, f64>,
    ) -> AdResult<()> {
        if tape_input.len() != self.input_dim() {
            return Err(AdError::InputDimMismatch {
                model: self.name.clone(),
                expected: self.input_dim(),
                found: tape_input.len(),
            });
        }
        if params.len() != self.param_dim() {
            return Err(AdError::ParameterDimMismatch {
                model: self.name.clone(),
                expected: self.param_dim(),
                found: params.len(),
            });
        }
        self.values.iter_mut().zip(tape_input.iter()).for_each(|(dst, &src)| *dst = src);
        self.params.iter_mut().zip(params.iter()).for_each(|(dst, &src)| *dst = src);
        Ok(())
    }

    fn check_output(&self, found: usize) -> AdResult<()> {
        if found != self.output_dim() {
            return Err(AdError::ResidualDimMismatch {
                model: self.name.clone(),
                expected: self.output_dim(),
                found,
            });
        }
        Ok(())
    }

    fn value_sweep(&self) -> AdResult<Array1<f64>> {
        let residual = guarded(&self.name, || self.function.eval(&self.values, &self.params))?;
        self.check_output(residual.len())?;
        Ok(Array1::from(residual))
    }

    /// One `Dual64` evaluation per tape-input entry; column `col` is seeded
    /// with `eps = 1`.
    fn dual_sweeps(&mut self) -> AdResult<(Array1<f64>, Array2<f64>)> {
        let (rows, cols) = (self.output_dim(), self.input_dim());
        if cols == 0 {
            return Ok((self.value_sweep()?, Array2::zeros((rows, 0))));
        }

        for (dual, &p) in self.dual_params.iter_mut().zip(&self.params) {
            *dual = Dual64::from(p);
        }
        let mut residual = Array1::zeros(rows);
        let mut jac = Array2::zeros((rows, cols));

        for col in 0..cols {
            for (j, (dual, &v)) in self.dual_values.iter_mut().zip(&self.values).enumerate() {
                *dual = if j == col { Dual64::from(v).derivative() } else { Dual64::from(v) };
            }
            let column =
                guarded(&self.name, || self.function.eval(&self.dual_values, &self.dual_params))?;
            self.check_output(column.len())?;
            for (row, entry) in column.iter().enumerate() {
                residual[row] = entry.re;
                jac[[row, col]] = entry.eps;
            }
        }
        Ok((residual, jac))
    }
}
