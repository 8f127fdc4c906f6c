//! automatic_differentiation::derivative_check — taped vs. numeric Jacobians.
//!
//! Diagnostic helper for residual authors: compares the dual-number Jacobian
//! of an [`AdModel`] with a central-difference Jacobian from `finitediff`,
//! row by row. Nothing in the evaluation path depends on it.
//!
//! Errors raised while evaluating inside the finite-difference closure are
//! routed through a `RefCell` side channel and surfaced after the sweep, the
//! same way the optimizer layer handles objective failures.
use crate::automatic_differentiation::{
    errors::{AdError, AdResult},
    generate::TapedFunction,
    model::AdModel,
};
use finitediff::FiniteDiff;
use ndarray::{Array1, Array2, ArrayView1};
use std::cell::RefCell;

/// Outcome of [`check_jacobian`].
#[derive(Debug, Clone, PartialEq)]
pub struct JacobianCheck {
    pub taped: Array2<f64>,
    pub reference: Array2<f64>,
    /// Largest absolute entry-wise difference.
    pub max_abs_error: f64,
    /// `(row, col)` of [`JacobianCheck::max_abs_error`].
    pub worst_entry: (usize, usize),
}

impl JacobianCheck {
    /// `true` when every entry agrees within `atol + rtol * |reference|`.
    pub fn agrees(&self, atol: f64, rtol: f64) -> bool {
        self.taped
            .iter()
            .zip(self.reference.iter())
            .all(|(&t, &r)| (t - r).abs() <= atol + rtol * r.abs())
    }
}

/// Compare `model`'s Jacobian with central differences at `(tape_input, params)`.
///
/// # Errors
/// - Dimension errors from [`AdModel`].
/// - [`AdError::NonFiniteReference`] when the numeric Jacobian contains a
///   non-finite entry (e.g. evaluation at a singularity).
pub fn check_jacobian<F: TapedFunction + Clone>(
    model: &AdModel<F>, tape_input: ArrayView1<'_, f64>, params: ArrayView1<'_, f64>,
) -> AdResult<JacobianCheck> {
    let mut scratch = model.clone();
    let taped = scratch.jacobian(tape_input, params)?;
    let (rows, cols) = taped.dim();

    let scratch = RefCell::new(scratch);
    let closure_err: RefCell<Option<AdError>> = RefCell::new(None);
    let z0: Array1<f64> = tape_input.to_owned();
    let mut reference = Array2::zeros((rows, cols));

    for row in 0..rows {
        let residual_row = |z: &Array1<f64>| match scratch.borrow_mut().evaluate(z.view(), params) {
            Ok(r) => r[row],
            Err(err) => {
                closure_err.replace(Some(err));
                f64::NAN
            }
        };
        let grad = z0.central_diff(&residual_row);
        if let Some(err) = closure_err.take() {
            return Err(err);
        }
        reference.row_mut(row).assign(&grad);
    }

    if let Some(((row, col), &value)) = reference.indexed_iter().find(|(_, v)| !v.is_finite()) {
        return Err(AdError::NonFiniteReference { row, col, value });
    }

    let mut max_abs_error = 0.0;
    let mut worst_entry = (0, 0);
    for ((idx, &t), &r) in taped.indexed_iter().zip(reference.iter()) {
        let err = (t - r).abs();
        if err > max_abs_error {
            max_abs_error = err;
            worst_entry = idx;
        }
    }

    Ok(JacobianCheck { taped, reference, max_abs_error, worst_entry })
}
