//! cost::validation — call-site checks and approximation diagnostics.
//!
//! Purpose
//! -------
//! Keep the shape checks of the cost engine in one place and provide
//! diagnostics for assembled approximations: finiteness of every block and
//! positive semidefiniteness of the stacked Hessian.
//!
//! Key behaviors
//! -------------
//! - [`validate_state`], [`validate_input`], [`validate_parameters`] return
//!   the matching [`CostError`] on a length mismatch; [`validate_time`]
//!   rejects NaN and infinite times.
//! - [`check_approximation`] scans blocks in the order `f`, `dfdx`, `dfdu`,
//!   `dfdxx`, `dfduu`, `dfdux` and reports the first non-finite entry, then
//!   checks the smallest eigenvalue of the stacked Hessian.
//! - [`min_eigenvalue`] copies an `ndarray` matrix into a
//!   `nalgebra::DMatrix` and runs a symmetric eigendecomposition.
//!
//! Conventions
//! -----------
//! - Gauss-Newton Hessians are PSD only up to round-off, so the PSD check
//!   takes an absolute tolerance scaled by the largest diagonal entry.
use crate::cost::{
    approximation::QuadraticApproximation,
    errors::{CostError, CostResult},
};
use nalgebra::DMatrix;
use ndarray::{Array2, ArrayView1};

/// Reject NaN or infinite evaluation times.
pub fn validate_time(time: f64) -> CostResult<()> {
    if !time.is_finite() {
        return Err(CostError::InvalidTime { value: time });
    }
    Ok(())
}

pub fn validate_state(state: &ArrayView1<'_, f64>, state_dim: usize) -> CostResult<()> {
    if state.len() != state_dim {
        return Err(CostError::StateDimMismatch { expected: state_dim, found: state.len() });
    }
    Ok(())
}

pub fn validate_input(input: &ArrayView1<'_, f64>, input_dim: usize) -> CostResult<()> {
    if input.len() != input_dim {
        return Err(CostError::InputDimMismatch { expected: input_dim, found: input.len() });
    }
    Ok(())
}

/// Check a parameter vector against the count fixed at model generation.
pub fn validate_parameters(
    params: &ArrayView1<'_, f64>, expected: usize, model: &'static str,
) -> CostResult<()> {
    if params.len() != expected {
        return Err(CostError::ParameterDimMismatch { model, expected, found: params.len() });
    }
    Ok(())
}

/// Finiteness and PSD check of an assembled approximation.
///
/// # Errors
/// - [`CostError::NonFiniteApproximation`] naming the first offending block.
/// - [`CostError::NotPositiveSemidefinite`] when the smallest eigenvalue of
///   the stacked Hessian is below `-rel_tol · max(1, max_diag)`.
pub fn check_approximation(approx: &QuadraticApproximation, rel_tol: f64) -> CostResult<()> {
    if !approx.f.is_finite() {
        return Err(CostError::NonFiniteApproximation { block: "f", index: 0, value: approx.f });
    }
    let vectors = [("dfdx", &approx.dfdx), ("dfdu", &approx.dfdu)];
    for (block, values) in vectors {
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(CostError::NonFiniteApproximation { block, index, value });
        }
    }
    let matrices = [("dfdxx", &approx.dfdxx), ("dfduu", &approx.dfduu), ("dfdux", &approx.dfdux)];
    for (block, values) in matrices {
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(CostError::NonFiniteApproximation { block, index, value });
        }
    }

    let hess = approx.stacked_hessian();
    let scale = hess.diag().iter().fold(1.0_f64, |acc, &d| acc.max(d.abs()));
    let tol = rel_tol * scale;
    let min_eig = min_eigenvalue(&hess);
    if min_eig < -tol {
        return Err(CostError::NotPositiveSemidefinite { min_eigenvalue: min_eig, tol });
    }
    Ok(())
}

/// Smallest eigenvalue of a symmetric matrix; `+inf` for a `0×0` matrix.
pub fn min_eigenvalue(mat: &Array2<f64>) -> f64 {
    let n = mat.nrows();
    if n == 0 {
        return f64::INFINITY;
    }
    let mut nalg = DMatrix::<f64>::zeros(n, n);
    fill_dmatrix(mat, &mut nalg);
    nalg.symmetric_eigen().eigenvalues.iter().copied().fold(f64::INFINITY, f64::min)
}

// ---- Helper methods ----

/// Column-major copy of a square `ndarray` matrix into a `DMatrix`.
fn fill_dmatrix(mat: &Array2<f64>, nalg: &mut DMatrix<f64>) {
    let n = mat.ncols();
    for j in 0..n {
        for i in 0..n {
            nalg[(i, j)] = mat[[i, j]];
        }
    }
}
