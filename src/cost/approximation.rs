//! cost::approximation — Gauss-Newton quadratic approximation assembly.
//!
//! Purpose
//! -------
//! Reduce a residual `r` and its Jacobian `J = [J_t | J_x | J_u]` to the
//! local quadratic cost model
//!
//! ```text
//! f     = 0.5 · rᵀr
//! dfdx  = J_xᵀ r        dfdu  = J_uᵀ r
//! dfdxx = J_xᵀ J_x      dfduu = J_uᵀ J_u      dfdux = J_uᵀ J_x
//! ```
//!
//! and package it, together with the evaluation point, residual and full
//! Jacobian, as an [`ApproximationRecord`].
//!
//! Key behaviors
//! -------------
//! - Hessian blocks are Gram products and therefore symmetric positive
//!   semidefinite up to round-off; diagonal blocks are symmetrized exactly.
//! - Second derivatives of the residual are ignored (Gauss-Newton).
//! - Records are tagged with a stage marker ([`Intermediate`] or [`Final`]),
//!   so a time derivative can only be taken from a record of the matching
//!   stage.
//!
//! Conventions
//! -----------
//! - Jacobian column 0 is `∂r/∂t`, columns `1..=nx` are `∂r/∂x`, the
//!   remaining `nu` columns are `∂r/∂u` (absent for final records).
//! - For final records `dfdu`, `dfduu` and `dfdux` are empty (`0`, `0×0`,
//!   `0×nx`).
use crate::cost::errors::{CostError, CostResult};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, s};
use std::marker::PhantomData;

/// Marker for records produced by the intermediate cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intermediate;

/// Marker for records produced by the final cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Final;

/// Stage marker of an [`ApproximationRecord`].
pub trait StageKind: private::Sealed {
    const NAME: &'static str;
}

impl StageKind for Intermediate {
    const NAME: &'static str = "intermediate";
}

impl StageKind for Final {
    const NAME: &'static str = "final";
}

mod private {
    pub trait Sealed {}
    impl Sealed for super::Intermediate {}
    impl Sealed for super::Final {}
}

/// Point `(t, x, u)` an approximation was taken at; `u` is empty for final
/// records.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationPoint {
    pub time: f64,
    pub state: Array1<f64>,
    pub input: Array1<f64>,
}

/// Local quadratic model of the cost.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadraticApproximation {
    pub f: f64,
    pub dfdx: Array1<f64>,
    pub dfdu: Array1<f64>,
    pub dfdxx: Array2<f64>,
    pub dfduu: Array2<f64>,
    pub dfdux: Array2<f64>,
}

impl QuadraticApproximation {
    pub fn state_dim(&self) -> usize {
        self.dfdx.len()
    }

    pub fn input_dim(&self) -> usize {
        self.dfdu.len()
    }

    /// Gradient over `z = [x; u]`.
    pub fn stacked_gradient(&self) -> Array1<f64> {
        let (nx, nu) = (self.state_dim(), self.input_dim());
        let mut grad = Array1::zeros(nx + nu);
        grad.slice_mut(s![..nx]).assign(&self.dfdx);
        grad.slice_mut(s![nx..]).assign(&self.dfdu);
        grad
    }

    /// Hessian over `z = [x; u]`: `[[dfdxx, dfduxᵀ], [dfdux, dfduu]]`.
    pub fn stacked_hessian(&self) -> Array2<f64> {
        let (nx, nu) = (self.state_dim(), self.input_dim());
        let mut hess = Array2::zeros((nx + nu, nx + nu));
        hess.slice_mut(s![..nx, ..nx]).assign(&self.dfdxx);
        hess.slice_mut(s![nx.., nx..]).assign(&self.dfduu);
        hess.slice_mut(s![nx.., ..nx]).assign(&self.dfdux);
        hess.slice_mut(s![..nx, nx..]).assign(&self.dfdux.t());
        hess
    }
}

/// Approximation together with everything it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct ApproximationRecord<K> {
    point: EvaluationPoint,
    residual: Array1<f64>,
    jacobian: Array2<f64>,
    approximation: QuadraticApproximation,
    _kind: PhantomData<K>,
}

pub type IntermediateRecord = ApproximationRecord<Intermediate>;
pub type FinalRecord = ApproximationRecord<Final>;

impl<K: StageKind> ApproximationRecord<K> {
    /// Assemble a record from a residual and its full tape Jacobian.
    ///
    /// # Errors
    /// [`CostError::JacobianShapeMismatch`] unless the Jacobian is
    /// `r.len() × (1 + nx + nu)` for the point's state and input.
    pub(crate) fn assemble(
        point: EvaluationPoint, residual: Array1<f64>, jacobian: Array2<f64>,
    ) -> CostResult<Self> {
        let approximation = assemble_gauss_newton(
            residual.view(),
            jacobian.view(),
            point.state.len(),
            point.input.len(),
        )?;
        Ok(Self { point, residual, jacobian, approximation, _kind: PhantomData })
    }

    /// `"intermediate"` or `"final"`.
    pub fn stage(&self) -> &'static str {
        K::NAME
    }

    pub fn point(&self) -> &EvaluationPoint {
        &self.point
    }

    pub fn residual(&self) -> &Array1<f64> {
        &self.residual
    }

    /// Full Jacobian with respect to the tape input.
    pub fn jacobian(&self) -> &Array2<f64> {
        &self.jacobian
    }

    /// `∂r/∂t`, column 0 of the Jacobian.
    pub fn time_jacobian(&self) -> ArrayView1<'_, f64> {
        self.jacobian.column(0)
    }

    pub fn approximation(&self) -> &QuadraticApproximation {
        &self.approximation
    }

    pub fn into_approximation(self) -> QuadraticApproximation {
        self.approximation
    }

    /// `∂cost/∂t = rᵀ J_t` at the record's point.
    pub fn time_derivative(&self) -> f64 {
        self.residual.dot(&self.time_jacobian())
    }
}

/// `0.5 · rᵀr`.
pub fn half_squared_norm(residual: ArrayView1<'_, f64>) -> f64 {
    0.5 * residual.dot(&residual)
}

/// Gauss-Newton reduction of `(r, J)` with `J` of width `1 + nx + nu`.
pub(crate) fn assemble_gauss_newton(
    residual: ArrayView1<'_, f64>, jacobian: ArrayView2<'_, f64>, state_dim: usize,
    input_dim: usize,
) -> CostResult<QuadraticApproximation> {
    let expected = (residual.len(), 1 + state_dim + input_dim);
    if jacobian.dim() != expected {
        return Err(CostError::JacobianShapeMismatch { expected, found: jacobian.dim() });
    }

    let jx = jacobian.slice(s![.., 1..1 + state_dim]);
    let ju = jacobian.slice(s![.., 1 + state_dim..1 + state_dim + input_dim]);

    let mut dfdxx = jx.t().dot(&jx);
    let mut dfduu = ju.t().dot(&ju);
    symmetrize(&mut dfdxx);
    symmetrize(&mut dfduu);

    Ok(QuadraticApproximation {
        f: half_squared_norm(residual),
        dfdx: jx.t().dot(&residual),
        dfdu: ju.t().dot(&residual),
        dfdxx,
        dfduu,
        dfdux: ju.t().dot(&jx),
    })
}

// ---- Helper methods ----

/// Average each off-diagonal pair in place.
fn symmetrize(mat: &mut Array2<f64>) {
    for i in 0..mat.nrows() {
        for j in 0..i {
            let avg = 0.5 * (mat[[i, j]] + mat[[j, i]]);
            mat[[i, j]] = avg;
            mat[[j, i]] = avg;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Block partitioning of the Jacobian and the Gauss-Newton formulas.
    // - Stacked gradient/Hessian layout over z = [x; u].
    // - Time derivative from a record.
    //
    // They intentionally DO NOT cover:
    // - Producing records from taped models (see `gauss_newton`).
    // -------------------------------------------------------------------------

    fn point(state: Array1<f64>, input: Array1<f64>) -> EvaluationPoint {
        EvaluationPoint { time: 0.0, state, input }
    }

    #[test]
    // Purpose
    // -------
    // Verify the Gauss-Newton blocks for a hand-computed example.
    //
    // Given
    // -----
    // - r = [1, 2]; J = [[t: 5 | x: 1, 0 | u: 2], [t: 7 | x: 0, 3 | u: 1]].
    //
    // Expect
    // ------
    // - f = 2.5; dfdx = [1, 6]; dfdu = [4];
    //   dfdxx = [[1, 0], [0, 9]]; dfduu = [[5]]; dfdux = [[2, 3]].
    fn assemble_matches_hand_computed_blocks() {
        // Arrange
        let r = array![1.0, 2.0];
        let jac = array![[5.0, 1.0, 0.0, 2.0], [7.0, 0.0, 3.0, 1.0]];

        // Act
        let q = assemble_gauss_newton(r.view(), jac.view(), 2, 1).unwrap();

        // Assert
        assert_relative_eq!(q.f, 2.5);
        assert_eq!(q.dfdx, array![1.0, 6.0]);
        assert_eq!(q.dfdu, array![4.0]);
        assert_eq!(q.dfdxx, array![[1.0, 0.0], [0.0, 9.0]]);
        assert_eq!(q.dfduu, array![[5.0]]);
        assert_eq!(q.dfdux, array![[2.0, 3.0]]);
    }

    #[test]
    // Purpose
    // -------
    // Check the stacked layout over z = [x; u].
    //
    // Given
    // -----
    // - The approximation from the hand-computed example.
    //
    // Expect
    // ------
    // - Gradient [1, 6, 4]; Hessian [[1, 0, 2], [0, 9, 3], [2, 3, 5]].
    fn stacked_blocks_follow_x_then_u_order() {
        // Arrange
        let r = array![1.0, 2.0];
        let jac = array![[5.0, 1.0, 0.0, 2.0], [7.0, 0.0, 3.0, 1.0]];
        let q = assemble_gauss_newton(r.view(), jac.view(), 2, 1).unwrap();

        // Act
        let grad = q.stacked_gradient();
        let hess = q.stacked_hessian();

        // Assert
        assert_eq!(grad, array![1.0, 6.0, 4.0]);
        assert_eq!(hess, array![[1.0, 0.0, 2.0], [0.0, 9.0, 3.0], [2.0, 3.0, 5.0]]);
    }

    #[test]
    // Purpose
    // -------
    // Verify `time_derivative` and the final-record block shapes.
    //
    // Given
    // -----
    // - A final record with r = [1, 2], J = [[5, 1], [7, 0]] and nx = 1.
    //
    // Expect
    // ------
    // - dC/dt = 1·5 + 2·7 = 19; input blocks are empty; stage is "final".
    fn final_record_time_derivative_and_empty_input_blocks() {
        // Arrange
        let r = array![1.0, 2.0];
        let jac = array![[5.0, 1.0], [7.0, 0.0]];

        // Act
        let record = FinalRecord::assemble(point(array![0.3], Array1::zeros(0)), r, jac).unwrap();

        // Assert
        assert_relative_eq!(record.time_derivative(), 19.0);
        assert_eq!(record.stage(), "final");
        let q = record.approximation();
        assert_eq!(q.dfdu.len(), 0);
        assert_eq!(q.dfduu.shape(), &[0, 0]);
        assert_eq!(q.dfdux.shape(), &[0, 1]);
        assert_eq!(q.dfdxx, array![[1.0]]);
    }

    #[test]
    // Purpose
    // -------
    // Ensure a Jacobian narrower than `1 + nx + nu`, or with a row count
    // different from the residual length, is rejected instead of sliced.
    //
    // Given
    // -----
    // - r = [1, 2] with a 2×3 Jacobian for nx = 2, nu = 1 (needs width 4).
    // - r = [1] with a 2×4 Jacobian for the same dimensions.
    //
    // Expect
    // ------
    // - `JacobianShapeMismatch` with expected (2, 4) / found (2, 3), and
    //   expected (1, 4) / found (2, 4); records are not built either.
    fn narrow_or_tall_jacobian_is_rejected() {
        // Arrange
        let r = array![1.0, 2.0];
        let narrow = array![[5.0, 1.0, 0.0], [7.0, 0.0, 3.0]];
        let tall = Array2::<f64>::zeros((2, 4));

        // Act
        let narrow_err = assemble_gauss_newton(r.view(), narrow.view(), 2, 1);
        let tall_err = assemble_gauss_newton(array![1.0].view(), tall.view(), 2, 1);
        let record = IntermediateRecord::assemble(point(array![0.0, 0.0], array![0.0]), r, narrow);

        // Assert
        assert_eq!(
            narrow_err,
            Err(CostError::JacobianShapeMismatch { expected: (2, 4), found: (2, 3) })
        );
        assert_eq!(
            tall_err,
            Err(CostError::JacobianShapeMismatch { expected: (1, 4), found: (2, 4) })
        );
        assert!(matches!(record, Err(CostError::JacobianShapeMismatch { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Ensure `symmetrize` averages off-diagonal pairs and keeps the diagonal.
    //
    // Given
    // -----
    // - [[1, 2], [0, 3]].
    //
    // Expect
    // ------
    // - [[1, 1], [1, 3]].
    fn symmetrize_averages_off_diagonal_pairs() {
        // Arrange
        let mut m = array![[1.0, 2.0], [0.0, 3.0]];

        // Act
        symmetrize(&mut m);

        // Assert
        assert_eq!(m, array![[1.0, 1.0], [1.0, 3.0]]);
    }
}
