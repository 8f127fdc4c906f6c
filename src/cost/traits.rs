//! cost::traits — the cost interface consumed by trajectory optimizers.
//!
//! [`CostFunction`] is the contract downstream solvers program against:
//! scalar costs, quadratic approximations, and time derivatives taken from
//! explicit approximation records. [`QuadraticGaussNewtonCost`] is the
//! crate's implementation.
//!
//! [`QuadraticGaussNewtonCost`]: crate::cost::QuadraticGaussNewtonCost
use crate::cost::{
    approximation::{FinalRecord, IntermediateRecord},
    errors::CostResult,
};
use ndarray::ArrayView1;

/// Stage cost `L(t, x, u)` and terminal cost `Φ(t, x)`.
pub trait CostFunction {
    fn state_dim(&self) -> usize;

    fn input_dim(&self) -> usize;

    /// Intermediate cost at `(t, x, u)`.
    fn cost(&mut self, time: f64, state: ArrayView1<'_, f64>, input: ArrayView1<'_, f64>) -> CostResult<f64>;

    /// Final cost at `(t, x)`.
    fn final_cost(&mut self, time: f64, state: ArrayView1<'_, f64>) -> CostResult<f64>;

    /// Quadratic approximation of the intermediate cost at `(t, x, u)`.
    fn cost_quadratic_approximation(
        &mut self, time: f64, state: ArrayView1<'_, f64>, input: ArrayView1<'_, f64>,
    ) -> CostResult<IntermediateRecord>;

    /// Quadratic approximation of the final cost at `(t, x)`.
    fn final_cost_quadratic_approximation(
        &mut self, time: f64, state: ArrayView1<'_, f64>,
    ) -> CostResult<FinalRecord>;

    /// `∂L/∂t` at the point `record` was taken.
    fn cost_derivative_time(&self, record: &IntermediateRecord) -> f64 {
        record.time_derivative()
    }

    /// `∂Φ/∂t` at the point `record` was taken.
    fn final_cost_derivative_time(&self, record: &FinalRecord) -> f64 {
        record.time_derivative()
    }
}
