//! cost — Gauss-Newton cost evaluation over differentiated residuals.
//!
//! Purpose
//! -------
//! Evaluate `L(t, x, u) = 0.5 · ‖r(t, x, u; p(t))‖²` and
//! `Φ(t, x) = 0.5 · ‖r_f(t, x; p_f(t))‖²`, their quadratic (Gauss-Newton)
//! approximations, and their partial time derivatives, for residuals written
//! once by the problem author.
//!
//! Key behaviors
//! -------------
//! - [`GaussNewtonResidual`]: the residual strategy a problem implements.
//! - [`QuadraticGaussNewtonCost`]: generates or loads the two models and
//!   implements [`CostFunction`].
//! - [`ApproximationRecord`]: explicit, stage-tagged result of an
//!   approximation; the only input of the time-derivative accessors.
//! - [`CostDesiredTrajectories`]: interpolated references for tracking costs.
//! - [`validation`]: shape checks and PSD/finiteness diagnostics.
//!
//! Conventions
//! -----------
//! - Tape input layout: `[t, x, u]` (intermediate), `[t, x]` (final).
//! - Hessian blocks: `dfdxx` (nx×nx), `dfduu` (nu×nu), `dfdux` (nu×nx).
//!
//! Downstream usage
//! ----------------
//! - Trajectory optimizers hold a `QuadraticGaussNewtonCost` (or any
//!   `CostFunction`) and query approximations along candidate trajectories.
pub mod approximation;
pub mod desired_trajectory;
pub mod errors;
pub mod gauss_newton;
pub mod residuals;
pub mod traits;
pub mod validation;

pub use self::approximation::{
    ApproximationRecord, EvaluationPoint, Final, FinalRecord, Intermediate, IntermediateRecord,
    QuadraticApproximation, StageKind, half_squared_norm,
};
pub use self::desired_trajectory::CostDesiredTrajectories;
pub use self::errors::{CostError, CostResult};
pub use self::gauss_newton::QuadraticGaussNewtonCost;
pub use self::residuals::{
    CostDimensions, FinalResidualFunction, GaussNewtonResidual, IntermediateResidualFunction,
};
pub use self::traits::CostFunction;
pub use self::validation::{check_approximation, min_eigenvalue};
