//! gauss_newton_cost — Gauss-Newton cost approximations from differentiated residuals.
//!
//! Purpose
//! -------
//! Let a problem author write a residual vector `r(t, x, u; p)` once and get
//! the cost `0.5 · ‖r‖²`, its Gauss-Newton quadratic approximation (gradient
//! `Jᵀr`, Hessian `JᵀJ` split into state/input blocks) and its partial time
//! derivative at any point. Jacobians come from forward-mode dual numbers
//! (`num-dual`); model signatures are cached between runs.
//!
//! Key behaviors
//! -------------
//! - [`automatic_differentiation`]: the [`Scalar`](automatic_differentiation::Scalar)
//!   bound residuals are written against, dual-number Jacobians,
//!   finite-difference cross-checks.
//! - [`model_cache`]: model naming, JSON artifacts on disk or in memory, and
//!   the generate-or-load lifecycle.
//! - [`cost`]: the [`GaussNewtonResidual`](cost::GaussNewtonResidual)
//!   strategy, [`QuadraticGaussNewtonCost`](cost::QuadraticGaussNewtonCost)
//!   and the [`CostFunction`](cost::CostFunction) trait downstream solvers
//!   consume; desired trajectories for tracking problems.
//! - [`logging`]: `slog` logger construction.
//!
//! Invariants & assumptions
//! ------------------------
//! - Residual lengths do not depend on the evaluation point; every
//!   evaluation checks them against the generated signature.
//! - Evaluation is synchronous and takes `&mut self`; cloned engines share
//!   the residual strategy and own their workspaces.
//! - Library code reports failures through per-module error enums. Panics
//!   raised inside residual bodies are caught and reported as errors.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each module; `tests/gauss_newton_pipeline.rs`
//!   exercises the public pipeline end to end.

pub mod automatic_differentiation;
pub mod cost;
pub mod logging;
pub mod model_cache;

pub mod prelude {
    pub use crate::automatic_differentiation::Scalar;
    pub use crate::cost::{
        ApproximationRecord, CostDesiredTrajectories, CostDimensions, CostError, CostFunction,
        CostResult, FinalRecord, GaussNewtonResidual, IntermediateRecord, QuadraticApproximation,
        QuadraticGaussNewtonCost,
    };
    pub use crate::model_cache::{FileSystemCache, InMemoryCache, ModelOrigin, ModelSettings};
}
