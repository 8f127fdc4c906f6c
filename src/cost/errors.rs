//! cost::errors — error surface of the Gauss-Newton cost engine.
//!
//! Purpose
//! -------
//! Collect every failure a caller of the cost engine can observe:
//! configuration errors at construction, model generation failures at
//! initialization, and shape or parameter problems on individual calls.
//!
//! Conventions
//! -----------
//! - Errors from the differentiation engine and the model cache are wrapped
//!   unchanged (`From` impls), so `?` works across layers.
//! - `model` fields name the stage (`"intermediate"` or `"final"`).
use crate::automatic_differentiation::errors::AdError;
use crate::model_cache::errors::CacheError;

/// Result alias for cost-engine operations.
pub type CostResult<T> = Result<T, CostError>;

#[derive(Debug, Clone, PartialEq)]
pub enum CostError {
    // ---- Configuration ----
    /// State dimension must be at least one.
    InvalidStateDim { state_dim: usize },

    // ---- Call-site shapes ----
    /// Evaluation time is NaN or infinite.
    InvalidTime { value: f64 },

    /// State vector length differs from the configured state dimension.
    StateDimMismatch { expected: usize, found: usize },

    /// Input vector length differs from the configured input dimension.
    InputDimMismatch { expected: usize, found: usize },

    /// Parameter vector length differs from the count fixed at generation.
    ParameterDimMismatch { model: &'static str, expected: usize, found: usize },

    // ---- Approximation checks ----
    /// Jacobian shape differs from `residual_dim × (1 + nx + nu)`.
    JacobianShapeMismatch { expected: (usize, usize), found: (usize, usize) },

    /// A value, gradient or Hessian block contains NaN or ±inf.
    NonFiniteApproximation { block: &'static str, index: usize, value: f64 },

    /// Assembled Hessian has an eigenvalue below the tolerance.
    NotPositiveSemidefinite { min_eigenvalue: f64, tol: f64 },

    // ---- Desired trajectories ----
    /// A desired trajectory needs at least one knot.
    EmptyTrajectory,

    /// Times, states and inputs have different lengths.
    TrajectoryLengthMismatch { times: usize, states: usize, inputs: usize },

    /// Knot times must be finite and strictly increasing.
    InvalidTrajectoryTime { index: usize, value: f64, reason: &'static str },

    /// A knot vector's length differs from the first knot's.
    TrajectoryDimMismatch { index: usize, expected: usize, found: usize },

    // ---- Wrapped ----
    /// Differentiation engine failure.
    Ad(AdError),

    /// Model generation or cache failure.
    Model(CacheError),
}

impl std::error::Error for CostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CostError::Ad(err) => Some(err),
            CostError::Model(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for CostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Configuration ----
            CostError::InvalidStateDim { state_dim } => {
                write!(f, "Invalid state dimension {state_dim}: must be at least 1")
            }

            // ---- Call-site shapes ----
            CostError::InvalidTime { value } => {
                write!(f, "Invalid evaluation time {value}: must be finite")
            }
            CostError::StateDimMismatch { expected, found } => {
                write!(f, "State dimension mismatch: expected {expected}, found {found}")
            }
            CostError::InputDimMismatch { expected, found } => {
                write!(f, "Input dimension mismatch: expected {expected}, found {found}")
            }
            CostError::ParameterDimMismatch { model, expected, found } => {
                write!(
                    f,
                    "{model} parameter count changed since model generation: expected {expected}, found {found}"
                )
            }

            // ---- Approximation checks ----
            CostError::JacobianShapeMismatch { expected, found } => {
                write!(
                    f,
                    "Jacobian shape mismatch: expected {}x{}, found {}x{}",
                    expected.0, expected.1, found.0, found.1
                )
            }
            CostError::NonFiniteApproximation { block, index, value } => {
                write!(f, "Non-finite entry in {block} at flat index {index}: {value}")
            }
            CostError::NotPositiveSemidefinite { min_eigenvalue, tol } => {
                write!(
                    f,
                    "Hessian is not positive semidefinite: min eigenvalue {min_eigenvalue} < -{tol}"
                )
            }

            // ---- Desired trajectories ----
            CostError::EmptyTrajectory => write!(f, "Desired trajectory has no knots"),
            CostError::TrajectoryLengthMismatch { times, states, inputs } => {
                write!(
                    f,
                    "Desired trajectory length mismatch: {times} times, {states} states, {inputs} inputs"
                )
            }
            CostError::InvalidTrajectoryTime { index, value, reason } => {
                write!(f, "Invalid desired trajectory time at index {index}: {value} ({reason})")
            }
            CostError::TrajectoryDimMismatch { index, expected, found } => {
                write!(
                    f,
                    "Desired trajectory knot {index} has dimension {found}, expected {expected}"
                )
            }

            // ---- Wrapped ----
            CostError::Ad(err) => write!(f, "{err}"),
            CostError::Model(err) => write!(f, "{err}"),
        }
    }
}

impl From<AdError> for CostError {
    fn from(err: AdError) -> Self {
        CostError::Ad(err)
    }
}

impl From<CacheError> for CostError {
    fn from(err: CacheError) -> Self {
        CostError::Model(err)
    }
}
