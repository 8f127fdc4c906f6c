//! automatic_differentiation::errors — error surface of the dual-number engine.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias shared by model construction,
//! evaluation and derivative checks. Higher layers (model cache, cost
//! engine) convert [`AdError`] into their own error types via `From`.
//!
//! Conventions
//! -----------
//! - Indices are 0-based.
//! - Model names are carried verbatim so that messages identify which of the
//!   two models (intermediate or final) failed.
//! - Errors are small and cheap to clone; none of them wraps I/O state.

/// Result alias for model construction and evaluation.
pub type AdResult<T> = Result<T, AdError>;

#[derive(Debug, Clone, PartialEq)]
pub enum AdError {
    // ---- Residual body ----
    /// The residual function panicked (typically an out-of-range index into
    /// the state or input slice).
    ResidualPanicked { model: String, message: String },

    /// The residual function returned no entries.
    EmptyResidual { model: String },

    /// The residual length differs from the declared or built one.
    ResidualDimMismatch { model: String, expected: usize, found: usize },

    // ---- Signature ----
    /// A stored signature cannot describe any usable model.
    InvalidSignature { model: String, reason: &'static str },

    // ---- Evaluation ----
    /// Tape input length does not match the model.
    InputDimMismatch { model: String, expected: usize, found: usize },

    /// Parameter vector length does not match the model.
    ParameterDimMismatch { model: String, expected: usize, found: usize },

    // ---- Diagnostics ----
    /// Finite-difference reference contains non-finite entries.
    NonFiniteReference { row: usize, col: usize, value: f64 },
}

impl std::error::Error for AdError {}

impl std::fmt::Display for AdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Residual body ----
            AdError::ResidualPanicked { model, message } => {
                write!(f, "Residual of model '{model}' panicked: {message}")
            }
            AdError::EmptyResidual { model } => {
                write!(f, "Model '{model}' returned an empty residual")
            }
            AdError::ResidualDimMismatch { model, expected, found } => {
                write!(
                    f,
                    "Model '{model}' residual dimension mismatch: expected {expected}, found {found}"
                )
            }

            // ---- Signature ----
            AdError::InvalidSignature { model, reason } => {
                write!(f, "Model '{model}' has an invalid signature: {reason}")
            }

            // ---- Evaluation ----
            AdError::InputDimMismatch { model, expected, found } => {
                write!(
                    f,
                    "Model '{model}' tape input dimension mismatch: expected {expected}, found {found}"
                )
            }
            AdError::ParameterDimMismatch { model, expected, found } => {
                write!(
                    f,
                    "Model '{model}' parameter dimension mismatch: expected {expected}, found {found}"
                )
            }

            // ---- Diagnostics ----
            AdError::NonFiniteReference { row, col, value } => {
                write!(f, "Finite-difference Jacobian at ({row}, {col}) is not finite: {value}")
            }
        }
    }
}
