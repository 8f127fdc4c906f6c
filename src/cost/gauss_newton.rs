//! cost::gauss_newton — the quadratic Gauss-Newton cost engine.
//!
//! Purpose
//! -------
//! Own the two differentiated models (intermediate and final) of a residual
//! strategy and answer cost, quadratic-approximation and time-derivative
//! queries with them. This is the crate's [`CostFunction`] implementation.
//!
//! Key behaviors
//! -------------
//! - [`QuadraticGaussNewtonCost::initialize`] generates (or loads) both
//!   models through the file-system cache, logging per `settings.verbose`.
//!   [`QuadraticGaussNewtonCost::initialize_with_cache`] takes any
//!   [`ModelCache`] and an explicit logger.
//! - Each evaluation builds the tape input `[t, x, u]` / `[t, x]` in a
//!   per-engine buffer, fetches the stage parameters from the strategy, and
//!   runs one `f64` evaluation (or the dual sweeps for approximations).
//! - Non-finite times, and parameter vectors whose length drifted from the
//!   count fixed at generation, are rejected per call.
//!
//! Invariants & assumptions
//! ------------------------
//! - Evaluation takes `&mut self`: model workspaces and tape-input buffers
//!   are overwritten on every call. Clones share the strategy and own
//!   separate workspaces.
//! - Nothing on the evaluation path performs I/O or logs.
use crate::automatic_differentiation::model::AdModel;
use crate::cost::{
    approximation::{
        ApproximationRecord, EvaluationPoint, FinalRecord, IntermediateRecord, half_squared_norm,
    },
    errors::CostResult,
    residuals::{
        CostDimensions, FinalResidualFunction, GaussNewtonResidual, IntermediateResidualFunction,
    },
    traits::CostFunction,
    validation::{validate_input, validate_parameters, validate_state, validate_time},
};
use crate::logging::build_logger;
use crate::model_cache::{
    cache::{ModelCache, ModelKind},
    file_system::FileSystemCache,
    lifecycle::{ModelOrigin, generate_or_load},
    settings::ModelSettings,
};
use ndarray::{Array1, ArrayView1, s};
use slog::Logger;
use std::sync::Arc;

/// Gauss-Newton cost `0.5 · ‖r‖²` over differentiated residuals.
#[derive(Debug)]
pub struct QuadraticGaussNewtonCost<R> {
    residual: Arc<R>,
    dims: CostDimensions,
    intermediate: AdModel<IntermediateResidualFunction<R>>,
    terminal: AdModel<FinalResidualFunction<R>>,
    intermediate_origin: ModelOrigin,
    final_origin: ModelOrigin,
    intermediate_input: Array1<f64>,
    final_input: Array1<f64>,
}

impl<R> Clone for QuadraticGaussNewtonCost<R> {
    fn clone(&self) -> Self {
        Self {
            residual: Arc::clone(&self.residual),
            dims: self.dims,
            intermediate: self.intermediate.clone(),
            terminal: self.terminal.clone(),
            intermediate_origin: self.intermediate_origin,
            final_origin: self.final_origin,
            intermediate_input: self.intermediate_input.clone(),
            final_input: self.final_input.clone(),
        }
    }
}

impl<R: GaussNewtonResidual> QuadraticGaussNewtonCost<R> {
    /// Build both models using the file-system cache under
    /// `settings.model_folder`.
    pub fn initialize(residual: R, dims: CostDimensions, settings: &ModelSettings) -> CostResult<Self> {
        let logger = build_logger(settings.verbose);
        Self::initialize_with_cache(residual, dims, settings, &FileSystemCache::new(), &logger)
    }

    /// initialize_with_cache — build both models through `cache`.
    ///
    /// Parameters
    /// ----------
    /// - `residual`: the strategy, shared by all clones of the engine.
    /// - `dims`: state and input dimensions.
    /// - `settings`: model name, folder and recompile flag.
    /// - `cache`: storage backend for model signatures.
    /// - `logger`: sink for lifecycle diagnostics.
    ///
    /// Errors
    /// ------
    /// - `CostError::Model` when building a model fails (out-of-range
    ///   state/input access, empty or mis-sized residual) or when storing a
    ///   freshly generated model fails.
    pub fn initialize_with_cache<C: ModelCache + ?Sized>(
        residual: R, dims: CostDimensions, settings: &ModelSettings, cache: &C, logger: &Logger,
    ) -> CostResult<Self> {
        let residual = Arc::new(residual);

        let intermediate_fn = IntermediateResidualFunction::new(Arc::clone(&residual), dims);
        let (intermediate, intermediate_origin) =
            generate_or_load(intermediate_fn, ModelKind::Intermediate, settings, cache, logger)?;

        let final_fn = FinalResidualFunction::new(Arc::clone(&residual), dims);
        let (terminal, final_origin) =
            generate_or_load(final_fn, ModelKind::Final, settings, cache, logger)?;

        Ok(Self {
            residual,
            dims,
            intermediate,
            terminal,
            intermediate_origin,
            final_origin,
            intermediate_input: Array1::zeros(dims.intermediate_tape_dim()),
            final_input: Array1::zeros(dims.final_tape_dim()),
        })
    }

    pub fn dimensions(&self) -> CostDimensions {
        self.dims
    }

    pub fn residual_strategy(&self) -> &R {
        &self.residual
    }

    /// How the intermediate and final models were obtained.
    pub fn model_origins(&self) -> (ModelOrigin, ModelOrigin) {
        (self.intermediate_origin, self.final_origin)
    }

    pub fn intermediate_model(&self) -> &AdModel<IntermediateResidualFunction<R>> {
        &self.intermediate
    }

    pub fn final_model(&self) -> &AdModel<FinalResidualFunction<R>> {
        &self.terminal
    }

    /// Intermediate residual at `(t, x, u)`.
    pub fn intermediate_residual(
        &mut self, time: f64, state: ArrayView1<'_, f64>, input: ArrayView1<'_, f64>,
    ) -> CostResult<Array1<f64>> {
        let params = self.load_intermediate(time, state, input)?;
        Ok(self.intermediate.evaluate(self.intermediate_input.view(), params.view())?)
    }

    /// Final residual at `(t, x)`.
    pub fn final_residual(&mut self, time: f64, state: ArrayView1<'_, f64>) -> CostResult<Array1<f64>> {
        let params = self.load_final(time, state)?;
        Ok(self.terminal.evaluate(self.final_input.view(), params.view())?)
    }

    // ---- Helper methods ----

    /// Validate the point, fill the intermediate tape input, fetch parameters.
    fn load_intermediate(
        &mut self, time: f64, state: ArrayView1<'_, f64>, input: ArrayView1<'_, f64>,
    ) -> CostResult<Array1<f64>> {
        let (nx, nu) = (self.dims.state_dim(), self.dims.input_dim());
        validate_time(time)?;
        validate_state(&state, nx)?;
        validate_input(&input, nu)?;
        let params = self.residual.intermediate_parameters(time);
        validate_parameters(&params.view(), self.intermediate.param_dim(), "intermediate")?;

        self.intermediate_input[0] = time;
        self.intermediate_input.slice_mut(s![1..1 + nx]).assign(&state);
        self.intermediate_input.slice_mut(s![1 + nx..]).assign(&input);
        Ok(params)
    }

    /// Validate the point, fill the final tape input, fetch parameters.
    fn load_final(&mut self, time: f64, state: ArrayView1<'_, f64>) -> CostResult<Array1<f64>> {
        validate_time(time)?;
        validate_state(&state, self.dims.state_dim())?;
        let params = self.residual.final_parameters(time);
        validate_parameters(&params.view(), self.terminal.param_dim(), "final")?;

        self.final_input[0] = time;
        self.final_input.slice_mut(s![1..]).assign(&state);
        Ok(params)
    }
}

impl<R: GaussNewtonResidual> CostFunction for QuadraticGaussNewtonCost<R> {
    fn state_dim(&self) -> usize {
        self.dims.state_dim()
    }

    fn input_dim(&self) -> usize {
        self.dims.input_dim()
    }

    fn cost(&mut self, time: f64, state: ArrayView1<'_, f64>, input: ArrayView1<'_, f64>) -> CostResult<f64> {
        let residual = self.intermediate_residual(time, state, input)?;
        Ok(half_squared_norm(residual.view()))
    }

    fn final_cost(&mut self, time: f64, state: ArrayView1<'_, f64>) -> CostResult<f64> {
        let residual = self.final_residual(time, state)?;
        Ok(half_squared_norm(residual.view()))
    }

    fn cost_quadratic_approximation(
        &mut self, time: f64, state: ArrayView1<'_, f64>, input: ArrayView1<'_, f64>,
    ) -> CostResult<IntermediateRecord> {
        let params = self.load_intermediate(time, state, input)?;
        let (residual, jacobian) =
            self.intermediate.evaluate_with_jacobian(self.intermediate_input.view(), params.view())?;
        let point = EvaluationPoint { time, state: state.to_owned(), input: input.to_owned() };
        ApproximationRecord::assemble(point, residual, jacobian)
    }

    fn final_cost_quadratic_approximation(
        &mut self, time: f64, state: ArrayView1<'_, f64>,
    ) -> CostResult<FinalRecord> {
        let params = self.load_final(time, state)?;
        let (residual, jacobian) =
            self.terminal.evaluate_with_jacobian(self.final_input.view(), params.view())?;
        let point = EvaluationPoint { time, state: state.to_owned(), input: Array1::zeros(0) };
        ApproximationRecord::assemble(point, residual, jacobian)
    }
}
