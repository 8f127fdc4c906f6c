//! cost::desired_trajectory — time-indexed reference states and inputs.
//!
//! Purpose
//! -------
//! Store a reference trajectory as knots `(tᵢ, x̄ᵢ, ūᵢ)` and evaluate it at
//! arbitrary times. Tracking costs typically feed `desired_state(t)` and
//! `desired_input(t)` into their residual parameters, which is how a
//! generated model follows a trajectory that changes after generation.
//!
//! Key behaviors
//! -------------
//! - Linear interpolation between neighbouring knots.
//! - Constant extrapolation: times before the first knot return the first
//!   knot, times after the last return the last. A NaN time maps to the
//!   first knot.
//! - Empty input vectors are allowed (state-only references).
//!
//! Invariants & assumptions
//! ------------------------
//! - At least one knot; times finite and strictly increasing.
//! - All states share one length; all inputs share one length.
use crate::cost::errors::{CostError, CostResult};
use ndarray::Array1;

/// Reference trajectory with linear interpolation.
#[derive(Debug, Clone, PartialEq)]
pub struct CostDesiredTrajectories {
    times: Vec<f64>,
    states: Vec<Array1<f64>>,
    inputs: Vec<Array1<f64>>,
}

impl CostDesiredTrajectories {
    /// Build a validated trajectory.
    ///
    /// # Errors
    /// - [`CostError::EmptyTrajectory`] when `times` is empty.
    /// - [`CostError::TrajectoryLengthMismatch`] when the three vectors differ
    ///   in length.
    /// - [`CostError::InvalidTrajectoryTime`] for a non-finite or
    ///   non-increasing time.
    /// - [`CostError::TrajectoryDimMismatch`] when a state (or input) length
    ///   differs from the first one.
    pub fn new(
        times: Vec<f64>, states: Vec<Array1<f64>>, inputs: Vec<Array1<f64>>,
    ) -> CostResult<Self> {
        if times.is_empty() {
            return Err(CostError::EmptyTrajectory);
        }
        if states.len() != times.len() || inputs.len() != times.len() {
            return Err(CostError::TrajectoryLengthMismatch {
                times: times.len(),
                states: states.len(),
                inputs: inputs.len(),
            });
        }
        for (index, &value) in times.iter().enumerate() {
            if !value.is_finite() {
                return Err(CostError::InvalidTrajectoryTime { index, value, reason: "not finite" });
            }
            if index > 0 && value <= times[index - 1] {
                return Err(CostError::InvalidTrajectoryTime {
                    index,
                    value,
                    reason: "times must be strictly increasing",
                });
            }
        }
        check_uniform_dims(&states)?;
        check_uniform_dims(&inputs)?;
        Ok(Self { times, states, inputs })
    }

    /// Single-knot trajectory, i.e. a constant reference.
    pub fn constant(state: Array1<f64>, input: Array1<f64>) -> Self {
        Self { times: vec![0.0], states: vec![state], inputs: vec![input] }
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn state_dim(&self) -> usize {
        self.states[0].len()
    }

    pub fn input_dim(&self) -> usize {
        self.inputs[0].len()
    }

    pub fn desired_state(&self, time: f64) -> Array1<f64> {
        self.interpolate(&self.states, time)
    }

    pub fn desired_input(&self, time: f64) -> Array1<f64> {
        self.interpolate(&self.inputs, time)
    }

    // ---- Helper methods ----

    fn interpolate(&self, knots: &[Array1<f64>], time: f64) -> Array1<f64> {
        let last = self.times.len() - 1;
        if time.is_nan() || time <= self.times[0] {
            return knots[0].clone();
        }
        if time >= self.times[last] {
            return knots[last].clone();
        }
        // First knot strictly after `time`; 1 ≤ hi ≤ last here.
        let hi = self.times.partition_point(|&t| t <= time);
        let lo = hi - 1;
        let alpha = (time - self.times[lo]) / (self.times[hi] - self.times[lo]);
        &knots[lo] * (1.0 - alpha) + &knots[hi] * alpha
    }
}

fn check_uniform_dims(knots: &[Array1<f64>]) -> CostResult<()> {
    let expected = knots[0].len();
    match knots.iter().position(|k| k.len() != expected) {
        Some(index) => Err(CostError::TrajectoryDimMismatch {
            index,
            expected,
            found: knots[index].len(),
        }),
        None => Ok(()),
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
    // - Interpolation inside the span and clamping outside it.
    // - NaN times.
    // - Constructor validation.
    // -------------------------------------------------------------------------

    fn ramp() -> CostDesiredTrajectories {
        CostDesiredTrajectories::new(
            vec![0.0, 1.0, 3.0],
            vec![array![0.0, 10.0], array![1.0, 10.0], array![5.0, 0.0]],
            vec![array![0.0], array![2.0], array![2.0]],
        )
        .unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Verify linear interpolation and constant extrapolation.
    //
    // Given
    // -----
    // - Knots at t = 0, 1, 3.
    //
    // Expect
    // ------
    // - x̄(0.5) = [0.5, 10]; x̄(2) = [3, 5]; ū(0.25) = [0.5];
    //   x̄(-1) = first knot; x̄(7) = last knot; exact knots are reproduced.
    fn interpolates_inside_and_clamps_outside() {
        // Arrange
        let traj = ramp();

        // Act / Assert
        let mid = traj.desired_state(0.5);
        assert_relative_eq!(mid[0], 0.5);
        assert_relative_eq!(mid[1], 10.0);
        let later = traj.desired_state(2.0);
        assert_relative_eq!(later[0], 3.0);
        assert_relative_eq!(later[1], 5.0);
        assert_relative_eq!(traj.desired_input(0.25)[0], 0.5);
        assert_eq!(traj.desired_state(-1.0), array![0.0, 10.0]);
        assert_eq!(traj.desired_state(7.0), array![5.0, 0.0]);
        assert_eq!(traj.desired_state(1.0), array![1.0, 10.0]);
    }

    #[test]
    // Purpose
    // -------
    // Ensure a NaN time returns a knot instead of indexing before the first
    // one.
    //
    // Given
    // -----
    // - The three-knot ramp queried at t = NaN.
    //
    // Expect
    // ------
    // - The first knot for both the state and the input.
    fn nan_time_maps_to_first_knot() {
        // Arrange
        let traj = ramp();

        // Act
        let state = traj.desired_state(f64::NAN);
        let input = traj.desired_input(f64::NAN);

        // Assert
        assert_eq!(state, array![0.0, 10.0]);
        assert_eq!(input, array![0.0]);
    }

    #[test]
    // Purpose
    // -------
    // Ensure malformed trajectories are rejected.
    //
    // Given
    // -----
    // - No knots; decreasing times; a state of the wrong length.
    //
    // Expect
    // ------
    // - `EmptyTrajectory`, `InvalidTrajectoryTime { index: 1 }`,
    //   `TrajectoryDimMismatch { index: 1 }`.
    fn constructor_rejects_malformed_trajectories() {
        // Act / Assert
        assert_eq!(
            CostDesiredTrajectories::new(vec![], vec![], vec![]),
            Err(CostError::EmptyTrajectory)
        );
        assert!(matches!(
            CostDesiredTrajectories::new(
                vec![1.0, 0.5],
                vec![array![0.0], array![0.0]],
                vec![Array1::zeros(0), Array1::zeros(0)],
            ),
            Err(CostError::InvalidTrajectoryTime { index: 1, .. })
        ));
        assert!(matches!(
            CostDesiredTrajectories::new(
                vec![0.0, 1.0],
                vec![array![0.0], array![0.0, 1.0]],
                vec![Array1::zeros(0), Array1::zeros(0)],
            ),
            Err(CostError::TrajectoryDimMismatch { index: 1, expected: 1, found: 2 })
        ));
    }
}
