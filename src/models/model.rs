// src/models/model.rs

/// Per-step dynamics of one simulated price path.
///
/// A path carries a scalar state (the price itself, or its logarithm) that
/// is advanced by one standard normal shock per time step.
pub trait PathModel {
    /// State at time 0 for a path starting at `s0`
    fn initial_state(&self, s0: f64) -> f64;

    /// Advance the state by one step given a shock Z ~ N(0,1)
    fn advance(&self, state: f64, z: f64) -> f64;

    /// Price implied by a state
    fn price(&self, state: f64) -> f64;
}
