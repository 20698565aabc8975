// src/simulation/params.rs
use crate::error::{validation::*, PricerResult};
use serde::Serialize;

/// Inputs of one simulation request.
///
/// Built through [`SimulationParameters::new`] or [`SimulationParameters::daily`],
/// both of which validate every field; the values cannot change afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationParameters {
    initial_price: f64,
    horizon_steps: usize,
    path_count: usize,
    drift: f64,
    volatility: f64,
    step_size: f64,
}

impl SimulationParameters {
    /// Parameters over `total_time` years split into `horizon_steps` equal steps
    pub fn new(
        initial_price: f64,
        horizon_steps: usize,
        path_count: usize,
        drift: f64,
        volatility: f64,
        total_time: f64,
    ) -> PricerResult<Self> {
        validate_steps(horizon_steps)?;
        validate_positive("total_time", total_time)?;
        let params = SimulationParameters {
            initial_price,
            horizon_steps,
            path_count,
            drift,
            volatility,
            step_size: total_time / horizon_steps as f64,
        };
        params.validate()?;
        Ok(params)
    }

    /// Parameters for the empirical model: one step per trading day, driven by
    /// the standard deviation of historical daily returns
    pub fn daily(
        initial_price: f64,
        horizon_steps: usize,
        path_count: usize,
        return_std: f64,
    ) -> PricerResult<Self> {
        Self::new(
            initial_price,
            horizon_steps,
            path_count,
            0.0,
            return_std,
            horizon_steps as f64,
        )
    }

    /// Check every precondition of a simulation request
    pub fn validate(&self) -> PricerResult<()> {
        validate_positive("initial_price", self.initial_price)?;
        validate_steps(self.horizon_steps)?;
        validate_paths(self.path_count)?;
        validate_finite("drift", self.drift)?;
        validate_non_negative("volatility", self.volatility)?;
        validate_positive("step_size", self.step_size)?;
        Ok(())
    }

    pub fn initial_price(&self) -> f64 {
        self.initial_price
    }

    pub fn horizon_steps(&self) -> usize {
        self.horizon_steps
    }

    pub fn path_count(&self) -> usize {
        self.path_count
    }

    pub fn drift(&self) -> f64 {
        self.drift
    }

    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    pub fn total_time(&self) -> f64 {
        self.step_size * self.horizon_steps as f64
    }
}
