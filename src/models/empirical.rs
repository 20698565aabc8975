// src/models/empirical.rs
//! Empirical-volatility multiplicative model.
//!
//! Daily returns are drawn as r_t ~ N(0, σ_hist) and compounded:
//! ```text
//! S_t = S_0 · Π_{i ≤ t} (1 + r_i)
//! ```
//!
//! Nothing prevents a draw with r_t ≤ -1, in which case the path reaches or
//! crosses zero. Such prices are kept as generated.

use super::model::PathModel;

#[derive(Debug, Clone, Copy)]
pub struct EmpiricalReturns {
    /// Standard deviation of historical daily returns
    pub return_std: f64,
}

impl EmpiricalReturns {
    pub fn new(return_std: f64) -> Self {
        EmpiricalReturns { return_std }
    }
}

impl PathModel for EmpiricalReturns {
    fn initial_state(&self, s0: f64) -> f64 {
        s0
    }

    fn advance(&self, state: f64, z: f64) -> f64 {
        state * (1.0 + self.return_std * z)
    }

    fn price(&self, state: f64) -> f64 {
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compounding() {
        let model = EmpiricalReturns::new(0.01);
        let s1 = model.advance(model.initial_state(200.0), 1.0);
        let s2 = model.advance(s1, -2.0);
        assert!((s2 - 200.0 * 1.01 * 0.98).abs() < 1e-9);
    }

    #[test]
    fn test_extreme_draw_crosses_zero() {
        let model = EmpiricalReturns::new(0.5);
        let s = model.advance(100.0, -3.0);
        assert!(s < 0.0, "extreme draws are not clipped, got {}", s);
    }
}
