// src/models/gbm.rs
//! Risk-neutral geometric Brownian motion, integrated in log-price space.
//!
//! ```text
//! dS_t = r S_t dt + σ S_t dW_t
//! ln S_{t+dt} = ln S_t + (r - σ²/2) dt + σ √dt Z
//! ```
//!
//! The log-space step is exact for GBM, and exponentiating keeps every price
//! strictly positive.

use super::model::PathModel;

#[derive(Debug, Clone, Copy)]
pub struct RiskNeutralGbm {
    /// (r - σ²/2) dt
    pub nudt: f64,
    /// σ √dt
    pub volsdt: f64,
}

impl RiskNeutralGbm {
    pub fn new(r: f64, sigma: f64, dt: f64) -> Self {
        RiskNeutralGbm {
            nudt: (r - 0.5 * sigma * sigma) * dt,
            volsdt: sigma * dt.sqrt(),
        }
    }

    /// Log-price increment for one shock
    pub fn log_increment(&self, z: f64) -> f64 {
        self.nudt + self.volsdt * z
    }
}

impl PathModel for RiskNeutralGbm {
    fn initial_state(&self, s0: f64) -> f64 {
        s0.ln()
    }

    fn advance(&self, state: f64, z: f64) -> f64 {
        state + self.log_increment(z)
    }

    fn price(&self, state: f64) -> f64 {
        state.exp()
    }
}
