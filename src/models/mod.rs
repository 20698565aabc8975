pub mod empirical;
pub mod gbm;
pub mod model;

use serde::{Deserialize, Serialize};

/// The stochastic model driving a simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationModel {
    /// Mean-zero normal daily returns scaled by a historical standard deviation,
    /// compounded multiplicatively
    Empirical,
    /// Lognormal GBM under the risk-neutral measure
    RiskNeutral,
}
