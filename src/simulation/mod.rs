pub mod ensemble;
pub mod params;
pub mod simulator;

pub use ensemble::PathEnsemble;
pub use params::SimulationParameters;
pub use simulator::{simulate, simulate_par};
