//! # mc-call-pricer: Monte Carlo valuation of index call options
//!
//! Estimates the fair value of a European call with a quantified standard
//! error, compares it against the observed market price, and forecasts the
//! distribution of the underlying index level.
//!
//! ## Components
//!
//! - **Simulation**: path ensembles under a risk-neutral GBM or an
//!   empirical-volatility multiplicative model, with an injectable seeded RNG
//! - **Payoffs**: per-path payoffs from simulated prices (call, put, Asian)
//! - **Pricer**: discounted mean and standard error of the payoffs
//! - **Convergence**: Normal density of the model/market discrepancy
//! - **Path summary**: cross-path statistics and point queries per time step
//!
//! ## Quick Start
//!
//! ```rust
//! use mc_call_pricer::mc::{payoffs, pricer};
//! use mc_call_pricer::models::SimulationModel;
//! use mc_call_pricer::rng::seed_rng_from_u64;
//! use mc_call_pricer::simulation::{simulate, SimulationParameters};
//!
//! let params = SimulationParameters::new(100.0, 12, 5_000, 0.01, 0.2, 1.0)?;
//! let ensemble = simulate(&params, SimulationModel::RiskNeutral, &mut seed_rng_from_u64(42))?;
//! let payoffs = payoffs::evaluate_call(&ensemble, 100.0)?;
//! let estimate = pricer::price(&payoffs, 0.01, 1.0)?;
//! println!("{}", estimate);
//! # Ok::<(), mc_call_pricer::PricerError>(())
//! ```
//!
//! Market data retrieval, user interaction and plotting stay outside the
//! crate: data arrives through [`market_data::MarketDataProvider`] and results
//! leave through [`output::SeriesSink`].

pub mod analytics;
pub mod config;
pub mod engine;
pub mod error;
pub mod market_data;
pub mod math_utils;
pub mod mc;
pub mod models;
pub mod output;
pub mod rng;
pub mod simulation;

pub use error::{PricerError, PricerResult};
