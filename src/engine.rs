// src/engine.rs
//! Request pipelines wiring the components together.
//!
//! ```text
//! provider ─► simulate(RiskNeutral) ─► evaluate_call ─► price ─► analyze
//! provider ─► simulate(Empirical)   ─► mean_path / mean_at_step
//! ```

use crate::analytics::bs_analytic::bs_call_price;
use crate::analytics::path_summary::{mean_at_step, mean_path};
use crate::config::EngineConfig;
use crate::error::{validation::*, PricerResult};
use crate::market_data::{IndexInputs, MarketDataProvider, OptionInputs};
use crate::mc::convergence::{analyze_with, ConvergenceResult};
use crate::mc::payoffs::evaluate_call;
use crate::mc::pricer::{price_with, PriceEstimate};
use crate::models::SimulationModel;
use crate::simulation::{simulate, PathEnsemble, SimulationParameters};
use rand::Rng;
use serde::Serialize;

/// Outcome of one call-valuation request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallValuation {
    pub inputs: OptionInputs,
    pub estimate: PriceEstimate,
    pub convergence: ConvergenceResult,
    /// Black-Scholes price for the same inputs
    pub closed_form: f64,
}

/// Value a European call by risk-neutral Monte Carlo and compare it with the
/// contract's market price.
///
/// # Errors
///
/// Any provider error, `InvalidParameter` for a contract with no time left to
/// simulate, and the errors of the pricer and the analyzer.
pub fn value_call<P, R>(provider: &P, cfg: &EngineConfig, rng: &mut R) -> PricerResult<CallValuation>
where
    P: MarketDataProvider + ?Sized,
    R: Rng + ?Sized,
{
    cfg.validate()?;
    let inputs = provider.option_inputs()?;
    inputs.validate()?;
    validate_positive("time_to_expiry_years", inputs.time_to_expiry_years)?;

    let params = SimulationParameters::new(
        inputs.spot_price,
        cfg.option_steps,
        cfg.option_paths,
        inputs.risk_free_rate,
        inputs.volatility,
        inputs.time_to_expiry_years,
    )?;
    let ensemble = simulate(&params, SimulationModel::RiskNeutral, rng)?;
    let payoffs = evaluate_call(&ensemble, inputs.strike)?;
    drop(ensemble);

    let estimate = price_with(
        &payoffs,
        inputs.risk_free_rate,
        inputs.time_to_expiry_years,
        cfg.error_convention,
    )?;
    let convergence = analyze_with(&estimate, inputs.market_price, cfg.density)?;
    let closed_form = bs_call_price(
        inputs.spot_price,
        inputs.strike,
        inputs.risk_free_rate,
        inputs.volatility,
        inputs.time_to_expiry_years,
    );

    tracing::info!(
        value = estimate.value,
        standard_error = estimate.standard_error,
        market_price = inputs.market_price,
        closed_form,
        "valued call"
    );

    Ok(CallValuation {
        inputs,
        estimate,
        convergence,
        closed_form,
    })
}

/// Simulated index paths with their cross-path mean
#[derive(Debug, Clone)]
pub struct IndexForecast {
    pub inputs: IndexInputs,
    pub ensemble: PathEnsemble,
    /// Mean price after each simulated day
    pub mean_path: Vec<f64>,
}

impl IndexForecast {
    /// Average simulated index level after `step` days (1-based)
    pub fn average_at(&self, step: usize) -> PricerResult<f64> {
        mean_at_step(&self.ensemble, step)
    }
}

/// Forecast the index with the empirical-volatility model
pub fn forecast_index<P, R>(provider: &P, cfg: &EngineConfig, rng: &mut R) -> PricerResult<IndexForecast>
where
    P: MarketDataProvider + ?Sized,
    R: Rng + ?Sized,
{
    cfg.validate()?;
    let inputs = provider.index_inputs()?;
    inputs.validate()?;

    let params = SimulationParameters::daily(
        inputs.initial_index_price,
        cfg.index_horizon_steps,
        cfg.index_paths,
        inputs.historical_return_std,
    )?;
    let ensemble = simulate(&params, SimulationModel::Empirical, rng)?;
    let mean_path = mean_path(&ensemble);

    tracing::info!(
        paths = ensemble.path_count(),
        days = ensemble.horizon_steps(),
        final_mean = mean_path.last().copied().unwrap_or(inputs.initial_index_price),
        "forecast index paths"
    );

    Ok(IndexForecast {
        inputs,
        ensemble,
        mean_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PricerError;
    use crate::market_data::FixedMarketData;
    use crate::rng::seed_rng_from_u64;

    fn fixture() -> FixedMarketData {
        FixedMarketData {
            option: OptionInputs {
                spot_price: 100.0,
                strike: 100.0,
                time_to_expiry_years: 1.0,
                risk_free_rate: 0.01,
                volatility: 0.2,
                market_price: 8.5,
            },
            index: IndexInputs {
                initial_index_price: 2200.0,
                historical_return_std: 0.009,
            },
        }
    }

    fn small_config() -> EngineConfig {
        EngineConfig {
            option_paths: 2_000,
            option_steps: 12,
            index_paths: 50,
            index_horizon_steps: 20,
            ..Default::default()
        }
    }

    #[test]
    fn test_value_call_pipeline() {
        let valuation =
            value_call(&fixture(), &small_config(), &mut seed_rng_from_u64(42)).unwrap();

        assert!(valuation.estimate.value > 0.0);
        assert!(valuation.estimate.standard_error > 0.0);
        assert!((valuation.convergence.discrepancy - (valuation.estimate.value - 8.5)).abs() < 1e-12);
        assert_eq!(valuation.convergence.density_domain.len(), 100);
        assert!((valuation.closed_form - 8.4333).abs() < 1e-3);
    }

    #[test]
    fn test_expired_contract_rejected() {
        let mut data = fixture();
        data.option.time_to_expiry_years = 0.0;
        assert!(matches!(
            value_call(&data, &small_config(), &mut seed_rng_from_u64(1)),
            Err(PricerError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_deep_out_of_the_money_call_still_valued() {
        let mut data = fixture();
        data.option.strike = 300.0;
        data.option.time_to_expiry_years = 0.1;
        data.option.volatility = 0.1;
        data.option.market_price = 0.05;

        let valuation = value_call(&data, &small_config(), &mut seed_rng_from_u64(42)).unwrap();

        assert_eq!(valuation.estimate.value, 0.0);
        assert_eq!(valuation.estimate.standard_error, 0.0);
        assert!((valuation.convergence.discrepancy + 0.05).abs() < 1e-12);
        assert_eq!(valuation.convergence.density_domain, vec![valuation.convergence.discrepancy]);
        assert!(valuation.closed_form < 1e-12);
    }

    #[test]
    fn test_forecast_index_pipeline() {
        let forecast =
            forecast_index(&fixture(), &small_config(), &mut seed_rng_from_u64(7)).unwrap();

        assert_eq!(forecast.mean_path.len(), 20);
        assert_eq!(forecast.ensemble.path_count(), 50);
        assert_eq!(forecast.average_at(20).unwrap(), forecast.mean_path[19]);
        assert!(forecast.average_at(21).is_err());
    }
}
