// src/simulation/simulator.rs
//! Path generation for both simulation models.
//!
//! # Algorithm
//!
//! 1. Draw shocks Z of shape `(horizon_steps, path_count)`, i.i.d. N(0,1)
//! 2. Start every path from the model's initial state
//! 3. For each step, advance every path's state by its shock
//! 4. Record the implied prices; row 0 is `initial_price` exactly
//!
//! Under [`SimulationModel::RiskNeutral`] the state is ln S and the increments
//! `(r - σ²/2)dt + σ√dt Z` are summed before exponentiation. Under
//! [`SimulationModel::Empirical`] the state is the price itself, compounded by
//! `(1 + σ_hist Z)` each step.

use super::{PathEnsemble, SimulationParameters};
use crate::error::PricerResult;
use crate::models::empirical::EmpiricalReturns;
use crate::models::gbm::RiskNeutralGbm;
use crate::models::model::PathModel;
use crate::models::SimulationModel;
use crate::rng::{self, RngFactory};
use ndarray::parallel::prelude::*;
use ndarray::{Array1, Array2, Axis, Zip};
use rand::Rng;

/// Simulate a path ensemble with the caller's generator.
///
/// Shocks are drawn step-major (all paths for step 1, then step 2, ...), so a
/// given seed always reproduces the same ensemble.
///
/// # Errors
///
/// `InvalidParameter` if `params` violates a precondition; nothing is drawn
/// from `rng` in that case.
pub fn simulate<R: Rng + ?Sized>(
    params: &SimulationParameters,
    model: SimulationModel,
    rng: &mut R,
) -> PricerResult<PathEnsemble> {
    params.validate()?;
    tracing::debug!(
        ?model,
        steps = params.horizon_steps(),
        paths = params.path_count(),
        "simulating path ensemble"
    );

    let shocks = Array2::from_shape_fn((params.horizon_steps(), params.path_count()), |_| {
        rng::get_normal_draw(&mut *rng)
    });

    let prices = match model {
        SimulationModel::Empirical => integrate(
            &EmpiricalReturns::new(params.volatility()),
            params.initial_price(),
            &shocks,
        ),
        SimulationModel::RiskNeutral => integrate(
            &gbm_for(params),
            params.initial_price(),
            &shocks,
        ),
    };

    Ok(finish(prices, model))
}

/// Simulate a path ensemble in parallel across paths.
///
/// Path `j` draws from its own generator seeded with `seed + j`, so the result
/// does not depend on the number of threads. It differs from [`simulate`]
/// with the same seed because the draw order differs.
pub fn simulate_par(
    params: &SimulationParameters,
    model: SimulationModel,
    seed: u64,
) -> PricerResult<PathEnsemble> {
    params.validate()?;
    tracing::debug!(
        ?model,
        steps = params.horizon_steps(),
        paths = params.path_count(),
        threads = rayon::current_num_threads(),
        "simulating path ensemble in parallel"
    );

    let factory = RngFactory::new(seed);
    let mut prices = Array2::zeros((params.horizon_steps() + 1, params.path_count()));
    match model {
        SimulationModel::Empirical => fill_paths(
            &EmpiricalReturns::new(params.volatility()),
            params.initial_price(),
            factory,
            &mut prices,
        ),
        SimulationModel::RiskNeutral => {
            fill_paths(&gbm_for(params), params.initial_price(), factory, &mut prices)
        }
    }

    Ok(finish(prices, model))
}

fn gbm_for(params: &SimulationParameters) -> RiskNeutralGbm {
    RiskNeutralGbm::new(params.drift(), params.volatility(), params.step_size())
}

fn integrate<M: PathModel>(model: &M, initial_price: f64, shocks: &Array2<f64>) -> Array2<f64> {
    let (steps, paths) = shocks.dim();
    let mut prices = Array2::zeros((steps + 1, paths));
    prices.row_mut(0).fill(initial_price);

    let mut state = Array1::from_elem(paths, model.initial_state(initial_price));
    for (i, z_row) in shocks.axis_iter(Axis(0)).enumerate() {
        Zip::from(&mut state)
            .and(&z_row)
            .for_each(|s, &z| *s = model.advance(*s, z));
        Zip::from(prices.row_mut(i + 1))
            .and(&state)
            .for_each(|p, &s| *p = model.price(s));
    }
    prices
}

fn fill_paths<M: PathModel + Sync>(
    model: &M,
    initial_price: f64,
    factory: RngFactory,
    prices: &mut Array2<f64>,
) {
    prices
        .axis_iter_mut(Axis(1))
        .into_par_iter()
        .enumerate()
        .for_each(|(j, mut column)| {
            let mut rng = factory.create_std_rng(j as u64);
            let mut state = model.initial_state(initial_price);
            column[0] = initial_price;
            for i in 1..column.len() {
                state = model.advance(state, rng::get_normal_draw(&mut rng));
                column[i] = model.price(state);
            }
        });
}

fn finish(prices: Array2<f64>, model: SimulationModel) -> PathEnsemble {
    if model == SimulationModel::Empirical {
        let crossed = prices
            .axis_iter(Axis(1))
            .filter(|path| path.iter().any(|&p| p <= 0.0))
            .count();
        if crossed > 0 {
            tracing::warn!(crossed, "empirical paths reached a non-positive price");
        }
    }
    PathEnsemble::from_simulated(prices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seed_rng_from_u64;

    fn gbm_params(paths: usize) -> SimulationParameters {
        SimulationParameters::new(100.0, 50, paths, 0.01, 0.2, 1.0).unwrap()
    }

    #[test]
    fn test_ensemble_shape_and_initial_row() {
        let params = gbm_params(64);
        let mut rng = seed_rng_from_u64(1);

        for model in [SimulationModel::RiskNeutral, SimulationModel::Empirical] {
            let ensemble = simulate(&params, model, &mut rng).unwrap();
            assert_eq!(ensemble.prices().dim(), (51, 64));
            assert!(ensemble.row(0).unwrap().iter().all(|&p| p == 100.0));
        }
    }

    #[test]
    fn test_same_seed_same_ensemble() {
        let params = gbm_params(16);
        let a = simulate(&params, SimulationModel::RiskNeutral, &mut seed_rng_from_u64(9)).unwrap();
        let b = simulate(&params, SimulationModel::RiskNeutral, &mut seed_rng_from_u64(9)).unwrap();
        let c = simulate(&params, SimulationModel::RiskNeutral, &mut seed_rng_from_u64(10)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_risk_neutral_matches_log_space_formula() {
        // Replays the draws to rebuild one path by hand
        let params = SimulationParameters::new(100.0, 3, 2, 0.03, 0.25, 0.75).unwrap();
        let ensemble =
            simulate(&params, SimulationModel::RiskNeutral, &mut seed_rng_from_u64(5)).unwrap();

        let mut rng = seed_rng_from_u64(5);
        let z: Vec<f64> = (0..6).map(|_| rng::get_normal_draw(&mut rng)).collect();
        let dt = 0.25;
        let nudt = (0.03 - 0.5 * 0.25 * 0.25) * dt;
        let volsdt = 0.25 * f64::sqrt(dt);

        let mut ln_s = 100.0f64.ln();
        for step in 0..3 {
            // step-major layout: column 1 sits at odd indices
            ln_s += nudt + volsdt * z[step * 2 + 1];
            let expected = ln_s.exp();
            let got = ensemble.prices()[[step + 1, 1]];
            assert!((got - expected).abs() < 1e-10, "step {}: {} vs {}", step, got, expected);
        }
    }

    #[test]
    fn test_empirical_matches_cumulative_product() {
        let params = SimulationParameters::daily(200.0, 4, 1, 0.02).unwrap();
        let ensemble =
            simulate(&params, SimulationModel::Empirical, &mut seed_rng_from_u64(3)).unwrap();

        let mut rng = seed_rng_from_u64(3);
        let mut expected = 200.0;
        for step in 1..=4 {
            expected *= 1.0 + 0.02 * rng::get_normal_draw(&mut rng);
            assert!((ensemble.prices()[[step, 0]] - expected).abs() < 1e-10);
        }
    }

    #[test]
    fn test_parallel_is_thread_independent_and_positive() {
        let params = gbm_params(200);
        let a = simulate_par(&params, SimulationModel::RiskNeutral, 77).unwrap();
        let b = simulate_par(&params, SimulationModel::RiskNeutral, 77).unwrap();
        assert_eq!(a, b);
        assert!(a.row(0).unwrap().iter().all(|&p| p == 100.0));
        assert!(a.prices().iter().all(|&p| p > 0.0));

        // Path 5 only depends on its own generator
        let mut rng = RngFactory::new(77).create_std_rng(5);
        let gbm = gbm_for(&params);
        let mut state = gbm.initial_state(100.0);
        state = gbm.advance(state, rng::get_normal_draw(&mut rng));
        assert!((a.prices()[[1, 5]] - gbm.price(state)).abs() < 1e-12);
    }
}
