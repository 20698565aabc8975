//! Option Payoff Functions
//!
//! ## European Options
//! - **Call**: max(S_T - K, 0)
//! - **Put**: max(K - S_T, 0)
//!
//! ## Path-Dependent Options
//! - **Asian call**: max(Avg(S_t) - K, 0), the average taken over the whole path
//!
//! Payoffs are pure functions of a single path, so any of them can be
//! evaluated over an ensemble without touching the simulator.

use crate::error::{validation::*, PricerResult};
use crate::simulation::PathEnsemble;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Supported option payoffs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Payoff {
    /// European call option: max(S_T - K, 0)
    EuropeanCall { k: f64 },

    /// European put option: max(K - S_T, 0)
    EuropeanPut { k: f64 },

    /// Asian call option: max(Avg(S_t) - K, 0)
    AsianCall { k: f64 },
}

impl Payoff {
    pub fn strike(&self) -> f64 {
        match *self {
            Payoff::EuropeanCall { k } | Payoff::EuropeanPut { k } | Payoff::AsianCall { k } => k,
        }
    }

    pub fn validate(&self) -> PricerResult<()> {
        validate_non_negative("strike", self.strike())
    }

    /// Payoff of one path `[S_0, S_1, ..., S_T]`
    pub fn calculate<'a, I>(&self, path: I) -> f64
    where
        I: IntoIterator<Item = &'a f64>,
        I::IntoIter: DoubleEndedIterator + ExactSizeIterator,
    {
        let mut prices = path.into_iter();
        match *self {
            Payoff::EuropeanCall { k } => prices.next_back().map_or(0.0, |&s| call(s, k)),
            Payoff::EuropeanPut { k } => prices.next_back().map_or(0.0, |&s| (k - s).max(0.0)),
            Payoff::AsianCall { k } => {
                let n = prices.len();
                if n == 0 {
                    return 0.0;
                }
                let average_price = prices.sum::<f64>() / n as f64;
                (average_price - k).max(0.0)
            }
        }
    }
}

fn call(terminal: f64, strike: f64) -> f64 {
    (terminal - strike).max(0.0)
}

/// Per-path payoffs of an ensemble, one entry per simulated path
#[derive(Debug, Clone, PartialEq)]
pub struct PayoffVector {
    values: Array1<f64>,
}

impl PayoffVector {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.values.iter()
    }
}

impl From<Vec<f64>> for PayoffVector {
    fn from(values: Vec<f64>) -> Self {
        PayoffVector {
            values: Array1::from(values),
        }
    }
}

impl From<Array1<f64>> for PayoffVector {
    fn from(values: Array1<f64>) -> Self {
        PayoffVector { values }
    }
}

/// Evaluate `payoff` over every path of the ensemble
pub fn evaluate(ensemble: &PathEnsemble, payoff: &Payoff) -> PricerResult<PayoffVector> {
    payoff.validate()?;
    let values = match *payoff {
        Payoff::EuropeanCall { k } => ensemble.terminal_prices().mapv(|s| call(s, k)),
        _ => ensemble.paths().map(|path| payoff.calculate(path)).collect(),
    };
    Ok(PayoffVector { values })
}

/// Call payoffs max(0, S_T - K) from the ensemble's terminal row
pub fn evaluate_call(ensemble: &PathEnsemble, strike: f64) -> PricerResult<PayoffVector> {
    evaluate(ensemble, &Payoff::EuropeanCall { k: strike })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PricerError;

    #[test]
    fn test_call_payoffs_from_terminal_row() {
        let ensemble =
            PathEnsemble::from_terminal_prices(100.0, &[90.0, 100.0, 100.5, 130.0]).unwrap();
        let payoffs = evaluate_call(&ensemble, 100.0).unwrap();

        assert_eq!(payoffs.values().to_vec(), vec![0.0, 0.0, 0.5, 30.0]);
    }

    #[test]
    fn test_at_the_money_pays_exactly_zero() {
        let ensemble = PathEnsemble::from_terminal_prices(50.0, &[75.25]).unwrap();
        let payoffs = evaluate_call(&ensemble, 75.25).unwrap();
        assert_eq!(payoffs.values()[0], 0.0);
    }

    #[test]
    fn test_put_and_asian_substitute_without_resimulating() {
        let ensemble = PathEnsemble::from_array(ndarray::array![
            [100.0, 100.0],
            [110.0, 80.0],
            [120.0, 90.0]
        ])
        .unwrap();

        let puts = evaluate(&ensemble, &Payoff::EuropeanPut { k: 100.0 }).unwrap();
        assert_eq!(puts.values().to_vec(), vec![0.0, 10.0]);

        let asians = evaluate(&ensemble, &Payoff::AsianCall { k: 100.0 }).unwrap();
        assert!((asians.values()[0] - 10.0).abs() < 1e-12);
        assert_eq!(asians.values()[1], 0.0);
    }

    #[test]
    fn test_negative_strike_rejected() {
        let ensemble = PathEnsemble::from_terminal_prices(100.0, &[101.0]).unwrap();
        assert!(matches!(
            evaluate_call(&ensemble, -1.0),
            Err(PricerError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_calculate_on_slices() {
        let path = [100.0, 105.0, 95.0];
        assert_eq!(Payoff::EuropeanCall { k: 90.0 }.calculate(&path), 5.0);
        assert_eq!(Payoff::EuropeanPut { k: 90.0 }.calculate(&path), 0.0);
        assert_eq!(Payoff::EuropeanCall { k: 90.0 }.calculate(&[] as &[f64]), 0.0);
    }
}
