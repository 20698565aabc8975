// src/mc/pricer.rs
//! Discounting and aggregation of per-path payoffs.
//!
//! # Estimator
//!
//! ```text
//! C0    = e^(-rT) · (1/M) Σ CT_i
//! sigma = sqrt( Σ (CT_i - C0)² / (M - 1) )
//! SE    = sigma / √M
//! ```
//!
//! The default [`ErrorConvention::DiscountedMean`] measures the deviations of
//! the undiscounted payoffs CT_i around the discounted mean C0, exactly as
//! written above. [`ErrorConvention::Conventional`] discounts each payoff first
//! and measures deviations around their own mean.

use crate::error::{validation::*, PricerError, PricerResult};
use crate::mc::payoffs::PayoffVector;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the sample standard deviation behind the standard error is formed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorConvention {
    /// Undiscounted payoffs around the discounted mean
    #[default]
    DiscountedMean,
    /// Discounted payoffs around the discounted mean
    Conventional,
}

/// Discounted Monte Carlo price with its standard error
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceEstimate {
    pub value: f64,
    pub standard_error: f64,
}

impl PriceEstimate {
    /// `value ± z · standard_error`
    pub fn confidence_interval(&self, z: f64) -> (f64, f64) {
        let half_width = z * self.standard_error;
        (self.value - half_width, self.value + half_width)
    }
}

impl fmt::Display for PriceEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Call value is ${:.2} with SE +/- {:.2}",
            self.value, self.standard_error
        )
    }
}

fn validate_discounting(discount_rate: f64, time_to_expiry: f64) -> PricerResult<()> {
    validate_finite("discount_rate", discount_rate)?;
    validate_non_negative("time_to_expiry", time_to_expiry)
}

/// `e^(-rT) · mean(payoffs)`, defined for a single path
pub fn discounted_mean(
    payoffs: &PayoffVector,
    discount_rate: f64,
    time_to_expiry: f64,
) -> PricerResult<f64> {
    validate_discounting(discount_rate, time_to_expiry)?;
    let m = payoffs.len();
    if m == 0 {
        return Err(PricerError::InsufficientSample {
            samples: 0,
            required: 1,
        });
    }
    let discount = (-discount_rate * time_to_expiry).exp();
    Ok(discount * payoffs.iter().sum::<f64>() / m as f64)
}

/// Price with the default error convention
///
/// # Errors
///
/// - `InvalidParameter` for a non-finite rate or negative time to expiry
/// - `InsufficientSample` when fewer than two payoffs are given
pub fn price(
    payoffs: &PayoffVector,
    discount_rate: f64,
    time_to_expiry: f64,
) -> PricerResult<PriceEstimate> {
    price_with(
        payoffs,
        discount_rate,
        time_to_expiry,
        ErrorConvention::default(),
    )
}

pub fn price_with(
    payoffs: &PayoffVector,
    discount_rate: f64,
    time_to_expiry: f64,
    convention: ErrorConvention,
) -> PricerResult<PriceEstimate> {
    validate_discounting(discount_rate, time_to_expiry)?;
    let m = payoffs.len();
    if m < 2 {
        return Err(PricerError::InsufficientSample {
            samples: m,
            required: 2,
        });
    }

    let value = discounted_mean(payoffs, discount_rate, time_to_expiry)?;
    let discount = (-discount_rate * time_to_expiry).exp();
    let scale = match convention {
        ErrorConvention::DiscountedMean => 1.0,
        ErrorConvention::Conventional => discount,
    };

    let sum_sq: f64 = payoffs.iter().map(|&ct| (scale * ct - value).powi(2)).sum();
    let sigma = (sum_sq / (m - 1) as f64).sqrt();
    let standard_error = sigma / (m as f64).sqrt();

    if standard_error == 0.0 {
        tracing::warn!(paths = m, "all payoffs coincide with the estimate; standard error is zero");
    }
    tracing::debug!(value, standard_error, paths = m, ?convention, "priced payoffs");

    Ok(PriceEstimate {
        value,
        standard_error,
    })
}
