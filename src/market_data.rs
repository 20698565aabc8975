// src/market_data.rs
//! Boundary to the market-data collaborator.
//!
//! The engine never fetches anything itself. A [`MarketDataProvider`] hands it
//! flat numeric records, and any retrieval failure must arrive here already
//! translated into `PricerError::InvalidParameter`.
//!
//! The helpers below derive those records from raw quotes the way an index
//! option desk usually quotes them: index level as the bid/ask mid, the
//! risk-free rate from a yield quoted in percent, and the historical return
//! volatility from daily closes.

use crate::error::{validation::*, PricerError, PricerResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Inputs of one call-valuation request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionInputs {
    pub spot_price: f64,
    pub strike: f64,
    pub time_to_expiry_years: f64,
    pub risk_free_rate: f64,
    pub volatility: f64,
    /// Last traded price of the contract
    pub market_price: f64,
}

impl OptionInputs {
    pub fn validate(&self) -> PricerResult<()> {
        validate_positive("spot_price", self.spot_price)?;
        validate_non_negative("strike", self.strike)?;
        validate_non_negative("time_to_expiry_years", self.time_to_expiry_years)?;
        validate_finite("risk_free_rate", self.risk_free_rate)?;
        validate_non_negative("volatility", self.volatility)?;
        validate_finite("market_price", self.market_price)?;
        Ok(())
    }
}

/// Inputs of one index-path forecast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexInputs {
    pub initial_index_price: f64,
    pub historical_return_std: f64,
}

impl IndexInputs {
    pub fn validate(&self) -> PricerResult<()> {
        validate_positive("initial_index_price", self.initial_index_price)?;
        validate_non_negative("historical_return_std", self.historical_return_std)
    }
}

/// Source of validated numeric inputs
pub trait MarketDataProvider {
    fn option_inputs(&self) -> PricerResult<OptionInputs>;
    fn index_inputs(&self) -> PricerResult<IndexInputs>;
}

/// Midpoint of a bid/ask quote
pub fn mid_price(bid: f64, ask: f64) -> PricerResult<f64> {
    validate_positive("bid", bid)?;
    validate_positive("ask", ask)?;
    if ask < bid {
        return Err(PricerError::InvalidParameter {
            parameter: "ask".to_string(),
            value: ask,
            constraint: format!("must not be below bid ({})", bid),
        });
    }
    Ok((bid + ask) / 2.0)
}

/// Continuous rate from a yield quoted in percent (4.25 -> 0.0425)
pub fn yield_to_rate(quoted_percent: f64) -> PricerResult<f64> {
    validate_finite("quoted_yield", quoted_percent)?;
    Ok(quoted_percent / 100.0)
}

/// ACT/365 year fraction between valuation and expiration dates
pub fn year_fraction(valuation: NaiveDate, expiry: NaiveDate) -> PricerResult<f64> {
    let days = (expiry - valuation).num_days();
    if days < 0 {
        return Err(PricerError::InvalidParameter {
            parameter: "expiry".to_string(),
            value: days as f64,
            constraint: format!("{} is before valuation date {}", expiry, valuation),
        });
    }
    Ok(days as f64 / 365.0)
}

/// Sample standard deviation (N - 1) of simple daily returns of `closes`
pub fn historical_return_std(closes: &[f64]) -> PricerResult<f64> {
    if closes.len() < 3 {
        return Err(PricerError::InsufficientSample {
            samples: closes.len(),
            required: 3,
        });
    }
    for &c in closes {
        validate_positive("close", c)?;
    }
    let returns: Vec<f64> = closes.windows(2).map(|w| w[1] / w[0] - 1.0).collect();
    Ok(returns.iter().std_dev())
}

/// Raw quotes for one index call contract
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionQuoteSnapshot {
    pub index_bid: f64,
    pub index_ask: f64,
    /// Treasury yield in percent
    pub treasury_yield: f64,
    pub strike: f64,
    pub last_price: f64,
    pub implied_volatility: f64,
    pub valuation_date: NaiveDate,
    pub expiration_date: NaiveDate,
}

impl TryFrom<OptionQuoteSnapshot> for OptionInputs {
    type Error = PricerError;

    fn try_from(quote: OptionQuoteSnapshot) -> PricerResult<Self> {
        let inputs = OptionInputs {
            spot_price: mid_price(quote.index_bid, quote.index_ask)?,
            strike: quote.strike,
            time_to_expiry_years: year_fraction(quote.valuation_date, quote.expiration_date)?,
            risk_free_rate: yield_to_rate(quote.treasury_yield)?,
            volatility: quote.implied_volatility,
            market_price: quote.last_price,
        };
        inputs.validate()?;
        Ok(inputs)
    }
}

/// Provider returning fixed records, for offline runs and tests
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedMarketData {
    pub option: OptionInputs,
    pub index: IndexInputs,
}

impl MarketDataProvider for FixedMarketData {
    fn option_inputs(&self) -> PricerResult<OptionInputs> {
        self.option.validate()?;
        Ok(self.option)
    }

    fn index_inputs(&self) -> PricerResult<IndexInputs> {
        self.index.validate()?;
        Ok(self.index)
    }
}

/// Provider deriving its records from a quote snapshot and a close history
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalCloses {
    pub quote: OptionQuoteSnapshot,
    /// Daily index closes, oldest first
    pub closes: Vec<f64>,
}

impl MarketDataProvider for HistoricalCloses {
    fn option_inputs(&self) -> PricerResult<OptionInputs> {
        OptionInputs::try_from(self.quote)
    }

    fn index_inputs(&self) -> PricerResult<IndexInputs> {
        let initial_index_price = *self.closes.last().ok_or(PricerError::InsufficientSample {
            samples: 0,
            required: 3,
        })?;
        let inputs = IndexInputs {
            initial_index_price,
            historical_return_std: historical_return_std(&self.closes)?,
        };
        inputs.validate()?;
        Ok(inputs)
    }
}
