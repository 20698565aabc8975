// src/config.rs
use crate::error::{validation::*, PricerError, PricerResult};
use crate::mc::convergence::DensityGrid;
use crate::mc::pricer::ErrorConvention;
use std::str::FromStr;

/// Simulation sizes and estimator settings for a pricing run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Paths for the risk-neutral call valuation
    pub option_paths: usize,
    /// Time steps for the risk-neutral call valuation
    pub option_steps: usize,
    /// Paths for the empirical index forecast
    pub index_paths: usize,
    /// Trading days simulated by the index forecast
    pub index_horizon_steps: usize,
    pub seed: u64,
    pub density: DensityGrid,
    pub error_convention: ErrorConvention,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            option_paths: 10_000,
            option_steps: 252,
            index_paths: 400,
            index_horizon_steps: 106,
            seed: 12345,
            density: DensityGrid::default(),
            error_convention: ErrorConvention::DiscountedMean,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> PricerResult<()> {
        validate_paths(self.option_paths)?;
        validate_steps(self.option_steps)?;
        validate_paths(self.index_paths)?;
        validate_steps(self.index_horizon_steps)?;
        self.density.validate()?;
        if self.option_paths < 2 {
            return Err(PricerError::InsufficientSample {
                samples: self.option_paths,
                required: 2,
            });
        }
        Ok(())
    }

    /// Defaults overridden by `MC_*` environment variables (a `.env` file is
    /// read first when present)
    pub fn from_env() -> PricerResult<Self> {
        dotenvy::dotenv().ok();
        let defaults = EngineConfig::default();

        let cfg = EngineConfig {
            option_paths: env_parse("MC_OPTION_PATHS", defaults.option_paths)?,
            option_steps: env_parse("MC_OPTION_STEPS", defaults.option_steps)?,
            index_paths: env_parse("MC_INDEX_PATHS", defaults.index_paths)?,
            index_horizon_steps: env_parse("MC_INDEX_STEPS", defaults.index_horizon_steps)?,
            seed: env_parse("MC_SEED", defaults.seed)?,
            density: DensityGrid {
                points: env_parse("MC_DENSITY_POINTS", defaults.density.points)?,
                width: env_parse("MC_DENSITY_WIDTH", defaults.density.width)?,
            },
            error_convention: match std::env::var("MC_ERROR_CONVENTION") {
                Ok(v) => parse_convention(&v)?,
                Err(_) => defaults.error_convention,
            },
        };
        cfg.validate()?;
        Ok(cfg)
    }
}

fn env_parse<T>(key: &str, default: T) -> PricerResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| PricerError::Config(format!("{key}: {e}"))),
        Err(_) => Ok(default),
    }
}

pub fn parse_convention(raw: &str) -> PricerResult<ErrorConvention> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "discounted-mean" => Ok(ErrorConvention::DiscountedMean),
        "conventional" => Ok(ErrorConvention::Conventional),
        other => Err(PricerError::Config(format!(
            "MC_ERROR_CONVENTION: unknown value '{other}' (expected discounted-mean or conventional)"
        ))),
    }
}
