// src/error.rs

/// Errors surfaced by the pricing engine.
///
/// Every check runs before any random number is drawn, so a failed request
/// never returns a partial result.
#[derive(Debug, thiserror::Error)]
pub enum PricerError {
    /// An input violates its precondition (non-positive price, negative volatility, ...)
    #[error("Invalid parameter '{parameter}' = {value}: {constraint}")]
    InvalidParameter {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Too few values to estimate a sample standard deviation
    #[error("Insufficient sample: {samples} value(s) given, at least {required} required")]
    InsufficientSample { samples: usize, required: usize },

    /// A time-step query outside the simulated horizon
    #[error("Time step {index} out of range [{min}, {max}]")]
    IndexOutOfRange { index: usize, min: usize, max: usize },

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for PricerError {
    fn from(e: serde_json::Error) -> Self {
        PricerError::Io(e.into())
    }
}

/// Result type alias for pricing operations
pub type PricerResult<T> = Result<T, PricerError>;

/// Validation utilities
pub mod validation {
    use super::{PricerError, PricerResult};

    fn invalid(name: &str, value: f64, constraint: &str) -> PricerError {
        PricerError::InvalidParameter {
            parameter: name.to_string(),
            value,
            constraint: constraint.to_string(),
        }
    }

    /// Validate that a parameter is finite and strictly positive
    pub fn validate_positive(name: &str, value: f64) -> PricerResult<()> {
        if !(value.is_finite() && value > 0.0) {
            Err(invalid(name, value, "must be positive (> 0)"))
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is finite and non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> PricerResult<()> {
        if !(value.is_finite() && value >= 0.0) {
            Err(invalid(name, value, "must be non-negative (≥ 0)"))
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> PricerResult<()> {
        if !value.is_finite() {
            Err(invalid(name, value, "must be finite (not NaN or infinite)"))
        } else {
            Ok(())
        }
    }

    /// Validate a path count
    pub fn validate_paths(paths: usize) -> PricerResult<()> {
        if paths == 0 {
            Err(invalid("path_count", 0.0, "must be greater than 0"))
        } else {
            Ok(())
        }
    }

    /// Validate a time-step count
    pub fn validate_steps(steps: usize) -> PricerResult<()> {
        if steps == 0 {
            Err(invalid("horizon_steps", 0.0, "must be greater than 0"))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::validation::*;
    use super::*;

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive("initial_price", 100.0).is_ok());
        assert!(validate_positive("initial_price", 0.0).is_err());
        assert!(validate_positive("initial_price", -1.0).is_err());
        assert!(validate_positive("initial_price", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("volatility", 0.0).is_ok());
        assert!(validate_non_negative("volatility", 0.2).is_ok());
        assert!(validate_non_negative("volatility", -0.01).is_err());
        assert!(validate_non_negative("volatility", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_counts() {
        assert!(validate_paths(1).is_ok());
        assert!(validate_paths(0).is_err());
        assert!(validate_steps(252).is_ok());
        assert!(validate_steps(0).is_err());
        assert!(validate_steps(100_001).is_ok());
        assert!(validate_paths(2_000_000_000).is_ok());
    }

    #[test]
    fn test_error_display() {
        let error = PricerError::InvalidParameter {
            parameter: "volatility".to_string(),
            value: -0.1,
            constraint: "must be non-negative".to_string(),
        };

        let display = format!("{}", error);
        assert!(display.contains("volatility"));
        assert!(display.contains("-0.1"));
        assert!(display.contains("non-negative"));

        let error = PricerError::IndexOutOfRange {
            index: 0,
            min: 1,
            max: 106,
        };
        assert_eq!(format!("{}", error), "Time step 0 out of range [1, 106]");
    }
}
