// src/mc/convergence.rs
//! Discrepancy between a Monte Carlo price and an observed market price.
//!
//! The theoretical estimate is treated as Normal with mean C0 and standard
//! deviation SE. Shifting by the market price gives the distribution of the
//! pricing discrepancy:
//! ```text
//! D ~ N(C0 - market, SE²)
//! ```

use crate::error::{validation::*, PricerError, PricerResult};
use crate::math_utils::linspace;
use crate::mc::pricer::PriceEstimate;
use serde::{Deserialize, Serialize};
use statrs::distribution::{Continuous, Normal};

/// Sampling grid for the discrepancy density
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityGrid {
    /// Number of evenly spaced points
    pub points: usize,
    /// Half-width of the domain in standard errors
    pub width: f64,
}

impl Default for DensityGrid {
    fn default() -> Self {
        DensityGrid {
            points: 100,
            width: 3.0,
        }
    }
}

impl DensityGrid {
    pub fn validate(&self) -> PricerResult<()> {
        if self.points < 2 {
            return Err(PricerError::InvalidParameter {
                parameter: "density_points".to_string(),
                value: self.points as f64,
                constraint: "must be at least 2".to_string(),
            });
        }
        validate_positive("density_width", self.width)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceResult {
    /// theoretical value - market price
    pub discrepancy: f64,
    pub standard_error: f64,
    /// discrepancy / standard error
    pub z_score: f64,
    pub theoretical_value: f64,
    pub market_price: f64,
    pub density_domain: Vec<f64>,
    pub density_values: Vec<f64>,
}

impl ConvergenceResult {
    /// Whether the market price lies within `k` standard errors of the estimate
    pub fn within(&self, k: f64) -> bool {
        self.z_score.abs() <= k
    }
}

/// Discrepancy density over `discrepancy ± 3·SE` at 100 points
pub fn analyze(theoretical: &PriceEstimate, market_price: f64) -> PricerResult<ConvergenceResult> {
    analyze_with(theoretical, market_price, DensityGrid::default())
}

/// A zero standard error gives a point mass: the domain collapses to the single
/// point `discrepancy` carrying an infinite density, and `z_score` is infinite
/// unless the discrepancy is zero too.
///
/// # Errors
///
/// `InvalidParameter` when the market price or estimate is not finite, the
/// standard error is negative or non-finite, or the grid is malformed.
pub fn analyze_with(
    theoretical: &PriceEstimate,
    market_price: f64,
    grid: DensityGrid,
) -> PricerResult<ConvergenceResult> {
    grid.validate()?;
    validate_finite("market_price", market_price)?;
    validate_finite("theoretical_value", theoretical.value)?;
    validate_non_negative("standard_error", theoretical.standard_error)?;

    let discrepancy = theoretical.value - market_price;
    let se = theoretical.standard_error;

    if se == 0.0 {
        tracing::warn!(discrepancy, "zero standard error; discrepancy density is a point mass");
        let z_score = if discrepancy == 0.0 {
            0.0
        } else {
            discrepancy.signum() * f64::INFINITY
        };
        return Ok(ConvergenceResult {
            discrepancy,
            standard_error: se,
            z_score,
            theoretical_value: theoretical.value,
            market_price,
            density_domain: vec![discrepancy],
            density_values: vec![f64::INFINITY],
        });
    }

    let density = Normal::new(discrepancy, se).map_err(|e| PricerError::InvalidParameter {
        parameter: "standard_error".to_string(),
        value: se,
        constraint: e.to_string(),
    })?;

    let density_domain = linspace(
        discrepancy - grid.width * se,
        discrepancy + grid.width * se,
        grid.points,
    );
    let density_values = density_domain.iter().map(|&x| density.pdf(x)).collect();

    tracing::debug!(discrepancy, standard_error = se, "analyzed pricing discrepancy");

    Ok(ConvergenceResult {
        discrepancy,
        standard_error: se,
        z_score: discrepancy / se,
        theoretical_value: theoretical.value,
        market_price,
        density_domain,
        density_values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math_utils::{norm_pdf, trapezoid};

    fn estimate() -> PriceEstimate {
        PriceEstimate {
            value: 12.5,
            standard_error: 0.2,
        }
    }

    #[test]
    fn test_default_grid() {
        let result = analyze(&estimate(), 12.0).unwrap();

        assert!((result.discrepancy - 0.5).abs() < 1e-12);
        assert_eq!(result.density_domain.len(), 100);
        assert_eq!(result.density_values.len(), 100);
        assert!((result.density_domain[0] - (0.5 - 0.6)).abs() < 1e-12);
        assert!((result.density_domain[99] - (0.5 + 0.6)).abs() < 1e-12);
        assert!(result.density_values.iter().all(|&v| v >= 0.0));
        assert!((result.z_score - 2.5).abs() < 1e-12);
        assert!(!result.within(2.0));
        assert!(result.within(3.0));
    }

    #[test]
    fn test_density_matches_normal_pdf() {
        let result = analyze(&estimate(), 12.0).unwrap();
        for (&x, &y) in result.density_domain.iter().zip(&result.density_values) {
            let expected = norm_pdf((x - 0.5) / 0.2) / 0.2;
            assert!((y - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_density_integrates_to_one_and_peaks_at_discrepancy() {
        let grid = DensityGrid {
            points: 1001,
            width: 8.0,
        };
        let result = analyze_with(&estimate(), 13.1, grid).unwrap();

        let area = trapezoid(&result.density_domain, &result.density_values);
        assert!((area - 1.0).abs() < 1e-4, "area = {}", area);

        let (peak, _) = result
            .density_values
            .iter()
            .enumerate()
            .fold((0, f64::MIN), |best, (i, &v)| if v > best.1 { (i, v) } else { best });
        let resolution = result.density_domain[1] - result.density_domain[0];
        assert!((result.density_domain[peak] - result.discrepancy).abs() <= resolution);
    }

    #[test]
    fn test_zero_standard_error_collapses_to_point_mass() {
        let worthless = PriceEstimate {
            value: 0.0,
            standard_error: 0.0,
        };
        let result = analyze(&worthless, 0.05).unwrap();

        assert!((result.discrepancy + 0.05).abs() < 1e-12);
        assert_eq!(result.density_domain, vec![result.discrepancy]);
        assert_eq!(result.density_values, vec![f64::INFINITY]);
        assert_eq!(result.z_score, f64::NEG_INFINITY);
        assert!(!result.within(3.0));

        let exact = analyze(&worthless, 0.0).unwrap();
        assert_eq!(exact.z_score, 0.0);
        assert!(exact.within(0.0));
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let negative = PriceEstimate {
            value: 1.0,
            standard_error: -0.1,
        };
        assert!(matches!(
            analyze(&negative, 1.0),
            Err(PricerError::InvalidParameter { .. })
        ));
        assert!(analyze(&estimate(), f64::NAN).is_err());
    }
}
