// src/simulation/ensemble.rs
use crate::error::{validation::*, PricerError, PricerResult};
use ndarray::{Array2, ArrayView1, Axis};

/// Simulated prices laid out as `(horizon_steps + 1) × path_count`.
///
/// Row `i` holds every path's price after `i` steps; row 0 is the initial
/// price for all paths. Column `j` is one full path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathEnsemble {
    prices: Array2<f64>,
}

impl PathEnsemble {
    pub(crate) fn from_simulated(prices: Array2<f64>) -> Self {
        PathEnsemble { prices }
    }

    /// Wrap an externally built price matrix.
    ///
    /// Requires at least one step and one path, finite values, and a row 0
    /// holding the same positive initial price for every path.
    pub fn from_array(prices: Array2<f64>) -> PricerResult<Self> {
        let (rows, cols) = prices.dim();
        validate_steps(rows.saturating_sub(1))?;
        validate_paths(cols)?;

        let s0 = prices[[0, 0]];
        validate_positive("initial_price", s0)?;
        if let Some(&bad) = prices.row(0).iter().find(|&&p| p != s0) {
            return Err(PricerError::InvalidParameter {
                parameter: "initial_price".to_string(),
                value: bad,
                constraint: format!("row 0 must equal {} for every path", s0),
            });
        }
        if let Some(&bad) = prices.iter().find(|p| !p.is_finite()) {
            return Err(PricerError::InvalidParameter {
                parameter: "price".to_string(),
                value: bad,
                constraint: "must be finite".to_string(),
            });
        }
        Ok(PathEnsemble { prices })
    }

    /// Single-step ensemble with the given terminal prices
    pub fn from_terminal_prices(initial_price: f64, terminal: &[f64]) -> PricerResult<Self> {
        validate_paths(terminal.len())?;
        let mut prices = Array2::from_elem((2, terminal.len()), initial_price);
        for (slot, &p) in prices.row_mut(1).iter_mut().zip(terminal) {
            *slot = p;
        }
        Self::from_array(prices)
    }

    pub fn horizon_steps(&self) -> usize {
        self.prices.nrows() - 1
    }

    pub fn path_count(&self) -> usize {
        self.prices.ncols()
    }

    pub fn initial_price(&self) -> f64 {
        self.prices[[0, 0]]
    }

    /// Prices of every path after `step` steps (0 = initial row)
    pub fn row(&self, step: usize) -> Option<ArrayView1<'_, f64>> {
        (step < self.prices.nrows()).then(|| self.prices.row(step))
    }

    /// One full path, time 0 included
    pub fn path(&self, index: usize) -> Option<ArrayView1<'_, f64>> {
        (index < self.prices.ncols()).then(|| self.prices.column(index))
    }

    pub fn terminal_prices(&self) -> ArrayView1<'_, f64> {
        self.prices.row(self.prices.nrows() - 1)
    }

    /// Iterate over paths (columns)
    pub fn paths(&self) -> impl Iterator<Item = ArrayView1<'_, f64>> {
        self.prices.axis_iter(Axis(1))
    }

    pub fn prices(&self) -> &Array2<f64> {
        &self.prices
    }

    pub fn into_inner(self) -> Array2<f64> {
        self.prices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_shape_accessors() {
        let ensemble = PathEnsemble::from_array(array![
            [100.0, 100.0, 100.0],
            [101.0, 99.0, 100.5],
            [102.0, 98.0, 103.0]
        ])
        .unwrap();

        assert_eq!(ensemble.horizon_steps(), 2);
        assert_eq!(ensemble.path_count(), 3);
        assert_eq!(ensemble.initial_price(), 100.0);
        assert_eq!(ensemble.terminal_prices().to_vec(), vec![102.0, 98.0, 103.0]);
        assert_eq!(ensemble.path(1).unwrap().to_vec(), vec![100.0, 99.0, 98.0]);
        assert!(ensemble.path(3).is_none());
        assert!(ensemble.row(3).is_none());
        assert_eq!(ensemble.paths().count(), 3);
    }

    #[test]
    fn test_rejects_inconsistent_initial_row() {
        let result = PathEnsemble::from_array(array![[100.0, 99.0], [101.0, 98.0]]);
        assert!(matches!(result, Err(PricerError::InvalidParameter { .. })));
    }

    #[test]
    fn test_rejects_missing_steps() {
        let result = PathEnsemble::from_array(array![[100.0, 100.0]]);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_terminal_prices() {
        let ensemble = PathEnsemble::from_terminal_prices(50.0, &[40.0, 60.0]).unwrap();
        assert_eq!(ensemble.horizon_steps(), 1);
        assert_eq!(ensemble.row(0).unwrap().to_vec(), vec![50.0, 50.0]);
        assert!(PathEnsemble::from_terminal_prices(50.0, &[]).is_err());
    }
}
