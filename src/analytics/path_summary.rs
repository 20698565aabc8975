// src/analytics/path_summary.rs
//! Cross-path statistics of a simulated ensemble.
//!
//! Step `t` (1-based) is the price after `t` simulated steps, i.e. ensemble
//! row `t`. [`mean_path`] covers steps `1..=horizon_steps`, so
//! `mean_at_step(e, t) == mean_path(e)[t - 1]`.

use crate::error::{PricerError, PricerResult};
use crate::simulation::PathEnsemble;
use bitflags::bitflags;
use ndarray::{ArrayView1, Axis};
use serde::Serialize;

bitflags! {
    /// Statistics computed by [`summarize`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StatFlags: u32 {
        const MEAN    = 1 << 0;
        const STD_DEV = 1 << 1;
        const MIN     = 1 << 2;
        const MAX     = 1 << 3;
    }
}

/// Statistics of one ensemble row; unselected fields are `None`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepSummary {
    pub step: usize,
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

fn row_mean(row: ArrayView1<'_, f64>) -> f64 {
    row.sum() / row.len() as f64
}

/// Cross-path mean price after each of the `horizon_steps` simulated steps
pub fn mean_path(ensemble: &PathEnsemble) -> Vec<f64> {
    ensemble
        .prices()
        .axis_iter(Axis(0))
        .skip(1)
        .map(row_mean)
        .collect()
}

/// Cross-path mean price after `step_index` steps.
///
/// # Errors
///
/// `IndexOutOfRange` unless `1 <= step_index <= horizon_steps`.
pub fn mean_at_step(ensemble: &PathEnsemble, step_index: usize) -> PricerResult<f64> {
    let max = ensemble.horizon_steps();
    if step_index < 1 || step_index > max {
        return Err(PricerError::IndexOutOfRange {
            index: step_index,
            min: 1,
            max,
        });
    }
    ensemble
        .row(step_index)
        .map(row_mean)
        .ok_or(PricerError::IndexOutOfRange {
            index: step_index,
            min: 1,
            max,
        })
}

/// Selected statistics for every row, time 0 included.
///
/// `std_dev` is the sample standard deviation (M - 1 denominator) and is
/// `None` for a single-path ensemble.
pub fn summarize(ensemble: &PathEnsemble, stats: StatFlags) -> Vec<StepSummary> {
    ensemble
        .prices()
        .axis_iter(Axis(0))
        .enumerate()
        .map(|(step, row)| {
            let n = row.len();
            let mean = row_mean(row);
            StepSummary {
                step,
                mean: stats.contains(StatFlags::MEAN).then_some(mean),
                std_dev: (stats.contains(StatFlags::STD_DEV) && n > 1).then(|| {
                    let ss: f64 = row.iter().map(|&p| (p - mean).powi(2)).sum();
                    (ss / (n - 1) as f64).sqrt()
                }),
                min: stats
                    .contains(StatFlags::MIN)
                    .then(|| row.iter().copied().fold(f64::INFINITY, f64::min)),
                max: stats
                    .contains(StatFlags::MAX)
                    .then(|| row.iter().copied().fold(f64::NEG_INFINITY, f64::max)),
            }
        })
        .collect()
}
