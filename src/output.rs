// src/output.rs
//! Sinks for the presentation side: the engine hands over plain numeric
//! series and never decides how they are drawn.

use crate::analytics::path_summary::StepSummary;
use crate::engine::CallValuation;
use crate::error::PricerResult;
use crate::simulation::PathEnsemble;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Receiver of named numeric series (simulated paths, mean path, densities)
pub trait SeriesSink {
    fn series(&mut self, name: &str, values: &[f64]) -> PricerResult<()>;
}

/// Writes every series as `name,index,value` rows
pub struct CsvSeriesSink<W: Write> {
    out: W,
}

impl<W: Write> CsvSeriesSink<W> {
    pub fn new(mut out: W) -> io::Result<Self> {
        writeln!(out, "series,index,value")?;
        Ok(Self { out })
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl CsvSeriesSink<BufWriter<File>> {
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Self::new(BufWriter::new(File::create(path)?))
    }
}

impl<W: Write> SeriesSink for CsvSeriesSink<W> {
    fn series(&mut self, name: &str, values: &[f64]) -> PricerResult<()> {
        for (i, v) in values.iter().enumerate() {
            writeln!(self.out, "{},{},{}", name, i, v)?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Send every path of the ensemble, then its cross-path mean
pub fn emit_ensemble<S: SeriesSink + ?Sized>(
    sink: &mut S,
    ensemble: &PathEnsemble,
    mean_path: &[f64],
) -> PricerResult<()> {
    for (j, path) in ensemble.paths().enumerate() {
        sink.series(&format!("path_{}", j), &path.to_vec())?;
    }
    sink.series("mean_path", mean_path)
}

/// Send the discrepancy density with its domain
pub fn emit_density<S: SeriesSink + ?Sized>(
    sink: &mut S,
    valuation: &CallValuation,
) -> PricerResult<()> {
    sink.series("density_domain", &valuation.convergence.density_domain)?;
    sink.series("density_values", &valuation.convergence.density_values)
}

/// Ensemble as a wide table: one row per step, one column per path
pub fn write_ensemble_csv<P: AsRef<Path>>(filename: P, ensemble: &PathEnsemble) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(filename)?);
    let header: Vec<String> = (0..ensemble.path_count())
        .map(|j| format!("path_{}", j))
        .collect();
    writeln!(file, "step,{}", header.join(","))?;
    for (step, row) in ensemble.prices().rows().into_iter().enumerate() {
        let cells: Vec<String> = row.iter().map(|p| p.to_string()).collect();
        writeln!(file, "{},{}", step, cells.join(","))?;
    }
    file.flush()
}

pub fn write_summary_to_csv<P: AsRef<Path>>(filename: P, rows: &[StepSummary]) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(filename)?);
    writeln!(file, "step,mean,std_dev,min,max")?;
    let cell = |v: Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();
    for r in rows {
        writeln!(
            file,
            "{},{},{},{},{}",
            r.step,
            cell(r.mean),
            cell(r.std_dev),
            cell(r.min),
            cell(r.max)
        )?;
    }
    file.flush()
}

pub fn write_valuation_json<P: AsRef<Path>>(filename: P, valuation: &CallValuation) -> PricerResult<()> {
    let file = BufWriter::new(File::create(filename)?);
    serde_json::to_writer_pretty(file, valuation)?;
    Ok(())
}
