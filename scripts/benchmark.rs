// scripts/benchmark.rs
//! Times sequential and parallel ensemble generation plus pricing for a
//! range of path counts and writes the results to `bench/results.csv`.

use mc_call_pricer::analytics::bs_analytic;
use mc_call_pricer::math_utils::Timer;
use mc_call_pricer::mc::{payoffs, pricer};
use mc_call_pricer::models::SimulationModel;
use mc_call_pricer::rng;
use mc_call_pricer::simulation::{simulate, simulate_par, PathEnsemble, SimulationParameters};
use mc_call_pricer::PricerResult;
use std::fs::File;
use std::io::Write;

const S0: f64 = 100.0;
const K: f64 = 100.0;
const R: f64 = 0.01;
const SIGMA: f64 = 0.2;
const T: f64 = 1.0;
const STEPS: usize = 52;
const SEED: u64 = 42;

#[derive(Debug)]
struct BenchmarkResult {
    name: &'static str,
    paths: usize,
    time_ms: f64,
    throughput_paths_per_sec: f64,
    value: f64,
    standard_error: f64,
    relative_error: f64,
}

fn time_run<F>(name: &'static str, paths: usize, generate: F) -> PricerResult<BenchmarkResult>
where
    F: FnOnce() -> PricerResult<PathEnsemble>,
{
    let analytic = bs_analytic::bs_call_price(S0, K, R, SIGMA, T);

    let mut timer = Timer::new();
    timer.start();
    let ensemble = generate()?;
    let estimate = pricer::price(&payoffs::evaluate_call(&ensemble, K)?, R, T)?;
    let time_ms = timer.elapsed_ms();

    Ok(BenchmarkResult {
        name,
        paths,
        time_ms,
        throughput_paths_per_sec: paths as f64 / (time_ms / 1000.0),
        value: estimate.value,
        standard_error: estimate.standard_error,
        relative_error: (estimate.value - analytic).abs() / analytic,
    })
}

fn run_benchmarks() -> PricerResult<Vec<BenchmarkResult>> {
    let mut results = Vec::new();
    for &paths in &[10_000, 50_000, 200_000] {
        tracing::info!(paths, "running benchmarks");
        let params = SimulationParameters::new(S0, STEPS, paths, R, SIGMA, T)?;

        results.push(time_run("sequential", paths, || {
            simulate(
                &params,
                SimulationModel::RiskNeutral,
                &mut rng::seed_rng_from_u64(SEED),
            )
        })?);
        results.push(time_run("parallel", paths, || {
            simulate_par(&params, SimulationModel::RiskNeutral, SEED)
        })?);
    }
    Ok(results)
}

fn write_results(results: &[BenchmarkResult]) -> std::io::Result<()> {
    std::fs::create_dir_all("bench")?;
    let mut file = File::create("bench/results.csv")?;
    writeln!(
        file,
        "name,paths,time_ms,paths_per_sec,value,standard_error,relative_error"
    )?;
    for r in results {
        writeln!(
            file,
            "{},{},{:.3},{:.0},{:.6},{:.6},{:.6}",
            r.name,
            r.paths,
            r.time_ms,
            r.throughput_paths_per_sec,
            r.value,
            r.standard_error,
            r.relative_error
        )?;
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    println!(
        "CPU cores: {}, rayon threads: {}",
        num_cpus::get(),
        rayon::current_num_threads()
    );

    let results = match run_benchmarks() {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("benchmark failed: {e}");
            std::process::exit(1);
        }
    };

    println!(
        "{:<12} {:>10} {:>12} {:>14} {:>10} {:>10} {:>10}",
        "name", "paths", "time_ms", "paths/sec", "value", "SE", "rel_err"
    );
    for r in &results {
        println!(
            "{:<12} {:>10} {:>12.3} {:>14.0} {:>10.4} {:>10.4} {:>10.5}",
            r.name,
            r.paths,
            r.time_ms,
            r.throughput_paths_per_sec,
            r.value,
            r.standard_error,
            r.relative_error
        );
    }

    if let Err(e) = write_results(&results) {
        tracing::error!("could not write bench/results.csv: {e}");
        std::process::exit(1);
    }
    println!("\nResults written to bench/results.csv");
}
