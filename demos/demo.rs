// demos/demo.rs
//! End-to-end run on fixed market data: value an index call against its
//! last traded price, then forecast the index and query one day.
//!
//! Usage: `cargo run --example demo -- [step] [output_dir]`

use chrono::NaiveDate;
use mc_call_pricer::analytics::path_summary::{summarize, StatFlags};
use mc_call_pricer::config::EngineConfig;
use mc_call_pricer::engine::{forecast_index, value_call};
use mc_call_pricer::market_data::{HistoricalCloses, OptionQuoteSnapshot};
use mc_call_pricer::output::{self, CsvSeriesSink};
use mc_call_pricer::rng;
use mc_call_pricer::PricerResult;

fn sample_market() -> HistoricalCloses {
    let quote = OptionQuoteSnapshot {
        index_bid: 2398.5,
        index_ask: 2401.5,
        treasury_yield: 4.3,
        strike: 2425.0,
        last_price: 88.4,
        implied_volatility: 0.165,
        valuation_date: NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date"),
        expiration_date: NaiveDate::from_ymd_opt(2024, 8, 16).expect("valid date"),
    };

    // Synthetic close history with ~0.8% daily moves
    let closes = (0..200)
        .map(|i| 2300.0 * (1.0 + 0.0004 * i as f64) * (1.0 + 0.008 * (i as f64 * 1.7).sin()))
        .collect();

    HistoricalCloses { quote, closes }
}

fn run(step: usize, output_dir: Option<&str>) -> PricerResult<()> {
    let cfg = EngineConfig::from_env()?;
    let market = sample_market();
    let mut rng = rng::seed_rng_from_u64(cfg.seed);

    println!("Monte Carlo index call valuation");
    println!("================================\n");

    let valuation = value_call(&market, &cfg, &mut rng)?;
    let inputs = &valuation.inputs;
    println!("Current Index Level (S): {:.2}", inputs.spot_price);
    println!("Time to Expiration (T): {:.4} years", inputs.time_to_expiry_years);
    println!("Risk-Free Interest Rate (r): {:.4}", inputs.risk_free_rate);
    println!("Volatility (vol): {:.4}", inputs.volatility);
    println!(
        "Chosen Call Option: Strike Price = {}, Last Price = {}",
        inputs.strike, inputs.market_price
    );
    println!("Monte Carlo Results:");
    println!("{}", valuation.estimate);
    println!("Black-Scholes reference: {:.2}", valuation.closed_form);
    println!(
        "Discrepancy vs market: {:.2} ({:.1} SE)\n",
        valuation.convergence.discrepancy, valuation.convergence.z_score
    );

    let forecast = forecast_index(&market, &cfg, &mut rng)?;
    println!(
        "Simulated {} index paths over {} days from {:.2}",
        forecast.ensemble.path_count(),
        forecast.ensemble.horizon_steps(),
        forecast.inputs.initial_index_price
    );
    match forecast.average_at(step) {
        Ok(avg) => println!("Average Index Price at Time Step {}: {:.2}", step, avg),
        Err(e) => println!("Cannot query time step {}: {}", step, e),
    }

    if let Some(dir) = output_dir {
        std::fs::create_dir_all(dir)?;
        let mut sink = CsvSeriesSink::create(format!("{}/series.csv", dir))?;
        output::emit_ensemble(&mut sink, &forecast.ensemble, &forecast.mean_path)?;
        output::emit_density(&mut sink, &valuation)?;
        output::write_ensemble_csv(format!("{}/index_paths.csv", dir), &forecast.ensemble)?;
        output::write_summary_to_csv(
            format!("{}/index_summary.csv", dir),
            &summarize(&forecast.ensemble, StatFlags::all()),
        )?;
        output::write_valuation_json(format!("{}/valuation.json", dir), &valuation)?;
        println!("\nResults written to {}", dir);
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let step = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(30);
    let output_dir = args.get(2).map(String::as_str);

    if let Err(e) = run(step, output_dir) {
        tracing::error!("demo failed: {e}");
        std::process::exit(1);
    }
}
