//! Headless arena runner.
//!
//! Usage: `gunboat [CONFIG.json] [SECONDS]`. The config path may also come
//! from `GUNBOAT_CONFIG`; without one the default arena runs. Logging is
//! filtered with `RUST_LOG`. The final scoreboard is printed as JSON.

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use gunboat_sim::core::constants::TICK_RATE;
use gunboat_sim::{SimConfig, SimulationEngine};

const DEFAULT_SECONDS: u64 = 120;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gunboat_sim=info,gunboat_ai=warn".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().or_else(|| std::env::var("GUNBOAT_CONFIG").ok());
    let seconds = match args.next() {
        Some(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("invalid duration {raw:?}"))?,
        None => DEFAULT_SECONDS,
    };

    let config = match &config_path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {path}"))?;
            SimConfig::from_json_str(&json).with_context(|| format!("loading config {path}"))?
        }
        None => SimConfig::default(),
    };
    info!(seed = config.seed, boats = config.roster.len(), seconds, "starting arena");

    let mut engine = SimulationEngine::new(config);
    let started = Instant::now();
    let mut snapshot = engine.tick();
    for _ in 1..seconds * u64::from(TICK_RATE) {
        snapshot = engine.tick();
    }
    info!(
        ticks = snapshot.time.tick,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "arena finished"
    );

    println!("{}", serde_json::to_string_pretty(&snapshot.scoreboard)?);
    Ok(())
}
