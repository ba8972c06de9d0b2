//! Castaway - Entry Point
//!
//! Generates an island, picks a decision oracle and runs the colony on a
//! fixed tick period, printing the map as it goes.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use castaway::core::config::SimulationConfig;
use castaway::core::error::Result;
use castaway::decision::{DecisionOracle, HeuristicOracle};
use castaway::llm::LlmOracle;
use castaway::render::TextRenderer;
use castaway::simulation::Colony;

/// Island survival colony simulation
#[derive(Parser, Debug)]
#[command(name = "castaway")]
#[command(about = "Run an island survival colony driven by a decision oracle")]
struct Args {
    /// Number of ticks to simulate
    #[arg(long, default_value_t = 2000)]
    ticks: u64,

    /// RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Milliseconds per tick (overrides the config file)
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Print the map every N ticks (0 disables rendering)
    #[arg(long, default_value_t = 20)]
    render_every: u64,

    /// Use the built-in heuristic oracle even if LLM_API_KEY is set
    #[arg(long)]
    heuristic: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("castaway=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(ms) = args.tick_ms {
        config.tick_rate_ms = ms;
    }
    config.validate()?;

    let oracle = select_oracle(&config, args.heuristic);
    let period = Duration::from_millis(config.tick_rate_ms);

    tracing::info!(seed = config.seed, ticks = args.ticks, "Castaway starting...");
    let mut colony = Colony::generate(config, oracle)?;
    if args.render_every > 0 {
        colony = colony.with_sink(TextRenderer::stdout(args.render_every));
    }

    colony.run(args.ticks, period).await?;

    let world = colony.world();
    println!(
        "\nFinal state after {} ticks: {} survivors, {} mobs, {} chests.",
        world.current_tick(),
        world.survivors.len(),
        world.mobs.len(),
        world.chests.len()
    );
    for entry in world.log.tail(10) {
        println!("[{:>5}] {}", entry.tick, entry.message);
    }
    Ok(())
}

fn select_oracle(config: &SimulationConfig, force_heuristic: bool) -> Arc<dyn DecisionOracle> {
    if !force_heuristic {
        match LlmOracle::from_env(config.threat_radius) {
            Ok(oracle) => {
                tracing::info!("Using language model oracle");
                return Arc::new(oracle);
            }
            Err(_) => tracing::warn!("LLM_API_KEY not set - using heuristic decisions"),
        }
    }
    Arc::new(HeuristicOracle::new(config.threat_radius))
}
