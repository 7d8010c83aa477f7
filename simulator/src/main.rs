use anyhow::Context;
use clap::Parser;
use royal_simulator::{Settings, Simulator};
use royal_types::casino::GameType;
use std::{path::PathBuf, str::FromStr};
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long)]
    game: GameType,

    #[arg(short, long, default_value_t = 1_000)]
    rounds: u64,

    #[arg(short, long, default_value_t = 10)]
    bet: u64,

    #[arg(short, long, default_value_t = 1)]
    players: usize,

    /// Overrides the seed in the config file.
    #[arg(short, long)]
    seed: Option<u64>,

    /// YAML file with `engine` and `strategy` sections.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    // Parse args
    let args = Args::parse();

    // Create logger
    let level = Level::from_str(&args.log_level).context("invalid log level")?;
    tracing_subscriber::fmt().with_max_level(level).init();

    // Load settings
    let mut settings = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("could not read config {}", path.display()))?;
            serde_yaml::from_str::<Settings>(&raw)
                .with_context(|| format!("could not parse config {}", path.display()))?
        }
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings.engine.seed = Some(seed);
    }
    info!(game = %args.game, rounds = args.rounds, players = args.players, "starting simulation");

    let simulator = Simulator::new(args.game, args.bet, args.rounds, settings)
        .context("invalid simulation")?;
    let report = simulator.run(args.players).context("simulation failed")?;
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("failed to encode report")?
    );
    Ok(())
}
