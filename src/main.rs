//! Chatgamble command-line front end
//!
//! Runs single gambles and bulk simulations against an in-memory ledger.

use chatgamble::{
    common::config::{generate_sample_config, AppConfig, ConfigLoader, LogLevel},
    errors::{ConfigurationError, EngineResult},
    games::{
        CounterUpdateMode, EffectInstruction, GambleHandler, GambleResultKind, Roller, SeededRoller,
        ThreadRngRoller, WagerEntry,
    },
    memory::InMemoryLedger,
    services::{CommandTrigger, GambleService},
};
use clap::{Parser, Subcommand};
use std::{collections::HashMap, path::PathBuf, sync::Arc};
use tracing_subscriber::EnvFilter;

/// Chatgamble CLI
#[derive(Parser)]
#[command(name = "chatgamble")]
#[command(about = "Chat currency gambling engine")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Gamble once, as if a user typed the command in chat
    Play {
        /// Wager argument: a number, a percentage like 25% or "all"
        arg: String,

        /// Chat user placing the wager
        #[arg(short, long, default_value = "viewer")]
        user: String,

        /// Starting balance of the user
        #[arg(short, long, default_value = "1000")]
        balance: i64,

        /// Starting value of the jackpot counter
        #[arg(short, long, default_value = "0")]
        jackpot: i64,

        /// Seed for reproducible rolls
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print the effect list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a configuration file and report every problem
    Validate,

    /// Write the default configuration as TOML
    InitConfig {
        /// Destination file
        path: PathBuf,
    },

    /// Resolve many gambles and summarize the outcomes
    Simulate {
        /// Number of gambles
        #[arg(short, long, default_value = "10000")]
        rounds: usize,

        /// Points wagered each round
        #[arg(short, long, default_value = "100")]
        wager: i64,

        /// Seed for reproducible rolls
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> EngineResult<()> {
    let cli = Cli::parse();

    let loader = match &cli.config {
        Some(path) => ConfigLoader::new().with_path(path),
        None => ConfigLoader::new(),
    };

    match cli.command {
        Commands::InitConfig { path } => {
            init_logging(LogLevel::Info, cli.verbose);
            let path = path.to_string_lossy();
            generate_sample_config(&path)?;
            println!("Wrote default configuration to {}", path);
            Ok(())
        }
        Commands::Validate => {
            let config = loader.load_unvalidated()?;
            init_logging(config.logging.level, cli.verbose);
            run_validate(&config)
        }
        Commands::Play {
            arg,
            user,
            balance,
            jackpot,
            seed,
            json,
        } => {
            let config = loader.load()?;
            init_logging(config.logging.level, cli.verbose);
            run_play(&config, PlayArgs { arg, user, balance, jackpot, seed, json }).await
        }
        Commands::Simulate {
            rounds,
            wager,
            seed,
        } => {
            let config = loader.load()?;
            init_logging(config.logging.level, cli.verbose);
            run_simulate(&config, rounds, wager, seed)
        }
    }
}

fn init_logging(level: LogLevel, verbose: bool) {
    let default_filter = if verbose { "debug" } else { level.as_filter() };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
}

fn make_roller(seed: Option<u64>) -> Arc<dyn Roller> {
    match seed {
        Some(seed) => Arc::new(SeededRoller::new(seed)),
        None => Arc::new(ThreadRngRoller::new()),
    }
}

fn run_validate(config: &AppConfig) -> EngineResult<()> {
    println!("Mode: {}", config.gamble.mode);

    let errors = config.gamble.validation_errors();
    if errors.is_empty() {
        println!("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        println!("Error: {}", error);
    }
    Err(ConfigurationError::ValidationFailed(errors.join(" ")).into())
}

struct PlayArgs {
    arg: String,
    user: String,
    balance: i64,
    jackpot: i64,
    seed: Option<u64>,
    json: bool,
}

async fn run_play(config: &AppConfig, args: PlayArgs) -> EngineResult<()> {
    let PlayArgs {
        arg,
        user,
        balance,
        jackpot,
        seed,
        json,
    } = args;
    let settings = &config.gamble;
    let handler = GambleHandler::from_settings(settings, make_roller(seed))?;
    println!("Strategy: {}", handler.strategy().name());

    let ledger = Arc::new(
        InMemoryLedger::new()
            .with_balance(&user, &settings.currency_id, balance)
            .with_counter(&settings.jackpot_counter_id, jackpot),
    );
    let service = GambleService::with_ledger(handler, Arc::clone(&ledger));

    let effects = service.run(&CommandTrigger::command(user.as_str(), [arg])).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&effects)?);
    } else if effects.is_empty() {
        println!("No effects, the command was rejected");
    } else {
        for effect in &effects {
            println!("  {}", effect);
        }
    }

    println!(
        "Balance of {}: {} -> {}",
        user,
        balance,
        ledger.balance_of(&user, &settings.currency_id).unwrap_or(0)
    );
    println!(
        "Jackpot: {} -> {}",
        jackpot,
        ledger.counter_of(&settings.jackpot_counter_id).unwrap_or(0)
    );
    for line in ledger.transcript() {
        println!("Chat: {}", line);
    }

    Ok(())
}

/// Totals collected over a simulation run
#[derive(Debug, Default)]
struct SimulationReport {
    counts: HashMap<GambleResultKind, usize>,
    total_paid: i64,
    total_lost: i64,
    jackpot_contributions: i64,
}

fn run_simulate(
    config: &AppConfig,
    rounds: usize,
    wager: i64,
    seed: Option<u64>,
) -> EngineResult<()> {
    if wager <= 0 {
        return Err(ConfigurationError::InvalidValue {
            field: "wager".to_string(),
            value: wager.to_string(),
            reason: "Wager must be positive".to_string(),
        }
        .into());
    }

    let roller = make_roller(seed);
    let handler = GambleHandler::from_settings(&config.gamble, Arc::clone(&roller))?;
    let entry = WagerEntry::new("simulator", wager, wager);

    let mut report = SimulationReport::default();
    let mut jackpot = 0i64;

    for _ in 0..rounds {
        let result = handler
            .strategy()
            .winnings(roller.as_ref(), wager, handler.jackpot_enabled());
        *report.counts.entry(result.kind()).or_insert(0) += 1;

        for effect in handler.result_effects(&entry, &result, jackpot) {
            match effect {
                EffectInstruction::CurrencyAdjust { .. } => match effect.signed_amount() {
                    Some(delta) if delta >= 0 => report.total_paid += delta,
                    Some(delta) => report.total_lost -= delta,
                    None => {}
                },
                EffectInstruction::CounterUpdate {
                    mode: CounterUpdateMode::Increment,
                    value,
                    ..
                } => {
                    report.jackpot_contributions += value;
                    jackpot += value;
                }
                EffectInstruction::CounterUpdate {
                    mode: CounterUpdateMode::Set,
                    value,
                    ..
                } => jackpot = value,
                EffectInstruction::ChatMessage { .. } => {}
            }
        }
    }

    println!("Strategy: {}", handler.strategy().name());
    println!("Rounds: {} at {} points each", rounds, wager);
    for kind in [
        GambleResultKind::Won,
        GambleResultKind::Lost,
        GambleResultKind::Neutral,
        GambleResultKind::Jackpot,
    ] {
        println!("  {:<8} {}", kind.to_string(), report.counts.get(&kind).copied().unwrap_or(0));
    }
    println!("Total paid: {}", report.total_paid);
    println!("Total lost: {}", report.total_lost);
    println!("Jackpot contributions: {}", report.jackpot_contributions);
    println!("Jackpot at end: {}", jackpot);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatgamble::{common::config::GambleMode, errors::EngineError, games::RangeSpec};

    fn overlapping_ranges(mode: GambleMode) -> AppConfig {
        let mut config = AppConfig::default();
        config.gamble.mode = mode;
        config.gamble.ranges = vec![
            RangeSpec::normal(0, 60, -1.0),
            RangeSpec::normal(50, 100, 1.0),
        ];
        config
    }

    #[test]
    fn test_validate_ignores_ranges_outside_ranges_mode() {
        assert!(run_validate(&overlapping_ranges(GambleMode::Threshold)).is_ok());
    }

    #[test]
    fn test_validate_reports_range_error_once() {
        match run_validate(&overlapping_ranges(GambleMode::Ranges)) {
            Err(EngineError::Configuration(ConfigurationError::ValidationFailed(message))) => {
                assert_eq!(message.matches("There are overlapping ranges.").count(), 1);
            }
            other => panic!("Expected validation failure, got {:?}", other),
        }
    }
}
