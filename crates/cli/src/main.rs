//! # credit-default
//!
//! Operator command line for the credit-default pipeline.

use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use registry_facade::{ServingSlot, DEFAULT_METRIC};
use training_facade::{DataPaths, PrepareConfig, SweepConfig};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::CliResult;

#[derive(Parser)]
#[command(name = "credit-default")]
#[command(about = "Credit-default model pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build feature tables from a raw loans CSV and split them
    Prepare {
        /// Raw loans table with the six input columns and `default`
        #[arg(short, long)]
        input: PathBuf,

        /// Directory for X_train/X_test/y_train/y_test
        #[arg(short, long, default_value = "data/processed")]
        output: PathBuf,

        /// Portion of rows held out for testing
        #[arg(long, default_value = "0.2")]
        test_ratio: f64,

        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Run the hyperparameter sweep and record every configuration
    Train {
        /// Directory holding the processed tables
        #[arg(short, long, default_value = "data/processed")]
        data: PathBuf,

        #[arg(long, default_value = "mlruns")]
        tracking_root: PathBuf,

        /// Where the fitted scaler is written
        #[arg(long, default_value = "processors/scaler.json")]
        scaler: PathBuf,

        /// JSON sweep plan (default: the built-in three-family grid)
        #[arg(short, long)]
        plan: Option<PathBuf>,

        /// Run configurations one at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Print the run analysis and leaderboard
    Leaderboard {
        #[arg(short, long, default_value = DEFAULT_METRIC)]
        metric: String,

        /// Only runs of this experiment
        #[arg(short, long)]
        experiment: Option<String>,

        #[arg(long, default_value = "mlruns")]
        tracking_root: PathBuf,
    },

    /// Select the best run and, once confirmed, deploy it to the serving slot
    Promote {
        #[arg(short, long, default_value = DEFAULT_METRIC)]
        metric: String,

        #[arg(long, default_value = "mlruns")]
        tracking_root: PathBuf,

        /// Serving slot model path
        #[arg(long, default_value = "models/model.json")]
        model: PathBuf,
    },
}

fn run(cli: Cli) -> CliResult<()> {
    let mut out = io::stdout().lock();
    match cli.command {
        Commands::Prepare {
            input,
            output,
            test_ratio,
            seed,
        } => {
            let config = PrepareConfig::new(input)
                .output(DataPaths::new(output))
                .test_ratio(test_ratio)
                .seed(seed);
            commands::run_prepare(&config, &mut out)
        }

        Commands::Train {
            data,
            tracking_root,
            scaler,
            plan,
            sequential,
        } => {
            let config = SweepConfig::default()
                .data(DataPaths::new(data))
                .tracking_root(tracking_root)
                .scaler_path(scaler)
                .parallel(!sequential);
            commands::run_train(config, plan.as_deref(), &mut out)
        }

        Commands::Leaderboard {
            metric,
            experiment,
            tracking_root,
        } => commands::run_leaderboard(&tracking_root, &metric, experiment.as_deref(), &mut out),

        Commands::Promote {
            metric,
            tracking_root,
            model,
        } => {
            let slot = ServingSlot {
                model_path: model,
                ..ServingSlot::default()
            };
            let mut input = io::stdin().lock();
            commands::run_promote(&tracking_root, &metric, slot, &mut input, &mut out).map(|_| ())
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
