//! CLI frontend for the bayonet melee combat core.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "bayonet",
    about = "Bayonet: simulate and inspect turn-based melee encounters",
    version,
    propagate_version = true
)]
struct Cli {
    /// Print per-action resolution diagnostics to stderr
    #[arg(long, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an encounter to its end with the automatic player
    Simulate {
        /// Preset encounter to run
        #[arg(short, long, default_value = "terrain_melee")]
        preset: String,

        /// Load the encounter from a JSON file instead of a preset
        #[arg(short, long)]
        encounter: Option<PathBuf>,

        /// RNG seed for deterministic runs
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Maximum number of rounds
        #[arg(short, long, default_value = "40")]
        rounds: u32,

        /// Stance the automatic player fights in: aggressive, balanced, defensive
        #[arg(long, default_value = "balanced")]
        stance: String,

        /// Last-chance recoveries available when the player falls
        #[arg(long, default_value = "0")]
        grace: u32,

        /// Never end early as a partial success
        #[arg(long)]
        no_survival: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Show the full round log
        #[arg(short, long)]
        verbose: bool,

        /// Write the final battle state to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the preset encounters
    Presets,

    /// Write a preset encounter as editable JSON
    Export {
        /// Preset name
        name: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the balance tables
    Tables {
        /// Only this table: stances, actions, body, opponents
        table: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.trace);

    let result = match cli.command {
        Commands::Simulate {
            preset,
            encounter,
            seed,
            rounds,
            stance,
            grace,
            no_survival,
            json,
            verbose,
            output,
        } => commands::simulate::run(commands::simulate::SimulateArgs {
            preset: &preset,
            encounter: encounter.as_deref(),
            seed,
            rounds,
            stance: &stance,
            grace,
            survival: !no_survival,
            json,
            verbose,
            output: output.as_deref(),
        }),
        Commands::Presets => commands::presets::run(),
        Commands::Export { name, output } => commands::export::run(&name, output.as_deref()),
        Commands::Tables { table } => commands::tables::run(table.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Diagnostics go to stderr; `RUST_LOG` refines the default level.
fn init_tracing(trace: bool) {
    let level = if trace {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}
