#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Tile Chase levels headlessly.

mod script;
mod settings;
mod simulation;

use std::{fs, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tile_chase_system_scheduler::LevelCatalog;
use tile_chase_world::Level;
use tracing_subscriber::EnvFilter;

use crate::{script::InputScript, settings::Settings, simulation::Simulation};

/// Plays or validates Tile Chase level files.
#[derive(Debug, Parser)]
#[command(name = "tile-chase", version, about)]
struct Cli {
    /// TOML file overriding the scheduler cadences.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Mode,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Plays the levels in order against a simulated clock.
    Run {
        /// Level files in play order.
        #[arg(required = true)]
        levels: Vec<PathBuf>,
        /// Timed key presses, e.g. `250:d 500:s`.
        #[arg(long, default_value = "")]
        inputs: String,
        /// Simulated time between frames, in milliseconds.
        #[arg(long, default_value_t = 10)]
        frame_ms: u64,
        /// Simulated time after which the run stops, in milliseconds.
        #[arg(long, default_value_t = 120_000)]
        limit_ms: u64,
        /// Writes the final level state to this file.
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Parses each level file and prints it back in canonical form.
    Check {
        /// Level files to validate.
        #[arg(required = true)]
        levels: Vec<PathBuf>,
    },
}

/// Entry point for the Tile Chase command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Mode::Run {
            levels,
            inputs,
            frame_ms,
            limit_ms,
            save,
        } => {
            let catalog = LevelCatalog::new(read_levels(&levels)?);
            let script = InputScript::parse(&inputs).context("invalid --inputs")?;
            let mut simulation = Simulation::new(settings.config(), catalog, script)?;
            let summary = simulation.run(
                Duration::from_millis(frame_ms.max(1)),
                Duration::from_millis(limit_ms),
            )?;
            println!("{summary}");
            if let Some(path) = save {
                fs::write(&path, simulation.save())
                    .with_context(|| format!("failed to write level to {}", path.display()))?;
            }
        }
        Mode::Check { levels } => {
            for (path, text) in levels.iter().zip(read_levels(&levels)?) {
                let level = Level::parse(&text)
                    .with_context(|| format!("failed to load level {}", path.display()))?;
                print!("{}", level.to_text());
            }
        }
    }

    Ok(())
}

fn read_levels(paths: &[PathBuf]) -> Result<Vec<String>> {
    paths
        .iter()
        .map(|path| {
            fs::read_to_string(path)
                .with_context(|| format!("failed to read level at {}", path.display()))
        })
        .collect()
}
