use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fillcsp::render::render_grid;
use fillcsp::{solve_with_config, GridConfig, SolverConfig, WordList};

#[derive(Parser)]
#[command(name = "fillcsp", about = "Fill a crossword grid from a word list", version)]
struct Cli {
    /// Grid structure file: `#` for blocked cells, `_` or `.` for open ones
    structure: PathBuf,

    /// Word list file, one word per line
    words: PathBuf,

    /// Write the filled grid to this file as well as printing it
    output: Option<PathBuf>,

    /// Solver configuration (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Give up after this many search states
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    max_states: Option<u64>,

    /// Allow the same word in more than one slot
    #[arg(long)]
    allow_repeats: bool,

    /// Re-establish arc consistency after every tentative choice
    #[arg(long)]
    mac: bool,

    /// Log progress at debug level (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut solver_config = match &cli.config {
        Some(path) => SolverConfig::load(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => SolverConfig::default(),
    };
    if let Some(max_states) = cli.max_states {
        solver_config = solver_config.with_max_states(max_states);
    }
    if cli.allow_repeats {
        solver_config = solver_config.with_distinct_words(false);
    }
    if cli.mac {
        solver_config = solver_config.with_arc_consistency_maintained(true);
    }
    solver_config.validate().context("invalid solver configuration")?;

    let grid_config = GridConfig::load(&cli.structure)
        .with_context(|| format!("reading structure {}", cli.structure.display()))?;
    let words = WordList::load(&cli.words)
        .with_context(|| format!("reading words {}", cli.words.display()))?;

    let result = solve_with_config(&grid_config, &words, &solver_config)?;
    tracing::info!(statistics = ?result.statistics);

    match result.assignment {
        None => println!("No solution."),
        Some(solution) => {
            let display_grid = render_grid(&grid_config, &solution);
            println!("{}", display_grid);

            if let Some(output) = &cli.output {
                fs::write(output, display_grid + "\n")
                    .with_context(|| format!("writing {}", output.display()))?;
            }
        }
    }

    Ok(())
}
