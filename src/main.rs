//! Cadence - Release cycle planner
//!
//! CLI entry point for the cadence solver.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;

use cadence::calendar::{ics, ContentConfig};
use cadence::cli::{print_possibilities, prompt_selection};
use cadence::cycle::{Constraints, CycleSolver};

/// Release cycle planner
///
/// Enumerates every release schedule that satisfies the configured
/// constraints and lists them as numbered possibilities. With an output
/// file, one possibility is selected interactively and materialized
/// into an iCalendar file of weekly events.
#[derive(Parser, Debug)]
#[command(name = "cadence", version, about)]
struct Cli {
    /// Path to the constraints JSON file (defaults apply when omitted)
    #[arg(short = 'c', long)]
    constraints: Option<PathBuf>,

    /// Path to the calendar content JSON file
    #[arg(short = 'C', long)]
    conf: Option<PathBuf>,

    /// Beta number the previous release cycle ended on
    #[arg(short = 'l', long)]
    lastbeta: Option<i64>,

    /// Write the selected possibility to this iCalendar file
    #[arg(short = 'o', long, requires = "lastbeta")]
    output: Option<PathBuf>,
}

/// Load constraints from the given file, or the defaults without one.
fn load_constraints(path: Option<&Path>) -> Result<Constraints> {
    match path {
        Some(path) => Constraints::from_path(path)
            .with_context(|| format!("Failed to load constraints from '{}'", path.display())),
        None => Ok(Constraints::default()),
    }
}

/// Load calendar content from the given file, or an empty configuration.
fn load_content(path: Option<&Path>) -> Result<ContentConfig> {
    match path {
        Some(path) => ContentConfig::from_path(path)
            .with_context(|| format!("Failed to load content from '{}'", path.display())),
        None => Ok(ContentConfig::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let constraints = load_constraints(cli.constraints.as_deref())?;
    let mut solver = CycleSolver::new(constraints);
    solver.find();
    print_possibilities(solver.solved());

    let Some(output) = cli.output else {
        if solver.solved().is_empty() {
            eprintln!("No release cycle satisfies the constraints.");
        }
        return Ok(());
    };

    if solver.solved().is_empty() {
        bail!("no release cycle satisfies the constraints");
    }

    // clap enforces --lastbeta alongside --output
    let last_beta = cli
        .lastbeta
        .context("--lastbeta is required with --output")?;
    let content = load_content(cli.conf.as_deref())?;

    let choice = prompt_selection(solver.solved().len())?;
    let events = solver.create_calendar(choice, &content, last_beta);
    ics::write_path(&output, &events)
        .with_context(|| format!("Failed to write calendar to '{}'", output.display()))?;
    eprintln!("Wrote {} events to {}", events.len(), output.display());

    Ok(())
}
