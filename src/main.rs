//! Wayfinder - All-Pairs Shortest Paths
//!
//! Run with: cargo run
//!
//! Loads a small graph of named locations, relaxes the distance table in
//! place through every intermediate location, and reports each improving
//! update on stdout. Everything else (banner, progress, the final table)
//! goes to stderr so the update report stays line-oriented and clean.

use chrono::Utc;
use clap::Parser;
use color_eyre::eyre::Result;
use console::style;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod graph;
mod solver;

use config::{Config, RelaxationLog};
use graph::DistanceMatrix;
use solver::{relax, ConsoleReporter, Relaxation, RelaxationObserver};

/// Command-line options
#[derive(Debug, Parser)]
#[command(
    name = "wayfinder",
    about = "All-pairs shortest paths with per-update reporting"
)]
struct Args {
    /// TOML graph file (default: WAYFINDER_GRAPH or the built-in sample)
    #[arg(short, long)]
    graph: Option<PathBuf>,

    /// Append every update to this JSON-lines event log
    #[arg(long)]
    event_log: Option<PathBuf>,
}

fn print_banner() {
    eprintln!();
    eprintln!(
        "{}",
        style("═══════════════════════════════════════════════════════════════").cyan()
    );
    eprintln!(
        "{}",
        style(" WAYFINDER - All-Pairs Shortest Paths").cyan().bold()
    );
    eprintln!(
        "{}",
        style("    Triple-loop relaxation | Per-update reporting").cyan()
    );
    eprintln!(
        "{}",
        style("═══════════════════════════════════════════════════════════════").cyan()
    );
    eprintln!();
}

/// Prints updates to stdout and keeps them for the summary and event log
#[derive(Default)]
struct RunReporter {
    console: ConsoleReporter,
    relaxations: Vec<Relaxation>,
}

impl RelaxationObserver for RunReporter {
    fn on_relaxation(&mut self, relaxation: &Relaxation) {
        self.console.on_relaxation(relaxation);
        self.relaxations.push(relaxation.clone());
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wayfinder=info".parse()?),
        )
        .init();

    let args = Args::parse();

    print_banner();

    // Load configuration
    let mut config = match &args.graph {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    if let Some(path) = &args.event_log {
        config.event_log = true;
        config.event_log_path = path.display().to_string();
    }
    config.validate()?;
    config.print_summary();
    eprintln!();

    // =============================================
    // PHASE 1: THE SURVEYOR
    // =============================================
    eprintln!("{}", style("═══ PHASE 1: THE SURVEYOR ═══").blue().bold());
    eprintln!();

    eprintln!(
        "{}",
        style("Step 1.1: Building the distance matrix...").blue()
    );
    let start = Instant::now();
    let mut matrix = DistanceMatrix::from_table(&config.locations, &config.distances)?;
    eprintln!(
        "{} Matrix built in {:?}: {} locations, {} entries",
        style("✓").green(),
        start.elapsed(),
        matrix.len(),
        matrix.len() * matrix.len()
    );
    eprintln!("   Iteration order: {}", matrix.locations().join(" -> "));

    eprintln!();
    eprintln!("{}", style("Initial distances:").blue());
    eprint!("{}", matrix.render());

    // =============================================
    // PHASE 2: THE RELAXER
    // =============================================
    eprintln!();
    eprintln!("{}", style("═══ PHASE 2: THE RELAXER ═══").magenta().bold());
    eprintln!();

    eprintln!(
        "{}",
        style("Step 2.1: Relaxing through every intermediate location...").magenta()
    );
    let start = Instant::now();
    let mut reporter = RunReporter::default();
    let updates = relax(&mut matrix, &mut reporter);
    let relax_time = start.elapsed();

    eprintln!(
        "{} Applied {} updates in {:?}",
        style("✓").green(),
        updates,
        relax_time
    );

    if config.event_log {
        for relaxation in &reporter.relaxations {
            let record = RelaxationLog {
                timestamp: Utc::now(),
                from: relaxation.from.clone(),
                to: relaxation.to.clone(),
                via: relaxation.via.clone(),
                new_cost: relaxation.new_cost,
                old_cost: relaxation.old_cost,
            };
            record.append_to_file(&config.event_log_path)?;
        }
        info!(path = %config.event_log_path, count = updates, "event log written");
    }

    // =============================================
    // SUMMARY
    // =============================================
    eprintln!();
    eprintln!(
        "{}",
        style("═══════════════════════════════════════════════════════════════").green()
    );
    eprintln!("{}", style(" RELAXATION COMPLETE").green().bold());
    eprintln!(
        "{}",
        style("═══════════════════════════════════════════════════════════════").green()
    );
    eprintln!();
    eprintln!("{}", style("Shortest distances:").green());
    eprint!("{}", matrix.render());
    eprintln!();
    eprintln!("Summary:");
    eprintln!("  • Locations: {}", matrix.len());
    eprintln!("  • Updates applied: {}", updates);
    if updates == 0 {
        eprintln!("  • Table was already fully relaxed");
    }

    Ok(())
}
