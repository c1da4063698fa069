//! vasgraph CLI - centerline graph construction tool.
//!
//! Usage: vasgraph <COMMAND> [OPTIONS] <INPUT>...
//!
//! Run `vasgraph --help` for available commands.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use rayon::prelude::*;

use vasgraph::algo::Progress;
use vasgraph::error::{GraphError, Result as GraphResult};
use vasgraph::graph::{build_graph_with_progress, EdgeType, Graph, GraphOptions};
use vasgraph::io;

#[derive(Parser)]
#[command(name = "vasgraph")]
#[command(author, version, about = "Centerline graph construction CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display centerline information
    Info {
        /// Input centerline file
        input: PathBuf,
    },

    /// Build graphs from one or more centerlines and print a summary of each
    Build {
        /// Input centerline files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Fraction of centerline points to keep (0.0 to 1.0]
        #[arg(short = 'f', long, default_value = "0.06")]
        resample_fraction: f64,

        /// Points trimmed next to the inlet and each outlet
        #[arg(short = 'c', long, default_value = "1")]
        remove_caps: usize,

        /// Skip boundary edge synthesis
        #[arg(long)]
        no_boundary_edges: bool,

        /// Skip junction edge synthesis
        #[arg(long)]
        no_junction_edges: bool,

        /// Use single-threaded execution (for benchmarking)
        #[arg(long)]
        sequential: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info { input } => {
            cmd_info(&input)?;
        }

        Commands::Build {
            inputs,
            resample_fraction,
            remove_caps,
            no_boundary_edges,
            no_junction_edges,
            sequential,
        } => {
            let options = GraphOptions::new(resample_fraction)
                .with_remove_caps(remove_caps)
                .with_boundary_edges(!no_boundary_edges)
                .with_junction_edges(!no_junction_edges)
                .with_parallel(!sequential);
            cmd_build(&inputs, &options)?;
        }
    }

    Ok(())
}

/// Create a progress reporter that displays a progress bar on the terminal.
fn create_progress() -> Progress {
    let max_percent = Arc::new(AtomicUsize::new(0)); // Highest percent seen so far

    Progress::new(move |current, total, message| {
        if total == 0 {
            return;
        }

        let raw_percent = if current >= total {
            100
        } else {
            ((current * 100) + (total / 2)) / total
        };

        // Monotonic: batch workers finish out of order
        let previous = max_percent.fetch_max(raw_percent, Ordering::Relaxed);
        let percent = previous.max(raw_percent);
        if percent == previous && percent != 100 {
            return;
        }

        let bar_width = 30;
        let filled = (percent * bar_width) / 100;
        let bar = "=".repeat(filled);
        let space = " ".repeat(bar_width - filled);

        eprint!("\r[{}{}] {:3}% {}", bar, space, percent, message);
        let _ = std::io::stderr().flush();

        if current >= total {
            eprintln!();
        }
    })
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let centerline = io::load(input)?;
    let boundary = centerline.boundary();

    println!("File: {}", input.display());
    println!("Points: {}", centerline.num_points());
    println!("Edges: {}", centerline.edges().len());
    println!("Junctions: {}", centerline.num_junctions());
    println!("Inlet: {}", boundary.inlet);
    println!("Outlets: {} {:?}", boundary.outlets.len(), boundary.outlets);
    println!("Total length: {:.6}", centerline.total_length());

    let areas = centerline.areas();
    let a_min = areas.iter().cloned().fold(f64::INFINITY, f64::min);
    let a_max = areas.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    println!("Area range: [{:.6}, {:.6}]", a_min, a_max);

    Ok(())
}

fn cmd_build(inputs: &[PathBuf], options: &GraphOptions) -> Result<(), Box<dyn std::error::Error>> {
    let mode = if options.parallel { "parallel" } else { "sequential" };
    println!(
        "Building {} graph(s) (resample fraction {}, caps {}, {})...",
        inputs.len(),
        options.resample_fraction,
        options.remove_caps,
        mode
    );

    let progress = create_progress();
    let start = Instant::now();

    // A single mesh reports its pipeline stages; a batch reports finished meshes
    let results: Vec<Result<(Graph, Duration), GraphError>> = if inputs.len() == 1 {
        vec![build_one(&inputs[0], options, &progress)]
    } else {
        let done = AtomicUsize::new(0);
        let task = |input: &PathBuf| {
            let result = build_one(input, options, &Progress::none());
            let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
            progress.report(finished, inputs.len(), "meshes");
            result
        };
        if options.parallel {
            inputs.par_iter().map(task).collect()
        } else {
            inputs.iter().map(task).collect()
        }
    };
    let elapsed = start.elapsed();

    let mut failures = 0;
    for (input, result) in inputs.iter().zip(results) {
        match result {
            Ok((graph, took)) => print_summary(input, &graph, took),
            Err(e) => {
                failures += 1;
                println!("{}: failed: {}", input.display(), e);
            }
        }
    }

    println!(
        "Done: {} built, {} failed ({:.2?})",
        inputs.len() - failures,
        failures,
        elapsed
    );

    if failures > 0 {
        return Err(format!("{} of {} mesh(es) failed", failures, inputs.len()).into());
    }
    Ok(())
}

fn build_one(
    input: &Path,
    options: &GraphOptions,
    progress: &Progress,
) -> GraphResult<(Graph, Duration)> {
    let centerline = io::load(input)?;
    let start = Instant::now();
    let graph = build_graph_with_progress(&centerline, options, progress)?;
    Ok((graph, start.elapsed()))
}

fn print_summary(input: &Path, graph: &Graph, took: Duration) {
    let boundary_edges =
        graph.num_edges_of(EdgeType::BoundaryInlet) + graph.num_edges_of(EdgeType::BoundaryOutlet);
    let junction_inlets = graph.junction_inlet_mask().iter().filter(|&&m| m).count();

    println!("{}:", input.display());
    println!(
        "  Nodes: {} (from {} points)",
        graph.num_nodes(),
        graph.num_original_points()
    );
    println!(
        "  Edges: {} ({} anatomical, {} boundary, {} junction)",
        graph.num_edges(),
        graph.num_edges_of(EdgeType::Anatomical),
        boundary_edges,
        graph.num_edges_of(EdgeType::Junction)
    );
    println!(
        "  Outlets: {}, junction inlets: {}",
        graph.boundary().outlets.len(),
        junction_inlets
    );
    println!("  Time: {:.2?}", took);
}
