use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use lattice_graph::lattice::Graph;
use lattice_graph::Boundary;
use log::info;

#[derive(Parser)]
#[command(name = "lattice-graph")]
#[command(about = "Builds finite periodic lattice graphs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print the graph as JSON instead of the text dump
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Hypercubic lattice with one site per cell
    Simple {
        /// Number of axes
        #[arg(short, long, default_value = "1")]
        dim: usize,

        /// Cells along every axis
        #[arg(short, long)]
        length: usize,

        /// Open instead of periodic boundaries
        #[arg(long)]
        open: bool,
    },
    /// Complete graph without spatial structure
    FullyConnected {
        /// Number of sites
        #[arg(short, long)]
        sites: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    info!("Starting lattice-graph v{}", lattice_graph::VERSION);

    let graph = match cli.command {
        Commands::Simple { dim, length, open } => {
            let boundary = if open { Boundary::Open } else { Boundary::Periodic };
            info!(
                "Building simple lattice: dimension {}, length {}, {:?} boundary",
                dim, length, boundary
            );
            Graph::simple_with_boundary(dim, length, boundary).with_context(|| {
                format!("failed to build simple lattice of dimension {} and length {}", dim, length)
            })?
        }
        Commands::FullyConnected { sites } => {
            info!("Building fully connected graph on {} sites", sites);
            Graph::fully_connected(sites)
        }
    };

    info!("{} sites, {} bonds", graph.num_sites(), graph.num_bonds());
    write_graph(&graph, cli.json)
}

fn write_graph(graph: &Graph, json: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, graph).context("failed to serialize graph")?;
        writeln!(out)?;
    } else {
        graph.print(&mut out).context("failed to write graph")?;
    }
    Ok(())
}
