//! Binary that reads a file of adjacency matrices and writes a maximum clique (or a clique of a
//! requested size) of every graph to standard out, using the reduction to vertex cover.

use std::error;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use log::{info, warn};

use cook_cover::{
    clique::{k_clique, max_clique},
    cli,
    cust_error::ProcessingError,
    graph::UGraph,
    report,
};

#[derive(Parser)]
#[command(author, version, about = "Cliques via the reduction to vertex cover")]
struct Cli {
    /// File with adjacency matrix instances
    #[arg(value_name = "FILE", default_value = "graphs2022.txt")]
    input: PathBuf,

    /// Look for a clique of this size instead of a maximum one
    #[arg(short, value_name = "K")]
    k: Option<usize>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

pub fn main() -> Result<(), Box<dyn error::Error>> {
    let args = Cli::parse();
    cli::init_logger(args.verbose)?;

    info!("Reading graphs from {:?}", args.input);
    let input = cli::open_input(&args.input)?;
    let graphs = UGraph::read_matrix_batch(input)?;

    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    report::write_clique_header(&mut stdout, &args.input.display().to_string(), args.k)?;
    for (i, graph) in graphs.into_iter().enumerate() {
        let graph = match graph {
            Ok(graph) => graph,
            Err(e) => {
                warn!("Graph {} is malformed: {}", i + 1, e);
                report::write_skipped(&mut stdout, &format!("G{}", i + 1), &e)?;
                continue
            }
        };
        let start = Instant::now();
        let clique = match args.k {
            Some(k) => k_clique(&graph, k),
            None => max_clique(&graph),
        };
        let elapsed = start.elapsed();

        // Validate
        if !graph.is_clique(&clique) {
            return Err(Box::new(ProcessingError::InvalidSolution(
                format!("nodes found in G{} are not pairwise adjacent", i + 1))));
        }

        if let Some(k) = args.k.filter(|k| clique.len() < *k) {
            info!("G{} has no clique of size {}", i + 1, k);
        }
        report::write_graph_line(&mut stdout, i + 1, &graph, &clique, elapsed)?;
    }
    Ok(())
}
