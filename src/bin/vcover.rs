//! Binary that reads a file of adjacency matrices, computes a minimum vertex cover of every graph
//! and writes the results to standard out.

use std::error;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use log::{info, warn};
use rand::{rngs::StdRng, SeedableRng};

use cook_cover::{
    bounded_search::min_vertex_cover,
    cli,
    cust_error::{ImportError, ProcessingError},
    graph::UGraph,
    report,
};

#[derive(Parser)]
#[command(author, version, about = "Exact minimum vertex covers by exclusion search")]
struct Cli {
    /// File with adjacency matrix instances
    #[arg(value_name = "FILE", default_value = "graph.txt")]
    input: PathBuf,

    /// Solve COUNT random graphs instead of reading FILE
    #[arg(long, value_name = "COUNT")]
    random: Option<usize>,

    /// Number of nodes of each random graph
    #[arg(long, default_value_t = 12)]
    nodes: usize,

    /// Edge probability of the random graphs
    #[arg(long, default_value_t = 0.5)]
    density: f64,

    /// Seed of the random graphs
    #[arg(long)]
    seed: Option<u64>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

pub fn main() -> Result<(), Box<dyn error::Error>> {
    let args = Cli::parse();
    cli::init_logger(args.verbose)?;

    let (source, graphs) = match args.random {
        Some(count) => {
            let mut rng = match args.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            info!("Generating {} random graphs with {} nodes and density {}", count, args.nodes, args.density);
            let graphs: Vec<Result<UGraph, ImportError>> = (0..count)
                .map(|_| Ok(UGraph::random(args.nodes, args.density, &mut rng)))
                .collect();
            ("random graphs".to_owned(), graphs)
        }
        None => {
            info!("Reading graphs from {:?}", args.input);
            let input = cli::open_input(&args.input)?;
            (args.input.display().to_string(), UGraph::read_matrix_batch(input)?)
        }
    };

    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    report::write_cover_header(&mut stdout, &source)?;
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
        let cover = min_vertex_cover(&graph);
        let elapsed = start.elapsed();

        // Validate
        if !graph.is_vertex_cover(&cover) {
            return Err(Box::new(ProcessingError::InvalidSolution(
                format!("cover of G{} leaves an edge uncovered", i + 1))));
        }

        report::write_graph_line(&mut stdout, i + 1, &graph, &cover, elapsed)?;
    }
    Ok(())
}
