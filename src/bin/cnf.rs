//! Binary that reads one 3-CNF formula per line and decides satisfiability of each through the
//! reduction to vertex cover.

use std::error;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use log::{info, warn};

use cook_cover::{
    cli,
    cnf::{CnfFormula, Satisfiability},
    cust_error::ProcessingError,
    report,
};

#[derive(Parser)]
#[command(author, version, about = "3-CNF satisfiability via the reduction to vertex cover")]
struct Cli {
    /// File with one formula per line
    #[arg(value_name = "FILE", default_value = "cnfs2022.txt")]
    input: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

pub fn main() -> Result<(), Box<dyn error::Error>> {
    let args = Cli::parse();
    cli::init_logger(args.verbose)?;

    info!("Reading formulas from {:?}", args.input);
    let input = cli::open_input(&args.input)?;
    let formulas = CnfFormula::read_batch(input)?;

    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    for (i, formula) in formulas.into_iter().enumerate() {
        let formula = match formula {
            Ok(formula) => formula,
            Err(e) => {
                warn!("Formula {} is malformed: {}", i + 1, e);
                report::write_skipped(&mut stdout, &format!("3CNF No. {}", i + 1), &e)?;
                continue
            }
        };
        let start = Instant::now();
        let result = formula.satisfy();
        let elapsed = start.elapsed();

        // Validate
        if let Satisfiability::Satisfiable(assignment) = &result {
            if !formula.evaluate(assignment) {
                return Err(Box::new(ProcessingError::InvalidSolution(
                    format!("assignment of formula {} violates a clause", i + 1))));
            }
        }

        report::write_cnf_result(&mut stdout, i + 1, &formula, &result, elapsed)?;
    }
    Ok(())
}
