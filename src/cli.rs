//! Helpers shared by the binaries.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use crate::cust_error::ImportError;

/// Maps the number of `-v` flags to a log level.
pub fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initializes terminal logging on standard error, so that reports on standard out stay clean.
pub fn init_logger(verbose: u8) -> Result<(), log::SetLoggerError> {
    TermLogger::init(
        level_for(verbose),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
}

/// Opens `path` for buffered reading.
pub fn open_input(path: &Path) -> Result<BufReader<File>, ImportError> {
    Ok(BufReader::new(File::open(path)?))
}
