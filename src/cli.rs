use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use env_logger::Env;
use log::Level;

use crate::processor::{CalculationProcessor, RunStatus};
use crate::reader;

#[derive(Parser)]
#[command(version, name = "sensor-stats")]
#[command(about = "Compute per-file and aggregate statistics for sensor measurement logs")]
pub struct Cli {
    /// Increase verbosity level (can be specified multiple times.) The first level sets level
    /// "info", second sets level "debug", and third sets level "trace" for the logger.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Root directory containing the measurement subdirectories
    pub root: PathBuf,

    /// Operation to run, may be given multiple times. Recognized: average,
    /// maximum, minimum, standard_deviation, frequency, median
    #[arg(short = 'o', long = "operation", required = true)]
    pub operations: Vec<String>,

    /// Also compute each statistic over all files of a measurement type
    #[arg(short, long)]
    pub global: bool,
}

pub fn handle_calls() -> Result<()> {
    let cli = Cli::parse();
    let logger_level = match cli.verbose {
        0 => Level::Warn,
        1 => Level::Info,
        2 => Level::Debug,
        _ => Level::Trace,
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(logger_level.as_str())).init();

    if !cli.root.is_dir() {
        bail!("'{}' is not a directory", cli.root.display());
    }

    let measurement_files = reader::scan_directory(&cli.root);
    let mut processor = CalculationProcessor::new(&cli.root);
    let outcome = processor.process_calculations(&measurement_files, &cli.operations, cli.global);

    match outcome.status {
        RunStatus::Success => {
            println!("{}", outcome.message);
            Ok(())
        }
        RunStatus::Error => Err(anyhow!(outcome.message)),
    }
}
