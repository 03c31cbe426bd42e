use clap::{Parser, ValueEnum};
use log::{error, info, warn};
use mpinput_config::{load_config, ConfigError};
use mpinput_core::PackageError;
use mpinput_loc::WriteStrategy;
use thiserror::Error;

use std::fs;
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(author, version, about = "Writes MODPATH simulation and starting locations files", long_about = None)]
struct Args {
    /// Path to the run configuration (.json or .toml)
    #[arg(short, long, default_value = "mpinput.json")]
    config: PathBuf,

    /// Override the backend used for the starting locations file
    #[arg(short, long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Run the package checks without writing any files
    #[arg(long)]
    check_only: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
    Row,
    Bulk,
}

impl From<StrategyArg> for WriteStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Row => WriteStrategy::Row,
            StrategyArg::Bulk => WriteStrategy::Bulk,
        }
    }
}

#[derive(Error, Debug)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to create model workspace: {0}")]
    Workspace(#[from] std::io::Error),

    #[error("Failed to write input files: {0}")]
    Write(#[from] PackageError),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), RunError> {
    let mut config = load_config(&args.config)?;
    info!("Using configuration from {}", args.config.display());

    if let (Some(strategy), Some(loc)) = (args.strategy, config.starting_locations.as_mut()) {
        loc.strategy = strategy.into();
    }

    let model = config.assemble()?;

    let reports = model.check();
    for report in &reports {
        report.summarize();
    }
    let failed = reports.iter().filter(|r| r.has_errors()).count();
    if failed > 0 {
        warn!("{} package(s) failed checks; files are written anyway", failed);
    }

    if args.check_only {
        info!("Check only, no files written");
        return Ok(());
    }

    fs::create_dir_all(model.model_ws())?;
    model.write_input()?;
    info!("Wrote {} package(s) for model '{}'", model.packages().len(), model.name());
    Ok(())
}
