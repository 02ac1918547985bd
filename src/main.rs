//! cdgraphlayout CLI entry point.
//!
//! Exit status: 0 on success, 2 on bad arguments, 3 when the input is not
//! a file, 4 when it is empty, 5 when the layout itself fails.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cdgraphlayout::{BoundingBox, LayoutAlgorithm, LayoutConfig, LayoutError, run_layout};

/// Runs a graph layout on a CX network, sending the cartesianLayout aspect
/// to standard out.
#[derive(Parser, Debug)]
#[command(
    name = "cdgraphlayout",
    version = env!("CDGRAPHLAYOUT_VERSION"),
    about = "Runs a graph layout on a CX network, sending the cartesianLayout aspect to standard out"
)]
struct Cli {
    /// CX file
    input: PathBuf,

    /// Layout algorithm to use
    #[arg(long, value_enum, default_value_t = LayoutAlgorithm::Auto)]
    layout: LayoutAlgorithm,

    /// Multiply the final coordinates by this factor
    #[arg(long, value_parser = parse_scale)]
    scale: Option<f64>,

    /// Fit the layout into this box, given as x1,y1,x2,y2. Without it the
    /// box is derived from the default node size, when the network has one
    #[arg(long = "fit_into", alias = "fit-into", value_parser = parse_bounding_box)]
    fit_into: Option<BoundingBox>,

    /// Seed for the randomised layouts (random, fr, drl, lgl)
    #[arg(long)]
    seed: Option<u64>,

    /// Log progress to standard error
    #[arg(short, long)]
    verbose: bool,
}

fn parse_bounding_box(s: &str) -> Result<BoundingBox, String> {
    BoundingBox::from_user_str(s).map_err(|e| e.to_string())
}

fn parse_scale(s: &str) -> Result<f64, String> {
    let scale: f64 = s.trim().parse().map_err(|e| format!("{e}"))?;
    if scale.is_finite() {
        Ok(scale)
    } else {
        Err(LayoutError::InvalidScale(scale).to_string())
    }
}

/// Set up logging on stderr; stdout carries only the layout.
fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = LayoutConfig {
        algorithm: cli.layout,
        scale: cli.scale,
        fit_into: cli.fit_into,
        seed: cli.seed,
    };

    match run_layout(&cli.input, &config, io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
