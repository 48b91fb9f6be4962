//! glb2stl - Convert binary glTF containers to STL
//!
//! Reads the first mesh primitive of a `.glb` file and writes it as binary or
//! text STL. Files that cannot be parsed go through a heuristic fallback.

mod settings;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use glb2stl_assets::{convert, Conversion, OutputFormat};
use tracing::level_filters::LevelFilter;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::settings::Settings;

/// Convert a binary glTF (.glb) file to STL
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Input .glb file
    input: PathBuf,
    /// Output .stl file (created or overwritten)
    output: PathBuf,
    /// Accepted for compatibility and ignored
    #[arg(hide = true, allow_hyphen_values = true)]
    _extra: Option<String>,
    /// Write text STL instead of binary
    #[arg(long)]
    ascii: bool,
    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
    /// Settings file (defaults to ~/.config/glb2stl/settings.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let settings = Settings::load(args.config.as_deref());
    let format = if args.ascii {
        OutputFormat::Ascii
    } else {
        OutputFormat::Binary
    };
    let options = settings.convert_options(format);

    match convert(&args.input, &args.output, &options) {
        Conversion::Primary(_) => {
            info!("Conversion successful!");
            Ok(ExitCode::SUCCESS)
        }
        Conversion::Fallback { cause, written } => {
            error!("Error: {:?}", anyhow::Error::new(cause));
            if written.is_none() {
                warn!("Fallback produced no output");
            }
            Ok(ExitCode::SUCCESS)
        }
        Conversion::Failure { cause, fallback } => {
            error!("Error: {:?}", anyhow::Error::new(cause));
            error!("Fallback failed: {:?}", anyhow::Error::new(fallback));
            Ok(ExitCode::FAILURE)
        }
    }
}
