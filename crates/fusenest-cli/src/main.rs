mod commands;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::commands::{DecodeArgs, EncodeArgs, Overrides};
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "fusenest", version, about = "Encode sketch profiles for nesting and read placements back")]
struct Cli {
    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the parts document for the placement tool
    Encode {
        /// Parts file (YAML or JSON)
        #[arg(value_name = "PARTS")]
        parts: PathBuf,

        /// Output file; stdout when omitted
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Codec config file (YAML or JSON)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Sheet width in modeling units
        #[arg(long)]
        width: Option<f64>,

        /// Sheet height in modeling units
        #[arg(long)]
        height: Option<f64>,

        /// Document units per modeling unit
        #[arg(long)]
        scale: Option<f64>,

        /// Wrap the document in a JSON request with spacing and rotations
        #[arg(long)]
        request: bool,
    },
    /// Read placements out of a placed document as JSON
    Decode {
        /// Placed SVG document
        #[arg(value_name = "SVG")]
        document: PathBuf,

        /// Output file; stdout when omitted
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Codec config file (YAML or JSON)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Document units per modeling unit
        #[arg(long)]
        scale: Option<f64>,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Encode {
            parts,
            output,
            config,
            width,
            height,
            scale,
            request,
        } => commands::run_encode(EncodeArgs {
            parts,
            output,
            config,
            overrides: Overrides {
                width,
                height,
                scale,
            },
            request,
        }),
        Command::Decode {
            document,
            output,
            config,
            scale,
        } => commands::run_decode(DecodeArgs {
            document,
            output,
            config,
            scale,
        }),
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            // --help and --version
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            let err = CliError::usage(err.render().to_string());
            eprint!("{err}");
            return err.code.into();
        }
    };
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(code = ?err.code, "command failed");
            eprintln!("error: {err}");
            err.code.into()
        }
    }
}
