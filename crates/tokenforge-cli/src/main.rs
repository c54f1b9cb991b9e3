use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use tokenforge::{handle_generate, BaselineArg};

#[derive(Parser)]
#[command(name = "tokenforge")]
#[command(about = "Aggregate Figma design-token exports into one unified tokens.json", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge per-collection, per-mode token files into one document
    Generate {
        /// Root directory containing one subdirectory per collection
        #[arg(short, long)]
        root: PathBuf,

        /// Output file path (prints to stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Read previous token ids from this snapshot file instead of
        /// the last committed version of the output
        #[arg(long)]
        baseline: Option<PathBuf>,

        /// Skip identifier restoration entirely; all tokens are new
        #[arg(long, conflicts_with = "baseline")]
        no_baseline: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.debug {
        tracing::Level::TRACE
    } else if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    // Logs go to stderr; stdout is reserved for the generated document.
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(cli.debug) // Show target module in debug mode
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Generate {
            root,
            output,
            baseline,
            no_baseline,
        } => {
            let baseline = match (baseline, no_baseline) {
                (Some(path), _) => BaselineArg::File(path),
                (None, true) => BaselineArg::Disabled,
                (None, false) => BaselineArg::GitHead,
            };
            handle_generate(root, output, baseline)
        }
    }
}
