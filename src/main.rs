use anyhow::Context;
use clap::{Parser, Subcommand};
use listloc::{Config, ConsoleReporter, Conventions, Pipeline};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    name = "listloc",
    version,
    about = "Extract and manage code listings declared in text-based source files",
    long_about = "Extract and manage code listings declared in text-based source files.\n\n\
    A listing is the content between 'BEGIN LISTING <name>' and 'END LISTING' \
    statements inside any UTF-8 text file. Extracted listings are saved as \
    '<name>.listing' files inside 'listings/' directories next to their sources.\n\n\
    USAGE EXAMPLES:\n  \
      # Extract listings under the current directory\n  \
      listloc extract\n\n  \
      # Extract from a project, deleting stale extractions first\n  \
      listloc extract ./my_project --prune\n\n  \
      # Delete all extracted listings again\n  \
      listloc clear ./my_project"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recursively extract all declared listings from source files
    Extract {
        /// Directory to scan (defaults to the current directory)
        #[arg(default_value = ".", value_name = "PATH")]
        path: PathBuf,

        /// Delete any extracted .listing files that no longer correspond
        /// to a declared listing before extracting
        #[arg(long)]
        prune: bool,

        /// Print every file and directory action
        #[arg(short, long, action = clap::ArgAction::Count)]
        verbose: u8,
    },

    /// Recursively delete all extracted .listing files
    Clear {
        /// Directory to scan (defaults to the current directory)
        #[arg(default_value = ".", value_name = "PATH")]
        path: PathBuf,

        /// Print every file and directory action
        #[arg(short, long, action = clap::ArgAction::Count)]
        verbose: u8,
    },
}

fn main() {
    // Single-line diagnostics; the library error already carries the
    // offending path and line.
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Extract {
            path,
            prune,
            verbose,
        } => {
            setup_tracing(verbose);
            let config = Config::builder()
                .root_dir(&path)
                .prune(prune)
                .build();
            let mut reporter =
                ConsoleReporter::new(&path, verbose > 0, Conventions::default());
            Pipeline::new(config)?
                .extract(&mut reporter)
                .context("Extraction failed")?;
            reporter.summarize_extraction();
        }
        Command::Clear { path, verbose } => {
            setup_tracing(verbose);
            let config = Config::builder().root_dir(&path).build();
            let mut reporter =
                ConsoleReporter::new(&path, verbose > 0, Conventions::default());
            Pipeline::new(config)?
                .clear(&mut reporter)
                .context("Clearing failed")?;
            reporter.summarize_clearing();
        }
    }

    Ok(())
}

fn setup_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::new("listloc=warn"),
        1 => EnvFilter::new("listloc=debug"),
        _ => EnvFilter::new("listloc=trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_thread_ids(false))
        .init();
}
