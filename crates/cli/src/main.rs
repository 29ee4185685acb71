//! SAMS CLI - Operator tools for the asset assistant.
//!
//! # Usage
//!
//! ```bash
//! # Show which tool a question would be routed to (no network)
//! sams classify "show me assets in the Finance department"
//!
//! # Run the full pipeline once against the configured services
//! sams ask "What is the total value of our IT equipment?"
//!
//! # List the inventory service's tools
//! sams tools
//!
//! # Print the built-in keyword taxonomy, or check a custom one
//! sams taxonomy dump > taxonomy.yaml
//! sams taxonomy validate taxonomy.yaml
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sams_assistant::intent::TaxonomyError;

mod commands;

use commands::CommandError;

#[derive(Parser)]
#[command(name = "sams")]
#[command(author, version, about = "SAMS asset assistant tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a question and print the selected tool call as JSON
    Classify {
        /// The question to classify
        query: String,

        /// Keyword taxonomy file to use instead of the built-in one
        #[arg(short, long)]
        taxonomy: Option<PathBuf>,
    },
    /// Answer a question using the configured services
    Ask {
        /// The question to answer
        query: String,

        /// Also print the tier and tool call
        #[arg(short, long)]
        verbose: bool,
    },
    /// List the inventory service's tools
    Tools,
    /// Inspect keyword taxonomies
    Taxonomy {
        #[command(subcommand)]
        action: TaxonomyAction,
    },
}

#[derive(Subcommand)]
enum TaxonomyAction {
    /// Print the built-in taxonomy as YAML
    Dump,
    /// Parse and validate a taxonomy file
    Validate {
        /// Path to the YAML file
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => print_output(&output),
        Err(e) => {
            report_error(&e);
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<String, CommandError> {
    match cli.command {
        Commands::Classify { query, taxonomy } => {
            commands::classify::classify(&query, taxonomy.as_deref())
        }
        Commands::Ask { query, verbose } => commands::ask::ask(&query, verbose).await,
        Commands::Tools => commands::tools::list().await,
        Commands::Taxonomy { action } => match action {
            TaxonomyAction::Dump => commands::taxonomy::dump(),
            TaxonomyAction::Validate { path } => commands::taxonomy::validate(&path),
        },
    }
}

#[allow(clippy::print_stdout)]
fn print_output(output: &str) {
    println!("{}", output.trim_end());
}

#[allow(clippy::print_stderr)]
fn report_error(error: &CommandError) {
    if let CommandError::Taxonomy(TaxonomyError::Invalid(problems)) = error {
        eprintln!("Taxonomy has {} problem(s):", problems.len());
        for problem in problems {
            eprintln!("  - {problem}");
        }
    } else {
        eprintln!("Command failed: {error}");
    }
}
