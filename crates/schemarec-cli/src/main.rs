//! # schemarec CLI entry point
//!
//! Parses command-line arguments, installs the tracing subscriber, and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use schemarec_cli::bind::{run_bind, BindArgs};
use schemarec_cli::inspect::{run_inspect, InspectArgs};
use schemarec_core::SchemaRoot;

/// Compile JSON Schemas into record types and bind documents to them.
#[derive(Parser, Debug)]
#[command(name = "schemarec", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory schema paths are resolved against. Defaults to
    /// $SCHEMAREC_ROOT, then the current directory.
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a schema and print its record type tree.
    Inspect(InspectArgs),

    /// Bind a JSON or YAML document to a schema and print the record.
    Bind(BindArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = cli.root.map(SchemaRoot::new).unwrap_or_else(SchemaRoot::from_env);
    tracing::debug!(root = %root.dir().display(), "resolved schema root");

    let result = match cli.command {
        Commands::Inspect(args) => run_inspect(&args, &root),
        Commands::Bind(args) => run_bind(&args, &root),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
