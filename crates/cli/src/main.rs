use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use trace_slicer::commands::{count_command, dump_command, slice_command};
use trace_slicer_core::config::SliceConfig;
use trace_slicer_core::model::RecordId;

/// Backward provenance slicer for dynamic pointer-alias analysis logs.
///
/// This CLI is a thin wrapper around `trace-slicer-core` (exposed in code as
/// `trace_slicer_core`). All substantive logic lives in the library.
#[derive(Parser, Debug)]
#[command(
    name = "trace-slicer",
    version,
    about = "Slice the provenance of two pointers out of an execution log",
    long_about = None
)]
struct Cli {
    /// Enable debug logging on stderr (RUST_LOG overrides).
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Slice two pointers backward from their start records.
    ///
    /// Prints one listing per pointer followed by a merged timeline, newest
    /// record first.
    Slice {
        /// Optional JSON config supplying any of the other options.
        #[arg(long)]
        config: Option<PathBuf>,

        /// JSON-lines execution log.
        #[arg(long)]
        log: Option<PathBuf>,

        /// Program manifest (JSON or YAML).
        #[arg(long)]
        program: Option<PathBuf>,

        /// Record id of the first pointer.
        #[arg(long)]
        pt1: Option<RecordId>,

        /// Record id of the second pointer.
        #[arg(long)]
        pt2: Option<RecordId>,

        /// Keep both copies of the convergence record in the merged listing.
        /// `--keep-duplicates=false` overrides a config file that sets it.
        #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
        keep_duplicates: Option<bool>,

        /// Emit a JSON report instead of the text listing.
        /// `--json=false` overrides a config file that sets it.
        #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
        json: Option<bool>,
    },

    /// Print the number of records in a log.
    Count {
        /// JSON-lines execution log.
        #[arg(long)]
        log: PathBuf,
    },

    /// Print log records with their record ids.
    Dump {
        /// JSON-lines execution log.
        #[arg(long)]
        log: PathBuf,

        /// First record id to print.
        #[arg(long)]
        from: Option<RecordId>,

        /// Last record id to print.
        #[arg(long)]
        to: Option<RecordId>,

        /// Emit JSON instead of tab-separated text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    trace_slicer::init_logging(cli.verbose);

    match cli.command {
        Command::Slice { config, log, program, pt1, pt2, keep_duplicates, json } => {
            let overrides = SliceConfig { log, program, pt1, pt2, keep_duplicates, json };
            slice_command(config.as_deref(), overrides)?
        }
        Command::Count { log } => count_command(&log)?,
        Command::Dump { log, from, to, json } => dump_command(&log, from, to, json)?,
    }

    Ok(())
}
