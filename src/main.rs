//! CAPIO Profiler CLI
//!
//! Reads CAPIO trace logs and prints or stores per-category and
//! per-function timing statistics.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use capio_profiler::commands::{
    display_schema, display_version, execute_analyze, execute_batch, validate_args,
    validate_batch_args, validate_report_file, AnalyzeArgs, BatchArgs,
};
use capio_profiler::parser::TraceDialect;
use capio_profiler::utils::config::{DEFAULT_SUMMARY_ROWS, DEFAULT_TRACE_EXTENSION};

/// CAPIO Profiler - timing statistics for CAPIO traces
#[derive(Parser, Debug)]
#[command(name = "capio-profiler")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyse a single trace file
    Analyze {
        /// Trace file (process id is taken from the name, e.g. posix_1234.log)
        #[arg(short, long)]
        file: PathBuf,

        /// Force the trace dialect instead of guessing it from the file name
        #[arg(short, long, value_enum)]
        dialect: Option<TraceDialect>,

        /// Output path for JSON report (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print text summary to stdout (always on without --output)
        #[arg(long)]
        summary: bool,

        /// Number of rows per table in the summary
        #[arg(long, default_value_t = DEFAULT_SUMMARY_ROWS)]
        top: usize,
    },

    /// Analyse every trace below a directory
    Batch {
        /// Directory searched recursively
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// Extension of trace files
        #[arg(short, long, default_value = DEFAULT_TRACE_EXTENSION)]
        extension: String,

        /// Force the trace dialect for every file
        #[arg(short, long, value_enum)]
        dialect: Option<TraceDialect>,

        /// Output path for JSON report (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,

        /// Number of rows per table in the summary
        #[arg(long, default_value_t = DEFAULT_SUMMARY_ROWS)]
        top: usize,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Analyze {
            file,
            dialect,
            output,
            summary,
            top,
        } => {
            let args = AnalyzeArgs {
                trace_file: file,
                dialect,
                print_summary: summary || output.is_none(),
                output_json: output,
                top_rows: top,
            };

            validate_args(&args)?;
            execute_analyze(args)?;
        }

        Commands::Batch {
            root,
            extension,
            dialect,
            output,
            summary,
            top,
        } => {
            let args = BatchArgs {
                root,
                extension,
                dialect,
                output_json: output,
                print_summary: summary,
                top_rows: top,
            };

            validate_batch_args(&args)?;
            execute_batch(args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
