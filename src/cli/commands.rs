//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// BigQuery dataset, table and export tool
#[derive(Parser, Debug)]
#[command(name = "bigquery-kit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Project to work in (overrides config and BIGQUERY_PROJECT)
    #[arg(short, long, global = true)]
    pub project: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub output: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List datasets of the project
    Datasets {
        /// Include hidden datasets (IDs starting with '_')
        #[arg(short, long)]
        all: bool,

        /// Label filter, e.g. labels.env:prod
        #[arg(long)]
        filter: Option<String>,

        /// Results per request (0 = provider default)
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// List tables of a dataset
    Tables {
        /// Dataset ID
        dataset: String,

        /// Results per request (0 = provider default)
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Export a table to Cloud Storage
    Extract {
        /// Source table as project.dataset.table
        table: String,

        /// Destination gs:// URI (repeatable)
        #[arg(short, long = "uri", required = true)]
        uris: Vec<String>,

        /// csv, json, avro or parquet
        #[arg(long)]
        format: Option<String>,

        /// none, gzip, deflate, snappy or zstd
        #[arg(long)]
        compression: Option<String>,

        /// Field delimiter for CSV exports
        #[arg(long)]
        delimiter: Option<String>,

        /// Do not print a header row
        #[arg(long)]
        no_header: bool,

        /// Job ID (random when omitted)
        #[arg(long)]
        job_id: Option<String>,

        /// Append a random suffix to --job-id
        #[arg(long)]
        suffix: bool,

        /// Print the job request instead of submitting it
        #[arg(long)]
        dry_run: bool,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one object per line)
    Json,
    /// Human-readable output
    Pretty,
}
