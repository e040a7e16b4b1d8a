//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

/// Spreadsheet rows -> service registry JSON
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input table (.csv or .tsv)
    #[arg(long)]
    pub input: PathBuf,

    /// Mapping config (YAML, or JSON when the file ends in .json)
    #[arg(long)]
    pub config: PathBuf,

    /// Output file; stdout when omitted
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Drop fields with empty/null values from the output objects
    #[arg(long)]
    pub drop_empty: bool,

    /// Field delimiter, overriding the one implied by the file extension
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Keep every cell as text instead of inferring numbers, booleans and dates
    #[arg(long)]
    pub no_infer: bool,

    /// Write single-line JSON
    #[arg(long)]
    pub compact: bool,

    /// Build records and report counts without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
