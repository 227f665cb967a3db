//! Command-line interface for contam-rank.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **rank**: Score a FASTA batch of contaminants against a reference
//!   sequence and report the top-k most contaminating records
//!
//! ## Usage
//!
//! ```text
//! # Top 20 contaminants with minimum segment length 7
//! contam-rank rank reference.fa contaminants.fa -k 20 -l 7
//!
//! # JSON output for scripting
//! contam-rank rank reference.fa contaminants.fa --format json
//!
//! # Just the sorted record ids of the winners
//! contam-rank rank reference.fa contaminants.fa --sorted-ids
//! ```

use clap::{Parser, Subcommand};

pub mod rank;

#[derive(Parser)]
#[command(name = "contam-rank")]
#[command(version)]
#[command(about = "Rank contaminant sequences by how much of them recurs in a reference")]
#[command(
    long_about = "contam-rank indexes a reference sequence in a generalized suffix tree and scores each candidate contaminant by the number of maximal segments, of a minimum length you choose, that reoccur in the reference.\n\nMore independently-recurring regions mean broader contamination, not merely one long shared stretch."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank a batch of contaminants against a reference sequence
    Rank(rank::RankArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
