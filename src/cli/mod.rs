//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{AttrCommand, BatchCommand, CheckCommand, CountCommand, TextCommand};
use std::ffi::OsString;

/// Query and check XML documents
#[derive(Debug, Parser, Clone)]
#[command(name = "nestxml")]
#[command(version)]
#[command(about = "Query and check nested XML documents", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print the text of the first element at a path
    Text(TextCommand),

    /// Count the elements at a path
    Count(CountCommand),

    /// Print an attribute of the first element at a path
    Attr(AttrCommand),

    /// Check that a document has a single root element with the given name
    Check(CheckCommand),

    /// Evaluate every query in a YAML query file
    Batch(BatchCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}
