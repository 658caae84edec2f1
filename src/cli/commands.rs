//! CLI command definitions

use clap::Args;
use std::path::PathBuf;

/// Print the text of the first element at a path
#[derive(Debug, Args, Clone)]
pub struct TextCommand {
    /// Path to the XML document
    #[arg(short, long)]
    pub file: PathBuf,

    /// Element path from the root, as separate names or `a/b/c`
    #[arg(required = true)]
    pub path: Vec<String>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Count the elements at a path
#[derive(Debug, Args, Clone)]
pub struct CountCommand {
    /// Path to the XML document
    #[arg(short, long)]
    pub file: PathBuf,

    /// Element path from the root, as separate names or `a/b/c`
    #[arg(required = true)]
    pub path: Vec<String>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Print an attribute of the first element at a path
#[derive(Debug, Args, Clone)]
pub struct AttrCommand {
    /// Path to the XML document
    #[arg(short, long)]
    pub file: PathBuf,

    /// Attribute name
    #[arg(short, long)]
    pub name: String,

    /// Element path from the root, as separate names or `a/b/c`
    #[arg(required = true)]
    pub path: Vec<String>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Check the document's root element
#[derive(Debug, Args, Clone)]
pub struct CheckCommand {
    /// Path to the XML document
    #[arg(short, long)]
    pub file: PathBuf,

    /// Expected root element name
    #[arg(short, long)]
    pub root: String,
}

/// Evaluate a query file
#[derive(Debug, Args, Clone)]
pub struct BatchCommand {
    /// Path to the XML document
    #[arg(short, long)]
    pub file: PathBuf,

    /// Path to the query YAML file
    #[arg(short, long)]
    pub queries: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

impl TextCommand {
    /// Element path split into names
    pub fn segments(&self) -> Vec<String> {
        split_path(&self.path)
    }
}

impl CountCommand {
    /// Element path split into names
    pub fn segments(&self) -> Vec<String> {
        split_path(&self.path)
    }
}

impl AttrCommand {
    /// Element path split into names
    pub fn segments(&self) -> Vec<String> {
        split_path(&self.path)
    }
}

/// Split path arguments on `/` and drop empty pieces
pub fn split_path(args: &[String]) -> Vec<String> {
    args.iter()
        .flat_map(|arg| arg.split('/'))
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
