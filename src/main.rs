use anyhow::{Context, Result};
use nestxml::cli::commands::{AttrCommand, BatchCommand, CheckCommand, CountCommand, TextCommand};
use nestxml::cli::output::*;
use nestxml::cli::{Cli, Command};
use nestxml::query::config::QueryConfig;
use nestxml::query::{check_document, evaluate, Query, QueryKind, QueryOutput};
use std::path::Path;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    let result = match &cli.command {
        Command::Text(cmd) => run_text(cmd),
        Command::Count(cmd) => run_count(cmd),
        Command::Attr(cmd) => run_attr(cmd),
        Command::Check(cmd) => run_check(cmd),
        Command::Batch(cmd) => run_batch(cmd),
    };

    match result {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(1);
        }
    }
}

fn read_document(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read document {}", path.display()))
}

/// Evaluate a single query and print it; returns whether anything matched
fn run_single(file: &Path, query: Query, json: bool) -> Result<bool> {
    let document = read_document(file)?;
    let output = evaluate(&document, &query)
        .with_context(|| format!("Failed to evaluate /{}", query.path.join("/")))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&query_json(&query, &output))?);
    } else if let Some(value) = format_value(&output) {
        println!("{}", value);
    }

    Ok(!matches!(
        output,
        QueryOutput::Text(None) | QueryOutput::Attribute(None)
    ))
}

fn run_text(cmd: &TextCommand) -> Result<bool> {
    let query = Query::new("text", cmd.segments(), QueryKind::Text);
    run_single(&cmd.file, query, cmd.json)
}

fn run_count(cmd: &CountCommand) -> Result<bool> {
    let query = Query::new("count", cmd.segments(), QueryKind::Count);
    run_single(&cmd.file, query, cmd.json)
}

fn run_attr(cmd: &AttrCommand) -> Result<bool> {
    let kind = QueryKind::Attribute {
        name: cmd.name.clone(),
    };
    let query = Query::new("attr", cmd.segments(), kind);
    run_single(&cmd.file, query, cmd.json)
}

fn run_check(cmd: &CheckCommand) -> Result<bool> {
    let document = read_document(&cmd.file)?;

    match check_document(&document, &cmd.root) {
        Ok(()) => {
            println!(
                "{} {} has a single <{}> root",
                CHECK,
                style(cmd.file.display()).bold(),
                style(&cmd.root).cyan()
            );
            Ok(true)
        }
        Err(e) => {
            error!("{} failed the <{}> root check: {}", cmd.file.display(), cmd.root, e);
            println!("{} Check failed:", CROSS);
            println!("  {}", style(e).red());
            Ok(false)
        }
    }
}

fn run_batch(cmd: &BatchCommand) -> Result<bool> {
    let config = QueryConfig::from_file(&cmd.queries).with_context(|| {
        format!("Failed to load query file {}", cmd.queries.display())
    })?;
    let document = read_document(&cmd.file)?;

    info!(
        "Running {} queries from '{}'",
        config.queries.len(),
        config.name
    );

    let mut results = Vec::new();
    for query in config.to_queries() {
        let output = evaluate(&document, &query)
            .with_context(|| format!("Query '{}' failed", query.name))?;
        results.push((query, output));
    }

    if cmd.json {
        let json: Vec<_> = results
            .iter()
            .map(|(query, output)| query_json(query, output))
            .collect();
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        println!("{} {}", INFO, style(&config.name).bold());
        for (query, output) in &results {
            println!("{}", format_query_result(query, output));
        }
    }

    Ok(true)
}
