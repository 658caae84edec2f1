//! CLI output formatting

use crate::query::{Query, QueryKind, QueryOutput};
use console::Emoji;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");

/// Format a query output as plain text, `None` if nothing matched
pub fn format_value(output: &QueryOutput) -> Option<String> {
    match output {
        QueryOutput::Text(text) | QueryOutput::Attribute(text) => text.clone(),
        QueryOutput::Count(count) => Some(count.to_string()),
    }
}

/// Short label for a query kind
pub fn format_kind(kind: &QueryKind) -> String {
    match kind {
        QueryKind::Text => "text".to_string(),
        QueryKind::Count => "count".to_string(),
        QueryKind::Attribute { name } => format!("@{}", name),
    }
}

/// Format one line of a batch report
pub fn format_query_result(query: &Query, output: &QueryOutput) -> String {
    let path = format!("/{}", query.path.join("/"));
    match format_value(output) {
        Some(value) => format!(
            "{} {} {} {} = {}",
            CHECK,
            style(&query.name).bold(),
            style(path).dim(),
            style(format_kind(&query.kind)).cyan(),
            value
        ),
        None => format!(
            "{} {} {} {} {}",
            CROSS,
            style(&query.name).bold(),
            style(path).dim(),
            style(format_kind(&query.kind)).cyan(),
            style("not found").red()
        ),
    }
}

/// Build the JSON object reported for a single query
pub fn query_json(query: &Query, output: &QueryOutput) -> serde_json::Value {
    serde_json::json!({
        "name": query.name,
        "path": query.path,
        "query": query.kind,
        "value": output,
    })
}
