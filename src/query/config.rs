//! Query file configuration from YAML

use crate::query::{Query, QueryKind};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Element path - either a list of names or a single `/`-separated string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathConfig {
    /// `path: "catalog/shelf/book"`
    Joined(String),
    /// `path: [catalog, shelf, book]`
    Segments(Vec<String>),
}

impl PathConfig {
    /// Split the path into element names
    pub fn segments(&self) -> Vec<String> {
        match self {
            PathConfig::Joined(path) => path
                .trim_matches('/')
                .split('/')
                .map(str::to_string)
                .collect(),
            PathConfig::Segments(segments) => segments.clone(),
        }
    }
}

/// Kind of query as written in YAML
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryKindConfig {
    /// Text content
    Text,
    /// Element count
    Count,
    /// Attribute value, named by the entry's `attribute` field
    Attribute,
}

fn default_kind() -> QueryKindConfig {
    QueryKindConfig::Text
}

/// Top-level query file loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Name of the query set
    pub name: String,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Queries to evaluate, in order
    #[serde(default)]
    pub queries: Vec<QueryEntry>,
}

/// A single query as defined in YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryEntry {
    /// Unique query name
    pub name: String,

    /// Element path from the document root
    pub path: PathConfig,

    /// What to extract (defaults to text)
    #[serde(default = "default_kind")]
    pub kind: QueryKindConfig,

    /// Attribute name, required when kind is `attribute`
    #[serde(default)]
    pub attribute: Option<String>,
}

impl QueryConfig {
    /// Load a query file from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a query file from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: QueryConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the query file
    pub fn validate(&self) -> Result<()> {
        let mut seen_names = std::collections::HashSet::new();
        for query in &self.queries {
            if !seen_names.insert(&query.name) {
                anyhow::bail!("Duplicate query name: {}", query.name);
            }

            let segments = query.path.segments();
            if segments.is_empty() || segments.iter().any(|s| s.trim().is_empty()) {
                anyhow::bail!("Query '{}' has an empty path segment", query.name);
            }

            match (query.kind, &query.attribute) {
                (QueryKindConfig::Attribute, None) => {
                    anyhow::bail!(
                        "Query '{}' has kind 'attribute' but no attribute name",
                        query.name
                    );
                }
                (QueryKindConfig::Text | QueryKindConfig::Count, Some(attribute)) => {
                    anyhow::bail!(
                        "Query '{}' names attribute '{}' but its kind is not 'attribute'",
                        query.name,
                        attribute
                    );
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Convert entries to evaluable queries
    pub fn to_queries(&self) -> Vec<Query> {
        self.queries.iter().map(QueryEntry::to_query).collect()
    }
}

impl QueryEntry {
    /// Convert this entry into a [`Query`]
    pub fn to_query(&self) -> Query {
        let kind = match self.kind {
            QueryKindConfig::Text => QueryKind::Text,
            QueryKindConfig::Count => QueryKind::Count,
            QueryKindConfig::Attribute => QueryKind::Attribute {
                name: self.attribute.clone().unwrap_or_default(),
            },
        };

        Query::new(self.name.clone(), self.path.segments(), kind)
    }
}
