//! Scenario: evaluating a YAML query file against a document

use crate::helpers::*;
use nestxml::query::config::QueryConfig;
use nestxml::{evaluate, Error, QueryOutput};

const QUERIES: &str = r#"
name: "Feed checks"
description: "Smoke checks for the release notes feed"

queries:
  - name: "channel-title"
    path: rss/channel/title

  - name: "items"
    path: [rss, channel, item]
    kind: count

  - name: "first-release"
    path: rss/channel/item/title

  - name: "link"
    path: rss/channel/link
    kind: attribute
    attribute: href

  - name: "image"
    path: rss/channel/image
"#;

/// Test the full load-validate-evaluate flow from a file on disk
#[test]
fn test_query_file_against_feed() {
    let (_dir, path) = write_temp("feed.yaml", QUERIES);
    let config = QueryConfig::from_file(&path).unwrap();
    assert_eq!(config.name, "Feed checks");

    let results: Vec<(String, QueryOutput)> = config
        .to_queries()
        .iter()
        .map(|query| (query.name.clone(), evaluate(FEED, query).unwrap()))
        .collect();

    assert_eq!(
        results,
        vec![
            (
                "channel-title".to_string(),
                QueryOutput::Text(Some("Release notes".to_string()))
            ),
            ("items".to_string(), QueryOutput::Count(2)),
            (
                "first-release".to_string(),
                QueryOutput::Text(Some("0.1.0".to_string()))
            ),
            (
                "link".to_string(),
                QueryOutput::Attribute(Some(
                    "https://example.com/notes?lang=en&page=1".to_string()
                ))
            ),
            ("image".to_string(), QueryOutput::Text(None)),
        ]
    );
}

/// Test that a query against a malformed document reports the XML error
#[test]
fn test_query_against_truncated_document() {
    let config = QueryConfig::from_yaml(QUERIES).unwrap();
    let truncated = &FEED[..FEED.find("</channel>").unwrap()];

    let query = &config.to_queries()[0];
    assert!(matches!(evaluate(truncated, query), Err(Error::Reader(_))));
}

/// Test that invalid query files never reach evaluation
#[test]
fn test_invalid_query_file_is_rejected() {
    let (_dir, path) = write_temp(
        "bad.yaml",
        r#"
name: "Broken"
queries:
  - name: "link"
    path: rss/channel/link
    kind: attribute
"#,
    );

    let err = QueryConfig::from_file(&path).unwrap_err();
    assert!(err.to_string().contains("'link'"));
}
