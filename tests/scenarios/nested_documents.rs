//! Scenario: reading nested documents into typed values with the Expect API

use crate::helpers::*;
use nestxml::quick_xml::{events::Event, Reader};
use nestxml::{BoxError, Error, Expect};
use std::collections::BTreeMap;

#[derive(Debug, PartialEq)]
struct Feed {
    title: String,
    href: Option<String>,
    items: Vec<Item>,
}

#[derive(Debug, PartialEq)]
struct Item {
    title: String,
    description: Option<String>,
    categorized: bool,
}

fn read_text(reader: &mut Reader<&[u8]>, name: &str) -> Result<String, BoxError> {
    Ok(reader
        .expect_element(name)?
        .read_inner(|reader| Ok(reader.expect_text()?.into_owned()))?)
}

fn parse_item(reader: &mut Reader<&[u8]>) -> Result<Item, BoxError> {
    let title = read_text(reader, "title")?;
    let mut description = None;
    let mut categorized = false;

    loop {
        match reader.expect_element("description") {
            Ok(element) => {
                description =
                    Some(element.read_inner(|reader| Ok(reader.expect_text()?.into_owned()))?);
            }
            Err(Error::Eof) => break,
            Err(Error::UnexpectedEvent(Event::Empty(tag))) if tag.name().as_ref() == b"category" => {
                categorized = true;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(Item {
        title,
        description,
        categorized,
    })
}

fn parse_feed(input: &str) -> Result<Feed, Error> {
    let mut reader = trimmed_reader(input);

    let rss = reader.find_element("rss")?;
    assert_eq!(rss.attribute("version")?.as_deref(), Some("2.0"));

    let feed = rss.read_inner(|reader| {
        Ok(reader.expect_element("channel")?.read_inner(|reader| {
            let title = read_text(reader, "title")?;
            let href = reader.find_element("link")?.attribute("href")?;

            let mut items = Vec::new();
            loop {
                match reader.expect_element("item") {
                    Ok(item) => items.push(item.read_inner(parse_item)?),
                    Err(Error::Eof) => break,
                    Err(Error::UnexpectedEvent(Event::Comment(_))) => continue,
                    Err(err) => return Err(err.into()),
                }
            }

            Ok(Feed { title, href, items })
        })?)
    })?;

    reader.expect_eof()?;
    Ok(feed)
}

/// Test reading a feed with declaration, comments, escapes and optional nodes
#[test]
fn test_parse_feed() {
    let feed = parse_feed(FEED).unwrap();

    assert_eq!(
        feed,
        Feed {
            title: "Release notes".to_string(),
            href: Some("https://example.com/notes?lang=en&page=1".to_string()),
            items: vec![
                Item {
                    title: "0.1.0".to_string(),
                    description: Some("First <beta> release".to_string()),
                    categorized: false,
                },
                Item {
                    title: "0.1.1".to_string(),
                    description: None,
                    categorized: true,
                },
            ],
        }
    );
}

/// Test that an error deep inside nested closures keeps its cause chain
#[test]
fn test_nested_error_keeps_source_chain() {
    let input = "<rss version=\"2.0\"><channel><title>x</title></channel></rss>";

    let err = parse_feed(input).unwrap_err();
    assert!(matches!(err, Error::Inner(_)));

    let mut source: &dyn std::error::Error = &err;
    while let Some(next) = source.source() {
        source = next;
    }
    assert_eq!(source.to_string(), "End-of-file while reading inner content");
}

/// Test that content after the root element is rejected
#[test]
fn test_trailing_root_is_rejected() {
    let input = format!("{}<extra/>", FEED);

    match parse_feed(&input) {
        Err(Error::UnexpectedEvent(Event::Empty(tag))) => {
            assert_eq!(tag.name().as_ref(), b"extra");
        }
        other => panic!("Expected UnexpectedEvent, got {:?}", other),
    }
}

/// Test dispatching on mixed sibling kinds via the rejected event
#[test]
fn test_mixed_entries_and_flags() {
    let mut reader = trimmed_reader(SETTINGS);
    let mut entries = BTreeMap::new();
    let mut flags = Vec::new();

    reader
        .expect_element("settings")
        .unwrap()
        .read_inner(|reader| loop {
            match reader.expect_element("entry") {
                Ok(entry) => {
                    let key = entry.attribute("key")?.ok_or("entry without key")?;
                    let value = entry.read_inner(|r| Ok(r.expect_text()?.into_owned()))?;
                    entries.insert(key, value);
                }
                Err(Error::UnexpectedEvent(Event::Empty(tag))) => {
                    let name = tag
                        .try_get_attribute("name")?
                        .ok_or("flag without name")?;
                    flags.push(String::from_utf8(name.value.into_owned())?);
                }
                Err(Error::Eof) => break Ok(()),
                Err(err) => break Err(err.into()),
            }
        })
        .unwrap();
    reader.expect_eof().unwrap();

    assert_eq!(entries.get("threads").map(String::as_str), Some("4"));
    assert_eq!(entries.get("output").map(String::as_str), Some("/tmp/out"));
    assert_eq!(flags, vec!["verbose", "color"]);
}

fn depth(reader: &mut Reader<&[u8]>) -> Result<usize, BoxError> {
    match reader.expect_element("n") {
        Ok(element) => Ok(1 + element.read_inner(depth)?),
        Err(Error::Eof) => Ok(0),
        Err(err) => Err(err.into()),
    }
}

/// Test recursion through many levels of same-named elements
#[test]
fn test_deeply_nested_same_name() {
    let levels = 50;
    let input = format!("{}{}", "<n>".repeat(levels), "</n>".repeat(levels));

    let mut reader = trimmed_reader(&input);
    assert_eq!(depth(&mut reader).unwrap(), levels);
    reader.expect_eof().unwrap();
}
