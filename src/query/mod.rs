//! Path queries over XML documents
//!
//! A [`Query`] names a chain of elements starting at the document root and
//! says what to extract at the end of it. Queries are evaluated with the
//! [`Expect`] API: every level of the path is read through a scoped
//! [`ElementReader`](crate::ElementReader), non-matching siblings are skipped, and
//! the remainder of each level is drained so the whole document is checked
//! for well-formedness along the way.

pub mod config;

use quick_xml::{events::Event, reader::Reader};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::reader::{BoxError, Error, Expect};

/// What a query extracts from the element(s) at its path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum QueryKind {
    /// Text content of the first matching element
    Text,
    /// Number of elements matching the last path segment
    Count,
    /// Value of an attribute on the first matching element
    Attribute { name: String },
}

/// A named element path plus the kind of value to extract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Query name, used for reporting
    pub name: String,

    /// Element names from the document root down to the target
    pub path: Vec<String>,

    /// What to extract
    pub kind: QueryKind,
}

/// Result of evaluating a [`Query`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QueryOutput {
    /// Text of the target, `None` if the path did not match
    Text(Option<String>),
    /// Number of matching elements
    Count(usize),
    /// Attribute value, `None` if the element or attribute is absent
    Attribute(Option<String>),
}

impl Query {
    /// Create a query from a path of element names
    pub fn new<I, S>(name: impl Into<String>, path: I, kind: QueryKind) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            path: path.into_iter().map(Into::into).collect(),
            kind,
        }
    }

    /// Output reported when some segment of the path is absent
    fn missing(&self) -> QueryOutput {
        match self.kind {
            QueryKind::Text => QueryOutput::Text(None),
            QueryKind::Count => QueryOutput::Count(0),
            QueryKind::Attribute { .. } => QueryOutput::Attribute(None),
        }
    }

    /// Apply the query's extraction to the level containing `target`.
    fn select(&self, scope: &mut Reader<&[u8]>, target: &str) -> Result<QueryOutput, BoxError> {
        match &self.kind {
            QueryKind::Count => {
                let mut count = 0;
                loop {
                    match scope.find_element(target) {
                        Ok(_) => count += 1,
                        Err(Error::Eof) => break,
                        Err(err) => return Err(err.into()),
                    }
                }
                Ok(QueryOutput::Count(count))
            }
            QueryKind::Text => match scope.find_element(target) {
                Ok(element) => {
                    let text = element.read_inner(read_leaf_text)?;
                    Ok(QueryOutput::Text(Some(text)))
                }
                Err(Error::Eof) => Ok(QueryOutput::Text(None)),
                Err(err) => Err(err.into()),
            },
            QueryKind::Attribute { name } => match scope.find_element(target) {
                Ok(element) => Ok(QueryOutput::Attribute(element.attribute(name)?)),
                Err(Error::Eof) => Ok(QueryOutput::Attribute(None)),
                Err(err) => Err(err.into()),
            },
        }
    }
}

/// Evaluate `query` against an XML document.
///
/// # Examples
///
/// ```
/// use nestxml::query::{evaluate, Query, QueryKind, QueryOutput};
///
/// let doc = "<library><book>Dune</book><book>Emma</book></library>";
///
/// let first = Query::new("first", ["library", "book"], QueryKind::Text);
/// assert_eq!(evaluate(doc, &first)?, QueryOutput::Text(Some("Dune".into())));
///
/// let count = Query::new("count", ["library", "book"], QueryKind::Count);
/// assert_eq!(evaluate(doc, &count)?, QueryOutput::Count(2));
/// # Ok::<(), nestxml::Error>(())
/// ```
///
/// # Errors
///
/// Malformed XML anywhere in the visited levels, and text targets with
/// element children, are reported with their underlying [`Error`] variant
/// rather than wrapped in [`Error::Inner`].
pub fn evaluate(document: &str, query: &Query) -> Result<QueryOutput, Error> {
    debug!("evaluating query '{}' at /{}", query.name, query.path.join("/"));

    let Some((target, parents)) = query.path.split_last() else {
        return Ok(query.missing());
    };

    let mut reader = Reader::from_str(document);
    reader.trim_text(true);

    let mut leaf = |scope: &mut Reader<&[u8]>| query.select(scope, target);
    let found = descend(&mut reader, parents, &mut leaf).map_err(unbox)?;

    Ok(found.unwrap_or_else(|| query.missing()))
}

/// Check that `document` is well-formed and consists of a single root
/// element named `root`, optionally surrounded by a declaration, comments
/// and processing instructions.
///
/// # Errors
///
/// [`Error::UnexpectedEvent`] for a root with another name, a second root or
/// top-level text; [`Error::Eof`] if there is no root or it is left open;
/// [`Error::Reader`] for syntax errors and mismatched end tags.
pub fn check_document(document: &str, root: &str) -> Result<(), Error> {
    debug!("checking document for single root <{}>", root);

    let mut reader = Reader::from_str(document);
    reader.trim_text(true);

    let mut depth = 0usize;
    let mut roots = 0usize;
    loop {
        let event = reader.read_event()?;
        match &event {
            Event::Start(tag) | Event::Empty(tag) if depth == 0 => {
                if roots > 0 || tag.name().as_ref() != root.as_bytes() {
                    return Err(Error::unexpected_event(event.clone()));
                }
                roots += 1;
                if matches!(event, Event::Start(_)) {
                    depth += 1;
                }
            }
            Event::Start(_) => depth += 1,
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Text(_) | Event::CData(_) if depth == 0 => {
                return Err(Error::unexpected_event(event.clone()));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth > 0 || roots == 0 {
        return Err(Error::Eof);
    }
    Ok(())
}

/// Join the text and CDATA of a leaf element, passing over comments and
/// processing instructions. Child elements are mixed content and rejected.
fn read_leaf_text(inner: &mut Reader<&[u8]>) -> Result<String, BoxError> {
    let mut text = String::new();
    loop {
        match inner.read_event().map_err(Error::from)? {
            Event::Text(txt) => text.push_str(&txt.unescape().map_err(Error::from)?),
            Event::CData(data) => text.push_str(std::str::from_utf8(&data)?),
            event @ (Event::Start(_) | Event::Empty(_) | Event::End(_)) => {
                return Err(Error::unexpected_event(event).into());
            }
            Event::Eof => return Ok(text),
            _ => continue,
        }
    }
}

/// Walk `path` one level at a time and run `leaf` inside the last element.
///
/// Returns `None` if some segment of the path is absent.
fn descend<T>(
    reader: &mut Reader<&[u8]>,
    path: &[String],
    leaf: &mut dyn FnMut(&mut Reader<&[u8]>) -> Result<T, BoxError>,
) -> Result<Option<T>, BoxError> {
    let found = match path.split_first() {
        None => Some(leaf(reader)?),
        Some((name, rest)) => match reader.find_element(name) {
            Ok(element) => element.read_inner(|inner| descend(inner, rest, &mut *leaf))?,
            Err(Error::Eof) => None,
            Err(err) => return Err(err.into()),
        },
    };

    skip_rest(reader)?;
    Ok(found)
}

/// Drain the remaining nodes of the current level.
fn skip_rest(reader: &mut Reader<&[u8]>) -> Result<(), Error> {
    loop {
        match reader.skip_node() {
            Ok(()) => continue,
            Err(Error::Eof) => return Ok(()),
            Err(err) => return Err(err),
        }
    }
}

/// Strip the [`Error::Inner`] layers added by nested `read_inner` scopes.
fn unbox(err: BoxError) -> Error {
    match err.downcast::<Error>() {
        Ok(err) => match *err {
            Error::Inner(inner) => unbox(inner),
            other => other,
        },
        Err(other) => Error::Inner(other),
    }
}
