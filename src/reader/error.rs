//! Reader error types

use quick_xml::events::Event;
use thiserror::Error;

/// Boxed error type returned from [`ElementReader::read_inner`] closures.
///
/// [`ElementReader::read_inner`]: crate::ElementReader::read_inner
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Library error types.
#[derive(Debug, Error)]
pub enum Error {
    /// An error occurred while reading from a [`quick_xml::Reader`].
    #[error("XML read error: {0}")]
    Reader(#[from] quick_xml::Error),

    /// An unexpected [`Event`] was encountered while reading.
    #[error("unexpected XML event: {0:?}")]
    UnexpectedEvent(Event<'static>),

    /// An error was returned while processing the inner content of an XML node.
    #[error("Error while reading inner content: {0}")]
    Inner(#[from] BoxError),

    /// End-of-file while reading input.
    #[error("End-of-file while reading inner content")]
    Eof,
}

impl Error {
    pub(crate) fn unexpected_event(event: Event<'_>) -> Self {
        Self::UnexpectedEvent(event.into_owned())
    }

    /// Whether this is [`Error::Eof`], the usual signal to leave a read loop.
    pub fn is_eof(&self) -> bool {
        matches!(self, Self::Eof)
    }
}
