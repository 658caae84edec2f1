//! The `Expect` extension trait for `quick_xml::Reader`

use std::borrow::Cow;

use quick_xml::{events::Event, reader::Reader};
use tracing::{debug, trace};

use crate::reader::{ElementReader, Error};

mod sealed {
    pub trait Sealed {}
    impl Sealed for quick_xml::Reader<&[u8]> {}
}
use self::sealed::Sealed;

/// Methods for traversing an XML document in structured fashion.
///
/// Each method consumes exactly one event (or, for elements, one whole
/// subtree) and checks it against what the caller expects to find next.
///
/// # Examples
///
/// ```
/// # use nestxml::{Error, Expect, quick_xml::Reader};
/// let input = r#"
///     <root>
///         <ball>red</ball>
///         <bat/>
///         <ball>blue</ball>
///         <ball>green</ball>
///     </root>
/// "#;
///
/// let mut reader = Reader::from_str(input);
/// reader.trim_text(true);
///
/// let mut balls = Vec::new();
///
/// reader.expect_element("root")?.read_inner(|reader| loop {
///     match reader.expect_element("ball") {
///         Ok(inner) => {
///             inner.read_inner(|reader| {
///                 balls.push(reader.expect_text()?.into_owned());
///                 Ok(())
///             })?;
///         }
///         Err(Error::Eof) => break Ok(()),
///         Err(Error::UnexpectedEvent(_)) => continue,
///         Err(err) => break Err(err.into()),
///     }
/// })?;
/// reader.expect_eof()?;
///
/// assert_eq!(balls, vec!["red", "blue", "green"]);
/// # Ok::<(), Error>(())
/// ```
pub trait Expect<'a>: Sealed {
    /// Attempt to match and consume a span `<name>...</name>`.
    ///
    /// On success an [`ElementReader`] is returned that can be used to read the
    /// child nodes of the matched element.
    ///
    /// # Errors
    ///
    /// An [`Error::Eof`] is returned if `self` reaches the end of its input.
    /// This is useful to signal a containing loop to `break`.
    /// Otherwise, an [`Error::UnexpectedEvent`] is returned if the next
    /// [`Event`] encountered is not a start-tag for `name`.
    ///
    /// An [`Error::Reader`] is returned if an error is encountered while trying
    /// to read from `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use nestxml::{Error, Expect, quick_xml::{events::Event, Reader}};
    /// assert_eq!(
    ///     Reader::from_str("<node>contents</node>")
    ///         .expect_element("node")?
    ///         .read_inner(|reader| Ok(reader.expect_text()?.into_owned()))?,
    ///     "contents",
    /// );
    ///
    /// assert!(matches!(
    ///     Reader::from_str("<empty/>").expect_element("node"),
    ///     Err(Error::UnexpectedEvent(Event::Empty(_))),
    /// ));
    /// # Ok::<(), Error>(())
    /// ```
    fn expect_element(&mut self, name: &str) -> Result<ElementReader<'a, '_>, Error>;

    /// Attempt to match and consume an empty element `<name/>`.
    ///
    /// # Errors
    ///
    /// An [`Error::Eof`] is returned at the end of input, an
    /// [`Error::UnexpectedEvent`] if the next [`Event`] is not an empty-tag for
    /// `name`, and an [`Error::Reader`] if reading fails.
    ///
    /// # Examples
    ///
    /// ```
    /// # use nestxml::{Error, Expect, quick_xml::{events::Event, Reader}};
    /// assert!(Reader::from_str("<empty/>").expect_empty("empty").is_ok());
    ///
    /// assert!(matches!(
    ///     Reader::from_str("<non-empty></non-empty>").expect_empty("empty"),
    ///     Err(Error::UnexpectedEvent(Event::Start(_))),
    /// ));
    /// # Ok::<(), Error>(())
    /// ```
    fn expect_empty(&mut self, name: &str) -> Result<(), Error>;

    /// Attempt to match and consume an [`Event::Eof`].
    ///
    /// # Errors
    ///
    /// An [`Error::UnexpectedEvent`] is returned if `self` is not at the end of
    /// its input. This method never returns [`Error::Eof`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use nestxml::{Error, Expect, quick_xml::Reader};
    /// assert!(Reader::from_str("").expect_eof().is_ok());
    /// # Ok::<(), Error>(())
    /// ```
    fn expect_eof(&mut self) -> Result<(), Error>;

    /// Attempt to match and consume a text node.
    ///
    /// On success a [`Cow<'a, str>`][Cow] is returned with the un-escaped text
    /// of the node.
    ///
    /// # Errors
    ///
    /// [`Error::Eof`] at the end of input, [`Error::UnexpectedEvent`] if the
    /// next [`Event`] is not a text node. Malformed escapes are reported as
    /// [`Error::Reader`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use nestxml::{Error, Expect, quick_xml::Reader};
    /// assert_eq!(
    ///     Reader::from_str("<root>This is &gt; than that</root>")
    ///         .expect_element("root")?
    ///         .read_inner(|reader| Ok(reader.expect_text()?.into_owned()))?,
    ///     "This is > than that"
    /// );
    /// # Ok::<(), Error>(())
    /// ```
    fn expect_text(&mut self) -> Result<Cow<'a, str>, Error>;

    /// Skip sibling nodes until an element named `name` is found.
    ///
    /// Unlike [`Expect::expect_element`], non-matching elements are consumed
    /// together with their children, and text, comments, declarations and
    /// processing instructions are passed over. Both `<name>...</name>` and
    /// `<name/>` match; the latter yields an [`ElementReader`] with no content.
    ///
    /// # Errors
    ///
    /// [`Error::Eof`] if no such element remains, [`Error::UnexpectedEvent`]
    /// on a stray end tag.
    ///
    /// ```
    /// # use nestxml::{Error, Expect, quick_xml::Reader};
    /// let mut reader = Reader::from_str("<a><x/></a>skipped<b>found</b>");
    /// reader.trim_text(true);
    /// let text = reader
    ///     .find_element("b")?
    ///     .read_inner(|reader| Ok(reader.expect_text()?.into_owned()))?;
    /// assert_eq!(text, "found");
    /// assert!(reader.find_element("b").unwrap_err().is_eof());
    /// # Ok::<(), Error>(())
    /// ```
    fn find_element(&mut self, name: &str) -> Result<ElementReader<'a, '_>, Error>;

    /// Consume exactly one node, including all children of an element.
    ///
    /// # Errors
    ///
    /// [`Error::Eof`] at the end of input, [`Error::UnexpectedEvent`] on a
    /// stray end tag.
    fn skip_node(&mut self) -> Result<(), Error>;
}

impl<'a> Expect<'a> for Reader<&'a [u8]> {
    fn expect_element(&mut self, name: &str) -> Result<ElementReader<'a, '_>, Error> {
        debug!("expecting element <{}>", name);
        match self.read_event()? {
            Event::Start(tag) if tag.name().as_ref() == name.as_bytes() => {
                debug!("found element <{}>, scanning for end tag", name);
                let span = {
                    let end = tag.to_end();
                    self.read_text(end.name())?
                };
                trace!("got contents {}", span);
                Ok(ElementReader::new(self, tag, span))
            }
            Event::Eof => Err(Error::Eof),
            event => Err(Error::unexpected_event(event)),
        }
    }

    fn expect_empty(&mut self, name: &str) -> Result<(), Error> {
        debug!("expecting element <{}/>", name);
        match self.read_event()? {
            Event::Empty(tag) if tag.name().as_ref() == name.as_bytes() => Ok(()),
            Event::Eof => Err(Error::Eof),
            event => Err(Error::unexpected_event(event)),
        }
    }

    fn expect_eof(&mut self) -> Result<(), Error> {
        debug!("expecting end-of-file");
        match self.read_event()? {
            Event::Eof => Ok(()),
            event => Err(Error::unexpected_event(event)),
        }
    }

    fn expect_text(&mut self) -> Result<Cow<'a, str>, Error> {
        debug!("expecting text node");
        match self.read_event()? {
            Event::Text(txt) => Ok(txt.unescape()?),
            Event::Eof => Err(Error::Eof),
            event => Err(Error::unexpected_event(event)),
        }
    }

    fn find_element(&mut self, name: &str) -> Result<ElementReader<'a, '_>, Error> {
        debug!("searching for element <{}>", name);
        loop {
            match self.read_event()? {
                Event::Start(tag) if tag.name().as_ref() == name.as_bytes() => {
                    let span = {
                        let end = tag.to_end();
                        self.read_text(end.name())?
                    };
                    trace!("got contents {}", span);
                    return Ok(ElementReader::new(self, tag, span));
                }
                Event::Empty(tag) if tag.name().as_ref() == name.as_bytes() => {
                    return Ok(ElementReader::new(self, tag, Cow::Borrowed("")));
                }
                Event::Start(tag) => {
                    trace!(
                        "skipping element <{}>",
                        String::from_utf8_lossy(tag.name().as_ref())
                    );
                    let end = tag.to_end();
                    self.read_to_end(end.name())?;
                }
                Event::Eof => return Err(Error::Eof),
                event @ Event::End(_) => return Err(Error::unexpected_event(event)),
                _ => continue,
            }
        }
    }

    fn skip_node(&mut self) -> Result<(), Error> {
        match self.read_event()? {
            Event::Start(tag) => {
                let end = tag.to_end();
                self.read_to_end(end.name())?;
                Ok(())
            }
            Event::Eof => Err(Error::Eof),
            event @ Event::End(_) => Err(Error::unexpected_event(event)),
            _ => Ok(()),
        }
    }
}
