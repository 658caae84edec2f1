//! Scoped access to the content of a matched element

use std::borrow::Cow;
use std::fmt;

use quick_xml::{events::BytesStart, reader::Reader};

use crate::reader::{BoxError, Error, Expect};

/// An object providing access to the inner content of a non-leaf XML node,
/// returned by [`Expect::expect_element()`] and [`Expect::find_element()`].
///
/// The parent reader stays mutably borrowed for as long as this value lives,
/// so the element has to be dealt with before the parent can move on.
pub struct ElementReader<'a, 'b> {
    _parent: &'b mut Reader<&'a [u8]>,
    start: BytesStart<'a>,
    span: Cow<'a, str>,
}

impl<'a, 'b> ElementReader<'a, 'b> {
    pub(crate) fn new(
        parent: &'b mut Reader<&'a [u8]>,
        start: BytesStart<'a>,
        span: Cow<'a, str>,
    ) -> Self {
        Self {
            _parent: parent,
            start,
            span,
        }
    }
}

impl ElementReader<'_, '_> {
    /// Consume the contents of `self` using a [`quick_xml::Reader`].
    ///
    /// The reader handed to `f` sees only the content between the element's
    /// start and end tags, with text trimmed. See [`Expect`] for usage
    /// examples.
    ///
    /// # Errors
    ///
    /// An error is returned if the closure `f` returns an error, or if the
    /// [`quick_xml::Reader`] is not fully consumed by `f`.
    pub fn read_inner<F, T>(self, mut f: F) -> Result<T, Error>
    where
        F: FnMut(&mut Reader<&[u8]>) -> Result<T, BoxError>,
    {
        let slice = self.span.as_ref();
        let mut reader = Reader::from_str(slice);
        reader.trim_text(true);
        let result = f(&mut reader)?;
        reader.expect_eof()?;
        Ok(result)
    }

    /// The qualified name of the element, as written in the document.
    pub fn name(&self) -> String {
        String::from_utf8_lossy(self.start.name().as_ref()).into_owned()
    }

    /// Look up an attribute on the element's start tag and unescape its value.
    ///
    /// ```
    /// # use nestxml::{Error, Expect, quick_xml::Reader};
    /// let mut reader = Reader::from_str(r#"<link href="a?x=1&amp;y=2"/>"#);
    /// let link = reader.find_element("link")?;
    /// assert_eq!(link.attribute("href")?.as_deref(), Some("a?x=1&y=2"));
    /// assert_eq!(link.attribute("rel")?, None);
    /// # Ok::<(), Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// [`Error::Reader`] if the attribute list is malformed or the value
    /// contains an invalid escape.
    pub fn attribute(&self, name: &str) -> Result<Option<String>, Error> {
        let attribute = self
            .start
            .try_get_attribute(name)
            .map_err(quick_xml::Error::from)?;

        match attribute {
            Some(attribute) => Ok(Some(attribute.unescape_value()?.into_owned())),
            None => Ok(None),
        }
    }

    /// The raw, still escaped, content between the start and end tags.
    pub fn inner_xml(&self) -> &str {
        self.span.as_ref()
    }
}

impl fmt::Debug for ElementReader<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementReader")
            .field("span", &self.span)
            .finish()
    }
}
