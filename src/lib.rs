//! nestxml - structured, closure-scoped reading of nested XML
//!
//! This library extends [quick-xml] with methods to read deeply nested XML
//! without endless nested loops of `match` statements. See [`Expect`] for
//! details, and [`query`] for path lookups built on top of it.
//!
//! # Example
//!
//! ```
//! use nestxml::{quick_xml::Reader, Error, Expect};
//!
//! const IN: &str = r#"
//!     <root>
//!         <foo>
//!             <bar/>
//!             <bar/>
//!         </foo>
//!     </root>
//! "#;
//!
//! fn main() -> Result<(), Error> {
//!     let mut bars = 0;
//!
//!     let mut reader = Reader::from_str(IN);
//!     reader.trim_text(true);
//!
//!     reader.expect_element("root")?.read_inner(|reader| {
//!         reader.expect_element("foo")?.read_inner(|reader| {
//!             while let Ok(()) = reader.expect_empty("bar") {
//!                 bars += 1;
//!             }
//!             Ok(())
//!         })?;
//!         Ok(())
//!     })?;
//!     reader.expect_eof()?;
//!
//!     assert_eq!(bars, 2);
//!
//!     Ok(())
//! }
//! ```
//!
//! [quick-xml]: https://docs.rs/quick-xml
#![doc(html_root_url = "https://docs.rs/nestxml/0.1.0")]

pub use quick_xml;

pub mod cli;
pub mod query;
pub mod reader;

// Re-export commonly used types
pub use query::{check_document, evaluate, Query, QueryKind, QueryOutput};
pub use reader::{BoxError, ElementReader, Error, Expect};
