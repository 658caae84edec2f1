//! Structured reading on top of `quick_xml::Reader`
//!
//! This module defines the [`Expect`] extension trait, the scoped
//! [`ElementReader`] it hands out for matched elements, and the library
//! [`Error`] type.

mod element;
mod error;
mod expect;

pub use element::ElementReader;
pub use error::{BoxError, Error};
pub use expect::Expect;
