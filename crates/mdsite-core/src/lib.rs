//! # mdsite Core
//!
//! Converts a markdown document into an HTML element tree and extracts its
//! title.
//!
//! The pipeline is pure and deterministic: no I/O, no shared state. A
//! document is cut into blocks at blank lines, each block is classified and
//! rendered, and inline text goes through a fixed sequence of tokenizer
//! passes.
//!
//! ## Quick Start
//!
//! ```rust
//! use mdsite_core::Converter;
//!
//! let input = "# Hello World\n\nThis is a **paragraph**.";
//! let page = Converter::new().convert(input).unwrap();
//!
//! assert_eq!(page.title, "Hello World");
//! assert_eq!(
//!     page.html(),
//!     "<div><h1>Hello World</h1><p>This is a <b>paragraph</b>.</p></div>"
//! );
//! ```
//!
//! ## Errors
//!
//! Only two inputs are rejected: an inline delimiter without a closing
//! pair, and a document with no title. Anything else degrades to a less
//! specific block kind.
//!
//! ```rust
//! use mdsite_core::{markdown_to_html, ErrorKind};
//!
//! let err = markdown_to_html("a **dangling bold").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::UnbalancedDelimiter);
//! ```

pub mod block;
pub mod converter;
pub mod element;
pub mod error;
pub mod inline;
pub mod lexer;
pub mod list;
pub mod render;
pub mod span;
pub mod title;

pub use block::{classify, split_blocks, Block, BlockKind};
pub use converter::{markdown_to_html, ConvertOptions, Converter, Page};
pub use element::{Attrs, Element};
pub use error::{Error, ErrorKind, Result};
pub use inline::{tokenize, InlineSpan, SpanKind};
pub use list::{build_list, ListKind};
pub use render::{render_block, span_to_element};
pub use title::{extract_title, strip_frontmatter, HeadingScope};
