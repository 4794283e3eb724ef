//! Markup tree model for Cifra.
//!
//! This crate provides the mutable tree that the highlighting passes
//! operate on: a [`Node`] is either a text leaf or an [`Element`] with an
//! ordered child list. [`parse_fragment`] builds a tree from an HTML/XHTML
//! fragment and [`serialize_fragment`] writes it back, escaping all text
//! content on output.
//!
//! # Example
//!
//! ```
//! use cifra_dom::{parse_fragment, serialize_fragment};
//!
//! let root = parse_fragment("<p>Hello <strong>world</strong></p>").unwrap();
//! assert_eq!(root.text_content(), "Hello world");
//! assert_eq!(serialize_fragment(&root), "<p>Hello <strong>world</strong></p>");
//! ```

mod entities;
mod error;
mod parser;
mod serializer;
mod tree;

pub use entities::convert_html_entities;
pub use error::DomError;
pub use parser::parse_fragment;
pub use serializer::serialize_fragment;
pub use tree::{Element, Node};
