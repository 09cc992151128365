//! # knot-core
//!
//! Parser, event stream, document tree, and canonical serializer for
//! **Knot**, a human-friendly, node-structured configuration/markup
//! language: named nodes with positional values, `key=value` properties,
//! optional `(type)` annotations, nested `{ }` children, `/-` slashdash
//! suppression, raw strings, and based/decimal number literals.
//!
//! ## Quick start
//!
//! ```rust
//! use knot_core::parse;
//!
//! let doc = parse("server port=8080 {\n    host \"localhost\"\n}\n").unwrap();
//! assert_eq!(doc.to_text(), "server port=8080 {\n    host \"localhost\"\n}\n");
//! ```
//!
//! Streaming consumers can skip the tree entirely by implementing
//! [`Visitor`] and calling [`parse_into`]; the grammar engine delivers
//! events in strict document order, and only for rules that fully matched.
//!
//! ## Modules
//!
//! - [`parser`] — the grammar engine (recursive descent with backtracking)
//! - [`event`] — the visitor contract between engine and consumers
//! - [`dom`] — arena document tree + the tree-building visitor
//! - [`fmt`] — canonical text rendering
//! - [`reader`] — cursor, literal matching, string scanners
//! - [`chars`] — character classification
//! - [`error`] — fatal parse errors

pub mod chars;
pub mod dom;
pub mod error;
pub mod event;
pub mod fmt;
pub mod parser;
pub mod reader;
pub mod value;

pub use dom::{parse, Document, Node, NodeId, TreeBuilder};
pub use error::ParseError;
pub use event::{Keyword, Visitor};
pub use parser::parse_into;
pub use value::{Based, Decimal, Exponent, Literal, Number, Radix, Value};
