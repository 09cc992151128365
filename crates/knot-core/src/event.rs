//! The visitor contract between the grammar engine and its consumers.
//!
//! The parser is polymorphic over [`Visitor`]: the tree builder, a streaming
//! validator, or a pretty-printer can all sit on the other side without the
//! grammar knowing. Methods default to no-ops so a consumer implements only
//! the events it cares about. The trait is dyn-compatible, so a
//! `&mut dyn Visitor` works where runtime dispatch is preferred.
//!
//! One parse produces exactly one well-formed traversal:
//!
//! ```text
//! document_begin
//!   ( type_hint? node
//!       ( property | value_string | value_number | value_keyword | unit_skipped )*
//!       [ children_begin <nested> children_end ]
//!     node_end
//!   | unit_skipped )*
//! document_end
//! ```
//!
//! Guarantees:
//!
//! - every `node` has exactly one matching `node_end`;
//! - `children_begin`/`children_end` balance and nest;
//! - a `type_hint` applies to the very next `node` or value event;
//! - a `property` names the very next value event;
//! - nothing is emitted for a grammar rule that failed to fully match, so a
//!   prefix of events always corresponds to a prefix of consumed input;
//! - a `/-`-suppressed unit is parsed and validated in full but emits a
//!   single `unit_skipped` in place of its structural events.

use crate::value::Number;

/// Keyword literals that can appear in value position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Null,
    True,
    False,
}

/// Callbacks invoked by the grammar engine, in strict document order.
pub trait Visitor {
    /// The parse started.
    fn document_begin(&mut self) {}

    /// The whole input was consumed successfully.
    fn document_end(&mut self) {}

    /// A `(type)` annotation; applies to the next `node` or value event.
    fn type_hint(&mut self, _name: &str) {}

    /// A node header. The name is already unquoted/unescaped and never empty.
    fn node(&mut self, _name: &str) {}

    /// The node opened by the matching `node` event is complete.
    fn node_end(&mut self) {}

    /// A property key; the next value event carries its value.
    fn property(&mut self, _key: &str) {}

    fn value_string(&mut self, _value: &str) {}

    /// A numeric value, both decoded and as the raw source span (sign,
    /// radix prefix, and digit separators intact) so lossless consumers can
    /// keep the spelling while semantic consumers use the decoded form.
    fn value_number(&mut self, _value: &Number, _raw: &str) {}

    fn value_keyword(&mut self, _keyword: Keyword) {}

    /// A `{` opened under the current node.
    fn children_begin(&mut self) {}

    /// The matching `}` closed.
    fn children_end(&mut self) {}

    /// A `/-`-prefixed node, property, value, or child block was parsed,
    /// validated, and discarded.
    fn unit_skipped(&mut self) {}
}
