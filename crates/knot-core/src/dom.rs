//! The Knot document tree.
//!
//! Nodes live in an arena owned by [`Document`] and are addressed by stable
//! [`NodeId`] indices. Index 0 is a synthetic root: it owns the top-level
//! nodes, is never rendered as a line of output, and is never removed.
//! Parent links are plain indices, so the tree needs no reference counting
//! and clones are cheap deep copies.
//!
//! [`TreeBuilder`] is the [`Visitor`] that turns the parser's event stream
//! into a `Document`; [`parse`] wires the two together. Suppressed (`/-`)
//! units never reach the builder — the grammar engine filters them — so the
//! builder's state is just a cursor and two one-shot pending slots.

use crate::error::Result;
use crate::event::{Keyword, Visitor};
use crate::fmt;
use crate::parser;
use crate::value::{Literal, Number, Value};

/// Parse a Knot document into a tree.
///
/// On any error the partially built tree is discarded; there is no
/// recoverable parse state.
///
/// # Example
/// ```
/// use knot_core::parse;
///
/// let doc = parse("package {\n    name \"knot\"\n}\n").unwrap();
/// let root = doc.node(doc.root());
/// assert_eq!(root.children().len(), 1);
/// ```
pub fn parse(text: &str) -> Result<Document> {
    let mut builder = TreeBuilder::new();
    parser::parse_into(text, &mut builder)?;
    Ok(builder.finish())
}

/// Stable handle to a node within its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// An owned Knot document: an arena of nodes rooted at index 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// An empty document: just the synthetic root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(String::new(), None)],
        }
    }

    /// The synthetic root. Never printed; its children are the top-level
    /// nodes.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Append a new, empty node under `parent` and return its id.
    pub fn push_node(&mut self, parent: NodeId, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(name.into(), Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Render the canonical text form. See the `fmt` module for the rules.
    pub fn to_text(&self) -> String {
        fmt::to_text(self)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// A named structural unit: optional type annotation, positional values,
/// keyed properties, nested children.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    name: String,
    type_hint: Option<String>,
    values: Vec<Value>,
    properties: Vec<(String, Value)>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Node {
    fn new(name: String, parent: Option<NodeId>) -> Self {
        Self {
            name,
            type_hint: None,
            values: Vec::new(),
            properties: Vec::new(),
            children: Vec::new(),
            parent,
        }
    }

    /// The node name, decoded. Empty only on the synthetic root.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_hint(&self) -> Option<&str> {
        self.type_hint.as_deref()
    }

    pub fn set_type_hint(&mut self, hint: impl Into<String>) {
        self.type_hint = Some(hint.into());
    }

    /// Positional values, in document order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn push_value(&mut self, value: impl Into<Value>) {
        self.values.push(value.into());
    }

    /// Properties in insertion order. Keys are unique; re-assignment
    /// overwrites in place, keeping output deterministic.
    pub fn properties(&self) -> &[(String, Value)] {
        &self.properties
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Set a property; the last write wins without moving the key's slot.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.properties.iter_mut().find(|(name, _)| *name == key) {
            Some(slot) => slot.1 = value,
            None => self.properties.push((key, value)),
        }
    }

    /// Child node ids, in document order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Non-owning back-reference; `None` only on the synthetic root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// Visitor that assembles a [`Document`] from the event stream.
pub struct TreeBuilder {
    doc: Document,
    cursor: NodeId,
    pending_property: Option<String>,
    pending_hint: Option<String>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        let doc = Document::new();
        let cursor = doc.root();
        Self {
            doc,
            cursor,
            pending_property: None,
            pending_hint: None,
        }
    }

    /// The finished tree. Only meaningful after a successful parse.
    pub fn finish(self) -> Document {
        self.doc
    }

    fn push_literal(&mut self, literal: Literal) {
        let value = Value {
            type_hint: self.pending_hint.take(),
            literal,
        };
        let node = self.doc.node_mut(self.cursor);
        match self.pending_property.take() {
            Some(key) => node.set_property(key, value),
            None => node.push_value(value),
        }
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Visitor for TreeBuilder {
    fn type_hint(&mut self, name: &str) {
        self.pending_hint = Some(name.to_string());
    }

    fn node(&mut self, name: &str) {
        let id = self.doc.push_node(self.cursor, name);
        if let Some(hint) = self.pending_hint.take() {
            self.doc.node_mut(id).set_type_hint(hint);
        }
        self.cursor = id;
    }

    fn node_end(&mut self) {
        let root = self.doc.root();
        self.cursor = self.doc.node(self.cursor).parent().unwrap_or(root);
    }

    fn property(&mut self, key: &str) {
        self.pending_property = Some(key.to_string());
    }

    fn value_string(&mut self, value: &str) {
        self.push_literal(Literal::String(value.to_string()));
    }

    fn value_number(&mut self, value: &Number, _raw: &str) {
        self.push_literal(Literal::Number(value.clone()));
    }

    fn value_keyword(&mut self, keyword: Keyword) {
        self.push_literal(match keyword {
            Keyword::Null => Literal::Null,
            Keyword::True => Literal::Bool(true),
            Keyword::False => Literal::Bool(false),
        });
    }
}
