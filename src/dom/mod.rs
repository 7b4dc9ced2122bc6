//! Document tree capability used by the binder.
//!
//! The binder only needs a handful of operations, so it talks to the
//! [`DocumentTree`] trait instead of a concrete HTML library:
//!
//! ```text
//! select ─► clear_children ─► append_fragment ─► siblings_matching ─► remove_node
//!                                                     set_text (counts)
//! ```
//!
//! [`HtmlDocument`] is the implementation backed by `scraper` (html5ever
//! parsing, CSS selector matching).

mod tree;

pub use tree::HtmlDocument;

use thiserror::Error;

/// Handle to a node inside a document. Only valid for the document that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(ego_tree::NodeId);

#[derive(Debug, Error)]
pub enum DomError {
    #[error("Invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },
}

/// A parsed CSS selector.
#[derive(Debug, Clone)]
pub struct Selector(scraper::Selector);

impl Selector {
    pub fn parse(selector: &str) -> Result<Self, DomError> {
        scraper::Selector::parse(selector)
            .map(Self)
            .map_err(|err| DomError::Selector {
                selector: selector.to_owned(),
                reason: format!("{err:?}"),
            })
    }
}

/// Mutable document operations needed to bind fragments into a page.
pub trait DocumentTree {
    /// Elements matching `selector`, in document order.
    fn select(&self, selector: &Selector) -> Vec<NodeId>;

    /// Siblings of `node` (excluding itself) matching `selector`.
    fn siblings_matching(&self, node: NodeId, selector: &Selector) -> Vec<NodeId>;

    /// Detach every child of `node`.
    fn clear_children(&mut self, node: NodeId);

    /// Parse `html` and append the resulting nodes as children of `parent`.
    /// The markup is inserted as-is.
    fn append_fragment(&mut self, parent: NodeId, html: &str);

    /// Detach `node` from its parent.
    fn remove_node(&mut self, node: NodeId);

    /// Replace the children of `node` with a single text node.
    fn set_text(&mut self, node: NodeId, text: &str);

    /// The `<body>` element, if the document has one.
    fn body(&self) -> Option<NodeId>;
}
