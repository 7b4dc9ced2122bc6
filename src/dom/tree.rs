//! `scraper`-backed HTML document.
//!
//! Parsing follows the HTML5 algorithm (html5ever), so a stray `&` or `<` in
//! text, unclosed tags and raw `<script>` bodies behave as in a browser.
//! Removing a node only detaches it; the arena slot stays allocated until the
//! document is dropped.

use super::{DocumentTree, NodeId, Selector};
use ego_tree::{NodeRef, Tree};
use scraper::{ElementRef, Html, Node};

/// A parsed HTML document.
#[derive(Debug)]
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parse a full document. Malformed markup is recovered, never rejected.
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// Serialize the document back to markup.
    pub fn to_html(&self) -> String {
        self.html.html()
    }

    /// Number of markup errors the parser recovered from.
    pub fn recovered_errors(&self) -> usize {
        self.html.errors.len()
    }
}

/// Read-only queries used by tests across the crate.
#[cfg(test)]
impl HtmlDocument {
    fn element(&self, node: NodeId) -> Option<ElementRef<'_>> {
        self.html.tree.get(node.0).and_then(ElementRef::wrap)
    }

    /// Serialize the children of `node`.
    pub fn inner_html(&self, node: NodeId) -> String {
        self.element(node)
            .map(|element| element.inner_html())
            .unwrap_or_default()
    }

    /// Concatenated text of `node` and its descendants.
    pub fn text_content(&self, node: NodeId) -> String {
        self.element(node)
            .map(|element| element.text().collect())
            .unwrap_or_default()
    }

    /// Value of an attribute on an element.
    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?.value().attr(name)
    }

    /// Element children of `node`, skipping text and comments.
    pub fn element_children(&self, node: NodeId) -> Vec<NodeId> {
        self.element(node)
            .map(|element| {
                element
                    .children()
                    .filter_map(ElementRef::wrap)
                    .map(|child| NodeId(child.id()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// [`Selector::parse`] followed by [`DocumentTree::select`].
    pub fn select_str(&self, selector: &str) -> Result<Vec<NodeId>, super::DomError> {
        Ok(self.select(&Selector::parse(selector)?))
    }
}

/// Append a copy of `source` and its subtree under `parent`.
fn copy_subtree(tree: &mut Tree<Node>, parent: ego_tree::NodeId, source: NodeRef<'_, Node>) {
    let Some(mut parent) = tree.get_mut(parent) else {
        return;
    };
    let copied = parent.append(source.value().clone()).id();
    for child in source.children() {
        copy_subtree(tree, copied, child);
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

impl DocumentTree for HtmlDocument {
    fn select(&self, selector: &Selector) -> Vec<NodeId> {
        // Walk from the root element so detached nodes never match
        self.html
            .root_element()
            .select(&selector.0)
            .map(|element| NodeId(element.id()))
            .collect()
    }

    fn siblings_matching(&self, node: NodeId, selector: &Selector) -> Vec<NodeId> {
        let Some(parent) = self.html.tree.get(node.0).and_then(|n| n.parent()) else {
            return Vec::new();
        };
        parent
            .children()
            .filter(|sibling| sibling.id() != node.0)
            .filter_map(ElementRef::wrap)
            .filter(|sibling| selector.0.matches(sibling))
            .map(|sibling| NodeId(sibling.id()))
            .collect()
    }

    fn clear_children(&mut self, node: NodeId) {
        let Some(parent) = self.html.tree.get(node.0) else {
            return;
        };
        let children: Vec<_> = parent.children().map(|child| child.id()).collect();
        for child in children {
            if let Some(mut child) = self.html.tree.get_mut(child) {
                child.detach();
            }
        }
    }

    fn append_fragment(&mut self, parent: NodeId, html: &str) {
        let fragment = Html::parse_fragment(html);
        // Fragment nodes sit under a synthetic <html> element
        for child in fragment.root_element().children() {
            copy_subtree(&mut self.html.tree, parent.0, child);
        }
    }

    fn remove_node(&mut self, node: NodeId) {
        if let Some(mut node) = self.html.tree.get_mut(node.0) {
            node.detach();
        }
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        self.clear_children(node);
        self.append_fragment(node, &escape_text(text));
    }

    fn body(&self) -> Option<NodeId> {
        self.html
            .root_element()
            .children()
            .filter_map(ElementRef::wrap)
            .find(|element| element.value().name() == "body")
            .map(|element| NodeId(element.id()))
    }
}
