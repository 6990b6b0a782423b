//! Host capabilities consumed by the renderer.
//!
//! Parsing, selector matching and serialization are not implemented here.
//! They are delegated to an [`HtmlHost`], which the renderer receives
//! explicitly at construction time.

use ego_tree::{NodeId, NodeRef, Tree};
use html5ever::{LocalName, Namespace, QualName};
use scraper::node::Element;
use scraper::{Html, Node, Selector};

use crate::error::SelectorError;

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// HTML engine used to parse, query and serialize offscreen fragments.
///
/// Every call to [`parse_fragment`](Self::parse_fragment) must return a new,
/// detached tree. The renderer mutates that tree and never shares it between
/// render calls.
pub trait HtmlHost {
    /// Parse markup into a detached fragment container.
    fn parse_fragment(&self, html: &str) -> Html;

    /// Find all descendants of the fragment container matching `selector`,
    /// in document order.
    ///
    /// The container root itself is never part of the result.
    fn query_all(&self, fragment: &Html, selector: &str) -> Result<Vec<NodeId>, SelectorError>;

    /// Serialize the inner markup of the fragment container.
    fn serialize_inner(&self, fragment: &Html) -> String;
}

/// Standard host backed by the html5ever parser and the `selectors` engine.
///
/// Markup is parsed in body context and placed under a detached `div`
/// container, so `div > p` matches a top-level `<p>` and the container itself
/// is never matched.
#[derive(Clone, Copy, Debug, Default)]
pub struct Html5Host;

impl HtmlHost for Html5Host {
    fn parse_fragment(&self, html: &str) -> Html {
        let mut fragment = Html::parse_fragment(html);
        let root = fragment.root_element().id();
        if let Some(mut container) = fragment.tree.get_mut(root) {
            let name = QualName::new(
                None,
                Namespace::from(HTML_NAMESPACE),
                LocalName::from("div"),
            );
            *container.value() = Node::Element(Element::new(name, Vec::new()));
        }
        fragment
    }

    fn query_all(&self, fragment: &Html, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        let selector = Selector::parse(selector).map_err(|e| SelectorError::new(e.to_string()))?;
        Ok(fragment
            .root_element()
            .select(&selector)
            .map(|element| element.id())
            .collect())
    }

    fn serialize_inner(&self, fragment: &Html) -> String {
        fragment.root_element().inner_html()
    }
}

/// Replace the children of `target` with a copy of the children of `content`'s
/// container root.
///
/// Detached children stay allocated in the tree, so node ids captured earlier
/// keep resolving.
pub(crate) fn replace_children(fragment: &mut Html, target: NodeId, content: &Html) {
    clear_children(fragment, target);
    let source = content.root_element();
    graft_children(&mut fragment.tree, target, *source);
}

/// Detach every child of `target`.
pub(crate) fn clear_children(fragment: &mut Html, target: NodeId) {
    let existing: Vec<NodeId> = match fragment.tree.get(target) {
        Some(node) => node.children().map(|child| child.id()).collect(),
        None => return,
    };
    for id in existing {
        if let Some(mut child) = fragment.tree.get_mut(id) {
            child.detach();
        }
    }
}

/// Copy the descendants of `source` under `parent`, using a work-list so
/// nesting depth is bounded by heap rather than stack.
fn graft_children(tree: &mut Tree<Node>, parent: NodeId, source: NodeRef<'_, Node>) {
    let mut pending = vec![(parent, source)];
    while let Some((parent, source)) = pending.pop() {
        for child in source.children() {
            let Some(mut parent_node) = tree.get_mut(parent) else {
                break;
            };
            let id = parent_node.append(child.value().clone()).id();
            if child.has_children() {
                pending.push((id, child));
            }
        }
    }
}
