//! Mutable access to a matched element during `on_init`.

use ego_tree::NodeId;
use html5ever::tendril::StrTendril;
use html5ever::{Attribute, LocalName, Namespace, QualName};
use scraper::node::Element;
use scraper::{ElementRef, Html, Node};

use crate::host::{HtmlHost, clear_children, replace_children};

/// Handle to a matched element inside the fragment being rendered.
///
/// Changes made through this handle are part of the serialized output of the
/// render call, like edits to a live element before its container is
/// serialized.
///
/// # Example
///
/// ```
/// use weave_renderer::{Component, Html5Host, HtmlComponentRenderer};
///
/// let renderer = HtmlComponentRenderer::new(Html5Host).with_component(
///     "a[href]",
///     Component::new().on_init(|anchor| {
///         anchor.set_attr("rel", "noopener");
///         Ok(())
///     }),
/// );
///
/// let result = renderer.render(r#"<a href="test"></a>"#).unwrap();
/// assert_eq!(result.html(), r#"<a href="test" rel="noopener"></a>"#);
/// ```
pub struct ElementMut<'a> {
    host: &'a dyn HtmlHost,
    fragment: &'a mut Html,
    node: NodeId,
}

impl<'a> ElementMut<'a> {
    /// Wrap `node` if it is an element of `fragment`.
    pub(crate) fn new(host: &'a dyn HtmlHost, fragment: &'a mut Html, node: NodeId) -> Option<Self> {
        let is_element = fragment
            .tree
            .get(node)
            .is_some_and(|n| n.value().is_element());
        if !is_element {
            return None;
        }
        Some(Self {
            host,
            fragment,
            node,
        })
    }

    /// Read-only view of the element.
    #[must_use]
    pub fn element(&self) -> ElementRef<'_> {
        self.fragment
            .tree
            .get(self.node)
            .and_then(ElementRef::wrap)
            .expect("handle was created for an element node")
    }

    /// Node id of the element within the rendered fragment.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.node
    }

    /// Local tag name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.element().value().name()
    }

    /// Value of an attribute.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element().value().attr(name)
    }

    /// Serialized children of the element.
    #[must_use]
    pub fn inner_html(&self) -> String {
        self.element().inner_html()
    }

    /// Set an attribute, replacing any existing value.
    ///
    /// Names are lowercased, as HTML attribute names are case-insensitive.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        let name = attr_name(name);
        self.edit_attrs(|attrs| {
            let value = StrTendril::from_slice(value);
            match attrs.iter_mut().find(|attr| attr.name == name) {
                Some(attr) => attr.value = value,
                None => attrs.push(Attribute { name, value }),
            }
        });
    }

    /// Remove an attribute. Returns whether it was present.
    pub fn remove_attr(&mut self, name: &str) -> bool {
        let name = attr_name(name);
        let mut removed = false;
        self.edit_attrs(|attrs| {
            let before = attrs.len();
            attrs.retain(|attr| attr.name != name);
            removed = attrs.len() != before;
        });
        removed
    }

    /// Replace the element's children with parsed `markup`.
    pub fn set_inner_html(&mut self, markup: &str) {
        let content = self.host.parse_fragment(markup);
        replace_children(self.fragment, self.node, &content);
    }

    /// Replace the element's children with a single text node.
    pub fn set_text(&mut self, text: &str) {
        clear_children(self.fragment, self.node);
        if let Some(mut node) = self.fragment.tree.get_mut(self.node) {
            node.append(Node::Text(scraper::node::Text {
                text: StrTendril::from_slice(text),
            }));
        }
    }

    /// Rebuild the element with edited attributes.
    ///
    /// Rebuilding rather than editing in place keeps the element's cached id
    /// and class lists consistent with its attributes.
    fn edit_attrs(&mut self, edit: impl FnOnce(&mut Vec<Attribute>)) {
        let Some(mut node) = self.fragment.tree.get_mut(self.node) else {
            return;
        };
        let Node::Element(element) = node.value() else {
            return;
        };
        let mut attrs: Vec<Attribute> = element
            .attrs
            .iter()
            .map(|(name, value)| Attribute {
                name: name.clone(),
                value: value.clone(),
            })
            .collect();
        edit(&mut attrs);
        *element = Element::new(element.name.clone(), attrs);
    }
}

fn attr_name(name: &str) -> QualName {
    QualName::new(
        None,
        Namespace::from(""),
        LocalName::from(name.to_ascii_lowercase()),
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use scraper::CaseSensitivity;

    use super::*;
    use crate::host::Html5Host;

    fn first_match(fragment: &Html, selector: &str) -> NodeId {
        Html5Host.query_all(fragment, selector).unwrap()[0]
    }

    #[test]
    fn test_new_rejects_non_element() {
        let mut fragment = Html5Host.parse_fragment("text only");
        let text = fragment.root_element().first_child().unwrap().id();

        assert!(ElementMut::new(&Html5Host, &mut fragment, text).is_none());
    }

    #[test]
    fn test_set_attr_adds_and_replaces() {
        let mut fragment = Html5Host.parse_fragment(r#"<a href="old"></a>"#);
        let node = first_match(&fragment, "a");
        let mut element = ElementMut::new(&Html5Host, &mut fragment, node).unwrap();

        element.set_attr("HREF", "new");
        element.set_attr("data-id", "7");

        assert_eq!(element.attr("href"), Some("new"));
        assert_eq!(element.attr("data-id"), Some("7"));
        assert_eq!(
            Html5Host.serialize_inner(&fragment),
            r#"<a data-id="7" href="new"></a>"#
        );
    }

    #[test]
    fn test_set_attr_refreshes_classes() {
        let mut fragment = Html5Host.parse_fragment(r#"<p class="a"></p>"#);
        let node = first_match(&fragment, "p");
        let mut element = ElementMut::new(&Html5Host, &mut fragment, node).unwrap();
        assert!(element.element().value().has_class("a", CaseSensitivity::CaseSensitive));

        element.set_attr("class", "b");

        let value = element.element().value();
        assert!(value.has_class("b", CaseSensitivity::CaseSensitive));
        assert!(!value.has_class("a", CaseSensitivity::CaseSensitive));
        assert_eq!(Html5Host.query_all(&fragment, "p.b").unwrap(), vec![node]);
    }

    #[test]
    fn test_remove_attr() {
        let mut fragment = Html5Host.parse_fragment(r#"<a href="x" title="t"></a>"#);
        let node = first_match(&fragment, "a");
        let mut element = ElementMut::new(&Html5Host, &mut fragment, node).unwrap();

        assert!(element.remove_attr("title"));
        assert!(!element.remove_attr("title"));
        assert_eq!(element.name(), "a");
        assert_eq!(Html5Host.serialize_inner(&fragment), r#"<a href="x"></a>"#);
    }

    #[test]
    fn test_set_inner_html() {
        let mut fragment = Html5Host.parse_fragment("<div><p>old</p></div>");
        let node = first_match(&fragment, "div");
        let mut element = ElementMut::new(&Html5Host, &mut fragment, node).unwrap();

        element.set_inner_html("<em>new</em>");

        assert_eq!(element.inner_html(), "<em>new</em>");
        assert_eq!(Html5Host.serialize_inner(&fragment), "<div><em>new</em></div>");
    }

    #[test]
    fn test_set_text_escapes_markup() {
        let mut fragment = Html5Host.parse_fragment("<p><b>old</b> text</p>");
        let node = first_match(&fragment, "p");
        let mut element = ElementMut::new(&Html5Host, &mut fragment, node).unwrap();

        element.set_text("a < b");

        assert_eq!(Html5Host.serialize_inner(&fragment), "<p>a &lt; b</p>");
    }
}
