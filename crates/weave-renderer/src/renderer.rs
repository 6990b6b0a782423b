//! Selector-keyed component renderer.

use std::rc::Rc;

use indexmap::IndexMap;

use crate::component::Component;
use crate::element::ElementMut;
use crate::error::RenderError;
use crate::host::{Html5Host, HtmlHost, replace_children};
use crate::result::{RenderedHtml, Teardown};

/// Renders HTML fragments against a registry of selector-keyed components.
///
/// Components are applied in registration order. Within a selector, matched
/// elements are processed in document order: the template (if any) replaces
/// the element's children, then `on_init` runs with an [`ElementMut`] handle,
/// then `on_destroy` is queued on the returned [`RenderedHtml`]. Edits made
/// in `on_init` are visible to later selectors and in the serialized markup.
///
/// Each render parses into its own offscreen fragment, so results never
/// share state with each other or with the caller's markup.
///
/// # Example
///
/// ```
/// use weave_renderer::{Component, Html5Host, HtmlComponentRenderer};
///
/// let mut renderer = HtmlComponentRenderer::new(Html5Host);
/// renderer.register_component(
///     "custom-tag",
///     Component::new().with_template("<div>custom-tag</div>"),
/// );
///
/// let result = renderer.render("<custom-tag></custom-tag>").unwrap();
/// assert_eq!(result.html(), "<custom-tag><div>custom-tag</div></custom-tag>");
/// result.dispose().unwrap();
/// ```
#[derive(Debug)]
pub struct HtmlComponentRenderer<H: HtmlHost = Html5Host> {
    host: H,
    components: IndexMap<String, Component>,
}

impl<H: HtmlHost + Default> Default for HtmlComponentRenderer<H> {
    fn default() -> Self {
        Self::new(H::default())
    }
}

impl<H: HtmlHost> HtmlComponentRenderer<H> {
    /// Create an empty renderer using the given host.
    #[must_use]
    pub fn new(host: H) -> Self {
        Self {
            host,
            components: IndexMap::new(),
        }
    }

    /// Register a component for `selector`.
    ///
    /// Registering the same selector again replaces the previous component
    /// but keeps its original position in the application order. Returns the
    /// replaced component, if any.
    ///
    /// The selector is not validated here; an invalid selector fails at
    /// render time.
    pub fn register_component(
        &mut self,
        selector: impl Into<String>,
        component: Component,
    ) -> Option<Component> {
        self.components.insert(selector.into(), component)
    }

    /// Builder form of [`register_component`](Self::register_component).
    #[must_use]
    pub fn with_component(mut self, selector: impl Into<String>, component: Component) -> Self {
        self.register_component(selector, component);
        self
    }

    /// Registered components in application order.
    pub fn components(&self) -> impl Iterator<Item = (&str, &Component)> {
        self.components
            .iter()
            .map(|(selector, component)| (selector.as_str(), component))
    }

    /// Component registered for `selector`.
    #[must_use]
    pub fn component(&self, selector: &str) -> Option<&Component> {
        self.components.get(selector)
    }

    /// Number of registered selectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether no selectors are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Host used for parsing, querying and serialization.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Render `base_html`, applying every registered component.
    ///
    /// Selectors matching nothing are skipped. An invalid selector or a
    /// failing `on_init` aborts the render; destroy callbacks queued up to
    /// that point are dropped without being invoked.
    pub fn render(&self, base_html: &str) -> Result<RenderedHtml, RenderError> {
        let mut fragment = self.host.parse_fragment(base_html);
        let mut teardowns = Vec::new();
        let mut matched = 0;

        for (selector, component) in &self.components {
            let nodes = self.host.query_all(&fragment, selector).map_err(|source| {
                RenderError::InvalidSelector {
                    selector: selector.clone(),
                    source,
                }
            })?;
            tracing::trace!(selector = %selector, matched = nodes.len(), "Queried selector");
            if nodes.is_empty() {
                continue;
            }
            matched += nodes.len();

            let template = component
                .template()
                .map(|template| self.host.parse_fragment(template));
            let name: Rc<str> = Rc::from(selector.as_str());

            for node in nodes {
                if let Some(content) = &template {
                    replace_children(&mut fragment, node, content);
                }

                if let Some(on_init) = component.init_callback() {
                    let element = ElementMut::new(&self.host, &mut fragment, node);
                    debug_assert!(element.is_some(), "matched node is not an element");
                    let Some(mut element) = element else {
                        tracing::warn!(selector = %selector, "Matched node is not an element, skipping");
                        continue;
                    };
                    if let Err(source) = on_init(&mut element) {
                        tracing::warn!(selector = %selector, error = %source, "Init callback failed");
                        return Err(RenderError::Init {
                            selector: selector.clone(),
                            source,
                        });
                    }
                }

                if let Some(on_destroy) = component.destroy_callback() {
                    teardowns.push(Teardown {
                        selector: Rc::clone(&name),
                        node,
                        on_destroy: Rc::clone(on_destroy),
                    });
                }
            }
        }

        let html = self.host.serialize_inner(&fragment);
        tracing::debug!(
            components = self.components.len(),
            matched,
            teardowns = teardowns.len(),
            "Rendered fragment"
        );
        Ok(RenderedHtml::new(html, fragment, teardowns))
    }
}
