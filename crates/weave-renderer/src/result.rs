//! Rendered output and deferred teardown.

use std::fmt;
use std::rc::Rc;

use ego_tree::NodeId;
use scraper::{ElementRef, Html};

use crate::component::DestroyCallback;
use crate::error::RenderError;

/// A destroy callback bound to one matched element.
pub(crate) struct Teardown {
    pub(crate) selector: Rc<str>,
    pub(crate) node: NodeId,
    pub(crate) on_destroy: Rc<DestroyCallback>,
}

/// Result of a single render call.
///
/// Owns the offscreen fragment the markup was serialized from, together with
/// the destroy callbacks queued for its elements. Disposing consumes the
/// result, so teardowns fire at most once.
pub struct RenderedHtml {
    html: String,
    fragment: Html,
    teardowns: Vec<Teardown>,
}

impl RenderedHtml {
    pub(crate) fn new(html: String, fragment: Html, teardowns: Vec<Teardown>) -> Self {
        Self {
            html,
            fragment,
            teardowns,
        }
    }

    /// Serialized markup of the rendered fragment.
    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Take the serialized markup, discarding pending teardowns without
    /// invoking them.
    #[must_use]
    pub fn into_html(self) -> String {
        self.html
    }

    /// Offscreen fragment the teardown elements belong to.
    #[must_use]
    pub fn fragment(&self) -> &Html {
        &self.fragment
    }

    /// Number of destroy callbacks queued for [`dispose`](Self::dispose).
    #[must_use]
    pub fn pending_teardowns(&self) -> usize {
        self.teardowns.len()
    }

    /// Invoke every queued destroy callback once, in the order queued.
    ///
    /// Order is selector registration order, then document order within a
    /// selector. The first failing callback stops disposal; later callbacks
    /// are not invoked.
    pub fn dispose(self) -> Result<(), RenderError> {
        tracing::debug!(teardowns = self.teardowns.len(), "Disposing rendered fragment");

        for teardown in &self.teardowns {
            let element = self.fragment.tree.get(teardown.node).and_then(ElementRef::wrap);
            debug_assert!(element.is_some(), "teardown node is not an element");
            let Some(element) = element else {
                tracing::warn!(selector = %teardown.selector, "Teardown node is not an element, skipping");
                continue;
            };
            if let Err(source) = (teardown.on_destroy)(element) {
                tracing::warn!(selector = %teardown.selector, error = %source, "Destroy callback failed");
                return Err(RenderError::Destroy {
                    selector: teardown.selector.as_ref().to_owned(),
                    source,
                });
            }
        }
        Ok(())
    }
}

impl fmt::Debug for RenderedHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderedHtml")
            .field("html", &self.html)
            .field("pending_teardowns", &self.teardowns.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Component, Html5Host, HtmlComponentRenderer, HtmlHost};

    #[test]
    fn test_fragment_matches_serialized_html() {
        let renderer = HtmlComponentRenderer::new(Html5Host)
            .with_component("p", Component::new().with_template("<b>x</b>"));

        let result = renderer.render("<p>old</p>").unwrap();

        assert_eq!(Html5Host.serialize_inner(result.fragment()), result.html());
    }

    #[test]
    fn test_debug_reports_pending_teardowns() {
        let renderer = HtmlComponentRenderer::new(Html5Host)
            .with_component("p", Component::new().on_destroy(|_| Ok(())));

        let result = renderer.render("<p>a</p><p>b</p>").unwrap();

        let debug = format!("{result:?}");
        assert!(debug.contains("pending_teardowns: 2"));
    }

    #[test]
    fn test_dispose_without_teardowns() {
        let result = HtmlComponentRenderer::new(Html5Host)
            .render("<div>Test</div>")
            .unwrap();

        assert!(result.dispose().is_ok());
    }
}
