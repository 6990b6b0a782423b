//! Component descriptors bound to selectors.

use std::fmt;
use std::rc::Rc;

use scraper::ElementRef;

use crate::element::ElementMut;
use crate::error::BoxError;

/// Callback invoked during render with a mutable handle to a matched element.
pub type InitCallback = dyn Fn(&mut ElementMut<'_>) -> Result<(), BoxError>;

/// Callback invoked on dispose with a matched element.
pub type DestroyCallback = dyn Fn(ElementRef<'_>) -> Result<(), BoxError>;

/// Behavior registered for a selector.
///
/// All three members are independent and optional. A present template
/// replaces the matched element's children (an empty template clears them),
/// `on_init` runs during render and may edit the element before the fragment
/// is serialized, and `on_destroy` runs when the render result is disposed.
///
/// # Example
///
/// ```
/// use weave_renderer::Component;
///
/// let component = Component::new()
///     .with_template("<div>custom-tag</div>")
///     .on_init(|element| {
///         element.set_attr("data-ready", "");
///         Ok(())
///     });
/// assert!(component.template().is_some());
/// ```
#[derive(Clone, Default)]
pub struct Component {
    template: Option<String>,
    on_init: Option<Rc<InitCallback>>,
    on_destroy: Option<Rc<DestroyCallback>>,
}

impl Component {
    /// Create a component with no template and no callbacks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the markup that replaces each matched element's children.
    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Set the callback invoked for each matched element during render.
    ///
    /// Edits made through the [`ElementMut`] handle appear in the rendered
    /// markup.
    #[must_use]
    pub fn on_init<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut ElementMut<'_>) -> Result<(), BoxError> + 'static,
    {
        self.on_init = Some(Rc::new(callback));
        self
    }

    /// Set the callback invoked for each matched element on dispose.
    #[must_use]
    pub fn on_destroy<F>(mut self, callback: F) -> Self
    where
        F: Fn(ElementRef<'_>) -> Result<(), BoxError> + 'static,
    {
        self.on_destroy = Some(Rc::new(callback));
        self
    }

    /// Replacement markup, if any.
    #[must_use]
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    /// Whether an init callback is set.
    #[must_use]
    pub fn has_init(&self) -> bool {
        self.on_init.is_some()
    }

    /// Whether a destroy callback is set.
    #[must_use]
    pub fn has_destroy(&self) -> bool {
        self.on_destroy.is_some()
    }

    /// True when the component neither replaces content nor has callbacks.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.template.is_none() && self.on_init.is_none() && self.on_destroy.is_none()
    }

    pub(crate) fn init_callback(&self) -> Option<&InitCallback> {
        self.on_init.as_deref()
    }

    pub(crate) fn destroy_callback(&self) -> Option<&Rc<DestroyCallback>> {
        self.on_destroy.as_ref()
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("template", &self.template)
            .field("on_init", &self.has_init())
            .field("on_destroy", &self.has_destroy())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_inert() {
        let component = Component::new();

        assert!(component.is_inert());
        assert!(component.template().is_none());
    }

    #[test]
    fn test_empty_template_is_present() {
        let component = Component::new().with_template("");

        assert_eq!(component.template(), Some(""));
        assert!(!component.is_inert());
    }

    #[test]
    fn test_callbacks_are_independent() {
        let component = Component::new().on_destroy(|_| Ok(()));

        assert!(!component.has_init());
        assert!(component.has_destroy());
        assert!(!component.is_inert());
    }

    #[test]
    fn test_clone_shares_callbacks() {
        let component = Component::new().on_init(|_| Ok(()));
        let copy = component.clone();

        let original = component.init_callback().unwrap() as *const InitCallback;
        let cloned = copy.init_callback().unwrap() as *const InitCallback;
        assert!(std::ptr::addr_eq(original, cloned));
    }

    #[test]
    fn test_debug_hides_closures() {
        let component = Component::new().with_template("<b>x</b>").on_init(|_| Ok(()));

        let debug = format!("{component:?}");

        assert!(debug.contains("<b>x</b>"));
        assert!(debug.contains("on_init: true"));
        assert!(debug.contains("on_destroy: false"));
    }
}
