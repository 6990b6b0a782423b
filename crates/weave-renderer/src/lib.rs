//! Selector-keyed component rendering for HTML fragments.
//!
//! This crate provides an [`HtmlComponentRenderer`] that parses a raw HTML
//! string into a detached fragment, applies registered [`Component`]s to
//! every element matching their CSS selector, and returns the serialized
//! markup as a [`RenderedHtml`] that can later be disposed.
//!
//! # Architecture
//!
//! Parsing, selector matching and serialization are delegated to an
//! [`HtmlHost`], passed to the renderer at construction:
//! - [`Html5Host`]: html5ever parsing and `selectors` matching via `scraper`
//!
//! A component may carry a template (replacement markup for the matched
//! element's children), an `on_init` callback run during render with an
//! [`ElementMut`] handle whose edits appear in the output, and an
//! `on_destroy` callback queued until [`RenderedHtml::dispose`].
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use weave_renderer::{Component, Html5Host, HtmlComponentRenderer};
//!
//! let destroyed = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&destroyed);
//!
//! let renderer = HtmlComponentRenderer::new(Html5Host).with_component(
//!     "a[href]",
//!     Component::new().on_destroy(move |anchor| {
//!         let href = anchor.value().attr("href").unwrap_or_default();
//!         sink.borrow_mut().push(href.to_owned());
//!         Ok(())
//!     }),
//! );
//!
//! let result = renderer.render(r#"<a href="test"></a>"#).unwrap();
//! assert_eq!(result.html(), r#"<a href="test"></a>"#);
//! assert!(destroyed.borrow().is_empty());
//!
//! result.dispose().unwrap();
//! assert_eq!(*destroyed.borrow(), vec!["test".to_owned()]);
//! ```

mod component;
mod element;
mod error;
mod host;
mod renderer;
mod result;

pub use component::{Component, DestroyCallback, InitCallback};
pub use element::ElementMut;
pub use error::{BoxError, RenderError, SelectorError};
pub use host::{Html5Host, HtmlHost};
pub use renderer::HtmlComponentRenderer;
pub use result::RenderedHtml;
