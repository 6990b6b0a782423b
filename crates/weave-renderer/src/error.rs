//! Error types for rendering and disposal.

/// Boxed error returned by component callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A selector the host's query engine rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SelectorError {
    /// Parser message describing why the selector was rejected.
    pub message: String,
}

impl SelectorError {
    /// Create a selector error from a parser message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error raised while rendering or disposing a fragment.
///
/// All variants abort the current pass. Teardowns queued before a render
/// failure are dropped without being invoked, since no [`RenderedHtml`]
/// is handed back to dispose them.
///
/// [`RenderedHtml`]: crate::RenderedHtml
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The selector could not be parsed by the host query engine.
    #[error("Invalid selector `{selector}`: {source}")]
    InvalidSelector {
        /// Selector as registered.
        selector: String,
        /// Underlying parse failure.
        #[source]
        source: SelectorError,
    },
    /// An `on_init` callback returned an error.
    #[error("Init callback for `{selector}` failed: {source}")]
    Init {
        /// Selector whose component failed.
        selector: String,
        /// Error returned by the callback.
        #[source]
        source: BoxError,
    },
    /// An `on_destroy` callback returned an error during disposal.
    #[error("Destroy callback for `{selector}` failed: {source}")]
    Destroy {
        /// Selector whose component failed.
        selector: String,
        /// Error returned by the callback.
        #[source]
        source: BoxError,
    },
}

impl RenderError {
    /// Selector of the component that caused the failure.
    #[must_use]
    pub fn selector(&self) -> &str {
        match self {
            Self::InvalidSelector { selector, .. }
            | Self::Init { selector, .. }
            | Self::Destroy { selector, .. } => selector,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_selector_message_includes_selector() {
        let err = RenderError::InvalidSelector {
            selector: "a[".to_owned(),
            source: SelectorError::new("unexpected end of input"),
        };

        assert_eq!(
            err.to_string(),
            "Invalid selector `a[`: unexpected end of input"
        );
        assert_eq!(err.selector(), "a[");
    }

    #[test]
    fn test_callback_error_keeps_source() {
        let err = RenderError::Init {
            selector: "x-widget".to_owned(),
            source: "boom".into(),
        };

        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("boom"));
        assert_eq!(err.selector(), "x-widget");
    }
}
