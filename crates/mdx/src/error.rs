use thiserror::Error;

/// Errors emitted while rewriting rendered markup.
#[derive(Debug, Error)]
pub enum MarkupError {
    /// A registry tag is not a valid selector.
    #[error("Invalid component tag '{tag}': {message}")]
    InvalidSelector {
        /// Offending tag.
        tag: String,
        /// Selector parser message.
        message: String,
    },
    /// lol_html failed while streaming the document.
    #[error("Rewrite error: {0}")]
    Rewrite(#[from] lol_html::errors::RewritingError),
}

impl MarkupError {
    /// Create an invalid-selector error.
    pub fn invalid_selector(tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSelector {
            tag: tag.into(),
            message: message.into(),
        }
    }
}
