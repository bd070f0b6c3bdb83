//! Renders pre-rendered markup through the component registry.

use super::components::ComponentHandlers;
use crate::error::MarkupError;
use crate::registry::{ComponentRegistry, DEFAULT_REGISTRY};
use lol_html::{RewriteStrSettings, rewrite_str};

/// Rewrites `html` so every mapped tag is rendered by its component.
///
/// Tags without a mapping pass through untouched. An empty registry returns
/// the input unchanged without invoking the rewriter.
///
/// # Examples
///
/// ```
/// use docsview_mdx::{default_registry, render_markup};
///
/// let html = render_markup(r#"<a href="/guide">Guide</a>"#, &default_registry()).unwrap();
/// assert_eq!(html, r##"<a href="#/guide">Guide</a>"##);
/// ```
pub fn render_markup(html: &str, registry: &ComponentRegistry) -> Result<String, MarkupError> {
    let handlers = ComponentHandlers::from_registry(registry)?;
    if handlers.is_empty() {
        return Ok(html.to_string());
    }

    let output = rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: handlers.into_vec(),
            ..RewriteStrSettings::new()
        },
    )?;
    Ok(output)
}

/// [`render_markup`] with the default registry.
pub fn render_default(html: &str) -> Result<String, MarkupError> {
    render_markup(html, &DEFAULT_REGISTRY)
}
