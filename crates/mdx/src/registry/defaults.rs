//! Default registry for the documentation site.
//!
//! Overrides the plain HTML elements the MDX pipeline emits (`a`, headings,
//! `img`, `pre`) and registers the custom components authors may use
//! directly in their documents.

use super::types::{Component, ComponentMapping, ComponentRegistry};
use once_cell::sync::Lazy;

/// Shared instance of [`default_registry`].
pub static DEFAULT_REGISTRY: Lazy<ComponentRegistry> = Lazy::new(default_registry);

/// Creates the default registry.
///
/// # Example
///
/// ```
/// use docsview_mdx::registry::defaults::default_registry;
/// use docsview_mdx::Component;
///
/// let registry = default_registry();
/// assert_eq!(registry.get_component("h3"), Some(Component::Heading));
/// assert_eq!(registry.get_component("YouTube"), Some(Component::YouTube));
/// ```
pub fn default_registry() -> ComponentRegistry {
    let mut components = vec![mapping("a", Component::Link)];
    components.extend(HEADING_TAGS.iter().map(|tag| mapping(tag, Component::Heading)));
    components.extend([
        mapping("img", Component::Image),
        mapping("pre", Component::CodeBlock),
        mapping("Header", Component::Header),
        mapping("Tabs", Component::Tabs),
        mapping("TabItem", Component::TabItem),
        mapping("Image", Component::Image),
        mapping("YouTube", Component::YouTube),
    ]);
    ComponentRegistry { components }
}

/// Heading element names, `h1` through `h6`.
pub const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

fn mapping(tag: &str, component: Component) -> ComponentMapping {
    ComponentMapping {
        tag: tag.to_string(),
        component,
    }
}
