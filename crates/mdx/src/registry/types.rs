//! Registry type definitions for tag to component mappings.

use serde::{Deserialize, Serialize};

/// Configuration for the component registry, usually loaded from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRegistry {
    /// Tag mappings, applied in order.
    pub components: Vec<ComponentMapping>,
}

/// Maps one markup tag to the component that renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMapping {
    /// Tag name as it appears in the rendered markup (e.g. `a`, `Tabs`).
    pub tag: String,
    /// Component that renders the tag.
    pub component: Component,
}

/// Documentation components known to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Component {
    /// Links; internal paths become fragment links.
    Link,
    /// Headings `h1`..`h6` with anchor links.
    Heading,
    /// Lazily loaded images with captions.
    Image,
    /// Code blocks, optionally live or titled.
    CodeBlock,
    /// Page header.
    Header,
    /// Tab container.
    Tabs,
    /// A single tab.
    TabItem,
    /// Embedded YouTube video.
    YouTube,
}

impl Component {
    /// Component name as written in MDX.
    pub fn name(self) -> &'static str {
        match self {
            Component::Link => "Link",
            Component::Heading => "Heading",
            Component::Image => "Image",
            Component::CodeBlock => "CodeBlock",
            Component::Header => "Header",
            Component::Tabs => "Tabs",
            Component::TabItem => "TabItem",
            Component::YouTube => "YouTube",
        }
    }
}

impl ComponentRegistry {
    /// Adds or replaces the mapping for `tag`.
    pub fn register(&mut self, tag: impl Into<String>, component: Component) {
        let tag = tag.into();
        match self.components.iter_mut().find(|m| m.tag == tag) {
            Some(existing) => existing.component = component,
            None => self.components.push(ComponentMapping { tag, component }),
        }
    }

    /// Removes the mapping for `tag`, returning its component.
    pub fn unregister(&mut self, tag: &str) -> Option<Component> {
        let index = self.components.iter().position(|m| m.tag == tag)?;
        Some(self.components.remove(index).component)
    }

    /// Get the component registered for a tag.
    pub fn get_component(&self, tag: &str) -> Option<Component> {
        self.components
            .iter()
            .find(|m| m.tag == tag)
            .map(|m| m.component)
    }

    /// Check if a tag is mapped.
    pub fn is_mapped(&self, tag: &str) -> bool {
        self.get_component(tag).is_some()
    }

    /// Tags rendered by `component`.
    pub fn tags_for(&self, component: Component) -> Vec<&str> {
        self.components
            .iter()
            .filter(|m| m.component == component)
            .map(|m| m.tag.as_str())
            .collect()
    }
}
