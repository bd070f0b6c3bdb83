//! lol_html handlers rendering each documentation component.

use crate::error::MarkupError;
use crate::registry::{Component, ComponentRegistry};
use html_escape::{decode_html_entities, encode_double_quoted_attribute, encode_text};
use lol_html::html_content::{ContentType, Element};
use lol_html::{ElementContentHandlers, Selector, element};
use std::borrow::Cow;

/// A selector paired with its handlers, as lol_html consumes them.
pub type Handler = (Cow<'static, Selector>, ElementContentHandlers<'static>);

/// Builder for aggregating element handlers before passing to lol_html.
pub struct ComponentHandlers {
    handlers: Vec<Handler>,
}

impl ComponentHandlers {
    /// Creates an empty handler list.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Builds one handler per registry mapping, in registry order.
    pub fn from_registry(registry: &ComponentRegistry) -> Result<Self, MarkupError> {
        let mut handlers = Self::new();
        for mapping in &registry.components {
            handlers.push(component_handler(&mapping.tag, mapping.component)?);
        }
        Ok(handlers)
    }

    /// Pushes a single handler tuple.
    pub fn push(&mut self, handler: Handler) {
        self.handlers.push(handler);
    }

    /// Number of handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns true when no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Converts into the handler vector.
    pub fn into_vec(self) -> Vec<Handler> {
        self.handlers
    }
}

impl Default for ComponentHandlers {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the handler rendering `tag` through `component`.
///
/// Tags containing uppercase letters name MDX components and only match
/// elements written with the same case, so `Header` leaves `<header>` alone.
pub fn component_handler(tag: &str, component: Component) -> Result<Handler, MarkupError> {
    // Validate up front; element! would panic on a bad selector.
    tag.parse::<Selector>()
        .map_err(|err| MarkupError::invalid_selector(tag, err.to_string()))?;

    let exact_case = tag.bytes().any(|b| b.is_ascii_uppercase()).then(|| tag.to_string());
    Ok(element!(tag, move |el| {
        if let Some(source) = &exact_case
            && el.tag_name_preserve_case() != *source
        {
            return Ok(());
        }
        render_component(component, el)
    }))
}

type RenderResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

fn render_component(component: Component, el: &mut Element<'_, '_>) -> RenderResult {
    match component {
        Component::Link => render_link(el),
        Component::Heading => render_heading(el),
        Component::Image => render_image(el),
        Component::CodeBlock => render_code_block(el),
        Component::Header => render_header(el),
        Component::Tabs => render_tabs(el),
        Component::TabItem => render_tab_item(el),
        Component::YouTube => render_youtube(el),
    }
}

fn render_link(el: &mut Element<'_, '_>) -> RenderResult {
    let Some(href) = el.get_attribute("href") else {
        return Ok(());
    };

    if href.starts_with("http://") || href.starts_with("https://") {
        el.set_attribute("target", "_blank")?;
        el.set_attribute("rel", "noopener noreferrer")?;
    } else if href.starts_with('/') && !href.starts_with("//") {
        // Internal pages are reached through the fragment in the preview.
        el.set_attribute("href", &format!("#{href}"))?;
    }
    Ok(())
}

fn render_heading(el: &mut Element<'_, '_>) -> RenderResult {
    let tag = el.tag_name();
    merge_class(el, &format!("heading heading--{tag}"))?;

    if let Some(id) = attribute_text(el, "id")
        && !id.is_empty()
    {
        let anchor = format!(
            r##"<a class="heading__anchor" href="#{}" aria-hidden="true">#</a>"##,
            encode_double_quoted_attribute(&id)
        );
        el.append(&anchor, ContentType::Html);
    }
    Ok(())
}

fn render_image(el: &mut Element<'_, '_>) -> RenderResult {
    if el.tag_name() != "img" {
        // Custom `<Image>` usage: emit a real `<img>` with the same attributes.
        let mut img = StartTag::from_element(el, "img", &[]);
        if img.get("loading").is_none() {
            img.set("loading", "lazy");
        }
        img.set("decoding", "async");
        let alt = attribute_text(el, "alt").unwrap_or_default();
        replace_component(el, &wrap_figure(&img.open(), &alt));
        return Ok(());
    }

    if !el.has_attribute("loading") {
        el.set_attribute("loading", "lazy")?;
    }
    el.set_attribute("decoding", "async")?;

    let alt = attribute_text(el, "alt").unwrap_or_default();
    el.before(r#"<figure class="image">"#, ContentType::Html);
    el.after(&caption(&alt), ContentType::Html);
    Ok(())
}

fn wrap_figure(img: &str, alt: &str) -> String {
    format!(r#"<figure class="image">{img}{}"#, caption(alt))
}

fn caption(alt: &str) -> String {
    if alt.is_empty() {
        "</figure>".to_string()
    } else {
        format!("<figcaption>{}</figcaption></figure>", encode_text(alt))
    }
}

fn render_code_block(el: &mut Element<'_, '_>) -> RenderResult {
    if el.get_attribute("live").as_deref() == Some("true") {
        el.remove_attribute("live");
        el.set_tag_name("div")?;
        el.set_attribute("data-live", "true")?;
        merge_class(el, "live-code")?;
        return Ok(());
    }

    match attribute_text(el, "title") {
        Some(title) if !title.is_empty() => {
            el.remove_attribute("title");
            el.before(
                &format!(
                    r#"<div class="code-block-title__label">{}</div>"#,
                    encode_text(&title)
                ),
                ContentType::Html,
            );
            merge_class(el, "mb-4 code-block-title")?;
        }
        _ => merge_class(el, "mb-4")?,
    }
    Ok(())
}

fn render_header(el: &mut Element<'_, '_>) -> RenderResult {
    let mut header = StartTag::from_element(el, "header", &[]);
    header.merge_class("page-header");
    rewrap(el, &header, "");
    Ok(())
}

fn render_tabs(el: &mut Element<'_, '_>) -> RenderResult {
    let group = attribute_text(el, "groupid");
    let mut tabs = StartTag::from_element(el, "div", &["groupid"]);
    tabs.merge_class("tabs");
    tabs.set("role", "tablist");
    if let Some(group) = group {
        tabs.set("data-group", group);
    }
    rewrap(el, &tabs, "");
    Ok(())
}

fn render_tab_item(el: &mut Element<'_, '_>) -> RenderResult {
    let label = attribute_text(el, "label").unwrap_or_default();
    let value = attribute_text(el, "value");

    let mut tab = StartTag::from_element(el, "div", &["label", "value"]);
    tab.merge_class("tab");
    tab.set("role", "tabpanel");
    match value {
        Some(value) => tab.set("data-value", value),
        None if !label.is_empty() => tab.set("data-value", label.clone()),
        None => {}
    }

    let title = if label.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="tab__title">{}</div>"#, encode_text(&label))
    };
    rewrap(el, &tab, &title);
    Ok(())
}

fn render_youtube(el: &mut Element<'_, '_>) -> RenderResult {
    let id = attribute_text(el, "id").unwrap_or_default();
    let mut container = StartTag::from_element(el, "div", &["id"]);
    container.merge_class("youtube");

    let iframe = if id.is_empty() {
        log::warn!("YouTube component without an id; rendering an empty container");
        String::new()
    } else {
        format!(
            concat!(
                r#"<iframe src="https://www.youtube.com/embed/{}" title="YouTube video" "#,
                r#"frameborder="0" allowfullscreen loading="lazy"></iframe>"#
            ),
            encode_double_quoted_attribute(&id)
        )
    };
    replace_component(
        el,
        &format!("{}{iframe}{}", container.open(), container.close()),
    );
    Ok(())
}

/// Start tag of a rendered component, rebuilt from the source element.
/// Values are stored decoded and encoded once on output.
struct StartTag {
    name: &'static str,
    attrs: Vec<(String, String)>,
}

impl StartTag {
    fn from_element(el: &Element<'_, '_>, name: &'static str, skip: &[&str]) -> Self {
        let attrs = el
            .attributes()
            .iter()
            .filter(|attr| !skip.contains(&attr.name().as_str()))
            .map(|attr| {
                let value = decode_html_entities(&attr.value()).into_owned();
                (attr.name(), value)
            })
            .collect();
        Self { name, attrs }
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    fn merge_class(&mut self, classes: &str) {
        let merged = match self.get("class") {
            Some(existing) if !existing.trim().is_empty() => {
                format!("{} {}", classes, existing.trim())
            }
            _ => classes.to_string(),
        };
        self.set("class", merged);
    }

    fn open(&self) -> String {
        let mut html = format!("<{}", self.name);
        for (name, value) in &self.attrs {
            html.push_str(&format!(
                r#" {}="{}""#,
                name,
                encode_double_quoted_attribute(value)
            ));
        }
        html.push('>');
        html
    }

    fn close(&self) -> String {
        format!("</{}>", self.name)
    }
}

/// Swaps the element's tags for `tag`, keeping its children after `prefix`.
///
/// HTML ignores `/>` on non-void elements, so a self-closing component has
/// no end tag; its whole rendering goes before it and what follows stays
/// outside.
fn rewrap(el: &mut Element<'_, '_>, tag: &StartTag, prefix: &str) {
    if el.is_self_closing() {
        el.before(
            &format!("{}{prefix}{}", tag.open(), tag.close()),
            ContentType::Html,
        );
    } else {
        el.before(&format!("{}{prefix}", tag.open()), ContentType::Html);
        el.after(&tag.close(), ContentType::Html);
    }
    el.remove_and_keep_content();
}

/// Replaces the element and its children with `html`. For a self-closing
/// component only the start tag goes, since there is no end tag to stop at.
fn replace_component(el: &mut Element<'_, '_>, html: &str) {
    if el.is_self_closing() {
        el.before(html, ContentType::Html);
        el.remove_and_keep_content();
    } else {
        el.replace(html, ContentType::Html);
    }
}

/// Attribute value with character references decoded; lol_html hands out
/// the raw source text.
fn attribute_text(el: &Element<'_, '_>, name: &str) -> Option<String> {
    el.get_attribute(name)
        .map(|raw| decode_html_entities(&raw).into_owned())
}

/// Prepends `classes` to the element's existing class list.
fn merge_class(el: &mut Element<'_, '_>, classes: &str) -> RenderResult {
    let merged = match el.get_attribute("class") {
        Some(existing) if !existing.trim().is_empty() => {
            format!("{} {}", classes, existing.trim())
        }
        _ => classes.to_string(),
    };
    el.set_attribute("class", &merged)?;
    Ok(())
}
