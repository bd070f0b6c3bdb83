//! Site configuration file (`docs.json` / `docs.yaml`).

use crate::error::ConfigError;
use serde_json::Value as JsonValue;

/// File names recognised as the site configuration, matched exactly.
pub const CONFIG_FILE_NAMES: &[&str] = &["docs.json", "docs.yaml"];

/// Name of the directory holding the documents, matched exactly.
pub const DOCS_DIR_NAME: &str = "docs";

/// Serialization format of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `docs.json`
    Json,
    /// `docs.yaml`
    Yaml,
}

impl ConfigFormat {
    /// Returns the format for a recognised configuration file name.
    pub fn from_file_name(name: &str) -> Option<Self> {
        match name {
            "docs.json" => Some(Self::Json),
            "docs.yaml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// A configuration file found at the root of the granted directory.
///
/// The raw text is always kept. The parsed value is best effort: a file that
/// fails to parse still counts as present, with an empty parsed object.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    file_name: String,
    format: ConfigFormat,
    raw: String,
    value: JsonValue,
}

impl Configuration {
    /// Builds a configuration from a file's name and text.
    ///
    /// Returns `None` when `file_name` is not a recognised configuration name.
    pub fn from_file(file_name: &str, raw: String) -> Option<Self> {
        let format = ConfigFormat::from_file_name(file_name)?;
        let value = match parse_config(format, &raw) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("Ignoring unparseable {}: {}", file_name, err);
                empty_object()
            }
        };

        Some(Self {
            file_name: file_name.to_string(),
            format,
            raw,
            value,
        })
    }

    /// Name of the file this configuration came from.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Format of the file.
    pub fn format(&self) -> ConfigFormat {
        self.format
    }

    /// Unparsed file text.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Parsed configuration as JSON.
    pub fn value(&self) -> &JsonValue {
        &self.value
    }

    /// Site name.
    pub fn name(&self) -> Option<&str> {
        self.string_field("name")
    }

    /// Site description.
    pub fn description(&self) -> Option<&str> {
        self.string_field("description")
    }

    /// Logo URL or path.
    pub fn logo(&self) -> Option<&str> {
        self.string_field("logo")
    }

    /// Primary theme color.
    pub fn theme(&self) -> Option<&str> {
        self.string_field("theme")
    }

    /// Sidebar navigation, empty when absent or malformed.
    pub fn sidebar(&self) -> Vec<SidebarItem> {
        self.value
            .get("sidebar")
            .and_then(JsonValue::as_array)
            .map(|items| items.iter().filter_map(SidebarItem::from_value).collect())
            .unwrap_or_default()
    }

    fn string_field(&self, key: &str) -> Option<&str> {
        self.value.get(key).and_then(JsonValue::as_str)
    }
}

/// An entry of the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarItem {
    /// A link to a document path.
    Link {
        /// Visible title.
        title: String,
        /// Target path, e.g. `/getting-started`.
        href: String,
    },
    /// A titled group of nested items.
    Group {
        /// Visible title.
        title: String,
        /// Nested items.
        items: Vec<SidebarItem>,
    },
}

impl SidebarItem {
    /// Accepts `["Title", "/href"]`, `["Title", [...]]` and
    /// `{ "title": ..., "href": ... }` shapes.
    fn from_value(value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::Array(pair) if pair.len() == 2 => {
                let title = pair[0].as_str()?.to_string();
                match &pair[1] {
                    JsonValue::String(href) => Some(Self::Link {
                        title,
                        href: href.clone(),
                    }),
                    JsonValue::Array(items) => Some(Self::Group {
                        title,
                        items: items.iter().filter_map(Self::from_value).collect(),
                    }),
                    _ => None,
                }
            }
            JsonValue::Object(map) => {
                let title = map.get("title")?.as_str()?.to_string();
                let href = map.get("href")?.as_str()?.to_string();
                Some(Self::Link { title, href })
            }
            _ => None,
        }
    }
}

fn parse_config(format: ConfigFormat, raw: &str) -> Result<JsonValue, ConfigError> {
    if raw.trim().is_empty() {
        return Ok(empty_object());
    }

    let value = match format {
        ConfigFormat::Json => serde_json::from_str::<JsonValue>(raw)?,
        ConfigFormat::Yaml => {
            let yaml: serde_yaml::Value = serde_yaml::from_str(raw)?;
            serde_json::to_value(yaml)?
        }
    };

    match value {
        JsonValue::Null => Ok(empty_object()),
        JsonValue::Object(_) => Ok(value),
        _ => Err(ConfigError::InvalidRootType),
    }
}

fn empty_object() -> JsonValue {
    JsonValue::Object(Default::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_exact_names_only() {
        assert_eq!(ConfigFormat::from_file_name("docs.json"), Some(ConfigFormat::Json));
        assert_eq!(ConfigFormat::from_file_name("docs.yaml"), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_file_name("docs.yml"), None);
        assert_eq!(ConfigFormat::from_file_name("Docs.json"), None);
        assert!(Configuration::from_file("docs.toml", String::new()).is_none());
    }

    #[test]
    fn parses_json_fields() {
        let raw = r##"{ "name": "Acme", "theme": "#00bcd4" }"##.to_string();
        let config = Configuration::from_file("docs.json", raw).unwrap();
        assert_eq!(config.name(), Some("Acme"));
        assert_eq!(config.theme(), Some("#00bcd4"));
        assert_eq!(config.description(), None);
    }

    #[test]
    fn parses_yaml_sidebar() {
        let raw = "name: Acme\nsidebar:\n  - [Overview, /]\n  - - Guides\n    - - [Install, /guides/install]\n".to_string();
        let config = Configuration::from_file("docs.yaml", raw).unwrap();
        assert_eq!(
            config.sidebar(),
            vec![
                SidebarItem::Link {
                    title: "Overview".into(),
                    href: "/".into()
                },
                SidebarItem::Group {
                    title: "Guides".into(),
                    items: vec![SidebarItem::Link {
                        title: "Install".into(),
                        href: "/guides/install".into()
                    }],
                },
            ]
        );
    }

    #[test]
    fn invalid_content_is_still_tracked() {
        let config = Configuration::from_file("docs.json", "{ nope".to_string()).unwrap();
        assert_eq!(config.raw(), "{ nope");
        assert_eq!(config.value(), &empty_object());
    }

    #[test]
    fn non_mapping_root_is_rejected() {
        let err = parse_config(ConfigFormat::Json, "[1, 2]").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRootType));
    }

    #[test]
    fn empty_file_is_an_empty_object() {
        let config = Configuration::from_file("docs.yaml", "\n".to_string()).unwrap();
        assert_eq!(config.value(), &empty_object());
        assert!(config.sidebar().is_empty());
    }
}
