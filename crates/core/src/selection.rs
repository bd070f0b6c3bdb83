//! Selection gate: acquiring a directory grant and scanning its root.

use crate::config::{Configuration, DOCS_DIR_NAME};
use crate::handle::{DirectoryHandle, DirectoryPicker, Entry, SharedDirectory};
use crate::PreviewError;

/// What a single pass over the root's direct children found.
#[derive(Clone, Default)]
pub struct ScanResult {
    /// The configuration file, if one was present and readable.
    pub configuration: Option<Configuration>,
    /// The `docs` child directory, if present.
    pub docs: Option<SharedDirectory>,
}

impl std::fmt::Debug for ScanResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanResult")
            .field("configuration", &self.configuration)
            .field("docs", &self.docs.as_ref().map(|d| d.name().to_string()))
            .finish()
    }
}

/// Shows the picker and returns the granted directory.
///
/// Cancellation and denial both come back as `None`; a picker error is
/// logged and treated the same way.
pub fn request_directory(picker: &dyn DirectoryPicker) -> Option<SharedDirectory> {
    match picker.pick() {
        Ok(Some(handle)) => {
            log::debug!("Directory '{}' granted", handle.name());
            Some(handle)
        }
        Ok(None) => {
            log::debug!("Directory prompt cancelled");
            None
        }
        Err(err) => {
            log::warn!("Directory prompt failed: {}", err);
            None
        }
    }
}

/// Scans the direct children of `root` once, without recursing.
///
/// A file named exactly `docs.json` or `docs.yaml` becomes the
/// configuration; when both exist the one enumerated last wins. A directory
/// named exactly `docs` becomes the docs handle. Everything else is ignored.
/// A configuration file that cannot be read is logged and skipped.
pub fn scan_root(root: &dyn DirectoryHandle) -> Result<ScanResult, PreviewError> {
    let mut result = ScanResult::default();

    for entry in root.entries()? {
        match entry {
            Entry::File(file) => {
                let Some(format_name) = is_config_name(file.name()) else {
                    continue;
                };
                let text = match file.read_text() {
                    Ok(text) => text,
                    Err(err) => {
                        log::warn!("Could not read {}: {}", format_name, err);
                        continue;
                    }
                };
                if let Some(previous) = &result.configuration {
                    log::warn!(
                        "Both {} and {} found; using {}",
                        previous.file_name(),
                        format_name,
                        format_name
                    );
                }
                result.configuration = Configuration::from_file(format_name, text);
            }
            Entry::Directory(dir) if dir.name() == DOCS_DIR_NAME => {
                result.docs = Some(dir);
            }
            Entry::Directory(_) => {}
        }
    }

    log::debug!(
        "Scanned '{}': configuration={:?} docs={}",
        root.name(),
        result.configuration.as_ref().map(Configuration::file_name),
        result.docs.is_some()
    );
    Ok(result)
}

fn is_config_name(name: &str) -> Option<&str> {
    crate::config::CONFIG_FILE_NAMES
        .iter()
        .copied()
        .find(|candidate| *candidate == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryDirectory;
    use std::sync::Arc;

    #[test]
    fn finds_config_and_docs() {
        let root = MemoryDirectory::new("site")
            .with_file("docs.json", r#"{"name":"Acme"}"#)
            .with_file("README.md", "# readme")
            .with_dir(MemoryDirectory::new("docs").with_file("index.mdx", "hi"));

        let scan = scan_root(&root).unwrap();
        let config = scan.configuration.unwrap();
        assert_eq!(config.file_name(), "docs.json");
        assert_eq!(config.name(), Some("Acme"));
        assert_eq!(scan.docs.unwrap().name(), "docs");
    }

    #[test]
    fn last_config_match_wins() {
        let root = MemoryDirectory::new("site")
            .with_file("docs.yaml", "name: Yaml")
            .with_file("docs.json", r#"{"name":"Json"}"#);

        let scan = scan_root(&root).unwrap();
        assert_eq!(scan.configuration.unwrap().name(), Some("Json"));
    }

    #[test]
    fn does_not_recurse_or_match_loosely() {
        let root = MemoryDirectory::new("site")
            .with_file("Docs.json", "{}")
            .with_file("docs", "a file, not a directory")
            .with_dir(MemoryDirectory::new("Docs"))
            .with_dir(MemoryDirectory::new("nested").with_file("docs.json", "{}"));

        let scan = scan_root(&root).unwrap();
        assert!(scan.configuration.is_none());
        assert!(scan.docs.is_none());
    }

    #[test]
    fn cancelled_prompt_is_none() {
        let picker = || -> Result<Option<SharedDirectory>, PreviewError> { Ok(None) };
        assert!(request_directory(&picker).is_none());
    }

    #[test]
    fn failing_prompt_is_none() {
        let picker = || -> Result<Option<SharedDirectory>, PreviewError> {
            Err(PreviewError::Host("permission denied".into()))
        };
        assert!(request_directory(&picker).is_none());
    }

    #[test]
    fn granted_prompt_returns_handle() {
        let picker = || -> Result<Option<SharedDirectory>, PreviewError> {
            Ok(Some(Arc::new(MemoryDirectory::new("site"))))
        };
        assert_eq!(request_directory(&picker).unwrap().name(), "site");
    }
}
