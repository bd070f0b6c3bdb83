//! Flattened `path -> text` snapshots of a docs directory.

use crate::handle::{DirectoryHandle, Entry};
use crate::PreviewError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Point-in-time snapshot of every file below a directory, keyed by
/// slash-joined path (`/guide/install.mdx`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TreeMapping {
    files: BTreeMap<String, String>,
}

impl TreeMapping {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the text stored under `path`.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    /// Returns true if `path` is present.
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// Stores `text` under `path`, replacing any previous value.
    pub fn insert(&mut self, path: impl Into<String>, text: impl Into<String>) {
        self.files.insert(path.into(), text.into());
    }

    /// Merges `other` into `self`; entries of `other` win on collision.
    pub fn extend(&mut self, other: TreeMapping) {
        self.files.extend(other.files);
    }

    /// Number of files in the snapshot.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true when the snapshot holds no files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterates the paths in lexical order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Iterates `(path, text)` pairs in lexical path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for TreeMapping
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            files: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Walks `handle` depth-first, reading every file as text.
///
/// Top-level files land at `{prefix}/{name}`; pass an empty prefix to get
/// `/name`. The first failing read aborts the whole walk.
///
/// # Examples
///
/// ```
/// use docsview_core::host::MemoryDirectory;
/// use docsview_core::tree::walk;
///
/// let docs = MemoryDirectory::new("docs")
///     .with_file("index.mdx", "# Home")
///     .with_dir(MemoryDirectory::new("guide").with_file("setup.mdx", "# Setup"));
///
/// let tree = walk(&docs, "").unwrap();
/// assert_eq!(tree.get("/index.mdx"), Some("# Home"));
/// assert_eq!(tree.get("/guide/setup.mdx"), Some("# Setup"));
/// ```
pub fn walk(handle: &dyn DirectoryHandle, prefix: &str) -> Result<TreeMapping, PreviewError> {
    let mut tree = TreeMapping::new();

    for entry in handle.entries()? {
        match entry {
            Entry::File(file) => {
                let text = file.read_text()?;
                tree.insert(format!("{}/{}", prefix, file.name()), text);
            }
            Entry::Directory(dir) => {
                let nested = walk(dir.as_ref(), &format!("{}/{}", prefix, dir.name()))?;
                tree.extend(nested);
            }
        }
    }

    Ok(tree)
}
