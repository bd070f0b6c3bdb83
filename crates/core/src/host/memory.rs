//! In-memory directory snapshots.
//!
//! Hosts that decode a directory themselves (the browser binding walks the
//! granted handle in JavaScript) pass the result in as a [`MemoryNode`] tree.

use crate::handle::{DirectoryHandle, Entry, FileHandle};
use crate::PreviewError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A decoded directory entry, tagged by `kind` like the browser API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MemoryNode {
    /// A file with its decoded text.
    File {
        /// File name.
        name: String,
        /// Decoded text content.
        text: String,
    },
    /// A directory with its children.
    Directory {
        /// Directory name.
        name: String,
        /// Children in host order.
        #[serde(default)]
        entries: Vec<MemoryNode>,
    },
}

impl MemoryNode {
    /// Name of the node.
    pub fn name(&self) -> &str {
        match self {
            MemoryNode::File { name, .. } | MemoryNode::Directory { name, .. } => name,
        }
    }
}

/// A directory handle backed by an owned snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemoryDirectory {
    name: String,
    entries: Vec<MemoryNode>,
}

/// A file handle backed by an owned string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryFile {
    name: String,
    text: String,
}

impl MemoryDirectory {
    /// Creates an empty directory.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Builds a directory from a decoded node. A file node is rejected.
    pub fn from_node(node: MemoryNode) -> Result<Self, PreviewError> {
        match node {
            MemoryNode::Directory { name, entries } => Ok(Self { name, entries }),
            MemoryNode::File { name, .. } => Err(PreviewError::Host(format!(
                "'{name}' is a file, expected a directory"
            ))),
        }
    }

    /// Adds a file child.
    pub fn with_file(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.entries.push(MemoryNode::File {
            name: name.into(),
            text: text.into(),
        });
        self
    }

    /// Adds a directory child.
    pub fn with_dir(mut self, dir: MemoryDirectory) -> Self {
        self.entries.push(dir.into_node());
        self
    }

    /// Converts back into a decoded node.
    pub fn into_node(self) -> MemoryNode {
        MemoryNode::Directory {
            name: self.name,
            entries: self.entries,
        }
    }
}

impl DirectoryHandle for MemoryDirectory {
    fn name(&self) -> &str {
        &self.name
    }

    fn entries(&self) -> Result<Vec<Entry>, PreviewError> {
        Ok(self
            .entries
            .iter()
            .map(|node| match node {
                MemoryNode::File { name, text } => Entry::File(Arc::new(MemoryFile {
                    name: name.clone(),
                    text: text.clone(),
                })),
                MemoryNode::Directory { name, entries } => {
                    Entry::Directory(Arc::new(MemoryDirectory {
                        name: name.clone(),
                        entries: entries.clone(),
                    }))
                }
            })
            .collect())
    }
}

impl MemoryFile {
    /// Creates a file holding `text`.
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

impl FileHandle for MemoryFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_text(&self) -> Result<String, PreviewError> {
        Ok(self.text.clone())
    }
}
