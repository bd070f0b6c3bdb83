//! Directory handles over a snapshot the page can replace.
//!
//! JavaScript walks the granted `FileSystemDirectoryHandle` itself and hands
//! the decoded tree over. Handles created here resolve their path against the
//! latest snapshot on every enumeration, so replacing the snapshot is enough
//! for the next poll to see the edits.

use docsview_core::host::{MemoryFile, MemoryNode};
use docsview_core::{DirectoryHandle, Entry, PreviewError};
use std::sync::{Arc, RwLock};

/// Replaceable root snapshot shared by all handles derived from it.
#[derive(Clone)]
pub struct SnapshotRoot {
    node: Arc<RwLock<MemoryNode>>,
}

impl SnapshotRoot {
    /// Wraps a decoded directory node.
    pub fn new(node: MemoryNode) -> Self {
        Self {
            node: Arc::new(RwLock::new(node)),
        }
    }

    /// Swaps in a freshly decoded tree.
    pub fn replace(&self, node: MemoryNode) {
        let mut guard = self.node.write().unwrap_or_else(|p| p.into_inner());
        *guard = node;
    }

    /// Handle for the root directory.
    pub fn handle(&self) -> SnapshotDirectory {
        let name = self
            .node
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .name()
            .to_string();
        SnapshotDirectory {
            root: self.clone(),
            path: Vec::new(),
            name,
        }
    }
}

/// A directory inside a [`SnapshotRoot`], addressed by path.
pub struct SnapshotDirectory {
    root: SnapshotRoot,
    path: Vec<String>,
    name: String,
}

impl DirectoryHandle for SnapshotDirectory {
    fn name(&self) -> &str {
        &self.name
    }

    fn entries(&self) -> Result<Vec<Entry>, PreviewError> {
        let root = self.root.node.read().unwrap_or_else(|p| p.into_inner());
        let children = locate(&root, &self.path)
            .ok_or_else(|| PreviewError::not_found(format!("/{}", self.path.join("/"))))?;

        Ok(children
            .iter()
            .map(|child| match child {
                MemoryNode::File { name, text } => {
                    Entry::File(Arc::new(MemoryFile::new(name.clone(), text.clone())))
                }
                MemoryNode::Directory { name, .. } => {
                    let mut path = self.path.clone();
                    path.push(name.clone());
                    Entry::Directory(Arc::new(SnapshotDirectory {
                        root: self.root.clone(),
                        path,
                        name: name.clone(),
                    }))
                }
            })
            .collect())
    }
}

fn locate<'a>(node: &'a MemoryNode, path: &[String]) -> Option<&'a [MemoryNode]> {
    let MemoryNode::Directory { entries, .. } = node else {
        return None;
    };
    match path.split_first() {
        None => Some(entries),
        Some((head, rest)) => entries
            .iter()
            .find(|child| matches!(child, MemoryNode::Directory { name, .. } if name == head))
            .and_then(|child| locate(child, rest)),
    }
}
