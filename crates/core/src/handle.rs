//! Directory capability contract consumed by the preview.
//!
//! The preview never touches a file system itself. Hosts hand it a
//! [`DirectoryHandle`] (a browser grant, a local path, a decoded snapshot)
//! and the walk only ever enumerates and reads through that capability.

use crate::PreviewError;
use std::fmt;
use std::sync::Arc;

/// Shared, thread-safe directory capability.
pub type SharedDirectory = Arc<dyn DirectoryHandle>;

/// Shared, thread-safe file capability.
pub type SharedFile = Arc<dyn FileHandle>;

/// Read access to a single file.
pub trait FileHandle: Send + Sync {
    /// File name without any parent path.
    fn name(&self) -> &str;

    /// Reads and decodes the full file content as text.
    fn read_text(&self) -> Result<String, PreviewError>;
}

/// Read access to a directory and all of its descendants.
pub trait DirectoryHandle: Send + Sync {
    /// Directory name without any parent path.
    fn name(&self) -> &str;

    /// Enumerates the direct children. Order is host-defined.
    fn entries(&self) -> Result<Vec<Entry>, PreviewError>;
}

/// Discriminator reported by the host for each child entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file.
    File,
    /// A directory.
    Directory,
}

/// A child of a directory handle.
#[derive(Clone)]
pub enum Entry {
    /// File child.
    File(SharedFile),
    /// Directory child.
    Directory(SharedDirectory),
}

impl Entry {
    /// Name of the child.
    pub fn name(&self) -> &str {
        match self {
            Entry::File(file) => file.name(),
            Entry::Directory(dir) => dir.name(),
        }
    }

    /// Kind of the child.
    pub fn kind(&self) -> EntryKind {
        match self {
            Entry::File(_) => EntryKind::File,
            Entry::Directory(_) => EntryKind::Directory,
        }
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("kind", &self.kind())
            .field("name", &self.name())
            .finish()
    }
}

/// Interactive prompt through which the user grants a directory.
pub trait DirectoryPicker {
    /// Shows the prompt. `Ok(None)` means the user cancelled.
    fn pick(&self) -> Result<Option<SharedDirectory>, PreviewError>;
}

impl<F> DirectoryPicker for F
where
    F: Fn() -> Result<Option<SharedDirectory>, PreviewError>,
{
    fn pick(&self) -> Result<Option<SharedDirectory>, PreviewError> {
        (self)()
    }
}

