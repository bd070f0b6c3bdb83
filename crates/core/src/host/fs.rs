//! `std::fs` adapter for the directory capability.

use crate::handle::{DirectoryHandle, DirectoryPicker, Entry, FileHandle, SharedDirectory};
use crate::PreviewError;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A directory on the local file system.
#[derive(Debug, Clone)]
pub struct FsDirectory {
    path: PathBuf,
    name: String,
}

/// A file on the local file system.
#[derive(Debug, Clone)]
pub struct FsFile {
    path: PathBuf,
    name: String,
}

impl FsDirectory {
    /// Opens a directory handle. Fails when `path` is not a readable directory.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PreviewError> {
        let path = path.into();
        let metadata = std::fs::metadata(&path).map_err(|err| map_io(err, &path))?;
        if !metadata.is_dir() {
            return Err(PreviewError::Host(format!(
                "'{}' is not a directory",
                path.display()
            )));
        }
        Ok(Self {
            name: file_name(&path),
            path,
        })
    }

    /// Location of the directory on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DirectoryHandle for FsDirectory {
    fn name(&self) -> &str {
        &self.name
    }

    fn entries(&self) -> Result<Vec<Entry>, PreviewError> {
        let read_dir = std::fs::read_dir(&self.path).map_err(|err| map_io(err, &self.path))?;
        let mut entries = Vec::new();

        for dir_entry in read_dir {
            let dir_entry = dir_entry?;
            let path = dir_entry.path();
            let name = dir_entry.file_name().to_string_lossy().into_owned();

            // Follow symlinks; dangling links and special files are skipped.
            let metadata = match std::fs::metadata(&path) {
                Ok(metadata) => metadata,
                Err(err) => {
                    log::debug!("Skipping unreadable entry {}: {}", path.display(), err);
                    continue;
                }
            };

            if metadata.is_file() {
                entries.push(Entry::File(Arc::new(FsFile { path, name })));
            } else if metadata.is_dir() {
                entries.push(Entry::Directory(Arc::new(FsDirectory { path, name })));
            }
        }

        Ok(entries)
    }
}

impl FileHandle for FsFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_text(&self) -> Result<String, PreviewError> {
        let bytes = std::fs::read(&self.path).map_err(|err| map_io(err, &self.path))?;
        // Binary assets live next to documents; invalid bytes become U+FFFD.
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Picker that "prompts" by handing out a path chosen up front, e.g. from
/// a command-line argument. `None` behaves like a cancelled prompt.
#[derive(Debug, Clone, Default)]
pub struct FsPicker {
    path: Option<PathBuf>,
}

impl FsPicker {
    /// Creates a picker that grants `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Creates a picker whose prompt is always cancelled.
    pub fn cancelled() -> Self {
        Self { path: None }
    }
}

impl DirectoryPicker for FsPicker {
    fn pick(&self) -> Result<Option<SharedDirectory>, PreviewError> {
        match &self.path {
            Some(path) => {
                let dir: SharedDirectory = Arc::new(FsDirectory::open(path.clone())?);
                Ok(Some(dir))
            }
            None => Ok(None),
        }
    }
}

fn map_io(err: io::Error, path: &Path) -> PreviewError {
    match err.kind() {
        io::ErrorKind::NotFound => PreviewError::not_found(path.display().to_string()),
        io::ErrorKind::PermissionDenied => {
            PreviewError::access_revoked(path.display().to_string())
        }
        _ => PreviewError::Io(err),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
