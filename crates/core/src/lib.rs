#![deny(missing_docs)]
//! docsview core: directory grants, tree synchronization, navigation, and
//! document resolution for the live docs preview.

/// Site configuration file parsing.
pub mod config;
/// Core error types.
pub mod error;
/// Directory capability contract.
pub mod handle;
/// Host adapters implementing the capability.
pub mod host;
/// Current path tracking.
pub mod navigation;
/// Preview orchestration and views.
pub mod preview;
/// Document lookup.
pub mod resolve;
/// Selection gate.
pub mod selection;
/// Observable stores.
pub mod store;
/// Periodic tree synchronization.
pub mod sync;
/// Flattened directory snapshots.
pub mod tree;

pub use config::{CONFIG_FILE_NAMES, ConfigFormat, Configuration, DOCS_DIR_NAME, SidebarItem};
pub use error::{ConfigError, PreviewError};
pub use handle::{
    DirectoryHandle, DirectoryPicker, Entry, EntryKind, FileHandle, SharedDirectory, SharedFile,
};
pub use navigation::{Navigation, path_from_fragment};
pub use preview::{Preview, PreviewOptions, View};
pub use resolve::{candidate_keys, resolve_document, resolve_entry};
pub use selection::{ScanResult, request_directory, scan_root};
pub use store::{Store, Subscription};
pub use sync::{DEFAULT_POLL_INTERVAL, PollMode, PollOutcome, TreeSynchronizer};
pub use tree::{TreeMapping, walk};
