//! The preview: owns every store and sequences their updates.
//!
//! Update order on a handle change is fixed: the synchronizer stops (clearing
//! the tree), docs and configuration are cleared, the handle is published,
//! the root is scanned, configuration is published, the synchronizer starts
//! on the new docs handle, and only then is the docs handle published.

use crate::config::Configuration;
use crate::handle::{DirectoryPicker, SharedDirectory};
use crate::navigation::Navigation;
use crate::resolve::resolve_entry;
use crate::selection::{request_directory, scan_root};
use crate::store::Store;
use crate::sync::{DEFAULT_POLL_INTERVAL, PollMode, PollOutcome, TreeSynchronizer};
use crate::tree::TreeMapping;
use crate::PreviewError;
use std::sync::Arc;
use std::time::Duration;

/// Tunables of a [`Preview`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewOptions {
    /// Time between two walks of the docs directory.
    pub poll_interval: Duration,
    /// Whether walks run on a background thread or are host driven.
    pub poll_mode: PollMode,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            poll_mode: PollMode::Background,
        }
    }
}

impl PreviewOptions {
    /// Host-driven polling, for hosts without threads.
    pub fn manual() -> Self {
        Self {
            poll_mode: PollMode::Manual,
            ..Self::default()
        }
    }
}

/// What the preview currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// No directory granted yet.
    UploadPrompt,
    /// A directory is granted but has no configuration file.
    MissingConfiguration,
    /// Resolution ran for `path`; `content` is `None` on a miss.
    Document {
        /// Current Path that was resolved.
        path: String,
        /// Tree key that matched.
        key: Option<String>,
        /// Raw document text.
        content: Option<String>,
    },
}

impl View {
    /// Renders the view as HTML, escaping the document text.
    pub fn render(&self) -> String {
        self.render_with(|text| html_escape::encode_text(text).into_owned())
    }

    /// Renders the view, turning document text into HTML with `document`.
    pub fn render_with(&self, document: impl FnOnce(&str) -> String) -> String {
        match self {
            View::UploadPrompt => concat!(
                r#"<main class="preview-empty">"#,
                r#"<button type="button" class="preview-upload">Click to upload a directory</button>"#,
                "</main>"
            )
            .to_string(),
            View::MissingConfiguration => concat!(
                r#"<main class="preview-empty">"#,
                "<div>Selected directory has no config file.</div>",
                "</main>"
            )
            .to_string(),
            View::Document { content, .. } => {
                let body = content.as_deref().map(document).unwrap_or_default();
                format!(r#"<div class="preview">{body}</div>"#)
            }
        }
    }
}

/// Live preview of a granted docs directory.
pub struct Preview {
    handle: Store<Option<SharedDirectory>>,
    configuration: Store<Option<Configuration>>,
    docs: Store<Option<SharedDirectory>>,
    tree: Store<TreeMapping>,
    navigation: Navigation,
    synchronizer: TreeSynchronizer,
}

impl Default for Preview {
    fn default() -> Self {
        Self::new(PreviewOptions::default())
    }
}

impl Preview {
    /// Creates a preview with nothing selected, at path `/`.
    pub fn new(options: PreviewOptions) -> Self {
        let tree = Store::default();
        Self {
            handle: Store::new(None),
            configuration: Store::new(None),
            docs: Store::new(None),
            synchronizer: TreeSynchronizer::new(
                tree.clone(),
                options.poll_interval,
                options.poll_mode,
            ),
            tree,
            navigation: Navigation::new(),
        }
    }

    /// Prompts for a directory and selects whatever comes back, including
    /// nothing when the prompt is cancelled.
    pub fn request_directory(&mut self, picker: &dyn DirectoryPicker) -> Option<SharedDirectory> {
        let handle = request_directory(picker);
        self.select(handle.clone());
        handle
    }

    /// Applies a handle change.
    ///
    /// Configuration and docs are reset first, so a directory lacking them
    /// never inherits the previous selection's. A failed scan is logged and
    /// leaves both absent.
    pub fn select(&mut self, handle: Option<SharedDirectory>) {
        self.set_docs(None);
        self.configuration.set(None);
        self.handle.set(handle.clone());

        let Some(root) = handle else {
            return;
        };

        match scan_root(root.as_ref()) {
            Ok(scan) => {
                self.configuration.set(scan.configuration);
                self.set_docs(scan.docs);
            }
            Err(err) => log::warn!("Could not scan '{}': {}", root.name(), err),
        }
    }

    /// Replaces the docs handle. The tree is emptied before the docs store
    /// changes, whether the handle is cleared or swapped for another.
    pub fn set_docs(&mut self, docs: Option<SharedDirectory>) {
        match docs {
            Some(docs) => {
                // Starting clears a previous handle's tree before docs change.
                if let Err(err) = self.synchronizer.start(Arc::clone(&docs)) {
                    log::warn!("Could not start synchronizing: {}", err);
                }
                self.docs.set(Some(docs));
            }
            None => {
                if self.synchronizer.is_active() || !self.tree.with(TreeMapping::is_empty) {
                    self.synchronizer.stop();
                }
                if self.docs.with(Option::is_some) {
                    self.docs.set(None);
                }
            }
        }
    }

    /// Walks the docs directory once, for host-driven polling.
    pub fn poll(&self) -> Result<PollOutcome, PreviewError> {
        self.synchronizer.poll_once()
    }

    /// Fragment-change listener.
    pub fn fragment_changed(&self, fragment: &str) {
        self.navigation.fragment_changed(fragment);
    }

    /// Computes the current view. Missing handle or configuration take
    /// precedence over path resolution.
    pub fn view(&self) -> View {
        if self.handle.with(Option::is_none) {
            return View::UploadPrompt;
        }
        if self.configuration.with(Option::is_none) {
            return View::MissingConfiguration;
        }

        let path = self.navigation.current();
        let tree = self.tree.snapshot();
        let (key, content) = match resolve_entry(&path, &tree) {
            Some((key, text)) => (Some(key), Some(text.to_string())),
            None => (None, None),
        };
        View::Document { path, key, content }
    }

    /// Top-level handle store.
    pub fn handle(&self) -> &Store<Option<SharedDirectory>> {
        &self.handle
    }

    /// Configuration store.
    pub fn configuration(&self) -> &Store<Option<Configuration>> {
        &self.configuration
    }

    /// Docs handle store.
    pub fn docs(&self) -> &Store<Option<SharedDirectory>> {
        &self.docs
    }

    /// Tree store.
    pub fn tree(&self) -> &Store<TreeMapping> {
        &self.tree
    }

    /// Navigation state.
    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }
}
