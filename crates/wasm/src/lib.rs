use docsview_core::host::{MemoryDirectory, MemoryNode};
use docsview_core::{Configuration, PollOutcome, PreviewOptions, TreeMapping, View};
use docsview_mdx::{ComponentRegistry, default_registry, render_markup};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

pub mod snapshot;

use snapshot::SnapshotRoot;

// ============================================================================
// Preview Config
// ============================================================================

/// Options accepted by the `Preview` constructor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WasmPreviewConfig {
    /// Component mapping used by `render`; the default mapping when absent.
    #[serde(default)]
    pub registry: Option<ComponentRegistry>,
    /// Fragment the page was loaded with.
    #[serde(default, alias = "initialHash")]
    pub initial_hash: Option<String>,
}

fn parse_config(config: JsValue) -> Result<WasmPreviewConfig, JsError> {
    if config.is_undefined() || config.is_null() {
        return Ok(WasmPreviewConfig::default());
    }
    serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))
}

fn parse_registry(registry: JsValue) -> Result<ComponentRegistry, JsError> {
    if registry.is_undefined() || registry.is_null() {
        return Ok(default_registry());
    }
    serde_wasm_bindgen::from_value(registry)
        .map_err(|e| JsError::new(&format!("Invalid registry: {}", e)))
}

fn parse_snapshot(root: JsValue) -> Result<MemoryNode, JsError> {
    let node: MemoryNode = serde_wasm_bindgen::from_value(root)
        .map_err(|e| JsError::new(&format!("Invalid directory snapshot: {}", e)))?;
    // Reject file nodes before they reach a handle.
    MemoryDirectory::from_node(node)
        .map(MemoryDirectory::into_node)
        .map_err(|e| JsError::new(&e.to_string()))
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    // Plain objects and `null`, not `Map`s and `undefined`.
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

// ============================================================================
// Preview API Types
// ============================================================================

/// Serializable form of the current view, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ViewState {
    /// Nothing granted yet.
    UploadPrompt,
    /// Granted directory without a configuration file.
    MissingConfiguration,
    /// Resolution result for `path`.
    Document {
        /// Current path.
        path: String,
        /// Matching tree key, `null` on a miss.
        key: Option<String>,
        /// Raw document text, `null` on a miss.
        content: Option<String>,
    },
}

impl From<View> for ViewState {
    fn from(view: View) -> Self {
        match view {
            View::UploadPrompt => ViewState::UploadPrompt,
            View::MissingConfiguration => ViewState::MissingConfiguration,
            View::Document { path, key, content } => ViewState::Document { path, key, content },
        }
    }
}

fn outcome_name(outcome: PollOutcome) -> &'static str {
    match outcome {
        PollOutcome::Published => "published",
        PollOutcome::Stale => "stale",
        PollOutcome::Idle => "idle",
    }
}

// ============================================================================
// Preview API
// ============================================================================

/// Browser-side preview session.
///
/// The page owns the directory grant and the timer: it decodes the granted
/// directory into a snapshot, passes it to `select`, calls `refresh` and
/// `poll` every second, and forwards `hashchange` events.
///
/// # Example (JavaScript)
///
/// ```javascript
/// import { Preview } from './docsview_wasm';
///
/// const preview = new Preview({ initialHash: location.hash });
/// preview.select(await decodeDirectory(handle));
/// setInterval(async () => {
///   preview.refresh(await decodeDirectory(handle));
///   preview.poll();
///   root.innerHTML = preview.render();
/// }, 1000);
/// window.addEventListener('hashchange', () => preview.hashChanged(location.hash));
/// ```
#[wasm_bindgen(js_name = Preview)]
pub struct WasmPreview {
    inner: docsview_core::Preview,
    snapshot: Option<SnapshotRoot>,
    registry: ComponentRegistry,
}

#[wasm_bindgen(js_class = Preview)]
impl WasmPreview {
    /// Creates a session with nothing selected.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmPreview, JsError> {
        let cfg = parse_config(config)?;
        let inner = docsview_core::Preview::new(PreviewOptions::manual());
        if let Some(hash) = cfg.initial_hash.as_deref() {
            inner.fragment_changed(hash);
        }
        Ok(WasmPreview {
            inner,
            snapshot: None,
            registry: cfg.registry.unwrap_or_else(default_registry),
        })
    }

    /// Selects a decoded directory snapshot, or deselects on `null`.
    pub fn select(&mut self, root: JsValue) -> Result<(), JsError> {
        if root.is_undefined() || root.is_null() {
            self.snapshot = None;
            self.inner.select(None);
            return Ok(());
        }

        let snapshot = SnapshotRoot::new(parse_snapshot(root)?);
        let handle = Arc::new(snapshot.handle());
        self.snapshot = Some(snapshot);
        self.inner.select(Some(handle));
        Ok(())
    }

    /// Replaces the contents of the selected directory. The tree changes on
    /// the next `poll`; the configuration is only read by `select`.
    pub fn refresh(&self, root: JsValue) -> Result<(), JsError> {
        let Some(snapshot) = &self.snapshot else {
            return Err(JsError::new("No directory selected"));
        };
        snapshot.replace(parse_snapshot(root)?);
        Ok(())
    }

    /// Walks the docs directory once; returns `"published"`, `"stale"` or
    /// `"idle"`.
    pub fn poll(&self) -> Result<String, JsError> {
        let outcome = self
            .inner
            .poll()
            .map_err(|e| JsError::new(&format!("Poll error: {}", e)))?;
        Ok(outcome_name(outcome).to_string())
    }

    /// Updates the current path from a URL fragment.
    #[wasm_bindgen(js_name = hashChanged)]
    pub fn hash_changed(&self, hash: &str) {
        self.inner.fragment_changed(hash);
    }

    /// Current path derived from the last fragment.
    #[wasm_bindgen(js_name = currentPath)]
    pub fn current_path(&self) -> String {
        self.inner.navigation().current()
    }

    /// Current view as `{ type, path?, key?, content? }`.
    pub fn view(&self) -> Result<JsValue, JsError> {
        to_js(&ViewState::from(self.inner.view()))
    }

    /// Current view as HTML, with document markup run through the component
    /// mapping.
    pub fn render(&self) -> Result<String, JsError> {
        let mut failure = None;
        let html = self
            .inner
            .view()
            .render_with(|text| match render_markup(text, &self.registry) {
                Ok(html) => html,
                Err(err) => {
                    failure = Some(err);
                    String::new()
                }
            });
        match failure {
            Some(err) => Err(JsError::new(&format!("Render error: {}", err))),
            None => Ok(html),
        }
    }

    /// Parsed configuration, or `null` when none was found.
    pub fn configuration(&self) -> Result<JsValue, JsError> {
        let configuration = self.inner.configuration().snapshot();
        to_js(&(*configuration).as_ref().map(Configuration::value))
    }

    /// Latest published tree as a `path -> text` object.
    pub fn tree(&self) -> Result<JsValue, JsError> {
        to_js(&*self.inner.tree().snapshot())
    }
}

// ============================================================================
// Stateless helpers
// ============================================================================

/// Looks up the document for `path` in a `path -> text` object.
#[wasm_bindgen(js_name = resolveDocument)]
pub fn resolve_document(tree: JsValue, path: &str) -> Result<Option<String>, JsError> {
    let tree: TreeMapping = serde_wasm_bindgen::from_value(tree)
        .map_err(|e| JsError::new(&format!("Invalid tree: {}", e)))?;
    Ok(docsview_core::resolve_document(path, &tree).map(str::to_string))
}

/// Current path for a URL fragment such as `location.hash`.
#[wasm_bindgen(js_name = pathFromHash)]
pub fn path_from_hash(hash: &str) -> String {
    docsview_core::path_from_fragment(hash)
}

/// Applies a component mapping (the default one when `registry` is absent)
/// to rendered markup.
#[wasm_bindgen(js_name = renderMarkup)]
pub fn render_markup_js(html: &str, registry: JsValue) -> Result<String, JsError> {
    let registry = parse_registry(registry)?;
    render_markup(html, &registry).map_err(|e| JsError::new(&format!("Render error: {}", e)))
}
