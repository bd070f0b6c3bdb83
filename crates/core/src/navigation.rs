//! Current path tracking driven by URL fragment changes.

use crate::store::Store;

/// Path used when the fragment is empty.
pub const ROOT_PATH: &str = "/";

/// Converts URL fragment text into a Current Path.
///
/// A leading `#` delimiter is stripped; an empty fragment maps to `/`.
///
/// # Examples
///
/// ```
/// use docsview_core::navigation::path_from_fragment;
///
/// assert_eq!(path_from_fragment("#/guide/install"), "/guide/install");
/// assert_eq!(path_from_fragment("/guide"), "/guide");
/// assert_eq!(path_from_fragment("#"), "/");
/// assert_eq!(path_from_fragment(""), "/");
/// ```
pub fn path_from_fragment(fragment: &str) -> String {
    let stripped = fragment.strip_prefix('#').unwrap_or(fragment);
    if stripped.is_empty() {
        ROOT_PATH.to_string()
    } else {
        stripped.to_string()
    }
}

/// Tracks the Current Path. Independent of the tree synchronizer.
#[derive(Clone)]
pub struct Navigation {
    path: Store<String>,
}

impl Default for Navigation {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigation {
    /// Starts at `/`.
    pub fn new() -> Self {
        Self {
            path: Store::new(ROOT_PATH.to_string()),
        }
    }

    /// Starts at the path of the fragment present at load time.
    pub fn from_fragment(fragment: &str) -> Self {
        Self {
            path: Store::new(path_from_fragment(fragment)),
        }
    }

    /// Listener for fragment-change notifications. Every call publishes,
    /// without debouncing or deduplication.
    pub fn fragment_changed(&self, fragment: &str) {
        let path = path_from_fragment(fragment);
        log::debug!("Navigated to {}", path);
        self.path.set(path);
    }

    /// Current Path.
    pub fn current(&self) -> String {
        self.path.get()
    }

    /// Store backing the Current Path, for subscribers.
    pub fn store(&self) -> &Store<String> {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn defaults_to_root() {
        assert_eq!(Navigation::new().current(), "/");
        assert_eq!(Navigation::from_fragment("").current(), "/");
        assert_eq!(Navigation::from_fragment("#/api").current(), "/api");
    }

    #[test]
    fn only_the_delimiter_is_stripped() {
        assert_eq!(path_from_fragment("##x"), "#x");
        assert_eq!(path_from_fragment("#foo"), "foo");
    }

    #[test]
    fn rapid_changes_are_each_published() {
        let nav = Navigation::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = nav
            .store()
            .subscribe(move |p: &String| sink.lock().unwrap().push(p.clone()));

        for fragment in ["#/a", "#/b", "#/b", "", "#/c"] {
            nav.fragment_changed(fragment);
        }

        assert_eq!(*seen.lock().unwrap(), vec!["/a", "/b", "/b", "/", "/c"]);
        assert_eq!(nav.current(), "/c");
    }
}
