//! Document lookup for a Current Path.

use crate::navigation::ROOT_PATH;
use crate::tree::TreeMapping;

/// Key of the document shown at `/`.
pub const INDEX_DOCUMENT: &str = "/index.mdx";

/// Keys tried for `path`, in fallback order.
///
/// # Examples
///
/// ```
/// use docsview_core::resolve::candidate_keys;
///
/// assert_eq!(candidate_keys("/"), vec!["/index.mdx"]);
/// assert_eq!(candidate_keys("/foo"), vec!["/foo.mdx", "/foo/index.mdx"]);
/// ```
pub fn candidate_keys(path: &str) -> Vec<String> {
    if path == ROOT_PATH {
        vec![INDEX_DOCUMENT.to_string()]
    } else {
        vec![format!("{path}.mdx"), format!("{path}/index.mdx")]
    }
}

/// Resolves the document for `path`; the first hit wins and a miss is `None`.
pub fn resolve_document<'a>(path: &str, tree: &'a TreeMapping) -> Option<&'a str> {
    candidate_keys(path)
        .iter()
        .find_map(|key| tree.get(key))
}

/// Like [`resolve_document`], but also returns the key that matched.
pub fn resolve_entry<'a>(path: &str, tree: &'a TreeMapping) -> Option<(String, &'a str)> {
    candidate_keys(path)
        .into_iter()
        .find_map(|key| tree.get(&key).map(|text| (key, text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(entries: &[(&str, &str)]) -> TreeMapping {
        entries.iter().copied().collect()
    }

    #[test]
    fn root_resolves_index() {
        let t = tree(&[("/index.mdx", "A")]);
        assert_eq!(resolve_document("/", &t), Some("A"));
    }

    #[test]
    fn exact_document_wins() {
        let t = tree(&[("/foo.mdx", "B")]);
        assert_eq!(resolve_document("/foo", &t), Some("B"));
    }

    #[test]
    fn falls_back_to_index_document() {
        let t = tree(&[("/foo/index.mdx", "C")]);
        assert_eq!(resolve_document("/foo", &t), Some("C"));
        assert_eq!(
            resolve_entry("/foo", &t),
            Some(("/foo/index.mdx".to_string(), "C"))
        );
    }

    #[test]
    fn exact_document_preferred_over_index() {
        let t = tree(&[("/foo.mdx", "B"), ("/foo/index.mdx", "C")]);
        assert_eq!(resolve_document("/foo", &t), Some("B"));
    }

    #[test]
    fn miss_is_none() {
        let t = tree(&[("/index.mdx", "A")]);
        assert_eq!(resolve_document("/missing", &t), None);
        assert_eq!(resolve_document("/", &TreeMapping::new()), None);
    }

    #[test]
    fn root_does_not_fall_back_to_empty_name() {
        // `/` never looks up `/.mdx` or `//index.mdx`.
        let t = tree(&[("/.mdx", "X"), ("//index.mdx", "Y")]);
        assert_eq!(resolve_document("/", &t), None);
    }
}
