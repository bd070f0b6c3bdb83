use docsview_core::host::MemoryDirectory;
use docsview_core::{
    PollOutcome, Preview, PreviewError, PreviewOptions, SharedDirectory, TreeMapping, View,
};
use std::sync::{Arc, Mutex};

fn site() -> SharedDirectory {
    Arc::new(
        MemoryDirectory::new("site")
            .with_file("docs.json", r#"{ "name": "Acme" }"#)
            .with_dir(
                MemoryDirectory::new("docs")
                    .with_file("index.mdx", "A")
                    .with_file("foo.mdx", "B")
                    .with_dir(MemoryDirectory::new("bar").with_file("index.mdx", "C")),
            ),
    )
}

fn manual_preview() -> Preview {
    Preview::new(PreviewOptions::manual())
}

fn document(view: View) -> Option<String> {
    match view {
        View::Document { content, .. } => content,
        other => panic!("expected a document view, got {other:?}"),
    }
}

#[test]
fn nothing_selected_shows_upload_prompt() {
    let preview = manual_preview();
    assert_eq!(preview.view(), View::UploadPrompt);
}

#[test]
fn directory_without_config_shows_message() {
    let mut preview = manual_preview();
    preview.select(Some(Arc::new(
        MemoryDirectory::new("site").with_dir(MemoryDirectory::new("docs").with_file("index.mdx", "A")),
    )));
    preview.poll().unwrap();

    // The document exists, but the missing configuration takes precedence.
    assert!(preview.tree().get().contains("/index.mdx"));
    assert_eq!(preview.view(), View::MissingConfiguration);
}

#[test]
fn resolves_documents_as_the_path_changes() {
    let mut preview = manual_preview();
    preview.select(Some(site()));
    assert_eq!(preview.poll().unwrap(), PollOutcome::Published);

    assert_eq!(document(preview.view()), Some("A".to_string()));

    preview.fragment_changed("#/foo");
    assert_eq!(document(preview.view()), Some("B".to_string()));

    preview.fragment_changed("#/bar");
    assert_eq!(document(preview.view()), Some("C".to_string()));

    preview.fragment_changed("#/missing");
    assert_eq!(document(preview.view()), None);

    preview.fragment_changed("");
    assert_eq!(document(preview.view()), Some("A".to_string()));
}

#[test]
fn view_reports_matched_key() {
    let mut preview = manual_preview();
    preview.select(Some(site()));
    preview.poll().unwrap();
    preview.fragment_changed("#/bar");

    assert_eq!(
        preview.view(),
        View::Document {
            path: "/bar".into(),
            key: Some("/bar/index.mdx".into()),
            content: Some("C".into()),
        }
    );
}

#[test]
fn deselecting_clears_configuration_docs_and_tree() {
    let mut preview = manual_preview();
    preview.select(Some(site()));
    preview.poll().unwrap();
    assert!(!preview.tree().get().is_empty());

    preview.select(None);
    assert!(preview.configuration().get().is_none());
    assert!(preview.docs().get().is_none());
    assert!(preview.tree().get().is_empty());
    assert_eq!(preview.poll().unwrap(), PollOutcome::Idle);
    assert_eq!(preview.view(), View::UploadPrompt);
}

#[test]
fn reselecting_a_directory_without_docs_does_not_keep_stale_docs() {
    let mut preview = manual_preview();
    preview.select(Some(site()));
    preview.poll().unwrap();

    preview.select(None);
    preview.select(Some(Arc::new(
        MemoryDirectory::new("other").with_file("docs.yaml", "name: Other"),
    )));

    assert!(preview.docs().get().is_none());
    assert!(preview.tree().get().is_empty());
    assert_eq!(
        preview
            .configuration()
            .get()
            .and_then(|c| c.name().map(str::to_string)),
        Some("Other".to_string())
    );
    assert_eq!(document(preview.view()), None);
}

#[test]
fn clearing_docs_always_empties_the_tree() {
    let mut preview = manual_preview();
    preview.select(Some(site()));
    preview.poll().unwrap();

    preview.set_docs(None);
    assert_eq!(preview.tree().get(), TreeMapping::new());
    assert!(preview.docs().get().is_none());
}

#[test]
fn swapping_docs_drops_the_previous_tree() {
    let mut preview = manual_preview();
    preview.select(Some(site()));
    preview.poll().unwrap();

    let events = Arc::new(Mutex::new(Vec::new()));
    let tree_events = Arc::clone(&events);
    let _tree_sub = preview.tree().subscribe(move |tree: &TreeMapping| {
        tree_events
            .lock()
            .unwrap()
            .push(format!("tree:{}", tree.len()));
    });
    let docs_events = Arc::clone(&events);
    let _docs_sub = preview.docs().subscribe(move |docs: &Option<SharedDirectory>| {
        docs_events.lock().unwrap().push(format!(
            "docs:{}",
            docs.as_ref().map(|d| d.name().to_string()).unwrap_or_default()
        ));
    });

    preview.set_docs(Some(Arc::new(
        MemoryDirectory::new("manual").with_file("index.mdx", "M"),
    )));
    assert!(preview.tree().get().is_empty());
    assert_eq!(*events.lock().unwrap(), vec!["tree:0", "docs:manual"]);

    preview.poll().unwrap();
    assert_eq!(document(preview.view()), Some("M".to_string()));
}

#[test]
fn tree_is_cleared_before_docs_store_is_cleared() {
    let mut preview = manual_preview();
    preview.select(Some(site()));
    preview.poll().unwrap();

    let events = Arc::new(Mutex::new(Vec::new()));
    let tree_events = Arc::clone(&events);
    let _tree_sub = preview.tree().subscribe(move |tree: &TreeMapping| {
        tree_events
            .lock()
            .unwrap()
            .push(format!("tree:{}", tree.len()));
    });
    let docs_events = Arc::clone(&events);
    let _docs_sub = preview.docs().subscribe(move |docs: &Option<SharedDirectory>| {
        docs_events
            .lock()
            .unwrap()
            .push(format!("docs:{}", docs.is_some()));
    });

    preview.select(None);
    assert_eq!(*events.lock().unwrap(), vec!["tree:0", "docs:false"]);
}

#[test]
fn cancelled_prompt_deselects() {
    let mut preview = manual_preview();
    preview.select(Some(site()));

    let cancel = || -> Result<Option<SharedDirectory>, PreviewError> { Ok(None) };
    assert!(preview.request_directory(&cancel).is_none());
    assert!(preview.handle().get().is_none());
    assert_eq!(preview.view(), View::UploadPrompt);
}

#[test]
fn granted_prompt_selects() {
    let mut preview = manual_preview();
    let grant = || -> Result<Option<SharedDirectory>, PreviewError> { Ok(Some(site())) };

    let handle = preview.request_directory(&grant).unwrap();
    assert_eq!(handle.name(), "site");
    assert_eq!(
        preview.configuration().get().map(|c| c.file_name().to_string()),
        Some("docs.json".to_string())
    );
    assert!(preview.docs().get().is_some());
}
