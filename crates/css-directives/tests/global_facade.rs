use std::sync::{Arc, Mutex};

use css_directives::global;
use css_directives::{
    parse_document, serialize_document, styles, DirectiveError, DirectiveSheet, Lifecycle,
};
use serial_test::serial;

#[test]
#[serial]
fn test_register_and_lookup() {
    global::reset();
    global::register(("Center", styles([("textAlign", "center")])));

    assert!(global::is_registered("center"));
    assert!(global::is_registered("CENTER"));
    assert!(!global::is_registered("red"));
    assert_eq!(
        global::with_registry(|r| r.get("center").cloned()),
        Some(styles([("textAlign", "center")]))
    );
}

#[test]
#[serial]
fn test_merge_through_facade() {
    global::reset();
    global::register(vec![
        ("center".to_string(), styles([("textAlign", "center")])),
        ("red".to_string(), styles([("color", "red")])),
    ]);

    global::merge(["center", "red", "ghost"], "title").unwrap();

    assert_eq!(
        global::with_registry(|r| r.get("title").cloned()),
        Some(styles([("textAlign", "center"), ("color", "red")]))
    );
}

#[test]
#[serial]
fn test_merge_rejects_blank_name() {
    global::reset();

    let err = global::merge(["center"], "  ").unwrap_err();

    assert!(matches!(err, DirectiveError::InvalidValue { .. }));
    assert_eq!(global::with_registry(|r| r.len()), 0);
}

#[test]
#[serial]
fn test_lifecycle_and_ready() {
    global::reset();
    global::register(("bold", styles([("fontWeight", "bold")])));
    let mut doc = parse_document(r#"<body><b css:attach="bold"></b></body>"#).unwrap();

    assert_eq!(global::lifecycle(), Lifecycle::Uninitialized);
    global::init();
    global::init();
    assert_eq!(global::lifecycle(), Lifecycle::Scheduled { passes: 2 });

    let reports = global::document_ready(&mut doc);

    assert_eq!(reports.len(), 2);
    assert_eq!(global::lifecycle(), Lifecycle::Uninitialized);
    assert_eq!(
        serialize_document(&doc),
        r#"<body><b style="font-weight: bold;"></b></body>"#
    );
}

#[test]
#[serial]
fn test_ready_without_init_leaves_markers() {
    global::reset();
    let mut doc = parse_document(r#"<body><p css:color="red"></p></body>"#).unwrap();

    assert!(global::document_ready(&mut doc).is_empty());
    assert!(serialize_document(&doc).contains("css:color"));
}

#[test]
#[serial]
fn test_hook_may_reenter_facade() {
    global::reset();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    global::on_unresolved(move |u| {
        sink.lock()
            .unwrap()
            .push((u.name.clone(), global::is_registered(&u.name)));
    });
    global::init();

    let mut doc = parse_document(r#"<body><p css:attach="nope"></p></body>"#).unwrap();
    global::document_ready(&mut doc);

    assert_eq!(*seen.lock().unwrap(), vec![("nope".to_string(), false)]);
}

#[test]
#[serial]
fn test_install_sheet() {
    global::reset();
    let sheet = DirectiveSheet::from_yaml_str(
        "directives:\n  center: { text-align: center }\nmerge:\n  - into: hero\n    from: [center]\n",
    )
    .unwrap();

    global::install_sheet(&sheet).unwrap();

    assert!(global::is_registered("center"));
    assert!(global::is_registered("hero"));
}

#[test]
#[serial]
fn test_reset_clears_everything() {
    global::register(("x", styles([("color", "red")])));
    global::init();

    global::reset();

    assert!(!global::is_registered("x"));
    assert_eq!(global::lifecycle(), Lifecycle::Uninitialized);
}
