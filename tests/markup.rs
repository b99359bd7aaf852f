//! Markup validation, imports, callbacks and the session.

mod common;

use common::{bounds, parse, parse_with, TestContent};
use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use veneer::builtin::Button;
use veneer::{init_ui, Element, Registry, Session};

fn parse_err(xml: &str) -> String {
    parse(xml).unwrap_err().to_string()
}

#[test]
fn rejects_unknown_tags_and_attributes() {
    assert!(parse_err(r#"<blink width="1" height="1"/>"#).contains("unknown element tag"));
    assert!(
        parse_err(r#"<text width="1" height="1" text="x" blinking="yes"/>"#)
            .contains("unknown attribute")
    );
}

#[test]
fn rejects_missing_or_malformed_sizes() {
    assert!(parse_err(r#"<text height="1" text="x"/>"#).contains("missing 'width'"));
    assert!(parse_err(r#"<text width="1" text="x"/>"#).contains("missing 'height'"));
    assert!(parse_err(r#"<text width="wide" height="1" text="x"/>"#).contains("invalid"));
    assert!(parse_err(r#"<text width="-5" height="1" text="x"/>"#).contains("invalid"));
}

#[test]
fn relative_anchors_are_validated() {
    let missing = parse_err(
        r#"<relative width="match_parent" height="match_parent">
             <text width="10" height="10" text="x"/>
           </relative>"#,
    );
    assert!(missing.contains("anchor"), "{}", missing);

    let conflict = parse_err(
        r#"<relative width="match_parent" height="match_parent">
             <text width="10" height="10" text="x" top-of="parent" bottom-of="parent"/>
           </relative>"#,
    );
    assert!(conflict.contains("both 'top-of' and 'bottom-of'"), "{}", conflict);

    let unknown = parse_err(
        r#"<relative width="match_parent" height="match_parent">
             <text width="10" height="10" text="x" left-of="ghost"/>
           </relative>"#,
    );
    assert!(unknown.contains("no sibling with id 'ghost'"), "{}", unknown);

    let content_sized = parse_err(
        r#"<relative width="match_content" height="match_parent">
             <text width="10" height="10" text="x" top-of="parent"/>
           </relative>"#,
    );
    assert!(content_sized.contains("match_content"), "{}", content_sized);
}

#[test]
fn single_child_wrappers_enforce_arity() {
    assert!(
        parse_err(r#"<ratio width="match_parent" height="match_parent" ratio="1:1"></ratio>"#)
            .contains("no children")
    );
    let two = r#"<ratio width="match_parent" height="match_parent" ratio="1:1">
                   <text width="1" height="1" text="a"/>
                   <text width="1" height="1" text="b"/>
                 </ratio>"#;
    assert!(parse_err(two).contains("multiple children"));

    let scroll = r#"<scroll width="match_parent" height="match_parent">
                      <text width="1" height="1" text="a"/>
                      <text width="1" height="1" text="b"/>
                    </scroll>"#;
    assert!(parse_err(scroll).contains("multiple children"));

    assert!(
        parse_err(r#"<text width="1" height="1" text="a"><text width="1" height="1" text="b"/></text>"#)
            .contains("cannot have children")
    );
}

#[test]
fn import_embeds_another_document() {
    let registry = Registry::with_builtins();
    let mut docs = HashMap::new();
    docs.insert(
        "widget.xml".to_string(),
        r#"<stack width="match_parent" height="match_content">
             <text width="match_content" height="match_content" text="hello"/>
           </stack>"#
            .to_string(),
    );
    let mut root = parse_with(
        &registry,
        &docs,
        r#"<import width="match_parent" height="match_content" file="widget.xml"/>"#,
    )
    .unwrap();
    init_ui(&mut *root, &bounds(300.0, 200.0)).unwrap();

    assert!(root.is_initialized());
    // "hello" measures 50x20 under the test sizer
    assert_eq!(root.common().height(), Some(20.0));
    let embedded = root.as_layout().unwrap().child(0);
    assert_eq!(embedded.common().width(), Some(300.0));
}

#[test]
fn recursive_imports_are_cut_off() {
    let registry = Registry::with_builtins();
    let mut docs = HashMap::new();
    docs.insert(
        "loop.xml".to_string(),
        r#"<import width="match_parent" height="match_parent" file="loop.xml"/>"#.to_string(),
    );
    let err = parse_with(
        &registry,
        &docs,
        r#"<import width="match_parent" height="match_parent" file="loop.xml"/>"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("depth"), "{}", err);
}

#[test]
fn buttons_dispatch_named_callbacks() {
    let mut registry = Registry::with_builtins();
    let clicks = Rc::new(Cell::new(0));
    let seen = clicks.clone();
    registry.register_callback("bump", move |_target| {
        seen.set(seen.get() + 1);
        Ok(())
    });

    let docs = HashMap::new();
    let mut root = parse_with(
        &registry,
        &docs,
        r#"<button width="100" height="40" text="go" on-click="bump"/>"#,
    )
    .unwrap();
    let button = root
        .as_any_mut()
        .downcast_mut::<Button>()
        .expect("root is a button");
    button.activate(&registry).unwrap();
    button.activate(&registry).unwrap();
    assert_eq!(clicks.get(), 2);
}

#[test]
fn unknown_callbacks_are_reported() {
    let registry = Registry::with_builtins();
    let docs = HashMap::new();
    let mut root = parse_with(
        &registry,
        &docs,
        r#"<button width="100" height="40" text="go" on-click="nope"/>"#,
    )
    .unwrap();
    let button = root.as_any_mut().downcast_mut::<Button>().unwrap();
    let err = button.activate(&registry).unwrap_err();
    assert!(err.to_string().contains("unknown callback"), "{}", err);
}

#[test]
fn session_relayouts_and_reloads() {
    let mut docs = HashMap::new();
    docs.insert(
        "main.xml".to_string(),
        r#"<stack width="match_parent" height="match_content">
             <text width="match_parent" height="20" text="row"/>
           </stack>"#
            .to_string(),
    );

    let mut session = Session::new(
        Registry::with_builtins(),
        Box::new(docs),
        Box::new(TestContent),
        "main.xml",
        bounds(300.0, 200.0),
    )
    .unwrap();
    session.layout().unwrap();
    session.with_root(|root| {
        assert!(root.is_initialized());
        assert_eq!(root.common().width(), Some(300.0));
    });
    session.draw();

    session.set_viewport(bounds(400.0, 200.0)).unwrap();
    session.with_root(|root| assert_eq!(root.common().width(), Some(400.0)));

    session.reload().unwrap();
    session.with_root(|root| {
        assert!(root.is_initialized());
        assert_eq!(root.common().width(), Some(400.0));
    });
}
