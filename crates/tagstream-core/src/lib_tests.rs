use indoc::indoc;

use crate::{Colors, EventKind, Role, TreeEvent, parse_events};

#[test]
fn parse_parser_records() {
    let json = indoc! {r#"
        [
            {"name": "ul", "data": {"class": "menu"}},
            {"name": "li", "data": {}},
            {"text": "home"},
            {"name": "li"},
            {"name": "ul"}
        ]
    "#};

    let events = parse_events(json).unwrap();

    assert_eq!(
        events,
        vec![
            TreeEvent::open_with("ul", [("class", "menu")]),
            TreeEvent::open("li"),
            TreeEvent::text("home"),
            TreeEvent::close("li"),
            TreeEvent::close("ul"),
        ]
    );
}

#[test]
fn record_without_data_is_close() {
    let events = parse_events(r#"[{"name": "p"}]"#).unwrap();

    assert_eq!(events[0].kind(), EventKind::Close);
    assert_eq!(events[0].name(), Some("p"));
}

#[test]
fn unknown_record_shape_is_rejected() {
    assert!(parse_events(r#"[{"comment": "x"}]"#).is_err());
}

#[test]
fn serialize_matches_parser_records() {
    let events = vec![
        TreeEvent::open_with("a", [("href", "/x")]),
        TreeEvent::text("x"),
        TreeEvent::close("a"),
    ];

    let json = serde_json::to_string(&events).unwrap();

    assert_eq!(
        json,
        r#"[{"name":"a","data":{"href":"/x"}},{"text":"x"},{"name":"a"}]"#
    );
}

#[test]
fn attributes_keep_insertion_order() {
    let event = TreeEvent::open_with("img", [("src", "a.png"), ("alt", "a"), ("id", "1")]);
    let keys: Vec<_> = event.attributes().unwrap().keys().cloned().collect();

    assert_eq!(keys, ["src", "alt", "id"]);
}

#[test]
fn accessors() {
    let open = TreeEvent::open("div");
    let text = TreeEvent::text("hi");
    let close = TreeEvent::close("div");

    assert!(open.is_open() && open.opens("div") && !open.opens("span"));
    assert!(text.is_text() && text.name().is_none());
    assert_eq!(text.content(), Some("hi"));
    assert!(close.is_close() && !close.opens("div"));
    assert!(close.attributes().is_none());
}

#[test]
fn display_forms() {
    assert_eq!(
        TreeEvent::open_with("a", [("href", "/x")]).to_string(),
        r#"<a href="/x">"#
    );
    assert_eq!(TreeEvent::text("x y").to_string(), r#""x y""#);
    assert_eq!(TreeEvent::close("a").to_string(), "</a>");
}

#[test]
fn colors_toggle() {
    assert!(Colors::new(true).is_enabled());
    assert!(!Colors::new(false).is_enabled());
    assert_eq!(Colors::default(), Colors::PLAIN);
}

#[test]
fn paint_by_role() {
    let open = TreeEvent::open("li");

    assert_eq!(Colors::PLAIN.paint(Role::Tag, &open), "<li>");
    assert_eq!(Colors::ANSI.paint(Role::Tag, &open), "\x1b[34m<li>\x1b[0m");
    assert_eq!(Colors::ANSI.paint(Role::Warn, "abort"), "\x1b[33mabort\x1b[0m");
}
