//! Configuration tests
//!
//! Loads engine configuration from JSON and checks that each section reaches
//! the component it configures.

use readflow::config::{EngineConfig, LinearizeConfig};
use readflow::geometry::Rect;
use readflow::linearize::{Container, ContentItem, ViewBuilder};
use readflow::raw::RawElement;
use readflow::structure::{DocumentBuilder, NodeKind};
use readflow::Error;

#[test]
fn test_full_json_round_trip() {
    let config = EngineConfig::from_json(
        r#"{
            "builder": { "section_level": 3 },
            "view": { "list_indent": 2 },
            "linearize": { "target_width": 60, "row_tolerance": 8.5 }
        }"#,
    )
    .unwrap();
    assert_eq!(config.builder.section_level, 3);
    assert_eq!(config.view.list_indent, 2);
    assert_eq!(config.linearize.target_width, 60);
    assert_eq!(config.linearize.row_tolerance, 8.5);

    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(EngineConfig::from_json(&json).unwrap(), config);
}

#[test]
fn test_empty_json_gives_defaults() {
    assert_eq!(EngineConfig::from_json("{}").unwrap(), EngineConfig::default());
}

#[test]
fn test_invalid_sections_rejected() {
    for json in [
        r#"{ "linearize": { "target_width": 9 } }"#,
        r#"{ "linearize": { "row_tolerance": -0.5 } }"#,
    ] {
        assert!(
            matches!(EngineConfig::from_json(json), Err(Error::InvalidConfiguration(_))),
            "{}",
            json
        );
    }
    assert!(matches!(
        EngineConfig::from_json(r#"{ "view": { "list_indent": "wide" } }"#),
        Err(Error::Config(_))
    ));
}

#[test]
fn test_builder_and_view_sections_applied() {
    let config = EngineConfig::from_json(r#"{ "builder": { "section_level": 2 }, "view": { "list_indent": 3 } }"#)
        .unwrap();
    let raw = RawElement::element(
        "body",
        vec![
            RawElement::element("h4", vec![RawElement::text("Title")]),
            RawElement::element("ol", vec![RawElement::element("li", vec![RawElement::text("step")])]),
        ],
    );
    let builder = DocumentBuilder::with_config(config.builder.clone());
    let root = builder.build(&raw);
    assert!(root
        .children
        .iter()
        .any(|n| n.kind == NodeKind::Section { level: 2 }));

    let mut doc = builder.build_document(&raw, "").with_view_config(config.view);
    doc.build_view(20).unwrap();
    let lines: Vec<String> = (0..doc.line_count()).filter_map(|i| doc.line(i)).collect();
    assert_eq!(lines, vec!["Title", "   step"]);
}

#[test]
fn test_linearize_section_applied() {
    let rect = |x: f32, y: f32| Rect::new(x, y, 40.0, 10.0);
    let containers = || {
        vec![
            Container::new("a", rect(0.0, 0.0), vec![ContentItem::text("a", rect(0.0, 0.0))]),
            Container::new("b", rect(60.0, 10.0), vec![ContentItem::text("b", rect(60.0, 10.0))]),
        ]
    };
    let tight = LinearizeConfig::default().with_target_width(10).with_row_tolerance(5.0);
    assert_eq!(ViewBuilder::new(tight).linearize(containers()).unwrap().line_count(), 2);

    let config = EngineConfig::from_json(r#"{ "linearize": { "target_width": 10 } }"#).unwrap();
    assert_eq!(ViewBuilder::new(config.linearize).linearize(containers()).unwrap().line_count(), 1);
}
