//! Navigation tests
//!
//! Walks documents built from raw snapshots with paragraph and sentence
//! jumps, checking targets, announced text and cues.

use readflow::document::Document;
use readflow::navigation::{next_paragraph, next_sentence, Announcer, Cue, Cursor, Jump};
use readflow::raw::RawElement;
use readflow::structure::{DocumentBuilder, NodeKind, SemanticNode};

fn page() -> Document {
    let raw = RawElement::element(
        "body",
        vec![
            RawElement::element("h1", vec![RawElement::text("Intro")]),
            RawElement::text("First para. Second sentence."),
            RawElement::element(
                "ul",
                vec![
                    RawElement::element("li", vec![RawElement::text("Item one")]),
                    RawElement::element("li", vec![RawElement::text("Item two")]),
                ],
            ),
        ],
    );
    let mut doc = DocumentBuilder::new().build_document(&raw, "Page");
    doc.build_view(80).unwrap();
    doc
}

fn plain(title: &str, texts: &[&str], width: usize) -> Document {
    let paragraphs = texts.iter().map(|t| SemanticNode::text_paragraph(t)).collect();
    let mut doc = Document::with_title(title, SemanticNode::new(NodeKind::Root).with_children(paragraphs));
    doc.build_view(width).unwrap();
    doc
}

#[derive(Default)]
struct Transcript(Vec<String>);

impl Announcer for Transcript {
    fn say(&mut self, text: &str, cue: Option<Cue>) {
        match cue {
            Some(cue) => self.0.push(format!("[{:?}] {}", cue, text)),
            None => self.0.push(text.to_string()),
        }
    }

    fn play_cue(&mut self, cue: Cue) {
        self.0.push(format!("[{:?}]", cue));
    }
}

#[test]
fn test_paragraph_walk_announces_structure() {
    let doc = page();
    let mut transcript = Transcript::default();
    let mut cursor = Cursor::new(&doc);
    loop {
        let jump = next_paragraph(&cursor, 0);
        jump.announce(&mut transcript);
        match jump.cursor() {
            Some(next) => cursor = next,
            None => break,
        }
    }
    assert_eq!(
        transcript.0,
        vec![
            "[Section] Intro",
            "[Paragraph] First para. Second sentence.",
            "[ListItem] Item one",
            "[ListItem] Item two",
            "[Blocked]",
        ]
    );
}

#[test]
fn test_sentence_jump_within_row_then_below() {
    let doc = page();
    let mut cursor = Cursor::new(&doc);
    assert!(cursor.move_to(2));
    assert_eq!(cursor.text(), "First para. Second sentence.");

    let jump = next_sentence(&cursor, 0);
    assert_eq!(jump.cursor().map(|c| c.position()), Some(2));
    assert_eq!(jump.pos(), 12);
    assert_eq!(jump.text(), "Second sentence.");

    let jump = next_sentence(&cursor, jump.pos());
    assert_eq!(jump.cursor().map(|c| c.position()), Some(3));
    assert_eq!(jump.pos(), 0);
    assert_eq!(jump.text(), "Item one");
    assert_eq!(jump.cue(), Some(Cue::ListItem));
}

#[test]
fn test_sentence_spanning_wrapped_rows() {
    let doc = plain("", &["One two three. Four five six seven."], 10);
    let rows: Vec<String> = (0..doc.line_count()).filter_map(|i| doc.line(i)).collect();
    assert_eq!(rows, vec!["One two", "three.", "Four five", "six seven."]);

    let jump = next_sentence(&Cursor::new(&doc), 0);
    assert_eq!(jump.cursor().map(|c| c.position()), Some(2));
    assert_eq!(jump.text(), "Four five six seven.");
    assert_eq!(jump.cue(), None);
}

#[test]
fn test_paragraph_start_begins_sentence() {
    let doc = plain("", &["no terminator here", "Next paragraph"], 40);
    let jump = next_sentence(&Cursor::new(&doc), 0);
    assert_eq!(jump.cursor().map(|c| c.position()), Some(1));
    assert_eq!(jump.text(), "Next paragraph");
    assert_eq!(jump.cue(), Some(Cue::Paragraph));
}

#[test]
fn test_wrapped_paragraph_text_is_joined() {
    let doc = plain("", &["intro", "alpha beta gamma"], 6);
    let jump = next_paragraph(&Cursor::new(&doc), 0);
    assert_eq!(jump.cursor().map(|c| c.position()), Some(1));
    assert_eq!(jump.text(), "alpha beta gamma");
}

#[test]
fn test_jumps_on_empty_document() {
    let doc = plain("", &[], 40);
    let cursor = Cursor::new(&doc);
    assert!(cursor.is_empty_row());
    assert!(next_paragraph(&cursor, 0).is_empty());
    assert!(next_sentence(&cursor, 0).is_empty());

    let mut transcript = Transcript::default();
    Jump::empty().announce(&mut transcript);
    assert_eq!(transcript.0, vec!["[Blocked]"]);
}

#[test]
fn test_title_only_document_is_blocked() {
    let doc = plain("Only a title", &[], 40);
    let cursor = Cursor::new(&doc);
    assert!(cursor.is_title_row());
    assert!(!cursor.is_paragraph_beginning());
    assert!(next_paragraph(&cursor, 0).is_empty());
    assert!(next_sentence(&cursor, 0).is_empty());
}

#[test]
fn test_cursor_copies_are_independent() {
    let doc = page();
    let mut a = Cursor::new(&doc);
    let b = a;
    assert!(a.move_next());
    assert_eq!(a.position(), 1);
    assert_eq!(b.position(), 0);

    assert!(!a.move_to(doc.line_count()));
    assert_eq!(a.position(), 1);
    assert!(a.move_prev());
    assert!(!a.move_prev());
    assert_eq!(a.position(), 0);
}

#[test]
fn test_cursor_reports_owner_kind() {
    let doc = page();
    let mut cursor = Cursor::new(&doc);
    let mut kinds = Vec::new();
    while cursor.move_next() {
        kinds.push(cursor.node().map(|n| n.kind()));
    }
    assert_eq!(
        kinds,
        vec![
            Some(NodeKind::Section { level: 1 }),
            Some(NodeKind::Root),
            Some(NodeKind::ListItem),
            Some(NodeKind::ListItem),
        ]
    );
}
