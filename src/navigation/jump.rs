//! Paragraph and sentence jumps.

use super::cursor::Cursor;
use super::{Announcer, Cue};
use crate::structure::NodeKind;

const SENTENCE_END: [char; 3] = ['.', '!', '?'];

/// Result of a navigation query.
///
/// Either empty (nothing to jump to) or a target position with the text to
/// announce and an optional cue.
#[derive(Debug, Clone)]
pub struct Jump<'a> {
    target: Option<Cursor<'a>>,
    pos: usize,
    text: String,
    cue: Option<Cue>,
}

impl<'a> Jump<'a> {
    /// A jump with no target.
    pub fn empty() -> Self {
        Self {
            target: None,
            pos: 0,
            text: String::new(),
            cue: None,
        }
    }

    fn to(target: Cursor<'a>, pos: usize, text: String, cue: Option<Cue>) -> Self {
        Self {
            target: Some(target),
            pos,
            text,
            cue,
        }
    }

    /// Check if no target was found.
    pub fn is_empty(&self) -> bool {
        self.target.is_none()
    }

    /// Target cursor.
    pub fn cursor(&self) -> Option<Cursor<'a>> {
        self.target
    }

    /// Character offset within the target row.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Text to announce.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cue to play with the text.
    pub fn cue(&self) -> Option<Cue> {
        self.cue
    }

    /// Speak the jump, or signal that it is blocked.
    pub fn announce<A: Announcer + ?Sized>(&self, announcer: &mut A) {
        if self.is_empty() {
            announcer.play_cue(Cue::Blocked);
            return;
        }
        announcer.say(&self.text, self.cue);
    }
}

/// Jump to the beginning of the next paragraph.
pub fn next_paragraph<'a>(from: &Cursor<'a>, _pos: usize) -> Jump<'a> {
    if from.is_empty_row() {
        return Jump::empty();
    }
    let mut it = *from;
    while it.move_next() {
        if it.is_paragraph_beginning() && !it.is_empty_row() && !it.is_title_row() {
            return Jump::to(it, 0, paragraph_text(&it), choose_cue(&it));
        }
    }
    Jump::empty()
}

/// Jump to the beginning of the next sentence.
///
/// A sentence ends at a run of `.`, `!` or `?`; the next one starts after the
/// whitespace that follows. A paragraph start always begins a sentence.
pub fn next_sentence<'a>(from: &Cursor<'a>, pos: usize) -> Jump<'a> {
    let mut it = *from;
    if !it.is_empty_row() && !it.is_title_row() {
        let text = it.text();
        if let Some(found) = find_next_sentence_beginning(&text, pos) {
            return jump_to_sentence(it, found, char_len(&text));
        }
    }
    while it.move_next() {
        if it.is_empty_row() || it.is_title_row() {
            continue;
        }
        log::trace!("checking row {}", it.position());
        if it.is_paragraph_beginning() {
            return Jump::to(it, 0, sentence_text(&it, 0), choose_cue(&it));
        }
        let text = it.text();
        if let Some(found) = find_next_sentence_beginning(&text, 0) {
            return jump_to_sentence(it, found, char_len(&text));
        }
    }
    Jump::empty()
}

fn jump_to_sentence(it: Cursor<'_>, found: usize, len: usize) -> Jump<'_> {
    if found < len {
        return Jump::to(it, found, sentence_text(&it, found), choose_cue(&it));
    }
    // only the end of a sentence here; the next one starts below
    match find_text_below(&it) {
        Some(below) => Jump::to(below, 0, sentence_text(&below, 0), choose_cue(&below)),
        None => Jump::empty(),
    }
}

/// Find where the next sentence starts in `text`, scanning from `from`.
///
/// Returns `None` if no sentence end follows `from`, `Some(len)` if a
/// sentence ends but no next one starts in this text, and the offset of the
/// next sentence otherwise. Offsets are in characters.
///
/// # Examples
///
/// ```
/// use readflow::navigation::find_next_sentence_beginning;
///
/// assert_eq!(find_next_sentence_beginning("Hello world. Next sentence!", 0), Some(13));
/// assert_eq!(find_next_sentence_beginning("Wait...", 0), Some(7));
/// assert_eq!(find_next_sentence_beginning("no end here", 0), None);
/// ```
pub fn find_next_sentence_beginning(text: &str, from: usize) -> Option<usize> {
    let chars: Vec<char> = text.chars().collect();
    let mut pos = from;
    while pos < chars.len() && !SENTENCE_END.contains(&chars[pos]) {
        pos += 1;
    }
    if pos >= chars.len() {
        return None;
    }
    while pos < chars.len() && SENTENCE_END.contains(&chars[pos]) {
        pos += 1;
    }
    while pos < chars.len() && chars[pos].is_whitespace() {
        pos += 1;
    }
    Some(pos)
}

fn find_text_below<'a>(from: &Cursor<'a>) -> Option<Cursor<'a>> {
    let mut it = *from;
    while it.move_next() {
        if it.is_empty_row() || it.is_title_row() {
            continue;
        }
        if !it.text().trim().is_empty() {
            return Some(it);
        }
    }
    None
}

fn paragraph_text(from: &Cursor<'_>) -> String {
    if from.is_empty_row() {
        return String::new();
    }
    let mut it = *from;
    let mut text = String::new();
    loop {
        text.push_str(&it.text());
        text.push(' ');
        if !it.move_next() || it.is_paragraph_beginning() {
            break;
        }
    }
    text.trim().to_string()
}

fn sentence_text(from: &Cursor<'_>, pos: usize) -> String {
    let text = from.text();
    if !from.is_empty_row() && !from.is_title_row() {
        if let Some(end) = find_next_sentence_beginning(&text, pos) {
            return char_slice(&text, pos, end);
        }
    }
    let mut sentence = char_slice(&text, pos, char_len(&text));
    let mut it = *from;
    while it.move_next() {
        if it.is_empty_row() || it.is_title_row() {
            continue;
        }
        if it.is_paragraph_beginning() {
            break;
        }
        let row = it.text();
        sentence.push(' ');
        match find_next_sentence_beginning(&row, 0) {
            Some(end) => {
                sentence.push_str(&char_slice(&row, 0, end));
                break;
            },
            None => sentence.push_str(&row),
        }
    }
    sentence
}

fn choose_cue(it: &Cursor<'_>) -> Option<Cue> {
    if it.is_empty_row() || !it.is_paragraph_beginning() {
        return None;
    }
    Some(match it.node().map(|node| node.kind()) {
        Some(NodeKind::ListItem) => Cue::ListItem,
        Some(NodeKind::Section { .. }) => Cue::Section,
        _ => Cue::Paragraph,
    })
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn char_slice(text: &str, from: usize, to: usize) -> String {
    text.chars().skip(from).take(to.saturating_sub(from)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::structure::SemanticNode;

    fn build(title: &str, children: Vec<SemanticNode>, width: usize) -> Document {
        let mut doc = Document::with_title(title, SemanticNode::new(NodeKind::Root).with_children(children));
        doc.build_view(width).unwrap();
        doc
    }

    #[test]
    fn test_sentence_beginning_skips_terminators_and_spaces() {
        assert_eq!(find_next_sentence_beginning("Hello world. Next sentence!", 0), Some(13));
        assert_eq!(find_next_sentence_beginning("Hello world. Next sentence!", 13), Some(27));
        assert_eq!(find_next_sentence_beginning("Really?! Yes", 0), Some(9));
        assert_eq!(find_next_sentence_beginning("abc", 10), None);
    }

    #[test]
    fn test_sentence_beginning_counts_chars() {
        assert_eq!(find_next_sentence_beginning("Çà va. Oui", 0), Some(7));
    }

    #[test]
    fn test_next_sentence_same_row() {
        let doc = build("", vec![SemanticNode::text_paragraph("One. Two. Three.")], 80);
        let it = Cursor::new(&doc);
        let jump = next_sentence(&it, 0);
        assert_eq!(jump.pos(), 5);
        assert_eq!(jump.text(), "Two. ");
        // the cue follows the row, which starts a paragraph
        assert_eq!(jump.cue(), Some(Cue::Paragraph));
    }

    #[test]
    fn test_next_sentence_ends_at_row_end() {
        let doc = build(
            "",
            vec![SemanticNode::text_paragraph("First ends. second part")],
            11,
        );
        // rows: "First ends." / "second part"
        let it = Cursor::new(&doc);
        let jump = next_sentence(&it, 0);
        let target = jump.cursor().unwrap();
        assert_eq!(target.position(), 1);
        assert_eq!(jump.pos(), 0);
        assert_eq!(jump.text(), "second part");
        assert_eq!(jump.cue(), None);
    }

    #[test]
    fn test_next_sentence_paragraph_start_is_boundary() {
        let doc = build(
            "",
            vec![
                SemanticNode::text_paragraph("no terminator"),
                SemanticNode::text_paragraph("Next paragraph"),
            ],
            80,
        );
        let jump = next_sentence(&Cursor::new(&doc), 0);
        assert_eq!(jump.cursor().unwrap().position(), 1);
        assert_eq!(jump.cue(), Some(Cue::Paragraph));
    }

    #[test]
    fn test_next_sentence_none_at_end() {
        let doc = build("", vec![SemanticNode::text_paragraph("Done.")], 80);
        assert!(next_sentence(&Cursor::new(&doc), 0).is_empty());
    }

    #[test]
    fn test_next_paragraph_skips_continuation_rows() {
        let doc = build(
            "Title",
            vec![
                SemanticNode::text_paragraph("aaa bbb"),
                SemanticNode::new(NodeKind::ListItem).with_children(vec![SemanticNode::text_paragraph("item")]),
            ],
            4,
        );
        let mut it = Cursor::new(&doc);
        it.move_next();
        let jump = next_paragraph(&it, 0);
        let target = jump.cursor().unwrap();
        assert_eq!(target.text(), "item");
        assert_eq!(jump.text(), "item");
        assert_eq!(jump.cue(), Some(Cue::ListItem));
        assert!(next_paragraph(&target, 0).is_empty());
    }

    #[test]
    fn test_next_paragraph_from_title() {
        let doc = build("Title", vec![SemanticNode::text_paragraph("aaa bbb")], 4);
        let jump = next_paragraph(&Cursor::new(&doc), 0);
        assert_eq!(jump.cursor().unwrap().position(), 1);
        assert_eq!(jump.text(), "aaa bbb");
    }
}
