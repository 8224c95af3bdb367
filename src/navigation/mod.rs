//! Cursor-based navigation over a document view.
//!
//! A [`Cursor`] walks the rendered lines of a [`crate::document::Document`].
//! [`next_paragraph`] and [`next_sentence`] compute a [`Jump`]: the target
//! position, the text to speak there and an optional [`Cue`] chosen from the
//! structural type of the paragraph's owner.
//!
//! ```
//! use readflow::document::Document;
//! use readflow::navigation::{next_sentence, Cursor};
//! use readflow::structure::{NodeKind, SemanticNode};
//!
//! let root = SemanticNode::new(NodeKind::Root)
//!     .with_children(vec![SemanticNode::text_paragraph("Hello world. Next sentence!")]);
//! let mut doc = Document::new(root);
//! doc.build_view(80).unwrap();
//!
//! let jump = next_sentence(&Cursor::new(&doc), 0);
//! assert_eq!(jump.pos(), 13);
//! assert_eq!(jump.text(), "Next sentence!");
//! ```

mod cursor;
mod jump;

pub use cursor::Cursor;
pub use jump::{find_next_sentence_beginning, next_paragraph, next_sentence, Jump};

/// Audio cue identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Start of a plain paragraph
    Paragraph,
    /// Start of a list item
    ListItem,
    /// Start of a section
    Section,
    /// Nothing to jump to
    Blocked,
}

/// Speech and cue output consuming jump results.
pub trait Announcer {
    /// Speak text, optionally with a cue.
    fn say(&mut self, text: &str, cue: Option<Cue>);

    /// Play a cue without speech.
    fn play_cue(&mut self, cue: Cue);
}
