//! Row cursor over a document view.

use crate::document::{Document, Node, Paragraph};

/// A position over a document's rendered lines.
///
/// Position 0 is the title row when the document has a non-empty title;
/// the remaining positions map one to one onto view rows. Copying a cursor
/// copies the position only.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    doc: &'a Document,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the first line.
    pub fn new(doc: &'a Document) -> Self {
        Self { doc, pos: 0 }
    }

    /// Document this cursor walks.
    pub fn document(&self) -> &'a Document {
        self.doc
    }

    /// Current line position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move to a line position; returns `false` and stays put if it does not exist.
    pub fn move_to(&mut self, pos: usize) -> bool {
        if pos >= self.doc.line_count() {
            return false;
        }
        self.pos = pos;
        true
    }

    /// Advance one row; returns `false` at the end of the document.
    pub fn move_next(&mut self) -> bool {
        self.move_to(self.pos + 1)
    }

    /// Step back one row; returns `false` at the first row.
    pub fn move_prev(&mut self) -> bool {
        match self.pos.checked_sub(1) {
            Some(pos) => self.move_to(pos),
            None => false,
        }
    }

    /// Check if the cursor is on the title row.
    pub fn is_title_row(&self) -> bool {
        !self.doc.title().is_empty() && self.pos == 0
    }

    /// Index into [`Document::rows`], `None` on the title row or past the end.
    pub fn row_index(&self) -> Option<usize> {
        let title_lines = usize::from(!self.doc.title().is_empty());
        let row = self.pos.checked_sub(title_lines)?;
        (row < self.doc.rows().len()).then_some(row)
    }

    /// Text of the current row, without indentation.
    pub fn text(&self) -> String {
        if self.is_title_row() {
            return self.doc.title().to_string();
        }
        self.row_index()
            .and_then(|row| self.doc.row_text(row))
            .unwrap_or_default()
    }

    /// Check if the current row has no text.
    pub fn is_empty_row(&self) -> bool {
        self.text().is_empty()
    }

    /// Index into [`Document::paragraphs`] of the paragraph owning this row.
    pub fn paragraph_index(&self) -> Option<usize> {
        let row = self.row_index()?;
        Some(self.doc.rows()[row].paragraph)
    }

    /// Paragraph owning this row.
    pub fn paragraph(&self) -> Option<&'a Paragraph> {
        let index = self.paragraph_index()?;
        self.doc.paragraphs().get(index)
    }

    /// Check if this row is the first row of its paragraph.
    pub fn is_paragraph_beginning(&self) -> bool {
        match (self.row_index(), self.paragraph()) {
            (Some(row), Some(paragraph)) => paragraph.top_row_index == row,
            _ => false,
        }
    }

    /// Structural node that owns the current paragraph.
    pub fn node(&self) -> Option<&'a Node> {
        let parent = self.paragraph()?.parent?;
        self.doc.node(parent)
    }
}
