//! Greedy word wrapping of paragraph runs into rows.
//!
//! The wrapper places runs left to right into rows of a fixed width. For each
//! run it emits [`RowPart`]s, half-open character ranges tagged with the
//! relative row they land on:
//!
//! - a remainder that fits goes onto the open row whole;
//! - otherwise the furthest word end that still fits closes the row, and the
//!   whitespace right after the cut is skipped;
//! - a word that does not fit on a partly filled row moves to a fresh row;
//! - a word longer than the whole row is hard-split at exactly `width`.
//!
//! Nothing is dropped: joining the parts of a paragraph in order, with one
//! space wherever a break swallowed whitespace and nothing at hard splits,
//! reproduces the run text up to line-break whitespace.
//!
//! All positions are `char` offsets.

use crate::error::{Error, Result};
use crate::structure::Run;

/// A row-bounded slice of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowPart {
    /// Index of the run within its paragraph
    pub run: usize,
    /// Row index relative to the start of the paragraph
    pub row: usize,
    /// First character (inclusive)
    pub from: usize,
    /// Last character (exclusive)
    pub to: usize,
}

impl RowPart {
    /// Number of characters in this part.
    pub fn len(&self) -> usize {
        self.to - self.from
    }

    /// Check if the part is empty. The wrapper never emits empty parts.
    pub fn is_empty(&self) -> bool {
        self.to == self.from
    }

    /// Slice of `text` covered by this part.
    pub fn slice(&self, text: &str) -> String {
        text.chars().skip(self.from).take(self.to - self.from).collect()
    }
}

/// Incremental row part builder.
///
/// `offset` is the number of characters already on the open row and `index`
/// the open row; both reset at the start of every paragraph.
#[derive(Debug, Default)]
pub struct RowPartsBuilder {
    parts: Vec<RowPart>,
    index: usize,
    offset: usize,
}

impl RowPartsBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap one paragraph and return its parts.
    ///
    /// `width` must be at least 1; callers validate it.
    pub fn paragraph(&mut self, runs: &[Run], width: usize) -> Vec<RowPart> {
        debug_assert!(width > 0);
        self.parts.clear();
        self.index = 0;
        self.offset = 0;
        for (run_index, run) in runs.iter().enumerate() {
            let text: Vec<char> = run.text().chars().collect();
            self.on_run(run_index, &text, width);
        }
        std::mem::take(&mut self.parts)
    }

    fn on_run(&mut self, run: usize, text: &[char], max_row_len: usize) {
        let mut pos_from = 0;
        while pos_from < text.len() {
            if max_row_len <= self.offset {
                // row is full, retry on the next one
                self.index += 1;
                self.offset = 0;
                continue;
            }
            let available = max_row_len - self.offset;
            let remains = text.len() - pos_from;
            if remains <= available {
                self.push(run, pos_from, text.len());
                self.offset += remains;
                pos_from = text.len();
                continue;
            }

            let mut pos_to = pos_from;
            let mut next_word_end = pos_to;
            while next_word_end - pos_from <= available {
                pos_to = next_word_end;
                while next_word_end < text.len() && text[next_word_end].is_whitespace() {
                    next_word_end += 1;
                }
                while next_word_end < text.len() && !text[next_word_end].is_whitespace() {
                    next_word_end += 1;
                }
            }

            if pos_to == pos_from {
                if self.offset > 0 {
                    // give the word a whole row before splitting it
                    self.offset = 0;
                    self.index += 1;
                    continue;
                }
                pos_to = pos_from + available;
            }
            self.push(run, pos_from, pos_to);
            self.index += 1;
            self.offset = 0;
            pos_from = pos_to;

            let roll_back = pos_from;
            while pos_from < text.len() && text[pos_from].is_whitespace() {
                pos_from += 1;
            }
            if pos_from >= text.len() {
                pos_from = roll_back;
            }
        }
    }

    fn push(&mut self, run: usize, from: usize, to: usize) {
        if from == to {
            log::warn!("empty row part at {} in run {}", from, run);
        }
        self.parts.push(RowPart {
            run,
            row: self.index,
            from,
            to,
        });
    }
}

/// Wrap a paragraph's runs into row parts of at most `width` characters.
///
/// # Examples
///
/// ```
/// use readflow::structure::Run;
/// use readflow::wrap::wrap_runs;
///
/// let parts = wrap_runs(&[Run::text_run("one two three")], 8).unwrap();
/// let rows: Vec<usize> = parts.iter().map(|p| p.row).collect();
/// assert_eq!(rows, vec![0, 1]);
/// assert_eq!((parts[0].from, parts[0].to), (0, 7));
/// assert_eq!((parts[1].from, parts[1].to), (8, 13));
/// ```
pub fn wrap_runs(runs: &[Run], width: usize) -> Result<Vec<RowPart>> {
    if width == 0 {
        return Err(Error::InvalidWidth(width));
    }
    Ok(RowPartsBuilder::new().paragraph(runs, width))
}

/// Render parts into row strings, one per relative row.
///
/// Rows that received no parts come out empty.
pub fn render_rows(runs: &[Run], parts: &[RowPart]) -> Vec<String> {
    let row_count = parts.iter().map(|p| p.row + 1).max().unwrap_or(0);
    let mut rows = vec![String::new(); row_count];
    for part in parts {
        rows[part.row].push_str(&part.slice(runs[part.run].text()));
    }
    rows
}

/// Wrap a standalone paragraph and return its lines.
///
/// # Examples
///
/// ```
/// use readflow::structure::Run;
/// use readflow::wrap::paragraph_to_lines;
///
/// let lines = paragraph_to_lines(&[Run::text_run("Hello brave new world")], 11).unwrap();
/// assert_eq!(lines, vec!["Hello brave", "new world"]);
/// ```
pub fn paragraph_to_lines(runs: &[Run], width: usize) -> Result<Vec<String>> {
    let parts = wrap_runs(runs, width)?;
    Ok(render_rows(runs, &parts))
}
