//! Positioned containers and their text rows.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::raw::ControlHandle;

/// Content of a container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentItem {
    /// Text fragment
    Text {
        /// Text
        text: String,
        /// Pixel geometry
        rect: Option<Rect>,
    },
    /// Single-line text field
    TextInput {
        /// Current value
        text: String,
        /// Pixel geometry
        rect: Option<Rect>,
        /// Width in text columns, must be positive
        width: usize,
        /// Backing control
        #[serde(default)]
        handle: Option<ControlHandle>,
    },
    /// Nested structural element; always starts and ends a row
    Block {
        /// Tag classifier
        tag: String,
        /// Pixel geometry
        rect: Option<Rect>,
        /// Nested items
        #[serde(default)]
        children: Vec<ContentItem>,
    },
}

impl ContentItem {
    /// Create a text item.
    pub fn text(text: &str, rect: Rect) -> Self {
        ContentItem::Text {
            text: text.to_string(),
            rect: Some(rect),
        }
    }

    /// Create a text input item.
    pub fn text_input(text: &str, rect: Rect, width: usize) -> Self {
        ContentItem::TextInput {
            text: text.to_string(),
            rect: Some(rect),
            width,
            handle: None,
        }
    }

    /// Create a block item.
    pub fn block(tag: &str, children: Vec<ContentItem>) -> Self {
        ContentItem::Block {
            tag: tag.to_string(),
            rect: None,
            children,
        }
    }

    /// Pixel geometry of the item.
    pub fn rect(&self) -> Option<Rect> {
        match self {
            ContentItem::Text { rect, .. }
            | ContentItem::TextInput { rect, .. }
            | ContentItem::Block { rect, .. } => *rect,
        }
    }
}

/// One item placed on a container row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowItem {
    /// Text fragment
    Text(String),
    /// Text field occupying a fixed number of columns
    TextInput {
        /// Current value
        text: String,
        /// Width in columns
        width: usize,
        /// Backing control
        handle: Option<ControlHandle>,
    },
}

impl RowItem {
    /// Text of the item.
    pub fn text(&self) -> &str {
        match self {
            RowItem::Text(text) => text,
            RowItem::TextInput { text, .. } => text,
        }
    }

    /// Rendered form: text as is, inputs fitted to their width.
    pub fn render(&self) -> String {
        match self {
            RowItem::Text(text) => text.clone(),
            RowItem::TextInput { text, width, .. } => {
                let mut rendered: String = text.chars().take(*width).collect();
                let len = rendered.chars().count();
                rendered.extend(std::iter::repeat(' ').take(width - len));
                rendered
            },
        }
    }
}

/// A row of items inside a container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerRow {
    /// Items in reading order
    pub items: Vec<RowItem>,
}

impl ContainerRow {
    /// Rendered row, items separated by single spaces.
    pub fn text(&self) -> String {
        self.items.iter().map(RowItem::render).collect::<Vec<_>>().join(" ")
    }
}

/// An absolutely positioned block of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    /// Tag classifier of the source element
    pub tag: String,
    /// Pixel rectangle
    pub rect: Rect,
    /// Content items
    #[serde(default)]
    pub content: Vec<ContentItem>,
    /// Rows built from the content
    #[serde(skip)]
    pub rows: Vec<ContainerRow>,
    /// Left column in text space
    #[serde(skip)]
    pub text_x: usize,
    /// Width in text columns
    #[serde(skip)]
    pub text_width: usize,
    /// Assigned line number
    #[serde(skip)]
    pub text_y: Option<usize>,
    /// Indices of containers on earlier lines this one is stacked under
    #[serde(skip)]
    pub vert_dep_on: Vec<usize>,
}

impl Container {
    /// Create a container that has not been linearized yet.
    pub fn new(tag: &str, rect: Rect, content: Vec<ContentItem>) -> Self {
        Self {
            tag: tag.to_string(),
            rect,
            content,
            rows: Vec::new(),
            text_x: 0,
            text_width: 0,
            text_y: None,
            vert_dep_on: Vec::new(),
        }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Assigned line number, or 0 before linearization.
    pub fn line(&self) -> usize {
        self.text_y.unwrap_or(0)
    }

    /// Check if two containers overlap once rendered as text.
    ///
    /// Every line number is rendered below all rows of the previous one, so
    /// only containers sharing a line can collide; they do when their column
    /// spans intersect.
    pub fn intersects_text(&self, other: &Container) -> bool {
        self.text_y.is_some()
            && self.text_y == other.text_y
            && self.row_count() > 0
            && other.row_count() > 0
            && spans_intersect(self.text_x, self.text_width, other.text_x, other.text_width)
    }

    /// Check if the pixel rectangles of two containers intersect.
    pub fn intersects_graphically(&self, other: &Container) -> bool {
        self.rect.intersects(&other.rect)
    }

    /// Rebuild `rows` from `content`.
    pub(crate) fn build_rows(&mut self) -> Result<()> {
        let mut builder = RowsBuilder::default();
        for item in &self.content {
            builder.process(item)?;
        }
        builder.commit_row();
        self.rows = builder.rows;
        Ok(())
    }
}

/// Check if `[a, a + a_len)` and `[b, b + b_len)` share a point.
pub fn spans_intersect(a: usize, a_len: usize, b: usize, b_len: usize) -> bool {
    a_len > 0 && b_len > 0 && a < b + b_len && b < a + a_len
}

/// Groups leaf items into rows by vertical overlap.
#[derive(Debug, Default)]
struct RowsBuilder {
    rows: Vec<ContainerRow>,
    items: Vec<RowItem>,
    prev_rect: Option<Rect>,
}

impl RowsBuilder {
    fn process(&mut self, item: &ContentItem) -> Result<()> {
        match item {
            ContentItem::Text { text, rect } => {
                self.on_leaf(RowItem::Text(text.clone()), *rect);
            },
            ContentItem::TextInput {
                text,
                rect,
                width,
                handle,
            } => {
                if *width == 0 {
                    return Err(Error::InvalidConfiguration(
                        "text input width must be greater than zero".to_string(),
                    ));
                }
                let input = RowItem::TextInput {
                    text: text.clone(),
                    width: *width,
                    handle: *handle,
                };
                self.on_leaf(input, *rect);
            },
            ContentItem::Block { children, .. } => {
                self.commit_row();
                for child in children {
                    self.process(child)?;
                }
                self.commit_row();
            },
        }
        Ok(())
    }

    fn on_leaf(&mut self, item: RowItem, rect: Option<Rect>) {
        let same_row = match (self.prev_rect, rect) {
            (Some(prev), Some(next)) => prev.overlaps_vertically(&next),
            _ => true,
        };
        if !same_row {
            self.commit_row();
        }
        self.items.push(item);
        self.prev_rect = rect;
    }

    fn commit_row(&mut self) {
        self.prev_rect = None;
        if self.items.is_empty() {
            return;
        }
        self.rows.push(ContainerRow {
            items: std::mem::take(&mut self.items),
        });
    }
}
