//! Types for the semantic document tree.
//!
//! A semantic tree has exactly one [`NodeKind::Root`]. Container nodes own
//! ordered children; paragraphs additionally own inline [`Run`]s.

use crate::raw::ControlHandle;

/// Structural type of a semantic node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Document root
    Root,
    /// Paragraph of inline runs
    Paragraph,
    /// Section created from a heading
    Section {
        /// Nesting level
        level: u32,
    },
    /// Numbered list
    OrderedList,
    /// Bulleted list
    UnorderedList,
    /// One entry of a list
    ListItem,
    /// Table
    Table,
    /// Table row
    TableRow,
    /// Table cell
    TableCell,
}

impl NodeKind {
    /// Get a short name for logs and debugging.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Section { .. } => "section",
            NodeKind::OrderedList => "ordered-list",
            NodeKind::UnorderedList => "unordered-list",
            NodeKind::ListItem => "list-item",
            NodeKind::Table => "table",
            NodeKind::TableRow => "table-row",
            NodeKind::TableCell => "table-cell",
        }
    }

    /// Check if this is a list node.
    pub fn is_list(&self) -> bool {
        matches!(self, NodeKind::OrderedList | NodeKind::UnorderedList)
    }
}

/// Atomic inline content of a paragraph.
///
/// Runs carry no geometry once the tree is built.
#[derive(Debug, Clone, PartialEq)]
pub enum Run {
    /// Plain text
    Text(String),
    /// Single-line editable field
    Edit {
        /// Backing control in the provider
        control: Option<ControlHandle>,
        /// Current text of the field
        text: String,
    },
    /// Submit button
    Button {
        /// Backing control in the provider
        control: Option<ControlHandle>,
        /// Button label
        text: String,
    },
}

impl Run {
    /// Create a text run.
    pub fn text_run(text: impl Into<String>) -> Self {
        Run::Text(text.into())
    }

    /// Get the text this run contributes to its paragraph.
    pub fn text(&self) -> &str {
        match self {
            Run::Text(text) => text,
            Run::Edit { text, .. } => text,
            Run::Button { text, .. } => text,
        }
    }

    /// Get the backing control, if this run has one.
    pub fn control(&self) -> Option<ControlHandle> {
        match self {
            Run::Text(_) => None,
            Run::Edit { control, .. } | Run::Button { control, .. } => *control,
        }
    }

    /// Check if this run is an editable field.
    pub fn is_edit(&self) -> bool {
        matches!(self, Run::Edit { .. })
    }
}

/// A node of the owned semantic tree produced by the builder.
///
/// [`crate::document::Document`] moves this tree into arena storage.
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticNode {
    /// Structural type
    pub kind: NodeKind,
    /// Explicit identifier from the source markup
    pub id: Option<String>,
    /// Ordered children
    pub children: Vec<SemanticNode>,
    /// Inline runs (paragraphs only)
    pub runs: Vec<Run>,
}

impl SemanticNode {
    /// Create a node without children.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            id: None,
            children: Vec::new(),
            runs: Vec::new(),
        }
    }

    /// Create a paragraph with the given runs.
    pub fn paragraph(runs: Vec<Run>) -> Self {
        Self {
            runs,
            ..Self::new(NodeKind::Paragraph)
        }
    }

    /// Create a paragraph holding a single text run.
    pub fn text_paragraph(text: &str) -> Self {
        Self::paragraph(vec![Run::text_run(text)])
    }

    /// Set the children.
    pub fn with_children(mut self, children: Vec<SemanticNode>) -> Self {
        self.children = children;
        self
    }

    /// Set the explicit identifier.
    pub fn with_id(mut self, id: Option<String>) -> Self {
        self.id = id;
        self
    }

    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(Run::text).collect()
    }

    /// Collect all paragraphs in document order.
    pub fn paragraphs(&self) -> Vec<&SemanticNode> {
        let mut result = Vec::new();
        self.collect_paragraphs(&mut result);
        result
    }

    fn collect_paragraphs<'a>(&'a self, result: &mut Vec<&'a SemanticNode>) {
        if self.kind == NodeKind::Paragraph {
            result.push(self);
        }
        for child in &self.children {
            child.collect_paragraphs(result);
        }
    }
}
