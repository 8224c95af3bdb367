//! Document model with a flattened row and paragraph view.
//!
//! A [`Document`] owns the semantic tree in arena storage and, after
//! [`Document::build_view`], a flattened view of it: the paragraphs that
//! carry text, their wrapped [`RowPart`]s with absolute row numbers, and the
//! dense sequence of [`Row`]s used for fixed-width rendering and navigation.
//!
//! Nodes are addressed by [`NodeId`]. A node's parent is stored as a handle
//! into the same arena, so the tree owns children and never the reverse.

use std::collections::HashMap;
use std::ops::Range;

use crate::config::ViewConfig;
use crate::error::{Error, Result};
use crate::raw::ControlSink;
use crate::structure::{NodeKind, Run, SemanticNode};
use crate::wrap::{RowPart, RowPartsBuilder};

/// Handle of a node in a document's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A node stored in the document arena.
#[derive(Debug, Clone)]
pub struct Node {
    kind: NodeKind,
    id: Option<String>,
    runs: Vec<Run>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    width: usize,
    height: usize,
    x: usize,
    y: usize,
}

impl Node {
    fn new(kind: NodeKind, id: Option<String>, runs: Vec<Run>) -> Self {
        Self {
            kind,
            id,
            runs,
            children: Vec::new(),
            parent: None,
            width: 0,
            height: 0,
            x: 0,
            y: 0,
        }
    }

    /// Structural type.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Explicit identifier from the source markup.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Inline runs (paragraphs only).
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Ordered children.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Parent handle, `None` for the root and detached nodes.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Available width in columns, as of the last view build.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in rows, as of the last view build.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Column of the node's left edge, as of the last view build.
    pub fn x(&self) -> usize {
        self.x
    }

    /// Row of the node's top edge, as of the last view build.
    pub fn y(&self) -> usize {
        self.y
    }

    fn is_empty_paragraph(&self) -> bool {
        self.runs.iter().all(|run| run.text().is_empty())
    }
}

/// A pending change to the tree, applied at the start of the next view build.
#[derive(Debug, Clone)]
pub enum StructuralEdit {
    /// Append a subtree as the last child of `parent`
    AppendChild {
        /// Receiving node
        parent: NodeId,
        /// Subtree to insert
        node: SemanticNode,
    },
    /// Detach a node and its subtree
    Remove(NodeId),
    /// Replace the runs of a paragraph
    SetRuns {
        /// Target paragraph
        paragraph: NodeId,
        /// New runs
        runs: Vec<Run>,
    },
}

/// A wrapped part placed at an absolute row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedPart {
    /// Index of the owning paragraph in [`Document::paragraphs`]
    pub paragraph: usize,
    /// Relative part produced by the wrapper
    pub part: RowPart,
    /// Absolute row number
    pub abs_row: usize,
}

/// A paragraph that appears in the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    /// Paragraph node
    pub node: NodeId,
    /// Parent of the paragraph node
    pub parent: Option<NodeId>,
    /// Range of this paragraph's parts in [`Document::row_parts`]
    pub parts: Range<usize>,
    /// Number of rows
    pub height: usize,
    /// Absolute row of the first row
    pub top_row_index: usize,
}

/// Parts sharing one absolute row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Index of the owning paragraph in [`Document::paragraphs`]
    pub paragraph: usize,
    /// Range of the row's parts in [`Document::row_parts`]
    pub parts: Range<usize>,
}

#[derive(Debug, Default)]
struct View {
    paragraphs: Vec<Paragraph>,
    row_parts: Vec<PlacedPart>,
    rows: Vec<Row>,
}

/// A semantic tree plus its flattened view.
///
/// # Examples
///
/// ```
/// use readflow::document::Document;
/// use readflow::structure::{NodeKind, SemanticNode};
///
/// let root = SemanticNode::new(NodeKind::Root).with_children(vec![
///     SemanticNode::text_paragraph("First paragraph"),
///     SemanticNode::text_paragraph("Second one"),
/// ]);
/// let mut doc = Document::with_title("Notes", root);
/// doc.build_view(10).unwrap();
///
/// assert_eq!(doc.rows().len(), 3);
/// assert_eq!(doc.line(0).as_deref(), Some("Notes"));
/// assert_eq!(doc.line(2).as_deref(), Some("paragraph"));
/// ```
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    title: String,
    config: ViewConfig,
    pending: Vec<StructuralEdit>,
    index: HashMap<String, NodeId>,
    view: View,
}

impl Document {
    /// Create an untitled document.
    pub fn new(root: SemanticNode) -> Self {
        Self::with_title("", root)
    }

    /// Create a document with a title.
    pub fn with_title(title: impl Into<String>, root: SemanticNode) -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            title: title.into(),
            config: ViewConfig::default(),
            pending: Vec::new(),
            index: HashMap::new(),
            view: View::default(),
        };
        doc.root = doc.insert(root, None);
        doc.make_index();
        doc
    }

    /// Set the view configuration used by subsequent builds.
    pub fn with_view_config(mut self, config: ViewConfig) -> Self {
        self.config = config;
        self
    }

    /// Document title, possibly empty.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Root handle.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node by handle.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Paragraphs of the current view, in document order.
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.view.paragraphs
    }

    /// Row parts of the current view, in row order.
    pub fn row_parts(&self) -> &[PlacedPart] {
        &self.view.row_parts
    }

    /// Rows of the current view.
    pub fn rows(&self) -> &[Row] {
        &self.view.rows
    }

    /// Queue a structural edit for the next view build.
    pub fn edit(&mut self, edit: StructuralEdit) {
        self.pending.push(edit);
    }

    /// Rebuild the flattened view for the given width.
    ///
    /// The previous view is discarded before any work starts. A tree without
    /// text yields an empty view, which is not an error.
    pub fn build_view(&mut self, width: usize) -> Result<()> {
        if width == 0 {
            return Err(Error::InvalidWidth(width));
        }
        self.view = View::default();
        log::debug!("building view for width={}", width);

        self.commit();
        self.remove_empty(self.root);
        self.calc_width(self.root, width);

        let mut order = Vec::new();
        self.collect_paragraphs(self.root, &mut order);
        let mut builder = RowPartsBuilder::new();
        let mut view = View::default();
        for node_id in order {
            let node = &self.nodes[node_id.0];
            let parts = builder.paragraph(&node.runs, node.width.max(1));
            if parts.is_empty() {
                continue;
            }
            let height = parts.iter().map(|p| p.row + 1).max().unwrap_or(0);
            let paragraph = view.paragraphs.len();
            let start = view.row_parts.len();
            view.row_parts.extend(parts.into_iter().map(|part| PlacedPart {
                paragraph,
                part,
                abs_row: 0,
            }));
            view.paragraphs.push(Paragraph {
                node: node_id,
                parent: node.parent,
                parts: start..view.row_parts.len(),
                height,
                top_row_index: 0,
            });
            self.nodes[node_id.0].height = height;
        }
        log::debug!("{} row parts prepared", view.row_parts.len());
        if view.row_parts.is_empty() {
            return Ok(());
        }
        log::debug!("{} paragraphs prepared", view.paragraphs.len());

        self.calc_height(self.root);
        calc_abs_row_nums(&mut view);
        self.calc_position(self.root, 0, 0);
        view.rows = build_rows(&view);
        log::debug!("{} rows prepared", view.rows.len());

        self.view = view;
        Ok(())
    }

    /// Check that every paragraph in the view has a parent.
    ///
    /// Logs each offending paragraph and returns `false` if any is found.
    pub fn check_consistency(&self, stop_immediately: bool) -> bool {
        let mut ok = true;
        for paragraph in &self.view.paragraphs {
            if paragraph.parent.is_none() {
                log::warn!("paragraph {:?} has no parent node", paragraph.node);
                if stop_immediately {
                    return false;
                }
                ok = false;
            }
        }
        ok
    }

    /// Rebuild the id index from a full tree walk.
    ///
    /// Duplicate ids resolve to the node visited last.
    pub fn make_index(&mut self) {
        let mut index = HashMap::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            if let Some(name) = &node.id {
                index.insert(name.clone(), id);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        self.index = index;
    }

    /// Find a node by explicit id, using the index as of the last
    /// [`Document::make_index`].
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.index.get(id).copied()
    }

    /// Number of rendered lines: the title line, if any, then one per row.
    pub fn line_count(&self) -> usize {
        self.title_lines() + self.view.rows.len()
    }

    /// Text of a rendered line, indented by its paragraph's column.
    pub fn line(&self, index: usize) -> Option<String> {
        let title_lines = self.title_lines();
        if index < title_lines {
            return Some(self.title.clone());
        }
        let row = self.view.rows.get(index - title_lines)?;
        let paragraph = &self.view.paragraphs[row.paragraph];
        let indent = self.nodes[paragraph.node.0].x;
        let mut line = " ".repeat(indent);
        line.push_str(&self.row_text(index - title_lines)?);
        Some(line)
    }

    /// Text of a row without indentation.
    pub fn row_text(&self, row: usize) -> Option<String> {
        let row = self.view.rows.get(row)?;
        let paragraph = &self.view.paragraphs[row.paragraph];
        let runs = &self.nodes[paragraph.node.0].runs;
        let mut text = String::new();
        for placed in &self.view.row_parts[row.parts.clone()] {
            if let Some(run) = runs.get(placed.part.run) {
                text.push_str(&placed.part.slice(run.text()));
            }
        }
        Some(text)
    }

    /// Replace the text of an edit run and write it back to its control.
    ///
    /// The view keeps its old wrapping until the next [`Document::build_view`].
    pub fn set_edit_text<S: ControlSink>(
        &mut self,
        paragraph: NodeId,
        run: usize,
        text: &str,
        sink: &mut S,
    ) -> Result<()> {
        let node = self
            .nodes
            .get_mut(paragraph.0)
            .ok_or_else(|| Error::InvalidArgument(format!("unknown node {:?}", paragraph)))?;
        let target = node
            .runs
            .get_mut(run)
            .ok_or_else(|| Error::InvalidArgument(format!("no run {} in {:?}", run, paragraph)))?;
        let control = match target {
            Run::Edit { control, text: current } => {
                *current = text.to_string();
                *control
            },
            _ => {
                return Err(Error::InvalidArgument(format!(
                    "run {} in {:?} is not an edit field",
                    run, paragraph
                )))
            },
        };
        if let Some(handle) = control {
            if !sink.set_control_text(handle, text) {
                log::warn!("control {:?} did not accept new text", handle);
            }
        }
        Ok(())
    }

    fn title_lines(&self) -> usize {
        usize::from(!self.title.is_empty())
    }

    fn insert(&mut self, node: SemanticNode, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        let mut data = Node::new(node.kind, node.id, node.runs);
        data.parent = parent;
        self.nodes.push(data);
        for child in node.children {
            let child_id = self.insert(child, Some(id));
            self.nodes[id.0].children.push(child_id);
        }
        id
    }

    fn commit(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let edits = std::mem::take(&mut self.pending);
        let count = edits.len();
        for edit in edits {
            if let Err(e) = self.apply(edit) {
                log::warn!("dropping structural edit: {}", e);
            }
        }
        // ids may have moved; callers rebuild with make_index
        self.index.clear();
        log::debug!("{} structural edits committed", count);
    }

    fn apply(&mut self, edit: StructuralEdit) -> Result<()> {
        match edit {
            StructuralEdit::AppendChild { parent, node } => {
                let kind = self.attached(parent)?.kind;
                if kind == NodeKind::Paragraph {
                    return Err(Error::InvalidArgument(format!(
                        "cannot append to paragraph {:?}",
                        parent
                    )));
                }
                let child = self.insert(node, Some(parent));
                self.nodes[parent.0].children.push(child);
            },
            StructuralEdit::Remove(id) => {
                self.attached(id)?;
                let parent = self.nodes[id.0]
                    .parent
                    .ok_or_else(|| Error::InvalidArgument("cannot remove the root".to_string()))?;
                self.nodes[parent.0].children.retain(|&c| c != id);
                self.nodes[id.0].parent = None;
            },
            StructuralEdit::SetRuns { paragraph, runs } => {
                let node = self.attached(paragraph)?;
                if node.kind != NodeKind::Paragraph {
                    return Err(Error::InvalidArgument(format!(
                        "{:?} is a {}, not a paragraph",
                        paragraph,
                        node.kind.name()
                    )));
                }
                self.nodes[paragraph.0].runs = runs;
            },
        }
        Ok(())
    }

    fn attached(&self, id: NodeId) -> Result<&Node> {
        let mut current = id;
        loop {
            let node = self
                .nodes
                .get(current.0)
                .ok_or_else(|| Error::InvalidArgument(format!("unknown node {:?}", id)))?;
            match node.parent {
                Some(parent) => current = parent,
                None if current == self.root => return Ok(&self.nodes[id.0]),
                None => return Err(Error::InvalidArgument(format!("node {:?} is detached", id))),
            }
        }
    }

    /// Drop empty descendants bottom-up and report whether `id` is empty.
    fn remove_empty(&mut self, id: NodeId) -> bool {
        if self.nodes[id.0].kind == NodeKind::Paragraph {
            return self.nodes[id.0].is_empty_paragraph();
        }
        let children = self.nodes[id.0].children.clone();
        let mut kept = Vec::with_capacity(children.len());
        for child in children {
            if self.remove_empty(child) {
                self.nodes[child.0].parent = None;
            } else {
                kept.push(child);
            }
        }
        let empty = kept.is_empty();
        self.nodes[id.0].children = kept;
        empty
    }

    fn calc_width(&mut self, id: NodeId, width: usize) {
        let node = &mut self.nodes[id.0];
        node.width = width;
        let child_width = if node.kind == NodeKind::ListItem {
            width.saturating_sub(self.config.list_indent).max(1)
        } else {
            width
        };
        for child in node.children.clone() {
            self.calc_width(child, child_width);
        }
    }

    fn collect_paragraphs(&self, id: NodeId, out: &mut Vec<NodeId>) {
        let node = &self.nodes[id.0];
        if node.kind == NodeKind::Paragraph {
            out.push(id);
        }
        for &child in &node.children {
            self.collect_paragraphs(child, out);
        }
    }

    fn calc_height(&mut self, id: NodeId) -> usize {
        if self.nodes[id.0].kind == NodeKind::Paragraph {
            return self.nodes[id.0].height;
        }
        let mut height = 0;
        for child in self.nodes[id.0].children.clone() {
            height += self.calc_height(child);
        }
        self.nodes[id.0].height = height;
        height
    }

    fn calc_position(&mut self, id: NodeId, x: usize, y: usize) {
        let node = &mut self.nodes[id.0];
        node.x = x;
        node.y = y;
        let child_x = if node.kind == NodeKind::ListItem {
            x + self.config.list_indent
        } else {
            x
        };
        let mut child_y = y;
        for child in node.children.clone() {
            self.calc_position(child, child_x, child_y);
            child_y += self.nodes[child.0].height;
        }
    }
}

fn calc_abs_row_nums(view: &mut View) {
    let mut current_top = 0;
    for paragraph in view.paragraphs.iter_mut() {
        paragraph.top_row_index = current_top;
        for placed in &mut view.row_parts[paragraph.parts.clone()] {
            placed.abs_row = placed.part.row + current_top;
        }
        current_top += paragraph.height;
    }
}

fn build_rows(view: &View) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut start = 0;
    for paragraph_index in 0..view.paragraphs.len() {
        let paragraph = &view.paragraphs[paragraph_index];
        for abs in paragraph.top_row_index..paragraph.top_row_index + paragraph.height {
            let mut end = start;
            while end < paragraph.parts.end && view.row_parts[end].abs_row == abs {
                end += 1;
            }
            rows.push(Row {
                paragraph: paragraph_index,
                parts: start..end,
            });
            start = end;
        }
    }
    rows
}
