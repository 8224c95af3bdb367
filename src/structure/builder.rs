//! Semantic tree builder.
//!
//! Copies a provider tree into prenodes, cleans it to a fixed point, then
//! compiles it into a [`SemanticNode`] tree. Compilation dispatches on a
//! closed set of build strategies chosen from the tag:
//!
//! - lists (`ol`, `ul`): every child becomes a list item,
//! - headings (`h1`..`h9`): wrapped in a section of fixed level,
//! - tables (`table`, `tbody`): rows of cells, with colspan emulation,
//! - blocks (`div`, `body` and unrecognized tags): children spliced inline,
//! - leaves: text, form controls, or a visible placeholder.
//!
//! Consecutive leaves are grouped into one paragraph while their rectangles
//! overlap vertically; a block child always closes the open paragraph.

use super::cleaning;
use super::prenode::Prenode;
use super::types::{NodeKind, Run, SemanticNode};
use crate::config::BuilderConfig;
use crate::document::Document;
use crate::geometry::Rect;
use crate::raw::{RawNode, TEXT_TAG};

/// Build strategy selected for a prenode with children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BuildStrategy {
    /// `ol` / `ul`
    List(NodeKind),
    /// `h1`..`h9`
    Heading,
    /// `table` / `tbody`
    Table,
    /// `div` / `body`, and list items and cells holding several children
    Block,
    /// Any other tag with children
    UnknownBlock,
    /// Form controls are leaves even when they have children
    Leaf,
}

impl BuildStrategy {
    fn classify(tag: &str) -> Self {
        match tag {
            "ol" => BuildStrategy::List(NodeKind::OrderedList),
            "ul" => BuildStrategy::List(NodeKind::UnorderedList),
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "h7" | "h8" | "h9" => BuildStrategy::Heading,
            "table" | "tbody" => BuildStrategy::Table,
            "div" | "body" | "li" | "td" | "th" => BuildStrategy::Block,
            "input" | "select" | "button" | "textarea" => BuildStrategy::Leaf,
            _ => BuildStrategy::UnknownBlock,
        }
    }
}

/// Result of compiling one prenode: a block node or an inline run.
enum Item {
    Node(SemanticNode),
    Leaf { run: Run, rect: Option<Rect> },
}

/// Builds semantic trees from raw provider trees.
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    config: BuilderConfig,
}

impl DocumentBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with custom settings.
    pub fn with_config(config: BuilderConfig) -> Self {
        Self { config }
    }

    /// Clean and compile a raw tree into a semantic tree rooted at [`NodeKind::Root`].
    ///
    /// Never fails: unknown tags and malformed attributes are logged and
    /// recovered locally.
    ///
    /// # Examples
    ///
    /// ```
    /// use readflow::raw::RawElement;
    /// use readflow::structure::{DocumentBuilder, NodeKind};
    ///
    /// let raw = RawElement::element("body", vec![
    ///     RawElement::element("ul", vec![
    ///         RawElement::element("li", vec![RawElement::text("first")]),
    ///         RawElement::element("li", vec![RawElement::text("second")]),
    ///     ]),
    /// ]);
    /// let root = DocumentBuilder::new().build(&raw);
    /// assert_eq!(root.kind, NodeKind::Root);
    /// assert_eq!(root.paragraphs().len(), 2);
    /// ```
    pub fn build<N: RawNode>(&self, raw_root: &N) -> SemanticNode {
        let mut prenodes = Prenode::from_raw(raw_root);
        cleaning::clean(&mut prenodes);
        let root = SemanticNode::new(NodeKind::Root);
        if prenodes.children.is_empty() && cleaning::is_empty_leaf(&prenodes) {
            log::debug!("raw tree has no content");
            return root;
        }
        root.with_children(self.make_nodes(&prenodes))
    }

    /// Build a titled [`Document`] from a raw tree.
    pub fn build_document<N: RawNode>(&self, raw_root: &N, title: &str) -> Document {
        Document::with_title(title, self.build(raw_root))
    }

    fn make_nodes<N: RawNode>(&self, prenode: &Prenode<'_, N>) -> Vec<SemanticNode> {
        log::trace!("make_nodes({})", prenode.tag);
        let mut result = Vec::new();
        let mut runs = Vec::new();
        let mut last_rect: Option<Option<Rect>> = None;
        for item in self.make_items(prenode) {
            match item {
                Item::Node(node) => {
                    result.push(SemanticNode::paragraph(std::mem::take(&mut runs)));
                    result.push(node);
                },
                Item::Leaf { run, rect } => {
                    if let Some(prev) = last_rect {
                        if !same_line(prev, rect) {
                            result.push(SemanticNode::paragraph(std::mem::take(&mut runs)));
                        }
                    }
                    runs.push(run);
                    last_rect = Some(rect);
                },
            }
        }
        result.push(SemanticNode::paragraph(runs));
        result
    }

    fn make_items<N: RawNode>(&self, prenode: &Prenode<'_, N>) -> Vec<Item> {
        if prenode.children.is_empty() {
            return vec![self.make_leaf(prenode)];
        }
        match BuildStrategy::classify(&prenode.tag) {
            BuildStrategy::List(kind) => {
                let items = prenode
                    .children
                    .iter()
                    .map(|child| {
                        SemanticNode::new(NodeKind::ListItem).with_children(self.make_nodes(child))
                    })
                    .collect();
                vec![Item::Node(
                    SemanticNode::new(kind)
                        .with_children(items)
                        .with_id(element_id(prenode)),
                )]
            },
            BuildStrategy::Heading => {
                log::debug!("heading {}", prenode.tag);
                let subnodes = prenode
                    .children
                    .iter()
                    .flat_map(|child| self.make_nodes(child))
                    .collect();
                let section = NodeKind::Section {
                    level: self.config.section_level,
                };
                vec![Item::Node(
                    SemanticNode::new(section)
                        .with_children(subnodes)
                        .with_id(element_id(prenode)),
                )]
            },
            BuildStrategy::Table => vec![Item::Node(self.make_table(prenode))],
            BuildStrategy::Leaf => vec![self.make_leaf(prenode)],
            BuildStrategy::Block => self.splice_children(prenode),
            BuildStrategy::UnknownBlock => {
                log::warn!("unknown block tag: {}", prenode.tag);
                self.splice_children(prenode)
            },
        }
    }

    fn splice_children<N: RawNode>(&self, prenode: &Prenode<'_, N>) -> Vec<Item> {
        prenode
            .children
            .iter()
            .flat_map(|child| self.make_items(child))
            .collect()
    }

    /// Every child of a table is a row; `thead`/`tbody`/`tfoot` groupings are
    /// unwrapped to their first child and skipped when empty. Row lengths are
    /// not balanced.
    fn make_table<N: RawNode>(&self, table: &Prenode<'_, N>) -> SemanticNode {
        let mut rows = Vec::new();
        for row_pre in &table.children {
            let row_src = match row_pre.tag.as_str() {
                "thead" | "tbody" | "tfoot" => match row_pre.children.first() {
                    Some(first) => first,
                    None => {
                        log::debug!("skipping empty {} in table", row_pre.tag);
                        continue;
                    },
                },
                _ => row_pre,
            };

            let mut cells = Vec::new();
            for cell_pre in &row_src.children {
                let colspan = match cell_pre.tag.as_str() {
                    "td" | "th" => cell_pre.attribute("colspan").and_then(parse_span),
                    _ => None,
                };
                let content = if cell_pre.children.is_empty() && !cell_pre.is_text() {
                    vec![SemanticNode::text_paragraph(cell_pre.text())]
                } else {
                    self.make_nodes(cell_pre)
                };
                cells.push(
                    SemanticNode::new(NodeKind::TableCell)
                        .with_children(content)
                        .with_id(element_id(cell_pre)),
                );
                // colspan=N adds N empty cells after the real one
                for _ in 0..colspan.unwrap_or(0) {
                    cells.push(empty_cell());
                }
            }
            rows.push(SemanticNode::new(NodeKind::TableRow).with_children(cells));
        }
        SemanticNode::new(NodeKind::Table)
            .with_children(rows)
            .with_id(element_id(table))
    }

    fn make_leaf<N: RawNode>(&self, prenode: &Prenode<'_, N>) -> Item {
        let rect = prenode.rect();
        let run = match prenode.tag.as_str() {
            // whitespace that survived cleaning separates inline siblings
            TEXT_TAG if prenode.text().trim().is_empty() => Run::text_run(" "),
            TEXT_TAG => Run::Text(prenode.text().to_string()),
            "input" => make_input_run(prenode),
            "textarea" => Run::Edit {
                control: prenode.control_handle(),
                text: control_text(prenode),
            },
            "button" => Run::Button {
                control: prenode.control_handle(),
                text: control_text(prenode),
            },
            tag => {
                log::warn!("unknown leaf tag: {}", tag);
                let label = if tag == "select" {
                    "unknown input tag"
                } else {
                    "unknown tag"
                };
                Run::Text(format!("[{}: {}: {}]", label, tag, prenode.deep_text()))
            },
        };
        Item::Leaf { run, rect }
    }
}

fn make_input_run<N: RawNode>(prenode: &Prenode<'_, N>) -> Run {
    let control = prenode.control_handle();
    let input_type = prenode.attribute("type").map(str::trim).unwrap_or("");
    match input_type {
        "" | "text" => Run::Edit {
            control,
            text: control_text(prenode),
        },
        "submit" => Run::Button {
            control,
            text: control_text(prenode),
        },
        other => {
            log::warn!("unknown input type: {}", other);
            Run::Text(format!("[unknown input: {}: {}]", other, prenode.text()))
        },
    }
}

/// Current text of a control: its own text, then its descendants', then its `value`.
fn control_text<N: RawNode>(prenode: &Prenode<'_, N>) -> String {
    let text = prenode.deep_text();
    if !text.is_empty() {
        return text;
    }
    prenode.attribute("value").unwrap_or("").to_string()
}

fn element_id<N: RawNode>(prenode: &Prenode<'_, N>) -> Option<String> {
    prenode.attribute("id").map(str::to_string)
}

/// Parse a declared span count; anything but a non-negative integer is ignored.
fn parse_span(value: &str) -> Option<usize> {
    match value.parse::<usize>() {
        Ok(span) => Some(span),
        Err(_) => {
            log::debug!("ignoring unparseable span value {:?}", value);
            None
        },
    }
}

fn empty_cell() -> SemanticNode {
    SemanticNode::new(NodeKind::TableCell).with_children(vec![SemanticNode::text_paragraph("")])
}

/// Missing geometry on either side continues the paragraph.
fn same_line(prev: Option<Rect>, cur: Option<Rect>) -> bool {
    match (prev, cur) {
        (Some(prev), Some(cur)) => prev.overlaps_vertically(&cur),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::{ControlHandle, RawElement};

    fn line(text: &str, y: f32) -> RawElement {
        RawElement::text(text).with_rect(Rect::new(0.0, y, 100.0, 10.0))
    }

    fn non_empty_paragraphs(root: &SemanticNode) -> Vec<String> {
        root.paragraphs()
            .iter()
            .map(|p| p.text())
            .filter(|t| !t.is_empty())
            .collect()
    }

    #[test]
    fn test_classify() {
        assert_eq!(
            BuildStrategy::classify("ol"),
            BuildStrategy::List(NodeKind::OrderedList)
        );
        assert_eq!(BuildStrategy::classify("h7"), BuildStrategy::Heading);
        assert_eq!(BuildStrategy::classify("tbody"), BuildStrategy::Table);
        assert_eq!(BuildStrategy::classify("div"), BuildStrategy::Block);
        assert_eq!(BuildStrategy::classify("article"), BuildStrategy::UnknownBlock);
        assert_eq!(BuildStrategy::classify("button"), BuildStrategy::Leaf);
    }

    #[test]
    fn test_overlapping_leaves_share_paragraph() {
        let raw = RawElement::element(
            "body",
            vec![
                RawElement::text("Hello ").with_rect(Rect::new(0.0, 0.0, 40.0, 10.0)),
                RawElement::text("world").with_rect(Rect::new(40.0, 2.0, 40.0, 10.0)),
                line("Next line", 20.0),
            ],
        );
        let root = DocumentBuilder::new().build(&raw);
        assert_eq!(non_empty_paragraphs(&root), vec!["Hello world", "Next line"]);
    }

    #[test]
    fn test_missing_geometry_continues_paragraph() {
        let raw = RawElement::element(
            "body",
            vec![RawElement::text("a "), line("b", 500.0), RawElement::text(" c")],
        );
        let root = DocumentBuilder::new().build(&raw);
        assert_eq!(non_empty_paragraphs(&root), vec!["a b c"]);
    }

    #[test]
    fn test_block_child_closes_paragraph() {
        let raw = RawElement::element(
            "body",
            vec![
                RawElement::text("before"),
                RawElement::element("ul", vec![RawElement::element("li", vec![RawElement::text("item")])]),
                RawElement::text("after"),
            ],
        );
        let root = DocumentBuilder::new().build(&raw);
        let kinds: Vec<NodeKind> = root.children.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![NodeKind::Paragraph, NodeKind::UnorderedList, NodeKind::Paragraph]
        );
        assert_eq!(root.children[0].text(), "before");
        assert_eq!(root.children[2].text(), "after");
    }

    #[test]
    fn test_leading_block_emits_empty_paragraph() {
        let raw = RawElement::element(
            "body",
            vec![
                RawElement::element("h1", vec![RawElement::text("Title")]),
                RawElement::text("body text"),
            ],
        );
        let root = DocumentBuilder::new().build(&raw);
        assert_eq!(root.children[0].kind, NodeKind::Paragraph);
        assert!(root.children[0].runs.is_empty());
        assert_eq!(root.children[1].kind, NodeKind::Section { level: 1 });
    }

    #[test]
    fn test_heading_uses_fixed_section_level() {
        let raw = RawElement::element(
            "body",
            vec![RawElement::element("h3", vec![RawElement::text("Deep heading")]).with_attr("id", "h")],
        );
        let root = DocumentBuilder::with_config(BuilderConfig::default().with_section_level(2)).build(&raw);
        let section = &root.children[1];
        assert_eq!(section.kind, NodeKind::Section { level: 2 });
        assert_eq!(section.id.as_deref(), Some("h"));
        assert_eq!(section.paragraphs()[0].text(), "Deep heading");
    }

    #[test]
    fn test_unknown_block_spliced_inline() {
        let raw = RawElement::element(
            "body",
            vec![RawElement::element(
                "article",
                vec![RawElement::text("one "), RawElement::text("two")],
            )],
        );
        let root = DocumentBuilder::new().build(&raw);
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].text(), "one two");
    }

    #[test]
    fn test_form_controls() {
        let raw = RawElement::element(
            "form",
            vec![
                RawElement::element("input", vec![]).with_handle(ControlHandle(1)).with_attr("value", "abc"),
                RawElement::element("input", vec![])
                    .with_attr("type", "submit")
                    .with_attr("value", "Send")
                    .with_handle(ControlHandle(2)),
                RawElement::element("input", vec![]).with_attr("type", "checkbox"),
                RawElement::element("select", vec![]).with_text("choice"),
            ],
        );
        let root = DocumentBuilder::new().build(&raw);
        let runs = &root.paragraphs()[0].runs;
        assert_eq!(
            runs[0],
            Run::Edit {
                control: Some(ControlHandle(1)),
                text: "abc".to_string()
            }
        );
        assert_eq!(
            runs[1],
            Run::Button {
                control: Some(ControlHandle(2)),
                text: "Send".to_string()
            }
        );
        assert_eq!(runs[2], Run::Text("[unknown input: checkbox: ]".to_string()));
        assert_eq!(
            runs[3],
            Run::Text("[unknown input tag: select: choice]".to_string())
        );
    }

    #[test]
    fn test_unknown_leaf_placeholder() {
        let raw = RawElement::element("body", vec![RawElement::element("marquee", vec![]).with_text("wow")]);
        let root = DocumentBuilder::new().build(&raw);
        assert_eq!(non_empty_paragraphs(&root), vec!["[unknown tag: marquee: wow]"]);
    }

    #[test]
    fn test_parse_span() {
        assert_eq!(parse_span("3"), Some(3));
        assert_eq!(parse_span("0"), Some(0));
        assert_eq!(parse_span("-1"), None);
        assert_eq!(parse_span("wide"), None);
    }
}
