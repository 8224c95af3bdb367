//! Geometric linearization of positioned containers.
//!
//! Content that arrives as absolutely positioned blocks has no inherent
//! reading order. [`ViewBuilder`] turns such a set of [`Container`]s into a
//! line-numbered sequence:
//!
//! 1. build each container's rows from its content, dropping containers
//!    that end up with none;
//! 2. map pixel x and width into text columns with one global ratio;
//! 3. assign line numbers top to bottom, letting vertically close,
//!    non-overlapping containers share a line;
//! 4. record vertical dependencies and text-space conflicts.
//!
//! # Example
//!
//! ```
//! use readflow::geometry::Rect;
//! use readflow::linearize::{linearize, Container, ContentItem};
//!
//! let left = Container::new(
//!     "div",
//!     Rect::new(0.0, 0.0, 100.0, 20.0),
//!     vec![ContentItem::text("Left", Rect::new(0.0, 0.0, 100.0, 20.0))],
//! );
//! let right = Container::new(
//!     "div",
//!     Rect::new(100.0, 4.0, 100.0, 20.0),
//!     vec![ContentItem::text("Right", Rect::new(100.0, 4.0, 100.0, 20.0))],
//! );
//! let view = linearize(vec![right, left], 20).unwrap();
//! assert_eq!(view.lines(), vec!["Left      Right"]);
//! ```

mod container;

pub use container::{spans_intersect, Container, ContainerRow, ContentItem, RowItem};

use crate::config::LinearizeConfig;
use crate::document::Document;
use crate::error::Result;
use crate::structure::{NodeKind, Run, SemanticNode};
use crate::utils::safe_float_cmp;

/// Result of a linearization.
#[derive(Debug, Clone, Default)]
pub struct LinearView {
    /// Containers in line order; equal lines keep assignment order
    pub containers: Vec<Container>,
    /// Pairs of indices into `containers` sharing a line and overlapping columns
    pub conflicts: Vec<(usize, usize)>,
}

impl LinearView {
    /// Number of distinct line numbers.
    pub fn line_count(&self) -> usize {
        self.containers
            .iter()
            .filter_map(|c| c.text_y)
            .max()
            .map_or(0, |max| max + 1)
    }

    /// Render the view as text.
    ///
    /// Each line number takes as many output lines as its tallest container;
    /// containers are placed at their text column, or after a single space
    /// when the column is already taken.
    pub fn lines(&self) -> Vec<String> {
        let mut output = Vec::new();
        for line in 0..self.line_count() {
            let on_line: Vec<&Container> = self
                .containers
                .iter()
                .filter(|c| c.text_y == Some(line))
                .collect();
            let height = on_line.iter().map(|c| c.row_count()).max().unwrap_or(0);
            let base = output.len();
            output.extend(std::iter::repeat_with(String::new).take(height));
            for container in on_line {
                for (i, row) in container.rows.iter().enumerate() {
                    place(&mut output[base + i], container.text_x, &row.text());
                }
            }
        }
        output
    }

    /// Convert the view into a document, one paragraph per container row.
    pub fn to_document(&self, title: &str) -> Document {
        let mut paragraphs = Vec::new();
        for container in &self.containers {
            for row in &container.rows {
                let mut runs = Vec::new();
                for (i, item) in row.items.iter().enumerate() {
                    if i > 0 {
                        runs.push(Run::text_run(" "));
                    }
                    runs.push(match item {
                        RowItem::Text(text) => Run::text_run(text.as_str()),
                        RowItem::TextInput { text, handle, .. } => Run::Edit {
                            control: *handle,
                            text: text.clone(),
                        },
                    });
                }
                paragraphs.push(SemanticNode::paragraph(runs));
            }
        }
        Document::with_title(title, SemanticNode::new(NodeKind::Root).with_children(paragraphs))
    }
}

fn place(line: &mut String, column: usize, text: &str) {
    let len = line.chars().count();
    if len < column {
        line.extend(std::iter::repeat(' ').take(column - len));
    } else if len > 0 {
        line.push(' ');
    }
    line.push_str(text);
}

/// Linearizes containers with a given configuration.
#[derive(Debug, Clone, Default)]
pub struct ViewBuilder {
    config: LinearizeConfig,
}

impl ViewBuilder {
    /// Create a builder.
    pub fn new(config: LinearizeConfig) -> Self {
        Self { config }
    }

    /// Linearize a set of containers.
    ///
    /// Fails with [`crate::error::Error::InvalidConfiguration`] when the target width is
    /// below [`crate::config::MIN_TARGET_WIDTH`] or a text input has zero width.
    pub fn linearize(&self, containers: Vec<Container>) -> Result<LinearView> {
        self.config.validate()?;

        let mut kept = Vec::with_capacity(containers.len());
        for mut container in containers {
            container.build_rows()?;
            if container.row_count() > 0 {
                kept.push(container);
            } else {
                log::warn!(
                    "container <{}> without rows (has {} content items)",
                    container.tag,
                    container.content.len()
                );
            }
        }

        self.calc_text_x_and_width(&mut kept);
        let order = self.calc_text_y(&mut kept);

        let mut slots: Vec<Option<Container>> = kept.into_iter().map(Some).collect();
        let mut sorted: Vec<Container> = order.into_iter().filter_map(|i| slots[i].take()).collect();

        let conflicts = find_conflicts(&sorted);
        calc_vert_deps(&mut sorted);
        log::debug!(
            "linearized {} containers, {} conflicts",
            sorted.len(),
            conflicts.len()
        );
        Ok(LinearView {
            containers: sorted,
            conflicts,
        })
    }

    fn calc_text_x_and_width(&self, containers: &mut [Container]) {
        let graphical_width = containers
            .iter()
            .map(|c| c.rect.right())
            .fold(0.0_f32, f32::max);
        let mut ratio = graphical_width / self.config.target_width as f32;
        if ratio.is_nan() || ratio <= 0.0 {
            ratio = 1.0;
        }
        log::debug!("graphical width is {}, ratio is {:.2}", graphical_width, ratio);
        for c in containers.iter_mut() {
            c.text_x = (c.rect.x / ratio) as usize;
            c.text_width = (c.rect.width / ratio) as usize;
        }
    }

    /// Assign line numbers and return container indices in assignment order.
    fn calc_text_y(&self, containers: &mut [Container]) -> Vec<usize> {
        for c in containers.iter_mut() {
            c.text_y = None;
        }
        let mut order = Vec::with_capacity(containers.len());
        let mut top_level = containers
            .iter()
            .map(|c| c.rect.y)
            .fold(f32::INFINITY, f32::min);
        let mut next_text_y = 0;
        loop {
            let mut base: Option<usize> = None;
            for (i, c) in containers.iter().enumerate() {
                if c.text_y.is_some() || c.rect.y < top_level {
                    continue;
                }
                match base {
                    Some(b) if c.rect.y >= containers[b].rect.y => {},
                    _ => base = Some(i),
                }
            }
            let Some(base) = base else {
                break;
            };

            let line = next_text_y;
            next_text_y += 1;
            top_level = containers[base].rect.y;
            containers[base].text_y = Some(line);
            order.push(base);
            log::trace!("line {} starts with <{}>", line, containers[base].tag);

            let chosen = &containers[base];
            let mut close: Vec<usize> = (0..containers.len())
                .filter(|&k| k != base)
                .filter(|&k| {
                    let c = &containers[k];
                    c.text_y.is_none()
                        && !chosen.intersects_graphically(c)
                        && (chosen.rect.y - c.rect.y).abs() < self.config.row_tolerance
                })
                .collect();
            close.sort_by(|&a, &b| {
                let (ca, cb) = (&containers[a].rect, &containers[b].rect);
                safe_float_cmp(ca.y, cb.y).then_with(|| (ca.area() != 0.0).cmp(&(cb.area() != 0.0)))
            });

            let mut accepted: Vec<usize> = Vec::new();
            for k in close {
                if accepted
                    .iter()
                    .any(|&a| containers[k].intersects_graphically(&containers[a]))
                {
                    continue;
                }
                containers[k].text_y = Some(line);
                accepted.push(k);
                order.push(k);
            }
        }
        order
    }
}

fn find_conflicts(containers: &[Container]) -> Vec<(usize, usize)> {
    let mut conflicts = Vec::new();
    for i in 0..containers.len() {
        for j in i + 1..containers.len() {
            if containers[i].intersects_text(&containers[j]) {
                log::warn!(
                    "intersecting containers #{} <{}> and #{} <{}>",
                    i,
                    containers[i].tag,
                    j,
                    containers[j].tag
                );
                conflicts.push((i, j));
            }
        }
    }
    conflicts
}

fn calc_vert_deps(containers: &mut [Container]) {
    for j in 0..containers.len() {
        let mut deps = Vec::new();
        for (i, ci) in containers.iter().enumerate() {
            let cj = &containers[j];
            if i == j || cj.line() <= ci.line() {
                continue;
            }
            if spans_intersect(ci.text_x, ci.text_width, cj.text_x, cj.text_width) {
                deps.push(i);
            }
        }
        containers[j].vert_dep_on = deps;
    }
}

/// Linearize containers at a target width with default tolerances.
pub fn linearize(containers: Vec<Container>, target_width: usize) -> Result<LinearView> {
    ViewBuilder::new(LinearizeConfig::default().with_target_width(target_width)).linearize(containers)
}
