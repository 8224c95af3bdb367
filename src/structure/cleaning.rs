//! Fixed-point cleaning of the working tree.
//!
//! A single pass walks the tree bottom-up and:
//!
//! 1. drops empty `#text` leaves, and whitespace-only ones unless they
//!    separate two inline siblings,
//! 2. drops element leaves with no text, unless they are form controls or
//!    table rows/cells (those carry meaning while empty),
//! 3. collapses a non-structural wrapper with exactly one child and no `id`
//!    into that child.
//!
//! One cleanup can expose another (dropping the only child of a wrapper
//! leaves an empty wrapper), so [`clean`] repeats passes until one reports
//! no change.

use super::prenode::Prenode;
use crate::raw::RawNode;

/// Tags that are never collapsed into their only child.
const STRUCTURAL_TAGS: &[&str] = &[
    "ol", "ul", "h1", "h2", "h3", "h4", "h5", "h6", "h7", "h8", "h9", "table", "thead", "tbody",
    "tfoot", "tr", "td", "th", "input", "select", "button", "textarea",
];

/// Element leaves that survive without text.
const KEEP_WHEN_EMPTY: &[&str] = &["input", "select", "button", "textarea", "tr", "td", "th"];

/// Tags that break the flow of text; whitespace next to them is not a separator.
const BLOCK_TAGS: &[&str] = &[
    "body", "div", "p", "ul", "ol", "li", "h1", "h2", "h3", "h4", "h5", "h6", "h7", "h8", "h9",
    "table", "thead", "tbody", "tfoot", "tr", "td", "th",
];

/// Run one cleaning pass and return the number of changes made.
///
/// The root itself is never removed or collapsed.
pub fn clean_pass<N: RawNode>(node: &mut Prenode<'_, N>) -> usize {
    let mut changes = 0;
    for child in node.children.iter_mut() {
        changes += clean_pass(child);
    }

    let children = std::mem::take(&mut node.children);
    let removable: Vec<bool> = (0..children.len()).map(|i| is_removable(&children, i)).collect();
    let before = children.len();
    node.children = children
        .into_iter()
        .zip(removable)
        .filter_map(|(child, drop)| (!drop).then_some(child))
        .collect();
    changes += before - node.children.len();

    for child in node.children.iter_mut() {
        if is_collapsible(child) {
            if let Some(only) = child.children.pop() {
                *child = only;
                changes += 1;
            }
        }
    }
    changes
}

/// Repeat cleaning passes until the tree stops changing.
///
/// Returns the number of passes that made changes.
pub fn clean<N: RawNode>(root: &mut Prenode<'_, N>) -> usize {
    let mut passes = 0;
    loop {
        let changes = clean_pass(root);
        log::trace!("cleaning pass {} made {} changes", passes + 1, changes);
        if changes == 0 {
            break;
        }
        passes += 1;
    }
    log::debug!("tree cleaned in {} passes, {} nodes left", passes, root.count());
    passes
}

/// Check if a childless node has nothing worth rendering on its own.
pub(crate) fn is_empty_leaf<N: RawNode>(node: &Prenode<'_, N>) -> bool {
    if node.is_text() {
        return node.text().trim().is_empty();
    }
    !KEEP_WHEN_EMPTY.contains(&node.tag.as_str()) && node.text().trim().is_empty()
}

fn is_removable<N: RawNode>(siblings: &[Prenode<'_, N>], i: usize) -> bool {
    let node = &siblings[i];
    if !node.children.is_empty() || !is_empty_leaf(node) {
        return false;
    }
    if !node.is_text() || node.text().is_empty() {
        return true;
    }
    // whitespace between two inline siblings is the only gap between them
    let inline = |n: &Prenode<'_, N>| !BLOCK_TAGS.contains(&n.tag.as_str());
    let prev = i.checked_sub(1).and_then(|p| siblings.get(p));
    let next = siblings.get(i + 1);
    !matches!((prev, next), (Some(p), Some(n)) if inline(p) && inline(n))
}

fn is_collapsible<N: RawNode>(node: &Prenode<'_, N>) -> bool {
    node.children.len() == 1
        && !node.is_text()
        && !STRUCTURAL_TAGS.contains(&node.tag.as_str())
        && node.attribute("id").is_none()
}
