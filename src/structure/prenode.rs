//! Mutable working copy of a raw node tree.
//!
//! The provider's tree is read-only, so cleaning runs over prenodes: each one
//! keeps a reference to its source node for text, attributes and geometry,
//! while its child list can be rewritten freely.

use crate::geometry::Rect;
use crate::raw::{ControlHandle, RawNode, TEXT_TAG};

/// A node of the working tree.
#[derive(Debug)]
pub struct Prenode<'a, N: RawNode> {
    /// Lowercased tag classifier
    pub tag: String,
    /// Provider node this prenode was copied from
    pub source: &'a N,
    /// Ordered children
    pub children: Vec<Prenode<'a, N>>,
}

impl<'a, N: RawNode> Prenode<'a, N> {
    /// Copy a provider subtree.
    pub fn from_raw(source: &'a N) -> Self {
        Self {
            tag: source.tag_name().to_ascii_lowercase(),
            source,
            children: source.children().into_iter().map(Prenode::from_raw).collect(),
        }
    }

    /// Check if this is a `#text` node.
    pub fn is_text(&self) -> bool {
        self.tag == TEXT_TAG
    }

    /// Text of the source node, empty when absent.
    pub fn text(&self) -> &'a str {
        self.source.text().unwrap_or("")
    }

    /// Text of this node and all descendants, joined in order.
    pub fn deep_text(&self) -> String {
        if self.children.is_empty() {
            return self.text().to_string();
        }
        let mut result = String::new();
        for child in &self.children {
            result.push_str(&child.deep_text());
        }
        result
    }

    /// Attribute of the source node.
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.source.attribute(name)
    }

    /// Geometry of the source node.
    pub fn rect(&self) -> Option<Rect> {
        self.source.rect()
    }

    /// Control handle of the source node.
    pub fn control_handle(&self) -> Option<ControlHandle> {
        self.source.control_handle()
    }

    /// Number of nodes in this subtree.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Prenode::count).sum::<usize>()
    }
}
