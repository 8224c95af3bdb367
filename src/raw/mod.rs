//! Raw node provider boundary.
//!
//! The engine reads content through the [`RawNode`] trait: an ordered tree of
//! primitive nodes carrying a tag classifier, optional text, attributes and a
//! pixel rectangle. Text nodes use the tag `#text`.
//!
//! [`RawElement`] is an owned implementation that deserializes from a JSON
//! DOM snapshot, which is what the CLI and most tests feed the builder.
//!
//! The only write-back path into the provider is [`ControlSink`], used when the
//! text of an editable control changes.

use crate::geometry::Rect;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Tag name used for text leaves.
pub const TEXT_TAG: &str = "#text";

/// Opaque reference to a form control owned by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControlHandle(pub u64);

/// Read-only view of a provider node.
pub trait RawNode {
    /// Tag classifier, e.g. `div`, `ul`, `input` or `#text`.
    fn tag_name(&self) -> &str;

    /// Ordered children.
    fn children(&self) -> Vec<&Self>;

    /// Text content, if any.
    fn text(&self) -> Option<&str>;

    /// Attribute lookup by name.
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Rendered geometry, if the provider knows it.
    fn rect(&self) -> Option<Rect>;

    /// Handle of the backing form control, if this node is one.
    fn control_handle(&self) -> Option<ControlHandle> {
        None
    }
}

/// Receives text written back into editable controls.
pub trait ControlSink {
    /// Replace the text of the control behind `handle`.
    ///
    /// Returns false when the provider no longer knows the control.
    fn set_control_text(&mut self, handle: ControlHandle, text: &str) -> bool;
}

/// Owned snapshot of a DOM node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawElement {
    /// Tag classifier
    pub tag: String,
    /// Text content
    pub text: Option<String>,
    /// Attributes by name
    pub attributes: HashMap<String, String>,
    /// Pixel geometry
    pub rect: Option<Rect>,
    /// Backing control, for form elements
    pub handle: Option<ControlHandle>,
    /// Ordered children
    pub children: Vec<RawElement>,
}

impl RawElement {
    /// Create an element with the given tag and children.
    pub fn element(tag: &str, children: Vec<RawElement>) -> Self {
        Self {
            tag: tag.to_string(),
            children,
            ..Self::default()
        }
    }

    /// Create a `#text` leaf.
    pub fn text(text: &str) -> Self {
        Self {
            tag: TEXT_TAG.to_string(),
            text: Some(text.to_string()),
            ..Self::default()
        }
    }

    /// Attach geometry.
    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = Some(rect);
        self
    }

    /// Attach an attribute.
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    /// Attach a control handle.
    pub fn with_handle(mut self, handle: ControlHandle) -> Self {
        self.handle = Some(handle);
        self
    }

    /// Set the text content.
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    /// Parse a JSON snapshot.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn find_control_mut(&mut self, handle: ControlHandle) -> Option<&mut RawElement> {
        if self.handle == Some(handle) {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|child| child.find_control_mut(handle))
    }
}

impl RawNode for RawElement {
    fn tag_name(&self) -> &str {
        &self.tag
    }

    fn children(&self) -> Vec<&Self> {
        self.children.iter().collect()
    }

    fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    fn rect(&self) -> Option<Rect> {
        self.rect
    }

    fn control_handle(&self) -> Option<ControlHandle> {
        self.handle
    }
}

impl ControlSink for RawElement {
    fn set_control_text(&mut self, handle: ControlHandle, text: &str) -> bool {
        match self.find_control_mut(handle) {
            Some(control) => {
                control.text = Some(text.to_string());
                true
            },
            None => false,
        }
    }
}
