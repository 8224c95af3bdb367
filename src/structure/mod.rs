//! Semantic document structure.
//!
//! ## Overview
//!
//! Raw provider nodes describe presentation: arbitrarily nested wrappers,
//! inline fragments with pixel rectangles, form controls. This module turns
//! them into a small semantic vocabulary:
//!
//! - **Root**: exactly one per tree
//! - **Paragraph**: a run sequence (text, edit fields, buttons)
//! - **Section**: content of a heading
//! - **Lists** and **list items**
//! - **Tables**, rows and cells
//!
//! ## Pipeline
//!
//! 1. Copy the provider tree into mutable [`Prenode`]s
//! 2. Clean to a fixed point ([`cleaning::clean`])
//! 3. Compile with [`DocumentBuilder`]
//!
//! ## Example
//!
//! ```
//! use readflow::raw::RawElement;
//! use readflow::structure::DocumentBuilder;
//!
//! let raw = RawElement::element("div", vec![RawElement::text("Hello")]);
//! let mut doc = DocumentBuilder::new().build_document(&raw, "Greeting");
//! doc.build_view(80).unwrap();
//! assert_eq!(doc.line(1).as_deref(), Some("Hello"));
//! ```

mod builder;
pub mod cleaning;
mod prenode;
mod types;

pub use builder::DocumentBuilder;
pub use prenode::Prenode;
pub use types::{NodeKind, Run, SemanticNode};
