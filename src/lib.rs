// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::needless_range_loop)]
#![allow(clippy::should_implement_trait)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # Readflow
//!
//! Linearization and navigation engine for non-visual reading surfaces.
//!
//! ## Core Features
//!
//! - **Tree Building**: normalize nested block/inline markup to a fixed point
//!   and compile it into paragraphs, sections, lists and tables
//! - **Row View**: greedy word wrap into fixed-width rows with absolute row
//!   numbering and exact reconstructability
//! - **Geometric Linearization**: deterministic reading order for absolutely
//!   positioned containers
//! - **Navigation**: cloneable cursors with paragraph and sentence jumps and
//!   audio cue selection
//!
//! ## Quick Start
//!
//! ```
//! use readflow::navigation::{next_paragraph, Cursor};
//! use readflow::raw::RawElement;
//! use readflow::structure::DocumentBuilder;
//!
//! # fn main() -> readflow::Result<()> {
//! let raw = RawElement::from_json(
//!     r##"{"tag": "body", "children": [
//!         {"tag": "h1", "children": [{"tag": "#text", "text": "Welcome"}]},
//!         {"tag": "#text", "text": "Plain text follows the heading."}
//!     ]}"##,
//! )?;
//! let mut doc = DocumentBuilder::new().build_document(&raw, "Home");
//! doc.build_view(40)?;
//!
//! let jump = next_paragraph(&Cursor::new(&doc), 0);
//! assert_eq!(jump.text(), "Welcome");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Geometry and provider boundary
pub mod geometry;
pub mod raw;

// Semantic tree construction
pub mod structure;

// Row and paragraph view
pub mod document;
pub mod wrap;

// Positioned content
pub mod linearize;

// Cursor and jumps
pub mod navigation;

pub use config::EngineConfig;
pub use document::{Document, NodeId, StructuralEdit};
pub use error::{Error, Result};
pub use linearize::{linearize, Container, ContentItem, LinearView, ViewBuilder};
pub use navigation::{next_paragraph, next_sentence, Cue, Cursor, Jump};
pub use structure::{DocumentBuilder, NodeKind, Run, SemanticNode};

// Internal utilities
pub(crate) mod utils {
    //! Internal utility functions for the library.

    use std::cmp::Ordering;

    /// Compare two pixel coordinates, treating NaN as greater than any number.
    #[inline]
    pub fn safe_float_cmp(a: f32, b: f32) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        }
    }

}

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
