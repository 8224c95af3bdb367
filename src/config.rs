//! Configuration for tree building, view building and linearization.
//!
//! All sections deserialize from partial JSON; missing fields take their
//! defaults.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Smallest text width the geometric linearizer accepts.
pub const MIN_TARGET_WIDTH: usize = 10;

/// Engine-wide configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Semantic tree construction settings.
    pub builder: BuilderConfig,

    /// Row view settings.
    pub view: ViewConfig,

    /// Geometric linearizer settings.
    pub linearize: LinearizeConfig,
}

impl EngineConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a JSON document.
    ///
    /// # Examples
    ///
    /// ```
    /// use readflow::config::EngineConfig;
    ///
    /// let config = EngineConfig::from_json(r#"{ "linearize": { "target_width": 80 } }"#).unwrap();
    /// assert_eq!(config.linearize.target_width, 80);
    /// assert_eq!(config.view.list_indent, 0);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section for out-of-range values.
    pub fn validate(&self) -> Result<()> {
        self.linearize.validate()
    }

    /// Replace the builder section.
    pub fn with_builder(mut self, builder: BuilderConfig) -> Self {
        self.builder = builder;
        self
    }

    /// Replace the view section.
    pub fn with_view(mut self, view: ViewConfig) -> Self {
        self.view = view;
        self
    }

    /// Replace the linearizer section.
    pub fn with_linearize(mut self, linearize: LinearizeConfig) -> Self {
        self.linearize = linearize;
        self
    }
}

/// Settings for compiling raw nodes into a semantic tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Nesting level given to every section created from a heading.
    ///
    /// Headings do not derive their level from the rank (h1..h9); every
    /// section gets this fixed value.
    pub section_level: u32,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self { section_level: 1 }
    }
}

impl BuilderConfig {
    /// Set the fixed section level.
    pub fn with_section_level(mut self, level: u32) -> Self {
        self.section_level = level;
        self
    }
}

/// Settings for the flattened row view.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Columns each list item reserves for indentation of its content.
    pub list_indent: usize,
}

impl ViewConfig {
    /// Set the list item indentation.
    pub fn with_list_indent(mut self, indent: usize) -> Self {
        self.list_indent = indent;
        self
    }
}

/// Settings for the geometric linearizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearizeConfig {
    /// Width of the text space containers are mapped into.
    pub target_width: usize,

    /// Containers whose tops differ by less than this many pixels may share a line.
    pub row_tolerance: f32,
}

impl Default for LinearizeConfig {
    fn default() -> Self {
        Self {
            target_width: 100,
            row_tolerance: 16.0,
        }
    }
}

impl LinearizeConfig {
    /// Set the target text width.
    pub fn with_target_width(mut self, width: usize) -> Self {
        self.target_width = width;
        self
    }

    /// Set the same-line tolerance in pixels.
    pub fn with_row_tolerance(mut self, tolerance: f32) -> Self {
        self.row_tolerance = tolerance;
        self
    }

    /// Fail with [`Error::InvalidConfiguration`] when the target width is below
    /// [`MIN_TARGET_WIDTH`] or the tolerance is negative.
    pub fn validate(&self) -> Result<()> {
        if self.target_width < MIN_TARGET_WIDTH {
            return Err(Error::InvalidConfiguration(format!(
                "target width {} may not be less than {}",
                self.target_width, MIN_TARGET_WIDTH
            )));
        }
        if self.row_tolerance.is_nan() || self.row_tolerance < 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "row tolerance {} must be non-negative",
                self.row_tolerance
            )));
        }
        Ok(())
    }
}
