//! Typography and border styling for labels

use crate::error::ValidationError;
use crate::font::FontSpec;
use crate::geometry::positive;

/// Font settings requested for the label text
#[derive(Debug, Clone, PartialEq)]
pub struct Typography {
    pub font_family: String,
    /// Requested size in points; the auto-fit search starts here
    pub font_size: f32,
    pub bold: bool,
    /// Shrink the font until the text fits the label
    pub auto_size: bool,
}

impl Typography {
    pub fn new<S: Into<String>>(font_family: S, font_size: f32) -> Self {
        Self {
            font_family: font_family.into(),
            font_size,
            ..Default::default()
        }
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn auto_size(mut self, auto_size: bool) -> Self {
        self.auto_size = auto_size;
        self
    }

    /// The font the backend is asked to draw with
    pub fn font(&self) -> FontSpec {
        FontSpec::new(self.font_family.clone(), self.bold)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        positive("font size", self.font_size)
    }
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size: 8.0,
            bold: true,
            auto_size: true,
        }
    }
}

/// Outline drawn around each label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderStyle {
    /// Stroke width in millimetres
    pub width: f32,
}

impl Default for BorderStyle {
    fn default() -> Self {
        Self {
            width: crate::constants::DEFAULT_BORDER_WIDTH_MM,
        }
    }
}
