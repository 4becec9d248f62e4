//! Physical label geometry, in millimetres

use crate::constants::MM_PER_INCH;
use crate::error::ValidationError;

/// Convert a legacy inch value to millimetres
pub fn inches_to_mm(inches: f32) -> f32 {
    inches * MM_PER_INCH
}

/// Margins around the text area of a label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    /// Create uniform margins
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Create margins with vertical and horizontal values
    pub fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self {
            top: vertical,
            bottom: vertical,
            left: horizontal,
            right: horizontal,
        }
    }

    /// Raise every margin to at least the given floors
    pub fn with_floor(self, vertical: f32, horizontal: f32) -> Self {
        Self {
            top: self.top.max(vertical),
            bottom: self.bottom.max(vertical),
            left: self.left.max(horizontal),
            right: self.right.max(horizontal),
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}

/// Size of one label and the margins around its text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelGeometry {
    /// Length of the strip that wraps around the wire
    pub width: f32,
    /// Height of the label frame
    pub printable_height: f32,
    pub margins: Margins,
}

impl Default for LabelGeometry {
    /// S100X150 stock on the SATO M-84Pro with its small print margins
    fn default() -> Self {
        Self {
            width: 150.0,
            printable_height: 100.0,
            margins: Margins::symmetric(2.0, 3.0),
        }
    }
}

impl LabelGeometry {
    pub fn new(width: f32, printable_height: f32) -> Self {
        Self {
            width,
            printable_height,
            margins: Margins::default(),
        }
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Height left for text once the top and bottom margins are removed
    pub fn available_height(&self) -> f32 {
        self.printable_height - self.margins.top - self.margins.bottom
    }

    /// Check every geometric invariant
    pub fn validate(&self) -> Result<(), ValidationError> {
        positive("label width", self.width)?;
        positive("label printable height", self.printable_height)?;

        let m = &self.margins;
        for (field, value) in [
            ("top margin", m.top),
            ("right margin", m.right),
            ("bottom margin", m.bottom),
            ("left margin", m.left),
        ] {
            if !(value >= 0.0) {
                return Err(ValidationError::NegativeMargin { field, value });
            }
        }

        if self.available_height() <= 0.0 {
            return Err(ValidationError::NoTextArea {
                printable_height: self.printable_height,
                top: m.top,
                bottom: m.bottom,
            });
        }

        Ok(())
    }
}

/// Reject zero, negative and NaN lengths
pub(crate) fn positive(field: &'static str, value: f32) -> Result<(), ValidationError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NonPositive { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_area() {
        let geometry = LabelGeometry::new(76.2, 12.7).with_margins(Margins {
            top: 1.0,
            right: 2.0,
            bottom: 1.5,
            left: 3.0,
        });
        assert!((geometry.available_height() - 10.2).abs() < 1e-4);
        assert!(geometry.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_size() {
        let err = LabelGeometry::new(0.0, 10.0).validate().unwrap_err();
        assert!(matches!(
            err,
            ValidationError::NonPositive {
                field: "label width",
                ..
            }
        ));
        assert!(LabelGeometry::new(10.0, -1.0).validate().is_err());
        assert!(LabelGeometry::new(f32::NAN, 10.0).validate().is_err());
    }

    #[test]
    fn test_rejects_negative_margin() {
        let geometry = LabelGeometry::new(50.0, 10.0).with_margins(Margins {
            left: -0.1,
            ..Margins::default()
        });
        assert!(matches!(
            geometry.validate(),
            Err(ValidationError::NegativeMargin {
                field: "left margin",
                ..
            })
        ));
    }

    #[test]
    fn test_margins_must_leave_text_area() {
        let geometry = LabelGeometry::new(50.0, 4.0).with_margins(Margins::symmetric(2.0, 1.0));
        assert_eq!(
            geometry.validate(),
            Err(ValidationError::NoTextArea {
                printable_height: 4.0,
                top: 2.0,
                bottom: 2.0,
            })
        );
    }

    #[test]
    fn test_margin_floor() {
        let margins = Margins::uniform(0.2).with_floor(0.5, 1.0);
        assert_eq!(margins, Margins::symmetric(0.5, 1.0));
    }

    #[test]
    fn test_inches_to_mm() {
        assert!((inches_to_mm(1.8) - 45.72).abs() < 1e-4);
    }
}
