//! Printer profiles: where the repeated lines of a label are placed
//!
//! Each profile is one physical printer's conventions for margins, line
//! spacing and usable font sizes. A job uses exactly one profile; the rules of
//! different profiles are never combined.

use crate::constants::*;
use crate::error::ValidationError;
use crate::fit::TextArea;
use crate::geometry::{LabelGeometry, Margins};
use crate::style::Typography;
use serde::{Deserialize, Serialize};

/// Approximate cap height as a fraction of the font size
const CAP_HEIGHT_RATIO: f32 = 0.7;

/// Where the thermal profile starts its first line, measured from the label's
/// top edge.
///
/// Print-head calibration on the M-84Pro has used both a fixed offset and the
/// configured top margin. `Fixed(THERMAL_START_Y_MM)` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThermalTopOffset {
    /// Fixed offset in millimetres, ignoring the label margins
    Fixed(f32),
    /// Use the label's configured top margin
    FromMarginTop,
}

impl Default for ThermalTopOffset {
    fn default() -> Self {
        Self::Fixed(THERMAL_START_Y_MM)
    }
}

/// Positioning rules for one printer model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrinterProfile {
    /// SATO M-84Pro continuous thermal roll: fixed offsets and line pitch,
    /// left-aligned text
    Thermal {
        #[serde(default)]
        top_offset: ThermalTopOffset,
    },
    /// Office printer: caller margins, lines spread over the text area and
    /// centered
    Standard,
    /// Brother TDP-42H: landscape frame with minimum margins
    WideFormat,
}

impl Default for PrinterProfile {
    fn default() -> Self {
        Self::thermal()
    }
}

/// Position of one repeated line: left edge of the text and its baseline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePlacement {
    pub x: f32,
    pub baseline: f32,
}

impl PrinterProfile {
    /// Thermal profile with the calibrated default offset
    pub fn thermal() -> Self {
        Self::Thermal {
            top_offset: ThermalTopOffset::default(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Thermal { .. } => "SATO M-84Pro thermal",
            Self::Standard => "standard office",
            Self::WideFormat => "Brother TDP-42H wide format",
        }
    }

    /// Outer size of one label as drawn by this profile
    pub fn frame(&self, geometry: &LabelGeometry) -> (f32, f32) {
        match self {
            Self::WideFormat => (
                geometry.width.max(geometry.printable_height),
                geometry.width.min(geometry.printable_height),
            ),
            Self::Thermal { .. } | Self::Standard => (geometry.width, geometry.printable_height),
        }
    }

    /// Margins this profile applies around the text
    pub fn margins(&self, geometry: &LabelGeometry) -> Margins {
        match self {
            Self::WideFormat => geometry.margins.with_floor(
                WIDE_FORMAT_MIN_VERTICAL_MARGIN_MM,
                WIDE_FORMAT_MIN_HORIZONTAL_MARGIN_MM,
            ),
            Self::Thermal { .. } | Self::Standard => geometry.margins,
        }
    }

    /// Space the auto-fit search has to work with
    pub fn text_area(&self, geometry: &LabelGeometry, lines: u32) -> TextArea {
        let (width, height) = self.frame(geometry);
        let m = self.margins(geometry);
        TextArea {
            width: width - m.left - m.right,
            height: height - m.top - m.bottom,
            lines,
        }
    }

    /// Reject geometry that leaves no text area once this profile's frame and
    /// margin floors are applied
    pub fn validate(&self, geometry: &LabelGeometry, lines: u32) -> Result<(), ValidationError> {
        let (width, height) = self.frame(geometry);
        let m = self.margins(geometry);
        let area = self.text_area(geometry, lines);
        if !(area.height > 0.0) {
            return Err(ValidationError::NoTextArea {
                printable_height: height,
                top: m.top,
                bottom: m.bottom,
            });
        }
        if !(area.width > 0.0) {
            return Err(ValidationError::NoTextWidth {
                width,
                left: m.left,
                right: m.right,
            });
        }
        Ok(())
    }

    /// Operating font range for sizes that were not auto-fitted
    pub fn fixed_font_range(&self) -> Option<(f32, f32)> {
        match self {
            Self::Thermal { .. } => Some(THERMAL_FONT_RANGE),
            Self::WideFormat => Some(WIDE_FORMAT_FONT_RANGE),
            Self::Standard => None,
        }
    }

    /// Final font size: auto-fitted sizes pass through, fixed sizes are
    /// clamped to the profile's operating range
    pub fn resolve_font_size(&self, typography: &Typography, size: f32) -> f32 {
        if typography.auto_size {
            return size;
        }
        match self.fixed_font_range() {
            Some((min, max)) => size.clamp(min, max),
            None => size,
        }
    }

    /// Whether lines are centered, which needs the measured text width
    pub fn centers_text(&self) -> bool {
        !matches!(self, Self::Thermal { .. })
    }

    /// Place `lines` copies of the text for a label whose top-left corner is
    /// `origin`. `text_width` is only used by centering profiles.
    pub fn place_lines(
        &self,
        geometry: &LabelGeometry,
        origin: (f32, f32),
        lines: u32,
        font_size: f32,
        text_width: f32,
    ) -> Vec<LinePlacement> {
        let (x, y) = origin;
        match self {
            Self::Thermal { top_offset } => {
                let start_x = x + THERMAL_START_X_MM;
                let start_y = y + match top_offset {
                    ThermalTopOffset::Fixed(offset) => *offset,
                    ThermalTopOffset::FromMarginTop => geometry.margins.top,
                };
                (0..lines)
                    .map(|i| LinePlacement {
                        x: start_x,
                        baseline: start_y
                            + i as f32 * THERMAL_LINE_SPACING_MM
                            + THERMAL_BASELINE_OFFSET_MM,
                    })
                    .collect()
            }
            Self::Standard | Self::WideFormat => {
                let area = self.text_area(geometry, lines);
                let m = self.margins(geometry);
                let pitch = area.height / lines.max(1) as f32;
                let cell = pitch * STANDARD_CELL_FRACTION;
                let ascent = font_size * MM_PER_POINT * CAP_HEIGHT_RATIO;
                let text_x = x + m.left + (area.width - text_width) / 2.0;
                (0..lines)
                    .map(|i| LinePlacement {
                        x: text_x,
                        baseline: y + m.top + i as f32 * pitch + (cell + ascent) / 2.0,
                    })
                    .collect()
            }
        }
    }
}
