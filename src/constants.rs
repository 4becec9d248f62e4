//! Constants for label dimensions, font fitting and printer quirks
//!
//! All lengths are millimetres, font sizes are points.

/// Millimetres per inch
pub const MM_PER_INCH: f32 = 25.4;

/// Millimetres per PDF point (1/72 inch)
pub const MM_PER_POINT: f32 = MM_PER_INCH / 72.0;

/// US Letter page width in millimetres
pub const LETTER_WIDTH_MM: f32 = 215.9;

/// US Letter page height in millimetres
pub const LETTER_HEIGHT_MM: f32 = 279.4;

/// Smallest font size the auto-fit search will return
pub const MIN_FONT_SIZE: f32 = 4.0;

/// Largest font size the auto-fit search will try
pub const MAX_FONT_SIZE: f32 = 12.0;

/// Estimated line height in millimetres per point of font size
pub const LINE_HEIGHT_FACTOR: f32 = 0.35;

/// Font size used when a label has to be re-drawn with the fallback font
pub const FALLBACK_FONT_SIZE: f32 = 6.0;

/// Family used when the requested font cannot be drawn
pub const FALLBACK_FONT_FAMILY: &str = "Helvetica";

/// Default character width ratio for text estimation
/// (average character width as a fraction of font size)
pub const DEFAULT_CHAR_WIDTH_RATIO: f32 = 0.5;

/// Upper bound on expanded labels in a single job
pub const DEFAULT_MAX_LABELS_PER_JOB: usize = 1000;

/// Border stroke width in millimetres
pub const DEFAULT_BORDER_WIDTH_MM: f32 = 0.2;

/// Thermal: horizontal text start from the label's left edge (print-head limit)
pub const THERMAL_START_X_MM: f32 = 0.0;

/// Thermal: vertical text start from the label's top edge.
///
/// Historical output used both 0 mm and 2 mm here; 2 mm is the calibrated
/// value for the M-84Pro print head. See [`crate::profile::ThermalTopOffset`].
pub const THERMAL_START_Y_MM: f32 = 2.0;

/// Thermal: fixed distance between repeated lines, independent of label height
pub const THERMAL_LINE_SPACING_MM: f32 = 3.5;

/// Thermal: distance from a line's top to its text baseline
pub const THERMAL_BASELINE_OFFSET_MM: f32 = 1.0;

/// Thermal: operating range for fixed (non auto-sized) fonts
pub const THERMAL_FONT_RANGE: (f32, f32) = (6.0, 12.0);

/// Wide format: operating range for fixed (non auto-sized) fonts
pub const WIDE_FORMAT_FONT_RANGE: (f32, f32) = (8.0, 14.0);

/// Wide format: minimum top and bottom margin
pub const WIDE_FORMAT_MIN_VERTICAL_MARGIN_MM: f32 = 0.5;

/// Wide format: minimum left and right margin
pub const WIDE_FORMAT_MIN_HORIZONTAL_MARGIN_MM: f32 = 1.0;

/// Standard: fraction of the line pitch used as the text cell
pub const STANDARD_CELL_FRACTION: f32 = 0.6;
