//! Font auto-fit: the largest size at which the label text fits

use crate::backend::{BackendResult, DrawingBackend};
use crate::constants::{LINE_HEIGHT_FACTOR, MAX_FONT_SIZE, MIN_FONT_SIZE};
use crate::font::FontSpec;
use tracing::trace;

/// Space a label offers to its repeated text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextArea {
    pub width: f32,
    pub height: f32,
    pub lines: u32,
}

/// Estimated height of `lines` stacked lines at `size` points, in millimetres
pub fn text_block_height(size: f32, lines: u32) -> f32 {
    LINE_HEIGHT_FACTOR * size * lines as f32
}

/// Check one candidate size against the area
pub fn fits<B: DrawingBackend + ?Sized>(
    backend: &B,
    text: &str,
    font: &FontSpec,
    size: f32,
    area: TextArea,
) -> BackendResult<bool> {
    let width = backend.measure_text(text, font, size)?;
    let height = text_block_height(size, area.lines);
    trace!(
        "Fit candidate {}pt for '{}': width {:.2}/{:.2}mm, height {:.2}/{:.2}mm",
        size, text, width, area.width, height, area.height
    );
    Ok(width <= area.width && height <= area.height)
}

/// Pick the font size for a label.
///
/// With `auto_size` off the requested size is returned as is. Otherwise whole
/// point sizes are tried from `min(base_size, MAX_FONT_SIZE)` downwards and the
/// first one that fits wins; when nothing fits the result is `MIN_FONT_SIZE`.
pub fn fit_font_size<B: DrawingBackend + ?Sized>(
    backend: &B,
    text: &str,
    font: &FontSpec,
    base_size: f32,
    auto_size: bool,
    area: TextArea,
) -> BackendResult<f32> {
    if !auto_size {
        return Ok(base_size);
    }

    let mut candidate = base_size.min(MAX_FONT_SIZE).floor();
    while candidate >= MIN_FONT_SIZE {
        if fits(backend, text, font, candidate, area)? {
            return Ok(candidate);
        }
        candidate -= 1.0;
    }

    trace!("No size fits '{}', using minimum {}pt", text, MIN_FONT_SIZE);
    Ok(MIN_FONT_SIZE)
}
