//! The drawing surface the layout engine renders into

use crate::error::BackendError;
use crate::font::FontSpec;

/// Result type for backend operations
pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// Document information written alongside the pages
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentInfo {
    pub creator: String,
    pub title: String,
    pub subject: String,
}

/// A paged drawing surface with text measurement.
///
/// All coordinates are millimetres measured from the top-left corner of the
/// current page. Font sizes are points. `draw_text` positions the text
/// baseline at `y`.
pub trait DrawingBackend {
    /// Start a new page; subsequent drawing goes to it
    fn begin_page(&mut self, width: f32, height: f32) -> BackendResult<()>;

    /// Width of `text` in millimetres when set in `font` at `size`
    fn measure_text(&self, text: &str, font: &FontSpec, size: f32) -> BackendResult<f32>;

    /// Draw a single line of text with its baseline at `(x, y)`
    fn draw_text(
        &mut self,
        x: f32,
        y: f32,
        text: &str,
        font: &FontSpec,
        size: f32,
    ) -> BackendResult<()>;

    /// Stroke a rectangle whose top-left corner is `(x, y)`
    fn draw_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        line_width: f32,
    ) -> BackendResult<()>;

    /// Attach document information. Backends without metadata ignore it.
    fn set_metadata(&mut self, _info: &DocumentInfo) -> BackendResult<()> {
        Ok(())
    }

    /// Serialize everything drawn so far
    fn finalize(&mut self) -> BackendResult<Vec<u8>>;
}
