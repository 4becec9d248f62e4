//! Recording backend with deterministic metrics for unit tests

use crate::backend::{BackendResult, DocumentInfo, DrawingBackend};
use crate::error::BackendError;
use crate::font::{FontSpec, StandardFont};
use std::cell::Cell;

/// Millimetres per character per point of font size
pub const CHAR_WIDTH_MM_PER_POINT: f32 = 0.2;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    BeginPage {
        width: f32,
        height: f32,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
        font: FontSpec,
        size: f32,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Metadata(DocumentInfo),
}

#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub calls: Vec<Call>,
    measures: Cell<usize>,
    /// Drawing this text with a non-fallback font fails
    pub fail_text: Option<String>,
    /// Every draw call fails
    pub fail_all_text: bool,
    /// Only the n-th `draw_text` call (1-based) fails
    pub fail_text_call: Option<usize>,
    text_calls: usize,
    pub fail_finalize: bool,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn measure_count(&self) -> usize {
        self.measures.get()
    }

    /// Calls grouped by page
    pub fn pages(&self) -> Vec<Vec<Call>> {
        let mut pages: Vec<Vec<Call>> = Vec::new();
        for call in &self.calls {
            match call {
                Call::BeginPage { .. } => pages.push(vec![call.clone()]),
                Call::Metadata(_) => {}
                _ => {
                    if let Some(page) = pages.last_mut() {
                        page.push(call.clone());
                    }
                }
            }
        }
        pages
    }

    pub fn texts(&self) -> Vec<(f32, f32, String, f32)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Text {
                    x, y, text, size, ..
                } => Some((*x, *y, text.clone(), *size)),
                _ => None,
            })
            .collect()
    }

    pub fn rects(&self) -> Vec<(f32, f32, f32, f32)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Rect {
                    x,
                    y,
                    width,
                    height,
                } => Some((*x, *y, *width, *height)),
                _ => None,
            })
            .collect()
    }

    fn has_page(&self) -> bool {
        self.calls
            .iter()
            .any(|call| matches!(call, Call::BeginPage { .. }))
    }
}

impl DrawingBackend for RecordingBackend {
    fn begin_page(&mut self, width: f32, height: f32) -> BackendResult<()> {
        self.calls.push(Call::BeginPage { width, height });
        Ok(())
    }

    fn measure_text(&self, text: &str, font: &FontSpec, size: f32) -> BackendResult<f32> {
        self.measures.set(self.measures.get() + 1);
        StandardFont::resolve(font)
            .ok_or_else(|| BackendError::FontUnavailable(font.family.clone()))?;
        Ok(text.chars().count() as f32 * CHAR_WIDTH_MM_PER_POINT * size)
    }

    fn draw_text(
        &mut self,
        x: f32,
        y: f32,
        text: &str,
        font: &FontSpec,
        size: f32,
    ) -> BackendResult<()> {
        if !self.has_page() {
            return Err(BackendError::NoPage);
        }
        StandardFont::resolve(font)
            .ok_or_else(|| BackendError::FontUnavailable(font.family.clone()))?;
        self.text_calls += 1;
        if self.fail_text_call == Some(self.text_calls) {
            return Err(BackendError::Draw(format!("call {} failed", self.text_calls)));
        }
        let is_fallback = font.family == crate::constants::FALLBACK_FONT_FAMILY;
        if self.fail_all_text || (!is_fallback && self.fail_text.as_deref() == Some(text)) {
            return Err(BackendError::Draw(format!("cannot draw '{text}'")));
        }
        self.calls.push(Call::Text {
            x,
            y,
            text: text.to_string(),
            font: font.clone(),
            size,
        });
        Ok(())
    }

    fn draw_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        _line_width: f32,
    ) -> BackendResult<()> {
        self.calls.push(Call::Rect {
            x,
            y,
            width,
            height,
        });
        Ok(())
    }

    fn set_metadata(&mut self, info: &DocumentInfo) -> BackendResult<()> {
        self.calls.push(Call::Metadata(info.clone()));
        Ok(())
    }

    fn finalize(&mut self) -> BackendResult<Vec<u8>> {
        if self.fail_finalize {
            return Err(BackendError::Io(std::io::Error::other("disk full")));
        }
        Ok(format!("{:?}", self.calls).into_bytes())
    }
}
