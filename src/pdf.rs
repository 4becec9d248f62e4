//! lopdf implementation of the drawing backend

use crate::backend::{BackendResult, DocumentInfo, DrawingBackend};
use crate::constants::MM_PER_POINT;
use crate::error::BackendError;
use crate::font::{EstimatedMetrics, FontMetrics, FontSpec, StandardFont};
use lopdf::{
    Dictionary, Document, Object, Stream,
    content::{Content, Operation},
    dictionary,
};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, trace};

fn mm_to_pt(mm: f32) -> f32 {
    mm / MM_PER_POINT
}

/// Encode text for a WinAnsi Type1 font; characters without a WinAnsi glyph
/// become `?`
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(ch: char) -> u8 {
    match ch {
        '\u{20}'..='\u{7e}' | '\u{a0}'..='\u{ff}' => ch as u8,
        '\u{20ac}' => 0x80,
        '\u{201a}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201e}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02c6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8a,
        '\u{2039}' => 0x8b,
        '\u{0152}' => 0x8c,
        '\u{017d}' => 0x8e,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201c}' => 0x93,
        '\u{201d}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02dc}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9a,
        '\u{203a}' => 0x9b,
        '\u{0153}' => 0x9c,
        '\u{017e}' => 0x9e,
        '\u{0178}' => 0x9f,
        _ => b'?',
    }
}

/// Encode a document information string: plain ASCII as is, anything else as
/// UTF-16BE with a byte order mark
fn encode_text_string(text: &str) -> Vec<u8> {
    if text.is_ascii() {
        return text.as_bytes().to_vec();
    }
    let mut bytes = vec![0xfe, 0xff];
    bytes.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
    bytes
}

#[derive(Debug, Clone)]
struct PageBuffer {
    width: f32,
    height: f32,
    operations: Vec<Operation>,
}

/// Builds a PDF in memory with the standard Type1 fonts.
///
/// Pages are buffered as content operations and assembled into a lopdf
/// [`Document`] by `finalize`. No dates or random IDs are written, so equal
/// input gives byte-identical output.
#[derive(Default)]
pub struct PdfBackend {
    pages: Vec<PageBuffer>,
    fonts_used: BTreeSet<StandardFont>,
    metrics: BTreeMap<StandardFont, Box<dyn FontMetrics + Send + Sync>>,
    info: Option<DocumentInfo>,
}

impl PdfBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Measure `font` with real glyph metrics instead of the built-in
    /// estimates, e.g. a [`crate::font::TtfFontMetrics`] loaded from Arial
    /// for Helvetica.
    pub fn with_font_metrics(
        mut self,
        font: StandardFont,
        metrics: Box<dyn FontMetrics + Send + Sync>,
    ) -> Self {
        self.metrics.insert(font, metrics);
        self
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn resolve(font: &FontSpec) -> BackendResult<StandardFont> {
        StandardFont::resolve(font).ok_or_else(|| BackendError::FontUnavailable(font.family.clone()))
    }

    fn current_page(&mut self) -> BackendResult<&mut PageBuffer> {
        self.pages.last_mut().ok_or(BackendError::NoPage)
    }

    fn build_document(&self) -> BackendResult<Document> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut font_dict = Dictionary::new();
        for font in &self.fonts_used {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            font_dict.set(font.resource_name(), font_id);
        }
        let resources_id = doc.add_object(dictionary! {
            "Font" => font_dict,
        });

        let mut kids: Vec<Object> = Vec::with_capacity(self.pages.len());
        for page in &self.pages {
            let content = Content {
                operations: page.operations.clone(),
            };
            let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), page.width.into(), page.height.into()],
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        if let Some(info) = &self.info {
            let info_id = doc.add_object(dictionary! {
                "Creator" => Object::string_literal(encode_text_string(&info.creator)),
                "Title" => Object::string_literal(encode_text_string(&info.title)),
                "Subject" => Object::string_literal(encode_text_string(&info.subject)),
                "Producer" => Object::string_literal("wire-labels"),
            });
            doc.trailer.set("Info", info_id);
        }

        Ok(doc)
    }
}

impl std::fmt::Debug for PdfBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfBackend")
            .field("pages", &self.pages.len())
            .field("fonts_used", &self.fonts_used)
            .field("custom_metrics", &self.metrics.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl DrawingBackend for PdfBackend {
    fn begin_page(&mut self, width: f32, height: f32) -> BackendResult<()> {
        trace!("Beginning page {:.1}x{:.1}mm", width, height);
        self.pages.push(PageBuffer {
            width: mm_to_pt(width),
            height: mm_to_pt(height),
            operations: Vec::new(),
        });
        Ok(())
    }

    fn measure_text(&self, text: &str, font: &FontSpec, size: f32) -> BackendResult<f32> {
        let font = Self::resolve(font)?;
        let width_pt = match self.metrics.get(&font) {
            Some(metrics) => metrics.text_width(text, size),
            None => EstimatedMetrics::for_font(font).text_width(text, size),
        };
        if !width_pt.is_finite() {
            return Err(BackendError::Measurement(format!(
                "width of '{text}' is not finite"
            )));
        }
        Ok(width_pt * MM_PER_POINT)
    }

    fn draw_text(
        &mut self,
        x: f32,
        y: f32,
        text: &str,
        font: &FontSpec,
        size: f32,
    ) -> BackendResult<()> {
        let font = Self::resolve(font)?;
        let page = self.current_page()?;
        let baseline = page.height - mm_to_pt(y);

        page.operations.extend([
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![
                    Object::Name(font.resource_name().as_bytes().to_vec()),
                    size.into(),
                ],
            ),
            Operation::new("Td", vec![mm_to_pt(x).into(), baseline.into()]),
            Operation::new("Tj", vec![Object::string_literal(encode_win_ansi(text))]),
            Operation::new("ET", vec![]),
        ]);
        self.fonts_used.insert(font);
        Ok(())
    }

    fn draw_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        line_width: f32,
    ) -> BackendResult<()> {
        let page = self.current_page()?;
        let bottom = page.height - mm_to_pt(y + height);

        page.operations.extend([
            Operation::new("q", vec![]),
            Operation::new("RG", vec![0.into(), 0.into(), 0.into()]),
            Operation::new("w", vec![mm_to_pt(line_width).into()]),
            Operation::new(
                "re",
                vec![
                    mm_to_pt(x).into(),
                    bottom.into(),
                    mm_to_pt(width).into(),
                    mm_to_pt(height).into(),
                ],
            ),
            Operation::new("S", vec![]),
            Operation::new("Q", vec![]),
        ]);
        Ok(())
    }

    fn set_metadata(&mut self, info: &DocumentInfo) -> BackendResult<()> {
        self.info = Some(info.clone());
        Ok(())
    }

    fn finalize(&mut self) -> BackendResult<Vec<u8>> {
        let mut doc = self.build_document()?;
        doc.compress();

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| BackendError::Io(std::io::Error::other(e.to_string())))?;
        debug!(
            "Serialized {} pages into {} bytes",
            self.page_count(),
            bytes.len()
        );
        Ok(bytes)
    }
}
