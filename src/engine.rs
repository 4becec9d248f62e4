//! The label layout engine: sequencing, paging, fitting and drawing

use crate::Result;
use crate::backend::{DocumentInfo, DrawingBackend};
use crate::constants::*;
use crate::error::{BackendError, LabelError, ValidationError};
use crate::fit::fit_font_size;
use crate::font::FontSpec;
use crate::job::LabelJob;
use crate::layout::{PageLayout, Pager, PagerState};
use crate::profile::LinePlacement;
use crate::pdf::PdfBackend;
use std::path::PathBuf;
use tracing::{debug, instrument, trace, warn};

/// Limits applied to every job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub max_labels_per_job: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_labels_per_job: DEFAULT_MAX_LABELS_PER_JOB,
        }
    }
}

/// Where the finished document goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Return the serialized document
    Bytes,
    /// Write the document to this path
    File(PathBuf),
}

/// The finished document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedDocument {
    Bytes(Vec<u8>),
    Written { path: PathBuf },
}

/// What the engine drew
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Number of labels on each page, in page order
    pub labels_per_page: Vec<usize>,
    /// Labels that had to be drawn with the fallback font
    pub fallback_labels: Vec<usize>,
}

impl RenderReport {
    pub fn pages(&self) -> usize {
        self.labels_per_page.len()
    }

    pub fn labels_drawn(&self) -> usize {
        self.labels_per_page.iter().sum()
    }
}

/// Result of a successful render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutput {
    pub document: RenderedDocument,
    pub report: RenderReport,
}

/// Stateless layout engine; one call renders one job
#[derive(Debug, Clone, Default)]
pub struct LabelEngine {
    config: EngineConfig,
}

impl LabelEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Checks that depend on engine limits rather than on the job alone
    pub fn validate(&self, job: &LabelJob) -> std::result::Result<(), ValidationError> {
        let total = job.total_labels();
        if total == 0 {
            return Err(ValidationError::EmptyJob);
        }
        if total > self.config.max_labels_per_job {
            return Err(ValidationError::TooManyLabels {
                total,
                max: self.config.max_labels_per_job,
            });
        }
        Ok(())
    }

    /// Render a job with the lopdf backend
    pub fn render_pdf(&self, job: &LabelJob, output: OutputMode) -> Result<RenderOutput> {
        let mut backend = PdfBackend::new();
        self.render(job, &mut backend, output)
    }

    /// Render a job into `backend` and finalize it.
    ///
    /// Validation failures are returned before the backend is touched. A
    /// label whose font, measurement or first line fails is re-drawn once with
    /// the fallback font. A failing fallback, page or serialization aborts the
    /// job, as does a backend that fails after part of a label was drawn.
    #[instrument(
        skip(self, job, backend),
        fields(labels = job.total_labels(), profile = job.profile().name())
    )]
    pub fn render<B: DrawingBackend + ?Sized>(
        &self,
        job: &LabelJob,
        backend: &mut B,
        output: OutputMode,
    ) -> Result<RenderOutput> {
        self.validate(job)?;

        let frame = job.profile().frame(job.geometry());
        let layout = job.layout().resolve(frame);
        debug!(
            "Page {:.1}x{:.1}mm, {} labels per page ({}x{})",
            layout.page_width,
            layout.page_height,
            layout.capacity(),
            layout.labels_per_row,
            layout.labels_per_column
        );

        backend.set_metadata(&document_info(job))?;

        let mut pager = Pager::new(layout.capacity());
        let mut report = RenderReport::default();

        for instance in job.instances() {
            let placement = pager.place();
            if placement.new_page {
                debug!("Starting page {}", placement.page + 1);
                backend.begin_page(layout.page_width, layout.page_height)?;
                report.labels_per_page.push(0);
            }

            let origin = layout.slot(placement.index_on_page);
            trace!(
                "Label {} '{}' on page {} at ({:.2}, {:.2})",
                instance.index,
                instance.text,
                placement.page + 1,
                origin.0,
                origin.1
            );

            match draw_label(job, backend, instance.text, origin) {
                Ok(()) => {}
                Err(LabelFailure::Clean(err)) => {
                    warn!(
                        "Label {} '{}' could not be drawn ({}), using fallback font",
                        instance.index, instance.text, err
                    );
                    draw_fallback(job, backend, instance.text, origin)?;
                    report.fallback_labels.push(instance.index);
                }
                Err(LabelFailure::Partial(err)) => {
                    warn!(
                        "Label {} '{}' failed after some lines were drawn: {}",
                        instance.index, instance.text, err
                    );
                    return Err(err.into());
                }
            }

            if let Some(count) = report.labels_per_page.last_mut() {
                *count += 1;
            }
            if pager.state() == PagerState::PageFull {
                trace!("Page {} full", pager.page_count());
            }
        }

        let document = finalize(backend, output)?;
        debug!(
            "Rendered {} labels on {} pages",
            report.labels_drawn(),
            pager.page_count()
        );
        Ok(RenderOutput { document, report })
    }
}

fn document_info(job: &LabelJob) -> DocumentInfo {
    DocumentInfo {
        creator: "Wire Label Generator".to_string(),
        title: format!(
            "Wire Labels: {} types, {} total",
            job.pairs().len(),
            job.total_labels()
        ),
        subject: format!("Wire labels for {}", job.profile().name()),
    }
}

/// Why a label could not be drawn
enum LabelFailure {
    /// No text of the label reached the page; the fallback can replace it
    Clean(BackendError),
    /// The backend failed after some lines were drawn
    Partial(BackendError),
}

/// Everything needed to draw one label, computed before any draw call
struct LabelPlan {
    font: FontSpec,
    size: f32,
    frame: (f32, f32),
    lines: Vec<LinePlacement>,
}

/// Resolve, measure and fit the label text and place its lines
fn plan_label<B: DrawingBackend + ?Sized>(
    job: &LabelJob,
    backend: &B,
    text: &str,
    origin: (f32, f32),
) -> std::result::Result<LabelPlan, BackendError> {
    let profile = job.profile();
    let geometry = job.geometry();
    let typography = job.typography();
    let lines = job.lines_per_label();

    let font = typography.font();
    let area = profile.text_area(geometry, lines);
    let fitted = fit_font_size(
        backend,
        text,
        &font,
        typography.font_size,
        typography.auto_size,
        area,
    )?;
    let size = profile.resolve_font_size(typography, fitted);

    // measuring also proves the font can be drawn
    let text_width = backend.measure_text(text, &font, size)?;
    let text_width = if profile.centers_text() {
        text_width
    } else {
        0.0
    };

    Ok(LabelPlan {
        lines: profile.place_lines(geometry, origin, lines, size, text_width),
        frame: profile.frame(geometry),
        font,
        size,
    })
}

/// Draw border and repeated lines of one label at `origin`.
///
/// Fonts, sizes and positions are settled before the first draw call. A
/// failure up to and including the first text line is `Clean` and the label
/// is replaced by the fallback; a failure on a later line is `Partial`, since
/// lines already on the page cannot be taken back, and aborts the job.
fn draw_label<B: DrawingBackend + ?Sized>(
    job: &LabelJob,
    backend: &mut B,
    text: &str,
    origin: (f32, f32),
) -> std::result::Result<(), LabelFailure> {
    let plan = plan_label(job, backend, text, origin).map_err(LabelFailure::Clean)?;

    if let Some(border) = job.border() {
        let (width, height) = plan.frame;
        backend
            .draw_rect(origin.0, origin.1, width, height, border.width)
            .map_err(LabelFailure::Clean)?;
    }

    for (i, line) in plan.lines.iter().enumerate() {
        backend
            .draw_text(line.x, line.baseline, text, &plan.font, plan.size)
            .map_err(|err| {
                if i == 0 {
                    LabelFailure::Clean(err)
                } else {
                    LabelFailure::Partial(err)
                }
            })?;
    }
    Ok(())
}

/// Single centered line in the fallback font, at the label's vertical middle
fn draw_fallback<B: DrawingBackend + ?Sized>(
    job: &LabelJob,
    backend: &mut B,
    text: &str,
    origin: (f32, f32),
) -> std::result::Result<(), BackendError> {
    let profile = job.profile();
    let font = FontSpec::new(FALLBACK_FONT_FAMILY, job.typography().bold);
    let size = FALLBACK_FONT_SIZE.min(job.typography().font_size);

    let (width, height) = profile.frame(job.geometry());
    let margins = profile.margins(job.geometry());
    let available = width - margins.left - margins.right;
    let text_width = backend.measure_text(text, &font, size)?;

    let x = origin.0 + margins.left + (available - text_width) / 2.0;
    let baseline = origin.1 + height / 2.0 + size * MM_PER_POINT * 0.35;
    backend.draw_text(x, baseline, text, &font, size)
}

fn finalize<B: DrawingBackend + ?Sized>(
    backend: &mut B,
    output: OutputMode,
) -> Result<RenderedDocument> {
    let bytes = backend
        .finalize()
        .map_err(|e| LabelError::Finalization(e.to_string()))?;
    if bytes.is_empty() {
        return Err(LabelError::Finalization(
            "backend produced an empty document".to_string(),
        ));
    }

    match output {
        OutputMode::Bytes => Ok(RenderedDocument::Bytes(bytes)),
        OutputMode::File(path) => {
            std::fs::write(&path, &bytes).map_err(|e| {
                LabelError::Finalization(format!("cannot write {}: {e}", path.display()))
            })?;
            debug!("Wrote {} bytes to {}", bytes.len(), path.display());
            Ok(RenderedDocument::Written { path })
        }
    }
}

/// Page geometry a job will be laid out on
pub fn page_layout(job: &LabelJob) -> PageLayout {
    job.layout().resolve(job.profile().frame(job.geometry()))
}
