//! A layout engine for repeated-text wire labels, rendering PDFs with lopdf
//!
//! Each wire identifier is printed `quantity` times. Every physical label
//! carries the identifier on several repeated lines so it stays readable once
//! the label is wrapped around a wire. Labels are placed on pages by a
//! [`PageLayoutPolicy`], positioned inside the label by a [`PrinterProfile`],
//! and optionally shrunk to fit by the auto-size search.
//!
//! ```no_run
//! use wire_labels::{LabelEngine, LabelJob, OutputMode, PageLayoutPolicy};
//!
//! let job = LabelJob::builder()
//!     .labels(vec![("W-100", 3), ("W-101", 2)])
//!     .layout(PageLayoutPolicy::per_row(4, 155.0))
//!     .build()?;
//! let output = LabelEngine::default().render_pdf(&job, OutputMode::File("labels.pdf".into()))?;
//! println!("{} pages", output.report.pages());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod backend;
pub mod constants;
pub mod engine;
pub mod error;
pub mod fit;
pub mod font;
pub mod geometry;
pub mod input;
pub mod job;
pub mod layout;
pub mod pdf;
pub mod profile;
pub mod sequence;
pub mod settings;
pub mod style;

#[cfg(test)]
mod testing;

pub use backend::{DocumentInfo, DrawingBackend};
pub use engine::{EngineConfig, LabelEngine, OutputMode, RenderOutput, RenderReport, RenderedDocument};
pub use error::{BackendError, LabelError, Result, ValidationError};
pub use font::{FontMetrics, FontSpec, StandardFont};
#[cfg(feature = "ttf-parser")]
pub use font::TtfFontMetrics;
pub use geometry::{LabelGeometry, Margins};
pub use input::{InputFormat, parse_input};
pub use job::{LabelJob, LabelJobBuilder};
pub use layout::PageLayoutPolicy;
pub use pdf::PdfBackend;
pub use profile::{PrinterProfile, ThermalTopOffset};
pub use settings::{JsonProfileStore, LabelSettings, LayoutKind, ProfileStore};
pub use style::{BorderStyle, Typography};

/// Parse `text` in `format`, apply `settings` and render the labels to a PDF
pub fn render_labels(
    text: &str,
    format: InputFormat,
    settings: &LabelSettings,
    output: OutputMode,
) -> Result<RenderOutput> {
    let pairs = parse_input(text, format);
    let job = settings.to_job(pairs)?;
    LabelEngine::default().render_pdf(&job, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_labels_from_text() {
        let output = render_labels(
            "W-100,2\nW-101\n",
            InputFormat::Manual,
            &LabelSettings::default(),
            OutputMode::Bytes,
        )
        .unwrap();
        assert_eq!(output.report.labels_drawn(), 3);
        assert_eq!(output.report.pages(), 1);
    }

    #[test]
    fn test_render_labels_rejects_empty_input() {
        let err = render_labels(
            "\n\n",
            InputFormat::Csv,
            &LabelSettings::default(),
            OutputMode::Bytes,
        )
        .unwrap_err();
        assert!(matches!(err, LabelError::Validation(ValidationError::EmptyJob)));
    }
}
