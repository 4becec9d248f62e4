//! Error types for the wire-labels library

use thiserror::Error;

/// Result type alias using LabelError
pub type Result<T> = std::result::Result<T, LabelError>;

/// Errors that can occur while building or rendering a label job
#[derive(Debug, Error)]
pub enum LabelError {
    /// The job was rejected before any drawing began
    #[error("Invalid label job: {0}")]
    Validation(#[from] ValidationError),

    /// The drawing backend failed and the failure could not be recovered
    #[error("Rendering failed: {0}")]
    Render(#[from] BackendError),

    /// The finished document could not be serialized or written
    #[error("Failed to finalize document: {0}")]
    Finalization(String),

    /// Profile store I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Profile record could not be encoded or decoded
    #[error("Invalid profile record: {0}")]
    Profile(#[from] serde_json::Error),
}

/// A violated job constraint, reported before any drawing
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// No identifiers were supplied
    #[error("Job has no labels to print")]
    EmptyJob,

    /// An identifier is empty after trimming
    #[error("Identifier at position {0} is empty")]
    EmptyIdentifier(usize),

    /// A quantity below one reached the engine
    #[error("Quantity for '{0}' must be at least 1")]
    ZeroQuantity(String),

    /// Expanded label count exceeds the configured cap
    #[error("Job expands to {total} labels, maximum is {max}")]
    TooManyLabels { total: usize, max: usize },

    /// A length that must be strictly positive is not
    #[error("{field} must be greater than zero, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    /// A margin is negative
    #[error("{field} must not be negative, got {value}")]
    NegativeMargin { field: &'static str, value: f32 },

    /// Margins leave no room for text
    #[error(
        "Margins ({top} + {bottom}) consume the printable height {printable_height}; no room for text"
    )]
    NoTextArea {
        printable_height: f32,
        top: f32,
        bottom: f32,
    },

    /// Side margins leave no room for text
    #[error("Margins ({left} + {right}) consume the label width {width}; no room for text")]
    NoTextWidth { width: f32, left: f32, right: f32 },

    /// A count that must be at least one is zero
    #[error("{0} must be at least 1")]
    ZeroCount(&'static str),
}

/// Failures reported by a drawing backend
#[derive(Debug, Error)]
pub enum BackendError {
    /// The requested font family cannot be drawn
    #[error("Font '{0}' is not available")]
    FontUnavailable(String),

    /// Text could not be measured
    #[error("Text measurement failed: {0}")]
    Measurement(String),

    /// A drawing operation failed
    #[error("Drawing failed: {0}")]
    Draw(String),

    /// A drawing call arrived before any page was opened
    #[error("No page has been started")]
    NoPage,

    /// Error from the underlying lopdf library
    #[error("PDF operation failed: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Writing the serialized document failed
    #[error("Output failed: {0}")]
    Io(#[from] std::io::Error),
}
