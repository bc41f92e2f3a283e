//! Report composition error types.

/// Errors that can occur while writing a report.
///
/// A missing chart image is not one of them; see
/// [`MissingImageWarning`](crate::MissingImageWarning).
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The reports directory or the PDF file could not be written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The PDF document could not be built or serialized.
    #[error("PDF error: {0}")]
    Pdf(String),
}

impl ReportError {
    pub(crate) fn pdf(error: impl std::fmt::Display) -> Self {
        Self::Pdf(error.to_string())
    }
}
