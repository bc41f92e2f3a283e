//! Chart rendering error types.

/// Errors that can occur while rendering charts.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    /// The output directory could not be created.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The aggregates behind a chart could not be computed.
    #[error(transparent)]
    Analysis(#[from] biz_analysis::AnalysisError),

    /// Plotting or PNG encoding failed.
    #[error("Chart drawing failed: {0}")]
    Draw(String),
}

impl ChartError {
    pub(crate) fn draw(error: impl std::fmt::Display) -> Self {
        Self::Draw(error.to_string())
    }
}
