//! Service-level failures and their HTTP status codes.

use biz_analysis::AnalysisError;
use biz_charts::ChartError;
use biz_core::ids::IdError;
use biz_llm::LlmError;
use biz_report::ReportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: u64 },

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Chart(#[from] ChartError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("language model is disabled")]
    LlmDisabled,

    #[error(transparent)]
    RequestId(#[from] IdError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// HTTP status this error is answered with.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::NotFound(_) => 404,
            Self::PayloadTooLarge { .. } => 413,
            Self::Analysis(error) | Self::Chart(ChartError::Analysis(error)) => {
                analysis_status(error)
            }
            Self::Llm(_) => 502,
            Self::LlmDisabled => 503,
            Self::Chart(_)
            | Self::Report(_)
            | Self::RequestId(_)
            | Self::Io(_)
            | Self::Internal(_) => 500,
        }
    }

    /// Join failure of a blocking pipeline task.
    pub fn join(error: &tokio::task::JoinError) -> Self {
        Self::Internal(format!("pipeline task failed: {error}"))
    }
}

const fn analysis_status(error: &AnalysisError) -> u16 {
    match error {
        AnalysisError::MissingColumn(_) => 422,
        AnalysisError::DataFormat(_) | AnalysisError::NonNumericValue { .. } => 400,
        AnalysisError::Io { .. } => 500,
    }
}
