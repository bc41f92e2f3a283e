use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    /// The backend could not be reached or the request timed out.
    #[error("language model request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("language model returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The backend answered 2xx with a body we could not read.
    #[error("invalid language model response: {0}")]
    InvalidResponse(String),
}
