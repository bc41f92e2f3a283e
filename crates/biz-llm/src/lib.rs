//! # biz-llm
//!
//! Narrative summaries from a language model.
//!
//! [`Summarizer`] is the seam the rest of the workspace depends on; the
//! binary builds one [`OllamaSummarizer`] from configuration and hands it to
//! whatever needs it. Calls are attempted once, without retry.

mod error;
mod ollama;

use std::future::Future;

pub use error::LlmError;
pub use ollama::OllamaSummarizer;

/// Turns free text into a model-written reply.
pub trait Summarizer: Send + Sync {
    /// Send `text` through the backend's prompt template and return the reply.
    fn summarize(&self, text: &str) -> impl Future<Output = Result<String, LlmError>> + Send;
}
