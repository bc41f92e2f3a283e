//! Client for the Ollama `/api/generate` endpoint.

use std::time::Duration;

use biz_config::{LlmConfig, MESSAGE_PLACEHOLDER};
use serde::{Deserialize, Serialize};

use crate::{LlmError, Summarizer};

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Non-streaming Ollama client. Every call goes through the configured
/// prompt template.
#[derive(Debug, Clone)]
pub struct OllamaSummarizer {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    template: String,
}

impl OllamaSummarizer {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Request` if the HTTP client cannot be constructed.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Request(format!("build client: {e}")))?;
        Ok(Self {
            client,
            endpoint: format!("{}/api/generate", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            template: config.prompt_template.clone(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The template with `message` substituted.
    #[must_use]
    pub fn render_prompt(&self, message: &str) -> String {
        self.template.replace(MESSAGE_PLACEHOLDER, message)
    }
}

impl Summarizer for OllamaSummarizer {
    async fn summarize(&self, text: &str) -> Result<String, LlmError> {
        let prompt = self.render_prompt(text);
        tracing::debug!(model = %self.model, prompt_chars = prompt.len(), "calling language model");

        let resp = self
            .client
            .post(&self.endpoint)
            .json(&GenerateRequest {
                model: &self.model,
                prompt: &prompt,
                stream: false,
            })
            .send()
            .await
            .map_err(|e| LlmError::Request(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::Status { status, body });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| LlmError::Request(format!("read body: {e}")))?;
        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| LlmError::InvalidResponse(format!("{e}: {body}")))?;

        tracing::debug!(reply_chars = parsed.response.len(), "language model replied");
        Ok(parsed.response)
    }
}
