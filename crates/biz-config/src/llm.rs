//! Language-model backend configuration.

use serde::{Deserialize, Serialize};

/// Placeholder replaced by the caller's text in `prompt_template`.
pub const MESSAGE_PLACEHOLDER: &str = "{message}";

const fn default_enabled() -> bool {
    true
}

fn default_base_url() -> String {
    String::from("http://localhost:11434")
}

fn default_model() -> String {
    String::from("deepseek-coder:33b")
}

fn default_prompt_template() -> String {
    String::from("Answer this prompt as a coding expert:\n\n{message}")
}

fn default_summary_prompt() -> String {
    String::from("Summarize these CSV insights in a professional business report:")
}

const fn default_timeout_secs() -> u64 {
    300
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    /// When false, reports use the raw insight lines and `/agent/` answers 503.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Ollama-compatible server root.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model name passed to the backend.
    #[serde(default = "default_model")]
    pub model: String,

    /// Template applied to every call; must contain `{message}`.
    #[serde(default = "default_prompt_template")]
    pub prompt_template: String,

    /// Instruction placed before the insight lines when summarizing a report.
    #[serde(default = "default_summary_prompt")]
    pub summary_prompt: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            base_url: default_base_url(),
            model: default_model(),
            prompt_template: default_prompt_template(),
            summary_prompt: default_summary_prompt(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LlmConfig {
    /// Enabled and pointing at a backend and model.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.enabled && !self.base_url.is_empty() && !self.model.is_empty()
    }
}
