use anyhow::Context;
use biz_config::BizConfig;
use biz_llm::OllamaSummarizer;

use crate::cli::GlobalFlags;

/// Load layered configuration, honouring `--config` and a local `.env`.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<BizConfig> {
    BizConfig::load_with_dotenv(flags.config.as_deref()).context("failed to load configuration")
}

/// The summarizer for this process, or `None` when the language model is
/// disabled or unconfigured.
pub fn summarizer(config: &BizConfig) -> anyhow::Result<Option<OllamaSummarizer>> {
    if !config.llm.is_configured() {
        tracing::info!("language model disabled; reports use raw insight lines");
        return Ok(None);
    }
    let summarizer =
        OllamaSummarizer::from_config(&config.llm).context("failed to build language model client")?;
    tracing::debug!(
        model = %config.llm.model,
        endpoint = summarizer.endpoint(),
        "language model configured"
    );
    Ok(Some(summarizer))
}
