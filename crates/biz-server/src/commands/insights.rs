use std::sync::Arc;

use biz_config::BizConfig;
use biz_core::responses::UploadResponse;
use biz_llm::OllamaSummarizer;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InsightsArgs;
use crate::output::output;
use crate::pipeline::ReportPipeline;

/// Handle `autobiz insights`.
pub async fn handle(
    args: &InsightsArgs,
    config: BizConfig,
    _flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let pipeline = ReportPipeline::<OllamaSummarizer>::new(Arc::new(config), None);
    let insights = pipeline.insight_lines(args.csv.clone()).await?;
    output(&UploadResponse { insights })
}
