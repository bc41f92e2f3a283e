use std::sync::Arc;

use biz_config::BizConfig;
use biz_core::responses::ReportResponse;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::ReportArgs;
use crate::output::output;
use crate::pipeline::{OfflineOptions, ReportPipeline};

/// Handle `autobiz report`.
pub async fn handle(args: &ReportArgs, config: BizConfig, _flags: &GlobalFlags) -> anyhow::Result<()> {
    let summarizer = if args.no_summary {
        None
    } else {
        bootstrap::summarizer(&config)?
    };
    let pipeline = ReportPipeline::new(Arc::new(config), summarizer);

    let options = OfflineOptions {
        title: args.title.clone(),
        output: args.output.clone(),
        summarize: !args.no_summary,
    };
    let path = pipeline.offline_report(args.csv.clone(), options).await?;
    output(&ReportResponse::from_path(&path.to_string_lossy()))
}
