use std::sync::Arc;

use biz_config::BizConfig;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::ServeArgs;
use crate::server;
use crate::service::Service;

/// Handle `autobiz serve`.
pub async fn handle(args: &ServeArgs, config: BizConfig, _flags: &GlobalFlags) -> anyhow::Result<()> {
    let bind = args.bind.clone().unwrap_or_else(|| config.server.bind.clone());
    let summarizer = bootstrap::summarizer(&config)?;
    tracing::info!(
        base_dir = %config.storage.base_dir.display(),
        max_upload_bytes = config.server.max_upload_bytes,
        "starting service"
    );
    let service = Service::new(Arc::new(config), summarizer);
    server::serve(service, &bind).await
}
