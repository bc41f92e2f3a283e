use biz_config::BizConfig;

use crate::cli::{Commands, GlobalFlags};
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    config: BizConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Serve(args) => commands::serve::handle(&args, config, flags).await,
        Commands::Insights(args) => commands::insights::handle(&args, config, flags).await,
        Commands::Report(args) => commands::report::handle(&args, config, flags).await,
        Commands::Schema => commands::schema::handle(),
    }
}
