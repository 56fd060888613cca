use tftladder_core::LadderClient;

use crate::cli::LadderArgs;
use crate::error::CliError;

use super::CommandResult;

pub async fn run(args: &LadderArgs, client: &LadderClient) -> Result<CommandResult, CliError> {
    let summary = client
        .fetch_ladder(args.tier, args.division, args.page, args.max_pages)
        .await?;

    let mut result = CommandResult::ok(serde_json::to_value(&summary)?);
    if let Some(next_page) = summary.next_page {
        result = result.with_warning(format!(
            "page limit reached; resume with --page {next_page}"
        ));
    }
    Ok(result)
}
