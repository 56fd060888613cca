use serde::Serialize;

use tftladder_core::{read_stored_puuid, Puuid};

use crate::cli::{Cli, PuuidArgs};
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct PuuidResponseData<'a> {
    riot_id: String,
    puuid: Puuid,
    source: &'a str,
}

pub async fn run(args: &PuuidArgs, cli: &Cli) -> Result<CommandResult, CliError> {
    let (puuid, source) = if args.stored {
        (read_stored_puuid(&super::store(cli), &args.riot_id)?, "stored")
    } else {
        let client = super::client(cli)?;
        (client.fetch_puuid(&args.riot_id).await?, "api")
    };

    let data = serde_json::to_value(PuuidResponseData {
        riot_id: args.riot_id.to_string(),
        puuid,
        source,
    })?;
    Ok(CommandResult::ok(data))
}
