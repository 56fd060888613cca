use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;

use tftladder_core::{LadderClient, MatchOwner};

use crate::cli::{MatchArgs, MatchDetailsArgs, MatchesArgs, OwnerArgs};
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct MatchIdsResponseData {
    owner: String,
    match_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
struct MatchResponseData {
    #[serde(rename = "match")]
    detail: Value,
}

#[derive(Debug, Serialize)]
struct MatchDetailsResponseData {
    game_name: String,
    files: Vec<PathBuf>,
}

pub async fn run_ids(args: &MatchesArgs, client: &LadderClient) -> Result<CommandResult, CliError> {
    let owner = owner(&args.owner)?;
    let match_ids = client.fetch_match_ids(&owner, args.count).await?;

    let mut result = CommandResult::ok(serde_json::to_value(MatchIdsResponseData {
        owner: owner.to_string(),
        match_ids: match_ids.clone(),
    })?);
    if match_ids.is_empty() {
        result = result.with_warning(format!("no matches found for {owner}"));
    }
    Ok(result)
}

pub async fn run_detail(args: &MatchArgs, client: &LadderClient) -> Result<CommandResult, CliError> {
    let detail = client.fetch_match_detail(&args.match_id).await?;
    Ok(CommandResult::ok(serde_json::to_value(MatchResponseData {
        detail,
    })?))
}

pub async fn run_latest(args: &OwnerArgs, client: &LadderClient) -> Result<CommandResult, CliError> {
    let detail = client.fetch_latest_match(&owner(args)?).await?;
    Ok(CommandResult::ok(serde_json::to_value(MatchResponseData {
        detail,
    })?))
}

pub async fn run_details(
    args: &MatchDetailsArgs,
    client: &LadderClient,
) -> Result<CommandResult, CliError> {
    let files = client.fetch_match_details(&args.game_name).await?;

    let mut result = CommandResult::ok(serde_json::to_value(MatchDetailsResponseData {
        game_name: args.game_name.clone(),
        files: files.clone(),
    })?);
    if files.is_empty() {
        result = result.with_warning(format!(
            "stored match list for {} is empty",
            args.game_name
        ));
    }
    Ok(result)
}

fn owner(args: &OwnerArgs) -> Result<MatchOwner, CliError> {
    args.owner().ok_or(CliError::MissingOwner)
}
