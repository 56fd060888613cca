mod dashboard;
mod ladder;
mod matches;
mod puuid;
mod records;

use std::time::Duration;

use serde_json::Value;
use tftladder_core::{ClientConfig, JsonStore, LadderClient, RetryConfig};

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            warnings: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }
}

pub async fn run(cli: &Cli) -> Result<CommandResult, CliError> {
    match &cli.command {
        Command::Puuid(args) => puuid::run(args, cli).await,
        Command::Matches(args) => matches::run_ids(args, &client(cli)?).await,
        Command::Match(args) => matches::run_detail(args, &client(cli)?).await,
        Command::Latest(args) => matches::run_latest(args, &client(cli)?).await,
        Command::MatchDetails(args) => matches::run_details(args, &client(cli)?).await,
        Command::Ladder(args) => {
            let config =
                client_config(cli)?.with_page_delay(Duration::from_secs(args.page_delay_secs));
            ladder::run(args, &LadderClient::new(&config)).await
        }
        Command::Dashboard(args) => dashboard::run(args, &store(cli)),
        Command::Records => records::run(&store(cli)),
    }
}

pub const fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Puuid(_) => "puuid",
        Command::Matches(_) => "matches",
        Command::Match(_) => "match",
        Command::Latest(_) => "latest",
        Command::MatchDetails(_) => "match-details",
        Command::Ladder(_) => "ladder",
        Command::Dashboard(_) => "dashboard",
        Command::Records => "records",
    }
}

fn retry_config(cli: &Cli) -> RetryConfig {
    RetryConfig::new(
        Duration::from_secs(cli.timeout_secs),
        cli.max_retries,
        Duration::from_secs(cli.backoff_secs),
    )
}

fn client_config(cli: &Cli) -> Result<ClientConfig, CliError> {
    Ok(ClientConfig::from_env(cli.platform)?
        .with_data_dir(cli.data_dir.clone())
        .with_retry(retry_config(cli)))
}

fn client(cli: &Cli) -> Result<LadderClient, CliError> {
    Ok(LadderClient::new(&client_config(cli)?))
}

fn store(cli: &Cli) -> JsonStore {
    JsonStore::new(cli.data_dir.clone())
}
