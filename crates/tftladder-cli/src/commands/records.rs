use serde::Serialize;

use tftladder_core::{JsonStore, StoredRecord};

use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct RecordsResponseData {
    data_dir: String,
    records: Vec<StoredRecord>,
}

pub fn run(store: &JsonStore) -> Result<CommandResult, CliError> {
    let records = store.list()?;
    let data = serde_json::to_value(RecordsResponseData {
        data_dir: store.data_dir().display().to_string(),
        records,
    })?;
    Ok(CommandResult::ok(data))
}
