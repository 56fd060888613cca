use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use tftladder_core::dashboard::render;
use tftladder_core::{DashboardAssets, DashboardSnapshot, JsonStore};

use crate::cli::DashboardArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct DashboardResponseData {
    path: PathBuf,
    records: usize,
    generated_at: String,
}

pub fn run(args: &DashboardArgs, store: &JsonStore) -> Result<CommandResult, CliError> {
    let assets = match &args.assets {
        Some(dir) => DashboardAssets::from_dir(dir)?,
        None => DashboardAssets::default(),
    };
    let snapshot = DashboardSnapshot::collect(store)?;
    let html = render(&assets, &snapshot)?;

    if let Some(parent) = args.out.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&args.out, html)?;
    info!(path = %args.out.display(), records = snapshot.records.len(), "dashboard written");

    let mut result = CommandResult::ok(serde_json::to_value(DashboardResponseData {
        path: args.out.clone(),
        records: snapshot.records.len(),
        generated_at: snapshot.generated_at,
    })?);
    if snapshot.records.is_empty() {
        result = result.with_warning(format!(
            "no records found in {}",
            store.data_dir().display()
        ));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn dashboard_is_written_with_embedded_records() {
        // Given: One stored record
        let dir = tempdir().expect("tempdir");
        let store = JsonStore::new(dir.path().join("data"));
        store
            .save("userByLeague_GOLD_II_1", &json!([{"summonerId": "s"}]))
            .expect("save");
        let args = DashboardArgs {
            assets: None,
            out: dir.path().join("site").join("dashboard.html"),
        };

        // When: The dashboard command runs
        let result = run(&args, &store).expect("dashboard");

        // Then: The page exists and mentions the record
        let html = fs::read_to_string(&args.out).expect("read output");
        assert!(html.contains("userByLeague_GOLD_II_1"));
        assert_eq!(result.data["records"], json!(1));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn empty_store_renders_with_a_warning() {
        let dir = tempdir().expect("tempdir");
        let store = JsonStore::new(dir.path().join("data"));
        let args = DashboardArgs {
            assets: None,
            out: dir.path().join("dashboard.html"),
        };

        let result = run(&args, &store).expect("dashboard");

        assert_eq!(result.warnings.len(), 1);
        assert!(args.out.is_file());
    }

    #[test]
    fn missing_asset_directory_fails_with_io_exit_code() {
        let dir = tempdir().expect("tempdir");
        let args = DashboardArgs {
            assets: Some(dir.path().join("nope")),
            out: dir.path().join("dashboard.html"),
        };

        let err = run(&args, &JsonStore::new(dir.path())).err().expect("must fail");
        assert_eq!(err.exit_code(), 10);
    }
}
