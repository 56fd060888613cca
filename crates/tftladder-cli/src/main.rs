mod cli;
mod commands;
mod error;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::error::CliError;

const LOG_JSON_ENV: &str = "TFTLADDER_LOG_JSON";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Loaded before tracing so RUST_LOG may come from .env; reported after.
    let dotenv = DotenvStatus::from_result(dotenvy::dotenv());
    init_tracing();
    dotenv.report();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<(), CliError> {
    let cli = Cli::parse();

    let result = commands::run(&cli).await?;
    output::render(commands::command_name(&cli.command), &result, cli.pretty)
}

/// Outcome of looking for a `.env` file.
#[derive(Debug)]
enum DotenvStatus {
    Loaded(PathBuf),
    Missing,
    Invalid(dotenvy::Error),
}

impl DotenvStatus {
    fn from_result(result: Result<PathBuf, dotenvy::Error>) -> Self {
        match result {
            Ok(path) => Self::Loaded(path),
            Err(error) if error.not_found() => Self::Missing,
            Err(error) => Self::Invalid(error),
        }
    }

    fn report(&self) {
        match self {
            Self::Loaded(path) => debug!(path = %path.display(), "loaded .env"),
            Self::Missing => debug!("no .env file found, using the process environment"),
            Self::Invalid(error) => warn!(%error, "ignoring unreadable .env file"),
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Logs go to stderr so stdout stays a single JSON document.
    if env_bool(LOG_JSON_ENV) {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn env_bool(name: &str) -> bool {
    std::env::var(name)
        .map(|value| matches!(value.trim(), "1" | "true" | "TRUE" | "yes"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn load(path: PathBuf) -> DotenvStatus {
        DotenvStatus::from_result(dotenvy::from_path(&path).map(|()| path))
    }

    #[test]
    fn missing_dotenv_file_is_not_an_error() {
        let dir = tempdir().expect("tempdir");

        assert!(matches!(load(dir.path().join(".env")), DotenvStatus::Missing));
    }

    #[test]
    fn malformed_dotenv_file_is_reported_as_invalid() {
        // Given: A .env file with an unterminated quote
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join(".env");
        fs::write(&path, "TFTLADDER_DOTENV_TEST_KEY=\"unterminated\n").expect("write");

        // When: It is loaded
        let status = load(path);

        // Then: The parse failure is kept instead of looking like a missing file
        assert!(matches!(status, DotenvStatus::Invalid(_)));
    }

    #[test]
    fn well_formed_dotenv_file_is_loaded() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join(".env");
        fs::write(&path, "TFTLADDER_DOTENV_LOADED_TEST=1\n").expect("write");

        assert!(matches!(load(path.clone()), DotenvStatus::Loaded(loaded) if loaded == path));
    }
}
