use thiserror::Error;

use tftladder_core::{ClientError, ConfigError, DashboardError, StorageError, ValidationError};

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Dashboard(#[from] DashboardError),

    #[error("either a riot id or --puuid is required")]
    MissingOwner,

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) | Self::Config(_) | Self::MissingOwner => 2,
            Self::Client(error) => client_exit_code(error),
            Self::Storage(error) => storage_exit_code(error),
            Self::Dashboard(error) => dashboard_exit_code(error),
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}

fn client_exit_code(error: &ClientError) -> u8 {
    match error {
        ClientError::Validation(_) => 2,
        ClientError::Storage(error) => storage_exit_code(error),
        ClientError::Fetch { .. }
        | ClientError::MissingField { .. }
        | ClientError::UnexpectedShape { .. }
        | ClientError::NoMatches { .. } => 3,
    }
}

fn storage_exit_code(error: &StorageError) -> u8 {
    match error {
        // A missing record means a prerequisite command has not run yet.
        StorageError::InvalidKey { .. } | StorageError::NotFound { .. } => 2,
        StorageError::Serialization { .. } => 4,
        StorageError::Io { .. } => 10,
    }
}

fn dashboard_exit_code(error: &DashboardError) -> u8 {
    match error {
        DashboardError::MissingPlaceholder { .. } => 2,
        DashboardError::Storage(error) => storage_exit_code(error),
        DashboardError::Serialization(_) | DashboardError::Timestamp(_) => 4,
        DashboardError::Asset { .. } => 10,
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::PathBuf;

    use tftladder_core::{FailureKind, FetchFailure};

    use super::*;

    #[test]
    fn fetch_failures_exit_with_code_3() {
        let error = CliError::from(ClientError::Fetch {
            operation: String::from("account lookup"),
            failure: FetchFailure::new(FailureKind::HttpError(404), "HTTP error 404: Not Found"),
        });

        assert_eq!(error.exit_code(), 3);
    }

    #[test]
    fn input_and_configuration_problems_exit_with_code_2() {
        assert_eq!(CliError::from(ValidationError::InvalidPage).exit_code(), 2);
        assert_eq!(CliError::from(ConfigError::MissingApiKey).exit_code(), 2);
        assert_eq!(
            CliError::from(ClientError::Validation(ValidationError::EmptyMatchId)).exit_code(),
            2
        );
    }

    #[test]
    fn nested_storage_errors_keep_their_category() {
        let io_error = StorageError::Io {
            path: PathBuf::from("data/x.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(CliError::from(ClientError::Storage(io_error)).exit_code(), 10);

        let missing = StorageError::NotFound {
            key: String::from("somePlayer_matches"),
            dir: PathBuf::from("data"),
        };
        assert_eq!(CliError::from(DashboardError::Storage(missing)).exit_code(), 2);
    }
}
