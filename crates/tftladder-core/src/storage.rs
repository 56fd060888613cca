//! Flat-file JSON storage for fetched payloads.
//!
//! Every payload lands in `<data_dir>/<key>.json`, pretty-printed with a
//! four-space indent. Keys are plain file stems; [`RecordKey`] builds the
//! stems used by the fetch operations.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info};

use crate::{Division, RiotId, Tier};

const JSON_EXTENSION: &str = "json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid record key '{key}': keys must be plain file names")]
    InvalidKey { key: String },

    #[error("record '{key}' not found in {dir}")]
    NotFound { key: String, dir: PathBuf },

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode or decode {path}: {source}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Naming conventions for persisted payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordKey {
    /// Account lookup, `{game_name}_{tag_line}`.
    Account { riot_id: RiotId },
    /// Match id list, `{owner}_matches`. Owner is a game name or a puuid.
    MatchIds { owner: String },
    /// Single match detail, `matchID_{match_id}_info`.
    LatestMatch { match_id: String },
    /// Match detail fetched for a player's stored list, `{game_name}_match_stat_{match_id}`.
    MatchStat { game_name: String, match_id: String },
    /// Ladder page, `userByLeague_{tier}_{division}_{page}`.
    LeaguePage {
        tier: Tier,
        division: Division,
        page: u32,
    },
}

impl RecordKey {
    pub fn file_stem(&self) -> String {
        match self {
            Self::Account { riot_id } => {
                format!("{}_{}", riot_id.game_name(), riot_id.tag_line())
            }
            Self::MatchIds { owner } => format!("{owner}_matches"),
            Self::LatestMatch { match_id } => format!("matchID_{match_id}_info"),
            Self::MatchStat {
                game_name,
                match_id,
            } => format!("{game_name}_match_stat_{match_id}"),
            Self::LeaguePage {
                tier,
                division,
                page,
            } => format!("userByLeague_{tier}_{division}_{page}"),
        }
    }
}

/// Summary of one persisted file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredRecord {
    pub key: String,
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Directory-backed JSON writer and reader.
#[derive(Debug, Clone)]
pub struct JsonStore {
    data_dir: PathBuf,
}

impl JsonStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.data_dir.join(format!("{key}.{JSON_EXTENSION}")))
    }

    /// Serialize `payload` to `<data_dir>/<key>.json`, creating the directory if needed.
    pub fn save<T>(&self, key: &str, payload: &T) -> Result<PathBuf, StorageError>
    where
        T: Serialize + ?Sized,
    {
        let path = self.path_for(key)?;

        fs::create_dir_all(&self.data_dir).map_err(|source| StorageError::Io {
            path: self.data_dir.clone(),
            source,
        })?;

        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        payload
            .serialize(&mut serializer)
            .map_err(|source| StorageError::Serialization {
                path: path.clone(),
                source,
            })?;

        if let Err(source) = fs::write(&path, &buffer) {
            error!(path = %path.display(), error = %source, "failed to save data");
            return Err(StorageError::Io { path, source });
        }

        info!(path = %path.display(), "data saved");
        Ok(path)
    }

    pub fn save_record<T>(&self, key: &RecordKey, payload: &T) -> Result<PathBuf, StorageError>
    where
        T: Serialize + ?Sized,
    {
        self.save(&key.file_stem(), payload)
    }

    pub fn exists(&self, key: &str) -> bool {
        self.path_for(key).map(|path| path.is_file()).unwrap_or(false)
    }

    pub fn load(&self, key: &str) -> Result<Value, StorageError> {
        let path = self.path_for(key)?;
        let contents = match fs::read(&path) {
            Ok(contents) => contents,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound {
                    key: key.to_owned(),
                    dir: self.data_dir.clone(),
                });
            }
            Err(source) => return Err(StorageError::Io { path, source }),
        };

        serde_json::from_slice(&contents).map_err(|source| StorageError::Serialization { path, source })
    }

    pub fn load_record(&self, key: &RecordKey) -> Result<Value, StorageError> {
        self.load(&key.file_stem())
    }

    /// All `.json` files in the data directory, sorted by key. A missing directory is empty.
    pub fn list(&self) -> Result<Vec<StoredRecord>, StorageError> {
        let entries = match fs::read_dir(&self.data_dir) {
            Ok(entries) => entries,
            Err(source) if source.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.data_dir.clone(),
                    source,
                })
            }
        };

        let mut records = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StorageError::Io {
                path: self.data_dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(JSON_EXTENSION) {
                continue;
            }
            let Some(key) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let metadata = entry.metadata().map_err(|source| StorageError::Io {
                path: path.clone(),
                source,
            })?;
            if !metadata.is_file() {
                continue;
            }

            records.push(StoredRecord {
                key: key.to_owned(),
                size_bytes: metadata.len(),
                path,
            });
        }

        records.sort_by(|left, right| left.key.cmp(&right.key));
        Ok(records)
    }
}

fn validate_key(key: &str) -> Result<(), StorageError> {
    let invalid = key.trim().is_empty()
        || key.contains('/')
        || key.contains('\\')
        || key.contains("..")
        || key.contains('\0');
    if invalid {
        return Err(StorageError::InvalidKey {
            key: key.to_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn record_keys_follow_file_naming_conventions() {
        let riot_id = RiotId::new("somePlayer", "NA").expect("valid");

        assert_eq!(RecordKey::Account { riot_id }.file_stem(), "somePlayer_NA");
        assert_eq!(
            RecordKey::MatchIds {
                owner: String::from("somePlayer")
            }
            .file_stem(),
            "somePlayer_matches"
        );
        assert_eq!(
            RecordKey::LatestMatch {
                match_id: String::from("EUW1_42")
            }
            .file_stem(),
            "matchID_EUW1_42_info"
        );
        assert_eq!(
            RecordKey::MatchStat {
                game_name: String::from("somePlayer"),
                match_id: String::from("EUW1_42")
            }
            .file_stem(),
            "somePlayer_match_stat_EUW1_42"
        );
        assert_eq!(
            RecordKey::LeaguePage {
                tier: Tier::Gold,
                division: Division::IV,
                page: 2
            }
            .file_stem(),
            "userByLeague_GOLD_IV_2"
        );
    }

    #[test]
    fn save_creates_directory_and_pretty_prints() {
        let dir = tempdir().expect("tempdir");
        let store = JsonStore::new(dir.path().join("nested").join("data"));

        let path = store
            .save("player_EUW", &json!({"puuid": "abc123"}))
            .expect("save should succeed");

        let written = fs::read_to_string(&path).expect("file exists");
        assert_eq!(written, "{\n    \"puuid\": \"abc123\"\n}");
        assert_eq!(
            store.load("player_EUW").expect("load"),
            json!({"puuid": "abc123"})
        );
    }

    #[test]
    fn rejects_path_traversal_keys() {
        let dir = tempdir().expect("tempdir");
        let store = JsonStore::new(dir.path());

        for key in ["../escape", "a/b", "", "a\\b"] {
            let err = store.save(key, &json!({})).expect_err("must fail");
            assert!(matches!(err, StorageError::InvalidKey { .. }), "key {key:?}");
        }
    }

    #[test]
    fn load_missing_record_reports_not_found() {
        let dir = tempdir().expect("tempdir");
        let store = JsonStore::new(dir.path());

        let err = store.load("nobody_matches").expect_err("must fail");
        assert!(matches!(err, StorageError::NotFound { .. }));
        assert!(!store.exists("nobody_matches"));
    }

    #[test]
    fn list_returns_sorted_json_records_only() {
        let dir = tempdir().expect("tempdir");
        let store = JsonStore::new(dir.path());
        store.save("b_matches", &json!(["x"])).expect("save");
        store.save("a_EUW", &json!({"puuid": "p"})).expect("save");
        fs::write(dir.path().join("notes.txt"), "ignored").expect("write");

        let keys: Vec<_> = store
            .list()
            .expect("list")
            .into_iter()
            .map(|record| record.key)
            .collect();
        assert_eq!(keys, vec!["a_EUW", "b_matches"]);
    }

    #[test]
    fn list_of_missing_directory_is_empty() {
        let dir = tempdir().expect("tempdir");
        let store = JsonStore::new(dir.path().join("absent"));

        assert!(store.list().expect("list").is_empty());
    }
}
