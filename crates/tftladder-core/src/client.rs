//! Fetch operations: build a URL, run it through the executor, persist the payload.
//!
//! Any executor failure stops the operation and surfaces as
//! [`ClientError::Fetch`]; nothing continues with missing data.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::ClientConfig;
use crate::endpoints::Endpoints;
use crate::executor::{FetchFailure, FetchSuccess, RequestExecutor};
use crate::http_client::{HttpAuth, HttpClient, ReqwestHttpClient};
use crate::retry::{Sleeper, TokioSleeper};
use crate::storage::{JsonStore, RecordKey, StorageError};
use crate::{Division, Puuid, RiotId, Tier, ValidationError};

/// Upper bound accepted by the match-id listing endpoint.
pub const MAX_MATCH_COUNT: u32 = 200;

/// Match count used when the caller does not pick one.
pub const DEFAULT_MATCH_COUNT: u32 = 5;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{operation} failed: {failure}")]
    Fetch {
        operation: String,
        #[source]
        failure: FetchFailure,
    },

    #[error("{operation} response is missing '{field}'")]
    MissingField {
        operation: String,
        field: &'static str,
    },

    #[error("{operation} response has unexpected shape: expected {expected}")]
    UnexpectedShape {
        operation: String,
        expected: &'static str,
    },

    #[error("no matches found for {owner}")]
    NoMatches { owner: String },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ClientError {
    pub fn failure(&self) -> Option<&FetchFailure> {
        match self {
            Self::Fetch { failure, .. } => Some(failure),
            _ => None,
        }
    }
}

/// Whose matches to list: a riot id (resolved to a puuid first) or a known puuid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOwner {
    RiotId(RiotId),
    Puuid(Puuid),
}

impl MatchOwner {
    /// Stem owner used for the stored match list: the game name when known.
    pub fn storage_name(&self) -> &str {
        match self {
            Self::RiotId(riot_id) => riot_id.game_name(),
            Self::Puuid(puuid) => puuid.as_str(),
        }
    }
}

impl std::fmt::Display for MatchOwner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RiotId(riot_id) => write!(f, "{riot_id}"),
            Self::Puuid(puuid) => write!(f, "puuid {puuid}"),
        }
    }
}

/// One fetched ladder page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LadderPage {
    pub tier: Tier,
    pub division: Division,
    pub page: u32,
    pub entries: Vec<Value>,
    /// Page to request next; `None` once the ladder is exhausted.
    pub next_page: Option<u32>,
    pub saved_to: Option<PathBuf>,
}

/// Outcome of a multi-page ladder crawl.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LadderSummary {
    pub tier: Tier,
    pub division: Division,
    pub start_page: u32,
    pub pages_fetched: u32,
    pub entries: usize,
    /// Where a follow-up crawl should resume; `None` when the ladder ended.
    pub next_page: Option<u32>,
    pub files: Vec<PathBuf>,
}

/// Account, match, and ladder fetches backed by a [`RequestExecutor`] and a [`JsonStore`].
#[derive(Clone)]
pub struct LadderClient {
    executor: RequestExecutor,
    endpoints: Endpoints,
    store: JsonStore,
    sleeper: Arc<dyn Sleeper>,
    page_delay: Duration,
}

impl LadderClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_http_client(config, Arc::new(ReqwestHttpClient::new()))
    }

    pub fn with_http_client(config: &ClientConfig, http_client: Arc<dyn HttpClient>) -> Self {
        let executor = RequestExecutor::new(
            http_client,
            HttpAuth::riot_token(&config.api_key),
            config.retry,
        );
        Self {
            executor,
            endpoints: config.endpoints.clone(),
            store: JsonStore::new(config.data_dir.clone()),
            sleeper: Arc::new(TokioSleeper),
            page_delay: config.page_delay,
        }
    }

    /// Replace the sleeper used for retry backoff and page pacing.
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.executor = self.executor.with_sleeper(Arc::clone(&sleeper));
        self.sleeper = sleeper;
        self
    }

    pub fn store(&self) -> &JsonStore {
        &self.store
    }

    async fn fetch_json(&self, operation: &str, url: &str) -> Result<FetchSuccess, ClientError> {
        self.executor
            .execute(url)
            .await
            .into_result()
            .map_err(|failure| ClientError::Fetch {
                operation: operation.to_owned(),
                failure,
            })
    }

    /// Look up the account for `riot_id`, persist it, and return its puuid.
    pub async fn fetch_puuid(&self, riot_id: &RiotId) -> Result<Puuid, ClientError> {
        let operation = format!("puuid lookup for {riot_id}");
        let url = self.endpoints.account_by_riot_id(riot_id);
        let success = self.fetch_json(&operation, &url).await?;

        self.store.save_record(
            &RecordKey::Account {
                riot_id: riot_id.clone(),
            },
            &success.payload,
        )?;

        puuid_from_account(&operation, &success.payload)
    }

    /// Read the puuid from a previously stored account lookup.
    pub fn stored_puuid(&self, riot_id: &RiotId) -> Result<Puuid, ClientError> {
        read_stored_puuid(&self.store, riot_id)
    }

    pub async fn resolve_puuid(&self, owner: &MatchOwner) -> Result<Puuid, ClientError> {
        match owner {
            MatchOwner::RiotId(riot_id) => self.fetch_puuid(riot_id).await,
            MatchOwner::Puuid(puuid) => Ok(puuid.clone()),
        }
    }

    /// List the most recent `count` match ids for `owner` and persist the list.
    pub async fn fetch_match_ids(
        &self,
        owner: &MatchOwner,
        count: u32,
    ) -> Result<Vec<String>, ClientError> {
        if count == 0 || count > MAX_MATCH_COUNT {
            return Err(ValidationError::InvalidMatchCount {
                value: count,
                max: MAX_MATCH_COUNT,
            }
            .into());
        }

        let puuid = self.resolve_puuid(owner).await?;
        let operation = format!("match list for {owner}");
        let url = self.endpoints.match_ids_by_puuid(&puuid, 0, count);
        let success = self.fetch_json(&operation, &url).await?;

        self.store.save_record(
            &RecordKey::MatchIds {
                owner: owner.storage_name().to_owned(),
            },
            &success.payload,
        )?;

        match_ids_from_payload(&operation, &success.payload)
    }

    /// Fetch and persist one match.
    pub async fn fetch_match_detail(&self, match_id: &str) -> Result<Value, ClientError> {
        let match_id = non_empty_match_id(match_id)?;
        let operation = format!("match detail for {match_id}");
        let url = self.endpoints.match_detail(match_id);
        let success = self.fetch_json(&operation, &url).await?;

        self.store.save_record(
            &RecordKey::LatestMatch {
                match_id: match_id.to_owned(),
            },
            &success.payload,
        )?;

        Ok(success.payload)
    }

    /// Fetch the most recent match for `owner`.
    pub async fn fetch_latest_match(&self, owner: &MatchOwner) -> Result<Value, ClientError> {
        let match_ids = self.fetch_match_ids(owner, 1).await?;
        let Some(match_id) = match_ids.first() else {
            return Err(ClientError::NoMatches {
                owner: owner.to_string(),
            });
        };

        self.fetch_match_detail(match_id).await
    }

    /// Fetch every match in the stored match list for `game_name`.
    ///
    /// Returns the written paths in list order.
    pub async fn fetch_match_details(&self, game_name: &str) -> Result<Vec<PathBuf>, ClientError> {
        let list_key = RecordKey::MatchIds {
            owner: game_name.to_owned(),
        };
        let operation = format!("stored match list for {game_name}");
        let stored = self.store.load_record(&list_key)?;
        let match_ids = match_ids_from_payload(&operation, &stored)?;

        let mut written = Vec::with_capacity(match_ids.len());
        for match_id in &match_ids {
            let match_id = non_empty_match_id(match_id)?;
            let operation = format!("match detail for {match_id}");
            let url = self.endpoints.match_detail(match_id);
            let success = self.fetch_json(&operation, &url).await?;

            let path = self.store.save_record(
                &RecordKey::MatchStat {
                    game_name: game_name.to_owned(),
                    match_id: match_id.to_owned(),
                },
                &success.payload,
            )?;
            written.push(path);
        }

        info!(game_name, matches = written.len(), "match details saved");
        Ok(written)
    }

    /// Fetch one ladder page. The returned `next_page` is the only pagination state.
    pub async fn fetch_ladder_page(
        &self,
        tier: Tier,
        division: Division,
        page: u32,
    ) -> Result<LadderPage, ClientError> {
        if page == 0 {
            return Err(ValidationError::InvalidPage.into());
        }

        let operation = format!("ladder page {page} for {tier} {division}");
        let url = self.endpoints.league_entries(tier, division, page);
        let success = self.fetch_json(&operation, &url).await?;

        let Value::Array(entries) = success.payload else {
            return Err(ClientError::UnexpectedShape {
                operation,
                expected: "array of league entries",
            });
        };

        if entries.is_empty() {
            info!(%tier, %division, page, "ladder exhausted");
            return Ok(LadderPage {
                tier,
                division,
                page,
                entries,
                next_page: None,
                saved_to: None,
            });
        }

        let saved_to = self.store.save_record(
            &RecordKey::LeaguePage {
                tier,
                division,
                page,
            },
            &entries,
        )?;

        Ok(LadderPage {
            tier,
            division,
            page,
            entries,
            next_page: page.checked_add(1),
            saved_to: Some(saved_to),
        })
    }

    /// Walk ladder pages from `start_page` until an empty page or `max_pages` pages.
    pub async fn fetch_ladder(
        &self,
        tier: Tier,
        division: Division,
        start_page: u32,
        max_pages: Option<u32>,
    ) -> Result<LadderSummary, ClientError> {
        let mut summary = LadderSummary {
            tier,
            division,
            start_page,
            pages_fetched: 0,
            entries: 0,
            next_page: Some(start_page),
            files: Vec::new(),
        };

        while let Some(page) = summary.next_page {
            if max_pages.is_some_and(|max| summary.pages_fetched >= max) {
                break;
            }
            if summary.pages_fetched > 0 {
                self.sleeper.sleep(self.page_delay).await;
            }

            let fetched = self.fetch_ladder_page(tier, division, page).await?;
            summary.pages_fetched += 1;
            summary.entries += fetched.entries.len();
            summary.files.extend(fetched.saved_to);
            summary.next_page = fetched.next_page;
        }

        if summary.next_page.is_some() {
            warn!(%tier, %division, pages = summary.pages_fetched, "page limit reached before ladder end");
        }

        Ok(summary)
    }
}

fn puuid_from_account(operation: &str, payload: &Value) -> Result<Puuid, ClientError> {
    payload
        .get("puuid")
        .and_then(Value::as_str)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ClientError::MissingField {
            operation: operation.to_owned(),
            field: "puuid",
        })
        .and_then(|value| Puuid::parse(value).map_err(ClientError::from))
}

fn match_ids_from_payload(operation: &str, payload: &Value) -> Result<Vec<String>, ClientError> {
    let unexpected = || ClientError::UnexpectedShape {
        operation: operation.to_owned(),
        expected: "array of match id strings",
    };

    payload
        .as_array()
        .ok_or_else(unexpected)?
        .iter()
        .map(|value| value.as_str().map(str::to_owned).ok_or_else(unexpected))
        .collect()
}

/// Read the puuid of `riot_id` from `store` without a network call.
pub fn read_stored_puuid(store: &JsonStore, riot_id: &RiotId) -> Result<Puuid, ClientError> {
    let operation = format!("stored account for {riot_id}");
    let payload = store.load_record(&RecordKey::Account {
        riot_id: riot_id.clone(),
    })?;
    puuid_from_account(&operation, &payload)
}

fn non_empty_match_id(match_id: &str) -> Result<&str, ValidationError> {
    let trimmed = match_id.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyMatchId);
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn puuid_is_read_from_account_payload() {
        let puuid = puuid_from_account("op", &json!({"puuid": "abc123", "gameName": "x"}))
            .expect("puuid present");
        assert_eq!(puuid.as_str(), "abc123");
    }

    #[test]
    fn missing_puuid_is_reported() {
        let err = puuid_from_account("op", &json!({"gameName": "x"})).expect_err("must fail");
        assert!(matches!(err, ClientError::MissingField { field: "puuid", .. }));
    }

    #[test]
    fn match_ids_require_string_array() {
        assert_eq!(
            match_ids_from_payload("op", &json!(["EUW1_1", "EUW1_2"])).expect("valid"),
            vec!["EUW1_1", "EUW1_2"]
        );
        assert!(matches!(
            match_ids_from_payload("op", &json!({"ids": []})),
            Err(ClientError::UnexpectedShape { .. })
        ));
        assert!(match_ids_from_payload("op", &json!([1, 2])).is_err());
    }

    #[test]
    fn owner_storage_name_prefers_game_name() {
        let riot_id = RiotId::new("somePlayer", "NA").expect("valid");
        assert_eq!(MatchOwner::RiotId(riot_id).storage_name(), "somePlayer");

        let puuid = Puuid::parse("p-1").expect("valid");
        assert_eq!(MatchOwner::Puuid(puuid).storage_name(), "p-1");
    }
}
