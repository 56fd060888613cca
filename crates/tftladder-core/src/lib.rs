//! # tftladder Core
//!
//! Fetch ranked-ladder and match data from the Riot Games TFT API and keep the
//! raw JSON on disk.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Account, match, and ladder fetch operations |
//! | [`config`] | Client configuration and API key handling |
//! | [`dashboard`] | Static dashboard assembly over stored records |
//! | [`domain`] | Validated tiers, divisions, riot ids, platforms |
//! | [`endpoints`] | Upstream URL builders |
//! | [`error`] | Validation errors |
//! | [`executor`] | Bounded-retry GET executor |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`retry`] | Retry budget and backoff schedule |
//! | [`storage`] | Flat-file JSON store |
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / User     │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  LadderClient   │────▶│ JsonStore        │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ RequestExecutor │────▶│ HTTP Client      │
//! │ (retry/backoff) │     │ (reqwest)        │
//! └─────────────────┘     └──────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! The executor never returns `Err`; it resolves to a [`FetchResult`]:
//!
//! ```rust
//! use tftladder_core::{FailureKind, FetchResult};
//!
//! fn describe(result: FetchResult) -> String {
//!     match result {
//!         FetchResult::Success(success) => format!("ok ({})", success.status_code),
//!         FetchResult::Failure(failure) => match failure.kind() {
//!             FailureKind::HttpError(status) => format!("http {status}"),
//!             other => other.to_string(),
//!         },
//!     }
//! }
//! ```
//!
//! ## Security
//!
//! - The API key is read from the environment and never logged
//! - All HTTP requests use TLS via rustls

pub mod client;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod endpoints;
pub mod error;
pub mod executor;
pub mod http_client;
pub mod retry;
pub mod storage;

pub use client::{
    read_stored_puuid, ClientError, LadderClient, LadderPage, LadderSummary, MatchOwner,
    DEFAULT_MATCH_COUNT, MAX_MATCH_COUNT,
};
pub use config::{resolve_api_key, ClientConfig, ConfigError, RedactedApiKey};
pub use dashboard::{DashboardAssets, DashboardError, DashboardSnapshot};
pub use domain::{Division, Platform, Puuid, RegionalRoute, RiotId, Tier};
pub use endpoints::Endpoints;
pub use error::ValidationError;
pub use executor::{FailureKind, FetchFailure, FetchResult, FetchSuccess, RequestExecutor};
pub use http_client::{
    HttpAuth, HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient,
    TransportErrorKind,
};
pub use retry::{RetryConfig, Sleeper, TokioSleeper};
pub use storage::{JsonStore, RecordKey, StorageError, StoredRecord};
