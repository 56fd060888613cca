//! Bounded-retry GET executor.
//!
//! [`RequestExecutor::execute`] issues one logical request and always resolves to a
//! [`FetchResult`]. Retries are logged and never surfaced; only exhaustion and
//! non-retryable outcomes reach the caller.
//!
//! | Outcome | Retried | Delay before retry | Terminal result |
//! |---------|---------|--------------------|-----------------|
//! | Transport timeout | yes | `backoff_base * (attempts_made + 1)` | `Timeout` |
//! | HTTP 429 | yes | `backoff_base * 2` (also on the last 429) | `HttpError(429)` |
//! | Other non-2xx | no | - | `HttpError(status)` |
//! | Other transport error | yes | `backoff_base` | `NetworkError` |
//! | 2xx, body not JSON | no | - | `MalformedResponse` |

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info, warn};

use crate::http_client::{HttpAuth, HttpClient, HttpRequest, HttpResponse};
use crate::retry::{RetryConfig, Sleeper, TokioSleeper};

const TOO_MANY_REQUESTS: u16 = 429;

/// Terminal failure classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Timeout,
    HttpError(u16),
    NetworkError,
    MalformedResponse,
}

impl Display for FailureKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout => f.write_str("timeout"),
            Self::HttpError(status) => write!(f, "http_error({status})"),
            Self::NetworkError => f.write_str("network_error"),
            Self::MalformedResponse => f.write_str("malformed_response"),
        }
    }
}

/// Parsed JSON body of a 2xx response.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchSuccess {
    pub payload: Value,
    pub status_code: u16,
}

/// Terminal failure of one logical request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    kind: FailureKind,
    message: String,
}

impl FetchFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for FetchFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for FetchFailure {}

/// Normalized outcome of [`RequestExecutor::execute`].
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult {
    Success(FetchSuccess),
    Failure(FetchFailure),
}

impl FetchResult {
    pub fn success(payload: Value, status_code: u16) -> Self {
        Self::Success(FetchSuccess {
            payload,
            status_code,
        })
    }

    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        Self::Failure(FetchFailure::new(kind, message))
    }

    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure.kind()),
        }
    }

    pub fn into_result(self) -> Result<FetchSuccess, FetchFailure> {
        match self {
            Self::Success(success) => Ok(success),
            Self::Failure(failure) => Err(failure),
        }
    }
}

impl From<FetchResult> for Result<FetchSuccess, FetchFailure> {
    fn from(value: FetchResult) -> Self {
        value.into_result()
    }
}

/// Issues GET requests with bounded retries and rate-limit backoff.
#[derive(Clone)]
pub struct RequestExecutor {
    http_client: Arc<dyn HttpClient>,
    sleeper: Arc<dyn Sleeper>,
    auth: HttpAuth,
    retry: RetryConfig,
}

impl RequestExecutor {
    pub fn new(http_client: Arc<dyn HttpClient>, auth: HttpAuth, retry: RetryConfig) -> Self {
        Self {
            http_client,
            sleeper: Arc::new(TokioSleeper),
            auth,
            retry,
        }
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Run one logical GET against `url`.
    ///
    /// The retry counter lives only for the duration of this call.
    pub async fn execute(&self, url: &str) -> FetchResult {
        let mut attempts_made: u32 = 0;

        loop {
            info!(url = %url, attempt = attempts_made + 1, "making request");
            let request = HttpRequest::get(url)
                .with_auth(&self.auth)
                .with_timeout(self.retry.timeout);

            match self.http_client.execute(request).await {
                Ok(response) if response.is_success() => return parse_success(url, response),
                Ok(response) => {
                    if response.status == TOO_MANY_REQUESTS {
                        warn!(url = %url, attempt = attempts_made + 1, "rate limit hit, waiting");
                        self.sleeper.sleep(self.retry.rate_limit_delay()).await;
                        if self.retry.can_retry(attempts_made) {
                            attempts_made += 1;
                            continue;
                        }
                    }

                    error!(url = %url, status = response.status, "http error");
                    return FetchResult::failure(
                        FailureKind::HttpError(response.status),
                        http_error_message(response.status),
                    );
                }
                Err(transport) if transport.is_timeout() => {
                    warn!(url = %url, attempt = attempts_made + 1, "request timeout");
                    if !self.retry.can_retry(attempts_made) {
                        error!(url = %url, retries = attempts_made, "giving up after timeouts");
                        return FetchResult::failure(
                            FailureKind::Timeout,
                            format!("request timed out after {attempts_made} retries"),
                        );
                    }
                    self.sleeper
                        .sleep(self.retry.timeout_delay(attempts_made))
                        .await;
                    attempts_made += 1;
                }
                Err(transport) => {
                    error!(url = %url, attempt = attempts_made + 1, error = %transport, "request failed");
                    if !self.retry.can_retry(attempts_made) {
                        return FetchResult::failure(
                            FailureKind::NetworkError,
                            format!(
                                "request failed after {attempts_made} retries: {}",
                                transport.message()
                            ),
                        );
                    }
                    self.sleeper.sleep(self.retry.network_delay()).await;
                    attempts_made += 1;
                }
            }
        }
    }
}

fn parse_success(url: &str, response: HttpResponse) -> FetchResult {
    match serde_json::from_str::<Value>(&response.body) {
        Ok(payload) => FetchResult::success(payload, response.status),
        Err(parse_error) => {
            error!(url = %url, status = response.status, error = %parse_error, "response body is not JSON");
            FetchResult::failure(
                FailureKind::MalformedResponse,
                format!(
                    "status {} returned a body that is not valid JSON: {parse_error}",
                    response.status
                ),
            )
        }
    }
}

fn http_error_message(status: u16) -> String {
    match reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
    {
        Some(reason) => format!("HTTP error {status}: {reason}"),
        None => format!("HTTP error {status}"),
    }
}
