//! services/app/src/adapters/client.rs
//!
//! Shared HTTP plumbing for the REST adapters: base-URL joining, bearer-token
//! injection, and the mapping from transport failures onto `BackendError`.
//! Transport details stop here; the adapters above only see typed errors.

use std::time::Duration;

use chrono::NaiveDate;
use daykeep_core::ports::{BackendError, BackendResult};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

//=========================================================================================
// The Shared Client
//=========================================================================================

/// A thin wrapper over `reqwest::Client` that every adapter shares.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Creates a new `ApiClient` with the backend's default request timeout.
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> BackendResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> BackendResult<T> {
        self.execute(self.http.get(self.url(path))).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> BackendResult<T> {
        self.execute(self.http.post(self.url(path)).json(body)).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> BackendResult<T> {
        self.execute(self.http.put(self.url(path)).json(body)).await
    }

    /// DELETE expects no response body.
    pub async fn delete(&self, path: &str) -> BackendResult<()> {
        let response = self
            .authorize(self.http.delete(self.url(path)))
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(Self::status_error(status, response.text().await.ok()))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> BackendResult<T> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(status, response.text().await.ok()));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))
    }

    /// Non-success responses carry a structured `{ "message" }` payload when
    /// the backend has one; otherwise only the status is reported.
    fn status_error(status: StatusCode, body: Option<String>) -> BackendError {
        #[derive(Deserialize)]
        struct ErrorBody {
            message: Option<String>,
        }

        if let Some(text) = body {
            if let Ok(parsed) = serde_json::from_str::<ErrorBody>(&text) {
                if let Some(message) = parsed.message.filter(|m| !m.trim().is_empty()) {
                    return BackendError::Rejected {
                        status: status.as_u16(),
                        message,
                    };
                }
            }
        }
        BackendError::Status(status.as_u16())
    }
}

//=========================================================================================
// Wire Helpers Shared by the Record Structs
//=========================================================================================

/// Parses a calendar date, tolerating full timestamps by truncating to the
/// date part. Streak comparisons work on calendar days only, so any
/// time-of-day tail is irrelevant.
pub(crate) fn parse_day(value: &str) -> BackendResult<NaiveDate> {
    let day_part = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(day_part, "%Y-%m-%d")
        .map_err(|_| BackendError::Transport(format!("unparseable date: {value}")))
}

/// Amounts arrive as JSON numbers or as decimal strings depending on the
/// backend's serializer; accept both.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum NumberOrString {
    Number(f64),
    Text(String),
}

impl NumberOrString {
    pub(crate) fn parse(&self) -> BackendResult<f64> {
        match self {
            NumberOrString::Number(n) => Ok(*n),
            NumberOrString::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| BackendError::Transport(format!("unparseable amount: {s}"))),
        }
    }
}
