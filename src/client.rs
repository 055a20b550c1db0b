use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::config::Config;
use crate::data_models::{NormalizedBatch, SearchFilter};
use crate::error::{Result, SearchError};
use crate::normalizer::normalize_all;
use crate::query_builder::QueryBuilder;

const USER_AGENT: &str = concat!("vidsearch/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct SearchResponse {
    items: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: Option<u16>,
    message: Option<String>,
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    reason: Option<String>,
}

impl ApiError {
    fn describe(&self) -> String {
        let reasons: Vec<&str> = self
            .errors
            .iter()
            .filter_map(|e| e.reason.as_deref())
            .collect();
        let mut out = match self.code {
            Some(code) => format!("API error {code}"),
            None => "API error".to_string(),
        };
        if !reasons.is_empty() {
            out.push_str(&format!(" ({})", reasons.join(", ")));
        }
        if let Some(message) = &self.message {
            out.push_str(&format!(": {message}"));
        }
        out
    }
}

/// What a successful call produced. Zero usable records is a valid outcome,
/// not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(NormalizedBatch),
    /// Nothing to show. `skipped` counts items dropped as malformed.
    Empty { skipped: usize },
}

impl SearchOutcome {
    fn from_batch(batch: NormalizedBatch) -> SearchOutcome {
        if batch.is_empty() {
            SearchOutcome::Empty {
                skipped: batch.skipped,
            }
        } else {
            SearchOutcome::Found(batch)
        }
    }

    pub fn skipped(&self) -> usize {
        match self {
            SearchOutcome::Found(batch) => batch.skipped,
            SearchOutcome::Empty { skipped } => *skipped,
        }
    }
}

/// Runs one search: build params, call `search.list`, normalize the items.
/// No caching and no retries.
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    http: reqwest::Client,
    api_key: Option<String>,
    api_base: String,
    builder: QueryBuilder,
}

impl YouTubeClient {
    pub fn new(
        api_key: Option<String>,
        api_base: impl Into<String>,
        builder: QueryBuilder,
        timeout: Duration,
    ) -> Result<YouTubeClient> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| {
                SearchError::RequestFailure(format!("failed to create HTTP client: {e}"))
            })?;
        let api_base: String = api_base.into();

        Ok(YouTubeClient {
            http,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            api_base: api_base.trim_end_matches('/').to_string(),
            builder,
        })
    }

    pub fn from_config(config: &Config) -> Result<YouTubeClient> {
        YouTubeClient::new(
            config.api_key.clone(),
            config.api_base.clone(),
            QueryBuilder::new(config.relevance_language.clone()),
            config.request_timeout,
        )
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn search(&self, filter: &SearchFilter) -> Result<SearchOutcome> {
        let params = self.builder.build(filter)?;
        let api_key = self.api_key.as_deref().ok_or(SearchError::MissingCredential)?;

        // params never include the key.
        tracing::debug!(params = ?params.pairs(), "sending search request");

        let response = self
            .http
            .get(format!("{}/search", self.api_base))
            .query(params.pairs())
            .query(&[("key", api_key)])
            .send()
            .await
            .map_err(|e| SearchError::RequestFailure(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| SearchError::RequestFailure(e.to_string()))?;

        if !status.is_success() {
            let detail = match serde_json::from_slice::<ErrorResponse>(&body) {
                Ok(err) => err.error.describe(),
                Err(_) => format!("HTTP {status}"),
            };
            tracing::warn!(%status, %detail, "search request rejected");
            return Err(SearchError::RequestFailure(detail));
        }

        let parsed: SearchResponse = serde_json::from_slice(&body).map_err(|e| {
            SearchError::RequestFailure(format!("could not decode search response: {e}"))
        })?;

        let batch = normalize_all(parsed.items.as_deref().unwrap_or_default());
        if batch.skipped > 0 {
            tracing::warn!(
                skipped = batch.skipped,
                kept = batch.len(),
                reasons = ?batch.skip_reasons,
                "dropped malformed search items"
            );
        }
        tracing::info!(
            query = %filter.query.trim(),
            results = batch.len(),
            "search completed"
        );

        Ok(SearchOutcome::from_batch(batch))
    }
}
