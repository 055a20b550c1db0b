use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

use crate::data_models::SearchFilter;
use crate::error::{Result, SearchError};

pub const MIN_RESULTS: u32 = 1;
/// Hard upper bound enforced by the search endpoint.
pub const MAX_RESULTS: u32 = 50;
pub const DEFAULT_RELEVANCE_LANGUAGE: &str = "en";

/// Query parameters for one `search.list` call, in a fixed order.
/// Never contains the API key; the client appends it when sending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pairs: Vec<(&'static str, String)>,
}

impl SearchParams {
    fn push(&mut self, name: &'static str, value: impl Into<String>) {
        self.pairs.push((name, value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }
}

/// Turns a [`SearchFilter`] into [`SearchParams`].
///
/// Embeddability, caption and dimension filters and the relevance language
/// are fixed here and cannot be changed per search.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    relevance_language: String,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        QueryBuilder::new(DEFAULT_RELEVANCE_LANGUAGE)
    }
}

impl QueryBuilder {
    pub fn new(relevance_language: impl Into<String>) -> QueryBuilder {
        QueryBuilder {
            relevance_language: relevance_language.into(),
        }
    }

    pub fn build(&self, filter: &SearchFilter) -> Result<SearchParams> {
        let query = filter.query.trim();
        if query.is_empty() {
            return Err(SearchError::InvalidInput(
                "query cannot be empty".to_string(),
            ));
        }

        if !(MIN_RESULTS..=MAX_RESULTS).contains(&filter.max_results) {
            return Err(SearchError::InvalidInput(format!(
                "max results must be between {MIN_RESULTS} and {MAX_RESULTS}, got {}",
                filter.max_results
            )));
        }

        let region = normalize_region(&filter.region_code)?;

        // Compared at wire precision: whole seconds.
        if let (Some(after), Some(before)) = (filter.published_after, filter.published_before) {
            let (after, before) = (after.trunc_subsecs(0), before.trunc_subsecs(0));
            if after > before {
                return Err(SearchError::InvalidInput(format!(
                    "published-after ({}) is later than published-before ({})",
                    format_timestamp(&after),
                    format_timestamp(&before)
                )));
            }
        }

        let mut params = SearchParams {
            pairs: Vec::with_capacity(15),
        };
        params.push("part", "snippet");
        params.push("type", "video");
        params.push("videoEmbeddable", "true");
        params.push("q", query);
        params.push("maxResults", filter.max_results.to_string());
        params.push("videoDuration", filter.duration.as_str());
        params.push("regionCode", region);
        params.push("relevanceLanguage", self.relevance_language.as_str());
        params.push("safeSearch", filter.safe_search.as_str());
        params.push("videoCaption", "any");
        params.push("videoDefinition", filter.definition.as_str());
        params.push("videoDimension", "any");
        params.push("order", filter.order.as_str());
        if let Some(after) = &filter.published_after {
            params.push("publishedAfter", format_timestamp(after));
        }
        if let Some(before) = &filter.published_before {
            params.push("publishedBefore", format_timestamp(before));
        }

        Ok(params)
    }
}

/// Builds params with the default relevance language.
pub fn build(filter: &SearchFilter) -> Result<SearchParams> {
    QueryBuilder::default().build(filter)
}

/// RFC 3339, whole seconds, `Z` suffix: `2024-01-01T00:00:00Z`.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn normalize_region(region: &str) -> Result<String> {
    let region = region.trim();
    if region.len() != 2 || !region.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(SearchError::InvalidInput(format!(
            "region code must be two letters (ISO 3166-1 alpha-2), got {region:?}"
        )));
    }
    Ok(region.to_ascii_uppercase())
}
