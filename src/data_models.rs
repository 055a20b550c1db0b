use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub const WATCH_URL_BASE: &str = "https://www.youtube.com/watch?v=";
pub const EMBED_URL_BASE: &str = "https://www.youtube.com/embed/";

pub const DEFAULT_MAX_RESULTS: u32 = 5;
pub const DEFAULT_REGION: &str = "NL";

/// Length bucket understood by the `videoDuration` search parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum VideoDuration {
    Any,
    /// Under four minutes.
    #[default]
    Short,
    /// Four to twenty minutes.
    Medium,
    /// Over twenty minutes.
    Long,
}

impl VideoDuration {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoDuration::Any => "any",
            VideoDuration::Short => "short",
            VideoDuration::Medium => "medium",
            VideoDuration::Long => "long",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SafeSearch {
    None,
    Moderate,
    #[default]
    Strict,
}

impl SafeSearch {
    pub fn as_str(&self) -> &'static str {
        match self {
            SafeSearch::None => "none",
            SafeSearch::Moderate => "moderate",
            SafeSearch::Strict => "strict",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "relevance")]
    Relevance,
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "rating")]
    Rating,
    #[serde(rename = "viewCount")]
    #[value(name = "viewCount", alias = "view-count")]
    ViewCount,
    #[serde(rename = "title")]
    Title,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Relevance => "relevance",
            SortOrder::Date => "date",
            SortOrder::Rating => "rating",
            SortOrder::ViewCount => "viewCount",
            SortOrder::Title => "title",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum VideoDefinition {
    #[default]
    Any,
    High,
    Standard,
}

impl VideoDefinition {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoDefinition::Any => "any",
            VideoDefinition::High => "high",
            VideoDefinition::Standard => "standard",
        }
    }
}

/// User-chosen search criteria. Validation happens in
/// [`crate::query_builder::QueryBuilder::build`], not on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    pub query: String,
    pub max_results: u32,
    pub duration: VideoDuration,
    pub region_code: String,
    pub safe_search: SafeSearch,
    pub order: SortOrder,
    pub definition: VideoDefinition,
    pub published_after: Option<DateTime<Utc>>,
    pub published_before: Option<DateTime<Utc>>,
}

impl SearchFilter {
    pub fn new(query: impl Into<String>) -> SearchFilter {
        SearchFilter {
            query: query.into(),
            max_results: DEFAULT_MAX_RESULTS,
            duration: VideoDuration::default(),
            region_code: DEFAULT_REGION.to_string(),
            safe_search: SafeSearch::default(),
            order: SortOrder::default(),
            definition: VideoDefinition::default(),
            published_after: None,
            published_before: None,
        }
    }

    /// Restricts results to videos published on or after the start of `date`.
    pub fn published_after_date(mut self, date: NaiveDate) -> SearchFilter {
        self.published_after = Some(start_of_day(date));
        self
    }

    /// Restricts results to videos published on or before the end of `date`.
    pub fn published_before_date(mut self, date: NaiveDate) -> SearchFilter {
        self.published_before = Some(end_of_day(date));
        self
    }
}

pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(23, 59, 59)
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

/// One search result, stripped down to what a UI needs to show it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VideoRecord {
    pub video_id: String,
    pub title: String,
    pub channel_title: String,
    pub description: String,
    pub published_at: DateTime<Utc>,
    pub thumbnail_url: Option<String>,
}

impl VideoRecord {
    pub fn watch_url(&self) -> String {
        format!("{WATCH_URL_BASE}{}", self.video_id)
    }

    pub fn embed_url(&self) -> String {
        format!(
            "{EMBED_URL_BASE}{}?autoplay=1&rel=0&modestbranding=1",
            self.video_id
        )
    }
}

/// Result of normalizing a whole response page. Malformed items are
/// counted in `skipped` rather than failing the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedBatch {
    pub records: Vec<VideoRecord>,
    pub skipped: usize,
    /// One entry per skipped item, e.g. `item 2: malformed item: missing field snippet.title`.
    pub skip_reasons: Vec<String>,
}

impl NormalizedBatch {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}
