use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::data_models::{
    DEFAULT_MAX_RESULTS, SafeSearch, SearchFilter, SortOrder, VideoDefinition, VideoDuration,
    VideoRecord,
};

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub max_results: Option<u32>,
    pub duration: Option<VideoDuration>,
    pub region_code: Option<String>,
    pub safe_search: Option<SafeSearch>,
    pub order: Option<SortOrder>,
    pub definition: Option<VideoDefinition>,
    pub published_after: Option<NaiveDate>,
    pub published_before: Option<NaiveDate>,
}

impl SearchRequest {
    pub fn into_filter(self, default_region: &str) -> SearchFilter {
        let mut filter = SearchFilter::new(self.query);
        filter.max_results = self.max_results.unwrap_or(DEFAULT_MAX_RESULTS);
        filter.duration = self.duration.unwrap_or_default();
        filter.region_code = self
            .region_code
            .unwrap_or_else(|| default_region.to_string());
        filter.safe_search = self.safe_search.unwrap_or_default();
        filter.order = self.order.unwrap_or_default();
        filter.definition = self.definition.unwrap_or_default();
        if let Some(date) = self.published_after {
            filter = filter.published_after_date(date);
        }
        if let Some(date) = self.published_before {
            filter = filter.published_before_date(date);
        }
        filter
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchStatus {
    Ok,
    Empty,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub status: SearchStatus,
    pub results: Vec<VideoResult>,
    pub total_results: usize,
    pub skipped: usize,
    pub processing_time_ms: u128,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VideoResult {
    pub video_id: String,
    pub title: String,
    pub channel_title: String,
    pub description: String,
    pub published_at: DateTime<Utc>,
    pub thumbnail_url: Option<String>,
    pub watch_url: String,
    pub embed_url: String,
}

impl From<VideoRecord> for VideoResult {
    fn from(record: VideoRecord) -> Self {
        let watch_url = record.watch_url();
        let embed_url = record.embed_url();
        VideoResult {
            video_id: record.video_id,
            title: record.title,
            channel_title: record.channel_title,
            description: record.description,
            published_at: record.published_at,
            thumbnail_url: record.thumbnail_url,
            watch_url,
            embed_url,
        }
    }
}
