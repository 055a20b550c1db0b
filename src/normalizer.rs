use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::data_models::{NormalizedBatch, VideoRecord};
use crate::error::{Result, SearchError};

/// Thumbnail sizes in order of preference.
const THUMBNAIL_PREFERENCE: [&str; 3] = ["medium", "high", "default"];

/// Extracts a [`VideoRecord`] from one `search.list` item.
///
/// `id.videoId`, `snippet.title` and `snippet.publishedAt` are required,
/// and the id and title must not be blank. Channel title and description
/// fall back to empty strings and the description is returned in full.
pub fn normalize(raw: &Value) -> Result<VideoRecord> {
    let video_id = required_non_blank(raw, &["id", "videoId"])?;
    let title = required_non_blank(raw, &["snippet", "title"])?;
    let published_raw = required_str(raw, &["snippet", "publishedAt"])?;

    let published_at = DateTime::parse_from_rfc3339(published_raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| {
            SearchError::MalformedItem(format!(
                "video {video_id}: publishedAt {published_raw:?} is not a timestamp: {e}"
            ))
        })?;

    let snippet = &raw["snippet"];
    let channel_title = snippet["channelTitle"].as_str().unwrap_or_default();
    let description = snippet["description"].as_str().unwrap_or_default();

    let thumbnail_url = THUMBNAIL_PREFERENCE
        .iter()
        .find_map(|size| snippet["thumbnails"][*size]["url"].as_str())
        .map(str::to_string);

    Ok(VideoRecord {
        video_id: video_id.to_string(),
        title: title.to_string(),
        channel_title: channel_title.to_string(),
        description: description.to_string(),
        published_at,
        thumbnail_url,
    })
}

/// Normalizes every item independently. A malformed item is skipped,
/// counted and its reason kept, so one bad entry does not void the rest
/// of the page.
pub fn normalize_all(items: &[Value]) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();
    for (index, item) in items.iter().enumerate() {
        match normalize(item) {
            Ok(record) => batch.records.push(record),
            Err(e) => {
                batch.skipped += 1;
                batch.skip_reasons.push(format!("item {index}: {e}"));
            }
        }
    }
    batch
}

/// Like [`normalize_all`], but fails on the first malformed item.
pub fn normalize_all_strict(items: &[Value]) -> Result<Vec<VideoRecord>> {
    items.iter().map(normalize).collect()
}

fn required_str<'a>(raw: &'a Value, path: &[&str]) -> Result<&'a str> {
    let mut node = raw;
    for key in path {
        node = node.get(key).ok_or_else(|| {
            SearchError::MalformedItem(format!("missing field {}", path.join(".")))
        })?;
    }
    node.as_str().ok_or_else(|| {
        SearchError::MalformedItem(format!("field {} is not a string", path.join(".")))
    })
}

fn required_non_blank<'a>(raw: &'a Value, path: &[&str]) -> Result<&'a str> {
    let value = required_str(raw, path)?;
    if value.trim().is_empty() {
        return Err(SearchError::MalformedItem(format!(
            "field {} is blank",
            path.join(".")
        )));
    }
    Ok(value)
}
