use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;
use std::time::Instant;

use crate::client::SearchOutcome;
use crate::error::SearchError;

use super::AppState;
use super::models::{SearchRequest, SearchResponse, SearchStatus, VideoResult};

pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let start = Instant::now();

    let query = request.query.trim().to_string();
    let filter = request.into_filter(&state.default_region);

    let outcome = state.client.search(&filter).await.map_err(|e| {
        tracing::warn!(query = %query, error = %e, "search failed");
        error_response(&e)
    })?;

    let skipped = outcome.skipped();
    let (status, results): (SearchStatus, Vec<VideoResult>) = match outcome {
        SearchOutcome::Found(batch) => (
            SearchStatus::Ok,
            batch.records.into_iter().map(VideoResult::from).collect(),
        ),
        SearchOutcome::Empty { .. } => (SearchStatus::Empty, Vec::new()),
    };

    let total_results = results.len();
    let processing_time_ms = start.elapsed().as_millis();

    Ok(Json(SearchResponse {
        query,
        status,
        results,
        total_results,
        skipped,
        processing_time_ms,
    }))
}

pub fn error_response(err: &SearchError) -> (StatusCode, String) {
    let status = match err {
        SearchError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        SearchError::MissingCredential => StatusCode::SERVICE_UNAVAILABLE,
        SearchError::RequestFailure(_) | SearchError::MalformedItem(_) => StatusCode::BAD_GATEWAY,
    };
    (status, err.to_string())
}
