#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use serde_json::{Value, json};

use vidsearch::YouTubeClient;
use vidsearch::query_builder::QueryBuilder;

pub const TEST_KEY: &str = "test-api-key";

/// Canned answer plus a log of every query string the mock received.
#[derive(Clone)]
pub struct MockSearchApi {
    status: StatusCode,
    body: Value,
    pub requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

impl MockSearchApi {
    pub fn new(status: StatusCode, body: Value) -> MockSearchApi {
        MockSearchApi {
            status,
            body,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn ok(items: Vec<Value>) -> MockSearchApi {
        MockSearchApi::new(
            StatusCode::OK,
            json!({
                "kind": "youtube#searchListResponse",
                "regionCode": "NL",
                "pageInfo": {"totalResults": items.len(), "resultsPerPage": 5},
                "items": items,
            }),
        )
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> HashMap<String, String> {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("mock received no requests")
    }

    /// Serves the mock on an ephemeral port and returns its base URL.
    pub async fn spawn(&self) -> String {
        async fn search(
            State(mock): State<MockSearchApi>,
            Query(params): Query<HashMap<String, String>>,
        ) -> (StatusCode, Json<Value>) {
            mock.requests.lock().unwrap().push(params);
            (mock.status, Json(mock.body.clone()))
        }

        let app = Router::new()
            .route("/search", get(search))
            .with_state(self.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }
}

pub fn client_for(base_url: &str, api_key: Option<&str>) -> YouTubeClient {
    YouTubeClient::new(
        api_key.map(str::to_string),
        base_url,
        QueryBuilder::default(),
        Duration::from_secs(5),
    )
    .unwrap()
}

/// A `search.list` item shaped like the real API's.
pub fn raw_item(video_id: &str, title: &str) -> Value {
    json!({
        "kind": "youtube#searchResult",
        "etag": "etag",
        "id": {"kind": "youtube#video", "videoId": video_id},
        "snippet": {
            "publishedAt": "2024-05-01T12:30:00Z",
            "channelId": "UC123",
            "title": title,
            "description": format!("All about {title}"),
            "thumbnails": {
                "default": {"url": format!("https://i.ytimg.com/vi/{video_id}/default.jpg"), "width": 120, "height": 90},
                "medium": {"url": format!("https://i.ytimg.com/vi/{video_id}/mqdefault.jpg"), "width": 320, "height": 180},
                "high": {"url": format!("https://i.ytimg.com/vi/{video_id}/hqdefault.jpg"), "width": 480, "height": 360}
            },
            "channelTitle": "Physics Explained",
            "liveBroadcastContent": "none",
            "publishTime": "2024-05-01T12:30:00Z"
        }
    })
}

/// An address nothing listens on, for asserting no request is attempted.
pub const UNREACHABLE_BASE: &str = "http://127.0.0.1:9";
