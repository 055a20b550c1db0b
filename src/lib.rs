pub mod api;
pub mod client;
pub mod config;
pub mod data_models;
pub mod error;
pub mod normalizer;
pub mod query_builder;
pub mod render;

pub use client::{SearchOutcome, YouTubeClient};
pub use data_models::{NormalizedBatch, SearchFilter, VideoRecord};
pub use error::SearchError;
