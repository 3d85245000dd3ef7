//! Skip-segment retrieval.
//!
//! The session controller only depends on the [`SegmentProvider`] contract;
//! [`HttpSegmentProvider`] is the shipped implementation against a
//! SponsorBlock-style segment database.

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::config::SegmentsConfig;
use crate::models::{SkipSegment, SkipSet};
use crate::utils::BridgeError;

/// Asynchronous source of skip segments for a video. An empty set is a
/// legitimate answer; callers have no retry obligation beyond accepting
/// eventual or absent results.
#[async_trait]
pub trait SegmentProvider: Send + Sync {
    async fn fetch_segments(&self, video_id: &str) -> Result<SkipSet>;
}

#[derive(Debug, Deserialize)]
struct WireSegment {
    /// `[start, end]` in seconds.
    segment: [f64; 2],
    category: String,
}

/// Segment provider backed by the public skip-segment HTTP API.
pub struct HttpSegmentProvider {
    client: reqwest::Client,
    base_url: Url,
    categories: Vec<String>,
}

impl HttpSegmentProvider {
    pub fn new(config: &SegmentsConfig) -> Result<Self, BridgeError> {
        let base_url = Url::parse(&config.api_base_url).map_err(|err| {
            BridgeError::Configuration(format!(
                "invalid segment API base URL {:?}: {err}",
                config.api_base_url
            ))
        })?;
        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            categories: config.categories.clone(),
        })
    }
}

#[async_trait]
impl SegmentProvider for HttpSegmentProvider {
    async fn fetch_segments(&self, video_id: &str) -> Result<SkipSet> {
        let url = self
            .base_url
            .join("/api/skipSegments")
            .map_err(|err| BridgeError::Segments(format!("failed to build request URL: {err}")))?;

        let mut query: Vec<(&str, &str)> = vec![("videoID", video_id)];
        for category in &self.categories {
            query.push(("category", category));
        }

        let response = self
            .client
            .get(url)
            .query(&query)
            .send()
            .await
            .map_err(|err| BridgeError::Segments(format!("request failed: {err}")))?;

        // The API answers 404 for videos with no known segments.
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            debug!("No segments known for {video_id}");
            return Ok(SkipSet::new(video_id, Vec::new()));
        }

        let response = response
            .error_for_status()
            .map_err(|err| BridgeError::Segments(format!("error status: {err}")))?;
        let wire: Vec<WireSegment> = response
            .json()
            .await
            .map_err(|err| BridgeError::Segments(format!("undecodable response: {err}")))?;

        let mut segments = Vec::with_capacity(wire.len());
        for entry in wire {
            let [start, end] = entry.segment;
            if start >= end {
                warn!(
                    "Dropping degenerate {} segment [{start}, {end}] for {video_id}",
                    entry.category
                );
                continue;
            }
            segments.push(SkipSegment { start, end });
        }

        debug!("Fetched {} segments for {video_id}", segments.len());
        Ok(SkipSet::new(video_id, segments))
    }
}
