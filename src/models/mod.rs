//! Domain types shared across the bridge.

use serde::{Deserialize, Serialize};

/// Playback lifecycle states as reported by the host player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Unstarted,
    Playing,
    Paused,
    Buffering,
    Ended,
}

impl PlaybackState {
    pub fn is_playing(&self) -> bool {
        matches!(self, PlaybackState::Playing)
    }
}

/// One thumbnail variant offered by the host for the current video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// Metadata payload delivered with a video-identity lifecycle event.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VideoDetails {
    pub video_id: String,
    pub title: String,
    pub author: String,
    pub duration_secs: f64,
    pub thumbnails: Vec<Thumbnail>,
    pub is_live: bool,
}

impl VideoDetails {
    /// Largest available thumbnail by pixel area, for now-playing artwork.
    pub fn largest_thumbnail(&self) -> Option<&Thumbnail> {
        self.thumbnails
            .iter()
            .max_by_key(|t| u64::from(t.width) * u64::from(t.height))
    }
}

/// A time range to be bypassed during playback, seconds from the start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkipSegment {
    pub start: f64,
    pub end: f64,
}

impl SkipSegment {
    /// True when `time` lies strictly inside the open interval.
    pub fn contains(&self, time: f64) -> bool {
        self.start < time && time < self.end
    }
}

/// Segments fetched for one video. `video_id` is carried so that consumers
/// can discard a set that resolved after the session moved on; ordering is
/// the provider's and is significant (first match wins per tick).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SkipSet {
    pub video_id: String,
    pub segments: Vec<SkipSegment>,
}

impl SkipSet {
    pub fn new(video_id: impl Into<String>, segments: Vec<SkipSegment>) -> Self {
        Self {
            video_id: video_id.into(),
            segments,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// One audio track offered by the host player.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioTrack {
    pub id: String,
    pub display_name: String,
    pub language_code: Option<String>,
}

/// Now-playing notification payload forwarded to the embedder.
#[derive(Debug, Clone, PartialEq)]
pub struct NowPlaying {
    pub title: String,
    pub author: String,
    pub duration_secs: f64,
    pub thumbnail_url: Option<String>,
}

/// Where the host page currently is. Navigation drives the home-route force
/// pause and gates the orientation handler to the watch page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Watch,
    Other,
}

/// Device orientation as reported by the embedder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}
