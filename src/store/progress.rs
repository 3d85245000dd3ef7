use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use super::KeyValueStore;
use crate::constants::{
    KEY_LAST_PLAYING, KEY_PROGRESS_PREFIX, KEY_TRACKED_VIDEOS, TRACKED_VIDEOS_CAP,
};

#[derive(Debug, Serialize, Deserialize)]
struct LastPlaying {
    url: String,
}

/// Persisted playback progress over a raw key-value store.
///
/// Three kinds of records: per-video elapsed seconds (`nou:progress:<id>`),
/// the ordered tracked-id list bounded to the 100 most recent
/// (`nou:videos:progress`), and the singleton last-playing pointer
/// (`nou:playing`).
pub struct ProgressStore {
    kv: Arc<dyn KeyValueStore>,
}

impl ProgressStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Stored elapsed seconds for a video, if any.
    pub fn position(&self, video_id: &str) -> Option<f64> {
        let raw = self.kv.get(&progress_key(video_id))?;
        match raw.parse::<f64>() {
            Ok(secs) => Some(secs),
            Err(_) => {
                warn!("Discarding unparseable progress for {video_id}: {raw:?}");
                None
            }
        }
    }

    pub fn save_position(&self, video_id: &str, elapsed_secs: f64) {
        self.kv.set(&progress_key(video_id), &elapsed_secs.to_string());
    }

    /// Record a video id as tracked, most recent last. Re-tracking an id
    /// moves it to the end; beyond the cap the oldest id is evicted together
    /// with its progress entry.
    pub fn track(&self, video_id: &str) {
        let mut ids = self.tracked_ids();
        ids.retain(|id| id != video_id);
        ids.push(video_id.to_string());

        while ids.len() > TRACKED_VIDEOS_CAP {
            let evicted = ids.remove(0);
            debug!("Evicting tracked video {evicted}");
            self.kv.remove(&progress_key(&evicted));
        }

        match serde_json::to_string(&ids) {
            Ok(json) => self.kv.set(KEY_TRACKED_VIDEOS, &json),
            Err(err) => warn!("Failed to serialize tracked video list: {err}"),
        }
    }

    /// Tracked video ids, oldest first. A corrupt list reads as empty.
    pub fn tracked_ids(&self) -> Vec<String> {
        let Some(raw) = self.kv.get(KEY_TRACKED_VIDEOS) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(ids) => ids,
            Err(err) => {
                warn!("Discarding corrupt tracked video list: {err}");
                Vec::new()
            }
        }
    }

    /// Overwrite the last-playing pointer used for resuming navigation.
    pub fn set_last_playing(&self, url: &str) {
        let record = LastPlaying {
            url: url.to_string(),
        };
        match serde_json::to_string(&record) {
            Ok(json) => self.kv.set(KEY_LAST_PLAYING, &json),
            Err(err) => warn!("Failed to serialize last-playing record: {err}"),
        }
    }

    pub fn last_playing(&self) -> Option<String> {
        let raw = self.kv.get(KEY_LAST_PLAYING)?;
        match serde_json::from_str::<LastPlaying>(&raw) {
            Ok(record) => Some(record.url),
            Err(err) => {
                warn!("Discarding corrupt last-playing record: {err}");
                None
            }
        }
    }
}

fn progress_key(video_id: &str) -> String {
    format!("{KEY_PROGRESS_PREFIX}{video_id}")
}
