//! Shared mocks for controller scenarios: a scriptable player host plus
//! recording implementations of every seam the session controller touches.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use nou_bridge::host::{
    FullscreenSurface, MediaElement, MediaLocator, PlayerHost,
};
use nou_bridge::models::{
    AudioTrack, NowPlaying, PlaybackState, SkipSet, Thumbnail, VideoDetails,
};
use nou_bridge::notify::{LiveChatSurface, Notifier};
use nou_bridge::segments::SegmentProvider;
use nou_bridge::session::{AudioTrackPicker, SessionDeps};
use nou_bridge::store::{KeyValueStore, MemoryStore};

/// Scriptable host player. Accessor values are `Mutex`-held so tests can
/// reshape the host mid-scenario; side effects are recorded.
#[derive(Default)]
pub struct MockPlayerHost {
    pub current_time: Mutex<Option<f64>>,
    pub playback_state: Mutex<Option<PlaybackState>>,
    pub video_url: Mutex<Option<String>>,
    pub audio_tracks: Mutex<Vec<AudioTrack>>,

    pub seeks: Mutex<Vec<f64>>,
    pub selected_audio: Mutex<Vec<String>>,
    pub play_calls: AtomicUsize,
    pub pause_calls: AtomicUsize,
    pub unmute_calls: AtomicUsize,
}

impl MockPlayerHost {
    pub fn ready() -> Arc<Self> {
        let host = Self::default();
        *host.playback_state.lock().unwrap() = Some(PlaybackState::Paused);
        *host.current_time.lock().unwrap() = Some(0.0);
        Arc::new(host)
    }

    pub fn set_time(&self, secs: f64) {
        *self.current_time.lock().unwrap() = Some(secs);
    }

    pub fn clear_time(&self) {
        *self.current_time.lock().unwrap() = None;
    }

    pub fn set_url(&self, url: &str) {
        *self.video_url.lock().unwrap() = Some(url.to_string());
    }
}

impl PlayerHost for MockPlayerHost {
    fn current_time(&self) -> Option<f64> {
        *self.current_time.lock().unwrap()
    }
    fn playback_state(&self) -> Option<PlaybackState> {
        *self.playback_state.lock().unwrap()
    }
    fn video_details(&self) -> Option<VideoDetails> {
        None
    }
    fn video_url(&self) -> Option<String> {
        self.video_url.lock().unwrap().clone()
    }
    fn seek_to(&self, seconds: f64) {
        self.seeks.lock().unwrap().push(seconds);
    }
    fn play(&self) {
        self.play_calls.fetch_add(1, Ordering::SeqCst);
    }
    fn pause(&self) {
        self.pause_calls.fetch_add(1, Ordering::SeqCst);
    }
    fn unmute(&self) {
        self.unmute_calls.fetch_add(1, Ordering::SeqCst);
    }
    fn set_playback_rate(&self, _rate: f64) {}
    fn available_playback_rates(&self) -> Vec<f64> {
        vec![0.25, 0.5, 1.0, 1.5, 2.0]
    }
    fn available_audio_tracks(&self) -> Vec<AudioTrack> {
        self.audio_tracks.lock().unwrap().clone()
    }
    fn set_audio_track(&self, track_id: &str) {
        self.selected_audio.lock().unwrap().push(track_id.to_string());
    }
}

#[derive(Default)]
pub struct MockMediaElement {
    pub subscriptions: AtomicUsize,
}

impl MediaElement for MockMediaElement {
    fn set_rate(&self, _rate: f64) {}
    fn subscribe_playback_events(&self, _callback: Box<dyn Fn() + Send + Sync>) {
        self.subscriptions.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct MockLocator {
    pub media: Option<Arc<MockMediaElement>>,
}

impl MediaLocator for MockLocator {
    fn query_scoped(&self) -> Option<Arc<dyn MediaElement>> {
        self.media.clone().map(|m| m as Arc<dyn MediaElement>)
    }
    fn query_player(&self) -> Option<Arc<dyn MediaElement>> {
        None
    }
    fn query_document(&self) -> Option<Arc<dyn MediaElement>> {
        None
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub now_playing: Mutex<Vec<NowPlaying>>,
    pub progress: Mutex<Vec<(bool, f64)>>,
    pub ended_calls: AtomicUsize,
}

impl Notifier for RecordingNotifier {
    fn now_playing(&self, info: &NowPlaying) {
        self.now_playing.lock().unwrap().push(info.clone());
    }
    fn progress(&self, is_playing: bool, current_time_secs: f64) {
        self.progress.lock().unwrap().push((is_playing, current_time_secs));
    }
    fn playback_ended(&self) {
        self.ended_calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct RecordingLiveChat {
    pub hide_calls: AtomicUsize,
    pub entry_points: Mutex<Vec<String>>,
}

impl LiveChatSurface for RecordingLiveChat {
    fn hide(&self) {
        self.hide_calls.fetch_add(1, Ordering::SeqCst);
    }
    fn show_entry_point(&self, video_id: &str) {
        self.entry_points.lock().unwrap().push(video_id.to_string());
    }
}

#[derive(Default)]
pub struct MockViewport {
    pub fullscreen: Mutex<bool>,
    pub narrow: Mutex<bool>,
}

impl FullscreenSurface for MockViewport {
    fn is_fullscreen(&self) -> bool {
        *self.fullscreen.lock().unwrap()
    }
    fn is_narrow(&self) -> bool {
        *self.narrow.lock().unwrap()
    }
    fn enter_fullscreen(&self) {
        *self.fullscreen.lock().unwrap() = true;
    }
    fn exit_fullscreen(&self) {
        *self.fullscreen.lock().unwrap() = false;
    }
}

/// Provider answering every fetch with a fixed segment set (the set's own
/// `video_id` is preserved, so tests can hand out deliberately stale sets).
pub struct StaticSegments {
    pub set: SkipSet,
    pub fetches: AtomicUsize,
}

impl StaticSegments {
    pub fn new(set: SkipSet) -> Arc<Self> {
        Arc::new(Self {
            set,
            fetches: AtomicUsize::new(0),
        })
    }

    pub fn empty() -> Arc<Self> {
        Self::new(SkipSet::default())
    }
}

#[async_trait]
impl SegmentProvider for StaticSegments {
    async fn fetch_segments(&self, _video_id: &str) -> anyhow::Result<SkipSet> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.set.clone())
    }
}

/// Picker that always chooses a fixed index.
pub struct FixedPicker(pub Option<usize>);

impl AudioTrackPicker for FixedPicker {
    fn pick_original(&self, _tracks: &[AudioTrack]) -> Option<usize> {
        self.0
    }
}

/// Key-value store that counts writes per key, for throttle assertions.
pub struct CountingStore {
    inner: MemoryStore,
    pub writes: Mutex<Vec<String>>,
}

impl CountingStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: MemoryStore::new(),
            writes: Mutex::new(Vec::new()),
        })
    }

    pub fn writes_to(&self, key: &str) -> usize {
        self.writes.lock().unwrap().iter().filter(|k| *k == key).count()
    }
}

impl KeyValueStore for CountingStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }
    fn set(&self, key: &str, value: &str) {
        self.writes.lock().unwrap().push(key.to_string());
        self.inner.set(key, value);
    }
    fn remove(&self, key: &str) {
        self.inner.remove(key);
    }
}

/// All the mock collaborators of one scenario, pre-wired into `SessionDeps`.
pub struct Scenario {
    pub host: Arc<MockPlayerHost>,
    pub media: Arc<MockMediaElement>,
    pub store: Arc<CountingStore>,
    pub segments: Arc<StaticSegments>,
    pub notifier: Arc<RecordingNotifier>,
    pub live_chat: Arc<RecordingLiveChat>,
    pub viewport: Arc<MockViewport>,
}

impl Scenario {
    pub fn new() -> Self {
        Self::with_segments(StaticSegments::empty())
    }

    pub fn with_segments(segments: Arc<StaticSegments>) -> Self {
        Self {
            host: MockPlayerHost::ready(),
            media: Arc::new(MockMediaElement::default()),
            store: CountingStore::new(),
            segments,
            notifier: Arc::new(RecordingNotifier::default()),
            live_chat: Arc::new(RecordingLiveChat::default()),
            viewport: Arc::new(MockViewport::default()),
        }
    }

    pub fn deps(&self) -> SessionDeps {
        SessionDeps {
            host: self.host.clone(),
            locator: Arc::new(MockLocator {
                media: Some(self.media.clone()),
            }),
            store: self.store.clone(),
            segments: self.segments.clone(),
            notifier: self.notifier.clone(),
            live_chat: self.live_chat.clone(),
            viewport: self.viewport.clone(),
            audio_picker: Arc::new(FixedPicker(None)),
        }
    }
}

/// Details payload builder with a plausible thumbnail ladder.
pub fn video_details(video_id: &str, duration_secs: f64) -> VideoDetails {
    VideoDetails {
        video_id: video_id.to_string(),
        title: format!("Video {video_id}"),
        author: "Test Channel".to_string(),
        duration_secs,
        thumbnails: vec![
            Thumbnail {
                url: format!("https://img.test/{video_id}/default.jpg"),
                width: 120,
                height: 90,
            },
            Thumbnail {
                url: format!("https://img.test/{video_id}/maxres.jpg"),
                width: 1280,
                height: 720,
            },
        ],
        is_live: false,
    }
}
