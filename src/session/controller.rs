use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

use super::{AudioTrackPicker, SessionEvent, SessionHandle};
use crate::config::Config;
use crate::constants::NEAR_END_GUARD_SECS;
use crate::host::{FullscreenSurface, MediaLocator, PlayerHost};
use crate::models::{NowPlaying, PlaybackState, Route, SkipSet, VideoDetails};
use crate::notify::{LiveChatSurface, Notifier};
use crate::rate::RateExtender;
use crate::segments::SegmentProvider;
use crate::store::{KeyValueStore, ProgressStore};
use crate::utils::{RetryPolicy, Throttle};

/// Live per-page-view state of the controller.
///
/// `media_events_bound` is per player element and survives video changes;
/// the remaining fields are reset on every identity change. The skip set is
/// refreshed asynchronously and may lag the current id; the tick loop
/// ignores a set whose id does not match.
#[derive(Debug, Default)]
pub struct Session {
    current_video_id: String,
    progress_restored: bool,
    should_persist_progress: bool,
    active_skip_set: Option<SkipSet>,
    media_events_bound: bool,
    bound: bool,
}

impl Session {
    pub fn current_video_id(&self) -> &str {
        &self.current_video_id
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    pub fn progress_restored(&self) -> bool {
        self.progress_restored
    }

    pub fn should_persist_progress(&self) -> bool {
        self.should_persist_progress
    }

    fn begin_video(&mut self, video_id: String) {
        self.current_video_id = video_id;
        self.progress_restored = false;
        self.should_persist_progress = false;
        // active_skip_set deliberately kept: the id check at use makes a
        // stale set inert, and the replacement arrives asynchronously.
    }
}

/// External collaborators of the session controller, all narrow seams.
pub struct SessionDeps {
    pub host: Arc<dyn PlayerHost>,
    pub locator: Arc<dyn MediaLocator>,
    pub store: Arc<dyn KeyValueStore>,
    pub segments: Arc<dyn SegmentProvider>,
    pub notifier: Arc<dyn Notifier>,
    pub live_chat: Arc<dyn LiveChatSurface>,
    pub viewport: Arc<dyn FullscreenSurface>,
    pub audio_picker: Arc<dyn AudioTrackPicker>,
}

/// Owns the [`Session`] and processes [`SessionEvent`]s to completion, one
/// at a time. Every step is best-effort against a host object model that may
/// be partially uninitialized: a missing accessor degrades that feature for
/// the tick, and nothing here ever propagates an error back to the host.
pub struct SessionController {
    config: Config,
    session: Session,
    host: Arc<dyn PlayerHost>,
    extender: Arc<RateExtender>,
    progress: ProgressStore,
    segments: Arc<dyn SegmentProvider>,
    notifier: Arc<dyn Notifier>,
    live_chat: Arc<dyn LiveChatSurface>,
    viewport: Arc<dyn FullscreenSurface>,
    audio_picker: Arc<dyn AudioTrackPicker>,
    save_throttle: Throttle,
    retry: RetryPolicy,
    handle: SessionHandle,
    receiver: mpsc::UnboundedReceiver<SessionEvent>,
}

impl SessionController {
    pub fn new(config: Config, deps: SessionDeps) -> (SessionHandle, SessionController) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let handle = SessionHandle::new(sender);

        let extender = Arc::new(RateExtender::new(deps.host.clone(), deps.locator));
        let save_throttle = Throttle::new(Duration::from_secs(config.playback.save_interval_secs));

        let controller = SessionController {
            session: Session::default(),
            host: deps.host,
            extender,
            progress: ProgressStore::new(deps.store),
            segments: deps.segments,
            notifier: deps.notifier,
            live_chat: deps.live_chat,
            viewport: deps.viewport,
            audio_picker: deps.audio_picker,
            save_throttle,
            retry: RetryPolicy::default(),
            handle: handle.clone(),
            receiver,
            config,
        };

        (handle, controller)
    }

    /// Shared with the speed-menu injector so menu clicks and host rate
    /// queries go through the same wrapper.
    pub fn extender(&self) -> Arc<RateExtender> {
        self.extender.clone()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Drain events until every handle is dropped.
    pub async fn run(mut self) {
        debug!("Session controller event loop started");
        while let Some(event) = self.receiver.recv().await {
            self.handle_event(event).await;
        }
        debug!("Session controller event loop terminated");
    }

    /// Handle one host-delivered event to completion. Infallible by design:
    /// anything that goes wrong inside is logged and absorbed.
    pub async fn handle_event(&mut self, event: SessionEvent) {
        trace!("Handling {event:?}");
        match event {
            SessionEvent::PlayerDiscovered => self.bind_player().await,
            SessionEvent::VideoDataChanged(details) => self.on_video_data(details).await,
            SessionEvent::StateChanged(state) => self.on_tick(state),
            SessionEvent::MediaTick => {
                // Media-element events carry no state; read it off the host.
                let state = self
                    .host
                    .playback_state()
                    .unwrap_or(PlaybackState::Paused);
                self.on_tick(state);
            }
            SessionEvent::MediaAttached(media) => {
                if self.session.media_events_bound {
                    return;
                }
                let handle = self.handle.clone();
                media.subscribe_playback_events(Box::new(move || {
                    handle.post(SessionEvent::MediaTick);
                }));
                self.session.media_events_bound = true;
                debug!("Media element playback events wired");
            }
            SessionEvent::SegmentsFetched(set) => {
                debug!(
                    "Skip set for {} arrived with {} segments",
                    set.video_id,
                    set.segments.len()
                );
                self.session.active_skip_set = Some(set);
            }
            SessionEvent::Navigated(route) => {
                if route == Route::Home && self.viewport.is_narrow() {
                    // The host autoplays a feed video on its home page.
                    debug!("Navigated home on a constrained viewport, pausing");
                    self.host.pause();
                }
            }
        }
    }

    /// Idle → Bound. Waits (bounded) for the host to become responsive,
    /// then activates the rate extender. Rebinding on a fresh discovery is
    /// harmless; the extender bind is flag-guarded.
    async fn bind_player(&mut self) {
        if self
            .retry
            .run("player readiness", || self.host.playback_state())
            .await
            .is_none()
        {
            // Bind anyway; every later tick tolerates an unready host.
            warn!("Player never reported ready, binding best-effort");
        }
        self.extender.bind();
        self.session.bound = true;
        info!("Player bound");
    }

    /// One-shot per-video initialization, entered exactly once per identity
    /// change.
    async fn on_video_data(&mut self, details: VideoDetails) {
        if details.video_id.is_empty() || details.video_id == self.session.current_video_id {
            return;
        }
        info!("Video changed to {}", details.video_id);
        self.session.begin_video(details.video_id.clone());

        self.host.unmute();
        self.notifier.now_playing(&NowPlaying {
            title: details.title.clone(),
            author: details.author.clone(),
            duration_secs: details.duration_secs,
            thumbnail_url: details.largest_thumbnail().map(|t| t.url.clone()),
        });

        self.session.should_persist_progress =
            details.duration_secs > self.config.playback.min_persist_duration_secs;
        if self.session.should_persist_progress {
            self.restore_progress(&details);
            self.progress.track(&details.video_id);
            self.session.progress_restored = true;
        }

        self.select_original_audio().await;

        self.live_chat.hide();
        if details.is_live {
            self.live_chat.show_entry_point(&details.video_id);
        }

        if self.config.segments.enabled {
            self.spawn_segment_fetch(details.video_id);
        }
    }

    fn restore_progress(&self, details: &VideoDetails) {
        let Some(stored) = self.progress.position(&details.video_id) else {
            return;
        };
        if stored <= 0.0 {
            return;
        }
        // Resuming 0-10s from the end would immediately re-trigger
        // end-of-video; pull the restore point back instead.
        let target = if details.duration_secs - stored < NEAR_END_GUARD_SECS
            && stored > NEAR_END_GUARD_SECS
        {
            stored - NEAR_END_GUARD_SECS
        } else {
            stored
        };
        debug!(
            "Restoring {} to {target}s (stored {stored}s)",
            details.video_id
        );
        self.host.seek_to(target);
    }

    /// Waits (bounded) for the host's track list, then applies the external
    /// matcher's pick. Exhaustion abandons the affordance for this video.
    async fn select_original_audio(&self) {
        let host = self.host.clone();
        let Some(tracks) = self
            .retry
            .run("audio tracks", || {
                let tracks = host.available_audio_tracks();
                if tracks.is_empty() { None } else { Some(tracks) }
            })
            .await
        else {
            return;
        };
        if let Some(index) = self.audio_picker.pick_original(&tracks) {
            if let Some(track) = tracks.get(index) {
                debug!("Selecting original audio track {}", track.display_name);
                self.host.set_audio_track(&track.id);
            }
        }
    }

    /// Fire-and-forget fetch; the result re-enters the loop as an event and
    /// is dropped by id check if the session has moved on. There is no
    /// cancellation for in-flight fetches.
    fn spawn_segment_fetch(&self, video_id: String) {
        let provider = self.segments.clone();
        let handle = self.handle.clone();
        tokio::spawn(async move {
            match provider.fetch_segments(&video_id).await {
                Ok(set) => handle.post(SessionEvent::SegmentsFetched(set)),
                Err(err) => warn!("Segment fetch for {video_id} failed: {err:#}"),
            }
        });
    }

    /// Steady-state tick: progress notification, throttled persistence, and
    /// segment enforcement.
    fn on_tick(&mut self, state: PlaybackState) {
        let Some(current_time) = self.host.current_time() else {
            // Player not fully initialized; treat the chat surface as hidden
            // and skip the rest of this tick.
            self.live_chat.hide();
            return;
        };

        self.notifier.progress(state.is_playing(), current_time);
        self.persist_progress(current_time);
        self.enforce_skips(current_time);

        if state == PlaybackState::Ended && !self.config.playback.audio_only {
            self.notifier.playback_ended();
        }
    }

    /// Two writes per open throttle window: elapsed time (only once the
    /// one-shot restore completed, for videos worth persisting) and the
    /// last-playing pointer (always, so short videos resume too).
    fn persist_progress(&mut self, current_time: f64) {
        if !self.save_throttle.ready() {
            return;
        }
        if self.session.should_persist_progress
            && self.session.progress_restored
            && !self.session.current_video_id.is_empty()
        {
            self.progress
                .save_position(&self.session.current_video_id, current_time);
        }
        if let Some(url) = self.host.video_url() {
            self.progress.set_last_playing(&url);
        }
    }

    /// Scan the active skip set in provider order and act on the first range
    /// strictly containing the current time. First match wins for the tick;
    /// overlapping ranges are each checked independently on later ticks.
    fn enforce_skips(&self, current_time: f64) {
        if !self.config.segments.enabled {
            return;
        }
        let Some(set) = &self.session.active_skip_set else {
            return;
        };
        if set.video_id != self.session.current_video_id || set.is_empty() {
            return;
        }
        for segment in &set.segments {
            if segment.contains(current_time) {
                debug!(
                    "Skipping segment [{}, {}] at {current_time}",
                    segment.start, segment.end
                );
                self.host.seek_to(segment.end);
                break;
            }
        }
    }
}
