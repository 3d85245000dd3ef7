//! Player session reconciliation: the single source of truth for which
//! video is active and the coordinator of all per-video work.

mod controller;

pub use controller::{Session, SessionController, SessionDeps};

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::host::MediaElement;
use crate::models::{AudioTrack, PlaybackState, Route, SkipSet, VideoDetails};

/// Everything the host page can tell the session controller. Events are
/// handled to completion in arrival order; re-delivery of any event is safe.
pub enum SessionEvent {
    /// A player element was observed in the document.
    PlayerDiscovered,
    /// Lifecycle event carrying a (possibly unchanged) video-details payload.
    VideoDataChanged(VideoDetails),
    /// The host reported a playback state change.
    StateChanged(PlaybackState),
    /// Raw play/pause/time-update signal from the bound media element.
    MediaTick,
    /// The underlying media element became reachable.
    MediaAttached(Arc<dyn MediaElement>),
    /// An in-flight segment fetch resolved. May be stale; consumers check
    /// the carried video id before acting on it.
    SegmentsFetched(SkipSet),
    /// The host page navigated.
    Navigated(Route),
}

impl std::fmt::Debug for SessionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionEvent::PlayerDiscovered => write!(f, "PlayerDiscovered"),
            SessionEvent::VideoDataChanged(d) => {
                write!(f, "VideoDataChanged({})", d.video_id)
            }
            SessionEvent::StateChanged(s) => write!(f, "StateChanged({s:?})"),
            SessionEvent::MediaTick => write!(f, "MediaTick"),
            SessionEvent::MediaAttached(_) => write!(f, "MediaAttached"),
            SessionEvent::SegmentsFetched(s) => {
                write!(f, "SegmentsFetched({}, {})", s.video_id, s.segments.len())
            }
            SessionEvent::Navigated(r) => write!(f, "Navigated({r:?})"),
        }
    }
}

/// Cloneable sender used by host adapters (lifecycle listeners, mutation
/// observers, media-element callbacks) to post events into the session loop.
#[derive(Clone)]
pub struct SessionHandle {
    sender: mpsc::UnboundedSender<SessionEvent>,
}

impl SessionHandle {
    pub(crate) fn new(sender: mpsc::UnboundedSender<SessionEvent>) -> Self {
        Self { sender }
    }

    /// Post an event. A dropped controller makes this a no-op; adapters
    /// outliving the session is not an error.
    pub fn post(&self, event: SessionEvent) {
        let _ = self.sender.send(event);
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle").finish_non_exhaustive()
    }
}

/// Narrow seam onto the external original-language matching table: given the
/// host's track list, pick the index of the original-audio track, or `None`
/// when it cannot be determined.
pub trait AudioTrackPicker: Send + Sync {
    fn pick_original(&self, tracks: &[AudioTrack]) -> Option<usize>;
}

/// Picker that never matches; keeps the affordance disabled.
#[derive(Debug, Default)]
pub struct NoopAudioPicker;

impl AudioTrackPicker for NoopAudioPicker {
    fn pick_original(&self, _tracks: &[AudioTrack]) -> Option<usize> {
        None
    }
}
