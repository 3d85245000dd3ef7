//! Embedder-facing callback surfaces. All calls are fire-and-forget; a
//! missing sink is represented by the no-op implementations, never by an
//! error.

use crate::models::NowPlaying;

/// Host/embedder notification sink.
pub trait Notifier: Send + Sync {
    /// A new video started; payload carries title/author/duration and the
    /// largest available thumbnail.
    fn now_playing(&self, info: &NowPlaying);

    /// Periodic playback status, forwarded on every handled tick.
    fn progress(&self, is_playing: bool, current_time_secs: f64);

    /// Playback reached a terminal state.
    fn playback_ended(&self);
}

/// Live-chat panel of the embedding page. Called, never awaited.
pub trait LiveChatSurface: Send + Sync {
    fn hide(&self);
    fn show_entry_point(&self, video_id: &str);
}

#[derive(Debug, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn now_playing(&self, _info: &NowPlaying) {}
    fn progress(&self, _is_playing: bool, _current_time_secs: f64) {}
    fn playback_ended(&self) {}
}

#[derive(Debug, Default)]
pub struct NoopLiveChat;

impl LiveChatSurface for NoopLiveChat {
    fn hide(&self) {}
    fn show_entry_point(&self, _video_id: &str) {}
}
