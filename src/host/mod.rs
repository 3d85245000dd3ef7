//! Seams onto the foreign object model this bridge observes.
//!
//! The host player, its underlying media element, and the menu DOM are
//! borrowed references into an external, frequently-mutating, partially
//! undocumented surface. Every trait here is deliberately best-effort: an
//! accessor that the host does not currently expose returns `None` (or an
//! empty list), and side-effecting calls on an unready host degrade to
//! no-ops inside the implementation. Nothing in this module is owned by the
//! bridge.

use std::sync::Arc;

use crate::models::{AudioTrack, PlaybackState, VideoDetails};

/// Capability surface of the host player object.
///
/// Bound once per player-element discovery and held for the page-view
/// lifetime. Accessors return `None` while the player is partially
/// initialized; callers treat that as "skip this feature for this tick".
pub trait PlayerHost: Send + Sync {
    fn current_time(&self) -> Option<f64>;
    fn playback_state(&self) -> Option<PlaybackState>;
    /// Metadata for the loaded video, when the host has populated it.
    fn video_details(&self) -> Option<VideoDetails>;
    fn video_url(&self) -> Option<String>;

    fn seek_to(&self, seconds: f64);
    fn play(&self);
    fn pause(&self);
    fn unmute(&self);

    /// The host's own rate-setting path. Keeps host-internal bookkeeping
    /// consistent; only valid for natively supported rates.
    fn set_playback_rate(&self, rate: f64);
    fn available_playback_rates(&self) -> Vec<f64>;

    fn available_audio_tracks(&self) -> Vec<AudioTrack>;
    fn set_audio_track(&self, track_id: &str);
}

/// The media element backing the player. Rates above the host's native
/// ceiling are applied here directly, bypassing host bookkeeping.
pub trait MediaElement: Send + Sync {
    fn set_rate(&self, rate: f64);

    /// Wire play/pause/time-update events to `callback`. Bound at most once
    /// per player element; the caller guards against rebinding.
    fn subscribe_playback_events(&self, callback: Box<dyn Fn() + Send + Sync>);
}

/// Ordered lookup strategies for finding the media element. Tried in
/// declaration order; the first non-empty result wins.
pub trait MediaLocator: Send + Sync {
    /// Query scoped to the player container.
    fn query_scoped(&self) -> Option<Arc<dyn MediaElement>>;
    /// Query relative to the player element itself.
    fn query_player(&self) -> Option<Arc<dyn MediaElement>>;
    /// Document-wide query, last resort.
    fn query_document(&self) -> Option<Arc<dyn MediaElement>>;
}

/// Mutation-scoped view of the host UI that may contain a speed menu.
pub trait MenuSurface: Send + Sync {
    /// Locate the speed-menu container by its fixed selector, if rendered.
    fn speed_menu(&self) -> Option<Arc<dyn SpeedMenu>>;
}

/// A candidate speed-menu container. Whether it really is one is decided by
/// the injector's content validation, not by this trait.
pub trait SpeedMenu: Send + Sync {
    /// Visible text of every existing entry, in DOM order.
    fn entry_labels(&self) -> Vec<String>;

    /// Injection marker, set once the menu has been augmented.
    fn is_marked(&self) -> bool;
    fn mark(&self);

    /// True when an injected entry for this rate already exists.
    fn has_custom_entry(&self, rate: f64) -> bool;

    /// Clone the template entry into a new marked sibling carrying `label`
    /// and the rate as a data attribute.
    fn append_custom_entry(&self, label: &str, rate: f64);

    /// Clear selected/checked state from every entry, native and injected.
    fn clear_selection(&self);
    /// Mark the entry carrying `rate` as selected.
    fn select(&self, rate: f64);

    /// Best-effort close of the enclosing menu. Returns whether a close
    /// control was found.
    fn close(&self) -> bool;
}

/// Viewport and fullscreen state of the embedding page.
pub trait FullscreenSurface: Send + Sync {
    fn is_fullscreen(&self) -> bool;
    /// Narrow-viewport predicate; gates both orientation-driven fullscreen
    /// and the home-route force pause.
    fn is_narrow(&self) -> bool;
    fn enter_fullscreen(&self);
    fn exit_fullscreen(&self);
}
