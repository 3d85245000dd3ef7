// Behavior tuning constants - all thresholds and intervals in one place

use std::time::Duration;

// === Progress persistence ===

/// Videos at or below this duration are not worth persisting progress for.
pub const MIN_PERSIST_DURATION_SECS: f64 = 600.0;

/// Resuming this close to the end would immediately re-trigger end-of-video,
/// so the restore point is pulled back by the same amount.
pub const NEAR_END_GUARD_SECS: f64 = 10.0;

/// At most one persistence write burst per window, regardless of tick rate.
pub const PROGRESS_SAVE_INTERVAL: Duration = Duration::from_secs(5);

/// Tracked-video list cap; the oldest id (and its progress entry) is evicted
/// beyond this.
pub const TRACKED_VIDEOS_CAP: usize = 100;

// === Storage keys ===

pub const KEY_LAST_PLAYING: &str = "nou:playing";
pub const KEY_TRACKED_VIDEOS: &str = "nou:videos:progress";
pub const KEY_PROGRESS_PREFIX: &str = "nou:progress:";

// === Playback rates ===

/// Highest rate the host's own controls accept. Anything above is applied to
/// the media element directly and is invisible to host-internal state.
pub const NATIVE_RATE_CEILING: f64 = 2.0;

/// Full rate list reported by the extended rate accessor, ascending.
pub const EXTENDED_RATES: &[f64] = &[0.25, 0.5, 0.75, 1.0, 1.25, 1.5, 1.75, 2.0, 2.5, 3.0];

/// Rates synthesized into the speed menu, all above the native ceiling.
pub const CUSTOM_MENU_RATES: &[f64] = &[2.5, 3.0];

// === Bounded retry ===

/// Attempt ceiling for readiness polls (player object, audio tracks, badge
/// elements). Exhaustion abandons the dependent action, never fails the tick.
pub const RETRY_MAX_ATTEMPTS: u32 = 10;

/// Fixed delay between retry attempts.
pub const RETRY_DELAY: Duration = Duration::from_millis(500);
