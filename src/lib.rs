//! nou-bridge: observes and augments a third-party video player embedded in
//! a mobile web page.
//!
//! The crate's core is the player-session reconciliation loop in
//! [`session`]: it detects video identity changes, runs a one-shot per-video
//! initialization (progress restore, skip-segment fetch, now-playing
//! notification), and drives a continuous tick loop that persists progress
//! and enforces segment skipping. Around it sit the playback-rate extender,
//! the speed-menu injector, the persisted progress store, and the
//! orientation handler. All contact with the host page goes through the
//! seam traits in [`host`], [`notify`] and [`segments`]; the embedder
//! supplies adapters and posts events through a [`session::SessionHandle`].

pub mod config;
pub mod constants;
pub mod host;
pub mod menu;
pub mod models;
pub mod notify;
pub mod orientation;
pub mod rate;
pub mod segments;
pub mod session;
pub mod store;
pub mod utils;

/// Install the default tracing subscriber for embedders and tools that do
/// not bring their own.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("nou_bridge=debug")),
        )
        .init();
}
