//! Playback-rate extension beyond the host's native ceiling.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

use crate::constants::{EXTENDED_RATES, NATIVE_RATE_CEILING};
use crate::host::{MediaElement, MediaLocator, PlayerHost};
use crate::utils::BridgeError;

/// Capability-extending wrapper around the host's rate controls.
///
/// The host object is referenced, never mutated: rate queries are answered
/// from the fixed extended list, and rate sets drive the underlying media
/// element directly. Rates at or below the native ceiling are additionally
/// routed through the host's own path so host-internal UI and bookkeeping
/// stay consistent; rates above it are invisible to the host.
pub struct RateExtender {
    host: Arc<dyn PlayerHost>,
    locator: Arc<dyn MediaLocator>,
    bound: AtomicBool,
}

impl RateExtender {
    pub fn new(host: Arc<dyn PlayerHost>, locator: Arc<dyn MediaLocator>) -> Self {
        Self {
            host,
            locator,
            bound: AtomicBool::new(false),
        }
    }

    /// One-time activation. Returns false (and does nothing) on every call
    /// after the first.
    pub fn bind(&self) -> bool {
        if self.bound.swap(true, Ordering::SeqCst) {
            debug!("Rate extender already bound, ignoring");
            return false;
        }
        debug!("Rate extender bound");
        true
    }

    pub fn is_bound(&self) -> bool {
        self.bound.load(Ordering::SeqCst)
    }

    /// The extended ascending rate list, replacing the host's enumeration.
    pub fn available_rates(&self) -> &'static [f64] {
        EXTENDED_RATES
    }

    /// Apply a playback rate. Without a reachable media element the rate
    /// cannot be applied anywhere; callers decide whether that is fatal.
    pub fn set_rate(&self, rate: f64) -> Result<(), BridgeError> {
        let media = self.locate_media().ok_or_else(|| {
            BridgeError::Capability(format!("no media element reachable to set rate {rate}"))
        })?;
        media.set_rate(rate);
        if rate <= NATIVE_RATE_CEILING {
            // Keep the host's own state in sync for rates it understands.
            self.host.set_playback_rate(rate);
        }
        debug!("Playback rate set to {rate}");
        Ok(())
    }

    /// Ordered fallback: scoped query, player-relative query, then the
    /// document-wide query. First hit wins.
    fn locate_media(&self) -> Option<Arc<dyn MediaElement>> {
        self.locator
            .query_scoped()
            .or_else(|| self.locator.query_player())
            .or_else(|| self.locator.query_document())
    }
}
