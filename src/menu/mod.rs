//! Speed-menu augmentation.
//!
//! Reacts to "container changed" notifications from the embedder's mutation
//! observation and, once a genuine speed menu is rendered, synthesizes one
//! entry per configured rate above the native ceiling. Everything here is a
//! fallible lookup against an undocumented foreign UI: absence at any step
//! aborts the attempt and a later mutation retries it.

use std::sync::Arc;
use tracing::{debug, trace, warn};

use crate::host::MenuSurface;
use crate::rate::RateExtender;

pub struct SpeedMenuInjector {
    surface: Arc<dyn MenuSurface>,
    extender: Arc<RateExtender>,
    custom_rates: Vec<f64>,
}

impl SpeedMenuInjector {
    pub fn new(
        surface: Arc<dyn MenuSurface>,
        extender: Arc<RateExtender>,
        custom_rates: Vec<f64>,
    ) -> Self {
        Self {
            surface,
            extender,
            custom_rates,
        }
    }

    /// Handle one mutation notification. Safe to call arbitrarily often;
    /// the marker and per-rate checks make injection exactly-once.
    pub fn on_mutation(&self) {
        let Some(menu) = self.surface.speed_menu() else {
            trace!("No speed menu container present yet");
            return;
        };
        if menu.is_marked() {
            return;
        }

        let labels = menu.entry_labels();
        // Content-shape gate: a container whose entries are not all rate
        // labels is some unrelated menu that happened to match the selector.
        if labels.is_empty() || !labels.iter().all(|label| is_rate_label(label)) {
            debug!("Container failed speed-menu validation, not injecting");
            return;
        }

        for &rate in &self.custom_rates {
            if menu.has_custom_entry(rate) {
                continue;
            }
            let label = rate_label(rate);
            menu.append_custom_entry(&label, rate);
            debug!("Injected speed option {label}");
        }
        menu.mark();
    }

    /// Click handler wired to every injected entry. The menu still reflects
    /// the choice when the rate could not be applied; a later media element
    /// pick-up honors the selection.
    pub fn handle_click(&self, rate: f64) {
        if let Err(err) = self.extender.set_rate(rate) {
            warn!("{err}");
        }
        if let Some(menu) = self.surface.speed_menu() {
            menu.clear_selection();
            menu.select(rate);
            if !menu.close() {
                debug!("No close control found for the speed menu");
            }
        }
        debug!("Custom speed {rate} selected");
    }
}

/// True for entry text of the form `<number>` or `<number>x`, whitespace
/// tolerated. Anything else ("Quality", "Captions", ...) disqualifies the
/// container.
fn is_rate_label(text: &str) -> bool {
    let trimmed = text.trim();
    let numeric = trimmed
        .strip_suffix('x')
        .or_else(|| trimmed.strip_suffix('×'))
        .unwrap_or(trimmed)
        .trim();
    !numeric.is_empty() && numeric.parse::<f64>().is_ok()
}

/// Visible label for an injected rate: trailing `x`, no trailing zeros.
fn rate_label(rate: f64) -> String {
    if rate.fract() == 0.0 {
        format!("{}x", rate as i64)
    } else {
        format!("{rate}x")
    }
}
