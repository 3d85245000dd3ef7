//! Rotation-driven fullscreen toggling, independent of the session
//! controller.

use std::sync::Arc;
use tracing::debug;

use crate::host::FullscreenSurface;
use crate::models::{Orientation, Route};

/// Stateless policy: entering landscape on a narrow watch page enters
/// fullscreen; leaving landscape while fullscreen exits it.
pub struct OrientationHandler {
    surface: Arc<dyn FullscreenSurface>,
}

impl OrientationHandler {
    pub fn new(surface: Arc<dyn FullscreenSurface>) -> Self {
        Self { surface }
    }

    pub fn on_orientation_change(&self, orientation: Orientation, route: Route) {
        if route != Route::Watch {
            return;
        }
        match orientation {
            Orientation::Landscape => {
                if !self.surface.is_fullscreen() && self.surface.is_narrow() {
                    debug!("Landscape on watch page, entering fullscreen");
                    self.surface.enter_fullscreen();
                }
            }
            Orientation::Portrait => {
                if self.surface.is_fullscreen() {
                    debug!("Left landscape while fullscreen, exiting");
                    self.surface.exit_fullscreen();
                }
            }
        }
    }
}
