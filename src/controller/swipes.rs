//! Swipe resolution and the per-frame tick

use std::time::Duration;

use crate::gesture::SurfaceEvent;
use crate::model::{SurfaceCommand, SwipeDirection};
use super::AppController;

impl AppController {
    /// Programmatic dismissal of the current top card, bound to the
    /// like/dislike keys. Funnels through the same surface-event path as a
    /// drag, so resolution happens in exactly one place.
    pub async fn request_dismiss(&self, direction: SwipeDirection) {
        let model = self.model.lock().await;
        model.trigger_dismiss(direction).await;
    }

    /// One frame of housekeeping: advance card animations, apply the events
    /// the surfaces produced, and expire transient state.
    pub async fn tick(&self, dt: Duration) {
        let model = self.model.lock().await;
        model.auto_clear_old_errors().await;
        model.expire_like_pulse().await;

        for event in model.advance_surfaces(dt).await {
            match event {
                SurfaceEvent::Resolved { index, direction } => {
                    model.resolve_swipe(index, direction).await;
                }
                SurfaceEvent::LeftSurface { index } => {
                    // The session is the source of truth for what is on top;
                    // a card it has not advanced past goes back to rest.
                    if model.reconcile_left_surface(index).await == Some(SurfaceCommand::Restore) {
                        model.restore_surface(index).await;
                    }
                }
            }
        }
    }
}
