//! Main application model with state management

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::gesture::{CardSurface, SurfaceEvent, SwipeConfig};

use super::cat_client::{CatClient, Preview};
use super::session::{CardId, LoadToken, SurfaceCommand, SwipeDirection, SwipeSession};
use super::types::{CardView, SessionView, UiState};

const ERROR_AUTO_CLEAR: Duration = Duration::from_secs(5);

/// Main application model containing all state
pub struct AppModel {
    pub cat: Option<CatClient>,
    session: Arc<Mutex<SwipeSession>>,
    ui_state: Arc<Mutex<UiState>>,
    surfaces: Arc<Mutex<HashMap<CardId, CardSurface>>>,
    previews: Arc<Mutex<HashMap<CardId, Preview>>>,
    swipe_config: SwipeConfig,
    should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new() -> Self {
        Self {
            cat: None,
            session: Arc::new(Mutex::new(SwipeSession::new())),
            ui_state: Arc::new(Mutex::new(UiState::default())),
            surfaces: Arc::new(Mutex::new(HashMap::new())),
            previews: Arc::new(Mutex::new(HashMap::new())),
            swipe_config: SwipeConfig::default(),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    pub fn set_cat_client(&mut self, client: CatClient) {
        self.cat = Some(client);
    }

    // ========================================================================
    // Batch lifecycle
    // ========================================================================

    pub async fn begin_batch(&self, n: usize) -> LoadToken {
        self.session.lock().await.begin_load(n)
    }

    /// Install a completed batch: deck into the session, one gesture surface
    /// per card, previews for the cards whose image actually loaded. Returns
    /// `false` when the token was stale and nothing changed.
    pub async fn install_batch(
        &self,
        token: LoadToken,
        image_urls: Vec<String>,
        loaded_previews: Vec<Option<Preview>>,
    ) -> bool {
        let mut session = self.session.lock().await;
        if !session.complete_load(token, image_urls) {
            return false;
        }

        let mut surfaces = self.surfaces.lock().await;
        let mut previews = self.previews.lock().await;
        surfaces.clear();
        previews.clear();
        for (index, (card, preview)) in session.deck().iter().zip(loaded_previews).enumerate() {
            surfaces.insert(card.id, CardSurface::new(index, self.swipe_config));
            if let Some(preview) = preview {
                previews.insert(card.id, preview);
            }
        }
        true
    }

    pub async fn fail_batch(&self, token: LoadToken, message: String) -> bool {
        let applied = self.session.lock().await.fail_load(token, message.clone());
        if applied {
            self.set_error(message).await;
        }
        applied
    }

    pub async fn restart_batch_size(&self) -> Option<usize> {
        let session = self.session.lock().await;
        if session.can_restart() {
            Some(session.batch_size())
        } else {
            None
        }
    }

    // ========================================================================
    // Swipes & surface reconciliation
    // ========================================================================

    pub async fn resolve_swipe(&self, index: usize, direction: SwipeDirection) -> bool {
        self.session.lock().await.resolve_swipe(index, direction)
    }

    pub async fn reconcile_left_surface(&self, index: usize) -> Option<SurfaceCommand> {
        self.session.lock().await.reconcile_left_surface(index)
    }

    pub async fn restore_surface(&self, index: usize) {
        let id = self.session.lock().await.card_at(index).map(|card| card.id);
        let Some(id) = id else { return };
        if let Some(surface) = self.surfaces.lock().await.get_mut(&id) {
            surface.restore_to_rest();
        }
    }

    /// Ask the top card's surface to animate a dismissal. No-op when the deck
    /// is exhausted or still loading.
    pub async fn trigger_dismiss(&self, direction: SwipeDirection) {
        let Some(id) = self.top_card_id().await else {
            tracing::debug!(direction = direction.as_str(), "No card to dismiss");
            return;
        };
        if let Some(surface) = self.surfaces.lock().await.get_mut(&id) {
            surface.trigger_dismiss(direction);
        }
    }

    pub async fn begin_drag(&self, origin_column: u16) {
        let Some(id) = self.top_card_id().await else { return };
        if let Some(surface) = self.surfaces.lock().await.get_mut(&id) {
            surface.begin_drag();
        }
        self.ui_state.lock().await.drag_origin = Some(origin_column);
    }

    pub async fn drag_to_column(&self, column: u16) {
        let origin = self.ui_state.lock().await.drag_origin;
        let Some(origin) = origin else { return };
        let offset = column as f32 - origin as f32;
        let Some(id) = self.top_card_id().await else { return };
        if let Some(surface) = self.surfaces.lock().await.get_mut(&id) {
            surface.drag_to(offset);
        }
    }

    pub async fn release_drag(&self) {
        let origin = self.ui_state.lock().await.drag_origin.take();
        if origin.is_none() {
            return;
        }
        let Some(id) = self.top_card_id().await else { return };
        if let Some(surface) = self.surfaces.lock().await.get_mut(&id) {
            surface.release();
        }
    }

    async fn top_card_id(&self) -> Option<CardId> {
        let session = self.session.lock().await;
        let index = session.dismiss_target()?;
        session.card_at(index).map(|card| card.id)
    }

    /// Advance every card's animation and drain the events they produced.
    pub async fn advance_surfaces(&self, dt: Duration) -> Vec<SurfaceEvent> {
        let mut surfaces = self.surfaces.lock().await;
        let mut events = Vec::new();
        for surface in surfaces.values_mut() {
            surface.advance(dt);
            events.extend(surface.take_events());
        }
        events
    }

    pub async fn expire_like_pulse(&self) {
        self.session.lock().await.expire_like_pulse();
    }

    // ========================================================================
    // UI state
    // ========================================================================

    pub async fn set_error(&self, message: String) {
        let mut state = self.ui_state.lock().await;
        state.error_message = Some(message);
        state.error_timestamp = Some(Instant::now());
    }

    pub async fn clear_error(&self) {
        let mut state = self.ui_state.lock().await;
        state.error_message = None;
        state.error_timestamp = None;
    }

    pub async fn has_error(&self) -> bool {
        self.ui_state.lock().await.error_message.is_some()
    }

    pub async fn auto_clear_old_errors(&self) {
        let mut state = self.ui_state.lock().await;
        if let Some(timestamp) = state.error_timestamp {
            if timestamp.elapsed() > ERROR_AUTO_CLEAR {
                state.error_message = None;
                state.error_timestamp = None;
            }
        }
    }

    pub async fn is_tutorial_open(&self) -> bool {
        self.ui_state.lock().await.show_tutorial
    }

    pub async fn dismiss_tutorial(&self) {
        self.ui_state.lock().await.show_tutorial = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    // ========================================================================
    // Render snapshot
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn get_session_view(&self) -> SessionView {
        let session = self.session.lock().await;
        let surfaces = self.surfaces.lock().await;
        let previews = self.previews.lock().await;

        let cards = session
            .deck()
            .iter()
            .map(|card| {
                let surface = surfaces.get(&card.id);
                CardView {
                    image_url: card.image_url.clone(),
                    preview: previews.get(&card.id).cloned(),
                    offset: surface.map_or(0.0, |s| s.offset()),
                    gone: surface.is_some_and(|s| s.is_gone()),
                    badge: surface.and_then(|s| s.committed_direction()),
                }
            })
            .collect();

        SessionView {
            phase: session.phase(),
            cards,
            current_index: session.current_index(),
            liked_urls: session
                .liked()
                .iter()
                .map(|card| card.image_url.clone())
                .collect(),
            batch_size: session.batch_size(),
            load_error: session.load_error().map(str::to_string),
            like_pulse: session.like_pulse_active(),
        }
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new()
    }
}
