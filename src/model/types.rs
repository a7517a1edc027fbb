//! Core type definitions for the application

use std::time::Instant;

use crate::model::cat_client::Preview;
use crate::model::session::{Phase, SwipeDirection};

/// UI state for the application
#[derive(Clone)]
pub struct UiState {
    pub show_tutorial: bool,
    pub show_help_popup: bool,
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
    /// Column where the current mouse drag started, if one is active.
    pub drag_origin: Option<u16>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            show_tutorial: true,
            show_help_popup: false,
            error_message: None,
            error_timestamp: None,
            drag_origin: None,
        }
    }
}

/// One card as the view needs it: its place in the stack plus whatever the
/// gesture surface is currently doing with it.
#[derive(Clone)]
pub struct CardView {
    pub image_url: String,
    pub preview: Option<Preview>,
    /// Horizontal displacement in cells, from dragging or the exit animation.
    pub offset: f32,
    /// The card has fully left the surface and is no longer drawn.
    pub gone: bool,
    /// Shown on the top card once a drag has passed the commit threshold.
    pub badge: Option<SwipeDirection>,
}

/// Immutable snapshot of the session for one rendered frame.
#[derive(Clone)]
pub struct SessionView {
    pub phase: Phase,
    pub cards: Vec<CardView>,
    pub current_index: isize,
    pub liked_urls: Vec<String>,
    pub batch_size: usize,
    pub load_error: Option<String>,
    pub like_pulse: bool,
}
