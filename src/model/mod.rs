//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the
//! application. It is organized into submodules by responsibility:
//!
//! - `session`: The swipe-session state machine (deck, top index, liked set,
//!   phase transitions)
//! - `types`: UI state and render-snapshot types
//! - `cat_client`: Image source client for the cat endpoint
//! - `app_model`: Main application model with state management methods

pub mod cat_client;
pub mod session;
mod app_model;
mod types;

// Re-export all public types for convenient access
pub use session::{
    Card, CardId, LoadToken, Phase, SurfaceCommand, SwipeDirection, SwipeSession, DECK_SIZE,
};

pub use cat_client::{CatClient, Preview, SourceError};

pub use types::{CardView, SessionView, UiState};

pub use app_model::AppModel;
