//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and view, and drives the session through its
//! batch lifecycle. It is organized into submodules by responsibility:
//!
//! - `input`: Key and mouse event handling
//! - `batch`: Batch loading, retry, and restart
//! - `swipes`: Swipe resolution and the per-frame tick

mod batch;
mod input;
mod swipes;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::model::AppModel;

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
}

impl AppController {
    pub fn new(model: Arc<Mutex<AppModel>>) -> Self {
        Self { model }
    }

    pub(crate) fn format_error(error: &crate::model::SourceError) -> String {
        let error_str = error.to_string();

        // Translate the common transport failures into something actionable.
        if error_str.contains("timed out") {
            "The cat server is taking too long. Check your connection and retry.".to_string()
        } else if error_str.contains("dns") || error_str.contains("connect") {
            "Could not reach cataas.com. Are you online?".to_string()
        } else if error_str.contains("429") {
            "Rate limited by the cat server. Wait a moment and retry.".to_string()
        } else {
            format!("Error: {error_str}")
        }
    }
}
