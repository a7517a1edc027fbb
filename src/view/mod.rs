//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `layout`: Frame structure (title bar, status bar, loading screen)
//! - `stack`: The card stack, including the image previews
//! - `results`: The end-of-batch results screen
//! - `overlays`: Modal overlays (tutorial, error, help, like pulse)

mod layout;
mod overlays;
mod results;
mod stack;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{Phase, SessionView, UiState};

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, view: &SessionView, ui_state: &UiState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title bar with batch progress
                Constraint::Min(0),    // Card stack / results
                Constraint::Length(3), // Key hints
            ])
            .split(frame.area());

        layout::render_title_bar(frame, chunks[0], view);

        match view.phase {
            Phase::Loading => layout::render_loading(frame, chunks[1], view),
            Phase::Playing => stack::render_stack(frame, chunks[1], view),
            Phase::Results => results::render_results(frame, chunks[1], view),
        }

        layout::render_status_bar(frame, chunks[2], view);

        // Transient "liked" pulse, self-clearing in the model
        if view.like_pulse {
            overlays::render_like_pulse(frame);
        }

        // Error notification overlay (if there's an error)
        if ui_state.error_message.is_some() {
            overlays::render_error_notification(frame, ui_state);
        }

        // Help popup overlay (if open)
        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }

        // Tutorial overlay shown on first launch
        if ui_state.show_tutorial {
            overlays::render_tutorial(frame);
        }
    }
}
