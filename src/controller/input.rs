//! Key and mouse event handling

use anyhow::Result;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};

use crate::model::SwipeDirection;
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = self.model.lock().await;

        // Handle error message first (blocks all other interactions)
        if model.has_error().await {
            return match key.code {
                KeyCode::Esc => {
                    model.clear_error().await;
                    Ok(())
                }
                KeyCode::Enter => {
                    model.clear_error().await;
                    drop(model);
                    let controller = self.clone();
                    tokio::spawn(async move {
                        controller.restart().await;
                    });
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        // Handle help popup
        if model.is_help_popup_open().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H') => {
                    model.hide_help_popup().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        // The tutorial overlay swallows the first key press
        if model.is_tutorial_open().await {
            model.dismiss_tutorial().await;
            return Ok(());
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true).await;
            }
            // Dislike / like the top card
            KeyCode::Left => {
                drop(model);
                self.request_dismiss(SwipeDirection::Left).await;
            }
            KeyCode::Right => {
                drop(model);
                self.request_dismiss(SwipeDirection::Right).await;
            }
            // New batch from the results screen
            KeyCode::Char('r') | KeyCode::Char('R') => {
                drop(model);
                let controller = self.clone();
                tokio::spawn(async move {
                    controller.restart().await;
                });
            }
            // Show help popup
            KeyCode::Char('h') | KeyCode::Char('H') => {
                model.show_help_popup().await;
            }
            _ => {}
        }
        Ok(())
    }

    /// Drag gestures on the card stack. Only horizontal movement counts; the
    /// row component is ignored entirely.
    pub async fn handle_mouse_event(&self, mouse: MouseEvent) -> Result<()> {
        let model = self.model.lock().await;

        if model.has_error().await || model.is_help_popup_open().await {
            return Ok(());
        }
        if model.is_tutorial_open().await {
            if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
                model.dismiss_tutorial().await;
            }
            return Ok(());
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                model.begin_drag(mouse.column).await;
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                model.drag_to_column(mouse.column).await;
            }
            MouseEventKind::Up(MouseButton::Left) => {
                model.release_drag().await;
            }
            _ => {}
        }
        Ok(())
    }
}
