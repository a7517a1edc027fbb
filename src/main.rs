use std::io;
use std::sync::Arc;
use anyhow::Result;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use catswipe::controller::AppController;
use catswipe::logging;
use catswipe::model::{AppModel, CatClient, DECK_SIZE};
use catswipe::view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== catswipe starting ===");

    let mut app_model = AppModel::new();
    match CatClient::new() {
        Ok(client) => app_model.set_cat_client(client),
        // The controller retries construction on the first load, so this is
        // survivable; the user just sees the error state.
        Err(e) => tracing::error!(error = %e, "Image client init failed"),
    }

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let model = Arc::new(Mutex::new(app_model));
    let controller = AppController::new(model.clone());

    // Fetch the first batch in the background while the tutorial shows
    let controller_for_init = controller.clone();
    tokio::spawn(async move {
        controller_for_init.load_batch(DECK_SIZE).await;
    });

    let res = run_app(&mut terminal, model.clone(), controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("catswipe shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        // Advance animations and drain gesture events
        let now = Instant::now();
        controller.tick(now.duration_since(last_tick)).await;
        last_tick = now;

        // Get current state
        let (session_view, ui_state, should_quit) = {
            let model_guard = model.lock().await;
            (
                model_guard.get_session_view().await,
                model_guard.get_ui_state().await,
                model_guard.should_quit().await,
            )
        };

        // Draw UI
        terminal.draw(|f| {
            AppView::render(f, &session_view, &ui_state);
        })?;

        // Handle input with a short poll time so animations stay smooth
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    let _ = controller.handle_key_event(key).await;
                }
                Event::Mouse(mouse) => {
                    let _ = controller.handle_mouse_event(mouse).await;
                }
                _ => {}
            }
        }

        if should_quit {
            break;
        }
    }

    Ok(())
}
