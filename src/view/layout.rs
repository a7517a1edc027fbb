//! Frame structure rendering (title bar, status bar, loading screen)

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

use crate::model::{Phase, SessionView};

pub fn render_title_bar(frame: &mut Frame, area: Rect, view: &SessionView) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Title
            Constraint::Length(18), // Batch progress
        ])
        .split(area);

    let title = Paragraph::new("Swipe the Cats")
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" catswipe ")
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(title, chunks[0]);

    let progress = match view.phase {
        Phase::Loading => "loading…".to_string(),
        Phase::Playing => format!(
            "cat {}/{}",
            view.batch_size as isize - view.current_index,
            view.batch_size
        ),
        Phase::Results => format!("{} liked", view.liked_urls.len()),
    };
    let progress = Paragraph::new(progress)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL).title(" Deck "));
    frame.render_widget(progress, chunks[1]);
}

/// The loading screen doubles as the failure screen: a batch that could not
/// load parks the session here with `load_error` set until the user retries.
pub fn render_loading(frame: &mut Frame, area: Rect, view: &SessionView) {
    let lines = match &view.load_error {
        Some(error) => vec![
            Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press R to retry",
                Style::default().fg(Color::DarkGray),
            )),
        ],
        None => vec![Line::from(Span::styled(
            format!("Fetching {} fresh cats…", view.batch_size),
            Style::default().fg(Color::Yellow),
        ))],
    };
    let loading = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .padding(Padding::vertical(area.height.saturating_sub(4) / 2)),
        );
    frame.render_widget(loading, area);
}

pub fn render_status_bar(frame: &mut Frame, area: Rect, view: &SessionView) {
    let hints = match view.phase {
        Phase::Loading if view.load_error.is_some() => "R retry   Q quit",
        Phase::Loading => "Q quit",
        Phase::Playing => "← dislike   → like   drag a card to swipe   H help   Q quit",
        Phase::Results => "R new batch   H help   Q quit",
    };
    let status = Paragraph::new(hints)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    use crate::model::SessionView;

    fn loading_view(load_error: Option<&str>) -> SessionView {
        SessionView {
            phase: Phase::Loading,
            cards: Vec::new(),
            current_index: -1,
            liked_urls: Vec::new(),
            batch_size: 5,
            load_error: load_error.map(str::to_string),
            like_pulse: false,
        }
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn loading_screen_shows_the_fetch_message() {
        let view = loading_view(None);
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_loading(frame, area, &view);
            })
            .unwrap();
        assert!(screen_text(&terminal).contains("Fetching 5 fresh cats"));
    }

    #[test]
    fn failed_load_stays_on_screen_with_a_retry_hint() {
        // The error popup auto-clears, so the loading screen itself must keep
        // showing what went wrong and how to get out.
        let view = loading_view(Some("Could not reach cataas.com. Are you online?"));
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_loading(frame, area, &view);
            })
            .unwrap();
        let screen = screen_text(&terminal);
        assert!(screen.contains("Are you online?"));
        assert!(screen.contains("Press R to retry"));
        assert!(!screen.contains("Fetching"));
    }

    #[test]
    fn loading_status_bar_offers_retry_only_after_a_failure() {
        let failed = loading_view(Some("boom"));
        let mut terminal = Terminal::new(TestBackend::new(60, 3)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_status_bar(frame, area, &failed);
            })
            .unwrap();
        assert!(screen_text(&terminal).contains("R retry"));

        let in_flight = loading_view(None);
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_status_bar(frame, area, &in_flight);
            })
            .unwrap();
        assert!(!screen_text(&terminal).contains("R retry"));
    }
}
