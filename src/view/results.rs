//! End-of-batch results screen

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

use crate::model::SessionView;

pub fn render_results(frame: &mut Frame, area: Rect, view: &SessionView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Summary
            Constraint::Min(0),    // Liked list
        ])
        .split(area);

    let summary = if view.liked_urls.is_empty() {
        "No likes this round. Tough crowd.".to_string()
    } else {
        format!(
            "You liked {} of {} cats",
            view.liked_urls.len(),
            view.batch_size
        )
    };
    let summary = Paragraph::new(vec![
        Line::from(Span::styled(
            summary,
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Press R for a fresh batch",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title(" Results "));
    frame.render_widget(summary, chunks[0]);

    // Liked cards in swipe order
    let items: Vec<ListItem> = view
        .liked_urls
        .iter()
        .enumerate()
        .map(|(i, url)| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>3}. ", i + 1),
                    Style::default().fg(Color::Green),
                ),
                Span::styled("❤ ", Style::default().fg(Color::Red)),
                Span::raw(url.clone()),
            ]))
        })
        .collect();

    let liked = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Liked cats ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(liked, chunks[1]);
}
