//! Overlay rendering (tutorial, error notification, help popup, like pulse)

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::model::UiState;

pub fn render_error_notification(frame: &mut Frame, ui_state: &UiState) {
    if let Some(ref error_msg) = ui_state.error_message {
        let area = frame.area();

        // Fixed width popup (responsive to screen size)
        let popup_width = 52.min(area.width.saturating_sub(4));
        let inner_width = popup_width.saturating_sub(4) as usize; // account for borders

        // Calculate how many lines the error message will take when wrapped
        let error_line_count =
            ((error_msg.chars().count() as f32) / (inner_width as f32)).ceil() as u16;

        // Height: top border (1) + error lines + hint + bottom border (1)
        let popup_height = (3 + error_line_count.max(1)).min(area.height.saturating_sub(4));

        let popup_area = centered(area, popup_width, popup_height);

        // Clear the area behind the popup first
        frame.render_widget(Clear, popup_area);

        let lines = vec![
            Line::from(Span::styled(
                error_msg.clone(),
                Style::default().fg(Color::Red),
            )),
            Line::from(Span::styled(
                "Enter retry · Esc dismiss",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let error_widget = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Error ")
                    .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                    .style(Style::default().bg(Color::Black)),
            );

        frame.render_widget(error_widget, popup_area);
    }
}

pub fn render_tutorial(frame: &mut Frame) {
    let area = frame.area();
    let popup_area = centered(area, 46.min(area.width.saturating_sub(4)), 9);

    frame.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from(Span::styled(
            "How to Play",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("→ Swipe Right", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" to Like"),
        ]),
        Line::from(vec![
            Span::styled("← Swipe Left", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(" to Dislike"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to start",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let tutorial = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Welcome ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        );
    frame.render_widget(tutorial, popup_area);
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();

    let keybindings = vec![
        ("← / →", "Dislike / like the top card"),
        ("mouse drag", "Swipe the top card"),
        ("R", "New batch (from results)"),
        ("H", "Toggle this help"),
        ("Q", "Quit"),
    ];

    let popup_width = 44.min(area.width.saturating_sub(4));
    let popup_height = (keybindings.len() as u16 + 2).min(area.height.saturating_sub(4));
    let popup_area = centered(area, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(
                    format!("{key:>12}"),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(desc.to_string(), Style::default().fg(Color::White)),
            ])
        })
        .collect();

    let help_text = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Help (H or Esc to close) ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::Black)),
    );
    frame.render_widget(help_text, popup_area);
}

/// Small self-clearing flash in the corner after a right swipe.
pub fn render_like_pulse(frame: &mut Frame) {
    let area = frame.area();
    if area.width < 16 || area.height < 6 {
        return;
    }
    let pulse_area = Rect {
        x: area.right().saturating_sub(14),
        y: area.y + 3,
        width: 11,
        height: 3,
    };
    frame.render_widget(Clear, pulse_area);
    let pulse = Paragraph::new(" ❤ Liked ")
        .style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Green)));
    frame.render_widget(pulse, pulse_area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    Rect {
        x: area.width.saturating_sub(width) / 2,
        y: area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}
