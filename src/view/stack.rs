//! Card stack rendering, including the half-block image previews

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::model::{CardView, Preview, SessionView, SwipeDirection};

// Cards deeper than this in the stack are fully hidden behind the top ones.
const VISIBLE_DEPTH: isize = 3;

const CARD_MAX_WIDTH: u16 = 44;
const CARD_MAX_HEIGHT: u16 = 20;

pub fn render_stack(frame: &mut Frame, area: Rect, view: &SessionView) {
    if area.width < 24 || area.height < 10 {
        let cramped = Paragraph::new("Terminal too small for the card stack")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Red));
        frame.render_widget(cramped, area);
        return;
    }

    let card_width = CARD_MAX_WIDTH.min(area.width.saturating_sub(8));
    let card_height = CARD_MAX_HEIGHT.min(area.height.saturating_sub(4));
    let base_x = area.x + (area.width - card_width) / 2;
    let base_y = area.y + (area.height - card_height) / 2;

    // Bottom-to-top, so the top card paints last. Cards already resolved are
    // either flying out (still drawn, with their offset) or gone.
    for (index, card) in view.cards.iter().enumerate() {
        if card.gone {
            continue;
        }
        let depth = view.current_index - index as isize;
        if depth >= VISIBLE_DEPTH {
            continue;
        }
        let depth = depth.max(0) as u16;
        let is_top = depth == 0 && index as isize >= view.current_index;

        // Deeper cards peek out below the top one, slightly narrower: the
        // stacked-deck effect.
        let mut rect = Rect {
            x: base_x + depth * 2,
            y: base_y + depth,
            width: card_width.saturating_sub(depth * 4),
            height: card_height,
        };

        // Horizontal displacement from dragging or the exit animation.
        if card.offset != 0.0 {
            let shifted = rect.x as i32 + card.offset.round() as i32;
            let max_x = (area.right().saturating_sub(rect.width)) as i32;
            rect.x = shifted.clamp(area.left() as i32, max_x.max(area.left() as i32)) as u16;
        }

        render_card(frame, rect, card, is_top);
    }
}

fn render_card(frame: &mut Frame, rect: Rect, card: &CardView, is_top: bool) {
    frame.render_widget(Clear, rect);

    let border_style = match card.badge {
        Some(SwipeDirection::Right) => Style::default().fg(Color::Green),
        Some(SwipeDirection::Left) => Style::default().fg(Color::Red),
        None if is_top => Style::default().fg(Color::White),
        None => Style::default().fg(Color::DarkGray),
    };
    let block = Block::default().borders(Borders::ALL).border_style(border_style);
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    if !is_top && card.offset == 0.0 {
        // Resting cards under the top one only show their edges.
        return;
    }

    match &card.preview {
        Some(preview) => render_preview(frame.buffer_mut(), inner, preview),
        None => render_placeholder(frame, inner, card),
    }

    if let Some(direction) = card.badge {
        render_badge(frame, inner, direction);
    }
}

/// Paint the preview with half-block cells: each terminal cell carries two
/// vertically stacked pixels via the foreground and background colors.
fn render_preview(buf: &mut Buffer, inner: Rect, preview: &Preview) {
    if inner.width == 0 || inner.height == 0 {
        return;
    }
    let rows = inner.height as f32 * 2.0;
    for row in 0..inner.height {
        for col in 0..inner.width {
            let u = (col as f32 + 0.5) / inner.width as f32;
            let v_top = (row as f32 * 2.0 + 0.5) / rows;
            let v_bottom = (row as f32 * 2.0 + 1.5) / rows;
            let [tr, tg, tb] = preview.sample(u, v_top);
            let [br, bg, bb] = preview.sample(u, v_bottom);
            if let Some(cell) = buf.cell_mut((inner.x + col, inner.y + row)) {
                cell.set_symbol("▀")
                    .set_fg(Color::Rgb(tr, tg, tb))
                    .set_bg(Color::Rgb(br, bg, bb));
            }
        }
    }
}

/// The lenient-failure card face: the image never confirmed, but the card is
/// still in play.
fn render_placeholder(frame: &mut Frame, inner: Rect, card: &CardView) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "(=^･ω･^=)",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "image unavailable",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            card.image_url.clone(),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let placeholder = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(placeholder, inner);
}

fn render_badge(frame: &mut Frame, inner: Rect, direction: SwipeDirection) {
    let (text, color, x) = match direction {
        SwipeDirection::Right => (" LIKE ", Color::Green, inner.x + 1),
        SwipeDirection::Left => (
            " NOPE ",
            Color::Red,
            inner.right().saturating_sub(7).max(inner.x),
        ),
    };
    let badge_area = Rect {
        x,
        y: inner.y + 1,
        width: 6.min(inner.width),
        height: 1,
    };
    let badge = Paragraph::new(text).style(
        Style::default()
            .fg(Color::Black)
            .bg(color)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(badge, badge_area);
}
