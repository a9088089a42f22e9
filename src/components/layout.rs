//! Layout calculations and shared chrome for the UI

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Full-screen view areas
pub struct ScreenLayout {
    pub header: Rect,
    pub body: Rect,
    pub help: Rect,
}

/// Header (3 rows), body, help bar (1 row)
pub fn screen_layout(area: Rect) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    ScreenLayout {
        header: chunks[0],
        body: chunks[1],
        help: chunks[2],
    }
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Number of card columns that fit in `width`
pub fn card_columns(width: u16) -> usize {
    match width {
        0..=59 => 1,
        60..=99 => 2,
        _ => 3,
    }
}

pub const BACK_LABEL: &str = " ← Back ";

/// Header with a back button, the view title and a right-aligned status.
/// Returns the back button's area for mouse hit-testing.
pub fn draw_view_header(frame: &mut Frame, area: Rect, title: &str, status: &str) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let back_width = BACK_LABEL.width() as u16;
    let status_width = status.width() as u16;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(back_width),
            Constraint::Min(0),
            Constraint::Length(status_width + 1),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(
            BACK_LABEL,
            Style::default()
                .fg(Color::Rgb(244, 247, 252))
                .bg(Color::Rgb(45, 55, 72)),
        )),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("  {}", title),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(status, Style::default().fg(Color::DarkGray))),
        chunks[2],
    );

    chunks[0]
}

/// One line of `key description` hints for the help bar
pub fn key_hints(hints: &[(&str, &str, Color)]) -> Line<'static> {
    let spans: Vec<Span<'static>> = hints
        .iter()
        .flat_map(|(key, description, color)| {
            [
                Span::styled(
                    format!(" {} ", key),
                    Style::default().fg(*color).add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("{} ", description)),
            ]
        })
        .collect();
    Line::from(spans)
}
