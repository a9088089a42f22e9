//! Metrics view
//!
//! Fetches the aggregate metrics once per mount and lays them out as a
//! grid of cards.

use crate::action::Action;
use crate::component::Component;
use crate::components::card::Card;
use crate::components::layout::{card_columns, draw_view_header, key_hints, screen_layout};
use crate::model::{format_number, Entries, LoadState, MetricsPayload, View};
use crate::services::{Fetcher, LaunchApi, METRICS_PATH};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};
use std::sync::Arc;

/// Build the eight cards, in display order
pub fn metric_cards(metrics: &MetricsPayload) -> Vec<Card> {
    fn entry_lines<T: Copy>(entries: &Entries<T>, value: impl Fn(T) -> String) -> Vec<String> {
        entries
            .iter()
            .map(|(label, v)| format!("{}: {}", label, value(*v)))
            .collect()
    }
    let count = |n: u64| n.to_string();
    let percent = |v: f64| format!("{}%", format_number(v));

    vec![
        Card::new("Total Launches", vec![metrics.total_launches.to_string()]),
        Card::new("Success Rate", vec![percent(metrics.success_rate)]),
        Card::new(
            "Percentage of Reused Rockets",
            vec![percent(metrics.reused_rockets_percentage)],
        ),
        Card::new(
            "Distribution of Payload Types",
            entry_lines(&metrics.payload_type_distribution, count),
        ),
        Card::new(
            "Launches by Rocket Type",
            entry_lines(&metrics.launches_by_rocket_type, count),
        ),
        Card::new(
            "Average Payload Mass",
            vec![
                format!(
                    "Successful Launches: {} kg",
                    format_number(metrics.avg_payload_mass.successful_launches)
                ),
                format!(
                    "Failed Launches: {} kg",
                    format_number(metrics.avg_payload_mass.failed_launches)
                ),
            ],
        ),
        Card::new(
            "Launch Frequencies per Year",
            entry_lines(&metrics.launch_frequency_by_year, count),
        ),
        Card::new(
            "Success Rate by Nationality",
            entry_lines(&metrics.success_rate_by_nationality, percent),
        ),
    ]
}

pub struct MetricsView {
    api: Arc<dyn LaunchApi>,
    fetcher: Fetcher<MetricsPayload>,
    pub state: LoadState<MetricsPayload>,
    /// Cards built from the current payload
    cards: Vec<Card>,
    /// First visible card row; scrolling moves a whole row of cards
    scroll: usize,
    /// Card rows in the last layout, for clamping
    row_count: usize,
    back_button: Rect,
}

impl MetricsView {
    pub fn new(api: Arc<dyn LaunchApi>) -> Self {
        Self {
            api,
            fetcher: Fetcher::new(),
            state: LoadState::Loading,
            cards: Vec::new(),
            scroll: 0,
            row_count: 0,
            back_button: Rect::default(),
        }
    }

    fn reset(&mut self) {
        self.state = LoadState::Loading;
        self.cards.clear();
        self.scroll = 0;
        self.row_count = 0;
    }

    fn scroll_by(&mut self, delta: isize) {
        let max = self.row_count.saturating_sub(1) as isize;
        self.scroll = (self.scroll as isize + delta).clamp(0, max.max(0)) as usize;
    }

    fn draw_cards(&mut self, frame: &mut Frame, area: Rect) {
        let columns = card_columns(area.width);
        let rows: Vec<&[Card]> = self.cards.chunks(columns).collect();
        self.row_count = rows.len();
        self.scroll = self.scroll.min(self.row_count.saturating_sub(1));

        let mut y = area.y;
        let bottom = area.y + area.height;
        for row in rows.iter().skip(self.scroll) {
            if y >= bottom {
                break;
            }
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
                .spacing(1)
                .split(Rect::new(area.x, y, area.width, 1));

            // Tallest card in the row at its own column width
            let height = row
                .iter()
                .zip(cells.iter())
                .map(|(card, cell)| card.height(cell.width))
                .max()
                .unwrap_or(3)
                .min(bottom - y);

            for (card, cell) in row.iter().zip(cells.iter()) {
                frame.render_widget(card, Rect { height, ..*cell });
            }
            y = y.saturating_add(height);
        }
    }
}

impl Component for MetricsView {
    fn mount(&mut self) -> Result<()> {
        self.reset();
        let api = Arc::clone(&self.api);
        self.fetcher.spawn(METRICS_PATH, move || api.fetch_metrics());
        Ok(())
    }

    fn unmount(&mut self) {
        self.fetcher.cancel();
        self.reset();
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => Some(Action::Back),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::ScrollDown),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::ScrollUp),
            KeyCode::PageDown => Some(Action::PageDown),
            KeyCode::PageUp => Some(Action::PageUp),
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let action = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left)
                if self.back_button.contains(Position::new(mouse.column, mouse.row)) =>
            {
                Some(Action::Back)
            }
            MouseEventKind::ScrollDown => Some(Action::ScrollDown),
            MouseEventKind::ScrollUp => Some(Action::ScrollUp),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => {
                if let Some(result) = self.fetcher.poll() {
                    self.state = match result {
                        Ok(metrics) => {
                            self.cards = metric_cards(&metrics);
                            LoadState::ready(metrics)
                        }
                        Err(_) => LoadState::failed(),
                    };
                }
            }
            Action::ScrollDown => self.scroll_by(1),
            Action::ScrollUp => self.scroll_by(-1),
            Action::PageDown => self.scroll_by(3),
            Action::PageUp => self.scroll_by(-3),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let layout = screen_layout(area);
        let status = match &self.state {
            LoadState::Loading => "Loading...".to_string(),
            LoadState::Error(_) => "Unavailable".to_string(),
            LoadState::Ready(_) => format!(
                "Updated {}",
                self.state.fetched_label().unwrap_or_default()
            ),
        };
        self.back_button = draw_view_header(frame, layout.header, View::Metrics.title(), &status);

        match &self.state {
            LoadState::Loading => {
                frame.render_widget(Paragraph::new("Loading..."), layout.body);
            }
            LoadState::Error(message) => {
                frame.render_widget(
                    Paragraph::new(format!("Error: {}", message))
                        .style(Style::default().fg(Color::Red))
                        .alignment(Alignment::Left),
                    layout.body,
                );
            }
            LoadState::Ready(_) => self.draw_cards(frame, layout.body),
        }

        let help = key_hints(&[
            ("Esc", "Back", Color::Yellow),
            ("j/k", "Scroll", Color::Cyan),
            ("?", "Help", Color::White),
            ("q", "Quit", Color::Yellow),
        ]);
        frame.render_widget(Paragraph::new(help), layout.help);
        Ok(())
    }
}
