//! Visualization view
//!
//! Fetches yearly and per-rocket statistics once per mount and renders
//! three chart panels with a keyboard-driven hover cursor.

use crate::action::Action;
use crate::component::Component;
use crate::components::chart::{self, ChartPanel};
use crate::components::layout::{draw_view_header, key_hints, screen_layout};
use crate::model::{LoadState, StatsPayload, View};
use crate::services::{Fetcher, LaunchApi, STATS_PATH};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};
use std::sync::Arc;

pub struct VisualizationView {
    api: Arc<dyn LaunchApi>,
    fetcher: Fetcher<StatsPayload>,
    pub state: LoadState<StatsPayload>,
    pub focus: ChartPanel,
    /// Hovered category per panel, indexed by `ChartPanel::index`
    pub cursors: [usize; 3],
    back_button: Rect,
}

impl VisualizationView {
    pub fn new(api: Arc<dyn LaunchApi>) -> Self {
        Self {
            api,
            fetcher: Fetcher::new(),
            state: LoadState::Loading,
            focus: ChartPanel::default(),
            cursors: [0; 3],
            back_button: Rect::default(),
        }
    }

    fn reset(&mut self) {
        self.state = LoadState::Loading;
        self.focus = ChartPanel::default();
        self.cursors = [0; 3];
    }

    fn move_cursor(&mut self, forward: bool) {
        let Some(stats) = self.state.data() else {
            return;
        };
        let count = self.focus.category_count(stats);
        let cursor = &mut self.cursors[self.focus.index()];
        *cursor = if forward {
            (*cursor + 1).min(count.saturating_sub(1))
        } else {
            cursor.saturating_sub(1)
        };
    }

    fn draw_charts(&self, frame: &mut Frame, area: Rect, stats: &StatsPayload) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);

        let cursor = |panel: ChartPanel| self.cursors[panel.index()];
        let focused = |panel: ChartPanel| self.focus == panel;

        chart::draw_success_rate(
            frame,
            rows[0],
            stats,
            cursor(ChartPanel::SuccessRate),
            focused(ChartPanel::SuccessRate),
        );

        for (panel, area, bars) in [
            (
                ChartPanel::Launches,
                bottom[0],
                chart::launch_bars(&stats.yearly_stats),
            ),
            (
                ChartPanel::Payload,
                bottom[1],
                chart::payload_bars(&stats.rocket_stats),
            ),
        ] {
            let hover = chart::tooltip(panel, stats, cursor(panel));
            chart::draw_bars(
                frame,
                area,
                panel,
                &bars,
                hover.as_ref(),
                cursor(panel),
                focused(panel),
            );
        }
    }
}

impl Component for VisualizationView {
    fn mount(&mut self) -> Result<()> {
        self.reset();
        let api = Arc::clone(&self.api);
        self.fetcher.spawn(STATS_PATH, move || api.fetch_stats());
        Ok(())
    }

    fn unmount(&mut self) {
        self.fetcher.cancel();
        self.reset();
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => Some(Action::Back),
            KeyCode::Tab => Some(Action::FocusNext),
            KeyCode::BackTab => Some(Action::FocusPrev),
            KeyCode::Right | KeyCode::Char('l') => Some(Action::NextPoint),
            KeyCode::Left | KeyCode::Char('h') => Some(Action::PrevPoint),
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let clicked_back = mouse.kind == MouseEventKind::Down(MouseButton::Left)
            && self.back_button.contains(Position::new(mouse.column, mouse.row));
        Ok(clicked_back.then_some(Action::Back))
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => {
                if let Some(result) = self.fetcher.poll() {
                    self.state = match result {
                        Ok(stats) => LoadState::ready(stats),
                        Err(_) => LoadState::failed(),
                    };
                }
            }
            Action::FocusNext => self.focus = self.focus.next(),
            Action::FocusPrev => self.focus = self.focus.prev(),
            Action::NextPoint => self.move_cursor(true),
            Action::PrevPoint => self.move_cursor(false),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let layout = screen_layout(area);
        let status = match &self.state {
            LoadState::Loading => "Loading data...".to_string(),
            LoadState::Error(_) => "Unavailable".to_string(),
            LoadState::Ready(_) => format!(
                "Updated {}",
                self.state.fetched_label().unwrap_or_default()
            ),
        };
        self.back_button =
            draw_view_header(frame, layout.header, View::Visualization.title(), &status);

        match &self.state {
            LoadState::Loading => {
                frame.render_widget(Paragraph::new("Loading data..."), layout.body);
            }
            LoadState::Error(message) => {
                frame.render_widget(
                    Paragraph::new(format!("Error: {}", message))
                        .style(Style::default().fg(Color::Red)),
                    layout.body,
                );
            }
            LoadState::Ready(loaded) => self.draw_charts(frame, layout.body, &loaded.data),
        }

        let help = key_hints(&[
            ("Esc", "Back", Color::Yellow),
            ("Tab", "Next chart", Color::Cyan),
            ("←/→", "Hover", Color::Cyan),
            ("?", "Help", Color::White),
            ("q", "Quit", Color::Yellow),
        ]);
        frame.render_widget(Paragraph::new(help), layout.help);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::stats::fixtures::STATS_JSON;
    use crate::testing::{render, tick_until, FakeApi};

    fn mounted(api: Arc<FakeApi>) -> VisualizationView {
        let mut view = VisualizationView::new(api);
        view.mount().unwrap();
        tick_until(&mut view, |v| !v.state.is_loading());
        view
    }

    #[test]
    fn test_success_renders_three_panels() {
        let api = Arc::new(FakeApi::new());
        let mut view = mounted(api.clone());
        assert_eq!(api.stats_calls(), 1);

        let screen = render(&mut view, 160, 50);
        for title in [
            "Launch Success Rate Over Time",
            "Launches Per Year",
            "Payload Capacity by Rocket",
        ] {
            assert!(screen.contains(title), "missing panel {}", title);
        }
        assert!(screen.contains("Success Rate (%)"));
        assert!(screen.contains("Avg Payload (kg)"));
        assert!(screen.contains("Total Payload (kg)"));
        assert!(screen.contains("Falcon 9"));
        assert!(screen.contains("Year: 2020"));
    }

    #[test]
    fn test_failure_renders_error_state() {
        let mut view = mounted(Arc::new(FakeApi::failing()));
        assert_eq!(view.state, LoadState::failed());

        let screen = render(&mut view, 120, 40);
        assert!(screen.contains("Error: Failed to load data"));
        assert!(!screen.contains("Launches Per Year"));
    }

    #[test]
    fn test_malformed_payload_renders_error_state() {
        let api = FakeApi::new();
        api.set_stats(r#"{"yearly_stats": [{"year": 2020}], "rocket_stats": []}"#);
        let view = mounted(Arc::new(api));
        assert!(matches!(view.state, LoadState::Error(_)));
    }

    #[test]
    fn test_empty_sequences_render_no_data() {
        let api = FakeApi::new();
        api.set_stats(r#"{"yearly_stats": [], "rocket_stats": []}"#);
        let mut view = mounted(Arc::new(api));

        let screen = render(&mut view, 120, 40);
        assert!(screen.contains("No data"));
    }

    #[test]
    fn test_cursor_moves_within_focused_panel() {
        let mut view = mounted(Arc::new(FakeApi::new()));

        view.update(Action::NextPoint).unwrap();
        view.update(Action::NextPoint).unwrap();
        assert_eq!(view.cursors, [1, 0, 0]);

        view.update(Action::FocusNext).unwrap();
        view.update(Action::FocusNext).unwrap();
        assert_eq!(view.focus, ChartPanel::Payload);
        view.update(Action::NextPoint).unwrap();
        assert_eq!(view.cursors, [1, 0, 0]);

        view.update(Action::FocusNext).unwrap();
        view.update(Action::PrevPoint).unwrap();
        assert_eq!(view.cursors, [0, 0, 0]);

        let screen = render(&mut view, 160, 50);
        assert!(screen.contains("Rocket: Falcon 9"));
    }

    #[test]
    fn test_late_response_after_unmount_is_ignored() {
        let api = Arc::new(FakeApi::new());
        let mut view = VisualizationView::new(api.clone());
        view.mount().unwrap();
        view.unmount();

        std::thread::sleep(std::time::Duration::from_millis(50));
        for _ in 0..5 {
            view.update(Action::Tick).unwrap();
        }
        assert!(view.state.is_loading());
        assert_eq!(api.stats_calls(), 1);
    }

    #[test]
    fn test_remount_shows_fresh_data() {
        let api = Arc::new(FakeApi::new());
        let mut view = mounted(api.clone());
        view.update(Action::NextPoint).unwrap();
        view.unmount();

        api.set_stats(&STATS_JSON.replace("\"Falcon 9\"", "\"Falcon Heavy\""));
        view.mount().unwrap();
        tick_until(&mut view, |v| !v.state.is_loading());

        assert_eq!(api.stats_calls(), 2);
        assert_eq!(view.cursors, [0, 0, 0]);
        let rocket = view.state.data().map(|s| s.rocket_stats[0].rocket.clone());
        assert_eq!(rocket.as_deref(), Some("Falcon Heavy"));
    }
}
