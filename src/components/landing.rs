//! Landing view
//!
//! Static introduction with two buttons leading to the data views.

use crate::action::Action;
use crate::component::Component;
use crate::components::layout::key_hints;
use crate::model::View;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const DESCRIPTION: &str = "Explore SpaceX's launch history with interactive visualizations \
    and detailed performance metrics. Discover trends in launch success rates, \
    payload capacities, and mission statistics.";

/// The two navigation buttons, in display order
pub const BUTTONS: [(&str, View); 2] = [
    ("Show Visualizations", View::Visualization),
    ("Show Metrics", View::Metrics),
];

pub struct LandingView {
    /// Index into `BUTTONS`
    pub selected: usize,
    /// Button areas from the last draw, for mouse clicks
    button_areas: [Rect; 2],
}

impl Default for LandingView {
    fn default() -> Self {
        Self::new()
    }
}

impl LandingView {
    pub fn new() -> Self {
        Self {
            selected: 0,
            button_areas: [Rect::default(); 2],
        }
    }

    fn selected_view(&self) -> View {
        BUTTONS[self.selected].1
    }

    fn draw_button(&self, frame: &mut Frame, area: Rect, index: usize) {
        let (label, _) = BUTTONS[index];
        let primary = index == 0;
        let focused = index == self.selected;

        let fill = if primary {
            Color::Rgb(76, 175, 80)
        } else {
            Color::Rgb(45, 55, 72)
        };
        let border = if focused { Color::Yellow } else { fill };
        let mut label_style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
        if focused {
            label_style = label_style.add_modifier(Modifier::REVERSED);
        }

        let button = Paragraph::new(Line::from(Span::styled(format!(" {} ", label), label_style)))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(border)),
            );
        frame.render_widget(button, area);
    }
}

impl Component for LandingView {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('v') | KeyCode::Char('1') => Some(Action::Navigate(View::Visualization)),
            KeyCode::Char('m') | KeyCode::Char('2') => Some(Action::Navigate(View::Metrics)),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Navigate(self.selected_view())),
            KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => Some(Action::FocusNext),
            KeyCode::Left | KeyCode::BackTab | KeyCode::Char('h') => Some(Action::FocusPrev),
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(None);
        }
        let position = Position::new(mouse.column, mouse.row);
        let hit = self
            .button_areas
            .iter()
            .position(|area| area.contains(position));
        Ok(hit.map(|index| Action::Navigate(BUTTONS[index].1)))
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::FocusNext => self.selected = (self.selected + 1) % BUTTONS.len(),
            Action::FocusPrev => self.selected = (self.selected + BUTTONS.len() - 1) % BUTTONS.len(),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);

        let content_width = area.width.saturating_sub(4).min(72);
        let content_x = area.x + (area.width.saturating_sub(content_width)) / 2;
        let content_height = 13u16.min(outer[0].height);
        let content_y = outer[0].y + (outer[0].height.saturating_sub(content_height)) / 2;
        let content = Rect::new(content_x, content_y, content_width, content_height);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(5),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(content);

        let title = Paragraph::new(Line::from(Span::styled(
            "SpaceX Launch Analytics",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(title, rows[0]);

        let description = Paragraph::new(DESCRIPTION)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(description, rows[1]);

        // Buttons sized to their labels, centered as a group
        let widths: Vec<u16> = BUTTONS
            .iter()
            .map(|(label, _)| label.width() as u16 + 6)
            .collect();
        let gap = 3u16;
        let total = widths.iter().sum::<u16>() + gap;
        let mut x = rows[3].x + rows[3].width.saturating_sub(total) / 2;
        for (index, width) in widths.iter().enumerate() {
            let button_area = Rect::new(x, rows[3].y, *width, rows[3].height).intersection(rows[3]);
            self.button_areas[index] = button_area;
            self.draw_button(frame, button_area, index);
            x = x.saturating_add(width + gap);
        }

        let help = key_hints(&[
            ("v", "Visualizations", Color::Green),
            ("m", "Metrics", Color::Cyan),
            ("←/→", "Select", Color::Cyan),
            ("Enter", "Open", Color::Green),
            ("?", "Help", Color::White),
            ("q", "Quit", Color::Yellow),
        ]);
        frame.render_widget(Paragraph::new(help), outer[1]);

        Ok(())
    }
}
