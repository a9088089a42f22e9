//! Quit confirmation dialog
//!
//! Drawn over whichever view is active; `y` quits, `n`/Esc dismisses.

use crate::action::Action;
use crate::component::Component;
use crate::components::layout::{centered_popup, key_hints};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

#[derive(Default)]
pub struct QuitDialog;

impl Component for QuitDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(Action::ConfirmModal),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char('q') | KeyCode::Esc => {
                Some(Action::CloseModal)
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 44, 7);
        frame.render_widget(Clear, popup_area);

        let content = vec![
            Line::from(""),
            Line::styled(
                "Leave the launch dashboard?",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Line::from(""),
            key_hints(&[("y", "Quit", Color::Green), ("n/Esc", "Stay", Color::Red)]),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Quit? ")
            .title_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

        frame.render_widget(
            Paragraph::new(content).block(block).alignment(Alignment::Center),
            popup_area,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::render;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_keys_map_to_modal_actions() {
        let mut dialog = QuitDialog;
        let press = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
        assert_eq!(dialog.handle_key_event(press('y')).unwrap(), Some(Action::ConfirmModal));
        assert_eq!(dialog.handle_key_event(press('n')).unwrap(), Some(Action::CloseModal));
        assert_eq!(dialog.handle_key_event(press('x')).unwrap(), None);
    }

    #[test]
    fn test_renders_prompt() {
        let screen = render(&mut QuitDialog, 60, 12);
        assert!(screen.contains("Leave the launch dashboard?"));
        assert!(screen.contains("Quit?"));
    }
}
