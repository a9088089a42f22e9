//! Labeled container used by the metrics view

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// A heading plus caller-supplied content lines
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub title: String,
    pub body: Vec<String>,
}

impl Card {
    pub fn new(title: impl Into<String>, body: Vec<String>) -> Self {
        Self {
            title: title.into(),
            body,
        }
    }

    /// Rows needed at `width` columns to show every wrapped body line
    /// plus the border
    pub fn height(&self, width: u16) -> u16 {
        let inner = width.saturating_sub(2);
        let rows = if inner == 0 {
            self.body.len()
        } else {
            self.body_paragraph().line_count(inner)
        };
        rows.max(1) as u16 + 2
    }

    fn body_paragraph(&self) -> Paragraph<'_> {
        let lines: Vec<Line> = self
            .body
            .iter()
            .map(|text| Line::styled(text.as_str(), Style::default().fg(Color::Rgb(187, 187, 187))))
            .collect();
        Paragraph::new(lines).wrap(Wrap { trim: false })
    }
}

/// Cut `title` to `max` columns, marking the cut with an ellipsis
fn fit_title(title: &str, max: usize) -> String {
    if title.width() <= max {
        return title.to_string();
    }
    let mut fitted = String::new();
    let mut used = 0;
    for c in title.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        fitted.push(c);
        used += w;
    }
    fitted.push('…');
    fitted
}

impl Widget for &Card {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(45, 55, 72)))
            // Two border cells plus the padding around the title
            .title(format!(" {} ", fit_title(&self.title, area.width.saturating_sub(4) as usize)))
            .title_style(
                Style::default()
                    .fg(Color::Rgb(244, 247, 252))
                    .add_modifier(Modifier::BOLD),
            );

        self.body_paragraph().block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::buffer_text;

    #[test]
    fn test_card_height_counts_border() {
        assert_eq!(Card::new("Empty", vec![]).height(30), 3);
        assert_eq!(Card::new("Two", vec!["a".into(), "b".into()]).height(30), 4);
    }

    #[test]
    fn test_card_height_grows_with_wrapping() {
        let card = Card::new(
            "Average Payload Mass",
            vec![
                "Successful Launches: 4820.55 kg".to_string(),
                "Failed Launches: 1200 kg".to_string(),
            ],
        );
        assert_eq!(card.height(60), 4);
        // 27 inner columns: the first line wraps once
        assert_eq!(card.height(29), 5);

        let area = Rect::new(0, 0, 29, card.height(29));
        let mut buf = Buffer::empty(area);
        (&card).render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("4820.55 kg"));
        assert!(text.contains("Failed Launches: 1200 kg"));
    }

    #[test]
    fn test_long_title_is_cut_with_ellipsis() {
        assert_eq!(fit_title("Success Rate", 20), "Success Rate");
        assert_eq!(fit_title("Success Rate by Nationality", 10), "Success R…");

        let card = Card::new("Percentage of Reused Rockets", vec!["62.3%".to_string()]);
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        (&card).render(area, &mut buf);
        assert!(buffer_text(&buf).contains("Percentage of R…"));
    }

    #[test]
    fn test_card_renders_title_and_body() {
        let card = Card::new("Total Launches", vec!["205".to_string()]);
        let area = Rect::new(0, 0, 24, 3);
        let mut buf = Buffer::empty(area);
        (&card).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Total Launches"));
        assert!(text.contains("205"));
    }
}
