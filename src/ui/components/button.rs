//! Button component for TUI

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// A labelled button bound to a shortcut
pub struct Button<'a> {
    pub key: &'a str,
    pub label: &'a str,
    /// Drawn in the accent colour
    pub is_primary: bool,
    pub is_enabled: bool,
}

impl<'a> Button<'a> {
    pub fn new(key: &'a str, label: &'a str) -> Self {
        Self {
            key,
            label,
            is_primary: false,
            is_enabled: true,
        }
    }

    pub fn primary(mut self, is_primary: bool) -> Self {
        self.is_primary = is_primary;
        self
    }

    pub fn enabled(mut self, is_enabled: bool) -> Self {
        self.is_enabled = is_enabled;
        self
    }

    fn color(&self) -> Color {
        match (self.is_enabled, self.is_primary) {
            (false, _) => Color::DarkGray,
            (true, true) => Color::Green,
            (true, false) => Color::Cyan,
        }
    }
}

/// Render a button with border
pub fn render_button(frame: &mut Frame, area: Rect, button: &Button) {
    let color = button.color();
    let mut text_style = Style::default().fg(color);
    if button.is_enabled && button.is_primary {
        text_style = text_style.add_modifier(Modifier::BOLD);
    }

    let content = if button.key.is_empty() {
        button.label.to_string()
    } else {
        format!("{} {}", button.key, button.label)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let paragraph = Paragraph::new(content)
        .style(text_style)
        .alignment(Alignment::Center)
        .block(block);

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_button_is_grey() {
        let button = Button::new("^P", "Previous").primary(true).enabled(false);
        assert_eq!(button.color(), Color::DarkGray);
    }

    #[test]
    fn test_primary_button_is_green() {
        assert_eq!(Button::new("^N", "Submit").primary(true).color(), Color::Green);
        assert_eq!(Button::new("^N", "Next").color(), Color::Cyan);
    }
}
