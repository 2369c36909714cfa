//! Notice dialog shown for queued errors

use super::base::{render_dialog, DialogConfig};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

/// Render the front error as a modal overlay
pub fn render_error_dialog(frame: &mut Frame, message: &str, remaining: usize) {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let mut hint = vec![
        Span::styled("Enter", key_style),
        Span::raw("/"),
        Span::styled("Esc", key_style),
        Span::raw(" dismiss"),
    ];
    if remaining > 0 {
        hint.push(Span::styled(
            format!("  ({remaining} more)"),
            Style::default().fg(Color::DarkGray),
        ));
    }

    render_dialog(
        frame,
        DialogConfig {
            title: "Something went wrong",
            color: Color::Red,
            message,
            hint: Some(Line::from(hint)),
            max_width: 60,
        },
    );
}
