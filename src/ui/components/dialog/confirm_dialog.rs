//! Confirmation dialog for destructive builder actions

use super::base::{render_dialog, DialogConfig};
use crate::state::DeleteTarget;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

/// Ask before deleting a portfolio or question
pub fn render_confirm_dialog(frame: &mut Frame, target: &DeleteTarget) {
    let message = format!("Delete \"{}\"?\n{}", target.title(), target.warning());

    let hint = Line::from(vec![
        Span::raw("Press "),
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" to confirm, "),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" to cancel"),
    ]);

    render_dialog(
        frame,
        DialogConfig {
            title: "Confirm delete",
            color: Color::Yellow,
            message: &message,
            hint: Some(hint),
            max_width: 60,
        },
    );
}
