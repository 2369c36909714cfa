//! Admin sign-in form

use super::components::draw_field;
use crate::app::App;
use crate::state::Form;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const FORM_WIDTH: u16 = 50;

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.login_form;

    let width = FORM_WIDTH.min(area.width);
    let column = Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(3), // Title
            Constraint::Length(3), // Email
            Constraint::Length(3), // Password
            Constraint::Length(1), // Status
            Constraint::Min(0),
        ])
        .split(column);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "Administrator sign-in",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Submissions are only visible to administrators.",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, chunks[1]);

    for index in 0..form.field_count() {
        if let Some(field) = form.get_field(index) {
            let is_active = !form.pending && index == form.active_field();
            draw_field(frame, chunks[2 + index], field, is_active);
        }
    }

    if form.pending {
        let status = Paragraph::new("Signing in...").style(Style::default().fg(Color::Yellow));
        frame.render_widget(status, chunks[4]);
    }
}
