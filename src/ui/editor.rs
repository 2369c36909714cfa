//! Builder editor for one portfolio, question or user

use super::components::draw_field;
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const FORM_WIDTH: u16 = 64;
const FIELD_HEIGHT: u16 = 3;

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let Some(editor) = &app.state.admin.editor else {
        return;
    };
    let fields = editor.fields();

    let width = FORM_WIDTH.min(area.width);
    let column = Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    };

    let mut constraints = vec![Constraint::Length(2)];
    constraints.extend(fields.iter().map(|_| Constraint::Length(FIELD_HEIGHT)));
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Min(0));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(column);

    let title = Paragraph::new(Line::from(Span::styled(
        editor.title(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, chunks[0]);

    for (index, field) in fields.iter().enumerate() {
        draw_field(
            frame,
            chunks[index + 1],
            field,
            index == editor.active_field(),
        );
    }

    let hint = Paragraph::new("Space toggles yes/no  ^S or Enter on the last field saves")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hint, chunks[fields.len() + 1]);
}
