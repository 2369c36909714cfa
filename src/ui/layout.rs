//! Layout components (content area, status bar)

use crate::app::App;
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split off the bottom line for the status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    let connection = if app.state.api_connected {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::Red))
    };
    spans.push(connection);

    spans.push(Span::styled(
        view_hints(app.state.current_view),
        Style::default().fg(Color::Gray),
    ));

    if let Some(message) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(message, Style::default().fg(Color::Yellow)));
    }

    if let Some(user) = app.session.user() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("{} ({})", user.email, user.role.label()),
            Style::default().fg(Color::Blue),
        ));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let quit_hint = " ^C^C:quit ";
    let width = u16::try_from(quit_hint.len()).unwrap_or(area.width);
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(width),
        width: width.min(area.width),
        ..area
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn view_hints(view: View) -> &'static str {
    match view {
        View::Portfolios => "j/k:nav  Enter:open  r:reload  a:submissions  b:builder  q:quit",
        View::Form => "Tab:next question  Enter:newline  ^N:next  ^P:previous  Esc:leave",
        View::Complete => "Enter:home",
        View::Login => "Tab:next field  Enter:sign in  Esc:cancel",
        View::Submissions => {
            "j/k:nav  Enter:view  f:filter  r:reload  b:builder  o:sign out  Esc:back"
        }
        View::SubmissionDetail => "j/k:scroll  Esc:back",
        View::Builder => {
            "Tab:tab  j/k:nav  n:new  e:edit  d:delete  p:portfolio  r:reload  Esc:back"
        }
        View::BuilderEditor => "Tab:next field  Space:toggle  ^S:save  Esc:cancel",
    }
}
