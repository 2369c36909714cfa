//! Home list: the general form followed by each active portfolio

use crate::app::App;
use crate::state::FormScope;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "Choose a form to fill out",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {} portfolios", app.state.portfolios.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let global = FormScope::Global;
    let mut entries = vec![(global.title(), global.description().unwrap_or(""), None)];
    entries.extend(
        app.state
            .portfolios
            .iter()
            .map(|p| (p.title.as_str(), p.description.as_str(), p.counts_label())),
    );

    let items: Vec<ListItem> = entries
        .iter()
        .enumerate()
        .map(|(idx, (title, description, counts))| {
            let is_selected = idx == app.state.selected_index;
            let prefix = if is_selected { "▸ " } else { "  " };
            let title_style = if is_selected {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let mut header = vec![
                Span::styled(prefix, title_style),
                Span::styled(*title, title_style),
            ];
            if let Some(counts) = counts {
                header.push(Span::styled(
                    format!("  {counts}"),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            let mut lines = vec![Line::from(header)];
            if !description.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  {description}"),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Forms ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    let mut list_state = ListState::default().with_selected(Some(app.state.selected_index));
    frame.render_stateful_widget(list, chunks[1], &mut list_state);

    if !app.state.api_connected {
        let notice = Paragraph::new("Server unreachable. Press 'r' to retry.")
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        let bottom = Rect {
            y: chunks[1].bottom().saturating_sub(2),
            height: 1,
            ..chunks[1]
        };
        frame.render_widget(notice, bottom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockApiClientTrait;
    use crate::config::TuiConfig;
    use crate::state::{Portfolio, PortfolioCounts};
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    #[test]
    fn test_home_rows_show_counts() {
        let mut app = App::with_client(Arc::new(MockApiClientTrait::new()), TuiConfig::default());
        app.state.api_connected = true;
        app.state.set_portfolios(vec![Portfolio {
            id: "p1".to_string(),
            title: "Design".to_string(),
            description: "UX work".to_string(),
            slug: "design".to_string(),
            thumbnail: None,
            is_active: true,
            order: 0,
            counts: Some(PortfolioCounts {
                questions: 3,
                submissions: 1,
            }),
        }]);

        let mut terminal = Terminal::new(TestBackend::new(80, 16)).unwrap();
        terminal.draw(|f| draw(f, f.area(), &app)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();

        assert!(text.contains("General application"));
        assert!(text.contains("Design  3 questions · 1 submission"));
    }
}
