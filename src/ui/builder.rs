//! Form builder: portfolio, question and user tabs

use super::components::render_confirm_dialog;
use crate::app::App;
use crate::state::{AdminState, AdminTab, Portfolio, Question, UserAccount};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs},
    Frame,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let admin = &app.state.admin;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Tabs
            Constraint::Length(1), // Context
            Constraint::Min(0),    // List
        ])
        .split(area);

    let titles: Vec<Line> = AdminTab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!("{} {}", i + 1, tab.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .select(admin.tab.index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(tabs, chunks[0]);

    frame.render_widget(Paragraph::new(context_line(admin)), chunks[1]);

    let rows: Vec<ListItem> = match admin.tab {
        AdminTab::Portfolios => admin.portfolios.iter().map(portfolio_row).collect(),
        AdminTab::Questions => admin.questions.iter().map(question_row).collect(),
        AdminTab::Users => admin.users.iter().map(user_row).collect(),
    };

    let block = Block::default()
        .title(format!(" {} ", admin.tab.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if rows.is_empty() {
        let empty = Paragraph::new("Nothing here yet. Press 'n' to add one.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, chunks[2]);
    } else {
        let list = List::new(rows)
            .block(block)
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("▸ ");
        let mut list_state = ListState::default().with_selected(Some(admin.selected_index));
        frame.render_stateful_widget(list, chunks[2], &mut list_state);
    }

    if let Some(target) = &admin.pending_delete {
        render_confirm_dialog(frame, target);
    }
}

fn context_line(admin: &AdminState) -> Line<'_> {
    let dim = Style::default().fg(Color::DarkGray);
    match admin.tab {
        AdminTab::Questions => Line::from(vec![
            Span::styled("Portfolio: ", dim),
            Span::styled(
                admin.question_portfolio_title(),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(" [p]next", dim),
            Span::styled(format!("  {} questions", admin.questions.len()), dim),
        ]),
        AdminTab::Portfolios => Line::from(Span::styled(
            format!("{} portfolios, inactive ones included", admin.portfolios.len()),
            dim,
        )),
        AdminTab::Users => Line::from(Span::styled(
            format!("{} accounts", admin.users.len()),
            dim,
        )),
    }
}

fn portfolio_row(portfolio: &Portfolio) -> ListItem<'_> {
    let dim = Style::default().fg(Color::DarkGray);
    let mut spans = vec![
        Span::styled(
            portfolio.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  /{}", portfolio.slug),
            Style::default().fg(Color::Blue),
        ),
        Span::styled(format!("  #{}", portfolio.order), dim),
    ];
    if !portfolio.is_active {
        spans.push(Span::styled("  inactive", Style::default().fg(Color::Yellow)));
    }
    if let Some(counts) = portfolio.counts_label() {
        spans.push(Span::styled(format!("  {counts}"), dim));
    }
    ListItem::new(Line::from(spans))
}

fn question_row(question: &Question) -> ListItem<'_> {
    let dim = Style::default().fg(Color::DarkGray);
    let mut spans = vec![
        Span::styled(
            format!("Step {}.{} ", question.step, question.order),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(question.title.as_str()),
    ];
    if question.is_required {
        spans.push(Span::styled(" *", Style::default().fg(Color::Red)));
    }
    if question.min_length > 0 {
        spans.push(Span::styled(format!("  min {}", question.min_length), dim));
    }
    ListItem::new(Line::from(spans))
}

fn user_row(user: &UserAccount) -> ListItem<'_> {
    let dim = Style::default().fg(Color::DarkGray);
    let mut spans = vec![
        Span::styled(
            user.name.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("  {}", user.email)),
        Span::styled(
            format!("  {}", user.role.label()),
            Style::default().fg(Color::Blue),
        ),
    ];
    if let Some(created) = user.created_at {
        spans.push(Span::styled(
            format!("  since {}", created.format(DATE_FORMAT)),
            dim,
        ));
    }
    ListItem::new(Line::from(spans))
}
