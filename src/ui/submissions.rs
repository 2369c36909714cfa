//! Submission review list and detail views

use crate::app::App;
use crate::state::{Question, Submission};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Draw the submissions list
pub fn draw_list(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled("Filter: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.state.submission_filter_label(),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(" [f]cycle", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("  {} submissions", app.state.submissions.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    frame.render_widget(header, chunks[0]);

    let block = Block::default()
        .title(" Submissions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if app.state.submissions.is_empty() {
        let empty = Paragraph::new("No submissions yet.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let items: Vec<ListItem> = app
        .state
        .submissions
        .iter()
        .enumerate()
        .map(|(idx, submission)| {
            let is_selected = idx == app.state.submissions_index;
            let prefix = if is_selected { "▸" } else { " " };
            let style = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };

            let line = Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(
                    submission.completed_at.format(TIMESTAMP_FORMAT).to_string(),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(" "),
                Span::styled(submission.portfolio_title(), style),
                Span::styled(
                    format!(
                        "  {} answers  {}",
                        submission.responses.len(),
                        submission.submitted_by.as_deref().unwrap_or("anonymous")
                    ),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items).block(block);
    let mut list_state = ListState::default().with_selected(Some(app.state.submissions_index));
    frame.render_stateful_widget(list, chunks[1], &mut list_state);
}

/// Draw one submission with its answers
pub fn draw_detail(frame: &mut Frame, area: Rect, app: &App) {
    let Some(submission) = app.state.selected_submission() else {
        return;
    };

    let label = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Portfolio:    ", label),
            Span::raw(submission.portfolio_title()),
        ]),
        Line::from(vec![
            Span::styled("Submitted:    ", label),
            Span::raw(submission.completed_at.format(TIMESTAMP_FORMAT).to_string()),
        ]),
        Line::from(vec![
            Span::styled("Submitted by: ", label),
            Span::raw(submission.submitted_by.as_deref().unwrap_or("anonymous")),
        ]),
    ];
    if let Some(ip) = &submission.ip_address {
        lines.push(Line::from(vec![
            Span::styled("From:         ", label),
            Span::raw(ip.as_str()),
        ]));
    }

    for (title, answer) in ordered_answers(submission, &app.state.review_questions) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        if answer.is_empty() {
            lines.push(Line::from(Span::styled("(no answer)", label)));
        } else {
            lines.extend(answer.split('\n').map(|l| Line::from(l.to_string())));
        }
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((u16::try_from(app.state.scroll_offset).unwrap_or(u16::MAX), 0))
        .block(
            Block::default()
                .title(format!(" Submission {} ", submission.id))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    frame.render_widget(paragraph, area);
}

/// Answers in form order; ids without a known question come last, by id
fn ordered_answers<'a>(
    submission: &'a Submission,
    questions: &'a [Question],
) -> Vec<(&'a str, &'a str)> {
    let mut known: Vec<&Question> = questions
        .iter()
        .filter(|q| submission.responses.contains_key(&q.id))
        .collect();
    known.sort_by_key(|q| (q.step, q.order));

    let mut unknown: Vec<&String> = submission
        .responses
        .keys()
        .filter(|id| !questions.iter().any(|q| &q.id == *id))
        .collect();
    unknown.sort();

    known
        .into_iter()
        .map(|q| (q.title.as_str(), submission.responses[&q.id].as_str()))
        .chain(
            unknown
                .into_iter()
                .map(|id| (id.as_str(), submission.responses[id].as_str())),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::question;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn submission(responses: &[(&str, &str)]) -> Submission {
        Submission {
            id: "s1".to_string(),
            portfolio_id: None,
            responses: responses
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            submitted_by: None,
            ip_address: None,
            completed_at: Utc::now(),
            portfolio: None,
        }
    }

    #[test]
    fn test_answers_follow_question_order() {
        let questions = vec![
            question("late", 2, 0, false),
            question("second", 1, 1, false),
            question("first", 1, 0, false),
        ];
        let s = submission(&[("late", "c"), ("first", "a"), ("second", "b")]);

        let answers: Vec<&str> = ordered_answers(&s, &questions)
            .into_iter()
            .map(|(_, answer)| answer)
            .collect();
        assert_eq!(answers, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_unknown_ids_are_listed_last() {
        let questions = vec![question("known", 1, 0, false)];
        let s = submission(&[("zeta", "z"), ("known", "k"), ("alpha", "a")]);

        let titles: Vec<&str> = ordered_answers(&s, &questions)
            .into_iter()
            .map(|(title, _)| title)
            .collect();
        assert_eq!(titles, vec!["Question known", "alpha", "zeta"]);
    }
}
