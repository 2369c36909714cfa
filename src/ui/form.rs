//! Multi-step form view and its completion screen

use super::components::{input_lines, render_button, Button, BUTTON_HEIGHT, CURSOR};
use crate::app::App;
use crate::state::{FormSession, Question, StepNavigator};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

/// Rows an empty answer box takes inside its border
const MIN_ANSWER_ROWS: u16 = 2;

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let Some(form) = &app.state.form else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),             // Title + description
            Constraint::Length(1),             // Progress
            Constraint::Min(0),                // Questions
            Constraint::Length(BUTTON_HEIGHT), // Buttons
        ])
        .split(area);

    draw_header(frame, chunks[0], form);

    let Some(navigator) = form.navigator() else {
        draw_centered(frame, chunks[2], "Loading questions...", Color::DarkGray);
        return;
    };

    if navigator.catalog().is_empty() {
        draw_centered(
            frame,
            chunks[2],
            "No questions have been configured for this form yet.\nPress Esc to go back.",
            Color::Yellow,
        );
        return;
    }

    draw_progress(frame, chunks[1], navigator);
    draw_questions(frame, chunks[2], form, navigator);
    draw_buttons(frame, chunks[3], navigator);
}

fn draw_header(frame: &mut Frame, area: Rect, form: &FormSession) {
    let mut lines = vec![Line::from(Span::styled(
        form.scope.title(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))];
    if let Some(description) = form.scope.description() {
        lines.push(Line::from(Span::styled(
            description,
            Style::default().fg(Color::Gray),
        )));
    }

    let header = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn draw_progress(frame: &mut Frame, area: Rect, navigator: &StepNavigator) {
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .percent(navigator.progress_percent())
        .label(format!(
            "Step {} of {}",
            navigator.current_step(),
            navigator.max_step()
        ));
    frame.render_widget(gauge, area);
}

fn min_length_hint(min_length: u32) -> String {
    format!("At least {min_length} characters suggested")
}

/// Rows `text` takes once word-wrapped to `width` columns
///
/// Greedy like the paragraph wrapper, with one spare row whenever a line
/// wraps since the two can disagree on where a break falls.
fn wrapped_rows(text: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let mut rows = 0usize;
    let mut wrapped = false;

    for line in text.split('\n') {
        let mut line_rows = 1usize;
        let mut used = 0usize;
        for word in line.split(' ') {
            let len = word.chars().count();
            if used > 0 && used + 1 + len <= width {
                used += 1 + len;
                continue;
            }
            if used > 0 {
                line_rows += 1;
            }
            // Words longer than a row are cut across rows
            line_rows += len.saturating_sub(1) / width;
            used = if len == 0 { 0 } else { (len - 1) % width + 1 };
        }
        wrapped |= line_rows > 1;
        rows = rows.saturating_add(line_rows);
    }

    if wrapped {
        rows = rows.saturating_add(1);
    }
    u16::try_from(rows).unwrap_or(u16::MAX)
}

/// Height of a question box including its borders, for an inner `width`
fn question_height(
    question: &Question,
    answer: &str,
    is_active: bool,
    error: Option<&str>,
    width: u16,
) -> u16 {
    let description = question
        .description
        .as_deref()
        .map_or(0, |d| wrapped_rows(d, width));
    let thumbnail = question
        .thumbnail
        .as_deref()
        .map_or(0, |t| wrapped_rows(&format!("[image] {t}"), width));
    let hint = if question.min_length > 0 {
        wrapped_rows(&min_length_hint(question.min_length), width)
    } else {
        0
    };
    let answer_rows = if is_active {
        wrapped_rows(&format!("{answer}{CURSOR}"), width)
    } else {
        wrapped_rows(answer, width)
    }
    .max(MIN_ANSWER_ROWS);
    let error = error.map_or(0, |e| wrapped_rows(e, width));

    [description, thumbnail, hint, answer_rows, error]
        .into_iter()
        .fold(2, u16::saturating_add)
}

fn draw_questions(frame: &mut Frame, area: Rect, form: &FormSession, navigator: &StepNavigator) {
    let questions = navigator.current_questions();
    if questions.is_empty() {
        draw_centered(
            frame,
            area,
            "Nothing to answer on this step. Press Ctrl+N to continue.",
            Color::DarkGray,
        );
        return;
    }

    let focused = form.focused.min(questions.len() - 1);
    let inner_width = area.width.saturating_sub(2);
    let heights: Vec<u16> = questions
        .iter()
        .enumerate()
        .map(|(idx, q)| {
            question_height(
                q,
                navigator.answer(&q.id),
                idx == focused,
                navigator.error(&q.id),
                inner_width,
            )
        })
        .collect();

    // Scroll so the focused question fits at the bottom
    let mut first = 0;
    while first < focused
        && heights[first..=focused]
            .iter()
            .fold(0u16, |total, h| total.saturating_add(*h))
            > area.height
    {
        first += 1;
    }

    let mut y = area.y;
    for (idx, question) in questions.iter().enumerate().skip(first) {
        let height = heights[idx].min(area.bottom().saturating_sub(y));
        if height < 3 {
            break;
        }
        let question_area = Rect { y, height, ..area };
        // A clipped focused box scrolls so the end of the answer stays visible
        let scroll = if idx == focused {
            heights[idx] - height
        } else {
            0
        };
        draw_question(frame, question_area, question, navigator, idx == focused, scroll);
        y = y.saturating_add(height);
    }
}

fn draw_question(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    navigator: &StepNavigator,
    is_active: bool,
    scroll: u16,
) {
    let error = navigator.error(&question.id);
    let border_color = match (is_active, error.is_some()) {
        (_, true) => Color::Red,
        (true, false) => Color::Cyan,
        (false, false) => Color::DarkGray,
    };

    let mut title = vec![Span::styled(
        format!(" {}", question.title),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if question.is_required {
        title.push(Span::styled(" *", Style::default().fg(Color::Red)));
    }
    title.push(Span::raw(" "));

    let mut lines: Vec<Line> = Vec::new();
    if let Some(description) = &question.description {
        lines.extend(description.lines().map(|l| {
            Line::from(Span::styled(
                l.to_string(),
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::ITALIC),
            ))
        }));
    }
    if let Some(thumbnail) = &question.thumbnail {
        lines.push(Line::from(Span::styled(
            format!("[image] {thumbnail}"),
            Style::default().fg(Color::Blue),
        )));
    }
    if question.min_length > 0 {
        lines.push(Line::from(Span::styled(
            min_length_hint(question.min_length),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.extend(input_lines(
        navigator.answer(&question.id),
        is_active,
        "Type your answer...",
    ));
    if let Some(error) = error {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )));
    }

    let block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
            .block(block),
        area,
    );
}

fn draw_buttons(frame: &mut Frame, area: Rect, navigator: &StepNavigator) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(16),
            Constraint::Min(0),
            Constraint::Length(20),
        ])
        .split(area);

    let previous = Button::new("^P", "Previous").enabled(!navigator.is_first_step());
    render_button(frame, chunks[0], &previous);

    let missing = navigator.errors().len();
    if missing > 0 {
        let notice = Paragraph::new(format!(
            "{missing} required answer{} missing",
            if missing == 1 { " is" } else { "s are" }
        ))
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center);
        let middle = Rect {
            y: chunks[1].y + 1,
            height: 1,
            ..chunks[1]
        };
        frame.render_widget(notice, middle);
    }

    let next = if navigator.is_submitting() {
        Button::new("", "Submitting...").enabled(false)
    } else if navigator.is_last_step() {
        Button::new("^N", "Submit").primary(true)
    } else {
        Button::new("^N", "Next")
    };
    render_button(frame, chunks[2], &next);
}

/// Draw the thank-you screen after a successful submission
pub fn draw_complete(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Thank you!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Your submission has been received."),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to return to the list of forms.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let top = inner.y + inner.height.saturating_sub(rows) / 2;
    let text_area = Rect {
        y: top,
        height: inner.bottom().saturating_sub(top),
        ..inner
    };
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        text_area,
    );
}

fn draw_centered(frame: &mut Frame, area: Rect, message: &str, color: Color) {
    let top = area.y + area.height / 2;
    let message_area = Rect {
        y: top.saturating_sub(1),
        height: area.bottom().saturating_sub(top.saturating_sub(1)),
        ..area
    };
    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, message_area);
}
