//! Layout components (header, step pills, status bar)

use super::components::render_button;
use crate::app::App;
use crate::platform::{
    COPY_SHORTCUT, NEXT_STEP_SHORTCUT, PREV_STEP_SHORTCUT, RESET_SHORTCUT, SUBMIT_SHORTCUT,
};
use crate::state::FormStep;
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Header height: borders + step pills + progress bar
const HEADER_HEIGHT: u16 = 6;

/// Screen regions of the main view
pub struct AppLayout {
    pub header: Rect,
    pub form: Rect,
    pub summary: Rect,
    pub status: Rect,
}

/// Create the main layout
pub fn create_layout(area: Rect) -> AppLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT), // Header
            Constraint::Min(0),                // Content
            Constraint::Length(1),             // Status bar
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(62), // Active step
            Constraint::Percentage(38), // Summary
        ])
        .split(rows[1]);

    AppLayout {
        header: rows[0],
        form: columns[0],
        summary: columns[1],
        status: rows[2],
    }
}

fn header_block() -> Block<'static> {
    Block::default()
        .title(Span::styled(
            " 나라똔 빠른 상담 신청 ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

/// Split the header interior into (pills row, progress row)
fn header_rows(header: Rect) -> (Rect, Rect) {
    let inner = header_block().inner(header);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(inner);
    (rows[0], rows[1])
}

/// Screen rectangles of the step pills, one per step in order
pub fn step_pill_areas(area: Rect) -> [Rect; 3] {
    let (pills, _) = header_rows(create_layout(area).header);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(pills);
    [columns[0], columns[1], columns[2]]
}

/// The step whose pill contains the given screen cell
pub fn step_at(area: Rect, column: u16, row: u16) -> Option<FormStep> {
    step_pill_areas(area)
        .iter()
        .position(|pill| pill.contains(Position::new(column, row)))
        .and_then(FormStep::from_index)
}

/// Draw the header: step pills and the progress bar
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let form = app.form.state();
    let current = form.current_step();

    frame.render_widget(header_block(), area);

    let pills = step_pill_areas(frame.area());
    for (step, pill) in FormStep::ALL.iter().zip(pills) {
        let marker = if form.step_has_errors(*step) {
            " !"
        } else if step.index() < current.index() {
            " 완료"
        } else {
            ""
        };
        let content = format!("{} {}{}", step.index() + 1, step.title(), marker);
        // Later steps look disabled until reached
        let reachable = step.index() <= current.index();
        render_button(frame, pill, &content, *step == current, reachable);
    }

    let (_, progress) = header_rows(area);
    let ratio = (current.index() + 1) as f64 / FormStep::ALL.len() as f64;
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .ratio(ratio)
        .label(format!("{} / {}", current.index() + 1, FormStep::ALL.len()));
    frame.render_widget(gauge, progress);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    // Submission indicator
    let indicator = if app.form.state().is_submitting() {
        Span::styled(" ◌ 전송 중 ", Style::default().fg(Color::Yellow))
    } else if app.form.state().has_succeeded() {
        Span::styled(" ● 접수 완료 ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::Gray))
    };
    spans.push(indicator);

    spans.push(Span::styled(key_hints(), Style::default().fg(Color::Gray)));

    if let Some(msg) = app.state.status() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let quit_hint = " Esc:quit ";

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    // Render quit hint on the right
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for the form
fn key_hints() -> String {
    format!(
        "Tab:field  ←/→:select  {NEXT_STEP_SHORTCUT}/{PREV_STEP_SHORTCUT}:step  {SUBMIT_SHORTCUT}:submit  {RESET_SHORTCUT}:reset  {COPY_SHORTCUT}:copy  F2:privacy"
    )
}
