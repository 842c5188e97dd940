//! Active step panel

use super::field_renderer::{draw_field, draw_help_text, field_height, FieldView};
use crate::app::App;
use crate::platform::{NEXT_STEP_SHORTCUT, PREV_STEP_SHORTCUT, SUBMIT_SHORTCUT};
use crate::ui::components::{render_shortcut_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders},
    Frame,
};

/// Draw the current step: description, fields and navigation buttons
pub fn draw_step(frame: &mut Frame, area: Rect, app: &App) {
    let form = app.form.state();
    let step = form.current_step();

    let block = Block::default()
        .title(Span::styled(
            format!(" {}. {} ", step.index() + 1, step.title()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let fields = step.fields();
    let mut constraints = vec![Constraint::Length(2)]; // Description + helper
    constraints.extend(fields.iter().map(|f| Constraint::Length(field_height(*f))));
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(BUTTON_HEIGHT));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    draw_help_text(frame, chunks[0], &[step.description(), step.helper()]);

    let focused = app.focused_field();
    for (idx, field) in fields.iter().enumerate() {
        let view = FieldView {
            field: *field,
            value: form.fields().get(*field),
            lookup: app.form.lookup(),
            is_active: *field == focused,
            is_required: step.is_required(*field),
            error: form.error(*field),
            max_length: app.form.settings().message_max_length,
        };
        draw_field(frame, chunks[idx + 1], &view);
    }

    draw_buttons(frame, chunks[chunks.len() - 1], app);
}

fn draw_buttons(frame: &mut Frame, area: Rect, app: &App) {
    let form = app.form.state();
    let step = form.current_step();

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_shortcut_button(
        frame,
        columns[0],
        PREV_STEP_SHORTCUT,
        "이전 단계",
        false,
        !step.is_first() && !form.is_submitting(),
    );

    let (shortcut, label) = if form.is_submitting() {
        (SUBMIT_SHORTCUT, "전송 중...")
    } else if step.is_last() {
        (SUBMIT_SHORTCUT, "상담 신청 보내기")
    } else {
        (NEXT_STEP_SHORTCUT, "다음 단계")
    };
    render_shortcut_button(frame, columns[1], shortcut, label, true, !form.is_submitting());
}
