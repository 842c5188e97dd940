//! Live summary of the answers

use crate::app::App;
use crate::state::{NOT_AGREED, NOT_ENTERED, NOT_SELECTED};
use crate::platform::COPY_SHORTCUT;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw the summary card
pub fn draw_summary(frame: &mut Frame, area: Rect, app: &App) {
    let items = app.form.project_summary();
    let filled = app.form.state().fields().filled_count();

    let mut lines: Vec<Line> = Vec::with_capacity(items.len() * 2 + 2);
    for item in &items {
        let missing = [NOT_ENTERED, NOT_SELECTED, NOT_AGREED].contains(&item.value.as_str());
        let value_style = if missing {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(Span::styled(
            item.label,
            Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(format!("  {}", item.value), value_style)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("입력 {filled}개 · {COPY_SHORTCUT}: 요약 복사"),
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .title(" 신청 요약 ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        area,
    );
}
