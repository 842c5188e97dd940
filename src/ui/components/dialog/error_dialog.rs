//! Error dialog component

use super::base::{render_dialog, DialogConfig};
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

/// Key hint shared by dismissable dialogs
pub(super) fn dismiss_hint(action: &str) -> Vec<Span<'_>> {
    let key = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    vec![
        Span::styled("Enter", key),
        Span::raw(" / "),
        Span::styled("Esc", key),
        Span::raw(" "),
        Span::raw(action),
    ]
}

/// Render the submission failure notice centered on the screen
pub fn render_error_dialog(frame: &mut Frame, error_message: &str) {
    let message = format!("{error_message}\n\n입력하신 내용은 그대로 유지됩니다.");
    render_dialog(
        frame,
        DialogConfig {
            title: "전송 실패",
            title_color: Color::Red,
            border_color: Color::Red,
            message: &message,
            hint: Some(dismiss_hint("닫기")),
            max_width: 60,
            ..Default::default()
        },
    );
}
