//! Field rendering utilities for forms

use crate::state::{DisplayLookup, FieldKind, FieldName, FieldValue, NOT_SELECTED};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const CURSOR: &str = "▌";

/// Everything needed to draw one input
pub struct FieldView<'a> {
    pub field: FieldName,
    pub value: &'a FieldValue,
    pub lookup: &'a DisplayLookup,
    pub is_active: bool,
    pub is_required: bool,
    pub error: Option<&'a str>,
    pub max_length: usize,
}

/// Rows a field occupies, borders included
pub fn field_height(field: FieldName) -> u16 {
    if field.kind().is_multiline() {
        6
    } else {
        3
    }
}

/// Text shown inside a choice input
fn choice_display(view: &FieldView) -> String {
    let code = view.value.as_text();
    if code.is_empty() {
        return "◀ 선택해 주세요 ▶".to_string();
    }
    let label = view.lookup.label(view.field, code).unwrap_or(NOT_SELECTED);
    format!("◀ {label} ▶")
}

/// Draw a form field
pub fn draw_field(frame: &mut Frame, area: Rect, view: &FieldView) {
    let style = if view.is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };

    let border_style = if view.error.is_some() {
        Style::default().fg(Color::Red)
    } else if view.is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let cursor = if view.is_active { CURSOR } else { "" };
    let placeholder_style = Style::default().fg(Color::DarkGray);

    let content = match view.field.kind() {
        FieldKind::Consent => {
            let mark = if view.value.as_flag() { "[✓]" } else { "[ ]" };
            let mut spans = vec![
                Span::styled(mark, style.add_modifier(Modifier::BOLD)),
                Span::raw(" "),
                Span::styled(view.field.label(), style),
            ];
            if view.is_required {
                spans.push(Span::styled(" *", Style::default().fg(Color::Red)));
            }
            Paragraph::new(Line::from(spans))
        }
        FieldKind::Choice => Paragraph::new(Line::from(Span::styled(
            choice_display(view),
            style,
        ))),
        kind => {
            let text = view.value.as_text();
            if text.is_empty() {
                let hint = view.field.placeholder().unwrap_or("");
                Paragraph::new(Line::from(vec![
                    Span::styled(cursor, Style::default().fg(Color::Cyan)),
                    Span::styled(hint, placeholder_style),
                ]))
            } else if kind.is_multiline() {
                let mut lines: Vec<Line> = text
                    .split('\n')
                    .map(|l| Line::from(Span::styled(l.to_string(), style)))
                    .collect();
                if let Some(last) = lines.last_mut() {
                    last.spans
                        .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
                }
                Paragraph::new(lines)
            } else {
                Paragraph::new(Line::from(vec![
                    Span::styled(text, style),
                    Span::styled(cursor, Style::default().fg(Color::Cyan)),
                ]))
            }
        }
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    if view.field.kind() != FieldKind::Consent {
        let required = if view.is_required { " *" } else { "" };
        block = block.title(format!(" {}{required} ", view.field.label()));
    }

    if let Some(error) = view.error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {error} "),
            Style::default().fg(Color::Red),
        )));
    }

    if view.field.kind().is_multiline() {
        let count = view.value.as_text().chars().count();
        block = block.title_bottom(
            Line::from(format!(" {count}/{} ", view.max_length)).alignment(Alignment::Right),
        );
    }

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

/// Draw help text for the active step
pub fn draw_help_text(frame: &mut Frame, area: Rect, lines: &[&str]) {
    let text: Vec<Line> = lines
        .iter()
        .map(|l| Line::from(Span::styled(*l, Style::default().fg(Color::Gray))))
        .collect();
    frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn view<'a>(field: FieldName, value: &'a FieldValue, lookup: &'a DisplayLookup) -> FieldView<'a> {
        FieldView {
            field,
            value,
            lookup,
            is_active: false,
            is_required: true,
            error: None,
            max_length: 600,
        }
    }

    #[test]
    fn test_choice_display() {
        let lookup = DisplayLookup::default();
        let empty = FieldValue::default();
        assert_eq!(
            choice_display(&view(FieldName::ConsultType, &empty, &lookup)),
            "◀ 선택해 주세요 ▶"
        );

        let grant = FieldValue::from("grant");
        assert_eq!(
            choice_display(&view(FieldName::ConsultType, &grant, &lookup)),
            "◀ 정부지원금 ▶"
        );

        let unknown = FieldValue::from("mystery");
        assert_eq!(
            choice_display(&view(FieldName::ConsultType, &unknown, &lookup)),
            format!("◀ {NOT_SELECTED} ▶")
        );
    }

    #[test]
    fn test_field_height() {
        assert_eq!(field_height(FieldName::Message), 6);
        assert_eq!(field_height(FieldName::Name), 3);
        assert_eq!(field_height(FieldName::PrivacyConsent), 3);
    }
}
