//! Submission success dialog with the auto-reset countdown

use super::base::{render_dialog, DialogConfig};
use super::error_dialog::dismiss_hint;
use crate::state::SuccessBanner;
use ratatui::{
    style::{Color, Style},
    widgets::Gauge,
    Frame,
};

const SUCCESS_MESSAGE: &str =
    "평일 기준 24시간 이내에 담당자가 연락드립니다. 빠르게 도와드릴게요.";

fn success_message(banner: &SuccessBanner) -> String {
    let mut message = SUCCESS_MESSAGE.to_string();
    message.push_str(&format!("\n접수 번호: {}", banner.receipt.request_id));
    if banner.receipt.notification_error.is_some() {
        message.push_str("\n알림 전송이 지연되고 있지만 신청은 정상 접수되었습니다.");
    }
    message
}

pub fn render_success_dialog(frame: &mut Frame, banner: &SuccessBanner) {
    let message = success_message(banner);
    let reserved = render_dialog(
        frame,
        DialogConfig {
            title: "상담 신청이 접수되었습니다!",
            title_color: Color::Green,
            border_color: Color::Green,
            message: &message,
            hint: Some(dismiss_hint("새 신청 작성")),
            max_width: 64,
            reserved_rows: 1,
        },
    );

    if let Some(row) = reserved {
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
            .ratio(f64::from(banner.remaining()))
            .label(format!("{}초 후 초기화", banner.seconds_left()));
        frame.render_widget(gauge, row);
    }
}
