//! Privacy collection notice

use super::base::{render_dialog, DialogConfig};
use super::error_dialog::dismiss_hint;
use ratatui::{style::Color, Frame};

/// Terms shown next to the privacy consent checkbox
pub const PRIVACY_DETAIL: [&str; 4] = [
    "수집 항목: 이름, 연락처, 이메일, 상담 요청 내용",
    "수집 목적: 상담 신청 확인 및 맞춤 상담 제공",
    "보유 기간: 상담 종료 후 3년 보관 후 파기",
    "문의: jjk_naraddon@naver.com / 02-6914-5567",
];

pub fn render_privacy_dialog(frame: &mut Frame) {
    let message = PRIVACY_DETAIL.join("\n");
    render_dialog(
        frame,
        DialogConfig {
            title: "개인정보 수집 및 이용 안내",
            title_color: Color::Cyan,
            border_color: Color::Cyan,
            message: &message,
            hint: Some(dismiss_hint("닫기")),
            max_width: 64,
            ..Default::default()
        },
    );
}
