//! Application state and core logic

use crate::config::ResolvedConfig;
use crate::intake::{HttpSubmissionClient, SubmissionClient};
use crate::platform::COPY_MODIFIER;
use crate::state::{
    summary_text, AppState, Dialog, DisplayLookup, FieldKind, FieldName, FormNotice,
    FormSettings, FormStep, StepFormController, StepTransition, SubmitAttempt, SuccessBanner,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use std::sync::Arc;
use tracing::warn;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// The intake wizard; dropping it abandons pending submission work
    pub form: StepFormController,
    /// Whether the app should quit
    quit: bool,
    /// Terminal size for hit testing (height, width)
    pub terminal_size: Option<(u16, u16)>,
}

impl App {
    /// Create a new App posting to the configured endpoint
    pub fn new(config: &ResolvedConfig) -> Result<Self> {
        let client = HttpSubmissionClient::new(config.endpoint.clone(), config.request_timeout)?;
        Ok(Self::with_client(Arc::new(client), config.settings.clone()))
    }

    /// Create an App around any submission client
    pub fn with_client(client: Arc<dyn SubmissionClient>, settings: FormSettings) -> Self {
        let form = StepFormController::new(client, Arc::new(DisplayLookup::default()), settings);
        Self {
            state: AppState::default(),
            form,
            quit: false,
            terminal_size: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// The field with keyboard focus
    pub fn focused_field(&self) -> FieldName {
        self.state.focused(self.form.state().current_step())
    }

    /// True while the success countdown is on screen
    pub fn is_counting_down(&self) -> bool {
        matches!(self.state.dialog, Some(Dialog::Submitted(_)))
    }

    /// Apply finished submissions and timers to the UI
    pub fn poll_form(&mut self) {
        for notice in self.form.poll_notices() {
            self.apply_notice(notice);
        }
    }

    fn apply_notice(&mut self, notice: FormNotice) {
        match notice {
            FormNotice::Submitted(receipt) => {
                let delay = self.form.settings().reset_delay;
                self.state.dialog = Some(Dialog::Submitted(SuccessBanner::new(receipt, delay)));
            }
            FormNotice::SubmissionFailed(message) => {
                self.state.dialog = Some(Dialog::SubmissionFailed(message));
            }
            FormNotice::Reset => {
                if self.is_counting_down() {
                    self.state.close_dialog();
                }
                self.state.focused_field = 0;
                self.state.set_status("새 상담 신청을 작성할 수 있습니다");
            }
        }
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Dialogs are modal
        if self.state.has_dialog() {
            self.handle_dialog_key(key);
            return Ok(());
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let step = self.form.state().current_step();
        let field = self.focused_field();

        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::F(2) => self.state.dialog = Some(Dialog::PrivacyDetail),
            KeyCode::Char('y') if key.modifiers.contains(COPY_MODIFIER) => self.copy_summary(),
            KeyCode::Char('s') if ctrl => self.submit(),
            KeyCode::Char('r') if ctrl => self.reset(),
            KeyCode::Char('n') if ctrl => self.next_step(),
            KeyCode::Char('p') if ctrl => self.previous_step(),
            KeyCode::Char(c @ '1'..='3') if alt => {
                let index = c as usize - '1' as usize;
                if let Some(target) = FormStep::from_index(index) {
                    self.go_to_step(target);
                }
            }
            KeyCode::Tab | KeyCode::Down => self.state.focus_next(step),
            KeyCode::BackTab | KeyCode::Up => self.state.focus_prev(step),
            KeyCode::Enter => self.handle_enter(step, field),
            KeyCode::Left => self.change_option(field, false),
            KeyCode::Right => self.change_option(field, true),
            KeyCode::Char(' ') if !field.kind().accepts_typing() => self.change_option(field, true),
            KeyCode::Char(c) if !ctrl && !alt => self.edit_text(field, |text| text.push(c)),
            KeyCode::Backspace => self.edit_text(field, |text| {
                text.pop();
            }),
            _ => {}
        }

        Ok(())
    }

    fn handle_dialog_key(&mut self, key: KeyEvent) {
        match (&self.state.dialog, key.code) {
            (Some(Dialog::PrivacyDetail), KeyCode::Enter | KeyCode::Esc | KeyCode::F(2)) => {
                self.state.close_dialog();
            }
            (Some(Dialog::SubmissionFailed(_)), KeyCode::Enter | KeyCode::Esc) => {
                self.state.close_dialog();
            }
            (Some(Dialog::Submitted(_)), KeyCode::Enter | KeyCode::Esc) => {
                // Skip the rest of the countdown
                self.reset();
            }
            _ => {}
        }
    }

    fn handle_enter(&mut self, step: FormStep, field: FieldName) {
        if field.kind().is_multiline() {
            self.edit_text(field, |text| text.push('\n'));
        } else if !self.state.is_last_field(step) {
            self.state.focus_next(step);
        } else if step.is_last() {
            self.submit();
        } else {
            self.next_step();
        }
    }

    /// Cycle a choice or flip a consent
    fn change_option(&mut self, field: FieldName, forward: bool) {
        match field.kind() {
            FieldKind::Choice => self.form.cycle_choice(field, forward),
            FieldKind::Consent => self.form.toggle_flag(field),
            _ => {}
        }
    }

    fn edit_text(&mut self, field: FieldName, edit: impl FnOnce(&mut String)) {
        if !field.kind().accepts_typing() {
            return;
        }
        let mut text = self.form.state().fields().text(field).to_string();
        edit(&mut text);
        self.form.set_field(field, text);
    }

    pub fn next_step(&mut self) {
        let outcome = self.form.go_to_next_step();
        self.after_transition(outcome);
    }

    pub fn previous_step(&mut self) {
        let outcome = self.form.go_to_previous_step();
        self.after_transition(outcome);
    }

    pub fn go_to_step(&mut self, target: FormStep) {
        let outcome = self.form.go_to_step(target);
        self.after_transition(outcome);
    }

    fn after_transition(&mut self, outcome: StepTransition) {
        match outcome {
            StepTransition::Moved => self.state.focused_field = 0,
            StepTransition::Refused => {
                self.focus_first_error();
                self.state.set_status("입력값을 확인해 주세요");
            }
            StepTransition::Stayed => {}
        }
    }

    pub fn submit(&mut self) {
        match self.form.submit() {
            SubmitAttempt::Started => self.state.set_status("상담 신청을 전송하는 중입니다..."),
            SubmitAttempt::AlreadySubmitting => self.state.set_status("이미 전송 중입니다"),
            SubmitAttempt::StepInvalid | SubmitAttempt::FormInvalid(_) => {
                self.focus_first_error();
                self.state.set_status("입력값을 확인해 주세요");
            }
        }
    }

    pub fn reset(&mut self) {
        self.form.reset();
        self.state.close_dialog();
        self.state.focused_field = 0;
        self.state.set_status("입력 내용을 초기화했습니다");
    }

    /// Move focus to the first field of the current step that has an error
    fn focus_first_error(&mut self) {
        let form = self.form.state();
        let step = form.current_step();
        let failing = step
            .fields()
            .iter()
            .copied()
            .find(|field| form.error(*field).is_some());
        self.state.focus_field(step, failing);
    }

    /// Handle mouse input
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        if self.state.has_dialog() {
            return Ok(());
        }
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            let (height, width) = self.terminal_size.unwrap_or((24, 80));
            let area = Rect::new(0, 0, width, height);
            if let Some(step) = crate::ui::step_at(area, mouse.column, mouse.row) {
                self.go_to_step(step);
            }
        }
        Ok(())
    }

    fn copy_summary(&mut self) {
        let text = summary_text(&self.form.project_summary());
        match self.copy_to_clipboard(&text) {
            Ok(()) => self.state.set_status("요약을 클립보드에 복사했습니다"),
            Err(err) => {
                warn!(error = %err, "clipboard copy failed");
                self.state.set_status("클립보드에 복사하지 못했습니다");
            }
        }
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::{MockSubmissionClient, SubmissionReceipt, SubmitError};
    use uuid::Uuid;

    fn app_with(client: MockSubmissionClient) -> App {
        let mut app = App::with_client(Arc::new(client), FormSettings::default());
        app.terminal_size = Some((24, 80));
        app
    }

    fn app() -> App {
        app_with(MockSubmissionClient::new())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
    }

    fn press_with(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        app.handle_key(KeyEvent::new(code, modifiers)).unwrap();
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn text(app: &App, field: FieldName) -> String {
        app.form.state().fields().text(field).to_string()
    }

    /// Fill the contact step by keyboard, leaving focus on its last field
    fn fill_contact(app: &mut App) {
        type_text(app, "Kim");
        press(app, KeyCode::Tab);
        type_text(app, "01012345678");
        press(app, KeyCode::Tab);
        press(app, KeyCode::Tab);
        press(app, KeyCode::Tab);
        type_text(app, "Seoul");
        press(app, KeyCode::Tab);
        type_text(app, "2pm");
    }

    fn fill_business(app: &mut App) {
        for _ in 0..4 {
            press(app, KeyCode::Right);
            press(app, KeyCode::Tab);
        }
    }

    /// Complete every step and land on the consent checkbox
    fn fill_all(app: &mut App) {
        fill_contact(app);
        press(app, KeyCode::Enter);
        fill_business(app);
        press_with(app, KeyCode::Char('n'), KeyModifiers::CONTROL);
        assert_eq!(app.form.state().current_step(), FormStep::Details);
        press(app, KeyCode::Tab);
        press(app, KeyCode::Char(' '));
        assert!(app.form.state().fields().flag(FieldName::PrivacyConsent));
    }

    async fn wait_for_dialog(app: &mut App) {
        for _ in 0..50 {
            tokio::task::yield_now().await;
            app.poll_form();
            if app.state.has_dialog() {
                return;
            }
        }
    }

    mod editing {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_typing_formats_phone() {
            let mut app = app();
            press(&mut app, KeyCode::Tab);
            assert_eq!(app.focused_field(), FieldName::Phone);

            type_text(&mut app, "0101234");
            assert_eq!(text(&app, FieldName::Phone), "010-1234");
            type_text(&mut app, "5678");
            assert_eq!(text(&app, FieldName::Phone), "010-1234-5678");

            press(&mut app, KeyCode::Backspace);
            assert_eq!(text(&app, FieldName::Phone), "010-1234-567");
        }

        #[test]
        fn test_typing_ignored_on_choice() {
            let mut app = app();
            fill_contact(&mut app);
            press(&mut app, KeyCode::Enter);
            type_text(&mut app, "abc");
            assert_eq!(text(&app, FieldName::ConsultType), "");
        }

        #[test]
        fn test_arrows_cycle_choice() {
            let mut app = app();
            fill_contact(&mut app);
            press(&mut app, KeyCode::Enter);
            press(&mut app, KeyCode::Right);
            assert_eq!(text(&app, FieldName::ConsultType), "policy-fund");
            press(&mut app, KeyCode::Right);
            assert_eq!(text(&app, FieldName::ConsultType), "grant");
            press(&mut app, KeyCode::Left);
            assert_eq!(text(&app, FieldName::ConsultType), "policy-fund");
        }

        #[test]
        fn test_enter_in_message_adds_newline() {
            let mut app = app();
            fill_contact(&mut app);
            press(&mut app, KeyCode::Enter);
            fill_business(&mut app);
            press_with(&mut app, KeyCode::Char('n'), KeyModifiers::CONTROL);

            type_text(&mut app, "a");
            press(&mut app, KeyCode::Enter);
            type_text(&mut app, "b");
            assert_eq!(text(&app, FieldName::Message), "a\nb");
        }

        #[test]
        fn test_tab_wraps_within_step() {
            let mut app = app();
            for _ in 0..FormStep::Contact.fields().len() {
                press(&mut app, KeyCode::Tab);
            }
            assert_eq!(app.focused_field(), FieldName::Name);
            press(&mut app, KeyCode::BackTab);
            assert_eq!(app.focused_field(), FieldName::DesiredTime);
        }
    }

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_refused_next_focuses_first_error() {
            let mut app = app();
            type_text(&mut app, "Kim");
            press(&mut app, KeyCode::Tab);
            press(&mut app, KeyCode::Tab);

            press_with(&mut app, KeyCode::Char('n'), KeyModifiers::CONTROL);
            assert_eq!(app.form.state().current_step(), FormStep::Contact);
            assert_eq!(app.focused_field(), FieldName::Phone);
            assert!(app.form.state().error(FieldName::Region).is_some());
        }

        #[test]
        fn test_enter_on_last_field_advances() {
            let mut app = app();
            fill_contact(&mut app);
            assert_eq!(app.focused_field(), FieldName::DesiredTime);
            press(&mut app, KeyCode::Enter);
            assert_eq!(app.form.state().current_step(), FormStep::Business);
            assert_eq!(app.focused_field(), FieldName::ConsultType);
        }

        #[test]
        fn test_alt_jump_forward_is_guarded() {
            let mut app = app();
            press_with(&mut app, KeyCode::Char('3'), KeyModifiers::ALT);
            assert_eq!(app.form.state().current_step(), FormStep::Contact);
            assert!(!app.form.state().errors().is_empty());

            fill_contact(&mut app);
            press_with(&mut app, KeyCode::Char('2'), KeyModifiers::ALT);
            assert_eq!(app.form.state().current_step(), FormStep::Business);
            press_with(&mut app, KeyCode::Char('1'), KeyModifiers::ALT);
            assert_eq!(app.form.state().current_step(), FormStep::Contact);
        }

        #[test]
        fn test_previous_step_never_refused() {
            let mut app = app();
            fill_contact(&mut app);
            press(&mut app, KeyCode::Enter);
            press_with(&mut app, KeyCode::Char('p'), KeyModifiers::CONTROL);
            assert_eq!(app.form.state().current_step(), FormStep::Contact);
        }

        #[test]
        fn test_click_on_step_pill() {
            let mut app = app();
            let area = Rect::new(0, 0, 80, 24);
            let pills = crate::ui::step_pill_areas(area);
            let click = |rect: Rect| MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: rect.x + rect.width / 2,
                row: rect.y + rect.height / 2,
                modifiers: KeyModifiers::NONE,
            };

            app.handle_mouse(click(pills[1])).unwrap();
            assert_eq!(app.form.state().current_step(), FormStep::Contact);

            fill_contact(&mut app);
            app.handle_mouse(click(pills[1])).unwrap();
            assert_eq!(app.form.state().current_step(), FormStep::Business);
            app.handle_mouse(click(pills[0])).unwrap();
            assert_eq!(app.form.state().current_step(), FormStep::Contact);
        }
    }

    mod dialogs {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_esc_quits() {
            let mut app = app();
            press(&mut app, KeyCode::Esc);
            assert!(app.should_quit());
        }

        #[test]
        fn test_privacy_detail_is_modal() {
            let mut app = app();
            press(&mut app, KeyCode::F(2));
            assert_eq!(app.state.dialog, Some(Dialog::PrivacyDetail));

            type_text(&mut app, "x");
            assert_eq!(text(&app, FieldName::Name), "");

            press(&mut app, KeyCode::Esc);
            assert_eq!(app.state.dialog, None);
            assert!(!app.should_quit());
        }

        #[test]
        fn test_reset_clears_form() {
            let mut app = app();
            fill_contact(&mut app);
            press_with(&mut app, KeyCode::Char('r'), KeyModifiers::CONTROL);
            assert_eq!(text(&app, FieldName::Name), "");
            assert_eq!(app.state.focused_field, 0);
        }
    }

    mod submission {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_success_opens_countdown() {
            let mut client = MockSubmissionClient::new();
            client
                .expect_submit()
                .times(1)
                .returning(|_| Ok(SubmissionReceipt::accepted(Uuid::new_v4())));
            let mut app = app_with(client);
            fill_all(&mut app);

            press_with(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL);
            assert!(app.form.state().is_submitting());
            // Ignored while the first request is in flight
            press_with(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL);

            wait_for_dialog(&mut app).await;
            assert!(app.is_counting_down());
            assert!(app.form.state().has_succeeded());
        }

        #[test]
        fn test_dismissing_success_resets_early() {
            tokio_test::block_on(async {
                let mut client = MockSubmissionClient::new();
                client
                    .expect_submit()
                    .returning(|_| Ok(SubmissionReceipt::accepted(Uuid::new_v4())));
                let mut app = app_with(client);
                fill_all(&mut app);
                // Enter on the last field of the last step submits
                press(&mut app, KeyCode::Tab);
                press(&mut app, KeyCode::Enter);

                wait_for_dialog(&mut app).await;
                assert!(app.is_counting_down());

                press(&mut app, KeyCode::Enter);
                assert_eq!(app.state.dialog, None);
                assert_eq!(app.form.state().current_step(), FormStep::Contact);
                assert_eq!(text(&app, FieldName::Name), "");
            });
        }

        #[tokio::test]
        async fn test_failure_shows_dialog_and_keeps_fields() {
            let mut client = MockSubmissionClient::new();
            client.expect_submit().returning(|_| {
                Err(SubmitError::Rejected {
                    status: 503,
                    message: "maintenance".into(),
                })
            });
            let mut app = app_with(client);
            fill_all(&mut app);
            press_with(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL);

            wait_for_dialog(&mut app).await;
            assert!(matches!(app.state.dialog, Some(Dialog::SubmissionFailed(_))));
            press(&mut app, KeyCode::Enter);
            assert_eq!(app.state.dialog, None);
            assert_eq!(text(&app, FieldName::Name), "Kim");
            assert_eq!(app.form.state().current_step(), FormStep::Details);
        }

        #[tokio::test]
        async fn test_invalid_submit_focuses_error() {
            let mut client = MockSubmissionClient::new();
            client.expect_submit().never();
            let mut app = app_with(client);
            fill_all(&mut app);
            // Uncheck consent
            press(&mut app, KeyCode::Char(' '));

            press_with(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL);
            assert_eq!(app.focused_field(), FieldName::PrivacyConsent);
            assert!(!app.form.state().is_submitting());
        }
    }
}
