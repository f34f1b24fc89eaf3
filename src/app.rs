//! Application state and screen flow

use crate::config::TuiConfig;
use crate::identity::{AuthFlow, IdentityService, IdentitySubmitHandler};
use crate::state::{
    sign_in_form, sign_up_form, AppState, Focus, FormController, FormState, FormStatus, Screen,
    SubmissionOutcome, SubmitAttempt, EMAIL,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Main application struct
pub struct App {
    /// UI state around the mounted form
    pub state: AppState,
    /// Each screen owns its controller; leaving a screen resets it
    sign_in: FormController,
    sign_up: FormController,
    /// Task running the mounted screen's submission, if any
    in_flight: Option<JoinHandle<()>>,
    /// Handler outcomes coming back from spawned submissions
    outcome_tx: mpsc::UnboundedSender<SubmissionOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<SubmissionOutcome>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance with the configured start screen mounted
    pub fn new(config: TuiConfig, identity: Arc<dyn IdentityService>) -> Result<Self> {
        let start = config.start_screen();
        let sign_in = Self::build_form(&config, &identity, Screen::SignIn)?;
        let sign_up = Self::build_form(&config, &identity, Screen::SignUp)?;
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        tracing::info!(screen = ?start, mode = config.validation_mode().label(), "mounted");

        Ok(Self {
            state: AppState::new(start),
            sign_in,
            sign_up,
            in_flight: None,
            outcome_tx,
            outcome_rx,
            quit: false,
        })
    }

    fn build_form(
        config: &TuiConfig,
        identity: &Arc<dyn IdentityService>,
        screen: Screen,
    ) -> Result<FormController> {
        let (form_config, flow) = match screen {
            Screen::SignIn => (sign_in_form(config.validation_mode()), AuthFlow::SignIn),
            Screen::SignUp => (
                sign_up_form(config.validation_mode(), config.password_min_length()),
                AuthFlow::SignUp,
            ),
        };
        let handler = Arc::new(IdentitySubmitHandler::new(Arc::clone(identity), flow));
        let mut form = FormController::new(form_config, handler)?;
        form.subscribe(Box::new(move |snapshot: &FormState| {
            tracing::debug!(
                ?screen,
                status = snapshot.status.label(),
                mode = snapshot.mode.label(),
                attempts = snapshot.submit_count,
                visible_errors = snapshot.visible_errors().error_count(),
                "form updated"
            );
        }));
        Ok(form)
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn current_screen(&self) -> Screen {
        self.state.current_screen()
    }

    /// Controller of the mounted screen
    pub fn form(&self) -> &FormController {
        match self.current_screen() {
            Screen::SignIn => &self.sign_in,
            Screen::SignUp => &self.sign_up,
        }
    }

    pub fn form_mut(&mut self) -> &mut FormController {
        match self.current_screen() {
            Screen::SignIn => &mut self.sign_in,
            Screen::SignUp => &mut self.sign_up,
        }
    }

    pub fn focus(&self) -> Focus {
        self.state.focus(self.form().specs().len())
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Tear down the mounted screen: stop its submission and reset its form
    fn unmount(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
            self.form_mut().cancel_pending();
        }
        self.form_mut().reset();
    }

    /// Show the navigator's current screen from a clean slate
    fn mount(&mut self) {
        self.state.active_slot = 0;
        self.state.status_message = None;
        tracing::info!(
            screen = ?self.current_screen(),
            depth = self.state.navigator.depth(),
            "mounted"
        );
    }

    /// Navigate to a new screen
    pub fn navigate(&mut self, screen: Screen) {
        self.unmount();
        self.state.navigator.navigate(screen);
        self.mount();
    }

    /// Go back to the previous screen, or quit at the root
    pub fn go_back(&mut self) {
        if self.state.navigator.depth() == 0 {
            self.quit = true;
            return;
        }
        self.unmount();
        self.state.navigator.go_back();
        self.mount();
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        let focus = self.focus();
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.move_focus(true)?,
            KeyCode::BackTab | KeyCode::Up => self.move_focus(false)?,
            KeyCode::Char('s') if ctrl => self.submit(),
            KeyCode::Char('n') if ctrl => self.navigate(self.current_screen().counterpart()),
            KeyCode::Esc => self.go_back(),
            KeyCode::Enter => match focus {
                Focus::SwitchLink => self.navigate(self.current_screen().counterpart()),
                Focus::Field(_) | Focus::SubmitButton => self.submit(),
            },
            // Only plain or shifted characters are text
            KeyCode::Char(c) if key.modifiers.difference(KeyModifiers::SHIFT).is_empty() => {
                if let Focus::Field(index) = focus {
                    self.edit_field(index, |value| value.push(c))?;
                }
            }
            KeyCode::Backspace => {
                if let Focus::Field(index) = focus {
                    self.edit_field(index, |value| {
                        value.pop();
                    })?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn field_name(&self, index: usize) -> Option<String> {
        self.form().specs().get(index).map(|spec| spec.name.clone())
    }

    fn edit_field(&mut self, index: usize, edit: impl FnOnce(&mut String)) -> Result<()> {
        let Some(name) = self.field_name(index) else {
            return Ok(());
        };
        let mut value = self.form().value(&name).unwrap_or_default().to_string();
        edit(&mut value);
        self.form_mut().change(&name, &value)?;
        Ok(())
    }

    /// Move focus, blurring the field being left
    fn move_focus(&mut self, forward: bool) -> Result<()> {
        if let Focus::Field(index) = self.focus() {
            if let Some(name) = self.field_name(index) {
                self.form_mut().blur(&name)?;
            }
        }
        let count = self.form().specs().len();
        if forward {
            self.state.next_slot(count);
        } else {
            self.state.prev_slot(count);
        }
        Ok(())
    }

    /// Submit the mounted form
    ///
    /// Invalid forms stay put with all errors revealed. Valid ones are handed
    /// to a spawned task; the outcome is applied by [`App::poll_submissions`].
    pub fn submit(&mut self) {
        match self.form_mut().begin_submit() {
            SubmitAttempt::Blocked(errors) => {
                let failing: Vec<&str> = errors.errors().map(|(name, _)| name).collect();
                tracing::debug!(?failing, "submit blocked");
                self.state.status_message = Some(format!(
                    "Fix {} field(s) before submitting",
                    failing.len()
                ));
                // Jump to the first field that needs attention
                let first = self
                    .form()
                    .specs()
                    .iter()
                    .position(|spec| errors.error(&spec.name).is_some());
                if let Some(index) = first {
                    self.state.active_slot = index;
                }
            }
            SubmitAttempt::InFlight => {
                tracing::debug!("submit pressed while submitting");
            }
            SubmitAttempt::Ready(pending) => {
                let screen = self.current_screen();
                tracing::info!(?screen, ticket = ?pending.ticket, "submitting");
                self.state.status_message = Some(format!("{}…", screen.title()));
                let tx = self.outcome_tx.clone();
                self.in_flight = Some(tokio::spawn(async move {
                    let outcome = pending.run().await;
                    // Receiver only goes away when the app shuts down
                    let _ = tx.send(outcome);
                }));
            }
        }
    }

    /// Apply any finished submissions
    pub fn poll_submissions(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.apply_outcome(outcome);
        }
    }

    fn apply_outcome(&mut self, outcome: SubmissionOutcome) {
        if !self.form_mut().settle(outcome) {
            return;
        }
        self.in_flight = None;
        let email = self.form().value(EMAIL).unwrap_or_default().to_string();
        match self.form().status().clone() {
            FormStatus::Accepted => {
                let message = match self.current_screen() {
                    Screen::SignIn => format!("Signed in as {email}"),
                    Screen::SignUp => format!("Account created for {email}"),
                };
                self.state.status_message = Some(message);
            }
            FormStatus::Rejected(message) => {
                let message = message.unwrap_or_else(|| "Request failed".to_string());
                self.state.status_message = Some(message.clone());
                self.push_error(message);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{MockIdentityService, Session};
    use crate::state::{CONFIRM_PASSWORD, PASSWORD};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    fn app_with(service: MockIdentityService, start: Screen) -> App {
        let config = TuiConfig {
            start_screen: Some(start),
            ..Default::default()
        };
        App::new(config, Arc::new(service)).unwrap()
    }

    fn idle_service() -> MockIdentityService {
        let mut service = MockIdentityService::new();
        service.expect_sign_in().times(0);
        service.expect_sign_up().times(0);
        service
    }

    /// Wait for the next spawned submission and apply it
    async fn settle_next(app: &mut App) {
        let outcome = app.outcome_rx.recv().await.unwrap();
        app.apply_outcome(outcome);
    }

    mod navigation {
        use super::*;

        #[test]
        fn test_starts_on_configured_screen() {
            let app = app_with(idle_service(), Screen::SignUp);
            assert_eq!(app.current_screen(), Screen::SignUp);
            assert_eq!(app.form().specs().len(), 3);
        }

        #[test]
        fn test_ctrl_n_switches_screen_with_fresh_form() {
            let mut app = app_with(idle_service(), Screen::SignIn);
            type_text(&mut app, "bob");
            app.handle_key(ctrl('n')).unwrap();

            assert_eq!(app.current_screen(), Screen::SignUp);
            assert_eq!(app.form().value(EMAIL), Some(""));
            assert_eq!(app.form().status(), &FormStatus::Pristine);
            assert_eq!(app.state.active_slot, 0);
        }

        #[test]
        fn test_enter_on_link_navigates() {
            let mut app = app_with(idle_service(), Screen::SignIn);
            // email, password, submit, link
            for _ in 0..3 {
                app.handle_key(key(KeyCode::Tab)).unwrap();
            }
            assert_eq!(app.focus(), Focus::SwitchLink);
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(app.current_screen(), Screen::SignUp);
        }

        #[test]
        fn test_repeated_switching_keeps_one_step_back_to_quit() {
            let mut app = app_with(idle_service(), Screen::SignIn);
            for _ in 0..1000 {
                app.handle_key(ctrl('n')).unwrap();
            }
            assert_eq!(app.current_screen(), Screen::SignIn);
            assert_eq!(app.state.navigator.depth(), 0);

            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert!(app.should_quit());
        }

        #[test]
        fn test_esc_goes_back_then_quits() {
            let mut app = app_with(idle_service(), Screen::SignIn);
            app.handle_key(ctrl('n')).unwrap();
            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert_eq!(app.current_screen(), Screen::SignIn);
            assert!(!app.should_quit());

            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert!(app.should_quit());
        }
    }

    mod editing {
        use super::*;

        #[test]
        fn test_typing_edits_focused_field() {
            let mut app = app_with(idle_service(), Screen::SignIn);
            type_text(&mut app, "bobx");
            app.handle_key(key(KeyCode::Backspace)).unwrap();
            assert_eq!(app.form().value(EMAIL), Some("bob"));
            assert_eq!(app.form().value(PASSWORD), Some(""));
        }

        #[test]
        fn test_tab_blurs_and_reveals_error() {
            let mut app = app_with(idle_service(), Screen::SignIn);
            type_text(&mut app, "bob");
            assert_eq!(app.form().snapshot().visible_error(EMAIL), None);

            app.handle_key(key(KeyCode::Tab)).unwrap();
            assert_eq!(
                app.form().snapshot().visible_error(EMAIL),
                Some("Enter a valid email address")
            );
            assert_eq!(app.focus(), Focus::Field(1));
        }

        #[test]
        fn test_modified_characters_are_not_typed() {
            let mut app = app_with(idle_service(), Screen::SignIn);
            app.handle_key(ctrl('a')).unwrap();
            app.handle_key(KeyEvent::new(KeyCode::Char('b'), KeyModifiers::ALT))
                .unwrap();
            assert_eq!(app.form().value(EMAIL), Some(""));

            app.handle_key(KeyEvent::new(KeyCode::Char('B'), KeyModifiers::SHIFT))
                .unwrap();
            assert_eq!(app.form().value(EMAIL), Some("B"));
        }

        #[test]
        fn test_typing_on_button_is_ignored() {
            let mut app = app_with(idle_service(), Screen::SignIn);
            app.state.active_slot = 2;
            type_text(&mut app, "x");
            assert_eq!(app.form().value(EMAIL), Some(""));
            assert_eq!(app.form().value(PASSWORD), Some(""));
        }
    }

    mod submission {
        use super::*;

        #[test]
        fn test_invalid_submit_blocks_and_focuses_first_error() {
            let mut app = app_with(idle_service(), Screen::SignIn);
            app.handle_key(key(KeyCode::Tab)).unwrap();
            type_text(&mut app, "hunter2");
            app.handle_key(ctrl('s')).unwrap();

            assert_eq!(
                app.form().snapshot().visible_error(EMAIL),
                Some("Email is required")
            );
            assert_eq!(app.focus(), Focus::Field(0));
            assert_eq!(
                app.state.status_message.as_deref(),
                Some("Fix 1 field(s) before submitting")
            );
        }

        #[tokio::test]
        async fn test_sign_in_emits_once_despite_double_tap() {
            let mut service = MockIdentityService::new();
            service.expect_sign_up().times(0);
            service
                .expect_sign_in()
                .times(1)
                .withf(|c| c.email == "bob@example.com" && c.password == "hunter2")
                .returning(|c| {
                    Ok(Session {
                        email: c.email.clone(),
                    })
                });
            let mut app = app_with(service, Screen::SignIn);
            type_text(&mut app, "bob@example.com");
            app.handle_key(key(KeyCode::Tab)).unwrap();
            type_text(&mut app, "hunter2");

            app.handle_key(key(KeyCode::Enter)).unwrap();
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(app.form().status(), &FormStatus::Submitting);

            settle_next(&mut app).await;
            assert_eq!(app.form().status(), &FormStatus::Accepted);
            assert_eq!(
                app.state.status_message.as_deref(),
                Some("Signed in as bob@example.com")
            );
            assert!(app.outcome_rx.try_recv().is_err());
        }

        #[tokio::test]
        async fn test_sign_up_mismatch_never_reaches_service() {
            let mut app = app_with(idle_service(), Screen::SignUp);
            type_text(&mut app, "bob@example.com");
            app.handle_key(key(KeyCode::Tab)).unwrap();
            type_text(&mut app, "abc123");
            app.handle_key(key(KeyCode::Tab)).unwrap();
            type_text(&mut app, "abc124");
            app.handle_key(ctrl('s')).unwrap();

            assert_eq!(
                app.form().snapshot().visible_error(CONFIRM_PASSWORD),
                Some("Passwords do not match")
            );
            assert_eq!(app.form().status(), &FormStatus::Editing);
            assert_eq!(app.focus(), Focus::Field(2));
        }

        #[tokio::test]
        async fn test_rejection_opens_error_dialog() {
            let mut service = MockIdentityService::new();
            service
                .expect_sign_in()
                .times(1)
                .returning(|_| Err(anyhow::anyhow!("Invalid credentials")));
            let mut app = app_with(service, Screen::SignIn);
            type_text(&mut app, "bob@example.com");
            app.handle_key(key(KeyCode::Tab)).unwrap();
            type_text(&mut app, "wrong");
            app.submit();

            settle_next(&mut app).await;
            assert_eq!(
                app.form().status(),
                &FormStatus::Rejected(Some("Invalid credentials".to_string()))
            );
            assert_eq!(app.state.current_error(), Some("Invalid credentials"));

            // Modal swallows input until dismissed
            type_text(&mut app, "x");
            assert_eq!(app.form().value(PASSWORD), Some("wrong"));
            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert!(!app.state.has_errors());
        }

        #[tokio::test]
        async fn test_navigating_away_aborts_pending_submission() {
            let mut service = MockIdentityService::new();
            // The task may be aborted before it ever reaches the service
            service.expect_sign_in().times(0..=1).returning(|c| {
                Ok(Session {
                    email: c.email.clone(),
                })
            });
            let mut app = app_with(service, Screen::SignIn);
            type_text(&mut app, "bob@example.com");
            app.handle_key(key(KeyCode::Tab)).unwrap();
            type_text(&mut app, "hunter2");
            app.submit();
            assert!(app.in_flight.is_some());

            app.handle_key(ctrl('n')).unwrap();
            assert!(app.in_flight.is_none());
            tokio::task::yield_now().await;
            app.poll_submissions();

            assert_eq!(app.current_screen(), Screen::SignUp);
            assert_eq!(app.form().status(), &FormStatus::Pristine);
            assert!(app.state.status_message.is_none());

            // The screen left behind was reset, not just hidden
            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert_eq!(app.current_screen(), Screen::SignIn);
            assert_eq!(app.form().status(), &FormStatus::Pristine);
            assert_eq!(app.form().value(EMAIL), Some(""));
        }

        #[tokio::test]
        async fn test_settled_submission_clears_task_handle() {
            let mut service = MockIdentityService::new();
            service.expect_sign_in().times(1).returning(|c| {
                Ok(Session {
                    email: c.email.clone(),
                })
            });
            let mut app = app_with(service, Screen::SignIn);
            type_text(&mut app, "bob@example.com");
            app.handle_key(key(KeyCode::Tab)).unwrap();
            type_text(&mut app, "hunter2");
            app.submit();

            settle_next(&mut app).await;
            assert!(app.in_flight.is_none());
        }
    }
}
