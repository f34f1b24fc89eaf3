//! Application state definitions

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Screen currently mounted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Screen {
    #[default]
    SignIn,
    SignUp,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Self::SignIn => "Sign in",
            Self::SignUp => "Sign up",
        }
    }

    /// Label of the primary button
    pub fn submit_label(&self) -> &'static str {
        match self {
            Self::SignIn => "Login",
            Self::SignUp => "Create account",
        }
    }

    /// The screen the link at the bottom leads to
    pub fn counterpart(&self) -> Self {
        match self {
            Self::SignIn => Self::SignUp,
            Self::SignUp => Self::SignIn,
        }
    }
}

/// Stack-based screen navigation
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    current: Screen,
    history: Vec<Screen>,
}

impl Navigator {
    pub fn new(start: Screen) -> Self {
        Self {
            current: start,
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }

    /// Show `screen`, pushing the current one
    ///
    /// A screen already on the stack is popped back to instead, so switching
    /// back and forth never grows the history.
    pub fn navigate(&mut self, screen: Screen) {
        if screen == self.current {
            return;
        }
        if let Some(index) = self.history.iter().position(|s| *s == screen) {
            self.history.truncate(index);
        } else {
            self.history.push(self.current);
        }
        self.current = screen;
    }

    /// Pop back to the previous screen; `None` at the root
    pub fn go_back(&mut self) -> Option<Screen> {
        let previous = self.history.pop()?;
        self.current = previous;
        Some(previous)
    }
}

/// Where keyboard focus is on a form screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Index into the form's fields
    Field(usize),
    SubmitButton,
    /// Link to the other screen
    SwitchLink,
}

/// UI-level state around the mounted form
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub navigator: Navigator,
    /// Focus slot: fields first, then the submit button, then the link
    pub active_slot: usize,
    pub error_queue: VecDeque<String>,
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(start: Screen) -> Self {
        Self {
            navigator: Navigator::new(start),
            ..Default::default()
        }
    }

    pub fn current_screen(&self) -> Screen {
        self.navigator.current()
    }

    /// Resolve the focus slot for a form with `field_count` fields
    pub fn focus(&self, field_count: usize) -> Focus {
        match self.active_slot {
            i if i < field_count => Focus::Field(i),
            i if i == field_count => Focus::SubmitButton,
            _ => Focus::SwitchLink,
        }
    }

    /// Move to next focus slot
    pub fn next_slot(&mut self, field_count: usize) {
        self.active_slot = (self.active_slot + 1) % (field_count + 2);
    }

    /// Move to previous focus slot
    pub fn prev_slot(&mut self, field_count: usize) {
        if self.active_slot == 0 {
            self.active_slot = field_count + 1;
        } else {
            self.active_slot -= 1;
        }
    }

    /// Queue an error for the modal dialog
    pub fn push_error(&mut self, message: String) {
        self.error_queue.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod screen {
        use super::*;

        #[test]
        fn test_default_is_sign_in() {
            assert_eq!(Screen::default(), Screen::SignIn);
        }

        #[test]
        fn test_counterpart_round_trips() {
            assert_eq!(Screen::SignIn.counterpart(), Screen::SignUp);
            assert_eq!(Screen::SignUp.counterpart().counterpart(), Screen::SignUp);
        }

        #[test]
        fn test_serde_uses_camel_case() {
            assert_eq!(serde_json::to_string(&Screen::SignUp).unwrap(), "\"signUp\"");
        }
    }

    mod navigator {
        use super::*;

        #[test]
        fn test_navigate_saves_history() {
            let mut nav = Navigator::new(Screen::SignIn);
            nav.navigate(Screen::SignUp);
            assert_eq!(nav.current(), Screen::SignUp);
            assert_eq!(nav.depth(), 1);
        }

        #[test]
        fn test_go_back_restores_previous_screen() {
            let mut nav = Navigator::new(Screen::SignIn);
            nav.navigate(Screen::SignUp);
            assert_eq!(nav.go_back(), Some(Screen::SignIn));
            assert_eq!(nav.current(), Screen::SignIn);
        }

        #[test]
        fn test_switching_back_and_forth_keeps_history_flat() {
            let mut nav = Navigator::new(Screen::SignIn);
            for _ in 0..1000 {
                let next = nav.current().counterpart();
                nav.navigate(next);
                assert!(nav.depth() <= 1);
            }
            assert_eq!(nav.current(), Screen::SignIn);
            assert_eq!(nav.depth(), 0);
            assert_eq!(nav.go_back(), None);
        }

        #[test]
        fn test_navigate_to_current_screen_is_noop() {
            let mut nav = Navigator::new(Screen::SignIn);
            nav.navigate(Screen::SignIn);
            assert_eq!(nav.depth(), 0);
        }

        #[test]
        fn test_go_back_at_root_does_nothing() {
            let mut nav = Navigator::new(Screen::SignUp);
            assert_eq!(nav.go_back(), None);
            assert_eq!(nav.current(), Screen::SignUp);
        }
    }

    mod focus {
        use super::*;

        #[test]
        fn test_focus_slots() {
            let mut state = AppState::new(Screen::SignIn);
            assert_eq!(state.focus(2), Focus::Field(0));
            state.next_slot(2);
            state.next_slot(2);
            assert_eq!(state.focus(2), Focus::SubmitButton);
            state.next_slot(2);
            assert_eq!(state.focus(2), Focus::SwitchLink);
            state.next_slot(2);
            assert_eq!(state.focus(2), Focus::Field(0));
        }

        #[test]
        fn test_prev_slot_wraps() {
            let mut state = AppState::new(Screen::SignIn);
            state.prev_slot(3);
            assert_eq!(state.focus(3), Focus::SwitchLink);
            state.prev_slot(3);
            assert_eq!(state.focus(3), Focus::SubmitButton);
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn test_error_queue_is_fifo() {
            let mut state = AppState::default();
            assert!(!state.has_errors());
            state.push_error("first".to_string());
            state.push_error("second".to_string());
            assert_eq!(state.current_error(), Some("first"));
            state.dismiss_error();
            assert_eq!(state.current_error(), Some("second"));
            state.dismiss_error();
            assert!(!state.has_errors());
        }
    }
}
