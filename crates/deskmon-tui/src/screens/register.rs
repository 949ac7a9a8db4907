//! Registration screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use deskmon_core::api::{ApiError, RegisterRequest, UserResponse};
use deskmon_core::auth;
use tokio_util::sync::CancellationToken;

use super::{AUTH_REDIRECT_DELAY, FormPhase, ScreenUpdate};
use crate::effects::UiEffect;
use crate::state::Route;

/// Which input field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterField {
    Email,
    FullName,
    Password,
    Confirm,
}

/// Registration form state.
#[derive(Debug)]
pub struct RegisterScreen {
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub confirm: String,
    pub focus: RegisterField,
    pub phase: FormPhase,
    pub error: Option<String>,
    pub notice: Option<String>,
    /// Email of the account just created; pre-fills the login form.
    pub registered_email: Option<String>,
    /// Token for the in-flight request or the pending redirect timer.
    pub pending: Option<CancellationToken>,
}

impl RegisterScreen {
    pub fn new() -> Self {
        Self {
            email: String::new(),
            full_name: String::new(),
            password: String::new(),
            confirm: String::new(),
            focus: RegisterField::Email,
            phase: FormPhase::Idle,
            error: None,
            notice: None,
            registered_email: None,
            pending: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.phase != FormPhase::Idle
    }

    /// Effects that stop whatever this screen has in flight.
    pub fn cancel_effects(&mut self) -> Vec<UiEffect> {
        match self.pending.take() {
            Some(token) => vec![UiEffect::CancelTask { token }],
            None => vec![],
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ScreenUpdate {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            let mut effects = self.cancel_effects();
            effects.push(UiEffect::Quit);
            return ScreenUpdate::with_effects(effects);
        }

        match key.code {
            KeyCode::Esc => {
                if self.phase == FormPhase::Submitting {
                    let effects = self.cancel_effects();
                    self.phase = FormPhase::Idle;
                    ScreenUpdate::with_effects(effects)
                } else {
                    let mut effects = self.cancel_effects();
                    effects.push(UiEffect::Quit);
                    ScreenUpdate::with_effects(effects)
                }
            }
            KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                // Back to login; allowed while redirecting, which just
                // gets there ahead of the timer.
                if self.phase == FormPhase::Submitting {
                    ScreenUpdate::stay()
                } else {
                    ScreenUpdate::navigate(Route::Login)
                }
            }
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                ScreenUpdate::stay()
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                ScreenUpdate::stay()
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace if self.phase == FormPhase::Idle => {
                self.field_mut().pop();
                ScreenUpdate::stay()
            }
            KeyCode::Char(c)
                if self.phase == FormPhase::Idle
                    && !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.field_mut().push(c);
                ScreenUpdate::stay()
            }
            _ => ScreenUpdate::stay(),
        }
    }

    fn submit(&mut self) -> ScreenUpdate {
        if self.phase != FormPhase::Idle {
            return ScreenUpdate::stay();
        }

        self.error = None;
        self.notice = None;

        // Local checks run before anything touches the network.
        if let Err(message) = auth::validate_registration(&self.password, &self.confirm) {
            self.error = Some(message.to_string());
            return ScreenUpdate::stay();
        }

        self.phase = FormPhase::Submitting;

        let cancel = CancellationToken::new();
        self.pending = Some(cancel.clone());

        ScreenUpdate::with_effects(vec![UiEffect::SubmitRegister {
            request: RegisterRequest::new(&self.email, &self.password, &self.full_name),
            cancel,
        }])
    }

    /// Applies the result of the async register request.
    pub fn handle_outcome(&mut self, result: Result<UserResponse, ApiError>) -> Vec<UiEffect> {
        if self.phase != FormPhase::Submitting {
            // Cancelled or stale result; ignore.
            return vec![];
        }
        self.pending = None;

        match result {
            Ok(response) => {
                if auth::register_accepted(&response) {
                    let email = response
                        .email
                        .as_deref()
                        .map(str::trim)
                        .filter(|e| !e.is_empty())
                        .unwrap_or_else(|| self.email.trim())
                        .to_string();
                    self.registered_email = Some(email);

                    self.phase = FormPhase::Redirecting;
                    self.notice = Some(auth::MSG_REGISTER_SUCCESS.to_string());

                    let cancel = CancellationToken::new();
                    self.pending = Some(cancel.clone());
                    vec![UiEffect::ScheduleNavigate {
                        delay: AUTH_REDIRECT_DELAY,
                        route: Route::Login,
                        cancel,
                    }]
                } else {
                    self.phase = FormPhase::Idle;
                    self.error = Some(auth::MSG_UNRECOGNIZED_RESPONSE.to_string());
                    vec![]
                }
            }
            Err(err) => {
                self.phase = FormPhase::Idle;
                self.error = Some(auth::register_error_message(&err));
                vec![]
            }
        }
    }

    fn focus_next(&mut self) {
        self.focus = match self.focus {
            RegisterField::Email => RegisterField::FullName,
            RegisterField::FullName => RegisterField::Password,
            RegisterField::Password => RegisterField::Confirm,
            RegisterField::Confirm => RegisterField::Email,
        };
    }

    fn focus_prev(&mut self) {
        self.focus = match self.focus {
            RegisterField::Email => RegisterField::Confirm,
            RegisterField::FullName => RegisterField::Email,
            RegisterField::Password => RegisterField::FullName,
            RegisterField::Confirm => RegisterField::Password,
        };
    }

    fn field_mut(&mut self) -> &mut String {
        match self.focus {
            RegisterField::Email => &mut self.email,
            RegisterField::FullName => &mut self.full_name,
            RegisterField::Password => &mut self.password,
            RegisterField::Confirm => &mut self.confirm,
        }
    }
}

impl Default for RegisterScreen {
    fn default() -> Self {
        Self::new()
    }
}
