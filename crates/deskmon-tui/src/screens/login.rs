//! Login screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use deskmon_core::api::{ApiError, AuthResponse, LoginRequest};
use deskmon_core::auth::{self, LoginOutcome};
use tokio_util::sync::CancellationToken;

use super::{AUTH_REDIRECT_DELAY, FormPhase, ScreenUpdate};
use crate::effects::UiEffect;
use crate::state::Route;

/// Which input field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

/// Login form state.
#[derive(Debug)]
pub struct LoginScreen {
    pub email: String,
    pub password: String,
    pub focus: LoginField,
    pub phase: FormPhase,
    pub error: Option<String>,
    pub notice: Option<String>,
    /// Token for the in-flight request or the pending redirect timer.
    pub pending: Option<CancellationToken>,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            focus: LoginField::Email,
            phase: FormPhase::Idle,
            error: None,
            notice: None,
            pending: None,
        }
    }

    /// Opens the login screen with the email pre-filled.
    pub fn with_email(email: &str) -> Self {
        Self {
            email: email.to_string(),
            ..Self::new()
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
                    // Abort the in-flight request and go back to the form
                    let effects = self.cancel_effects();
                    self.phase = FormPhase::Idle;
                    ScreenUpdate::with_effects(effects)
                } else {
                    let mut effects = self.cancel_effects();
                    effects.push(UiEffect::Quit);
                    ScreenUpdate::with_effects(effects)
                }
            }
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if self.phase == FormPhase::Idle {
                    ScreenUpdate::navigate(Route::Register)
                } else {
                    ScreenUpdate::stay()
                }
            }
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                ScreenUpdate::stay()
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_next(); // two fields, previous and next coincide
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
        self.phase = FormPhase::Submitting;

        let cancel = CancellationToken::new();
        self.pending = Some(cancel.clone());

        // Empty fields go through as-is; the server answers with a message.
        ScreenUpdate::with_effects(vec![UiEffect::SubmitLogin {
            request: LoginRequest::new(&self.email, &self.password),
            cancel,
        }])
    }

    /// Applies the result of the async login request.
    pub fn handle_outcome(&mut self, result: Result<AuthResponse, ApiError>) -> Vec<UiEffect> {
        if self.phase != FormPhase::Submitting {
            // Cancelled or stale result; ignore.
            return vec![];
        }
        self.pending = None;

        match result {
            Ok(response) => match auth::login_outcome(&response) {
                LoginOutcome::Success(session) => {
                    self.phase = FormPhase::Redirecting;
                    self.notice = Some(auth::MSG_LOGIN_SUCCESS.to_string());

                    let cancel = CancellationToken::new();
                    self.pending = Some(cancel.clone());
                    vec![
                        UiEffect::PersistSession { session },
                        UiEffect::ScheduleNavigate {
                            delay: AUTH_REDIRECT_DELAY,
                            route: Route::Monitoring,
                            cancel,
                        },
                    ]
                }
                LoginOutcome::Rejected(message) => {
                    self.phase = FormPhase::Idle;
                    self.error = Some(message);
                    vec![]
                }
            },
            Err(err) => {
                self.phase = FormPhase::Idle;
                self.error = Some(auth::login_error_message(&err));
                vec![]
            }
        }
    }

    fn focus_next(&mut self) {
        self.focus = match self.focus {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }

    fn field_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}
