//! Screen state machines.
//!
//! Each screen owns its form state and handles its own keys. Handlers
//! return a `ScreenUpdate` naming where to navigate next plus effects
//! for the runtime to execute.

pub mod login;
pub mod monitoring;
pub mod register;

use std::time::Duration;

use crate::effects::UiEffect;
use crate::state::Route;

/// Delay between a successful auth call and leaving the form screen.
pub const AUTH_REDIRECT_DELAY: Duration = Duration::from_millis(1500);

/// Where a form screen is in its submit lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// Accepting input.
    Idle,
    /// A request is in flight.
    Submitting,
    /// Success shown, waiting for the scheduled navigation.
    Redirecting,
}

/// Result of handling a key event in a screen.
#[derive(Debug, Default)]
pub struct ScreenUpdate {
    /// Navigate to this route after applying effects.
    pub next: Option<Route>,
    /// Effects for the runtime to execute.
    pub effects: Vec<UiEffect>,
}

impl ScreenUpdate {
    pub fn stay() -> Self {
        Self::default()
    }

    pub fn navigate(route: Route) -> Self {
        Self {
            next: Some(route),
            effects: Vec::new(),
        }
    }

    pub fn with_effects(effects: Vec<UiEffect>) -> Self {
        Self {
            next: None,
            effects,
        }
    }
}
