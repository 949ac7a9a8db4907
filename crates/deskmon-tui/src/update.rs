//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.
//!
//! This is the single source of truth for how events modify state.

use crossterm::event::{Event, KeyEventKind};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::screens::login::LoginScreen;
use crate::screens::monitoring::MonitoringScreen;
use crate::screens::register::RegisterScreen;
use crate::state::{AppState, Route, Screen};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns
/// effects for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            // Advance the spinner only while something is in flight
            if app.is_busy() {
                app.spinner_frame = app.spinner_frame.wrapping_add(1);
            }
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::LoginOutcome { result } => {
            let Screen::Login(screen) = &mut app.screen else {
                return vec![];
            };
            screen.handle_outcome(result)
        }
        UiEvent::RegisterOutcome { result } => {
            let Screen::Register(screen) = &mut app.screen else {
                return vec![];
            };
            screen.handle_outcome(result)
        }
        UiEvent::NavigateDue { route } => navigate(app, route),
        UiEvent::LaunchDue => {
            let url = app.monitoring_url.clone();
            let Screen::Monitoring(screen) = &mut app.screen else {
                return vec![];
            };
            screen.handle_launch_due(&url)
        }
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        // Key release events arrive on some terminals; only act on press/repeat
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: crossterm::event::KeyEvent) -> Vec<UiEffect> {
    let url = app.monitoring_url.clone();
    let update = match &mut app.screen {
        Screen::Login(screen) => screen.handle_key(key),
        Screen::Register(screen) => screen.handle_key(key),
        Screen::Monitoring(screen) => screen.handle_key(key, &url),
    };

    let mut effects = update.effects;
    if let Some(route) = update.next {
        effects.extend(navigate(app, route));
    }
    effects
}

/// Switches the active screen, cancelling whatever the old screen had pending.
fn navigate(app: &mut AppState, route: Route) -> Vec<UiEffect> {
    let mut effects = match &mut app.screen {
        Screen::Login(screen) => screen.cancel_effects(),
        Screen::Register(screen) => screen.cancel_effects(),
        Screen::Monitoring(screen) => screen.cancel_effects(),
    };

    match route {
        Route::Login => {
            // Coming back from a successful registration pre-fills the email
            let email = match &app.screen {
                Screen::Register(screen) => screen.registered_email.clone(),
                Screen::Login(_) | Screen::Monitoring(_) => None,
            };
            app.screen = Screen::Login(match email {
                Some(email) => LoginScreen::with_email(&email),
                None => LoginScreen::new(),
            });
        }
        Route::Register => {
            app.screen = Screen::Register(RegisterScreen::new());
        }
        Route::Monitoring => {
            let (screen, enter_effects) = MonitoringScreen::enter();
            app.screen = Screen::Monitoring(screen);
            effects.extend(enter_effects);
        }
    }

    effects
}
