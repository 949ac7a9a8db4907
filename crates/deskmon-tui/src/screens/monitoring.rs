//! Monitoring screen.
//!
//! Shown after login. Opens the Grafana dashboard in the system browser
//! shortly after entry, with the URL displayed as a manual fallback.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio_util::sync::CancellationToken;

use super::ScreenUpdate;
use crate::effects::UiEffect;
use crate::state::Route;

/// Delay before the dashboard opens automatically.
pub const LAUNCH_DELAY: Duration = Duration::from_millis(500);

/// Monitoring screen state.
#[derive(Debug)]
pub struct MonitoringScreen {
    /// Whether the dashboard URL has been opened already.
    pub launched: bool,
    /// Token for the pending launch timer.
    pub pending: Option<CancellationToken>,
}

impl MonitoringScreen {
    /// Enters the screen and schedules the automatic launch.
    pub fn enter() -> (Self, Vec<UiEffect>) {
        let cancel = CancellationToken::new();
        let screen = Self {
            launched: false,
            pending: Some(cancel.clone()),
        };
        let effects = vec![UiEffect::ScheduleLaunch {
            delay: LAUNCH_DELAY,
            cancel,
        }];
        (screen, effects)
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Effects that stop the pending launch timer.
    pub fn cancel_effects(&mut self) -> Vec<UiEffect> {
        match self.pending.take() {
            Some(token) => vec![UiEffect::CancelTask { token }],
            None => vec![],
        }
    }

    /// The launch timer fired.
    pub fn handle_launch_due(&mut self, url: &str) -> Vec<UiEffect> {
        self.pending = None;
        if self.launched {
            return vec![];
        }
        self.launched = true;
        vec![UiEffect::OpenBrowser {
            url: url.to_string(),
        }]
    }

    pub fn handle_key(&mut self, key: KeyEvent, url: &str) -> ScreenUpdate {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            let mut effects = self.cancel_effects();
            effects.push(UiEffect::Quit);
            return ScreenUpdate::with_effects(effects);
        }

        match key.code {
            // Open right away instead of waiting for the timer.
            // Works repeatedly, like clicking the fallback link.
            KeyCode::Enter | KeyCode::Char('o')
                if !key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                let mut effects = self.cancel_effects();
                self.launched = true;
                effects.push(UiEffect::OpenBrowser {
                    url: url.to_string(),
                });
                ScreenUpdate::with_effects(effects)
            }
            KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                ScreenUpdate::navigate(Route::Login)
            }
            KeyCode::Esc | KeyCode::Char('q') => {
                let mut effects = self.cancel_effects();
                effects.push(UiEffect::Quit);
                ScreenUpdate::with_effects(effects)
            }
            _ => ScreenUpdate::stay(),
        }
    }
}
