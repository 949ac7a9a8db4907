//! TUI application state.

use deskmon_core::config::Config;

use crate::screens::login::LoginScreen;
use crate::screens::monitoring::MonitoringScreen;
use crate::screens::register::RegisterScreen;

/// The screens the app can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Monitoring,
}

/// State of the active screen.
#[derive(Debug)]
pub enum Screen {
    Login(LoginScreen),
    Register(RegisterScreen),
    Monitoring(MonitoringScreen),
}

/// Top-level application state.
///
/// All mutations happen in the reducer; the runtime only reads this
/// for rendering and the quit flag.
#[derive(Debug)]
pub struct AppState {
    /// Base URL shown in the status line.
    pub api_base_url: String,
    /// Dashboard URL opened from the monitoring screen.
    pub monitoring_url: String,
    /// Active screen.
    pub screen: Screen,
    /// Set via the Quit effect; the event loop exits when true.
    pub should_quit: bool,
    /// Animation frame counter for the spinner.
    pub spinner_frame: usize,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            api_base_url: config.effective_api_base_url(),
            monitoring_url: config.effective_monitoring_url(),
            screen: Screen::Login(LoginScreen::new()),
            should_quit: false,
            spinner_frame: 0,
        }
    }

    /// Whether a request or timer is in flight on the active screen.
    ///
    /// Drives the fast poll cadence in the runtime.
    pub fn is_busy(&self) -> bool {
        match &self.screen {
            Screen::Login(screen) => screen.is_busy(),
            Screen::Register(screen) => screen.is_busy(),
            Screen::Monitoring(screen) => screen.is_busy(),
        }
    }
}
